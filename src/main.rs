//! Seed replay runner (default binary).
//!
//! Plays an input script through a fresh session and prints the final
//! snapshot as JSON on stdout. Logs go to stderr; set `RUST_LOG=debug` to
//! follow spawns, locks and holds.
//!
//! ```text
//! stackfall --seed abc --script moves.txt
//! echo "left cw hard" | stackfall --seed abc --width 10 --height 20
//! ```

use std::io::Read;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stackfall::core::SessionConfig;
use stackfall::engine::{run_replay, ReplayScript};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ReplayArgs {
    seed: Option<String>,
    script: Option<String>,
    height: Option<usize>,
    width: Option<usize>,
}

fn parse_replay_args(args: &[String]) -> Result<ReplayArgs> {
    let mut out = ReplayArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .ok_or_else(|| anyhow!("missing value for {}", flag))
        };
        match flag {
            "--seed" => out.seed = Some(value()?.clone()),
            "--script" => out.script = Some(value()?.clone()),
            "--height" => {
                let v = value()?;
                out.height = Some(v.parse().map_err(|_| anyhow!("invalid --height value: {}", v))?);
            }
            "--width" => {
                let v = value()?;
                out.width = Some(v.parse().map_err(|_| anyhow!("invalid --width value: {}", v))?);
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 2;
    }
    Ok(out)
}

fn config_from(args: &ReplayArgs) -> SessionConfig {
    let mut config = SessionConfig::from_env();
    if let Some(seed) = &args.seed {
        config.seed = seed.clone();
    }
    if let Some(height) = args.height {
        config.board_height = height;
    }
    if let Some(width) = args.width {
        config.board_width = width;
    }
    config
}

fn read_script(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading script {}", path)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading script from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_replay_args(&args)?;
    let config = config_from(&args);

    let text = read_script(args.script.as_deref())?;
    let script = ReplayScript::parse(&text)?;
    info!(seed = %config.seed, steps = script.len(), "running replay");

    let report = run_replay(config, &script)?;
    println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let parsed = parse_replay_args(&args(&[
            "--seed", "abc", "--script", "moves.txt", "--height", "20", "--width", "10",
        ]))
        .unwrap();
        assert_eq!(
            parsed,
            ReplayArgs {
                seed: Some("abc".to_string()),
                script: Some("moves.txt".to_string()),
                height: Some(20),
                width: Some(10),
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_replay_args(&args(&["--seed"])).is_err());
        assert!(parse_replay_args(&args(&["--width", "wide"])).is_err());
        assert!(parse_replay_args(&args(&["--verbose"])).is_err());
        assert_eq!(parse_replay_args(&[]).unwrap(), ReplayArgs::default());
    }

    #[test]
    fn flags_override_config() {
        let config = config_from(&ReplayArgs {
            seed: Some("cli".to_string()),
            width: Some(12),
            ..ReplayArgs::default()
        });
        assert_eq!(config.seed, "cli");
        assert_eq!(config.board_width, 12);
    }
}
