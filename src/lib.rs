//! Stackfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so applications can depend
//! on `stackfall::{core, engine, types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use stackfall_core as core;
pub use stackfall_engine as engine;
pub use stackfall_types as types;
