//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer: each bag holds one of each piece
//! (I, O, T, S, Z, J, L) in shuffled order, dealt left to right.
//!
//! Bags are never reshuffled from mutable generator state. Bag `n` is derived
//! from `(seed, n)` alone, and `n` is recovered from the draw count. Two
//! states built from the same seed therefore agree on every draw, no matter
//! how they were advanced or reconstructed.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BAG_SIZE};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// FNV-1a over the seed text followed by the little-endian bag index.
fn bag_seed(seed: &str, bag_index: u64) -> u32 {
    seed.as_bytes()
        .iter()
        .chain(bag_index.to_le_bytes().iter())
        .fold(FNV_OFFSET_BASIS, |hash, &byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

/// The `bag_index`-th bag for `seed`.
pub fn bag_for(seed: &str, bag_index: u64) -> [PieceKind; BAG_SIZE] {
    let mut rng = SimpleRng::new(bag_seed(seed, bag_index));
    let mut bag = PieceKind::ALL;
    rng.shuffle(&mut bag);
    bag
}

/// The piece at absolute draw position `index` for `seed`.
pub fn nth_piece(seed: &str, index: usize) -> PieceKind {
    bag_for(seed, (index / BAG_SIZE) as u64)[index % BAG_SIZE]
}

/// Immutable randomizer state. Every draw returns a new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomState {
    seed: String,
    /// Kinds left in the current bag, in draw order
    bag: ArrayVec<PieceKind, BAG_SIZE>,
    /// Every kind drawn so far
    history: Vec<PieceKind>,
}

/// Result of a single draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub piece: PieceKind,
    pub next: RandomState,
}

impl RandomState {
    /// Fresh state for `seed`, holding the first bag.
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let bag = bag_for(&seed, 0).into_iter().collect();
        Self {
            seed,
            bag,
            history: Vec::new(),
        }
    }

    /// Draw the next piece.
    ///
    /// An empty bag is replaced by bag `history.len() / 7` before drawing.
    pub fn draw(&self) -> Draw {
        let mut next = self.clone();
        if next.bag.is_empty() {
            let bag_index = (next.history.len() / BAG_SIZE) as u64;
            next.bag = bag_for(&next.seed, bag_index).into_iter().collect();
        }
        let piece = next.bag.remove(0);
        next.history.push(piece);
        Draw { piece, next }
    }

    /// Draw `count` pieces in order, returning them with the final state.
    pub fn draw_many(&self, count: usize) -> (Vec<PieceKind>, RandomState) {
        let mut pieces = Vec::with_capacity(count);
        let mut state = self.clone();
        for _ in 0..count {
            let Draw { piece, next } = state.draw();
            pieces.push(piece);
            state = next;
        }
        (pieces, state)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Kinds remaining in the current bag
    pub fn bag(&self) -> &[PieceKind] {
        &self.bag
    }

    /// All kinds drawn so far, oldest first
    pub fn history(&self) -> &[PieceKind] {
        &self.history
    }

    /// Number of draws consumed
    pub fn draws(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_is_permutation() {
        for bag_index in 0..20 {
            let mut bag = bag_for("seed", bag_index).to_vec();
            bag.sort_by_key(|k| k.code());
            assert_eq!(bag, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_bags_differ_across_indices() {
        let bags: Vec<_> = (0..8).map(|i| bag_for("abc", i)).collect();
        assert!(bags.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_new_state_holds_first_bag() {
        let state = RandomState::new("hello");
        assert_eq!(state.bag(), &bag_for("hello", 0));
        assert!(state.history().is_empty());
        assert_eq!(state.seed(), "hello");
    }

    #[test]
    fn test_draw_does_not_mutate_input() {
        let state = RandomState::new("hello");
        let before = state.clone();
        let draw = state.draw();
        assert_eq!(state, before);
        assert_eq!(draw.next.draws(), 1);
        assert_eq!(draw.next.bag().len(), BAG_SIZE - 1);
        assert_eq!(draw.piece, bag_for("hello", 0)[0]);
    }

    #[test]
    fn test_refill_uses_second_bag() {
        let (pieces, state) = RandomState::new("refill").draw_many(8);
        assert_eq!(pieces[7], bag_for("refill", 1)[0]);
        assert_eq!(state.bag().len(), BAG_SIZE - 1);
        assert_eq!(state.history(), pieces.as_slice());
    }

    #[test]
    fn test_nth_piece_matches_sequential_draws() {
        let (pieces, _) = RandomState::new("nth").draw_many(30);
        for (i, piece) in pieces.iter().enumerate() {
            assert_eq!(*piece, nth_piece("nth", i));
        }
    }
}
