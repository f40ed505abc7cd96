//! Pieces module - tetromino geometry and the rotation system
//!
//! Every kind has four precomputed rotation states. A state is the tight
//! bounding box of the piece's cells plus the pivot it turns around. States
//! are generated once, by turning the spawn definition clockwise around the
//! pivot and re-normalizing, then cached for the life of the process.
//!
//! Pivots are stored in half-cell units so the O piece can turn around the
//! centre of its 2x2 square. T, S, Z, J and L pivot on the middle cell of
//! their three-wide spawn row. I pivots on its second cell rather than its
//! centroid, which is what makes it alternate between the two middle columns.
//!
//! Rotating adjusts the position by the change in pivot offset between the
//! two states, then tries the kick offsets for the transition in order. Kicks are a reduced set: the
//! far guideline tests are left out, so a rotation that would need them is
//! rejected instead.

use std::sync::OnceLock;

use serde::Serialize;

use crate::types::{PieceKind, RotateDirection, Rotation};

/// Offset of a single mino from the top-left of its bounding box, `(row, col)`
pub type MinoOffset = (i32, i32);

/// Translation applied to a piece position, `(d_row, d_col)`
pub type Kick = (i32, i32);

/// Cells of one rotation state with their bounding box size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub cells: [MinoOffset; 4],
    pub height: i32,
    pub width: i32,
}

impl Shape {
    /// Board coordinates of every cell when the box sits at `position`
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .map(move |&(r, c)| (position.row + r, position.col + c))
    }
}

/// A rotation state: shape plus pivot in half-cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    pub shape: Shape,
    pub pivot: (i32, i32),
}

/// Top-left corner of a piece's bounding box on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub position: Position,
}

impl ActivePiece {
    /// Spawn at row 0, horizontally centred, facing north.
    ///
    /// The column is `floor((width - shape_width) / 2)`, so on an even board
    /// a three-wide piece leans left.
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = get_shape(kind, Rotation::North);
        let col = (board_width as i32 - shape.width).div_euclid(2);
        Self {
            kind,
            rotation: Rotation::North,
            position: Position::new(0, col),
        }
    }

    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Same piece translated by `(d_row, d_col)`
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            position: self.position.offset(d_row, d_col),
            ..*self
        }
    }

    /// Board coordinates of the four cells
    pub fn cells(&self) -> [(i32, i32); 4] {
        let shape = self.shape();
        shape
            .cells
            .map(|(r, c)| (self.position.row + r, self.position.col + c))
    }
}

/// Outcome of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub success: bool,
    /// Rotated piece, or the input unchanged on failure
    pub piece: ActivePiece,
    /// Net translation applied to the position (pivot shift plus kick offset)
    pub kick: Option<Kick>,
}

/// Spawn definitions in whole cells, with the pivot in half-cell units
fn spawn_definition(kind: PieceKind) -> ([MinoOffset; 4], (i32, i32)) {
    match kind {
        // Second cell, not the centroid
        PieceKind::I => ([(0, 0), (0, 1), (0, 2), (0, 3)], (0, 2)),
        // Grid centre
        PieceKind::O => ([(0, 0), (0, 1), (1, 0), (1, 1)], (1, 1)),
        PieceKind::T => ([(0, 1), (1, 0), (1, 1), (1, 2)], (2, 2)),
        PieceKind::S => ([(0, 1), (0, 2), (1, 0), (1, 1)], (2, 2)),
        PieceKind::Z => ([(0, 0), (0, 1), (1, 1), (1, 2)], (2, 2)),
        PieceKind::J => ([(0, 0), (1, 0), (1, 1), (1, 2)], (2, 2)),
        PieceKind::L => ([(0, 2), (1, 0), (1, 1), (1, 2)], (2, 2)),
    }
}

/// Shift half-cell coordinates so the bounding box starts at (0, 0)
fn normalize(cells: [(i32, i32); 4], pivot: (i32, i32)) -> RotationState {
    let min_row = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_col = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let cells = cells.map(|(r, c)| ((r - min_row) / 2, (c - min_col) / 2));
    let height = cells.iter().map(|&(r, _)| r).max().unwrap_or(0) + 1;
    let width = cells.iter().map(|&(_, c)| c).max().unwrap_or(0) + 1;
    RotationState {
        shape: Shape {
            cells,
            height,
            width,
        },
        pivot: (pivot.0 - min_row, pivot.1 - min_col),
    }
}

fn build_states(kind: PieceKind) -> [RotationState; 4] {
    let (cells, pivot) = spawn_definition(kind);
    let (pr, pc) = pivot;
    let mut current = cells.map(|(r, c)| (r * 2, c * 2));
    Rotation::ALL.map(|_| {
        let state = normalize(current, pivot);
        // Clockwise quarter turn with rows growing downwards
        current = current.map(|(r, c)| (pr + (c - pc), pc - (r - pr)));
        state
    })
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

fn state_table() -> &'static [[RotationState; 4]; 7] {
    static TABLE: OnceLock<[[RotationState; 4]; 7]> = OnceLock::new();
    TABLE.get_or_init(|| PieceKind::ALL.map(build_states))
}

/// Rotation state for a kind and rotation
pub fn rotation_state(kind: PieceKind, rotation: Rotation) -> &'static RotationState {
    &state_table()[kind_index(kind)][rotation.index()]
}

/// Get the shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static Shape {
    &rotation_state(kind, rotation).shape
}

/// Change in pivot offset from `from` to `to`, in whole cells
pub fn pivot_shift(kind: PieceKind, from: Rotation, to: Rotation) -> Kick {
    let (fr, fc) = rotation_state(kind, from).pivot;
    let (tr, tc) = rotation_state(kind, to).pivot;
    ((tr - fr) / 2, (tc - fc) / 2)
}

/// Kick offsets per transition, `(d_row, d_col)`
/// Indexed by [`kick_index`]
pub type KickTable = [&'static [Kick]; 8];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O never kicks
const O_KICKS: KickTable = [&[(0, 0)]; 8];

/// Shared by J, L, S, T and Z
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    &[(0, 0), (-1, 0), (-1, 1)],
    // 0->3 (N->W, counter-clockwise)
    &[(0, 0), (1, 0), (1, 1)],
    // 1->0 (E->N, counter-clockwise)
    &[(0, 0), (1, 0), (1, -1)],
    // 1->2 (E->S, clockwise)
    &[(0, 0), (1, 0), (1, -1)],
    // 2->1 (S->E, counter-clockwise)
    &[(0, 0), (-1, 0), (-1, 1)],
    // 2->3 (S->W, clockwise)
    &[(0, 0), (1, 0), (1, 1)],
    // 3->2 (W->S, counter-clockwise)
    &[(0, 0), (-1, 0), (-1, -1)],
    // 3->0 (W->N, clockwise)
    &[(0, 0), (-1, 0), (-1, -1)],
];

const I_KICKS: KickTable = [
    // 0->1 (N->E)
    &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3 (N->W)
    &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0 (E->N)
    &[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 (E->S)
    &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1 (S->E)
    &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3 (S->W)
    &[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2 (W->S)
    &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0 (W->N)
    &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Get the kick index for a rotation transition
pub fn kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    }
}

/// Ordered kick offsets for one transition
pub fn kick_offsets(kind: PieceKind, from: Rotation, clockwise: bool) -> &'static [Kick] {
    get_kick_table(kind)[kick_index(from, clockwise)]
}

/// Try to rotate a piece with wall kicks
///
/// `can_place` is the occupancy oracle; the first candidate it accepts wins.
pub fn try_rotate(
    piece: &ActivePiece,
    direction: RotateDirection,
    can_place: impl Fn(&Shape, Position) -> bool,
) -> RotationResult {
    let clockwise = direction == RotateDirection::Clockwise;
    let to = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };

    let shape = get_shape(piece.kind, to);
    let (shift_row, shift_col) = pivot_shift(piece.kind, piece.rotation, to);

    for &(kick_row, kick_col) in kick_offsets(piece.kind, piece.rotation, clockwise) {
        let net = (shift_row + kick_row, shift_col + kick_col);
        let candidate = piece.position.offset(net.0, net.1);
        if can_place(shape, candidate) {
            return RotationResult {
                success: true,
                piece: ActivePiece {
                    kind: piece.kind,
                    rotation: to,
                    position: candidate,
                },
                kick: Some(net),
            };
        }
    }

    RotationResult {
        success: false,
        piece: *piece,
        kick: None,
    }
}
