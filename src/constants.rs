use crate::moves::Move::{self, *};

/// 3^7 corner orientations.
pub const N_TWIST: usize = 2187;
/// 2^11 edge orientations.
pub const N_FLIP: usize = 2048;
/// Binomial(12, 4) placements of the four equatorial edges.
pub const N_SLICE: usize = 495;
/// 4! permutations of the equatorial edges within their slice.
pub const N_PERM_4: usize = 24;
/// 8! corner permutations.
pub const N_CORNERS: usize = 40320;
/// 8! permutations of the U-face and D-face edges.
pub const N_UD_EDGES: usize = 40320;
/// 6 faces * 3 turns.
pub const N_MOVE: usize = 18;

/// Diameter of the phase 1 coordinate space.
pub const MAX_PHASE1_DEPTH: usize = 12;
/// Diameter of the phase 2 coordinate space under the restricted moves.
pub const MAX_PHASE2_DEPTH: usize = 18;
/// Default solution-length ceiling; every cube is solvable within it.
pub const MAX_SOLUTION_MOVES: usize = 20;

pub const SOLVED: u16 = 0;

pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, R, R2, R3, F, F2, F3, D, D2, D3, L, L2, L3, B, B2, B3,
];

/// The ten moves that keep a cube inside the G1 subgroup.
pub const PHASE2_MOVES: [Move; 10] = [U, U2, U3, R2, F2, D, D2, D3, L2, B2];

pub const SOLVED_FACELETS: &str =
    "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
