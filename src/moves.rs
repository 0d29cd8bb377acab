use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::Move::*;
use crate::constants::*;
use crate::cubie::Corner::*;
use crate::cubie::CubieCube;
use crate::cubie::Edge::*;
use crate::error::Error;
use crate::load_or_build;

/// The 18 face turns. `U` is a clockwise quarter turn of the up face,
/// `U2` the half turn, `U3` the counter-clockwise quarter turn.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            R3 => write!(f, "R'"),
            F3 => write!(f, "F'"),
            D3 => write!(f, "D'"),
            L3 => write!(f, "L'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(U),
            "U2" => Ok(U2),
            "U'" => Ok(U3),
            "R" => Ok(R),
            "R2" => Ok(R2),
            "R'" => Ok(R3),
            "F" => Ok(F),
            "F2" => Ok(F2),
            "F'" => Ok(F3),
            "D" => Ok(D),
            "D2" => Ok(D2),
            "D'" => Ok(D3),
            "L" => Ok(L),
            "L2" => Ok(L2),
            "L'" => Ok(L3),
            "B" => Ok(B),
            "B2" => Ok(B2),
            "B'" => Ok(B3),
            _ => Err(Error::InvalidMoveToken(s.to_string())),
        }
    }
}

impl Move {
    /// Face index 0..6 in U R F D L B order.
    pub fn face(self) -> usize {
        self as usize / 3
    }

    /// Number of quarter turns this move applies, 1..=3.
    pub fn power(self) -> usize {
        self as usize % 3 + 1
    }

    /// The move undoing this one.
    pub fn inverse(self) -> Self {
        ALL_MOVES[3 * self.face() + (2 - self as usize % 3)]
    }

    /// Whether this move keeps a G1 cube inside G1: any turn of U or D,
    /// half turns elsewhere.
    pub fn preserves_g1(self) -> bool {
        PHASE2_MOVES.contains(&self)
    }

    /// Move-order rule shared by the search and the scramble generator:
    /// after `prev`, forbid a second turn of the same face and the
    /// same-axis pair in non-canonical order (D before U, L before R,
    /// B before F).
    pub fn allowed_after(self, prev: Option<Move>) -> bool {
        match prev {
            None => true,
            Some(p) => {
                let diff = p.face() as i8 - self.face() as i8;
                diff != 0 && diff != 3
            }
        }
    }
}

/// The six basic quarter turns as permutation + orientation-delta cubes.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

pub fn basic_move_cubes() -> [CubieCube; 6] {
    [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE]
}

/// Transition tables mapping (coordinate, move) to the successor
/// coordinate, one row of 18 entries per coordinate value. The
/// `ud_edges` and `slice_perm` tables are filled for the G1-preserving
/// moves only; the other columns stay zero and are never read.
pub struct MoveTables {
    pub twist: Vec<u16>,
    pub flip: Vec<u16>,
    pub slice: Vec<u16>,
    pub corners: Vec<u16>,
    pub ud_edges: Vec<u16>,
    pub slice_perm: Vec<u16>,
}

impl MoveTables {
    pub fn new() -> Self {
        Self {
            twist: load_or_build("tables/move_twist", build_twist_move),
            flip: load_or_build("tables/move_flip", build_flip_move),
            slice: load_or_build("tables/move_slice", build_slice_move),
            corners: load_or_build("tables/move_corners", build_corners_move),
            ud_edges: load_or_build("tables/move_ud_edges", build_ud_edges_move),
            slice_perm: load_or_build("tables/move_slice_perm", build_slice_perm_move),
        }
    }
}

impl Default for MoveTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Sweep one coordinate space with the six basic cubes. Three successive
/// multiplies give the quarter, half and counter turn of a face; the
/// fourth restores the face so the working cube is clean for the next one.
fn sweep_coordinate(
    count: usize,
    set: impl Fn(&mut CubieCube, u16),
    get: impl Fn(&CubieCube) -> u16,
    mult: impl Fn(&mut CubieCube, &CubieCube),
    record_all: bool,
) -> Vec<u16> {
    let basic = basic_move_cubes();
    let mut table = vec![0; count * N_MOVE];
    let mut a = CubieCube::default();
    for i in 0..count {
        set(&mut a, i as u16);
        for face in 0..6 {
            for k in 0..3 {
                mult(&mut a, &basic[face]);
                let m = ALL_MOVES[3 * face + k];
                if record_all || m.preserves_g1() {
                    table[N_MOVE * i + 3 * face + k] = get(&a);
                }
            }
            mult(&mut a, &basic[face]);
        }
    }
    table
}

/// Corner orientations, 0 <= twist < 2187; twist = 0 throughout phase 2.
fn build_twist_move() -> Vec<u16> {
    sweep_coordinate(
        N_TWIST,
        CubieCube::set_twist,
        CubieCube::get_twist,
        |a, b| a.corner_multiply(b),
        true,
    )
}

/// Edge orientations, 0 <= flip < 2048; flip = 0 throughout phase 2.
fn build_flip_move() -> Vec<u16> {
    sweep_coordinate(
        N_FLIP,
        CubieCube::set_flip,
        CubieCube::get_flip,
        |a, b| a.edge_multiply(b),
        true,
    )
}

/// Placements of the four equatorial edges, 0 <= slice < 495; slice = 0
/// throughout phase 2.
fn build_slice_move() -> Vec<u16> {
    sweep_coordinate(
        N_SLICE,
        CubieCube::set_slice,
        CubieCube::get_slice,
        |a, b| a.edge_multiply(b),
        true,
    )
}

/// Corner permutations, 0 <= corners < 40320. Defined under all moves,
/// consumed by phase 2.
fn build_corners_move() -> Vec<u16> {
    sweep_coordinate(
        N_CORNERS,
        CubieCube::set_corners,
        CubieCube::get_corners,
        |a, b| a.corner_multiply(b),
        true,
    )
}

/// Permutations of the eight U/D edges. Phase 2 columns only: the
/// coordinate is closed under exactly the G1-preserving moves.
fn build_ud_edges_move() -> Vec<u16> {
    sweep_coordinate(
        N_UD_EDGES,
        CubieCube::set_ud_edges,
        CubieCube::get_ud_edges,
        |a, b| a.edge_multiply(b),
        false,
    )
}

/// Permutations of the slice edges within the equator. Phase 2 columns
/// only.
fn build_slice_perm_move() -> Vec<u16> {
    sweep_coordinate(
        N_PERM_4,
        CubieCube::set_slice_perm,
        CubieCube::get_slice_perm,
        |a, b| a.edge_multiply(b),
        false,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_move_token_grammar() {
        assert_eq!(Move::from_str("U").unwrap(), U);
        assert_eq!(Move::from_str("R'").unwrap(), R3);
        assert_eq!(Move::from_str("F2").unwrap(), F2);
        assert!(Move::from_str("M").is_err());
        assert!(Move::from_str("U3").is_err());
        assert!(Move::from_str("R2'").is_err());
        assert_eq!(R3.to_string(), "R'");
        assert_eq!(B2.to_string(), "B2");
    }

    #[test]
    fn test_move_inverse() {
        assert_eq!(U.inverse(), U3);
        assert_eq!(U3.inverse(), U);
        assert_eq!(F2.inverse(), F2);
        for m in ALL_MOVES {
            assert_eq!(m.inverse().inverse(), m);
        }
    }

    #[test]
    fn test_allowed_after() {
        assert!(U.allowed_after(None));
        assert!(!U2.allowed_after(Some(U)));
        assert!(D.allowed_after(Some(U)));
        assert!(!U.allowed_after(Some(D)));
        assert!(!L2.allowed_after(Some(L)));
        assert!(R.allowed_after(Some(L)));
        assert!(!R.allowed_after(Some(R3)));
    }

    #[test]
    fn test_build_twist_move() {
        let twist = build_twist_move();
        assert_eq!(twist.len(), 39366);
        assert_eq!(twist[U as usize], 0); // U twists nothing
        assert_eq!(twist[R as usize], 1494);
        assert_eq!(twist[39], 1505);
        assert_eq!(twist[393], 158);
    }

    #[test]
    fn test_build_flip_move() {
        let flip = build_flip_move();
        assert_eq!(flip.len(), 36864);
        assert_eq!(flip[R as usize], 0); // R flips nothing
        assert_eq!(flip[F as usize], 550); // F flips UF, DF, FR, FL
        assert_eq!(flip[36], 2);
        assert_eq!(flip[368], 54);
    }

    #[test]
    fn test_build_slice_move() {
        let slice = build_slice_move();
        assert_eq!(slice.len(), N_SLICE * N_MOVE);
        // R lifts FR and BR out of the equator
        assert_eq!(slice[R as usize], 367);
        // phase 2 moves fix slice = 0
        for m in PHASE2_MOVES {
            assert_eq!(slice[m as usize], 0);
        }
    }

    #[test]
    fn test_build_corners_move() {
        let corners = build_corners_move();
        assert_eq!(corners.len(), 725760);
        assert_eq!(corners[U as usize], 6);
        assert_eq!(corners[72], 10);
        assert_eq!(corners[7], 157);
    }

    #[test]
    fn test_build_ud_edges_move() {
        let ud = build_ud_edges_move();
        assert_eq!(ud.len(), N_UD_EDGES * N_MOVE);
        assert_eq!(ud[U as usize], 6);
        // U then U' returns to the identity
        let after_u = ud[U as usize] as usize;
        assert_eq!(ud[N_MOVE * after_u + U3 as usize], 0);
    }

    #[test]
    fn test_build_slice_perm_move() {
        let sp = build_slice_perm_move();
        assert_eq!(sp.len(), N_PERM_4 * N_MOVE);
        // U and D do not touch the equator
        assert_eq!(sp[U as usize], 0);
        assert_eq!(sp[D as usize], 0);
        // R2 swaps FR and BR, its own inverse
        let after = sp[R2 as usize] as usize;
        assert_ne!(after, 0);
        assert_eq!(sp[N_MOVE * after + R2 as usize], 0);
    }
}
