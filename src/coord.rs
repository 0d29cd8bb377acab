use std::fmt;

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::{Move, MoveTables};

/// Phase 1 projection of a cube: the three coordinates that must all
/// reach zero for the cube to enter the G1 subgroup.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CoordCube {
    pub flip: u16,
    pub twist: u16,
    pub slice: u16,
}

impl CoordCube {
    /// Project a reachable cubie-level state. The caller is expected to
    /// have run the solvability check; unreachable states are refused
    /// here as well since the encoders assume reachability.
    pub fn from_cubie(cc: &CubieCube) -> Result<Self, Error> {
        if !cc.is_solvable() {
            return Err(Error::UnsolvableCube);
        }
        Ok(Self {
            flip: cc.get_flip(),
            twist: cc.get_twist(),
            slice: cc.get_slice(),
        })
    }

    pub fn is_solved(&self) -> bool {
        self.flip == SOLVED && self.twist == SOLVED && self.slice == SOLVED
    }

    /// Advance all three coordinates through the move tables.
    pub fn phase1_move(&mut self, mv: &MoveTables, m: Move) {
        self.flip = mv.flip[N_MOVE * self.flip as usize + m as usize];
        self.twist = mv.twist[N_MOVE * self.twist as usize + m as usize];
        self.slice = mv.slice[N_MOVE * self.slice as usize + m as usize];
    }
}

impl fmt::Display for CoordCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(flip: {}, twist: {}, slice: {})",
            self.flip, self.twist, self.slice
        )
    }
}

/// Phase 2 projection, defined only inside G1 (slice edges home, all
/// orientations zero).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Phase2Coords {
    pub corners: u16,
    pub ud_edges: u16,
    pub slice_perm: u16,
}

impl Phase2Coords {
    /// Project a cube that phase 1 has brought into G1.
    pub fn from_cubie(cc: &CubieCube) -> Self {
        debug_assert_eq!(cc.get_slice(), 0);
        Self {
            corners: cc.get_corners(),
            ud_edges: cc.get_ud_edges(),
            slice_perm: cc.get_slice_perm(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.corners == SOLVED && self.ud_edges == SOLVED && self.slice_perm == SOLVED
    }

    /// Advance through the move tables; `m` must preserve G1.
    pub fn phase2_move(&mut self, mv: &MoveTables, m: Move) {
        debug_assert!(m.preserves_g1());
        self.corners = mv.corners[N_MOVE * self.corners as usize + m as usize];
        self.ud_edges = mv.ud_edges[N_MOVE * self.ud_edges as usize + m as usize];
        self.slice_perm = mv.slice_perm[N_MOVE * self.slice_perm as usize + m as usize];
    }
}
