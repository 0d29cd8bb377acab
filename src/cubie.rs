use std::fmt;

use rand::Rng;

use crate::constants::*;
use crate::error::Error;
use crate::facelet::{Color, FaceCube, CORNER_COLOR, CORNER_FACELET, EDGE_COLOR, EDGE_FACELET};
use crate::moves::{basic_move_cubes, Move};

/// The eight corner positions/cubies.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

pub const ALL_CORNERS: [Corner; 8] = [
    Corner::URF,
    Corner::UFL,
    Corner::ULB,
    Corner::UBR,
    Corner::DFR,
    Corner::DLF,
    Corner::DBL,
    Corner::DRB,
];

/// The twelve edge positions/cubies. FR, FL, BL, BR form the equatorial
/// slice.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

pub const ALL_EDGES: [Edge; 12] = [
    Edge::UR,
    Edge::UF,
    Edge::UL,
    Edge::UB,
    Edge::DR,
    Edge::DF,
    Edge::DL,
    Edge::DB,
    Edge::FR,
    Edge::FL,
    Edge::BL,
    Edge::BR,
];

/// A cube on the cubie level: which cubie sits in each position (`cp`,
/// `ep`) and how it is rotated relative to the reference orientation
/// (`co` mod 3, `eo` mod 2).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self {
            cp: ALL_CORNERS,
            co: [0; 8],
            ep: ALL_EDGES,
            eo: [0; 12],
        }
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", FaceCube::from(self))
    }
}

/// Binomial coefficient, zero when k > n.
pub(crate) fn c_nk(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut res = 1;
    for i in 0..k {
        res = res * (n - i) / (i + 1);
    }
    res
}

fn rotate_left<T: Copy>(arr: &mut [T], l: usize, r: usize) {
    let tmp = arr[l];
    for i in l..r {
        arr[i] = arr[i + 1];
    }
    arr[r] = tmp;
}

fn rotate_right<T: Copy>(arr: &mut [T], l: usize, r: usize) {
    let tmp = arr[r];
    for i in (l + 1..=r).rev() {
        arr[i] = arr[i - 1];
    }
    arr[l] = tmp;
}

impl CubieCube {
    /// self = self * b on the corners: permute through b's corner cycle and
    /// add b's twist deltas.
    pub fn corner_multiply(&mut self, b: &CubieCube) {
        let mut cp = [Corner::URF; 8];
        let mut co = [0u8; 8];
        for i in 0..8 {
            cp[i] = self.cp[b.cp[i] as usize];
            co[i] = (self.co[b.cp[i] as usize] + b.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// self = self * b on the edges.
    pub fn edge_multiply(&mut self, b: &CubieCube) {
        let mut ep = [Edge::UR; 12];
        let mut eo = [0u8; 12];
        for i in 0..12 {
            ep[i] = self.ep[b.ep[i] as usize];
            eo[i] = (self.eo[b.ep[i] as usize] + b.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// Group multiplication self = self * b.
    pub fn multiply(&mut self, b: &CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// Apply one face turn, returning the resulting state.
    pub fn apply_move(&self, m: Move) -> Self {
        let basic = basic_move_cubes();
        let mut cc = *self;
        for _ in 0..m.power() {
            cc.multiply(&basic[m.face()]);
        }
        cc
    }

    /// Apply a move sequence left to right.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        let mut cc = *self;
        for &m in moves {
            cc = cc.apply_move(m);
        }
        cc
    }

    /// Corner permutation parity (0 even, 1 odd).
    pub fn corner_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..8).rev() {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Edge permutation parity (0 even, 1 odd).
    pub fn edge_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..12).rev() {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Reachability check: every cubie exactly once, twist sum divisible
    /// by 3, flip sum divisible by 2, corner parity equal to edge parity.
    pub fn is_solvable(&self) -> bool {
        let mut corner_seen = [false; 8];
        for c in self.cp {
            corner_seen[c as usize] = true;
        }
        let mut edge_seen = [false; 12];
        for e in self.ep {
            edge_seen[e as usize] = true;
        }
        corner_seen.iter().all(|&s| s)
            && edge_seen.iter().all(|&s| s)
            && self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 == 0
            && self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 == 0
            && self.corner_parity() == self.edge_parity()
    }

    /// Scramble into a uniformly random reachable state.
    pub fn randomize(&mut self) {
        let mut rng = rand::thread_rng();
        self.set_corners(rng.gen_range(0..N_CORNERS) as u16);
        // random full edge permutation via repeated swaps
        self.ep = ALL_EDGES;
        for i in (1..12).rev() {
            self.ep.swap(i, rng.gen_range(0..=i));
        }
        if self.corner_parity() != self.edge_parity() {
            self.ep.swap(0, 1);
        }
        let mut twist_sum = 0;
        for i in 0..7 {
            self.co[i] = rng.gen_range(0..3);
            twist_sum += self.co[i];
        }
        self.co[7] = (3 - twist_sum % 3) % 3;
        let mut flip_sum = 0;
        for i in 0..11 {
            self.eo[i] = rng.gen_range(0..2);
            flip_sum += self.eo[i];
        }
        self.eo[11] = flip_sum % 2;
    }

    // --- phase 1 coordinates ---

    /// Corner orientation coordinate, 0..2187.
    pub fn get_twist(&self) -> u16 {
        let mut t = 0u16;
        for i in 0..7 {
            t = 3 * t + self.co[i] as u16;
        }
        t
    }

    pub fn set_twist(&mut self, mut twist: u16) {
        let mut parity = 0;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            parity += self.co[i];
            twist /= 3;
        }
        self.co[7] = (3 - parity % 3) % 3;
    }

    /// Edge orientation coordinate, 0..2048.
    pub fn get_flip(&self) -> u16 {
        let mut f = 0u16;
        for i in 0..11 {
            f = 2 * f + self.eo[i] as u16;
        }
        f
    }

    pub fn set_flip(&mut self, mut flip: u16) {
        let mut parity = 0;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            parity += self.eo[i];
            flip /= 2;
        }
        self.eo[11] = parity % 2;
    }

    /// Placement of the four slice edges, 0..495; 0 means all four are
    /// home in the equator.
    pub fn get_slice(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        for j in (0..12).rev() {
            if self.ep[j] as usize >= 8 {
                a += c_nk(11 - j, x + 1);
                x += 1;
            }
        }
        a as u16
    }

    pub fn set_slice(&mut self, idx: u16) {
        const SLICE_EDGES: [Edge; 4] = [Edge::FR, Edge::FL, Edge::BL, Edge::BR];
        const OTHER_EDGES: [Edge; 8] = [
            Edge::UR,
            Edge::UF,
            Edge::UL,
            Edge::UB,
            Edge::DR,
            Edge::DF,
            Edge::DL,
            Edge::DB,
        ];
        let mut a = idx as usize;
        let mut slots = [None; 12];
        let mut x = 4;
        for j in 0..12 {
            if x > 0 && a >= c_nk(11 - j, x) {
                a -= c_nk(11 - j, x);
                slots[j] = Some(SLICE_EDGES[4 - x]);
                x -= 1;
            }
        }
        let mut next = 0;
        for j in 0..12 {
            self.ep[j] = slots[j].unwrap_or_else(|| {
                next += 1;
                OTHER_EDGES[next - 1]
            });
        }
    }

    // --- phase 2 coordinates ---

    /// Corner permutation coordinate, 0..40320.
    pub fn get_corners(&self) -> u16 {
        let mut perm = self.cp;
        let mut b = 0u32;
        for j in (1..8).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u32 + 1) * b + k;
        }
        b as u16
    }

    pub fn set_corners(&mut self, idx: u16) {
        self.cp = ALL_CORNERS;
        let mut idx = idx as u32;
        for j in 0..8 {
            let mut k = idx % (j as u32 + 1);
            idx /= j as u32 + 1;
            while k > 0 {
                rotate_right(&mut self.cp, 0, j);
                k -= 1;
            }
        }
    }

    /// Permutation of the eight U- and D-face edges, 0..40320. Only
    /// defined when the slice edges are home (`get_slice() == 0`).
    pub fn get_ud_edges(&self) -> u16 {
        debug_assert_eq!(self.get_slice(), 0);
        let mut perm = [0usize; 8];
        for i in 0..8 {
            perm[i] = self.ep[i] as usize;
        }
        let mut b = 0u32;
        for j in (1..8).rev() {
            let mut k = 0;
            while perm[j] != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u32 + 1) * b + k;
        }
        b as u16
    }

    pub fn set_ud_edges(&mut self, idx: u16) {
        for i in 0..8 {
            self.ep[i] = ALL_EDGES[i];
        }
        let mut idx = idx as u32;
        for j in 0..8 {
            let mut k = idx % (j as u32 + 1);
            idx /= j as u32 + 1;
            while k > 0 {
                rotate_right(&mut self.ep, 0, j);
                k -= 1;
            }
        }
    }

    /// Permutation of the four slice edges within the equator, 0..24.
    /// Only defined when the slice edges are home.
    pub fn get_slice_perm(&self) -> u16 {
        debug_assert_eq!(self.get_slice(), 0);
        let mut perm = [0usize; 4];
        for i in 0..4 {
            perm[i] = self.ep[8 + i] as usize - 8;
        }
        let mut b = 0u32;
        for j in (1..4).rev() {
            let mut k = 0;
            while perm[j] != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u32 + 1) * b + k;
        }
        b as u16
    }

    pub fn set_slice_perm(&mut self, idx: u16) {
        for i in 0..4 {
            self.ep[8 + i] = ALL_EDGES[8 + i];
        }
        let mut idx = idx as u32;
        for j in 0..4 {
            let mut k = idx % (j as u32 + 1);
            idx /= j as u32 + 1;
            while k > 0 {
                rotate_right(&mut self.ep, 8, 8 + j);
                k -= 1;
            }
        }
    }
}

impl From<&[Move]> for CubieCube {
    /// The state reached by applying a move sequence to the solved cube.
    fn from(moves: &[Move]) -> Self {
        CubieCube::default().apply_moves(moves)
    }
}

impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;

    /// Rebuild the cubie-level state from stickers. Fails with
    /// [`Error::UnsolvableCube`] when some sticker combination matches no
    /// real cubie.
    fn try_from(fc: &FaceCube) -> Result<Self, Self::Error> {
        let mut cc = CubieCube::default();
        for i in 0..8 {
            let fac = CORNER_FACELET[i];
            // the twist is where the U or D sticker sits
            let mut ori = 3;
            for o in 0..3 {
                if fc.f[fac[o]] == Color::U || fc.f[fac[o]] == Color::D {
                    ori = o;
                    break;
                }
            }
            if ori == 3 {
                return Err(Error::UnsolvableCube);
            }
            let col1 = fc.f[fac[(ori + 1) % 3]];
            let col2 = fc.f[fac[(ori + 2) % 3]];
            let mut matched = false;
            for j in 0..8 {
                if col1 == CORNER_COLOR[j][1] && col2 == CORNER_COLOR[j][2] {
                    cc.cp[i] = ALL_CORNERS[j];
                    cc.co[i] = ori as u8;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Err(Error::UnsolvableCube);
            }
        }
        for i in 0..12 {
            let fac = EDGE_FACELET[i];
            let mut matched = false;
            for j in 0..12 {
                if fc.f[fac[0]] == EDGE_COLOR[j][0] && fc.f[fac[1]] == EDGE_COLOR[j][1] {
                    cc.ep[i] = ALL_EDGES[j];
                    cc.eo[i] = 0;
                    matched = true;
                    break;
                }
                if fc.f[fac[0]] == EDGE_COLOR[j][1] && fc.f[fac[1]] == EDGE_COLOR[j][0] {
                    cc.ep[i] = ALL_EDGES[j];
                    cc.eo[i] = 1;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Err(Error::UnsolvableCube);
            }
        }
        Ok(cc)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{ALL_MOVES, SOLVED_FACELETS};
    use crate::moves::Move::*;

    #[test]
    fn test_facelet_roundtrip() {
        let s = "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF";
        let fc = FaceCube::try_from(s).unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        assert!(cc.is_solvable());
        assert_eq!(FaceCube::from(&cc).to_string(), s);
    }

    #[test]
    fn test_known_coordinates() {
        let fc =
            FaceCube::try_from("RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF").unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        assert_eq!(cc.get_twist(), 149);
        assert_eq!(cc.get_flip(), 1514);
        assert_eq!(cc.get_slice(), 70);
        assert_eq!(cc.get_corners(), 3935);
    }

    #[test]
    fn test_move_inverse_restores() {
        let start = CubieCube::from(&[R, U, F2, L3, D][..]);
        for m in ALL_MOVES {
            let cc = start.apply_move(m).apply_move(m.inverse());
            assert_eq!(cc, start, "{m} then {} must cancel", m.inverse());
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let mut cc = CubieCube::default();
        for _ in 0..4 {
            cc = cc.apply_move(R);
        }
        assert_eq!(cc, CubieCube::default());
    }

    #[test]
    fn test_coordinate_setters_roundtrip() {
        let mut cc = CubieCube::default();
        for idx in [0u16, 1, 493, 494] {
            cc.set_slice(idx);
            assert_eq!(cc.get_slice(), idx);
        }
        for idx in [0u16, 1, 2186] {
            cc.set_twist(idx);
            assert_eq!(cc.get_twist(), idx);
        }
        for idx in [0u16, 1, 2047] {
            cc.set_flip(idx);
            assert_eq!(cc.get_flip(), idx);
        }
        for idx in [0u16, 1, 5040, 40319] {
            cc.set_corners(idx);
            assert_eq!(cc.get_corners(), idx);
        }
        let mut cc = CubieCube::default();
        for idx in [0u16, 1, 40319] {
            cc.set_ud_edges(idx);
            assert_eq!(cc.get_ud_edges(), idx);
        }
        for idx in [0u16, 1, 23] {
            cc.set_slice_perm(idx);
            assert_eq!(cc.get_slice_perm(), idx);
        }
    }

    #[test]
    fn test_solvable_rejects_twisted_corner() {
        let mut cc = CubieCube::default();
        cc.co[0] = 1;
        assert!(!cc.is_solvable());
    }

    #[test]
    fn test_solvable_rejects_flipped_edge() {
        let mut cc = CubieCube::default();
        cc.eo[0] = 1;
        assert!(!cc.is_solvable());
    }

    #[test]
    fn test_solvable_rejects_parity_mismatch() {
        let mut cc = CubieCube::default();
        cc.ep.swap(0, 1);
        assert!(!cc.is_solvable());
    }

    #[test]
    fn test_randomize_is_solvable() {
        let mut cc = CubieCube::default();
        for _ in 0..20 {
            cc.randomize();
            assert!(cc.is_solvable());
            let s = cc.to_string();
            let back = CubieCube::try_from(&FaceCube::try_from(s.as_str()).unwrap()).unwrap();
            assert_eq!(back, cc);
        }
    }

    #[test]
    fn test_solved_facelets_give_identity() {
        let fc = FaceCube::try_from(SOLVED_FACELETS).unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        assert_eq!(cc, CubieCube::default());
    }
}
