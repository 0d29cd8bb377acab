use std::str::FromStr;

use rand::Rng;

use crate::constants::ALL_MOVES;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::Move;

/// Parse a whitespace-separated move sequence like `R U R' U'`.
pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(Move::from_str).collect()
}

pub fn scramble_to_str(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw a random move sequence of the given length, rejecting successive
/// moves the solver would also reject (same face, same axis out of
/// order).
pub fn gen_scramble(length: usize) -> Vec<Move> {
    let mut rng = rand::thread_rng();
    let mut seq: Vec<Move> = Vec::with_capacity(length);
    while seq.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..ALL_MOVES.len())];
        if m.allowed_after(seq.last().copied()) {
            seq.push(m);
        }
    }
    seq
}

/// The facelet string reached by applying a scramble to the solved cube.
/// This simulates every move for real; the state is exactly the one the
/// solver will be asked to undo.
pub fn scramble_to_facelets(moves: &[Move]) -> String {
    FaceCube::from(&CubieCube::default().apply_moves(moves)).to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::SOLVED_FACELETS;
    use crate::moves::Move::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap(), m);
        assert!(scramble_from_str("R U X").is_err());
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_to_str(&m), "R U R' U' F L' D' B2 R' U'");
    }

    #[test]
    fn test_gen_scramble() {
        let seq = gen_scramble(25);
        assert_eq!(seq.len(), 25);
        for w in seq.windows(2) {
            assert!(w[1].allowed_after(Some(w[0])));
        }
    }

    #[test]
    fn test_scramble_to_facelets_simulates() {
        assert_eq!(scramble_to_facelets(&[]), SOLVED_FACELETS);

        // the same scramble always lands on the same state, and undoing
        // it move by move returns to the solved cube
        let scramble = scramble_from_str("R U R' U'").unwrap();
        let state = scramble_to_facelets(&scramble);
        assert_eq!(state, scramble_to_facelets(&scramble));
        assert_ne!(state, SOLVED_FACELETS);

        let mut undo: Vec<Move> = scramble.iter().rev().map(|m| m.inverse()).collect();
        let mut full = scramble.clone();
        full.append(&mut undo);
        assert_eq!(scramble_to_facelets(&full), SOLVED_FACELETS);
    }
}
