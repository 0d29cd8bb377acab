//! A two-phase engine for solving the 3x3x3 Rubik's cube: facelet and
//! cubie models, coordinate projections, breadth-first pruning tables and
//! the two-phase search itself, behind a small function boundary
//! ([`validate`], [`solve`](solver::solve), [`apply_moves`]).

pub mod constants;
pub mod coord;
pub mod cubie;
pub mod error;
pub mod facelet;
pub mod moves;
pub mod pruning;
pub mod scramble;
pub mod solver;

use std::fs;
use std::path::Path;

use bincode::{
    config::{self, Configuration},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};
use log::{info, warn};

pub use crate::error::Error;
pub use crate::moves::Move;
pub use crate::solver::{solve, solve_scramble, Solution, SolveOptions};

const CONFIG: Configuration = config::standard();

pub fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let encoded = encode_to_vec(table, CONFIG)?;
    fs::write(path, encoded)?;
    Ok(())
}

pub fn decode_table<T: Decode<()>>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}

/// Fetch a table from the on-disk cache, rebuilding it when the cache is
/// missing or unreadable. Cache trouble is logged, never surfaced: the
/// rebuilt table is always returned.
pub(crate) fn load_or_build<T, F>(fname: &str, build: F) -> T
where
    T: Encode + Decode<()>,
    F: FnOnce() -> T,
{
    if let Ok(bytes) = fs::read(fname) {
        match decode_table(&bytes) {
            Ok(table) => return table,
            Err(e) => warn!("table cache {fname} is unreadable ({e}), rebuilding"),
        }
    }
    info!("creating {fname} table...");
    let table = build();
    if let Err(e) = write_table(fname, &table) {
        warn!("could not cache table {fname}: {e}");
    }
    table
}

/// Structural and group-theoretic solvability check of a facelet string.
pub fn validate(facelets: &str) -> bool {
    facelet::FaceCube::try_from(facelets)
        .ok()
        .and_then(|fc| cubie::CubieCube::try_from(&fc).ok())
        .map(|cc| cc.is_solvable())
        .unwrap_or(false)
}

/// Apply a whitespace-separated move sequence to a facelet string and
/// return the resulting facelet string. Every move is simulated on the
/// cubie level.
pub fn apply_moves(facelets: &str, moves: &str) -> Result<String, Error> {
    let fc = facelet::FaceCube::try_from(facelets)?;
    let cc = cubie::CubieCube::try_from(&fc)?;
    if !cc.is_solvable() {
        return Err(Error::UnsolvableCube);
    }
    let sequence = scramble::scramble_from_str(moves)?;
    Ok(facelet::FaceCube::from(&cc.apply_moves(&sequence)).to_string())
}
