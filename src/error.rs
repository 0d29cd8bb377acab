use thiserror::Error;

/// Everything the engine can report to a caller. No variant is ever turned
/// into a panic inside the library.
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong length, a character outside the six face letters, or a color
    /// that does not occur exactly nine times.
    #[error("malformed facelet string: expected 54 stickers, nine of each of six colors")]
    MalformedInput,

    /// The six center stickers do not name six distinct colors, so no
    /// color-to-face mapping exists.
    #[error("invalid centers: the six center stickers must be pairwise distinct")]
    InvalidCenters,

    /// Well-formed input that denotes no reachable cube: a sticker
    /// combination matching no real cubie, or a violated orientation or
    /// permutation parity invariant.
    #[error("unsolvable cube: state violates a reachability invariant")]
    UnsolvableCube,

    /// The search space was exhausted without a solution inside the move
    /// ceiling. Cannot happen for a reachable state.
    #[error("search exhausted without a solution inside the move ceiling")]
    SearchExhausted,

    /// The caller-supplied time budget ran out before any solution was found.
    #[error("time budget exceeded before a solution was found")]
    Timeout,

    /// A move token outside the `U R F D L B` / `'` / `2` grammar.
    #[error("invalid move token `{0}`")]
    InvalidMoveToken(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),

    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}
