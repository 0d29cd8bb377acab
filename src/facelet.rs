use std::fmt;

use crate::cubie::CubieCube;
use crate::error::Error;

/// The six face colors, named after the face each one belongs to on a
/// solved cube. Also the fixed face order of the facelet string:
/// U1..U9 R1..R9 F1..F9 D1..D9 L1..L9 B1..B9.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

pub const ALL_COLORS: [Color; 6] = [Color::U, Color::R, Color::F, Color::D, Color::L, Color::B];

impl TryFrom<char> for Color {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            _ => Err(Error::MalformedInput),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Facelet positions of the centers, one per face in U R F D L B order.
pub const CENTERS: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// Map of corner positions to their three facelets, clockwise starting
/// with the U or D sticker.
#[rustfmt::skip]
pub const CORNER_FACELET: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF
    [6, 18, 38],  // UFL
    [0, 36, 47],  // ULB
    [2, 45, 11],  // UBR
    [29, 26, 15], // DFR
    [27, 44, 24], // DLF
    [33, 53, 42], // DBL
    [35, 17, 51], // DRB
];

/// Map of edge positions to their two facelets.
#[rustfmt::skip]
pub const EDGE_FACELET: [[usize; 2]; 12] = [
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [1, 46],  // UB
    [32, 16], // DR
    [28, 25], // DF
    [30, 43], // DL
    [34, 52], // DB
    [23, 12], // FR
    [21, 41], // FL
    [50, 39], // BL
    [48, 14], // BR
];

/// Colors carried by each corner cubie, in the facelet order above.
#[rustfmt::skip]
pub const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::R, Color::F],
    [Color::U, Color::F, Color::L],
    [Color::U, Color::L, Color::B],
    [Color::U, Color::B, Color::R],
    [Color::D, Color::F, Color::R],
    [Color::D, Color::L, Color::F],
    [Color::D, Color::B, Color::L],
    [Color::D, Color::R, Color::B],
];

/// Colors carried by each edge cubie.
#[rustfmt::skip]
pub const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::R],
    [Color::U, Color::F],
    [Color::U, Color::L],
    [Color::U, Color::B],
    [Color::D, Color::R],
    [Color::D, Color::F],
    [Color::D, Color::L],
    [Color::D, Color::B],
    [Color::F, Color::R],
    [Color::F, Color::L],
    [Color::B, Color::L],
    [Color::B, Color::R],
];

/// A cube on the facelet level: 54 stickers in the fixed face order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; 54],
}

impl Default for FaceCube {
    fn default() -> Self {
        let mut f = [Color::U; 54];
        for (face, &color) in ALL_COLORS.iter().enumerate() {
            for i in 0..9 {
                f[9 * face + i] = color;
            }
        }
        Self { f }
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;

    /// Parse a 54-character facelet string. The centers define the
    /// color-to-face mapping; for any state reachable by face turns this
    /// mapping is the identity.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.len() != 54 {
            return Err(Error::MalformedInput);
        }
        let mut raw = [Color::U; 54];
        let mut counts = [0usize; 6];
        for (i, c) in s.chars().enumerate() {
            raw[i] = Color::try_from(c)?;
            counts[raw[i] as usize] += 1;
        }
        if counts.iter().any(|&n| n != 9) {
            return Err(Error::MalformedInput);
        }

        // color of each center -> face it sits on
        let mut face_of = [None; 6];
        for (face, &pos) in CENTERS.iter().enumerate() {
            let color = raw[pos] as usize;
            if face_of[color].is_some() {
                return Err(Error::InvalidCenters);
            }
            face_of[color] = Some(ALL_COLORS[face]);
        }

        let mut f = [Color::U; 54];
        for i in 0..54 {
            f[i] = face_of[raw[i] as usize].ok_or(Error::InvalidCenters)?;
        }
        Ok(Self { f })
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.f {
            write!(f, "{}", color)?;
        }
        Ok(())
    }
}

impl From<&CubieCube> for FaceCube {
    /// Project a cubie-level state back onto stickers.
    fn from(cc: &CubieCube) -> Self {
        let mut fc = FaceCube::default();
        for i in 0..8 {
            let j = cc.cp[i] as usize;
            let ori = cc.co[i] as usize;
            for n in 0..3 {
                fc.f[CORNER_FACELET[i][(n + ori) % 3]] = CORNER_COLOR[j][n];
            }
        }
        for i in 0..12 {
            let j = cc.ep[i] as usize;
            let ori = cc.eo[i] as usize;
            for n in 0..2 {
                fc.f[EDGE_FACELET[i][(n + ori) % 2]] = EDGE_COLOR[j][n];
            }
        }
        fc
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::SOLVED_FACELETS;

    #[test]
    fn test_parse_solved() {
        let fc = FaceCube::try_from(SOLVED_FACELETS).unwrap();
        assert_eq!(fc, FaceCube::default());
        assert_eq!(fc.to_string(), SOLVED_FACELETS);
    }

    #[test]
    fn test_parse_roundtrip() {
        let s = "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF";
        let fc = FaceCube::try_from(s).unwrap();
        assert_eq!(fc.to_string(), s);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(matches!(
            FaceCube::try_from("UUU"),
            Err(Error::MalformedInput)
        ));
    }

    #[test]
    fn test_parse_rejects_bad_alphabet() {
        let s = "XUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert!(matches!(FaceCube::try_from(s), Err(Error::MalformedInput)));
    }

    #[test]
    fn test_parse_rejects_bad_counts() {
        // ten U stickers, eight R stickers
        let s = "UUUUUUUUUURRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert!(matches!(FaceCube::try_from(s), Err(Error::MalformedInput)));
    }

    #[test]
    fn test_parse_rejects_duplicate_centers() {
        // swap the R center with an off-center R-face sticker colored U:
        // counts stay nine-of-each but two faces now share a center color
        let mut s: Vec<u8> = SOLVED_FACELETS.bytes().collect();
        s[13] = b'U';
        s[0] = b'R';
        let s = String::from_utf8(s).unwrap();
        assert!(matches!(
            FaceCube::try_from(s.as_str()),
            Err(Error::InvalidCenters)
        ));
    }
}
