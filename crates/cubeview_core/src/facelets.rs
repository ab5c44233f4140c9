//! 54-character facelet states.
//!
//! A facelet state lists the sticker codes of the cube in six blocks of nine,
//! in the order U, L, F, R, B, D. Within each block, the position of a sticker
//! is a face-specific function of the coordinates of the cubie it sits on:
//!
//! | Face   | Offset within block   |
//! |--------|-----------------------|
//! | R (+X) | `(1-y)*3 + (1-z)`     |
//! | L (-X) | `(1-y)*3 + (z+1)`     |
//! | U (+Y) | `(1+x) + (1+z)*3`     |
//! | D (-Y) | `(1+x) + (1-z)*3`     |
//! | F (+Z) | `(1-y)*3 + (1+x)`     |
//! | B (-Z) | `(1-y)*3 + (1-x)`     |

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use itertools::Itertools;

use crate::{Coords, CubeError, Face, Move};

/// Number of facelets on a 3x3x3 cube.
pub const FACELET_COUNT: usize = 54;

lazy_static! {
    /// Face and cubie coordinates for each facelet index.
    static ref FACELET_LOCATIONS: [(Face, Coords); FACELET_COUNT] = {
        let mut ret = [(Face::U, Coords::default()); FACELET_COUNT];
        for coords in Coords::all() {
            for face in Face::ALL {
                if let Some(i) = facelet_index(face, coords) {
                    ret[i] = (face, coords);
                }
            }
        }
        ret
    };
}

/// Returns the index in a facelet state of the sticker on `face` of the cubie
/// at `coords`, or `None` if the cubie is not on that face.
pub fn facelet_index(face: Face, coords: Coords) -> Option<usize> {
    if !coords.is_on_face(face) {
        return None;
    }
    let Coords { x, y, z } = coords;
    let offset = match face {
        Face::R => (1 - y) * 3 + (1 - z),
        Face::L => (1 - y) * 3 + (z + 1),
        Face::U => (1 + x) + (1 + z) * 3,
        Face::D => (1 + x) + (1 - z) * 3,
        Face::F => (1 - y) * 3 + (1 + x),
        Face::B => (1 - y) * 3 + (1 - x),
    };
    Some(face.block_start() + offset as usize)
}

/// Returns the face and cubie coordinates of the sticker at `index` in a
/// facelet state.
pub fn facelet_location(index: usize) -> Option<(Face, Coords)> {
    FACELET_LOCATIONS.get(index).copied()
}

/// Sticker codes for all 54 facelets of the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceletState([char; FACELET_COUNT]);
impl fmt::Display for FaceletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
impl FromStr for FaceletState {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect_vec();
        let len = chars.len();
        let codes: [char; FACELET_COUNT] = chars
            .try_into()
            .map_err(|_| CubeError::InvalidState { len })?;
        Ok(Self(codes))
    }
}
impl Index<usize> for FaceletState {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
impl Default for FaceletState {
    fn default() -> Self {
        Self::solved()
    }
}
impl FaceletState {
    /// Returns a solved state with white on U, orange on L, green on F, red on
    /// R, blue on B, and yellow on D.
    pub fn solved() -> Self {
        Self::from_face_codes(|face| match face {
            Face::U => 'W',
            Face::L => 'O',
            Face::F => 'G',
            Face::R => 'R',
            Face::B => 'B',
            Face::D => 'Y',
        })
    }
    /// Returns a state with every sticker on each face set to the code
    /// returned by `code_for_face`.
    pub fn from_face_codes(mut code_for_face: impl FnMut(Face) -> char) -> Self {
        let mut codes = [' '; FACELET_COUNT];
        for face in Face::BLOCK_ORDER {
            let start = face.block_start();
            codes[start..start + 9].fill(code_for_face(face));
        }
        Self(codes)
    }

    /// Returns all sticker codes.
    pub fn codes(&self) -> &[char; FACELET_COUNT] {
        &self.0
    }
    /// Returns the nine sticker codes of one face.
    pub fn face(&self, face: Face) -> &[char] {
        let start = face.block_start();
        &self.0[start..start + 9]
    }
    /// Returns the sticker code on `face` of the cubie at `coords`, or `None`
    /// if the cubie is not on that face.
    pub fn code_at(&self, face: Face, coords: Coords) -> Option<char> {
        facelet_index(face, coords).map(|i| self.0[i])
    }

    /// Returns whether each face has nine identical stickers, regardless of
    /// the orientation of the whole cube.
    pub fn is_solved(&self) -> bool {
        Face::BLOCK_ORDER
            .iter()
            .all(|&face| self.face(face).iter().all_equal())
    }

    /// Returns the state after doing `mv`.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Self {
        let axis = mv.axis();
        let quarter_turns = mv.quarter_turns();
        let mut ret = *self;
        for (i, &(face, coords)) in FACELET_LOCATIONS.iter().enumerate() {
            if !coords.is_on_face(mv.face) {
                continue;
            }
            let new_face = face.rotate(axis, quarter_turns);
            let new_coords = coords.rotate(axis, quarter_turns);
            match facelet_index(new_face, new_coords) {
                Some(j) => ret.0[j] = self.0[i],
                None => log::error!("facelet {i} has no destination under {mv}"),
            }
        }
        ret
    }
    /// Returns the state after doing each move in `moves` in order.
    #[must_use]
    pub fn apply_moves(&self, moves: impl IntoIterator<Item = Move>) -> Self {
        moves.into_iter().fold(*self, |state, mv| state.apply_move(mv))
    }
}
