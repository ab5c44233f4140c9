//! Face turn notation such as `R`, `U'`, and `F2`.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rand::Rng;

use crate::{Axis, CubeError, Face, MoveError};

/// Number of moves in a scramble when no length is given.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 25;

/// Amount and direction of a face turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    /// 90° clockwise, as seen looking at the face. Written with no suffix.
    Clockwise,
    /// 90° counterclockwise. Written with a `'` suffix.
    CounterClockwise,
    /// 180°. Written with a `2` suffix.
    Double,
}
impl Turn {
    /// Returns the notation suffix for the turn.
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Double => "2",
        }
    }
    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Double => Turn::Double,
        }
    }
    /// Returns the number of counterclockwise quarter turns around the
    /// positive axis of the R, U, or F face.
    fn base_quarter_turns(self) -> i8 {
        match self {
            Turn::Clockwise => -1,
            Turn::CounterClockwise => 1,
            Turn::Double => 2,
        }
    }
}

/// Face turn on a 3x3x3 cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face whose outer layer turns.
    pub face: Face,
    /// How far the layer turns.
    pub turn: Turn,
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}
impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| CubeError::InvalidMove {
            token: s.to_string(),
            reason,
        };

        let mut chars = s.chars();
        let face_char = chars.next().ok_or_else(|| invalid(MoveError::Empty))?;
        let face =
            Face::from_char(face_char).ok_or_else(|| invalid(MoveError::UnknownFace(face_char)))?;
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            // A half turn is the same either way.
            "2" | "2'" => Turn::Double,
            other => return Err(invalid(MoveError::UnknownModifier(other.to_string()))),
        };
        Ok(Move { face, turn })
    }
}
impl Move {
    /// All 18 face turns.
    pub const ALL: [Move; 18] = {
        let faces = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];
        let turns = [Turn::Clockwise, Turn::CounterClockwise, Turn::Double];
        let mut ret = [Move::new(Face::U, Turn::Clockwise); 18];
        let mut i = 0;
        while i < 18 {
            ret[i] = Move::new(faces[i / 3], turns[i % 3]);
            i += 1;
        }
        ret
    };

    /// Constructs a move.
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Returns the axis that the layer rotates around.
    pub fn axis(self) -> Axis {
        self.face.axis()
    }
    /// Returns the number of counterclockwise quarter turns around the
    /// positive direction of [`Move::axis()`].
    ///
    /// Clockwise turns of R, U, and F are negative. L, D, and B look at the
    /// cube from the other side, so their sign is flipped.
    pub fn quarter_turns(self) -> i8 {
        self.turn.base_quarter_turns() * self.face.layer()
    }
    /// Returns the rotation angle in radians around the positive direction of
    /// [`Move::axis()`].
    pub fn angle(self) -> f32 {
        self.quarter_turns() as f32 * FRAC_PI_2
    }
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Move {
        Move::new(self.face, self.turn.inverse())
    }
}

/// Parses a whitespace-separated sequence of moves such as `R U R' U'`.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, CubeError> {
    s.split_whitespace().map(str::parse::<Move>).collect()
}

/// Formats a sequence of moves separated by spaces.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// Returns a sequence of `len` uniformly random face turns.
pub fn random_scramble<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<Move> {
    (0..len)
        .map(|_| Move::ALL[rng.random_range(0..Move::ALL.len())])
        .collect()
}
