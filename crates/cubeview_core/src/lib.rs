//! Cube model, facelet states, and move notation for a 3x3x3 cube.
//!
//! The model owns 27 cubies at integer lattice points in {-1, 0, 1}³. A
//! [`FaceletState`] describes the 54 sticker colors of the cube, and
//! [`CubeModel::colorize()`] paints them onto the cubies.

#[macro_use]
extern crate lazy_static;

mod colors;
mod error;
mod face;
mod facelets;
mod lattice;
mod model;
mod notation;
mod rgb;

pub use colors::{ColorScheme, StickerColor};
pub use error::{CubeError, MoveError};
pub use face::{Axis, Face};
pub use facelets::{FACELET_COUNT, FaceletState, facelet_index, facelet_location};
pub use lattice::{Coords, Transform, snap_rotation, snap_to_multiple};
pub use model::{CUBIE_COUNT, CubeModel, Cubie, CubieId};
pub use notation::{
    DEFAULT_SCRAMBLE_LENGTH, Move, Turn, format_moves, parse_moves, random_scramble,
};
pub use rgb::Rgb;

/// Re-export of `cgmath`.
pub use cgmath;
