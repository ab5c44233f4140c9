//! Integer lattice coordinates and snapped transforms.

use std::fmt;

use cgmath::{Matrix3, SquareMatrix, Vector3};
use serde::{Deserialize, Serialize};

use crate::{Axis, Face};

/// Integer lattice coordinates of a cubie, each in {-1, 0, 1}.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coords {
    /// Left-right coordinate.
    pub x: i8,
    /// Down-up coordinate.
    pub y: i8,
    /// Back-front coordinate.
    pub z: i8,
}
impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
impl Coords {
    /// Constructs lattice coordinates.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Returns all 27 lattice points of the cube, iterating over X first, then
    /// Y, then Z.
    pub fn all() -> impl Iterator<Item = Coords> {
        (0..27).map(Self::from_lattice_index)
    }
    /// Returns the lattice point with index `i` in the order of
    /// [`Coords::all()`].
    pub(crate) fn from_lattice_index(i: usize) -> Coords {
        let c = |n: usize| (n % 3) as i8 - 1;
        Coords::new(c(i / 9), c(i / 3), c(i))
    }

    /// Returns the coordinate along `axis`.
    pub fn get(self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
    /// Sets the coordinate along `axis`.
    pub fn set(&mut self, axis: Axis, value: i8) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Returns whether these coordinates lie in the outer layer of `face`.
    pub fn is_on_face(self, face: Face) -> bool {
        self.get(face.axis()) == face.layer()
    }

    /// Rotates the coordinates by `quarter_turns` counterclockwise quarter
    /// turns around `axis`, following the right-hand rule.
    #[must_use]
    pub fn rotate(self, axis: Axis, quarter_turns: i8) -> Coords {
        let Coords { mut x, mut y, mut z } = self;
        for _ in 0..quarter_turns.rem_euclid(4) {
            (x, y, z) = match axis {
                Axis::X => (x, -z, y),
                Axis::Y => (z, y, -x),
                Axis::Z => (-y, x, z),
            };
        }
        Coords { x, y, z }
    }

    /// Returns the center of the cubie at these coordinates, for cubies with
    /// edge length `cubie_size`.
    pub fn to_vector(self, cubie_size: f32) -> Vector3<f32> {
        Vector3::new(self.x as f32, self.y as f32, self.z as f32) * cubie_size
    }
    /// Returns the lattice point nearest to `position`.
    pub fn from_position(position: Vector3<f32>, cubie_size: f32) -> Coords {
        let c = |v: f32| match cubie_size > 0.0 {
            true => (v / cubie_size).round() as i8,
            false => v.round() as i8,
        };
        Coords::new(c(position.x), c(position.y), c(position.z))
    }
}

/// Position and orientation of a cubie.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// Center of the cubie.
    pub position: Vector3<f32>,
    /// Orientation of the cubie, as a rotation matrix.
    pub rotation: Matrix3<f32>,
}
impl Default for Transform {
    fn default() -> Self {
        Self::at(Vector3::new(0.0, 0.0, 0.0))
    }
}
impl Transform {
    /// Returns an unrotated transform at `position`.
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: Matrix3::identity(),
        }
    }

    /// Returns the transform after applying `rotation` around the origin.
    #[must_use]
    pub fn rotated_by(&self, rotation: &Matrix3<f32>) -> Self {
        Self {
            position: rotation * self.position,
            rotation: rotation * self.rotation,
        }
    }

    /// Returns the transform with its position snapped to the nearest multiple
    /// of `cubie_size` and its orientation snapped to the nearest axis-aligned
    /// orientation.
    #[must_use]
    pub fn snapped(&self, cubie_size: f32) -> Self {
        Self {
            position: self.position.map(|v| snap_to_multiple(v, cubie_size)),
            rotation: snap_rotation(self.rotation),
        }
    }

    /// Returns whether the transform has no rotation.
    pub fn is_unrotated(&self) -> bool {
        self.rotation == Matrix3::identity()
    }
}

/// Rounds `value` to the nearest multiple of `step`. Returns `value` unchanged
/// if `step` is not positive.
pub fn snap_to_multiple(value: f32, step: f32) -> f32 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Rounds each entry of a rotation matrix to the nearest integer.
///
/// For a rotation within 45° of an axis-aligned orientation, this yields that
/// orientation exactly, so floating-point drift from incremental rotations is
/// removed.
pub fn snap_rotation(m: Matrix3<f32>) -> Matrix3<f32> {
    Matrix3::from_cols(
        m.x.map(f32::round),
        m.y.map(f32::round),
        m.z.map(f32::round),
    )
}
