//! Logical model of the 27 cubies.

use std::fmt;

use cgmath::{Matrix, Matrix3};

use crate::{ColorScheme, Coords, Face, FaceletState, Rgb, Transform};

/// Number of cubies in a 3x3x3 cube, including the hidden core.
pub const CUBIE_COUNT: usize = 27;

/// Index of a cubie in a [`CubeModel`].
///
/// Cubie IDs are assigned by home position, iterating over X first, then Y,
/// then Z, so the cubie with ID 0 starts at (-1, -1, -1) and the cubie with ID
/// 26 starts at (1, 1, 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub u8);
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie #{}", self.0)
    }
}
impl CubieId {
    /// Returns the ID as an index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
    /// Returns an iterator over all cubie IDs.
    pub fn iter_all() -> impl Iterator<Item = CubieId> {
        (0..CUBIE_COUNT as u8).map(CubieId)
    }
}

/// Single unit cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    home: Coords,
    coords: Coords,
    transform: Transform,
    colors: [Rgb; 6],
}
impl Cubie {
    fn new(home: Coords, cubie_size: f32, hidden: Rgb) -> Self {
        Self {
            home,
            coords: home,
            transform: Transform::at(home.to_vector(cubie_size)),
            colors: [hidden; 6],
        }
    }

    /// Returns the lattice point where the cubie started.
    pub fn home(&self) -> Coords {
        self.home
    }
    /// Returns the lattice point where the cubie is now.
    pub fn coords(&self) -> Coords {
        self.coords
    }
    /// Returns the transform of the cubie at rest.
    ///
    /// While the cubie is turning, its displayed transform is this transform
    /// rotated by the pivot.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
    /// Returns the color of each face slot, indexed by [`Face::slot()`].
    pub fn colors(&self) -> &[Rgb; 6] {
        &self.colors
    }
    /// Returns the color of one face slot.
    pub fn color(&self, slot: Face) -> Rgb {
        self.colors[slot.slot()]
    }

    /// Returns the face slot of the cubie that currently faces `direction`.
    ///
    /// For an unrotated cubie this is `direction` itself.
    pub fn slot_facing(&self, direction: Face) -> Face {
        // The rotation is orthonormal, so its transpose is its inverse.
        let local = self.transform.rotation.transpose() * direction.normal().to_vector(1.0);
        Face::nearest_to(local)
    }
}

/// Model of a 3x3x3 cube made of 27 cubies.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeModel {
    cubies: [Cubie; CUBIE_COUNT],
    cubie_size: f32,
}
impl Default for CubeModel {
    fn default() -> Self {
        Self::new(1.0)
    }
}
impl CubeModel {
    /// Constructs a model with all cubies at their home positions, unrotated,
    /// with every face hidden.
    ///
    /// `cubie_size` must be positive and finite; otherwise 1.0 is used.
    pub fn new(cubie_size: f32) -> Self {
        let cubie_size = if cubie_size > 0.0 && cubie_size.is_finite() {
            cubie_size
        } else {
            log::warn!("invalid cubie size {cubie_size}; using 1.0");
            1.0
        };
        let hidden = ColorScheme::default().hidden;
        Self {
            cubies: std::array::from_fn(|i| {
                Cubie::new(Coords::from_lattice_index(i), cubie_size, hidden)
            }),
            cubie_size,
        }
    }

    /// Returns the distance between the centers of adjacent cubies.
    pub fn cubie_size(&self) -> f32 {
        self.cubie_size
    }
    /// Returns a cubie.
    pub fn cubie(&self, id: CubieId) -> &Cubie {
        &self.cubies[id.index()]
    }
    /// Returns all cubies, indexed by [`CubieId`].
    pub fn cubies(&self) -> &[Cubie; CUBIE_COUNT] {
        &self.cubies
    }
    /// Returns an iterator over all cubies and their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CubieId, &Cubie)> {
        CubieId::iter_all().zip(&self.cubies)
    }
    /// Returns the cubie currently at `coords`, if any.
    pub fn cubie_at(&self, coords: Coords) -> Option<CubieId> {
        self.iter()
            .find(|(_, cubie)| cubie.coords == coords)
            .map(|(id, _)| id)
    }

    /// Returns the cubies currently in the outer layer of `face`.
    pub fn layer(&self, face: Face) -> Vec<CubieId> {
        self.iter()
            .filter(|(_, cubie)| cubie.coords.is_on_face(face))
            .map(|(id, _)| id)
            .collect()
    }

    /// Sets the color of every face slot of every cubie from `state`.
    ///
    /// Each slot facing outward on a face of the cube gets the color of the
    /// corresponding facelet. All other slots get the hidden color.
    pub fn colorize(&mut self, state: &FaceletState, scheme: &ColorScheme) {
        for cubie in &mut self.cubies {
            let mut colors = [scheme.hidden; 6];
            for direction in Face::ALL {
                if let Some(code) = state.code_at(direction, cubie.coords) {
                    colors[cubie.slot_facing(direction).slot()] = scheme.color_for(code);
                }
            }
            cubie.colors = colors;
        }
    }

    /// Rotates cubies around the center of the cube by `rotation`, then snaps
    /// them to the lattice and updates their logical coordinates.
    pub fn rotate_cubies(&mut self, ids: &[CubieId], rotation: &Matrix3<f32>) {
        for &id in ids {
            let cubie_size = self.cubie_size;
            let cubie = &mut self.cubies[id.index()];
            cubie.transform = cubie.transform.rotated_by(rotation).snapped(cubie_size);
            cubie.coords = Coords::from_position(cubie.transform.position, cubie_size);
        }
    }

    /// Moves every cubie back to its home position and orientation. Colors are
    /// not changed.
    pub fn reset(&mut self) {
        for cubie in &mut self.cubies {
            cubie.coords = cubie.home;
            cubie.transform = Transform::at(cubie.home.to_vector(self.cubie_size));
        }
    }

    /// Returns whether every cubie is at its home position and orientation.
    pub fn is_home(&self) -> bool {
        self.cubies
            .iter()
            .all(|cubie| cubie.coords == cubie.home && cubie.transform.is_unrotated())
    }
}
