use cgmath::Matrix3;
use cubeview_core::{CubieId, Face, Rgb, Transform};

/// Graphics backend that displays the cube.
///
/// The renderer owns one mesh per cubie and a single pivot at the center of
/// the cube. A cubie attached to the pivot is displayed at its rest transform
/// rotated by the pivot rotation. Attaching and detaching must preserve the
/// cubie's displayed transform.
pub trait CubeRenderer {
    /// Creates the mesh for a cubie with edge length `edge_length`.
    fn create_cubie(&mut self, id: CubieId, transform: &Transform, edge_length: f32);
    /// Sets the color of one face slot of a cubie.
    fn set_face_color(&mut self, id: CubieId, slot: Face, color: Rgb);
    /// Sets the rest transform of a cubie.
    fn set_transform(&mut self, id: CubieId, transform: &Transform);

    /// Attaches a cubie to the pivot.
    fn attach_to_pivot(&mut self, id: CubieId);
    /// Sets the rotation of the pivot around the center of the cube.
    fn set_pivot_rotation(&mut self, rotation: &Matrix3<f32>);
    /// Detaches a cubie from the pivot.
    fn detach_from_pivot(&mut self, id: CubieId);

    /// Requests that the scene be redrawn.
    fn request_redraw(&mut self);
}

/// Headless renderer that does nothing.
impl CubeRenderer for () {
    fn create_cubie(&mut self, _id: CubieId, _transform: &Transform, _edge_length: f32) {}
    fn set_face_color(&mut self, _id: CubieId, _slot: Face, _color: Rgb) {}
    fn set_transform(&mut self, _id: CubieId, _transform: &Transform) {}
    fn attach_to_pivot(&mut self, _id: CubieId) {}
    fn set_pivot_rotation(&mut self, _rotation: &Matrix3<f32>) {}
    fn detach_from_pivot(&mut self, _id: CubieId) {}
    fn request_redraw(&mut self) {}
}
