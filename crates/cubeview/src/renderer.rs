use cubeview_core::cgmath::Matrix3;
use cubeview_core::{CubieId, Face, Rgb, Transform};
use cubeview_view::CubeRenderer;

/// Headless renderer that logs every call at trace level and counts frames.
#[derive(Debug, Default)]
pub(crate) struct LoggingRenderer {
    /// Number of redraws requested.
    pub redraws: usize,
}
impl CubeRenderer for LoggingRenderer {
    fn create_cubie(&mut self, id: CubieId, transform: &Transform, edge_length: f32) {
        let position: [f32; 3] = transform.position.into();
        log::trace!("create {id} at {position:?} with edge length {edge_length}");
    }
    fn set_face_color(&mut self, id: CubieId, slot: Face, color: Rgb) {
        log::trace!("color {slot} slot of {id} {color}");
    }
    fn set_transform(&mut self, id: CubieId, transform: &Transform) {
        let position: [f32; 3] = transform.position.into();
        log::trace!("move {id} to {position:?}");
    }
    fn attach_to_pivot(&mut self, id: CubieId) {
        log::trace!("attach {id}");
    }
    fn set_pivot_rotation(&mut self, rotation: &Matrix3<f32>) {
        let rotation: [[f32; 3]; 3] = (*rotation).into();
        log::trace!("pivot rotation {rotation:?}");
    }
    fn detach_from_pivot(&mut self, id: CubieId) {
        log::trace!("detach {id}");
    }
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
