//! View controller for Cubeview.
//!
//! [`CubeSimulation`] owns the cube model and drives a [`CubeRenderer`]:
//! coloring cubies from facelet states and animating moves one at a time.

mod animation;
mod renderer;
mod simulation;

pub use renderer::CubeRenderer;
pub use simulation::CubeSimulation;

#[cfg(test)]
mod tests;
