/// TM3D Core Library - text-mode 3D rendering
///
/// Stateless core for rendering triangle meshes as character grids:
/// ASCII STL parsing, rotation/projection transforms, and a depth-buffered
/// rasterizer with solid and wireframe styles.

pub mod geometry;
pub mod projection;
pub mod render;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use geometry::{Mesh, Triangle};
pub use render::{RenderError, RenderStyle, Renderer, StylePalette};
pub use transform::{RotationState, Transform};

use std::path::Path;

/// Errors from the one-shot file rendering entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Load an ASCII STL file and render it once into a width × height
/// character grid.
pub fn render_stl_file<P: AsRef<Path>>(
    path: P,
    width: usize,
    height: usize,
    rotation: &RotationState,
    style: RenderStyle,
) -> Result<String, Error> {
    let mesh = stl::parse_stl_file(path)?;
    let mut renderer = Renderer::new(width, height);
    Ok(renderer.render(&mesh, rotation, style)?)
}
