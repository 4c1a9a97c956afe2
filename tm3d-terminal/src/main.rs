/// TM3D - terminal STL viewer
///
/// Renders an ASCII STL mesh as rotating text in the terminal.
/// Controls:
///   - WASD / Arrow Keys: rotate (pauses auto-rotation)
///   - Q/E: roll
///   - Space: pause/resume auto-rotation
///   - V: toggle solid/wireframe
///   - R: reset rotation and resume
///   - Esc: quit

use clap::{Parser, ValueEnum};
use log::info;
use std::io;
use std::path::PathBuf;
use tm3d_core::{stl, Mesh, RenderStyle};
use tm3d_terminal::TerminalApp;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Solid,
    Wireframe,
}

impl From<StyleArg> for RenderStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Solid => RenderStyle::Solid,
            StyleArg::Wireframe => RenderStyle::Wireframe,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tm3d", about = "Terminal text-mode 3D mesh viewer")]
struct Args {
    /// ASCII STL file to view; defaults to a built-in cube
    mesh: Option<PathBuf>,

    /// Rasterization style
    #[arg(short, long, value_enum, default_value = "solid")]
    style: StyleArg,

    /// Auto-rotation speed in radians per frame
    #[arg(long, default_value_t = 0.03)]
    speed: f64,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mesh = match &args.mesh {
        Some(path) => stl::parse_stl_file(path)?,
        None => Mesh::cube(2.0),
    };
    info!(
        "loaded mesh '{}' with {} triangles",
        mesh.name,
        mesh.triangles.len()
    );

    let mut app = TerminalApp::new(mesh, args.style.into(), args.speed)?;
    app.run()
}
