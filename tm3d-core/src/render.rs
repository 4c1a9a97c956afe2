/// Character-grid rasterizer with per-cell depth resolution
use log::trace;
use nalgebra::Point3;
use thiserror::Error;

use crate::geometry::Mesh;
use crate::projection::Projection;
use crate::transform::{RotationState, Transform};

/// Solid-fill shading glyphs, heaviest (closest) first. The trailing space
/// is part of the ramp.
pub const SOLID_RAMP: &[char] = &['█', '▓', '▒', '░', '▐', '▌', '·', ' '];

/// Wireframe glyphs, heaviest first. Edges only ever use the first entry.
pub const WIREFRAME_RAMP: &[char] = &['#', '+', '*', 'o', '.', '·', ' '];

// Depth normalization for ramp shading. Scene depth is assumed to sit
// roughly within [-DEPTH_OFFSET, DEPTH_OFFSET]; values outside clamp to
// the ramp's extremes.
const DEPTH_OFFSET: f64 = 100.0;
const DEPTH_RANGE: f64 = 200.0;

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    Solid,
    Wireframe,
}

/// An ordered set of shading glyphs, densest to lightest, indexed by
/// normalized view-depth.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRamp {
    glyphs: &'static [char],
}

impl GlyphRamp {
    pub const fn new(glyphs: &'static [char]) -> Self {
        Self { glyphs }
    }

    /// The densest glyph, used for wireframe edges.
    pub fn heaviest(&self) -> char {
        self.glyphs[0]
    }

    /// Map a view-depth to a glyph, clamped at both ends of the ramp.
    pub fn shade(&self, depth: f64) -> char {
        let normalized = (depth + DEPTH_OFFSET) / DEPTH_RANGE;
        let last = self.glyphs.len() as isize - 1;
        let index = (normalized * last as f64) as isize;
        self.glyphs[index.clamp(0, last) as usize]
    }
}

/// Style-to-ramp configuration bound at renderer construction.
#[derive(Debug, Clone, Copy)]
pub struct StylePalette {
    pub solid: GlyphRamp,
    pub wireframe: GlyphRamp,
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            solid: GlyphRamp::new(SOLID_RAMP),
            wireframe: GlyphRamp::new(WIREFRAME_RAMP),
        }
    }
}

/// Degenerate inputs rejected at the render boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("mesh has no triangles")]
    EmptyMesh,
    #[error("mesh bounding box has zero extent")]
    ZeroExtent,
    #[error("render grid dimensions must be positive")]
    EmptyViewport,
}

/// ASCII renderer that rasterizes a mesh into a character grid.
///
/// Holds a character buffer and a parallel depth buffer, both reset at the
/// start of every render call; no frame depends on a prior frame's
/// contents. The depth test keeps the larger view-depth, matching a camera
/// looking down -Z after rotation.
pub struct Renderer {
    width: usize,
    height: usize,
    cells: Vec<char>,
    depths: Vec<f64>,
    palette: StylePalette,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_palette(width, height, StylePalette::default())
    }

    pub fn with_palette(width: usize, height: usize, palette: StylePalette) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cells: vec![' '; size],
            depths: vec![f64::NEG_INFINITY; size],
            palette,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        self.cells.fill(' ');
        self.depths.fill(f64::NEG_INFINITY);
    }

    /// Rasterize the mesh at the given rotation into a newline-joined grid
    /// of `height` rows of exactly `width` characters (no trailing
    /// newline).
    ///
    /// Pure with respect to its inputs: identical arguments produce
    /// byte-identical output.
    pub fn render(
        &mut self,
        mesh: &Mesh,
        rotation: &RotationState,
        style: RenderStyle,
    ) -> Result<String, RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyViewport);
        }
        if mesh.is_empty() {
            return Err(RenderError::EmptyMesh);
        }
        if mesh.max_extent() <= 0.0 {
            return Err(RenderError::ZeroExtent);
        }

        self.clear();

        let projection = Projection::fit(mesh, self.width, self.height);
        let matrix = Transform::rotation_matrix(rotation);

        for triangle in &mesh.triangles {
            let a = projection.apply(&matrix, &triangle.vertices[0]);
            let b = projection.apply(&matrix, &triangle.vertices[1]);
            let c = projection.apply(&matrix, &triangle.vertices[2]);

            match style {
                RenderStyle::Wireframe => {
                    let glyph = self.palette.wireframe.heaviest();
                    self.draw_line(&a, &b, glyph);
                    self.draw_line(&b, &c, glyph);
                    self.draw_line(&c, &a, glyph);
                }
                RenderStyle::Solid => self.fill_triangle(&a, &b, &c),
            }
        }
        trace!(
            "rendered {} triangles into {}x{} grid",
            mesh.triangles.len(),
            self.width,
            self.height
        );

        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.extend(row);
        }
        Ok(out)
    }

    /// Write a glyph at (x, y) if in bounds and the candidate depth beats
    /// the stored one. Larger view-depth wins.
    fn plot(&mut self, x: i64, y: i64, depth: f64, glyph: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let index = y as usize * self.width + x as usize;
        if depth > self.depths[index] {
            self.depths[index] = depth;
            self.cells[index] = glyph;
        }
    }

    /// Depth-tested Bresenham line between the truncated integer screen
    /// coordinates of two projected points. Every pixel carries the average
    /// of the endpoint depths.
    fn draw_line(&mut self, from: &Point3<f64>, to: &Point3<f64>, glyph: char) {
        let (mut x0, mut y0) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);
        let depth = (from.z + to.z) / 2.0;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 > x1 { -1 } else { 1 };
        let sy = if y0 > y1 { -1 } else { 1 };
        let mut err = dx - dy;

        loop {
            self.plot(x0, y0, depth, glyph);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Fill a projected triangle: scan its screen bounding box clipped to
    /// the grid, testing each pixel for containment. Inside pixels carry
    /// the triangle's average view-depth and shade through the solid ramp.
    fn fill_triangle(&mut self, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) {
        let min_x = a.x.min(b.x).min(c.x).max(0.0) as i64;
        let max_x = a.x.max(b.x).max(c.x).min((self.width - 1) as f64) as i64;
        let min_y = a.y.min(b.y).min(c.y).max(0.0) as i64;
        let max_y = a.y.max(b.y).max(c.y).min((self.height - 1) as f64) as i64;

        let depth = (a.z + b.z + c.z) / 3.0;
        let glyph = self.palette.solid.shade(depth);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if point_in_triangle(x as f64, y as f64, a, b, c) {
                    self.plot(x, y, depth, glyph);
                }
            }
        }
    }
}

/// Same-sign half-plane containment test, inclusive on the triangle's
/// boundary: a point is outside only when it falls on the positive side of
/// one edge and the negative side of another.
fn point_in_triangle(px: f64, py: f64, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> bool {
    let sign = |x1: f64, y1: f64, x2: f64, y2: f64| (px - x2) * (y1 - y2) - (x1 - x2) * (py - y2);

    let d1 = sign(a.x, a.y, b.x, b.y);
    let d2 = sign(b.x, b.y, c.x, c.y);
    let d3 = sign(c.x, c.y, a.x, a.y);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}
