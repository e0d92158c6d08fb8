/// Wireframe rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use objview_core::Mesh;
use std::io::Write;

use crate::projection::{self, Camera};

/// Marker drawn on top of projected vertices
const VERTEX_MARK: char = 'o';

/// Draws a mesh's edges (and optionally its vertices) as terminal characters
pub struct WireframeRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl WireframeRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at (column, row), for inspection.
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, camera: &Camera, show_vertices: bool) {
        let view_projection = camera.projection_matrix() * camera.view_matrix();

        // Each vertex is projected once and shared by all of its edges.
        let projected: Vec<Option<(f32, f32, f32)>> = mesh
            .vertices()
            .iter()
            .map(|v| projection::project(&view_projection, &v.position, self.width, self.height))
            .collect();

        for edge in mesh.edges() {
            if let (Some(a), Some(b)) = (projected[edge.0], projected[edge.1]) {
                self.draw_line(a, b);
            }
        }

        if show_vertices {
            for &(x, y, z) in projected.iter().flatten() {
                // Vertex marks win over edges that pass through the same cell.
                self.plot(x.round() as i64, y.round() as i64, z - f32::EPSILON, VERTEX_MARK);
            }
        }
    }

    /// Bresenham line between two projected points with linear depth.
    fn draw_line(&mut self, from: (f32, f32, f32), to: (f32, f32, f32)) {
        let (x0, y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
        let character = line_char(x1 - x0, y1 - y0);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let steps = dx.max(-dy).max(1) as f32;

        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        let mut step = 0.0;
        loop {
            let depth = from.2 + (to.2 - from.2) * (step / steps);
            self.plot(x, y, depth, character);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1.0;
        }
    }

    fn plot(&mut self, x: i64, y: i64, depth: f32, character: char) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    VERTEX_MARK => Color::Yellow,
                    ' ' => Color::Reset,
                    _ => Color::Cyan,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a glyph that follows the line's slope on screen (rows grow downward).
fn line_char(dx: i64, dy: i64) -> char {
    let (adx, ady) = (dx.abs(), dy.abs());
    if ady * 2 < adx {
        '-'
    } else if adx * 2 < ady {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}
