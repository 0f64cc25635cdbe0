/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point3;
use std::io::Write;
use wirecube_core::{Camera, DrawPrimitive, Frame, PrimitiveKind, Role};

/// Marker drawn at the world origin
const ORIGIN_MARKER: char = '+';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Renderer that draws projected line primitives as terminal characters
pub struct LineRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Character at a cell, if it is on screen
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x].ch)
        } else {
            None
        }
    }

    /// Number of cells that are not blank
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.ch != ' ').count()
    }

    pub fn render_frame(&mut self, frame: &Frame, camera: &Camera) {
        for primitive in &frame.primitives {
            self.render_primitive(primitive, camera);
        }
        self.render_origin(camera);
    }

    fn render_primitive(&mut self, primitive: &DrawPrimitive, camera: &Camera) {
        let color = match primitive.role {
            Role::FrontFace => Color::White,
            Role::BackFace => Color::Grey,
            Role::Edge(_) => Color::Cyan,
        };
        let points = &primitive.points;

        match primitive.kind {
            PrimitiveKind::LineLoop => {
                for (i, a) in points.iter().enumerate() {
                    let b = &points[(i + 1) % points.len()];
                    self.render_segment(a, b, camera, color);
                }
            }
            PrimitiveKind::Lines => {
                for pair in points.chunks_exact(2) {
                    self.render_segment(&pair[0], &pair[1], camera, color);
                }
            }
        }
    }

    fn render_segment(&mut self, a: &Point3<f32>, b: &Point3<f32>, camera: &Camera, color: Color) {
        let (w, h) = (self.width as u32, self.height as u32);
        // Segments with a clipped end are dropped whole
        if let (Some(a), Some(b)) = (
            camera.project_to_screen(a, w, h),
            camera.project_to_screen(b, w, h),
        ) {
            self.draw_segment(a, b, color);
        }
    }

    fn render_origin(&mut self, camera: &Camera) {
        let (w, h) = (self.width as u32, self.height as u32);
        if let Some((x, y)) = camera.project_to_screen(&Point3::origin(), w, h) {
            self.plot(x, y, ORIGIN_MARKER, Color::Red);
        }
    }

    /// Rasterize a screen-space segment with a DDA walk
    pub fn draw_segment(&mut self, a: (f32, f32), b: (f32, f32), color: Color) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let ch = slope_char(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(a.0 + dx * t, a.1 + dy * t, ch, color);
        }
    }

    fn plot(&mut self, x: f32, y: f32, ch: char, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { ch, color };
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        writer.queue(ResetColor)?;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if cell.ch != ' ' && cell.color != current {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                writer.queue(Print(cell.ch))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a line character for a screen-space direction (y grows downward)
fn slope_char(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}
