use crate::color::Rgba;
use crate::surface::{ensure_finite, ensure_finite_points, Surface, SurfaceError};
use glam::Vec2;

/// One captured draw call. `alpha` is the global alpha in effect at the time.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear,
    Rect { origin: Vec2, size: Vec2, color: Rgba, alpha: f32 },
    Circle { center: Vec2, radius: f32, color: Rgba, alpha: f32 },
    Ellipse { center: Vec2, radii: Vec2, color: Rgba, alpha: f32 },
    Polygon { points: Vec<Vec2>, color: Rgba, alpha: f32 },
    Polyline { points: Vec<Vec2>, width: f32, color: Rgba, alpha: f32 },
    Text { text: String, center: Vec2, size: f32, color: Rgba, alpha: f32 },
}

/// Surface that records draw calls instead of producing pixels.
///
/// Used by headless tests to assert what a tick drew and in which order.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    alpha: f32,
    commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Commands issued after the most recent `clear`.
    pub fn since_clear(&self) -> &[DrawCmd] {
        match self.commands.iter().rposition(|c| *c == DrawCmd::Clear) {
            Some(i) => &self.commands[i + 1..],
            None => &self.commands,
        }
    }

    pub fn text_drawn(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.commands.push(DrawCmd::Clear);
        Ok(())
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite_points("fill_rect", &[origin, size])?;
        self.commands.push(DrawCmd::Rect {
            origin,
            size,
            color,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite("fill_circle", &[center.x, center.y, radius])?;
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite_points("fill_ellipse", &[center, radii])?;
        self.commands.push(DrawCmd::Ellipse {
            center,
            radii,
            color,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) -> Result<(), SurfaceError> {
        ensure_finite_points("fill_polygon", points)?;
        self.commands.push(DrawCmd::Polygon {
            points: points.to_vec(),
            color,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        width: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        ensure_finite_points("stroke_polyline", points)?;
        self.commands.push(DrawCmd::Polyline {
            points: points.to_vec(),
            width,
            color,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        center: Vec2,
        size: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        ensure_finite("fill_text", &[center.x, center.y, size])?;
        self.commands.push(DrawCmd::Text {
            text: text.to_owned(),
            center,
            size,
            color,
            alpha: self.alpha,
        });
        Ok(())
    }
}
