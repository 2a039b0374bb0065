//! Canvas2D-backed [`Surface`] for one region's `<canvas>`.

use glam::Vec2;
use keypulse_core::{Rgba, Surface, SurfaceError};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn backend(op: &'static str) -> impl FnOnce(JsValue) -> SurfaceError {
    move |e| SurfaceError::Backend {
        op,
        detail: format!("{:?}", e),
    }
}

pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    alpha: f32,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext(2d) failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("canvas #{} has no 2d context", canvas.id()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("unexpected context type: {:?}", e))?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Ok(Self {
            canvas,
            ctx,
            alpha: 1.0,
        })
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        let mut it = points.iter();
        if let Some(p) = it.next() {
            self.ctx.move_to(p.x as f64, p.y as f64);
        }
        for p in it {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ctx
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        Ok(())
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) -> Result<(), SurfaceError> {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .map_err(backend("arc"))?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) -> Result<(), SurfaceError> {
        self.ctx.begin_path();
        self.ctx
            .ellipse(
                center.x as f64,
                center.y as f64,
                radii.x.max(0.0) as f64,
                radii.y.max(0.0) as f64,
                0.0,
                0.0,
                TAU,
            )
            .map_err(backend("ellipse"))?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) -> Result<(), SurfaceError> {
        if points.len() < 3 {
            return Ok(());
        }
        self.trace(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        width: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        if points.len() < 2 {
            return Ok(());
        }
        self.trace(points);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        center: Vec2,
        size: f32,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        self.ctx
            .set_font(&format!("bold {}px system-ui, sans-serif", size.round().max(1.0)));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_text(text, center.x as f64, center.y as f64)
            .map_err(backend("fillText"))
    }
}
