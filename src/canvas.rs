// Canvas 2D drawing surface, plus the styling that turns a plain canvas into
// a full-viewport backdrop behind the page content

use crate::color::Color;
use crate::renderer::Surface;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKDROP_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
    ("z-index", "-10"),
];

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    // Last styles handed to the context, to skip redundant style parsing
    fill: Option<Color>,
    stroke: Option<(Color, f64)>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(CanvasSurface {
            canvas,
            context,
            fill: None,
            stroke: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Pins the canvas over the whole viewport, behind everything else and
    /// transparent to pointer input.
    pub fn apply_backdrop_style(&self) -> Result<(), JsValue> {
        let style = self.canvas.style();
        for (property, value) in BACKDROP_STYLE.iter() {
            style.set_property(property, value)?;
        }
        self.canvas.set_attribute("aria-hidden", "true")
    }

    fn use_fill(&mut self, color: Color) {
        if self.fill != Some(color) {
            self.context.set_fill_style_str(&color.to_css());
            self.fill = Some(color);
        }
    }

    fn use_stroke(&mut self, color: Color, width: f64) {
        if self.stroke != Some((color, width)) {
            self.context.set_stroke_style_str(&color.to_css());
            self.context.set_line_width(width);
            self.stroke = Some((color, width));
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Resizing the backing store resets every context property
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.fill = None;
        self.stroke = None;
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), JsValue> {
        self.use_fill(color);
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, PI * 2.0)?;
        self.context.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        width: f64,
        color: Color,
    ) -> Result<(), JsValue> {
        self.use_stroke(color, width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        Ok(())
    }
}
