// Creates the full-window background canvas and implements Surface on top of
// its 2D context

use crate::color::Color;
use crate::error::NetworkError;
use crate::renderer::Surface;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

// Fixed, full-viewport, behind page content and invisible to the pointer
const CANVAS_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "0"),
    ("pointer-events", "none"),
];

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Inserts a styled canvas as the first child of <body> and grabs its 2D context
    pub fn attach(document: &Document) -> Result<Self, NetworkError> {
        let body = document.body().ok_or(NetworkError::NoBody)?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| NetworkError::from_js("create_element", e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| NetworkError::Context(String::from("element is not a canvas")))?;

        let style = canvas.style();
        for (property, value) in CANVAS_STYLE.iter() {
            style
                .set_property(property, value)
                .map_err(|e| NetworkError::from_js("style", e))?;
        }

        let context = canvas
            .get_context("2d")
            .map_err(|e| NetworkError::from_js("get_context", e))?
            .ok_or_else(|| NetworkError::Context(String::from("2d context unavailable")))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| NetworkError::Context(String::from("context is not 2d")))?;

        body.insert_before(&canvas, body.first_child().as_ref())
            .map_err(|e| NetworkError::from_js("insert_before", e))?;

        Ok(CanvasSurface { canvas, context })
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn detach(&self) {
        self.canvas.remove();
    }

    fn arc(&self, center: [f64; 2], radius: f64) -> Result<(), NetworkError> {
        self.context.begin_path();
        self.context
            .arc(center[0], center[1], radius, 0.0, PI * 2.0)
            .map_err(|e| NetworkError::from_js("arc", e))
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), NetworkError> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_background(&mut self, width: f64, height: f64, color: Color) -> Result<(), NetworkError> {
        self.context.set_fill_style_str(&color.to_rgba_string(1.0));
        self.context.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), NetworkError> {
        // Canvas would saturate anyway, clamping keeps the CSS string sane
        let alpha = alpha.max(0.0).min(1.0);
        self.context.set_stroke_style_str(&color.to_rgba_string(alpha));
        self.context.set_line_width(line_width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        Ok(())
    }

    fn fill_glow(
        &mut self,
        center: [f64; 2],
        radius: f64,
        color: Color,
        stops: &[(f64, f64)],
    ) -> Result<(), NetworkError> {
        let gradient = self
            .context
            .create_radial_gradient(center[0], center[1], 0.0, center[0], center[1], radius)
            .map_err(|e| NetworkError::from_js("create_radial_gradient", e))?;
        for (offset, alpha) in stops {
            gradient
                .add_color_stop(*offset as f32, &color.to_rgba_string(*alpha))
                .map_err(|e| NetworkError::from_js("add_color_stop", e))?;
        }
        self.context.set_fill_style_canvas_gradient(&gradient);
        self.arc(center, radius)?;
        self.context.fill();
        Ok(())
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<(), NetworkError> {
        self.context.set_fill_style_str(&color.to_rgba_string(1.0));
        self.arc(center, radius)?;
        self.context.fill();
        Ok(())
    }
}

// Current inner size of the window, in CSS pixels
pub fn window_size(window: &Window) -> Result<(f64, f64), NetworkError> {
    let width = window
        .inner_width()
        .map_err(|e| NetworkError::from_js("inner_width", e))?
        .as_f64()
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .map_err(|e| NetworkError::from_js("inner_height", e))?
        .as_f64()
        .unwrap_or(0.0);
    Ok((width, height))
}
