//! 2D canvas painter (browser only)

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame::RenderFrame;

const BASKET_COLOR: &str = "#3498db";

/// Paints `RenderFrame`s onto the game canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Webcam feed drawn underneath the game, if the pose model provides one
    background: Option<HtmlCanvasElement>,
    background_alpha: f64,
}

impl CanvasRenderer {
    /// Wrap the canvas' 2D context. None if the browser refuses one.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            background: None,
            background_alpha: 0.5,
        })
    }

    pub fn set_background(&mut self, canvas: Option<HtmlCanvasElement>) {
        self.background = canvas;
    }

    pub fn set_background_alpha(&mut self, alpha: f32) {
        self.background_alpha = alpha.clamp(0.0, 1.0) as f64;
    }

    /// Clear (or paint the webcam) and draw the frame
    pub fn render(&self, frame: &RenderFrame) {
        let ctx = &self.ctx;
        let (w, h) = (frame.width as f64, frame.height as f64);

        match &self.background {
            Some(webcam) => {
                ctx.clear_rect(0.0, 0.0, w, h);
                ctx.set_global_alpha(self.background_alpha);
                ctx.draw_image_with_html_canvas_element_and_dw_and_dh(webcam, 0.0, 0.0, w, h)
                    .ok();
                ctx.set_global_alpha(1.0);
            }
            None => ctx.clear_rect(0.0, 0.0, w, h),
        }

        self.draw_basket(frame);
        self.draw_items(frame);
    }

    /// Basket: half-disc opening upward, labelled
    fn draw_basket(&self, frame: &RenderFrame) {
        let ctx = &self.ctx;
        let basket = &frame.basket;
        let (x, y) = (basket.pos.x as f64, basket.pos.y as f64);

        ctx.set_fill_style_str(BASKET_COLOR);
        ctx.begin_path();
        ctx.arc_with_anticlockwise(x, y, basket.radius as f64, 0.0, PI, false)
            .ok();
        ctx.fill();

        ctx.set_fill_style_str("white");
        ctx.set_font("14px Arial");
        ctx.set_text_align("center");
        ctx.fill_text("Bowl", x, y - 5.0).ok();
    }

    fn draw_items(&self, frame: &RenderFrame) {
        let ctx = &self.ctx;
        ctx.set_text_align("center");

        for item in &frame.items {
            let (x, y) = (item.pos.x as f64, item.pos.y as f64);

            ctx.set_fill_style_str(item.color);
            ctx.begin_path();
            ctx.arc(x, y, item.radius as f64, 0.0, PI * 2.0).ok();
            ctx.fill();

            ctx.set_font("20px Arial");
            ctx.fill_text(item.icon, x, y + 7.0).ok();
        }
    }
}
