use image::RgbaImage;

use qrdraw_core::{Canvas, ImageOptions};

use crate::layout::Layout;
use crate::surface::Surface;
use crate::Color;

/// Paints a module [Canvas] onto a [Surface] as a grid of solid squares.
pub struct Rasterizer {
    foreground: Color,
    background: Color,
}

impl Rasterizer {
    /// Construct a new [Rasterizer] that paints dark modules black and light ones white.
    pub fn new() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }

    /// Set the color used for dark modules.
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    /// Set the color used for the canvas and for light modules.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Render the `canvas` onto `surface` following `layout`.
    pub fn render<C, S>(&self, surface: &mut S, layout: &Layout, canvas: C)
    where
        C: AsRef<Canvas>,
        S: Surface,
    {
        let canvas = canvas.as_ref();
        surface.fill_rect(layout.canvas_rect(), self.background);
        if layout.module_size() <= 0.0 {
            log::warn!(
                target: "qrdraw",
                "no room left for {} modules inside the padding, skipping the grid",
                canvas.size()
            );
            return;
        }
        for (i, row) in canvas.rows().enumerate() {
            for (j, module) in row.enumerate() {
                let color = if module.is_dark() {
                    self.foreground
                } else {
                    self.background
                };
                surface.fill_rect(layout.module_rect(i, j), color);
            }
        }
        log::debug!(
            target: "qrdraw",
            "painted {0}x{0} modules of {1} px, {2} dark",
            canvas.size(),
            layout.module_size(),
            canvas.dark_count()
        );
    }

    /// Draw `picture` centered on the surface, clipped to a circle when `options.round` is set.
    pub fn composite<S: Surface>(
        &self,
        surface: &mut S,
        layout: &Layout,
        options: &ImageOptions,
        picture: &RgbaImage,
    ) {
        if options.round {
            surface.save();
            surface.clip_circle(layout.image_clip(options));
        }
        surface.draw_image(picture, layout.image_rect(options));
        if options.round {
            surface.restore();
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}
