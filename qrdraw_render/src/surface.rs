use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::layout::{Circle, Rect};
use crate::{Color, SurfaceError};

/// Minimal 2D drawing surface, covering the canvas operations the rasterizer needs.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Fill `rect` with a solid `color`, honouring the current clip.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Push the current clip onto the state stack.
    fn save(&mut self);

    /// Restrict further drawing to `circle`, intersected with the current clip.
    fn clip_circle(&mut self, circle: Circle);

    /// Pop the clip pushed by the last [Surface::save]. Does nothing when the stack is empty.
    fn restore(&mut self);

    /// Draw `image` scaled into `dest`, honouring the current clip.
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    /// Encode the current contents as PNG.
    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError>;
}

/// In-memory RGBA surface on top of a `tiny-skia` pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    clip: Option<Mask>,
    saved: Vec<Option<Mask>>,
}

impl PixmapSurface {
    /// Create a transparent surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            clip: None,
            saved: Vec::new(),
        })
    }

    /// Read back the pixel at `(x, y)` with straight alpha.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    /// Whether a clip is currently active.
    pub fn is_clipped(&self) -> bool {
        self.clip.is_some()
    }
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), self.clip.as_ref());
    }

    fn save(&mut self) {
        self.saved.push(self.clip.clone());
    }

    fn clip_circle(&mut self, circle: Circle) {
        log::debug!(target: "qrdraw", "clip circle at {} {} r={}", circle.cx, circle.cy, circle.radius);
        let path = PathBuilder::from_circle(
            circle.cx as f32,
            circle.cy as f32,
            circle.radius as f32,
        );
        let clip = match (self.clip.take(), path) {
            (Some(mut mask), Some(path)) => {
                mask.intersect_path(&path, FillRule::Winding, true, Transform::identity());
                Some(mask)
            }
            (None, Some(path)) => Mask::new(self.width(), self.height()).map(|mut mask| {
                mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
                mask
            }),
            // A degenerate circle clips everything away.
            (_, None) => Mask::new(self.width(), self.height()),
        };
        self.clip = clip;
    }

    fn restore(&mut self) {
        if let Some(clip) = self.saved.pop() {
            self.clip = clip;
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        log::debug!(
            target: "qrdraw",
            "draw image {}x{} at {} {} as {}x{}",
            image.width(),
            image.height(),
            dest.x,
            dest.y,
            dest.width,
            dest.height
        );
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let Some(source) = premultiplied(image) else {
            return;
        };
        let transform = Transform::from_translate(dest.x as f32, dest.y as f32).pre_scale(
            (dest.width / image.width() as f64) as f32,
            (dest.height / image.height() as f64) as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            transform,
            self.clip.as_ref(),
        );
    }

    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        Ok(self.pixmap.encode_png()?)
    }
}

/// Convert a straight-alpha image into a premultiplied pixmap. Returns `None` for empty images.
fn premultiplied(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}
