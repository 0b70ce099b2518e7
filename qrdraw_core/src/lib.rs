mod canvas;
mod meta;
mod options;
pub mod qrstandard;
pub mod text;

pub use canvas::{Canvas, Module};
pub use meta::{Ecl, Meta, TypeNumber, Version};
pub use options::{ImageOptions, Options, OptionsError, PartialOptions};

/// QR code symbol as produced by an encoder: the module matrix plus the parameters it was made with.
#[derive(Debug)]
pub struct QrCode {
    canvas: Canvas,
    meta: Meta,
}

impl QrCode {
    /// Construct a new [QrCode]. Returns `None` if the canvas is incompatible with `meta` (e.g.: the [Version] and,
    /// thus, the canvas size).
    pub fn new(canvas: Canvas, meta: Meta) -> Option<Self> {
        if canvas.size() == meta.canvas_size() {
            Some(Self { canvas, meta })
        } else {
            None
        }
    }

    /// Get the underlying canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Get the metadata.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Number of modules along one side of the symbol.
    pub fn module_count(&self) -> usize {
        self.canvas.size()
    }
}

impl AsRef<Canvas> for QrCode {
    fn as_ref(&self) -> &Canvas {
        self.canvas()
    }
}
