use qrdraw_core::{ImageOptions, Options};

/// Axis-aligned rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Circle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Pixel geometry of one drawing, every quantity already scaled by the device pixel ratio.
///
/// All modules share one integer size, `ceil(available / module_count)`, so the grid may run past the padding on the
/// right and bottom edges when the module count does not divide the available space.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    canvas_width: f64,
    canvas_height: f64,
    padding: f64,
    module_size: f64,
    module_count: usize,
    dpr: f64,
}

impl Layout {
    pub fn new(options: &Options, module_count: usize, dpr: f64) -> Self {
        let canvas_width = options.width * dpr;
        let canvas_height = options.height * dpr;
        let padding = options.padding * dpr;
        let module_size = if module_count == 0 {
            0.0
        } else {
            ((canvas_width - 2.0 * padding) / module_count as f64).ceil()
        };
        Self {
            canvas_width,
            canvas_height,
            padding,
            module_size,
            module_count,
            dpr,
        }
    }

    /// Canvas width in physical pixels, possibly fractional.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Canvas height in physical pixels, possibly fractional.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Integer dimensions of the surface to allocate. Fractions are dropped.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.canvas_width.floor() as u32,
            self.canvas_height.floor() as u32,
        )
    }

    /// The whole canvas.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Side of a module in physical pixels. Zero or negative when the padding leaves no room.
    pub fn module_size(&self) -> f64 {
        self.module_size
    }

    pub fn module_count(&self) -> usize {
        self.module_count
    }

    /// Area covered by the module at `(row, col)`, snapped to whole pixels. Both edges come from [Layout::grid_edge],
    /// so the right edge of a module is exactly the left edge of its neighbour.
    pub fn module_rect(&self, row: usize, col: usize) -> Rect {
        let (left, right) = (self.grid_edge(col), self.grid_edge(col + 1));
        let (top, bottom) = (self.grid_edge(row), self.grid_edge(row + 1));
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Pixel boundary in front of the `index`-th module along either axis.
    fn grid_edge(&self, index: usize) -> f64 {
        ((index as f64 * self.module_size).round() + self.padding).round()
    }

    /// Centered placement of the center image.
    pub fn image_rect(&self, image: &ImageOptions) -> Rect {
        let width = image.width * self.dpr;
        let height = image.height * self.dpr;
        Rect::new(
            (self.canvas_width - width) / 2.0,
            (self.canvas_height - height) / 2.0,
            width,
            height,
        )
    }

    /// Clip circle for a round center image. The radius comes from the image width alone.
    pub fn image_clip(&self, image: &ImageOptions) -> Circle {
        let rect = self.image_rect(image);
        let radius = rect.width / 2.0;
        Circle {
            cx: rect.x + radius,
            cy: rect.y + radius,
            radius,
        }
    }
}
