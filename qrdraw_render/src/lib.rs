mod color;
mod draw;
mod error;
mod layout;
mod loader;
mod raster;
mod surface;

pub use color::Color;
pub use draw::{strip_data_url_header, to_data_url, Drawer};
pub use error::{DrawError, LoadError, SurfaceError};
pub use layout::{Circle, Layout, Rect};
pub use loader::{decode_image, ImageLoader, UrlImageLoader};
pub use raster::Rasterizer;
pub use surface::{PixmapSurface, Surface};
