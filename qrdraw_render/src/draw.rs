use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use qrdraw_core::{text, Options};
use qrdraw_encode::Encoder;

use crate::layout::Layout;
use crate::loader::{ImageLoader, UrlImageLoader};
use crate::raster::Rasterizer;
use crate::surface::{PixmapSurface, Surface};
use crate::{Color, DrawError};

/// Draws QR codes from [Options]: encodes the text, paints the module grid on a [PixmapSurface], optionally
/// composites a center image fetched through an [ImageLoader], and hands back the PNG.
///
/// Every call owns its encoder, surface and center image, so one drawer can serve concurrent calls.
pub struct Drawer<L = UrlImageLoader> {
    loader: L,
    dpr: f64,
}

impl Drawer<UrlImageLoader> {
    /// Construct a new [Drawer] with a device pixel ratio of 1 that loads images with [UrlImageLoader].
    pub fn new() -> Self {
        Self {
            loader: UrlImageLoader::new(),
            dpr: 1.0,
        }
    }
}

impl Default for Drawer<UrlImageLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ImageLoader> Drawer<L> {
    /// Load center images with `loader`.
    pub fn with_loader<M: ImageLoader>(self, loader: M) -> Drawer<M> {
        Drawer {
            loader,
            dpr: self.dpr,
        }
    }

    /// Scale every pixel quantity by `dpr`.
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.dpr = dpr;
        self
    }

    /// Get the device pixel ratio.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    /// Draw the code and return the PNG as base64, without any data URL header.
    pub async fn draw(&self, options: &Options) -> Result<String, DrawError> {
        let png = self.draw_png(options).await?;
        Ok(strip_data_url_header(&to_data_url(&png)).to_string())
    }

    /// Draw the code and return the encoded PNG.
    pub async fn draw_png(&self, options: &Options) -> Result<Vec<u8>, DrawError> {
        if !self.dpr.is_finite() || self.dpr <= 0.0 {
            return Err(DrawError::InvalidDevicePixelRatio(self.dpr));
        }
        options.validate()?;

        let qrcode = Encoder::new()
            .with_type_number(options.type_number()?)
            .with_ecl(options.correct_level)
            .encode(text::encode_text(&options.text))?;

        let rasterizer = Rasterizer::new()
            .with_foreground(Color::parse(&options.foreground)?)
            .with_background(Color::parse(&options.background)?);
        let layout = Layout::new(options, qrcode.module_count(), self.dpr);
        let (width, height) = layout.pixel_size();
        let mut surface = PixmapSurface::new(width, height)?;
        rasterizer.render(&mut surface, &layout, &qrcode);

        if options.has_image() {
            let url = &options.image.url;
            log::debug!(target: "qrdraw", "loading center image {}", url);
            let picture = self
                .loader
                .load(url)
                .await
                .map_err(|source| DrawError::ImageLoad {
                    url: url.clone(),
                    source,
                })?;
            rasterizer.composite(&mut surface, &layout, &options.image, &picture);
        }

        let png = surface.encode_png()?;
        log::info!(
            target: "qrdraw",
            "drew {}x{} px QR code ({} B PNG)",
            width,
            height,
            png.len()
        );
        Ok(png)
    }
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

/// Remove a leading `data:image/<subtype>;base64,` header, where `<subtype>` is made of word characters. Anything
/// else is returned unchanged.
/// # Example
/// ```
/// use qrdraw_render::strip_data_url_header;
/// assert_eq!(strip_data_url_header("data:image/png;base64,AAAA"), "AAAA");
/// assert_eq!(strip_data_url_header("data:image/svg+xml;base64,AAAA"), "data:image/svg+xml;base64,AAAA");
/// assert_eq!(strip_data_url_header("AAAA"), "AAAA");
/// ```
pub fn strip_data_url_header(data_url: &str) -> &str {
    let Some(rest) = data_url.strip_prefix("data:image/") else {
        return data_url;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return data_url;
    };
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    if !subtype.is_empty() && subtype.chars().all(is_word) {
        payload
    } else {
        data_url
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::LoadError;
    use async_trait::async_trait;
    use image::RgbaImage;
    use qrdraw_core::{Ecl, ImageOptions};
    use qrdraw_encode::EncodingError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const RED: [u8; 4] = [255, 0, 0, 255];

    /// Serves a solid red picture and counts requests.
    #[derive(Default)]
    struct RedLoader {
        requests: AtomicUsize,
    }

    #[async_trait]
    impl ImageLoader for RedLoader {
        async fn load(&self, _url: &str) -> Result<RgbaImage, LoadError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(RgbaImage::from_pixel(16, 16, image::Rgba(RED)))
        }
    }

    struct FailingLoader;

    #[async_trait]
    impl ImageLoader for FailingLoader {
        async fn load(&self, url: &str) -> Result<RgbaImage, LoadError> {
            Err(LoadError::Custom(format!("cannot reach {}", url)))
        }
    }

    fn decode(base64: &str) -> RgbaImage {
        let png = BASE64.decode(base64).unwrap();
        image::load_from_memory(&png).unwrap().to_rgba8()
    }

    fn with_image(round: bool) -> Options {
        Options {
            text: "https://example.com".into(),
            image: ImageOptions {
                url: "logo.png".into(),
                width: 80.0,
                height: 80.0,
                round,
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_single_letter_fills_canvas() {
        let options = Options {
            text: "A".into(),
            width: 100.0,
            height: 100.0,
            padding: 0.0,
            ..Default::default()
        };
        let image = decode(&Drawer::new().draw(&options).await.unwrap());
        assert_eq!(image.dimensions(), (100, 100));
        // Version 1 has 21 modules, so each one is ceil(100 / 21) = 5 px. The finder pattern starts with a dark ring
        // followed by a light one.
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(4, 4).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_device_pixel_ratio_scales_output() {
        let options = Options {
            text: "A".into(),
            width: 100.0,
            height: 60.0,
            ..Default::default()
        };
        let drawer = Drawer::new().with_device_pixel_ratio(2.0);
        assert_eq!(drawer.device_pixel_ratio(), 2.0);
        let image = decode(&drawer.draw(&options).await.unwrap());
        assert_eq!(image.dimensions(), (200, 120));
    }

    #[tokio::test]
    async fn test_no_url_skips_loading() {
        let loader = RedLoader::default();
        let drawer = Drawer::new().with_loader(loader);
        let options = Options {
            text: "no image".into(),
            ..Default::default()
        };
        drawer.draw(&options).await.unwrap();
        assert_eq!(drawer.loader.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_square_image_fills_its_rectangle() {
        let drawer = Drawer::new().with_loader(RedLoader::default());
        let image = decode(&drawer.draw(&with_image(false)).await.unwrap());
        assert_eq!(drawer.loader.requests.load(Ordering::SeqCst), 1);
        // The image covers 110..190 on both axes.
        assert_eq!(image.get_pixel(111, 111).0, RED);
        assert_eq!(image.get_pixel(150, 150).0, RED);
        assert_eq!(image.get_pixel(188, 188).0, RED);
        assert_ne!(image.get_pixel(105, 105).0, RED);
    }

    #[tokio::test]
    async fn test_round_image_is_clipped() {
        let drawer = Drawer::new().with_loader(RedLoader::default());
        let image = decode(&drawer.draw(&with_image(true)).await.unwrap());
        assert_eq!(image.get_pixel(150, 150).0, RED);
        assert_eq!(image.get_pixel(150, 115).0, RED);
        assert_ne!(image.get_pixel(111, 111).0, RED);
        assert_ne!(image.get_pixel(188, 188).0, RED);
    }

    #[tokio::test]
    async fn test_failed_load_fails_the_drawing() {
        let drawer = Drawer::new().with_loader(FailingLoader);
        let err = drawer.draw(&with_image(true)).await.unwrap_err();
        match err {
            DrawError::ImageLoad { url, source } => {
                assert_eq!(url, "logo.png");
                assert!(matches!(source, LoadError::Custom(_)));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_oversized_text_fails_before_drawing() {
        let drawer = Drawer::new().with_loader(RedLoader::default());
        let options = Options {
            text: "x".repeat(5000),
            correct_level: Ecl::L,
            ..with_image(true)
        };
        let err = drawer.draw(&options).await.unwrap_err();
        assert!(matches!(
            err,
            DrawError::Encoding(EncodingError::DataTooBig(..))
        ));
        assert_eq!(drawer.loader.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bad_color_is_reported() {
        let options = Options {
            foreground: "definitely-not-a-color".into(),
            ..Default::default()
        };
        let err = Drawer::new().draw(&options).await.unwrap_err();
        assert!(matches!(err, DrawError::InvalidColor(..)));
    }

    #[tokio::test]
    async fn test_bad_device_pixel_ratio_is_reported() {
        let drawer = Drawer::new().with_device_pixel_ratio(0.0);
        let err = drawer.draw(&Options::default()).await.unwrap_err();
        assert!(matches!(err, DrawError::InvalidDevicePixelRatio(_)));
    }

    #[tokio::test]
    async fn test_zero_sized_canvas_is_reported() {
        let options = Options {
            width: 0.0,
            ..Default::default()
        };
        let err = Drawer::new().draw(&options).await.unwrap_err();
        assert!(matches!(err, DrawError::Surface(_)));
    }

    #[test]
    fn test_header_subtype_must_be_ascii_word() {
        assert_eq!(strip_data_url_header("data:image/x_icon;base64,AAAA"), "AAAA");
        assert_eq!(
            strip_data_url_header("data:image/pngé;base64,AAAA"),
            "data:image/pngé;base64,AAAA"
        );
        assert_eq!(
            strip_data_url_header("data:image/;base64,AAAA"),
            "data:image/;base64,AAAA"
        );
    }

    #[test]
    fn test_data_url_round_trip() {
        let url = to_data_url(b"\x89PNG");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(BASE64.decode(strip_data_url_header(&url)).unwrap(), b"\x89PNG");
    }
}
