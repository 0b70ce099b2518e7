pub use qrdraw_core::{
    text, Canvas, Ecl, ImageOptions, Meta, Module, Options, OptionsError, PartialOptions, QrCode,
    TypeNumber, Version,
};
pub use qrdraw_encode::{Encoder, EncodingError};
pub use qrdraw_render::{
    decode_image, strip_data_url_header, to_data_url, Color, DrawError, Drawer, ImageLoader,
    LoadError, UrlImageLoader,
};

/// Merge `options` over the defaults and draw them at a device pixel ratio of 1. Returns the PNG as base64 without a
/// data URL header.
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), qrdraw::DrawError> {
/// use qrdraw::PartialOptions;
/// let png = qrdraw::draw_qrcode(PartialOptions {
///     text: Some("https://example.com".into()),
///     ..Default::default()
/// })
/// .await?;
/// println!("data:image/png;base64,{}", png);
/// # Ok(())
/// # }
/// ```
pub async fn draw_qrcode(options: PartialOptions) -> Result<String, DrawError> {
    Drawer::new().draw(&options.resolve()).await
}
