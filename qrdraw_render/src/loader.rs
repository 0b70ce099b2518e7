use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::RgbaImage;
use log::{error, info};
use reqwest::{Client, StatusCode};

use crate::LoadError;

static QRDRAW_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of center images.
///
/// Loading is a single-shot asynchronous operation with no timeout of its own; dropping the returned future
/// abandons it.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Load and decode the image at `url`.
    async fn load(&self, url: &str) -> Result<RgbaImage, LoadError>;
}

/// Loader resolving `data:` URLs, `http(s)://` URLs and local paths (optionally prefixed by `file://`).
#[derive(Debug, Clone)]
pub struct UrlImageLoader {
    client: Client,
}

impl UrlImageLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(QRDRAW_USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            status => {
                error!(
                    "Failed to load image from url {} with status code {:?}",
                    url, status
                );
                Err(LoadError::Status(status.as_u16()))
            }
        }
    }
}

impl Default for UrlImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageLoader for UrlImageLoader {
    async fn load(&self, url: &str) -> Result<RgbaImage, LoadError> {
        let bytes = if let Some(data_url) = url.strip_prefix("data:") {
            info!(target: "qrdraw", "Resolving image from data URL");
            decode_data_url(data_url)?
        } else if url.starts_with("http://") || url.starts_with("https://") {
            info!(target: "qrdraw", "Resolving image: {url}");
            self.fetch(url).await?
        } else {
            let path = url.strip_prefix("file://").unwrap_or(url);
            info!(target: "qrdraw", "Resolving image: {path}");
            tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                path: path.to_string(),
                source,
            })?
        };
        decode_image(&bytes)
    }
}

/// Decode an encoded image into straight-alpha RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Decode the part of a data URL after `data:`. Only base64 payloads are accepted.
fn decode_data_url(data_url: &str) -> Result<Vec<u8>, LoadError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| LoadError::DataUrl("missing ','".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(LoadError::DataUrl(format!(
            "only base64 payloads are supported, got '{}'",
            header
        )));
    }
    BASE64
        .decode(payload.trim())
        .map_err(|e| LoadError::DataUrl(e.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_load_data_url() {
        let url = format!("data:image/png;base64,{}", BASE64.encode(png_bytes(3, 2)));
        let image = UrlImageLoader::new().load(&url).await.unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[tokio::test]
    async fn test_plain_data_url_is_rejected() {
        let err = UrlImageLoader::new()
            .load("data:text/plain,hello")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::DataUrl(_)));
    }

    #[tokio::test]
    async fn test_load_file() {
        let path = std::env::temp_dir().join(format!("qrdraw-loader-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(4, 4)).unwrap();
        let url = format!("file://{}", path.display());
        let image = UrlImageLoader::new().load(&url).await;
        std::fs::remove_file(&path).unwrap();
        assert_eq!(image.unwrap().dimensions(), (4, 4));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = UrlImageLoader::new()
            .load("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_garbage_does_not_decode() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(LoadError::Decode(_))
        ));
    }
}
