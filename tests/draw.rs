use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::RgbaImage;

use qrdraw::{draw_qrcode, DrawError, Ecl, EncodingError, Encoder, ImageOptions, PartialOptions};

fn decode(payload: &str) -> RgbaImage {
    let png = BASE64.decode(payload).unwrap();
    image::load_from_memory(&png).unwrap().to_rgba8()
}

#[tokio::test]
async fn defaults_draw_a_300px_code() {
    let payload = draw_qrcode(PartialOptions {
        text: Some("hello".into()),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(!payload.starts_with("data:"));
    let image = decode(&payload);
    assert_eq!(image.dimensions(), (300, 300));
    // Padding is background, the top-left finder pattern starts right after it.
    assert_eq!(image.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(12, 12).0, [0, 0, 0, 255]);
}

#[tokio::test]
async fn colors_are_applied() {
    let payload = draw_qrcode(PartialOptions {
        text: Some("hello".into()),
        background: Some("#eee".into()),
        foreground: Some("rgb(51, 51, 51)".into()),
        ..Default::default()
    })
    .await
    .unwrap();
    let image = decode(&payload);
    assert_eq!(image.get_pixel(0, 0).0, [0xee, 0xee, 0xee, 255]);
    assert_eq!(image.get_pixel(12, 12).0, [51, 51, 51, 255]);
}

#[tokio::test]
async fn empty_url_draws_without_image() {
    let payload = draw_qrcode(PartialOptions {
        text: Some("hello".into()),
        image: Some(ImageOptions {
            url: String::new(),
            width: 80.0,
            height: 80.0,
            round: true,
        }),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(decode(&payload).dimensions(), (300, 300));
}

#[tokio::test]
async fn missing_image_fails() {
    let err = draw_qrcode(PartialOptions {
        text: Some("hello".into()),
        image: Some(ImageOptions {
            url: "/definitely/not/here.png".into(),
            width: 80.0,
            height: 80.0,
            round: true,
        }),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert!(matches!(err, DrawError::ImageLoad { .. }));
}

#[tokio::test]
async fn fixed_version_too_small_fails() {
    let err = draw_qrcode(PartialOptions {
        text: Some("a".repeat(200)),
        type_number: Some(2),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DrawError::Encoding(EncodingError::DataTooBig(..))
    ));
}

#[test]
fn stronger_correction_never_shrinks_the_symbol() {
    let data = qrdraw::text::encode_text("The quick brown fox jumps over the lazy dog");
    let counts: Vec<usize> = Ecl::ALL
        .iter()
        .map(|ecl| {
            Encoder::new()
                .with_ecl(*ecl)
                .encode(&data)
                .unwrap()
                .module_count()
        })
        .collect();
    assert!(counts.windows(2).all(|pair| pair[0] <= pair[1]));
}
