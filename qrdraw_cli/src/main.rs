use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::Parser;

use qrdraw_core::{Ecl, ImageOptions, PartialOptions};
use qrdraw_render::Drawer;

#[derive(Parser)]
#[command(name = "qrdraw")]
#[command(version)]
#[command(about = "Draw QR codes as PNG images from the command line", long_about = None)]
struct Cli {
    #[arg(help = "Text to encode or stdin if unspecified")]
    text: Option<String>,
    #[arg(
        short,
        long,
        help = "Output file or stdout if unspecified",
        long_help = "Output file or stdout if unspecified. The output format is determined based on the extension. \
        Supported extensions are:\n\
        * base64 text: .txt\n\
        * images: .png"
    )]
    output: Option<PathBuf>,
    #[arg(long, help = "JSON file with drawing options, overridden by flags")]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    padding: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Symbol version 1..=40, -1 for automatic")]
    type_number: Option<i32>,
    #[arg(long, help = "Error correction level: L, M, Q or H")]
    ecl: Option<Ecl>,
    #[arg(long, help = "CSS color of the background and light modules")]
    background: Option<String>,
    #[arg(long, help = "CSS color of dark modules")]
    foreground: Option<String>,
    #[arg(long, help = "Center image: path, file://, http(s):// or data: URL")]
    image: Option<String>,
    #[arg(long, default_value_t = 80.0)]
    image_width: f64,
    #[arg(long, default_value_t = 80.0)]
    image_height: f64,
    #[arg(long, help = "Draw the center image without clipping it to a circle")]
    no_round: bool,
    #[arg(long, default_value_t = 1.0, help = "Device pixel ratio")]
    dpr: f64,
}

impl Cli {
    /// Options set on the command line, text aside.
    fn flags(&self) -> PartialOptions {
        PartialOptions {
            text: None,
            width: self.width,
            height: self.height,
            padding: self.padding,
            type_number: self.type_number,
            correct_level: self.ecl,
            background: self.background.clone(),
            foreground: self.foreground.clone(),
            image: self.image.as_ref().map(|url| ImageOptions {
                url: url.clone(),
                width: self.image_width,
                height: self.image_height,
                round: !self.no_round,
            }),
        }
    }
}

enum Output {
    Stdout,
    Text(PathBuf),
    Png(PathBuf),
}

fn determine_output_kind(path: Option<PathBuf>) -> Result<Output> {
    let Some(path) = path else {
        return Ok(Output::Stdout);
    };
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => Ok(Output::Text(path)),
        Some("png") => Ok(Output::Png(path)),
        Some(invalid) => Err(anyhow::Error::msg(format!(
            "invalid output extension '{}'",
            invalid
        ))),
        None => Err(anyhow::Error::msg("requested output has no extension")),
    }
}

fn read_config(path: &PathBuf) -> Result<PartialOptions> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open config file {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("invalid config file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    // Before doing anything, make sure the requested output is valid.
    let output = determine_output_kind(cli.output.clone())?;

    let config = match &cli.config {
        Some(path) => read_config(path)?,
        None => PartialOptions::default(),
    };
    let mut partial = config.overridden_by(cli.flags());
    partial.text = match cli.text.clone() {
        Some(text) => Some(text),
        None if partial.text.is_some() => partial.text,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Some(text.trim_end_matches(['\r', '\n']).to_string())
        }
    };
    let options = partial.resolve();
    log::debug!("resolved options: {:?}", options);

    let png = Drawer::new()
        .with_device_pixel_ratio(cli.dpr)
        .draw_png(&options)
        .await?;
    match output {
        Output::Png(path) => tokio::fs::write(&path, &png)
            .await
            .with_context(|| format!("cannot write {}", path.display()))?,
        Output::Text(path) => tokio::fs::write(&path, BASE64.encode(&png))
            .await
            .with_context(|| format!("cannot write {}", path.display()))?,
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", BASE64.encode(&png))?;
        }
    }
    Ok(())
}
