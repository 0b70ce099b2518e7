use serde::{Deserialize, Serialize};

use crate::{Ecl, TypeNumber};

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid type number {0}, expected -1 (auto) or 1..=40")]
    InvalidTypeNumber(i32),
    #[error("invalid error correction level '{0}', expected one of L, M, Q, H")]
    InvalidEcl(String),
    #[error("invalid option `{0}`: {1}")]
    InvalidOptions(&'static str, String),
}

/// Center image drawn over the code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    /// Where to load the image from. Empty means no image.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Clip the image to a circle whose diameter is the image width.
    #[serde(default)]
    pub round: bool,
}

/// Fully resolved drawing options.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub text: String,
    /// Width of the output in logical pixels, padding included.
    pub width: f64,
    /// Height of the output in logical pixels, padding included.
    pub height: f64,
    pub padding: f64,
    pub type_number: i32,
    pub correct_level: Ecl,
    pub background: String,
    pub foreground: String,
    pub image: ImageOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: 300.0,
            height: 300.0,
            padding: 10.0,
            type_number: -1,
            correct_level: Ecl::H,
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            image: ImageOptions {
                url: String::new(),
                width: 80.0,
                height: 80.0,
                round: true,
            },
        }
    }
}

impl Options {
    /// Check that every numeric field is finite and non-negative, and that the type number is usable.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("image.width", self.image.width),
            ("image.height", self.image.height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(OptionsError::InvalidOptions(
                    name,
                    format!("expected a non-negative number, got {}", value),
                ));
            }
        }
        self.type_number()?;
        Ok(())
    }

    /// The requested symbol version.
    pub fn type_number(&self) -> Result<TypeNumber, OptionsError> {
        TypeNumber::from_number(self.type_number)
    }

    /// Whether a center image was requested.
    pub fn has_image(&self) -> bool {
        !self.image.url.is_empty()
    }
}

/// Caller-supplied options. Unset fields fall back to [Options::default] when resolved.
///
/// The merge is shallow: a supplied `image` replaces the default image record as a whole, and whatever it leaves
/// out takes the zero value of [ImageOptions] rather than the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    pub text: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Option<f64>,
    pub type_number: Option<i32>,
    pub correct_level: Option<Ecl>,
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub image: Option<ImageOptions>,
}

impl PartialOptions {
    /// Merge over the defaults.
    /// # Example
    /// ```
    /// use qrdraw_core::{Ecl, PartialOptions};
    /// let options = PartialOptions {
    ///     text: Some("hello".into()),
    ///     correct_level: Some(Ecl::M),
    ///     ..Default::default()
    /// }
    /// .resolve();
    /// assert_eq!(options.text, "hello");
    /// assert_eq!(options.correct_level, Ecl::M);
    /// assert_eq!(options.width, 300.0);
    /// ```
    pub fn resolve(self) -> Options {
        let defaults = Options::default();
        Options {
            text: self.text.unwrap_or(defaults.text),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            padding: self.padding.unwrap_or(defaults.padding),
            type_number: self.type_number.unwrap_or(defaults.type_number),
            correct_level: self.correct_level.unwrap_or(defaults.correct_level),
            background: self.background.unwrap_or(defaults.background),
            foreground: self.foreground.unwrap_or(defaults.foreground),
            image: self.image.unwrap_or(defaults.image),
        }
    }

    /// Overlay the fields set in `other` on top of `self`. Used to let command-line flags win over a config file.
    pub fn overridden_by(self, other: PartialOptions) -> PartialOptions {
        PartialOptions {
            text: other.text.or(self.text),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            padding: other.padding.or(self.padding),
            type_number: other.type_number.or(self.type_number),
            correct_level: other.correct_level.or(self.correct_level),
            background: other.background.or(self.background),
            foreground: other.foreground.or(self.foreground),
            image: other.image.or(self.image),
        }
    }
}

impl From<PartialOptions> for Options {
    fn from(value: PartialOptions) -> Self {
        value.resolve()
    }
}
