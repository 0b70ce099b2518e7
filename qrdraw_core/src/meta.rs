use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{qrstandard, OptionsError};

/// Collection of metadata about a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub version: Version,
    pub ecl: Ecl,
}

impl Meta {
    pub fn canvas_size(&self) -> usize {
        qrstandard::canvas_size(self.version)
    }
}

/// Version of a QR code, which determines its size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Version {
    V01 =  1, V02 =  2, V03 =  3, V04 =  4, V05 =  5, V06 =  6, V07 =  7, V08 =  8, V09 =  9, V10 = 10,
    V11 = 11, V12 = 12, V13 = 13, V14 = 14, V15 = 15, V16 = 16, V17 = 17, V18 = 18, V19 = 19, V20 = 20,
    V21 = 21, V22 = 22, V23 = 23, V24 = 24, V25 = 25, V26 = 26, V27 = 27, V28 = 28, V29 = 29, V30 = 30,
    V31 = 31, V32 = 32, V33 = 33, V34 = 34, V35 = 35, V36 = 36, V37 = 37, V38 = 38, V39 = 39, V40 = 40,
}

impl Version {
    /// Construct a new version given its number. Valid version numbers are in the range 1..=40.
    /// # Example
    /// ```
    /// use qrdraw_core::Version;
    /// assert!(Version::new(1).is_some());
    /// assert!(Version::new(50).is_none());
    /// ```
    #[rustfmt::skip]
    pub const fn new(number: u8) -> Option<Self> {
        let version = match number {
             1 => Self::V01,  2 => Self::V02,  3 => Self::V03,  4 => Self::V04,  5 => Self::V05,  6 => Self::V06,  7 => Self::V07,  8 => Self::V08,  9 => Self::V09, 10 => Self::V10,
            11 => Self::V11, 12 => Self::V12, 13 => Self::V13, 14 => Self::V14, 15 => Self::V15, 16 => Self::V16, 17 => Self::V17, 18 => Self::V18, 19 => Self::V19, 20 => Self::V20,
            21 => Self::V21, 22 => Self::V22, 23 => Self::V23, 24 => Self::V24, 25 => Self::V25, 26 => Self::V26, 27 => Self::V27, 28 => Self::V28, 29 => Self::V29, 30 => Self::V30,
            31 => Self::V31, 32 => Self::V32, 33 => Self::V33, 34 => Self::V34, 35 => Self::V35, 36 => Self::V36, 37 => Self::V37, 38 => Self::V38, 39 => Self::V39, 40 => Self::V40,
            _ => return None,
        };
        Some(version)
    }

    /// Get the version number.
    /// # Example
    /// ```
    /// use qrdraw_core::Version;
    /// assert_eq!(Version::V12.number(), 12);
    /// ```
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Get the next higher version, if it exists.
    /// # Example
    /// ```
    /// use qrdraw_core::Version;
    /// assert_eq!(Version::V10.incr(), Some(Version::V11));
    /// assert_eq!(Version::V40.incr(), None);
    /// ```
    pub fn incr(self) -> Option<Self> {
        Self::new(self.number() + 1)
    }
}

impl From<Version> for u8 {
    fn from(value: Version) -> Self {
        value.number()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.number())
    }
}

/// Symbol version requested from the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeNumber {
    /// Let the encoder pick the smallest version that fits the data.
    #[default]
    Auto,
    /// Force the given version.
    Fixed(Version),
}

impl TypeNumber {
    /// Interpret an integer type number. Anything below 1 (conventionally `-1`) selects [TypeNumber::Auto].
    /// # Example
    /// ```
    /// use qrdraw_core::{TypeNumber, Version};
    /// assert_eq!(TypeNumber::from_number(-1).unwrap(), TypeNumber::Auto);
    /// assert_eq!(TypeNumber::from_number(4).unwrap(), TypeNumber::Fixed(Version::V04));
    /// assert!(TypeNumber::from_number(41).is_err());
    /// ```
    pub fn from_number(number: i32) -> Result<Self, OptionsError> {
        if number < 1 {
            return Ok(Self::Auto);
        }
        u8::try_from(number)
            .ok()
            .and_then(Version::new)
            .map(Self::Fixed)
            .ok_or(OptionsError::InvalidTypeNumber(number))
    }

    /// The integer form, with `-1` standing for [TypeNumber::Auto].
    pub fn number(self) -> i32 {
        match self {
            Self::Auto => -1,
            Self::Fixed(version) => version.number() as i32,
        }
    }
}

impl From<Version> for TypeNumber {
    fn from(value: Version) -> Self {
        Self::Fixed(value)
    }
}

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ecl {
    /// Low: 7% recovery rate.
    L,
    /// Medium: 15% recovery rate.
    M,
    /// Quartile: 25% recovery rate.
    Q,
    /// High: 30% recovery rate.
    H,
}

impl Ecl {
    /// All levels, by increasing redundancy.
    pub const ALL: [Ecl; 4] = [Ecl::L, Ecl::M, Ecl::Q, Ecl::H];

    /// Get the next higher ECL, if it exists.
    /// # Example
    /// ```
    /// use qrdraw_core::Ecl;
    /// assert_eq!(Ecl::L.incr(), Some(Ecl::M));
    /// assert_eq!(Ecl::H.incr(), None)
    /// ```
    pub fn incr(self) -> Option<Self> {
        match self {
            Self::L => Some(Self::M),
            Self::M => Some(Self::Q),
            Self::Q => Some(Self::H),
            Self::H => None,
        }
    }
}

impl std::fmt::Display for Ecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(letter)
    }
}

impl FromStr for Ecl {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(OptionsError::InvalidEcl(s.to_string())),
        }
    }
}
