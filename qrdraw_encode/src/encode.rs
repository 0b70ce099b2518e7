use qrcode::bits::Bits;
use qrcode::types::QrError;

use qrdraw_core::{Canvas, Ecl, Meta, QrCode, TypeNumber, Version};

/// Encoder for a QR code.
///
/// Data is always stored as a single 8-bit byte segment, one byte per input byte, so text should be re-encoded with
/// [qrdraw_core::text::encode_text] first. Matrix construction, error correction and masking are done by the
/// `qrcode` crate.
#[derive(Debug, Clone)]
pub struct Encoder {
    type_number: TypeNumber,
    ecl: Ecl,
}

impl Encoder {
    /// Construct a new encoder picking the version automatically, at the highest error correction level.
    pub fn new() -> Self {
        Self {
            type_number: TypeNumber::Auto,
            ecl: Ecl::H,
        }
    }

    /// Request the given `type_number`.
    pub fn with_type_number(mut self, type_number: TypeNumber) -> Self {
        self.type_number = type_number;
        self
    }

    /// Constrain to the specified `version`.
    pub fn with_version(self, version: Version) -> Self {
        self.with_type_number(TypeNumber::Fixed(version))
    }

    /// Use the specified `ecl`.
    pub fn with_ecl(mut self, ecl: Ecl) -> Self {
        self.ecl = ecl;
        self
    }

    /// Encode `data`.
    pub fn encode<T: AsRef<[u8]>>(&self, data: T) -> Result<QrCode, EncodingError> {
        let data = data.as_ref();
        let (first, last) = match self.type_number {
            TypeNumber::Auto => (Version::V01, Version::V40),
            TypeNumber::Fixed(version) => (version, version),
        };
        // Walk up from the smallest allowed version until the data fits.
        let mut candidate = Some(first);
        while let Some(version) = candidate.filter(|&v| v <= last) {
            match self.encode_with_version(data, version) {
                Ok(qrcode) => {
                    log::debug!(
                        target: "qrdraw",
                        "encoded {} B as version {} with ECL {}",
                        data.len(),
                        version,
                        self.ecl
                    );
                    return Ok(qrcode);
                }
                Err(EncodingError::Encoder(QrError::DataTooLong)) => candidate = version.incr(),
                Err(err) => return Err(err),
            }
        }
        Err(EncodingError::DataTooBig(data.len(), last, self.ecl))
    }

    fn encode_with_version(&self, data: &[u8], version: Version) -> Result<QrCode, EncodingError> {
        let ec_level = ec_level(self.ecl);
        let mut bits = Bits::new(qrcode::Version::Normal(version.number() as i16));
        bits.push_byte_data(data)?;
        bits.push_terminator(ec_level)?;
        let symbol = qrcode::QrCode::with_bits(bits, ec_level)?;

        let size = symbol.width();
        let modules = symbol
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark);
        let canvas =
            Canvas::from_modules(size, modules).ok_or(EncodingError::MalformedSymbol(size))?;
        let meta = Meta {
            version,
            ecl: self.ecl,
        };
        QrCode::new(canvas, meta).ok_or(EncodingError::MalformedSymbol(size))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn ec_level(ecl: Ecl) -> qrcode::EcLevel {
    match ecl {
        Ecl::L => qrcode::EcLevel::L,
        Ecl::M => qrcode::EcLevel::M,
        Ecl::Q => qrcode::EcLevel::Q,
        Ecl::H => qrcode::EcLevel::H,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("cannot encode {0} B of data with best case version {1} and ECL {2}")]
    DataTooBig(usize, Version, Ecl),
    #[error("encoder produced a malformed symbol of size {0}")]
    MalformedSymbol(usize),
    #[error("encoder error: {0}")]
    Encoder(#[from] QrError),
}
