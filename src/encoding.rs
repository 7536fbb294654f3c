use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::InspectError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings a file can be decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    /// UTF-8 with a leading byte order mark removed if present
    Utf8Sig,
    Ascii,
    Latin1,
}

/// Position of the first byte an encoding rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeFailure {
    pub offset: usize,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Sig => "utf-8-sig",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Decode the whole buffer. Borrows when the bytes are already valid text.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, DecodeFailure> {
        match self {
            Encoding::Utf8 => decode_utf8(bytes, 0),
            Encoding::Utf8Sig => match bytes.strip_prefix(UTF8_BOM) {
                Some(rest) => decode_utf8(rest, UTF8_BOM.len()),
                None => decode_utf8(bytes, 0),
            },
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(DecodeFailure { offset }),
                // ASCII is a subset of UTF-8
                None => decode_utf8(bytes, 0),
            },
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect::<String>().into()),
        }
    }
}

fn decode_utf8(bytes: &[u8], base: usize) -> Result<Cow<'_, str>, DecodeFailure> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| DecodeFailure {
            offset: base + e.valid_up_to(),
        })
}

impl FromStr for Encoding {
    type Err = InspectError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" | "u8" => Ok(Encoding::Utf8),
            "utf8sig" => Ok(Encoding::Utf8Sig),
            "ascii" | "usascii" => Ok(Encoding::Ascii),
            "latin1" | "l1" | "iso88591" => Ok(Encoding::Latin1),
            _ => Err(InspectError::UnknownEncoding {
                label: label.to_string(),
            }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
