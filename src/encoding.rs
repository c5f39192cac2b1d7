//! Sample coding classes
//!
//! A containing trace set stores every trace with one uniform sample
//! representation. The values below are the TRS header values for that
//! representation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Storage representation for trace samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Encoding {
    /// Samples contain NaN or infinity and have no valid representation
    Illegal = 0x00,
    /// Signed 8-bit integers
    Byte = 0x01,
    /// Signed 16-bit integers
    Short = 0x02,
    /// Signed 32-bit integers
    Int = 0x04,
    /// 32-bit IEEE-754 floats
    Float = 0x14,
}

impl Encoding {
    /// Get the header value of this coding.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Get the number of bytes one sample occupies (0 for `Illegal`).
    #[must_use]
    pub const fn sample_size(self) -> usize {
        match self {
            Self::Illegal => 0,
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
        }
    }

    /// Get the coding name as string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Illegal => "illegal",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Byte => 0,
            Self::Short => 1,
            Self::Int => 2,
            Self::Float => 3,
            Self::Illegal => 4,
        }
    }

    /// Smallest coding able to hold samples of both `self` and `other`.
    ///
    /// `Illegal` absorbs everything: once one trace is illegal the set is.
    #[must_use]
    pub const fn widen(self, other: Self) -> Self {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }

    /// Append `samples` to `out` in this representation, little-endian.
    ///
    /// Integer codings truncate toward zero. The caller is expected to have
    /// picked a coding wide enough for the samples (see
    /// [`Trace::preferred_coding`](crate::Trace::preferred_coding)); values
    /// outside the integer range saturate. `2^31` is the one value the
    /// preferred coding maps to `Int` that does not fit and is written as
    /// `i32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for `Illegal`, which has no byte form.
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode_samples(self, samples: &[f32], out: &mut Vec<u8>) -> Result<()> {
        out.reserve(samples.len() * self.sample_size());
        match self {
            Self::Illegal => {
                return Err(Error::InvalidInput(
                    "illegal coding has no sample representation".to_string(),
                ))
            }
            Self::Byte => out.extend(samples.iter().map(|&f| (f as i8).to_le_bytes()[0])),
            Self::Short => {
                for &f in samples {
                    out.extend_from_slice(&(f as i16).to_le_bytes());
                }
            }
            Self::Int => {
                for &f in samples {
                    out.extend_from_slice(&(f as i32).to_le_bytes());
                }
            }
            Self::Float => {
                for &f in samples {
                    out.extend_from_slice(&f.to_le_bytes());
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<u8> for Encoding {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::Illegal),
            0x01 => Ok(Self::Byte),
            0x02 => Ok(Self::Short),
            0x04 => Ok(Self::Int),
            0x14 => Ok(Self::Float),
            other => Err(Error::InvalidInput(format!(
                "unknown sample coding 0x{other:02x}"
            ))),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_values() {
        assert_eq!(Encoding::Illegal.value(), 0x00);
        assert_eq!(Encoding::Byte.value(), 0x01);
        assert_eq!(Encoding::Short.value(), 0x02);
        assert_eq!(Encoding::Int.value(), 0x04);
        assert_eq!(Encoding::Float.value(), 0x14);
    }

    #[test]
    fn test_encoding_try_from() {
        for coding in [
            Encoding::Illegal,
            Encoding::Byte,
            Encoding::Short,
            Encoding::Int,
            Encoding::Float,
        ] {
            assert_eq!(Encoding::try_from(coding.value()).unwrap(), coding);
        }
        assert!(Encoding::try_from(0x03).is_err());
    }

    #[test]
    fn test_widen() {
        assert_eq!(Encoding::Byte.widen(Encoding::Short), Encoding::Short);
        assert_eq!(Encoding::Int.widen(Encoding::Short), Encoding::Int);
        assert_eq!(Encoding::Int.widen(Encoding::Float), Encoding::Float);
        assert_eq!(Encoding::Float.widen(Encoding::Illegal), Encoding::Illegal);
        assert_eq!(Encoding::Byte.widen(Encoding::Byte), Encoding::Byte);
    }

    #[test]
    fn test_encode_short_little_endian() {
        let mut out = Vec::new();
        Encoding::Short.encode_samples(&[1.0, -2.0, 300.0], &mut out).unwrap();
        assert_eq!(out, vec![0x01, 0x00, 0xfe, 0xff, 0x2c, 0x01]);
    }

    #[test]
    fn test_encode_byte_truncates() {
        let mut out = Vec::new();
        Encoding::Byte.encode_samples(&[-1.0, 127.0], &mut out).unwrap();
        assert_eq!(out, vec![0xff, 0x7f]);
    }

    #[test]
    fn test_encode_float() {
        let mut out = Vec::new();
        Encoding::Float.encode_samples(&[0.5], &mut out).unwrap();
        assert_eq!(out, 0.5f32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_encode_illegal_rejected() {
        let mut out = Vec::new();
        assert!(Encoding::Illegal.encode_samples(&[1.0], &mut out).is_err());
        assert!(out.is_empty());
    }
}
