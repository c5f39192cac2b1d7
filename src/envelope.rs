//! Sample envelope analysis
//!
//! One linear pass over a sample sequence yields its envelope: the extreme
//! values, whether any value is non-integral, and whether any value is NaN
//! or infinite. The envelope alone decides the preferred [`Encoding`].
//!
//! The bounds start at `0.0` rather than at the first sample. A sequence that
//! never crosses zero is therefore still measured against zero. Existing TRS
//! files were written with this rule, so it is kept as is.

use crate::Encoding;
use serde::{Deserialize, Serialize};

/// Aggregate numeric summary of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleEnvelope {
    has_illegal_values: bool,
    is_real: bool,
    min: f32,
    max: f32,
}

impl SampleEnvelope {
    /// Scan `samples` once and compute their envelope.
    ///
    /// An empty sequence gives the zero envelope, which codes as `Byte`.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn scan(samples: &[f32]) -> Self {
        let mut envelope = Self::default();

        for &f in samples {
            if f > envelope.max {
                envelope.max = f;
            }
            if f < envelope.min {
                envelope.min = f;
            }
            // Saturating cast: integral values beyond i32 count as real, except
            // 2^31 itself, which round-trips through i32::MAX and codes as Int.
            if f != (f as i32) as f32 {
                envelope.is_real = true;
            }
            if !f.is_finite() {
                envelope.has_illegal_values = true;
            }
        }

        tracing::trace!(
            samples = samples.len(),
            min = envelope.min,
            max = envelope.max,
            is_real = envelope.is_real,
            has_illegal_values = envelope.has_illegal_values,
            "scanned sample envelope"
        );
        envelope
    }

    /// Whether any sample is NaN or infinite.
    #[must_use]
    pub const fn has_illegal_values(&self) -> bool {
        self.has_illegal_values
    }

    /// Whether any sample has a fractional part.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        self.is_real
    }

    /// Smallest sample value, never above `0.0`.
    #[must_use]
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Largest sample value, never below `0.0`.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Map the envelope to a coding class.
    ///
    /// Illegal values win over `force_float`: a sequence holding NaN or
    /// infinity is `Illegal` even when float coding is forced.
    #[must_use]
    pub fn preferred_coding(&self, force_float: bool) -> Encoding {
        if self.has_illegal_values {
            tracing::debug!("samples contain NaN or infinity, coding is illegal");
            return Encoding::Illegal;
        }
        if force_float || self.is_real {
            return Encoding::Float;
        }
        if self.max > f32::from(i16::MAX) || self.min < f32::from(i16::MIN) {
            return Encoding::Int;
        }
        if self.max > f32::from(i8::MAX) || self.min < f32::from(i8::MIN) {
            return Encoding::Short;
        }
        Encoding::Byte
    }
}
