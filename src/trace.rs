//! Trace - one recorded sample sequence with its metadata
//!
//! A trace owns its samples exclusively. [`Trace::new`] copies the caller's
//! slice, [`Trace::from_vec`] takes ownership of a vector without copying;
//! there is no constructor that shares storage with the caller.
//!
//! The sample envelope is computed on the first coding query and kept until
//! the samples are handed out mutably or [`Trace::invalidate_coding`] is
//! called. The memo lives in a [`OnceCell`], so a `Trace` is not `Sync`;
//! callers sharing one across threads must lock around it.

use std::cell::OnceCell;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::envelope::SampleEnvelope;
use crate::parameter::{SerializeParameter, TraceParameter, TraceParameterMap};
use crate::{Encoding, Error, Result};

/// Default acquisition sample frequency.
pub const DEFAULT_SAMPLE_FREQUENCY: f32 = 1.0;

/// Position of a trace inside its containing trace set.
///
/// The set owns its traces; a trace only remembers where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceSetId(pub usize);

/// One recorded sample sequence plus title, auxiliary data and parameters.
///
/// Parameters default to [`TraceParameter`]; a trace set with its own
/// parameter type stores any [`SerializeParameter`] instead.
#[derive(Debug, Clone)]
pub struct Trace<P = TraceParameter> {
    samples: Vec<f32>,
    title: Option<String>,
    data: Option<Vec<u8>>,
    parameters: Option<TraceParameterMap<P>>,
    sample_frequency: f32,
    shifted: i32,
    trace_set: Option<TraceSetId>,
    force_float: bool,
    envelope: OnceCell<SampleEnvelope>,
}

impl Trace {
    /// Create a trace holding a copy of `samples`.
    #[must_use]
    pub fn new(samples: &[f32]) -> Self {
        Self::from_vec(samples.to_vec())
    }

    /// Create a trace that takes ownership of `samples` without copying.
    #[must_use]
    pub fn from_vec(samples: Vec<f32>) -> Self {
        Self {
            samples,
            title: None,
            data: None,
            parameters: None,
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            shifted: 0,
            trace_set: None,
            force_float: false,
            envelope: OnceCell::new(),
        }
    }

    /// Create a builder for a trace with optional metadata.
    #[must_use]
    pub fn builder(samples: Vec<f32>) -> TraceBuilder {
        TraceBuilder::new(samples)
    }
}

impl<P> Trace<P> {
    /// Get the samples. No shift correction is applied.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get mutable access to the samples.
    ///
    /// Drops the cached envelope; the next coding query rescans.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        self.envelope.take();
        &mut self.samples
    }

    /// Get the number of samples.
    #[must_use]
    pub fn number_of_samples(&self) -> usize {
        self.samples.len()
    }

    /// Force `Float` coding regardless of sample content.
    ///
    /// Illegal samples still report [`Encoding::Illegal`].
    pub fn force_float_coding(&mut self) {
        self.force_float = true;
    }

    /// Whether float coding is forced.
    #[must_use]
    pub const fn is_float_coding_forced(&self) -> bool {
        self.force_float
    }

    /// Get the sample envelope, scanning the samples if no result is cached.
    pub fn envelope(&self) -> &SampleEnvelope {
        self.envelope.get_or_init(|| SampleEnvelope::scan(&self.samples))
    }

    /// Whether an envelope is currently cached.
    #[must_use]
    pub fn is_coding_cached(&self) -> bool {
        self.envelope.get().is_some()
    }

    /// Drop the cached envelope so the next coding query rescans.
    pub fn invalidate_coding(&mut self) {
        self.envelope.take();
    }

    /// Get the preferred representation for storing the samples.
    ///
    /// Scans at most once between invalidations.
    pub fn preferred_coding(&self) -> Encoding {
        self.envelope().preferred_coding(self.force_float)
    }

    /// Get the trace title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the trace title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Get the acquisition sample frequency.
    #[must_use]
    pub const fn sample_frequency(&self) -> f32 {
        self.sample_frequency
    }

    /// Set the acquisition sample frequency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] unless the frequency is finite and positive.
    pub fn set_sample_frequency(&mut self, sample_frequency: f32) -> Result<()> {
        self.sample_frequency = validate_sample_frequency(sample_frequency)?;
        Ok(())
    }

    /// Get the number of samples this trace is considered shifted by.
    #[must_use]
    pub const fn shifted(&self) -> i32 {
        self.shifted
    }

    /// Set the shift count. The samples themselves are left untouched.
    pub fn set_shifted(&mut self, shifted: i32) {
        self.shifted = shifted;
    }

    /// Get the auxiliary data.
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Replace the auxiliary data with a copy of `data`.
    pub fn set_data(&mut self, data: &[u8]) {
        self.data = Some(data.to_vec());
    }

    /// Get the auxiliary data as lowercase hex, two digits per byte.
    ///
    /// This deliberately differs from the legacy display, which read the
    /// bytes as one signed big integer: no sign, leading zeros kept, and
    /// missing or empty data gives `""`.
    #[must_use]
    pub fn data_hex(&self) -> String {
        let data = self.data.as_deref().unwrap_or_default();
        let mut hex = String::with_capacity(data.len() * 2);
        for byte in data {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }

    /// Get the named parameters, if the trace was built with any.
    #[must_use]
    pub const fn parameters(&self) -> Option<&TraceParameterMap<P>> {
        self.parameters.as_ref()
    }

    /// Get a parameter by name.
    ///
    /// Returns `None` for unknown names and for traces without parameters.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&P> {
        self.parameters.as_ref()?.get(name)
    }

    /// Get the containing trace set, if any.
    #[must_use]
    pub const fn trace_set(&self) -> Option<TraceSetId> {
        self.trace_set
    }

    /// Record which trace set contains this trace.
    pub fn set_trace_set(&mut self, trace_set: Option<TraceSetId>) {
        self.trace_set = trace_set;
    }
}

fn validate_sample_frequency(sample_frequency: f32) -> Result<f32> {
    if sample_frequency.is_finite() && sample_frequency > 0.0 {
        Ok(sample_frequency)
    } else {
        Err(Error::InvalidInput(format!(
            "sample frequency must be finite and positive, got {sample_frequency}"
        )))
    }
}

/// Widest preferred coding across `traces`, for a uniform on-disk layout.
///
/// An empty collection codes as `Byte`.
///
/// # Errors
///
/// Returns [`Error::IllegalSamples`] with the position of the first trace
/// whose samples contain NaN or infinity.
pub fn uniform_coding<'a, P, I>(traces: I) -> Result<Encoding>
where
    P: 'a,
    I: IntoIterator<Item = &'a Trace<P>>,
{
    let mut coding = Encoding::Byte;
    for (index, trace) in traces.into_iter().enumerate() {
        match trace.preferred_coding() {
            Encoding::Illegal => return Err(Error::IllegalSamples { index }),
            preferred => coding = coding.widen(preferred),
        }
    }
    Ok(coding)
}

/// Builder for `Trace`.
#[derive(Debug)]
pub struct TraceBuilder<P = TraceParameter> {
    samples: Vec<f32>,
    title: Option<String>,
    data: Option<Vec<u8>>,
    parameters: Option<TraceParameterMap<P>>,
    sample_frequency: f32,
    shifted: i32,
    trace_set: Option<TraceSetId>,
    force_float: bool,
}

impl TraceBuilder {
    /// Create a new builder with the required samples.
    #[must_use]
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            title: None,
            data: None,
            parameters: None,
            sample_frequency: DEFAULT_SAMPLE_FREQUENCY,
            shifted: 0,
            trace_set: None,
            force_float: false,
        }
    }
}

impl<P> TraceBuilder<P> {
    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the sample frequency.
    #[must_use]
    pub const fn sample_frequency(mut self, sample_frequency: f32) -> Self {
        self.sample_frequency = sample_frequency;
        self
    }

    /// Set the shift count.
    #[must_use]
    pub const fn shifted(mut self, shifted: i32) -> Self {
        self.shifted = shifted;
        self
    }

    /// Set raw auxiliary data (copied).
    ///
    /// Prefer [`parameters`](Self::parameters) for new trace sets.
    #[must_use]
    pub fn data(mut self, data: &[u8]) -> Self {
        self.data = Some(data.to_vec());
        self
    }

    /// Set named parameters; the auxiliary data is derived from them.
    #[must_use]
    pub fn parameters<Q>(self, parameters: TraceParameterMap<Q>) -> TraceBuilder<Q> {
        TraceBuilder {
            samples: self.samples,
            title: self.title,
            data: self.data,
            parameters: Some(parameters),
            sample_frequency: self.sample_frequency,
            shifted: self.shifted,
            trace_set: self.trace_set,
            force_float: self.force_float,
        }
    }

    /// Force float coding.
    #[must_use]
    pub const fn force_float(mut self) -> Self {
        self.force_float = true;
        self
    }

    /// Set the containing trace set.
    #[must_use]
    pub const fn trace_set(mut self, trace_set: TraceSetId) -> Self {
        self.trace_set = Some(trace_set);
        self
    }
}

impl<P: SerializeParameter> TraceBuilder<P> {
    /// Build the `Trace`, serializing parameters into auxiliary data.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - both raw data and parameters were supplied
    /// - the sample frequency is not finite and positive
    /// - a parameter fails to serialize ([`Error::Serialization`])
    pub fn build(self) -> Result<Trace<P>> {
        if self.data.is_some() && self.parameters.is_some() {
            return Err(Error::InvalidInput(
                "raw data and parameters are mutually exclusive".to_string(),
            ));
        }
        let sample_frequency = validate_sample_frequency(self.sample_frequency)?;

        let data = match &self.parameters {
            Some(parameters) => Some(parameters.serialize()?),
            None => self.data,
        };

        tracing::debug!(
            samples = self.samples.len(),
            title = self.title.as_deref(),
            data_bytes = data.as_ref().map_or(0, Vec::len),
            parameters = self.parameters.as_ref().map_or(0, TraceParameterMap::len),
            "built trace"
        );

        Ok(Trace {
            samples: self.samples,
            title: self.title,
            data,
            parameters: self.parameters,
            sample_frequency,
            shifted: self.shifted,
            trace_set: self.trace_set,
            force_float: self.force_float,
            envelope: OnceCell::new(),
        })
    }
}
