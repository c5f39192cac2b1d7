//! # trs-trace: Side-Channel Trace Entity with Adaptive Sample Coding
//!
//! A [`Trace`] is one captured signal recording: `f32` samples plus a title,
//! auxiliary data, named parameters, sample frequency and shift count.
//!
//! Two pieces do the real work:
//!
//! - **Coding selection**: one lazy scan of the samples picks the smallest
//!   lossless representation (`Byte`, `Short`, `Int`, `Float`) or reports
//!   `Illegal` for NaN and infinity ([`envelope`])
//! - **Parameter serialization**: named typed parameters are concatenated
//!   in insertion order into the trace's auxiliary data ([`parameter`])
//!
//! ## Example Usage
//!
//! ```rust
//! use trs_trace::parameter::{TraceParameter, TraceParameterMap};
//! use trs_trace::{Encoding, Trace};
//!
//! let mut parameters = TraceParameterMap::new();
//! parameters.insert("plaintext", TraceParameter::Byte(vec![0xde, 0xad]));
//!
//! let trace = Trace::builder(vec![0.0, 12.0, 200.0])
//!     .title("trace 0")
//!     .parameters(parameters)
//!     .build()?;
//!
//! assert_eq!(trace.preferred_coding(), Encoding::Short);
//! assert_eq!(trace.data_hex(), "dead");
//! # Ok::<(), trs_trace::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod encoding;
pub mod envelope;
pub mod error;
pub mod parameter;
pub mod trace;

pub use encoding::Encoding;
pub use envelope::SampleEnvelope;
pub use error::{Error, Result};
pub use trace::{uniform_coding, Trace, TraceBuilder, TraceSetId};
