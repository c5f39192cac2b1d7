//! Named trace parameters
//!
//! Parameters are typed values attached to a trace under a unique name.
//! Their serialized bytes, concatenated in insertion order, form the trace's
//! auxiliary data.
//!
//! # Example
//!
//! ```rust
//! use trs_trace::parameter::{TraceParameter, TraceParameterMap};
//!
//! # fn main() -> trs_trace::Result<()> {
//! let mut parameters = TraceParameterMap::new();
//! parameters.insert("input", TraceParameter::Byte(vec![0x00, 0x11]));
//! parameters.insert("counter", TraceParameter::from(7i16));
//!
//! assert_eq!(parameters.serialize()?, vec![0x00, 0x11, 0x07, 0x00]);
//! # Ok(())
//! # }
//! ```

mod map;

pub use map::TraceParameterMap;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Capability consumed by the auxiliary-data serializer.
///
/// Implementations must be pure: the same value always yields the same
/// bytes, and one parameter's bytes never depend on another parameter.
/// Any self-description (length prefix, type tag) is the implementor's job.
pub trait SerializeParameter {
    /// Serialize this value to bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the value has no valid byte form.
    fn serialize(&self) -> Result<Vec<u8>>;
}

impl<T: SerializeParameter + ?Sized> SerializeParameter for Box<T> {
    fn serialize(&self) -> Result<Vec<u8>> {
        (**self).serialize()
    }
}

/// Parameter element type, with its TRS type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ParameterType {
    /// Unsigned bytes
    Byte = 0x01,
    /// Signed 16-bit integers
    Short = 0x02,
    /// Signed 32-bit integers
    Int = 0x04,
    /// 32-bit floats
    Float = 0x14,
    /// Signed 64-bit integers
    Long = 0x08,
    /// 64-bit floats
    Double = 0x18,
    /// UTF-8 text
    String = 0x20,
    /// Booleans, one byte each
    Bool = 0x31,
}

impl ParameterType {
    /// Get the type tag.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Get the serialized width of one element in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Byte | Self::String | Self::Bool => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double => 8,
        }
    }
}

impl TryFrom<u8> for ParameterType {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0x01 => Ok(Self::Byte),
            0x02 => Ok(Self::Short),
            0x04 => Ok(Self::Int),
            0x14 => Ok(Self::Float),
            0x08 => Ok(Self::Long),
            0x18 => Ok(Self::Double),
            0x20 => Ok(Self::String),
            0x31 => Ok(Self::Bool),
            other => Err(Error::InvalidInput(format!(
                "unknown parameter type tag 0x{other:02x}"
            ))),
        }
    }
}

/// A typed parameter value.
///
/// Every variant is an array so that a fixed-size layout can be declared
/// once per trace set; scalars are one-element arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceParameter {
    /// Unsigned bytes
    Byte(Vec<u8>),
    /// Signed 16-bit integers
    Short(Vec<i16>),
    /// Signed 32-bit integers
    Int(Vec<i32>),
    /// 32-bit floats
    Float(Vec<f32>),
    /// Signed 64-bit integers
    Long(Vec<i64>),
    /// 64-bit floats
    Double(Vec<f64>),
    /// UTF-8 text
    String(String),
    /// Booleans
    Bool(Vec<bool>),
}

impl TraceParameter {
    /// Get the element type.
    #[must_use]
    pub const fn parameter_type(&self) -> ParameterType {
        match self {
            Self::Byte(_) => ParameterType::Byte,
            Self::Short(_) => ParameterType::Short,
            Self::Int(_) => ParameterType::Int,
            Self::Float(_) => ParameterType::Float,
            Self::Long(_) => ParameterType::Long,
            Self::Double(_) => ParameterType::Double,
            Self::String(_) => ParameterType::String,
            Self::Bool(_) => ParameterType::Bool,
        }
    }

    /// Number of elements (bytes for strings).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::String(s) => s.len(),
            Self::Bool(v) => v.len(),
        }
    }

    /// Whether the parameter holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialized size in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.len() * self.parameter_type().width()
    }
}

impl SerializeParameter for TraceParameter {
    /// Little-endian element bytes, no prefix. Empty values give no bytes.
    fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.byte_len());
        match self {
            Self::Byte(v) => out.extend_from_slice(v),
            Self::Short(v) => v.iter().for_each(|x| out.extend_from_slice(&x.to_le_bytes())),
            Self::Int(v) => v.iter().for_each(|x| out.extend_from_slice(&x.to_le_bytes())),
            Self::Float(v) => v.iter().for_each(|x| out.extend_from_slice(&x.to_le_bytes())),
            Self::Long(v) => v.iter().for_each(|x| out.extend_from_slice(&x.to_le_bytes())),
            Self::Double(v) => v.iter().for_each(|x| out.extend_from_slice(&x.to_le_bytes())),
            Self::String(s) => out.extend_from_slice(s.as_bytes()),
            Self::Bool(v) => out.extend(v.iter().map(|&b| u8::from(b))),
        }
        Ok(out)
    }
}

macro_rules! scalar_parameter {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TraceParameter {
                fn from(value: $ty) -> Self {
                    Self::$variant(vec![value])
                }
            }

            impl From<Vec<$ty>> for TraceParameter {
                fn from(values: Vec<$ty>) -> Self {
                    Self::$variant(values)
                }
            }
        )*
    };
}

scalar_parameter! {
    u8 => Byte,
    i16 => Short,
    i32 => Int,
    f32 => Float,
    i64 => Long,
    f64 => Double,
    bool => Bool,
}

impl From<&str> for TraceParameter {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for TraceParameter {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
