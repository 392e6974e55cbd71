//! Sensor-link sentence protocol
//!
//! The sensor head streams ASCII sentences at 9600 baud:
//!
//! ```text
//! $ACRAW,<ax>,<ay>,<az>,<mx>,<my>,<mz>*<CC>\r\n
//! $ACOK*00\r\n
//! $ACERR*00\r\n
//! ```
//!
//! `<CC>` is the 8-bit XOR of all bytes between `$` and `*`. The decoder
//! reconstructs sentences one byte at a time without buffering whole
//! messages; the encoder produces the sensor-side output bit-exactly.

pub mod decoder;
pub mod encoder;

use crate::math::IVector;

pub use decoder::SentenceDecoder;
pub use encoder::{encode_err, encode_ok, encode_raw, SentenceBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// A sentence overran the fixed encode buffer
    BufferOverflow,
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

/// One raw accelerometer + magnetometer reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSample {
    pub acc: IVector,
    pub mag: IVector,
}

/// A completely received sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentence {
    /// Sensor head reports healthy
    Ok,
    /// Sensor head reports a bus/transaction failure
    Err,
    /// One raw reading
    Raw(RawSample),
}
