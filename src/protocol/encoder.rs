//! Sensor-side sentence encoding
//!
//! The wire format is bit-exact: deployed controllers parse it and log
//! dumps are compared byte-wise. Note the checksum is rendered low nibble
//! first (`0x4E` appears as `E4`), which every fielded sensor head does;
//! emitting the conventional order would change the wire image.

use ufmt::{uwrite, uWrite};

use crate::math::IVector;

use super::{ProtocolError, Result};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Fixed buffer a sentence is assembled in before transmission; large
/// enough for six signed 16-bit fields plus framing.
pub struct SentenceBuffer {
    buf: [u8; 64],
    len: usize,
}

impl Default for SentenceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0; 64],
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        if self.len >= self.buf.len() {
            return Err(ProtocolError::BufferOverflow);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }
}

impl uWrite for SentenceBuffer {
    type Error = ProtocolError;

    fn write_str(&mut self, s: &str) -> Result<()> {
        for &byte in s.as_bytes() {
            self.push(byte)?;
        }
        Ok(())
    }
}

/// Encode one raw reading as `$ACRAW,...*CC\r\n`
pub fn encode_raw(acc: &IVector, mag: &IVector) -> Result<SentenceBuffer> {
    let mut out = SentenceBuffer::new();
    uwrite!(
        out,
        "$ACRAW,{},{},{},{},{},{}",
        acc.x,
        acc.y,
        acc.z,
        mag.x,
        mag.y,
        mag.z
    )?;

    let mut checksum: u8 = 0;
    for &byte in &out.as_bytes()[1..] {
        checksum ^= byte;
    }

    out.push(b'*')?;
    out.push(HEX[(checksum & 0x0F) as usize])?;
    out.push(HEX[(checksum >> 4) as usize])?;
    out.write_str("\r\n")?;
    Ok(out)
}

/// Encode the health sentence sent at startup and after recovery
pub fn encode_ok() -> Result<SentenceBuffer> {
    let mut out = SentenceBuffer::new();
    out.write_str("$ACOK*00\r\n")?;
    Ok(out)
}

/// Encode the failure sentence sent when the sensor bus errors
pub fn encode_err() -> Result<SentenceBuffer> {
    let mut out = SentenceBuffer::new();
    out.write_str("$ACERR*00\r\n")?;
    Ok(out)
}
