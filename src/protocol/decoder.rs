//! Byte-at-a-time sentence decoder
//!
//! Reconstructs `$AC*` sentences from a noisy serial feed without ever
//! holding a whole message: only the comma count, a field cursor and six
//! small digit buffers persist between bytes. A malformed sentence simply
//! never completes; the next `$` starts over.

use crate::math::IVector;

use super::{RawSample, Sentence};

/// Field buffer capacity: sign plus up to five digits, then a terminator
const FIELD_LEN: usize = 7;

/// Comma count sentinel meaning "not inside a sentence"
const COMMAS_INVALID: u8 = 0xFF;

/// Fields 1..=3 of a raw sentence are the accelerometer, 4..=6 the
/// magnetometer; anything later is ignored for forward compatibility.
const FIELD_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SentenceType {
    Unknown,
    Ok,
    Err,
    Raw,
}

#[derive(Debug)]
pub struct SentenceDecoder {
    sentence_type: SentenceType,
    commas: u8,
    index: usize,
    fields: [[u8; FIELD_LEN]; FIELD_COUNT],
}

impl Default for SentenceDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceDecoder {
    pub fn new() -> Self {
        Self {
            sentence_type: SentenceType::Unknown,
            commas: COMMAS_INVALID,
            index: 0,
            fields: [[0; FIELD_LEN]; FIELD_COUNT],
        }
    }

    /// Abandon any partially received sentence
    pub fn reset(&mut self) {
        self.commas = COMMAS_INVALID;
        self.sentence_type = SentenceType::Unknown;
    }

    /// Consume one byte from the stream. Returns a sentence exactly when
    /// its terminating newline arrives.
    pub fn feed(&mut self, byte: u8) -> Option<Sentence> {
        match byte {
            0 => {
                self.reset();
                None
            }
            b'$' => {
                self.commas = 0;
                self.sentence_type = SentenceType::Unknown;
                None
            }
            b',' => {
                self.commas = self.commas.saturating_add(1);
                self.index = 0;
                None
            }
            b'\n' => {
                let sentence = self.complete();
                self.sentence_type = SentenceType::Unknown;
                self.commas = COMMAS_INVALID;
                sentence
            }
            _ => {
                self.data(byte);
                None
            }
        }
    }

    fn data(&mut self, byte: u8) {
        if self.commas == COMMAS_INVALID {
            return;
        }

        if self.commas == 0 {
            // Still inside the type token; the first recognized byte
            // decides ("AC" and the rest of the token carry no
            // information). Latching prevents the second R of ACERR from
            // reclassifying the sentence.
            if self.sentence_type == SentenceType::Unknown {
                self.sentence_type = match byte {
                    b'O' => SentenceType::Ok,
                    b'E' => SentenceType::Err,
                    b'R' => SentenceType::Raw,
                    _ => SentenceType::Unknown,
                };
            }
            return;
        }

        if self.sentence_type != SentenceType::Raw {
            return;
        }

        let field = self.commas as usize;
        if !(1..=FIELD_COUNT).contains(&field) {
            return;
        }

        // Bytes past the buffer are a protocol violation; discard them
        // rather than truncating the sentence.
        if self.index < FIELD_LEN {
            self.fields[field - 1][self.index] = byte;
            self.index += 1;
            if self.index < FIELD_LEN {
                self.fields[field - 1][self.index] = 0;
            }
        }
    }

    fn complete(&self) -> Option<Sentence> {
        match self.sentence_type {
            SentenceType::Ok => Some(Sentence::Ok),
            SentenceType::Err => Some(Sentence::Err),
            SentenceType::Raw => Some(Sentence::Raw(self.convert())),
            SentenceType::Unknown => None,
        }
    }

    fn convert(&self) -> RawSample {
        RawSample {
            acc: IVector::new(
                parse_field(&self.fields[0]),
                parse_field(&self.fields[1]),
                parse_field(&self.fields[2]),
            ),
            mag: IVector::new(
                parse_field(&self.fields[3]),
                parse_field(&self.fields[4]),
                parse_field(&self.fields[5]),
            ),
        }
    }
}

/// atoi-style conversion: optional sign, then digits up to the first
/// non-digit byte. The `*CC` checksum tail that lands in the last field
/// is inert because `*` stops the scan.
fn parse_field(field: &[u8]) -> i16 {
    let mut value: i32 = 0;
    let mut negative = false;
    let mut seen_digit = false;

    for (i, &byte) in field.iter().enumerate() {
        match byte {
            b'-' if i == 0 => negative = true,
            b'+' if i == 0 => {}
            b'0'..=b'9' => {
                value = value * 10 + (byte - b'0') as i32;
                seen_digit = true;
                if value > i16::MAX as i32 + 1 {
                    break;
                }
            }
            _ => break,
        }
    }

    if !seen_digit {
        return 0;
    }
    if negative {
        value = -value;
    }
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
