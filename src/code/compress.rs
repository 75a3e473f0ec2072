// p8cart - A codec for PICO-8 cartridge containers
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Compression of the ROM code area.
//!
//! Three encodings exist in the wild:
//! - `:c:\0` legacy byte-oriented LZ with a 59-character table
//! - `\0pxa` bit stream with move-to-front literals
//! - plain bytes terminated by NUL
//!
//! All three are decoded; the legacy encoding is the one produced.

use crate::error::{CartError, ErrorCode, Result};

const LEGACY_HEADER: &[u8; 4] = b":c:\0";
const PXA_HEADER: &[u8; 4] = b"\0pxa";

/// Characters addressable with a single byte in the legacy encoding.
const LEGACY_TABLE: &[u8; 59] = b"\n 0123456789abcdefghijklmnopqrstuvwxyz!#%(){}[]<>+=/*:;.,~_";

const BACKREF_BASE: u8 = 0x3c;
const MIN_MATCH: usize = 3;
const MAX_MATCH: usize = 17;
const MAX_OFFSET: usize = (0xff - BACKREF_BASE as usize) * 16 + 15;

fn corrupt(message: impl Into<String>) -> CartError {
    CartError::new(ErrorCode::CorruptCode, message)
}

/// Compress code with the legacy `:c:` encoding.
pub fn compress(code: &[u8]) -> Result<Vec<u8>> {
    let length = u16::try_from(code.len()).map_err(|_| {
        CartError::new(
            ErrorCode::CodeTooLarge,
            format!("code is {} bytes, at most {} can be stored", code.len(), u16::MAX),
        )
    })?;

    let mut output = Vec::with_capacity(8 + code.len());
    output.extend_from_slice(LEGACY_HEADER);
    output.extend_from_slice(&length.to_be_bytes());
    output.extend_from_slice(&[0, 0]);

    let mut i = 0;
    while i < code.len() {
        let (offset, len) = longest_match(code, i);
        if len >= MIN_MATCH {
            output.push(BACKREF_BASE + (offset / 16) as u8);
            output.push((((len - 2) as u8) << 4) | (offset % 16) as u8);
            i += len;
            continue;
        }

        match LEGACY_TABLE.iter().position(|&c| c == code[i]) {
            Some(index) => output.push(index as u8 + 1),
            None => output.extend_from_slice(&[0, code[i]]),
        }
        i += 1;
    }

    Ok(output)
}

/// Find the longest earlier occurrence of the bytes at `pos`.
fn longest_match(code: &[u8], pos: usize) -> (usize, usize) {
    let mut best = (0, 0);
    let max_len = MAX_MATCH.min(code.len() - pos);
    if max_len < MIN_MATCH {
        return best;
    }

    let start = pos.saturating_sub(MAX_OFFSET);
    for candidate in (start..pos).rev() {
        let len = (0..max_len)
            .take_while(|&k| code[candidate + k] == code[pos + k])
            .count();
        if len > best.1 {
            best = (pos - candidate, len);
            if len == max_len {
                break;
            }
        }
    }
    best
}

/// Decompress the ROM code area, whichever encoding it uses.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.starts_with(LEGACY_HEADER) {
        decompress_legacy(data)
    } else if data.starts_with(PXA_HEADER) {
        decompress_pxa(data)
    } else {
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        Ok(data[..end].to_vec())
    }
}

fn read_length(data: &[u8]) -> Result<usize> {
    match data.get(4..6) {
        Some(bytes) => Ok(u16::from_be_bytes([bytes[0], bytes[1]]) as usize),
        None => Err(corrupt("compressed code header is truncated")),
    }
}

/// Append `len` bytes copied from `offset` bytes back, one at a time so
/// that overlapping copies repeat.
fn copy_back(output: &mut Vec<u8>, offset: usize, len: usize) -> Result<()> {
    if offset == 0 || offset > output.len() {
        return Err(corrupt(format!(
            "back-reference to offset {} with only {} bytes decoded",
            offset,
            output.len()
        )));
    }
    let start = output.len() - offset;
    for k in 0..len {
        let byte = output[start + k];
        output.push(byte);
    }
    Ok(())
}

fn decompress_legacy(data: &[u8]) -> Result<Vec<u8>> {
    let length = read_length(data)?;
    let mut input = data.iter().skip(8).copied();
    let mut next = || input.next().ok_or_else(|| corrupt("compressed code is truncated"));

    let mut output = Vec::with_capacity(length);
    while output.len() < length {
        let byte = next()?;
        if byte == 0 {
            let literal = next()?;
            output.push(literal);
        } else if byte < BACKREF_BASE {
            output.push(LEGACY_TABLE[byte as usize - 1]);
        } else {
            let arg = next()?;
            let offset = (byte - BACKREF_BASE) as usize * 16 + (arg & 0xf) as usize;
            let len = (arg >> 4) as usize + 2;
            copy_back(&mut output, offset, len)?;
        }
    }

    output.truncate(length);
    Ok(output)
}

/// LSB-first bit reader for the pxa stream.
struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bit(&mut self) -> Result<u32> {
        let byte = self
            .data
            .get(self.pos / 8)
            .ok_or_else(|| corrupt("compressed code is truncated"))?;
        let bit = (byte >> (self.pos % 8)) & 1;
        self.pos += 1;
        Ok(bit as u32)
    }

    fn bits(&mut self, count: u32) -> Result<u32> {
        let mut value = 0;
        for i in 0..count {
            value |= self.bit()? << i;
        }
        Ok(value)
    }
}

fn decompress_pxa(data: &[u8]) -> Result<Vec<u8>> {
    let length = read_length(data)?;
    let mut reader = BitReader::new(data.get(8..).unwrap_or_default());
    let mut mtf: Vec<u8> = (0..=255).collect();

    let mut output = Vec::with_capacity(length);
    while output.len() < length {
        if reader.bit()? == 1 {
            let mut nbits = 4;
            while reader.bit()? == 1 {
                nbits += 1;
                if nbits > 8 {
                    return Err(corrupt("literal index is too wide"));
                }
            }
            let index = (reader.bits(nbits)? + (1 << nbits) - 16) as usize;
            if index >= mtf.len() {
                return Err(corrupt(format!("literal index {} is out of range", index)));
            }
            let byte = mtf.remove(index);
            mtf.insert(0, byte);
            output.push(byte);
        } else {
            let nbits = if reader.bit()? == 1 {
                if reader.bit()? == 1 {
                    5
                } else {
                    10
                }
            } else {
                15
            };
            let offset = reader.bits(nbits)? as usize + 1;

            if nbits == 10 && offset == 1 {
                loop {
                    let byte = reader.bits(8)? as u8;
                    if byte == 0 {
                        break;
                    }
                    output.push(byte);
                }
            } else {
                let mut len = 3;
                loop {
                    let part = reader.bits(3)? as usize;
                    len += part;
                    if part != 7 {
                        break;
                    }
                }
                copy_back(&mut output, offset, len)?;
            }
        }
    }

    output.truncate(length);
    Ok(output)
}
