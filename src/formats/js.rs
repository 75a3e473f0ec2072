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

//! The `.js` script container: a web export that embeds the ROM as a JSON
//! array literal assigned to `_cartdat`.

use serde_json::Value;

use super::Decoded;
use crate::cart::{Cartridge, ROM_SIZE};
use crate::config::CodecConfig;
use crate::error::{CartError, ErrorCode, Result};

/// Text preceding the array literal.
pub const MARKER: &[u8] = b"var _cartdat=";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Locate the array literal: the first `[` after the marker up to its
/// matching `]`. Returns the byte range, brackets included.
pub fn locate(source: &[u8]) -> Result<std::ops::Range<usize>> {
    let marker = find(source, MARKER).ok_or_else(|| {
        CartError::new(
            ErrorCode::MissingScriptMarker,
            "no 'var _cartdat=' assignment found",
        )
    })?;
    let after = marker + MARKER.len();
    let unterminated = || {
        CartError::new(
            ErrorCode::UnterminatedScriptLiteral,
            "the cartridge data array is not terminated",
        )
    };

    let start = source[after..]
        .iter()
        .position(|&b| b == b'[')
        .map(|i| after + i)
        .ok_or_else(unterminated)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in source.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start..i + 1);
                }
            }
            _ => {}
        }
    }
    Err(unterminated())
}

/// Convert a number to a byte the way a script engine stores it into a
/// byte array: truncate towards zero, then wrap.
fn to_byte(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32 as u8
}

/// Extract the ROM bytes from a script container.
///
/// The copy stops early, without error, at the end of the array or at the
/// first element that is not a number; the rest stays zero.
///
/// A number literal beyond the `f64` range, such as `1e999`, is rejected as
/// an invalid literal. Exporters only ever write integers in `0..256`.
pub fn extract(source: &[u8]) -> Result<Vec<u8>> {
    let range = locate(source)?;
    let value: Value = serde_json::from_slice(&source[range.clone()]).map_err(|err| {
        CartError::new(
            ErrorCode::InvalidScriptLiteral,
            format!("the cartridge data is not a valid array: {}", err),
        )
        .with_span(range.clone())
    })?;
    let Value::Array(elements) = value else {
        return Err(CartError::new(
            ErrorCode::InvalidScriptLiteral,
            "the cartridge data is not an array",
        )
        .with_span(range));
    };

    let mut rom = vec![0; ROM_SIZE];
    let mut copied = 0;
    for (slot, element) in rom.iter_mut().zip(&elements) {
        let Some(number) = element.as_f64() else {
            log::warn!("cartridge data element {} is not a number", copied);
            break;
        };
        *slot = to_byte(number);
        copied += 1;
    }
    if copied < ROM_SIZE {
        log::debug!("cartridge data holds {} of {} bytes", copied, ROM_SIZE);
    }
    Ok(rom)
}

/// Decode a script container.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    super::from_rom(&extract(bytes)?)
}

/// Render a ROM as a script container.
pub fn write(rom: &[u8]) -> String {
    let numbers: Vec<String> = rom.iter().map(|b| b.to_string()).collect();
    format!("var _cartdat=[{}];\n", numbers.join(","))
}

/// Encode `cart` as a script container.
pub fn encode(cart: &Cartridge, config: &CodecConfig) -> Result<Vec<u8>> {
    let rom = cart.tagged_rom(config.version_for(cart), config.minor_for(cart))?;
    Ok(write(&rom).into_bytes())
}
