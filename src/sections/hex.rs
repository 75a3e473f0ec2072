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

//! Digit-level encodings used by text container sections: hex byte pairs
//! and the single-character base-32 label alphabet.

use std::fmt::Write;

/// Label pixel alphabet, one character per value.
pub const BASE32_DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Value of a hex digit, either case.
pub fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Value of a base-32 label digit, either case.
pub fn base32_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'v' => Some(c - b'a' + 10),
        b'A'..=b'V' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decode adjacent hex digit pairs from `body` into `out`.
///
/// Characters that are not hex digits are skipped. With `swapped`, the first
/// digit of a pair is the low nibble.
///
/// A digit followed by anything but another digit still yields one byte and
/// consumes that following character, so a short pair never shifts the
/// bytes after it. See [`lone_digit_value`].
///
/// Returns the number of lone digits.
pub fn decode_pairs(body: &[u8], swapped: bool, out: &mut Vec<u8>) -> usize {
    let mut lone = 0;
    let mut i = 0;
    while i < body.len() {
        let Some(first) = hex_value(body[i]) else {
            i += 1;
            continue;
        };
        let next = body.get(i + 1).copied();
        match next.and_then(hex_value) {
            Some(second) => out.push(if swapped {
                (second << 4) | first
            } else {
                (first << 4) | second
            }),
            None => {
                lone += 1;
                out.push(lone_digit_value(first, next, swapped));
            }
        }
        i += 2;
    }
    if lone > 0 {
        log::warn!("read {} unpaired hex digit(s) as single-digit bytes", lone);
    }
    lone
}

/// Value of a digit paired with a character that is not a hex digit.
///
/// The pair reads as a C-style unsigned hex number: in normal order the
/// stray character ends the number after the digit, in swapped order it
/// leads. A leading blank or sign is accepted, anything else reads as 0.
/// The end of the line counts as a line break.
pub fn lone_digit_value(digit: u8, next: Option<u8>, swapped: bool) -> u8 {
    if !swapped {
        return digit;
    }
    match next.unwrap_or(b'\n') {
        b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | b'+' => digit,
        b'-' => digit.wrapping_neg(),
        _ => 0,
    }
}

/// Decode base-32 label digits from `body` into `out`, one value per
/// character. Line breaks are skipped silently; any other character outside
/// the alphabet is dropped.
///
/// Returns the number of dropped characters.
pub fn decode_base32(body: &[u8], out: &mut Vec<u8>) -> usize {
    let mut dropped = 0;
    for &c in body {
        match base32_value(c) {
            Some(value) => out.push(value),
            None if c == b'\n' || c == b'\r' => {}
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!("dropped {} character(s) outside the label alphabet", dropped);
    }
    dropped
}

/// Encode bytes as lowercase hex pairs.
pub fn encode_pairs(bytes: &[u8], swapped: bool) -> String {
    let mut text = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        let byte = if swapped { byte.rotate_left(4) } else { byte };
        let _ = write!(text, "{:02x}", byte);
    }
    text
}

/// Encode label values as base-32 digits.
pub fn encode_base32(values: &[u8]) -> String {
    values
        .iter()
        .map(|&v| BASE32_DIGITS[(v & 0x1f) as usize] as char)
        .collect()
}

/// Number of `per_line`-sized lines needed to cover every non-zero byte.
pub fn used_lines(data: &[u8], per_line: usize) -> usize {
    data.iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last / per_line + 1)
}

/// Encode `data` as hex lines of `per_line` bytes, omitting trailing
/// all-zero lines.
pub fn encode_lines(data: &[u8], per_line: usize, swapped: bool) -> Vec<String> {
    data.chunks(per_line)
        .take(used_lines(data, per_line))
        .map(|chunk| encode_pairs(chunk, swapped))
        .collect()
}
