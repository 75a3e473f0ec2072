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

//! Transform between the code text a container stores and the code bytes
//! a cartridge holds: line endings, charset, and ROM compression.

pub mod charset;
pub mod compress;

pub use charset::{pico8_to_utf8, utf8_to_pico8};
pub use compress::{compress, decompress};

/// Replace every CRLF pair with a single LF. Lone CRs are kept.
pub fn normalize_line_endings(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut iter = input.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if byte == b'\r' && iter.peek() == Some(&b'\n') {
            continue;
        }
        output.push(byte);
    }
    output
}

/// Decode container text into cartridge code bytes.
pub fn decode_text(input: &[u8]) -> Vec<u8> {
    utf8_to_pico8(&normalize_line_endings(input))
}
