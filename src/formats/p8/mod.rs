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

//! The `.p8` text container.

pub mod lexer;
pub mod parser;
pub mod writer;

pub use parser::{parse, ParsedText};
pub use writer::write;

use super::Decoded;
use crate::code;
use crate::error::Result;
use crate::memory::Memory;

/// Decode a text container.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    let parsed = parse(bytes)?;

    let mut memory = Memory::new();
    let label = parsed.runs.apply(&mut memory);
    let code = code::decode_text(&parsed.code);
    log::debug!("version: {} code: {} chars", parsed.version, code.len());

    Ok(Decoded {
        memory,
        code,
        label,
        version: parsed.version,
        minor: 0,
    })
}
