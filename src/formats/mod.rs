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

//! Cartridge containers.
//!
//! Each container decodes into a [`Decoded`] staging value and encodes from
//! a [`Cartridge`](crate::cart::Cartridge):
//! - `.p8` line-oriented text
//! - `.png` image with the ROM hidden in the low bits of each pixel
//! - `.js` script embedding the ROM as an array literal
//! - `.lua` raw source code

pub mod js;
pub mod lua;
pub mod p8;
pub mod png;

use std::path::Path;

use crate::code;
use crate::error::{CartError, ErrorCode, Result};
use crate::label::Label;
use crate::memory::{Memory, MEMORY_SIZE};

/// A container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.p8` text container.
    P8,
    /// `.png` image container.
    Png,
    /// `.js` script container.
    Js,
    /// `.lua` raw source.
    Lua,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 4] = [Format::P8, Format::Png, Format::Js, Format::Lua];

    /// The file extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::P8 => "p8",
            Format::Png => "png",
            Format::Js => "js",
            Format::Lua => "lua",
        }
    }

    /// Select the format for `path`, with a descriptive error when the
    /// extension is missing or not recognized.
    pub fn from_path(path: &Path) -> Result<Format> {
        let Some(extension) = path.extension() else {
            return Err(CartError::new(
                ErrorCode::MissingExtension,
                format!("'{}' has no file extension", path.display()),
            )
            .with_hint(supported_hint()));
        };
        format_from_extension(path).ok_or_else(|| {
            CartError::new(
                ErrorCode::UnknownExtension,
                format!(
                    "unknown cartridge extension '.{}'",
                    extension.to_string_lossy()
                ),
            )
            .with_hint(supported_hint())
        })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

fn supported_hint() -> String {
    let list: Vec<String> = Format::ALL
        .iter()
        .map(|format| format!(".{}", format))
        .collect();
    format!("supported extensions are {}", list.join(", "))
}

/// Determine the container format from a file extension, ignoring case.
pub fn format_from_extension(path: &Path) -> Option<Format> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "p8" => Some(Format::P8),
        "png" => Some(Format::Png),
        "js" => Some(Format::Js),
        "lua" => Some(Format::Lua),
        _ => None,
    }
}

/// Everything a container decodes to, before it is published to a
/// cartridge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Memory image.
    pub memory: Memory,
    /// Code in the 8-bit charset.
    pub code: Vec<u8>,
    /// Optional label.
    pub label: Option<Label>,
    /// Container version.
    pub version: u32,
    /// Minor version, only carried by ROM-based containers.
    pub minor: u32,
}

/// Build a staging value from a cartridge ROM: the memory image followed by
/// the version tag. Short input is zero-padded.
pub fn from_rom(rom: &[u8]) -> Result<Decoded> {
    let memory = Memory::from_bytes(rom);
    let tag = |i: usize| rom.get(MEMORY_SIZE + i).copied().unwrap_or(0);
    let version = tag(0) as u32;
    let minor = u32::from_be_bytes([tag(1), tag(2), tag(3), tag(4)]);

    let code = code::decompress(memory.rom_code())?;
    log::debug!("version: {}.{} code: {} chars", version, minor, code.len());

    Ok(Decoded {
        memory,
        code,
        label: None,
        version,
        minor,
    })
}

/// Decode `bytes` as a container of the given format.
pub fn decode(format: Format, bytes: &[u8]) -> Result<Decoded> {
    match format {
        Format::P8 => p8::decode(bytes),
        Format::Png => png::decode(bytes),
        Format::Js => js::decode(bytes),
        Format::Lua => Ok(lua::decode(bytes)),
    }
}
