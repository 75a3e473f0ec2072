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

//! The cartridge: a memory image, its source code and an optional label.
//!
//! Loading decodes into a staging value first and replaces every field at
//! once on success, so a failed load leaves the cartridge untouched. Each
//! successful load bumps [`Cartridge::generation`], which lets callers that
//! cache compiled code notice that it is stale.

use std::fs;
use std::path::Path;

use crate::code;
use crate::config::CodecConfig;
use crate::error::{CartError, ErrorCode, Result};
use crate::formats::{self, js, lua, p8, png, Decoded, Format};
use crate::label::Label;
use crate::memory::{Memory, CODE, MEMORY_SIZE, ROM_CODE};

/// Version written for cartridges that never had one.
pub const DEFAULT_VERSION: u32 = 29;

/// Size of the version tag after a ROM: one major byte, then the minor
/// version as a big-endian `u32`.
pub const VERSION_TAG_SIZE: usize = 5;

/// Size of a tagged ROM.
pub const ROM_SIZE: usize = MEMORY_SIZE + VERSION_TAG_SIZE;

/// A loaded cartridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge {
    memory: Memory,
    code: Vec<u8>,
    label: Option<Label>,
    version: u32,
    minor: u32,
    generation: u64,
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Cartridge {
    /// Create an empty cartridge.
    pub fn new() -> Self {
        Self {
            memory: Memory::new(),
            code: Vec::new(),
            label: None,
            version: DEFAULT_VERSION,
            minor: 0,
            generation: 0,
        }
    }

    /// Load a cartridge from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut cart = Self::new();
        cart.load(path)?;
        Ok(cart)
    }

    /// Replace this cartridge with the contents of a file, choosing the
    /// container by extension.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let format = Format::from_path(path)?;
        let bytes = fs::read(path).map_err(|err| CartError::read(path, err))?;
        log::debug!("loaded file {}", path.display());
        self.load_bytes(format, &bytes)
    }

    /// Replace this cartridge with a decoded container.
    pub fn load_bytes(&mut self, format: Format, bytes: &[u8]) -> Result<()> {
        let decoded = formats::decode(format, bytes)?;
        self.publish(decoded);
        Ok(())
    }

    fn publish(&mut self, decoded: Decoded) {
        self.memory = decoded.memory;
        self.code = decoded.code;
        self.label = decoded.label;
        self.version = decoded.version;
        self.minor = decoded.minor;
        self.bump();
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Write this cartridge to a file, choosing the container by extension.
    pub fn save(&self, path: &Path, config: &CodecConfig) -> Result<()> {
        let format = Format::from_path(path)?;
        let bytes = self.encode(format, config)?;
        fs::write(path, bytes).map_err(|err| CartError::write(path, err))?;
        log::debug!("saved {} as {}", path.display(), format);
        Ok(())
    }

    /// Encode this cartridge as a container.
    pub fn encode(&self, format: Format, config: &CodecConfig) -> Result<Vec<u8>> {
        match format {
            Format::P8 => Ok(p8::write(self, config.version_for(self)).into_bytes()),
            Format::Png => png::encode(self, config),
            Format::Js => js::encode(self, config),
            Format::Lua => Ok(lua::encode(self)),
        }
    }

    /// The ROM with this cartridge's own version tag.
    pub fn rom(&self) -> Result<Vec<u8>> {
        self.tagged_rom(self.version, self.minor)
    }

    /// The ROM: memory up to the code area, the compressed code, zero
    /// padding to the memory size, then the version tag.
    pub fn tagged_rom(&self, version: u32, minor: u32) -> Result<Vec<u8>> {
        let compressed = code::compress(&self.code)?;
        log::debug!(
            "compressed code length: {}/{}",
            compressed.len(),
            ROM_CODE.size
        );
        if compressed.len() > ROM_CODE.size {
            return Err(CartError::new(
                ErrorCode::CodeTooLarge,
                format!(
                    "compressed code is {} bytes, at most {} fit in a cartridge",
                    compressed.len(),
                    ROM_CODE.size
                ),
            )
            .with_hint("shorten the code"));
        }

        let major = u8::try_from(version).unwrap_or_else(|_| {
            log::warn!("version {} does not fit the ROM tag, writing 255", version);
            u8::MAX
        });

        let mut rom = Vec::with_capacity(ROM_SIZE);
        rom.extend_from_slice(&self.memory.as_bytes()[..CODE.offset]);
        rom.extend_from_slice(&compressed);
        rom.resize(MEMORY_SIZE, 0);
        rom.push(major);
        rom.extend_from_slice(&minor.to_be_bytes());
        Ok(rom)
    }

    /// Replace memory, code and version from a ROM. The label is kept.
    pub fn set_rom(&mut self, rom: &[u8]) -> Result<()> {
        let mut decoded = formats::from_rom(rom)?;
        decoded.label = self.label.take();
        self.publish(decoded);
        Ok(())
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Code in the 8-bit charset.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Replace the code. This counts as a new generation.
    pub fn set_code(&mut self, code: Vec<u8>) {
        self.code = code;
        self.bump();
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn set_label(&mut self, label: Option<Label>) {
        self.label = label;
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Counter bumped on every load and code change.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
