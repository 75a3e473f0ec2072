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

//! Sprite sheet and sprite flag sections. Both are straight copies; the
//! sprite sheet is written with each byte's nibbles swapped so that a line
//! reads left-to-right as pixels.

use super::hex;
use crate::memory::{Memory, GFX, GFX_PROPS};

/// Bytes per `__gfx__` line (128 pixels).
pub const GFX_BYTES_PER_LINE: usize = 64;

/// Bytes per `__gff__` line.
pub const GFF_BYTES_PER_LINE: usize = 128;

/// Copy a decoded sprite sheet run into memory. Returns the bytes used.
pub fn decode(run: &[u8], memory: &mut Memory) -> usize {
    truncated("gfx", run.len(), GFX.size);
    memory.fill_region(GFX, run)
}

/// Sprite sheet lines, nibble-swapped.
pub fn encode(memory: &Memory) -> Vec<String> {
    hex::encode_lines(memory.gfx(), GFX_BYTES_PER_LINE, true)
}

/// Copy a decoded sprite flag run into memory. Returns the bytes used.
pub fn decode_props(run: &[u8], memory: &mut Memory) -> usize {
    truncated("gff", run.len(), GFX_PROPS.size);
    memory.fill_region(GFX_PROPS, run)
}

/// Sprite flag lines.
pub fn encode_props(memory: &Memory) -> Vec<String> {
    hex::encode_lines(memory.gfx_props(), GFF_BYTES_PER_LINE, false)
}

pub(crate) fn truncated(section: &str, len: usize, capacity: usize) {
    if len > capacity {
        log::warn!(
            "{} section holds {} bytes, only {} fit; the rest is ignored",
            section,
            len,
            capacity
        );
    }
}
