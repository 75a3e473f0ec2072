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

//! Map section.
//!
//! The first 0x1000 bytes fill the primary map. Anything past that belongs
//! to the lower half of the map, which shares its bytes with the second
//! sprite bank; it is OR-merged there because a container may carry both a
//! full sprite sheet and a full map for the same bytes.

use super::hex;
use crate::memory::{Memory, FULL_MAP_SIZE, MAP};

/// Bytes per `__map__` line (one row of tiles).
pub const MAP_BYTES_PER_LINE: usize = 128;

/// Copy a decoded map run into memory. Returns the bytes used.
pub fn decode(run: &[u8], memory: &mut Memory) -> usize {
    super::gfx::truncated("map", run.len(), FULL_MAP_SIZE);
    let primary = memory.fill_region(MAP, run);
    let merged = match run.get(MAP.size..) {
        Some(rest) if !rest.is_empty() => {
            log::debug!("merging {} map bytes into the shared bank", rest.len());
            memory.merge_map2(rest)
        }
        _ => 0,
    };
    primary + merged
}

/// Primary map lines. The shared bank is written by the sprite sheet.
pub fn encode(memory: &Memory) -> Vec<String> {
    hex::encode_lines(memory.map(), MAP_BYTES_PER_LINE, false)
}
