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

//! The canonical 32 KiB memory image.
//!
//! Every container decodes into and encodes from this one layout:
//!
//! | region          | offset | size   |
//! |-----------------|--------|--------|
//! | gfx             | 0x0000 | 0x2000 |
//! | gfx2 / map2     | 0x1000 | 0x1000 |
//! | map             | 0x2000 | 0x1000 |
//! | gfx props       | 0x3000 | 0x0100 |
//! | songs           | 0x3100 | 0x0100 |
//! | sfx             | 0x3200 | 0x1100 |
//! | code            | 0x4300 | 0x1b00 |
//! | persistent      | 0x5e00 | 0x0100 |
//! | draw state      | 0x5f00 | 0x0040 |
//! | hardware state  | 0x5f40 | 0x0040 |
//! | GPIO            | 0x5f80 | 0x0080 |
//! | screen          | 0x6000 | 0x2000 |
//!
//! The second half of the sprite sheet doubles as the lower half of the map.
//! Both views are served from the same owned bytes.

mod sfx;
mod song;

pub use sfx::{Note, Sfx, SfxMut, NOTES_PER_SFX, SFX_SIZE};
pub use song::{Song, SONG_SIZE};

use std::ops::Range;

/// Total size of the memory image in bytes.
pub const MEMORY_SIZE: usize = 0x8000;

/// A fixed region of the memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub size: usize,
}

impl Region {
    pub const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// One past the last byte of the region.
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

pub const GFX: Region = Region::new(0x0000, 0x2000);
pub const SHARED: Region = Region::new(0x1000, 0x1000);
pub const MAP: Region = Region::new(0x2000, 0x1000);
pub const GFX_PROPS: Region = Region::new(0x3000, 0x100);
pub const SONGS: Region = Region::new(0x3100, 0x100);
pub const SFX: Region = Region::new(0x3200, 0x1100);
pub const CODE: Region = Region::new(0x4300, 0x1b00);
pub const PERSISTENT: Region = Region::new(0x5e00, 0x100);
pub const DRAW_STATE: Region = Region::new(0x5f00, 0x40);
pub const HW_STATE: Region = Region::new(0x5f40, 0x40);
pub const GPIO: Region = Region::new(0x5f80, 0x80);
pub const SCREEN: Region = Region::new(0x6000, 0x2000);

/// In a cartridge ROM the compressed code runs from the code region to the
/// end of memory.
pub const ROM_CODE: Region = Region::new(CODE.offset, MEMORY_SIZE - CODE.offset);

/// Number of song entries.
pub const SONG_COUNT: usize = 64;

/// Number of sound effect entries.
pub const SFX_COUNT: usize = 64;

/// Size of the combined map view (primary map followed by map2).
pub const FULL_MAP_SIZE: usize = MAP.size + SHARED.size;

// Layout checks
const _: () = {
    assert!(GFX.offset == 0);
    assert!(SHARED.offset == GFX.offset + GFX.size / 2);
    assert!(SHARED.end() == GFX.end());
    assert!(GFX.end() == MAP.offset);
    assert!(MAP.end() == GFX_PROPS.offset);
    assert!(GFX_PROPS.end() == SONGS.offset);
    assert!(SONGS.end() == SFX.offset);
    assert!(SFX.end() == CODE.offset);
    assert!(CODE.end() == PERSISTENT.offset);
    assert!(PERSISTENT.end() == DRAW_STATE.offset);
    assert!(DRAW_STATE.end() == HW_STATE.offset);
    assert!(HW_STATE.end() == GPIO.offset);
    assert!(GPIO.end() == SCREEN.offset);
    assert!(SCREEN.end() == MEMORY_SIZE);
    assert!(ROM_CODE.size == 0x3d00);
    assert!(SONGS.size == SONG_COUNT * SONG_SIZE);
    assert!(SFX.size == SFX_COUNT * SFX_SIZE);
    assert!(MEMORY_SIZE == 32768);
};

/// The 32 KiB memory image.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .field("non_zero_bytes", &used)
            .finish()
    }
}

impl Memory {
    /// Create a zeroed memory image.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Build a memory image from the first `MEMORY_SIZE` bytes of `data`.
    ///
    /// Shorter input is zero-padded.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut memory = Self::new();
        let len = data.len().min(MEMORY_SIZE);
        memory.bytes[..len].copy_from_slice(&data[..len]);
        memory
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }

    pub fn region(&self, region: Region) -> &[u8] {
        &self.bytes[region.range()]
    }

    pub fn region_mut(&mut self, region: Region) -> &mut [u8] {
        &mut self.bytes[region.range()]
    }

    /// Copy `data` into `region`, truncated to the region size.
    ///
    /// Returns the number of bytes copied.
    pub fn fill_region(&mut self, region: Region, data: &[u8]) -> usize {
        let len = data.len().min(region.size);
        self.bytes[region.offset..region.offset + len].copy_from_slice(&data[..len]);
        len
    }

    /// The full sprite sheet, including the shared second bank.
    pub fn gfx(&self) -> &[u8] {
        self.region(GFX)
    }

    pub fn gfx_mut(&mut self) -> &mut [u8] {
        self.region_mut(GFX)
    }

    /// The shared bank seen as the second half of the sprite sheet.
    pub fn gfx2(&self) -> &[u8] {
        self.region(SHARED)
    }

    /// The shared bank seen as the lower half of the map.
    pub fn map2(&self) -> &[u8] {
        self.region(SHARED)
    }

    /// The primary map.
    pub fn map(&self) -> &[u8] {
        self.region(MAP)
    }

    pub fn map_mut(&mut self) -> &mut [u8] {
        self.region_mut(MAP)
    }

    /// Bitwise-OR `data` into the shared bank, truncated to its size.
    ///
    /// Merging never clears a bit, so applying the same bytes twice is the
    /// same as applying them once. Returns the number of bytes merged.
    pub fn merge_map2(&mut self, data: &[u8]) -> usize {
        let shared = self.region_mut(SHARED);
        let len = data.len().min(shared.len());
        for (dst, src) in shared.iter_mut().zip(&data[..len]) {
            *dst |= *src;
        }
        len
    }

    /// Translate an index into the combined map view into a memory address.
    ///
    /// Cells `0..0x1000` live in the primary map, `0x1000..0x2000` in the
    /// shared bank.
    fn map_address(n: usize) -> usize {
        assert!(n < FULL_MAP_SIZE, "map index {:#x} out of range", n);
        if n < MAP.size {
            MAP.offset + n
        } else {
            SHARED.offset + (n - MAP.size)
        }
    }

    /// Read a cell of the combined 128x64 map.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not below `FULL_MAP_SIZE`.
    pub fn map_byte(&self, n: usize) -> u8 {
        self.bytes[Self::map_address(n)]
    }

    /// Write a cell of the combined 128x64 map.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not below `FULL_MAP_SIZE`.
    pub fn set_map_byte(&mut self, n: usize, value: u8) {
        self.bytes[Self::map_address(n)] = value;
    }

    /// Read the 4-bit sprite sheet pixel at (x, y); the low nibble is the
    /// left pixel of each byte.
    pub fn gfx_pixel(&self, x: usize, y: usize) -> u8 {
        let byte = self.bytes[GFX.offset + y * 64 + x / 2];
        if x % 2 == 0 {
            byte & 0x0f
        } else {
            byte >> 4
        }
    }

    pub fn gfx_props(&self) -> &[u8] {
        self.region(GFX_PROPS)
    }

    pub fn gfx_props_mut(&mut self) -> &mut [u8] {
        self.region_mut(GFX_PROPS)
    }

    pub fn songs(&self) -> &[u8] {
        self.region(SONGS)
    }

    pub fn song(&self, index: usize) -> Song {
        let offset = SONGS.offset + index * SONG_SIZE;
        let mut data = [0; SONG_SIZE];
        data.copy_from_slice(&self.bytes[offset..offset + SONG_SIZE]);
        Song::from_bytes(data)
    }

    pub fn set_song(&mut self, index: usize, song: Song) {
        let offset = SONGS.offset + index * SONG_SIZE;
        self.bytes[offset..offset + SONG_SIZE].copy_from_slice(&song.to_bytes());
    }

    pub fn sfx_bytes(&self) -> &[u8] {
        self.region(SFX)
    }

    pub fn sfx(&self, index: usize) -> Sfx<'_> {
        let offset = SFX.offset + index * SFX_SIZE;
        Sfx::new(&self.bytes[offset..offset + SFX_SIZE])
    }

    pub fn sfx_mut(&mut self, index: usize) -> SfxMut<'_> {
        let offset = SFX.offset + index * SFX_SIZE;
        SfxMut::new(&mut self.bytes[offset..offset + SFX_SIZE])
    }

    pub fn code(&self) -> &[u8] {
        self.region(CODE)
    }

    /// The compressed code area of a cartridge ROM.
    pub fn rom_code(&self) -> &[u8] {
        self.region(ROM_CODE)
    }

    pub fn rom_code_mut(&mut self) -> &mut [u8] {
        self.region_mut(ROM_CODE)
    }

    pub fn persistent(&self) -> &[u8] {
        self.region(PERSISTENT)
    }

    pub fn draw_state(&self) -> &[u8] {
        self.region(DRAW_STATE)
    }

    pub fn hw_state(&self) -> &[u8] {
        self.region(HW_STATE)
    }

    pub fn gpio(&self) -> &[u8] {
        self.region(GPIO)
    }

    pub fn screen(&self) -> &[u8] {
        self.region(SCREEN)
    }
}

impl std::ops::Index<usize> for Memory {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl std::ops::IndexMut<usize> for Memory {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.bytes[index]
    }
}
