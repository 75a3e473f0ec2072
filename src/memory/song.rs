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

//! Song entries: one byte per channel, a 7-bit sound effect index plus a
//! flag in the top bit.

/// Size of one song entry in bytes.
pub const SONG_SIZE: usize = 4;

const FLAG: u8 = 0x80;

/// One song entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Song {
    data: [u8; SONG_SIZE],
}

impl Song {
    pub fn from_bytes(data: [u8; SONG_SIZE]) -> Self {
        Self { data }
    }

    pub fn to_bytes(self) -> [u8; SONG_SIZE] {
        self.data
    }

    /// The sound effect index played on `channel`.
    pub fn sfx(&self, channel: usize) -> u8 {
        self.data[channel] & !FLAG
    }

    pub fn set_sfx(&mut self, channel: usize, index: u8) {
        self.data[channel] = (self.data[channel] & FLAG) | (index & !FLAG);
    }

    /// The flag bit stored on `channel` (start, loop, stop, mode).
    pub fn flag(&self, channel: usize) -> bool {
        self.data[channel] & FLAG != 0
    }

    pub fn set_flag(&mut self, channel: usize, value: bool) {
        if value {
            self.data[channel] |= FLAG;
        } else {
            self.data[channel] &= !FLAG;
        }
    }

    pub fn start(&self) -> bool {
        self.flag(0)
    }

    pub fn looping(&self) -> bool {
        self.flag(1)
    }

    pub fn stop(&self) -> bool {
        self.flag(2)
    }

    pub fn mode(&self) -> bool {
        self.flag(3)
    }

    /// All four flags packed as bits 0-3.
    pub fn flags(&self) -> u8 {
        (0..SONG_SIZE).fold(0, |acc, i| acc | (u8::from(self.flag(i)) << i))
    }
}
