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

//! Sound effect entries.
//!
//! An entry is 68 bytes: 32 little-endian 16-bit notes followed by four
//! control bytes (editor mode, speed, loop start, loop end).

/// Size of one sound effect entry in bytes.
pub const SFX_SIZE: usize = 68;

/// Number of notes in one sound effect.
pub const NOTES_PER_SFX: usize = 32;

const EDITOR_MODE: usize = 64;
const SPEED: usize = 65;
const LOOP_START: usize = 66;
const LOOP_END: usize = 67;

/// A packed note: key in bits 0-5, instrument in 6-8, volume in 9-11 and
/// effect in 12-15.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Note(pub u16);

impl Note {
    pub fn new(key: u8, instrument: u8, volume: u8, effect: u8) -> Self {
        Note(
            (key as u16 & 0x3f)
                | (instrument as u16 & 0x7) << 6
                | (volume as u16 & 0x7) << 9
                | (effect as u16 & 0xf) << 12,
        )
    }

    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Note(u16::from_le_bytes(bytes))
    }

    pub fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn key(self) -> u8 {
        (self.0 & 0x3f) as u8
    }

    pub fn instrument(self) -> u8 {
        (self.0 >> 6 & 0x7) as u8
    }

    pub fn volume(self) -> u8 {
        (self.0 >> 9 & 0x7) as u8
    }

    pub fn effect(self) -> u8 {
        (self.0 >> 12 & 0xf) as u8
    }
}

/// Read-only view of one sound effect entry.
#[derive(Debug, Clone, Copy)]
pub struct Sfx<'a> {
    data: &'a [u8],
}

impl<'a> Sfx<'a> {
    pub(super) fn new(data: &'a [u8]) -> Self {
        debug_assert_eq!(data.len(), SFX_SIZE);
        Self { data }
    }

    pub fn note(&self, index: usize) -> Note {
        Note::from_le_bytes([self.data[index * 2], self.data[index * 2 + 1]])
    }

    pub fn notes(&self) -> impl Iterator<Item = Note> + '_ {
        (0..NOTES_PER_SFX).map(|i| self.note(i))
    }

    pub fn editor_mode(&self) -> u8 {
        self.data[EDITOR_MODE]
    }

    pub fn speed(&self) -> u8 {
        self.data[SPEED]
    }

    pub fn loop_start(&self) -> u8 {
        self.data[LOOP_START]
    }

    pub fn loop_end(&self) -> u8 {
        self.data[LOOP_END]
    }

    /// Check whether every byte of the entry is zero.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

/// Mutable view of one sound effect entry.
#[derive(Debug)]
pub struct SfxMut<'a> {
    data: &'a mut [u8],
}

impl<'a> SfxMut<'a> {
    pub(super) fn new(data: &'a mut [u8]) -> Self {
        debug_assert_eq!(data.len(), SFX_SIZE);
        Self { data }
    }

    pub fn set_note(&mut self, index: usize, note: Note) {
        self.data[index * 2..index * 2 + 2].copy_from_slice(&note.to_le_bytes());
    }

    pub fn set_editor_mode(&mut self, value: u8) {
        self.data[EDITOR_MODE] = value;
    }

    pub fn set_speed(&mut self, value: u8) {
        self.data[SPEED] = value;
    }

    pub fn set_loop_start(&mut self, value: u8) {
        self.data[LOOP_START] = value;
    }

    pub fn set_loop_end(&mut self, value: u8) {
        self.data[LOOP_END] = value;
    }
}
