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

//! Section codecs.
//!
//! A text container section is first turned into a flat byte run (hex pairs,
//! or base-32 digits for the label). The codecs in this module map those
//! runs onto memory regions and back. Runs of the same kind accumulate when
//! a section appears more than once.

pub mod gfx;
pub mod hex;
pub mod label;
pub mod map;
pub mod sfx;
pub mod song;

use crate::label::{Label, LABEL_SIZE};
use crate::memory::{Memory, FULL_MAP_SIZE, GFX, GFX_PROPS, SFX, SONGS};

/// The sections a text container can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Lua,
    Gfx,
    Gff,
    Map,
    Sfx,
    Music,
    Label,
}

impl SectionKind {
    /// Every kind, in the order the text writer emits them.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Lua,
        SectionKind::Gfx,
        SectionKind::Label,
        SectionKind::Gff,
        SectionKind::Map,
        SectionKind::Sfx,
        SectionKind::Music,
    ];

    /// The marker line introducing this section.
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::Lua => "__lua__",
            SectionKind::Gfx => "__gfx__",
            SectionKind::Gff => "__gff__",
            SectionKind::Map => "__map__",
            SectionKind::Sfx => "__sfx__",
            SectionKind::Music => "__music__",
            SectionKind::Label => "__label__",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marker().trim_matches('_'))
    }
}

/// Decoded byte runs of every data section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRuns {
    pub gfx: Vec<u8>,
    pub gff: Vec<u8>,
    pub map: Vec<u8>,
    pub sfx: Vec<u8>,
    pub music: Vec<u8>,
    pub label: Vec<u8>,
}

impl SectionRuns {
    /// Decode one body line of a data section and append it to its run.
    ///
    /// The code section is not a data section; its lines are ignored here.
    pub fn push_line(&mut self, kind: SectionKind, line: &[u8]) {
        match kind {
            SectionKind::Lua => {}
            SectionKind::Gfx => {
                hex::decode_pairs(line, true, &mut self.gfx);
            }
            SectionKind::Gff => {
                hex::decode_pairs(line, false, &mut self.gff);
            }
            SectionKind::Map => {
                hex::decode_pairs(line, false, &mut self.map);
            }
            SectionKind::Sfx => {
                hex::decode_pairs(line, false, &mut self.sfx);
            }
            SectionKind::Music => {
                hex::decode_pairs(line, false, &mut self.music);
            }
            SectionKind::Label => {
                hex::decode_base32(line, &mut self.label);
            }
        }
    }

    /// Write every run into `memory` and build the label, if any.
    pub fn apply(&self, memory: &mut Memory) -> Option<Label> {
        log::debug!(
            "gfx: {}/{} gff: {}/{} map: {}/{} sfx: {}/{} music: {}/{} label: {}/{}",
            self.gfx.len(),
            GFX.size,
            self.gff.len(),
            GFX_PROPS.size,
            self.map.len(),
            FULL_MAP_SIZE,
            self.sfx.len() / sfx::SFX_RUN_SIZE * crate::memory::SFX_SIZE,
            SFX.size,
            self.music.len() / song::SONG_RUN_SIZE * crate::memory::SONG_SIZE,
            SONGS.size,
            self.label.len(),
            LABEL_SIZE
        );

        gfx::decode(&self.gfx, memory);
        gfx::decode_props(&self.gff, memory);
        map::decode(&self.map, memory);
        song::decode(&self.music, memory);
        sfx::decode(&self.sfx, memory);
        label::decode(&self.label)
    }
}
