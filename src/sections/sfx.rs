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

//! Sound effect section.
//!
//! A text line holds the four control bytes followed by 32 notes of five
//! hex digits each (key, instrument, volume, effect), so two notes share
//! five bytes of the decoded run.

use super::hex;
use crate::memory::{Memory, Note, Sfx, NOTES_PER_SFX, SFX_COUNT, SFX_SIZE};

/// Bytes per entry in the decoded run: 4 control bytes and 80 note bytes.
pub const SFX_RUN_SIZE: usize = 4 + NOTES_PER_SFX * 5 / 2;

/// Byte offset of the 24-bit window holding note `index`.
fn window_offset(index: usize) -> usize {
    4 + index * 5 / 2
}

/// Read note `index` out of a packed run entry.
fn unpack_note(group: &[u8], index: usize) -> Note {
    let offset = window_offset(index);
    let window = (group[offset] as u32) << 16
        | (group[offset + 1] as u32) << 8
        | group[offset + 2] as u32;
    // Odd notes start half-way through a byte
    let bits = if index % 2 == 1 {
        window & 0xfffff
    } else {
        window >> 4
    };
    Note::new(
        ((bits & 0x3f000) >> 12) as u8,
        ((bits & 0x700) >> 8) as u8,
        ((bits & 0x70) >> 4) as u8,
        (bits & 0xf) as u8,
    )
}

/// Unpack a decoded sound effect run into the table. Returns the number of
/// entries written; a trailing partial group is ignored.
pub fn decode(run: &[u8], memory: &mut Memory) -> usize {
    let groups = run.chunks_exact(SFX_RUN_SIZE);
    if !groups.remainder().is_empty() {
        log::warn!(
            "sfx section ends with a partial entry of {} bytes",
            groups.remainder().len()
        );
    }

    let mut count = 0;
    for (index, group) in groups.take(SFX_COUNT).enumerate() {
        let mut sfx = memory.sfx_mut(index);
        for note in 0..NOTES_PER_SFX {
            sfx.set_note(note, unpack_note(group, note));
        }
        sfx.set_editor_mode(group[0]);
        sfx.set_speed(group[1]);
        sfx.set_loop_start(group[2]);
        sfx.set_loop_end(group[3]);
        count += 1;
    }
    count
}

/// Pack one sound effect entry back into its run form.
pub fn pack(sfx: Sfx<'_>) -> [u8; SFX_RUN_SIZE] {
    let mut group = [0; SFX_RUN_SIZE];
    group[0] = sfx.editor_mode();
    group[1] = sfx.speed();
    group[2] = sfx.loop_start();
    group[3] = sfx.loop_end();

    for (index, note) in sfx.notes().enumerate() {
        let value = (note.key() as u32) << 12
            | (note.instrument() as u32) << 8
            | (note.volume() as u32) << 4
            | note.effect() as u32;
        let window = if index % 2 == 1 { value } else { value << 4 };
        let offset = window_offset(index);
        group[offset] |= (window >> 16) as u8;
        group[offset + 1] |= (window >> 8) as u8;
        group[offset + 2] |= window as u8;
    }
    group
}

/// Sound effect lines, one per entry up to the last non-empty one.
pub fn encode(memory: &Memory) -> Vec<String> {
    let count = hex::used_lines(memory.sfx_bytes(), SFX_SIZE);
    (0..count)
        .map(|index| hex::encode_pairs(&pack(memory.sfx(index)), false))
        .collect()
}
