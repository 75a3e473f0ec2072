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

//! Music section.
//!
//! A text line is five bytes: a flags byte whose low four bits belong to
//! channels 0-3, then the four 7-bit channel bytes. In memory each flag sits
//! in bit 7 of its channel byte.

use std::fmt::Write;

use crate::memory::{Memory, Song, SONG_COUNT, SONG_SIZE};

/// Bytes per entry in the decoded run.
pub const SONG_RUN_SIZE: usize = 5;

/// Unpack a decoded music run into the song table. Returns the number of
/// entries written; a trailing partial group is ignored.
pub fn decode(run: &[u8], memory: &mut Memory) -> usize {
    let groups = run.chunks_exact(SONG_RUN_SIZE);
    if !groups.remainder().is_empty() {
        log::warn!(
            "music section ends with a partial entry of {} bytes",
            groups.remainder().len()
        );
    }

    let mut count = 0;
    for (index, group) in groups.take(SONG_COUNT).enumerate() {
        let mut data = [0; SONG_SIZE];
        for (channel, byte) in data.iter_mut().enumerate() {
            *byte = group[channel + 1] | ((group[0] << (7 - channel)) & 0x80);
        }
        memory.set_song(index, Song::from_bytes(data));
        count += 1;
    }
    count
}

/// Pack one song entry back into its five-byte run form.
pub fn pack(song: Song) -> [u8; SONG_RUN_SIZE] {
    [song.flags(), song.sfx(0), song.sfx(1), song.sfx(2), song.sfx(3)]
}

/// Music lines, one per entry up to the last non-empty one.
pub fn encode(memory: &Memory) -> Vec<String> {
    let count = super::hex::used_lines(memory.songs(), SONG_SIZE);
    (0..count)
        .map(|index| {
            let [flags, a, b, c, d] = pack(memory.song(index));
            let mut line = String::with_capacity(11);
            let _ = write!(line, "{:02x} {:02x}{:02x}{:02x}{:02x}", flags, a, b, c, d);
            line
        })
        .collect()
}
