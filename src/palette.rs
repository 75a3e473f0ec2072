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

//! The console palette: 16 standard colors followed by 16 extended ones.

/// An RGBA color.
pub type Rgba = [u8; 4];

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 32;

const PALETTE: [Rgba; PALETTE_SIZE] = [
    [0x00, 0x00, 0x00, 0xff],
    [0x1d, 0x2b, 0x53, 0xff],
    [0x7e, 0x25, 0x53, 0xff],
    [0x00, 0x87, 0x51, 0xff],
    [0xab, 0x52, 0x36, 0xff],
    [0x5f, 0x57, 0x4f, 0xff],
    [0xc2, 0xc3, 0xc7, 0xff],
    [0xff, 0xf1, 0xe8, 0xff],
    [0xff, 0x00, 0x4d, 0xff],
    [0xff, 0xa3, 0x00, 0xff],
    [0xff, 0xec, 0x27, 0xff],
    [0x00, 0xe4, 0x36, 0xff],
    [0x29, 0xad, 0xff, 0xff],
    [0x83, 0x76, 0x9c, 0xff],
    [0xff, 0x77, 0xa8, 0xff],
    [0xff, 0xcc, 0xaa, 0xff],
    [0x29, 0x18, 0x14, 0xff],
    [0x11, 0x1d, 0x35, 0xff],
    [0x42, 0x21, 0x36, 0xff],
    [0x12, 0x53, 0x59, 0xff],
    [0x74, 0x2f, 0x29, 0xff],
    [0x49, 0x33, 0x3b, 0xff],
    [0xa2, 0x88, 0x79, 0xff],
    [0xf3, 0xef, 0x7d, 0xff],
    [0xbe, 0x12, 0x50, 0xff],
    [0xff, 0x6c, 0x24, 0xff],
    [0xa8, 0xe7, 0x2e, 0xff],
    [0x00, 0xb5, 0x43, 0xff],
    [0x06, 0x5a, 0xb5, 0xff],
    [0x75, 0x46, 0x65, 0xff],
    [0xff, 0x6e, 0x59, 0xff],
    [0xff, 0x9d, 0x81, 0xff],
];

/// Get the color of palette entry `index` (wrapped to the palette size).
pub fn get(index: u8) -> Rgba {
    PALETTE[index as usize % PALETTE_SIZE]
}

/// Find the entry among the first `count` colors closest to `color`.
///
/// Distance is squared RGB distance; alpha is ignored and ties go to the
/// lower index.
pub fn nearest(color: Rgba, count: usize) -> u8 {
    let count = count.clamp(1, PALETTE_SIZE);
    let distance = |entry: &Rgba| -> u32 {
        entry[..3]
            .iter()
            .zip(&color[..3])
            .map(|(&a, &b)| {
                let d = a as i32 - b as i32;
                (d * d) as u32
            })
            .sum()
    };

    PALETTE[..count]
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| distance(entry))
        .map(|(i, _)| i as u8)
        .unwrap_or(0)
}
