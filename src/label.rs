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

//! The cartridge label: a 128x128 thumbnail of palette indices that travels
//! alongside the memory image.

/// Label width in pixels.
pub const LABEL_WIDTH: usize = 128;

/// Label height in pixels.
pub const LABEL_HEIGHT: usize = 128;

/// Number of label pixels.
pub const LABEL_SIZE: usize = LABEL_WIDTH * LABEL_HEIGHT;

/// Label position inside the image container.
pub const LABEL_X: usize = 16;
pub const LABEL_Y: usize = 24;

/// Exclusive upper bound of a label pixel value.
pub const LABEL_COLORS: u8 = 32;

/// A full-size label.
#[derive(Clone, PartialEq, Eq)]
pub struct Label {
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Label")
            .field("width", &LABEL_WIDTH)
            .field("height", &LABEL_HEIGHT)
            .finish()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self {
            pixels: vec![0; LABEL_SIZE],
        }
    }
}

impl Label {
    /// Build a label from palette indices, truncated or zero-padded to
    /// `LABEL_SIZE`; values are wrapped into `0..32`.
    pub fn from_indices(indices: &[u8]) -> Self {
        if indices.len() != LABEL_SIZE {
            log::debug!(
                "label has {} pixels, expected {}",
                indices.len(),
                LABEL_SIZE
            );
        }
        let mut pixels: Vec<u8> = indices
            .iter()
            .take(LABEL_SIZE)
            .map(|&p| p % LABEL_COLORS)
            .collect();
        pixels.resize(LABEL_SIZE, 0);
        Self { pixels }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * LABEL_WIDTH + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.pixels[y * LABEL_WIDTH + x] = value % LABEL_COLORS;
    }

    /// Iterate over the label rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(LABEL_WIDTH)
    }
}
