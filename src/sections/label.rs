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

//! Label section: one base-32 character per pixel, 128 characters a line.

use super::hex;
use crate::label::Label;

/// Build a label from a decoded run. An empty run means no label.
pub fn decode(run: &[u8]) -> Option<Label> {
    if run.is_empty() {
        return None;
    }
    Some(Label::from_indices(run))
}

/// Label lines, always the full height.
pub fn encode(label: &Label) -> Vec<String> {
    label.rows().map(hex::encode_base32).collect()
}
