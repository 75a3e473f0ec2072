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

//! The `.lua` container: bare source code with an empty memory image.

use super::Decoded;
use crate::cart::{Cartridge, DEFAULT_VERSION};
use crate::code;

/// Decode raw source. This cannot fail.
pub fn decode(bytes: &[u8]) -> Decoded {
    let code = code::decode_text(bytes);
    log::debug!("code: {} chars", code.len());
    Decoded {
        code,
        version: DEFAULT_VERSION,
        ..Decoded::default()
    }
}

/// Encode the code of `cart` as raw source.
pub fn encode(cart: &Cartridge) -> Vec<u8> {
    code::pico8_to_utf8(cart.code()).into_bytes()
}
