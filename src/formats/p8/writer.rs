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

//! Serializer for the text container.

use crate::cart::Cartridge;
use crate::code::pico8_to_utf8;
use crate::sections::{self, SectionKind};

/// First line of every written container.
pub const HEADER_LINE: &str = "pico-8 cartridge // http://www.pico-8.com";

/// Render `cart` as a text container declaring `version`.
///
/// The code section is always written. Data sections are written only when
/// they hold a non-zero byte, and stop after their last non-zero line.
pub fn write(cart: &Cartridge, version: u32) -> String {
    let mut out = String::new();
    out.push_str(HEADER_LINE);
    out.push('\n');
    out.push_str(&format!("version {}\n", version));

    for kind in SectionKind::ALL {
        match kind {
            SectionKind::Lua => {
                push_marker(&mut out, kind);
                out.push_str(&pico8_to_utf8(cart.code()));
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            SectionKind::Label => {
                if let Some(label) = cart.label() {
                    push_section(&mut out, kind, &sections::label::encode(label));
                    out.push('\n');
                }
            }
            _ => push_section(&mut out, kind, &data_lines(cart, kind)),
        }
    }

    out.push('\n');
    out
}

fn data_lines(cart: &Cartridge, kind: SectionKind) -> Vec<String> {
    let memory = cart.memory();
    match kind {
        SectionKind::Gfx => sections::gfx::encode(memory),
        SectionKind::Gff => sections::gfx::encode_props(memory),
        SectionKind::Map => sections::map::encode(memory),
        SectionKind::Sfx => sections::sfx::encode(memory),
        SectionKind::Music => sections::song::encode(memory),
        SectionKind::Lua | SectionKind::Label => Vec::new(),
    }
}

fn push_marker(out: &mut String, kind: SectionKind) {
    out.push_str(kind.marker());
    out.push('\n');
}

fn push_section(out: &mut String, kind: SectionKind, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    push_marker(out, kind);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}
