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

//! Section marker recognition for the text container.

use logos::Logos;

use crate::sections::SectionKind;

/// A section marker line.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    #[token("__lua__")]
    Lua,
    #[token("__gfx__")]
    Gfx,
    #[token("__gff__")]
    Gff,
    #[token("__map__")]
    Map,
    #[token("__sfx__")]
    Sfx,
    #[token("__music__")]
    Music,
    #[token("__label__")]
    Label,
    /// Any other `__name__` marker; its section is skipped.
    #[regex("__[A-Za-z0-9:]+__")]
    Unknown,
}

impl Marker {
    /// The section this marker opens, or `None` for unknown markers.
    pub fn section(self) -> Option<SectionKind> {
        match self {
            Marker::Lua => Some(SectionKind::Lua),
            Marker::Gfx => Some(SectionKind::Gfx),
            Marker::Gff => Some(SectionKind::Gff),
            Marker::Map => Some(SectionKind::Map),
            Marker::Sfx => Some(SectionKind::Sfx),
            Marker::Music => Some(SectionKind::Music),
            Marker::Label => Some(SectionKind::Label),
            Marker::Unknown => None,
        }
    }
}

/// Recognize `line` as a marker. The marker must be the whole line; a
/// trailing CR is ignored.
pub fn recognize(line: &[u8]) -> Option<Marker> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if !line.starts_with(b"__") {
        return None;
    }
    let text = std::str::from_utf8(line).ok()?;
    let mut lexer = Marker::lexer(text);
    let marker = lexer.next()?.ok()?;
    (lexer.span() == (0..text.len())).then_some(marker)
}
