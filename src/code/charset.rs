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

//! Mapping between the console's 8-bit charset and the UTF-8 glyphs text
//! containers use for its symbols.

const VARIATION_SELECTOR: &str = "\u{fe0f}";

/// Glyphs for 0x10..=0x1f.
const LOW: [&str; 16] = [
    "▮", "■", "□", "⁙", "⁘", "‖", "◀", "▶", "「", "」", "¥", "•", "、", "。", "゛", "゜",
];

/// Glyphs for 0x80..=0xff.
const HIGH: [&str; 128] = [
    "█", "▒", "🐱", "⬇️", "░", "✽", "●", "♥", "☉", "웃", "⌂", "⬅️", "😐", "♪", "🅾️", "◆",
    "…", "➡️", "★", "⧗", "⬆️", "ˇ", "∧", "❎", "▤", "▥", "あ", "い", "う", "え", "お", "か",
    "き", "く", "け", "こ", "さ", "し", "す", "せ", "そ", "た", "ち", "つ", "て", "と", "な", "に",
    "ぬ", "ね", "の", "は", "ひ", "ふ", "へ", "ほ", "ま", "み", "む", "め", "も", "や", "ゆ", "よ",
    "ら", "り", "る", "れ", "ろ", "わ", "を", "ん", "っ", "ゃ", "ゅ", "ょ", "ア", "イ", "ウ", "エ",
    "オ", "カ", "キ", "ク", "ケ", "コ", "サ", "シ", "ス", "セ", "ソ", "タ", "チ", "ツ", "テ", "ト",
    "ナ", "ニ", "ヌ", "ネ", "ノ", "ハ", "ヒ", "フ", "ヘ", "ホ", "マ", "ミ", "ム", "メ", "モ", "ヤ",
    "ユ", "ヨ", "ラ", "リ", "ル", "レ", "ロ", "ワ", "ヲ", "ン", "ッ", "ャ", "ュ", "ョ", "◜", "◝",
];

/// The glyph a text container uses for `byte`, if it has one.
pub fn glyph(byte: u8) -> Option<&'static str> {
    match byte {
        0x10..=0x1f => Some(LOW[(byte - 0x10) as usize]),
        0x80..=0xff => Some(HIGH[(byte - 0x80) as usize]),
        _ => None,
    }
}

/// Iterate over every mapped byte and its glyph.
fn table() -> impl Iterator<Item = (u8, &'static str)> {
    (0x10..=0x1fu8)
        .chain(0x80..=0xffu8)
        .filter_map(|b| glyph(b).map(|g| (b, g)))
}

/// Match a glyph at the start of `input`, returning the byte and the number
/// of input bytes consumed.
fn match_glyph(input: &[u8]) -> Option<(u8, usize)> {
    for (byte, glyph) in table() {
        if input.starts_with(glyph.as_bytes()) {
            return Some((byte, glyph.len()));
        }
        if let Some(bare) = glyph.strip_suffix(VARIATION_SELECTOR) {
            if input.starts_with(bare.as_bytes()) {
                return Some((byte, bare.len()));
            }
        }
    }
    None
}

/// Convert container text to the 8-bit charset.
///
/// Works on raw bytes so that input which is not valid UTF-8 passes through
/// unchanged.
pub fn utf8_to_pico8(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        // Every glyph starts with a multi-byte UTF-8 lead byte
        if input[i] >= 0xc0 {
            if let Some((byte, len)) = match_glyph(&input[i..]) {
                output.push(byte);
                i += len;
                continue;
            }
        }
        output.push(input[i]);
        i += 1;
    }
    output
}

/// Convert 8-bit charset text to container text.
pub fn pico8_to_utf8(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len());
    for &byte in input {
        match glyph(byte) {
            Some(glyph) => output.push_str(glyph),
            None => output.push(byte as char),
        }
    }
    output
}
