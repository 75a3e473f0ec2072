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

//! Property-based tests for the cartridge codec.
//!
//! These tests check the round-trip laws between containers and the memory
//! image, using proptest for random input generation.

use p8cart::code::{compress, decompress, pico8_to_utf8, utf8_to_pico8};
use p8cart::formats::png::{self, RgbaImage};
use p8cart::memory::{Song, CODE, SONGS};
use p8cart::sections::{hex, song};
use p8cart::{decode, Cartridge, CodecConfig, Format, Label, Memory, ROM_SIZE};
use proptest::prelude::*;

fn with_data(data: &[u8], code: &[u8]) -> Cartridge {
    let mut cart = Cartridge::new();
    cart.memory_mut().as_bytes_mut()[..data.len()].copy_from_slice(data);
    cart.set_code(code.to_vec());
    cart
}

// ============================================================================
// Section Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: Every byte below the code area survives the text container.
    #[test]
    fn prop_text_keeps_data_sections(data in prop::collection::vec(any::<u8>(), CODE.offset)) {
        let cart = with_data(&data, b"");
        let text = cart.encode(Format::P8, &CodecConfig::default()).unwrap();
        let again = decode(Format::P8, &text).unwrap();
        prop_assert_eq!(&again.memory().as_bytes()[..CODE.offset], &data[..]);
    }

    /// Property: Every label survives the text container.
    #[test]
    fn prop_text_keeps_label(pixels in prop::collection::vec(0u8..32, 128 * 128)) {
        let mut cart = Cartridge::new();
        let label = Label::from_indices(&pixels);
        cart.set_label(Some(label.clone()));
        let text = cart.encode(Format::P8, &CodecConfig::default()).unwrap();
        let again = decode(Format::P8, &text).unwrap();
        prop_assert_eq!(again.label(), Some(&label));
    }

    /// Property: A ROM hidden in any template comes back unchanged.
    #[test]
    fn prop_embed_then_extract(
        rom in prop::collection::vec(any::<u8>(), ROM_SIZE),
        fill in any::<[u8; 4]>(),
    ) {
        let mut image = RgbaImage::new(png::IMAGE_WIDTH, png::IMAGE_HEIGHT, fill);
        png::embed(&mut image, &rom, None).unwrap();
        let (extracted, _) = png::extract(&image).unwrap();
        prop_assert_eq!(extracted, rom);
    }
}

// ============================================================================
// Map Overlap Property Tests
// ============================================================================

fn text_with_sections(sections: &[(&str, Vec<String>)]) -> Vec<u8> {
    let mut text = String::from("pico-8 cartridge\nversion 8\n__lua__\n");
    for (marker, lines) in sections {
        text.push_str(marker);
        text.push('\n');
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
    }
    text.into_bytes()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: Merging two map overflows into the shared bank gives the
    /// same bytes in either order.
    #[test]
    fn prop_map_merge_commutes(
        a in prop::collection::vec(any::<u8>(), 0..0x1000),
        b in prop::collection::vec(any::<u8>(), 0..0x1000),
        base in prop::collection::vec(any::<u8>(), 0x1000),
    ) {
        let mut first = Memory::new();
        first.as_bytes_mut()[0x1000..0x2000].copy_from_slice(&base);
        let mut second = first.clone();

        first.merge_map2(&a);
        first.merge_map2(&b);
        second.merge_map2(&b);
        second.merge_map2(&a);
        prop_assert_eq!(first.map2(), second.map2());
    }

    /// Property: The shared bank does not depend on whether the sprite
    /// sheet or the map comes first in a text container.
    #[test]
    fn prop_map_and_gfx_section_order(
        gfx in prop::collection::vec(any::<u8>(), 0x2000),
        map in prop::collection::vec(any::<u8>(), 0x2000),
    ) {
        let gfx_lines = hex::encode_lines(&gfx, 64, true);
        let map_lines = hex::encode_lines(&map, 128, false);

        let gfx_first = text_with_sections(&[
            ("__gfx__", gfx_lines.clone()),
            ("__map__", map_lines.clone()),
        ]);
        let map_first = text_with_sections(&[("__map__", map_lines), ("__gfx__", gfx_lines)]);

        let one = decode(Format::P8, &gfx_first).unwrap();
        let two = decode(Format::P8, &map_first).unwrap();
        prop_assert_eq!(one.memory().map2(), two.memory().map2());

        let expected: Vec<u8> = gfx[0x1000..]
            .iter()
            .zip(&map[0x1000..])
            .map(|(g, m)| g | m)
            .collect();
        prop_assert_eq!(one.memory().map2(), &expected[..]);
    }
}

proptest! {
    /// Property: Code lines survive the text container when a data section
    /// follows them.
    #[test]
    fn prop_text_keeps_code(code in "([a-z0-9 =(),.+]{0,30}\n){0,12}") {
        let cart = with_data(&[1], code.as_bytes());
        let text = cart.encode(Format::P8, &CodecConfig::default()).unwrap();
        let again = decode(Format::P8, &text).unwrap();
        prop_assert_eq!(again.code(), code.as_bytes());
    }

    /// Property: Hex digits decode the same in either case.
    #[test]
    fn prop_hex_case_insensitive(bytes in prop::collection::vec(any::<u8>(), 0..200), swapped in any::<bool>()) {
        let lower = hex::encode_pairs(&bytes, swapped);
        let upper = lower.to_uppercase();

        let mut from_lower = Vec::new();
        let mut from_upper = Vec::new();
        prop_assert_eq!(hex::decode_pairs(lower.as_bytes(), swapped, &mut from_lower), 0);
        prop_assert_eq!(hex::decode_pairs(upper.as_bytes(), swapped, &mut from_upper), 0);
        prop_assert_eq!(&from_lower, &bytes);
        prop_assert_eq!(from_upper, bytes);
    }

    /// Property: Base-32 label digits decode the same in either case.
    #[test]
    fn prop_base32_case_insensitive(values in prop::collection::vec(0u8..32, 0..200)) {
        let lower = hex::encode_base32(&values);
        let mut decoded = Vec::new();
        prop_assert_eq!(hex::decode_base32(lower.to_uppercase().as_bytes(), &mut decoded), 0);
        prop_assert_eq!(decoded, values);
    }

    /// Property: Packing a song and unpacking it is the identity.
    #[test]
    fn prop_song_pack_inverse(bytes in any::<[u8; 4]>()) {
        let mut memory = Memory::new();
        let run = song::pack(Song::from_bytes(bytes));
        prop_assert_eq!(song::decode(&run, &mut memory), 1);
        prop_assert_eq!(memory.song(0).to_bytes(), bytes);
        prop_assert!(memory.as_bytes()[SONGS.offset + 4..SONGS.end()].iter().all(|&b| b == 0));
    }

    /// Property: Compressed code decompresses to the original.
    #[test]
    fn prop_compress_round_trip(code in prop::collection::vec(any::<u8>(), 0..2000)) {
        let packed = compress(&code).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), code);
    }

    /// Property: Repetitive text compresses and decompresses to the original.
    #[test]
    fn prop_compress_round_trip_text(code in "(print\\(\"[a-z]{0,8}\"\\)\n|x=x\\+1\n|end\n){0,200}") {
        let packed = compress(code.as_bytes()).unwrap();
        prop_assert!(packed.len() <= code.len() * 2 + 8);
        prop_assert_eq!(decompress(&packed).unwrap(), code.into_bytes());
    }

    /// Property: Converting to text glyphs and back is the identity.
    #[test]
    fn prop_charset_round_trip(code in prop::collection::vec(any::<u8>(), 0..300)) {
        let text = pico8_to_utf8(&code);
        prop_assert_eq!(utf8_to_pico8(text.as_bytes()), code);
    }

    /// Property: The ROM round-trips through a cartridge.
    #[test]
    fn prop_rom_round_trip(
        data in prop::collection::vec(any::<u8>(), 0..CODE.offset),
        code in "[ -~\n]{0,400}",
        version in 0u32..=255,
        minor in any::<u32>(),
    ) {
        let cart = with_data(&data, code.as_bytes());
        let rom = cart.tagged_rom(version, minor).unwrap();
        prop_assert_eq!(rom.len(), ROM_SIZE);

        let mut again = Cartridge::new();
        again.set_rom(&rom).unwrap();
        prop_assert_eq!(again.code(), code.as_bytes());
        prop_assert_eq!(&again.memory().as_bytes()[..data.len()], &data[..]);
        prop_assert_eq!(again.version(), version);
        prop_assert_eq!(again.minor(), minor);
    }
}
