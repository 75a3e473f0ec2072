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

//! Integration tests for the `.p8` text container.

use p8cart::formats::p8;
use p8cart::memory::{MAP, SHARED};
use p8cart::sections::hex::BASE32_DIGITS;
use p8cart::{decode, CodecConfig, ErrorCode, ErrorKind, Format, Label};
use pretty_assertions::assert_eq;

const HELLO: &str = include_str!("fixtures/hello.p8");

fn text(body: &str) -> String {
    format!("pico-8 cartridge // http://www.pico-8.com\nversion 8\n{}", body)
}

#[test]
fn test_code_only_container() {
    let cart = decode(Format::P8, text("__lua__\nprint(1)\n").as_bytes()).unwrap();
    assert_eq!(cart.code(), b"print(1)\n");
    assert_eq!(cart.version(), 8);
    assert!(cart.memory().as_bytes().iter().all(|&b| b == 0));
    assert!(cart.label().is_none());
}

#[test]
fn test_gfx_line_swaps_nibbles() {
    let line = "0123456789abcdef".repeat(8);
    let cart = decode(Format::P8, text(&format!("__gfx__\n{}\n", line)).as_bytes()).unwrap();
    let gfx = cart.memory().gfx();
    assert_eq!(
        &gfx[..8],
        &[0x10, 0x32, 0x54, 0x76, 0x98, 0xba, 0xdc, 0xfe]
    );
    assert_eq!(&gfx[56..64], &gfx[..8]);
    assert_eq!(gfx[64], 0);
    // Low nibble is the left pixel
    assert_eq!(cart.memory().gfx_pixel(0, 0), 0);
    assert_eq!(cart.memory().gfx_pixel(1, 0), 1);
}

#[test]
fn test_label_base32_digits() {
    let digits = std::str::from_utf8(BASE32_DIGITS).unwrap();
    let cart = decode(Format::P8, text(&format!("__label__\n{}\n", digits)).as_bytes()).unwrap();
    let label = cart.label().unwrap();
    let expected: Vec<u8> = (0..32).collect();
    assert_eq!(&label.pixels()[..32], &expected[..]);
    assert!(label.pixels()[32..].iter().all(|&p| p == 0));
}

#[test]
fn test_label_out_of_range_digits_are_dropped() {
    let cart = decode(Format::P8, text("__label__\n1w2xyz3\n").as_bytes()).unwrap();
    let label = cart.label().unwrap();
    assert_eq!(&label.pixels()[..4], &[1, 2, 3, 0]);
}

#[test]
fn test_map_excess_merges_into_shared_bank() {
    let mut body = String::from("__gfx__\n");
    // Second sprite bank starts at row 64
    for _ in 0..64 {
        body.push_str(&"0".repeat(128));
        body.push('\n');
    }
    body.push_str(&"1".repeat(8));
    body.push('\n');

    body.push_str("__map__\n");
    for _ in 0..32 {
        body.push_str(&"aa".repeat(128));
        body.push('\n');
    }
    body.push_str("0202\n");

    let cart = decode(Format::P8, text(&body).as_bytes()).unwrap();
    let memory = cart.memory();
    assert!(memory.map().iter().all(|&b| b == 0xaa));
    assert_eq!(memory.as_bytes()[SHARED.offset], 0x13);
    assert_eq!(memory.as_bytes()[SHARED.offset + 1], 0x13);
    assert_eq!(memory.as_bytes()[SHARED.offset + 2], 0x11);
    assert_eq!(memory.map_byte(MAP.size), 0x13);
}

#[test]
fn test_fixture_sections() {
    let cart = decode(Format::P8, HELLO.as_bytes()).unwrap();
    let memory = cart.memory();

    assert_eq!(cart.version(), 8);
    assert_eq!(cart.code(), b"-- hello\nprint(\"hello\")\n");
    assert_eq!(memory.gfx()[0], 0x10);
    assert_eq!(&memory.gfx()[64..69], &[0x77, 0x77, 0x77, 0x77, 0]);
    assert_eq!(&memory.gfx_props()[..2], &[0, 1]);
    assert_eq!(&memory.map()[..6], &[1, 2, 3, 4, 5, 0]);

    let sfx = memory.sfx(0);
    assert_eq!(sfx.speed(), 1);
    assert_eq!(sfx.note(0).key(), 32);
    assert!(memory.sfx(1).is_empty());

    let song = memory.song(0);
    assert!(song.start());
    assert!(!song.looping());
    assert_eq!(song.sfx(0), 2);
    assert_eq!(song.sfx(3), 5);
}

#[test]
fn test_fixture_round_trip() {
    let cart = decode(Format::P8, HELLO.as_bytes()).unwrap();
    let written = cart.encode(Format::P8, &CodecConfig::default()).unwrap();
    let again = decode(Format::P8, &written).unwrap();

    assert_eq!(again.memory(), cart.memory());
    assert_eq!(again.code(), cart.code());
    assert_eq!(again.version(), cart.version());
}

#[test]
fn test_writer_is_stable() {
    let cart = decode(Format::P8, HELLO.as_bytes()).unwrap();
    let first = p8::write(&cart, cart.version());
    let second = p8::write(&decode(Format::P8, first.as_bytes()).unwrap(), 8);
    assert_eq!(first, second);
}

#[test]
fn test_label_round_trip() {
    let mut cart = decode(Format::P8, HELLO.as_bytes()).unwrap();
    let mut label = Label::default();
    label.set(0, 0, 31);
    label.set(127, 127, 17);
    cart.set_label(Some(label.clone()));

    let written = cart.encode(Format::P8, &CodecConfig::default()).unwrap();
    let again = decode(Format::P8, &written).unwrap();
    assert_eq!(again.label(), Some(&label));
}

#[test]
fn test_config_version_overrides_cart() {
    let cart = decode(Format::P8, HELLO.as_bytes()).unwrap();
    let config = CodecConfig::from_toml_str("version = 41").unwrap();
    let written = String::from_utf8(cart.encode(Format::P8, &config).unwrap()).unwrap();
    assert!(written.starts_with("pico-8 cartridge // http://www.pico-8.com\nversion 41\n"));
}

#[test]
fn test_crlf_container() {
    let source = HELLO.replace('\n', "\r\n");
    let cart = decode(Format::P8, source.as_bytes()).unwrap();
    let plain = decode(Format::P8, HELLO.as_bytes()).unwrap();
    assert_eq!(cart.memory(), plain.memory());
    assert_eq!(cart.code(), plain.code());
}

#[test]
fn test_unknown_section_is_skipped() {
    let source = text("__lua__\nx=1\n__meta:foo__\nwhatever\n__map__\n07\n");
    let cart = decode(Format::P8, source.as_bytes()).unwrap();
    assert_eq!(cart.code(), b"x=1\n");
    assert_eq!(cart.memory().map()[0], 7);
}

#[test]
fn test_glyphs_in_code() {
    let cart = decode(Format::P8, text("__lua__\nif btn(⬅️) then end\n").as_bytes()).unwrap();
    assert_eq!(cart.code(), b"if btn(\x8b) then end\n");

    let written = cart.encode(Format::P8, &CodecConfig::default()).unwrap();
    assert!(String::from_utf8(written).unwrap().contains("btn(⬅️)"));
}

#[test]
fn test_missing_banner() {
    let err = decode(Format::P8, b"hello\nversion 8\n").unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingBanner);
    assert_eq!(err.kind(), ErrorKind::MalformedHeader);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.p8");
    let cart = decode(Format::P8, HELLO.as_bytes()).unwrap();
    cart.save(&path, &CodecConfig::default()).unwrap();

    let loaded = p8cart::Cartridge::from_file(&path).unwrap();
    assert_eq!(loaded.memory(), cart.memory());
    assert_eq!(loaded.code(), cart.code());
}
