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

//! Fuzz target for the ROM-based containers.
//!
//! Uses structured input to pick a container, so the image and script
//! decoders both see arbitrary data.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_rom

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use p8cart::{decode, Format};

#[derive(Debug, Arbitrary)]
enum Input {
    Image(Vec<u8>),
    Script(String),
    Numbers(Vec<i32>),
}

fuzz_target!(|input: Input| {
    let _ = match input {
        Input::Image(bytes) => decode(Format::Png, &bytes),
        Input::Script(text) => decode(Format::Js, text.as_bytes()),
        Input::Numbers(numbers) => {
            let body: Vec<String> = numbers.iter().map(|n| n.to_string()).collect();
            let text = format!("var _cartdat=[{}];", body.join(","));
            decode(Format::Js, text.as_bytes())
        }
    };
});
