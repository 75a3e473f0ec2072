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

//! Fuzz target for the text container.
//!
//! Feeds random bytes to the text decoder, then writes whatever it accepted
//! and checks that the result decodes again.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_p8
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_p8 -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use p8cart::{decode, CodecConfig, Format};

fuzz_target!(|data: &[u8]| {
    if let Ok(cart) = decode(Format::P8, data) {
        let text = cart
            .encode(Format::P8, &CodecConfig::default())
            .expect("text encoding cannot fail");
        let again = decode(Format::P8, &text).expect("written text must decode");
        assert_eq!(again.memory(), cart.memory());
    }
});
