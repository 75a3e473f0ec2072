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

//! Fuzz target for code decompression.
//!
//! Any byte stream must decompress or fail cleanly, and anything the
//! compressor writes must decompress to its input.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_decompress

#![no_main]

use libfuzzer_sys::fuzz_target;
use p8cart::code::{compress, decompress};

fuzz_target!(|data: &[u8]| {
    let _ = decompress(data);

    if let Ok(packed) = compress(data) {
        assert_eq!(decompress(&packed).expect("compressed code must decompress"), data);
    }
});
