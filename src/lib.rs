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

//! Codec for PICO-8 cartridges.
//!
//! Every container maps onto the same 32 KiB memory image plus the source
//! code and an optional label:
//!
//! - `.p8` line-oriented text with one section per memory region
//! - `.png` image with the ROM hidden in the pixels' low bits
//! - `.js` web export holding the ROM as an array literal
//! - `.lua` bare source code
//!
//! # Modules
//!
//! - [`memory`] - The memory image and its regions
//! - [`sections`] - Section codecs between memory regions and text runs
//! - [`code`] - Charset translation and code compression
//! - [`formats`] - Container decoders and encoders
//! - [`cart`] - The cartridge entity with load and save
//! - [`config`] - Codec settings
//! - [`error`] - Error types and error reporting
//! - [`watcher`] - File watching for the CLI
//!
//! # Example
//!
//! ```no_run
//! use p8cart::{Cartridge, CodecConfig};
//! use std::path::Path;
//!
//! fn convert(input: &Path, output: &Path) -> p8cart::Result<()> {
//!     let cart = Cartridge::from_file(input)?;
//!     cart.save(output, &CodecConfig::default())
//! }
//! ```

pub mod cart;
pub mod code;
pub mod config;
pub mod error;
pub mod formats;
pub mod label;
pub mod memory;
pub mod palette;
pub mod sections;
pub mod watcher;

pub use cart::{Cartridge, DEFAULT_VERSION, ROM_SIZE};
pub use config::CodecConfig;
pub use error::{format_error, CartError, ErrorCode, ErrorKind, Result, Span};
pub use formats::{format_from_extension, Format};
pub use label::Label;
pub use memory::Memory;

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "p8cart";

/// Decode a container held in memory.
pub fn decode(format: Format, bytes: &[u8]) -> Result<Cartridge> {
    let mut cart = Cartridge::new();
    cart.load_bytes(format, bytes)?;
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "p8cart");
    }

    #[test]
    fn test_decode() {
        let cart = decode(Format::Lua, b"print(1)").unwrap();
        assert_eq!(cart.code(), b"print(1)");
        assert_eq!(cart.generation(), 1);
    }
}
