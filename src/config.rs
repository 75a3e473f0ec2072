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

//! Codec settings, read from an optional TOML file.
//!
//! ```toml
//! template = "blank.png"
//! version = 41
//! minor = 0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cart::Cartridge;
use crate::error::{CartError, ErrorCode, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Blank image used as the base of written image containers. Relative
    /// paths are resolved against the directory of the config file.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Version written to containers; defaults to the cartridge's own.
    #[serde(default)]
    pub version: Option<u32>,

    /// Minor version written to the ROM tag; defaults to the cartridge's own.
    #[serde(default)]
    pub minor: Option<u32>,
}

impl CodecConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| {
            CartError::new(
                ErrorCode::InvalidConfig,
                format!("error parsing codec config: {}", err),
            )
        })
    }

    /// Read a config from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| CartError::read(path, err))?;
        let mut config = Self::from_toml_str(&text).map_err(|err| {
            CartError::new(
                ErrorCode::InvalidConfig,
                format!("'{}': {}", path.display(), err.message),
            )
        })?;

        if let (Some(template), Some(dir)) = (&config.template, path.parent()) {
            if template.is_relative() {
                config.template = Some(dir.join(template));
            }
        }
        Ok(config)
    }

    /// The version to write for `cart`.
    pub fn version_for(&self, cart: &Cartridge) -> u32 {
        self.version.unwrap_or_else(|| cart.version())
    }

    /// The minor version to write for `cart`.
    pub fn minor_for(&self, cart: &Cartridge) -> u32 {
        self.minor.unwrap_or_else(|| cart.minor())
    }
}
