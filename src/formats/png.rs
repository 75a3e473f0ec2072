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

//! The `.png` image container.
//!
//! A 160x205 image carries one ROM byte per pixel in the low two bits of
//! each channel, in row-major order: alpha holds bits 6-7, red 4-5, green
//! 2-3 and blue 0-1. The visible cartridge label sits at a fixed rectangle
//! of the same image.

use std::path::Path;

use png::{BitDepth, ColorType, Transformations};

use super::Decoded;
use crate::cart::{Cartridge, ROM_SIZE};
use crate::config::CodecConfig;
use crate::error::{CartError, ErrorCode, Result};
use crate::label::{Label, LABEL_HEIGHT, LABEL_WIDTH, LABEL_X, LABEL_Y};
use crate::palette::{self, Rgba, PALETTE_SIZE};

/// Image width in pixels.
pub const IMAGE_WIDTH: usize = 160;

/// Image height in pixels.
pub const IMAGE_HEIGHT: usize = 205;

/// Fill color of the built-in template.
const TEMPLATE_COLOR: Rgba = [0x20, 0x20, 0x20, 0xff];

/// An 8-bit RGBA pixel grid.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for RgbaImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbaImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl RgbaImage {
    /// Create an image filled with one color.
    pub fn new(width: usize, height: usize, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: fill.repeat(width * height),
        }
    }

    /// The built-in blank cartridge template.
    pub fn blank() -> Self {
        Self::new(IMAGE_WIDTH, IMAGE_HEIGHT, TEMPLATE_COLOR)
    }

    /// Decode PNG bytes into RGBA, whatever the stored pixel format.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let failed = |err: png::DecodingError| {
            CartError::new(
                ErrorCode::ImageDecodeFailed,
                format!("cannot decode image: {}", err),
            )
        };

        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(failed)?;
        let (color_type, bit_depth) = reader.output_color_type();

        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buffer).map_err(failed)?;
        let data = &buffer[..info.buffer_size()];

        if bit_depth != BitDepth::Eight {
            return Err(unsupported(color_type, bit_depth));
        }
        let pixels: Vec<u8> = match color_type {
            ColorType::Rgba => data.to_vec(),
            ColorType::Rgb => data
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 0xff])
                .collect(),
            ColorType::GrayscaleAlpha => data
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 0xff]).collect(),
            ColorType::Indexed => return Err(unsupported(color_type, bit_depth)),
        };

        Ok(Self {
            width: info.width as usize,
            height: info.height as usize,
            pixels,
        })
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn write(&self) -> Result<Vec<u8>> {
        let failed = |err: png::EncodingError| {
            CartError::new(
                ErrorCode::ImageEncodeFailed,
                format!("cannot encode image: {}", err),
            )
        };

        let mut output = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(&mut output, self.width as u32, self.height as u32);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().map_err(failed)?;
            writer.write_image_data(&self.pixels).map_err(failed)?;
        }
        Ok(output)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at row-major index `n`.
    pub fn pixel_at(&self, n: usize) -> Rgba {
        let p = &self.pixels[n * 4..n * 4 + 4];
        [p[0], p[1], p[2], p[3]]
    }

    pub fn set_pixel_at(&mut self, n: usize, color: Rgba) {
        self.pixels[n * 4..n * 4 + 4].copy_from_slice(&color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixel_at(y * self.width + x)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        self.set_pixel_at(y * self.width + x, color);
    }

    fn check_size(&self, code: ErrorCode) -> Result<()> {
        if self.width == IMAGE_WIDTH && self.height == IMAGE_HEIGHT {
            return Ok(());
        }
        Err(CartError::new(
            code,
            format!(
                "image is {}x{}, expected {}x{}",
                self.width, self.height, IMAGE_WIDTH, IMAGE_HEIGHT
            ),
        ))
    }
}

fn unsupported(color_type: ColorType, bit_depth: BitDepth) -> CartError {
    CartError::new(
        ErrorCode::UnsupportedPixelFormat,
        format!("unsupported pixel format {:?} at {:?}", color_type, bit_depth),
    )
}

/// Recover one byte from the low bits of a pixel.
pub fn pixel_byte([r, g, b, a]: Rgba) -> u8 {
    (a & 3) << 6 | (r & 3) << 4 | (g & 3) << 2 | (b & 3)
}

/// Hide `byte` in the low bits of `pixel`, keeping the high bits.
pub fn embed_byte([r, g, b, a]: Rgba, byte: u8) -> Rgba {
    [
        (r & !3) | (byte & 0x30) >> 4,
        (g & !3) | (byte & 0x0c) >> 2,
        (b & !3) | (byte & 0x03),
        (a & !3) | (byte & 0xc0) >> 6,
    ]
}

/// Read the ROM bytes and the label out of a cartridge image.
pub fn extract(image: &RgbaImage) -> Result<(Vec<u8>, Label)> {
    image.check_size(ErrorCode::WrongImageSize)?;

    let rom: Vec<u8> = (0..ROM_SIZE).map(|n| pixel_byte(image.pixel_at(n))).collect();

    let mut indices = Vec::with_capacity(LABEL_WIDTH * LABEL_HEIGHT);
    for y in 0..LABEL_HEIGHT {
        for x in 0..LABEL_WIDTH {
            let color = image.pixel(x + LABEL_X, y + LABEL_Y);
            indices.push(palette::nearest(color, PALETTE_SIZE));
        }
    }

    Ok((rom, Label::from_indices(&indices)))
}

/// Draw `label` onto `image` and hide `rom` in its low bits.
pub fn embed(image: &mut RgbaImage, rom: &[u8], label: Option<&Label>) -> Result<()> {
    image.check_size(ErrorCode::InvalidTemplate)?;

    if let Some(label) = label {
        for y in 0..LABEL_HEIGHT {
            for x in 0..LABEL_WIDTH {
                image.set_pixel(x + LABEL_X, y + LABEL_Y, palette::get(label.get(x, y)));
            }
        }
    }

    for (n, &byte) in rom.iter().enumerate() {
        let pixel = image.pixel_at(n);
        image.set_pixel_at(n, embed_byte(pixel, byte));
    }
    Ok(())
}

/// Decode an image container.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    let image = RgbaImage::read(bytes)?;
    let (rom, label) = extract(&image)?;
    let mut decoded = super::from_rom(&rom)?;
    decoded.label = Some(label);
    Ok(decoded)
}

/// Load the configured template, or the built-in one.
pub fn template(config: &CodecConfig) -> Result<RgbaImage> {
    let Some(path) = &config.template else {
        return Ok(RgbaImage::blank());
    };
    load_template(path)
}

fn load_template(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|err| CartError::read(path, err))?;
    let image = RgbaImage::read(&bytes).map_err(|err| {
        CartError::new(
            ErrorCode::InvalidTemplate,
            format!("template '{}': {}", path.display(), err.message),
        )
    })?;
    image.check_size(ErrorCode::InvalidTemplate)?;
    Ok(image)
}

/// Encode `cart` as an image container.
pub fn encode(cart: &Cartridge, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut image = template(config)?;
    let rom = cart.tagged_rom(config.version_for(cart), config.minor_for(cart))?;
    embed(&mut image, &rom, cart.label())?;
    image.write()
}
