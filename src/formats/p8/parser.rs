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

//! Line-oriented parser for the text container.
//!
//! The parser is a small state machine over input lines:
//!
//! ```text
//! Header -> Version -> SeekSection -> InSection(kind) | Skip
//!                           ^                |
//!                           +-- marker line -+
//! ```
//!
//! Only the header and version lines can fail. Everything after them is
//! either a marker line, a body line of the current section, or ignored.

use super::lexer;
use crate::error::{CartError, ErrorCode, Result, Span};
use crate::sections::{SectionKind, SectionRuns};

/// Text every container starts with.
pub const BANNER: &[u8] = b"pico-8 cartridge";

const VERSION_PREFIX: &[u8] = b"version ";
const BOM: &[u8] = b"\xef\xbb\xbf";

/// The raw result of parsing a text container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    /// Version from the header.
    pub version: u32,
    /// Code section bytes exactly as stored.
    pub code: Vec<u8>,
    /// Decoded data section runs.
    pub runs: SectionRuns,
    /// Names of skipped unknown sections, in order of appearance.
    pub unknown_sections: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Version,
    SeekSection,
    InSection(SectionKind),
    Skip,
}

/// Parser state over a text container.
pub struct Parser<'source> {
    source: &'source [u8],
    state: State,
    result: ParsedText,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source [u8]) -> Self {
        Self {
            source,
            state: State::Header,
            result: ParsedText::default(),
        }
    }

    /// Run the parser to the end of input.
    pub fn parse(mut self) -> Result<ParsedText> {
        let (body, mut offset) = match self.source.strip_prefix(BOM) {
            Some(rest) => (rest, BOM.len()),
            None => (self.source, 0),
        };
        if body.is_empty() {
            return Err(CartError::new(
                ErrorCode::EmptyContainer,
                "the text container is empty",
            ));
        }

        for line in body.split_inclusive(|&b| b == b'\n') {
            self.line(line, offset)?;
            offset += line.len();
        }

        match self.state {
            State::Header => Err(CartError::new(
                ErrorCode::EmptyContainer,
                "the text container is empty",
            )),
            State::Version => Err(CartError::new(
                ErrorCode::MissingVersionLine,
                "expected a 'version' line after the banner",
            )
            .with_span(offset..offset)),
            _ => {
                log::debug!(
                    "parsed text container: version {}, {} code bytes, {} unknown section(s)",
                    self.result.version,
                    self.result.code.len(),
                    self.result.unknown_sections.len()
                );
                Ok(self.result)
            }
        }
    }

    fn line(&mut self, line: &[u8], offset: usize) -> Result<()> {
        let content = line.strip_suffix(b"\n").unwrap_or(line);

        match self.state {
            State::Header => {
                self.header(content, offset)?;
                self.state = State::Version;
                return Ok(());
            }
            State::Version => {
                self.result.version = self.version(content, offset)?;
                self.state = State::SeekSection;
                return Ok(());
            }
            _ => {}
        }

        if let Some(marker) = lexer::recognize(content) {
            self.state = match marker.section() {
                Some(kind) => State::InSection(kind),
                None => {
                    let name = String::from_utf8_lossy(content).trim_end().to_string();
                    log::info!("unknown section name {}", name);
                    self.result.unknown_sections.push(name);
                    State::Skip
                }
            };
            return Ok(());
        }

        match self.state {
            State::InSection(SectionKind::Lua) => self.result.code.extend_from_slice(line),
            State::InSection(kind) => self.result.runs.push_line(kind, content),
            _ => {}
        }
        Ok(())
    }

    fn header(&self, content: &[u8], offset: usize) -> Result<()> {
        if content.starts_with(BANNER) {
            return Ok(());
        }
        Err(CartError::new(
            ErrorCode::MissingBanner,
            "this is not a text cartridge",
        )
        .with_span(offset..offset + trimmed_len(content))
        .with_hint("the first line must start with 'pico-8 cartridge'"))
    }

    fn version(&self, content: &[u8], offset: usize) -> Result<u32> {
        let span = Span::new(offset, offset + trimmed_len(content));
        let Some(rest) = content.strip_prefix(VERSION_PREFIX) else {
            return Err(CartError::new(
                ErrorCode::MissingVersionLine,
                "expected a 'version' line after the banner",
            )
            .with_span(span)
            .with_hint("the second line must look like 'version 42'"));
        };

        let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        let digits_start = offset + VERSION_PREFIX.len();
        let invalid = |message: &str| {
            CartError::new(ErrorCode::InvalidVersionNumber, message)
                .with_span(digits_start..digits_start + digits.max(1))
        };
        if digits == 0 {
            return Err(invalid("the version line has no number"));
        }

        // Only ASCII digits, so this is valid UTF-8
        let text = String::from_utf8_lossy(&rest[..digits]);
        text.parse::<u32>()
            .map_err(|_| invalid("the version number is out of range"))
    }
}

fn trimmed_len(content: &[u8]) -> usize {
    content.strip_suffix(b"\r").unwrap_or(content).len()
}

/// Parse a text container.
pub fn parse(source: &[u8]) -> Result<ParsedText> {
    Parser::new(source).parse()
}
