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

//! Error types for the cartridge codec.
//!
//! Every loader and saver returns a [`CartError`]. Each error carries a
//! fine-grained [`ErrorCode`], which in turn maps onto one of the four
//! coarse [`ErrorKind`]s callers usually branch on.

use std::ops::Range;
use std::path::Path;

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A source span representing a range in a text container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// The coarse failure taxonomy every loader reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The extension or content is not handled by any loader.
    UnrecognizedFormat,
    /// The text container's banner or version line is missing or malformed.
    MalformedHeader,
    /// Wrong image size, missing script literal, corrupt compressed code...
    TruncatedOrCorruptData,
    /// An underlying read or write failed.
    IoFailure,
}

/// Error codes for the cartridge codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Dispatch errors (E001-E002)
    UnknownExtension,
    MissingExtension,

    // Text container errors (E100-E103)
    MissingBanner,
    MissingVersionLine,
    InvalidVersionNumber,
    EmptyContainer,

    // Data errors (E200-E208)
    WrongImageSize,
    ImageDecodeFailed,
    UnsupportedPixelFormat,
    MissingScriptMarker,
    UnterminatedScriptLiteral,
    InvalidScriptLiteral,
    CorruptCode,
    CodeTooLarge,
    InvalidTemplate,

    // I/O and configuration errors (E300-E303)
    ReadFailed,
    WriteFailed,
    ImageEncodeFailed,
    InvalidConfig,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the string code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnknownExtension => "E001",
            ErrorCode::MissingExtension => "E002",

            ErrorCode::MissingBanner => "E100",
            ErrorCode::MissingVersionLine => "E101",
            ErrorCode::InvalidVersionNumber => "E102",
            ErrorCode::EmptyContainer => "E103",

            ErrorCode::WrongImageSize => "E200",
            ErrorCode::ImageDecodeFailed => "E201",
            ErrorCode::UnsupportedPixelFormat => "E202",
            ErrorCode::MissingScriptMarker => "E203",
            ErrorCode::UnterminatedScriptLiteral => "E204",
            ErrorCode::InvalidScriptLiteral => "E205",
            ErrorCode::CorruptCode => "E206",
            ErrorCode::CodeTooLarge => "E207",
            ErrorCode::InvalidTemplate => "E208",

            ErrorCode::ReadFailed => "E300",
            ErrorCode::WriteFailed => "E301",
            ErrorCode::ImageEncodeFailed => "E302",
            ErrorCode::InvalidConfig => "E303",
        }
    }

    /// Map this code onto the coarse failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::UnknownExtension | ErrorCode::MissingExtension => {
                ErrorKind::UnrecognizedFormat
            }
            ErrorCode::MissingBanner
            | ErrorCode::MissingVersionLine
            | ErrorCode::InvalidVersionNumber
            | ErrorCode::EmptyContainer => ErrorKind::MalformedHeader,
            ErrorCode::WrongImageSize
            | ErrorCode::ImageDecodeFailed
            | ErrorCode::UnsupportedPixelFormat
            | ErrorCode::MissingScriptMarker
            | ErrorCode::UnterminatedScriptLiteral
            | ErrorCode::InvalidScriptLiteral
            | ErrorCode::CorruptCode
            | ErrorCode::CodeTooLarge
            | ErrorCode::InvalidTemplate => ErrorKind::TruncatedOrCorruptData,
            ErrorCode::ReadFailed
            | ErrorCode::WriteFailed
            | ErrorCode::ImageEncodeFailed
            | ErrorCode::InvalidConfig => ErrorKind::IoFailure,
        }
    }
}

/// A codec error, optionally pointing into a text container.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CartError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Where in a text container the error occurred, if anywhere.
    pub span: Option<Span>,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CartError {
    /// Create a new error without a source location.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: None,
            hint: None,
        }
    }

    /// Attach a source span.
    pub fn with_span(mut self, span: impl Into<Span>) -> Self {
        self.span = Some(span.into());
        self
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build an error for a failed read of `path`.
    pub fn read(path: &Path, err: std::io::Error) -> Self {
        Self::new(
            ErrorCode::ReadFailed,
            format!("cannot read {}: {}", path.display(), err),
        )
    }

    /// Build an error for a failed write of `path`.
    pub fn write(path: &Path, err: std::io::Error) -> Self {
        Self::new(
            ErrorCode::WriteFailed,
            format!("cannot write {}: {}", path.display(), err),
        )
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CartError>;

/// Format an error for the terminal.
///
/// Errors that point into a text container are rendered as an annotated
/// source report; all others as a single line plus the optional hint.
pub fn format_error(error: &CartError, source: &str, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");

    let Some(span) = &error.span else {
        let mut output = format!("error[{}]: {}\n", error.code_str(), error.message);
        if let Some(hint) = &error.hint {
            output.push_str(&format!("  = hint: {}\n", hint));
        }
        return output;
    };

    // Spans are byte offsets, reports count characters
    let start = char_offset(source, span.start);
    let end = char_offset(source, span.end).max(start);

    let mut builder = Report::build(ReportKind::Error, filename, start)
        .with_config(Config::default().with_color(false))
        .with_code(error.code_str())
        .with_message(&error.message)
        .with_label(Label::new((filename, start..end)).with_message(&error.message));
    if let Some(hint) = &error.hint {
        builder = builder.with_help(hint);
    }

    let mut buffer = Vec::new();
    if builder
        .finish()
        .write((filename, Source::from(source)), &mut buffer)
        .is_err()
    {
        return format!("error[{}]: {}\n", error.code_str(), error.message);
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

/// Number of characters in `source` before byte `offset`, rounding down to
/// a character boundary.
fn char_offset(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    source[..offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_creation() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_error_code() {
        assert_eq!(ErrorCode::UnknownExtension.code(), "E001");
        assert_eq!(ErrorCode::MissingBanner.code(), "E100");
        assert_eq!(ErrorCode::WrongImageSize.code(), "E200");
        assert_eq!(ErrorCode::ReadFailed.code(), "E300");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ErrorCode::UnknownExtension.kind(),
            ErrorKind::UnrecognizedFormat
        );
        assert_eq!(
            ErrorCode::InvalidVersionNumber.kind(),
            ErrorKind::MalformedHeader
        );
        assert_eq!(
            ErrorCode::CorruptCode.kind(),
            ErrorKind::TruncatedOrCorruptData
        );
        assert_eq!(ErrorCode::WriteFailed.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_cart_error() {
        let error = CartError::new(ErrorCode::MissingBanner, "missing banner")
            .with_span(0..5)
            .with_hint("the first line must start with 'pico-8 cartridge'");

        assert_eq!(error.code_str(), "E100");
        assert_eq!(error.span, Some(Span::new(0, 5)));
        assert!(error.hint.is_some());
        assert_eq!(error.to_string(), "[E100] missing banner");
    }

    #[test]
    fn test_format_error_without_span() {
        let error = CartError::new(ErrorCode::WrongImageSize, "expected 160x205")
            .with_hint("re-export the cartridge");
        let text = format_error(&error, "", Some("cart.png"));
        assert_eq!(
            text,
            "error[E200]: expected 160x205\n  = hint: re-export the cartridge\n"
        );
    }

    #[test]
    fn test_format_error_with_span() {
        let source = "hello\nversion 8\n";
        let error = CartError::new(ErrorCode::MissingBanner, "missing banner").with_span(0..5);
        let text = format_error(&error, source, Some("cart.p8"));
        assert!(text.contains("E100"));
        assert!(text.contains("cart.p8"));
        assert!(text.contains("hello"));
    }

    #[test]
    fn test_char_offset() {
        let source = "\u{feff}ab♥c";
        assert_eq!(char_offset(source, 0), 0);
        assert_eq!(char_offset(source, 3), 1);
        assert_eq!(char_offset(source, 5), 3);
        assert_eq!(char_offset(source, 6), 3);
        assert_eq!(char_offset(source, 8), 4);
        assert_eq!(char_offset(source, 100), 5);
    }

    #[test]
    fn test_format_error_after_byte_order_mark() {
        let source = "\u{feff}xyz not a cart\nversion 8\n";
        let error = crate::formats::p8::parse(source.as_bytes()).unwrap_err();
        let text = format_error(&error, source, Some("cart.p8"));
        assert!(text.contains("xyz not a cart"));
        assert!(!text.contains("version 8"));
    }

    #[test]
    fn test_format_error_after_multibyte_banner() {
        let source = "pico-8 cartridge // ♥♥♥♥\nversion ?\n";
        let error = crate::formats::p8::parse(source.as_bytes()).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidVersionNumber);
        let text = format_error(&error, source, Some("cart.p8"));
        assert!(text.contains("version ?"));
        assert!(text.contains("cart.p8:2:"));
    }
}
