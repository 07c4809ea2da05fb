//! FILENAME: grid-csv/src/dialect.rs
//! PURPOSE: The CSV syntax settings used to read and write grids.
//! CONTEXT: A `Dialect` is plain, serializable configuration. It is turned
//! into `csv::ReaderBuilder` / `csv::WriterBuilder` settings at the point of
//! use. Character settings serialize as one-character strings.

use serde::{Deserialize, Serialize};

/// When fields are wrapped in quote characters on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Only fields containing the delimiter, quote or a line break.
    #[default]
    Minimal,
    Always,
    /// Every field that does not parse as a number.
    NonNumeric,
    Never,
}

impl From<QuoteStyle> for csv::QuoteStyle {
    fn from(style: QuoteStyle) -> Self {
        match style {
            QuoteStyle::Minimal => csv::QuoteStyle::Necessary,
            QuoteStyle::Always => csv::QuoteStyle::Always,
            QuoteStyle::NonNumeric => csv::QuoteStyle::NonNumeric,
            QuoteStyle::Never => csv::QuoteStyle::Never,
        }
    }
}

/// Record terminator written after each line.
///
/// On read, `Lf` and `CrLf` both accept `\n`, `\r\n` and `\r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    #[default]
    Lf,
    CrLf,
    Byte(#[serde(with = "ascii_byte")] u8),
}

impl LineTerminator {
    fn for_reading(self) -> csv::Terminator {
        match self {
            LineTerminator::Lf | LineTerminator::CrLf => csv::Terminator::CRLF,
            LineTerminator::Byte(b) => csv::Terminator::Any(b),
        }
    }

    fn for_writing(self) -> csv::Terminator {
        match self {
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
            LineTerminator::CrLf => csv::Terminator::CRLF,
            LineTerminator::Byte(b) => csv::Terminator::Any(b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    #[serde(with = "ascii_byte")]
    pub delimiter: u8,
    #[serde(with = "ascii_byte")]
    pub quote: u8,
    pub terminator: LineTerminator,
    pub quoting: QuoteStyle,
    /// Escape quotes inside quoted fields by doubling them.
    pub double_quote: bool,
    /// Escape byte used instead of doubling when `double_quote` is off.
    #[serde(with = "ascii_byte_opt")]
    pub escape: Option<u8>,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            delimiter: b',',
            quote: b'"',
            terminator: LineTerminator::Lf,
            quoting: QuoteStyle::Minimal,
            double_quote: true,
            escape: None,
        }
    }
}

impl Dialect {
    /// Comma-separated, `\r\n` terminated.
    pub fn excel() -> Self {
        Dialect {
            terminator: LineTerminator::CrLf,
            ..Dialect::default()
        }
    }

    /// Tab-separated.
    pub fn tsv() -> Self {
        Dialect {
            delimiter: b'\t',
            ..Dialect::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn with_quoting(mut self, quoting: QuoteStyle) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_escape(mut self, escape: u8) -> Self {
        self.escape = Some(escape);
        self.double_quote = false;
        self
    }

    /// Every record is read as data and records may differ in length; the
    /// grid reader checks the shape itself.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(self.double_quote)
            .escape(self.escape)
            .terminator(self.terminator.for_reading());
        builder
    }

    pub fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quote_style(self.quoting.into())
            .double_quote(self.double_quote)
            .terminator(self.terminator.for_writing());
        if let Some(escape) = self.escape {
            builder.escape(escape);
        }
        builder
    }
}

mod ascii_byte {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(byte: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(*byte as char)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let c = char::deserialize(deserializer)?;
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(D::Error::custom(format!("{:?} is not an ASCII character", c)))
        }
    }
}

mod ascii_byte_opt {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(byte: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        match byte {
            Some(byte) => serializer.serialize_some(&(*byte as char)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
        match Option::<char>::deserialize(deserializer)? {
            Some(c) if c.is_ascii() => Ok(Some(c as u8)),
            Some(c) => Err(D::Error::custom(format!("{:?} is not an ASCII character", c))),
            None => Ok(None),
        }
    }
}
