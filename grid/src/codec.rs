//! FILENAME: grid/src/codec.rs
//! PURPOSE: Pluggable conversion between cell text and typed cell values.
//! CONTEXT: Every text source (literal lines, CSV) runs each cell through
//! `ValueCodec::decode`, and every text sink runs each cell through
//! `ValueCodec::encode`. Both receive the cell's headings so a codec can treat
//! particular rows or columns differently.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::error::GridError;

/// Converts cell text to `V` and back.
pub trait ValueCodec<V> {
    fn decode(&self, row: &str, col: &str, text: String) -> Result<V, GridError>;

    fn encode(&self, row: &str, col: &str, value: &V) -> Result<String, GridError>;
}

/// Identity codec: cells stay as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl ValueCodec<String> for TextCodec {
    fn decode(&self, _row: &str, _col: &str, text: String) -> Result<String, GridError> {
        Ok(text)
    }

    fn encode(&self, _row: &str, _col: &str, value: &String) -> Result<String, GridError> {
        Ok(value.clone())
    }
}

/// Parses cells with `FromStr` and writes them with `Display`.
///
/// Surrounding whitespace is ignored when decoding.
pub struct ParseCodec<T>(PhantomData<fn() -> T>);

impl<T> ParseCodec<T> {
    pub fn new() -> Self {
        ParseCodec(PhantomData)
    }
}

impl<T> Default for ParseCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ParseCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ParseCodec<T> {}

impl<T> fmt::Debug for ParseCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> ValueCodec<T> for ParseCodec<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    fn decode(&self, row: &str, col: &str, text: String) -> Result<T, GridError> {
        text.trim().parse().map_err(|e: T::Err| GridError::Decode {
            row: row.to_string(),
            col: col.to_string(),
            message: format!("{:?}: {}", text, e),
        })
    }

    fn encode(&self, _row: &str, _col: &str, value: &T) -> Result<String, GridError> {
        Ok(value.to_string())
    }
}

/// Wraps another codec so that empty text means "no value".
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalCodec<C>(pub C);

impl<V, C: ValueCodec<V>> ValueCodec<Option<V>> for OptionalCodec<C> {
    fn decode(&self, row: &str, col: &str, text: String) -> Result<Option<V>, GridError> {
        if text.is_empty() {
            return Ok(None);
        }
        self.0.decode(row, col, text).map(Some)
    }

    fn encode(&self, row: &str, col: &str, value: &Option<V>) -> Result<String, GridError> {
        match value {
            Some(value) => self.0.encode(row, col, value),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_codec_is_identity() {
        let codec = TextCodec;
        let value = codec.decode("r", "c", " spaced ".to_string()).unwrap();
        assert_eq!(value, " spaced ");
        assert_eq!(codec.encode("r", "c", &value).unwrap(), " spaced ");
    }

    #[test]
    fn test_parse_codec_numbers() {
        let codec = ParseCodec::<i64>::new();
        assert_eq!(codec.decode("r", "c", " 42 ".to_string()).unwrap(), 42);
        assert_eq!(codec.encode("r", "c", &-7).unwrap(), "-7");
    }

    #[test]
    fn test_parse_codec_reports_coordinates() {
        let codec = ParseCodec::<f64>::new();
        let err = codec.decode("Row 1", "Col 2", "abc".to_string()).unwrap_err();
        match err {
            GridError::Decode { row, col, message } => {
                assert_eq!(row, "Row 1");
                assert_eq!(col, "Col 2");
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_optional_codec() {
        let codec = OptionalCodec(ParseCodec::<u32>::new());
        assert_eq!(codec.decode("r", "c", String::new()).unwrap(), None);
        assert_eq!(codec.decode("r", "c", "5".to_string()).unwrap(), Some(5));
        assert_eq!(codec.encode("r", "c", &None).unwrap(), "");
        assert_eq!(codec.encode("r", "c", &Some(5)).unwrap(), "5");
    }
}
