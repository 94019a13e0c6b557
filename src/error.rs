// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// An item could not be turned into a typed gallery item and was
    /// dropped from the list.
    Classification(String),

    /// A structured field (JSON-encoded sources, tracks, or attributes)
    /// failed to parse.
    Parse(String),

    /// The media for an item failed to load or decode. Surfaced to the
    /// caller through the `on_error` hook, never as a panic.
    MediaLoad(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Classification(e) => write!(f, "Classification Error: {}", e),
            Error::Parse(e) => write!(f, "Parse Error: {}", e),
            Error::MediaLoad(e) => write!(f, "Media Load Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_classification_error() {
        let err = Error::Classification("no usable content".to_string());
        assert_eq!(
            format!("{}", err),
            "Classification Error: no usable content"
        );
    }

    #[test]
    fn from_serde_json_error_produces_parse_variant() {
        let json_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn media_load_error_formats_properly() {
        let err = Error::MediaLoad("decode failed".into());
        assert_eq!(format!("{}", err), "Media Load Error: decode failed");
    }
}
