//! Error types for global mod data conversions.

use thiserror::Error;

/// Errors that can occur while reading or writing global mod data.
#[derive(Debug, Error)]
pub enum GmdError {
    /// World version outside the supported set.
    #[error("unsupported world version {0}")]
    UnsupportedVersion(u32),

    /// Boolean byte that is neither 0x00 nor 0x01.
    #[error("bool value is neither true nor false: {0:#04x}")]
    MalformedBoolean(u8),

    /// Unknown key type tag in a table.
    #[error("invalid key type {tag:#04x} in table at offset {offset:#x}")]
    InvalidKeyType { tag: u8, offset: usize },

    /// Unknown value type tag in a table.
    #[error("invalid value type {tag:#04x} (key {key})")]
    InvalidValueType { tag: u8, key: String },

    /// Key or value outside the string/double/bool/table domain.
    #[error("cannot convert {kind} value (key {key})")]
    UnsupportedType { kind: &'static str, key: String },

    /// String whose byte length does not fit the u16 length prefix.
    #[error("string of {len} bytes exceeds the u16 length prefix")]
    StringTooLong { len: usize },

    /// Input ended mid-field.
    #[error("unexpected end of data at offset {offset:#x}")]
    UnexpectedEof { offset: usize },

    /// Invalid UTF-8 in a length-prefixed string.
    #[error("invalid utf-8 in string: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON document without the reserved version member.
    #[error("JSON document has no \"__WORLD_VERSION\" member")]
    MissingVersionKey,

    /// Reserved version member that is not an unsigned 32-bit integer.
    #[error("\"__WORLD_VERSION\" member is not an unsigned 32-bit integer")]
    InvalidVersionValue,

    /// JSON input whose top level is not an object.
    #[error("JSON document root must be an object")]
    RootNotObject,

    /// `_number: ` key whose remainder does not parse as a double.
    #[error("cannot parse number key {key:?}")]
    InvalidNumberKey { key: String },

    /// JSON parse or serialize failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for global mod data operations.
pub type Result<T> = std::result::Result<T, GmdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GmdError::UnsupportedVersion(42);
        assert_eq!(format!("{err}"), "unsupported world version 42");

        let err = GmdError::MalformedBoolean(0x02);
        assert_eq!(
            format!("{err}"),
            "bool value is neither true nor false: 0x02"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: GmdError = io_err.into();
        assert!(matches!(err, GmdError::Io(_)));
    }
}
