use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorizeError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid utf-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("label not in label set: {0:?}")]
    UnknownLabel(String),

    #[error("duplicate label: {0:?}")]
    DuplicateLabel(String),

    #[error("invalid vocabulary: {0}")]
    InvalidVocab(String),

    #[cfg(feature = "bincode")]
    #[error("vocabulary deserialization failed: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, VectorizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = VectorizeError::UnknownLabel("catC".into());
        assert_eq!(e.to_string(), "label not in label set: \"catC\"");

        let e = VectorizeError::DuplicateLabel("spam".into());
        assert_eq!(e.to_string(), "duplicate label: \"spam\"");

        let e = VectorizeError::InvalidVocab("index 7 out of range".into());
        assert_eq!(e.to_string(), "invalid vocabulary: index 7 out of range");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: VectorizeError = io.into();
        assert!(matches!(e, VectorizeError::Io(_)));
    }

    #[test]
    fn test_from_utf8_error() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let e: VectorizeError = bad.into();
        assert!(matches!(e, VectorizeError::Decode(_)));
    }
}
