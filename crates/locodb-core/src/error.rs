// crates/locodb-core/src/error.rs
use thiserror::Error;

/// Every failure the gazetteer can report.
///
/// The first four variants are the domain errors callers are expected to
/// match on. The remaining ones wrap the I/O and decoding layers used by the
/// [`loader`](crate::loader).
#[derive(Debug, Error)]
pub enum LocoError {
    /// Unknown key, country code or subdivision code.
    #[error("not found: {0}")]
    NotFound(String),

    /// Out-of-range search parameters or unusable query text.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `score`/`offset` requested from a location that did not come out of a query.
    #[error("field `{0}` is only present on query results")]
    FieldNotPresent(&'static str),

    /// Loader input that cannot be turned into a consistent hierarchy.
    #[error("build error: {0}")]
    Build(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LocoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_not_present_names_the_field() {
        let err = LocoError::FieldNotPresent("score");
        assert_eq!(
            err.to_string(),
            "field `score` is only present on query results"
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(LocoError::Io(_))));
    }
}
