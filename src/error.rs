use thiserror::Error;

/// Errors produced by the contour engines.
///
/// The dimension variants are argument errors reported before any
/// computation starts. `MergeConflict` and `Internal` indicate corrupted
/// stitching state; they point at a bug in a case table, not at user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("number of x coordinates ({got}) must match number of columns ({expected})")]
    XLenMismatch { got: usize, expected: usize },

    #[error("number of y coordinates ({got}) must match number of rows ({expected})")]
    YLenMismatch { got: usize, expected: usize },

    #[error("length of z ({got}) must equal rows * columns ({expected})")]
    ZLenMismatch { got: usize, expected: usize },

    #[error("band level arrays must have equal length ({lo} lower vs {hi} upper)")]
    LevelLenMismatch { lo: usize, hi: usize },

    #[error("unmergeable vertex configuration (score {score})")]
    MergeConflict { score: u8 },

    #[error("contour state corrupted: {0}")]
    Internal(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::XLenMismatch { got: 3, expected: 4 };
        assert_eq!(
            err.to_string(),
            "number of x coordinates (3) must match number of columns (4)"
        );

        let err = Error::MergeConflict { score: 7 };
        assert!(err.to_string().contains("score 7"));
    }
}
