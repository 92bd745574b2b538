use thiserror::Error;

/// Fatal input/parameter problems. Insufficient pivot counts are NOT errors —
/// they come back as `None`/absent results that callers must branch on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("mismatched series lengths: high {high}, low {low}, close {close}")]
    MismatchedLengths {
        high: usize,
        low: usize,
        close: usize,
    },

    #[error("non-finite {field} value at bar {position}")]
    NonFiniteValue {
        field: &'static str,
        position: usize,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("evaluation bar {evaluation_bar} precedes last pivot at {last_pivot}")]
    EvaluationBarBeforePivot {
        evaluation_bar: usize,
        last_pivot: usize,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
