//! Error types for the geocluster library.

use thiserror::Error;

/// Result type alias for clustering and distance operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors that can occur while measuring distances or clustering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient entities for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A distance measure needs a parameter or attribute that was not supplied.
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    /// A k-means partition ended up with no members.
    #[error("empty partition for centroid slot {slot}")]
    EmptyPartition { slot: usize },

    /// A cluster builder returned no cluster for a non-empty group.
    #[error("cluster builder rejected a group of {size} members")]
    BuilderRejected { size: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ClusterError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ClusterError::InsufficientData { needed: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 10, got 5"
        );

        let err = ClusterError::InvalidParameter("eps must be non-negative".to_string());
        assert_eq!(err.to_string(), "invalid parameter: eps must be non-negative");

        let err = ClusterError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");

        let err = ClusterError::ParameterNotFound("number attribute".to_string());
        assert_eq!(err.to_string(), "parameter not found: number attribute");

        let err = ClusterError::EmptyPartition { slot: 2 };
        assert_eq!(err.to_string(), "empty partition for centroid slot 2");

        let err = ClusterError::BuilderRejected { size: 4 };
        assert_eq!(err.to_string(), "cluster builder rejected a group of 4 members");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ClusterError::EmptyPartition { slot: 0 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, ClusterError::EmptyData);
    }
}
