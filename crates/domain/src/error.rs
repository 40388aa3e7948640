pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("missing column \"{0}\"")]
    MissingColumn(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] BoxError),
}

/// Conditions of the analysis itself, as opposed to failures of the
/// collaborator that supplies the rows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no valid records")]
    EmptyDataset,
    #[error("no exercise matching \"{0}\"")]
    ExerciseNotFound(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl From<ReadError> for ServiceError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => ServiceError::Storage(storage),
            ReadError::Other(other) => ServiceError::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_from_read_error() {
        assert!(matches!(
            ServiceError::from(ReadError::Storage(StorageError::MissingColumn("Reps".into()))),
            ServiceError::Storage(StorageError::MissingColumn(column)) if column == "Reps"
        ));
        assert!(matches!(
            ServiceError::from(ReadError::Other("foo".into())),
            ServiceError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_service_error_from_analysis_error() {
        assert!(matches!(
            ServiceError::from(AnalysisError::EmptyDataset),
            ServiceError::Analysis(AnalysisError::EmptyDataset)
        ));
    }

    #[test]
    fn test_analysis_error_display() {
        assert_eq!(
            AnalysisError::ExerciseNotFound("Snatch".into()).to_string(),
            "no exercise matching \"Snatch\""
        );
    }
}
