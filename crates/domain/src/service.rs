use log::{debug, error};

use crate::{
    AnalysisError, DEFAULT_SIMILARITY_THRESHOLD, Dataset, ExerciseOverview, Mode,
    PersonalRecords, ProgressSeries, ServiceError, SetRecordRepository, WeeklyBucket,
    build_series, personal_records, weekly_summary,
};

pub trait AnalysisService {
    fn get_overview(&self) -> Result<ExerciseOverview, ServiceError>;
    fn get_progress(&self, exercise: &str, mode: Mode) -> Result<ProgressSeries, ServiceError>;
    fn get_personal_records(&self, exercise: &str) -> Result<PersonalRecords, ServiceError>;
    fn get_weekly_summary(&self) -> Result<Vec<WeeklyBucket>, ServiceError>;
}

pub struct Service<R> {
    repository: R,
    threshold: f64,
}

impl<R: SetRecordRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        Self::with_threshold(repository, DEFAULT_SIMILARITY_THRESHOLD)
    }

    pub fn with_threshold(repository: R, threshold: f64) -> Self {
        Self {
            repository,
            threshold,
        }
    }

    fn dataset(&self) -> Result<Dataset, ServiceError> {
        let rows = self.repository.read_rows()?;
        Ok(Dataset::import(&rows, self.threshold)?)
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                ServiceError::Analysis(
                    AnalysisError::EmptyDataset | AnalysisError::ExerciseNotFound(_),
                ) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SetRecordRepository> AnalysisService for Service<R> {
    fn get_overview(&self) -> Result<ExerciseOverview, ServiceError> {
        log_on_error!(
            self.dataset().map(|dataset| dataset.overview()),
            "get",
            "overview"
        )
    }

    fn get_progress(&self, exercise: &str, mode: Mode) -> Result<ProgressSeries, ServiceError> {
        log_on_error!(
            self.dataset().and_then(|dataset| {
                build_series(&dataset, exercise, mode).map_err(ServiceError::from)
            }),
            "get",
            "progress"
        )
    }

    fn get_personal_records(&self, exercise: &str) -> Result<PersonalRecords, ServiceError> {
        log_on_error!(
            self.dataset().and_then(|dataset| {
                personal_records(&dataset, exercise).map_err(ServiceError::from)
            }),
            "get",
            "personal records"
        )
    }

    fn get_weekly_summary(&self) -> Result<Vec<WeeklyBucket>, ServiceError> {
        log_on_error!(
            self.dataset().map(|dataset| weekly_summary(dataset.sets())),
            "get",
            "weekly summary"
        )
    }
}
