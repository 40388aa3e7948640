#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod progress;
pub mod session;
pub mod statistics;

mod dataset;
mod error;
mod exercise;
mod name;
mod service;
mod training;

pub use dataset::{Dataset, ExerciseOverview, ExerciseSet, list_exercises};
pub use error::{AnalysisError, BoxError, ReadError, ServiceError, StorageError};
pub use exercise::{
    DEFAULT_SIMILARITY_THRESHOLD, Exercise, ExerciseKey, ExerciseRegistry, normalize, similarity,
};
pub use name::{Name, NameError};
pub use progress::{
    Mode, PersonalRecord, PersonalRecords, ProgressPoint, ProgressSeries, build_series,
    personal_records,
};
pub use service::{AnalysisService, Service};
pub use session::Session;
pub use statistics::{Interval, WeeklyBucket, training_interval, week_start, weekly_summary};
pub use training::{
    RawRow, RecordError, Reps, RepsError, SetRecord, SetRecordRepository, Weight, WeightError,
    parse_date,
};
