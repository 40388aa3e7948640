use std::cmp::Ordering;

use chrono::NaiveDate;
use strum::{EnumIter, EnumString};

use crate::{AnalysisError, Dataset, Name, Reps, SetRecord, Weight, session};

/// Quantity used to represent a session in a progress series.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    /// Heaviest weight lifted.
    #[default]
    #[strum(to_string = "best-set", serialize = "weight")]
    BestSet,
    /// Highest estimated one-rep max.
    #[strum(to_string = "1rm", serialize = "one-rep-max")]
    OneRepMax,
    /// Highest weight times reps of a single set.
    #[strum(to_string = "volume")]
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSeries {
    /// The exercise name as requested.
    pub label: String,
    /// Display name of the resolved exercise.
    pub exercise: Name,
    pub mode: Mode,
    /// One point per session, strictly ascending by date.
    pub points: Vec<ProgressPoint>,
}

impl ProgressSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All-time best up to each point. Never decreases.
    #[must_use]
    pub fn running_best(&self) -> Vec<ProgressPoint> {
        self.points
            .iter()
            .scan(f32::NEG_INFINITY, |best, point| {
                *best = best.max(point.value);
                Some(ProgressPoint {
                    date: point.date,
                    value: *best,
                })
            })
            .collect()
    }
}

/// Build the progress series of an exercise.
///
/// The exercise name is resolved with the same similarity matching used for
/// importing. An exercise without any valid session results in an empty series.
pub fn build_series(
    dataset: &Dataset,
    exercise: &str,
    mode: Mode,
) -> Result<ProgressSeries, AnalysisError> {
    let key = dataset.resolve(exercise)?;
    let name = dataset
        .exercises()
        .name(key)
        .cloned()
        .ok_or_else(|| AnalysisError::ExerciseNotFound(exercise.to_string()))?;

    let points = session::exercise_sessions(dataset.sets(), key)
        .iter()
        .filter_map(|session| {
            session.value(mode).map(|value| ProgressPoint {
                date: session.date,
                value,
            })
        })
        .collect();

    Ok(ProgressSeries {
        label: exercise.to_string(),
        exercise: name,
        mode,
        points,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRecord {
    pub value: f32,
    pub weight: Weight,
    pub reps: Reps,
    pub date: NaiveDate,
}

impl PersonalRecord {
    fn new(set: &SetRecord, value: f32) -> Self {
        Self {
            value,
            weight: set.weight,
            reps: set.reps,
            date: set.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRecords {
    pub exercise: Name,
    pub one_rep_max: Option<PersonalRecord>,
    /// Heaviest weight. Of equally heavy sets the one with more reps wins.
    pub heaviest: Option<PersonalRecord>,
    pub volume: Option<PersonalRecord>,
}

/// All-time records of an exercise. Ties go to the set performed first.
pub fn personal_records(
    dataset: &Dataset,
    exercise: &str,
) -> Result<PersonalRecords, AnalysisError> {
    let key = dataset.resolve(exercise)?;
    let name = dataset
        .exercises()
        .name(key)
        .cloned()
        .ok_or_else(|| AnalysisError::ExerciseNotFound(exercise.to_string()))?;

    let sets = dataset
        .sets()
        .iter()
        .filter(|set| set.exercise == key && set.record.is_valid())
        .map(|set| &set.record)
        .collect::<Vec<_>>();

    let one_rep_max = max_by_value(&sets, SetRecord::estimated_one_rep_max);
    let volume = max_by_value(&sets, SetRecord::volume);
    let heaviest = sets
        .iter()
        .copied()
        .reduce(|best, set| {
            match (set.weight, set.reps).partial_cmp(&(best.weight, best.reps)) {
                Some(Ordering::Greater) => set,
                _ => best,
            }
        })
        .map(|set| PersonalRecord::new(set, f32::from(set.weight)));

    Ok(PersonalRecords {
        exercise: name,
        one_rep_max,
        heaviest,
        volume,
    })
}

fn max_by_value(
    sets: &[&SetRecord],
    metric: impl Fn(&SetRecord) -> f32,
) -> Option<PersonalRecord> {
    sets.iter()
        .map(|set| (*set, metric(*set)))
        .reduce(|best, current| {
            if current.1 > best.1 {
                current
            } else {
                best
            }
        })
        .map(|(set, value)| PersonalRecord::new(set, value))
}
