use std::collections::BTreeSet;

use log::{debug, info};

use crate::{
    AnalysisError, ExerciseKey, ExerciseRegistry, Name, RawRow, SetRecord, session,
};

/// A validated set record attached to its canonical exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub exercise: ExerciseKey,
    pub record: SetRecord,
}

/// A validated workout log.
///
/// Created once per import, immutable afterwards. Contains at least one set.
#[derive(Debug, Clone)]
pub struct Dataset {
    exercises: ExerciseRegistry,
    sets: Vec<ExerciseSet>,
    dropped_rows: usize,
}

impl Dataset {
    /// Validate rows and assign every valid record to its canonical exercise.
    ///
    /// Invalid rows are dropped.
    pub fn import(rows: &[RawRow], threshold: f64) -> Result<Self, AnalysisError> {
        let mut exercises = ExerciseRegistry::new(threshold);
        let mut sets = Vec::with_capacity(rows.len());
        let mut dropped_rows = 0;

        for (index, row) in rows.iter().enumerate() {
            match SetRecord::try_from(row) {
                Ok(record) => sets.push(ExerciseSet {
                    exercise: exercises.canonicalize_name(&record.exercise),
                    record,
                }),
                Err(err) => {
                    dropped_rows += 1;
                    debug!("dropping row {}: {err}", index + 1);
                }
            }
        }

        if sets.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }

        if dropped_rows > 0 {
            info!("dropped {dropped_rows} of {} rows", rows.len());
        }

        debug!(
            "imported {} sets of {} exercises",
            sets.len(),
            exercises.len()
        );

        Ok(Self {
            exercises,
            sets,
            dropped_rows,
        })
    }

    #[must_use]
    pub fn exercises(&self) -> &ExerciseRegistry {
        &self.exercises
    }

    #[must_use]
    pub fn sets(&self) -> &[ExerciseSet] {
        &self.sets
    }

    #[must_use]
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn resolve(&self, exercise: &str) -> Result<ExerciseKey, AnalysisError> {
        self.exercises
            .resolve(exercise)
            .ok_or_else(|| AnalysisError::ExerciseNotFound(exercise.to_string()))
    }

    #[must_use]
    pub fn overview(&self) -> ExerciseOverview {
        ExerciseOverview {
            exercises: list_exercises(&self.sets)
                .into_iter()
                .filter_map(|key| self.exercises.name(key).cloned())
                .collect(),
            total_sessions: session::group(&self.sets).len(),
            training_days: self
                .sets
                .iter()
                .map(|set| set.record.date)
                .collect::<BTreeSet<_>>()
                .len(),
            total_sets: self.sets.len(),
            dropped_rows: self.dropped_rows(),
        }
    }
}

/// Summary used to populate an exercise selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseOverview {
    /// Display names in order of first appearance.
    pub exercises: Vec<Name>,
    pub total_sessions: usize,
    pub training_days: usize,
    pub total_sets: usize,
    /// Rows excluded during import because of invalid fields.
    pub dropped_rows: usize,
}

/// Canonical exercises in order of first appearance, without duplicates.
#[must_use]
pub fn list_exercises(sets: &[ExerciseSet]) -> Vec<ExerciseKey> {
    let mut seen = BTreeSet::new();
    sets.iter()
        .map(|set| set.exercise)
        .filter(|key| seen.insert(*key))
        .collect()
}
