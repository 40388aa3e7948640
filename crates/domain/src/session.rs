use std::{cmp::Ordering, collections::BTreeMap};

use chrono::NaiveDate;

use crate::{ExerciseKey, ExerciseSet, Mode, SetRecord};

/// All sets of one exercise performed on one calendar date, in the order performed.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub date: NaiveDate,
    pub exercise: ExerciseKey,
    pub sets: Vec<SetRecord>,
}

impl Session {
    /// Heaviest valid set. Of equally heavy sets the one with fewer reps wins,
    /// then the one performed first.
    #[must_use]
    pub fn heaviest_set(&self) -> Option<&SetRecord> {
        self.valid_sets()
            .reduce(|best, set| if outranks(set, best) { set } else { best })
    }

    #[must_use]
    pub fn best_set(&self) -> Option<f32> {
        self.heaviest_set().map(|set| f32::from(set.weight))
    }

    /// Set with the highest estimated one-rep max, together with that estimate.
    ///
    /// Sets with equal estimates are ranked like in `heaviest_set`.
    #[must_use]
    pub fn one_rep_max_set(&self) -> Option<(&SetRecord, f32)> {
        self.best_by(SetRecord::estimated_one_rep_max)
    }

    #[must_use]
    pub fn estimated_one_rep_max(&self) -> Option<f32> {
        self.one_rep_max_set().map(|(_, value)| value)
    }

    #[must_use]
    pub fn volume_set(&self) -> Option<(&SetRecord, f32)> {
        self.best_by(SetRecord::volume)
    }

    #[must_use]
    pub fn best_volume(&self) -> Option<f32> {
        self.volume_set().map(|(_, value)| value)
    }

    /// The scalar representing this session in a progress series.
    ///
    /// `None` if the session contains no valid set.
    #[must_use]
    pub fn value(&self, mode: Mode) -> Option<f32> {
        match mode {
            Mode::BestSet => self.best_set(),
            Mode::OneRepMax => self.estimated_one_rep_max(),
            Mode::Volume => self.best_volume(),
        }
    }

    fn valid_sets(&self) -> impl Iterator<Item = &SetRecord> {
        self.sets.iter().filter(|set| set.is_valid())
    }

    fn best_by(&self, metric: impl Fn(&SetRecord) -> f32) -> Option<(&SetRecord, f32)> {
        self.valid_sets()
            .map(|set| (set, metric(set)))
            .reduce(|best, current| match current.1.partial_cmp(&best.1) {
                Some(Ordering::Greater) => current,
                Some(Ordering::Equal) if outranks(current.0, best.0) => current,
                _ => best,
            })
    }
}

/// Whether `candidate` represents a harder effort than `current`.
fn outranks(candidate: &SetRecord, current: &SetRecord) -> bool {
    match candidate.weight.partial_cmp(&current.weight) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => candidate.reps < current.reps,
        _ => false,
    }
}

/// Group sets by calendar date and exercise, keeping the input order within a group.
#[must_use]
pub fn group(sets: &[ExerciseSet]) -> BTreeMap<(NaiveDate, ExerciseKey), Vec<SetRecord>> {
    let mut groups: BTreeMap<(NaiveDate, ExerciseKey), Vec<SetRecord>> = BTreeMap::new();

    for set in sets {
        groups
            .entry((set.record.date, set.exercise))
            .or_default()
            .push(set.record.clone());
    }

    groups
}

/// Sessions ordered by date, then by exercise key.
#[must_use]
pub fn sessions(sets: &[ExerciseSet]) -> Vec<Session> {
    group(sets)
        .into_iter()
        .map(|((date, exercise), sets)| Session {
            date,
            exercise,
            sets,
        })
        .collect()
}

/// Sessions of a single exercise, strictly ascending by date.
#[must_use]
pub fn exercise_sessions(sets: &[ExerciseSet], exercise: ExerciseKey) -> Vec<Session> {
    let matching = sets
        .iter()
        .filter(|set| set.exercise == exercise)
        .cloned()
        .collect::<Vec<_>>();
    sessions(&matching)
}
