use std::collections::BTreeMap;

use chrono::{Datelike, Days, IsoWeek, NaiveDate};

use crate::ExerciseSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

/// Dates of the first and the last training day.
#[must_use]
pub fn training_interval(sets: &[ExerciseSet]) -> Option<Interval> {
    let first = sets.iter().map(|set| set.record.date).min()?;
    let last = sets.iter().map(|set| set.record.date).max()?;
    Some((first..=last).into())
}

/// Training frequency of one ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyBucket {
    /// Monday of the week.
    pub week_start: NaiveDate,
    pub distinct_training_days: u32,
    pub sets: u32,
}

impl WeeklyBucket {
    #[must_use]
    pub fn iso_week(&self) -> IsoWeek {
        self.week_start.iso_week()
    }
}

#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(
        date.weekday().num_days_from_monday(),
    )))
    .unwrap_or(date)
}

/// Count the distinct training days of every ISO week from the first to the
/// last training day.
///
/// Weeks without training are included with a count of zero. A day counts
/// once, regardless of the number of exercises trained on it.
#[must_use]
pub fn weekly_summary(sets: &[ExerciseSet]) -> Vec<WeeklyBucket> {
    let Some(interval) = training_interval(sets) else {
        return vec![];
    };

    let mut sets_per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();

    for set in sets {
        *sets_per_day.entry(set.record.date).or_default() += 1;
    }

    let mut buckets = week_start(interval.first)
        .iter_weeks()
        .take_while(|week| *week <= interval.last)
        .map(|week| {
            (
                week,
                WeeklyBucket {
                    week_start: week,
                    distinct_training_days: 0,
                    sets: 0,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    for (date, sets) in sets_per_day {
        if let Some(bucket) = buckets.get_mut(&week_start(date)) {
            bucket.distinct_training_days += 1;
            bucket.sets += sets;
        }
    }

    buckets.into_values().collect()
}
