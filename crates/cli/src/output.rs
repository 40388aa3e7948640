use std::io::{self, Write};

use chrono::NaiveDate;
use liftlog_domain as domain;
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq)]
pub struct Overview {
    pub exercises: Vec<String>,
    pub total_sessions: usize,
    pub training_days: usize,
    pub total_sets: usize,
    pub dropped_rows: usize,
}

impl From<domain::ExerciseOverview> for Overview {
    fn from(value: domain::ExerciseOverview) -> Self {
        Self {
            exercises: value.exercises.iter().map(ToString::to_string).collect(),
            total_sessions: value.total_sessions,
            training_days: value.training_days,
            total_sets: value.total_sets,
            dropped_rows: value.dropped_rows,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Point {
    pub date: NaiveDate,
    pub value: f32,
}

impl From<&domain::ProgressPoint> for Point {
    fn from(value: &domain::ProgressPoint) -> Self {
        Self {
            date: value.date,
            value: value.value,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Progress {
    pub label: String,
    pub exercise: String,
    pub mode: String,
    pub points: Vec<Point>,
    pub running_best: Vec<Point>,
}

impl From<domain::ProgressSeries> for Progress {
    fn from(value: domain::ProgressSeries) -> Self {
        Self {
            running_best: value.running_best().iter().map(Point::from).collect(),
            points: value.points.iter().map(Point::from).collect(),
            label: value.label,
            exercise: value.exercise.to_string(),
            mode: value.mode.to_string(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Record {
    pub value: f32,
    pub weight: f32,
    pub reps: u32,
    pub date: NaiveDate,
}

impl From<domain::PersonalRecord> for Record {
    fn from(value: domain::PersonalRecord) -> Self {
        Self {
            value: value.value,
            weight: value.weight.into(),
            reps: value.reps.into(),
            date: value.date,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Records {
    pub exercise: String,
    pub one_rep_max: Option<Record>,
    pub heaviest: Option<Record>,
    pub volume: Option<Record>,
}

impl From<domain::PersonalRecords> for Records {
    fn from(value: domain::PersonalRecords) -> Self {
        Self {
            exercise: value.exercise.to_string(),
            one_rep_max: value.one_rep_max.map(Record::from),
            heaviest: value.heaviest.map(Record::from),
            volume: value.volume.map(Record::from),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Week {
    pub week: String,
    pub week_start: NaiveDate,
    pub distinct_training_days: u32,
    pub sets: u32,
}

impl From<&domain::WeeklyBucket> for Week {
    fn from(value: &domain::WeeklyBucket) -> Self {
        let iso_week = value.iso_week();
        Self {
            week: format!("{}-W{:02}", iso_week.year(), iso_week.week()),
            week_start: value.week_start,
            distinct_training_days: value.distinct_training_days,
            sets: value.sets,
        }
    }
}

pub fn write(mut writer: impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)
}
