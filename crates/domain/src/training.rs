use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use derive_more::{Display, Into};

use crate::{Name, NameError, ReadError};

pub trait SetRecordRepository {
    fn read_rows(&self) -> Result<Vec<RawRow>, ReadError>;
}

/// A row of a workout log export, before validation.
///
/// Missing fields are represented by empty strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub exercise: String,
    pub weight: String,
    pub reps: String,
}

impl RawRow {
    pub fn new(
        date: impl Into<String>,
        exercise: impl Into<String>,
        weight: impl Into<String>,
        reps: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            exercise: exercise.into(),
            weight: weight.into(),
            reps: reps.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub date: NaiveDate,
    pub exercise: Name,
    pub weight: Weight,
    pub reps: Reps,
}

impl SetRecord {
    /// Sets without any reps do not count as performed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.reps.is_zero()
    }

    /// Epley estimate: `weight * (1 + reps / 30)`.
    #[must_use]
    pub fn estimated_one_rep_max(&self) -> f32 {
        f32::from(self.weight) * (1.0 + f32::from(self.reps) / 30.0)
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        f32::from(self.weight) * f32::from(self.reps)
    }
}

impl TryFrom<&RawRow> for SetRecord {
    type Error = RecordError;

    fn try_from(row: &RawRow) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&row.date)?,
            exercise: Name::new(&row.exercise)?,
            weight: Weight::try_from(row.weight.as_str())?,
            reps: Reps::try_from(row.reps.as_str())?,
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("invalid date \"{0}\"")]
    InvalidDate(String),
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error(transparent)]
    InvalidWeight(#[from] WeightError),
    #[error(transparent)]
    InvalidReps(#[from] RepsError),
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Years of four digits that can appear in a training log.
const YEARS: RangeInclusive<i32> = 1900..=9999;

/// Parse the calendar date of a log entry. A time of day is accepted and discarded.
///
/// Dates outside the years 1900 to 9999 are rejected.
pub fn parse_date(value: &str) -> Result<NaiveDate, RecordError> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|date_time| date_time.date())
            })
        })
        .filter(|date| YEARS.contains(&date.year()))
        .ok_or_else(|| RecordError::InvalidDate(value.to_string()))
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<Reps> for f32 {
    fn from(value: Reps) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let reps = value.0 as f32;
        reps
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if let Ok(parsed_value) = value.parse::<u32>() {
            return Reps::new(parsed_value);
        }
        // Spreadsheet exports tend to write integers as "5.0".
        match value.parse::<f64>() {
            Ok(parsed_value) if parsed_value.is_finite() && parsed_value.fract() == 0.0 => {
                if !(0.0..1000.0).contains(&parsed_value) {
                    return Err(RepsError::OutOfRange);
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Reps::new(parsed_value as u32)
            }
            _ => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..10000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Weight must be in the range 0 to 9999.9")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] input: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(input), expected);
    }

    #[rstest]
    #[case("0", Ok(Reps(0)))]
    #[case(" 8 ", Ok(Reps(8)))]
    #[case("5.0", Ok(Reps(5)))]
    #[case("999", Ok(Reps(999)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("-3", Err(RepsError::OutOfRange))]
    #[case("4.5", Err(RepsError::ParseError))]
    #[case("NaN", Err(RepsError::ParseError))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_from_str(#[case] input: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(input), expected);
    }

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(102.27, Ok(Weight(102.27)))]
    #[case(-0.1, Err(WeightError::OutOfRange))]
    #[case(10000.0, Err(WeightError::OutOfRange))]
    #[case(f32::NAN, Err(WeightError::OutOfRange))]
    fn test_weight_new(#[case] input: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(input), expected);
    }

    #[rstest]
    #[case("100", Ok(Weight(100.0)))]
    #[case("22.5", Ok(Weight(22.5)))]
    #[case("abc", Err(WeightError::ParseError))]
    #[case("", Err(WeightError::ParseError))]
    #[case("inf", Err(WeightError::OutOfRange))]
    fn test_weight_from_str(#[case] input: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(input), expected);
    }

    #[rstest]
    #[case("2024-01-01", Ok(date(2024, 1, 1)))]
    #[case(" 2024-01-08 ", Ok(date(2024, 1, 8)))]
    #[case("2021-03-01 18:03:21", Ok(date(2021, 3, 1)))]
    #[case("2021-03-01T07:15:00", Ok(date(2021, 3, 1)))]
    #[case("2021-03-01 07:15", Ok(date(2021, 3, 1)))]
    #[case("2021/03/01", Ok(date(2021, 3, 1)))]
    #[case("03/01/2021", Ok(date(2021, 3, 1)))]
    #[case("2021-02-30", Err(RecordError::InvalidDate("2021-02-30".to_string())))]
    #[case("yesterday", Err(RecordError::InvalidDate("yesterday".to_string())))]
    #[case("", Err(RecordError::InvalidDate(String::new())))]
    #[case("1900-01-01", Ok(date(1900, 1, 1)))]
    #[case("9999-12-31", Ok(date(9999, 12, 31)))]
    #[case("+20000-01-01", Err(RecordError::InvalidDate("+20000-01-01".to_string())))]
    #[case("0001-01-01", Err(RecordError::InvalidDate("0001-01-01".to_string())))]
    #[case("1899-12-31 23:59:59", Err(RecordError::InvalidDate("1899-12-31 23:59:59".to_string())))]
    fn test_parse_date(#[case] input: &str, #[case] expected: Result<NaiveDate, RecordError>) {
        assert_eq!(parse_date(input), expected);
    }

    #[rstest]
    #[case(
        RawRow::new("2024-01-01", "Bench Press", "100", "5"),
        Ok(SetRecord {
            date: date(2024, 1, 1),
            exercise: Name::new("Bench Press").unwrap(),
            weight: Weight(100.0),
            reps: Reps(5),
        })
    )]
    #[case(
        RawRow::new("2024-01-01", "Pull Up", "0", "12"),
        Ok(SetRecord {
            date: date(2024, 1, 1),
            exercise: Name::new("Pull Up").unwrap(),
            weight: Weight(0.0),
            reps: Reps(12),
        })
    )]
    #[case(
        RawRow::new("someday", "Bench Press", "100", "5"),
        Err(RecordError::InvalidDate("someday".to_string()))
    )]
    #[case(
        RawRow::new("2024-01-01", "  ", "100", "5"),
        Err(RecordError::InvalidName(NameError::Empty))
    )]
    #[case(
        RawRow::new("2024-01-01", "Bench Press", "", "5"),
        Err(RecordError::InvalidWeight(WeightError::ParseError))
    )]
    #[case(
        RawRow::new("2024-01-01", "Bench Press", "100", "five"),
        Err(RecordError::InvalidReps(RepsError::ParseError))
    )]
    fn test_set_record_try_from_raw_row(
        #[case] row: RawRow,
        #[case] expected: Result<SetRecord, RecordError>,
    ) {
        assert_eq!(SetRecord::try_from(&row), expected);
    }

    #[rstest]
    #[case(100.0, 5, 116.666_67)]
    #[case(105.0, 3, 115.5)]
    #[case(110.0, 5, 128.333_33)]
    #[case(60.0, 1, 62.0)]
    #[case(0.0, 10, 0.0)]
    fn test_set_record_estimated_one_rep_max(
        #[case] weight: f32,
        #[case] reps: u32,
        #[case] expected: f32,
    ) {
        let set = SetRecord {
            date: date(2024, 1, 1),
            exercise: Name::new("Bench Press").unwrap(),
            weight: Weight(weight),
            reps: Reps(reps),
        };
        assert_approx_eq!(set.estimated_one_rep_max(), expected, 0.001);
    }

    #[test]
    fn test_set_record_volume() {
        let set = SetRecord {
            date: date(2024, 1, 1),
            exercise: Name::new("Squat").unwrap(),
            weight: Weight(80.0),
            reps: Reps(8),
        };
        assert_approx_eq!(set.volume(), 640.0);
        assert!(set.is_valid());
        assert!(
            !SetRecord {
                reps: Reps(0),
                ..set
            }
            .is_valid()
        );
    }
}
