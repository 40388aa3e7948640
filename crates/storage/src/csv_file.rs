use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use liftlog_domain as domain;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Header names of the columns holding the fields of a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub date: String,
    pub exercise: String,
    pub weight: String,
    pub reps: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            exercise: "Exercise Name".to_string(),
            weight: "Weight".to_string(),
            reps: "Reps".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub columns: Columns,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            columns: Columns::default(),
        }
    }
}

/// A workout log export stored as CSV file.
pub struct CsvFile {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl domain::SetRecordRepository for CsvFile {
    fn read_rows(&self) -> Result<Vec<domain::RawRow>, domain::ReadError> {
        debug!("reading {}", self.path.display());
        let file = File::open(&self.path).map_err(domain::StorageError::from)?;
        Ok(read_rows(file, &self.options)?)
    }
}

/// Read the date, exercise, weight and reps fields of every line.
///
/// All other columns are ignored. Lines which cannot be parsed as CSV are
/// skipped. The field values are passed on unvalidated.
pub fn read_rows<R: io::Read>(
    reader: R,
    options: &CsvOptions,
) -> Result<Vec<domain::RawRow>, domain::StorageError> {
    let delimiter = u8::try_from(options.delimiter).map_err(|_| {
        domain::StorageError::Other(
            format!("unsupported delimiter '{}'", options.delimiter).into(),
        )
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let position = |column: &str| {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| domain::StorageError::MissingColumn(column.to_string()))
    };
    let date = position(&options.columns.date)?;
    let exercise = position(&options.columns.exercise)?;
    let weight = position(&options.columns.weight)?;
    let reps = position(&options.columns.reps)?;

    let mut rows = vec![];

    for record in reader.records() {
        match record {
            Ok(record) => {
                let field = |index: usize| record.get(index).unwrap_or_default();
                rows.push(domain::RawRow::new(
                    field(date),
                    field(exercise),
                    field(weight),
                    field(reps),
                ));
            }
            Err(err) => {
                if err.is_io_error() {
                    return Err(csv_error(err));
                }
                warn!("skipping line: {err}");
            }
        }
    }

    debug!("read {} rows", rows.len());

    Ok(rows)
}

fn csv_error(err: csv::Error) -> domain::StorageError {
    domain::StorageError::Other(Box::new(err))
}
