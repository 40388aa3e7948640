#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod csv_file;

pub use csv_file::{Columns, CsvFile, CsvOptions, read_rows};
