use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;
use crate::roster::{PersonRecord, Roster, Sex, MAX_AGE};

/// Accepted header spellings per required column (English and Hebrew)
const NAME_HEADERS: &[&str] = &["name", "שם"];
const SEX_HEADERS: &[&str] = &["sex", "gender", "מין"];
const AGE_HEADERS: &[&str] = &["age", "גיל"];
const REGION_HEADERS: &[&str] = &["region", "area", "אזור בעיר", "אזור"];

/// Normalises a header cell: trims whitespace and a stray byte-order mark
fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Finds the position of the first header matching one of the accepted spellings
fn find_column(headers: &StringRecord, accepted: &[&str], column: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .map(normalize_header)
        .position(|h| accepted.contains(&h.as_str()))
        .ok_or(LoadError::MissingColumn(column))
}

/// Reads a required cell, rejecting blanks
fn required<'r>(record: &'r StringRecord, col: usize, row: usize, column: &'static str) -> Result<&'r str, LoadError> {
    match record.get(col).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::MissingValue { row, column }),
    }
}

/// Parses an age cell in `0..=MAX_AGE`. Spreadsheets often export whole numbers as "34.0", so that form is accepted too.
fn parse_age(value: &str, row: usize) -> Result<u32, LoadError> {
    let whole = value.strip_suffix(".0").unwrap_or(value);
    match whole.parse::<u32>() {
        Ok(age) if age <= MAX_AGE => Ok(age),
        _ => Err(LoadError::InvalidAge {
            row,
            value: value.to_string(),
        }),
    }
}

/// Parses a roster from any CSV source
///
/// Required columns are name, sex, age and region; any other columns are ignored.
/// Row numbers in errors count data rows from 1.
pub fn parse_roster<R: Read>(source: R) -> Result<Roster, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let headers = reader.headers()?.clone();
    let name_col = find_column(&headers, NAME_HEADERS, "name")?;
    let sex_col = find_column(&headers, SEX_HEADERS, "sex")?;
    let age_col = find_column(&headers, AGE_HEADERS, "age")?;
    let region_col = find_column(&headers, REGION_HEADERS, "region")?;

    let mut people = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        // Blank trailing lines from spreadsheet exports
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let name = required(&record, name_col, row, "name")?.to_string();
        let sex_raw = required(&record, sex_col, row, "sex")?;
        let sex = Sex::parse(sex_raw).ok_or_else(|| LoadError::InvalidSex {
            row,
            value: sex_raw.to_string(),
        })?;
        let age = parse_age(required(&record, age_col, row, "age")?, row)?;
        let region = required(&record, region_col, row, "region")?.to_string();

        people.push(PersonRecord {
            index: people.len(),
            name,
            sex,
            age,
            region,
        });
    }

    Ok(Roster::new(people))
}

/// Loads a roster from a CSV file on disk
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Roster, LoadError> {
    let file = File::open(csv_path)?;
    parse_roster(file)
}
