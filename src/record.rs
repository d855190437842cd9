//! Contribution records: field extraction and validation of one input line.

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use thiserror::Error;

/// Column of the recipient committee id.
pub const CMTE_ID: usize = 0;
/// Column of the contributor name.
pub const NAME: usize = 7;
/// Column of the contributor postal code.
pub const ZIP_CODE: usize = 10;
/// Column of the transaction date, `MMDDYYYY`.
pub const TRANSACTION_DT: usize = 13;
/// Column of the transaction amount.
pub const TRANSACTION_AMT: usize = 14;
/// Column of the intermediary id. Must be empty for individual contributions.
pub const OTHER_ID: usize = 15;

/// Number of leading postal-code characters kept.
pub const ZIP_LEN: usize = 5;

/// Why an input line was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("line has {0} fields, expected at least 16")]
    TooFewFields(usize),

    #[error("contribution was made through an intermediary")]
    IntermediaryContribution,

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("zip code '{0}' is shorter than 5 characters")]
    ShortZipCode(String),

    #[error("invalid transaction date '{0}'")]
    InvalidDate(String),

    #[error("invalid transaction amount '{0}'")]
    InvalidAmount(String),

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// A validated individual contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRecord {
    /// Recipient committee id.
    pub committee_id: String,

    /// Contributor name, case preserved.
    pub name: String,

    /// First five characters of the postal code.
    pub zip_code: String,

    /// Calendar year of the transaction date.
    pub year: i32,

    /// Whole-dollar amount.
    pub amount: i64,
}

impl ContributionRecord {
    /// Validates a record already split on `|`.
    pub fn parse(record: &StringRecord) -> Result<Self, Rejection> {
        if record.len() <= OTHER_ID {
            return Err(Rejection::TooFewFields(record.len()));
        }
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        if !field(OTHER_ID).is_empty() {
            return Err(Rejection::IntermediaryContribution);
        }

        let committee_id = non_empty(field(CMTE_ID), "committee id")?;
        let name = non_empty(field(NAME), "contributor name")?;
        let date = non_empty(field(TRANSACTION_DT), "transaction date")?;
        let amount = non_empty(field(TRANSACTION_AMT), "transaction amount")?;

        let zip_code = truncate_zip(field(ZIP_CODE))?;
        let year = parse_year(date)?;
        let amount = amount
            .parse::<i64>()
            .map_err(|_| Rejection::InvalidAmount(amount.to_string()))?;

        Ok(ContributionRecord {
            committee_id: committee_id.to_string(),
            name: name.to_string(),
            zip_code,
            year,
            amount,
        })
    }

    /// Splits a raw line on `|` and validates it.
    ///
    /// A trailing `\n` or `\r\n` is not part of the last field.
    pub fn parse_line(line: &str) -> Result<Self, Rejection> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split('|').collect();
        Self::parse(&StringRecord::from(fields))
    }

    /// Concatenation of name and 5-character zip code.
    pub fn donor_key(&self) -> String {
        format!("{}{}", self.name, self.zip_code)
    }
}

fn non_empty<'a>(value: &'a str, what: &'static str) -> Result<&'a str, Rejection> {
    if value.is_empty() {
        Err(Rejection::MissingField(what))
    } else {
        Ok(value)
    }
}

fn truncate_zip(zip: &str) -> Result<String, Rejection> {
    match zip.char_indices().nth(ZIP_LEN) {
        Some((end, _)) => Ok(zip[..end].to_string()),
        None if zip.chars().count() == ZIP_LEN => Ok(zip.to_string()),
        None => Err(Rejection::ShortZipCode(zip.to_string())),
    }
}

/// Year of an `MMDDYYYY` date. Anything that is not eight digits naming a real
/// calendar date from year 1 onwards is rejected.
fn parse_year(date: &str) -> Result<i32, Rejection> {
    let invalid = || Rejection::InvalidDate(date.to_string());
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let parsed = NaiveDate::parse_from_str(date, "%m%d%Y").map_err(|_| invalid())?;
    if parsed.year() < 1 {
        return Err(invalid());
    }
    Ok(parsed.year())
}
