//! Single-pass repeat-donor analytics engine.
//!
//! Reads `|`-delimited contribution records in arrival order. Each record from a
//! repeat donor updates its recipient bucket and yields exactly one output line
//! carrying the bucket's running statistics at that point of the stream.

use crate::donor::DonorLedger;
use crate::error::Result;
use crate::percentile::Percentile;
use crate::recipient::{RecipientAggregator, RecipientKey, RecipientStats};
use crate::record::{ContributionRecord, Rejection};
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use std::fmt;
use std::io::{Read, Write};

/// One output line: the bucket a repeat donation landed in and the bucket's
/// statistics right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDonorSummary {
    pub key: RecipientKey,
    pub stats: RecipientStats,
}

impl fmt::Display for RepeatDonorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.key.committee_id, self.key.zip_code, self.key.year, self.stats
        )
    }
}

/// Counters over one run. Observational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Non-blank lines read.
    pub records_read: u64,

    /// Lines dropped by validation.
    pub rejected: u64,

    /// Lines that produced an output line.
    pub repeat_donations: u64,
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records read, {} rejected, {} from repeat donors",
            self.records_read, self.rejected, self.repeat_donations
        )
    }
}

/// The streaming engine.
///
/// Owns the donor ledger and the recipient buckets. Both grow for the whole
/// run and are never pruned: any later record may need to be compared against
/// any earlier one.
///
/// # Output Ordering
///
/// Summaries are produced in input order, one per repeat-donor record, and are
/// never revised once produced.
pub struct DonationAnalytics {
    percentile: Percentile,
    donors: DonorLedger,
    recipients: RecipientAggregator,
    summaries: Vec<RepeatDonorSummary>,
    stats: ProcessingStats,
}

impl DonationAnalytics {
    /// Creates an empty engine computing the given percentile.
    pub fn new(percentile: Percentile) -> Self {
        DonationAnalytics {
            percentile,
            donors: DonorLedger::new(),
            recipients: RecipientAggregator::new(),
            summaries: Vec::new(),
            stats: ProcessingStats::default(),
        }
    }

    /// Processes `|`-delimited records from a reader in streaming fashion.
    ///
    /// Malformed records are dropped. Only an I/O failure of the reader aborts
    /// processing.
    pub fn process_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        for result in csv_reader.records() {
            match result {
                Ok(record) => {
                    self.process_record(&record);
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    debug!("Unreadable record: {}", e);
                    self.ingest(Err(Rejection::InvalidEncoding));
                }
            }
        }

        Ok(())
    }

    /// Processes one record already split into fields.
    ///
    /// Returns the output line it produced, if any.
    pub fn process_record(&mut self, record: &StringRecord) -> Option<&RepeatDonorSummary> {
        self.ingest(ContributionRecord::parse(record))
    }

    /// Processes one raw input line.
    pub fn process_line(&mut self, line: &str) -> Option<&RepeatDonorSummary> {
        self.ingest(ContributionRecord::parse_line(line))
    }

    fn ingest(
        &mut self,
        parsed: std::result::Result<ContributionRecord, Rejection>,
    ) -> Option<&RepeatDonorSummary> {
        self.stats.records_read += 1;
        match parsed {
            Ok(contribution) => self.process_contribution(contribution),
            Err(rejection) => {
                self.stats.rejected += 1;
                debug!("Record {}: skipped, {}", self.stats.records_read, rejection);
                None
            }
        }
    }

    /// Processes a validated contribution.
    ///
    /// The donor ledger is updated even when the contribution is not a repeat,
    /// since it may establish or lower the donor's earliest year.
    pub fn process_contribution(
        &mut self,
        contribution: ContributionRecord,
    ) -> Option<&RepeatDonorSummary> {
        let donor = contribution.donor_key();
        if !self.donors.record_donation(&donor, contribution.year) {
            return None;
        }

        let key = RecipientKey::new(
            contribution.committee_id,
            contribution.zip_code,
            contribution.year,
        );
        let stats =
            self.recipients
                .record_repeat_donation(key.clone(), contribution.amount, self.percentile)?;

        let summary = RepeatDonorSummary { key, stats };
        debug!("Record {}: repeat donor, {}", self.stats.records_read, summary);
        self.stats.repeat_donations += 1;
        self.summaries.push(summary);
        self.summaries.last()
    }

    /// Writes every summary, one per line, without a trailing newline.
    pub fn write_output<W: Write>(&self, mut writer: W) -> Result<()> {
        for (idx, summary) in self.summaries.iter().enumerate() {
            if idx > 0 {
                writer.write_all(b"\n")?;
            }
            write!(writer, "{}", summary)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Summaries produced so far, in input order.
    pub fn summaries(&self) -> &[RepeatDonorSummary] {
        &self.summaries
    }

    /// Counters for the records processed so far.
    pub fn stats(&self) -> ProcessingStats {
        self.stats
    }

    /// Donor state accumulated so far.
    pub fn donors(&self) -> &DonorLedger {
        &self.donors
    }

    /// Recipient buckets accumulated so far.
    pub fn recipients(&self) -> &RecipientAggregator {
        &self.recipients
    }
}
