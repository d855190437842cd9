//! # Donation Analytics
//!
//! A streaming processor over FEC individual-contribution files that finds
//! contributions from repeat donors and reports running statistics for the
//! recipient, zip code and year each one went to.
//!
//! ## Design Principles
//!
//! - **Single forward pass**: every output line is final once written
//! - **Exact ranks**: the percentile is a decimal, so nearest-rank ties round half to even exactly
//! - **Lenient input**: malformed records are dropped, never fatal
//! - **All-or-nothing output**: the result is written only after the whole input was read
//!
//! ## Example
//!
//! ```
//! use donation_analytics::{DonationAnalytics, Percentile};
//! use std::io::Cursor;
//! use std::str::FromStr;
//!
//! let input = "\
//! C001|N|M2|P|1|15|IND|JOHN SMITH|CITY|ST|12345|E|O|01152017|200||S|1||M|1
//! C001|N|M2|P|1|15|IND|JOHN SMITH|CITY|ST|12345|E|O|01152018|300||S|1||M|1";
//!
//! let mut engine = DonationAnalytics::new(Percentile::from_str("30").unwrap());
//! engine.process_reader(Cursor::new(input)).unwrap();
//!
//! let mut output = Vec::new();
//! engine.write_output(&mut output).unwrap();
//! assert_eq!(output, b"C001|12345|2018|300|300|1");
//! ```

pub mod donor;
pub mod engine;
pub mod error;
pub mod percentile;
pub mod recipient;
pub mod record;

pub use donor::{DonorLedger, DonorState};
pub use engine::{DonationAnalytics, ProcessingStats, RepeatDonorSummary};
pub use error::{EngineError, Result};
pub use percentile::{nearest_rank, Percentile};
pub use recipient::{RecipientAggregate, RecipientAggregator, RecipientKey, RecipientStats};
pub use record::{ContributionRecord, Rejection};
