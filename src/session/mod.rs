//! Session bookkeeping: attempt counters, question timing and the record
//! emitted when a session ends.
//!
//! # Components
//! - `aggregator.rs`: running counters with outlier-filtered timing
//! - `record.rs`: the immutable `SessionRecord` appended to the session log
//! - `clock.rs`: injectable time source (`SystemClock`, `ManualClock`)

pub mod aggregator;
pub mod clock;
pub mod record;

pub use aggregator::{SessionAggregator, OUTLIER_THRESHOLD};
pub use clock::{Clock, ManualClock, SystemClock};
pub use record::SessionRecord;
