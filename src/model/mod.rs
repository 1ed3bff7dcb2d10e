//! Data model for pricing records
//!
//! - `PriceRecord`: the mutable entity and its validity state
//! - `RecordPatch`: partial update applied by the store's write paths
//! - `Violation`: tagged rule violations rendered as operator-facing phrases
//! - `ValidationReport`: derived counts and detail lists, rebuilt on demand

mod record;
mod report;
mod violation;

pub use record::{PriceRecord, RecordPatch};
pub use report::ValidationReport;
pub use violation::Violation;
