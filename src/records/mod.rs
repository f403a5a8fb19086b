//! Cat records and the bundled-JSON loader.
//!
//! - [`model`] - The [`Record`] type
//! - [`loader`] - Read, decode and validate a resource into records
//!
//! Every failure below the [`load_records`] boundary is logged and collapsed
//! into [`LoadOutcome::Failed`]; callers only ever see a (possibly empty)
//! record list plus a reason for diagnostics.

mod loader;
mod model;

pub use loader::{
    decode_records, load_records, read_location, Decoded, EntryError, LoadError, LoadOutcome,
    SkippedEntry, DEFAULT_RECORDS_KEY, MAX_RESOURCE_SIZE,
};
pub use model::Record;
