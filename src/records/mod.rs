//! Record batches as delivered by the SSC REST API
//!
//! SSC list endpoints answer with a JSON document holding a `data` array of flat
//! objects and, for paged queries, a `totalCount` giving the size of the full
//! population. This module wraps those documents in typed containers without
//! interpreting any field: a [`Record`] is an immutable field map, a [`Batch`] is an
//! ordered sequence of records plus the optional population size.
//!
//! # Field Access
//!
//! Individual records are heterogeneous. A field may be absent, `null`, or carry a
//! value of an unexpected type. Every accessor therefore returns a [`FieldValue`]
//! which distinguishes a usable value from a missing one and from a malformed one.
//! Aggregations fold these outcomes into their summaries instead of aborting.
//!
//! Only a batch that has no record sequence at all is rejected, with a
//! [`BatchError`], before any aggregation runs.

mod batch;
mod field_value;
mod record;
mod timestamp;

pub use batch::{Batch, BatchError, Sampling, load_batch};
pub use field_value::FieldValue;
pub use record::{Entry, Record};
pub use timestamp::parse_timestamp;
