//! Entity time index
//!
//! Pairs every registration entity with the whole days elapsed since its
//! chosen event, relative to one reference instant shared by the whole call.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::{RdapRecord, TemporalSample, TimestampKind};
use crate::error::Result;
use crate::lens::time::{elapsed_days, TimeLens};

/// Build the samples for `record` on the `kind` axis, in entity order.
///
/// Fails on the first entity that is malformed or carries an unparseable
/// date; no partial index is returned.
pub fn build<'a>(
    record: &'a RdapRecord,
    kind: TimestampKind,
    reference: DateTime<Utc>,
    time: &TimeLens,
) -> Result<Vec<TemporalSample<'a>>> {
    let entities = record.entities()?;
    debug!("indexing {} entities by {}", entities.len(), kind);

    entities
        .into_iter()
        .map(|entity| {
            let instant = time.to_instant(entity.event_date(kind)?)?;
            Ok(TemporalSample::new(entity, elapsed_days(reference, instant)))
        })
        .collect()
}
