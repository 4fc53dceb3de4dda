//! RDAP lens
//!
//! This module resolves registration entries from RDAP records: it ranks the
//! entities under `entities[0].entities` by registration or last-changed
//! date, picks the most recent or oldest one, lists them all in order, and
//! projects the fields a user asked to see.
//!
//! All temporal operations take the session's reference instant from the
//! lens, captured once by the caller, so rankings within one session agree
//! with each other even while lookups are slow.
//!
//! # Example
//!
//! ```rust,ignore
//! use grip::lens::rdap::{RdapLens, RdapRecord, TimestampKind};
//! use grip::lens::fields::FieldSelection;
//!
//! let lens = RdapLens::new(chrono::Utc::now());
//! let record = RdapRecord::new(serde_json::from_str(&body)?);
//!
//! let entity = lens.most_recent(&record, TimestampKind::Registration)?;
//! let rows = lens.entry_rows(&entity, &FieldSelection::from_tokens("handle email"))?;
//! ```

pub mod args;
#[cfg(feature = "lens-net")]
pub mod client;
pub mod index;
pub mod rank;
pub mod types;

pub use args::{EntrySelection, RdapEntryArgs, RdapNetworkArgs};
#[cfg(feature = "lens-net")]
pub use client::{RdapClient, DEFAULT_RDAP_URL};
pub use types::{
    is_reserved_marker, Entity, RdapRecord, RdapResponse, TemporalSample,
    TimestampKind, ENTRY_FIELDS, NETWORK_FIELDS,
};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::lens::fields::{project, FieldRow, FieldSelection};
use crate::lens::time::TimeLens;

/// Rows for one resolved entity, tagged with its position in the record
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub index: usize,
    pub rows: Vec<FieldRow>,
}

/// RDAP entry resolution lens
pub struct RdapLens {
    reference: DateTime<Utc>,
    time: TimeLens,
}

impl RdapLens {
    /// Create a lens that measures elapsed time against `reference`
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            time: TimeLens::new(),
        }
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Elapsed-days samples for every entity, in record order
    pub fn samples<'a>(
        &self,
        record: &'a RdapRecord,
        kind: TimestampKind,
    ) -> Result<Vec<TemporalSample<'a>>> {
        index::build(record, kind, self.reference, &self.time)
    }

    /// The entity whose `kind` event is most recent
    pub fn most_recent<'a>(&self, record: &'a RdapRecord, kind: TimestampKind) -> Result<Entity<'a>> {
        rank::most_recent(&self.samples(record, kind)?)
    }

    /// The entity whose `kind` event is oldest
    pub fn oldest<'a>(&self, record: &'a RdapRecord, kind: TimestampKind) -> Result<Entity<'a>> {
        rank::oldest(&self.samples(record, kind)?)
    }

    /// All entities ordered by their `kind` event, most recent first unless
    /// `descending`
    pub fn entries<'a>(
        &self,
        record: &'a RdapRecord,
        kind: TimestampKind,
        descending: bool,
    ) -> Result<Vec<Entity<'a>>> {
        rank::enumerate(&self.samples(record, kind)?, descending)
    }

    /// Resolve entities per `selection`
    pub fn resolve<'a>(
        &self,
        record: &'a RdapRecord,
        kind: TimestampKind,
        selection: EntrySelection,
    ) -> Result<Vec<Entity<'a>>> {
        match selection {
            EntrySelection::MostRecent => Ok(vec![self.most_recent(record, kind)?]),
            EntrySelection::Oldest => Ok(vec![self.oldest(record, kind)?]),
            EntrySelection::All => self.entries(record, kind, false),
            EntrySelection::AllDescending => self.entries(record, kind, true),
        }
    }

    /// Summary rows of one entity, projected onto `fields`
    pub fn entry_rows(&self, entity: &Entity<'_>, fields: &FieldSelection) -> Result<Vec<FieldRow>> {
        Ok(project(&entity.summary_rows(&self.time)?, fields))
    }

    /// Resolve entities and project each of them.
    ///
    /// All-or-nothing: one malformed entity fails the whole call.
    pub fn entry_views(
        &self,
        record: &RdapRecord,
        args: &RdapEntryArgs,
        selection: EntrySelection,
    ) -> Result<Vec<EntryView>> {
        let fields = args.selection();
        self.resolve(record, args.by, selection)?
            .iter()
            .map(|entity| {
                Ok(EntryView {
                    index: entity.index(),
                    rows: self.entry_rows(entity, &fields)?,
                })
            })
            .collect()
    }

    /// Summary rows of the network object, projected onto `fields`
    pub fn network_rows(&self, record: &RdapRecord, fields: &FieldSelection) -> Result<Vec<FieldRow>> {
        Ok(project(&record.network_rows(&self.time)?, fields))
    }
}
