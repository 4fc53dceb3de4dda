//! RDAP lens arguments
//!
//! These arguments are shared by the CLI (clap derives when the `cli`
//! feature is enabled) and by library callers (serde).

use serde::{Deserialize, Serialize};

use super::types::TimestampKind;
use crate::lens::fields::FieldSelection;

/// Which registration entity (or entities) to resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySelection {
    /// The entity updated closest to the reference time
    #[default]
    MostRecent,
    /// The entity updated furthest from the reference time
    Oldest,
    /// All entities, most recent first
    All,
    /// All entities, oldest first
    AllDescending,
}

/// Arguments for resolving registration entries of one IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct RdapEntryArgs {
    /// IP address to look up
    #[cfg_attr(feature = "cli", clap(value_name = "IP"))]
    pub ip: String,

    /// Event to rank entries by
    #[cfg_attr(feature = "cli", clap(short, long, value_enum, default_value = "registration"))]
    #[serde(default)]
    pub by: TimestampKind,

    /// Fields to show (registration, "last changed", handle, objectClassName,
    /// port43, roles, status, email, telephone); all when omitted
    #[cfg_attr(feature = "cli", clap(value_name = "FIELD"))]
    #[serde(default)]
    pub fields: Vec<String>,
}

impl RdapEntryArgs {
    /// Create new args for a specific IP, ranked by registration date
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }

    /// Rank by a different event
    pub fn by(mut self, kind: TimestampKind) -> Self {
        self.by = kind;
        self
    }

    /// Limit the displayed fields
    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn selection(&self) -> FieldSelection {
        self.fields.iter().map(String::as_str).collect()
    }
}

/// Arguments for showing the network object of one IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct RdapNetworkArgs {
    /// IP address to look up
    #[cfg_attr(feature = "cli", clap(value_name = "IP"))]
    pub ip: String,

    /// Fields to show (registration, handle, ipVersion, name, objectClassName,
    /// parentHandle, port43, rdapConformance, startAddress); all when omitted
    #[cfg_attr(feature = "cli", clap(value_name = "FIELD"))]
    #[serde(default)]
    pub fields: Vec<String>,
}

impl RdapNetworkArgs {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            fields: vec![],
        }
    }

    pub fn selection(&self) -> FieldSelection {
        self.fields.iter().map(String::as_str).collect()
    }
}
