//! Lens module
//!
//! This module provides high-level "lens" abstractions that combine lookup
//! logic with output shaping. Lenses are designed to be reusable from the CLI
//! and from library callers alike.
//!
//! # Feature Requirements
//!
//! | Lens | Feature Required | Dependencies |
//! |------|-----------------|--------------|
//! | `TimeLens` | `lens-core` | chrono, dateparser, chrono-humanize |
//! | `RdapLens` | `lens-core` | serde_json |
//! | `RdapClient` | `lens-net` | ureq |
//! | `GeoIpLens` | `lens-net` | ureq, regex |
//! | `IpFileLens` | `lens-net` | regex |
//!
//! # Architecture
//!
//! Each lens module exports:
//! - A **Lens struct** (e.g., `RdapLens`, `TimeLens`) - the main entry point for all operations
//! - **Args structs** - input arguments for lens methods
//! - **Output types** - ordered `(field, value)` rows and description structs
//!
//! Records are shown through [`fields::FieldSelection`]: an empty selection
//! shows every field, otherwise only the named ones, always in the record's
//! own order.
//!
//! # Usage
//!
//! ```rust,ignore
//! // Entry ranking (lens-core)
//! use grip::lens::rdap::{RdapLens, RdapRecord, TimestampKind};
//!
//! // Remote lookups (lens-net)
//! use grip::lens::rdap::RdapClient;
//! use grip::lens::geoip::{GeoIpLens, GeoIpLookupArgs};
//! ```

// =============================================================================
// Core lenses (lens-core feature)
// =============================================================================

pub mod fields;
pub mod utils;

// TimeLens - date normalization and human-readable dates
pub mod time;

// RdapLens - registration entity ranking and projection
pub mod rdap;

// =============================================================================
// Network lenses (lens-net feature)
// =============================================================================

// GeoIpLens - location lookup
#[cfg(feature = "lens-net")]
pub mod geoip;

// IpFileLens - candidate addresses from text files
#[cfg(feature = "lens-net")]
pub mod ip_file;
