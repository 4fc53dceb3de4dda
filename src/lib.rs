#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Grip - a GeoIP and RDAP lookup toolkit
//!
//! Grip looks up location and registration information for IP addresses. Its
//! core ranks the registration entities of an RDAP record by date, picks the
//! most recent or oldest one, and shows only the fields a user asks for. It
//! can be used as both a command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `lens-core` | Offline lenses (TimeLens, RdapLens, field projection) | `dateparser`, `chrono-humanize` |
//! | `lens-net` | Remote lookups and IP file extraction | `ureq`, `regex` |
//! | `display` | Table formatting | `tabled`, `json_to_table` |
//! | `cli` | Full CLI binary | All above + `clap`, `indicatif` |
//!
//! ## Choosing Features
//!
//! ```toml
//! # Ranking and projection over records you fetched yourself
//! grip = { version = "0.3", default-features = false, features = ["lens-core"] }
//!
//! # Remote lookups without CLI overhead
//! grip = { version = "0.3", default-features = false, features = ["lens-net"] }
//!
//! # Default (CLI binary)
//! grip = "0.3"
//! ```
//!
//! # Architecture
//!
//! - **[`lens`]**: lookup logic (feature-gated)
//!   - `time`: date normalization and human dates
//!   - `fields`: field selection and projection
//!   - `rdap`: entity time index, extremal selection, ranked enumeration, transport
//!   - `geoip`: GeoIP transport and tag extraction (requires `lens-net`)
//!   - `ip_file`: IP extraction from text files (requires `lens-net`)
//! - **[`config`]**: Configuration management
//! - **[`error`]**: The library error type
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use grip::lens::rdap::{RdapClient, RdapLens, TimestampKind};
//!
//! let reference = chrono::Utc::now();
//! let record = RdapClient::default().fetch("1.1.1.1")?.into_record("1.1.1.1")?;
//!
//! let lens = RdapLens::new(reference);
//! for entity in lens.entries(&record, TimestampKind::LastChanged, false)? {
//!     println!("{:?}", entity.handle());
//! }
//! ```

pub mod config;
pub mod error;

// Lens module - feature gated
#[cfg(feature = "lens-core")]
pub mod lens;

pub use config::GripConfig;
pub use error::{GripError, Result};

// Output format utilities (lens-core)
#[cfg(feature = "lens-core")]
pub use lens::utils::OutputFormat;
