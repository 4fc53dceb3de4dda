//! GeoIP lookup lens
//!
//! Queries a geoiplookup-style XML service for one IP and extracts the
//! location fields from the response tags.

use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use crate::config::DEFAULT_GEOIP_URL;
use crate::error::{GripError, Result};
use crate::lens::fields::{project, FieldRow, FieldSelection};

// =============================================================================
// Types
// =============================================================================

/// `(field name, XML tag, value pattern)` in display order
const GEOIP_TAGS: [(&str, &str, &str); 8] = [
    ("ip", "ip", r"\d.*?"),
    ("host", "host", ".*?"),
    ("isp", "isp", ".*?"),
    ("city", "city", ".*?"),
    ("c_code", "countrycode", ".*?"),
    ("c_name", "countryname", ".*?"),
    ("lat", "latitude", ".*?"),
    ("long", "longitude", ".*?"),
];

/// Field names of a GeoIP record, in display order
pub fn geoip_fields() -> impl Iterator<Item = &'static str> {
    GEOIP_TAGS.iter().map(|(name, _, _)| *name)
}

// =============================================================================
// Args
// =============================================================================

/// Arguments for a GeoIP lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct GeoIpLookupArgs {
    /// IP address to look up
    #[cfg_attr(feature = "cli", clap(value_name = "IP"))]
    pub ip: String,

    /// Fields to show (ip, host, isp, city, c_code, c_name, lat, long); all
    /// when omitted
    #[cfg_attr(feature = "cli", clap(value_name = "FIELD"))]
    #[serde(default)]
    pub fields: Vec<String>,
}

impl GeoIpLookupArgs {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            fields: vec![],
        }
    }

    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn selection(&self) -> FieldSelection {
        self.fields.iter().map(String::as_str).collect()
    }
}

// =============================================================================
// Lens
// =============================================================================

/// GeoIP lookup lens
///
/// # Example
///
/// ```rust,ignore
/// use grip::lens::geoip::{GeoIpLens, GeoIpLookupArgs};
///
/// let lens = GeoIpLens::default();
/// let rows = lens.lookup(&GeoIpLookupArgs::new("8.8.8.8").with_fields(["city"]))?;
/// ```
pub struct GeoIpLens {
    agent: ureq::Agent,
    url_template: String,
}

impl GeoIpLens {
    pub fn new(url_template: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            url_template: url_template.to_string(),
        }
    }

    pub fn url_for(&self, ip: &str) -> String {
        self.url_template.replace("{}", ip.trim())
    }

    /// Fetch the raw XML body for `ip`
    pub fn fetch(&self, ip: &str) -> Result<String> {
        let url = self.url_for(ip);
        info!("fetching GeoIP data from {}", url);

        let mut resp = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| GripError::Transport(format!("{url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GripError::Transport(format!("{url}: status {status}")));
        }
        resp.body_mut()
            .read_to_string()
            .map_err(|e| GripError::Transport(format!("{url}: {e}")))
    }

    /// Look up `args.ip` and project the record onto the requested fields
    pub fn lookup(&self, args: &GeoIpLookupArgs) -> Result<Vec<FieldRow>> {
        let body = self.fetch(&args.ip)?;
        Ok(project(&parse_xml(&body)?, &args.selection()))
    }
}

impl Default for GeoIpLens {
    fn default() -> Self {
        Self::new(DEFAULT_GEOIP_URL, Duration::from_secs(10))
    }
}

/// Extract the GeoIP record from an XML body.
///
/// Every field is present; repeated tags are joined with `", "` and missing
/// tags yield an empty value.
pub fn parse_xml(body: &str) -> Result<Vec<FieldRow>> {
    GEOIP_TAGS
        .iter()
        .map(|(name, tag, pattern)| {
            let re = Regex::new(&format!("<{tag}>({pattern})</{tag}>"))?;
            let values: Vec<&str> = re
                .captures_iter(body)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            debug!("tag <{}>: {} match(es)", tag, values.len());
            Ok((name.to_string(), values.join(", ")))
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const SAMPLE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><ip><results><result>\
        <ip>8.8.8.8</ip><host>dns.google</host><isp>Google LLC</isp>\
        <city>Mountain View</city><countrycode>US</countrycode>\
        <countryname>United States</countryname><latitude>37.4223</latitude>\
        <longitude>-122.085</longitude></result></results></ip>";

    #[test]
    fn test_parse_xml_all_fields() {
        let rows = parse_xml(SAMPLE).unwrap();
        let names: Vec<_> = rows.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, geoip_fields().collect::<Vec<_>>());
        assert_eq!(rows[0].1, "8.8.8.8");
        assert_eq!(rows[3].1, "Mountain View");
        assert_eq!(rows[5].1, "United States");
        assert_eq!(rows[7].1, "-122.085");
    }

    #[test]
    fn test_parse_xml_missing_and_repeated() {
        let rows = parse_xml("<city>Paris</city><city>Lyon</city>").unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[3], ("city".to_string(), "Paris, Lyon".to_string()));
        assert_eq!(rows[0].1, "");
        assert_eq!(rows[6].1, "");
    }

    #[test]
    fn test_ip_tag_requires_leading_digit() {
        // the outer <ip> wrapper element must not be taken as the address
        let rows = parse_xml("<ip><ip>1.2.3.4</ip></ip>").unwrap();
        assert_eq!(rows[0].1, "1.2.3.4");
    }

    #[test]
    fn test_lookup_projects_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/").query_param("query", "8.8.8.8");
            then.status(200).header("content-type", "text/xml").body(SAMPLE);
        });

        let lens = GeoIpLens::new(
            &format!("{}/?query={{}}", server.base_url()),
            Duration::from_secs(5),
        );
        let rows = lens
            .lookup(&GeoIpLookupArgs::new("8.8.8.8").with_fields(["lat", "city"]))
            .unwrap();
        mock.assert();
        assert_eq!(
            rows,
            vec![
                ("city".to_string(), "Mountain View".to_string()),
                ("lat".to_string(), "37.4223".to_string()),
            ]
        );
    }

    #[test]
    fn test_lookup_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(503);
        });
        let lens = GeoIpLens::new(
            &format!("{}/?query={{}}", server.base_url()),
            Duration::from_secs(5),
        );
        let err = lens.lookup(&GeoIpLookupArgs::new("8.8.8.8")).unwrap_err();
        assert!(matches!(err, GripError::Transport(_)));
    }
}
