//! RDAP transport
//!
//! Fetches the raw RDAP JSON for one IP and classifies it. The HTTP status is
//! not trusted on its own: registries answer reserved ranges with 404 error
//! objects or placeholder blocks, which are detected from the body. Any other
//! error object is a failed lookup.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use super::types::RdapResponse;
pub use crate::config::DEFAULT_RDAP_URL;
use crate::error::{GripError, Result};

/// Blocking RDAP client
pub struct RdapClient {
    agent: ureq::Agent,
    url_template: String,
}

impl RdapClient {
    /// Create a client for `url_template` with a global request timeout
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

    /// The lookup URL for `ip`
    pub fn url_for(&self, ip: &str) -> String {
        self.url_template.replace("{}", ip.trim())
    }

    /// Fetch and classify the RDAP record for `ip`
    pub fn fetch(&self, ip: &str) -> Result<RdapResponse> {
        let url = self.url_for(ip);
        info!("fetching RDAP record from {}", url);

        let mut resp = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| GripError::Transport(format!("{url}: {e}")))?;
        let status = resp.status();
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| GripError::Transport(format!("{url}: {e}")))?;
        debug!("RDAP response status {} ({} bytes)", status, body.len());

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            GripError::Transport(format!("{url}: status {status}, body is not JSON: {e}"))
        })?;

        RdapResponse::from_payload(payload)
    }
}

impl Default for RdapClient {
    fn default() -> Self {
        Self::new(DEFAULT_RDAP_URL, Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> RdapClient {
        RdapClient::new(&format!("{}/ip/{{}}", server.base_url()), Duration::from_secs(5))
    }

    #[test]
    fn test_url_for() {
        let client = RdapClient::default();
        assert_eq!(client.url_for(" 1.1.1.1 "), "https://rdap.apnic.net/ip/1.1.1.1");
    }

    #[test]
    fn test_fetch_record() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/ip/1.1.1.1");
            then.status(200)
                .header("content-type", "application/rdap+json")
                .json_body(json!({
                    "handle": "1.1.1.0 - 1.1.1.255",
                    "entities": [{"entities": []}]
                }));
        });

        let response = client_for(&server).fetch("1.1.1.1").unwrap();
        mock.assert();
        match response {
            RdapResponse::Record(record) => {
                assert_eq!(record.as_value()["handle"], "1.1.1.0 - 1.1.1.255");
            }
            RdapResponse::Reserved => panic!("expected a record"),
        }
    }

    #[test]
    fn test_fetch_reserved_on_error_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ip/127.0.0.1");
            then.status(404).json_body(json!({
                "errorCode": 404,
                "title": "Not Found",
                "description": ["127.0.0.1 is reserved"]
            }));
        });

        let response = client_for(&server).fetch("127.0.0.1").unwrap();
        assert_eq!(response, RdapResponse::Reserved);
    }

    #[test]
    fn test_fetch_reserved_on_iana_block() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ip/244.36.171.60");
            then.status(200).json_body(json!({
                "handle": "IANA-NETBLOCK-240",
                "name": "IANA-RESERVED"
            }));
        });

        let response = client_for(&server).fetch("244.36.171.60").unwrap();
        assert_eq!(response, RdapResponse::Reserved);
    }

    #[test]
    fn test_fetch_rate_limited_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ip/8.8.8.8");
            then.status(429).json_body(json!({
                "errorCode": 429,
                "title": "Too Many Requests"
            }));
        });

        let err = client_for(&server).fetch("8.8.8.8").unwrap_err();
        assert!(matches!(err, GripError::Transport(_)));
        assert!(!err.is_reserved());
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too Many Requests"));
    }

    #[test]
    fn test_fetch_non_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ip/1.2.3.4");
            then.status(502).body("<html>bad gateway</html>");
        });

        let err = client_for(&server).fetch("1.2.3.4").unwrap_err();
        assert!(matches!(err, GripError::Transport(_)));
        assert!(err.to_string().contains("502"));
    }
}
