use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default RDAP endpoint, `{}` is replaced by the IP address
pub const DEFAULT_RDAP_URL: &str = "https://rdap.apnic.net/ip/{}";

/// Default GeoIP endpoint, `{}` is replaced by the IP address
pub const DEFAULT_GEOIP_URL: &str = "http://api.geoiplookup.net/?query={}";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GripConfig {
    /// RDAP lookup URL template
    pub rdap_url: String,

    /// GeoIP lookup URL template
    pub geoip_url: String,

    /// Global timeout for one remote request, in seconds (default: 10)
    pub request_timeout_secs: u64,
}

const EMPTY_CONFIG: &str = r#"### grip configuration file

### lookup endpoints, `{}` is replaced by the IP address
# rdap_url = "https://rdap.apnic.net/ip/{}"
# geoip_url = "http://api.geoiplookup.net/?query={}"

### timeout for one remote request (in seconds)
# request_timeout_secs = 10
"#;

impl Default for GripConfig {
    fn default() -> Self {
        Self {
            rdap_url: DEFAULT_RDAP_URL.to_string(),
            geoip_url: DEFAULT_GEOIP_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl GripConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<GripConfig> {
        let mut builder = Config::builder();

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                let grip_dir = Self::config_dir()?;
                std::fs::create_dir_all(grip_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create grip directory: {}", e))?;
                let p = format!("{}/grip.toml", grip_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of GRIP)
        // E.g., `GRIP_RDAP_URL=https://rdap.arin.net/registry/ip/{} grip rdap ...`
        builder = builder.add_source(config::Environment::with_prefix("GRIP"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_map(&config)
    }

    fn from_map(config: &HashMap<String, String>) -> Result<GripConfig> {
        let template = |key: &str, default: &str| -> Result<String> {
            match config.get(key) {
                Some(url) if url.contains("{}") => Ok(url.clone()),
                Some(url) => Err(anyhow!("{} must contain a {{}} placeholder: {}", key, url)),
                None => Ok(default.to_string()),
            }
        };

        let rdap_url = template("rdap_url", DEFAULT_RDAP_URL)?;
        let geoip_url = template("geoip_url", DEFAULT_GEOIP_URL)?;

        let request_timeout_secs = match config.get("request_timeout_secs") {
            Some(s) => s
                .parse()
                .map_err(|e| anyhow!("Invalid request_timeout_secs '{}': {}", s, e))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(GripConfig {
            rdap_url,
            geoip_url,
            request_timeout_secs,
        })
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("RDAP URL:           {}", self.rdap_url),
            format!("GeoIP URL:          {}", self.geoip_url),
            format!("Request Timeout:    {} seconds", self.request_timeout_secs),
        ]
        .join("\n")
    }

    fn config_dir() -> Result<String> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();
        Ok(format!("{}/.grip", home_dir))
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.grip/grip.toml", home_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GripConfig::default();
        assert_eq!(config.rdap_url, DEFAULT_RDAP_URL);
        assert_eq!(config.geoip_url, DEFAULT_GEOIP_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_missing_file_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grip.toml");
        let path_str = path.to_str().unwrap().to_string();

        let config = GripConfig::new(&Some(path_str)).unwrap();
        assert_eq!(config.rdap_url, DEFAULT_RDAP_URL);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .starts_with("### grip configuration file"));
    }

    #[test]
    fn test_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "rdap_url = \"http://localhost:8080/ip/{}\"\nrequest_timeout_secs = 3\n",
        )
        .unwrap();

        let config = GripConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.rdap_url, "http://localhost:8080/ip/{}");
        assert_eq!(config.geoip_url, DEFAULT_GEOIP_URL);
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn test_invalid_values() {
        let map = HashMap::from([("rdap_url".to_string(), "http://no-placeholder".to_string())]);
        assert!(GripConfig::from_map(&map).is_err());

        let map = HashMap::from([("request_timeout_secs".to_string(), "soon".to_string())]);
        assert!(GripConfig::from_map(&map).is_err());
    }

    #[test]
    fn test_summary() {
        let summary = GripConfig::default().summary();
        assert!(summary.contains("rdap.apnic.net"));
        assert!(summary.contains("10 seconds"));
    }
}
