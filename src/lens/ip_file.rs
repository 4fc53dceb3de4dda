//! IP address extraction from text files
//!
//! Any dotted-quad token is taken as a candidate address. Octet ranges are not
//! checked here; the lookup services reject what is not a real address.

use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::error::Result;

const DOTTED_QUAD: &str = r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b";

/// Lens reading candidate IPv4 addresses from text
pub struct IpFileLens {
    pattern: Regex,
}

impl IpFileLens {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(DOTTED_QUAD)?,
        })
    }

    /// Every dotted-quad token in `text`, in order of appearance
    pub fn extract_ips(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Read `path` and extract its dotted-quad tokens
    pub fn read_ips(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ips = self.extract_ips(&text);
        info!("found {} candidate IPs in {}", ips.len(), path.display());
        Ok(ips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GripError;
    use std::io::Write;

    #[test]
    fn test_extract_ips_in_order() {
        let lens = IpFileLens::new().unwrap();
        let text = "srv 10.0.0.1 -> 8.8.8.8\nbad 999.1.2.3, dup 10.0.0.1\nv1.2.3 ignored";
        assert_eq!(
            lens.extract_ips(text),
            vec!["10.0.0.1", "8.8.8.8", "999.1.2.3", "10.0.0.1"]
        );
    }

    #[test]
    fn test_extract_ips_none() {
        let lens = IpFileLens::new().unwrap();
        assert!(lens.extract_ips("no addresses here, only 1.2.3").is_empty());
        assert!(lens.extract_ips("").is_empty());
    }

    #[test]
    fn test_read_ips_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first 1.1.1.1").unwrap();
        writeln!(file, "second 203.0.113.9 third 192.168.0.1").unwrap();

        let lens = IpFileLens::new().unwrap();
        assert_eq!(
            lens.read_ips(file.path()).unwrap(),
            vec!["1.1.1.1", "203.0.113.9", "192.168.0.1"]
        );
    }

    #[test]
    fn test_read_ips_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let lens = IpFileLens::new().unwrap();
        let err = lens.read_ips(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GripError::Io(_)));
    }
}
