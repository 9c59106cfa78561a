//! Configuration file formats
//!
//! Two flavors, both plain text:
//!
//! - a `key=value` properties file (comment lines begin with `#`) driving
//!   the single-deployment report generator;
//! - a comma-delimited line-per-deployment file
//!   (`name,host,port,user,password`) driving the comparison report.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// Pulls host and port out of a `navigator_url` value like
/// `http://localhost:7187`.
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://([^:/]+):([0-9]+)/*").expect("valid regex"));

// ============================================================================
// Properties config
// ============================================================================

/// A `key=value` properties config.
#[derive(Debug, Clone, Default)]
pub struct PropertiesConfig {
    values: HashMap<String, String>,
}

impl PropertiesConfig {
    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    /// Parse from config text. Blank lines and `#` comments are skipped;
    /// everything after the first `=` is the value.
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { values }
    }

    /// A required key; missing keys are configuration errors
    pub fn get(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::missing_key(key))
    }

    /// An optional key
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Host and port from the `navigator_url` key
    pub fn navigator_endpoint(&self) -> Result<(String, u16)> {
        let url = self.get("navigator_url")?;
        let captures = URL_PATTERN
            .captures(url)
            .ok_or_else(|| Error::InvalidConfigValue {
                key: "navigator_url".to_string(),
                message: format!("'{url}' is not a http(s)://host:port URL"),
            })?;
        let host = captures[1].to_string();
        let port = captures[2]
            .parse::<u16>()
            .map_err(|e| Error::InvalidConfigValue {
                key: "navigator_url".to_string(),
                message: e.to_string(),
            })?;
        Ok((host, port))
    }
}

// ============================================================================
// Deployments config
// ============================================================================

/// One catalog deployment to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Deployment name used in report column headers
    pub name: String,
    /// Hostname
    pub host: String,
    /// Port
    pub port: u16,
    /// Basic auth user name
    pub username: String,
    /// Basic auth password
    pub password: String,
}

/// Load a comma-delimited line-per-deployment config from a file
pub fn load_deployments(path: &Path) -> Result<Vec<Deployment>> {
    parse_deployments(&std::fs::read_to_string(path)?)
}

/// Parse a comma-delimited line-per-deployment config:
/// `name,host,port,user,password`, one deployment per line, `#` comments.
pub fn parse_deployments(content: &str) -> Result<Vec<Deployment>> {
    let mut deployments = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [name, host, port, username, password] = fields.as_slice() else {
            return Err(Error::InvalidConfigValue {
                key: "deployment".to_string(),
                message: format!("expected 'name,host,port,user,password', got '{line}'"),
            });
        };
        let port = port.parse::<u16>().map_err(|e| Error::InvalidConfigValue {
            key: "port".to_string(),
            message: format!("'{port}': {e}"),
        })?;

        deployments.push(Deployment {
            name: (*name).to_string(),
            host: (*host).to_string(),
            port,
            username: (*username).to_string(),
            password: (*password).to_string(),
        });
    }
    Ok(deployments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_properties_parse() {
        let config = PropertiesConfig::parse(
            "# This is the URL of the client application\n\
             application_url=http://localhost\n\
             navigator_url=http://localhost:7187\n\
             username=user\n\
             password=password\n\
             output_directory=/tmp/foo\n\
             client_name=foo\n",
        );

        assert_eq!(config.get("username").unwrap(), "user");
        assert_eq!(config.get("output_directory").unwrap(), "/tmp/foo");
        assert_eq!(config.get_opt("principal"), None);
        assert!(matches!(
            config.get("principal"),
            Err(Error::MissingConfigKey { .. })
        ));
    }

    #[test]
    fn test_properties_value_may_contain_equals() {
        let config = PropertiesConfig::parse("operation_execution_query=sourceType:HIVE AND x=1\n");
        assert_eq!(
            config.get("operation_execution_query").unwrap(),
            "sourceType:HIVE AND x=1"
        );
    }

    #[test]
    fn test_navigator_endpoint() {
        let config = PropertiesConfig::parse("navigator_url=http://nav.example.com:7187\n");
        assert_eq!(
            config.navigator_endpoint().unwrap(),
            ("nav.example.com".to_string(), 7187)
        );

        let config = PropertiesConfig::parse("navigator_url=not-a-url\n");
        assert!(config.navigator_endpoint().is_err());
    }

    #[test]
    fn test_parse_deployments() {
        let deployments = parse_deployments(
            "# comparison targets\n\
             customer1,foo.example.com,1234,user,password\n\
             customer2,bar.example.com,1234,user2,password2\n",
        )
        .unwrap();

        assert_eq!(deployments.len(), 2);
        assert_eq!(
            deployments[0],
            Deployment {
                name: "customer1".to_string(),
                host: "foo.example.com".to_string(),
                port: 1234,
                username: "user".to_string(),
                password: "password".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_deployments_rejects_short_lines() {
        assert!(parse_deployments("justname,host\n").is_err());
    }

    #[test]
    fn test_parse_deployments_rejects_bad_port() {
        assert!(parse_deployments("c1,host,notaport,u,p\n").is_err());
    }
}
