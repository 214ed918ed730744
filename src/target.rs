//! Probe target and URL construction.
//!
//! A [`Target`] keeps only the scheme and hostname of the host it was parsed
//! from. An explicit port (and any path or query) is dropped when probe URLs
//! are built, so `http://example.com:8080/app/` probes `http://example.com/<name>`.
//! This mirrors the behaviour existing users depend on and is kept as-is.

use std::fmt;

use url::Url;

use crate::error::{BruteError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    scheme: String,
    hostname: String,
}

impl Target {
    /// Parse a host string such as `https://www.example.com/`.
    pub fn parse(host: &str) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(BruteError::config("host must not be empty"));
        }
        let parsed = Url::parse(host)
            .map_err(|e| BruteError::config(format!("invalid host {host:?}: {e}")))?;
        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(BruteError::config(format!(
                "unsupported scheme {scheme:?} in host {host:?} (expected http or https)"
            )));
        }
        let hostname = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| BruteError::config(format!("host {host:?} has no hostname")))?;
        Self::from_parts(scheme, hostname)
    }

    /// Build a target from an already split scheme and hostname.
    pub fn from_parts(scheme: &str, hostname: &str) -> Result<Self> {
        if scheme.is_empty() {
            return Err(BruteError::config("scheme must not be empty"));
        }
        if hostname.is_empty() {
            return Err(BruteError::config("hostname must not be empty"));
        }
        Ok(Self { scheme: scheme.to_string(), hostname: hostname.to_string() })
    }

    /// Replace the host. On error the current value is left untouched.
    pub fn set_host(&mut self, host: &str) -> Result<()> {
        *self = Self::parse(host)?;
        Ok(())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// `scheme://hostname/candidate`
    pub fn url_for(&self, candidate: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.hostname, candidate)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.hostname)
    }
}
