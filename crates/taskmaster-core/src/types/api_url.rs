//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the remote API, e.g. `https://api.example.com/v1`.
///
/// HTTPS is required, except for loopback and private-network hosts where
/// plain HTTP is accepted (development servers on a LAN).
///
/// # Example
///
/// ```
/// use taskmaster_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(api.endpoint("auth/login"), "https://api.example.com/v1/auth/login");
///
/// let lan = ApiUrl::new("http://192.168.1.150:5000/api").unwrap();
/// assert_eq!(lan.endpoint("/projects"), "http://192.168.1.150:5000/api/projects");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: drop trailing slashes from the base path
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path relative to this base.
    pub fn endpoint(&self, path: &str) -> String {
        // Root paths keep a trailing slash in the url crate
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true when requests to this base travel over TLS.
    pub fn is_secure(&self) -> bool {
        self.0.scheme() == "https"
    }

    fn validate(url: &Url, input: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::ApiUrl {
                value: input.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let Some(host) = url.host() else {
            return Err(invalid("must have a host"));
        };

        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment"));
        }

        match url.scheme() {
            "https" => Ok(()),
            "http" if is_local_host(&host) => Ok(()),
            "http" => Err(invalid(
                "must use HTTPS (HTTP allowed only for loopback and private hosts)",
            )),
            _ => Err(invalid("scheme must be http or https")),
        }
    }
}

fn is_local_host(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(name) => *name == "localhost" || name.ends_with(".local"),
        Host::Ipv4(ip) => ip.is_loopback() || ip.is_private() || ip.is_link_local(),
        Host::Ipv6(ip) => ip.is_loopback(),
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
