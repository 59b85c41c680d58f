use crate::utils::errors::{CredHubError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fully-qualified credential name, always stored with a leading `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialName {
    name: String,
}

impl CredentialName {
    /// Parse a full credential name such as `/team/app/db-password`
    pub fn new(name: &str) -> Result<Self> {
        let trimmed = name.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(CredHubError::InvalidInput(
                "Credential name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name: format!("/{trimmed}"),
        })
    }

    /// Join path segments, e.g. `["spring-credhub", "integration-test", "db"]`
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().trim_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(&joined)
    }

    /// Name of a credential owned by a service binding:
    /// `/c/<broker>/<offering>/<binding id>/<name>`
    pub fn service_instance(
        service_broker_name: &str,
        service_offering_name: &str,
        service_binding_id: &str,
        credential_name: &str,
    ) -> Result<Self> {
        let parts = [
            service_broker_name,
            service_offering_name,
            service_binding_id,
            credential_name,
        ];
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(CredHubError::InvalidInput(
                "Service instance credential names require broker, offering, binding id and name"
                    .to_string(),
            ));
        }
        Self::from_segments(std::iter::once("c").chain(parts))
    }

    /// The full name including the leading `/`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last path segment
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for CredentialName {
    type Err = CredHubError;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Serialize for CredentialName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for CredentialName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CredentialName::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_normalization() {
        let name = CredentialName::new("team/app/password").unwrap();
        assert_eq!(name.name(), "/team/app/password");

        let name = CredentialName::new("/team/app/password/").unwrap();
        assert_eq!(name.name(), "/team/app/password");
        assert_eq!(name.short_name(), "password");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(CredentialName::new("").is_err());
        assert!(CredentialName::new(" / ").is_err());
    }

    #[test]
    fn test_from_segments() {
        let name = CredentialName::from_segments([
            "spring-credhub",
            "integration-test",
            "interpolation-credential",
        ])
        .unwrap();
        assert_eq!(
            name.name(),
            "/spring-credhub/integration-test/interpolation-credential"
        );
    }

    #[test]
    fn test_service_instance_name() {
        let name = CredentialName::service_instance(
            "broker",
            "offering",
            "7a1c2d3e-binding",
            "db-credentials",
        )
        .unwrap();
        assert_eq!(name.name(), "/c/broker/offering/7a1c2d3e-binding/db-credentials");

        assert!(CredentialName::service_instance("broker", "", "id", "name").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let name = CredentialName::new("/a/b").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"/a/b\"");

        let parsed: CredentialName = serde_json::from_str("\"a/b\"").unwrap();
        assert_eq!(parsed, name);
    }
}
