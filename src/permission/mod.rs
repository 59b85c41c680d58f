use crate::utils::errors::{CredHubError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Operations an actor may be granted on a credential path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
    Delete,
    ReadAcl,
    WriteAcl,
}

/// Identity that permissions are granted to, e.g. `uaa-client:director`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    identity: String,
}

impl Actor {
    /// A Cloud Foundry application authenticating with instance identity mTLS
    pub fn app(app_guid: &str) -> Self {
        Self {
            identity: format!("mtls-app:{app_guid}"),
        }
    }

    pub fn user(user_guid: &str) -> Self {
        Self {
            identity: format!("uaa-user:{user_guid}"),
        }
    }

    pub fn client(client_id: &str) -> Self {
        Self {
            identity: format!("uaa-client:{client_id}"),
        }
    }

    /// Parse an already-prefixed identity
    pub fn parse(identity: &str) -> Result<Self> {
        match identity.split_once(':') {
            Some((kind, id))
                if !id.is_empty() && ["mtls-app", "uaa-user", "uaa-client"].contains(&kind) =>
            {
                Ok(Self {
                    identity: identity.to_string(),
                })
            }
            _ => Err(CredHubError::InvalidInput(format!(
                "Invalid actor '{identity}', expected mtls-app:, uaa-user: or uaa-client: prefix"
            ))),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}

impl Serialize for Actor {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.identity)
    }
}

impl<'de> Deserialize<'de> for Actor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Actor::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A v2 permission grant. `uuid` is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub path: String,
    pub actor: Actor,
    pub operations: Vec<Operation>,
}

impl Permission {
    pub fn new(path: impl Into<String>, actor: Actor, operations: Vec<Operation>) -> Self {
        Self {
            uuid: None,
            path: path.into(),
            actor,
            operations,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(CredHubError::InvalidInput(
                "Permission path must not be empty".to_string(),
            ));
        }
        if self.operations.is_empty() {
            return Err(CredHubError::InvalidInput(
                "Permission must grant at least one operation".to_string(),
            ));
        }
        Ok(())
    }
}
