//! Service-binding documents (`VCAP_SERVICES` shape) and the `((name))`
//! credential references they may carry.
//!
//! A document maps each service offering to its bound instances. Only an
//! instance's `credentials` field is ever rewritten; every other field and
//! the key order of the document are preserved.

use crate::credential::CredentialName;
use crate::utils::errors::{CredHubError, Result};
use ordermap::OrderMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const CREDENTIALS_KEY: &str = "credentials";
pub const REFERENCE_KEY: &str = "credhub-ref";

/// One bound service instance: label, name, plan, tags, credentials, ...
pub type ServiceInstance = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicesData(OrderMap<String, Vec<ServiceInstance>>);

impl ServicesData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            CredHubError::InvalidInput(format!("Invalid service binding document: {e}"))
        })
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn insert(&mut self, offering: impl Into<String>, instances: Vec<ServiceInstance>) {
        self.0.insert(offering.into(), instances);
    }

    pub fn offerings(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn instances(&self, offering: &str) -> Option<&[ServiceInstance]> {
        self.0.get(offering).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Credential names referenced by the document, deduplicated, in
    /// document order
    pub fn references(&self) -> Result<Vec<CredentialName>> {
        let mut names: Vec<CredentialName> = Vec::new();
        for instance in self.0.values().flatten() {
            if let Some(raw) = instance.get(CREDENTIALS_KEY).and_then(reference_in) {
                let name = CredentialName::new(raw)?;
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    pub fn has_references(&self) -> bool {
        self.0
            .values()
            .flatten()
            .any(|instance| instance.get(CREDENTIALS_KEY).and_then(reference_in).is_some())
    }

    /// Copy of the document with each reference replaced by its value
    pub fn resolved(&self, values: &HashMap<CredentialName, Value>) -> Result<Self> {
        let mut resolved = self.clone();
        for instance in resolved.0.values_mut().flatten() {
            let Some(raw) = instance.get(CREDENTIALS_KEY).and_then(reference_in) else {
                continue;
            };
            let name = CredentialName::new(raw)?;
            let value = values.get(&name).ok_or_else(|| {
                CredHubError::InvalidInput(format!("No value supplied for reference {name}"))
            })?;
            instance.insert(CREDENTIALS_KEY.to_string(), value.clone());
        }
        Ok(resolved)
    }
}

/// Referenced name inside a `credentials` value, either the bare string
/// `"((name))"` or `{"credhub-ref": "((name))"}`
pub fn reference_in(credentials: &Value) -> Option<&str> {
    match credentials {
        Value::String(s) => parse_reference(s),
        Value::Object(map) if map.len() == 1 => map
            .get(REFERENCE_KEY)
            .and_then(Value::as_str)
            .and_then(parse_reference),
        _ => None,
    }
}

/// `((name))` -> `name`
pub fn parse_reference(s: &str) -> Option<&str> {
    let inner = s.trim().strip_prefix("((")?.strip_suffix("))")?.trim();
    if inner.is_empty() || inner.contains("((") || inner.contains("))") {
        return None;
    }
    Some(inner)
}
