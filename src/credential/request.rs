use super::name::CredentialName;
use super::parameters::{GenerationParameters, UserParameters};
use super::types::{CredentialType, WriteMode};
use super::value::{
    CredentialValue, JsonCredential, PasswordCredential, UserCredential, ValueCredential,
};
use serde::Serialize;
use serde_json::json;

/// Body of `PUT /api/v1/data`
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRequest<T: CredentialValue> {
    pub name: CredentialName,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<WriteMode>,
}

impl<T: CredentialValue> CredentialRequest<T> {
    pub fn new(name: CredentialName, value: T) -> Self {
        Self {
            name,
            credential_type: T::credential_type(),
            value,
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl CredentialRequest<JsonCredential> {
    pub fn json(name: CredentialName, value: JsonCredential) -> Self {
        Self::new(name, value)
    }
}

impl CredentialRequest<ValueCredential> {
    pub fn value(name: CredentialName, value: impl Into<String>) -> Self {
        Self::new(name, ValueCredential(value.into()))
    }
}

impl CredentialRequest<PasswordCredential> {
    pub fn password(name: CredentialName, password: impl Into<String>) -> Self {
        Self::new(name, PasswordCredential(password.into()))
    }
}

impl CredentialRequest<UserCredential> {
    pub fn user(name: CredentialName, value: UserCredential) -> Self {
        Self::new(name, value)
    }
}

/// Body of `POST /api/v1/data`
#[derive(Debug, Clone, Serialize)]
pub struct ParametersRequest<P: GenerationParameters> {
    pub name: CredentialName,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub parameters: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<WriteMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl<P: GenerationParameters> ParametersRequest<P> {
    pub fn new(name: CredentialName, parameters: P) -> Self {
        Self {
            name,
            credential_type: P::credential_type(),
            parameters,
            mode: None,
            value: None,
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl ParametersRequest<UserParameters> {
    /// Generate a password for a fixed username
    pub fn user(name: CredentialName, username: &str, parameters: UserParameters) -> Self {
        let mut request = Self::new(name, parameters);
        request.value = Some(json!({ "username": username }));
        request
    }
}
