use super::types::CredentialType;
use super::value::{
    CertificateCredential, CredentialValue, PasswordCredential, RsaCredential, SshCredential,
    UserCredential,
};
use crate::utils::errors::{CredHubError, Result};
use serde::{Serialize, Serializer};

/// Parameters the server uses to generate a credential value
pub trait GenerationParameters: Serialize + Send + Sync {
    /// Value type returned once the credential has been generated
    type Value: CredentialValue;

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn credential_type() -> CredentialType {
        Self::Value::credential_type()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLength {
    Length2048,
    Length3072,
    Length4096,
}

impl KeyLength {
    pub fn bits(&self) -> u32 {
        match self {
            KeyLength::Length2048 => 2048,
            KeyLength::Length3072 => 3072,
            KeyLength::Length4096 => 4096,
        }
    }

    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            2048 => Ok(KeyLength::Length2048),
            3072 => Ok(KeyLength::Length3072),
            4096 => Ok(KeyLength::Length4096),
            other => Err(CredHubError::InvalidInput(format!(
                "Unsupported key length {other}, expected 2048, 3072 or 4096"
            ))),
        }
    }
}

impl Serialize for KeyLength {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasswordParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_upper: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_lower: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_special: Option<bool>,
}

impl PasswordParameters {
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn exclude_upper(mut self) -> Self {
        self.exclude_upper = Some(true);
        self
    }

    pub fn exclude_lower(mut self) -> Self {
        self.exclude_lower = Some(true);
        self
    }

    pub fn exclude_number(mut self) -> Self {
        self.exclude_number = Some(true);
        self
    }

    pub fn include_special(mut self) -> Self {
        self.include_special = Some(true);
        self
    }
}

impl GenerationParameters for PasswordParameters {
    type Value = PasswordCredential;

    fn validate(&self) -> Result<()> {
        if let Some(length) = self.length {
            if !(4..=200).contains(&length) {
                return Err(CredHubError::InvalidInput(format!(
                    "Password length must be between 4 and 200, got {length}"
                )));
            }
        }
        let all_excluded = self.exclude_upper == Some(true)
            && self.exclude_lower == Some(true)
            && self.exclude_number == Some(true)
            && self.include_special != Some(true);
        if all_excluded {
            return Err(CredHubError::InvalidInput(
                "Password parameters exclude every character class".to_string(),
            ));
        }
        Ok(())
    }
}

/// Password parameters for a generated `user` credential. The username
/// travels in the request's `value` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserParameters(pub PasswordParameters);

impl GenerationParameters for UserParameters {
    type Value = UserCredential;

    fn validate(&self) -> Result<()> {
        self.0.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyUsage {
    DigitalSignature,
    NonRepudiation,
    KeyEncipherment,
    DataEncipherment,
    KeyAgreement,
    KeyCertSign,
    CrlSign,
    EncipherOnly,
    DecipherOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedKeyUsage {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    Timestamping,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<KeyLength>,
    /// Validity in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_usage: Vec<KeyUsage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extended_key_usage: Vec<ExtendedKeyUsage>,
    /// Name of the CA credential that signs this certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_sign: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,
}

impl GenerationParameters for CertificateParameters {
    type Value = CertificateCredential;

    fn validate(&self) -> Result<()> {
        let has_subject = self.common_name.is_some()
            || self.organization.is_some()
            || self.organization_unit.is_some()
            || self.locality.is_some()
            || self.state.is_some()
            || self.country.is_some()
            || !self.alternative_names.is_empty();
        if !has_subject {
            return Err(CredHubError::InvalidInput(
                "Certificate parameters need a common name, another subject field, or alternative names"
                    .to_string(),
            ));
        }

        let signers = [
            self.ca.is_some(),
            self.self_sign == Some(true),
            self.is_ca == Some(true),
        ];
        if !signers.iter().any(|s| *s) {
            return Err(CredHubError::InvalidInput(
                "Certificate parameters need a signing CA, self_sign, or is_ca".to_string(),
            ));
        }
        if self.ca.is_some() && self.self_sign == Some(true) {
            return Err(CredHubError::InvalidInput(
                "A certificate cannot be both self-signed and signed by a CA".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RsaParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<KeyLength>,
}

impl GenerationParameters for RsaParameters {
    type Value = RsaCredential;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SshParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<KeyLength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_comment: Option<String>,
}

impl GenerationParameters for SshParameters {
    type Value = SshCredential;
}
