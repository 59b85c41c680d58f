use crate::utils::errors::Result;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// PEM material supplied either inline or from a file
#[derive(Clone)]
pub enum StoreMaterial {
    File(PathBuf),
    Pem(Vec<u8>),
}

impl StoreMaterial {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StoreMaterial::File(path.into())
    }

    pub fn pem(bytes: impl Into<Vec<u8>>) -> Self {
        StoreMaterial::Pem(bytes.into())
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            StoreMaterial::File(path) => {
                tracing::debug!("Reading TLS material from {}", path.display());
                Ok(fs::read(path)?)
            }
            StoreMaterial::Pem(bytes) => Ok(bytes.clone()),
        }
    }
}

impl fmt::Debug for StoreMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreMaterial::File(path) => f.debug_tuple("File").field(path).finish(),
            StoreMaterial::Pem(bytes) => write!(f, "Pem({} bytes)", bytes.len()),
        }
    }
}

/// TLS trust and identity material.
///
/// With neither store configured the transport uses the system roots and
/// presents no client certificate.
#[derive(Clone, Default)]
pub struct SslConfiguration {
    trust_store: Option<StoreMaterial>,
    key_store: Option<StoreMaterial>,
    key_password: Option<String>,
}

impl SslConfiguration {
    /// System defaults only
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn with_trust_store(mut self, material: StoreMaterial) -> Self {
        self.trust_store = Some(material);
        self
    }

    pub fn with_key_store(mut self, material: StoreMaterial) -> Self {
        self.key_store = Some(material);
        self
    }

    pub fn with_key_password(mut self, password: impl Into<String>) -> Self {
        self.key_password = Some(password.into());
        self
    }

    pub fn trust_store(&self) -> Option<&StoreMaterial> {
        self.trust_store.as_ref()
    }

    pub fn key_store(&self) -> Option<&StoreMaterial> {
        self.key_store.as_ref()
    }

    pub fn key_password(&self) -> Option<&str> {
        self.key_password.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.trust_store.is_some() || self.key_store.is_some()
    }
}

impl fmt::Debug for SslConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslConfiguration")
            .field("trust_store", &self.trust_store)
            .field("key_store", &self.key_store)
            .field("key_password", &self.key_password.as_ref().map(|_| "***"))
            .finish()
    }
}
