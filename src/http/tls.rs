//! Conversion of PEM trust and key stores into the roots and client identity
//! handed to the HTTP backend.
//!
//! Any problem with the material is a configuration error raised while the
//! transport is being built, never during a request.

use crate::config::SslConfiguration;
use crate::utils::errors::{CredHubError, Result};
use pkcs8::{EncryptedPrivateKeyInfo, PrivateKeyInfo};
use reqwest::{Certificate, Identity};
use x509_parser::prelude::*;

const TAG_CERTIFICATE: &str = "CERTIFICATE";
const TAG_ENCRYPTED_KEY: &str = "ENCRYPTED PRIVATE KEY";
const PLAIN_KEY_TAGS: [&str; 3] = ["PRIVATE KEY", "RSA PRIVATE KEY", "EC PRIVATE KEY"];

/// Loaded TLS material ready to be bound into a client
pub struct TlsMaterial {
    pub roots: Vec<Certificate>,
    pub identity: Option<Identity>,
}

/// Load trust and key material; `None` when neither store is configured
pub fn load(ssl: &SslConfiguration) -> Result<Option<TlsMaterial>> {
    if ssl.key_password().is_some() && ssl.key_store().is_none() {
        return Err(CredHubError::Config(
            "A key password was configured without a key store".to_string(),
        ));
    }
    if !ssl.is_configured() {
        return Ok(None);
    }

    let roots = match ssl.trust_store() {
        Some(material) => {
            let bytes = material
                .read()
                .map_err(|e| CredHubError::Config(format!("Failed to read trust store: {e}")))?;
            load_trust_store(&bytes)?
        }
        None => Vec::new(),
    };

    let identity = match ssl.key_store() {
        Some(material) => {
            let bytes = material
                .read()
                .map_err(|e| CredHubError::Config(format!("Failed to read key store: {e}")))?;
            Some(load_key_store(&bytes, ssl.key_password())?)
        }
        None => None,
    };

    Ok(Some(TlsMaterial { roots, identity }))
}

/// Every certificate in the trust store becomes a trust anchor, self-signed
/// ones included.
pub fn load_trust_store(bytes: &[u8]) -> Result<Vec<Certificate>> {
    let blocks = pem::parse_many(bytes)
        .map_err(|e| CredHubError::Config(format!("Invalid PEM in trust store: {e}")))?;

    let mut roots = Vec::new();
    for block in blocks.iter().filter(|b| b.tag() == TAG_CERTIFICATE) {
        inspect_certificate(block.contents(), "trust store")?;
        let root = Certificate::from_der(block.contents()).map_err(|e| {
            CredHubError::Config(format!("Unusable certificate in trust store: {e}"))
        })?;
        roots.push(root);
    }

    if roots.is_empty() {
        return Err(CredHubError::Config(
            "Trust store contains no certificates".to_string(),
        ));
    }

    tracing::debug!("Loaded {} trusted certificate(s)", roots.len());
    Ok(roots)
}

/// Build the client identity from a certificate chain and one private key
pub fn load_key_store(bytes: &[u8], key_password: Option<&str>) -> Result<Identity> {
    let blocks = pem::parse_many(bytes)
        .map_err(|e| CredHubError::Config(format!("Invalid PEM in key store: {e}")))?;

    let mut chain = Vec::new();
    let mut key = None;

    for block in blocks {
        let tag = block.tag().to_string();
        if tag == TAG_CERTIFICATE {
            inspect_certificate(block.contents(), "key store")?;
            chain.push(block);
        } else if tag == TAG_ENCRYPTED_KEY {
            let decrypted = decrypt_private_key(block.contents(), key_password)?;
            set_key(&mut key, decrypted)?;
        } else if PLAIN_KEY_TAGS.contains(&tag.as_str()) {
            if key_password.is_some() {
                return Err(CredHubError::Config(
                    "A key password was configured but the key store private key is not encrypted"
                        .to_string(),
                ));
            }
            set_key(&mut key, block)?;
        } else {
            tracing::debug!("Ignoring PEM block '{tag}' in key store");
        }
    }

    if chain.is_empty() {
        return Err(CredHubError::Config(
            "Key store contains no certificate".to_string(),
        ));
    }
    let key = key.ok_or_else(|| {
        CredHubError::Config("Key store contains no private key".to_string())
    })?;

    let mut identity_pem = pem::encode(&key);
    for cert in &chain {
        identity_pem.push_str(&pem::encode(cert));
    }

    Identity::from_pem(identity_pem.as_bytes())
        .map_err(|e| CredHubError::Config(format!("Invalid client identity: {e}")))
}

fn set_key(slot: &mut Option<pem::Pem>, key: pem::Pem) -> Result<()> {
    if slot.is_some() {
        return Err(CredHubError::Config(
            "Key store contains more than one private key".to_string(),
        ));
    }
    *slot = Some(key);
    Ok(())
}

fn decrypt_private_key(der: &[u8], key_password: Option<&str>) -> Result<pem::Pem> {
    let password = key_password.ok_or_else(|| {
        CredHubError::Config(
            "Key store holds an encrypted private key but no key password was configured"
                .to_string(),
        )
    })?;

    let encrypted = EncryptedPrivateKeyInfo::try_from(der)
        .map_err(|e| CredHubError::Config(format!("Malformed encrypted private key: {e}")))?;

    let document = encrypted.decrypt(password).map_err(|e| {
        CredHubError::Config(format!("Failed to decrypt private key with key password: {e}"))
    })?;

    // A wrong password can still yield valid padding; the plaintext must parse.
    PrivateKeyInfo::try_from(document.as_bytes()).map_err(|_| {
        CredHubError::Config("Failed to decrypt private key with key password".to_string())
    })?;

    Ok(pem::Pem::new("PRIVATE KEY", document.as_bytes().to_vec()))
}

fn inspect_certificate(der: &[u8], store: &str) -> Result<()> {
    let (_, cert) = parse_x509_certificate(der)
        .map_err(|e| CredHubError::Config(format!("Invalid certificate in {store}: {e}")))?;

    let subject = cert.subject().to_string();
    let validity = cert.validity();
    if !validity.is_valid() {
        tracing::warn!(
            "Certificate '{subject}' in {store} is outside its validity period (not after {})",
            validity.not_after
        );
    } else {
        tracing::debug!(
            "Loaded certificate '{subject}' from {store}, valid until {}",
            validity.not_after
        );
    }
    Ok(())
}
