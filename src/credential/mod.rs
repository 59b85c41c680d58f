pub mod certificate;
pub mod details;
pub mod name;
pub mod parameters;
pub mod request;
pub mod types;
pub mod value;

pub use certificate::{CertificateSummary, CertificateVersion};
pub use details::{CredentialDetails, CredentialPath, CredentialSummary};
pub use name::CredentialName;
pub use parameters::{
    CertificateParameters, ExtendedKeyUsage, GenerationParameters, KeyLength, KeyUsage,
    PasswordParameters, RsaParameters, SshParameters, UserParameters,
};
pub use request::{CredentialRequest, ParametersRequest};
pub use types::{CredentialType, WriteMode};
pub use value::{
    CertificateCredential, CredentialValue, JsonCredential, PasswordCredential, RsaCredential,
    SshCredential, UserCredential, ValueCredential,
};
