pub mod auth;
pub mod cli;
pub mod config;
pub mod credential;
pub mod credhub;
pub mod http;
pub mod interpolation;
pub mod permission;
pub mod utils;

pub use auth::CredHubAuth;
pub use config::{ClientOptions, SslConfiguration, StoreMaterial};
pub use credential::{CredentialDetails, CredentialName, CredentialType};
pub use credhub::{BlockingCredHub, CredHubTask, CredHubTemplate, CredHubTemplateBuilder};
pub use http::{HttpTransport, TransportBackend};
pub use interpolation::ServicesData;
pub use utils::{errors, paths};
