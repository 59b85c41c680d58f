pub mod blocking;
pub mod certificates;
pub mod credentials;
pub mod info;
pub mod interpolation;
pub mod permissions;
pub mod task;
pub mod template;

pub use blocking::BlockingCredHub;
pub use certificates::CertificateOperations;
pub use credentials::CredentialOperations;
pub use info::{HealthStatus, InfoOperations, ServerInfo, VersionInfo};
pub use interpolation::InterpolationOperations;
pub use permissions::PermissionOperations;
pub use task::CredHubTask;
pub use template::{CredHubTemplate, CredHubTemplateBuilder};
