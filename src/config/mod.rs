pub mod file;
pub mod options;
pub mod ssl;

pub use file::ConfigFile;
pub use options::ClientOptions;
pub use ssl::{SslConfiguration, StoreMaterial};
