use crate::utils::output::OutputMode;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "credhub-rs")]
#[command(version = "1.0.0")]
#[command(about = "A CredHub client for reading, writing and generating credentials")]
#[command(long_about = None)]
pub struct Cli {
    /// CredHub server URL
    #[arg(long, env = "CREDHUB_SERVER")]
    pub server: Option<String>,

    /// UAA client id for the client-credentials grant
    #[arg(long, env = "CREDHUB_CLIENT")]
    pub client_name: Option<String>,

    /// UAA client secret (prompted for when a client name is given without one)
    #[arg(long, env = "CREDHUB_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Pre-issued bearer token
    #[arg(long, env = "CREDHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// PEM file with the CA certificates to trust
    #[arg(long, env = "CREDHUB_CA_CERT", value_hint = clap::ValueHint::FilePath)]
    pub ca_cert: Option<String>,

    /// PEM file with the client certificate and private key for mutual TLS
    #[arg(long, env = "CREDHUB_KEY_STORE", value_hint = clap::ValueHint::FilePath)]
    pub key_store: Option<String>,

    /// Password for an encrypted key-store private key
    #[arg(long, env = "CREDHUB_KEY_PASSWORD", hide_env_values = true)]
    pub key_password: Option<String>,

    /// Connection timeout in seconds
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds
    #[arg(long)]
    pub read_timeout: Option<u64>,

    /// Config file path (default: ~/.config/credhub-rs/config.yaml)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output raw tab-separated values (no formatting)
    #[arg(short, long)]
    pub raw: bool,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputMode::Table)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get the current value of a credential by name
    Get {
        /// Credential name
        #[arg(long, short = 'n')]
        name: String,
        /// Number of versions to show, newest first
        #[arg(long)]
        versions: Option<u32>,
    },
    /// Get a specific credential version by id
    GetId {
        /// Credential version id
        #[arg(long)]
        id: String,
    },
    /// Set a credential to a caller-supplied value
    Set {
        /// Credential name
        #[arg(long, short = 'n')]
        name: String,
        /// Credential type
        #[arg(long = "type", short = 't')]
        credential_type: SetType,
        /// Credential value (JSON object for --type json)
        #[arg(long, short = 'v')]
        value: String,
    },
    /// Generate a credential on the server
    Generate {
        /// Credential name
        #[arg(long, short = 'n')]
        name: String,
        /// Credential type
        #[arg(long = "type", short = 't')]
        credential_type: GenerateType,
        /// Password length, or key length in bits for rsa/ssh
        #[arg(long, short = 'l')]
        length: Option<u32>,
    },
    /// Regenerate a credential with its original generation parameters
    Regenerate {
        /// Credential name
        #[arg(long, short = 'n')]
        name: String,
    },
    /// Delete every version of a credential
    Delete {
        /// Credential name
        #[arg(long, short = 'n')]
        name: String,
    },
    /// Find credentials by partial name or path
    Find {
        /// Substring of the credential name
        #[arg(long, conflicts_with = "path")]
        name_like: Option<String>,
        /// Path prefix
        #[arg(long)]
        path: Option<String>,
    },
    /// Interpolate credhub-ref entries in a VCAP_SERVICES style JSON file
    Interpolate {
        /// JSON file path ("-" for stdin)
        #[arg(long, short = 'f', value_hint = clap::ValueHint::FilePath)]
        file: String,
        /// Resolve references by reading each credential instead of using the server endpoint
        #[arg(long)]
        local: bool,
    },
    /// Show server information and health
    Info,
    /// Generate shell completion scripts
    Completion {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetType {
    Value,
    Json,
    Password,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerateType {
    Password,
    Rsa,
    Ssh,
}

#[derive(Subcommand)]
pub enum CompletionCommands {
    /// Generate bash completion script
    Bash,
    /// Generate zsh completion script
    Zsh,
    /// Generate fish completion script
    Fish,
    /// Generate PowerShell completion script
    PowerShell,
}

impl CompletionCommands {
    pub fn shell(&self) -> Shell {
        match self {
            CompletionCommands::Bash => Shell::Bash,
            CompletionCommands::Zsh => Shell::Zsh,
            CompletionCommands::Fish => Shell::Fish,
            CompletionCommands::PowerShell => Shell::PowerShell,
        }
    }
}
