use crate::auth::CredHubAuth;
use crate::cli::args::*;
use crate::cli::completions::handle_completion_command;
use crate::config::{ClientOptions, ConfigFile, SslConfiguration, StoreMaterial};
use crate::credential::{
    CredentialDetails, CredentialName, CredentialRequest, CredentialSummary, JsonCredential,
    KeyLength, ParametersRequest, PasswordParameters, RsaParameters, SshParameters,
};
use crate::credhub::{CredHubTemplate, HealthStatus};
use crate::http::TransportBackend;
use crate::interpolation::ServicesData;
use crate::utils::errors::{CredHubError, Result};
use crate::utils::output::{OutputFormat, OutputMode};
use crate::utils::paths::CredHubPaths;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Read};
use std::time::Duration;

pub async fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "credhub_rs=warn",  // Default: warnings only
            1 => "credhub_rs=info",  // -v: info level
            2 => "credhub_rs=debug", // -vv: debug level
            _ => "credhub_rs=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    let output = OutputFormat::new(cli.raw, cli.output);

    if let Commands::Completion { ref command } = cli.command {
        return handle_completion_command(command);
    }

    let config = ConfigFile::load_default(cli.config.as_deref())?;
    let template = build_template(&cli, &config)?;

    match cli.command {
        Commands::Get { name, versions } => handle_get(&template, &name, versions, &output).await,
        Commands::GetId { id } => {
            let details: CredentialDetails<Value> = template.credentials().get_by_id(&id).await?;
            print_details(&details, &output)
        }
        Commands::Set {
            name,
            credential_type,
            value,
        } => handle_set(&template, &name, credential_type, value, &output).await,
        Commands::Generate {
            name,
            credential_type,
            length,
        } => handle_generate(&template, &name, credential_type, length, &output).await,
        Commands::Regenerate { name } => {
            let name = CredentialName::new(&name)?;
            let details: CredentialDetails<Value> =
                template.credentials().regenerate(&name).await?;
            print_details(&details, &output)
        }
        Commands::Delete { name } => {
            let name = CredentialName::new(&name)?;
            template.credentials().delete_by_name(&name).await?;
            if !cli.quiet {
                eprintln!("Credential {name} deleted");
            }
            Ok(())
        }
        Commands::Find { name_like, path } => {
            handle_find(&template, name_like, path, &output).await
        }
        Commands::Interpolate { file, local } => {
            handle_interpolate(&template, &file, local, &output).await
        }
        Commands::Info => handle_info(&template, &output).await,
        Commands::Completion { .. } => Ok(()),
    }
}

/// Merge flags, environment and config file into a ready template
fn build_template(cli: &Cli, config: &ConfigFile) -> Result<CredHubTemplate> {
    let server = cli
        .server
        .clone()
        .or_else(|| config.server.clone())
        .ok_or_else(|| {
            CredHubError::Config(
                "No CredHub server configured: use --server or CREDHUB_SERVER".to_string(),
            )
        })?;

    let mut options = ClientOptions::default();
    if let Some(secs) = cli.connect_timeout.or(config.connect_timeout_secs) {
        options = options.with_connection_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.read_timeout.or(config.read_timeout_secs) {
        options = options.with_read_timeout(Duration::from_secs(secs));
    }

    let mut ssl = SslConfiguration::unconfigured();
    if let Some(ca_cert) = cli.ca_cert.as_deref().or(config.ca_cert.as_deref()) {
        ssl = ssl.with_trust_store(StoreMaterial::file(CredHubPaths::expand_home(ca_cert)?));
    }
    if let Some(key_store) = cli.key_store.as_deref().or(config.key_store.as_deref()) {
        ssl = ssl.with_key_store(StoreMaterial::file(CredHubPaths::expand_home(key_store)?));
    }
    if let Some(password) = &cli.key_password {
        ssl = ssl.with_key_password(password.clone());
    }

    let auth = resolve_auth(cli, config)?;
    tracing::debug!("Using CredHub server {server}");

    CredHubTemplate::builder(&server)
        .options(options)
        .ssl(ssl)
        .auth(auth)
        .backend(TransportBackend::Reqwest)
        .build()
}

fn resolve_auth(cli: &Cli, config: &ConfigFile) -> Result<CredHubAuth> {
    if let Some(token) = &cli.token {
        return Ok(CredHubAuth::bearer(token.clone()));
    }

    let client_name = cli.client_name.as_ref().or(config.client_name.as_ref());
    match client_name {
        Some(client_name) => {
            let secret = match &cli.client_secret {
                Some(secret) => secret.clone(),
                None => rpassword::prompt_password(format!("Client secret for {client_name}: "))
                    .map_err(|e| CredHubError::Auth(format!("Failed to read client secret: {e}")))?,
            };
            Ok(CredHubAuth::client_credentials(client_name.clone(), secret))
        }
        None => Ok(CredHubAuth::MutualTls),
    }
}

async fn handle_get(
    template: &CredHubTemplate,
    name: &str,
    versions: Option<u32>,
    output: &OutputFormat,
) -> Result<()> {
    let name = CredentialName::new(name)?;

    match versions {
        None => {
            let details: CredentialDetails<Value> = template.credentials().get_by_name(&name).await?;
            print_details(&details, output)
        }
        Some(versions) => {
            let history: Vec<CredentialDetails<Value>> = template
                .credentials()
                .get_by_name_with_history(&name, Some(versions))
                .await?;
            if output.is_structured() {
                return output.print_document(&history);
            }

            let mut table_data = vec![vec![
                "id".to_string(),
                "created".to_string(),
                "value".to_string(),
            ]];
            for details in &history {
                table_data.push(vec![
                    details.id.clone(),
                    created_at(details),
                    display_value(&details.value),
                ]);
            }
            output.print_table(&table_data);
            Ok(())
        }
    }
}

async fn handle_set(
    template: &CredHubTemplate,
    name: &str,
    credential_type: SetType,
    value: String,
    output: &OutputFormat,
) -> Result<()> {
    let name = CredentialName::new(name)?;
    let credentials = template.credentials();

    match credential_type {
        SetType::Value => {
            let details = credentials.write(&CredentialRequest::value(name, value)).await?;
            print_details(&details, output)
        }
        SetType::Password => {
            let details = credentials
                .write(&CredentialRequest::password(name, value))
                .await?;
            print_details(&details, output)
        }
        SetType::Json => {
            let parsed: Value = serde_json::from_str(&value).map_err(|e| {
                CredHubError::InvalidInput(format!("Value is not valid JSON: {e}"))
            })?;
            let json = JsonCredential::from_value(parsed)?;
            let details = credentials.write(&CredentialRequest::json(name, json)).await?;
            print_details(&details, output)
        }
    }
}

async fn handle_generate(
    template: &CredHubTemplate,
    name: &str,
    credential_type: GenerateType,
    length: Option<u32>,
    output: &OutputFormat,
) -> Result<()> {
    let name = CredentialName::new(name)?;
    let credentials = template.credentials();

    match credential_type {
        GenerateType::Password => {
            let mut parameters = PasswordParameters::default();
            if let Some(length) = length {
                parameters = parameters.with_length(length);
            }
            let details = credentials
                .generate(&ParametersRequest::new(name, parameters))
                .await?;
            print_details(&details, output)
        }
        GenerateType::Rsa => {
            let parameters = RsaParameters {
                key_length: length.map(KeyLength::from_bits).transpose()?,
            };
            let details = credentials
                .generate(&ParametersRequest::new(name, parameters))
                .await?;
            print_details(&details, output)
        }
        GenerateType::Ssh => {
            let parameters = SshParameters {
                key_length: length.map(KeyLength::from_bits).transpose()?,
                ssh_comment: None,
            };
            let details = credentials
                .generate(&ParametersRequest::new(name, parameters))
                .await?;
            print_details(&details, output)
        }
    }
}

async fn handle_find(
    template: &CredHubTemplate,
    name_like: Option<String>,
    path: Option<String>,
    output: &OutputFormat,
) -> Result<()> {
    let credentials = template.credentials();

    let found: Vec<CredentialSummary> = match (name_like, path) {
        (Some(name_like), _) => credentials.find_by_name(&name_like).await?,
        (None, Some(path)) => credentials.find_by_path(&path).await?,
        (None, None) => {
            let paths = credentials.get_all_paths().await?;
            if output.is_structured() {
                return output.print_document(&paths);
            }
            let paths: Vec<&str> = paths.iter().map(|p| p.path.as_str()).collect();
            output.print_list(&paths);
            return Ok(());
        }
    };

    if output.is_structured() {
        return output.print_document(&found);
    }

    let table_data: Vec<Vec<String>> = found
        .iter()
        .map(|summary| {
            vec![
                summary.name.to_string(),
                summary
                    .version_created_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    output.print_table(&table_data);
    Ok(())
}

async fn handle_interpolate(
    template: &CredHubTemplate,
    file: &str,
    local: bool,
    output: &OutputFormat,
) -> Result<()> {
    let content = if file == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(CredHubPaths::expand_home(file)?)?
    };

    let services = ServicesData::from_json_str(&content)?;
    let interpolation = template.interpolation();
    let resolved = if local {
        interpolation.resolve_service_data(&services).await?
    } else {
        interpolation.interpolate_service_data(&services).await?
    };

    // Interpolated documents are JSON unless YAML was asked for
    match output.mode {
        OutputMode::Yaml => output.print_document(&resolved),
        _ => {
            println!("{}", resolved.to_json_string()?);
            Ok(())
        }
    }
}

async fn handle_info(template: &CredHubTemplate, output: &OutputFormat) -> Result<()> {
    let info_ops = template.info();
    let info = info_ops.info().await?;
    let health = health_summary(info_ops.health().await);

    if output.is_structured() {
        #[derive(Serialize)]
        struct InfoReport<'a> {
            server: &'a str,
            #[serde(flatten)]
            info: &'a crate::credhub::ServerInfo,
            health: &'a str,
        }
        return output.print_document(&InfoReport {
            server: template.base_url().as_str(),
            info: &info,
            health: &health,
        });
    }

    let mut pairs = vec![
        ("Server".to_string(), template.base_url().to_string()),
        ("Application".to_string(), info.app.name.clone()),
        ("Auth server".to_string(), info.auth_server.url.clone()),
    ];
    if let Some(version) = &info.app.version {
        pairs.push(("Version".to_string(), version.clone()));
    }
    pairs.push(("Health".to_string(), health));
    output.print_key_value(&pairs);
    Ok(())
}

fn health_summary(health: Result<HealthStatus>) -> String {
    match health {
        Ok(health) => health.status,
        Err(e) => {
            tracing::warn!("Health check failed: {e}");
            format!("unavailable: {e}")
        }
    }
}

fn print_details<T: Serialize>(details: &CredentialDetails<T>, output: &OutputFormat) -> Result<()> {
    if output.is_structured() {
        return output.print_document(details);
    }

    let value = serde_json::to_value(&details.value)?;
    let pairs = vec![
        ("id".to_string(), details.id.clone()),
        ("name".to_string(), details.name.to_string()),
        ("type".to_string(), details.credential_type.to_string()),
        ("created".to_string(), created_at(details)),
        ("value".to_string(), display_value(&value)),
    ];
    output.print_key_value(&pairs);
    Ok(())
}

fn created_at<T>(details: &CredentialDetails<T>) -> String {
    details
        .version_created_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

/// Strings print bare, structured values as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
