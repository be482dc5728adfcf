mod models;
mod nodes;

use serde_json::Value;
use std::{collections::HashMap, fs, path::Path};
use tracing::{debug, trace};

pub use models::{HostDetails, RepositoryDetails, ScriptConfiguration}; // Re-export the model types to callers.
use nodes::{Node, ParameterNode};

// ---- Public API (serde hidden from callers) ----

/// Parse and validate a script configuration document.
///
/// Checks run in a fixed order and the first violation is returned:
/// repository node, repository url, host list presence, host count, then the
/// host's `ip` and `connectionMethod`. Nodes are read only when their check
/// runs, so a bad value further down never hides an earlier violation.
/// Optional fields default to an empty string and the connection method is
/// lower-cased.
///
/// # Example
/// ```ignore
/// let conf = configuration::parse(&json)?;
/// println!("{}", conf.host_conf().connection_method());
/// ```
pub fn parse(json: &str) -> Result<ScriptConfiguration, ConfigError> {
    let document: Value = serde_json::from_str(json)?;
    let root = Node::new(&document);

    let repository = root
        .child("repositoryDetails")
        .ok_or_else(|| invalid(r#"Missing "repositoryDetails" node."#))?;
    let url = required(repository.text("url")?, r#"Missing/Empty "repositoryDetails.url" node."#)?;

    let hosts = root
        .child("hostsDetails")
        .and_then(|node| node.items())
        .filter(|items| !items.is_empty())
        .ok_or_else(|| invalid(r#"Missing/Empty "hostsDetails" node."#))?;
    if hosts.len() != 1 {
        return Err(invalid(r#"Node "hostsDetails" must contain only one item."#));
    }
    let host = Node::new(&hosts[0]);

    let ip = required(host.text("ip")?, r#"Missing/Empty "hostsDetails[0].ip" node."#)?;
    let connection_method = required(
        host.text("connectionMethod")?,
        r#"Missing/Empty "hostsDetails[0].connectionMethod" node."#,
    )?
    .to_lowercase();

    // Optional nodes are read only once every required check has passed.
    let parameters = match host.child("parameters") {
        Some(node) => collect_parameters(node.decode()?)?,
        None => HashMap::new(),
    };

    let conf = ScriptConfiguration {
        script_repo: RepositoryDetails {
            url,
            username: repository.text("username")?.unwrap_or_default(),
            password: repository.text("password")?.unwrap_or_default(),
        },
        host_conf: HostDetails {
            ip,
            connection_method,
            username: host.text("username")?.unwrap_or_default(),
            password: host.text("password")?.unwrap_or_default(),
            access_key: host.text("accessKey")?.unwrap_or_default(),
            parameters,
        },
    };

    debug!(
        ip = conf.host_conf.ip(),
        connection_method = conf.host_conf.connection_method(),
        parameters = conf.host_conf.parameters().len(),
        "parsed script configuration"
    );

    Ok(conf)
}

/// Parse a script configuration stored in a JSON file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ScriptConfiguration, ConfigError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading script configuration");
    let data = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse(&data)
}

/// Parse a script configuration passed through an env var containing JSON.
pub fn parse_env(var: &str) -> Result<ScriptConfiguration, ConfigError> {
    let data = std::env::var(var).map_err(|_| ConfigError::MissingEnv(var.to_string()))?;
    parse(&data)
}

// Later entries win on duplicate names. An empty name is a valid key.
fn collect_parameters(nodes: Vec<ParameterNode>) -> Result<HashMap<String, String>, ConfigError> {
    let mut parameters = HashMap::with_capacity(nodes.len());

    for (index, node) in nodes.into_iter().enumerate() {
        let Some(name) = node.name else {
            return Err(invalid(format!(
                r#"Missing "hostsDetails[0].parameters[{index}].name" node."#
            )));
        };
        trace!(%name, "collected script parameter");
        parameters.insert(name, node.value.unwrap_or_default());
    }

    Ok(parameters)
}

fn required(value: Option<String>, message: &str) -> Result<String, ConfigError> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| invalid(message))
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The document is well-formed JSON but violates the configuration rules.
    #[error("{0}")]
    Validation(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing env var: {0}")]
    MissingEnv(String),
}

impl ConfigError {
    /// The validation message, if this is a validation failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            ConfigError::Validation(message) => Some(message),
            _ => None,
        }
    }
}
