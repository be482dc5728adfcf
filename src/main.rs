use anyhow::{Context, Result};
use clap::Parser;
use std::{
    io::{self, Read},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, FmtSubscriber};

use custom_script_config::{self as config, ScriptConfiguration};

/// Validate a script execution configuration and print what it resolves to.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON document to validate (reads stdin when neither FILE nor --env is given)
    #[arg(value_name = "FILE", conflicts_with = "env")]
    file: Option<PathBuf>,

    /// Read the JSON document from this environment variable
    #[arg(long, value_name = "VAR")]
    env: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn init_tracing(default_level: &str) -> Result<()> {
    // RUST_LOG=custom_script_config=trace takes precedence over --log-level
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;
    Ok(())
}

fn load(cli: &Cli) -> Result<ScriptConfiguration> {
    if let Some(path) = &cli.file {
        return config::parse_file(path).with_context(|| format!("load configuration from '{}'", path.display()));
    }

    if let Some(var) = &cli.env {
        return config::parse_env(var).with_context(|| format!("load configuration from env var '{var}'"));
    }

    let mut json = String::new();
    io::stdin().read_to_string(&mut json).context("read configuration from stdin")?;
    config::parse(&json).context("load configuration from stdin")
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "<set>" }
}

/// Render the validated configuration; secrets are never printed.
fn print_configuration(conf: &ScriptConfiguration) {
    let repo = conf.script_repo();
    let host = conf.host_conf();

    println!("=== Repository ===");
    println!("  url:       {}", repo.url());
    println!("  script:    {}", repo.script_file_name().as_deref().unwrap_or("<none>"));
    println!("  username:  {}", repo.username());
    println!("  password:  {}", mask(repo.password()));

    println!("=== Host ===");
    println!("  ip:         {}", host.ip());
    println!("  connection: {}", host.connection_method());
    println!("  username:   {}", host.username());
    println!("  password:   {}", mask(host.password()));
    println!("  access key: {}", mask(host.access_key()));

    let mut parameters: Vec<_> = host.parameters().iter().collect();
    parameters.sort();
    println!("  parameters: {}", parameters.len());
    for (name, value) in parameters {
        println!("    {name} = {value}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let conf = load(&cli)?;
    info!(ip = conf.host_conf().ip(), "configuration is valid");

    print_configuration(&conf);
    Ok(())
}
