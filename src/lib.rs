pub mod configuration;

pub use configuration::{
    ConfigError, HostDetails, RepositoryDetails, ScriptConfiguration, parse, parse_env, parse_file,
};
