use std::collections::HashMap;
use url::Url;

/// A validated script execution configuration: where the script lives and
/// which single host it runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptConfiguration {
    pub(crate) script_repo: RepositoryDetails,
    pub(crate) host_conf: HostDetails,
}

impl ScriptConfiguration {
    pub fn script_repo(&self) -> &RepositoryDetails {
        &self.script_repo
    }

    pub fn host_conf(&self) -> &HostDetails {
        &self.host_conf
    }
}

/// Source-control location of the script and the credentials to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDetails {
    pub(crate) url: String,
    pub(crate) username: String,
    pub(crate) password: String,
}

impl RepositoryDetails {
    /// Always non-empty.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Name of the script file the URL points at, taken from the last
    /// non-empty path segment. Query and fragment are ignored.
    ///
    /// Text that is not an absolute URL (e.g. a bare relative path) is split
    /// on `/` as is.
    pub fn script_file_name(&self) -> Option<String> {
        let path = match Url::parse(&self.url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => self.url.split(['?', '#']).next().unwrap_or_default().to_string(),
        };

        path.rsplit('/').find(|s| !s.is_empty()).map(str::to_string)
    }
}

/// Target machine the script is executed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDetails {
    pub(crate) ip: String,
    pub(crate) connection_method: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) access_key: String,
    pub(crate) parameters: HashMap<String, String>,
}

impl HostDetails {
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Lower-cased, so callers can match it without caring about case.
    pub fn connection_method(&self) -> &str {
        &self.connection_method
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(url: &str) -> RepositoryDetails {
        RepositoryDetails {
            url: url.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }

    #[test]
    fn script_file_name_uses_last_path_segment() {
        let repo = repo("https://raw.example.com/org/scripts/master/install.sh");
        assert_eq!(repo.script_file_name().as_deref(), Some("install.sh"));
    }

    #[test]
    fn script_file_name_ignores_query_and_trailing_slash() {
        assert_eq!(
            repo("https://example.com/dl/setup.ps1?token=abc#top").script_file_name().as_deref(),
            Some("setup.ps1")
        );
        assert_eq!(repo("https://example.com/dl/scripts/").script_file_name().as_deref(), Some("scripts"));
    }

    #[test]
    fn script_file_name_falls_back_for_relative_paths() {
        assert_eq!(repo("scripts/run.sh?x=1").script_file_name().as_deref(), Some("run.sh"));
        assert_eq!(repo("deploy.sh").script_file_name().as_deref(), Some("deploy.sh"));
    }

    #[test]
    fn script_file_name_is_none_without_a_path() {
        assert_eq!(repo("https://example.com").script_file_name(), None);
        assert_eq!(repo("https://example.com/").script_file_name(), None);
    }

    #[test]
    fn parameter_lookup_borrows_value() {
        let host = HostDetails {
            ip: "10.0.0.1".to_string(),
            connection_method: "ssh".to_string(),
            username: String::new(),
            password: String::new(),
            access_key: String::new(),
            parameters: HashMap::from([("TARGET".to_string(), "prod".to_string())]),
        };

        assert_eq!(host.parameter("TARGET"), Some("prod"));
        assert_eq!(host.parameter("target"), None);
    }
}
