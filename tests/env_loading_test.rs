use custom_script_config::{ConfigError, parse_env};

// Kept as the only test in this binary: `set_var` must not race with other
// threads reading the environment, and each integration file runs in its own process.
#[test]
fn test_parse_env() {
    let unset = "CUSTOM_SCRIPT_CONFIG_TEST_UNSET";
    let err = parse_env(unset).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnv(ref var) if var == unset));
    assert_eq!(err.to_string(), "missing env var: CUSTOM_SCRIPT_CONFIG_TEST_UNSET");

    let var = "CUSTOM_SCRIPT_CONFIG_TEST_PARSE_ENV";
    let json = r#"{"repositoryDetails":{"url":"https://example.com/run.sh"},
        "hostsDetails":[{"ip":"10.0.0.5","connectionMethod":"SSH"}]}"#;
    // SAFETY: this is the only test in the binary, so no other thread touches the environment.
    unsafe { std::env::set_var(var, json) };

    let conf = parse_env(var).unwrap();
    assert_eq!(conf.host_conf().ip(), "10.0.0.5");
    assert_eq!(conf.host_conf().connection_method(), "ssh");

    // SAFETY: as above.
    unsafe { std::env::set_var(var, r#"{"repositoryDetails":{"url":"u"}}"#) };
    let err = parse_env(var).unwrap_err();
    assert_eq!(err.message(), Some(r#"Missing/Empty "hostsDetails" node."#));
}
