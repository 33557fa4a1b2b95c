use dev_dashboard::credentials::{
    CommandProvider, Credential, CredentialProvider, EnvProvider, ProviderChain, StaticProvider,
};

#[test]
fn test_blank_credential_is_rejected() {
    assert!(Credential::new("").is_none());
    assert!(Credential::new("  \n").is_none());
    assert_eq!(Credential::new(" ghp_abc\n").unwrap().secret(), "ghp_abc");
}

#[test]
fn test_credential_debug_hides_secret() {
    let credential = Credential::new("ghp_secret").unwrap();
    let printed = format!("{:?}", credential);
    assert!(!printed.contains("ghp_secret"));
}

#[test]
fn test_static_provider() {
    assert_eq!(
        StaticProvider::new(Some("abc")).token(),
        Credential::new("abc")
    );
    assert!(StaticProvider::new(None).token().is_none());
    assert!(StaticProvider::new(Some("")).token().is_none());
}

#[test]
fn test_env_provider() {
    let var = "DEV_DASHBOARD_TEST_TOKEN_ENV_PROVIDER";
    std::env::set_var(var, "from-env");
    assert_eq!(EnvProvider::new(var).token().unwrap().secret(), "from-env");

    std::env::remove_var(var);
    assert!(EnvProvider::new(var).token().is_none());
}

#[test]
fn test_missing_helper_program_yields_none() {
    let provider = CommandProvider::new("dev-dashboard-no-such-helper", vec![]);
    assert!(provider.token().is_none());
}

#[cfg(unix)]
#[test]
fn test_command_provider_trims_output() {
    let provider = CommandProvider::from_command_line("echo helper-token").unwrap();
    assert_eq!(provider.token().unwrap().secret(), "helper-token");
}

#[cfg(unix)]
#[test]
fn test_failing_helper_yields_none() {
    let provider = CommandProvider::from_command_line("false").unwrap();
    assert!(provider.token().is_none());
}

#[test]
fn test_blank_command_line() {
    assert!(CommandProvider::from_command_line("   ").is_none());
    assert_eq!(CommandProvider::gh_cli().name(), "gh");
}

#[test]
fn test_chain_uses_first_available_token() {
    let chain = ProviderChain::new()
        .with(StaticProvider::new(None))
        .with(StaticProvider::new(Some("second")))
        .with(StaticProvider::new(Some("third")));

    assert_eq!(chain.resolve().unwrap().secret(), "second");
}

#[test]
fn test_chain_falls_back_after_failed_helper() {
    let chain = ProviderChain::new()
        .with(CommandProvider::new("dev-dashboard-no-such-helper", vec![]))
        .with(StaticProvider::new(Some("fallback")));

    assert_eq!(chain.token().unwrap().secret(), "fallback");
}

#[test]
fn test_empty_chain_resolves_to_none() {
    assert!(ProviderChain::new().resolve().is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn test_chain_resolves_helper_on_blocking_pool() {
    let chain = ProviderChain::new()
        .with(CommandProvider::from_command_line("echo pooled-token").unwrap())
        .with(StaticProvider::new(Some("unused")));

    let credential = chain.resolve_blocking().await;
    assert_eq!(credential.unwrap().secret(), "pooled-token");
}

#[tokio::test]
async fn test_empty_chain_resolves_to_none_on_blocking_pool() {
    assert!(ProviderChain::new().resolve_blocking().await.is_none());
}
