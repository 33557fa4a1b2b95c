use std::fmt;
use std::process::Command;
use tracing::{debug, info, warn};

/// GitHub API token. The secret is kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token, returning `None` for blank input
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Source of the GitHub token
pub trait CredentialProvider: Send + Sync {
    fn name(&self) -> &str;

    fn token(&self) -> Option<Credential>;
}

/// Runs a credential helper command and uses its trimmed stdout,
/// e.g. `gh auth token`
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace-separated command line; `None` when it is blank
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn gh_cli() -> Self {
        Self::new("gh", vec!["auth".to_string(), "token".to_string()])
    }
}

impl CredentialProvider for CommandProvider {
    fn name(&self) -> &str {
        &self.program
    }

    fn token(&self) -> Option<Credential> {
        let output = match Command::new(&self.program).args(&self.args).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(helper = %self.program, "Could not run credential helper: {}", e);
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                helper = %self.program,
                status = ?output.status,
                "Credential helper failed. Ensure you are logged in (gh auth login)."
            );
            return None;
        }

        Credential::new(String::from_utf8_lossy(&output.stdout))
    }
}

/// Reads the token from an environment variable
pub struct EnvProvider {
    var: String,
}

impl EnvProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvProvider {
    fn name(&self) -> &str {
        &self.var
    }

    fn token(&self) -> Option<Credential> {
        std::env::var(&self.var).ok().and_then(Credential::new)
    }
}

/// Fixed token, mostly for embedding and tests
pub struct StaticProvider(Option<Credential>);

impl StaticProvider {
    pub fn new(token: Option<&str>) -> Self {
        Self(token.and_then(Credential::new))
    }
}

impl CredentialProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn token(&self) -> Option<Credential> {
        self.0.clone()
    }
}

/// Tries each provider in order; the first token found wins
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Resolve the token once. Meant to be called at startup.
    pub fn resolve(&self) -> Option<Credential> {
        for provider in &self.providers {
            debug!(provider = provider.name(), "Looking up GitHub token");
            if let Some(credential) = provider.token() {
                info!(provider = provider.name(), "GitHub token retrieved successfully");
                return Some(credential);
            }
        }

        warn!("No GitHub token found. GitHub API calls will fail.");
        None
    }

    /// `resolve` on the blocking pool, since helpers are external processes
    pub async fn resolve_blocking(self) -> Option<Credential> {
        match tokio::task::spawn_blocking(move || self.resolve()).await {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Credential lookup task failed: {}", e);
                None
            }
        }
    }
}

impl CredentialProvider for ProviderChain {
    fn name(&self) -> &str {
        "chain"
    }

    fn token(&self) -> Option<Credential> {
        self.resolve()
    }
}
