use crate::core::CredentialSource;

pub const PRIMARY_KEY_VAR: &str = "FOOTBALL_DATA_API_KEY";
pub const FALLBACK_KEY_VAR: &str = "VITE_FOOTBALL_DATA_API_KEY";

/// Reads the API key from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// First non-blank value among the recognised variables, primary first.
    pub fn resolve_with<F>(lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        [PRIMARY_KEY_VAR, FALLBACK_KEY_VAR]
            .into_iter()
            .filter_map(lookup)
            .find(|value| !value.trim().is_empty())
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        Self::resolve_with(|name| std::env::var(name).ok())
    }
}

/// A fixed key, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(api_key: Option<String>) -> Self {
        Self(api_key)
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.trim().is_empty())
    }
}
