//! Brand configuration.
//!
//! All brand-related text and URLs are centralised here. Each field can be
//! overridden at startup through a `GNOSIS_BRAND_*` environment variable and
//! is never re-read afterwards.

use std::env;

/// Display strings and URLs identifying the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    /// Display name shown in the sidebar header and window title.
    pub name: String,
    /// Primary external URL for the brand.
    pub url: String,
    /// Documentation URL.
    pub docs_url: String,
    /// Gnosis Center / AgentOS URL.
    pub center_url: String,
    /// Short tagline shown on the welcome screen.
    pub tagline: String,
}

impl Brand {
    /// Reads the brand from the environment, falling back to the built-in
    /// defaults for every variable that is unset.
    pub fn from_env() -> Self {
        Self {
            name: env_or("GNOSIS_BRAND_NAME", "Gnosis"),
            url: env_or("GNOSIS_BRAND_URL", "https://zyniq.studio"),
            docs_url: env_or("GNOSIS_BRAND_DOCS_URL", "https://docs.zyniq.studio/gnosis"),
            center_url: env_or("GNOSIS_BRAND_CENTER_URL", "https://os.zyniq.studio"),
            tagline: env_or(
                "GNOSIS_BRAND_TAGLINE",
                "A terminal chat interface for AI agents.",
            ),
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        // Defaults only; environment intentionally ignored here so tests and
        // rendering code get a stable brand.
        Self {
            name: String::from("Gnosis"),
            url: String::from("https://zyniq.studio"),
            docs_url: String::from("https://docs.zyniq.studio/gnosis"),
            center_url: String::from("https://os.zyniq.studio"),
            tagline: String::from("A terminal chat interface for AI agents."),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
