//! Locale-prefix routing decisions for the website's middleware.
//!
//! Purely syntactic: no headers, cookies or `Accept-Language` are consulted.

use crate::error::{Result, ToolError};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Routing configuration: supported locales, fallback locale and never-rewritten prefixes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleConfig {
    pub locales: Vec<String>,
    pub default_locale: String,
    /// Framework assets and API routes
    pub reserved_prefixes: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "ar".to_string()],
            default_locale: "en".to_string(),
            reserved_prefixes: vec!["/_next".to_string(), "/api".to_string()],
        }
    }
}

impl LocaleConfig {
    /// Create a configuration with the default reserved prefixes
    pub fn new<I, S>(locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            default_locale: default_locale.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file such as
    /// `{"locales": ["en", "ar"], "defaultLocale": "en"}`
    ///
    /// Missing fields fall back to [`LocaleConfig::default`]. Not validated: callers
    /// apply their overrides first, then call [`LocaleConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| ToolError::InvalidLocaleConfig(format!("{}: {}", path.display(), e)))
    }

    /// Replace the locale list and default locale when given
    ///
    /// An empty `locales` keeps the current list.
    pub fn with_overrides(mut self, locales: Vec<String>, default_locale: Option<String>) -> Self {
        if !locales.is_empty() {
            self.locales = locales;
        }
        if let Some(default_locale) = default_locale {
            self.default_locale = default_locale;
        }
        self
    }

    /// Reject configurations that cannot produce a sensible redirect
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            return Err(ToolError::InvalidLocaleConfig(
                "at least one locale is required".to_string(),
            ));
        }
        if let Some(bad) = self
            .locales
            .iter()
            .find(|loc| loc.is_empty() || loc.contains('/'))
        {
            return Err(ToolError::InvalidLocaleConfig(format!(
                "locale code {:?} is not a single path segment",
                bad
            )));
        }
        // An empty prefix would match every path and turn routing off
        if let Some(bad) = self
            .reserved_prefixes
            .iter()
            .find(|prefix| !prefix.starts_with('/'))
        {
            return Err(ToolError::InvalidLocaleConfig(format!(
                "reserved prefix {:?} must start with '/'",
                bad
            )));
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ToolError::InvalidLocaleConfig(format!(
                "default locale {:?} is not one of {:?}",
                self.default_locale, self.locales
            )));
        }
        Ok(())
    }
}

/// What the middleware should do with a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Serve the path as is
    Pass,
    /// Redirect to the given locale-prefixed path
    RedirectTo(String),
}

impl fmt::Display for RedirectDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectDecision::Pass => write!(f, "pass"),
            RedirectDecision::RedirectTo(path) => write!(f, "redirect {}", path),
        }
    }
}

/// Decide whether a request path needs a locale prefix
///
/// - reserved prefixes and anything containing a `.` (static files) pass untouched
/// - `/<loc>` and `/<loc>/...` pass when `<loc>` is a configured locale (exact match)
/// - everything else redirects under the default locale, `/` becoming `/<default>`
///
/// Never fails: empty or odd paths simply get redirected.
///
/// # Examples
/// ```
/// use taps_tools::locale::{decide, LocaleConfig, RedirectDecision};
///
/// let config = LocaleConfig::default();
/// assert_eq!(decide("/ar/services", &config), RedirectDecision::Pass);
/// assert_eq!(
///     decide("/services", &config),
///     RedirectDecision::RedirectTo("/en/services".to_string())
/// );
/// ```
pub fn decide(path: &str, config: &LocaleConfig) -> RedirectDecision {
    if is_excluded(path, config) || has_locale_prefix(path, &config.locales) {
        return RedirectDecision::Pass;
    }

    if path == "/" {
        RedirectDecision::RedirectTo(format!("/{}", config.default_locale))
    } else {
        RedirectDecision::RedirectTo(format!("/{}{}", config.default_locale, path))
    }
}

/// Paths the middleware never rewrites
fn is_excluded(path: &str, config: &LocaleConfig) -> bool {
    path.contains('.')
        || config
            .reserved_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
}

/// Check if the first path segment is exactly one of the locales
fn has_locale_prefix(path: &str, locales: &[String]) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    let first_segment = rest.split('/').next().unwrap_or_default();
    locales.iter().any(|loc| loc == first_segment)
}
