use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Swagger UI release used when no explicit bundle or theme is configured.
pub const DEFAULT_UI_VERSION: &str = "5.10.5";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Load(String),
    /// The YAML was malformed or did not match the expected shape.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for the generated document and the documentation page.
///
/// Usually built in code:
///
/// ```
/// use routedoc_openapi::SwaggerConfig;
///
/// let config = SwaggerConfig::new("My API", "1.0.0").with_description("Things and stuff");
/// assert!(!config.ui.disabled);
/// ```
///
/// or read from YAML with [`SwaggerConfig::from_yaml_str`] /
/// [`SwaggerConfig::load`]:
///
/// ```yaml
/// info:
///   title: My API
///   version: 1.0.0
/// ui:
///   autoDarkMode: false
///   theme:
///     light: https://cdn.example.com/light.css
///     dark: https://cdn.example.com/dark.css
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerConfig {
    pub info: InfoConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl SwaggerConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            info: InfoConfig {
                title: title.to_string(),
                version: version.to_string(),
                description: None,
            },
            ui: UiConfig::default(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.info.description = Some(desc.to_string());
        self
    }

    pub fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    /// Parse a configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Load(e.to_string()))?;
        Self::from_yaml_str(&content)
    }
}

/// The document's `info` block, copied into every generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoConfig {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stylesheet for the documentation page: one URL, or one per color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    Single(String),
    Split { light: String, dark: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    /// Inject a color-inverting stylesheet for dark mode. Only applies with a
    /// single-URL theme.
    pub auto_dark_mode: bool,
    pub bundle: Option<String>,
    pub theme: Option<Theme>,
    pub version: String,
    /// When set, `/swagger` is not served. `/swagger.json` always is.
    pub disabled: bool,
    /// Extra options passed to `SwaggerUIBundle`, merged over the defaults.
    pub swagger_options: Option<Value>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            auto_dark_mode: true,
            bundle: None,
            theme: None,
            version: DEFAULT_UI_VERSION.to_string(),
            disabled: false,
            swagger_options: None,
        }
    }
}

impl UiConfig {
    pub fn with_auto_dark_mode(mut self, enabled: bool) -> Self {
        self.auto_dark_mode = enabled;
        self
    }

    pub fn with_bundle(mut self, url: &str) -> Self {
        self.bundle = Some(url.to_string());
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_swagger_options(mut self, options: Value) -> Self {
        self.swagger_options = Some(options);
        self
    }

    /// The configured bundle URL, or the unpkg build for `version`. An empty
    /// URL counts as unset.
    pub fn bundle_url(&self) -> String {
        match self.bundle.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("https://unpkg.com/swagger-ui-dist@{}/swagger-ui-bundle.js", self.version),
        }
    }

    /// The configured theme, or the unpkg stylesheet for `version`. An empty
    /// single URL counts as unset.
    pub fn resolved_theme(&self) -> Theme {
        match &self.theme {
            Some(Theme::Single(url)) if url.is_empty() => self.default_theme(),
            Some(theme) => theme.clone(),
            None => self.default_theme(),
        }
    }

    fn default_theme(&self) -> Theme {
        Theme::Single(format!("https://unpkg.com/swagger-ui-dist@{}/swagger-ui.css", self.version))
    }
}
