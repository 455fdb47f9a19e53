use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub grid: GridConfig,
    pub picker: PickerConfig,
    pub messages: MessagesConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Minimum width of columns without an explicit width
    pub default_min_width: u32,
    pub invalid_cell_class: String,
    pub required_cell_class: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_min_width: 100,
            invalid_cell_class: "cell--invalid".to_string(),
            required_cell_class: "cell--required".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PickerConfig {
    /// Used when a search service declares no threshold of its own
    pub default_min_search_length: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_min_search_length: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MessagesConfig {
    pub conversion_error: String,
    pub required_error: String,
    pub delete_confirmation: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            conversion_error: "Некорректное значение".to_string(),
            required_error: "Поле обязательно для заполнения".to_string(),
            delete_confirmation: "Удалить выбранный элемент?".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[grid]
default_min_width = 100
invalid_cell_class = "cell--invalid"
required_cell_class = "cell--required"

[picker]
default_min_search_length = 3

[messages]
conversion_error = "Некорректное значение"
required_error = "Поле обязательно для заполнения"
delete_confirmation = "Удалить выбранный элемент?"
"#;

static DEFAULT: Lazy<EngineConfig> = Lazy::new(|| match toml::from_str(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        tracing::warn!("Embedded config is invalid, using built-in defaults: {}", e);
        EngineConfig::default()
    }
});

/// Process-wide default configuration
pub fn default_config() -> &'static EngineConfig {
    &DEFAULT
}

/// Load configuration from a TOML file
///
/// Search order:
/// 1. Explicit path, if given (must exist)
/// 2. binding.toml next to the executable
/// 3. Embedded default config
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    if let Some(path) = path {
        tracing::info!("Loading config from: {}", path.display());
        return parse_file(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("binding.toml");
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return parse_file(&config_path);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(default_config().clone())
}

fn parse_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&contents)?;
    Ok(config)
}
