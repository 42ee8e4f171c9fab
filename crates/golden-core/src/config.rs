//! Harness configuration
//!
//! Configuration is an explicit value built once and shared (`Arc`) by the
//! discovery pipeline and every case it creates. It can be loaded from a
//! `golden.toml` file and overlaid with `GOLDEN_*` environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{GoldenError, GoldenResult};

/// Default golden file extension
pub const DEFAULT_EXTENSION: &str = ".golden";

/// Default discovery channel capacity
pub const DEFAULT_CHANNEL_SIZE: usize = 32;

/// Configuration for golden file comparison and discovery
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoldenConfig {
    /// Suffix appended to an input path to name its golden file
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Prefix joined onto every relative directory passed to discovery
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Capacity of the bounded discovery channel
    #[serde(default = "default_channel_size")]
    pub channel_size: usize,

    /// Show more context lines around each diff hunk
    #[serde(default)]
    pub verbose: bool,

    /// Colorize diff reports when the terminal supports it
    #[serde(default = "default_color")]
    pub color: bool,

    /// Overwrite golden files with actual output instead of comparing
    #[serde(default)]
    pub update: bool,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_base_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_channel_size() -> usize {
    DEFAULT_CHANNEL_SIZE
}

fn default_color() -> bool {
    true
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            base_path: default_base_path(),
            channel_size: default_channel_size(),
            verbose: false,
            color: default_color(),
            update: false,
        }
    }
}

impl GoldenConfig {
    /// Create a config rooted at the given base path
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Default::default()
        }
    }

    /// Set the golden file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the base path for directory scans
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the discovery channel capacity
    pub fn with_channel_size(mut self, channel_size: usize) -> Self {
        self.channel_size = channel_size;
        self
    }

    /// Enable verbose diffs
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable colorized reports
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable update mode
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Number of context lines rendered around each changed hunk
    pub fn context_lines(&self) -> usize {
        if self.verbose { 3 } else { 1 }
    }

    /// Golden file path for the given input path
    pub fn golden_path(&self, input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_os_string();
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// Whether `path` names a golden file under this configuration
    pub fn is_golden_path(&self, path: &Path) -> bool {
        path.as_os_str()
            .as_encoded_bytes()
            .ends_with(self.extension.as_bytes())
    }

    /// Input path for a golden file path, or `None` if `golden` does not end
    /// with the extension
    ///
    /// Works on the raw path bytes, so non-UTF-8 names round-trip.
    pub fn input_path(&self, golden: &Path) -> Option<PathBuf> {
        #[cfg(unix)]
        {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;

            let stem = golden
                .as_os_str()
                .as_bytes()
                .strip_suffix(self.extension.as_bytes())?;
            Some(PathBuf::from(OsStr::from_bytes(stem)))
        }
        #[cfg(not(unix))]
        {
            let stem = golden.to_str()?.strip_suffix(self.extension.as_str())?;
            Some(PathBuf::from(stem))
        }
    }

    /// Check invariants that discovery and case construction rely on
    pub fn validate(&self) -> GoldenResult<()> {
        if self.extension.is_empty() {
            return Err(GoldenError::config("extension must not be empty"));
        }
        if self.channel_size == 0 {
            return Err(GoldenError::config("channel_size must be at least 1"));
        }
        Ok(())
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> GoldenResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| GoldenError::config(format!("invalid golden config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> GoldenResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| GoldenError::read(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Defaults overlaid with `GOLDEN_*` environment variables
    pub fn from_env() -> GoldenResult<Self> {
        Self::default().with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` for the `GOLDEN_*` keys
    ///
    /// Recognized keys: `GOLDEN_UPDATE`, `GOLDEN_VERBOSE`, `GOLDEN_COLOR`,
    /// `GOLDEN_EXTENSION`, `GOLDEN_BASE_PATH`, `GOLDEN_CHANNEL_SIZE`.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> GoldenResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("GOLDEN_UPDATE") {
            self.update = parse_flag("GOLDEN_UPDATE", &value)?;
        }

        if let Some(value) = lookup("GOLDEN_VERBOSE") {
            self.verbose = parse_flag("GOLDEN_VERBOSE", &value)?;
        }

        if let Some(value) = lookup("GOLDEN_COLOR") {
            self.color = parse_flag("GOLDEN_COLOR", &value)?;
        }

        if let Some(extension) = lookup("GOLDEN_EXTENSION") {
            self.extension = extension;
        }

        if let Some(base_path) = lookup("GOLDEN_BASE_PATH") {
            self.base_path = PathBuf::from(base_path);
        }

        if let Some(value) = lookup("GOLDEN_CHANNEL_SIZE") {
            self.channel_size = value.trim().parse().map_err(|_| {
                GoldenError::config(format!("invalid GOLDEN_CHANNEL_SIZE value: {}", value))
            })?;
        }

        self.validate()?;
        Ok(self)
    }
}

fn parse_flag(key: &str, value: &str) -> GoldenResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GoldenError::config(format!(
            "invalid {} value: {}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GoldenConfig::default();
        assert_eq!(config.extension, ".golden");
        assert_eq!(config.base_path, PathBuf::from("."));
        assert_eq!(config.channel_size, 32);
        assert!(!config.update);
        assert_eq!(config.context_lines(), 1);
        assert_eq!(config.clone().with_verbose(true).context_lines(), 3);
    }

    #[test]
    fn test_golden_path_appends_extension() {
        let config = GoldenConfig::default();
        assert_eq!(
            config.golden_path(Path::new("fixtures/in.txt")),
            PathBuf::from("fixtures/in.txt.golden")
        );

        let config = config.with_extension(".expected");
        assert_eq!(
            config.golden_path(Path::new("a/b")),
            PathBuf::from("a/b.expected")
        );
        assert!(config.is_golden_path(Path::new("a/b.expected")));
        assert!(!config.is_golden_path(Path::new("a/b.golden")));
    }

    #[test]
    fn test_input_path_strips_extension() {
        let config = GoldenConfig::default();
        assert_eq!(
            config.input_path(Path::new("fixtures/in.txt.golden")),
            Some(PathBuf::from("fixtures/in.txt"))
        );
        assert_eq!(config.input_path(Path::new("fixtures/in.txt")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_input_path_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let config = GoldenConfig::default();
        let golden = Path::new(OsStr::from_bytes(b"dir/\xff.txt.golden"));
        let input = config.input_path(golden).unwrap();

        assert_eq!(input.as_os_str().as_bytes(), b"dir/\xff.txt");
        assert!(config.is_golden_path(golden));
        assert_eq!(config.golden_path(&input), golden);
    }

    #[test]
    fn test_env_overlay() {
        let config = GoldenConfig::default()
            .with_env_lookup(lookup_from(&[
                ("GOLDEN_UPDATE", "1"),
                ("GOLDEN_VERBOSE", "true"),
                ("GOLDEN_EXTENSION", ".out"),
                ("GOLDEN_CHANNEL_SIZE", "4"),
                ("GOLDEN_BASE_PATH", "testdata"),
            ]))
            .unwrap();

        assert!(config.update);
        assert!(config.verbose);
        assert_eq!(config.extension, ".out");
        assert_eq!(config.channel_size, 4);
        assert_eq!(config.base_path, PathBuf::from("testdata"));
    }

    #[test]
    fn test_env_overlay_rejects_bad_values() {
        let err = GoldenConfig::default()
            .with_env_lookup(lookup_from(&[("GOLDEN_UPDATE", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("GOLDEN_UPDATE"));

        let err = GoldenConfig::default()
            .with_env_lookup(lookup_from(&[("GOLDEN_CHANNEL_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(err, GoldenError::Config(_)));
    }

    #[test]
    fn test_from_toml_str() {
        let config = GoldenConfig::from_toml_str(
            r#"
extension = ".snap"
channel_size = 8
verbose = true
"#,
        )
        .unwrap();

        assert_eq!(config.extension, ".snap");
        assert_eq!(config.channel_size, 8);
        assert!(config.verbose);
        assert!(config.color);
        assert_eq!(config.base_path, PathBuf::from("."));
    }

    #[test]
    fn test_from_toml_str_rejects_empty_extension() {
        assert!(GoldenConfig::from_toml_str("extension = \"\"").is_err());
        assert!(GoldenConfig::from_toml_str("unknown = 1").is_err());
    }
}
