//! Configuration management for docview.
//!
//! Parses `docview.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. CLI settings can
//! be applied during load via [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docview.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override graphviz rendering flag.
    pub graphviz: Option<bool>,
}

/// Configuration load failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerSection,
    /// Documentation source configuration (paths are raw strings from TOML).
    docs: DocsSectionRaw,
    /// Diagram rendering configuration.
    pub diagrams: DiagramsSection,
    /// Site presentation configuration.
    pub site: SiteSection,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsSection,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            docs: DocsSectionRaw::default(),
            diagrams: DiagramsSection::default(),
            site: SiteSection::default(),
            docs_resolved: DocsSection::default(),
            config_path: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsSectionRaw {
    source_dir: Option<String>,
    default_page: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct DocsSection {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Path the site root redirects to.
    pub default_page: String,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            default_page: "/docs/".to_owned(),
        }
    }
}

/// Diagram rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsSection {
    /// Render `dot`/`graphviz` fences server-side.
    pub graphviz: bool,
}

impl Default for DiagramsSection {
    fn default() -> Self {
        Self { graphviz: true }
    }
}

/// Site presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site title, used as the fallback page title.
    pub title: String,
    /// Custom page template path (relative to the config file).
    pub template: Option<PathBuf>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            template: None,
        }
    }
}

impl Config {
    /// Load configuration, discovering `docview.toml` by walking up from
    /// `start_dir`, then applying CLI overrides.
    ///
    /// A missing config file is not an error; defaults apply. Relative
    /// paths in the file resolve against the config file's directory;
    /// relative CLI paths resolve against `start_dir`.
    pub fn load(start_dir: &Path, cli: &CliSettings) -> Result<Self, ConfigError> {
        let mut config = match discover(start_dir) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.resolve(start_dir);
        config.apply_cli(cli, start_dir);
        Ok(config)
    }

    /// Load an explicit configuration file, skipping discovery, then
    /// apply CLI overrides. Relative CLI paths resolve against
    /// `start_dir`.
    pub fn load_file(
        path: &Path,
        start_dir: &Path,
        cli: &CliSettings,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.resolve(start_dir);
        config.apply_cli(cli, start_dir);
        Ok(config)
    }

    /// Parse a specific configuration file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve raw values into `docs_resolved`, anchoring relative paths
    /// at the config file's directory (or `start_dir` without a file).
    fn resolve(&mut self, start_dir: &Path) {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(start_dir);

        let source_dir = self.docs.source_dir.as_deref().unwrap_or("docs");
        let resolved = DocsSection {
            source_dir: base.join(source_dir),
            default_page: self
                .docs
                .default_page
                .clone()
                .unwrap_or_else(|| DocsSection::default().default_page),
        };

        let template = self.site.template.take().map(|template| {
            if template.is_relative() {
                base.join(template)
            } else {
                template
            }
        });

        self.docs_resolved = resolved;
        self.site.template = template;
    }

    /// Apply CLI overrides on top of the loaded configuration.
    fn apply_cli(&mut self, cli: &CliSettings, start_dir: &Path) {
        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &cli.source_dir {
            self.docs_resolved.source_dir = if source_dir.is_relative() {
                start_dir.join(source_dir)
            } else {
                source_dir.clone()
            };
        }
        if let Some(graphviz) = cli.graphviz {
            self.diagrams.graphviz = graphviz;
        }
    }
}

/// Find the nearest `docview.toml`, walking up from `start_dir`.
fn discover(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}
