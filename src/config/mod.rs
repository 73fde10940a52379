use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{NclipError, Result};
use crate::render::DEFAULT_PREVIEW_CHARS;
use crate::session::DEFAULT_APP_NAME;
use crate::{fs as nclip_fs, utils};

pub const CONFIG_FILE_NAME: &str = "nclip.toml";
pub const CACHE_SUBDIR: &str = "nclip";

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub context: AppContext,
    pub mode: ModeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub verbosity: u8,
    pub cache_dir: Utf8PathBuf,
    pub app_name: String,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeConfig {
    /// Run a single invocation taken from the process arguments.
    OneShot(Vec<String>),
    Interactive,
}

// ============================================================================
// Configuration Builder
// ============================================================================

struct ContextBuilder {
    verbosity: u8,
    cache_dir: Option<Utf8PathBuf>,
    app_name: String,
    preview_chars: usize,
}

impl ContextBuilder {
    fn new() -> Self {
        Self {
            verbosity: 0,
            cache_dir: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    fn with_file_config(mut self, file: &FileConfig) -> Result<Self> {
        if let Some(verbose) = file.general.verbose {
            self.verbosity = verbose;
        }
        if let Some(name) = &file.general.app_name {
            self.app_name = name.clone();
        }
        if let Some(dir) = &file.cache.dir {
            let expanded = utils::expand_path(dir).map_err(|err| {
                NclipError::Config(format!("failed to expand cache dir {dir}: {err}"))
            })?;
            self.cache_dir = Some(expanded);
        }
        if let Some(chars) = file.view.preview_chars {
            self.preview_chars = chars;
        }
        Ok(self)
    }

    fn with_cli_args(mut self, cli: &Cli) -> Result<Self> {
        // -v adds to the file's verbosity
        self.verbosity = self.verbosity.saturating_add(cli.verbose);

        if let Some(dir) = &cli.cache_dir {
            self.cache_dir = Some(nclip_fs::to_utf8_path_buf(dir.clone())?);
        }
        Ok(self)
    }

    fn build(self) -> Result<AppContext> {
        let cache_dir = match self.cache_dir {
            Some(dir) => dir,
            None => default_cache_dir()?,
        };

        Ok(AppContext {
            verbosity: self.verbosity,
            cache_dir,
            app_name: self.app_name,
            preview_chars: self.preview_chars,
        })
    }
}

pub fn load(cli: &Cli) -> Result<RuntimeConfig> {
    let config_path = resolve_config_path(cli)?;
    let file_config = if let Some(path) = &config_path {
        parse_file_config(path)?
    } else {
        FileConfig::default()
    };

    let context = ContextBuilder::new()
        .with_file_config(&file_config)?
        .with_cli_args(cli)?
        .build()?;

    let mode = if cli.args.is_empty() {
        ModeConfig::Interactive
    } else {
        ModeConfig::OneShot(cli.args.clone())
    };

    Ok(RuntimeConfig { context, mode })
}

/// `<user cache dir>/nclip`.
pub fn default_cache_dir() -> Result<Utf8PathBuf> {
    let base = dirs::cache_dir().ok_or_else(|| {
        NclipError::Config("could not determine the user cache directory".to_string())
    })?;
    Ok(nclip_fs::to_utf8_path_buf(base)?.join(CACHE_SUBDIR))
}

fn resolve_config_path(cli: &Cli) -> Result<Option<Utf8PathBuf>> {
    if let Some(path) = &cli.config {
        return nclip_fs::to_utf8_path_buf(path.clone()).map(Some);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(None);
    };
    let default = nclip_fs::to_utf8_path_buf(config_dir)?
        .join(CACHE_SUBDIR)
        .join(CONFIG_FILE_NAME);
    Ok(default.exists().then_some(default))
}

fn parse_file_config(path: &Utf8Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|e| NclipError::Config(format!("failed to read {}: {}", path, e)))?;
    parse_config_str(&raw)
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let de = toml::de::Deserializer::parse(raw)
        .map_err(|err| NclipError::ConfigParse(err.to_string()))?;
    serde_path_to_error::deserialize(de).map_err(|err| NclipError::ConfigParse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    general: GeneralSection,
    #[serde(default)]
    cache: CacheSection,
    #[serde(default)]
    view: ViewSection,
}

#[derive(Debug, Default, Deserialize)]
struct GeneralSection {
    #[serde(default)]
    verbose: Option<u8>,
    #[serde(default)]
    app_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CacheSection {
    #[serde(default)]
    dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewSection {
    #[serde(default)]
    preview_chars: Option<usize>,
}
