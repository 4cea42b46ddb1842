//! Run configuration.
//!
//! Every setting resolves as: command-line flag (or its environment
//! variable) → `~/.config/product-wizard/config.json` → built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use wizard_catalog::CatalogConfig;
use wizard_upload::{RetryPolicy, UploadConfig};

use crate::cli::Cli;

const DEFAULT_IMAGE_DIR: &str = "images";

/// Optional settings read from the JSON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub parent_sku_prefix: Option<String>,
    pub product_name_prefix: Option<String>,
    pub product_name_append: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub child_sku_chars: Option<usize>,
    pub image_dir: Option<PathBuf>,
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub expiration: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub output_prefix: Option<String>,
    pub endpoint: Option<String>,
}

impl FileConfig {
    /// Loads the config file at `path`, or the default location.
    ///
    /// A missing file yields defaults; so does a file that fails to parse,
    /// with a warning.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        match serde_json::from_str::<FileConfig>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "config file loaded");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                Ok(Self::default())
            }
        }
    }
}

/// Where the images come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    Files(Vec<PathBuf>),
    Dir(PathBuf),
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: ImageInput,
    pub catalog: CatalogConfig,
    pub upload: UploadConfig,
    pub timeout: Duration,
    pub expiration: Option<u32>,
    pub endpoint: Option<String>,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub preview: bool,
}

impl RunConfig {
    /// Merges CLI and file settings and checks them.
    pub fn resolve(cli: Cli, file: FileConfig) -> anyhow::Result<Self> {
        let api_key = cli
            .api_key
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .unwrap_or_default();
        if api_key.is_empty() {
            bail!("no ImgBB API key: pass --api-key or set API_KEY");
        }

        let defaults = CatalogConfig::default();
        let catalog = CatalogConfig {
            parent_sku_prefix: cli
                .parent_sku_prefix
                .or(file.parent_sku_prefix)
                .unwrap_or(defaults.parent_sku_prefix),
            product_name_prefix: cli
                .product_name_prefix
                .or(file.product_name_prefix)
                .unwrap_or(defaults.product_name_prefix),
            product_name_append: cli
                .product_name_append
                .or(file.product_name_append)
                .unwrap_or(defaults.product_name_append),
            sizes: cli.sizes.or(file.sizes).unwrap_or(defaults.sizes),
            child_sku_chars: cli
                .child_sku_chars
                .or(file.child_sku_chars)
                .unwrap_or(defaults.child_sku_chars),
        }
        .validate()
        .context("invalid catalog settings")?;

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: cli
                .max_attempts
                .or(file.max_attempts)
                .unwrap_or(defaults.max_attempts),
            delay: cli
                .retry_delay_ms
                .or(file.retry_delay_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.delay),
        };
        if retry.max_attempts == 0 {
            bail!("--max-attempts must be at least 1");
        }

        let concurrency = cli.concurrency.or(file.concurrency).unwrap_or(1);
        if concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }

        let timeout = cli
            .timeout_secs
            .or(file.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(wizard_imgbb::client::DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            bail!("--timeout-secs must be at least 1");
        }

        let input = if cli.files.is_empty() {
            ImageInput::Dir(
                cli.image_dir
                    .or(file.image_dir)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR)),
            )
        } else {
            ImageInput::Files(cli.files)
        };

        Ok(Self {
            input,
            catalog,
            upload: UploadConfig {
                api_key,
                retry,
                concurrency,
            },
            timeout,
            expiration: cli.expiration.or(file.expiration),
            endpoint: cli.endpoint.or(file.endpoint),
            output_dir: cli
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            output_prefix: cli
                .output_prefix
                .or(file.output_prefix)
                .unwrap_or_else(|| wizard_catalog::DEFAULT_OUTPUT_PREFIX.to_string()),
            preview: cli.preview,
        })
    }
}

/// `~/.config/product-wizard/config.json` (`%APPDATA%` on Windows).
pub fn default_config_path() -> PathBuf {
    config_base_dir().join("product-wizard").join("config.json")
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| "C:\\".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }
}
