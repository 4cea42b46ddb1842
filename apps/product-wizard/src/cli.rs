//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Default)]
#[command(
    name = "product-wizard",
    version,
    about = "Upload product images to ImgBB and build an Amazon variant CSV"
)]
pub struct Cli {
    /// Images to upload. When empty, the image directory is scanned.
    pub files: Vec<PathBuf>,

    /// Directory scanned for .png/.jpg/.jpeg images
    #[arg(short = 'd', long = "dir")]
    pub image_dir: Option<PathBuf>,

    /// ImgBB API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Parent SKU prefix, e.g. "TSHIRT"
    #[arg(long, env = "PARENT_SKU_PREFIX")]
    pub parent_sku_prefix: Option<String>,

    /// Text placed before the product words in every name
    #[arg(long, env = "PRODUCT_NAME_PREFIX")]
    pub product_name_prefix: Option<String>,

    /// Text placed after the product words in every name
    #[arg(long, env = "PRODUCT_NAME_APPEND")]
    pub product_name_append: Option<String>,

    /// Sizes in listing order, comma separated
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<String>>,

    /// Filename characters used in the parent SKU
    #[arg(long)]
    pub child_sku_chars: Option<usize>,

    /// Upload attempts per image
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Pause between attempts for the same image, in milliseconds
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Images uploaded at the same time
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Delete uploaded images after this many seconds
    #[arg(long)]
    pub expiration: Option<u32>,

    /// Directory the CSV is written to
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// CSV file name prefix
    #[arg(long)]
    pub output_prefix: Option<String>,

    /// JSON config file (default: ~/.config/product-wizard/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// ImgBB API base URL
    #[arg(long, hide = true)]
    pub endpoint: Option<String>,

    /// Print the rows as a table after writing the CSV
    #[arg(long, action = ArgAction::SetTrue)]
    pub preview: bool,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}
