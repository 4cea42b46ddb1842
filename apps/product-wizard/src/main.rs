//! product-wizard: upload product images to ImgBB and write an Amazon
//! variant CSV (one row per image and size).

mod cli;
mod config;
mod progress;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wizard_catalog::{VariantRow, assemble, expand, output_file_name, render_table, write_csv_file};
use wizard_upload::{ImageFile, UploadOrchestrator, is_supported_image, scan_images};

use cli::Cli;
use config::{FileConfig, ImageInput, RunConfig};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the run's images from explicit paths or a directory scan.
fn collect_images(input: &ImageInput) -> anyhow::Result<Vec<ImageFile>> {
    match input {
        ImageInput::Files(paths) => paths
            .iter()
            .map(|path| {
                if !path.is_file() {
                    bail!("image not found: {}", path.display());
                }
                if !is_supported_image(path) {
                    bail!("unsupported image type: {} (png, jpg, jpeg)", path.display());
                }
                Ok(ImageFile::from_path(path))
            })
            .collect(),
        ImageInput::Dir(dir) => scan_images(dir)
            .with_context(|| format!("cannot scan image directory {}", dir.display())),
    }
}

fn build_client(run: &RunConfig) -> anyhow::Result<wizard_imgbb::Client> {
    let mut client = wizard_imgbb::Client::new(run.timeout).context("cannot build HTTP client")?;
    if let Some(endpoint) = &run.endpoint {
        client = client.with_base_url(endpoint.as_str());
    }
    if let Some(seconds) = run.expiration {
        client = client.with_expiration(seconds);
    }
    Ok(client)
}

fn write_output(run: &RunConfig, rows: &[VariantRow]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(&run.output_dir)
        .with_context(|| format!("cannot create {}", run.output_dir.display()))?;
    let path = run
        .output_dir
        .join(output_file_name(&run.output_prefix, &chrono::Local::now()));

    if let Err(e) = write_csv_file(&path, rows) {
        // Keep the uploaded URLs recoverable from the log.
        for row in rows {
            error!(file = %row.filename, url = %row.url, child_sku = %row.child_sku, "unsaved row");
        }
        return Err(e).with_context(|| format!("cannot write {}", path.display()));
    }
    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = FileConfig::load(cli.config.as_deref())?;
    let run = RunConfig::resolve(cli, file)?;
    info!(
        upload = ?run.upload,
        sizes = ?run.catalog.sizes,
        parent_sku_prefix = %run.catalog.parent_sku_prefix,
        "configuration resolved"
    );

    let images = collect_images(&run.input)?;
    if images.is_empty() {
        bail!("no images to upload");
    }
    let total = images.len();

    let mut orchestrator = UploadOrchestrator::new(build_client(&run)?);
    let printer = orchestrator
        .take_events()
        .map(|rx| tokio::spawn(progress::print_events(rx, total)));

    let cancel = orchestrator.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, finishing current uploads");
            cancel.cancel();
        }
    });

    let report = orchestrator.run(images, &run.upload).await;
    drop(orchestrator);
    if let Some(printer) = printer {
        let _ = printer.await;
    }

    let rows = assemble(expand(&report.records, &run.catalog), &run.catalog.sizes);
    let path = write_output(&run, &rows)?;
    println!("Saved to {}", path.display());

    if run.preview && !rows.is_empty() {
        println!("{}", render_table(&rows));
    }

    let summary = report.summary;
    if summary.is_complete() {
        info!(rows = rows.len(), "Upload completed: {summary}");
    } else {
        warn!(
            rows = rows.len(),
            failed = summary.failed(),
            "Upload completed with failures: {summary}"
        );
    }

    Ok(())
}
