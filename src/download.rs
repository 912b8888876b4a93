// Resource download helper.
//
// Fetches go-basic.obo (and, when MEGAGO_ASSOCIATIONS_URL is set, an
// association table) into the data directory
// (~/.local/share/megago/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::Config;

/// Check whether both resource files exist.
pub fn resources_present(config: &Config) -> bool {
    config.obo_path.exists() && config.associations_path.exists()
}

/// Download the ontology and, if configured, the association table.
///
/// Shows progress bars for the transfers. Skips files that already exist
/// unless `force` is set. Both downloads run concurrently.
pub async fn download_resources(config: &Config, force: bool) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            config.data_dir.display()
        )
    })?;

    let obo = fetch_if_missing("Ontology", &config.obo_url, &config.obo_path, force);

    match config.associations_url.as_deref() {
        Some(url) => {
            let associations =
                fetch_if_missing("Associations", url, &config.associations_path, force);
            futures::try_join!(obo, associations)?;
        }
        None => {
            obo.await?;
            if !config.associations_path.exists() {
                println!(
                    "  Associations: no MEGAGO_ASSOCIATIONS_URL set; place a table at {}",
                    config.associations_path.display()
                );
            }
        }
    }

    Ok(())
}

async fn fetch_if_missing(label: &str, url: &str, dest: &Path, force: bool) -> Result<()> {
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dest.display().to_string());

    if dest.exists() && !force {
        info!(path = %dest.display(), "{label} already exists, skipping");
        println!("  {label}: {file_name} (already exists)");
        return Ok(());
    }

    println!("  {label}: downloading {file_name}...");
    download_file(url, dest).await
}

/// Download a single file from a URL to a local path with a progress bar.
async fn download_file(url: &str, dest: &Path) -> Result<()> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        }
    };

    // Stream the body so go-basic.obo (~30 MB) shows progress as it arrives.
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read response body")?
    {
        body.extend_from_slice(&chunk);
        pb.set_position(body.len() as u64);
    }

    // Write to a sibling temp file first so an interrupted download never
    // leaves a truncated resource behind.
    let partial = partial_path(dest);
    std::fs::write(&partial, &body)
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move download into {}", dest.display()))?;

    pb.finish_and_clear();

    info!(bytes = body.len(), "Downloaded {} to {}", url, dest.display());
    Ok(())
}

/// `go-basic.obo` → `go-basic.obo.part`, next to the destination.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}
