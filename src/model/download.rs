// Model storage locations and the NER model download helper.
//
// The NER model (dslim/bert-base-NER, ONNX export) comes from HuggingFace.
// The risk classifier and its vectorizer are produced by our own training
// run, so they are never downloaded; we only check they are in place.
//
// Files live in a platform-appropriate directory
// (~/.local/share/litmus/models/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::trained::{CLASSIFIER_FILE, VECTORIZER_FILE};
use crate::features::entities::{NER_CONFIG_FILE, NER_MODEL_FILE, NER_TOKENIZER_FILE};

/// HuggingFace repo for the NER model.
const NER_HF_URL: &str = "https://huggingface.co/dslim/bert-base-NER/resolve/main";

/// Path of the ONNX export inside the HuggingFace repo.
const NER_HF_MODEL_PATH: &str = "onnx/model.onnx";

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/litmus/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("litmus")
        .join("models")
}

/// Subdirectory within model_dir for the NER model.
pub fn ner_model_dir(base: &Path) -> PathBuf {
    base.join("bert-base-NER")
}

/// Check whether both risk model artifacts exist.
pub fn risk_model_files_present(dir: &Path) -> bool {
    dir.join(VECTORIZER_FILE).exists() && dir.join(CLASSIFIER_FILE).exists()
}

/// Check whether all three NER files exist.
pub fn ner_files_present(dir: &Path) -> bool {
    dir.join(NER_MODEL_FILE).exists()
        && dir.join(NER_TOKENIZER_FILE).exists()
        && dir.join(NER_CONFIG_FILE).exists()
}

/// Download the NER model into `dir`.
///
/// Shows a progress bar for the model weights. Skips files that already
/// exist. Creates the directory as needed.
pub async fn download_ner_model(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create NER model directory: {}", dir.display()))?;

    println!("\nNamed-entity model (bert-base-NER):");

    for file in [NER_TOKENIZER_FILE, NER_CONFIG_FILE] {
        fetch_unless_present(&format!("{NER_HF_URL}/{file}"), &dir.join(file), false).await?;
    }

    fetch_unless_present(
        &format!("{NER_HF_URL}/{NER_HF_MODEL_PATH}"),
        &dir.join(NER_MODEL_FILE),
        true,
    )
    .await?;

    Ok(())
}

async fn fetch_unless_present(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dest.display().to_string());

    if dest.exists() {
        info!("{name} already exists, skipping");
        println!("  {name} (already exists)");
        return Ok(());
    }

    if show_progress {
        println!("  Downloading {name} (~430 MB)...");
    } else {
        println!("  Downloading {name}...");
    }
    download_file(url, dest, show_progress).await
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = if show_progress {
        Some(progress_bar(response.content_length()))
    } else {
        None
    };

    let mut bytes = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read response body")?
    {
        bytes.extend_from_slice(&chunk);
        if let Some(ref pb) = pb {
            pb.set_position(bytes.len() as u64);
        }
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

fn progress_bar(total_size: Option<u64>) -> ProgressBar {
    match total_size {
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
    }
}
