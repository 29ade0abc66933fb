// System status: configuration in effect and which model artifacts are on disk.

use std::path::Path;

use colored::Colorize;

use crate::config::Config;
use crate::features::entities::{NER_CONFIG_FILE, NER_MODEL_FILE, NER_TOKENIZER_FILE};
use crate::model::trained::{CLASSIFIER_FILE, VECTORIZER_FILE};

/// Display system status to the terminal.
pub fn show(config: &Config) {
    let mut domains: Vec<&str> = config.reliable_domains.iter().map(String::as_str).collect();
    domains.sort_unstable();

    println!("Reliable domains ({}): {}", domains.len(), domains.join(", "));
    println!("Expected language: {}", config.language);

    println!("\nRisk model: {}", config.model_dir.display());
    let risk_ready = show_files(&config.model_dir, &[VECTORIZER_FILE, CLASSIFIER_FILE]);
    if !risk_ready {
        println!("  Copy the trained vectorizer and classifier here, or set LITMUS_MODEL_DIR");
    }

    println!("\nNER model: {}", config.ner_model_dir.display());
    let ner_ready = show_files(
        &config.ner_model_dir,
        &[NER_MODEL_FILE, NER_TOKENIZER_FILE, NER_CONFIG_FILE],
    );
    if !ner_ready {
        println!("  Run `litmus download-model` to fetch it");
    }

    println!();
    if risk_ready && ner_ready {
        println!("{}", "Ready to analyze.".green().bold());
    } else {
        println!("{}", "Not ready: missing model files.".yellow().bold());
    }
}

/// Print one line per file with its size, returning true when all exist.
fn show_files(dir: &Path, files: &[&str]) -> bool {
    let mut all_present = true;
    for file in files {
        match std::fs::metadata(dir.join(file)) {
            Ok(meta) => println!("  {} {} ({})", "ok".green(), file, format_bytes(meta.len())),
            Err(_) => {
                all_present = false;
                println!("  {} {}", "missing".red(), file);
            }
        }
    }
    all_present
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
