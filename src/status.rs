// Resource status display: file locations, sizes, term and annotation counts.

use anyhow::Result;
use std::path::Path;

use crate::annotations::AssociationParser;
use crate::config::Config;
use crate::ontology::{GoDag, OboParser};

/// Display resource status to the terminal.
///
/// Parses each file that exists so a broken download shows up here rather
/// than halfway through a comparison.
pub fn show(config: &Config) -> Result<()> {
    println!("Data directory: {}", config.data_dir.display());
    println!("Measure: {}", config.measure);

    // Ontology
    match file_size(&config.obo_path) {
        Some(size) => {
            println!("Ontology: {} ({})", config.obo_path.display(), size);
            match OboParser::parse_file(&config.obo_path) {
                Ok(terms) => {
                    let dag = GoDag::from_terms(terms);
                    let obsolete = dag.iter().filter(|t| t.is_obsolete).count();
                    println!("  Terms: {} ({} obsolete)", dag.len(), obsolete);
                    for (namespace, count) in dag.namespace_counts() {
                        println!("    {}: {}", namespace.short_label(), count);
                    }
                }
                Err(e) => println!("  Unreadable: {e}"),
            }
        }
        None => {
            println!("Ontology: not found at {}", config.obo_path.display());
            println!("  Run `megago download-data` to fetch go-basic.obo");
        }
    }

    // Associations
    match file_size(&config.associations_path) {
        Some(size) => {
            println!(
                "Associations: {} ({})",
                config.associations_path.display(),
                size
            );
            match AssociationParser::parse_file(&config.associations_path) {
                Ok(associations) => {
                    println!(
                        "  Proteins: {}  Annotations: {}",
                        associations.len(),
                        associations.annotation_count()
                    );
                    if associations.negated > 0 {
                        println!("  NOT-qualified rows skipped: {}", associations.negated);
                    }
                }
                Err(e) => println!("  Unreadable: {e}"),
            }
        }
        None => {
            println!(
                "Associations: not found at {}",
                config.associations_path.display()
            );
            println!("  Set MEGAGO_ASSOCIATIONS_PATH or MEGAGO_ASSOCIATIONS_URL");
        }
    }

    Ok(())
}

fn file_size(path: &Path) -> Option<String> {
    std::fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| format_bytes(m.len()))
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
