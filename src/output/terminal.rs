// Colored terminal output for comparisons, matrices and file statistics.
//
// This module handles all terminal-specific formatting. main.rs calls into it
// unless `--json` was given.

use colored::Colorize;

use super::{format_score, truncate_chars};
use crate::ontology::Namespace;
use crate::pipeline::{FileStats, PairResult, TermPairResult};
use crate::similarity::Measure;

/// Display the per-namespace similarity of two inputs.
pub fn display_comparison(result: &PairResult, measure: Measure) {
    println!(
        "\n{}",
        format!("=== sim{} similarity ===", measure_label(measure)).bold()
    );
    println!("  A: {}", result.left);
    println!("  B: {}", result.right);
    println!();

    for namespace in Namespace::ALL {
        let score = result.similarity.get(namespace);
        println!(
            "  {}  {:<20} {}",
            namespace.short_label().bold(),
            namespace.as_obo_str().dimmed(),
            colorize_score(score, measure)
        );
    }
    println!();
}

/// Display all pairwise comparisons as a table.
pub fn display_matrix(results: &[PairResult], measure: Measure) {
    if results.is_empty() {
        println!("No pairs to compare. Pass at least two input files.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== sim{} matrix ({} pairs) ===",
            measure_label(measure),
            results.len()
        )
        .bold()
    );
    println!();

    println!(
        "  {:<30} {:<30} {:>7} {:>7} {:>7}",
        "A".dimmed(),
        "B".dimmed(),
        "BPO".dimmed(),
        "CCO".dimmed(),
        "MFO".dimmed(),
    );
    println!("  {}", "-".repeat(85).dimmed());

    for result in results {
        // Pad before coloring so ANSI codes don't break alignment.
        let cells: Vec<String> = Namespace::ALL
            .iter()
            .map(|ns| {
                let score = result.similarity.get(*ns);
                let padded = format!("{:>7}", format_score(score));
                colorize_text(&padded, score, measure).to_string()
            })
            .collect();
        println!(
            "  {:<30} {:<30} {} {} {}",
            truncate_chars(&result.left, 27),
            truncate_chars(&result.right, 27),
            cells[0],
            cells[1],
            cells[2],
        );
    }
    println!();
}

/// Display the similarity of two GO terms with the IC details.
pub fn display_term_pair(result: &TermPairResult) {
    println!(
        "\n{}",
        format!("=== {} vs {} ===", result.a.id, result.b.id).bold()
    );

    for (label, info) in [("A", &result.a), ("B", &result.b)] {
        let remap = if info.requested != info.id {
            format!(" (from {})", info.requested).dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}: {}{}  {}  [{}]",
            label,
            info.id,
            remap,
            truncate_chars(&info.name, 50),
            info.namespace.short_label()
        );
        println!(
            "     IC: {:.3}  Frequency: {:.5}",
            info.information_content, info.frequency
        );
    }

    match &result.mica {
        Some(mica) => println!(
            "  MICA: {}  {}  (IC {:.3}, frequency {:.5})",
            mica.id,
            truncate_chars(&mica.name, 50),
            mica.information_content,
            mica.frequency
        ),
        None => println!("  MICA: {}", "none (different namespaces)".dimmed()),
    }

    let measure = result.measure;
    println!(
        "\n  sim{}: {}",
        measure_label(measure),
        colorize_score(result.score, measure)
    );
    println!();
}

/// Display the statistics of one input file.
pub fn display_stats(stats: &FileStats) {
    println!("\n{}", format!("=== {} ===", stats.label).bold());
    println!("  Format: {}  Records: {}", stats.format, stats.records);
    if stats.residues > 0 {
        println!("  Residues: {}", stats.residues);
    }
    if stats.accessions > 0 {
        println!(
            "  Accessions: {} ({} mapped, {} without annotations)",
            stats.accessions, stats.mapped_accessions, stats.unmapped_accessions
        );
    }
    if stats.go_ids > 0 {
        println!("  GO ids listed: {}", stats.go_ids);
    }
    println!("  Distinct usable terms: {}", stats.total_terms);

    let issues = [
        (stats.invalid_tokens, "malformed tokens"),
        (stats.unknown_terms, "unknown terms"),
        (stats.obsolete_terms, "obsolete terms without replacement"),
        (stats.replaced_terms, "obsolete terms replaced"),
        (stats.remapped_terms, "alternate ids remapped"),
    ];
    for (count, label) in issues {
        if count > 0 {
            println!("  {} {} {}", "!".yellow(), count, label);
        }
    }

    println!();
    println!(
        "  {:<5} {:>6} {:>8} {:>8} {:>10}",
        "".dimmed(),
        "Terms".dimmed(),
        "Mean IC".dimmed(),
        "Depth".dimmed(),
        "Coherence".dimmed(),
    );
    for ns in &stats.namespaces {
        println!(
            "  {:<5} {:>6} {:>8} {:>8} {:>10}",
            ns.namespace.short_label().bold(),
            ns.terms,
            format_score(ns.mean_ic),
            ns.mean_depth
                .map_or_else(|| "NaN".to_string(), |d| format!("{d:.1}")),
            format_score(ns.coherence),
        );
    }
}

fn measure_label(measure: Measure) -> &'static str {
    match measure {
        Measure::Rel => "Rel",
        Measure::Lin => "Lin",
        Measure::Resnik => "Resnik",
    }
}

/// Color a score by magnitude. Resnik scores are unbounded and stay plain.
fn colorize_score(score: Option<f64>, measure: Measure) -> colored::ColoredString {
    colorize_text(&format_score(score), score, measure)
}

fn colorize_text(text: &str, score: Option<f64>, measure: Measure) -> colored::ColoredString {
    match score {
        None => text.dimmed(),
        Some(_) if !measure.is_normalized() => text.normal(),
        Some(s) if s >= 0.7 => text.bright_green(),
        Some(s) if s >= 0.4 => text.bright_yellow(),
        Some(_) => text.bright_blue(),
    }
}
