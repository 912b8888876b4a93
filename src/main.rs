use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "download")]
use colored::Colorize;
use tracing::info;

use megago::config::Config;
use megago::input::InputFormat;
use megago::ontology::{GoId, Relations};
use megago::output::report::Report;
use megago::output::terminal;
use megago::pipeline::{self, Resources};
use megago::similarity::{Measure, SetComparer};

/// Mega-GO: relevance semantic similarity between GO terms and sets of terms.
///
/// Inputs are GO id lists, protein accession lists or FASTA files. Proteins
/// are mapped to GO terms through the association table, and every result
/// is reported separately for BPO, CCO and MFO.
#[derive(Parser)]
#[command(name = "megago", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Similarity measure (default: rel, or MEGAGO_MEASURE)
    #[arg(long, global = true, value_enum)]
    measure: Option<Measure>,

    /// Follow part_of edges as well as is_a when computing ancestors
    #[arg(long, global = true)]
    part_of: bool,

    /// Path to go-basic.obo (overrides MEGAGO_OBO_PATH)
    #[arg(long, global = true)]
    obo: Option<PathBuf>,

    /// Path to the protein → GO association table or GAF file
    #[arg(long, global = true)]
    associations: Option<PathBuf>,

    /// Print a JSON report on stdout instead of the terminal table
    #[arg(long, global = true)]
    json: bool,

    /// Input file format
    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two input files, one score per namespace
    Compare {
        /// First input file
        file_a: PathBuf,
        /// Second input file
        file_b: PathBuf,
    },

    /// Compare every pair of input files
    Matrix {
        /// Input files (at least two)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Compare two GO terms and show the information content behind the score
    Term {
        /// First GO id (e.g. GO:0006915)
        a: GoId,
        /// Second GO id
        b: GoId,
    },

    /// Show per-file statistics: terms, namespaces, IC and coherence
    Stats {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Download go-basic.obo and, if configured, the association table
    #[cfg(feature = "download")]
    DownloadData {
        /// Re-download files that already exist
        #[arg(long)]
        force: bool,
    },

    /// Show resource paths, sizes and counts
    Status,

    /// Serve the JSON API for the browser front end
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Detect from the file contents
    Auto,
    /// GO id list
    Go,
    /// Protein accession list
    Accessions,
    /// FASTA
    Fasta,
}

impl FormatArg {
    fn input_format(self) -> Option<InputFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Go => Some(InputFormat::GoList),
            FormatArg::Accessions => Some(InputFormat::Accessions),
            FormatArg::Fasta => Some(InputFormat::Fasta),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging goes to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("megago=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load()?.with_overrides(cli.obo, cli.associations, cli.measure);
    let relations = if cli.part_of {
        Relations::IsAPartOf
    } else {
        Relations::IsA
    };
    let format = cli.format.input_format();
    let measure = config.measure;

    match cli.command {
        Commands::Compare { file_a, file_b } => {
            let resources = load_resources(&config, relations)?;
            let similarity = measure.build();
            let mut comparer = SetComparer::new(resources.context(), similarity.as_ref());

            let inputs = pipeline::load_inputs(&resources, &[file_a, file_b], format)?;
            let result = pipeline::compare_pair(&mut comparer, &inputs[0], &inputs[1]);

            if cli.json {
                Report::new("compare", measure, relations, &result).print()?;
            } else {
                terminal::display_comparison(&result, measure);
            }
        }

        Commands::Matrix { files } => {
            if files.len() < 2 {
                anyhow::bail!("matrix needs at least two input files, got {}", files.len());
            }
            let resources = load_resources(&config, relations)?;
            let similarity = measure.build();
            let mut comparer = SetComparer::new(resources.context(), similarity.as_ref());

            let inputs = pipeline::load_inputs(&resources, &files, format)?;
            let results = pipeline::compare_matrix(&mut comparer, &inputs, !cli.json);

            if cli.json {
                Report::new("matrix", measure, relations, &results).print()?;
            } else {
                terminal::display_matrix(&results, measure);
            }
        }

        Commands::Term { a, b } => {
            let resources = load_resources(&config, relations)?;
            let result = pipeline::compare_terms(&resources, measure, a, b)?;

            if cli.json {
                Report::new("term", measure, relations, &result).print()?;
            } else {
                terminal::display_term_pair(&result);
            }
        }

        Commands::Stats { files } => {
            let resources = load_resources(&config, relations)?;
            let similarity = measure.build();
            let mut comparer = SetComparer::new(resources.context(), similarity.as_ref());

            let inputs = pipeline::load_inputs(&resources, &files, format)?;
            let stats: Vec<_> = inputs
                .iter()
                .map(|input| pipeline::file_stats(&resources, &mut comparer, input))
                .collect();

            if cli.json {
                Report::new("stats", measure, relations, &stats).print()?;
            } else {
                for file in &stats {
                    terminal::display_stats(file);
                }
                println!();
            }
        }

        #[cfg(feature = "download")]
        Commands::DownloadData { force } => {
            println!("Downloading GO resources...");
            println!("  Destination: {}", config.data_dir.display());

            megago::download::download_resources(&config, force).await?;

            println!("\n{}", "Download finished.".bold());
            if megago::download::resources_present(&config) {
                println!("You can now run `megago compare <FILE_A> <FILE_B>`.");
            } else {
                println!(
                    "{}",
                    "Tip: set MEGAGO_ASSOCIATIONS_PATH before running `megago compare`.".dimmed()
                );
            }
        }

        Commands::Status => {
            megago::status::show(&config)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let resources = load_resources(&config, relations)?;
            megago::web::run_server(config, resources, port, &bind).await?;
        }
    }

    Ok(())
}

/// Check the resource files exist, then load them.
fn load_resources(config: &Config, relations: Relations) -> Result<Resources> {
    config.require_resources()?;
    info!(relations = relations.as_str(), "Loading GO resources");
    Resources::load(&config.obo_path, &config.associations_path, relations)
}
