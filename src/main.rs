mod document;
mod elements;
mod error;
mod extract;
mod merge;
mod pipeline;
mod report;
mod settings;
mod units;
mod value;
mod writer;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, warn};

use document::Anchor;
use elements::ElementTable;
use extract::{conductivity as conductivity_blob, critical as critical_blob, latent as latent_blob, read_blob};
use merge::conductivity::ConductivityOptions;
use merge::latent::LatentOptions;
use merge::prune::PruneOptions;
use merge::references::TaggingScheme;
use merge::specific_heat::HeatModel;
use merge::MissingPolicy;
use pipeline::Target;

#[derive(Parser)]
#[command(name = "scidata_patch", about = "Patch the element reference table in scientific_data.ts")]
struct Cli {
    /// Data file to patch (default from settings: scientific_data.ts)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,
    /// Locate the region by `export const <NAME>` instead of outermost braces
    #[arg(long, global = true)]
    anchor: Option<String>,
    /// Run the pass and print the report without writing
    #[arg(long, global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Thermal conductivity from the W/cmK table
    Conductivity {
        /// Pasted table (default: bundled copy)
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Write values as strings with this source tag, e.g. _4
        #[arg(short, long)]
        tag: Option<String>,
        /// Value for elements missing from the table
        #[arg(long, value_enum, default_value = "zero")]
        missing: MissingPolicy,
    },
    /// Heat of fusion and vaporization, kJ/mol -> J/kg
    LatentHeat {
        #[arg(long)]
        fusion: Option<PathBuf>,
        #[arg(long)]
        vaporization: Option<PathBuf>,
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(long, value_enum, default_value = "na")]
        missing: MissingPolicy,
    },
    /// Split specific heat into solid/liquid/gas
    SpecificHeat,
    /// Critical temperature and pressure
    CriticalPoint {
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
    /// Replace zeros with N/A and tag every value with its source
    TagReferences {
        /// JSON tagging scheme (default: built-in)
        #[arg(long)]
        scheme: Option<PathBuf>,
    },
    /// Remove keys from a sub-object of every element
    Prune {
        #[arg(long, default_value = "phaseTemperatures")]
        parent: String,
        #[arg(long = "key", default_values = ["criticalTemperature", "criticalPressure"])]
        keys: Vec<String>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn load_scheme(path: Option<PathBuf>) -> Result<TaggingScheme> {
    let Some(path) = path else {
        return Ok(TaggingScheme::default());
    };
    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read tagging scheme {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid tagging scheme {:?}", path))
}

fn main() -> Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = settings::load().unwrap_or_else(|e| {
        warn!(error = %e, "settings not loaded, using defaults");
        settings::Settings::default()
    });
    debug!(?settings, "settings");

    let table = ElementTable::standard();
    debug!(elements = table.len(), "element table");

    let target = Target {
        path: cli.file.unwrap_or_else(|| settings.data_file.clone()),
        anchor: Anchor::from_option(cli.anchor.as_deref().or(settings.anchor.as_deref())),
        dry_run: cli.dry_run,
    };

    println!("Scientific data patch");
    println!("=====================\n");
    println!("Target: {:?}{}\n", target.path, if target.dry_run { " (dry run)" } else { "" });

    let result = match cli.command {
        Commands::Conductivity { source, tag, missing } => {
            let blob = read_blob(source.as_deref(), conductivity_blob::BUNDLED)?;
            let refs = conductivity_blob::extract(&blob, &table);
            println!("Reference values: {}", refs.len());
            let opts = ConductivityOptions {
                tag,
                missing,
                places: settings.decimals,
            };
            pipeline::run(&target, "conductivity", |elements, report| {
                merge::conductivity::apply(elements, &refs, &opts, report)
            })
        }
        Commands::LatentHeat { fusion, vaporization, tag, missing } => {
            let fusion_blob = read_blob(fusion.as_deref(), latent_blob::BUNDLED_FUSION)?;
            let vaporization_blob = read_blob(vaporization.as_deref(), latent_blob::BUNDLED_VAPORIZATION)?;
            let fusion = latent_blob::extract(&fusion_blob, &table);
            let vaporization = latent_blob::extract(&vaporization_blob, &table);
            println!("Reference values: {} fusion, {} vaporization", fusion.len(), vaporization.len());
            let opts = LatentOptions {
                tag,
                missing,
                ..Default::default()
            };
            pipeline::run(&target, "latent-heat", |elements, report| {
                merge::latent::apply(elements, &fusion, &vaporization, &table, &opts, report)
            })
        }
        Commands::SpecificHeat => {
            let model = HeatModel::default();
            pipeline::run(&target, "specific-heat", |elements, report| {
                merge::specific_heat::apply(elements, &model, report)
            })
        }
        Commands::CriticalPoint { source } => {
            let blob = read_blob(source.as_deref(), critical_blob::BUNDLED)?;
            let points = critical_blob::extract(&blob, &table, &settings.tag_map())
                .context("Failed to read critical point blob")?;
            println!("Reference values: {}", points.len());
            pipeline::run(&target, "critical-point", |elements, report| {
                merge::critical::apply(elements, &points, report)
            })
        }
        Commands::TagReferences { scheme } => {
            let scheme = load_scheme(scheme)?;
            pipeline::run(&target, "tag-references", |elements, report| {
                merge::references::apply(elements, &scheme, &table, report)
            })
        }
        Commands::Prune { parent, keys } => {
            let opts = PruneOptions { parent, keys };
            pipeline::run(&target, "prune", |elements, report| merge::prune::apply(elements, &opts, report))
        }
    };

    match result {
        Ok(report) => report.print(),
        Err(e) if e.is_input_problem() => {
            // bad or missing input: report it and leave the file as it was
            error!(error = %e, "nothing written");
            println!("Error: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!("\nDone in {:.2}s", t0.elapsed().as_secs_f64());
    Ok(())
}
