//! CLI du moteur de design RNAi

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rnai_core::{BenchmarkAxis, ConstructType, DesignId};
use rnai_simulation::ExperimentType;
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod display;

use commands::{benchmark, design, list, predict, simulate, validate, Context};

#[derive(Parser)]
#[command(name = "rnai")]
#[command(about = "Design et évaluation de réactifs RNAi", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Fichier JSON de stockage des designs
    #[arg(long, global = true, default_value = "rnai-designs.json")]
    store: PathBuf,

    /// Seed de la source de bruit
    #[arg(long, global = true, default_value = "42")]
    seed: u64,

    /// Sortie JSON au lieu des tableaux
    #[arg(long, global = true)]
    json: bool,

    /// Niveau de verbosité
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Génère, score et enregistre des designs pour une cible
    Design {
        /// Séquence cible
        #[arg(short, long, conflicts_with = "input")]
        target: Option<String>,

        /// Fichier FASTA contenant la cible (premier enregistrement)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Type de construction (siRNA, shRNA, miRNA_mimic, antagomir)
        #[arg(short, long, default_value = "siRNA")]
        construct: ConstructType,

        /// Longueur du guide
        #[arg(short, long)]
        length: Option<usize>,

        /// GC minimal (0.0-1.0)
        #[arg(long)]
        gc_min: Option<f64>,

        /// GC maximal (0.0-1.0)
        #[arg(long)]
        gc_max: Option<f64>,

        /// Désactiver le filtre de répétitions en tandem
        #[arg(long)]
        no_repeat_filter: bool,

        /// Nombre de designs retenus
        #[arg(short = 'n', long)]
        max_designs: Option<usize>,

        /// Nombre maximal de candidats générés
        #[arg(long, default_value = "200")]
        max_candidates: usize,
    },

    /// Valide un guide contre une cible
    Validate {
        /// Séquence guide
        #[arg(short, long)]
        guide: String,

        /// Séquence cible
        #[arg(short, long)]
        target: String,

        /// Type de construction
        #[arg(short, long, default_value = "siRNA")]
        construct: ConstructType,
    },

    /// Prédit l'efficacité d'un design enregistré
    Predict {
        /// ID du design
        id: DesignId,
    },

    /// Simule une expérience de knockdown
    Simulate {
        /// ID du design
        id: DesignId,

        /// Type d'expérience (in_silico, in_vitro, in_vivo)
        #[arg(short, long, default_value = "in_silico")]
        experiment: ExperimentType,

        /// Concentration (nM)
        #[arg(short, long, default_value = "25.0")]
        concentration: f64,

        /// Nombre de réplicats
        #[arg(short, long, default_value = "3")]
        replicates: u32,

        /// Nombre d'itérations
        #[arg(short = 'n', long, default_value = "1")]
        iterations: usize,
    },

    /// Compare des designs enregistrés
    Benchmark {
        /// IDs des designs
        #[arg(required = true)]
        ids: Vec<DesignId>,

        /// Axe de comparaison (efficiency, specificity, safety)
        #[arg(short, long, default_value = "efficiency")]
        axis: BenchmarkAxis,
    },

    /// Liste les designs enregistrés
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    rnai_core::init_logging_with(level);

    let ctx = Context {
        store: cli.store,
        seed: cli.seed,
        json: cli.json,
    };

    match cli.command {
        Commands::Design {
            target,
            input,
            construct,
            length,
            gc_min,
            gc_max,
            no_repeat_filter,
            max_designs,
            max_candidates,
        } => {
            let options = design::DesignOptions {
                target,
                input,
                construct,
                length,
                gc_min,
                gc_max,
                filter_repeats: !no_repeat_filter,
                max_designs,
                max_candidates,
            };
            design::run(&ctx, options)?;
        }
        Commands::Validate {
            guide,
            target,
            construct,
        } => {
            validate::run(&ctx, guide, target, construct)?;
        }
        Commands::Predict { id } => {
            predict::run(&ctx, id)?;
        }
        Commands::Simulate {
            id,
            experiment,
            concentration,
            replicates,
            iterations,
        } => {
            simulate::run(&ctx, id, experiment, concentration, replicates, iterations)?;
        }
        Commands::Benchmark { ids, axis } => {
            benchmark::run(&ctx, ids, axis)?;
        }
        Commands::List => {
            list::run(&ctx)?;
        }
    }

    Ok(())
}

/// Crée une barre de progression
pub fn create_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message(msg.to_string());
    pb
}

/// Crée une barre de progression spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
