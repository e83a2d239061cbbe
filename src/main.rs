//! Command-line interface for ptbr-faker
//!
//! # Usage Examples
//!
//! ```bash
//! # Ten full samples: city, state, CEP, full name, CPF and PIS
//! ptbr-faker sample --qty 10 \
//!   --json-path data/br_pop_data_2024.json \
//!   --middle-names-path data/middle_names.json
//!
//! # Names only, 1990s distribution, raw casing, single surname
//! ptbr-faker sample -q 5 -n -r --one-surname --time-period ate1990
//!
//! # Documents only (no dataset needed)
//! ptbr-faker sample -q 3 --only-cnpj --only-rg
//! ```

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use ptbr_dataset::{PopulationDataset, TimePeriod};
use ptbr_sampler::{FullNameOptions, LocationOptions, LocationSampler, NameSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ptbr-faker")]
#[command(about = "Synthetic Brazilian person, location and document sampler")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random samples
    Sample {
        #[command(flatten)]
        args: SampleArgs,
    },
}

#[derive(Args)]
struct SampleArgs {
    /// Number of samples to generate
    #[arg(short, long, default_value_t = 1)]
    qty: u32,

    /// Path to the population data JSON file
    #[arg(short = 'j', long, default_value = "data/br_pop_data_2024.json")]
    json_path: PathBuf,

    /// Path to the middle names JSON file
    #[arg(short = 'm', long)]
    middle_names_path: Option<PathBuf>,

    /// Seed the random source for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Return only city names
    #[arg(short = 'c', long)]
    city_only: bool,

    /// Return only state abbreviations
    #[arg(long)]
    state_abbr_only: bool,

    /// Return only full state names
    #[arg(long)]
    state_full_only: bool,

    /// Return only CEPs
    #[arg(long)]
    only_cep: bool,

    /// Format CEPs without the dash
    #[arg(long)]
    cep_without_dash: bool,

    /// Omit the CEP from composed locations
    #[arg(long)]
    without_cep: bool,

    /// Render the state abbreviation without parentheses
    #[arg(long)]
    no_parenthesis: bool,

    /// Omit the generated name from composed locations
    #[arg(long)]
    without_name: bool,

    /// Time period for name sampling (ate1930..ate2010)
    #[arg(short = 't', long, default_value_t = TimePeriod::default())]
    time_period: TimePeriod,

    /// Return only the name without location
    #[arg(short = 'n', long)]
    return_only_name: bool,

    /// Return names in raw format (all caps)
    #[arg(short = 'r', long)]
    name_raw: bool,

    /// Return only surname(s)
    #[arg(short = 's', long)]
    only_surname: bool,

    /// Use only top 40 surnames
    #[arg(long = "top-40")]
    top_40: bool,

    /// Return one surname instead of two
    #[arg(long)]
    one_surname: bool,

    /// Always include a middle name
    #[arg(long)]
    always_middle: bool,

    /// Return only middle names
    #[arg(long)]
    only_middle: bool,

    /// Include a CPF with every sample (pass `false` to disable)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    always_cpf: bool,

    /// Include a PIS with every sample (pass `false` to disable)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    always_pis: bool,

    /// Include a CNPJ with every sample
    #[arg(long)]
    always_cnpj: bool,

    /// Include a CEI with every sample
    #[arg(long)]
    always_cei: bool,

    /// Include an RG with every sample
    #[arg(long)]
    always_rg: bool,

    /// Return only CPFs
    #[arg(long)]
    only_cpf: bool,

    /// Return only PIS numbers
    #[arg(long)]
    only_pis: bool,

    /// Return only CNPJs
    #[arg(long)]
    only_cnpj: bool,

    /// Return only CEIs
    #[arg(long)]
    only_cei: bool,

    /// Return only RGs
    #[arg(long)]
    only_rg: bool,
}

impl SampleArgs {
    fn documents_only(&self) -> bool {
        self.only_cpf || self.only_pis || self.only_cnpj || self.only_cei || self.only_rg
    }

    fn names_only(&self) -> bool {
        self.return_only_name || self.only_surname || self.only_middle
    }

    fn name_options(&self) -> FullNameOptions {
        FullNameOptions {
            period: self.time_period,
            raw: self.name_raw,
            include_surname: true,
            top_40: self.top_40,
            single_surname: self.one_surname,
            force_middle: self.always_middle,
        }
    }

    /// The document columns attached to a sample line, if any.
    fn document_columns(&self, rng: &mut StdRng) -> Vec<String> {
        let mut columns = Vec::new();
        let only = self.documents_only();
        if (only && self.only_cpf) || (!only && self.always_cpf) {
            columns.push(format!("CPF: {}", ptbr_documents::cpf::generate(rng, true)));
        }
        if (only && self.only_pis) || (!only && self.always_pis) {
            columns.push(format!("PIS: {}", ptbr_documents::pis::generate(rng, true)));
        }
        if (only && self.only_cnpj) || (!only && self.always_cnpj) {
            columns.push(format!("CNPJ: {}", ptbr_documents::cnpj::generate(rng, true)));
        }
        if (only && self.only_cei) || (!only && self.always_cei) {
            columns.push(format!("CEI: {}", ptbr_documents::cei::generate(rng, true)));
        }
        if (only && self.only_rg) || (!only && self.always_rg) {
            columns.push(format!("RG: {}", ptbr_documents::rg::generate(rng, true)));
        }
        columns
    }
}


fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { args } => run_sample(args),
    }
}

fn run_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut doc_rng = match args.seed {
        // Offset so document draws do not mirror the sampler stream.
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(0xD0C5)),
        None => StdRng::from_entropy(),
    };

    // Document-only requests need no dataset.
    if args.documents_only() {
        for idx in 1..=args.qty {
            let columns = args.document_columns(&mut doc_rng).join("\t");
            println!("{idx}\t{columns}");
        }
        return Ok(());
    }

    let dataset = PopulationDataset::from_file(&args.json_path).with_context(|| {
        format!("Failed to load population dataset from {:?}", args.json_path)
    })?;
    let dataset = match &args.middle_names_path {
        Some(path) => dataset
            .with_middle_names_file(path)
            .with_context(|| format!("Failed to load middle names from {path:?}"))?,
        None => dataset,
    };
    let dataset = Arc::new(dataset);
    tracing::debug!(qty = args.qty, seed = ?args.seed, "Sampling");

    if args.names_only() {
        let mut sampler = match args.seed {
            Some(seed) => NameSampler::with_seed(dataset, seed),
            None => NameSampler::new(dataset),
        }?;

        for idx in 1..=args.qty {
            let result = if args.only_surname {
                sampler.sample_surname(args.top_40, args.name_raw, args.one_surname)?
            } else if args.only_middle {
                sampler.sample_middle_name(args.name_raw)?
            } else {
                sampler.sample_full_name(&args.name_options())?
            };

            // Surname-only and middle-only output carries no documents.
            if args.return_only_name {
                let columns = args.document_columns(&mut doc_rng);
                if columns.is_empty() {
                    println!("{idx}\t{result}");
                } else {
                    println!("{idx}\t{result}\t{}", columns.join("\t"));
                }
            } else {
                println!("{idx}\t{result}");
            }
        }
        return Ok(());
    }

    let mut sampler = match args.seed {
        Some(seed) => LocationSampler::with_seed(dataset, seed),
        None => LocationSampler::new(dataset),
    }?;

    let options = LocationOptions {
        city_only: args.city_only,
        state_abbr_only: args.state_abbr_only,
        state_full_only: args.state_full_only,
        postal_only: args.only_cep,
        only_surname: false,
        only_middle: false,
        without_postal: args.without_cep,
        postal_without_dash: args.cep_without_dash,
        plain_abbr: args.no_parenthesis,
        without_name: args.without_name,
        name: args.name_options(),
    };

    for idx in 1..=args.qty {
        let result = sampler.sample_full_location(&options)?;
        let columns = args.document_columns(&mut doc_rng);
        if columns.is_empty() {
            println!("{idx}\t{result}");
        } else {
            println!("{idx}\t{result}\t{}", columns.join("\t"));
        }
    }

    Ok(())
}
