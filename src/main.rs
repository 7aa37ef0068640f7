use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use dalgen::config::{init_config, load_config, parse_parameter, ResolverConfig};
use dalgen::descriptor::load_descriptor_set;
use dalgen::index::build_index;
use dalgen::output::{links_digest, to_records};
use dalgen::resolution::SchemaResolver;
use dalgen::types::Target;

/// Schema resolution for the data access layer generator.
#[derive(Parser)]
#[command(name = "dalgen", about = "Link persistence schema messages to their source messages")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default generator configuration file
    Init {
        /// Directory to write into (default: current directory)
        path: Option<PathBuf>,
        /// Backend target recorded in the configuration
        #[arg(short, long, default_value = "postgres")]
        target: String,
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Resolve schema messages for one backend
    Resolve {
        /// JSON descriptor set
        #[arg(short, long)]
        descriptors: PathBuf,
        /// Backend target (postgres, gorm, firestore, mongodb, datastore)
        #[arg(short, long)]
        target: Option<String>,
        /// Generator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Plugin parameter string, e.g. "target=postgres"
        #[arg(short, long)]
        parameter: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// List every message name in the symbol index
    Symbols {
        /// JSON descriptor set
        #[arg(short, long)]
        descriptors: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> dalgen::errors::Result<()> {
    match cli.command {
        Commands::Init {
            path,
            target,
            force,
        } => {
            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            let config_path = init_config(&dir, target.parse::<Target>()?, force)?;
            println!("Wrote {}", config_path.display());
        }
        Commands::Resolve {
            descriptors,
            target,
            config,
            parameter,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => load_config(&path)?,
                None => ResolverConfig::default(),
            };
            if let Some(parameter) = parameter {
                cfg = parse_parameter(&parameter, cfg)?;
            }
            if let Some(target) = target {
                cfg.target = target.parse()?;
            }

            let set = load_descriptor_set(&descriptors)?;
            let index = build_index(&set.files);
            let links = SchemaResolver::new(&index, cfg.target)
                .with_generate_only(&cfg.generate_only)?
                .collect(&set.files)
                .into_result()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&to_records(&links))?);
            } else {
                for link in &links {
                    let schema = link
                        .schema_name
                        .as_deref()
                        .map(|s| format!("{}.", s))
                        .unwrap_or_default();
                    println!(
                        "{} -> {} ({}{}) [{}]",
                        link.target_name, link.source_name, schema, link.table_name, link.file
                    );
                }
                println!("{} link(s), digest {}", links.len(), links_digest(&links));
            }
        }
        Commands::Symbols { descriptors } => {
            let set = load_descriptor_set(&descriptors)?;
            let index = build_index(&set.files);
            for name in index.names() {
                println!("{}", name);
            }
        }
    }
    Ok(())
}
