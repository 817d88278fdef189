use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quick_schema::{compile_file, normalize, CompileFileOptions, CompileOptions};

#[derive(Parser)]
#[command(name = "quick-schema")]
#[command(author, version, about = "Shorthand compiler for database column schemas")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON descriptor list into a column schema
    Compile {
        /// Path to the JSON descriptor file
        #[arg(short, long)]
        input: PathBuf,

        /// Do not mark the first column as primary key
        #[arg(long)]
        no_primary_key: bool,

        /// Make every non-primary-key column nullable by default
        #[arg(long)]
        allow_null: bool,

        /// Fail on unknown type keywords, non-numeric sizes and missing names
        #[arg(long)]
        strict: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print the storage name of each column name
    Normalize {
        /// Column names to normalize
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Compile {
            input,
            no_primary_key,
            allow_null,
            strict,
            pretty,
        } => {
            let options = CompileFileOptions {
                input_path: input,
                compile: CompileOptions {
                    set_primary_key: !no_primary_key,
                    allow_null,
                },
                strict,
            };

            let schema = compile_file(&options)?;
            let output = if pretty {
                serde_json::to_string_pretty(&schema)?
            } else {
                serde_json::to_string(&schema)?
            };
            println!("{}", output);
        }
        Commands::Normalize { names } => {
            for name in names {
                println!("{}\t{}", name, normalize(&name));
            }
        }
    }

    Ok(())
}
