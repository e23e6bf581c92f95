use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pg2dbml::{convert_schema, export, parser, ConvertOptions, ParseMode};

#[derive(Parser)]
#[command(name = "pg2dbml")]
#[command(author, version, about = "Convert PostgreSQL schemas to DBML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a schema file into .dbml documents and a JSON dump
    Convert {
        /// Path to the schema .sql file (defaults to the project's Schema)
        schema: Option<PathBuf>,

        /// Output directory (defaults to ./output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a .dbmlproj project file
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Base name for the .dbml files (defaults to the schema file name)
        #[arg(long)]
        name: Option<String>,

        /// Fail on the first fragment that cannot be parsed
        #[arg(long)]
        strict: bool,

        /// Skip writing parsed_schema.json
        #[arg(long)]
        no_json: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a schema file and print the JSON dump to stdout
    Parse {
        /// Path to the schema .sql file
        schema: PathBuf,

        /// Fail on the first fragment that cannot be parsed
        #[arg(long)]
        strict: bool,
    },
}

fn strict_mode(strict: bool) -> Option<ParseMode> {
    strict.then_some(ParseMode::Strict)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            schema,
            output,
            project,
            name,
            strict,
            no_json,
            verbose,
        } => {
            let options = ConvertOptions {
                input_path: schema,
                output_dir: output,
                project_path: project,
                output_name: name,
                project_name: None,
                parse_mode: strict_mode(strict),
                write_json: !no_json,
                verbose,
            };

            let result = convert_schema(options)?;
            println!(
                "Converted {} tables ({} relationships) to {}",
                result.table_count,
                result.relationship_count,
                result.dbml_path.display()
            );
        }
        Commands::Parse { schema, strict } => {
            let mode = strict_mode(strict).unwrap_or_default();
            let model = parser::parse_schema_file(&schema, mode)?;
            println!("{}", export::to_json(&model)?);
        }
    }

    Ok(())
}
