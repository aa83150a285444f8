use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use bblx_backend::books;
use bblx_backend::convert::{self, ConvertOptions};
use bblx_backend::has_bblx_extension;
use bblx_backend::types::ModuleMetadata;

#[derive(Parser, Debug)]
#[command(author, version, about = "USFM to e-Sword BBLX converter", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a directory of .usfm files into a single .bblx module
    #[command(arg_required_else_help = true)]
    Convert {
        /// Directory containing the .usfm input files
        #[arg(value_name = "DIRECTORY_PATH")]
        input_dir: PathBuf,

        /// Path of the .bblx module to write
        #[arg(value_name = "FILE_PATH")]
        output_file: PathBuf,

        /// Translation name, stored in the module's Details record
        #[arg(long, default_value = "My Bible Translation")]
        title: String,

        /// Translation abbreviation
        #[arg(long, default_value = "MBT")]
        abbreviation: String,

        /// Translation language code
        #[arg(long, default_value = "en", env = "BBLX_LANGUAGE")]
        language: String,

        /// Also write the run report as JSON to this path
        #[arg(long, value_name = "FILE_PATH")]
        report_json: Option<PathBuf>,
    },

    /// List the recognized USFM book codes and their canonical book numbers
    ListBooks,
}

fn run_convert(
    input_dir: PathBuf,
    output_file: PathBuf,
    title: &str,
    abbreviation: &str,
    language: &str,
    report_json: Option<PathBuf>,
) -> Result<(), String> {
    if !input_dir.exists() {
        return Err(format!("Input directory does not exist: {:?}", input_dir));
    }
    if !input_dir.is_dir() {
        return Err(format!("Input path is a file, not a directory: {:?}", input_dir));
    }
    if !has_bblx_extension(&output_file) {
        return Err(format!("Output file must have the .bblx extension: {:?}", output_file));
    }

    let options = ConvertOptions {
        input_dir,
        output_file: output_file.clone(),
        metadata: ModuleMetadata::new(title, abbreviation, language),
    };

    let report = convert::run(&options).map_err(|e| format!("{}", e))?;

    if let Some(path) = report_json {
        report.save_json(&path)?;
    }

    if report.is_success() {
        println!(
            "Conversion complete! {} files, {} verses. Output saved to {:?}",
            report.files_processed, report.verses_inserted, output_file
        );
    } else {
        println!(
            "Conversion completed with {} errors ({} files, {} verses written):",
            report.errors.len(),
            report.files_processed,
            report.verses_inserted
        );
        for msg in &report.errors {
            println!("  {}", msg);
        }
    }

    Ok(())
}

fn list_books() -> Result<(), String> {
    for (code, number) in books::book_listing() {
        println!("{:>2}  {}", number, code);
    }
    Ok(())
}

fn main() {
    // Attempt to load a .env file, e.g. for LOG_LEVEL or BBLX_LOG_FILE.
    let _ = dotenv();

    let cli = Cli::parse();

    let command_result = match cli.command {
        Commands::Convert {
            input_dir,
            output_file,
            title,
            abbreviation,
            language,
            report_json,
        } => run_convert(
            input_dir,
            output_file,
            &title,
            &abbreviation,
            &language,
            report_json,
        ),

        Commands::ListBooks => list_books(),
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {}", e);
        exit(1);
    }
}
