//! yolo2csv: YOLO annotations to TFOD CSV.
//!
//! Reads one normalized YOLO box per annotation file, converts it to
//! truncated pixel coordinates using the paired image's size, and writes all
//! boxes to a single CSV table (`filename,width,height,class,xmin,ymin,xmax,ymax`)
//! ready for TFRecord generation.
//!
//! # Modules
//!
//! - [`ir`]: Box types, label table, and the YOLO / CSV file formats
//! - [`assemble`]: The annotation-to-row pipeline and its report
//! - [`config`]: Run configuration
//! - [`error`]: Error types for yolo2csv operations

pub mod assemble;
pub mod config;
pub mod error;
pub mod ir;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use assemble::{assemble, assemble_outcomes, Assembly, AssemblyReport};
pub use config::Config;
pub use error::Yolo2CsvError;

/// The yolo2csv CLI application.
#[derive(Parser)]
#[command(name = "yolo2csv")]
#[command(version, about)]
struct Cli {
    /// Directory containing the YOLO annotation .txt files.
    #[arg(short = 'd', long = "directory", value_name = "DIR", env = "YOLO2CSV_DIRECTORY")]
    directory: PathBuf,

    /// Directory containing the .jpg images, one per annotation file.
    #[arg(
        short = 'i',
        long = "images",
        value_name = "DIR",
        env = "YOLO2CSV_IMAGES",
        default_value = config::DEFAULT_IMAGE_DIR
    )]
    images: PathBuf,

    /// Output CSV file (overwritten if it exists).
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        env = "YOLO2CSV_OUTPUT",
        default_value = config::DEFAULT_OUTPUT_PATH
    )]
    output: PathBuf,

    /// Skip annotation files that fail to convert instead of aborting.
    #[arg(long)]
    keep_going: bool,

    /// Fail on class ids that are not in the label table.
    #[arg(long)]
    strict_classes: bool,

    /// Format of the summary printed on success.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(&self.directory, &self.images, &self.output)
            .keep_going(self.keep_going)
            .strict_classes(self.strict_classes)
    }
}

/// Run the yolo2csv CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Yolo2CsvError> {
    let cli = Cli::parse();
    let report = convert(&cli.config())?;

    match cli.report {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            println!(
                "Successfully converted {} annotation file(s) to {}",
                report.rows,
                cli.output.display()
            );
            if !report.is_clean() {
                print!("{}", report);
            }
        }
    }

    Ok(())
}

/// Assembles the dataset and writes it to `config.output_path`.
///
/// Nothing is written unless assembly succeeds.
pub fn convert(config: &Config) -> Result<AssemblyReport, Yolo2CsvError> {
    let Assembly {
        dataset,
        mut report,
    } = assemble(config)?;

    ir::io_tfod_csv::write_labels_csv(config.output_path(), &dataset)?;
    report.output = Some(config.output_path.clone());

    Ok(report)
}
