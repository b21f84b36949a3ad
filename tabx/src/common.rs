use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Extract structured tabular records from PDF documents with an LLM
/// backend.
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// PDF files to process, in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output column name; repeat the flag once per column, in order.
    #[arg(short, long = "column", required = true)]
    pub columns: Vec<String>,

    /// Free-text extraction instructions added to the prompt.
    #[arg(short, long, default_value = "")]
    pub instructions: String,

    /// Page range, e.g. "1-3,5". Blank selects all pages.
    #[arg(short, long, default_value = "")]
    pub pages: String,

    /// Extract multiple rows per document instead of a single record.
    #[arg(long, default_value_t = false)]
    pub multiple_rows: bool,

    /// Path of the CSV file to write.
    #[arg(short, long, default_value = "extracted_data.csv")]
    pub output: PathBuf,

    /// Path to a TOML config file. Defaults to config.toml in the config
    /// directory, when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value_t = String::from("warn"))]
    pub log_level: String,
}

/// Initialize the global logger at `level`.
pub fn setup_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new().filter_level(level).try_init()
}
