use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};

use bomrequisition_lib::logging;
use bomrequisition_lib::models::AppError;

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Parser)]
#[command(about = "受注明細とBOMテンプレートから材料請求データを作成します。")]
struct Args {
    /// Workbook (xlsx/xlsm/xls/ods) or directory of per-sheet CSV files.
    source: PathBuf,

    /// JSON config file (defaults are used when missing).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Issue date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Write the output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => bomrequisition_lib::load_config(path)?,
        None => Default::default(),
    };

    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init(logging::parse_level(level));

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let report = bomrequisition_lib::generate_requisition_report(&args.source, &config, today)?;
    let content = bomrequisition_lib::export_requisition_report(&report, args.format.as_str())?;

    match &args.output {
        Some(path) => std::fs::write(path, content).map_err(|err| {
            AppError::new(format!("出力ファイルの書き込みに失敗しました: {err}"))
        })?,
        None => println!("{}", content),
    }

    Ok(())
}
