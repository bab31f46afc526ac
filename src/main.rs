use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use log::Metadata;
use log::Record;
use nesting_extract::ExtractionStatus;
use nesting_extract::Extractor;
use nesting_extract::ExtractorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nesting-extract")]
#[command(about = "Extract a nesting execution record from a nesting workbook export")]
#[command(version)]
struct Cli {
    #[arg(help = "Path to the .xlsx/.xlsm workbook")]
    path: PathBuf,
    #[arg(long, value_name = "FILE", help = "TOML file overriding the default extractor settings")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "TAG", help = "Parser version recorded in the result")]
    parser_version: Option<String>,
    #[arg(long, help = "Indent the JSON output")]
    pretty: bool,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(ExtractionStatus::Error) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExtractionStatus> {
    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            ExtractorConfig::from_toml_str(&text).with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => ExtractorConfig::default(),
    };
    let extractor = Extractor::new(config).context("build extractor")?;
    let bytes = std::fs::read(&cli.path).with_context(|| format!("read workbook '{}'", cli.path.display()))?;

    let result = extractor.extract(&bytes, cli.parser_version.as_deref());
    let json = if cli.pretty {
        result.to_json_pretty()
    } else {
        result.to_json()
    }
    .context("serialize result")?;
    println!("{json}");
    Ok(result.status)
}

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging() {
    static LOGGER: SimpleLogger = SimpleLogger;
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log_level_from_env());
}

fn log_level_from_env() -> LevelFilter {
    match std::env::var("NESTING_EXTRACT_LOG").as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("info") => LevelFilter::Info,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}
