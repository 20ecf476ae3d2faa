use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chart_decode::api::{DecodeConfig, DecodeInput, SeriesAssembler};
use chart_decode::telemetry::init_default_tracing;
use chrono::Utc;

const USAGE: &str = "usage: chart_decode --input <input.json> [--config <config.json>] [--output <result.json>] [--csv <table.csv>] [--source <id>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
    source: Option<String>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => DecodeConfig::from_json_str(&read_file(path)?).map_err(|e| e.to_string())?,
        None => DecodeConfig::default(),
    };
    let mut input = DecodeInput::from_json_str(&read_file(&args.input)?).map_err(|e| e.to_string())?;
    if input.captured_at.is_none() {
        input.captured_at = Some(Utc::now());
    }
    if let Some(source) = args.source {
        input.source_identifier = Some(source);
    }

    let assembler = SeriesAssembler::new(config).map_err(|e| e.to_string())?;
    let report = assembler.decode(&input).map_err(|e| e.to_string())?;
    for diagnostic in &report.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let json = report.result.to_json_pretty().map_err(|e| e.to_string())?;
    match &args.output {
        Some(path) => write_file(path, &json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(|err| format!("failed to write stdout: {err}"))?;
        }
    }

    if let Some(path) = &args.csv {
        let csv = report.result.to_table().to_csv().map_err(|e| e.to_string())?;
        write_file(path, &csv)?;
    }

    eprintln!(
        "decoded {} series across {} dates",
        report.result.series.len(),
        report.result.dates.len()
    );
    Ok(())
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("failed to create directory `{}`: {err}", parent.display())
            })?;
        }
    }
    fs::write(path, contents).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);

    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut csv = None::<PathBuf>;
    let mut source = None::<String>;

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value("--input")?)),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--output" => output = Some(PathBuf::from(value("--output")?)),
            "--csv" => csv = Some(PathBuf::from(value("--csv")?)),
            "--source" => source = Some(value("--source")?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        config,
        output,
        csv,
        source,
    })
}
