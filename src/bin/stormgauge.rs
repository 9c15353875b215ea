//! Stormgauge CLI - Command-line interface for Stormgauge
//!
//! Commands:
//! - analyze: Run both impact analyses over a CSV and emit the full report
//! - rank: Rank event categories by a single harm metric
//! - validate: Report data-quality findings in the raw rows
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use stormgauge::aggregator::Aggregator;
use stormgauge::loader::CsvLoader;
use stormgauge::normalizer::DamageNormalizer;
use stormgauge::pipeline::{ImpactAnalyzer, DEFAULT_TOP_N};
use stormgauge::ranker::Ranker;
use stormgauge::types::{EventRecord, HarmMetric, ImpactReport, RankedTable};
use stormgauge::{EngineError, ENGINE_VERSION, PRODUCER_NAME, SCHEMA_VERSION};

/// Stormgauge - Batch compute engine for severe-weather impact rankings
#[derive(Parser)]
#[command(name = "stormgauge")]
#[command(author = "Ridgepoint Analytics")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Rank severe-weather event categories by harm", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both impact analyses and emit the full report
    Analyze {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Number of top-ranked event categories per table
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Output format
        #[arg(long, default_value = "auto")]
        format: OutputFormat,
    },

    /// Rank event categories by a single harm metric
    Rank {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Harm metric to rank by
        #[arg(long, value_enum)]
        metric: MetricArg,

        /// Number of top-ranked event categories
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Output format
        #[arg(long, default_value = "auto")]
        format: OutputFormat,
    },

    /// Report data-quality findings in the raw rows
    Validate {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Table on a terminal, pretty JSON otherwise
    Auto,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Aligned text tables
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    /// Total fatalities per event category
    Fatalities,
    /// Total injuries per event category
    Injuries,
    /// Total property plus crop damage per event category
    Damage,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaType {
    /// Input schema (storm.event_record.v1)
    Input,
    /// Output schema (impact report payload)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), StormCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            top,
            format,
        } => cmd_analyze(&input, &output, top, format),

        Commands::Rank {
            input,
            output,
            metric,
            top,
            format,
        } => cmd_rank(&input, &output, metric, top, format),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_analyze(
    input: &PathBuf,
    output: &PathBuf,
    top: usize,
    format: OutputFormat,
) -> Result<(), StormCliError> {
    let records = read_records(input)?;
    let report = ImpactAnalyzer::with_top_n(top).analyze(&records);

    let rendered = match resolve_format(format, output) {
        ResolvedFormat::Json => serde_json::to_string(&report)?,
        ResolvedFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
        ResolvedFormat::Table => render_report_tables(&report),
    };

    write_output(output, &rendered)
}

fn cmd_rank(
    input: &PathBuf,
    output: &PathBuf,
    metric: MetricArg,
    top: usize,
    format: OutputFormat,
) -> Result<(), StormCliError> {
    let records = read_records(input)?;

    let (title, harm_metric, rows) = match metric {
        MetricArg::Fatalities => (
            "Fatalities by event type",
            HarmMetric::Fatalities,
            Aggregator::fatalities_by_event_type(&records),
        ),
        MetricArg::Injuries => (
            "Injuries by event type",
            HarmMetric::Injuries,
            Aggregator::injuries_by_event_type(&records),
        ),
        MetricArg::Damage => {
            let normalized = DamageNormalizer::normalize_all(&records);
            (
                "Total damage by event type",
                HarmMetric::TotalDamage,
                Aggregator::damage_by_event_type(&normalized),
            )
        }
    };

    let table = RankedTable {
        title: title.to_string(),
        metric: harm_metric,
        rows: Ranker::top(Ranker::rank(rows), top),
    };

    let rendered = match resolve_format(format, output) {
        ResolvedFormat::Json => serde_json::to_string(&table)?,
        ResolvedFormat::JsonPretty => serde_json::to_string_pretty(&table)?,
        ResolvedFormat::Table => render_table(&table),
    };

    write_output(output, &rendered)
}

fn cmd_validate(input: &PathBuf, json: bool) -> Result<(), StormCliError> {
    let input_data = read_input(input)?;
    let rows = CsvLoader::rows_from_reader(input_data.as_bytes())?;
    let failures = CsvLoader::validate_rows(&rows);

    let report = ValidationReport {
        total_rows: rows.len(),
        valid_rows: rows.len() - failures.len(),
        invalid_rows: failures.len(),
        findings: failures
            .iter()
            .map(|f| ValidationFindingDetail {
                index: f.index,
                event_type: f.event_type.clone(),
                finding: f
                    .result
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total rows:   {}", report.total_rows);
        println!("Valid rows:   {}", report.valid_rows);
        println!("Invalid rows: {}", report.invalid_rows);

        if !report.findings.is_empty() {
            println!("\nFindings:");
            for finding in &report.findings {
                println!(
                    "  - Row {} ({}): {}",
                    finding.index, finding.event_type, finding.finding
                );
            }
        }
    }

    if report.invalid_rows > 0 {
        Err(StormCliError::ValidationFailed(report.invalid_rows))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), StormCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("CSV with a header row carrying at least these columns:");
                println!();
                println!("  EVTYPE      - event category label (free text)");
                println!("  FATALITIES  - fatality count");
                println!("  INJURIES    - injury count");
                println!("  PROPDMG     - property damage magnitude");
                println!("  PROPDMGEXP  - property damage exponent code");
                println!("  CROPDMG     - crop damage magnitude");
                println!("  CROPDMGEXP  - crop damage exponent code");
                println!();
                println!("Additional columns are ignored.");
                println!();
                println!("Exponent codes (case-insensitive letters):");
                println!("  H = x100, K = x1,000, M = x1,000,000, B = x1,000,000,000");
                println!("  digits 0-8 = x10, + = x1");
                println!("  -, ?, empty, and anything undocumented = x0");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: impact report payload");
                println!();
                println!("- report_version: Payload version (1.0.0)");
                println!("- producer: {{ name, version, instance_id }}");
                println!("- generated_at_utc: Report timestamp");
                println!("- record_count: Number of source records analyzed");
                println!("- tables: Ranked tables, one per analysis:");
                println!("  - title, metric (fatalities | injuries | total_damage)");
                println!("  - rows: {{ event_type, total }}, sorted descending by total");
            }
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, StormCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn read_records(input: &PathBuf) -> Result<Vec<EventRecord>, StormCliError> {
    let input_data = read_input(input)?;
    let records = CsvLoader::from_reader(input_data.as_bytes())?;

    if records.is_empty() {
        return Err(StormCliError::NoRecords);
    }

    Ok(records)
}

fn write_output(output: &PathBuf, rendered: &str) -> Result<(), StormCliError> {
    if output.to_string_lossy() == "-" {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", rendered.trim_end_matches('\n'))?;
        stdout.flush()?;
    } else {
        fs::write(output, rendered)?;
    }
    Ok(())
}

enum ResolvedFormat {
    Json,
    JsonPretty,
    Table,
}

fn resolve_format(format: OutputFormat, output: &PathBuf) -> ResolvedFormat {
    match format {
        OutputFormat::Json => ResolvedFormat::Json,
        OutputFormat::JsonPretty => ResolvedFormat::JsonPretty,
        OutputFormat::Table => ResolvedFormat::Table,
        OutputFormat::Auto => {
            let to_terminal =
                output.to_string_lossy() == "-" && atty::is(atty::Stream::Stdout);
            if to_terminal {
                ResolvedFormat::Table
            } else {
                ResolvedFormat::JsonPretty
            }
        }
    }
}

fn render_report_tables(report: &ImpactReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} - {} records analyzed\n",
        PRODUCER_NAME, report.producer.version, report.record_count
    ));
    for table in &report.tables {
        out.push('\n');
        out.push_str(&render_table(table));
    }
    out
}

fn render_table(table: &RankedTable) -> String {
    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    out.push_str(&"-".repeat(table.title.len()));
    out.push('\n');

    if table.rows.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }

    let label_width = table
        .rows
        .iter()
        .map(|r| r.event_type.len())
        .max()
        .unwrap_or(0);

    for row in &table.rows {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            row.event_type,
            format_total(row.total),
            width = label_width
        ));
    }
    out
}

fn format_total(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{:.0}", total)
    } else {
        format!("{:.2}", total)
    }
}

fn get_input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://ridgepoint.dev/schemas/storm.event_record.v1.json",
        "title": "storm.event_record.v1",
        "description": "Stormgauge severe-weather event row schema",
        "type": "object",
        "required": ["EVTYPE", "FATALITIES", "INJURIES", "PROPDMG", "CROPDMG"],
        "properties": {
            "EVTYPE": { "type": "string" },
            "FATALITIES": { "type": "number", "minimum": 0 },
            "INJURIES": { "type": "number", "minimum": 0 },
            "PROPDMG": { "type": "number" },
            "PROPDMGEXP": { "type": "string" },
            "CROPDMG": { "type": "number" },
            "CROPDMGEXP": { "type": "string" }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://ridgepoint.dev/schemas/impact_report.v1.json",
        "title": "impact_report.v1",
        "description": "Stormgauge impact report schema",
        "type": "object",
        "required": ["report_version", "producer", "generated_at_utc", "record_count", "tables"],
        "properties": {
            "report_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "generated_at_utc": { "type": "string" },
            "record_count": { "type": "integer" },
            "tables": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "metric": {
                            "type": "string",
                            "enum": ["fatalities", "injuries", "total_damage"]
                        },
                        "rows": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "event_type": { "type": "string" },
                                    "total": { "type": "number" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum StormCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
}

impl From<io::Error> for StormCliError {
    fn from(e: io::Error) -> Self {
        StormCliError::Io(e)
    }
}

impl From<EngineError> for StormCliError {
    fn from(e: EngineError) -> Self {
        StormCliError::Engine(e)
    }
}

impl From<serde_json::Error> for StormCliError {
    fn from(e: serde_json::Error) -> Self {
        StormCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<StormCliError> for CliError {
    fn from(e: StormCliError) -> Self {
        match e {
            StormCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            StormCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches storm.event_record.v1 columns".to_string()),
            },
            StormCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            StormCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No event records found in input".to_string(),
                hint: Some("Ensure the CSV has a header row and data rows".to_string()),
            },
            StormCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} rows carry data-quality findings", count),
                hint: Some("Findings are informational; analyze processes them regardless".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_rows: usize,
    valid_rows: usize,
    invalid_rows: usize,
    findings: Vec<ValidationFindingDetail>,
}

#[derive(serde::Serialize)]
struct ValidationFindingDetail {
    index: usize,
    event_type: String,
    finding: String,
}
