//! coursedesk CLI
//!
//! Command-line tool for checking form schemas, rendering forms, running
//! table queries and computing attendance verdicts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use coursedesk_attendance::{
    summarize, AttendanceRecord, BlockQuery, EligibilityPolicy, Schedule, Student,
};
use coursedesk_forms::{render_form, Form, FormSchema, FormValues, SubmitError, SubmitOutcome};
use coursedesk_table::{apply, render_table, Pagination, Row, TableConfig, TableQuery};

/// Course administration toolkit.
#[derive(Parser)]
#[command(name = "coursedesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate form values against a schema.
    Validate {
        /// Form schema (JSON).
        #[arg(short, long)]
        schema: PathBuf,

        /// Initial values (JSON object).
        #[arg(long)]
        values: Option<PathBuf>,
    },

    /// Render a form as Bootstrap HTML.
    Render {
        /// Form schema (JSON).
        #[arg(short, long)]
        schema: PathBuf,

        /// Initial values (JSON object).
        #[arg(long)]
        values: Option<PathBuf>,

        /// Form action URL.
        #[arg(long, default_value = "")]
        action: String,

        /// Form method.
        #[arg(long, default_value = "post")]
        method: String,
    },

    /// Validate and submit a form, writing the payload as JSON.
    Submit {
        /// Form schema (JSON).
        #[arg(short, long)]
        schema: PathBuf,

        /// Initial values (JSON object).
        #[arg(long)]
        values: Option<PathBuf>,

        /// Where to write the payload (stdout if not specified).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Search, filter, sort and paginate table rows.
    Table {
        /// Table configuration (JSON).
        #[arg(short, long)]
        config: PathBuf,

        /// Rows (JSON array of objects).
        #[arg(short, long)]
        rows: PathBuf,

        /// Query string, e.g. `q=rust&status=active&o=-starts_on&page=2`.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Treat rows as one server page out of this many rows.
        #[arg(long)]
        server_total: Option<usize>,

        /// Reference date for relative date filters (defaults to today).
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print HTML instead of JSON.
        #[arg(long)]
        html: bool,
    },

    /// Summarize attendance and decide pass/fail.
    Attendance {
        /// Course schedule (JSON).
        #[arg(long)]
        schedule: PathBuf,

        /// Attendance records (JSON array).
        #[arg(long)]
        records: PathBuf,

        /// Enrolled students (JSON array).
        #[arg(long)]
        students: PathBuf,

        /// Block selection, e.g. `session=s1&block=am` or `date=2026-03-02`.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Minimum attended share to pass.
        #[arg(
            short,
            long,
            env = "COURSEDESK_PASS_THRESHOLD",
            default_value_t = EligibilityPolicy::DEFAULT_THRESHOLD
        )]
        threshold: f64,

        /// Include per-block detail.
        #[arg(long)]
        detailed: bool,
    },
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

async fn mount_form(schema: &Path, values: Option<&Path>) -> anyhow::Result<Form> {
    let text = tokio::fs::read_to_string(schema)
        .await
        .with_context(|| format!("failed to read {}", schema.display()))?;
    let schema = FormSchema::from_json(&text)?;
    let initial = match values {
        Some(path) => Some(read_json::<FormValues>(path).await?),
        None => None,
    };
    Ok(Form::mount(schema, initial))
}

async fn write_payload(payload: FormValues, out: Option<PathBuf>) -> Result<(), SubmitError> {
    let json =
        serde_json::to_string_pretty(&payload).map_err(|e| SubmitError::new(e.to_string()))?;
    match out {
        Some(path) => tokio::fs::write(&path, json)
            .await
            .map_err(|e| SubmitError::new(format!("{}: {e}", path.display()))),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Validate { schema, values } => {
            let form = mount_form(&schema, values.as_deref()).await?;
            if form.validate() {
                info!("Form is valid.");
            } else {
                let errors = form.errors();
                print!("{errors}");
                bail!("{} field(s) failed validation", errors.len());
            }
        }

        Commands::Render {
            schema,
            values,
            action,
            method,
        } => {
            let form = mount_form(&schema, values.as_deref()).await?;
            println!("{}", render_form(&form, &action, &method));
        }

        Commands::Submit {
            schema,
            values,
            out,
        } => {
            let form = mount_form(&schema, values.as_deref())
                .await?
                .on_submit(move |payload| write_payload(payload, out.clone()));

            match form.submit().await {
                SubmitOutcome::Submitted => info!("Form submitted."),
                SubmitOutcome::Invalid(errors) => {
                    print!("{errors}");
                    bail!("{} field(s) failed validation", errors.len());
                }
                SubmitOutcome::Failed(err) => bail!(err),
                SubmitOutcome::Suppressed => bail!("a submission was already in flight"),
            }
        }

        Commands::Table {
            config,
            rows,
            query,
            server_total,
            today,
            html,
        } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let text = tokio::fs::read_to_string(&config)
                .await
                .with_context(|| format!("failed to read {}", config.display()))?;
            let mut table = TableConfig::from_json(&text, today)?;
            if let Some(total_count) = server_total {
                table = table.pagination(Pagination::Server { total_count });
            }

            let rows: Vec<Row> = read_json(&rows).await?;
            let query = TableQuery::parse(&query)?;
            debug!(query = %query.to_query_string(), "Parsed table query");

            let page = apply(&table, &query, rows)?;
            if html {
                println!("{}", render_table(&table, &query, &page));
            } else {
                println!("{}", serde_json::to_string_pretty(&page)?);
            }
        }

        Commands::Attendance {
            schedule,
            records,
            students,
            query,
            threshold,
            detailed,
        } => {
            let text = tokio::fs::read_to_string(&schedule)
                .await
                .with_context(|| format!("failed to read {}", schedule.display()))?;
            let schedule = Schedule::from_json(&text)?;
            let records: Vec<AttendanceRecord> = read_json(&records).await?;
            let students: Vec<Student> = read_json(&students).await?;
            let query = BlockQuery::parse(&query)?;
            let policy = EligibilityPolicy::new(threshold)?;

            let summaries = summarize(&schedule, &records, &students, &query)?;
            let verdicts = policy.evaluate(&summaries);

            let output = if detailed {
                serde_json::json!({
                    "threshold": policy.pass_threshold(),
                    "verdicts": verdicts,
                    "summaries": summaries,
                })
            } else {
                serde_json::json!({
                    "threshold": policy.pass_threshold(),
                    "verdicts": verdicts,
                })
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
