use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use sitio_registry::config::AppConfig;
use sitio_registry::import::summary::ImportSummaryBuilder;
use sitio_registry::import::{mapper, run_import};
use sitio_registry::parse::parse_sheet;
use sitio_registry::schedule::{
    generate_cumulative_percentage_template, generate_month_range, generate_monthly_template,
    DistributionStrategy,
};
use sitio_registry::store::{JsonFileStore, RecordStore};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
enum StrategyOpt {
    Even,
    Weighted,
}

impl StrategyOpt {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Even => "even",
            Self::Weighted => "weighted",
        }
    }
}

impl std::fmt::Display for StrategyOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<StrategyOpt> for DistributionStrategy {
    fn from(opt: StrategyOpt) -> Self {
        match opt {
            StrategyOpt::Even => DistributionStrategy::Even,
            StrategyOpt::Weighted => DistributionStrategy::Weighted,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sitio_registry",
    version,
    about = "Sitio profile intake and target planning (CLI)",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a spreadsheet of sitio profiles
    Import {
        /// CSV or Excel file to ingest
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// JSON record store consulted for duplicates
        #[arg(long, default_value = "sitios.json")]
        store: PathBuf,
        /// Append accepted records to the store
        #[arg(long)]
        commit: bool,
    },
    /// Generate a monthly target template
    Plan {
        /// Target amount to distribute
        #[arg(long)]
        total: f64,
        /// First month (YYYY-MM)
        #[arg(long, value_name = "YYYY-MM")]
        start: String,
        /// Last month (YYYY-MM)
        #[arg(long, value_name = "YYYY-MM")]
        end: String,
        #[arg(long, value_enum, default_value_t = StrategyOpt::Even)]
        strategy: StrategyOpt,
        /// Emit cumulative percentages instead of absolute amounts
        #[arg(long)]
        cumulative: bool,
    },
}

fn main() -> Result<()> {
    sitio_registry::logging::init_tracing_from_env();
    let cli = Cli::parse();
    match cli.command {
        Command::Import {
            file,
            store,
            commit,
        } => import_file(&file, &store, commit),
        Command::Plan {
            total,
            start,
            end,
            strategy,
            cumulative,
        } => plan_targets(total, &start, &end, strategy.into(), cumulative),
    }
}

fn import_file(file: &PathBuf, store_path: &PathBuf, commit: bool) -> Result<()> {
    let config = AppConfig::default();
    config.validate().context("invalid configuration")?;
    let started = chrono::Utc::now();

    let sheet = parse_sheet(file, &config.import)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    let mappings = mapper::auto_map_columns(&sheet.headers);
    for mapping in mappings.iter().filter(|m| m.sitio_field.is_none()) {
        match mapper::suggest_field(&mapping.csv_header, config.import.suggestion_threshold) {
            Some((field, score)) => warn!(
                "unmapped column {:?} (closest field: {} at {:.2})",
                mapping.csv_header,
                field.path(),
                score
            ),
            None => warn!("unmapped column {:?}", mapping.csv_header),
        }
    }
    let missing = mapper::missing_required_fields(&mappings);
    if !missing.is_empty() {
        let paths: Vec<&str> = missing.iter().map(|f| f.path()).collect();
        bail!("required fields have no source column: {}", paths.join(", "));
    }

    let store = JsonFileStore::new(store_path);
    let existing = store.load().context("failed to load record store")?;
    let outcome = run_import(&sheet, &mappings, &existing);

    let summary = ImportSummaryBuilder::new(&file.display().to_string())
        .with_counts(
            sheet.rows.len(),
            outcome.valid.len(),
            outcome.invalid.len(),
            outcome.duplicates.len(),
        )
        .with_timestamps(started, chrono::Utc::now())
        .with_error_preview(&outcome.errors, config.import.error_preview_limit)
        .build();

    println!("Imported {}:", summary.source);
    println!("  rows:       {}", summary.total_rows);
    println!("  accepted:   {}", summary.successful);
    println!("  rejected:   {}", summary.failed);
    println!("  duplicates: {}", summary.duplicates);
    for line in &summary.error_preview {
        println!("  - {}", line);
    }

    if commit {
        let mut all = existing;
        all.extend(outcome.valid.iter().cloned());
        store.save(&all).context("failed to save record store")?;
        info!(
            "committed {} records to {}",
            outcome.valid.len(),
            store_path.display()
        );
    }
    Ok(())
}

fn plan_targets(
    total: f64,
    start: &str,
    end: &str,
    strategy: DistributionStrategy,
    cumulative: bool,
) -> Result<()> {
    let months = generate_month_range(parse_month(start)?, parse_month(end)?);
    if months.is_empty() {
        bail!("start month is after end month");
    }
    let breakdown = if cumulative {
        generate_cumulative_percentage_template(&months, strategy)
    } else {
        generate_monthly_template(total, &months, strategy)
    };
    for month in &months {
        println!("{}  {}", month, breakdown[month]);
    }
    Ok(())
}

fn parse_month(token: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", token.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month token {:?}, expected YYYY-MM", token))
}
