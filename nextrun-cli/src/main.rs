use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use jiff::civil::{time, DateTime};
use nextrun::generator::MAX_RESULTS_CEILING;
use nextrun::{
    Configuration, DailySchedule, Engine, HourTimeRange, LimitsInterval, Locale,
    MonthlyDaySchedule, MonthlyOrdinalSchedule, Ordinal, ScheduleType, WeekOption, Weekday,
    WeeklySchedule,
};
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "nextrun",
    about = "Upcoming execution times for a job schedule",
    version
)]
struct Cli {
    /// Configuration document (JSON). Reads stdin when omitted or "-".
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the configuration without computing
    #[arg(long)]
    check: bool,

    /// Maximum number of executions to compute
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Locale for descriptions (en-US, en-GB, es-ES); overrides the document
    #[arg(long)]
    locale: Option<Locale>,

    /// Print a sample configuration document of the given kind
    #[arg(long, value_enum)]
    template: Option<TemplateKind>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateKind {
    Once,
    Daily,
    Weekly,
    MonthlyOrdinal,
    MonthlyDay,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Some(kind) = cli.template {
        match template(kind).to_json() {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }

    let input = match read_input(cli.config.as_ref()) {
        Ok(s) if s.trim().is_empty() => {
            eprintln!("error: no configuration provided");
            process::exit(2);
        }
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    let mut config = match Configuration::from_json(&input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    debug!(
        frequency = config.frequency.name(),
        locale = %config.locale,
        "loaded configuration"
    );

    if cli.check {
        match nextrun::validate(&config) {
            Ok(()) => {
                println!("\u{2713} valid");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }

    let mut engine = Engine::new();
    if let Some(mut n) = cli.max_results {
        if n > MAX_RESULTS_CEILING {
            warn!("capped at {MAX_RESULTS_CEILING} executions");
            n = MAX_RESULTS_CEILING;
        }
        engine = engine.with_max_results(n);
    }

    let outputs =
        match ScheduleType::for_configuration(&config).next_execution_times(&engine, &config) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        };

    if outputs.is_empty() {
        eprintln!("no upcoming executions");
        process::exit(0);
    }

    if cli.json {
        match serde_json::to_string_pretty(&outputs) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    } else {
        for out in &outputs {
            println!("{}  {}", out.execution_time, out.description);
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// A ready-to-edit document anchored at today's midnight.
fn template(kind: TemplateKind) -> Configuration {
    let anchor: DateTime = jiff::Zoned::now().date().at(0, 0, 0, 0);
    let limits = LimitsInterval::unbounded(anchor);
    let nine = HourTimeRange::at(time(9, 0, 0, 0));
    match kind {
        TemplateKind::Once => Configuration::once(anchor, anchor.date().at(9, 0, 0, 0), limits),
        TemplateKind::Daily => Configuration::daily(
            anchor,
            limits,
            DailySchedule::across(
                HourTimeRange::every(time(9, 0, 0, 0), time(17, 0, 0, 0), 2).unwrap_or(nine),
            ),
        ),
        TemplateKind::Weekly => Configuration::weekly(
            anchor,
            limits,
            WeeklySchedule::new(vec![Weekday::Monday, Weekday::Wednesday], 2, nine),
        ),
        TemplateKind::MonthlyOrdinal => Configuration::monthly_ordinal(
            anchor,
            limits,
            MonthlyOrdinalSchedule::new(Ordinal::Last, WeekOption::Day(Weekday::Friday), 1, nine),
        ),
        TemplateKind::MonthlyDay => Configuration::monthly_day(
            anchor,
            limits,
            MonthlyDaySchedule::new(15, 1, nine),
        ),
    }
}
