use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use schedule_browser::report;
use schedule_browser::{
    aggregate, build_week_view, list_course_names, list_periods, list_sub_terms, LoadStatus,
    PeriodId, ScheduleStore, Selection, StoreCache, SubTermDefault,
};

#[derive(Parser)]
#[command(name = "schedule-browser")]
#[command(about = "Browse university class schedules by period, sub-term and course", long_about = None)]
struct Cli {
    /// CSV file with one row per weekly class session
    #[arg(long, env = "HORARIOS_CSV", default_value = "horarios.csv", global = true)]
    source: PathBuf,
    /// Sub-term preselected when none is given: first, last, or a sub-term name
    #[arg(long, default_value = "first", global = true)]
    default_sub_term: SubTermDefault,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SelectionArgs {
    /// Period id; defaults to the most recent period
    #[arg(long)]
    period: Option<String>,
    #[arg(long)]
    sub_term: Option<String>,
    /// Restrict to these course names (repeatable); none means all courses
    #[arg(long = "course")]
    courses: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List academic periods, most recent first
    Periods,
    /// List the sub-terms of a period
    SubTerms {
        #[arg(long)]
        period: Option<String>,
    },
    /// List course names available for a period and sub-term
    Courses {
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        sub_term: Option<String>,
    },
    /// Show the weekly grid
    Week {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long)]
        json: bool,
    },
    /// Show the detailed per-course list
    List {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown schedule
    Report {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long, default_value = "horario.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut cache = StoreCache::new();
    let loaded = cache.get_or_load(&cli.source);
    if LoadStatus::of(&loaded) == LoadStatus::Waiting {
        println!("{}", report::WAITING_MESSAGE);
        return Ok(());
    }
    let store = loaded.with_context(|| format!("failed to load {}", cli.source.display()))?;

    match cli.command {
        Commands::Periods => {
            for (index, period) in list_periods(&store).iter().enumerate() {
                let marker = if index == 0 { " (default)" } else { "" };
                println!("{}  {}{}", period.id, period.name, marker);
            }
        }
        Commands::SubTerms { period } => {
            let args = SelectionArgs {
                period,
                sub_term: None,
                courses: Vec::new(),
            };
            if let Some(selection) = resolve(&store, &args, &cli.default_sub_term) {
                for sub_term in list_sub_terms(&store, &selection.period.id) {
                    println!("{sub_term}");
                }
            }
        }
        Commands::Courses { period, sub_term } => {
            let args = SelectionArgs {
                period,
                sub_term,
                courses: Vec::new(),
            };
            if let Some(selection) = resolve(&store, &args, &cli.default_sub_term) {
                for name in list_course_names(&store, &selection.period.id, &selection.sub_term) {
                    println!("{name}");
                }
            }
        }
        Commands::Week { selection, json } => {
            let Some(selection) = resolve(&store, &selection, &cli.default_sub_term) else {
                println!("{}", report::NO_COURSES_MESSAGE);
                return Ok(());
            };
            let courses = aggregate(&selection.sessions(&store));
            let view = build_week_view(&courses);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", report::selection_title(&selection));
                println!();
                if courses.is_empty() {
                    println!("{}", report::NO_COURSES_MESSAGE);
                } else {
                    print!("{}", report::render_week(&view));
                }
            }
        }
        Commands::List { selection, json } => {
            let Some(selection) = resolve(&store, &selection, &cli.default_sub_term) else {
                println!("{}", report::NO_COURSES_MESSAGE);
                return Ok(());
            };
            let courses = aggregate(&selection.sessions(&store));
            if json {
                println!("{}", serde_json::to_string_pretty(&courses)?);
            } else {
                println!("{}", report::selection_title(&selection));
                println!();
                if courses.is_empty() {
                    println!("{}", report::NO_COURSES_MESSAGE);
                } else {
                    print!("{}", report::render_course_list(&courses));
                }
            }
        }
        Commands::Report { selection, out } => {
            let Some(selection) = resolve(&store, &selection, &cli.default_sub_term) else {
                println!("{}", report::NO_COURSES_MESSAGE);
                return Ok(());
            };
            let courses = aggregate(&selection.sessions(&store));
            let view = build_week_view(&courses);
            let document = report::build_report(&selection, &courses, &view);
            std::fs::write(&out, document)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn resolve(
    store: &ScheduleStore,
    args: &SelectionArgs,
    policy: &SubTermDefault,
) -> Option<Selection> {
    let period = args.period.as_deref().map(PeriodId::from);
    let courses: BTreeSet<String> = args.courses.iter().cloned().collect();
    Selection::resolve(store, period.as_ref(), args.sub_term.as_deref(), courses, policy)
}
