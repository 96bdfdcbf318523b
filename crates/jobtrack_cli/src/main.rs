//! Command-line front end for JobTrack.
//!
//! # Responsibility
//! - Drive the same entry-form and list-view flows the mobile UI uses.
//! - Keep output plain and line-oriented for quick local checks.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use jobtrack_core::db::open_db;
use jobtrack_core::{
    init_logging_from_config, ApplicationKey, ApplicationService, CoreConfig, DraftEdit, EntryForm, ListView,
    PromptResult, SalaryRange, SqliteRecordStore, StoreApplicationRepository, StoredApplication,
    Tag,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Track job applications in a local store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file (defaults to $JOBTRACK_DB_PATH or the temp dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Write rolling logs to $JOBTRACK_LOG_DIR
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core health and version
    Ping,
    /// Save a new application
    Add {
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        position: String,
        /// Salary band label, e.g. "15k to 20k"
        #[arg(long)]
        salary: Option<String>,
        /// Tag label; repeat to add several (duplicates collapse)
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
        /// Application date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List saved applications
    List {
        /// Only show company/position matches
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one application
    Show { key: String },
    /// Delete one application by key
    Delete {
        key: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    if cli.log {
        init_logging_from_config(&config).context("logging init failed")?;
    }

    if let Commands::Ping = cli.command {
        println!("jobtrack_core ping={}", jobtrack_core::ping());
        println!("jobtrack_core version={}", jobtrack_core::core_version());
        return Ok(());
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let repo = StoreApplicationRepository::new(SqliteRecordStore::new(&conn));
    let mut service = ApplicationService::new(repo);

    match cli.command {
        Commands::Ping => {}
        Commands::Add {
            company,
            position,
            salary,
            tags,
            notes,
            date,
        } => {
            let mut form = EntryForm::open(&service);
            form.edit(DraftEdit::CompanyName(company));
            form.edit(DraftEdit::Position(position));
            form.edit(DraftEdit::Notes(notes));
            if let Some(date) = date {
                form.edit(DraftEdit::Date(date));
            }
            if let Some(label) = salary {
                let Some(band) = SalaryRange::from_label(&label) else {
                    bail!("unknown salary range `{label}`");
                };
                form.select_salary(band);
            }
            for label in tags {
                let Some(tag) = Tag::from_label(&label) else {
                    bail!("unknown tag `{label}`");
                };
                form.select_tag(tag);
            }
            let outcome = form.save(&mut service)?;
            println!("saved {}", outcome.saved.key);
        }
        Commands::List { search } => {
            let view = ListView::mount(&service)?;
            let query = search.unwrap_or_default();
            for item in view.search(&query) {
                println!("{}", summary(item));
            }
            if view.skipped() > 0 {
                eprintln!("skipped {} unreadable entries", view.skipped());
            }
        }
        Commands::Show { key } => {
            let key = parse_key(&key)?;
            match service.get_application(&key)? {
                Some(record) => {
                    println!("{}", details(&StoredApplication { key, record }));
                }
                None => bail!("application not found: {key}"),
            }
        }
        Commands::Delete { key, yes } => {
            let key = parse_key(&key)?;
            let mut view = ListView::mount(&service)?;
            let Some(index) = view.index_of(&key) else {
                bail!("application not found: {key}");
            };
            let target = summary(view.long_press(index)?);
            let result = if yes || confirm(&format!("Delete {target}?"))? {
                view.confirm(&mut service)?
            } else {
                view.cancel()
            };
            match result {
                PromptResult::Deleted(gone) => println!("deleted {}", gone.key),
                PromptResult::Dismissed | PromptResult::NoPrompt => println!("kept"),
            }
        }
    }
    Ok(())
}

fn parse_key(raw: &str) -> Result<ApplicationKey> {
    ApplicationKey::parse(raw.trim())
        .with_context(|| format!("invalid application key `{raw}`"))
}

fn summary(item: &StoredApplication) -> String {
    let record = &item.record;
    format!(
        "{}  {}  {} / {}",
        item.key,
        record.date,
        record.company_name,
        record.position
    )
}

fn details(item: &StoredApplication) -> String {
    let record = &item.record;
    let tags = record
        .selected_tags
        .iter()
        .map(|tag| tag.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "key:      {}\ncompany:  {}\nposition: {}\nsalary:   {}\ntags:     {}\ndate:     {}\nnotes:    {}",
        item.key,
        record.company_name,
        record.position,
        record.salary_range.map_or("-", SalaryRange::label),
        tags,
        record.date,
        record.notes
    )
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
