//! Command-line front end for the Moodlog journal.
//!
//! # Responsibility
//! - Parse user commands and route them through `JournalService`.
//! - Pick the storage backend from the `--db` path extension.
//! - Render week, month and emoji summaries as plain text.

use clap::{Args, Parser, Subcommand};
use log::error;
use moodlog_core::db::open_db;
use moodlog_core::{
    default_log_level, init_logging, today_iso, Entry, EntryEdit, EntryRepository, JournalService,
    JsonFileEntryRepository, SqliteEntryRepository,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "moodlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily mood journal: three emojis, a color and a song per day")]
struct Cli {
    /// Journal storage; `.json` selects a JSON array file, anything else SQLite
    #[arg(long, env = "MOODLOG_DB", default_value = "moodlog.db", value_name = "FILE")]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, env = "MOODLOG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "MOODLOG_LOG_DIR", value_name = "DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set emojis, hue and song for today or yesterday
    Record(RecordArgs),
    /// Add or remove a single emoji
    Toggle {
        emoji: String,
        /// Day to edit (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a week; offset 0 lists the last 7 recorded days
    Week {
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show the color families of a month
    Month {
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show the most used emojis and pairs
    Stats {
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Replace the journal with a JSON array snapshot
    Import { file: PathBuf },
    /// Write the journal as a JSON array snapshot
    Export { file: PathBuf },
}

#[derive(Args)]
struct RecordArgs {
    /// Day to edit (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Emoji for the day; repeat up to three times
    #[arg(long = "emoji", value_name = "EMOJI")]
    emojis: Vec<String>,
    /// Hue in degrees; ignored while the day has no emojis
    #[arg(long, allow_negative_numbers = true)]
    hue: Option<i64>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    artist: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli) -> CliResult<()> {
    let is_json = cli
        .db
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let journal = JournalService::open(JsonFileEntryRepository::new(&cli.db))?;
        return run(journal, &cli.command);
    }

    let mut conn = open_db(&cli.db)?;
    let repo = SqliteEntryRepository::try_new(&mut conn)?;
    run(JournalService::open(repo)?, &cli.command)
}

fn run<R: EntryRepository>(mut journal: JournalService<R>, command: &Command) -> CliResult<()> {
    match command {
        Command::Record(args) => {
            let date = args.date.clone().unwrap_or_else(today_iso);
            let edit = EntryEdit::Set {
                emojis: (!args.emojis.is_empty()).then(|| args.emojis.clone()),
                hue: args.hue,
                title: args.title.clone(),
                artist: args.artist.clone(),
            };
            if edit.is_noop() {
                return Err("nothing to record; pass --emoji, --hue, --title or --artist".into());
            }
            let entry = journal.record(&date, edit)?;
            println!("{}", render_entry(&entry));
        }
        Command::Toggle { emoji, date } => {
            let date = date.clone().unwrap_or_else(today_iso);
            let entry = journal.record(&date, EntryEdit::ToggleEmoji(emoji.clone()))?;
            println!("{}", render_entry(&entry));
        }
        Command::Week { offset } => {
            for entry in journal.week(*offset) {
                println!("{}", render_entry(&entry));
            }
        }
        Command::Month { offset } => {
            let key = moodlog_core::month_key(*offset);
            let recorded = journal
                .store()
                .entries()
                .iter()
                .filter(|entry| entry.date().starts_with(&format!("{key}-")))
                .count();
            let palette = journal.month_palette(*offset);
            let rendered: Vec<String> = palette.iter().map(|hue| format!("{hue:.0}")).collect();
            println!("{key} recorded_days={recorded} hues={}", rendered.join(","));
        }
        Command::Stats { top } => {
            let stats = journal.stats();
            for (emoji, count) in stats.top_emojis(*top) {
                println!("{emoji} {count}");
            }
            for (pair, count) in stats.top_pairs(*top) {
                println!("{pair} {count}");
            }
        }
        Command::Import { file } => {
            let payload = fs::read_to_string(file)?;
            let count = journal.import_snapshot(&payload)?;
            println!("imported {count} entries");
        }
        Command::Export { file } => {
            fs::write(file, journal.export_snapshot()?)?;
            println!("exported {} entries", journal.store().len());
        }
    }
    Ok(())
}

fn render_entry(entry: &Entry) -> String {
    let mut line = format!("{} {}", entry.date(), entry.emojis().join(" "));
    if let Some(hue) = entry.hue() {
        line.push_str(&format!(" hue={hue}"));
    }
    if let Some(song) = entry.song() {
        let title = song.title.as_deref().unwrap_or("?");
        let artist = song.artist.as_deref().unwrap_or("?");
        line.push_str(&format!(" song=\"{title}\" by {artist}"));
    }
    line.trim_end().to_string()
}
