//! Command line front end for the habit store.
//!
//! Thin wrapper: parses arguments, opens the SQLite-backed store, runs one
//! operation, prints the result. All domain rules live in the library.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use levelup::{
    dates, HabitId, HabitStore, HabitUpdate, LogScheduler, NewHabit, ReminderTime, SqliteStore,
};

/// Resolve the default database path, preferring the platform data dir
fn default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or(std::env::temp_dir());

    let dir = base.join("levelup");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("levelup.db"))
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Track habits, streaks and XP", long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new habit
    Add {
        name: String,
        /// Emoji or glyph shown next to the name
        #[arg(long, default_value = "⭐")]
        icon: String,
        /// Accent color
        #[arg(long, default_value = "#4f9cf9")]
        color: String,
        /// Track weekly instead of daily
        #[arg(long)]
        weekly: bool,
        /// Daily reminder time as HH:MM
        #[arg(long)]
        reminder: Option<String>,
        /// XP awarded per completion
        #[arg(long, default_value_t = levelup::XP_PER_COMPLETION)]
        xp: u32,
    },
    /// List habits with their streaks
    List {
        /// Include archived habits
        #[arg(long)]
        all: bool,
    },
    /// Mark a habit done for a day (defaults to today)
    Done {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Record a rest day instead of a completion
        #[arg(long)]
        skip: bool,
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove a day's completion
    Undo {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Archive a habit, keeping its history
    Archive { id: String },
    /// Delete a habit and all of its history
    Delete { id: String },
    /// Show XP level and the last week of activity
    Stats,
}

fn parse_id(s: &str) -> Result<HabitId, Box<dyn std::error::Error>> {
    Ok(HabitId::parse(s)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("levelup={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => default_database_path()?,
    };
    info!("Using database at: {}", db_path.display());

    let storage = SqliteStore::new(db_path)?;
    let mut store = HabitStore::open(storage, LogScheduler)?;

    match args.command {
        Command::Add {
            name,
            icon,
            color,
            weekly,
            reminder,
            xp,
        } => {
            let reminder_time = reminder.as_deref().map(ReminderTime::parse).transpose()?;
            let habit = store.add_habit(NewHabit {
                name,
                icon,
                color,
                frequency: if weekly {
                    levelup::Frequency::Weekly
                } else {
                    levelup::Frequency::Daily
                },
                reminder_time,
                xp_reward: xp,
            })?;
            println!("Added {} {} ({})", habit.icon, habit.name, habit.id);
        }
        Command::List { all } => {
            let habits: Vec<_> = if all {
                store.habits().iter().collect()
            } else {
                store.active_habits()
            };
            if habits.is_empty() {
                println!("No habits yet. Add one with `levelup add`.");
            }
            for habit in habits {
                let streak = store.streak(habit.id);
                println!(
                    "{} {} [{}]  streak {} (best {}){}",
                    habit.icon,
                    habit.name,
                    habit.id,
                    streak.current_streak,
                    streak.longest_streak,
                    if habit.archived { "  (archived)" } else { "" },
                );
            }
        }
        Command::Done { id, date, skip, note } => {
            let habit_id = parse_id(&id)?;
            let day = date.unwrap_or_else(dates::today);
            store.complete_habit(habit_id, day, skip, note)?;
            let streak = store.streak(habit_id);
            if skip {
                println!("Marked {} as a rest day.", day);
            } else {
                println!("Done for {}. Current streak: {}", day, streak.current_streak);
            }
        }
        Command::Undo { id, date } => {
            let habit_id = parse_id(&id)?;
            let day = date.unwrap_or_else(dates::today);
            store.uncomplete_habit(habit_id, day)?;
            println!("Cleared {} for habit {}", day, habit_id);
        }
        Command::Archive { id } => {
            let habit_id = parse_id(&id)?;
            store.archive_habit(habit_id)?;
            println!("Archived {}", habit_id);
        }
        Command::Delete { id } => {
            let habit_id = parse_id(&id)?;
            store.delete_habit(habit_id)?;
            println!("Deleted {} and its history", habit_id);
        }
        Command::Stats => {
            let level = store.level();
            println!(
                "Level {}  ({}/{} XP, {} total)",
                level.level,
                level.current,
                level.required,
                store.total_xp()
            );
            println!("Total completions: {}", store.total_completions());
            println!("Completed today: {}", store.completed_today());
            for day in store.activity(7) {
                let bar: String = std::iter::repeat('█').take(day.count as usize).collect();
                println!("{}  {:>2} {}", day.date, day.count, bar);
            }
        }
    }

    Ok(())
}
