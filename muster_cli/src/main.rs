use chrono::{Datelike, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use muster_core::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "muster")]
#[command(about = "Readiness calendar for squads and soldiers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override fixtures directory (defaults to config, then built-in sample data)
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the filtered agenda for a month or week (default)
    Agenda {
        /// View span (month, week)
        #[arg(long)]
        view: Option<String>,

        /// Cursor date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Restrict to these squads (repeatable)
        #[arg(long)]
        squad: Vec<String>,

        /// Restrict to these display categories or raw tags (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Restrict to these locations (repeatable)
        #[arg(long)]
        location: Vec<String>,

        /// Restrict to these attendees (repeatable)
        #[arg(long)]
        attendee: Vec<String>,
    },

    /// Publish a nutrition plan as calendar events
    Publish {
        /// Soldier the plan belongs to
        #[arg(long)]
        soldier: Option<i64>,

        /// Monday the first published week starts on (YYYY-MM-DD)
        #[arg(long)]
        base_monday: Option<String>,

        /// Number of week copies to publish
        #[arg(long)]
        weeks: Option<u32>,
    },

    /// List available display categories with event counts
    Categories {
        /// Cursor date used to anchor sample data (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Duplicate an event one week forward
    Duplicate {
        /// Id of the event to duplicate
        #[arg(long)]
        id: String,

        /// Cursor date used to anchor sample data (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Remove an event from the merged set
    Remove {
        /// Id of the event to remove
        #[arg(long)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Cursor date used to anchor sample data (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    muster_core::logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Agenda {
            view,
            date,
            squad,
            category,
            location,
            attendee,
        }) => cmd_agenda(
            cli.fixtures,
            &config,
            view,
            date,
            squad,
            category,
            location,
            attendee,
        ),
        Some(Commands::Publish {
            soldier,
            base_monday,
            weeks,
        }) => cmd_publish(cli.fixtures, &config, soldier, base_monday, weeks),
        Some(Commands::Categories { date }) => cmd_categories(cli.fixtures, &config, date),
        Some(Commands::Duplicate { id, date }) => cmd_duplicate(cli.fixtures, &config, &id, date),
        Some(Commands::Remove { id, yes, date }) => {
            cmd_remove(cli.fixtures, &config, &id, yes, date)
        }
        None => cmd_agenda(
            cli.fixtures,
            &config,
            None,
            None,
            vec![],
            vec![],
            vec![],
            vec![],
        ),
    }
}

/// Resolve the fixtures directory: explicit flag first, then config
fn fixtures_dir(fixtures: Option<PathBuf>, config: &Config) -> PathBuf {
    fixtures.unwrap_or_else(|| config.data.fixtures_dir.clone())
}

/// Load the nutrition plan from the fixtures directory, or the built-in
/// sample plan when no fixtures exist on disk.
fn load_plan(fixtures: Option<PathBuf>, config: &Config) -> Result<NutritionPlan> {
    let dir = fixtures_dir(fixtures, config);
    if dir.exists() {
        load_nutrition_plan(&dir)
    } else {
        tracing::info!("No fixtures at {:?}, using built-in sample plan", dir);
        Ok(build_sample_nutrition_plan())
    }
}

/// Build the board from fixtures on disk, or from built-in sample data
/// anchored at the cursor's week. Unreadable fixtures degrade to an empty
/// calendar inside the board rather than aborting.
fn build_board(
    fixtures: Option<PathBuf>,
    config: &Config,
    view: ViewMode,
    cursor: NaiveDate,
) -> Result<CalendarBoard> {
    let opts = NutritionEventOptions {
        soldier_id: config.calendar.default_soldier,
        base_monday: week_monday(cursor),
        weeks: config.calendar.nutrition_weeks,
    };

    let dir = fixtures_dir(fixtures, config);
    if dir.exists() {
        let plan = load_nutrition_plan(&dir).unwrap_or_else(|e| {
            tracing::error!("Failed to load nutrition plan: {}. Publishing nothing.", e);
            NutritionPlan::default()
        });
        let nutrition = nutrition_week_to_events(&plan, &opts);
        Ok(CalendarBoard::from_sources_dir(&dir, nutrition, view, cursor))
    } else {
        tracing::info!("No fixtures at {:?}, using built-in sample data", dir);
        let mut sources = build_sample_sources(week_monday(cursor));
        sources.nutrition = nutrition_week_to_events(&build_sample_nutrition_plan(), &opts);
        Ok(CalendarBoard::new(sources, view, cursor))
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_agenda(
    fixtures: Option<PathBuf>,
    config: &Config,
    view: Option<String>,
    date: Option<String>,
    squad: Vec<String>,
    category: Vec<String>,
    location: Vec<String>,
    attendee: Vec<String>,
) -> Result<()> {
    let cursor = parse_date_or_today(date)?;
    let view = match view {
        Some(name) => ViewMode::from_name(&name)
            .ok_or_else(|| Error::Other(format!("Unknown view '{}'", name)))?,
        None => config.calendar.default_view,
    };

    let mut board = build_board(fixtures, config, view, cursor)?;

    let findings = validate_events(board.events());
    for finding in &findings {
        eprintln!("warning: {}", finding);
    }

    if !(squad.is_empty() && category.is_empty() && location.is_empty() && attendee.is_empty()) {
        board.set_selection(FilterSelection {
            squads: squad,
            types: category,
            locations: location,
            attendees: attendee,
        });
    }

    let (from, until) = view_window(view, cursor);
    let mut visible: Vec<CalendarEvent> = board
        .visible_events()
        .into_iter()
        .filter(|e| {
            let day = e.start.date_naive();
            day >= from && day < until
        })
        .collect();
    visible.sort_by_key(|e| e.start);

    println!("╭─────────────────────────────────────────╮");
    println!("│  AGENDA  {} of {}", view, cursor);
    println!("╰─────────────────────────────────────────╯");

    if visible.is_empty() {
        println!();
        println!("  No events in this {} for the current filters.", view);
        return Ok(());
    }

    let mut current_day: Option<NaiveDate> = None;
    for event in &visible {
        let day = event.start.date_naive();
        if current_day != Some(day) {
            println!();
            println!("  {} {}", day.format("%A"), day);
            current_day = Some(day);
        }
        println!("    {}", format_event_line(event));
    }

    println!();
    println!(
        "  {} of {} events shown",
        visible.len(),
        board.events().len()
    );

    Ok(())
}

fn cmd_publish(
    fixtures: Option<PathBuf>,
    config: &Config,
    soldier: Option<i64>,
    base_monday: Option<String>,
    weeks: Option<u32>,
) -> Result<()> {
    let base_monday = match base_monday {
        Some(s) => parse_date(&s)?,
        None => week_monday(Utc::now().date_naive()),
    };
    let opts = NutritionEventOptions {
        soldier_id: soldier.unwrap_or(config.calendar.default_soldier),
        base_monday,
        weeks: weeks.unwrap_or(config.calendar.nutrition_weeks),
    };

    let plan = load_plan(fixtures, config)?;
    let events = nutrition_week_to_events(&plan, &opts);

    if events.is_empty() {
        println!("No nutrition plan week to publish.");
        return Ok(());
    }

    println!(
        "✓ Published {} nutrition events for soldier {} starting {}",
        events.len(),
        opts.soldier_id,
        opts.base_monday
    );
    println!();

    for event in &events {
        let percent = event
            .extended_props
            .meal_percent_of_daily
            .map(|p| format!(" ({}% of daily target)", p))
            .unwrap_or_default();
        println!("  {}  {}{}", event.start.format("%a %H:%M"), event.title, percent);
    }

    Ok(())
}

fn cmd_categories(
    fixtures: Option<PathBuf>,
    config: &Config,
    date: Option<String>,
) -> Result<()> {
    let cursor = parse_date_or_today(date)?;
    let board = build_board(fixtures, config, config.calendar.default_view, cursor)?;

    println!("Available categories:");
    for name in &board.available_options().types {
        let tags = expand_categories(std::slice::from_ref(name));
        let count = board
            .events()
            .iter()
            .filter(|e| {
                e.extended_props
                    .event_type
                    .as_ref()
                    .is_some_and(|tag| tags.contains(tag))
            })
            .count();
        println!("  {:<24} {} event(s)", name, count);
    }

    Ok(())
}

fn cmd_duplicate(
    fixtures: Option<PathBuf>,
    config: &Config,
    id: &str,
    date: Option<String>,
) -> Result<()> {
    let cursor = parse_date_or_today(date)?;
    let mut board = build_board(fixtures, config, config.calendar.default_view, cursor)?;

    let new_id = board.duplicate_event(id)?;
    let clone = board
        .event(&new_id)
        .ok_or_else(|| Error::Event(format!("duplicated event '{}' not found", new_id)))?;

    println!("✓ Duplicated '{}' one week forward", id);
    println!("  New id: {}", clone.id);
    println!("  {}", format_event_line(clone));

    Ok(())
}

fn cmd_remove(
    fixtures: Option<PathBuf>,
    config: &Config,
    id: &str,
    yes: bool,
    date: Option<String>,
) -> Result<()> {
    let cursor = parse_date_or_today(date)?;
    let mut board = build_board(fixtures, config, config.calendar.default_view, cursor)?;

    let event = board
        .event(id)
        .ok_or_else(|| Error::Event(format!("no event with id '{}'", id)))?;
    println!("About to remove: {}", format_event_line(event));

    if !yes && !confirm_removal()? {
        println!("Removal cancelled.");
        return Ok(());
    }

    let removed = board.remove_event(id)?;
    println!("✓ Removed '{}' ({} events remain)", removed.title, board.events().len());

    Ok(())
}

fn confirm_removal() -> Result<bool> {
    print!("Remove this event? [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn format_event_line(event: &CalendarEvent) -> String {
    let mut line = format!(
        "{}–{}  {} [{}]",
        event.start.format("%H:%M"),
        event.end.format("%H:%M"),
        event.title,
        event.category()
    );

    if let Some(squad) = &event.extended_props.squad {
        line.push_str(&format!("  {}", squad));
    }
    if let Some(location) = &event.extended_props.location {
        line.push_str(&format!(" @ {}", location));
    }

    line
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| Error::Other(format!("Invalid date '{}': {}", s, e)))
}

fn parse_date_or_today(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(&s),
        None => Ok(Utc::now().date_naive()),
    }
}

/// The Monday of the week containing the given date
fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Date window covered by the view at the cursor: month boundaries or the
/// Monday-to-Monday week.
fn view_window(view: ViewMode, cursor: NaiveDate) -> (NaiveDate, NaiveDate) {
    match view {
        ViewMode::Month => {
            let from = cursor.with_day(1).unwrap_or(cursor);
            let until = from
                .checked_add_months(chrono::Months::new(1))
                .unwrap_or(from);
            (from, until)
        }
        ViewMode::Week => {
            let from = week_monday(cursor);
            (from, from + Duration::days(7))
        }
    }
}
