mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reminders_core::config::GlobalConfig;
use reminders_core::query::require_access;
use reminders_core::store::{LocalStore, ProviderStore};
use reminders_core::{CalendarTime, CollectionKind, NewEvent, NewReminder, Store};

#[derive(Parser)]
#[command(name = "reminders")]
#[command(about = "Interact with your reminders and calendars from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the name of lists to pass to other commands
    ShowLists,

    /// Show upcoming reminders across all lists
    Upcoming {
        /// The amount of days to show
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Print the items on the given list
    Show {
        /// The list to print items from, see 'show-lists' for names
        list_name: String,
    },

    /// Print the anytime items on the given list
    Anytime {
        /// The list to print items from, see 'show-lists' for names
        list_name: String,
    },

    /// Add a reminder to a list
    AddReminder {
        /// The list to add to, see 'show-lists' for names
        list_name: String,

        /// The reminder contents
        #[arg(required = true, num_args = 1..)]
        reminder: Vec<String>,

        /// The date the reminder is due (yyyy-MM-dd HH:mm or yyyy-MM-dd)
        #[arg(short, long, value_parser = parse_date)]
        due_date: Option<CalendarTime>,

        /// A URL to attach
        #[arg(short, long)]
        url: Option<url::Url>,

        /// Notes to attach
        #[arg(short, long)]
        notes: Option<String>,

        /// Priority, 1 (highest) to 9 (lowest), 0 for none
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=9))]
        priority: Option<u8>,

        /// Where the reminder applies
        #[arg(long)]
        location: Option<String>,
    },

    /// Complete a reminder
    Complete {
        /// The list to complete a reminder on, see 'show-lists' for names
        list_name: String,

        /// The index of the reminder to complete, see 'show' for indexes
        #[arg(allow_negative_numbers = true)]
        index: i64,

        /// Complete an anytime reminder
        anytime: Option<bool>,

        /// The amount of days the listing covered
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Complete a reminder by its identifier
    CompleteByUuid {
        /// The uuid of the reminder to complete
        uuid: String,
    },

    /// Show all calendars
    Calendars,

    /// Show upcoming events
    Events {
        /// The calendar to show events from
        list_name: Option<String>,

        /// The amount of days to show
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Add an event to a calendar
    AddEvent {
        /// The calendar to add to, see 'calendars' for names
        list_name: String,

        /// The event title
        #[arg(required = true, num_args = 1..)]
        event: Vec<String>,

        /// When the event starts (yyyy-MM-dd HH:mm or yyyy-MM-dd)
        #[arg(short, long, value_parser = parse_date)]
        start_date: CalendarTime,

        /// When the event ends, one hour after the start by default
        #[arg(short, long, value_parser = parse_date)]
        end_date: Option<CalendarTime>,

        /// The location of the event
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Create a list or calendar in the local store
    CreateList {
        /// Title of the new list
        title: String,

        /// Create a calendar instead of a reminders list
        #[arg(long)]
        calendar: bool,
    },
}

fn parse_date(input: &str) -> Result<CalendarTime, String> {
    CalendarTime::parse_input(input).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = GlobalConfig::load()?;

    if let Commands::CreateList { title, calendar } = &cli.command {
        return create_list(&config, title, *calendar);
    }

    let store = open_store(&config)?;
    require_access(store.as_ref())?;

    dispatch(cli.command, store.as_ref(), &config)
}

fn dispatch(command: Commands, store: &dyn Store, config: &GlobalConfig) -> Result<()> {
    let horizon = |limit: Option<u32>| Some(limit.unwrap_or(config.horizon_days));
    let mut out = std::io::stdout().lock();

    match command {
        Commands::ShowLists => commands::lists::run(store, CollectionKind::Reminders, &mut out),
        Commands::Upcoming { limit } => commands::show::upcoming(store, horizon(limit), &mut out),
        Commands::Show { list_name } => {
            commands::show::list(store, &list_name, horizon(None), &mut out)
        }
        Commands::Anytime { list_name } => commands::show::anytime(store, &list_name, &mut out),
        Commands::AddReminder {
            list_name,
            reminder,
            due_date,
            url,
            notes,
            priority,
            location,
        } => {
            let new = NewReminder {
                title: reminder.join(" "),
                due: due_date,
                url: url.map(String::from),
                notes,
                priority,
                location,
            };
            commands::add::reminder(store, &list_name, new, &mut out)
        }
        Commands::Complete {
            list_name,
            index,
            anytime,
            limit,
        } => commands::complete::at_index(
            store,
            &list_name,
            index,
            anytime.unwrap_or(false),
            horizon(limit),
            &mut out,
        ),
        Commands::CompleteByUuid { uuid } => commands::complete::by_id(store, &uuid, &mut out),
        Commands::Calendars => commands::lists::run(store, CollectionKind::Events, &mut out),
        Commands::Events { list_name, limit } => {
            commands::events::run(store, list_name.as_deref(), horizon(limit), &mut out)
        }
        Commands::AddEvent {
            list_name,
            event,
            start_date,
            end_date,
            location,
        } => {
            let new = NewEvent {
                title: event.join(" "),
                start: start_date,
                end: end_date,
                location,
            };
            commands::add::event(store, &list_name, new, &mut out)
        }
        Commands::CreateList { title, calendar } => create_list(config, &title, calendar),
    }
}

/// Lists are only created in the local store; providers manage their own.
fn create_list(config: &GlobalConfig, title: &str, calendar: bool) -> Result<()> {
    if let Some(provider) = &config.provider {
        anyhow::bail!("Lists are managed by the '{provider}' provider");
    }

    let store = LocalStore::new(config.data_path());
    commands::create::run(&store, title, calendar, &mut std::io::stdout().lock())
}

fn open_store(config: &GlobalConfig) -> Result<Box<dyn Store>> {
    tracing::debug!(
        provider = ?config.provider,
        data_dir = %config.data_path().display(),
        "opening store"
    );

    match &config.provider {
        Some(name) => Ok(Box::new(ProviderStore::new(name)?)),
        None => Ok(Box::new(LocalStore::new(config.data_path()))),
    }
}
