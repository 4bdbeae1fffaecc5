//! Pumukit administration tool
//!
//! Drives the multimedia object store from the command line: ordering of
//! pictures, materials, links and tracks, broadcast settings, segment import
//! from Opencast media packages and the encoding workflow check.
//!
//! Usage:
//!   pumukit-admin create --title "Opening lecture"
//!   pumukit-admin track --object <ID> add --path /data/sbs.mp4 --tag sbs
//!   pumukit-admin track --object <ID> up <TRACK_ID>
//!   pumukit-admin person --object <ID> add --name "Ned" --role presenter
//!   pumukit-admin list --series <SERIES_ID> --status normal

use anyhow::{Context, Result};
use clap::Parser;
use pumukit_admin::commands::{self, ItemChange};
use pumukit_admin::{
    AdminConfig, Cli, Command, DEFAULT_CONFIG_FILE, EmbeddedAction, EmbeddedArgs, PersonAction,
    PersonArgs,
};
use pumukit_model::{EmbeddedKind, SchemaConfig};
use pumukit_storage::{MultimediaObjectGateway, SqliteObjectStore};
use pumukit_types::UuidV7Generator;
use pumukit_workflow::{InMemoryJobQueue, JobOutcome, WorkflowService};
use std::{fs, path::Path};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config_path = cli.config.clone().or_else(|| {
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.exists().then(|| default.to_path_buf())
    });
    let mut config = AdminConfig::load(config_path.as_deref())?;
    if let Some(db) = cli.db {
        config.storage.path = db;
    }
    debug!(?config, "Loaded configuration");

    if let Command::Calendar { month, year, nav } = cli.command {
        let today = chrono::Local::now().date_naive();
        let view = commands::calendar_view(today, month, year, nav)?;
        print!("{}", commands::render_calendar(&view)?);
        return Ok(());
    }

    let store = SqliteObjectStore::open(&config.storage.path)
        .with_context(|| format!("Failed to open {}", config.storage.path.display()))?;
    let retries = config.storage.max_conflict_retries;

    match cli.command {
        Command::Calendar { .. } => {}
        Command::Create { title, series } => {
            let series = series.as_deref().map(commands::parse_series_id).transpose()?;
            let id = commands::create_object(&store, &title, series)?;
            println!("{id}");
        }
        Command::Status { object, status } => {
            let id = commands::parse_object_id(&object)?;
            commands::set_status(&store, retries, &id, status)?;
            println!("{id}: {status}");
        }
        Command::List {
            series,
            statuses,
            without_prototype,
        } => {
            let series = series.as_deref().map(commands::parse_series_id).transpose()?;
            for id in commands::list_objects(&store, series.as_ref(), &statuses, without_prototype)? {
                println!("{id}");
            }
        }
        Command::Show { object } => {
            let id = commands::parse_object_id(&object)?;
            let object = store.load(&id)?;
            print!("{}", commands::describe_object(&object, &config.schema)?);
        }
        Command::Pic(args) => run_embedded(&store, retries, EmbeddedKind::Pic, args)?,
        Command::Material(args) => run_embedded(&store, retries, EmbeddedKind::Material, args)?,
        Command::Link(args) => run_embedded(&store, retries, EmbeddedKind::Link, args)?,
        Command::Track(args) => run_embedded(&store, retries, EmbeddedKind::Track, args)?,
        Command::Person(args) => run_person(&store, retries, &config.schema, args)?,
        Command::Broadcast {
            object,
            broadcast_type,
            password,
            groups,
        } => {
            let id = commands::parse_object_id(&object)?;
            let stored = commands::set_broadcast(
                &store,
                retries,
                &id,
                &broadcast_type,
                password.as_deref(),
                &groups,
            )?;
            println!("{id}: {}", stored.display_name());
        }
        Command::ImportSegments {
            object,
            media_package,
            force,
        } => {
            let id = commands::parse_object_id(&object)?;
            let raw = fs::read_to_string(&media_package)
                .with_context(|| format!("Failed to read {}", media_package.display()))?;
            let package: serde_json::Value =
                serde_json::from_str(&raw).context("Media package is not valid JSON")?;
            let report = commands::import_segments(&store, retries, &id, &package, force)?;
            match report.found {
                Some(count) => println!(" Multimedia object: {} - Segments: {count}", report.object_id),
                None => println!(" Multimedia object: {} - no segments in media package", report.object_id),
            }
            if !force {
                info!("Dry run, pass --force to import");
            }
        }
        Command::Workflow { object } => {
            let id = commands::parse_object_id(&object)?;
            let service = WorkflowService::new(config.workflow.clone(), InMemoryJobQueue::new());
            match commands::run_workflow(&store, &service, &id)? {
                Some(JobOutcome::Created(job)) => println!("{id}: queued {job}"),
                Some(JobOutcome::AlreadyQueued(job)) => println!("{id}: already queued as {job}"),
                None => println!("{id}: nothing to do"),
            }
        }
    }
    Ok(())
}

fn run_embedded(
    store: &dyn MultimediaObjectGateway,
    retries: u32,
    kind: EmbeddedKind,
    args: EmbeddedArgs,
) -> Result<()> {
    let object_id = commands::parse_object_id(&args.object)?;
    let (raw_id, change) = match args.action {
        EmbeddedAction::Add(item) => {
            let id = commands::add_embedded(store, retries, &UuidV7Generator, &object_id, kind, &item)?;
            println!("{id}");
            return Ok(());
        }
        EmbeddedAction::List => {
            let object = store.load(&object_id)?;
            for line in commands::list_embedded(&object, kind) {
                println!("{line}");
            }
            return Ok(());
        }
        EmbeddedAction::Remove { id } => (id, ItemChange::Remove),
        EmbeddedAction::Up { id } => (id, ItemChange::Up),
        EmbeddedAction::Down { id } => (id, ItemChange::Down),
    };

    let item_id = commands::parse_embedded_id(&raw_id)?;
    if commands::change_embedded(store, retries, &object_id, kind, &item_id, change)? {
        println!("{item_id}: done");
    } else {
        println!("{item_id}: unchanged");
    }
    Ok(())
}

fn run_person(
    store: &dyn MultimediaObjectGateway,
    retries: u32,
    schema: &SchemaConfig,
    args: PersonArgs,
) -> Result<()> {
    let object_id = commands::parse_object_id(&args.object)?;
    let (raw_id, role, change) = match args.action {
        PersonAction::Add(new) => {
            match commands::add_person(store, retries, schema, &object_id, &new)? {
                Some(id) => println!("{id}"),
                None => println!("already credited"),
            }
            return Ok(());
        }
        PersonAction::List => {
            let object = store.load(&object_id)?;
            for line in commands::list_people(&object) {
                println!("{line}");
            }
            return Ok(());
        }
        PersonAction::Remove { id, role } => (id, role, ItemChange::Remove),
        PersonAction::Up { id, role } => (id, role, ItemChange::Up),
        PersonAction::Down { id, role } => (id, role, ItemChange::Down),
    };

    let person_id = commands::parse_person_id(&raw_id)?;
    if commands::change_person(store, retries, &object_id, &person_id, &role, change)? {
        println!("{person_id}: done");
    } else {
        println!("{person_id}: unchanged");
    }
    Ok(())
}
