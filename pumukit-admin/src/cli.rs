use clap::{Args, Parser, Subcommand};
use pumukit_calendar::MonthNavigation;
use pumukit_model::Status;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pumukit-admin")]
#[command(about = "Pumukit multimedia object administration")]
pub struct Cli {
    /// Path to the TOML config file (defaults to ./pumukit.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database, overriding [storage].path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a month of the event calendar
    Calendar {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        /// next, previous or today
        #[arg(long)]
        nav: Option<MonthNavigation>,
    },

    /// Create an empty multimedia object and print its id
    Create {
        #[arg(long)]
        title: String,
        /// Series the object belongs to
        #[arg(long)]
        series: Option<String>,
    },

    /// Set the publication status of an object
    Status {
        #[arg(long)]
        object: String,
        /// prototype, new, normal, blocked or hidden
        status: Status,
    },

    /// List object ids, optionally filtered by series and status
    List {
        #[arg(long)]
        series: Option<String>,
        #[arg(long = "status")]
        statuses: Vec<Status>,
        /// Leave out the series prototype
        #[arg(long)]
        without_prototype: bool,
    },

    /// Show a multimedia object summary
    Show {
        #[arg(long)]
        object: String,
    },

    /// Manage pictures of an object
    Pic(EmbeddedArgs),
    /// Manage materials of an object
    Material(EmbeddedArgs),
    /// Manage links of an object
    Link(EmbeddedArgs),
    /// Manage tracks of an object
    Track(EmbeddedArgs),
    /// Manage people credited in an object
    Person(PersonArgs),

    /// Change who can watch an object
    Broadcast {
        #[arg(long)]
        object: String,
        /// public, password, login or groups
        #[arg(long = "type")]
        broadcast_type: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long = "group")]
        groups: Vec<String>,
    },

    /// Import segments from an Opencast media package JSON file
    ImportSegments {
        #[arg(long)]
        object: String,
        #[arg(long)]
        media_package: PathBuf,
        /// Write the segments; without it only counts are reported
        #[arg(long)]
        force: bool,
    },

    /// Run the encoding workflow check on an object
    Workflow {
        #[arg(long)]
        object: String,
    },
}

#[derive(Args, Debug)]
pub struct EmbeddedArgs {
    /// Multimedia object id
    #[arg(long)]
    pub object: String,

    #[command(subcommand)]
    pub action: EmbeddedAction,
}

#[derive(Subcommand, Debug)]
pub enum EmbeddedAction {
    /// Append a new item
    Add(NewItem),
    /// Remove an item
    Remove { id: String },
    /// Move an item one place earlier
    Up { id: String },
    /// Move an item one place later
    Down { id: String },
    /// List items in display order
    List,
}

/// Fields for a new embedded item. Which ones are required depends on the kind.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub path: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub mime_type: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Duration in seconds (tracks)
    #[arg(long)]
    pub duration: Option<u64>,
    #[arg(long)]
    pub only_audio: bool,
    #[arg(long)]
    pub hide: bool,
}

#[derive(Args, Debug)]
pub struct PersonArgs {
    /// Multimedia object id
    #[arg(long)]
    pub object: String,

    #[command(subcommand)]
    pub action: PersonAction,
}

#[derive(Subcommand, Debug)]
pub enum PersonAction {
    /// Credit a person with a role
    Add(NewPerson),
    /// Remove a person from a role
    Remove {
        id: String,
        #[arg(long)]
        role: String,
    },
    /// Move a person one place earlier within a role
    Up {
        id: String,
        #[arg(long)]
        role: String,
    },
    /// Move a person one place later within a role
    Down {
        id: String,
        #[arg(long)]
        role: String,
    },
    /// List people grouped by role
    List,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    /// Id of an existing person; a new one is minted when omitted
    #[arg(long)]
    pub person: Option<String>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: Option<String>,
    /// Role code, defaults to [schema].auto_publisher_role_code
    #[arg(long)]
    pub role: Option<String>,
    /// Role display name, defaults to the code
    #[arg(long)]
    pub role_name: Option<String>,
}
