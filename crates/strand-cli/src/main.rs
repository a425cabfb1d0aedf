//! Strand CLI - catalog management from the command line
//!
//! This is the main entry point for users interacting with Strand. It
//! drives the catalog, the matching engine and the relationship editor
//! through one-shot commands, persisting through the sled store.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use strand_core::Role;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "strand")]
#[command(author = "Strand Contributors")]
#[command(version)]
#[command(about = "Catalog and variant-graph manager for hairstyles", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Store directory
    #[arg(long, global = true, default_value = ".strand")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Structural role, as a CLI argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Parent,
    Child,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Parent => Role::Parent,
            RoleArg::Child => Role::Child,
        }
    }
}

/// Entity fields shared by `add` and `edit`.
#[derive(Debug, clap::Args)]
struct EntityArgs {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Description text
    #[arg(long)]
    description: Option<String>,

    /// Length label
    #[arg(long)]
    length: Option<String>,

    /// Style label
    #[arg(long)]
    style: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,

    /// Fallback glyph shown when no image is set
    #[arg(long)]
    emoji: Option<String>,

    /// Image file to attach (path is stored, constraints checked)
    #[arg(long)]
    image: Option<PathBuf>,

    /// Structural role
    #[arg(long, value_enum)]
    role: Option<RoleArg>,

    /// Comma-separated parent ids (child role)
    #[arg(long)]
    parents: Option<String>,

    /// Comma-separated children ids (parent role)
    #[arg(long)]
    children: Option<String>,

    /// Sides attribute (e.g. mid-fade)
    #[arg(long)]
    sides: Option<String>,

    /// Top attribute (e.g. with-volume)
    #[arg(long)]
    top: Option<String>,

    /// Bangs attribute (e.g. swept)
    #[arg(long)]
    bangs: Option<String>,

    /// Finish attribute (e.g. classic)
    #[arg(long)]
    finish: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store from the seed dataset
    Init {
        /// Seed dataset JSON document
        #[arg(long, default_value = "data/hairstyles.json")]
        data: PathBuf,

        /// Re-seed even if the store already has data
        #[arg(long)]
        force: bool,
    },

    /// Show catalog statistics and consistency state
    Status,

    /// List catalog entries
    List {
        /// Only entries carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Substring search over names and descriptions
        #[arg(long)]
        search: Option<String>,

        /// Only favorite entries
        #[arg(long)]
        favorites: bool,

        /// Sort by name instead of catalog order
        #[arg(long)]
        sort: bool,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<usize>,

        /// Entries per page
        #[arg(long, default_value = "9")]
        per_page: usize,
    },

    /// Show one entry in full
    Show {
        id: u32,
    },

    /// Add a catalog entry
    Add {
        #[command(flatten)]
        entity: EntityArgs,
    },

    /// Edit an existing entry; omitted fields keep their value
    Edit {
        id: u32,

        #[command(flatten)]
        entity: EntityArgs,
    },

    /// Delete an entry, retracting it from links and favorites
    Delete {
        id: u32,
    },

    /// Toggle favorite status for an entry
    Favorite {
        id: u32,
    },

    /// Find the best-matching entry for a criteria vector
    Match {
        #[arg(long, default_value = "mid-fade")]
        sides: String,

        #[arg(long, default_value = "with-volume")]
        top: String,

        #[arg(long, default_value = "with-texture")]
        bangs: String,

        #[arg(long, default_value = "modern")]
        finish: String,

        /// List every candidate with its score
        #[arg(long)]
        all: bool,

        /// Maximum results when listing all
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show the per-attribute breakdown for the best match
        #[arg(long)]
        report: bool,
    },

    /// Link a child entry under a parent entry
    Link {
        child: u32,
        parent: u32,
    },

    /// Detach a child entry from all of its parents
    Unlink {
        child: u32,
    },

    /// Detach every child from a parent entry
    ClearChildren {
        parent: u32,
    },

    /// Change an entry's structural role
    Role {
        id: u32,

        #[arg(value_enum)]
        role: RoleArg,
    },

    /// Revert the most recent structural edit
    Undo,

    /// Reapply the last undone structural edit
    Redo,

    /// Report the first graph consistency violation, if any
    Validate,

    /// Export the catalog as a JSON document
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a previously exported document
    Import {
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let store = cli.store;
    let result = match cli.command {
        Commands::Init { data, force } => commands::init(&store, &data, force),
        Commands::Status => commands::status(&store),
        Commands::List {
            tag,
            search,
            favorites,
            sort,
            page,
            per_page,
        } => commands::list(
            &store,
            tag.as_deref(),
            search.as_deref(),
            favorites,
            sort,
            page,
            per_page,
        ),
        Commands::Show { id } => commands::show(&store, id),
        Commands::Add { entity } => commands::add(&store, entity),
        Commands::Edit { id, entity } => commands::edit(&store, id, entity),
        Commands::Delete { id } => commands::delete(&store, id),
        Commands::Favorite { id } => commands::favorite(&store, id),
        Commands::Match {
            sides,
            top,
            bangs,
            finish,
            all,
            limit,
            report,
        } => commands::find_match(&store, &sides, &top, &bangs, &finish, all, limit, report),
        Commands::Link { child, parent } => commands::link(&store, child, parent),
        Commands::Unlink { child } => commands::unlink(&store, child),
        Commands::ClearChildren { parent } => commands::clear_children(&store, parent),
        Commands::Role { id, role } => commands::role(&store, id, role.into()),
        Commands::Undo => commands::undo(&store),
        Commands::Redo => commands::redo(&store),
        Commands::Validate => commands::validate(&store),
        Commands::Export { output } => commands::export(&store, output.as_deref()),
        Commands::Import { input } => commands::import(&store, &input),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
