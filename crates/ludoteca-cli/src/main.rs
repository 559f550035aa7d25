//! ludoteca CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "ludoteca", version, about = "Educational mini-game sessions and progress reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game definition in the terminal
    Play {
        /// Path to a .toml game definition
        #[arg(long)]
        game: PathBuf,

        /// Child id (overrides the selected child from the settings store)
        #[arg(long)]
        child: Option<String>,

        /// Free-text note attached to the submitted progress record
        #[arg(long)]
        note: Option<String>,

        /// Play without submitting progress to the backend
        #[arg(long)]
        offline: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate game definition TOML files
    Validate {
        /// Path to a game file or directory
        #[arg(long)]
        game: PathBuf,
    },

    /// Select the active child and classroom
    Select {
        /// Child id to select
        #[arg(long)]
        child: Option<String>,

        /// Classroom id to select
        #[arg(long)]
        classroom: Option<String>,

        /// Show the current selection instead of changing it
        #[arg(long)]
        show: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List backend entities
    List {
        /// What to list
        #[arg(value_enum)]
        what: ListTarget,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a child's progress report
    Report {
        /// Child id
        #[arg(long)]
        child: String,

        /// Output format: markdown or html
        #[arg(long, value_enum, default_value = "markdown")]
        format: ReportFormat,

        /// Output file (defaults to relatorio-<child>.<ext>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example game definition
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListTarget {
    Children,
    Classrooms,
    Activities,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Html,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ludoteca=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            game,
            child,
            note,
            offline,
            config,
        } => commands::play::execute(game, child, note, offline, config).await,
        Commands::Validate { game } => commands::validate::execute(game),
        Commands::Select {
            child,
            classroom,
            show,
            config,
        } => commands::select::execute(child, classroom, show, config),
        Commands::List { what, config } => commands::list::execute(what, config).await,
        Commands::Report {
            child,
            format,
            output,
            config,
        } => commands::report::execute(child, format, output, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
