use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about)]
#[command(long_about = "A portfolio laid out as a graph of slides.\n\n\
    Slides sit on a grid and point at their neighbors; you move between them\n\
    with directional buttons while a progress bar tracks the main sequence.\n\n\
    Examples:\n  \
    folio                        Walk the built-in portfolio\n  \
    folio talk.yaml              Walk your own deck\n  \
    folio graph --pretty         Print the positioned graph as JSON\n  \
    folio check talk.yaml        Validate a deck")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to walk (defaults to the built-in portfolio)
    pub deck: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Navigate a deck interactively
    Walk {
        /// Deck file (defaults to the configured or built-in deck)
        deck: Option<PathBuf>,

        /// Node to start on instead of the deck's start node
        #[arg(long)]
        start: Option<String>,

        /// Fraction of the view kept free around a node when re-centering
        #[arg(long, value_name = "FRACTION")]
        padding: Option<f64>,

        /// Skip the loading screen
        #[arg(long)]
        no_splash: bool,
    },

    /// Build the positioned graph and print it
    Graph {
        deck: Option<PathBuf>,

        /// How directional nodes are positioned
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// Print JSON for an external renderer
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON (implies --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a deck and report unreachable or crowded nodes
    Check { deck: Option<PathBuf> },

    /// Show or set the theme preference
    Theme {
        /// New mode; omit to show the current one
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.progress, defaults.strategy, layout.gap)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Strategy {
    Grid,
    Traversal,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Walk {
                deck,
                start,
                padding,
                no_splash,
            }) => crate::commands::walk::run(deck, start, padding, no_splash),
            Some(Commands::Graph {
                deck,
                strategy,
                json,
                pretty,
            }) => crate::commands::graph::run(deck, strategy, json || pretty, pretty),
            Some(Commands::Check { deck }) => crate::commands::check::run(deck),
            Some(Commands::Theme { mode }) => crate::commands::theme::run(mode),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("folio {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => crate::commands::walk::run(self.deck, None, None, false),
        }
    }
}
