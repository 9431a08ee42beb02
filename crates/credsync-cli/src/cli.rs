use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "credsync")]
#[command(about = "Reconcile Apple and Google password exports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Session file holding the latest merge result
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge an Apple and a Google export into a new session
    Merge {
        /// Apple Passwords CSV export
        #[arg(long, value_name = "PATH")]
        apple: PathBuf,
        /// Google Password Manager CSV export
        #[arg(long, value_name = "PATH")]
        google: PathBuf,
        /// Merge direction (defaults to config, then bidirectional)
        #[arg(long, value_enum)]
        direction: Option<Direction>,
    },
    /// List conflicts of the current session
    Conflicts {
        /// Include conflicts that already have a decision
        #[arg(long)]
        all: bool,
        /// Show passwords instead of masking them
        #[arg(long)]
        reveal: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep one side of one or more conflicts
    Resolve {
        /// Side to keep
        #[arg(value_enum)]
        side: SideChoice,
        /// Conflict ids, e.g. conflict-0
        #[arg(value_name = "CONFLICT_ID", required_unless_present = "all")]
        conflict_ids: Vec<String>,
        /// Apply the side to every unresolved conflict
        #[arg(long, conflicts_with = "conflict_ids")]
        all: bool,
    },
    /// Show merge statistics for the current session
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the merged collection as CSV
    Export {
        /// Column layout (defaults to config, then generic)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI defaults
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Direction {
    #[value(name = "bidirectional")]
    Bidirectional,
    #[value(name = "a-to-b")]
    AToB,
    #[value(name = "b-to-a")]
    BToA,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SideChoice {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Apple,
    Google,
    Generic,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Update stored defaults
    Set {
        /// Default merge direction
        #[arg(long, value_enum)]
        direction: Option<Direction>,
        /// Default export format
        #[arg(long, value_enum)]
        export_format: Option<ExportFormat>,
        /// Default session file
        #[arg(long, value_name = "PATH")]
        session_path: Option<PathBuf>,
        /// Forget every stored default
        #[arg(long, conflicts_with_all = ["direction", "export_format", "session_path"])]
        reset: bool,
    },
    /// Print stored defaults and the values in effect
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl From<Direction> for credsync_core::MergeDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Bidirectional => Self::Bidirectional,
            Direction::AToB => Self::AToB,
            Direction::BToA => Self::BToA,
        }
    }
}

impl From<SideChoice> for credsync_core::Side {
    fn from(value: SideChoice) -> Self {
        match value {
            SideChoice::Left => Self::Left,
            SideChoice::Right => Self::Right,
        }
    }
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(value: CompletionShell) -> Self {
        match value {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
        }
    }
}

impl From<ExportFormat> for credsync_core::export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Apple => Self::Apple,
            ExportFormat::Google => Self::Google,
            ExportFormat::Generic => Self::Generic,
        }
    }
}
