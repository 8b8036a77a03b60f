use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{deps_command, init_command, scaffold_command, scan_command};

#[derive(Parser, Debug)]
#[command(name = "workbench")]
#[command(version, about = "Inspect and maintain local plugin projects", long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    RUST_LOG=debug                 Enable debug logging\n    WORKBENCH_CONCURRENCY=N        Override the read concurrency\n    WORKBENCH_ITEM_TIMEOUT_MS=MS   Override the per-item timeout (0 disables it)"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand; they override `.workbench.json`
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Use this config file instead of searching for `.workbench.json`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of files read at once
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Per-item read timeout in milliseconds (0 disables it)
    #[arg(long = "timeout-ms", global = true)]
    pub timeout_ms: Option<u64>,

    /// Write through a temp file and rename it into place
    #[arg(long, global = true)]
    pub atomic_writes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaffoldKind {
    /// A command handler script
    Command,
    /// An HTML page for a plugin panel
    Ui,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load project directories and list the ones that could be read
    #[command(visible_alias = "s")]
    Scan {
        /// Project directories (or, with --children, directories containing projects)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Treat each path as a folder of projects and scan its subdirectories
        #[arg(long)]
        children: bool,

        /// Print the project set as JSON
        #[arg(long)]
        json: bool,

        /// Also list the directories that were skipped and why
        #[arg(short, long)]
        diagnostics: bool,
    },
    /// Resolve installed metadata for every dependency of a project
    #[command(visible_alias = "d")]
    Deps {
        /// Project directory
        project: PathBuf,

        /// Print the dependency set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new plugin project with a descriptor and manifest
    Init {
        /// Directory to create the project in
        dir: PathBuf,

        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Manifest location relative to the project
        #[arg(short, long, default_value = "src/manifest.json")]
        manifest: String,

        /// Force overwrite an existing descriptor
        #[arg(short, long)]
        force: bool,
    },
    /// Create a new source file next to a project's manifest
    Scaffold {
        /// Project directory
        project: PathBuf,

        /// File to create, relative to the manifest's directory
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ScaffoldKind::Command)]
        kind: ScaffoldKind,

        /// Also register the file as a command with this identifier in the manifest
        #[arg(short, long)]
        register: Option<String>,
    },
}

impl Cli {
    /// Execute the selected command
    pub async fn execute(self) -> Result<()> {
        let global = self.global;
        match self.command {
            Commands::Scan {
                paths,
                children,
                json,
                diagnostics,
            } => scan_command(&global, &paths, children, json, diagnostics).await,
            Commands::Deps { project, json } => deps_command(&global, &project, json).await,
            Commands::Init {
                dir,
                name,
                manifest,
                force,
            } => init_command(&global, &dir, name.as_deref(), &manifest, force).await,
            Commands::Scaffold {
                project,
                file,
                kind,
                register,
            } => scaffold_command(&global, &project, &file, kind, register.as_deref()).await,
        }
    }
}
