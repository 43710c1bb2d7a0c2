//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use infragen_core::domain::TargetKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "infragen",
    bin_name = "infragen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "One project description, three deployment targets",
    long_about = "infragen turns a single project description into Docker Compose, \
                  Ansible and Terraform artifacts.",
    after_help = "EXAMPLES:\n\
        \x20 infragen init web-app --name blog\n\
        \x20 infragen generate docker --output deploy\n\
        \x20 infragen validate --target terraform\n\
        \x20 infragen completions bash > /usr/share/bash-completion/completions/infragen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a project file from a preset.
    #[command(
        about = "Initialize a new project from a preset",
        after_help = "EXAMPLES:\n\
            \x20 infragen init web-app --name blog\n\
            \x20 infragen init microservice --name shop --environment production\n\
            \x20 infragen init database --name records --output infra --force"
    )]
    Init(InitArgs),

    /// Render deployment artifacts.
    #[command(
        visible_alias = "gen",
        about = "Generate infrastructure configurations",
        after_help = "EXAMPLES:\n\
            \x20 infragen generate\n\
            \x20 infragen generate docker --output deploy\n\
            \x20 infragen generate terraform --project infra/infra-gen.yml --dry-run"
    )]
    Generate(GenerateArgs),

    /// Check a project file.
    #[command(
        about = "Validate project configuration",
        after_help = "EXAMPLES:\n\
            \x20 infragen validate\n\
            \x20 infragen validate --target ansible"
    )]
    Validate(ValidateArgs),

    /// List presets, categories or the current project.
    #[command(
        visible_alias = "ls",
        about = "List available presets and project information",
        after_help = "EXAMPLES:\n\
            \x20 infragen list\n\
            \x20 infragen list presets --category databases\n\
            \x20 infragen list categories\n\
            \x20 infragen list project --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 infragen completions bash > ~/.local/share/bash-completion/completions/infragen\n\
            \x20 infragen completions zsh  > ~/.zfunc/_infragen\n\
            \x20 infragen completions fish > ~/.config/fish/completions/infragen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the infragen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 infragen config get defaults.environment\n\
            \x20 infragen config list\n\
            \x20 infragen config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `infragen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Preset to start from.
    #[arg(value_name = "PRESET", help = "Preset id (see `infragen list`)")]
    pub preset: String,

    /// Project name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Environment label; defaults to `defaults.environment` from the config.
    #[arg(
        short = 'e',
        long = "environment",
        value_name = "ENV",
        help = "Environment (development, staging, production)"
    )]
    pub environment: Option<String>,

    /// Directory that receives `infra-gen.yml`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Replace an existing project file.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing project file")]
    pub force: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `infragen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Which target to render.
    #[arg(value_enum, default_value = "all", help = "Target to generate")]
    pub target: TargetArg,

    /// Project file to read.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "FILE",
        help = "Project configuration file (default: infra-gen.yml)"
    )]
    pub project: Option<PathBuf>,

    /// Directory that receives the generated files.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: output.directory from the config)"
    )]
    pub output: Option<PathBuf>,

    /// Render without writing anything.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `infragen validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project file to read.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "FILE",
        help = "Project configuration file (default: infra-gen.yml)"
    )]
    pub project: Option<PathBuf>,

    /// Which target's rules to check.
    #[arg(
        short = 't',
        long = "target",
        value_enum,
        default_value = "all",
        help = "Target to validate"
    )]
    pub target: TargetArg,
}

/// A single target or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    All,
    #[value(aliases = ["compose", "docker-compose"])]
    Docker,
    Ansible,
    #[value(alias = "tf")]
    Terraform,
}

impl TargetArg {
    /// The targets this selection expands to, in canonical order.
    pub fn kinds(self) -> Vec<TargetKind> {
        match self {
            Self::All => TargetKind::ALL.to_vec(),
            Self::Docker => vec![TargetKind::Docker],
            Self::Ansible => vec![TargetKind::Ansible],
            Self::Terraform => vec![TargetKind::Terraform],
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `infragen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum, default_value = "presets", help = "What to list")]
    pub what: ListKind,

    /// Only presets in this category.
    #[arg(long = "category", value_name = "CATEGORY", help = "Filter presets by category")]
    pub category: Option<String>,

    /// Project file for `list project`.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "FILE",
        help = "Project configuration file (for 'list project')"
    )]
    pub project: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Presets,
    Categories,
    Project,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON document.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `infragen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `infragen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.environment`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Write `.infragen.toml` in the current directory instead.
        #[arg(long = "local", help = "Create local configuration in current directory")]
        local: bool,

        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_command() {
        let cli = Cli::parse_from(["infragen", "init", "web-app", "--name", "blog"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.preset, "web-app");
        assert_eq!(args.name, "blog");
        assert!(args.environment.is_none());
        assert!(!args.force);
    }

    #[test]
    fn init_requires_a_name() {
        assert!(Cli::try_parse_from(["infragen", "init", "web-app"]).is_err());
    }

    #[test]
    fn generate_defaults_to_all_targets() {
        let cli = Cli::parse_from(["infragen", "generate"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.target, TargetArg::All);
        assert_eq!(args.target.kinds(), TargetKind::ALL.to_vec());
    }

    #[test]
    fn target_aliases() {
        let cli = Cli::parse_from(["infragen", "gen", "tf"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.target.kinds(), vec![TargetKind::Terraform]);

        let cli = Cli::parse_from(["infragen", "validate", "-t", "compose"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.target, TargetArg::Docker);
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(Cli::try_parse_from(["infragen", "generate", "kubernetes"]).is_err());
    }

    #[test]
    fn list_defaults_to_presets_table() {
        let cli = Cli::parse_from(["infragen", "ls"]);
        let Commands::List(args) = cli.command else {
            panic!("expected List command");
        };
        assert_eq!(args.what, ListKind::Presets);
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["infragen", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
