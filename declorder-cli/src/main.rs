//! declorder CLI entry point
//!
//! Reports Go declarations in dependency order and optionally writes no-op
//! implementations of every interface.

mod runner;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use declorder_core::{AnalysisConfig, DeclarationKind, SortStrategy};
use declorder_utils::config::ConfigBuilder;
use declorder_utils::logging::{init_logging, LogLevel, LoggerConfig};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "declorder")]
#[command(about = "Order Go declarations by their dependencies")]
#[command(version)]
struct Cli {
    /// Default log level; RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every Go file under the given directories
    Analyze {
        /// Comma-separated list of directories to analyze
        #[arg(long)]
        dirs: Option<String>,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Report the records of a pre-extracted declaration manifest
    Manifest {
        /// Manifest file (TOML, JSON or YAML)
        file: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Kind, ordering and generation flags shared by every command
#[derive(Args, Debug, Default)]
struct SelectionArgs {
    /// Show structs
    #[arg(long)]
    structs: bool,

    /// Show interfaces
    #[arg(long)]
    interfaces: bool,

    /// Show functions
    #[arg(long)]
    functions: bool,

    /// Show variables
    #[arg(long)]
    variables: bool,

    /// Show constants
    #[arg(long)]
    constants: bool,

    /// Show imports
    #[arg(long)]
    imports: bool,

    /// Additional kinds by name
    #[arg(long = "kind", value_enum)]
    kinds: Vec<DeclarationKind>,

    /// Show all kinds
    #[arg(long)]
    all: bool,

    /// Ordering strategy
    #[arg(long, value_enum, conflicts_with = "alpha")]
    sort: Option<SortStrategy>,

    /// Use alphabetical sorting instead of topological
    #[arg(long)]
    alpha: bool,

    /// Generate NoOp implementations for interfaces
    #[arg(long)]
    noop: bool,

    /// Directory to save NoOp implementations
    #[arg(long)]
    noop_dir: Option<PathBuf>,

    /// Package clause of the generated files
    #[arg(long)]
    package: Option<String>,
}

impl SelectionArgs {
    /// Kinds picked on the command line; `None` leaves the configured set
    fn selected_kinds(&self) -> Option<Vec<DeclarationKind>> {
        if self.all {
            return Some(Vec::new());
        }

        let flags = [
            (self.structs, DeclarationKind::Struct),
            (self.interfaces, DeclarationKind::Interface),
            (self.functions, DeclarationKind::Function),
            (self.variables, DeclarationKind::Variable),
            (self.constants, DeclarationKind::Constant),
            (self.imports, DeclarationKind::Import),
        ];
        let mut kinds: Vec<DeclarationKind> =
            flags.into_iter().filter_map(|(set, kind)| set.then_some(kind)).collect();
        kinds.extend(self.kinds.iter().copied());

        (!kinds.is_empty()).then_some(kinds)
    }

    /// Partial configuration holding only what was given on the command line
    fn overrides(&self) -> anyhow::Result<Value> {
        let mut overrides = Map::new();

        if let Some(kinds) = self.selected_kinds() {
            overrides.insert("kinds".to_string(), serde_json::to_value(kinds)?);
        }

        let sort = if self.alpha { Some(SortStrategy::Alphabetical) } else { self.sort };
        if let Some(sort) = sort {
            overrides.insert("sort".to_string(), serde_json::to_value(sort)?);
        }

        let mut noop = Map::new();
        if self.noop {
            noop.insert("enabled".to_string(), json!(true));
        }
        if let Some(dir) = &self.noop_dir {
            noop.insert("output_dir".to_string(), json!(dir));
        }
        if let Some(package) = &self.package {
            noop.insert("package_name".to_string(), json!(package));
        }
        if !noop.is_empty() {
            overrides.insert("noop".to_string(), Value::Object(noop));
        }

        Ok(Value::Object(overrides))
    }
}

/// Directories from a comma-separated list, sorted, blanks dropped
fn parse_dirs(dirs: &str) -> Vec<PathBuf> {
    let mut dirs: Vec<&str> = dirs.split(',').map(str::trim).filter(|d| !d.is_empty()).collect();
    dirs.sort_unstable();
    dirs.into_iter().map(PathBuf::from).collect()
}

/// Defaults, then the config file, then command-line overrides
fn build_config(config_file: Option<&PathBuf>, overrides: Value) -> anyhow::Result<AnalysisConfig> {
    let mut builder = ConfigBuilder::<AnalysisConfig>::new();
    if let Some(path) = config_file {
        builder = builder
            .load_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
    }
    let config = builder
        .merge_value(overrides)
        .and_then(ConfigBuilder::build)
        .context("invalid configuration")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LoggerConfig {
        level: cli.log_level,
        ..Default::default()
    })?;

    match cli.command {
        Commands::Analyze { dirs, sequential, selection } => {
            let mut overrides = selection.overrides()?;
            if let Some(dirs) = dirs.as_deref() {
                overrides["dirs"] = serde_json::to_value(parse_dirs(dirs))?;
            }
            if sequential {
                overrides["parallel_processing"] = json!(false);
            }

            let config = build_config(cli.config.as_ref(), overrides)?;
            runner::prepare_output(&config)?;
            runner::run_directories(&config)
        }
        Commands::Manifest { file, selection } => {
            let config = build_config(cli.config.as_ref(), selection.overrides()?)?;
            runner::prepare_output(&config)?;
            runner::run_manifest(&file, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_sorted_and_trimmed() {
        assert_eq!(
            parse_dirs("zeta, alpha,,beta "),
            vec![PathBuf::from("alpha"), PathBuf::from("beta"), PathBuf::from("zeta")]
        );
    }

    #[test]
    fn test_no_kind_flags_keeps_configured_kinds() {
        assert_eq!(SelectionArgs::default().selected_kinds(), None);
    }

    #[test]
    fn test_all_wins_over_individual_flags() {
        let args = SelectionArgs {
            structs: true,
            all: true,
            ..Default::default()
        };
        assert_eq!(args.selected_kinds(), Some(Vec::new()));
    }

    #[test]
    fn test_overrides_build_a_config() -> anyhow::Result<()> {
        let args = SelectionArgs {
            interfaces: true,
            kinds: vec![DeclarationKind::Import],
            alpha: true,
            noop: true,
            package: Some("stubs".to_string()),
            ..Default::default()
        };

        let config = build_config(None, args.overrides()?)?;
        assert_eq!(config.sort, SortStrategy::Alphabetical);
        assert_eq!(config.active_kinds(), vec![DeclarationKind::Interface, DeclarationKind::Import]);
        assert!(config.noop.enabled);
        assert_eq!(config.noop.package_name, "stubs");
        assert_eq!(config.noop.output_dir, PathBuf::from("./noop"));
        Ok(())
    }

    #[test]
    fn test_invalid_package_is_rejected() {
        let args = SelectionArgs {
            package: Some("not-a-name".to_string()),
            ..Default::default()
        };
        let overrides = args.overrides().unwrap();
        assert!(build_config(None, overrides).is_err());
    }
}
