//! Runs the analysis over directories and manifests and prints reports

use anyhow::{bail, Context};
use declorder_core::analysis::{KindVisitors, PassthroughVisitor, UnitSession};
use declorder_core::source::{find_go_files, GoSourceUnit};
use declorder_core::{AnalysisConfig, DeclarationKind, DeclarationManifest};
use declorder_transform::{interface_code_generator, noop_file_path, FsFileWriter};
use declorder_utils::ensure_dir;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Everything printed for one source unit
struct UnitReport {
    report: String,
    generated: Option<declorder_core::Result<PathBuf>>,
}

/// Create the generation output directory up front
pub fn prepare_output(config: &AnalysisConfig) -> anyhow::Result<()> {
    if config.noop.enabled {
        let dir = &config.noop.output_dir;
        ensure_dir(dir).with_context(|| format!("failed to create NoOp directory {}", dir.display()))?;
    }
    Ok(())
}

fn print_banner(config: &AnalysisConfig) {
    print!("Using {} sorting", config.sort);
    if config.noop.enabled {
        print!(" with NoOp generation enabled (output: {})", config.noop.output_dir.display());
    }
    println!();
}

fn print_unit(label: &Path, unit: &UnitReport) {
    println!("\n=== Analyzing file: {} ===", label.display());
    print!("{}", unit.report);

    match &unit.generated {
        Some(Ok(path)) => println!("Generated NoOp implementations: {}", path.display()),
        Some(Err(e)) => error!(unit = %label.display(), "failed to generate NoOp file: {e}"),
        None => {}
    }
}

/// Write the interface stubs of `session` when generation applies to it
fn write_stubs<N>(
    session: &UnitSession<'_, N>,
    config: &AnalysisConfig,
    unit: &str,
) -> Option<declorder_core::Result<PathBuf>> {
    if !config.noop.enabled || !session.is_active(DeclarationKind::Interface) {
        return None;
    }

    let path = noop_file_path(&config.noop.output_dir, unit);
    match session.generate_code_file(&path) {
        Ok(true) => Some(Ok(path)),
        Ok(false) => None,
        Err(e) => Some(Err(e)),
    }
}

fn analyze_go_file(path: &Path, config: &AnalysisConfig) -> declorder_core::Result<UnitReport> {
    let unit = GoSourceUnit::from_file(path)?;

    let mut session = UnitSession::new(config, unit.kind_visitors());
    if config.noop.enabled {
        session = session.with_interface_generator(interface_code_generator(FsFileWriter));
    }
    unit.feed(&mut session);

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(UnitReport {
        report: session.render_report(),
        generated: write_stubs(&session, config, &file_name),
    })
}

/// Analyze one directory; files run in parallel unless disabled, output
/// stays in path order
fn run_directory(dir: &Path, config: &AnalysisConfig) -> declorder_core::Result<()> {
    let files = find_go_files(dir, config)?;
    info!(dir = %dir.display(), files = files.len(), "analyzing directory");

    let analyze = |path: &PathBuf| (path.clone(), analyze_go_file(path, config));
    let results: Vec<(PathBuf, declorder_core::Result<UnitReport>)> = if config.parallel_processing {
        files.par_iter().map(analyze).collect()
    } else {
        files.iter().map(analyze).collect()
    };

    for (path, result) in results {
        match result {
            Ok(unit) => print_unit(&path, &unit),
            Err(e) => warn!(file = %path.display(), "skipping file: {e}"),
        }
    }
    Ok(())
}

/// Analyze every configured directory
pub fn run_directories(config: &AnalysisConfig) -> anyhow::Result<()> {
    print_banner(config);

    let mut missing = Vec::new();
    for dir in &config.dirs {
        println!("\n=== Analyzing directory: {} ===", dir.display());

        if !dir.exists() {
            error!(dir = %dir.display(), "directory does not exist");
            missing.push(dir.display().to_string());
            continue;
        }
        if let Err(e) = run_directory(dir, config) {
            error!(dir = %dir.display(), "error analyzing directory: {e}");
        }
    }

    if !missing.is_empty() {
        bail!("missing input directories: {}", missing.join(", "));
    }
    Ok(())
}

/// Report the records of a manifest file
pub fn run_manifest(file: &Path, config: &AnalysisConfig) -> anyhow::Result<()> {
    if !file.exists() {
        bail!("manifest not found: {}", file.display());
    }
    let manifest = DeclarationManifest::load(file)
        .with_context(|| format!("failed to load manifest {}", file.display()))?;
    info!(unit = %manifest.unit, records = manifest.total_records(), "loaded manifest");

    print_banner(config);

    let mut session = UnitSession::new(config, KindVisitors::uniform(PassthroughVisitor));
    if config.noop.enabled {
        session = session.with_interface_generator(interface_code_generator(FsFileWriter));
    }
    for kind in config.active_kinds() {
        session.feed_all(kind, &manifest.entries(kind));
    }

    let unit = UnitReport {
        report: session.render_report(),
        generated: write_stubs(&session, config, &manifest.unit),
    };
    print_unit(file, &unit);
    Ok(())
}
