mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use config::ConfigMerger;
use fs_err as fs;
use linkfix_edit::{FileOutcome, RewriteOptions, render_patch, rewrite_dir};
use linkfix_render::render_report_md;
use linkfix_types::report::{FileReport, LinkfixReport, ToolInfo};
use linkfix_types::{EditKind, LineEdit, LinkRules};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "linkfix",
    version,
    about = "Remove navigation entries and redirect buttons that link to a retired page."
)]
struct Cli {
    /// Directory whose HTML files are rewritten (default: current directory).
    #[arg(long, default_value = ".")]
    dir: Utf8PathBuf,

    /// Config file (default: <dir>/linkfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Retired page, e.g. "programs.html". Overrides the config file.
    #[arg(long)]
    target: Option<String>,

    /// Page that buttons are redirected to, e.g. "contact.html". Overrides the config file.
    #[arg(long)]
    redirect: Option<String>,

    /// Print what would change without writing any file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a unified diff of all changes to this path.
    #[arg(long)]
    patch: Option<Utf8PathBuf>,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Write a markdown run report to this path.
    #[arg(long)]
    report_md: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cmd_run(cli)
}

fn cmd_run(cli: Cli) -> anyhow::Result<()> {
    let dir = cli.dir;

    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&dir).context("load linkfix.toml config")?,
    };
    let merged = ConfigMerger::new(file_config)
        .merge_args(cli.target.as_deref(), cli.redirect.as_deref())
        .context("merge config")?;

    debug!(
        "merged config: target={}, redirect={}, button_marker={}, extension={}",
        merged.rules.target_href,
        merged.rules.redirect_href,
        merged.rules.button_marker,
        merged.extension
    );

    let opts = RewriteOptions {
        dry_run: cli.dry_run,
        extension: merged.extension,
    };

    println!("Starting link removal...");
    let started_at = Utc::now();

    let outcomes = rewrite_dir(&dir, &merged.rules, &opts, &mut print_edit)?;

    let mut report = report_from_outcomes(&outcomes, merged.rules, opts.dry_run);
    report.run.started_at = Some(started_at);
    report.run.ended_at = Some(Utc::now());

    info!(
        files_scanned = report.summary.files_scanned,
        files_changed = report.summary.files_changed,
        lines_removed = report.summary.lines_removed,
        buttons_redirected = report.summary.buttons_redirected,
        lines_unresolved = report.summary.lines_unresolved,
        dry_run = opts.dry_run,
        "rewrite finished"
    );

    if let Some(path) = &cli.patch {
        write_text(path, &render_patch(&outcomes))?;
    }
    if let Some(path) = &cli.report {
        write_json(path, &report)?;
    }
    if let Some(path) = &cli.report_md {
        write_text(path, &render_report_md(&report))?;
    }

    println!("Done.");
    Ok(())
}

fn print_edit(path: &Utf8Path, edit: &LineEdit) {
    match edit.kind {
        EditKind::Removed => println!("Removing line in {}: {}", path, edit.text),
        EditKind::Redirected => println!("Redirecting button in {}: {}", path, edit.text),
    }
}

fn report_from_outcomes(outcomes: &[FileOutcome], rules: LinkRules, dry_run: bool) -> LinkfixReport {
    let mut report = LinkfixReport::new(tool_info(), rules, dry_run);
    for file in outcomes {
        let (sha256_before, sha256_after) = if file.changed() {
            (
                Some(linkfix_hash::sha256_hex(file.before.as_bytes())),
                Some(linkfix_hash::sha256_hex(file.after().as_bytes())),
            )
        } else {
            (None, None)
        };
        report.push_file(FileReport {
            path: file.path.clone(),
            changed: file.changed(),
            written: file.written,
            edits: file.outcome.edits.clone(),
            unresolved: file.outcome.unresolved.clone(),
            sha256_before,
            sha256_after,
        });
    }
    report
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "linkfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn write_text(path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path))?;
    debug!("wrote {}", path);
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    write_text(path, &s)
}
