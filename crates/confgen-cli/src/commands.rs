use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use confgen_dialect::{Dialect, DialectRegistry, DEFAULT_DIALECT};
use confgen_diff::{plan_merge, DiffLine, EntryChange, MergePlan};
use confgen_merge::ConfigMerger;
use tracing::{debug, info};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &cli.format),
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Dialects(args) => cmd_dialects(args, &cli.format),
    }
}

fn load_registry(dialects_file: Option<&Path>) -> anyhow::Result<DialectRegistry> {
    match dialects_file {
        Some(path) => DialectRegistry::load(path)
            .with_context(|| format!("loading dialects from {}", path.display())),
        None => Ok(DialectRegistry::with_builtins()),
    }
}

/// The dialect's merger with any command-line overrides applied.
fn resolve_merger(input: &InputArgs) -> anyhow::Result<ConfigMerger> {
    let registry = load_registry(input.dialects_file.as_deref())?;
    let name = input.dialect.as_deref().unwrap_or(DEFAULT_DIALECT);
    let mut merger = registry.get(name)?.merger();
    if let Some(divider) = &input.divider {
        merger.block_divider = divider.clone();
    }
    if !input.separators.is_empty() {
        merger.separators = input.separators.clone();
    }
    debug!(dialect = name, divider = %merger.block_divider, "resolved merge convention");
    Ok(merger)
}

fn read_current(path: Option<&Path>) -> anyhow::Result<String> {
    let Some(path) = path else {
        return Ok(String::new());
    };
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "current config missing; starting empty");
            Ok(String::new())
        }
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

fn read_requested(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading overrides from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("reading {source}"))
}

fn plan(input: &InputArgs) -> anyhow::Result<MergePlan> {
    let merger = resolve_merger(input)?;
    let current = read_current(input.current.as_deref())?;
    let requested = read_requested(&input.requested)?;
    Ok(plan_merge(&merger, &current, &requested)?)
}

/// Replace `path` with `contents` via a temporary file in the same directory.
fn write_atomically(path: &Path, contents: &str) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())?;
    file.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let plan = plan(&args.input)?;

    if args.check {
        if plan.changed {
            bail!(
                "config is out of date: {} line(s) would be added, {} removed",
                plan.text.additions(),
                plan.text.deletions()
            );
        }
        println!("{} Config is up to date.", "✓".green().bold());
        return Ok(());
    }

    if let Some(path) = &args.output {
        let in_place = args.input.current.as_deref() == Some(path.as_path());
        if in_place && !plan.changed {
            info!(path = %path.display(), "config unchanged; not rewriting");
        } else {
            write_atomically(path, &plan.merged)?;
            info!(path = %path.display(), changes = plan.entries.len(), "wrote merged config");
        }
    }

    match format {
        OutputFormat::Json => println!("{}", render_plan_json(&plan)?),
        OutputFormat::Text if args.output.is_none() => print!("{}", plan.merged),
        OutputFormat::Text => {}
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let plan = plan(&args.input)?;
    match format {
        OutputFormat::Json => println!("{}", render_plan_json(&plan)?),
        OutputFormat::Text => print!("{}", render_plan(&plan)),
    }
    Ok(())
}

fn cmd_dialects(args: DialectsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let registry = load_registry(args.dialects_file.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", render_dialects_json(&registry)?),
        OutputFormat::Text => print!("{}", render_dialects(&registry)),
    }
    Ok(())
}

fn render_plan_json(plan: &MergePlan) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Dialects keyed by name; the name is not part of a dialect's own fields.
fn render_dialects_json(registry: &DialectRegistry) -> anyhow::Result<String> {
    let by_name: BTreeMap<&str, &Dialect> =
        registry.iter().map(|d| (d.name.as_str(), d)).collect();
    Ok(serde_json::to_string_pretty(&by_name)?)
}

fn render_plan(plan: &MergePlan) -> String {
    if !plan.changed {
        return "No changes.\n".to_string();
    }

    let mut out = String::new();
    for hunk in &plan.text.hunks {
        out.push_str(&format!("{}\n", hunk.header().cyan()));
        for line in &hunk.lines {
            let rendered = line.to_string();
            let styled = match line {
                DiffLine::Added(_) => rendered.green(),
                DiffLine::Removed(_) => rendered.red(),
                DiffLine::Context(_) => rendered.normal(),
            };
            out.push_str(&format!("{styled}\n"));
        }
    }

    out.push_str(&format!(
        "\n{} added, {} modified, {} removed\n",
        plan.entries.additions().to_string().green(),
        plan.entries.modifications().to_string().yellow(),
        plan.entries.removals().to_string().red(),
    ));
    for change in &plan.entries.changes {
        let line = match change {
            EntryChange::Added { entry } => format!("  {} {}", "+".green(), entry),
            EntryChange::Removed { entry } => format!("  {} {}", "-".red(), entry),
            EntryChange::Modified { old, new } => {
                format!("  {} {} → {}", "~".yellow(), old, new)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn render_dialects(registry: &DialectRegistry) -> String {
    let mut out = String::new();
    for dialect in registry.iter() {
        out.push_str(&format!(
            "{}  divider {:?}  separators {:?}  {}\n",
            dialect.name.bold(),
            dialect.block_divider,
            dialect.separators,
            dialect.description.dimmed(),
        ));
    }
    out
}
