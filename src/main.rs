use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;

use dockhost::cli::{CliArgs, OutputFormat, StartupConfig};
use dockhost::messages::{AppMsg, Msg};
use dockhost::model::{DocumentId, Workbench};
use dockhost::update::update;
use dockhost::{Cmd, HostConfig};

/// One document in the teardown report
#[derive(Debug, Serialize)]
struct ReportEntry {
    id: DocumentId,
    name: String,
    lines: usize,
}

#[derive(Debug, Serialize)]
struct TeardownReport {
    closed: Vec<ReportEntry>,
    kept: Vec<ReportEntry>,
}

/// Feed a message through update, running commands until nothing is left.
/// Returns true once a `Cmd::Quit` is produced.
fn dispatch(model: &mut Workbench, msg: Msg) -> Result<bool> {
    let mut next = Some(msg);
    while let Some(msg) = next.take() {
        next = match update(model, msg)? {
            Some(Cmd::Quit) => return Ok(true),
            Some(cmd) => cmd.execute(),
            None => None,
        };
    }
    Ok(false)
}

fn load_config(startup: &StartupConfig) -> Result<HostConfig> {
    let mut config = match &startup.config_path {
        Some(path) => HostConfig::load_from(path)?,
        None => HostConfig::load(),
    };
    if startup.disable_guard {
        config.guard_unsaved_changes = false;
    }
    Ok(config)
}

/// Open the startup documents. Slot N holds the document the N-th path
/// produced, or `None` if it failed to open; a repeated path yields the
/// same id again.
fn open_startup_documents(
    model: &mut Workbench,
    startup: &StartupConfig,
) -> Vec<Option<DocumentId>> {
    if startup.paths.is_empty() {
        return vec![Some(model.host.new_untitled())];
    }
    startup
        .paths
        .iter()
        .map(|path| match model.host.open_file(path) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!("{:#}", e);
                eprintln!("Error: {:#}", e);
                None
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    dockhost::tracing::init();

    let startup = args.into_config().map_err(anyhow::Error::msg)?;
    let mut model = Workbench::new(load_config(&startup)?);

    let slots = open_startup_documents(&mut model, &startup);

    for &idx in &startup.modified {
        let id = slots.get(idx).copied().flatten().ok_or_else(|| {
            let what = startup
                .paths
                .get(idx)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("document {}", idx + 1));
            anyhow!("Cannot mark {} as modified: it was not opened", what)
        })?;
        if let Some(document) = model.host.document_mut(id) {
            document.is_modified = true;
        }
    }

    let mut opened: Vec<(DocumentId, String, usize)> = Vec::new();
    for id in slots.into_iter().flatten() {
        if opened.iter().any(|(seen, _, _)| *seen == id) {
            continue;
        }
        if let Some(document) = model.host.document(id) {
            opened.push((id, document.display_name(), document.line_count()));
        }
    }

    let quit = dispatch(&mut model, Msg::App(AppMsg::Quit))?;

    let (kept, closed): (Vec<_>, Vec<_>) = opened
        .into_iter()
        .map(|(id, name, lines)| ReportEntry { id, name, lines })
        .partition(|entry| model.host.document(entry.id).is_some());
    let report = TeardownReport { closed, kept };

    match startup.format {
        OutputFormat::Text => {
            for entry in &report.closed {
                println!("closed  {}", entry.name);
            }
            for entry in &report.kept {
                println!("kept    {}", entry.name);
            }
            if let Some(status) = &model.status {
                eprintln!("{}", status);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if !quit {
        std::process::exit(1);
    }
    Ok(())
}
