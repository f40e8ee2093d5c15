use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;
use std::sync::Arc;

use css_module_companion::host::fs::{FileDocument, FsWorkspace};
use css_module_companion::{CommandOutcome, Companion, CompanionCommand, FilePath};

use crate::cli::host::{TerminalDisplay, TerminalPrompt};
use crate::cli::utils::{print_json, OutputFormat};
use crate::cli::CliContext;

/// Run one companion command with `file` as the active document.
pub async fn handle_run(
    command: CompanionCommand,
    matches: &ArgMatches,
    ctx: &CliContext,
) -> Result<()> {
    let outcome = execute(command, matches, ctx).await?;

    if ctx.format == OutputFormat::Json {
        print_json(&outcome)?;
    }

    Ok(())
}

/// Activate against the workspace, run `command` and save the component
/// when `import --write` inserted a line.
pub async fn execute(
    command: CompanionCommand,
    matches: &ArgMatches,
    ctx: &CliContext,
) -> Result<CommandOutcome> {
    let file = matches
        .get_one::<PathBuf>("file")
        .context("a file argument is required")?;
    let write = command == CompanionCommand::Import && matches.get_flag("write");

    let storage = Arc::new(ctx.storage());
    let native = ctx.resolve_arg(file)?;
    let active = FilePath::from_native(&ctx.root, &native);

    let document = Arc::new(
        FileDocument::open(storage.as_ref(), active)
            .await
            .with_context(|| format!("cannot open {}", native.display()))?,
    );
    let display = Arc::new(TerminalDisplay::new(
        ctx.root.clone(),
        document.clone(),
        ctx.format,
    ));
    let prompt = Arc::new(TerminalPrompt::new(ctx.assume_yes));

    let workspace = FsWorkspace::new(&ctx.root);
    let companion = Companion::activate(&workspace, storage.clone(), prompt, display).await?;

    let outcome = companion.run(command, &ctx.config.companion).await?;

    if write && matches!(outcome, CommandOutcome::Imported { inserted: true, .. }) {
        document.save(storage.as_ref()).await?;
    }

    Ok(outcome)
}
