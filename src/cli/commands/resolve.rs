use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;
use std::path::PathBuf;

use css_module_companion::detector::detect_default_extension;
use css_module_companion::host::fs::FsWorkspace;
use css_module_companion::host::Storage;
use css_module_companion::resolver::resolve_sibling;
use css_module_companion::{
    ExtensionSetting, FileKind, FilePath, ResolutionDirection, StyleExtension,
};

use crate::cli::utils::{print_json, OutputFormat};
use crate::cli::CliContext;

#[derive(Debug, Serialize)]
pub struct Resolution {
    pub active: FilePath,
    pub kind: FileKind,
    pub direction: Option<ResolutionDirection>,
    pub sibling: Option<FilePath>,
    pub exists: bool,
}

/// Print the sibling of `file` without creating or editing anything.
pub async fn handle_resolve(matches: &ArgMatches, ctx: &CliContext) -> Result<()> {
    let resolution = resolve(matches, ctx).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&resolution)?,
        OutputFormat::Text => {
            if let Some(path) = &resolution.sibling {
                println!("{}", path.to_native(&ctx.root).display());
            }
        }
    }

    Ok(())
}

pub async fn resolve(matches: &ArgMatches, ctx: &CliContext) -> Result<Resolution> {
    let file = matches
        .get_one::<PathBuf>("file")
        .context("a file argument is required")?;
    let native = ctx.resolve_arg(file)?;
    let active = FilePath::from_native(&ctx.root, &native);
    let kind = active.kind();

    let direction = match matches.get_one::<String>("direction") {
        Some(raw) => Some(raw.parse::<ResolutionDirection>()?),
        None => kind.direction(),
    };

    let storage = ctx.storage();
    let sibling = match direction {
        Some(direction) => {
            let detected = match (direction, ctx.config.companion.file_extension) {
                (ResolutionDirection::ComponentToModule, ExtensionSetting::Auto) => {
                    detect_default_extension(&FsWorkspace::new(&ctx.root)).await?
                }
                // Not consulted
                _ => StyleExtension::FALLBACK,
            };
            resolve_sibling(&active, direction, &ctx.config.companion, detected, &storage).await
        }
        None => None,
    };
    let exists = match &sibling {
        Some(path) => storage.exists(path).await,
        None => false,
    };

    Ok(Resolution {
        active,
        kind,
        direction,
        sibling,
        exists,
    })
}
