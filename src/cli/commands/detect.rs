use anyhow::Result;
use serde::Serialize;

use css_module_companion::detector::detect_default_extension;
use css_module_companion::host::fs::FsWorkspace;
use css_module_companion::{ExtensionSetting, StyleExtension};

use crate::cli::utils::{print_json, OutputFormat};
use crate::cli::CliContext;

#[derive(Debug, Serialize)]
pub struct Detection {
    pub root: String,
    pub detected: StyleExtension,
    pub configured: ExtensionSetting,
    pub effective: StyleExtension,
}

/// Report the detected style extension and the one new modules would use.
pub async fn handle_detect(ctx: &CliContext) -> Result<()> {
    let detection = detect(ctx).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&detection)?,
        OutputFormat::Text => println!("{}", detection.effective),
    }

    Ok(())
}

pub async fn detect(ctx: &CliContext) -> Result<Detection> {
    let detected = detect_default_extension(&FsWorkspace::new(&ctx.root)).await?;
    let configured = ctx.config.companion.file_extension;

    Ok(Detection {
        root: ctx.root.display().to_string(),
        detected,
        configured,
        effective: configured.resolve(detected),
    })
}
