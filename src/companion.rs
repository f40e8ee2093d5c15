//! The commands exposed to the host.
//!
//! A [`Companion`] is created once at activation, with the detected default
//! style extension, and then answers each command against the host's active
//! document. Settings are passed in per invocation.

use crate::config::CompanionSettings;
use crate::detector::detect_default_extension;
use crate::host::{Display, Prompt, Storage, Workspace};
use crate::importer::ensure_imported;
use crate::models::{FileKind, FilePath, StyleExtension, ViewSlot};
use crate::orchestrator::{ensure_exists, Existence};
use crate::resolver::{resolve_component_path, resolve_module_path};
use crate::{CompanionError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const EXTENSION_NAME: &str = "css-modules-companion";

/// Host-invocable commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionCommand {
    Toggle,
    Import,
    OpenModule,
    OpenComponent,
}

impl CompanionCommand {
    pub const ALL: [CompanionCommand; 4] = [
        CompanionCommand::Toggle,
        CompanionCommand::Import,
        CompanionCommand::OpenModule,
        CompanionCommand::OpenComponent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CompanionCommand::Toggle => "toggleBetweenComponentAndCssModule",
            CompanionCommand::Import => "importCorrespondingCssModule",
            CompanionCommand::OpenModule => "openCorrespondingCssModule",
            CompanionCommand::OpenComponent => "openComponentForCorrespondingCssModule",
        }
    }

    /// Fully qualified identifier, e.g.
    /// `css-modules-companion.importCorrespondingCssModule`.
    pub fn id(&self) -> String {
        format!("{}.{}", EXTENSION_NAME, self.name())
    }
}

impl FromStr for CompanionCommand {
    type Err = CompanionError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s
            .strip_prefix(EXTENSION_NAME)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(s);
        CompanionCommand::ALL
            .into_iter()
            .find(|command| command.name() == name)
            .ok_or_else(|| CompanionError::NotFound(format!("command '{}'", s)))
    }
}

impl fmt::Display for CompanionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// What a command did. Hosts show nothing for any of these; they exist so
/// callers can tell the silent cases apart.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum CommandOutcome {
    /// No active document, unrecognized file, or no component to go to.
    NotApplicable,
    /// The user declined to create the missing module.
    Cancelled { target: FilePath },
    Opened {
        path: FilePath,
        created: bool,
        slot: ViewSlot,
    },
    Imported {
        target: FilePath,
        created: bool,
        inserted: bool,
    },
}

pub struct Companion {
    default_extension: StyleExtension,
    storage: Arc<dyn Storage>,
    prompt: Arc<dyn Prompt>,
    display: Arc<dyn Display>,
}

impl Companion {
    pub fn new(
        default_extension: StyleExtension,
        storage: Arc<dyn Storage>,
        prompt: Arc<dyn Prompt>,
        display: Arc<dyn Display>,
    ) -> Self {
        Self {
            default_extension,
            storage,
            prompt,
            display,
        }
    }

    /// Detect the workspace's style extension and build the companion.
    pub async fn activate(
        workspace: &dyn Workspace,
        storage: Arc<dyn Storage>,
        prompt: Arc<dyn Prompt>,
        display: Arc<dyn Display>,
    ) -> Result<Self> {
        let default_extension = detect_default_extension(workspace).await?;
        Ok(Self::new(default_extension, storage, prompt, display))
    }

    pub fn default_extension(&self) -> StyleExtension {
        self.default_extension
    }

    pub async fn run(
        &self,
        command: CompanionCommand,
        settings: &CompanionSettings,
    ) -> Result<CommandOutcome> {
        debug!("Running {}", command);
        match command {
            CompanionCommand::Toggle => self.toggle(settings).await,
            CompanionCommand::Import => self.import_corresponding_css_module(settings).await,
            CompanionCommand::OpenModule => self.open_corresponding_css_module(settings).await,
            CompanionCommand::OpenComponent => {
                self.open_component_for_corresponding_css_module().await
            }
        }
    }

    /// Jump from a module to its component, or from a component to its
    /// module (creating it on request). Other files are ignored.
    #[instrument(skip_all)]
    pub async fn toggle(&self, settings: &CompanionSettings) -> Result<CommandOutcome> {
        let Some(document) = self.display.active_document().await else {
            return Ok(CommandOutcome::NotApplicable);
        };
        let active = document.path();

        match active.kind() {
            FileKind::StyleModule => self.open_component_for(active).await,
            FileKind::Component => self.open_module_for(active, settings).await,
            FileKind::Other => {
                debug!("{} is neither a component nor a style module", active);
                Ok(CommandOutcome::NotApplicable)
            }
        }
    }

    /// Make sure the active document's module exists and is imported.
    #[instrument(skip_all)]
    pub async fn import_corresponding_css_module(
        &self,
        settings: &CompanionSettings,
    ) -> Result<CommandOutcome> {
        let Some(document) = self.display.active_document().await else {
            return Ok(CommandOutcome::NotApplicable);
        };

        let target = resolve_module_path(document.path(), settings, self.default_extension);
        let existence = ensure_exists(&target, self.storage.as_ref(), self.prompt.as_ref()).await?;
        if !existence.is_usable() {
            return Ok(CommandOutcome::Cancelled { target });
        }

        let inserted = ensure_imported(&target, document.as_ref(), &settings.import_name).await?;
        Ok(CommandOutcome::Imported {
            target,
            created: existence == Existence::Created,
            inserted,
        })
    }

    #[instrument(skip_all)]
    pub async fn open_corresponding_css_module(
        &self,
        settings: &CompanionSettings,
    ) -> Result<CommandOutcome> {
        match self.display.active_document().await {
            Some(document) => self.open_module_for(document.path(), settings).await,
            None => Ok(CommandOutcome::NotApplicable),
        }
    }

    #[instrument(skip_all)]
    pub async fn open_component_for_corresponding_css_module(&self) -> Result<CommandOutcome> {
        match self.display.active_document().await {
            Some(document) => self.open_component_for(document.path()).await,
            None => Ok(CommandOutcome::NotApplicable),
        }
    }

    async fn open_module_for(
        &self,
        component: &FilePath,
        settings: &CompanionSettings,
    ) -> Result<CommandOutcome> {
        let target = resolve_module_path(component, settings, self.default_extension);
        let existence = ensure_exists(&target, self.storage.as_ref(), self.prompt.as_ref()).await?;
        if !existence.is_usable() {
            return Ok(CommandOutcome::Cancelled { target });
        }

        let slot = self.show(&target).await?;
        Ok(CommandOutcome::Opened {
            path: target,
            created: existence == Existence::Created,
            slot,
        })
    }

    async fn open_component_for(&self, module: &FilePath) -> Result<CommandOutcome> {
        let Some(component) = resolve_component_path(module, self.storage.as_ref()).await else {
            return Ok(CommandOutcome::NotApplicable);
        };

        let slot = self.show(&component).await?;
        Ok(CommandOutcome::Opened {
            path: component,
            created: false,
            slot,
        })
    }

    /// Reuse the view already showing `path`, otherwise open beside.
    async fn show(&self, path: &FilePath) -> Result<ViewSlot> {
        let slot = self
            .display
            .find_visible(path)
            .await
            .map(ViewSlot::Existing)
            .unwrap_or(ViewSlot::Beside);
        self.display.show(path, slot).await?;
        info!("Showing {} in {:?}", path, slot);
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_ids() {
        assert_eq!(
            CompanionCommand::Toggle.id(),
            "css-modules-companion.toggleBetweenComponentAndCssModule"
        );
        assert_eq!(
            CompanionCommand::Import.id(),
            "css-modules-companion.importCorrespondingCssModule"
        );
    }

    #[test]
    fn test_command_parse_accepts_short_and_qualified_names() {
        assert_eq!(
            "openCorrespondingCssModule".parse::<CompanionCommand>().unwrap(),
            CompanionCommand::OpenModule
        );
        assert_eq!(
            "css-modules-companion.openComponentForCorrespondingCssModule"
                .parse::<CompanionCommand>()
                .unwrap(),
            CompanionCommand::OpenComponent
        );
        assert!("css-modules-companion.unknown".parse::<CompanionCommand>().is_err());
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = CommandOutcome::Opened {
            path: FilePath::new("src/Button.tsx"),
            created: false,
            slot: ViewSlot::Beside,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "opened");
        assert_eq!(json["path"], "src/Button.tsx");
        assert_eq!(json["slot"], "beside");
    }
}
