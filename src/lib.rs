pub mod companion;
pub mod config;
pub mod detector;
pub mod error;
pub mod host;
pub mod importer;
pub mod models;
pub mod orchestrator;
pub mod resolver;

pub use companion::{CommandOutcome, Companion, CompanionCommand};
pub use config::{CompanionSettings, Config};
pub use error::{CompanionError, Result};
pub use models::{
    ComponentExtension, ExtensionSetting, FileKind, FilePath, ResolutionDirection,
    StyleExtension, ViewId, ViewSlot,
};
