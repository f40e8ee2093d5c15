//! Sibling path resolution between a component and its style module.

use crate::config::CompanionSettings;
use crate::host::Storage;
use crate::models::{ComponentExtension, FilePath, ResolutionDirection, StyleExtension};
use futures::future::join_all;
use tracing::{debug, instrument};

const MODULE_SUFFIX: &str = ".module";

/// `{name}.module.{ext}` next to the component.
pub fn resolve_module_path(
    component: &FilePath,
    settings: &CompanionSettings,
    detected: StyleExtension,
) -> FilePath {
    let ext = settings.file_extension.resolve(detected);
    let module_name = format!("{}{}.{}", component.stem(), MODULE_SUFFIX, ext);
    component.sibling(&module_name)
}

/// Component file names a module could belong to, in priority order.
/// `None` if `module` is not named `{name}.module.{ext}`.
pub fn component_candidates(module: &FilePath) -> Option<Vec<FilePath>> {
    let name = module.stem().strip_suffix(MODULE_SUFFIX)?;
    Some(
        ComponentExtension::ALL
            .iter()
            .map(|ext| module.sibling(&format!("{}.{}", name, ext)))
            .collect(),
    )
}

/// The first existing component for `module`.
///
/// All candidates are stat'ed at once; the winner is picked by declaration
/// order, not by which stat finished first.
#[instrument(skip_all, fields(module = %module))]
pub async fn resolve_component_path(module: &FilePath, storage: &dyn Storage) -> Option<FilePath> {
    let candidates = component_candidates(module)?;
    let found = join_all(candidates.iter().map(|candidate| storage.exists(candidate))).await;

    let component = candidates
        .into_iter()
        .zip(found)
        .find_map(|(candidate, exists)| exists.then_some(candidate));

    match &component {
        Some(path) => debug!("Resolved component {}", path),
        None => debug!("No component exists for module"),
    }
    component
}

pub async fn resolve_sibling(
    active: &FilePath,
    direction: ResolutionDirection,
    settings: &CompanionSettings,
    detected: StyleExtension,
    storage: &dyn Storage,
) -> Option<FilePath> {
    match direction {
        ResolutionDirection::ComponentToModule => {
            Some(resolve_module_path(active, settings, detected))
        }
        ResolutionDirection::ModuleToComponent => resolve_component_path(active, storage).await,
    }
}
