use crate::host::Workspace;
use crate::models::StyleExtension;
use crate::Result;
use tracing::{debug, info, instrument};

/// Guess the style language a workspace uses.
///
/// Extensions are tried in priority order; the first one with at least one
/// file in the workspace wins. A workspace without any style file gets
/// [`StyleExtension::FALLBACK`].
#[instrument(skip_all)]
pub async fn detect_default_extension(workspace: &dyn Workspace) -> Result<StyleExtension> {
    for ext in StyleExtension::ALL {
        let files = workspace.find_files(&ext.glob(), 1).await?;
        if let Some(sample) = files.first() {
            info!("Detected default style extension '{}' from {}", ext, sample);
            return Ok(ext);
        }
        debug!("No *.{} files in workspace", ext);
    }

    info!(
        "No style files in workspace, defaulting to '{}'",
        StyleExtension::FALLBACK
    );
    Ok(StyleExtension::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryStorage;

    #[tokio::test]
    async fn test_only_sass_files() {
        let workspace = MemoryStorage::with_files(["src/a.sass", "src/b.sass", "src/App.tsx"]);
        let ext = detect_default_extension(&workspace).await.unwrap();
        assert_eq!(ext, StyleExtension::Sass);
    }

    #[tokio::test]
    async fn test_priority_order_wins_over_file_count() {
        let workspace = MemoryStorage::with_files([
            "a.css",
            "b.css",
            "c.css",
            "deep/nested/theme.less",
            "d.styl",
        ]);
        let ext = detect_default_extension(&workspace).await.unwrap();
        assert_eq!(ext, StyleExtension::Less);
    }

    #[tokio::test]
    async fn test_empty_workspace_falls_back_to_css() {
        let workspace = MemoryStorage::with_files(["src/App.tsx", "README.md"]);
        let ext = detect_default_extension(&workspace).await.unwrap();
        assert_eq!(ext, StyleExtension::Css);
    }

    #[tokio::test]
    async fn test_module_files_count_as_style_files() {
        let workspace = MemoryStorage::with_files(["src/Button.module.scss"]);
        let ext = detect_default_extension(&workspace).await.unwrap();
        assert_eq!(ext, StyleExtension::Scss);
    }
}
