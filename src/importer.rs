use crate::host::Document;
use crate::models::{FilePath, ImportStatement};
use crate::Result;
use tracing::{debug, info, instrument};

/// Insert `import <name> from "./<target>";` at the top of `document`
/// unless the relative path already appears somewhere in its text.
///
/// Returns whether an edit was made. The insertion is awaited; the document
/// is not saved. Ordering and merging with other imports is left to the
/// user's formatter.
#[instrument(skip_all, fields(document = %document.path(), target = %target))]
pub async fn ensure_imported(
    target: &FilePath,
    document: &dyn Document,
    import_name: &str,
) -> Result<bool> {
    let statement = ImportStatement::for_target(target, import_name);
    let text = document.text().await;

    if statement.is_present_in(&text) {
        debug!("{} already referenced", statement.import_path);
        return Ok(false);
    }

    document.insert_at(0, &statement.line()).await?;
    info!("Inserted import of {}", statement.import_path);
    Ok(true)
}
