use crate::host::{PickItem, Prompt, Storage};
use crate::models::FilePath;
use crate::Result;
use tracing::{debug, info, instrument};

pub const CREATE_LABEL: &str = "$(file-add) Create CSS Module";
pub const CANCEL_LABEL: &str = "$(close) Cancel";
pub const CREATE_PLACEHOLDER: &str = "Create new CSS module?";

const CREATE_INDEX: usize = 0;

/// State of a target after [`ensure_exists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    AlreadyExists,
    Created,
    Declined,
}

impl Existence {
    /// Whether the target can now be opened.
    pub fn is_usable(&self) -> bool {
        !matches!(self, Existence::Declined)
    }
}

/// Make sure `path` can be opened, creating an empty file if the user
/// agrees.
///
/// Returns [`Existence::Declined`] when the user cancels or dismisses the
/// prompt; nothing is written in that case. Write failures are returned as errors.
#[instrument(skip_all, fields(path = %path))]
pub async fn ensure_exists(
    path: &FilePath,
    storage: &dyn Storage,
    prompt: &dyn Prompt,
) -> Result<Existence> {
    if storage.exists(path).await {
        debug!("Target already exists");
        return Ok(Existence::AlreadyExists);
    }

    let items = [
        PickItem::new(CREATE_LABEL)
            .with_description(path.basename())
            .preselected(),
        PickItem::new(CANCEL_LABEL),
    ];

    match prompt.pick(CREATE_PLACEHOLDER, &items).await? {
        Some(CREATE_INDEX) => {
            storage.write(path, b"").await?;
            info!("Created {}", path);
            Ok(Existence::Created)
        }
        _ => {
            debug!("Creation declined");
            Ok(Existence::Declined)
        }
    }
}
