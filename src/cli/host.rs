//! Terminal implementations of the prompt and display capabilities.

use async_trait::async_trait;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use css_module_companion::host::{Display, Document, PickItem, Prompt};
use css_module_companion::{CompanionError, FilePath, Result, ViewId, ViewSlot};

use super::utils::OutputFormat;

/// Numbered choice on stderr, answered on stdin.
///
/// An empty answer takes the preselected item. Without a terminal on stdin
/// the prompt is dismissed unless `assume_yes` is set.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// Map a typed answer to an item index.
fn parse_answer(answer: &str, items: &[PickItem]) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return items.iter().position(|item| item.picked);
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|idx| *idx < items.len())
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn pick(&self, placeholder: &str, items: &[PickItem]) -> Result<Option<usize>> {
        if self.assume_yes {
            return Ok(items.iter().position(|item| item.picked));
        }
        if !std::io::stdin().is_terminal() {
            return Ok(None);
        }

        eprintln!("{}", placeholder);
        for (idx, item) in items.iter().enumerate() {
            let marker = if item.picked { "*" } else { " " };
            match &item.description {
                Some(description) => {
                    eprintln!("{} {}) {} ({})", marker, idx + 1, item.label, description)
                }
                None => eprintln!("{} {}) {}", marker, idx + 1, item.label),
            }
        }
        eprint!("> ");

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| CompanionError::Prompt(format!("cannot read answer: {}", e)))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(parse_answer(&line, items))
    }
}

/// Prints the file to show. There is a single "view": the terminal.
pub struct TerminalDisplay {
    root: PathBuf,
    active: Arc<dyn Document>,
    format: OutputFormat,
}

impl TerminalDisplay {
    pub fn new(root: PathBuf, active: Arc<dyn Document>, format: OutputFormat) -> Self {
        Self {
            root,
            active,
            format,
        }
    }
}

#[async_trait]
impl Display for TerminalDisplay {
    async fn active_document(&self) -> Option<Arc<dyn Document>> {
        Some(self.active.clone())
    }

    async fn find_visible(&self, path: &FilePath) -> Option<ViewId> {
        (path == self.active.path()).then_some(ViewId(0))
    }

    async fn show(&self, path: &FilePath, _slot: ViewSlot) -> Result<()> {
        // JSON output reports the path as part of the command outcome
        if self.format == OutputFormat::Text {
            println!("{}", path.to_native(&self.root).display());
        }
        Ok(())
    }
}
