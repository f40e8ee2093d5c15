//! Command flows against a real workspace on disk.

mod common;

use common::TestProject;
use css_module_companion::detector::detect_default_extension;
use css_module_companion::host::fs::{FileDocument, FsStorage, FsWorkspace};
use css_module_companion::host::memory::{RecordingDisplay, ScriptedPrompt};
use css_module_companion::host::{Document, Storage};
use css_module_companion::resolver::resolve_component_path;
use css_module_companion::{
    CommandOutcome, Companion, CompanionSettings, Config, FilePath, StyleExtension, ViewSlot,
};
use std::fs;
use std::sync::Arc;

async fn activate(
    project: &TestProject,
    active: &str,
    answers: Vec<Option<usize>>,
) -> (Companion, Arc<FileDocument>, Arc<RecordingDisplay>, Arc<FsStorage>) {
    let storage = Arc::new(FsStorage::new(project.root()));
    let document = Arc::new(
        FileDocument::open(storage.as_ref(), FilePath::new(active))
            .await
            .unwrap(),
    );
    let active_document: Arc<dyn Document> = document.clone();
    let display = Arc::new(RecordingDisplay::with_active(active_document));
    let companion = Companion::activate(
        &FsWorkspace::new(project.root()),
        storage.clone(),
        Arc::new(ScriptedPrompt::answering(answers)),
        display.clone(),
    )
    .await
    .unwrap();

    (companion, document, display, storage)
}

#[tokio::test]
async fn test_detect_only_sass_files() {
    let project = TestProject::with_files(&["src/a.sass", "src/nested/b.sass", "src/App.tsx"]).unwrap();

    let ext = detect_default_extension(&FsWorkspace::new(project.root()))
        .await
        .unwrap();

    assert_eq!(ext, StyleExtension::Sass);
}

#[tokio::test]
async fn test_detect_ignores_node_modules() {
    let project = TestProject::with_files(&[
        "node_modules/pkg/dist/index.scss",
        "src/theme.less",
    ])
    .unwrap();

    let ext = detect_default_extension(&FsWorkspace::new(project.root()))
        .await
        .unwrap();

    assert_eq!(ext, StyleExtension::Less);
}

#[tokio::test]
async fn test_toggle_creates_empty_module_on_disk() {
    // Arrange
    let project = TestProject::new().unwrap();
    project
        .add_file("components/Button.tsx", "export const Button = () => null;\n")
        .unwrap();
    let (companion, _document, display, _storage) =
        activate(&project, "components/Button.tsx", vec![Some(0)]).await;

    // Act
    let outcome = companion.toggle(&CompanionSettings::default()).await.unwrap();

    // Assert
    let target = FilePath::new("components/Button.module.css");
    assert_eq!(
        outcome,
        CommandOutcome::Opened {
            path: target.clone(),
            created: true,
            slot: ViewSlot::Beside,
        }
    );
    let created = project.path("components/Button.module.css");
    assert!(created.exists());
    assert_eq!(fs::metadata(created).unwrap().len(), 0);
    assert_eq!(display.shown().await, vec![(target, ViewSlot::Beside)]);
}

#[tokio::test]
async fn test_toggle_from_module_finds_component_on_disk() {
    let project = TestProject::with_files(&[
        "components/Button.module.scss",
        "components/Button.tsx",
        "components/Button.js",
    ])
    .unwrap();
    let (companion, _document, display, _storage) =
        activate(&project, "components/Button.module.scss", vec![]).await;

    let outcome = companion.toggle(&CompanionSettings::default()).await.unwrap();

    assert!(matches!(outcome, CommandOutcome::Opened { created: false, .. }));
    assert_eq!(
        display.shown().await,
        vec![(FilePath::new("components/Button.tsx"), ViewSlot::Beside)]
    );
}

#[tokio::test]
async fn test_import_then_save_rewrites_component() {
    let project = TestProject::new().unwrap();
    project.add_file("ui/Card.jsx", "export default function Card() {}\n").unwrap();
    project.add_file("ui/Card.module.less", ".card {}\n").unwrap();
    project
        .add_file("cssmod.toml", "[companion]\nimport_name = \"classes\"\n")
        .unwrap();
    let config = Config::load_from_dir(project.root()).unwrap();
    let (companion, document, _display, storage) =
        activate(&project, "ui/Card.jsx", vec![]).await;

    let outcome = companion
        .import_corresponding_css_module(&config.companion)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::Imported {
            target: FilePath::new("ui/Card.module.less"),
            created: false,
            inserted: true,
        }
    );
    // The buffer changed, the file on disk has not
    assert_eq!(
        project.read("ui/Card.jsx").unwrap(),
        "export default function Card() {}\n"
    );

    document.save(storage.as_ref()).await.unwrap();
    assert_eq!(
        project.read("ui/Card.jsx").unwrap(),
        "import classes from \"./Card.module.less\";\nexport default function Card() {}\n"
    );
}

#[tokio::test]
async fn test_component_resolution_prefers_tsx_over_js() {
    let project = TestProject::with_files(&["a/Nav.js", "a/Nav.tsx", "a/Nav.module.css"]).unwrap();
    let storage = FsStorage::new(project.root());

    let found = resolve_component_path(&FilePath::new("a/Nav.module.css"), &storage).await;

    assert_eq!(found, Some(FilePath::new("a/Nav.tsx")));
    assert!(storage.exists(&FilePath::new("a/Nav.js")).await);
}
