use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

static STYLE_MODULE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.module\.(css|scss|sass|less|styl)$").expect("valid style module pattern")
});

static COMPONENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(tsx|ts|jsx|js)$").expect("valid component pattern"));

/// Slash-separated logical resource path.
///
/// Paths are always kept in POSIX form regardless of the host platform, so
/// `dirname`/`basename`/`extname` behave the same everywhere.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "String", into = "String")]
pub struct FilePath(String);

impl FilePath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().replace('\\', "/"))
    }

    /// Build a logical path for `path` relative to `root`.
    ///
    /// Paths outside `root` keep their full form.
    pub fn from_native(root: &Path, path: &Path) -> Self {
        let Ok(relative) = path.strip_prefix(root) else {
            return Self::new(path.to_string_lossy().into_owned());
        };
        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect();
        Self::new(segments.join("/"))
    }

    pub fn to_native(&self, root: &Path) -> PathBuf {
        let path = Path::new(&self.0);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn dirname(&self) -> &str {
        match self.0.rfind('/') {
            None => ".",
            Some(0) => "/",
            Some(idx) => &self.0[..idx],
        }
    }

    pub fn basename(&self) -> &str {
        match self.0.rfind('/') {
            None => &self.0,
            Some(idx) => &self.0[idx + 1..],
        }
    }

    /// Extension including the leading dot, or `""` for dotfiles and
    /// names without one.
    pub fn extname(&self) -> &str {
        let base = self.basename();
        match base.rfind('.') {
            None | Some(0) => "",
            Some(idx) => &base[idx..],
        }
    }

    /// Base name with the extension stripped.
    pub fn stem(&self) -> &str {
        let base = self.basename();
        &base[..base.len() - self.extname().len()]
    }

    /// A path with `file_name` in the same directory as this one.
    pub fn sibling(&self, file_name: &str) -> FilePath {
        match self.dirname() {
            "." => FilePath::new(file_name),
            "/" => FilePath::new(format!("/{}", file_name)),
            dir => FilePath::new(format!("{}/{}", dir, file_name)),
        }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::classify(self)
    }
}

impl From<String> for FilePath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for FilePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<FilePath> for String {
    fn from(path: FilePath) -> Self {
        path.0
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recognized style languages, in detection priority order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StyleExtension {
    Scss,
    Sass,
    Less,
    Styl,
    Css,
}

impl StyleExtension {
    pub const ALL: [StyleExtension; 5] = [
        StyleExtension::Scss,
        StyleExtension::Sass,
        StyleExtension::Less,
        StyleExtension::Styl,
        StyleExtension::Css,
    ];

    /// Used when nothing else applies.
    pub const FALLBACK: StyleExtension = StyleExtension::Css;

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleExtension::Scss => "scss",
            StyleExtension::Sass => "sass",
            StyleExtension::Less => "less",
            StyleExtension::Styl => "styl",
            StyleExtension::Css => "css",
        }
    }

    /// Workspace glob that finds files of this language.
    pub fn glob(&self) -> String {
        format!("**/*.{}", self.as_str())
    }
}

impl FromStr for StyleExtension {
    type Err = crate::CompanionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleExtension::ALL
            .into_iter()
            .find(|ext| ext.as_str() == s)
            .ok_or_else(|| {
                crate::CompanionError::Configuration(format!("unknown style extension '{}'", s))
            })
    }
}

impl fmt::Display for StyleExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component source extensions, in resolution priority order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComponentExtension {
    Tsx,
    Jsx,
    Ts,
    Js,
}

impl ComponentExtension {
    pub const ALL: [ComponentExtension; 4] = [
        ComponentExtension::Tsx,
        ComponentExtension::Jsx,
        ComponentExtension::Ts,
        ComponentExtension::Js,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentExtension::Tsx => "tsx",
            ComponentExtension::Jsx => "jsx",
            ComponentExtension::Ts => "ts",
            ComponentExtension::Js => "js",
        }
    }
}

impl fmt::Display for ComponentExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured style extension. Anything that is not a recognized
/// extension reads as `Auto`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum ExtensionSetting {
    #[default]
    Auto,
    Fixed(StyleExtension),
}

impl ExtensionSetting {
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim()
            .to_ascii_lowercase()
            .parse::<StyleExtension>()
            .map(ExtensionSetting::Fixed)
            .unwrap_or(ExtensionSetting::Auto)
    }

    /// The extension to use, given the detected workspace default.
    pub fn resolve(&self, detected: StyleExtension) -> StyleExtension {
        match self {
            ExtensionSetting::Auto => detected,
            ExtensionSetting::Fixed(ext) => *ext,
        }
    }
}

impl From<String> for ExtensionSetting {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl From<ExtensionSetting> for String {
    fn from(setting: ExtensionSetting) -> Self {
        setting.to_string()
    }
}

impl fmt::Display for ExtensionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionSetting::Auto => f.write_str("auto"),
            ExtensionSetting::Fixed(ext) => f.write_str(ext.as_str()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionDirection {
    ComponentToModule,
    ModuleToComponent,
}

impl FromStr for ResolutionDirection {
    type Err = crate::CompanionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component-to-module" => Ok(ResolutionDirection::ComponentToModule),
            "module-to-component" => Ok(ResolutionDirection::ModuleToComponent),
            other => Err(crate::CompanionError::Configuration(format!(
                "unknown resolution direction '{}'",
                other
            ))),
        }
    }
}

/// What the toggle command sees when it looks at a path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    StyleModule,
    Component,
    Other,
}

impl FileKind {
    pub fn classify(path: &FilePath) -> Self {
        if STYLE_MODULE_PATTERN.is_match(path.as_str()) {
            FileKind::StyleModule
        } else if COMPONENT_PATTERN.is_match(path.as_str()) {
            FileKind::Component
        } else {
            FileKind::Other
        }
    }

    pub fn direction(&self) -> Option<ResolutionDirection> {
        match self {
            FileKind::StyleModule => Some(ResolutionDirection::ModuleToComponent),
            FileKind::Component => Some(ResolutionDirection::ComponentToModule),
            FileKind::Other => None,
        }
    }
}

/// The single line inserted into a component to wire its style module in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub import_name: String,
    pub import_path: String,
}

impl ImportStatement {
    pub fn for_target(target: &FilePath, import_name: &str) -> Self {
        Self {
            import_name: import_name.to_string(),
            import_path: format!("./{}", target.basename()),
        }
    }

    /// Substring check, not syntax-aware: a comment or string that happens
    /// to contain the path counts too.
    pub fn is_present_in(&self, text: &str) -> bool {
        text.contains(&self.import_path)
    }

    pub fn line(&self) -> String {
        format!("import {} from \"{}\";\n", self.import_name, self.import_path)
    }
}

/// Identifier of an editor view that can display a document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u32);

/// Where a document should be shown.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ViewSlot {
    /// Reuse the view that already shows the document.
    Existing(ViewId),
    /// Open in a new view next to the active one.
    Beside,
}
