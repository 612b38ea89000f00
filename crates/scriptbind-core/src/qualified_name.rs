use std::fmt;

/// Qualified name for class identity and lookup.
///
/// The native side spells these with `::` (e.g. `Game::Core::Entity`); the
/// declaration side renders the same path with `.`.
///
/// # Examples
///
/// ```
/// use scriptbind_core::QualifiedName;
///
/// let player = QualifiedName::global("Player");
/// assert_eq!(player.to_string(), "Player");
///
/// let entity = QualifiedName::new("Entity", vec!["Game".into(), "Core".into()]);
/// assert_eq!(entity.to_string(), "Game::Core::Entity");
/// assert_eq!(entity.dotted(), "Game.Core.Entity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g. "Player").
    pub name: String,
    /// Namespace path (e.g. ["Game", "Entities"]); empty for global.
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a qualified name with a namespace path.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Parse from a qualified string (e.g. "Game::Player").
    ///
    /// Splits on `::` - the last segment is the name, the rest the
    /// namespace. A leading `::` (absolute path) is normalized away.
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.split("::").filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [] => Self::global(""),
            [name] => Self::global(*name),
            [namespace @ .., name] => Self {
                name: (*name).to_string(),
                namespace: namespace.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    /// Check if this is in the global namespace.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// The simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// The namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// The namespace as a `::`-joined string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join("::")
    }

    /// The full path rendered with `.` separators, for declaration output.
    pub fn dotted(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.namespace.join("::"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
