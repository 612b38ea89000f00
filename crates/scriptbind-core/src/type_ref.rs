use std::fmt;

/// What kind of type a [`TypeRef`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRefKind {
    /// A builtin value type (`int`, `float`, `bool`, ...). Never walked by
    /// the closure resolver.
    Primitive,
    /// A class type, addressed by qualified name. These are the edges the
    /// closure walks.
    Class,
    /// A variadic-argument marker. Not a real type; renders specially in
    /// declarations and is never walked.
    Variadic,
}

/// A reference to a type as it appears in a signature or field.
///
/// Wraps the parser's raw type spelling. For class references the name is
/// the fully qualified native spelling (`Game::Vec2`), which is what the
/// resolver looks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    name: String,
    kind: TypeRefKind,
}

impl TypeRef {
    /// Reference to a primitive type.
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeRefKind::Primitive,
        }
    }

    /// Reference to a class type by qualified name.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeRefKind::Class,
        }
    }

    /// The variadic-argument marker.
    pub fn variadic() -> Self {
        Self {
            name: "...".to_string(),
            kind: TypeRefKind::Variadic,
        }
    }

    /// The type's native spelling.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The reference kind.
    pub fn kind(&self) -> TypeRefKind {
        self.kind
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeRefKind::Primitive
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeRefKind::Class
    }

    pub fn is_variadic(&self) -> bool {
        self.kind == TypeRefKind::Variadic
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
