//! Class nodes of the compiled type graph.

use crate::{Callable, ClassId, Field, QualifiedName, SourceLoc, TypeRef};

/// One class in the compiled type graph.
///
/// Read-only to the resolver and renderers. The qualified name is assigned
/// by [`TypeGraph`](crate::TypeGraph) when the class is inserted, from the
/// scope it lands in.
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// Simple name.
    pub name: String,
    /// Fully qualified name, set on insertion.
    pub qualified_name: QualifiedName,
    /// Base type reference, if the class derives from one.
    pub base: Option<TypeRef>,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Constructors in declaration order.
    pub ctors: Vec<Callable>,
    /// Methods in declaration order.
    pub methods: Vec<Callable>,
    /// Nested classes, in declaration order.
    pub nested: Vec<ClassId>,
    /// Whether the class is abstract.
    pub is_abstract: bool,
    /// Whether a (public) destructor is present.
    pub has_destructor: bool,
    /// Where the class itself is declared.
    pub loc: SourceLoc,
}

impl ClassNode {
    /// Create a class node. Most classes have a destructor; interface-like
    /// shapes opt out with [`without_destructor`](Self::without_destructor).
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            qualified_name: QualifiedName::global(name.clone()),
            name,
            base: None,
            fields: Vec::new(),
            ctors: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
            is_abstract: false,
            has_destructor: true,
            loc: SourceLoc::unknown(),
        }
    }

    // === Builder methods ===

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_ctor(mut self, ctor: Callable) -> Self {
        self.ctors.push(ctor);
        self
    }

    pub fn with_method(mut self, method: Callable) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn without_destructor(mut self) -> Self {
        self.has_destructor = false;
        self
    }

    pub fn at(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }

    // === Queries ===

    /// Abstract with no destructor: cannot be instantiated or registered,
    /// only declared as a base.
    pub fn is_interface_like(&self) -> bool {
        self.is_abstract && !self.has_destructor
    }

    /// Whether a field or method with this name exists.
    pub fn has_member(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name) || self.methods.iter().any(|m| m.name == name)
    }

    /// The location used for header deduction: first field, else first
    /// method, else first constructor, else the class's own declaration.
    ///
    /// Member locations are preferred because the class's declared location
    /// may point at a forward declaration rather than the real header.
    pub fn header_loc(&self) -> &SourceLoc {
        self.fields
            .first()
            .map(|f| &f.loc)
            .or_else(|| self.methods.first().map(|m| &m.loc))
            .or_else(|| self.ctors.first().map(|c| &c.loc))
            .unwrap_or(&self.loc)
    }
}
