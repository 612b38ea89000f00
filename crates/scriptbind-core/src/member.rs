//! Class members: fields, callables, parameters, default values.

use bitflags::bitflags;

use crate::{SourceLoc, TypeRef};

bitflags! {
    /// Modifiers on a field or callable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MemberTraits: u8 {
        /// Static member (class-level, no receiver).
        const STATIC = 1 << 0;
        /// Read-only field.
        const READONLY = 1 << 1;
        /// Const-qualified method.
        const CONST = 1 << 2;
    }
}

/// A parameter default value, carried in the two textual forms the
/// renderers need.
///
/// The native form is the expression as it must appear in the registration
/// unit; the declaration form is the scripting-side rendering. When the
/// native form is a plain qualified member path (`Game::Consts::kDefault`)
/// the closure resolver must select that member's owner too, or the
/// emitted expression would reference an unregistered symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    /// Expression for the native registration unit.
    pub native: String,
    /// Expression for the declaration stub.
    pub decl: String,
}

impl DefaultValue {
    /// Create a default with distinct native and declaration forms.
    pub fn new(native: impl Into<String>, decl: impl Into<String>) -> Self {
        Self {
            native: native.into(),
            decl: decl.into(),
        }
    }

    /// Create a default whose two forms are the same literal.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            native: text.clone(),
            decl: text,
        }
    }

    /// If the native form is a qualified member path, return
    /// `(owner type path, member name)`.
    ///
    /// Only pure `A::B::c` shapes qualify; literals, call expressions and
    /// arithmetic never do.
    pub fn member_ref(&self) -> Option<(String, String)> {
        let text = self.native.trim();
        if !text.contains("::") {
            return None;
        }
        let segments: Vec<&str> = text.split("::").collect();
        if segments.len() < 2 || !segments.iter().all(|s| is_path_segment(s)) {
            return None;
        }
        let member = segments[segments.len() - 1].to_string();
        let owner = segments[..segments.len() - 1].join("::");
        Some((owner, member))
    }
}

fn is_path_segment(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One parameter of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<DefaultValue>,
}

impl Param {
    /// Create a parameter without a default.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// A data field of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub traits: MemberTraits,
    pub loc: SourceLoc,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            traits: MemberTraits::empty(),
            loc: SourceLoc::unknown(),
        }
    }

    pub fn with_traits(mut self, traits: MemberTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn at(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }

    pub fn is_static(&self) -> bool {
        self.traits.contains(MemberTraits::STATIC)
    }

    pub fn is_readonly(&self) -> bool {
        self.traits.contains(MemberTraits::READONLY)
    }
}

/// A constructor or method.
///
/// Constructors carry the owning class as their return type; the resolver
/// walks return and parameter types uniformly either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    pub name: String,
    pub ret: TypeRef,
    pub params: Vec<Param>,
    pub traits: MemberTraits,
    pub loc: SourceLoc,
}

impl Callable {
    pub fn new(name: impl Into<String>, ret: TypeRef) -> Self {
        Self {
            name: name.into(),
            ret,
            params: Vec::new(),
            traits: MemberTraits::empty(),
            loc: SourceLoc::unknown(),
        }
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_traits(mut self, traits: MemberTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn at(mut self, loc: SourceLoc) -> Self {
        self.loc = loc;
        self
    }

    pub fn is_static(&self) -> bool {
        self.traits.contains(MemberTraits::STATIC)
    }

    pub fn is_const(&self) -> bool {
        self.traits.contains(MemberTraits::CONST)
    }
}
