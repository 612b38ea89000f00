//! Selector signatures: `Type::member` and `Type::*`.

/// The wildcard token meaning "all members".
pub const WILDCARD: &str = "*";

/// The member half of a parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSelect {
    /// `Type::*` - every member of the type.
    All,
    /// `Type::member` - exactly this member.
    Named(String),
}

/// A parsed selector signature.
///
/// The last `::` segment is always the member selector; everything before
/// it is the qualified type path. `Game::Player::*` selects all of
/// `Game::Player`; `Game::Player::update` selects one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub type_path: String,
    pub member: MemberSelect,
}

impl Selector {
    /// Parse a signature. Returns `None` for signatures with no member
    /// segment (a bare type name is not a valid selector).
    pub fn parse(signature: &str) -> Option<Self> {
        let segments: Vec<&str> = signature.split("::").filter(|s| !s.is_empty()).collect();
        let (last, type_segments) = segments.split_last()?;
        if type_segments.is_empty() {
            return None;
        }
        let member = if *last == WILDCARD {
            MemberSelect::All
        } else {
            MemberSelect::Named((*last).to_string())
        };
        Some(Self {
            type_path: type_segments.join("::"),
            member,
        })
    }
}
