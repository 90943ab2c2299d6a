/// A command enum: a name plus an ordered list of string values.
///
/// Interned against the shared value pool when it participates in the
/// catalog's enum pool (§3.3, §4.4.5). Two `CommandEnum`s are the same wire
/// entity iff their `name`s match — the intern table keys on name, not on
/// value-list identity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandEnum {
    pub name: String,
    pub values: Vec<String>,
}

impl CommandEnum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A command enum that may be mutated at runtime without retransmitting the
/// catalog. Not interned against the shared value pool (§3.3): its values
/// are written out directly, independent of every other enum in the
/// catalog.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SoftEnum {
    pub name: String,
    pub values: Vec<String>,
}

impl SoftEnum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Enum names that designate a catalog populated by the server at runtime
/// (e.g. the set of known command names), recognized on both encode and
/// decode (§4.4.6). Extend this list as new hardcoded enums are added; it
/// is intentionally small and explicit rather than inferred.
pub const HARDCODED_ENUM_NAMES: &[&str] = &["CommandName"];

pub fn is_hardcoded_enum_name(name: &str) -> bool {
    HARDCODED_ENUM_NAMES.contains(&name)
}
