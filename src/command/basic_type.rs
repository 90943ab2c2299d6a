use crate::protocol_version::ProtocolVersion;

/// The canonical (newest-generation) basic command parameter types.
///
/// These are the codes stored in memory and used by application code
/// (§4.4.3). On the wire, older protocols use a different numbering for a
/// fixed subset of these — see [`encode_basic_type_code`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum BasicType {
    Int,
    Float,
    Value,
    WildcardInt,
    Operator,
    CompareOperator,
    Target,
    WildcardTarget,
    Filepath,
    FullIntegerRange,
    EquipmentSlot,
    String,
    IntPosition,
    Position,
    Message,
    RawText,
    Json,
    BlockStates,
    Command,
}

impl BasicType {
    /// The code this type carries in memory, and on the wire for any
    /// protocol at or above [`ProtocolVersion::BASIC_TYPE_NUMBERING_CURRENT`].
    pub const fn canonical_code(self) -> u8 {
        match self {
            Self::Int => 1,
            Self::Float => 2,
            Self::Value => 3,
            Self::WildcardInt => 4,
            Self::Operator => 5,
            Self::CompareOperator => 6,
            Self::Target => 7,
            Self::WildcardTarget => 8,
            Self::Filepath => 9,
            Self::FullIntegerRange => 10,
            Self::EquipmentSlot => 11,
            Self::String => 12,
            Self::IntPosition => 13,
            Self::Position => 14,
            Self::Message => 15,
            Self::RawText => 16,
            Self::Json => 17,
            Self::BlockStates => 18,
            Self::Command => 19,
        }
    }

    /// The wire code this type carried before the current numbering was
    /// adopted. Only the types named in §4.4.3 moved; anything not covered
    /// here falls through unchanged, which `encode_basic_type_code` handles
    /// by returning the canonical code untranslated.
    /// The inverse of [`canonical_code`](Self::canonical_code). Used only
    /// when encoding: a [`ParamKind::Basic`](super::parameter::ParamKind::Basic)
    /// stores a raw code, and encoding needs to know whether that code
    /// names one of the types this module's translation table covers.
    pub const fn from_canonical_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Int),
            2 => Some(Self::Float),
            3 => Some(Self::Value),
            4 => Some(Self::WildcardInt),
            5 => Some(Self::Operator),
            6 => Some(Self::CompareOperator),
            7 => Some(Self::Target),
            8 => Some(Self::WildcardTarget),
            9 => Some(Self::Filepath),
            10 => Some(Self::FullIntegerRange),
            11 => Some(Self::EquipmentSlot),
            12 => Some(Self::String),
            13 => Some(Self::IntPosition),
            14 => Some(Self::Position),
            15 => Some(Self::Message),
            16 => Some(Self::RawText),
            17 => Some(Self::Json),
            18 => Some(Self::BlockStates),
            19 => Some(Self::Command),
            _ => None,
        }
    }

    const fn legacy_code(self) -> u8 {
        match self {
            Self::Int => 1,
            Self::Float => 2,
            Self::Value => 3,
            Self::WildcardInt => 4,
            Self::Operator => 5,
            Self::CompareOperator => 6,
            Self::Target => 7,
            Self::WildcardTarget => 8,
            Self::Filepath => 17,
            Self::FullIntegerRange => 18,
            Self::EquipmentSlot => 38,
            Self::String => 39,
            Self::IntPosition => 42,
            Self::Position => 47,
            Self::Message => 51,
            Self::RawText => 53,
            Self::Json => 57,
            Self::BlockStates => 67,
            Self::Command => 70,
        }
    }
}

impl ProtocolVersion {
    /// From this version, basic command parameter type codes use their
    /// current (canonical) numbering. Below it, [`encode_basic_type_code`]
    /// translates the fixed set of types that moved.
    pub const BASIC_TYPE_NUMBERING_CURRENT: Self = Self::V1_19_0;
}

/// Translates a canonical basic type code to the wire code for `proto`.
///
/// Only applied on encode. Decode never runs this in reverse — a packet
/// decoded on an older protocol carries the older numeric code as-is in
/// memory (§4.4.3); re-encoding such a value at the same protocol is not
/// guaranteed to reproduce the original bytes, since the stored code is
/// already a wire code, not a canonical one. Encode a canonical in-memory
/// catalog instead when producing bytes for an old protocol.
pub fn encode_basic_type_code(canonical: BasicType, proto: ProtocolVersion) -> u8 {
    if proto >= ProtocolVersion::BASIC_TYPE_NUMBERING_CURRENT {
        canonical.canonical_code()
    } else {
        canonical.legacy_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmoved_types_pass_through_unchanged() {
        for proto in [ProtocolVersion::V1_13_0, ProtocolVersion::V1_19_0] {
            assert_eq!(encode_basic_type_code(BasicType::Int, proto), 1);
            assert_eq!(encode_basic_type_code(BasicType::Operator, proto), 5);
        }
    }

    #[test]
    fn moved_types_translate_below_the_current_numbering() {
        assert_eq!(
            encode_basic_type_code(BasicType::Json, ProtocolVersion::V1_17_10),
            57
        );
        assert_eq!(
            encode_basic_type_code(BasicType::Json, ProtocolVersion::V1_19_0),
            17
        );
    }
}
