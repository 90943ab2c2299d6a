use thiserror::Error;

/// A read or write would have crossed the bounds of the serializer's window.
///
/// Distinct from [`PacketDecodeError`]: this indicates truncation or
/// overflow, not a protocol-semantic violation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum BoundsError {
    #[error("attempted to read past the end of the input (wanted {wanted} bytes, {remaining} remaining)")]
    ReadPastEnd { wanted: usize, remaining: usize },
    #[error("varint is too large (exceeded {0} continuation groups)")]
    VarIntTooLarge(usize),
    #[error("length-prefixed value claims a length of {claimed} bytes but only {remaining} remain")]
    LengthPrefixExceedsWindow { claimed: usize, remaining: usize },
}

/// Bytes parsed but violated a protocol rule.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PacketDecodeError {
    #[error("unknown packet ID {id}")]
    UnknownPacketId { id: u32 },
    #[error("unknown item stack request action tag {tag}")]
    UnknownActionTag { tag: u8 },
    #[error("invalid enum value index {index} (pool has {pool_len} entries)")]
    InvalidEnumValueIndex { index: u32, pool_len: usize },
    #[error("invalid postfix index {index} (pool has {pool_len} entries)")]
    InvalidPostfixIndex { index: u32, pool_len: usize },
    #[error("invalid enum index {index} (pool has {pool_len} entries)")]
    InvalidEnumIndex { index: u32, pool_len: usize },
    #[error(
        "parameter type 0x{param_type:08x} has none of the ENUM, POSTFIX, or VALID flags set"
    )]
    ParamTypeMissingFlag { param_type: u32 },
    #[error("enum constraint value index {value_index} is not a member of enum {enum_name:?}")]
    ConstraintValueNotInEnum {
        value_index: u32,
        enum_name: String,
    },
    #[error("player list entry type {0} is neither ADD nor REMOVE")]
    UnknownPlayerListType(u8),
}

/// The in-memory value being encoded is internally inconsistent — a
/// programmer error in the caller, not a data error.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum EncodeLogicError {
    #[error("parameter references enum {0:?}, which the intern-table builder never interned")]
    EnumNotInterned(String),
    #[error("item stack request action has no wire tag for protocol version {0:?}")]
    ActionUnrepresentableAtProtocol(crate::protocol_version::ProtocolVersion),
    #[error("constraint affects value {value:?} which is not a member of enum {enum_name:?}")]
    ConstraintValueNotInEnum { value: String, enum_name: String },
}

/// The unified error type returned from this crate's public encode/decode
/// entry points.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Decode(#[from] PacketDecodeError),
    #[error(transparent)]
    EncodeLogic(#[from] EncodeLogicError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
