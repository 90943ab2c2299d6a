use std::fmt;

/// A Bedrock protocol version number.
///
/// Monotonically increasing and immutable for the lifetime of a single
/// [`PacketReader`](crate::reader::PacketReader) /
/// [`PacketWriter`](crate::writer::PacketWriter) use. Every version-gated
/// branch in this crate compares against one of the named constants below
/// rather than a bare integer, so the quirk a threshold exists for stays
/// grep-able at the call site.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    /// Enum constraints gain a dedicated list on the wire from this version.
    pub const V1_13_0: Self = Self(361);
    /// Skin blobs switch from the legacy five-string form to [`SkinData`](crate::skin::SkinData).
    pub const V1_14: Self = Self(389);
    /// Player-list ADD entries gain a trailing per-entry verified-skin flag.
    pub const V1_14_60: Self = Self(407);
    /// `SetSpawnPosition` gains an explicit dimension and causing-block position.
    pub const V1_16_0: Self = Self(407 + 1);
    /// Item-stack requests gain the `filterStrings` field.
    pub const V1_16_200: Self = Self(422);
    /// Command `flags` widens from 8 to 16 bits.
    pub const V1_17_10: Self = Self(440);
    /// Item stack request actions reach their current, canonical numbering.
    pub const V1_18_10: Self = Self(448);
    /// Reference version used throughout this crate's own tests.
    pub const V1_19_0: Self = Self(471);
    /// Item-stack requests gain the `filterStringCause` field.
    pub const V1_19_50: Self = Self(486);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol {}", self.0)
    }
}

impl From<u32> for ProtocolVersion {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
