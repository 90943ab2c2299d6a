//! The player-list codec (§4.6): type-switched entry decoding with legacy
//! skin reconstruction and a deferred verified-skin trailer.

use crate::codec::{Decode, Encode};
use crate::error::{CodecError, PacketDecodeError};
use crate::protocol_version::ProtocolVersion;
use crate::reader::PacketReader;
use crate::skin::SkinData;
use crate::writer::PacketWriter;

const TYPE_ADD: u8 = 0;
const TYPE_REMOVE: u8 = 1;

/// One entry in a `type == ADD` player-list packet.
///
/// `verified` is populated from the deferred trailer (§9.6: "mutates
/// already-decoded entries") on protocols `>= 1.14.60`; it is `false` for
/// anything older, where no such signal exists on the wire.
#[derive(Clone, PartialEq, Debug)]
pub struct PlayerListAddEntry {
    pub uuid: uuid::Uuid,
    pub actor_unique_id: i64,
    pub username: String,
    pub xbox_user_id: String,
    pub platform_chat_id: String,
    /// `0` when reconstructed from the legacy (pre-1.13.0) wire form, which
    /// carries no build-platform field.
    pub build_platform: i32,
    pub skin: SkinData,
    pub is_teacher: bool,
    pub is_host: bool,
    pub verified: bool,
}

impl PlayerListAddEntry {
    pub fn new(
        uuid: uuid::Uuid,
        actor_unique_id: i64,
        username: impl Into<String>,
        xbox_user_id: impl Into<String>,
        platform_chat_id: impl Into<String>,
        build_platform: i32,
        skin: SkinData,
        is_teacher: bool,
        is_host: bool,
    ) -> Self {
        Self {
            uuid,
            actor_unique_id,
            username: username.into(),
            xbox_user_id: xbox_user_id.into(),
            platform_chat_id: platform_chat_id.into(),
            build_platform,
            skin,
            is_teacher,
            is_host,
            verified: false,
        }
    }
}

/// `type ∈ {ADD, REMOVE}` plus the matching entry list (§3.5, §4.6).
#[derive(Clone, PartialEq, Debug)]
pub enum PlayerListPacket {
    Add(Vec<PlayerListAddEntry>),
    Remove(Vec<uuid::Uuid>),
}

impl PlayerListPacket {
    pub fn add(entries: Vec<PlayerListAddEntry>) -> Self {
        Self::Add(entries)
    }

    pub fn remove(uuids: Vec<uuid::Uuid>) -> Self {
        Self::Remove(uuids)
    }
}

impl Encode for PlayerListPacket {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        match self {
            Self::Add(entries) => {
                w.put_byte(TYPE_ADD);
                w.put_unsigned_var_int(entries.len() as u32);
                for e in entries {
                    w.put_uuid(e.uuid);
                    w.put_actor_unique_id(e.actor_unique_id);
                    w.put_string(&e.username);
                    if w.protocol_version() >= ProtocolVersion::V1_13_0 {
                        w.put_string(&e.xbox_user_id);
                        w.put_string(&e.platform_chat_id);
                        w.put_lint(e.build_platform);
                        e.skin.encode(w)?;
                        w.put_bool(e.is_teacher);
                        w.put_bool(e.is_host);
                    } else {
                        w.put_string(&e.skin.skin_id);
                        e.skin.skin_image.pixels.encode(w)?;
                        e.skin.cape_image.pixels.encode(w)?;
                        w.put_string(&e.skin.geometry_name);
                        w.put_string(&e.skin.geometry_data);
                        w.put_string(&e.xbox_user_id);
                        w.put_string(&e.platform_chat_id);
                    }
                }
                // Deferred verified-skin trailer: positional, re-iterating
                // the entries in the same order just written (§4.6, §9.6).
                if w.protocol_version() >= ProtocolVersion::V1_14_60 {
                    for e in entries {
                        w.put_bool(e.verified);
                    }
                }
            }
            Self::Remove(uuids) => {
                w.put_byte(TYPE_REMOVE);
                w.put_unsigned_var_int(uuids.len() as u32);
                for u in uuids {
                    w.put_uuid(*u);
                }
            }
        }
        Ok(())
    }
}

impl Decode<'_> for PlayerListPacket {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        let type_byte = r.get_byte()?;
        let count = r.get_unsigned_var_int()? as usize;

        match type_byte {
            TYPE_ADD => {
                let mut entries = Vec::with_capacity(count.min(4096));
                for _ in 0..count {
                    let uuid = r.get_uuid()?;
                    let actor_unique_id = r.get_actor_unique_id()?;
                    let username = r.get_string()?;

                    let (xbox_user_id, platform_chat_id, build_platform, skin, is_teacher, is_host);
                    if r.protocol_version() >= ProtocolVersion::V1_13_0 {
                        xbox_user_id = r.get_string()?;
                        platform_chat_id = r.get_string()?;
                        build_platform = r.get_lint()?;
                        skin = SkinData::decode(r)?;
                        is_teacher = r.get_bool()?;
                        is_host = r.get_bool()?;
                    } else {
                        let skin_id = r.get_string()?;
                        let skin_pixels = Vec::decode(r)?;
                        let cape_pixels = Vec::decode(r)?;
                        let geometry_name = r.get_string()?;
                        let geometry_json = r.get_string()?;
                        xbox_user_id = r.get_string()?;
                        platform_chat_id = r.get_string()?;
                        build_platform = 0;
                        is_teacher = false;
                        is_host = false;
                        skin = SkinData::from_legacy(skin_id, skin_pixels, cape_pixels, geometry_name, geometry_json);
                    }

                    entries.push(PlayerListAddEntry {
                        uuid,
                        actor_unique_id,
                        username,
                        xbox_user_id,
                        platform_chat_id,
                        build_platform,
                        skin,
                        is_teacher,
                        is_host,
                        verified: false,
                    });
                }

                // Second pass: the trailer mutates entries already decoded
                // above, in the same order (§9.6 — not interleaved).
                if r.protocol_version() >= ProtocolVersion::V1_14_60 {
                    for e in entries.iter_mut() {
                        e.verified = r.get_bool()?;
                    }
                }

                Ok(Self::Add(entries))
            }
            TYPE_REMOVE => {
                let mut uuids = Vec::with_capacity(count.min(4096));
                for _ in 0..count {
                    uuids.push(r.get_uuid()?);
                }
                Ok(Self::Remove(uuids))
            }
            other => Err(PacketDecodeError::UnknownPlayerListType(other).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_skin() -> SkinData {
        SkinData {
            skin_id: "geometry.humanoid.custom".to_string(),
            resource_patch: "{}".to_string(),
            skin_image: crate::skin::SkinImage::new(64, 32, vec![0u8; 64 * 32 * 4]),
            cape_image: crate::skin::SkinImage::new(32, 32, vec![0u8; 32 * 32 * 4]),
            geometry_name: "geometry.humanoid.custom".to_string(),
            geometry_data: "{}".to_string(),
        }
    }

    /// Scenario S3 — a REMOVE entry round trips its UUID exactly, and the
    /// wire layout matches the spec's worked example.
    #[test]
    fn remove_entry_round_trips_and_matches_expected_bytes() {
        let uuid = uuid::Uuid::parse_str("00112233-4455-6677-8899-AABBCCDDEEFF").unwrap();
        let packet = PlayerListPacket::remove(vec![uuid]);

        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        packet.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 1);
        assert_eq!(bytes.len(), 2 + 16);

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        let decoded = PlayerListPacket::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        match decoded {
            PlayerListPacket::Remove(uuids) => assert_eq!(uuids, vec![uuid]),
            _ => panic!("expected Remove"),
        }
    }

    /// Scenario S4 — on proto >= 1.14.60, mutating only the trailing
    /// verified-flag bytes changes each entry's flag independently.
    #[test]
    fn verified_trailer_is_positional_and_independent_per_entry() {
        let entries = vec![
            PlayerListAddEntry::new(
                uuid::Uuid::from_u128(1),
                1,
                "alice",
                "xuid1",
                "chat1",
                2,
                sample_skin(),
                false,
                false,
            ),
            PlayerListAddEntry::new(
                uuid::Uuid::from_u128(2),
                2,
                "bob",
                "xuid2",
                "chat2",
                2,
                sample_skin(),
                false,
                false,
            ),
        ];
        let packet = PlayerListPacket::add(entries);

        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        packet.encode(&mut w).unwrap();
        let mut bytes = w.into_bytes();

        let trailer_start = bytes.len() - 2;
        bytes[trailer_start] = 1;
        bytes[trailer_start + 1] = 0;

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        let decoded = PlayerListPacket::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        match decoded {
            PlayerListPacket::Add(entries) => {
                assert!(entries[0].verified);
                assert!(!entries[1].verified);
            }
            _ => panic!("expected Add"),
        }
    }

    #[test]
    fn legacy_add_entry_round_trips_pre_1_13() {
        let entries = vec![PlayerListAddEntry::new(
            uuid::Uuid::from_u128(7),
            7,
            "carol",
            "xuid7",
            "chat7",
            0,
            sample_skin(),
            false,
            false,
        )];
        let packet = PlayerListPacket::add(entries);

        let mut w = PacketWriter::new(ProtocolVersion::new(313)); // pre-1.13.0
        packet.encode(&mut w).unwrap();
        let bytes = w.into_bytes();

        let mut r = PacketReader::new(&bytes, ProtocolVersion::new(313));
        let decoded = PlayerListPacket::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        match decoded {
            PlayerListPacket::Add(entries) => {
                assert_eq!(entries[0].username, "carol");
                assert!(entries[0].skin.resource_patch.is_empty());
                assert!(!entries[0].verified);
            }
            _ => panic!("expected Add"),
        }
    }

    #[test]
    fn unknown_player_list_type_is_a_decode_error() {
        let bytes = [2u8, 0];
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        assert!(PlayerListPacket::decode(&mut r).is_err());
    }
}
