//! `SetSpawnPosition` (§4.7): the representative simple packet every other
//! plain-old-data packet in the full surface follows the shape of.

use crate::codec::{Decode, Encode};
use crate::error::CodecError;
use crate::protocol_version::ProtocolVersion;
use crate::reader::PacketReader;
use crate::var_int::VarInt;
use crate::writer::PacketWriter;

use super::Packet;

pub const SPAWN_TYPE_PLAYER: i32 = 0;
pub const SPAWN_TYPE_WORLD: i32 = 1;

/// `spawnType; spawnPosition; then proto >= 1.16.0: dimension,
/// causingBlockPosition; else: spawnForced`.
///
/// Per §9.6's open question, `dimension`/`causing_block_position` are
/// explicitly zeroed (not left indeterminate) when decoding a pre-1.16.0
/// payload, and `legacy_spawn_forced` only carries meaning on those older
/// protocols — it round-trips a decoded value back to the same bytes, but
/// the public constructors below don't expose it, matching §6.4's two
/// named factories.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SetSpawnPositionPacket {
    pub spawn_type: i32,
    pub spawn_position: (i32, i32, i32),
    pub dimension: i32,
    pub causing_block_position: (i32, i32, i32),
    pub legacy_spawn_forced: bool,
}

impl SetSpawnPositionPacket {
    /// A player's individual spawn point: the causing block is known.
    pub fn player_spawn(
        spawn_position: (i32, i32, i32),
        dimension: i32,
        causing_block_position: (i32, i32, i32),
    ) -> Self {
        Self {
            spawn_type: SPAWN_TYPE_PLAYER,
            spawn_position,
            dimension,
            causing_block_position,
            legacy_spawn_forced: false,
        }
    }

    /// The world spawn point: no single causing block, represented with
    /// `i32::MIN` sentinels in every axis, matching the source.
    pub fn world_spawn(spawn_position: (i32, i32, i32), dimension: i32) -> Self {
        Self {
            spawn_type: SPAWN_TYPE_WORLD,
            spawn_position,
            dimension,
            causing_block_position: (i32::MIN, i32::MIN, i32::MIN),
            legacy_spawn_forced: false,
        }
    }
}

impl Encode for SetSpawnPositionPacket {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        VarInt(self.spawn_type).encode(w)?;
        w.put_block_position(self.spawn_position);
        if w.protocol_version() >= ProtocolVersion::V1_16_0 {
            VarInt(self.dimension).encode(w)?;
            w.put_block_position(self.causing_block_position);
        } else {
            w.put_bool(self.legacy_spawn_forced);
        }
        Ok(())
    }
}

impl Decode<'_> for SetSpawnPositionPacket {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        let spawn_type = VarInt::decode(r)?.0;
        let spawn_position = r.get_block_position()?;
        if r.protocol_version() >= ProtocolVersion::V1_16_0 {
            let dimension = VarInt::decode(r)?.0;
            let causing_block_position = r.get_block_position()?;
            Ok(Self {
                spawn_type,
                spawn_position,
                dimension,
                causing_block_position,
                legacy_spawn_forced: false,
            })
        } else {
            let legacy_spawn_forced = r.get_bool()?;
            Ok(Self {
                spawn_type,
                spawn_position,
                dimension: 0,
                causing_block_position: (0, 0, 0),
                legacy_spawn_forced,
            })
        }
    }
}

impl Packet for SetSpawnPositionPacket {
    const NETWORK_ID: u32 = 43;

    fn decode_payload(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        <Self as Decode>::decode(r)
    }

    fn encode_payload(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        <Self as Encode>::encode(self, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario S1 — protocol 1.16.0+, explicit causing block filled with
    /// `INT32_MIN` sentinels (the `world_spawn` shape, though constructed
    /// by hand here to pin down the exact expected bytes).
    #[test]
    fn scenario_s1_matches_expected_bytes() {
        let packet = SetSpawnPositionPacket {
            spawn_type: 1,
            spawn_position: (10, 64, -20),
            dimension: 0,
            causing_block_position: (i32::MIN, i32::MIN, i32::MIN),
            legacy_spawn_forced: false,
        };

        let mut w = PacketWriter::new(ProtocolVersion::V1_16_0);
        packet.encode(&mut w).unwrap();
        let bytes = w.into_bytes();

        let expected = [
            0x02, 0x14, 0x80, 0x01, 0x27, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0xFF,
            0xFF, 0xFF, 0xFF, 0x0F,
        ];
        assert_eq!(bytes, expected);

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_16_0);
        let decoded = SetSpawnPositionPacket::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        assert_eq!(decoded, packet);
    }

    /// Scenario S2 — protocol 1.14 (legacy `spawnForced` tail).
    #[test]
    fn scenario_s2_matches_expected_bytes() {
        let packet = SetSpawnPositionPacket {
            spawn_type: 0,
            spawn_position: (0, 0, 0),
            dimension: 0,
            causing_block_position: (0, 0, 0),
            legacy_spawn_forced: true,
        };

        let mut w = PacketWriter::new(ProtocolVersion::V1_14);
        packet.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00, 0x01]);

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_14);
        let decoded = SetSpawnPositionPacket::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        assert_eq!(decoded, packet);
    }

    #[test]
    fn player_spawn_and_world_spawn_constructors() {
        let player = SetSpawnPositionPacket::player_spawn((1, 2, 3), 0, (4, 5, 6));
        assert_eq!(player.spawn_type, SPAWN_TYPE_PLAYER);
        assert_eq!(player.causing_block_position, (4, 5, 6));

        let world = SetSpawnPositionPacket::world_spawn((1, 2, 3), 0);
        assert_eq!(world.spawn_type, SPAWN_TYPE_WORLD);
        assert_eq!(world.causing_block_position, (i32::MIN, i32::MIN, i32::MIN));
    }

    #[test]
    fn truncated_payload_is_a_bounds_error_not_a_panic() {
        let bytes = [0x02, 0x14];
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_16_0);
        assert!(SetSpawnPositionPacket::decode(&mut r).is_err());
    }
}
