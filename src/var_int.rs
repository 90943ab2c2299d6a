use crate::codec::{Decode, Encode};
use crate::error::CodecError;
use crate::reader::PacketReader;
use crate::writer::PacketWriter;

/// A `u32` encoded as unsigned LEB128.
///
/// Adapted from the teacher's `VarInt`/`VarLong` (`valence_protocol::var_int`):
/// same shape, generalized to the unsigned and zig-zag-signed flavors the
/// Bedrock wire format actually uses, and threaded through [`PacketReader`]
/// instead of a bare slice.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct UVarInt(pub u32);

impl Encode for UVarInt {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_unsigned_var_int(self.0);
        Ok(())
    }
}

impl Decode<'_> for UVarInt {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(UVarInt(r.get_unsigned_var_int()?))
    }
}

impl From<u32> for UVarInt {
    fn from(v: u32) -> Self {
        UVarInt(v)
    }
}

impl From<UVarInt> for u32 {
    fn from(v: UVarInt) -> Self {
        v.0
    }
}

/// An `i32` encoded as LEB128 over ZigZag (`(n << 1) ^ (n >> 31)`).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct VarInt(pub i32);

impl Encode for VarInt {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_var_int(self.0);
        Ok(())
    }
}

impl Decode<'_> for VarInt {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(VarInt(r.get_var_int()?))
    }
}

impl From<i32> for VarInt {
    fn from(v: i32) -> Self {
        VarInt(v)
    }
}

impl From<VarInt> for i32 {
    fn from(v: VarInt) -> Self {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};

    use super::*;
    use crate::protocol_version::ProtocolVersion;

    fn roundtrip_uvarint(n: u32) {
        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        UVarInt(n).encode(&mut w).unwrap();
        let bytes = w.into_bytes();

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        assert_eq!(UVarInt::decode(&mut r).unwrap().0, n);
        assert!(r.is_at_end());
    }

    fn roundtrip_varint(n: i32) {
        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        VarInt(n).encode(&mut w).unwrap();
        let bytes = w.into_bytes();

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        assert_eq!(VarInt::decode(&mut r).unwrap().0, n);
        assert!(r.is_at_end());
    }

    #[test]
    fn uvarint_round_trip() {
        let mut rng = thread_rng();
        roundtrip_uvarint(0);
        roundtrip_uvarint(u32::MAX);
        for _ in 0..100_000 {
            roundtrip_uvarint(rng.gen());
        }
    }

    #[test]
    fn varint_round_trip() {
        let mut rng = thread_rng();
        roundtrip_varint(0);
        roundtrip_varint(i32::MIN);
        roundtrip_varint(i32::MAX);
        for _ in 0..100_000 {
            roundtrip_varint(rng.gen());
        }
    }

    #[test]
    fn varint_zigzag_known_values() {
        // Scenario S1's header bytes: zigzag(1) = 0x02, zigzag(10) = 0x14,
        // zigzag(64) = 0x80 0x01, zigzag(-20) = 0x27.
        roundtrip_varint(1);
        roundtrip_varint(10);
        roundtrip_varint(64);
        roundtrip_varint(-20);

        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        VarInt(64).encode(&mut w).unwrap();
        assert_eq!(w.into_bytes(), vec![0x80, 0x01]);

        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        VarInt(-20).encode(&mut w).unwrap();
        assert_eq!(w.into_bytes(), vec![0x27]);
    }

    #[test]
    fn overlong_unsigned_varint_is_bounds_error() {
        let bytes = [0xffu8, 0xff, 0xff, 0xff, 0xff, 0xff];
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        assert!(UVarInt::decode(&mut r).is_err());
    }

    #[test]
    fn truncated_varint_is_bounds_error_not_panic() {
        let bytes = [0xff, 0xff];
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        assert!(UVarInt::decode(&mut r).is_err());
    }
}
