use byteorder::{ByteOrder, LittleEndian};

use crate::error::BoundsError;
use crate::protocol_version::ProtocolVersion;

/// A windowed read cursor over an already-framed packet payload.
///
/// Carries the [`ProtocolVersion`] the payload was produced under; every
/// version-gated helper on this type (and every packet's `decode_payload`)
/// reads that field rather than taking it as a parameter, per the
/// "protocol version is a field on the serializer" design (see crate docs).
///
/// Mirrors the teacher's slice-based `Decode` cursor, generalized to carry
/// that extra piece of state: [`Decode`](crate::codec::Decode) impls take
/// `&mut PacketReader` instead of `&mut &[u8]`.
pub struct PacketReader<'a> {
    buf: &'a [u8],
    pos: usize,
    protocol_version: ProtocolVersion,
}

impl<'a> PacketReader<'a> {
    pub fn new(buf: &'a [u8], protocol_version: ProtocolVersion) -> Self {
        Self {
            buf,
            pos: 0,
            protocol_version,
        }
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    /// Bytes remaining in the window.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Whether the cursor is exactly at the end of the window (P3).
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BoundsError> {
        if self.remaining() < n {
            return Err(BoundsError::ReadPastEnd {
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn get_byte(&mut self) -> Result<u8, BoundsError> {
        Ok(self.take(1)?[0])
    }

    pub fn get_bool(&mut self) -> Result<bool, BoundsError> {
        Ok(self.get_byte()? != 0)
    }

    pub fn get_lshort(&mut self) -> Result<u16, BoundsError> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn get_lint(&mut self) -> Result<i32, BoundsError> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn get_luint(&mut self) -> Result<u32, BoundsError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn get_llong(&mut self) -> Result<i64, BoundsError> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    pub fn get_lfloat(&mut self) -> Result<f32, BoundsError> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Unsigned LEB128, capped at 5 groups (covers the full `u32` range).
    /// Over-long encodings fail with [`BoundsError::VarIntTooLarge`] (P4).
    pub fn get_unsigned_var_int(&mut self) -> Result<u32, BoundsError> {
        const MAX_GROUPS: usize = 5;

        let mut value: u32 = 0;
        for i in 0..MAX_GROUPS {
            let byte = self.get_byte()?;
            value |= ((byte & 0x7f) as u32) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(BoundsError::VarIntTooLarge(MAX_GROUPS))
    }

    /// LEB128 over ZigZag, capped at 5 groups.
    pub fn get_var_int(&mut self) -> Result<i32, BoundsError> {
        let raw = self.get_unsigned_var_int()?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    /// Unsigned-varint length prefix, then that many raw bytes, validated
    /// as UTF-8. Length is bounded by the remaining window.
    pub fn get_string(&mut self) -> Result<String, BoundsError> {
        let len = self.get_unsigned_var_int()? as usize;
        if len > self.remaining() {
            return Err(BoundsError::LengthPrefixExceedsWindow {
                claimed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Two little-endian u64 halves, most-significant half first.
    pub fn get_uuid(&mut self) -> Result<uuid::Uuid, BoundsError> {
        let msb = LittleEndian::read_u64(self.take(8)?);
        let lsb = LittleEndian::read_u64(self.take(8)?);
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&msb.to_be_bytes());
        bytes[8..].copy_from_slice(&lsb.to_be_bytes());
        Ok(uuid::Uuid::from_bytes(bytes))
    }

    /// Three signed varints `(x, y, z)`.
    pub fn get_block_position(&mut self) -> Result<(i32, i32, i32), BoundsError> {
        Ok((self.get_var_int()?, self.get_var_int()?, self.get_var_int()?))
    }

    /// A signed varint identifying an actor.
    pub fn get_actor_unique_id(&mut self) -> Result<i64, BoundsError> {
        // Actor unique IDs are varint-encoded 64-bit values on the wire; read
        // as a zig-zag varint sized to i64 by chaining two 32-bit groups'
        // worth of continuation through the same scalar loop shape as
        // `get_var_int`, but widened.
        self.get_var_long()
    }

    /// LEB128 over ZigZag, widened to 64 bits, capped at 10 groups.
    pub fn get_var_long(&mut self) -> Result<i64, BoundsError> {
        const MAX_GROUPS: usize = 10;

        let mut raw: u64 = 0;
        let mut done = false;
        for i in 0..MAX_GROUPS {
            let byte = self.get_byte()?;
            raw |= ((byte & 0x7f) as u64) << (i * 7);
            if byte & 0x80 == 0 {
                done = true;
                break;
            }
        }
        if !done {
            return Err(BoundsError::VarIntTooLarge(MAX_GROUPS));
        }
        Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
    }

    /// A signed varint used for the item-stack-request ID and other
    /// generic network type tags.
    pub fn read_generic_type_network_id(&mut self) -> Result<i32, BoundsError> {
        self.get_var_int()
    }

    /// Reads a pool index whose on-wire width was chosen by the final size
    /// of the pool it indexes (§4.4.1).
    pub fn get_pool_index(&mut self, width: crate::command::IndexWidth) -> Result<u32, BoundsError> {
        use crate::command::IndexWidth;
        Ok(match width {
            IndexWidth::U8 => self.get_byte()? as u32,
            IndexWidth::U16 => self.get_lshort()? as u32,
            IndexWidth::U32 => self.get_luint()?,
        })
    }
}
