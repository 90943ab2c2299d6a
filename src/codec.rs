use crate::error::CodecError;
use crate::reader::PacketReader;
use crate::writer::PacketWriter;

/// Types that can be read from a protocol-versioned byte window.
///
/// Parameterized by the lifetime of the borrowed input, the way the
/// teacher's `Decode<'a>` is, so decoded values can borrow from the
/// underlying buffer where it's worthwhile. Every impl here reads through a
/// [`PacketReader`] rather than a bare slice so that version-gated fields
/// (see `ProtocolVersion`) can branch on `r.protocol_version()` without
/// threading an extra parameter through every call site.
pub trait Decode<'a>: Sized {
    fn decode(r: &mut PacketReader<'a>) -> Result<Self, CodecError>;
}

/// The inverse of [`Decode`].
pub trait Encode {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError>;
}

impl Encode for u8 {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_byte(*self);
        Ok(())
    }
}

impl Decode<'_> for u8 {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_byte()?)
    }
}

impl Encode for bool {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_bool(*self);
        Ok(())
    }
}

impl Decode<'_> for bool {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_bool()?)
    }
}

impl Encode for u16 {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_lshort(*self);
        Ok(())
    }
}

impl Decode<'_> for u16 {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_lshort()?)
    }
}

impl Encode for i32 {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_lint(*self);
        Ok(())
    }
}

impl Decode<'_> for i32 {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_lint()?)
    }
}

impl Encode for u32 {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_luint(*self);
        Ok(())
    }
}

impl Decode<'_> for u32 {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_luint()?)
    }
}

impl Encode for i64 {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_llong(*self);
        Ok(())
    }
}

impl Decode<'_> for i64 {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_llong()?)
    }
}

impl Encode for f32 {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_lfloat(*self);
        Ok(())
    }
}

impl Decode<'_> for f32 {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_lfloat()?)
    }
}

impl Encode for str {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_string(self);
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        self.as_str().encode(w)
    }
}

impl Decode<'_> for String {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_string()?)
    }
}

impl Encode for uuid::Uuid {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_uuid(*self);
        Ok(())
    }
}

impl Decode<'_> for uuid::Uuid {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(r.get_uuid()?)
    }
}

/// A Vec is unsigned-varint length-prefixed, then each element in order.
/// This is the list-of-T shape every pooled/interned table in the command
/// catalog codec builds on.
impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_unsigned_var_int(self.len() as u32);
        for item in self {
            item.encode(w)?;
        }
        Ok(())
    }
}

impl<'a, T: Decode<'a>> Decode<'a> for Vec<T> {
    fn decode(r: &mut PacketReader<'a>) -> Result<Self, CodecError> {
        let len = r.get_unsigned_var_int()? as usize;
        let mut vec = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            vec.push(T::decode(r)?);
        }
        Ok(vec)
    }
}
