use crate::protocol_version::ProtocolVersion;

/// An append-only write cursor backed by a growable buffer, the write-side
/// counterpart of [`PacketReader`](crate::reader::PacketReader).
///
/// Writes cannot fail from bounds (the buffer grows), so every method here
/// is infallible; the type still mirrors the reader's shape one-for-one so
/// that `encode_payload` and `decode_payload` read as opposites of each
/// other for a given packet (Invariant V7).
pub struct PacketWriter {
    buf: Vec<u8>,
    protocol_version: ProtocolVersion,
}

impl PacketWriter {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            buf: Vec::new(),
            protocol_version,
        }
    }

    pub fn with_capacity(capacity: usize, protocol_version: ProtocolVersion) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            protocol_version,
        }
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn put_byte(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.put_byte(value as u8);
    }

    pub fn put_lshort(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_lint(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_luint(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_llong(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_lfloat(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Unsigned LEB128.
    pub fn put_unsigned_var_int(&mut self, value: u32) {
        let mut value = value;
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.put_byte(byte);
                return;
            }
            self.put_byte(byte | 0x80);
        }
    }

    /// LEB128 over ZigZag: `(n << 1) ^ (n >> 31)`.
    pub fn put_var_int(&mut self, value: i32) {
        let zigzagged = ((value << 1) ^ (value >> 31)) as u32;
        self.put_unsigned_var_int(zigzagged);
    }

    /// LEB128 over ZigZag, widened to 64 bits.
    pub fn put_var_long(&mut self, value: i64) {
        let zigzagged = ((value << 1) ^ (value >> 63)) as u64;
        let mut value = zigzagged;
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.put_byte(byte);
                return;
            }
            self.put_byte(byte | 0x80);
        }
    }

    pub fn put_string(&mut self, value: &str) {
        self.put_unsigned_var_int(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Two little-endian u64 halves, most-significant half first.
    pub fn put_uuid(&mut self, value: uuid::Uuid) {
        let bytes = value.into_bytes();
        let msb = u64::from_be_bytes(bytes[..8].try_into().unwrap());
        let lsb = u64::from_be_bytes(bytes[8..].try_into().unwrap());
        self.buf.extend_from_slice(&msb.to_le_bytes());
        self.buf.extend_from_slice(&lsb.to_le_bytes());
    }

    /// Three signed varints `(x, y, z)`.
    pub fn put_block_position(&mut self, pos: (i32, i32, i32)) {
        self.put_var_int(pos.0);
        self.put_var_int(pos.1);
        self.put_var_int(pos.2);
    }

    pub fn put_actor_unique_id(&mut self, value: i64) {
        self.put_var_long(value);
    }

    pub fn write_generic_type_network_id(&mut self, value: i32) {
        self.put_var_int(value);
    }

    /// Writes a pool index at the width chosen by the pool's final size
    /// (§4.4.1).
    pub fn put_pool_index(&mut self, value: u32, width: crate::command::IndexWidth) {
        use crate::command::IndexWidth;
        match width {
            IndexWidth::U8 => self.put_byte(value as u8),
            IndexWidth::U16 => self.put_lshort(value as u16),
            IndexWidth::U32 => self.put_luint(value),
        }
    }
}
