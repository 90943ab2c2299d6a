//! The command catalog codec (§4.4): the flattened, interned wire
//! representation of an `AvailableCommands` packet, and the in-memory
//! [`CommandCatalog`] it round-trips to.

mod basic_type;
mod constraint;
mod data;
mod enums;
mod intern;
mod overload;
mod parameter;

use std::collections::HashMap;

pub use basic_type::{encode_basic_type_code, BasicType};
pub use constraint::CommandEnumConstraint;
pub use data::{CommandData, FlagsWidth};
pub use enums::{is_hardcoded_enum_name, CommandEnum, SoftEnum, HARDCODED_ENUM_NAMES};
pub use intern::{IndexWidth, InternTable};
pub use overload::CommandOverload;
pub use parameter::{
    build_param_type_basic, build_param_type_enum, build_param_type_postfix, parse_param_type,
    CommandParameter, ParamKind, WireParamType,
};

use crate::codec::{Decode, Encode};
use crate::error::{CodecError, EncodeLogicError, PacketDecodeError};
use crate::protocol_version::ProtocolVersion;
use crate::reader::PacketReader;
use crate::writer::PacketWriter;

/// The full in-memory command catalog: every command, every named enum a
/// command or parameter may reference by name, the independent soft-enum
/// list, and the (1.13.0+) enum constraint list.
///
/// `enums` is the single source of truth for every named, interned enum —
/// hardcoded enums (§4.4.6), command-alias enums, and parameter enums are
/// all just entries here, distinguished only by how they get referenced.
/// There is no separate `hardcoded_enums` field: [`CommandCatalog::hardcoded_enums`]
/// is a filtered view over this same list, which is what "additionally
/// placed into a hardcodedEnums bucket" (§4.4.6) means on decode — the
/// enum is already present, downstream consumers just need a quick way to
/// find it.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CommandCatalog {
    pub enums: Vec<CommandEnum>,
    pub soft_enums: Vec<SoftEnum>,
    pub commands: Vec<CommandData>,
    pub constraints: Vec<CommandEnumConstraint>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_enum(&self, name: &str) -> Option<&CommandEnum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Enums recognized by [`is_hardcoded_enum_name`] — the bucket
    /// downstream consumers pull a server-populated catalog (e.g.
    /// `CommandName`) out of.
    pub fn hardcoded_enums(&self) -> impl Iterator<Item = &CommandEnum> {
        self.enums.iter().filter(|e| is_hardcoded_enum_name(&e.name))
    }
}

/// Accumulates the three interned pools (value, postfix, enum) in the
/// first-occurrence order Invariant V6 requires, and tracks each named
/// enum's index so later passes can look it up without re-walking.
#[derive(Default)]
struct PoolBuilder {
    value_pool: InternTable,
    postfix_pool: InternTable,
    enum_names: Vec<String>,
    enum_value_indices: Vec<Vec<u32>>,
    enum_index: HashMap<String, u32>,
}

impl PoolBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Interns `e` if it hasn't been seen yet (keyed by name), returning its
    /// enum-pool index either way. Interning an enum also interns every one
    /// of its values into the value pool, in order.
    fn intern_enum(&mut self, e: &CommandEnum) -> u32 {
        if let Some(&idx) = self.enum_index.get(&e.name) {
            return idx;
        }
        let idx = self.enum_names.len() as u32;
        let value_indices = e.values.iter().map(|v| self.value_pool.intern(v)).collect();
        self.enum_names.push(e.name.clone());
        self.enum_value_indices.push(value_indices);
        self.enum_index.insert(e.name.clone(), idx);
        idx
    }

    fn intern_postfix(&mut self, s: &str) -> u32 {
        self.postfix_pool.intern(s)
    }
}

impl Encode for CommandCatalog {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        let mut pools = PoolBuilder::new();

        // (i) hardcoded enums, in catalog order.
        for e in self.hardcoded_enums() {
            pools.intern_enum(e);
        }

        // (ii) command-alias enums, walking commands in order.
        for cmd in &self.commands {
            if let Some(alias_name) = &cmd.aliases {
                let e = self
                    .find_enum(alias_name)
                    .ok_or_else(|| EncodeLogicError::EnumNotInterned(alias_name.clone()))?;
                pools.intern_enum(e);
            }
        }

        // (iii) parameter enums and postfixes, walking commands/overloads/
        // parameters in order. Postfixes have no alias-style indirection,
        // so a single pass covers them alongside the parameter-enum walk.
        for cmd in &self.commands {
            for overload in &cmd.overloads {
                for param in &overload.parameters {
                    match &param.kind {
                        ParamKind::Enum(name) => {
                            let e = self
                                .find_enum(name)
                                .ok_or_else(|| EncodeLogicError::EnumNotInterned(name.clone()))?;
                            pools.intern_enum(e);
                        }
                        ParamKind::Postfix(s) => {
                            pools.intern_postfix(s);
                        }
                        ParamKind::Basic(_) => {}
                    }
                }
            }
        }

        // Enum constraints reference an enum too. Spec V6 doesn't name this
        // as a fourth interning phase, but a constraint's enum must already
        // be interned by the time index widths are computed below — in
        // practice a constrained enum is always also used by some command,
        // but we don't assume a caller bothered to reference it that way.
        for c in &self.constraints {
            if let Some(e) = self.find_enum(&c.enum_name) {
                pools.intern_enum(e);
            }
        }

        let value_width = IndexWidth::for_pool_size(pools.value_pool.len());
        let enum_width = IndexWidth::for_pool_size(pools.enum_names.len());

        // Table 1: enum value pool.
        w.put_unsigned_var_int(pools.value_pool.len() as u32);
        for v in pools.value_pool.values() {
            w.put_string(v);
        }

        // Table 2: postfix pool.
        w.put_unsigned_var_int(pools.postfix_pool.len() as u32);
        for v in pools.postfix_pool.values() {
            w.put_string(v);
        }

        // Table 3: enum pool.
        w.put_unsigned_var_int(pools.enum_names.len() as u32);
        for (name, value_indices) in pools.enum_names.iter().zip(&pools.enum_value_indices) {
            w.put_string(name);
            w.put_unsigned_var_int(value_indices.len() as u32);
            for idx in value_indices {
                w.put_pool_index(*idx, value_width);
            }
        }

        // Table 4: command list.
        w.put_unsigned_var_int(self.commands.len() as u32);
        for cmd in &self.commands {
            w.put_string(&cmd.name);
            w.put_string(&cmd.description);
            match CommandData::flags_width_for(w.protocol_version()) {
                FlagsWidth::U16 => w.put_lshort(cmd.flags),
                FlagsWidth::U8 => w.put_byte(cmd.flags as u8),
            }
            w.put_byte(cmd.permission);

            let alias_index: i32 = match &cmd.aliases {
                Some(name) => *pools
                    .enum_index
                    .get(name)
                    .expect("alias enum interned in phase (ii)") as i32,
                None => -1,
            };
            w.put_lint(alias_index);

            w.put_unsigned_var_int(cmd.overloads.len() as u32);
            for overload in &cmd.overloads {
                w.put_unsigned_var_int(overload.parameters.len() as u32);
                for param in &overload.parameters {
                    w.put_string(&param.name);

                    let param_type = match &param.kind {
                        ParamKind::Basic(code) => {
                            let wire_code = match BasicType::from_canonical_code(*code) {
                                Some(bt) => encode_basic_type_code(bt, w.protocol_version()),
                                None => *code,
                            };
                            build_param_type_basic(wire_code)
                        }
                        ParamKind::Enum(name) => {
                            let idx = *pools
                                .enum_index
                                .get(name)
                                .expect("param enum interned in phase (iii)");
                            build_param_type_enum(idx)
                        }
                        ParamKind::Postfix(s) => {
                            let idx = pools
                                .postfix_pool
                                .index_of(s)
                                .expect("postfix interned in phase (iii)");
                            build_param_type_postfix(idx)
                        }
                    };
                    w.put_luint(param_type);
                    w.put_bool(param.optional);
                    w.put_byte(param.flags);
                }
            }
        }

        // Table 5: soft enums. Not interned — values written out directly.
        w.put_unsigned_var_int(self.soft_enums.len() as u32);
        for se in &self.soft_enums {
            w.put_string(&se.name);
            se.values.encode(w)?;
        }

        // Table 6: enum constraints, only from 1.13.0.
        if w.protocol_version() >= ProtocolVersion::V1_13_0 {
            w.put_unsigned_var_int(self.constraints.len() as u32);
            for c in &self.constraints {
                let e = self
                    .find_enum(&c.enum_name)
                    .ok_or_else(|| EncodeLogicError::EnumNotInterned(c.enum_name.clone()))?;
                if !e.values.iter().any(|v| v == &c.affected_value) {
                    return Err(EncodeLogicError::ConstraintValueNotInEnum {
                        value: c.affected_value.clone(),
                        enum_name: c.enum_name.clone(),
                    }
                    .into());
                }
                let value_index = pools
                    .value_pool
                    .index_of(&c.affected_value)
                    .expect("constraint's value interned alongside its enum");
                let enum_index = *pools
                    .enum_index
                    .get(&c.enum_name)
                    .expect("constraint's enum interned above");
                w.put_pool_index(value_index, value_width);
                w.put_pool_index(enum_index, enum_width);
                c.constraint_ids.encode(w)?;
            }
        }

        Ok(())
    }
}

impl Decode<'_> for CommandCatalog {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        let value_pool_len = r.get_unsigned_var_int()? as usize;
        let mut values = Vec::with_capacity(value_pool_len.min(4096));
        for _ in 0..value_pool_len {
            values.push(r.get_string()?);
        }

        let postfix_pool_len = r.get_unsigned_var_int()? as usize;
        let mut postfixes = Vec::with_capacity(postfix_pool_len.min(4096));
        for _ in 0..postfix_pool_len {
            postfixes.push(r.get_string()?);
        }

        let value_width = IndexWidth::for_pool_size(values.len());

        let enum_count = r.get_unsigned_var_int()? as usize;
        let mut enums = Vec::with_capacity(enum_count.min(4096));
        for _ in 0..enum_count {
            let name = r.get_string()?;
            let value_count = r.get_unsigned_var_int()? as usize;
            let mut enum_values = Vec::with_capacity(value_count.min(4096));
            for _ in 0..value_count {
                let index = r.get_pool_index(value_width)?;
                let value = values.get(index as usize).ok_or(PacketDecodeError::InvalidEnumValueIndex {
                    index,
                    pool_len: values.len(),
                })?;
                enum_values.push(value.clone());
            }
            enums.push(CommandEnum::new(name, enum_values));
        }

        let enum_width = IndexWidth::for_pool_size(enums.len());

        let command_count = r.get_unsigned_var_int()? as usize;
        let mut commands = Vec::with_capacity(command_count.min(4096));
        for _ in 0..command_count {
            let name = r.get_string()?;
            let description = r.get_string()?;
            let flags = match CommandData::flags_width_for(r.protocol_version()) {
                FlagsWidth::U16 => r.get_lshort()?,
                FlagsWidth::U8 => r.get_byte()? as u16,
            };
            let permission = r.get_byte()?;

            let alias_index = r.get_lint()?;
            let aliases = if alias_index < 0 {
                None
            } else {
                let e = enums.get(alias_index as usize).ok_or(PacketDecodeError::InvalidEnumIndex {
                    index: alias_index as u32,
                    pool_len: enums.len(),
                })?;
                Some(e.name.clone())
            };

            let overload_count = r.get_unsigned_var_int()? as usize;
            let mut overloads = Vec::with_capacity(overload_count.min(4096));
            for _ in 0..overload_count {
                let param_count = r.get_unsigned_var_int()? as usize;
                let mut params = Vec::with_capacity(param_count.min(4096));
                for _ in 0..param_count {
                    let pname = r.get_string()?;
                    let param_type = r.get_luint()?;
                    let kind = match parse_param_type(param_type)? {
                        WireParamType::Basic(code) => ParamKind::Basic(code),
                        WireParamType::Enum(index) => {
                            let e = enums.get(index as usize).ok_or(PacketDecodeError::InvalidEnumIndex {
                                index,
                                pool_len: enums.len(),
                            })?;
                            ParamKind::Enum(e.name.clone())
                        }
                        WireParamType::Postfix(index) => {
                            let p = postfixes.get(index as usize).ok_or(PacketDecodeError::InvalidPostfixIndex {
                                index,
                                pool_len: postfixes.len(),
                            })?;
                            ParamKind::Postfix(p.clone())
                        }
                    };
                    let optional = r.get_bool()?;
                    let pflags = r.get_byte()?;
                    params.push(CommandParameter::new(pname, kind, optional, pflags));
                }
                overloads.push(CommandOverload::new(params));
            }

            commands.push(CommandData {
                name,
                description,
                flags,
                permission,
                aliases,
                overloads,
            });
        }

        let soft_enum_count = r.get_unsigned_var_int()? as usize;
        let mut soft_enums = Vec::with_capacity(soft_enum_count.min(4096));
        for _ in 0..soft_enum_count {
            let name = r.get_string()?;
            let soft_values = Vec::decode(r)?;
            soft_enums.push(SoftEnum::new(name, soft_values));
        }

        let constraints = if r.protocol_version() >= ProtocolVersion::V1_13_0 {
            let constraint_count = r.get_unsigned_var_int()? as usize;
            let mut list = Vec::with_capacity(constraint_count.min(4096));
            for _ in 0..constraint_count {
                let value_index = r.get_pool_index(value_width)?;
                let enum_index = r.get_pool_index(enum_width)?;
                let e = enums.get(enum_index as usize).ok_or(PacketDecodeError::InvalidEnumIndex {
                    index: enum_index,
                    pool_len: enums.len(),
                })?;
                let value = values.get(value_index as usize).ok_or(PacketDecodeError::InvalidEnumValueIndex {
                    index: value_index,
                    pool_len: values.len(),
                })?;
                if !e.values.iter().any(|v| v == value) {
                    return Err(PacketDecodeError::ConstraintValueNotInEnum {
                        value_index,
                        enum_name: e.name.clone(),
                    }
                    .into());
                }
                let constraint_ids = Vec::decode(r)?;
                list.push(CommandEnumConstraint::new(value.clone(), e.name.clone(), constraint_ids));
            }
            list
        } else {
            Vec::new()
        };

        Ok(CommandCatalog {
            enums,
            soft_enums,
            commands,
            constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ping_catalog() -> CommandCatalog {
        let mut catalog = CommandCatalog::new();
        let mut cmd = CommandData::new("ping", "pong");
        cmd.overloads.push(CommandOverload::new(vec![CommandParameter::new(
            "n",
            ParamKind::Basic(BasicType::Int.canonical_code()),
            false,
            0,
        )]));
        catalog.commands.push(cmd);
        catalog
    }

    /// Scenario S5 — minimal single-command catalog, round trip on 1.19.0.
    #[test]
    fn minimal_catalog_round_trips() {
        let catalog = ping_catalog();

        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        catalog.encode(&mut w).unwrap();
        let bytes = w.into_bytes();

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        let decoded = CommandCatalog::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        assert_eq!(decoded, catalog);
        assert_eq!(decoded.commands.len(), 1);
        assert_eq!(decoded.commands[0].overloads[0].parameters.len(), 1);
    }

    /// Scenario S6 — enum value index width switches at the 256-entry
    /// boundary, and both sides compute it from the final pool size.
    #[test]
    fn enum_value_index_width_switches_at_256() {
        let make_catalog = |value_count: usize| {
            let mut catalog = CommandCatalog::new();
            let values: Vec<String> = (0..value_count).map(|i| format!("v{i}")).collect();
            catalog.enums.push(CommandEnum::new("Many", values));
            let mut cmd = CommandData::new("use", "uses an enum value");
            cmd.overloads.push(CommandOverload::new(vec![CommandParameter::new(
                "which",
                ParamKind::Enum("Many".to_string()),
                false,
                0,
            )]));
            catalog.commands.push(cmd);
            catalog
        };

        let small = make_catalog(255);
        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        small.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        let decoded = CommandCatalog::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        assert_eq!(decoded, small);

        let large = make_catalog(256);
        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        large.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        let decoded = CommandCatalog::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        assert_eq!(decoded, large);
    }

    /// Scenario S8 — a mutated enum value index one past the pool end fails
    /// decode with a structured error, not a panic.
    #[test]
    fn bad_enum_value_index_is_a_decode_error() {
        let mut catalog = CommandCatalog::new();
        catalog
            .enums
            .push(CommandEnum::new("Color", vec!["red".to_string(), "blue".to_string()]));
        let mut cmd = CommandData::new("paint", "paints something");
        cmd.overloads.push(CommandOverload::new(vec![CommandParameter::new(
            "color",
            ParamKind::Enum("Color".to_string()),
            false,
            0,
        )]));
        catalog.commands.push(cmd);

        let mut w = PacketWriter::new(ProtocolVersion::V1_19_0);
        catalog.encode(&mut w).unwrap();
        let mut bytes = w.into_bytes();

        // The enum pool's single value-index byte sits right after the
        // 2-entry value pool's two length-prefixed strings and the
        // postfix pool's empty count. Rather than computing the offset by
        // hand, locate it by re-decoding and scanning for the known-good
        // index byte (1, i.e. "blue") immediately following the enum name.
        let needle = [b'C', b'o', b'l', b'o', b'r'];
        let pos = bytes
            .windows(needle.len())
            .position(|w| w == needle)
            .expect("enum name present in encoding");
        // Layout right after the name: value_count varint (1 byte, value 1),
        // then the index itself.
        let index_pos = pos + needle.len() + 1;
        bytes[index_pos] = 5; // one past the 2-entry value pool

        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        let err = CommandCatalog::decode(&mut r).unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains("invalid enum value index") || message.contains("Invalid enum value index"),
            "error message should identify the bad enum value index, got: {message}"
        );
    }

    #[test]
    fn hardcoded_enum_is_exposed_through_the_bucket() {
        let mut catalog = CommandCatalog::new();
        catalog
            .enums
            .push(CommandEnum::new("CommandName", vec!["ping".to_string()]));
        catalog.enums.push(CommandEnum::new("Color", vec!["red".to_string()]));

        let names: Vec<&str> = catalog.hardcoded_enums().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["CommandName"]);
    }
}
