//! The item-stack-request codec (§4.5): a discriminated union of ~20
//! action kinds, with an ID-renumbering shim across protocol versions
//! (§4.5.2, REDESIGN FLAGS §9.5).

use crate::codec::{Decode, Encode};
use crate::error::{CodecError, EncodeLogicError, PacketDecodeError};
use crate::protocol_version::ProtocolVersion;
use crate::reader::PacketReader;
use crate::var_int::{UVarInt, VarInt};
use crate::writer::PacketWriter;

/// Identifies a single item stack slot an action reads from or writes to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StackRequestSlotInfo {
    pub container_id: u8,
    pub slot: u8,
    pub stack_network_id: i32,
}

impl StackRequestSlotInfo {
    pub fn new(container_id: u8, slot: u8, stack_network_id: i32) -> Self {
        Self {
            container_id,
            slot,
            stack_network_id,
        }
    }
}

impl Encode for StackRequestSlotInfo {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_byte(self.container_id);
        w.put_byte(self.slot);
        w.write_generic_type_network_id(self.stack_network_id);
        Ok(())
    }
}

impl Decode<'_> for StackRequestSlotInfo {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            container_id: r.get_byte()?,
            slot: r.get_byte()?,
            stack_network_id: r.read_generic_type_network_id()?,
        })
    }
}

/// Canonical (protocol `>= 1.18.10`) wire tags. Tags below `PLACE_INTO_BUNDLE`
/// are identical on every supported protocol (§4.5.2).
mod tag {
    pub const TAKE: u8 = 0;
    pub const PLACE: u8 = 1;
    pub const SWAP: u8 = 2;
    pub const DROP: u8 = 3;
    pub const DESTROY: u8 = 4;
    pub const CRAFTING_CONSUME_INPUT: u8 = 5;
    pub const CRAFTING_MARK_SECONDARY_RESULT: u8 = 6;
    pub const PLACE_INTO_BUNDLE: u8 = 7;
    pub const TAKE_FROM_BUNDLE: u8 = 8;
    pub const LAB_TABLE_COMBINE: u8 = 9;
    pub const BEACON_PAYMENT: u8 = 10;
    pub const MINE_BLOCK: u8 = 11;
    pub const CRAFT_RECIPE: u8 = 12;
    pub const CRAFT_RECIPE_AUTO: u8 = 13;
    pub const CREATIVE_CREATE: u8 = 14;
    pub const CRAFT_RECIPE_OPTIONAL: u8 = 15;
    pub const GRINDSTONE: u8 = 16;
    pub const LOOM: u8 = 17;
    pub const DEPRECATED_CRAFTING_NON_IMPLEMENTED: u8 = 18;
    pub const DEPRECATED_CRAFTING_RESULTS: u8 = 19;
}

/// The delta `[PLACE_INTO_BUNDLE .. LAB_TABLE_COMBINE)` occupies — the span
/// that's simply absent on the wire below 1.18.10.
const RENUMBER_DELTA: u8 = tag::LAB_TABLE_COMBINE - tag::PLACE_INTO_BUNDLE;

/// The wire tag for `canonical` at `proto`, or an error if `canonical` names
/// an action that doesn't exist on the wire at that protocol (§4.5.2). The
/// inverse of [`canonical_tag_for`] — REDESIGN FLAGS §9.5 asks that both
/// directions of this mapping live in one place rather than being repeated
/// inline at each call site.
fn wire_tag_for(canonical: u8, proto: ProtocolVersion) -> Result<u8, EncodeLogicError> {
    if proto >= ProtocolVersion::V1_18_10 {
        return Ok(canonical);
    }
    if (tag::PLACE_INTO_BUNDLE..tag::LAB_TABLE_COMBINE).contains(&canonical) {
        return Err(EncodeLogicError::ActionUnrepresentableAtProtocol(proto));
    }
    if canonical >= tag::LAB_TABLE_COMBINE {
        Ok(canonical - RENUMBER_DELTA)
    } else {
        Ok(canonical)
    }
}

/// The canonical tag a wire tag decoded at `proto` represents.
fn canonical_tag_for(wire: u8, proto: ProtocolVersion) -> u8 {
    if proto >= ProtocolVersion::V1_18_10 {
        wire
    } else if wire >= tag::PLACE_INTO_BUNDLE {
        wire + RENUMBER_DELTA
    } else {
        wire
    }
}

/// One action within an [`ItemStackRequest`]. A closed union of ~20
/// variants (§4.5.3); dispatch on decode is exhaustive — an unknown tag is
/// a [`PacketDecodeError::UnknownActionTag`].
#[derive(Clone, PartialEq, Debug)]
pub enum ItemStackRequestAction {
    Take {
        count: u8,
        source: StackRequestSlotInfo,
        destination: StackRequestSlotInfo,
    },
    Place {
        count: u8,
        source: StackRequestSlotInfo,
        destination: StackRequestSlotInfo,
    },
    Swap {
        source: StackRequestSlotInfo,
        destination: StackRequestSlotInfo,
    },
    Drop {
        count: u8,
        source: StackRequestSlotInfo,
        randomly: bool,
    },
    Destroy {
        count: u8,
        source: StackRequestSlotInfo,
    },
    CraftingConsumeInput {
        count: u8,
        source: StackRequestSlotInfo,
    },
    CraftingMarkSecondaryResult {
        count: u8,
        destination: StackRequestSlotInfo,
    },
    PlaceIntoBundle {
        count: u8,
        source: StackRequestSlotInfo,
        destination: StackRequestSlotInfo,
    },
    TakeFromBundle {
        count: u8,
        source: StackRequestSlotInfo,
        destination: StackRequestSlotInfo,
    },
    LabTableCombine,
    BeaconPayment {
        primary_effect: i32,
        secondary_effect: i32,
    },
    MineBlock {
        action_id: i32,
        predicted_durability: i32,
        stack_network_id: i32,
    },
    CraftRecipe {
        recipe_network_id: u32,
    },
    CraftRecipeAuto {
        recipe_network_id: u32,
        repetitions: u8,
    },
    CreativeCreate {
        creative_item_network_id: u32,
    },
    CraftRecipeOptional {
        recipe_network_id: u32,
        filter_string_index: i32,
    },
    Grindstone {
        recipe_network_id: u32,
        cost: i32,
    },
    Loom {
        pattern: String,
    },
    /// Superseded by the recipe-based crafting actions; kept only so older
    /// captured traffic still decodes.
    DeprecatedCraftingNonImplemented,
    /// Superseded by the recipe-based crafting actions; kept only so older
    /// captured traffic still decodes.
    DeprecatedCraftingResults {
        times_crafted: u8,
    },
}

impl ItemStackRequestAction {
    pub fn canonical_tag(&self) -> u8 {
        match self {
            Self::Take { .. } => tag::TAKE,
            Self::Place { .. } => tag::PLACE,
            Self::Swap { .. } => tag::SWAP,
            Self::Drop { .. } => tag::DROP,
            Self::Destroy { .. } => tag::DESTROY,
            Self::CraftingConsumeInput { .. } => tag::CRAFTING_CONSUME_INPUT,
            Self::CraftingMarkSecondaryResult { .. } => tag::CRAFTING_MARK_SECONDARY_RESULT,
            Self::PlaceIntoBundle { .. } => tag::PLACE_INTO_BUNDLE,
            Self::TakeFromBundle { .. } => tag::TAKE_FROM_BUNDLE,
            Self::LabTableCombine => tag::LAB_TABLE_COMBINE,
            Self::BeaconPayment { .. } => tag::BEACON_PAYMENT,
            Self::MineBlock { .. } => tag::MINE_BLOCK,
            Self::CraftRecipe { .. } => tag::CRAFT_RECIPE,
            Self::CraftRecipeAuto { .. } => tag::CRAFT_RECIPE_AUTO,
            Self::CreativeCreate { .. } => tag::CREATIVE_CREATE,
            Self::CraftRecipeOptional { .. } => tag::CRAFT_RECIPE_OPTIONAL,
            Self::Grindstone { .. } => tag::GRINDSTONE,
            Self::Loom { .. } => tag::LOOM,
            Self::DeprecatedCraftingNonImplemented => tag::DEPRECATED_CRAFTING_NON_IMPLEMENTED,
            Self::DeprecatedCraftingResults { .. } => tag::DEPRECATED_CRAFTING_RESULTS,
        }
    }

    fn encode_payload(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        match self {
            Self::Take { count, source, destination } | Self::Place { count, source, destination } => {
                w.put_byte(*count);
                source.encode(w)?;
                destination.encode(w)?;
            }
            Self::Swap { source, destination } => {
                source.encode(w)?;
                destination.encode(w)?;
            }
            Self::Drop { count, source, randomly } => {
                w.put_byte(*count);
                source.encode(w)?;
                w.put_bool(*randomly);
            }
            Self::Destroy { count, source } | Self::CraftingConsumeInput { count, source } => {
                w.put_byte(*count);
                source.encode(w)?;
            }
            Self::CraftingMarkSecondaryResult { count, destination } => {
                w.put_byte(*count);
                destination.encode(w)?;
            }
            Self::PlaceIntoBundle { count, source, destination }
            | Self::TakeFromBundle { count, source, destination } => {
                w.put_byte(*count);
                source.encode(w)?;
                destination.encode(w)?;
            }
            Self::LabTableCombine => {}
            Self::BeaconPayment {
                primary_effect,
                secondary_effect,
            } => {
                VarInt(*primary_effect).encode(w)?;
                VarInt(*secondary_effect).encode(w)?;
            }
            Self::MineBlock {
                action_id,
                predicted_durability,
                stack_network_id,
            } => {
                VarInt(*action_id).encode(w)?;
                VarInt(*predicted_durability).encode(w)?;
                w.write_generic_type_network_id(*stack_network_id);
            }
            Self::CraftRecipe { recipe_network_id } => {
                UVarInt(*recipe_network_id).encode(w)?;
            }
            Self::CraftRecipeAuto {
                recipe_network_id,
                repetitions,
            } => {
                UVarInt(*recipe_network_id).encode(w)?;
                w.put_byte(*repetitions);
            }
            Self::CreativeCreate { creative_item_network_id } => {
                UVarInt(*creative_item_network_id).encode(w)?;
            }
            Self::CraftRecipeOptional {
                recipe_network_id,
                filter_string_index,
            } => {
                UVarInt(*recipe_network_id).encode(w)?;
                w.put_lint(*filter_string_index);
            }
            Self::Grindstone { recipe_network_id, cost } => {
                UVarInt(*recipe_network_id).encode(w)?;
                VarInt(*cost).encode(w)?;
            }
            Self::Loom { pattern } => {
                w.put_string(pattern);
            }
            Self::DeprecatedCraftingNonImplemented => {}
            Self::DeprecatedCraftingResults { times_crafted } => {
                w.put_byte(*times_crafted);
            }
        }
        Ok(())
    }
}

impl Encode for ItemStackRequestAction {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        let wire_tag = wire_tag_for(self.canonical_tag(), w.protocol_version())?;
        w.put_byte(wire_tag);
        self.encode_payload(w)
    }
}

impl Decode<'_> for ItemStackRequestAction {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        let wire_tag = r.get_byte()?;
        let canonical = canonical_tag_for(wire_tag, r.protocol_version());

        Ok(match canonical {
            tag::TAKE => Self::Take {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
                destination: StackRequestSlotInfo::decode(r)?,
            },
            tag::PLACE => Self::Place {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
                destination: StackRequestSlotInfo::decode(r)?,
            },
            tag::SWAP => Self::Swap {
                source: StackRequestSlotInfo::decode(r)?,
                destination: StackRequestSlotInfo::decode(r)?,
            },
            tag::DROP => Self::Drop {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
                randomly: r.get_bool()?,
            },
            tag::DESTROY => Self::Destroy {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
            },
            tag::CRAFTING_CONSUME_INPUT => Self::CraftingConsumeInput {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
            },
            tag::CRAFTING_MARK_SECONDARY_RESULT => Self::CraftingMarkSecondaryResult {
                count: r.get_byte()?,
                destination: StackRequestSlotInfo::decode(r)?,
            },
            tag::PLACE_INTO_BUNDLE => Self::PlaceIntoBundle {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
                destination: StackRequestSlotInfo::decode(r)?,
            },
            tag::TAKE_FROM_BUNDLE => Self::TakeFromBundle {
                count: r.get_byte()?,
                source: StackRequestSlotInfo::decode(r)?,
                destination: StackRequestSlotInfo::decode(r)?,
            },
            tag::LAB_TABLE_COMBINE => Self::LabTableCombine,
            tag::BEACON_PAYMENT => Self::BeaconPayment {
                primary_effect: VarInt::decode(r)?.0,
                secondary_effect: VarInt::decode(r)?.0,
            },
            tag::MINE_BLOCK => Self::MineBlock {
                action_id: VarInt::decode(r)?.0,
                predicted_durability: VarInt::decode(r)?.0,
                stack_network_id: r.read_generic_type_network_id()?,
            },
            tag::CRAFT_RECIPE => Self::CraftRecipe {
                recipe_network_id: UVarInt::decode(r)?.0,
            },
            tag::CRAFT_RECIPE_AUTO => Self::CraftRecipeAuto {
                recipe_network_id: UVarInt::decode(r)?.0,
                repetitions: r.get_byte()?,
            },
            tag::CREATIVE_CREATE => Self::CreativeCreate {
                creative_item_network_id: UVarInt::decode(r)?.0,
            },
            tag::CRAFT_RECIPE_OPTIONAL => Self::CraftRecipeOptional {
                recipe_network_id: UVarInt::decode(r)?.0,
                filter_string_index: r.get_lint()?,
            },
            tag::GRINDSTONE => Self::Grindstone {
                recipe_network_id: UVarInt::decode(r)?.0,
                cost: VarInt::decode(r)?.0,
            },
            tag::LOOM => Self::Loom { pattern: r.get_string()? },
            tag::DEPRECATED_CRAFTING_NON_IMPLEMENTED => Self::DeprecatedCraftingNonImplemented,
            tag::DEPRECATED_CRAFTING_RESULTS => Self::DeprecatedCraftingResults {
                times_crafted: r.get_byte()?,
            },
            other => return Err(PacketDecodeError::UnknownActionTag { tag: other }.into()),
        })
    }
}

/// `(requestId, actions[], filterStrings[] [>= 1.16.200], filterStringCause
/// [>= 1.19.50 else 0])` (§3.4, §4.5.1).
#[derive(Clone, PartialEq, Debug)]
pub struct ItemStackRequest {
    pub request_id: i32,
    pub actions: Vec<ItemStackRequestAction>,
    pub filter_strings: Vec<String>,
    pub filter_string_cause: i32,
}

impl Encode for ItemStackRequest {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        VarInt(self.request_id).encode(w)?;
        self.actions.encode(w)?;
        if w.protocol_version() >= ProtocolVersion::V1_16_200 {
            self.filter_strings.encode(w)?;
        }
        if w.protocol_version() >= ProtocolVersion::V1_19_50 {
            w.put_lint(self.filter_string_cause);
        }
        Ok(())
    }
}

impl Decode<'_> for ItemStackRequest {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        let request_id = VarInt::decode(r)?.0;
        let actions = Vec::decode(r)?;
        let filter_strings = if r.protocol_version() >= ProtocolVersion::V1_16_200 {
            Vec::decode(r)?
        } else {
            Vec::new()
        };
        let filter_string_cause = if r.protocol_version() >= ProtocolVersion::V1_19_50 {
            r.get_lint()?
        } else {
            0
        };
        Ok(Self {
            request_id,
            actions,
            filter_strings,
            filter_string_cause,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn slot(container_id: u8, slot: u8, stack_network_id: i32) -> StackRequestSlotInfo {
        StackRequestSlotInfo::new(container_id, slot, stack_network_id)
    }

    fn round_trip(request: &ItemStackRequest, proto: ProtocolVersion) -> ItemStackRequest {
        let mut w = PacketWriter::new(proto);
        request.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = PacketReader::new(&bytes, proto);
        let decoded = ItemStackRequest::decode(&mut r).unwrap();
        assert!(r.is_at_end());
        decoded
    }

    #[test]
    fn take_action_round_trips_on_current_protocol() {
        let request = ItemStackRequest {
            request_id: -5,
            actions: vec![ItemStackRequestAction::Take {
                count: 3,
                source: slot(0, 9, 100),
                destination: slot(1, 0, 101),
            }],
            filter_strings: vec!["hello".to_string()],
            filter_string_cause: 2,
        };
        let decoded = round_trip(&request, ProtocolVersion::V1_19_50);
        assert_eq!(decoded, request);
    }

    #[test]
    fn pre_1_16_200_drops_filter_fields() {
        let request = ItemStackRequest {
            request_id: 1,
            actions: vec![],
            filter_strings: vec!["ignored".to_string()],
            filter_string_cause: 9,
        };
        let decoded = round_trip(&request, ProtocolVersion::V1_14);
        assert!(decoded.filter_strings.is_empty());
        assert_eq!(decoded.filter_string_cause, 0);
    }

    /// Scenario S7 — a `LabTableCombine` action encoded for protocol
    /// 1.17.0 (< 1.18.10) must use the `PLACE_INTO_BUNDLE` wire tag, and
    /// decode back to the canonical `LabTableCombine` action.
    #[test]
    fn lab_table_combine_renumbers_on_old_protocol() {
        let mut w = PacketWriter::new(ProtocolVersion::new(430)); // 1.17.0, < 1.18.10
        ItemStackRequestAction::LabTableCombine.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![tag::PLACE_INTO_BUNDLE]);

        let mut r = PacketReader::new(&bytes, ProtocolVersion::new(430));
        let decoded = ItemStackRequestAction::decode(&mut r).unwrap();
        assert_eq!(decoded, ItemStackRequestAction::LabTableCombine);
    }

    #[test]
    fn place_into_bundle_is_unrepresentable_on_old_protocol() {
        let mut w = PacketWriter::new(ProtocolVersion::new(430));
        let action = ItemStackRequestAction::PlaceIntoBundle {
            count: 1,
            source: slot(0, 0, 1),
            destination: slot(0, 1, 2),
        };
        assert!(action.encode(&mut w).is_err());
    }

    #[test]
    fn unknown_action_tag_is_a_decode_error_not_a_panic() {
        let bytes = [200u8];
        let mut r = PacketReader::new(&bytes, ProtocolVersion::V1_19_0);
        assert!(ItemStackRequestAction::decode(&mut r).is_err());
    }
}
