#![doc = include_str!("../README.md")]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub
)]

pub mod codec;
pub mod command;
pub mod error;
pub mod item_stack_request;
pub mod packets;
pub mod player_list;
pub mod protocol_version;
pub mod reader;
pub mod skin;
pub mod var_int;
pub mod writer;

pub use codec::{Decode, Encode};
pub use error::{BoundsError, CodecError, EncodeLogicError, PacketDecodeError};
pub use protocol_version::ProtocolVersion;
pub use reader::PacketReader;
pub use writer::PacketWriter;
