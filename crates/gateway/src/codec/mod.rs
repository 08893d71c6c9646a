//! Fixed-width binary codec
//!
//! Design rules:
//! - Layout comes from a static schema table, never from struct layout
//! - Big-endian integers, space-padded ASCII, no gaps between fields
//! - Validation runs in wire order in both directions; first failure wins
//! - Stateless: an `Encoder`/`Decoder` only holds its immutable config

mod decoder;
mod encoder;
pub mod field;
pub mod schema;
mod wire;

pub use decoder::{Decoder, Records};
pub use encoder::Encoder;
pub use field::FieldValue;
pub use schema::{
    CANCEL_ORDER, ENTER_ORDER, ENTER_ORDER_LEN, FieldId, FieldKind, FieldSpec, MODIFY_ORDER,
    MessageSchema, REPLACE_ORDER, TRADE_NOW,
};
pub use wire::{DecodedFields, WireMessage};
