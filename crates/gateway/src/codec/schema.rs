//! Declarative wire layouts
//!
//! Each message type is an ordered list of fixed-width fields. Offsets and
//! total length are derived from the widths, never from the Rust struct
//! layout, so reordering a message struct cannot move bytes on the wire.
//!
//! ```text
//! EnterOrder (17 bytes)
//! ┌──────┬──────────────┬────────┬───────┐
//! │ side │ stock        │ shares │ price │
//! │ 0:1  │ 1:8          │ 9:4    │ 13:4  │
//! └──────┴──────────────┴────────┴───────┘
//! ```

use ouch_core::{ORDER_TOKEN_WIDTH, STOCK_WIDTH};
use std::ops::Range;

/// Logical field identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Side,
    Stock,
    Shares,
    Price,
    OrderToken,
    ExistingOrderToken,
    ReplacementOrderToken,
}

impl FieldId {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Side => "side",
            Self::Stock => "stock",
            Self::Shares => "shares",
            Self::Price => "price",
            Self::OrderToken => "order_token",
            Self::ExistingOrderToken => "existing_order_token",
            Self::ReplacementOrderToken => "replacement_order_token",
        }
    }
}

/// How a field's bytes are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-byte buy/sell indicator
    Indicator,
    /// ASCII, left-justified, space-padded
    Alpha,
    /// Big-endian i32 with a minimum accepted value
    Quantity { min: i32 },
    /// Big-endian u32 with 4 implied decimal places
    Price,
}

/// One entry of a schema: `(field, width, kind)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub width: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn indicator(id: FieldId) -> Self {
        Self {
            id,
            width: 1,
            kind: FieldKind::Indicator,
        }
    }

    pub const fn alpha(id: FieldId, width: usize) -> Self {
        Self {
            id,
            width,
            kind: FieldKind::Alpha,
        }
    }

    pub const fn quantity(id: FieldId, min: i32) -> Self {
        Self {
            id,
            width: 4,
            kind: FieldKind::Quantity { min },
        }
    }

    pub const fn price(id: FieldId) -> Self {
        Self {
            id,
            width: 4,
            kind: FieldKind::Price,
        }
    }
}

/// Ordered field list for one message type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl MessageSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Record length: the sum of all field widths
    pub const fn len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].width;
            i += 1;
        }
        total
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of a field, if the schema carries it
    pub const fn offset_of(&self, id: FieldId) -> Option<usize> {
        let mut offset = 0;
        let mut i = 0;
        while i < self.fields.len() {
            if self.fields[i].id as u8 == id as u8 {
                return Some(offset);
            }
            offset += self.fields[i].width;
            i += 1;
        }
        None
    }

    pub fn field(&self, id: FieldId) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.id == id)
    }

    /// Fields in wire order with their byte ranges
    pub fn layout(&self) -> impl Iterator<Item = (&'static FieldSpec, Range<usize>)> + use<> {
        let fields = self.fields;
        fields.iter().scan(0usize, |offset, spec| {
            let start = *offset;
            *offset += spec.width;
            Some((spec, start..*offset))
        })
    }
}

const ENTER_ORDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::indicator(FieldId::Side),
    FieldSpec::alpha(FieldId::Stock, STOCK_WIDTH),
    FieldSpec::quantity(FieldId::Shares, 1),
    FieldSpec::price(FieldId::Price),
];

const CANCEL_ORDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::alpha(FieldId::OrderToken, ORDER_TOKEN_WIDTH),
    FieldSpec::quantity(FieldId::Shares, 0),
];

const MODIFY_ORDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::alpha(FieldId::OrderToken, ORDER_TOKEN_WIDTH),
    FieldSpec::indicator(FieldId::Side),
    FieldSpec::quantity(FieldId::Shares, 0),
];

const REPLACE_ORDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::alpha(FieldId::ExistingOrderToken, ORDER_TOKEN_WIDTH),
    FieldSpec::alpha(FieldId::ReplacementOrderToken, ORDER_TOKEN_WIDTH),
    FieldSpec::quantity(FieldId::Shares, 0),
    FieldSpec::price(FieldId::Price),
];

const TRADE_NOW_FIELDS: &[FieldSpec] = &[FieldSpec::alpha(FieldId::OrderToken, ORDER_TOKEN_WIDTH)];

pub const ENTER_ORDER: MessageSchema = MessageSchema::new("EnterOrder", ENTER_ORDER_FIELDS);
pub const CANCEL_ORDER: MessageSchema = MessageSchema::new("CancelOrder", CANCEL_ORDER_FIELDS);
pub const MODIFY_ORDER: MessageSchema = MessageSchema::new("ModifyOrder", MODIFY_ORDER_FIELDS);
pub const REPLACE_ORDER: MessageSchema = MessageSchema::new("ReplaceOrder", REPLACE_ORDER_FIELDS);
pub const TRADE_NOW: MessageSchema = MessageSchema::new("TradeNow", TRADE_NOW_FIELDS);

/// Enter Order record length (17)
pub const ENTER_ORDER_LEN: usize = ENTER_ORDER.len();
