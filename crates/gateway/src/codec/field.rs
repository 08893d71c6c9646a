//! Primitive field codecs
//!
//! Byte-exact encode/decode for the four field kinds every schema is
//! built from. Shared by all message types.

use crate::codec::schema::{FieldId, FieldKind, FieldSpec};
use crate::config::CodecConfig;
use crate::error::CodecError;
use log::warn;
use ouch_core::{ALPHA_PAD, ORDER_TOKEN_WIDTH, OrderSide, PriceError, STOCK_WIDTH, ScaledPrice};
use rust_decimal::Decimal;
use std::borrow::Cow;

/// Value carried by one schema field
///
/// Borrowed on the encode path, owned after decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Side(OrderSide),
    Alpha(Cow<'a, str>),
    Int(i32),
    Price(Decimal),
}

#[inline(always)]
pub fn encode_side(side: OrderSide) -> u8 {
    side.indicator()
}

#[inline(always)]
pub fn decode_side(byte: u8) -> Result<OrderSide, CodecError> {
    OrderSide::from_indicator(byte).ok_or(CodecError::InvalidIndicator(byte))
}

pub fn encode_symbol(stock: &str) -> Result<[u8; STOCK_WIDTH], CodecError> {
    let mut out = [ALPHA_PAD; STOCK_WIDTH];
    write_alpha(stock, &mut out).map_err(|fault| alpha_error(FieldId::Stock, stock, fault))?;
    Ok(out)
}

/// Strip the padding; never fails
pub fn decode_symbol(bytes: &[u8; STOCK_WIDTH]) -> String {
    read_alpha(FieldId::Stock, bytes)
}

pub fn encode_token(token: &str) -> Result<[u8; ORDER_TOKEN_WIDTH], CodecError> {
    let mut out = [ALPHA_PAD; ORDER_TOKEN_WIDTH];
    write_alpha(token, &mut out).map_err(|fault| alpha_error(FieldId::OrderToken, token, fault))?;
    Ok(out)
}

pub fn decode_token(bytes: &[u8; ORDER_TOKEN_WIDTH]) -> String {
    read_alpha(FieldId::OrderToken, bytes)
}

#[inline(always)]
pub fn encode_i32(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

#[inline(always)]
pub fn decode_i32(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// Scale a decimal price to its wire integer
pub fn encode_price(price: Decimal, config: &CodecConfig) -> Result<u32, CodecError> {
    let scaled = ScaledPrice::from_decimal(price, config.strict_price_precision).map_err(
        |e| match e {
            PriceError::PrecisionLoss(p) => CodecError::PrecisionLoss(p),
            PriceError::Negative(p) | PriceError::Overflow(p) => CodecError::PriceOutOfRange(p),
        },
    )?;

    if scaled > config.max_price() {
        return Err(CodecError::PriceOutOfRange(price));
    }
    Ok(scaled.raw())
}

/// Wire integer back to a decimal with exactly 4 places
pub fn decode_price(raw: u32, config: &CodecConfig) -> Result<Decimal, CodecError> {
    let scaled = ScaledPrice::from_raw(raw);
    if scaled > config.max_price() {
        return Err(CodecError::PriceOutOfRange(scaled.to_decimal()));
    }
    Ok(scaled.to_decimal())
}

/// Write one field into its slot (`slot.len() == spec.width`)
pub fn write_field(
    spec: &FieldSpec,
    value: &FieldValue<'_>,
    slot: &mut [u8],
    config: &CodecConfig,
) -> Result<(), CodecError> {
    match (spec.kind, value) {
        (FieldKind::Indicator, FieldValue::Side(side)) => {
            let [byte] = slot else {
                return Err(CodecError::SchemaMismatch(spec.id.name()));
            };
            *byte = encode_side(*side);
        }
        (FieldKind::Alpha, FieldValue::Alpha(text)) => {
            write_alpha(text, slot).map_err(|fault| alpha_error(spec.id, text, fault))?;
        }
        (FieldKind::Quantity { min }, FieldValue::Int(shares)) => {
            if *shares < min {
                return Err(CodecError::InvalidShares {
                    shares: *shares,
                    min,
                });
            }
            *fixed_mut::<4>(spec, slot)? = encode_i32(*shares);
        }
        (FieldKind::Price, FieldValue::Price(price)) => {
            let raw = encode_price(*price, config)?;
            *fixed_mut::<4>(spec, slot)? = raw.to_be_bytes();
        }
        _ => return Err(CodecError::SchemaMismatch(spec.id.name())),
    }
    Ok(())
}

/// Read one field from its slot (`slot.len() == spec.width`)
pub fn read_field(
    spec: &FieldSpec,
    slot: &[u8],
    config: &CodecConfig,
) -> Result<FieldValue<'static>, CodecError> {
    match spec.kind {
        FieldKind::Indicator => {
            let [byte] = slot else {
                return Err(CodecError::SchemaMismatch(spec.id.name()));
            };
            Ok(FieldValue::Side(decode_side(*byte)?))
        }
        FieldKind::Alpha => Ok(FieldValue::Alpha(Cow::Owned(read_alpha(spec.id, slot)))),
        FieldKind::Quantity { min } => {
            let shares = decode_i32(fixed::<4>(spec, slot)?);
            if config.validate_decoded_shares && shares < min {
                return Err(CodecError::InvalidShares { shares, min });
            }
            Ok(FieldValue::Int(shares))
        }
        FieldKind::Price => {
            let raw = u32::from_be_bytes(fixed::<4>(spec, slot)?);
            Ok(FieldValue::Price(decode_price(raw, config)?))
        }
    }
}

enum AlphaFault {
    TooLong(usize),
    NotAscii,
    /// Would be stripped as padding on decode
    TrailingPad,
}

fn write_alpha(text: &str, slot: &mut [u8]) -> Result<(), AlphaFault> {
    let len = text.chars().count();
    if len > slot.len() {
        return Err(AlphaFault::TooLong(len));
    }
    if !text.is_ascii() {
        return Err(AlphaFault::NotAscii);
    }
    if text.as_bytes().last() == Some(&ALPHA_PAD) {
        return Err(AlphaFault::TrailingPad);
    }

    slot[..len].copy_from_slice(text.as_bytes());
    slot[len..].fill(ALPHA_PAD);
    Ok(())
}

fn read_alpha(id: FieldId, slot: &[u8]) -> String {
    let end = slot
        .iter()
        .rposition(|&b| b != ALPHA_PAD)
        .map_or(0, |last| last + 1);
    let content = &slot[..end];

    if content.is_empty() {
        warn!("Decoded empty {} field", id.name());
    } else if !content.is_ascii() {
        warn!("Decoded non-ASCII bytes in {} field: {:02x?}", id.name(), content);
    }

    String::from_utf8_lossy(content).into_owned()
}

fn alpha_error(id: FieldId, text: &str, fault: AlphaFault) -> CodecError {
    match (id, fault) {
        (FieldId::Stock, AlphaFault::TooLong(len)) => CodecError::SymbolTooLong {
            len,
            max: STOCK_WIDTH,
        },
        (FieldId::Stock, AlphaFault::NotAscii | AlphaFault::TrailingPad) => {
            CodecError::InvalidSymbol(text.to_string())
        }
        (
            FieldId::OrderToken | FieldId::ExistingOrderToken | FieldId::ReplacementOrderToken,
            AlphaFault::TooLong(len),
        ) => CodecError::TokenTooLong {
            len,
            max: ORDER_TOKEN_WIDTH,
        },
        (
            FieldId::OrderToken | FieldId::ExistingOrderToken | FieldId::ReplacementOrderToken,
            AlphaFault::NotAscii | AlphaFault::TrailingPad,
        ) => CodecError::InvalidToken(text.to_string()),
        _ => CodecError::SchemaMismatch(id.name()),
    }
}

fn fixed<const N: usize>(spec: &FieldSpec, slot: &[u8]) -> Result<[u8; N], CodecError> {
    slot.try_into()
        .map_err(|_| CodecError::SchemaMismatch(spec.id.name()))
}

fn fixed_mut<'s, const N: usize>(
    spec: &FieldSpec,
    slot: &'s mut [u8],
) -> Result<&'s mut [u8; N], CodecError> {
    slot.try_into()
        .map_err(|_| CodecError::SchemaMismatch(spec.id.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_tags() {
        assert_eq!(encode_side(OrderSide::Buy), 0x42);
        assert_eq!(encode_side(OrderSide::Sell), 0x53);
        assert_eq!(decode_side(0x42), Ok(OrderSide::Buy));
        assert_eq!(decode_side(0x53), Ok(OrderSide::Sell));
        assert_eq!(decode_side(b'b'), Err(CodecError::InvalidIndicator(b'b')));
        assert_eq!(decode_side(0x00), Err(CodecError::InvalidIndicator(0x00)));
    }

    #[test]
    fn test_symbol_padding() {
        let bytes = encode_symbol("IBM").unwrap();
        assert_eq!(bytes, [0x49, 0x42, 0x4D, 0x20, 0x20, 0x20, 0x20, 0x20]);
        assert_eq!(decode_symbol(&bytes), "IBM");
    }

    #[test]
    fn test_symbol_full_width() {
        let bytes = encode_symbol("ABCDEFGH").unwrap();
        assert_eq!(&bytes, b"ABCDEFGH");
        assert_eq!(decode_symbol(&bytes), "ABCDEFGH");
    }

    #[test]
    fn test_symbol_too_long() {
        assert_eq!(
            encode_symbol("ABCDEFGHI"),
            Err(CodecError::SymbolTooLong { len: 9, max: 8 })
        );
    }

    #[test]
    fn test_symbol_not_ascii() {
        assert_eq!(
            encode_symbol("ÄPFEL"),
            Err(CodecError::InvalidSymbol("ÄPFEL".to_string()))
        );
    }

    #[test]
    fn test_trailing_pad_rejected() {
        // "IBM " would decode as "IBM"
        assert_eq!(
            encode_symbol("IBM "),
            Err(CodecError::InvalidSymbol("IBM ".to_string()))
        );
        assert_eq!(
            encode_symbol(" "),
            Err(CodecError::InvalidSymbol(" ".to_string()))
        );
        assert_eq!(
            encode_token("ORD1  "),
            Err(CodecError::InvalidToken("ORD1  ".to_string()))
        );

        // length is still checked first
        assert_eq!(
            encode_symbol("ABCDEFGH "),
            Err(CodecError::SymbolTooLong { len: 9, max: 8 })
        );

        // inner and leading spaces survive the round trip
        let bytes = encode_symbol(" BRK A").unwrap();
        assert_eq!(decode_symbol(&bytes), " BRK A");
    }

    #[test]
    fn test_blank_symbol_decodes_empty() {
        assert_eq!(decode_symbol(b"        "), "");
    }

    #[test]
    fn test_symbol_keeps_leading_spaces() {
        assert_eq!(decode_symbol(b" BRK A  "), " BRK A");
    }

    #[test]
    fn test_token_padding() {
        let bytes = encode_token("ORD1").unwrap();
        assert_eq!(&bytes, b"ORD1          ");
        assert_eq!(decode_token(&bytes), "ORD1");

        assert_eq!(
            encode_token("ORDER-000000001"),
            Err(CodecError::TokenTooLong { len: 15, max: 14 })
        );
    }

    #[test]
    fn test_i32_big_endian() {
        assert_eq!(encode_i32(100), [0x00, 0x00, 0x00, 0x64]);
        assert_eq!(decode_i32([0xFF, 0xFF, 0xFF, 0xFF]), -1);
        assert_eq!(decode_i32(encode_i32(i32::MIN)), i32::MIN);
    }

    #[test]
    fn test_price_scaling() {
        let config = CodecConfig::default();
        assert_eq!(encode_price(dec!(123.45), &config), Ok(1_234_500));
        assert_eq!(decode_price(1_234_500, &config), Ok(dec!(123.45)));
    }

    #[test]
    fn test_price_round_trip_has_no_drift() {
        let config = CodecConfig::default();
        let mut price = dec!(123.45);
        for _ in 0..100 {
            price = decode_price(encode_price(price, &config).unwrap(), &config).unwrap();
        }
        assert_eq!(price, dec!(123.45));
    }

    #[test]
    fn test_price_out_of_range() {
        let config = CodecConfig::default();
        assert_eq!(
            encode_price(dec!(-1), &config),
            Err(CodecError::PriceOutOfRange(dec!(-1)))
        );
        assert_eq!(
            encode_price(dec!(999999.9999), &config),
            Err(CodecError::PriceOutOfRange(dec!(999999.9999)))
        );
    }

    #[test]
    fn test_price_configured_ceiling() {
        let config = CodecConfig::default().with_max_price(ScaledPrice::from_raw(1_000_000));
        assert_eq!(encode_price(dec!(100), &config), Ok(1_000_000));
        assert_eq!(
            encode_price(dec!(100.0001), &config),
            Err(CodecError::PriceOutOfRange(dec!(100.0001)))
        );
        assert_eq!(
            decode_price(1_000_001, &config),
            Err(CodecError::PriceOutOfRange(dec!(100.0001)))
        );
    }

    #[test]
    fn test_price_precision_policy() {
        let lenient = CodecConfig::default();
        assert_eq!(encode_price(dec!(1.23456), &lenient), Ok(12_346));

        let strict = CodecConfig::strict();
        assert_eq!(
            encode_price(dec!(1.23456), &strict),
            Err(CodecError::PrecisionLoss(dec!(1.23456)))
        );
    }

    #[test]
    fn test_write_field_kind_mismatch() {
        let spec = FieldSpec::price(FieldId::Price);
        let mut slot = [0u8; 4];
        let err = write_field(
            &spec,
            &FieldValue::Side(OrderSide::Buy),
            &mut slot,
            &CodecConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, CodecError::SchemaMismatch("price"));
    }

    #[test]
    fn test_read_quantity_policy() {
        let spec = FieldSpec::quantity(FieldId::Shares, 1);
        let zero = encode_i32(0);

        let checked = CodecConfig::default();
        assert_eq!(
            read_field(&spec, &zero, &checked),
            Err(CodecError::InvalidShares { shares: 0, min: 1 })
        );

        let unchecked = CodecConfig::default().without_decoded_share_validation();
        assert_eq!(read_field(&spec, &zero, &unchecked), Ok(FieldValue::Int(0)));
    }
}
