//! Packed byte encoding of a route for the on-chain routers.
//!
//! A path interleaves token addresses and fees:
//!
//! ```text
//! token_0 (32 bytes) | fee_0 (3 bytes) | token_1 (32 bytes) | fee_1 | ... | token_n
//! ```
//!
//! An address field is the BCS encoding of the address string (ULEB128
//! length followed by the UTF-8 text of the lowercase long form `0x…`),
//! truncated or zero-padded to [`ADDRESS_LENGTH`] bytes.  For a long-form
//! address that is the byte `0x42` (66) followed by `0x` and the first 29
//! hex digits.  Fees are the three low-order bytes of the fee's
//! little-endian `u64` encoding.  Constant-product hops carry [`AMM_FEE_PATH_PLACEHOLDER`] in
//! place of a fee tier.  An exact-output path is the exact-input sequence
//! reversed element by element, so it starts at the output token.

use super::Route;
use crate::domain::{Token, ADDRESS_LENGTH};
use crate::error::{Result, RouteError};
use crate::pools::Pool;

/// Fee field of a constant-product hop in a mixed path (`2^23`).
pub const AMM_FEE_PATH_PLACEHOLDER: u32 = 8_388_608;

/// Encoded width of a fee field.
pub const FEE_LENGTH: usize = 3;

enum PathElement<'a> {
    Address(&'a Token),
    Fee(u32),
}

fn hop_fee(pool: &Pool) -> u32 {
    match pool {
        Pool::ConstantProduct(_) => AMM_FEE_PATH_PLACEHOLDER,
        Pool::Concentrated(p) => p.fee().value(),
    }
}

fn elements(route: &Route) -> Vec<PathElement<'_>> {
    let mut out = Vec::with_capacity(route.pools().len() * 2 + 1);
    for (pool, token) in route.pools().iter().zip(route.path()) {
        out.push(PathElement::Address(token));
        out.push(PathElement::Fee(hop_fee(pool)));
    }
    if let Some(last) = route.path().last() {
        out.push(PathElement::Address(last));
    }
    out
}

fn push_uleb128(bytes: &mut Vec<u8>, mut value: usize) {
    loop {
        let low = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            bytes.push(low);
            return;
        }
        bytes.push(low | 0x80);
    }
}

/// The path field for `token`: its BCS-encoded address string, cut or
/// zero-padded to [`ADDRESS_LENGTH`].
#[must_use]
pub fn encode_address(token: &Token) -> [u8; ADDRESS_LENGTH] {
    let text = token.address().to_long_string();
    let mut encoded = Vec::with_capacity(text.len() + 2);
    push_uleb128(&mut encoded, text.len());
    encoded.extend_from_slice(text.as_bytes());

    let mut field = [0u8; ADDRESS_LENGTH];
    let take = encoded.len().min(ADDRESS_LENGTH);
    field[..take].copy_from_slice(&encoded[..take]);
    field
}

fn pack(elements: &[PathElement<'_>]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(elements.len() * ADDRESS_LENGTH);
    for element in elements {
        match element {
            PathElement::Address(token) => bytes.extend_from_slice(&encode_address(token)),
            PathElement::Fee(fee) => {
                bytes.extend_from_slice(&u64::from(*fee).to_le_bytes()[..FEE_LENGTH]);
            }
        }
    }
    bytes
}

/// Encodes an all-concentrated route.
///
/// # Errors
///
/// Returns [`RouteError::RouteInvalid`]`("PROTOCOL")` if any hop is a
/// constant-product pair; use [`encode_mixed_route_to_path`] for those.
pub fn encode_route_to_path(route: &Route, exact_output: bool) -> Result<Vec<u8>> {
    if !route.pools().iter().all(Pool::is_concentrated) {
        return Err(RouteError::RouteInvalid("PROTOCOL"));
    }
    let mut elements = elements(route);
    if exact_output {
        elements.reverse();
    }
    Ok(pack(&elements))
}

/// Encodes any route in exact-input order, marking constant-product hops
/// with [`AMM_FEE_PATH_PLACEHOLDER`].
#[must_use]
pub fn encode_mixed_route_to_path(route: &Route) -> Vec<u8> {
    pack(&elements(route))
}

/// Byte length of a path through `hops` pools.
#[must_use]
pub const fn path_length(hops: usize) -> usize {
    (hops + 1) * ADDRESS_LENGTH + hops * FEE_LENGTH
}
