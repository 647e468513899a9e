// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Leg headers and the outer payload frame.
//!
//! ```text
//! [32B offset = 32][32B length = body + 96]
//! body = for each leg:
//!   [4B size][4B withdraw dust][8B dest token pos][8B src token pos][8B ceil(percent*100)][call data]
//! ```

use crate::domain::constants::{
    CALLER_PREFIX_LEN, LEG_HEADER_LEN, LEG_PERCENT_WIDTH, LEG_SIZE_WIDTH, LEG_TOKEN_POS_WIDTH,
    LEG_WITHDRAW_FLAG_WIDTH, OUTER_FRAME_OFFSET, WORD_LEN,
};
use crate::domain::error::AppError;
use crate::domain::route::Leg;
use crate::services::bytecode::instruction::{Instruction, parse_instructions};
use crate::services::bytecode::leg::AssembledLeg;
use crate::services::bytecode::offsets::locate;
use alloy::primitives::U256;

/// Append `value` as a `width`-byte big-endian integer, rejecting values that don't fit.
pub(crate) fn put_be(
    out: &mut Vec<u8>,
    field: &'static str,
    value: u128,
    width: usize,
) -> Result<(), AppError> {
    debug_assert!((1..=16).contains(&width));
    if width < 16 && (value >> (width * 8)) != 0 {
        return Err(AppError::FieldOverflow {
            field,
            value: value.to_string(),
            width,
        });
    }
    out.extend_from_slice(&value.to_be_bytes()[16 - width..]);
    Ok(())
}

pub(crate) fn read_be(data: &[u8], cursor: &mut usize, width: usize) -> Result<u128, AppError> {
    let end = cursor
        .checked_add(width)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| AppError::Decode(format!("truncated field at byte {}", *cursor)))?;
    let mut buf = [0u8; 16];
    buf[16 - width..].copy_from_slice(&data[*cursor..end]);
    *cursor = end;
    Ok(u128::from_be_bytes(buf))
}

/// Basis-point share of a leg, rounded up.
pub fn percent_to_bps(percent: f64) -> Result<u64, AppError> {
    if !percent.is_finite() || percent < 0.0 {
        return Err(AppError::Validation {
            field: "percent".into(),
            message: format!("{percent} is not a valid share"),
        });
    }
    // Trim float noise (0.07 * 100 = 7.000000000000001) before rounding up.
    let scaled = ((percent * 100.0) * 1e6).round() / 1e6;
    let bps = scaled.ceil();
    if bps >= u64::MAX as f64 {
        return Err(AppError::FieldOverflow {
            field: "percent",
            value: percent.to_string(),
            width: LEG_PERCENT_WIDTH,
        });
    }
    Ok(bps as u64)
}

/// Wrap one assembled leg in its metadata header.
///
/// Token positions are looked up again on the final call data. Prefix frames
/// count, so a leg that approves its source token reports position 0.
pub fn frame_leg(assembled: &AssembledLeg, leg: &Leg, withdraw_dust: bool) -> Result<Vec<u8>, AppError> {
    let data = &assembled.call_data;
    let dest_pos = locate(data, leg.dest_token.as_slice(), "destination token")?;
    let src_pos = locate(data, leg.src_token.as_slice(), "source token")?;
    let bps = percent_to_bps(leg.percent)?;

    let mut out = Vec::with_capacity(LEG_HEADER_LEN + data.len());
    put_be(&mut out, "leg size", data.len() as u128, LEG_SIZE_WIDTH)?;
    put_be(
        &mut out,
        "withdraw flag",
        u128::from(withdraw_dust),
        LEG_WITHDRAW_FLAG_WIDTH,
    )?;
    put_be(&mut out, "destination token position", dest_pos as u128, LEG_TOKEN_POS_WIDTH)?;
    put_be(&mut out, "source token position", src_pos as u128, LEG_TOKEN_POS_WIDTH)?;
    put_be(&mut out, "percent", u128::from(bps), LEG_PERCENT_WIDTH)?;
    out.extend_from_slice(data);
    Ok(out)
}

pub fn frame_payload(body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * WORD_LEN + body.len());
    out.extend_from_slice(&U256::from(OUTER_FRAME_OFFSET).to_be_bytes::<WORD_LEN>());
    out.extend_from_slice(&U256::from(body.len() + CALLER_PREFIX_LEN).to_be_bytes::<WORD_LEN>());
    out.extend_from_slice(body);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedLegView {
    pub withdraw_dust: bool,
    pub dest_token_pos: u64,
    pub src_token_pos: u64,
    pub percent_bps: u64,
    pub call_data: Vec<u8>,
}

impl FramedLegView {
    pub fn instructions(&self) -> Result<Vec<Instruction>, AppError> {
        parse_instructions(&self.call_data)
    }
}

/// Validate the outer frame and split the body into legs.
pub fn parse_payload(payload: &[u8]) -> Result<Vec<FramedLegView>, AppError> {
    if payload.len() < 2 * WORD_LEN {
        return Err(AppError::Decode("payload shorter than its outer frame".into()));
    }
    let offset = U256::from_be_slice(&payload[..WORD_LEN]);
    if offset != U256::from(OUTER_FRAME_OFFSET) {
        return Err(AppError::Decode(format!("unexpected outer offset {offset}")));
    }
    let body = &payload[2 * WORD_LEN..];
    let length = U256::from_be_slice(&payload[WORD_LEN..2 * WORD_LEN]);
    if length != U256::from(body.len() + CALLER_PREFIX_LEN) {
        return Err(AppError::Decode(format!(
            "outer length {length} does not match body of {} bytes",
            body.len()
        )));
    }

    let mut legs = Vec::new();
    let mut cursor = 0usize;
    while cursor < body.len() {
        let size = read_be(body, &mut cursor, LEG_SIZE_WIDTH)? as usize;
        let withdraw = read_be(body, &mut cursor, LEG_WITHDRAW_FLAG_WIDTH)?;
        let dest_token_pos = read_be(body, &mut cursor, LEG_TOKEN_POS_WIDTH)? as u64;
        let src_token_pos = read_be(body, &mut cursor, LEG_TOKEN_POS_WIDTH)? as u64;
        let percent_bps = read_be(body, &mut cursor, LEG_PERCENT_WIDTH)? as u64;
        let end = cursor
            .checked_add(size)
            .filter(|end| *end <= body.len())
            .ok_or_else(|| AppError::Decode(format!("leg at byte {cursor} overruns payload")))?;
        legs.push(FramedLegView {
            withdraw_dust: withdraw != 0,
            dest_token_pos,
            src_token_pos,
            percent_bps,
            call_data: body[cursor..end].to_vec(),
        });
        cursor = end;
    }
    Ok(legs)
}
