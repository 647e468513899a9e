// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Patch-point discovery.
//!
//! The execution contract overwrites amounts in place at call time, so the
//! builder records where each value sits inside the call data. Lookup is a
//! plain byte search and the first occurrence wins; a template that repeats
//! the same 20-byte address or 32-byte amount elsewhere would resolve to the
//! earlier copy.

use crate::domain::constants::{ADDRESS_WORD_PADDING, WORD_LEN};
use crate::domain::error::AppError;
use crate::domain::route::Leg;
use crate::services::bytecode::flags::Flag;
use alloy::primitives::{Address, U256};

pub fn address_word(addr: Address) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[ADDRESS_WORD_PADDING..].copy_from_slice(addr.as_slice());
    word
}

pub fn amount_word(amount: U256) -> [u8; WORD_LEN] {
    amount.to_be_bytes::<WORD_LEN>()
}

pub fn find_offset_from(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.is_empty() || start > haystack.len() {
        return None;
    }
    haystack[start..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|idx| idx + start)
}

pub fn find_offset(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    find_offset_from(haystack, needle, 0)
}

/// Like [`find_offset_from`], but a miss is an encoding error.
pub fn locate_from(
    haystack: &[u8],
    needle: &[u8],
    start: usize,
    what: &str,
) -> Result<usize, AppError> {
    find_offset_from(haystack, needle, start).ok_or_else(|| AppError::PatternNotFound {
        what: what.to_string(),
    })
}

pub fn locate(haystack: &[u8], needle: &[u8], what: &str) -> Result<usize, AppError> {
    locate_from(haystack, needle, 0, what)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchPoints {
    pub src_amount: usize,
    pub dest_amount: usize,
    pub balance_check: usize,
}

/// Resolve the patch points of a dex call whose token and amount words are
/// already embedded. Zero means "no patch point".
///
/// [`SplitRouteBuilder`](crate::services::bytecode::SplitRouteBuilder) only
/// emits non-injecting flags; the injecting ones (`% 4 == 2 | 3`) come from
/// builder variants that take amounts from the previous call at run time.
pub fn resolve_patch_points(call_data: &[u8], leg: &Leg, flag: Flag) -> Result<PatchPoints, AppError> {
    if !flag.injects_amount() {
        return Ok(PatchPoints::default());
    }

    let src_amount = locate(call_data, &amount_word(leg.src_amount), "source amount")?;
    let dest_amount = locate(call_data, &amount_word(leg.dest_amount), "destination amount")?;

    // The contract expects the start of the ABI word holding the address.
    let token_idx = locate(call_data, leg.dest_token.as_slice(), "destination token")?;
    let balance_check = token_idx
        .checked_sub(ADDRESS_WORD_PADDING)
        .ok_or_else(|| AppError::MisalignedAddress {
            what: "destination token".to_string(),
            index: token_idx,
        })?;

    Ok(PatchPoints {
        src_amount,
        dest_amount,
        balance_check,
    })
}
