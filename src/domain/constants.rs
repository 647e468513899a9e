// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::{Address, address};
use lazy_static::lazy_static;
use std::collections::HashMap;

// Common assets
pub const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
pub const WETH_OPTIMISM: Address = address!("4200000000000000000000000000000000000006");
pub const WETH_ARBITRUM: Address = address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1");
pub const WETH_BASE: Address = address!("4200000000000000000000000000000000000006");
pub const WMATIC_POLYGON: Address = address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");
pub const WBNB_BSC: Address = address!("BB4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c");

/// Sentinel used by routes to denote the chain's base currency.
pub const NATIVE_TOKEN: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

// =============================================================================
// NETWORK CONSTANTS
// =============================================================================

pub const CHAIN_ETHEREUM: u64 = 1;
pub const CHAIN_OPTIMISM: u64 = 10;
pub const CHAIN_BSC: u64 = 56;
pub const CHAIN_POLYGON: u64 = 137;
pub const CHAIN_BASE: u64 = 8453;
pub const CHAIN_ARBITRUM: u64 = 42161;

// =============================================================================
// PAYLOAD LAYOUT
// =============================================================================

/// Outer frame: the payload starts right after the 32-byte offset word.
pub const OUTER_FRAME_OFFSET: u64 = 32;
/// Padding plus caller slot the caller prepends before handing the payload on.
pub const CALLER_PREFIX_LEN: usize = 96;
pub const WORD_LEN: usize = 32;
pub const ADDRESS_LEN: usize = 20;
/// Zero bytes preceding an address inside its ABI word.
pub const ADDRESS_WORD_PADDING: usize = WORD_LEN - ADDRESS_LEN;

// Leg header widths, in bytes.
pub const LEG_SIZE_WIDTH: usize = 4;
pub const LEG_WITHDRAW_FLAG_WIDTH: usize = 4;
pub const LEG_TOKEN_POS_WIDTH: usize = 8;
pub const LEG_PERCENT_WIDTH: usize = 8;
pub const LEG_HEADER_LEN: usize = LEG_SIZE_WIDTH
    + LEG_WITHDRAW_FLAG_WIDTH
    + 2 * LEG_TOKEN_POS_WIDTH
    + LEG_PERCENT_WIDTH;

// Instruction header widths, in bytes.
pub const INSTR_LEN_WIDTH: usize = 4;
pub const INSTR_OFFSET_WIDTH: usize = 2;
pub const INSTR_MODE_WIDTH: usize = 1;
pub const INSTR_FLAG_WIDTH: usize = 2;
pub const INSTR_HEADER_LEN: usize =
    ADDRESS_LEN + INSTR_LEN_WIDTH + 3 * INSTR_OFFSET_WIDTH + INSTR_MODE_WIDTH + INSTR_FLAG_WIDTH;

/// `transfer(address,uint256)`: selector + recipient word puts the amount at byte 36.
pub const TRANSFER_AMOUNT_OFFSET: u16 = 36;

/// Allowed drift when checking that leg percentages add up to 100.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.01;

lazy_static! {
    pub static ref WRAPPED_NATIVE_BY_CHAIN: HashMap<u64, Address> = {
        let mut m = HashMap::new();
        m.insert(CHAIN_ETHEREUM, WETH_MAINNET);
        m.insert(CHAIN_OPTIMISM, WETH_OPTIMISM);
        m.insert(CHAIN_ARBITRUM, WETH_ARBITRUM);
        m.insert(CHAIN_BASE, WETH_BASE);
        m.insert(CHAIN_POLYGON, WMATIC_POLYGON);
        m.insert(CHAIN_BSC, WBNB_BSC);
        m
    };
}

pub fn wrapped_native_for_chain(chain_id: u64) -> Option<Address> {
    WRAPPED_NATIVE_BY_CHAIN.get(&chain_id).copied()
}
