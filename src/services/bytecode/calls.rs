// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy_sol_types::SolCall;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface ERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }

    #[derive(Debug, PartialEq, Eq)]
    interface WrappedNative {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
    }
}

/// Unlimited allowance for `spender`.
pub fn approve_calldata(spender: Address) -> Vec<u8> {
    ERC20::approveCall {
        spender,
        amount: U256::MAX,
    }
    .abi_encode()
}

pub fn transfer_calldata(to: Address, amount: U256) -> Vec<u8> {
    ERC20::transferCall { to, amount }.abi_encode()
}

pub fn deposit_calldata() -> Vec<u8> {
    WrappedNative::depositCall {}.abi_encode()
}

pub fn withdraw_calldata(amount: U256) -> Vec<u8> {
    WrappedNative::withdrawCall { wad: amount }.abi_encode()
}
