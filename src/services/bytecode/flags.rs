// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Per-call behavior flags.
//!
//! The execution contract reads two things out of one integer: `flag % 4`
//! picks the amount behavior and `flag % 3` picks the post-call balance check.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountMode {
    Skip,
    SendNative,
    SendNativeAndInject,
    Inject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceCheck {
    None,
    Native,
    DestToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flag(pub u16);

impl Flag {
    pub const NONE: Flag = Flag(0);
    pub const INJECT_AMOUNT: Flag = Flag(3);
    pub const CHECK_NATIVE_BALANCE: Flag = Flag(4);
    pub const SEND_NATIVE_CHECK_DEST_BALANCE: Flag = Flag(5);
    pub const CHECK_DEST_BALANCE: Flag = Flag(8);
    pub const SEND_NATIVE: Flag = Flag(9);

    pub fn amount_mode(self) -> AmountMode {
        match self.0 % 4 {
            0 => AmountMode::Skip,
            1 => AmountMode::SendNative,
            2 => AmountMode::SendNativeAndInject,
            _ => AmountMode::Inject,
        }
    }

    pub fn balance_check(self) -> BalanceCheck {
        match self.0 % 3 {
            0 => BalanceCheck::None,
            1 => BalanceCheck::Native,
            _ => BalanceCheck::DestToken,
        }
    }

    pub fn injects_amount(self) -> bool {
        matches!(
            self.amount_mode(),
            AmountMode::Inject | AmountMode::SendNativeAndInject
        )
    }

    pub fn sends_native(self) -> bool {
        matches!(
            self.amount_mode(),
            AmountMode::SendNative | AmountMode::SendNativeAndInject
        )
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagPair {
    pub dex: Flag,
    pub approve: Flag,
}

impl FlagPair {
    pub fn dex_only(dex: Flag) -> Self {
        Self {
            dex,
            approve: Flag::NONE,
        }
    }
}

/// What the classifier needs to know about a leg and its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegContext {
    pub src_is_native: bool,
    pub dest_is_native: bool,
    pub has_recipient_param: bool,
    /// A deposit into wrapped native runs before the dex call.
    pub wrap_precedes: bool,
    /// A withdraw from wrapped native runs after the dex call.
    pub unwrap_follows: bool,
}

/// Flags for a route made of a single leg.
pub fn classify_simple(ctx: &LegContext) -> FlagPair {
    let dex = if ctx.src_is_native && !ctx.wrap_precedes {
        Flag::SEND_NATIVE_CHECK_DEST_BALANCE
    } else if ctx.dest_is_native && !ctx.unwrap_follows {
        Flag::CHECK_NATIVE_BALANCE
    } else if !ctx.has_recipient_param || (ctx.dest_is_native && ctx.unwrap_follows) {
        Flag::CHECK_DEST_BALANCE
    } else {
        Flag::NONE
    };
    FlagPair::dex_only(dex)
}

/// Flags for a horizontal split: every leg carries fixed literal amounts.
pub fn classify_horizontal(leg_count: usize) -> Vec<FlagPair> {
    vec![FlagPair::default(); leg_count]
}
