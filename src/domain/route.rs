// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Input model for the route compiler.
//!
//! A [`RouteRequest`] carries the single best path picked upstream, one
//! pre-encoded [`LegCallTemplate`] per leg (same order as the legs) and the
//! optional wrapped-native deposit/withdraw call data.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub src_token: Address,
    pub dest_token: Address,
    pub src_amount: U256,
    pub dest_amount: U256,
    /// Share of the route input consumed by this leg, 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<Leg>,
}

/// Per-call behavior byte understood by the execution contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SpecialInvocationMode {
    #[default]
    Default,
    BalancerV2,
    ForwardNative,
    MakerPsm,
    Custom(u8),
}

impl From<u8> for SpecialInvocationMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Default,
            1 => Self::BalancerV2,
            2 => Self::ForwardNative,
            3 => Self::MakerPsm,
            other => Self::Custom(other),
        }
    }
}

impl From<SpecialInvocationMode> for u8 {
    fn from(mode: SpecialInvocationMode) -> Self {
        match mode {
            SpecialInvocationMode::Default => 0,
            SpecialInvocationMode::BalancerV2 => 1,
            SpecialInvocationMode::ForwardNative => 2,
            SpecialInvocationMode::MakerPsm => 3,
            SpecialInvocationMode::Custom(other) => other,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegCallTemplate {
    /// Contract the dex call is sent to; also the approval spender.
    pub target: Address,
    /// Pre-encoded dex call; token words (and amounts) are appended by the builder.
    pub call_data: Bytes,
    #[serde(default = "default_true")]
    pub has_recipient_param: bool,
    #[serde(default)]
    pub needs_wrap_native: bool,
    #[serde(default)]
    pub special_mode: SpecialInvocationMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapUnwrapTemplates {
    pub deposit: Option<Bytes>,
    pub withdraw: Option<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub route: Route,
    pub templates: Vec<LegCallTemplate>,
    #[serde(default)]
    pub wrap: Option<WrapUnwrapTemplates>,
    /// Caller identity; only the outer framing convention refers to it.
    #[serde(default)]
    pub sender: Option<Address>,
}

impl RouteRequest {
    pub fn deposit_template(&self) -> Option<&Bytes> {
        self.wrap.as_ref().and_then(|w| w.deposit.as_ref())
    }

    pub fn withdraw_template(&self) -> Option<&Bytes> {
        self.wrap.as_ref().and_then(|w| w.withdraw.as_ref())
    }

    pub fn any_missing_recipient(&self) -> bool {
        self.templates.iter().any(|t| !t.has_recipient_param)
    }

    pub fn any_needs_wrap(&self) -> bool {
        self.templates.iter().any(|t| t.needs_wrap_native)
    }
}
