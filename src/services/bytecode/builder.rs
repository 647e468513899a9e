// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Shared surface of the bytecode builders.
//!
//! Each execution contract version gets its own builder. They share the
//! helper calls below and differ in how flags are chosen and how legs are
//! laid out, which is what [`ExecutorBytecodeBuilder::classify`] and
//! [`ExecutorBytecodeBuilder::build`] cover.

use crate::domain::constants::{NATIVE_TOKEN, TRANSFER_AMOUNT_OFFSET};
use crate::domain::error::AppError;
use crate::domain::route::{Leg, RouteRequest, SpecialInvocationMode};
use crate::services::bytecode::calls::{approve_calldata, transfer_calldata};
use crate::services::bytecode::flags::{Flag, FlagPair};
use crate::services::bytecode::framing;
use crate::services::bytecode::instruction::Instruction;
use crate::services::bytecode::leg::AssembledLeg;
use crate::services::bytecode::offsets::PatchPoints;
use alloy::primitives::{Address, Bytes, U256};

/// Addresses the builder needs; resolved once from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    pub native_token: Address,
    pub wrapped_native: Address,
    /// Where leftover output tokens are swept to.
    pub receiving_address: Address,
}

impl BuilderConfig {
    pub fn new(wrapped_native: Address, receiving_address: Address) -> Self {
        Self {
            native_token: NATIVE_TOKEN,
            wrapped_native,
            receiving_address,
        }
    }

    pub fn with_native_token(mut self, native_token: Address) -> Self {
        self.native_token = native_token;
        self
    }

    pub fn is_native(&self, token: Address) -> bool {
        token == self.native_token
    }
}

pub trait ExecutorBytecodeBuilder: Send + Sync {
    fn name(&self) -> &'static str;

    fn config(&self) -> &BuilderConfig;

    /// One flag pair per leg, in request order.
    fn classify(&self, request: &RouteRequest) -> Vec<FlagPair>;

    /// Compile the request into the framed payload.
    fn build(&self, request: &RouteRequest) -> Result<Bytes, AppError>;

    fn approval(&self, token: Address, spender: Address, flag: Flag) -> Instruction {
        Instruction::new(token, approve_calldata(spender), flag)
    }

    fn wrap(&self, deposit: &Bytes) -> Instruction {
        Instruction::new(self.config().wrapped_native, deposit.to_vec(), Flag::SEND_NATIVE)
    }

    fn unwrap(&self, withdraw: &Bytes) -> Instruction {
        Instruction::new(self.config().wrapped_native, withdraw.to_vec(), Flag::NONE)
    }

    /// Sweep of the remaining `token` balance; the zero amount is patched on-chain.
    fn leftover_transfer(&self, token: Address) -> Instruction {
        Instruction::new(
            token,
            transfer_calldata(self.config().receiving_address, U256::ZERO),
            Flag::INJECT_AMOUNT,
        )
        .with_patch(PatchPoints {
            src_amount: TRANSFER_AMOUNT_OFFSET as usize,
            ..Default::default()
        })
    }

    fn forward_native(&self) -> Instruction {
        Instruction::new(Address::ZERO, Vec::new(), Flag::NONE)
            .with_mode(SpecialInvocationMode::ForwardNative)
    }

    fn frame_leg(
        &self,
        assembled: &AssembledLeg,
        leg: &Leg,
        withdraw_dust: bool,
    ) -> Result<Vec<u8>, AppError> {
        framing::frame_leg(assembled, leg, withdraw_dust)
    }

    fn frame_payload(&self, body: &[u8]) -> Bytes {
        Bytes::from(framing::frame_payload(body))
    }
}
