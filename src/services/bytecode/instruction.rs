// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! One call as the execution contract sees it:
//!
//! ```text
//! [20B target][4B calldata len][2B src amount pos][2B dest amount pos]
//! [2B balance check pos][1B special mode][2B flag][calldata]
//! ```

use crate::domain::constants::{
    ADDRESS_LEN, INSTR_FLAG_WIDTH, INSTR_HEADER_LEN, INSTR_LEN_WIDTH, INSTR_MODE_WIDTH,
    INSTR_OFFSET_WIDTH,
};
use crate::domain::error::AppError;
use crate::domain::route::SpecialInvocationMode;
use crate::services::bytecode::flags::Flag;
use crate::services::bytecode::framing::{put_be, read_be};
use crate::services::bytecode::offsets::PatchPoints;
use alloy::primitives::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub target: Address,
    pub call_data: Vec<u8>,
    pub patch: PatchPoints,
    pub mode: SpecialInvocationMode,
    pub flag: Flag,
}

impl Instruction {
    pub fn new(target: Address, call_data: Vec<u8>, flag: Flag) -> Self {
        Self {
            target,
            call_data,
            patch: PatchPoints::default(),
            mode: SpecialInvocationMode::Default,
            flag,
        }
    }

    pub fn with_patch(mut self, patch: PatchPoints) -> Self {
        self.patch = patch;
        self
    }

    pub fn with_mode(mut self, mode: SpecialInvocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn encoded_len(&self) -> usize {
        INSTR_HEADER_LEN + self.call_data.len()
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), AppError> {
        out.reserve(self.encoded_len());
        out.extend_from_slice(self.target.as_slice());
        put_be(out, "call data length", self.call_data.len() as u128, INSTR_LEN_WIDTH)?;
        put_be(out, "source amount offset", self.patch.src_amount as u128, INSTR_OFFSET_WIDTH)?;
        put_be(out, "destination amount offset", self.patch.dest_amount as u128, INSTR_OFFSET_WIDTH)?;
        put_be(out, "balance check offset", self.patch.balance_check as u128, INSTR_OFFSET_WIDTH)?;
        out.push(u8::from(self.mode));
        put_be(out, "flag", self.flag.value() as u128, INSTR_FLAG_WIDTH)?;
        out.extend_from_slice(&self.call_data);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, AppError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out)?;
        Ok(out)
    }
}

/// Split a leg's call data back into its instructions.
pub fn parse_instructions(data: &[u8]) -> Result<Vec<Instruction>, AppError> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while pos < data.len() {
        if data.len() - pos < INSTR_HEADER_LEN {
            return Err(AppError::Decode(format!(
                "truncated instruction header at byte {pos}"
            )));
        }
        let target = Address::from_slice(&data[pos..pos + ADDRESS_LEN]);
        let mut cursor = pos + ADDRESS_LEN;
        let len = read_be(data, &mut cursor, INSTR_LEN_WIDTH)? as usize;
        let src_amount = read_be(data, &mut cursor, INSTR_OFFSET_WIDTH)? as usize;
        let dest_amount = read_be(data, &mut cursor, INSTR_OFFSET_WIDTH)? as usize;
        let balance_check = read_be(data, &mut cursor, INSTR_OFFSET_WIDTH)? as usize;
        let mode = SpecialInvocationMode::from(read_be(data, &mut cursor, INSTR_MODE_WIDTH)? as u8);
        let flag = Flag(read_be(data, &mut cursor, INSTR_FLAG_WIDTH)? as u16);

        let end = cursor
            .checked_add(len)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| {
                AppError::Decode(format!("instruction at byte {pos} overruns call data"))
            })?;
        out.push(Instruction {
            target,
            call_data: data[cursor..end].to_vec(),
            patch: PatchPoints {
                src_amount,
                dest_amount,
                balance_check,
            },
            mode,
            flag,
        });
        pos = end;
    }
    Ok(out)
}
