// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::AppError;
use crate::domain::route::{Leg, LegCallTemplate, RouteRequest};
use crate::services::bytecode::builder::ExecutorBytecodeBuilder;
use crate::services::bytecode::flags::{AmountMode, Flag, FlagPair};
use crate::services::bytecode::instruction::Instruction;
use crate::services::bytecode::offsets::{address_word, amount_word, resolve_patch_points};

/// Instruction stream for one leg, before its metadata header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledLeg {
    pub call_data: Vec<u8>,
    /// Byte offset of the dex call instruction inside `call_data`.
    pub dex_offset: usize,
}

/// Where a leg sits in the route and how it was classified.
#[derive(Debug, Clone, Copy)]
pub struct LegPlan<'a> {
    /// Index in the request's leg list.
    pub index: usize,
    /// Index in assembly order.
    pub position: usize,
    pub is_last: bool,
    pub is_wrap_leg: bool,
    pub leg: &'a Leg,
    pub template: &'a LegCallTemplate,
    pub flags: FlagPair,
}

/// Template body followed by the token words and, when the flag injects, the amount words.
pub fn embed_leg_values(call_data: &[u8], leg: &Leg, flag: Flag) -> Vec<u8> {
    let mut out = Vec::with_capacity(call_data.len() + 4 * 32);
    out.extend_from_slice(call_data);
    out.extend_from_slice(&address_word(leg.src_token));
    out.extend_from_slice(&address_word(leg.dest_token));
    if flag.injects_amount() {
        out.extend_from_slice(&amount_word(leg.src_amount));
        out.extend_from_slice(&amount_word(leg.dest_amount));
    }
    out
}

pub fn assemble_leg<B>(
    builder: &B,
    request: &RouteRequest,
    plan: &LegPlan<'_>,
) -> Result<AssembledLeg, AppError>
where
    B: ExecutorBytecodeBuilder + ?Sized,
{
    let cfg = builder.config();
    let leg = plan.leg;
    let template = plan.template;
    let src_native = cfg.is_native(leg.src_token);
    let dest_native = cfg.is_native(leg.dest_token);

    let dex_data = embed_leg_values(&template.call_data, leg, plan.flags.dex);
    let patch = resolve_patch_points(&dex_data, leg, plan.flags.dex)?;
    let dex = Instruction::new(template.target, dex_data, plan.flags.dex)
        .with_patch(patch)
        .with_mode(template.special_mode);

    let mut prefix = Vec::new();
    if plan.is_wrap_leg {
        let deposit = request
            .deposit_template()
            .ok_or(AppError::MissingWrapTemplate { leg: plan.index })?;
        prefix.push(builder.approval(cfg.wrapped_native, template.target, plan.flags.approve));
        prefix.push(builder.wrap(deposit));
    }

    if plan.flags.dex.amount_mode() != AmountMode::SendNative {
        let approve_token = if !src_native {
            Some(leg.src_token)
        } else if plan.position > 0 {
            Some(cfg.wrapped_native)
        } else {
            None
        };
        if let Some(token) = approve_token {
            prefix.push(builder.approval(token, template.target, plan.flags.approve));
        }
    }

    let mut tail = Vec::new();
    if plan.is_last {
        if request.any_missing_recipient() && !dest_native {
            tail.push(builder.leftover_transfer(leg.dest_token));
        }
        let mut unwrapped = false;
        if dest_native && let Some(withdraw) = request.withdraw_template() {
            tail.push(builder.unwrap(withdraw));
            unwrapped = true;
        }
        if dest_native && (!template.has_recipient_param || unwrapped) {
            tail.push(builder.forward_native());
        }
    }

    let mut call_data = Vec::new();
    for ix in &prefix {
        ix.encode_into(&mut call_data)?;
    }
    let dex_offset = call_data.len();
    dex.encode_into(&mut call_data)?;
    for ix in &tail {
        ix.encode_into(&mut call_data)?;
    }

    tracing::debug!(
        target: "bytecode",
        leg = plan.index,
        position = plan.position,
        dex_flag = %plan.flags.dex,
        prefix = prefix.len(),
        dex_offset,
        tail = tail.len(),
        bytes = call_data.len(),
        "Assembled leg"
    );

    Ok(AssembledLeg {
        call_data,
        dex_offset,
    })
}
