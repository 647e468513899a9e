// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Builder for split routes: one path cut into parallel legs, each taking a
//! fixed share of the input. The leg that wraps native always runs last so the
//! dust cleanup sees every other leg's output.

use crate::domain::constants::PERCENT_SUM_TOLERANCE;
use crate::domain::error::AppError;
use crate::domain::route::{Leg, LegCallTemplate, RouteRequest};
use crate::services::bytecode::builder::{BuilderConfig, ExecutorBytecodeBuilder};
use crate::services::bytecode::flags::{
    FlagPair, LegContext, classify_horizontal, classify_simple,
};
use crate::services::bytecode::framing::percent_to_bps;
use crate::services::bytecode::leg::{LegPlan, assemble_leg};
use alloy::primitives::Bytes;

#[derive(Debug, Clone)]
pub struct SplitRouteBuilder {
    config: BuilderConfig,
}

impl SplitRouteBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    fn leg_context(&self, request: &RouteRequest, leg: &Leg, template: &LegCallTemplate) -> LegContext {
        let dest_is_native = self.config.is_native(leg.dest_token);
        LegContext {
            src_is_native: self.config.is_native(leg.src_token),
            dest_is_native,
            has_recipient_param: template.has_recipient_param,
            wrap_precedes: template.needs_wrap_native,
            unwrap_follows: dest_is_native && request.withdraw_template().is_some(),
        }
    }

    fn validate(&self, request: &RouteRequest) -> Result<(), AppError> {
        let legs = &request.route.legs;
        if legs.is_empty() {
            return Err(AppError::EmptyRoute);
        }
        if request.templates.len() != legs.len() {
            return Err(AppError::LegTemplateMismatch {
                legs: legs.len(),
                templates: request.templates.len(),
            });
        }

        let wrap_legs: Vec<usize> = request
            .templates
            .iter()
            .enumerate()
            .filter(|(_, t)| t.needs_wrap_native)
            .map(|(i, _)| i)
            .collect();
        if wrap_legs.len() > 1 {
            return Err(AppError::MultipleWrapLegs {
                count: wrap_legs.len(),
            });
        }
        if let Some(&leg) = wrap_legs.first()
            && request.deposit_template().is_none()
        {
            return Err(AppError::MissingWrapTemplate { leg });
        }

        let mut total = 0.0;
        for leg in legs {
            percent_to_bps(leg.percent)?;
            total += leg.percent;
        }
        if (total - 100.0).abs() > PERCENT_SUM_TOLERANCE {
            return Err(AppError::Validation {
                field: "percent".into(),
                message: format!("leg shares add up to {total}, expected 100"),
            });
        }
        Ok(())
    }
}

/// Request indices in execution order: legs without wrap first, then the wrap leg.
pub fn assembly_order(templates: &[LegCallTemplate]) -> Vec<usize> {
    let (plain, wrapping): (Vec<usize>, Vec<usize>) =
        (0..templates.len()).partition(|&i| !templates[i].needs_wrap_native);
    plain.into_iter().chain(wrapping).collect()
}

impl ExecutorBytecodeBuilder for SplitRouteBuilder {
    fn name(&self) -> &'static str {
        "split-route"
    }

    fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn classify(&self, request: &RouteRequest) -> Vec<FlagPair> {
        match request.route.legs.as_slice() {
            [leg] => request
                .templates
                .first()
                .map(|template| vec![classify_simple(&self.leg_context(request, leg, template))])
                .unwrap_or_default(),
            legs => classify_horizontal(legs.len()),
        }
    }

    fn build(&self, request: &RouteRequest) -> Result<Bytes, AppError> {
        self.validate(request)?;

        let flags = self.classify(request);
        let order = assembly_order(&request.templates);
        let any_wrap = request.any_needs_wrap();

        let mut body = Vec::new();
        for (position, &index) in order.iter().enumerate() {
            let leg = &request.route.legs[index];
            let template = &request.templates[index];
            let plan = LegPlan {
                index,
                position,
                is_last: position + 1 == order.len(),
                is_wrap_leg: template.needs_wrap_native,
                leg,
                template,
                flags: flags[index],
            };
            let assembled = assemble_leg(self, request, &plan)?;
            let withdraw_dust = any_wrap && self.config.is_native(leg.src_token);
            let framed = self.frame_leg(&assembled, leg, withdraw_dust)?;
            body.extend_from_slice(&framed);
        }

        let payload = self.frame_payload(&body);
        tracing::info!(
            target: "bytecode",
            builder = self.name(),
            legs = order.len(),
            body_bytes = body.len(),
            payload_bytes = payload.len(),
            sender = ?request.sender,
            "Compiled route payload"
        );
        Ok(payload)
    }
}
