// SPDX-License-Identifier: MIT
// End-to-end compilation of route requests into executor payloads. Each test
// builds a request, compiles it, then decodes the payload back into legs and
// instructions to check ordering, flags and header metadata.

use alloy::primitives::{Address, Bytes, U256};
use oxidity_route_compiler::domain::constants::NATIVE_TOKEN;
use oxidity_route_compiler::domain::error::AppError;
use oxidity_route_compiler::domain::route::{
    Leg, LegCallTemplate, Route, RouteRequest, SpecialInvocationMode, WrapUnwrapTemplates,
};
use oxidity_route_compiler::services::bytecode::calls::{
    approve_calldata, deposit_calldata, withdraw_calldata,
};
use oxidity_route_compiler::services::bytecode::flags::Flag;
use oxidity_route_compiler::services::bytecode::framing::parse_payload;
use oxidity_route_compiler::services::bytecode::{
    BuilderConfig, ExecutorBytecodeBuilder, SplitRouteBuilder,
};

const WETH: Address = Address::new([0x0e; 20]);
const USDC: Address = Address::new([0xc0; 20]);
const DAI: Address = Address::new([0xda; 20]);
const RECEIVER: Address = Address::new([0x99; 20]);
const ROUTER_A: Address = Address::new([0x71; 20]);
const ROUTER_B: Address = Address::new([0x72; 20]);

fn builder() -> SplitRouteBuilder {
    SplitRouteBuilder::new(BuilderConfig::new(WETH, RECEIVER))
}

fn leg(src: Address, dest: Address, percent: f64) -> Leg {
    Leg {
        src_token: src,
        dest_token: dest,
        src_amount: U256::from(1_000_000u64),
        dest_amount: U256::from(990_000u64),
        percent,
    }
}

fn template(target: Address, has_recipient: bool, wrap: bool) -> LegCallTemplate {
    LegCallTemplate {
        target,
        call_data: Bytes::from(vec![0xaa, 0xbb, 0xcc, 0xdd]),
        has_recipient_param: has_recipient,
        needs_wrap_native: wrap,
        special_mode: SpecialInvocationMode::Default,
    }
}

fn wrap_templates() -> Option<WrapUnwrapTemplates> {
    Some(WrapUnwrapTemplates {
        deposit: Some(Bytes::from(deposit_calldata())),
        withdraw: Some(Bytes::from(withdraw_calldata(U256::ZERO))),
    })
}

#[test]
fn native_input_single_leg_sends_value_and_checks_output() {
    let request = RouteRequest {
        route: Route {
            legs: vec![leg(NATIVE_TOKEN, USDC, 100.0)],
        },
        templates: vec![template(ROUTER_A, true, false)],
        wrap: None,
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");
    assert_eq!(legs.len(), 1);

    let header = &legs[0];
    assert!(!header.withdraw_dust);
    assert_eq!(header.percent_bps, 10_000);
    // Header (33) + template selector (4) + left padding (12).
    assert_eq!(header.src_token_pos, 33 + 4 + 12);
    assert_eq!(header.dest_token_pos, 33 + 4 + 32 + 12);

    let instructions = header.instructions().expect("instructions");
    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].target, ROUTER_A);
    assert_eq!(instructions[0].flag, Flag::SEND_NATIVE_CHECK_DEST_BALANCE);
    assert_eq!(instructions[0].patch.src_amount, 0);
}

#[test]
fn token_to_native_leg_unwraps_and_forwards() {
    let request = RouteRequest {
        route: Route {
            legs: vec![leg(DAI, NATIVE_TOKEN, 100.0)],
        },
        templates: vec![template(ROUTER_A, false, false)],
        wrap: wrap_templates(),
        sender: Some(Address::new([0x55; 20])),
    };
    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");
    let ixs = legs[0].instructions().expect("instructions");

    let targets: Vec<Address> = ixs.iter().map(|ix| ix.target).collect();
    assert_eq!(targets, vec![DAI, ROUTER_A, WETH, Address::ZERO]);
    assert_eq!(ixs[0].call_data, approve_calldata(ROUTER_A));
    assert_eq!(ixs[1].flag, Flag::CHECK_DEST_BALANCE);
    assert_eq!(ixs[2].flag, Flag::NONE);
    assert_eq!(ixs[3].mode, SpecialInvocationMode::ForwardNative);
    assert!(ixs[3].call_data.is_empty());
    // DAI first shows up as the approval target; the native sentinel only in the dex call.
    assert_eq!(legs[0].src_token_pos, 0);
    assert_eq!(
        legs[0].dest_token_pos as usize,
        ixs[0].encoded_len() + 33 + 4 + 32 + 12
    );
}

#[test]
fn token_source_position_counts_the_approval_prefix() {
    let request = RouteRequest {
        route: Route {
            legs: vec![leg(DAI, USDC, 100.0)],
        },
        templates: vec![template(ROUTER_A, true, false)],
        wrap: None,
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");

    // approve(ROUTER_A, max) frame is 33 + 68 bytes.
    assert_eq!(legs[0].src_token_pos, 0);
    assert_eq!(legs[0].dest_token_pos, 101 + 33 + 4 + 32 + 12);
}

#[test]
fn split_route_runs_wrap_leg_last() {
    let request = RouteRequest {
        route: Route {
            legs: vec![
                leg(NATIVE_TOKEN, USDC, 40.0),
                leg(NATIVE_TOKEN, USDC, 60.0),
            ],
        },
        templates: vec![template(ROUTER_B, true, true), template(ROUTER_A, true, false)],
        wrap: wrap_templates(),
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");
    assert_eq!(legs.len(), 2);

    // The 60% leg moved ahead of the wrap leg.
    assert_eq!(legs[0].percent_bps, 6_000);
    assert_eq!(legs[1].percent_bps, 4_000);
    assert!(legs.iter().all(|l| l.withdraw_dust));

    let first = legs[0].instructions().expect("first leg");
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].target, ROUTER_A);
    assert_eq!(first[0].flag, Flag::NONE);

    let last = legs[1].instructions().expect("last leg");
    let targets: Vec<Address> = last.iter().map(|ix| ix.target).collect();
    assert_eq!(targets, vec![WETH, WETH, WETH, ROUTER_B]);
    assert_eq!(last[0].call_data, approve_calldata(ROUTER_B));
    assert_eq!(last[1].call_data, deposit_calldata());
    assert_eq!(last[1].flag, Flag::SEND_NATIVE);
    // Native source on a later leg still approves wrapped native after the deposit.
    assert_eq!(last[2].call_data, approve_calldata(ROUTER_B));
}

#[test]
fn wrap_leg_to_native_output_unwraps_and_forwards_last() {
    let request = RouteRequest {
        route: Route {
            legs: vec![
                leg(USDC, NATIVE_TOKEN, 45.0),
                leg(USDC, NATIVE_TOKEN, 55.0),
            ],
        },
        templates: vec![template(ROUTER_B, true, true), template(ROUTER_A, true, false)],
        wrap: wrap_templates(),
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");
    assert_eq!(legs.len(), 2);

    // Plain leg first, with its approval and dex call only.
    assert_eq!(legs[0].percent_bps, 5_500);
    let first = legs[0].instructions().expect("first leg");
    let targets: Vec<Address> = first.iter().map(|ix| ix.target).collect();
    assert_eq!(targets, vec![USDC, ROUTER_A]);

    // Wrap leg last: wrap prefix, source approval, dex call, unwrap, forward.
    assert_eq!(legs[1].percent_bps, 4_500);
    assert!(!legs[1].withdraw_dust);
    let last = legs[1].instructions().expect("wrap leg");
    let targets: Vec<Address> = last.iter().map(|ix| ix.target).collect();
    assert_eq!(targets, vec![WETH, WETH, USDC, ROUTER_B, WETH, Address::ZERO]);
    assert_eq!(last[0].call_data, approve_calldata(ROUTER_B));
    assert_eq!(last[1].call_data, deposit_calldata());
    assert_eq!(last[1].flag, Flag::SEND_NATIVE);

    let unwrap = &last[4];
    assert_eq!(unwrap.call_data, withdraw_calldata(U256::ZERO));
    assert_eq!(unwrap.flag, Flag::NONE);
    let forward = &last[5];
    assert_eq!(forward.mode, SpecialInvocationMode::ForwardNative);
    assert_eq!(u8::from(forward.mode), 2);
    assert!(forward.call_data.is_empty());

    assert_eq!(
        legs[1].src_token_pos as usize,
        last[0].encoded_len() + last[1].encoded_len()
    );
}

#[test]
fn wrap_leg_lands_last_wherever_it_starts() {
    for wrap_at in 0..3 {
        let templates: Vec<LegCallTemplate> = (0..3)
            .map(|i| template(Address::new([0x70 + i as u8; 20]), true, i == wrap_at))
            .collect();
        let request = RouteRequest {
            route: Route {
                legs: vec![
                    leg(NATIVE_TOKEN, USDC, 20.0),
                    leg(NATIVE_TOKEN, USDC, 30.0),
                    leg(NATIVE_TOKEN, USDC, 50.0),
                ],
            },
            templates,
            wrap: wrap_templates(),
            sender: None,
        };
        let payload = builder().build(&request).expect("compile");
        let legs = parse_payload(&payload).expect("decode");
        let last = legs[2].instructions().expect("last leg");
        assert_eq!(last[1].flag, Flag::SEND_NATIVE, "wrap leg {wrap_at}");
        assert_eq!(
            last.last().map(|ix| ix.target),
            Some(Address::new([0x70 + wrap_at as u8; 20]))
        );
    }
}

#[test]
fn leftover_sweep_closes_route_when_a_leg_lacks_recipient() {
    let request = RouteRequest {
        route: Route {
            legs: vec![leg(DAI, USDC, 50.0), leg(DAI, USDC, 50.0)],
        },
        templates: vec![template(ROUTER_A, false, false), template(ROUTER_B, true, false)],
        wrap: None,
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");

    assert_eq!(legs[0].instructions().expect("first").len(), 2);
    let last = legs[1].instructions().expect("last");
    let sweep = last.last().expect("sweep");
    assert_eq!(sweep.target, USDC);
    assert_eq!(sweep.flag, Flag::INJECT_AMOUNT);
    assert_eq!(sweep.patch.src_amount, 36);
}

#[test]
fn outer_frame_reports_offset_and_caller_length() {
    let request = RouteRequest {
        route: Route {
            legs: vec![leg(DAI, USDC, 100.0)],
        },
        templates: vec![template(ROUTER_A, true, false)],
        wrap: None,
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let body_len = payload.len() - 64;
    assert_eq!(U256::from_be_slice(&payload[..32]), U256::from(32u64));
    assert_eq!(
        U256::from_be_slice(&payload[32..64]),
        U256::from(body_len + 96)
    );
}

#[test]
fn fractional_share_rounds_up() {
    let request = RouteRequest {
        route: Route {
            legs: vec![
                leg(DAI, USDC, 33.333),
                leg(DAI, USDC, 33.333),
                leg(DAI, USDC, 33.334),
            ],
        },
        templates: vec![
            template(ROUTER_A, true, false),
            template(ROUTER_A, true, false),
            template(ROUTER_B, true, false),
        ],
        wrap: None,
        sender: None,
    };
    let payload = builder().build(&request).expect("compile");
    let bps: Vec<u64> = parse_payload(&payload)
        .expect("decode")
        .iter()
        .map(|l| l.percent_bps)
        .collect();
    assert_eq!(bps, vec![3_334, 3_334, 3_334]);
}

#[test]
fn invalid_requests_are_rejected() {
    let mut request = RouteRequest {
        route: Route {
            legs: vec![leg(DAI, USDC, 100.0)],
        },
        templates: vec![],
        wrap: None,
        sender: None,
    };
    assert!(matches!(
        builder().build(&request),
        Err(AppError::LegTemplateMismatch {
            legs: 1,
            templates: 0
        })
    ));

    request.route.legs.clear();
    assert!(matches!(builder().build(&request), Err(AppError::EmptyRoute)));

    request.route.legs = vec![leg(NATIVE_TOKEN, USDC, 100.0)];
    request.templates = vec![template(ROUTER_A, true, true)];
    assert!(matches!(
        builder().build(&request),
        Err(AppError::MissingWrapTemplate { leg: 0 })
    ));

    request.templates = vec![template(ROUTER_A, true, false)];
    request.route.legs[0].percent = 90.0;
    assert!(matches!(
        builder().build(&request),
        Err(AppError::Validation { .. })
    ));
}

#[test]
fn json_request_compiles() {
    let body = format!(
        r#"{{
  "route": {{
    "legs": [
      {{
        "srcToken": "{NATIVE_TOKEN:#x}",
        "destToken": "{USDC:#x}",
        "srcAmount": "0xde0b6b3a7640000",
        "destAmount": "0x3b9aca00",
        "percent": 100
      }}
    ]
  }},
  "templates": [
    {{ "target": "{ROUTER_A:#x}", "callData": "0x12345678" }}
  ]
}}"#
    );
    let request: RouteRequest = serde_json::from_str(&body).expect("decode request");
    assert!(request.templates[0].has_recipient_param);
    assert!(!request.templates[0].needs_wrap_native);

    let payload = builder().build(&request).expect("compile");
    let legs = parse_payload(&payload).expect("decode");
    assert_eq!(legs[0].percent_bps, 10_000);
}
