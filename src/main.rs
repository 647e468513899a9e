// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use clap::{Parser, Subcommand};
use oxidity_route_compiler::app::config::BuilderSettings;
use oxidity_route_compiler::app::logging::setup_logging;
use oxidity_route_compiler::common::parsing::read_hex_arg;
use oxidity_route_compiler::domain::error::AppError;
use oxidity_route_compiler::domain::route::RouteRequest;
use oxidity_route_compiler::services::bytecode::framing::{FramedLegView, parse_payload};
use oxidity_route_compiler::services::bytecode::{ExecutorBytecodeBuilder, SplitRouteBuilder};

#[derive(Parser, Debug)]
#[command(author, version, about = "oxidity route compiler")]
struct Cli {
    /// Path to config file (default: config.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log filter (overrides config/env), e.g. "debug" or "warn,bytecode=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a JSON route request into the executor payload
    Compile {
        /// Path to the route request JSON
        #[arg(long)]
        request: String,

        /// Print the decoded leg headers instead of raw hex
        #[arg(long, default_value_t = false)]
        inspect: bool,
    },
    /// Decode an existing payload (hex string or file)
    Inspect {
        #[arg(long)]
        payload: String,
    },
}

fn print_legs(legs: &[FramedLegView]) -> Result<(), AppError> {
    for (idx, leg) in legs.iter().enumerate() {
        println!(
            "leg {idx}: {} bytes, percent_bps={}, src_pos={}, dest_pos={}, withdraw_dust={}",
            leg.call_data.len(),
            leg.percent_bps,
            leg.src_token_pos,
            leg.dest_token_pos,
            leg.withdraw_dust
        );
        for ix in leg.instructions()? {
            println!(
                "  {:#x} flag={} mode={} len={} patch=({}, {}, {})",
                ix.target,
                ix.flag,
                u8::from(ix.mode),
                ix.call_data.len(),
                ix.patch.src_amount,
                ix.patch.dest_amount,
                ix.patch.balance_check
            );
        }
    }
    Ok(())
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = BuilderSettings::load_with_path(cli.config.as_deref())?;
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.log_level.clone());
    setup_logging(&log_level, settings.log_json)?;

    match cli.command {
        Command::Compile { request, inspect } => {
            let body = std::fs::read_to_string(&request)?;
            let request: RouteRequest = serde_json::from_str(&body)?;
            let builder = SplitRouteBuilder::new(settings.builder_config()?);
            tracing::info!(
                target: "config",
                chain_id = settings.chain_id,
                builder = builder.name(),
                wrapped_native = %format!("{:#x}", builder.config().wrapped_native),
                "Compiling route request"
            );

            let payload = builder.build(&request)?;
            if inspect {
                print_legs(&parse_payload(&payload)?)?;
            } else {
                println!("0x{}", hex::encode(&payload));
            }
        }
        Command::Inspect { payload } => {
            let bytes = read_hex_arg(&payload)?;
            print_legs(&parse_payload(&bytes)?)?;
        }
    }
    Ok(())
}
