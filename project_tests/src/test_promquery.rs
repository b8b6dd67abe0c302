//! # `lib_promquery` Live Runner
//!
//! Runs instant queries against a real Prometheus-compatible backend and
//! checks the normalized output. Defaults to `http://127.0.0.1:9090` and the
//! `up` query, which every Prometheus server answers with a vector.
//!
//! Settings come from `--flags`, then `PROMQUERY_*` environment variables
//! (a `.env` file is loaded first), then the optional `--config` JSON file.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use lib_promquery::configs::load_config;
use lib_promquery::loggers::{LogOptions, init_tracing};
use lib_promquery::{PromError, PromJob, QueryMethod};

/// Command-line arguments for the live runner.
#[derive(Parser, Debug)]
#[command(version, about = "Runs instant queries against a live backend and prints the normalized result.")]
struct Args {
    /// Backend base URL; overrides the config file and `PROMQUERY_ENDPOINT`.
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Query expression.
    #[arg(short, long, default_value = "up")]
    query: String,

    /// Optional JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _guard = init_tracing(&LogOptions {
        level: args.log_level.clone(),
        ..LogOptions::default()
    })?;

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = Some(endpoint);
    }
    if config.endpoint.is_none() {
        config.endpoint = Some("http://127.0.0.1:9090".to_string());
    }
    let executor = config.executor()?;
    let endpoint = config.endpoint.clone().unwrap_or_default();

    println!("--- Starting lib_promquery Live Tests against {} ---", endpoint);

    // --- TEST 1: Validation ---
    // A disallowed method must fail before any request is made.
    println!("\n[Test 1] Rejecting a disallowed method...");
    match PromJob::new(&endpoint, &args.query, "PUT") {
        Err(PromError::MethodNotAllowed(m)) => println!("✅ Rejected method: {}", m),
        other => bail!("expected MethodNotAllowed, got {:?}", other),
    }

    // --- TEST 2 & 3: GET and POST ---
    // Both transports must return the same normalized records.
    let mut results = Vec::new();
    for (n, method) in [(2, QueryMethod::Get), (3, QueryMethod::Post)] {
        println!("\n[Test {}] Querying '{}' via {}...", n, args.query, method);
        let job = PromJob::with_method(&endpoint, &args.query, method)?;
        let records = executor.execute(job)?;
        if records.is_empty() {
            bail!("expected at least one record via {}, got none", method);
        }
        for record in &records {
            println!(
                "   {} job={} instance={} data={}",
                record.metric.name,
                record.metric.job,
                record.metric.instance,
                serde_json::to_string(&record.data)?
            );
        }
        println!("✅ {} returned {} record(s)", method, records.len());
        results.push(records.len());
    }
    if results[0] != results[1] {
        println!("⚠️ GET and POST returned different record counts: {:?}", results);
    }

    // --- TEST 4: Upstream error ---
    // A syntactically broken query must come back as "<errorType>: <error>".
    println!("\n[Test 4] Sending a malformed query...");
    let job = config.job("sum(")?;
    match executor.execute(job) {
        Err(e) if e.is_upstream() => println!("✅ Upstream error surfaced: {}", e),
        other => bail!("expected an upstream error, got {:?}", other),
    }

    tracing::info!("live run finished");
    println!("\n--- All Live Tests Passed Successfully ---");
    Ok(())
}
