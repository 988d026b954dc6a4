//! Builds a request, configures credentials and hands it to a stand-in signer.
//!
//! # Running this example
//!
//! ```bash
//! RUST_LOG=paapi_request=debug cargo run --example configure_request -- JP
//! ```

#![allow(
    clippy::print_stdout,
    reason = "examples are allowed to use println"
)]

use std::{convert::Infallible, env};

use paapi_request::{
    RequestConfig,
    signable::{SignAndSend, SigningContext, dispatch},
};

/// Prints the request it would sign instead of signing it.
#[derive(Debug)]
struct DryRunSigner;

impl SignAndSend for DryRunSigner {
    type Error = Infallible;
    type Response = String;

    fn sign_and_send(&self, ctx: SigningContext<'_>) -> Result<String, Infallible> {
        let query = ctx
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        Ok(format!("GET {}?{query} (key {})", ctx.endpoint, ctx.key))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let locale = env::args().nth(1);
    let mut request = RequestConfig::new(locale.as_deref())?;
    println!("Endpoint: {}", request.endpoint());

    request.configure([("key", "AKIDEXAMPLE"), ("secret", "example-secret"), ("tag", "example-20")])?;
    request.set_param("Operation", "ItemLookup");
    request.set_param("ItemId", "0679753354");

    println!("{}", dispatch(&request, &DryRunSigner)?);
    Ok(())
}
