//! Shows how each configuration error surfaces and how to recover from it.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use paapi_request::{RequestConfig, RequestError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match RequestConfig::new(Some("us")) {
        Ok(_) => println!("unexpected: lowercase locale accepted"),
        Err(RequestError::InvalidLocale(code)) => {
            eprintln!("Invalid locale '{code}', locale codes are upper case");
        }
        Err(e) => eprintln!("Other error: {e}"),
    }

    let Ok(mut request) = RequestConfig::new(Some("US")) else {
        eprintln!("US locale must always resolve");
        return;
    };

    if let Err(RequestError::UnknownCredentialField(field)) =
        request.configure([("key", "AKIDEXAMPLE"), ("secert", "typo")])
    {
        eprintln!("Unknown credential field '{field}', nothing was assigned");
    }

    match request.tag() {
        Ok(tag) => println!("Tag: {tag}"),
        Err(RequestError::MissingTag) => {
            eprintln!("Associate tag missing, setting it and retrying");
            request.set_tag("example-20");
        }
        Err(e) => eprintln!("Other error: {e}"),
    }

    match request.params() {
        Ok(params) => println!("Parameters: {params:?}"),
        Err(e) => eprintln!("Still failing: {e}"),
    }
}
