//! Demo stack: a `demo` GraphQL API over a single table
//!
//! Usage: `cargo run --example demo_stack [path/to/stack.yaml]`
//!
//! Set `RUST_LOG=binder=debug` to see every registered resolver.

use binder::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("binder=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/demo_stack/stack.yaml"));

    let stack = StackConfig::load_stack(&path)?;

    for resolver in stack.resolvers() {
        tracing::info!(
            field = %resolver.key(),
            request = %resolver.request,
            response = %resolver.response,
            "Resolver"
        );
    }

    println!("{}", stack.synthesize()?.to_json_pretty()?);
    Ok(())
}
