use std::sync::Arc;

use relaykit_graphql::{models::MemoryDatabase, schema::build_dynamic_schema};
use relaykit_lib::{
    config::{Parser, RelayArgs, RelayConfig},
    utils::init_logging,
};
use tracing::info;

/// Print the SDL of the schema built from the given configuration.
fn main() -> anyhow::Result<()> {
    let args = RelayArgs::parse();

    let config = match args.config.clone() {
        Some(path) => RelayConfig::from_file(path)?,
        None => RelayConfig::from(args),
    };

    init_logging(&config)?;

    info!("Configuration: {:?}", config);

    let schema =
        build_dynamic_schema(&config.graphql, Arc::new(MemoryDatabase::default()))?;

    println!("{}", schema.sdl());

    Ok(())
}
