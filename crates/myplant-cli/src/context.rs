//! Client construction from command-line arguments.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use myplant::{BaseUrl, ClientConfig, CredentialStore, FileBackend, MyPlantClient, StoreConfig};

use crate::cli::ConnectionArgs;

/// Build a client whose credential store honours the connection flags.
pub fn client(args: &ConnectionArgs) -> Result<MyPlantClient> {
    let base_url = BaseUrl::new(&args.base_url).context("Invalid base URL")?;

    let store_config = StoreConfig {
        file_path: args
            .credential_file
            .clone()
            .or_else(FileBackend::default_path),
        keyring: !args.no_keyring,
        ..StoreConfig::default()
    };
    debug!(?store_config, "Opening credential store");
    let store = CredentialStore::detect(&store_config);

    let mut config = ClientConfig::new(base_url);
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    MyPlantClient::from_config(config, store).context("Failed to create client")
}
