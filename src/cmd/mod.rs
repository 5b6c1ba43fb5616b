//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module    | Commands handled |
//! |-----------|------------------|
//! | `maps`    | `Maps`           |
//! | `search`  | `Search`         |
//! | `show`    | `Show`           |
//! | `create`  | `Create`         |
//! | `config`  | `Config`         |

pub mod config;
pub mod create;
pub mod maps;
pub mod search;
pub mod show;

pub use config::cmd_config;
pub use create::{CreateInput, cmd_create};
pub use maps::cmd_maps;
pub use search::{SearchFilters, cmd_search};
pub use show::cmd_show;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use lineups::api::{ApiClient, ResourceClient};
use lineups::binding::{Endpoint, FetchBinding, FetchResult};
use lineups::config::Settings;
use lineups::ui::wait_with_spinner;

use crate::OutputFormat;

/// Build the HTTP client from the effective settings.
fn connect(settings: &Settings) -> Result<Arc<dyn ResourceClient>> {
    let client = ApiClient::new(&settings.client_config())
        .context("Failed to set up the API client")?;
    Ok(Arc::new(client))
}

/// Fetch `endpoint` through a binding and return the payload, or fail with
/// `failure` as the user-facing message.
async fn load<T>(
    client: Arc<dyn ResourceClient>,
    endpoint: String,
    message: &str,
    failure: &'static str,
    format: OutputFormat,
) -> Result<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let mut binding = FetchBinding::<T>::new(client);
    binding.set_endpoint(Endpoint::Resource(endpoint));
    let snapshot = wait_with_spinner(&binding, message, format == OutputFormat::Text).await;
    match snapshot.result {
        FetchResult::Loaded(data) => Ok(data),
        FetchResult::Failed(err) => Err(anyhow::Error::new(err).context(failure)),
        FetchResult::NotLoaded => anyhow::bail!(failure),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}
