//! Remote data access for the lineups REST API.
//!
//! [`ApiClient`] speaks HTTP; everything above it talks to the
//! [`ResourceClient`] trait. The typed helpers here decode raw JSON into the
//! wire types in [`types`].

pub mod client;
pub mod types;

pub use client::{ApiClient, ClientConfig, ResourceClient};
pub use types::{
    Callout, CalloutRef, CreatedLineup, GrenadeType, LineupDetail, LineupSummary, MapDetail,
    MapRef, MapSummary, Media, MediaKind, NewLineup, PlacedCallout, Position, ThrowDetails,
};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ApiError;

/// Decode a JSON payload into `T`, reporting mismatches as `InvalidBody`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidBody {
        message: e.to_string(),
    })
}

/// Fetch `endpoint` and decode it as `T`.
pub async fn fetch<T: DeserializeOwned>(
    client: &dyn ResourceClient,
    endpoint: &str,
) -> Result<T, ApiError> {
    decode(client.fetch_resource(endpoint).await?)
}

/// Submit `body` to `endpoint` and decode the response as `T`.
pub async fn submit<B: Serialize, T: DeserializeOwned>(
    client: &dyn ResourceClient,
    endpoint: &str,
    body: &B,
) -> Result<T, ApiError> {
    let body = serde_json::to_value(body).map_err(|e| ApiError::InvalidBody {
        message: e.to_string(),
    })?;
    decode(client.submit_resource(endpoint, &body).await?)
}

/// Endpoint paths of the REST API.
pub mod endpoints {
    pub const MAPS: &str = "/maps";
    pub const LINEUPS: &str = "/lineups";

    pub fn map(id: &str) -> String {
        format!("{}/{}", MAPS, segment(id))
    }

    pub fn lineup(id: &str) -> String {
        format!("{}/{}", LINEUPS, segment(id))
    }

    /// Percent-encode an id so it stays a single path segment.
    fn segment(id: &str) -> String {
        // Literal `+` is already `%2B`, so every remaining `+` is a space.
        url::form_urlencoded::byte_serialize(id.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    }
}
