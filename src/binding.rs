//! Data-fetch binding: fetch a resource whenever its endpoint changes.
//!
//! A [`FetchBinding`] owns the current [`Endpoint`] and publishes a
//! [`FetchSnapshot`] through a `tokio::sync::watch` channel. Changing the
//! endpoint (compared by value) either clears the payload (for
//! [`Endpoint::Skip`]) or spawns a request through a [`ResourceClient`].
//!
//! Every change bumps the snapshot's generation. A completed request is only
//! applied if its generation is still current, so a slow response for an
//! old endpoint can never overwrite the result for a newer one.
//!
//! ```no_run
//! use lineups::api::{ApiClient, ClientConfig, MapSummary};
//! use lineups::binding::{Endpoint, FetchBinding};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Arc::new(ApiClient::new(&ClientConfig::new("http://localhost:5000/api"))?);
//! let mut maps = FetchBinding::<Vec<MapSummary>>::new(client);
//! maps.set_endpoint(Endpoint::resource("/maps"));
//! let snapshot = maps.settled().await;
//! if let Some(maps) = snapshot.data() {
//!     println!("{} maps", maps.len());
//! }
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{self, ResourceClient};
use crate::errors::ApiError;

/// What a binding should fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Do not fetch; any loaded payload is cleared.
    Skip,
    /// Fetch the resource at this path.
    Resource(String),
}

impl Endpoint {
    pub fn resource(path: impl Into<String>) -> Self {
        Endpoint::Resource(path.into())
    }

    /// `Resource(path)` for `Some(path)`, `Skip` for `None`.
    pub fn from_option(path: Option<String>) -> Self {
        path.map_or(Endpoint::Skip, Endpoint::Resource)
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Endpoint::Skip => None,
            Endpoint::Resource(path) => Some(path),
        }
    }
}

/// Outcome of the most recent applied request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    NotLoaded,
    Loaded(T),
    Failed(ApiError),
}

/// Published state of a binding.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    pub result: FetchResult<T>,
    pub loading: bool,
    /// Incremented on every endpoint change.
    pub generation: u64,
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self {
            result: FetchResult::NotLoaded,
            loading: false,
            generation: 0,
        }
    }
}

impl<T> FetchSnapshot<T> {
    pub fn data(&self) -> Option<&T> {
        match &self.result {
            FetchResult::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.result {
            FetchResult::Failed(err) => Some(err),
            _ => None,
        }
    }
}

pub struct FetchBinding<T> {
    client: Arc<dyn ResourceClient>,
    endpoint: Option<Endpoint>,
    state: Arc<watch::Sender<FetchSnapshot<T>>>,
}

impl<T> FetchBinding<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create an undecided binding: no endpoint, nothing loaded, not loading.
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        let (state, _) = watch::channel(FetchSnapshot::default());
        Self {
            client,
            endpoint: None,
            state: Arc::new(state),
        }
    }

    /// The current endpoint, or `None` if none has been set yet.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    pub fn snapshot(&self) -> FetchSnapshot<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot<T>> {
        self.state.subscribe()
    }

    /// Point the binding at `endpoint`.
    ///
    /// An endpoint equal to the current one is ignored. Otherwise the state
    /// moves to the new generation immediately, and for a resource a request
    /// is spawned on the current tokio runtime; its handle is returned.
    pub fn set_endpoint(&mut self, endpoint: Endpoint) -> Option<JoinHandle<()>> {
        if self.endpoint.as_ref() == Some(&endpoint) {
            return None;
        }
        self.endpoint = Some(endpoint.clone());

        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            generation = snapshot.generation;
            match &endpoint {
                Endpoint::Skip => {
                    snapshot.result = FetchResult::NotLoaded;
                    snapshot.loading = false;
                }
                Endpoint::Resource(_) => {
                    if matches!(snapshot.result, FetchResult::Failed(_)) {
                        snapshot.result = FetchResult::NotLoaded;
                    }
                    snapshot.loading = true;
                }
            }
        });

        let Endpoint::Resource(path) = endpoint else {
            debug!(generation, "Endpoint cleared");
            return None;
        };

        debug!(%path, generation, "Fetching");
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let outcome = api::fetch::<T>(client.as_ref(), &path).await;

            let applied = state.send_if_modified(|snapshot| {
                if snapshot.generation != generation {
                    return false;
                }
                snapshot.loading = false;
                snapshot.result = match outcome {
                    Ok(data) => FetchResult::Loaded(data),
                    Err(err) => FetchResult::Failed(err),
                };
                true
            });

            if !applied {
                debug!(%path, generation, "Discarding stale response");
            }
        }))
    }

    /// Wait until no request is in flight and return that snapshot.
    pub async fn settled(&self) -> FetchSnapshot<T> {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }
}
