//! Filter selections for the lineup listing and the query they derive.
//!
//! [`FilterSelection`] holds the four optional filters. Origin and
//! destination name callouts of the selected map, so changing the map resets
//! both in the same update, and they cannot be set while no map is selected.
//!
//! [`FilterSelection::query`] is a pure derivation: the same selection always
//! yields an equal [`QueryDescriptor`], and equal descriptors render the same
//! endpoint string. Deduplicating requests is left to the fetch binding,
//! which compares endpoints by value.

use url::form_urlencoded;

use crate::api::endpoints;

/// Query keys in the order they appear in the endpoint.
pub const KEY_MAP: &str = "mapId";
pub const KEY_GRENADE: &str = "grenadeType";
pub const KEY_ORIGIN: &str = "origin";
pub const KEY_DESTINATION: &str = "destination";

/// Current filter values. An empty string means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    map: String,
    grenade: String,
    origin: String,
    destination: String,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn grenade(&self) -> &str {
        &self.grenade
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Select a map. A different value resets origin and destination.
    pub fn set_map(&mut self, map: impl Into<String>) {
        let map = map.into();
        if map != self.map {
            self.map = map;
            self.origin.clear();
            self.destination.clear();
        }
    }

    pub fn set_grenade(&mut self, grenade: impl Into<String>) {
        self.grenade = grenade.into();
    }

    /// Select an origin callout. Returns `false` (and changes nothing) when
    /// no map is selected.
    pub fn set_origin(&mut self, origin: impl Into<String>) -> bool {
        if self.map.is_empty() {
            return false;
        }
        self.origin = origin.into();
        true
    }

    /// Select a destination callout. Returns `false` (and changes nothing)
    /// when no map is selected.
    pub fn set_destination(&mut self, destination: impl Into<String>) -> bool {
        if self.map.is_empty() {
            return false;
        }
        self.destination = destination.into();
        true
    }

    /// Whether callout filters can be used.
    pub fn callouts_enabled(&self) -> bool {
        !self.map.is_empty()
    }

    /// Derive the query descriptor for the current selection.
    pub fn query(&self) -> QueryDescriptor {
        let pairs = [
            (KEY_MAP, &self.map),
            (KEY_GRENADE, &self.grenade),
            (KEY_ORIGIN, &self.origin),
            (KEY_DESTINATION, &self.destination),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, value.clone()))
        .collect();

        QueryDescriptor { pairs }
    }
}

/// Active filters as ordered request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    pairs: Vec<(&'static str, String)>,
}

impl QueryDescriptor {
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-urlencoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Endpoint for the lineup listing, e.g. `/lineups?mapId=m1&grenadeType=Smoke`.
    pub fn to_endpoint(&self) -> String {
        if self.pairs.is_empty() {
            endpoints::LINEUPS.to_string()
        } else {
            format!("{}?{}", endpoints::LINEUPS, self.query_string())
        }
    }
}
