//! Wire types for the lineups REST API.
//!
//! The server names document identifiers `_id`; `id` is accepted as an alias
//! so fixtures and alternative backends deserialize the same way.

use serde::{Deserialize, Serialize};

/// A map as returned by `GET /maps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// A map with its callouts, as returned by `GET /maps/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDetail {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub callouts: Vec<Callout>,
}

/// A named map location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Callout {
    pub callout_id: String,
    pub name: LocalizedName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub en: String,
}

/// Grenade categories offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrenadeType {
    Smoke,
    Flash,
    Molotov,
    #[serde(rename = "HE Grenade")]
    HeGrenade,
}

impl GrenadeType {
    pub const ALL: [GrenadeType; 4] = [
        GrenadeType::Smoke,
        GrenadeType::Flash,
        GrenadeType::Molotov,
        GrenadeType::HeGrenade,
    ];

    /// The value the API stores and filters on.
    pub fn as_str(self) -> &'static str {
        match self {
            GrenadeType::Smoke => "Smoke",
            GrenadeType::Flash => "Flash",
            GrenadeType::Molotov => "Molotov",
            GrenadeType::HeGrenade => "HE Grenade",
        }
    }
}

impl std::fmt::Display for GrenadeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GrenadeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "smoke" => Ok(GrenadeType::Smoke),
            "flash" => Ok(GrenadeType::Flash),
            "molotov" | "molly" => Ok(GrenadeType::Molotov),
            "he grenade" | "he" => Ok(GrenadeType::HeGrenade),
            _ => anyhow::bail!(
                "Invalid grenade type '{}'. Valid values: {}",
                s,
                GrenadeType::ALL.map(GrenadeType::as_str).join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

/// A media reference attached to a lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalloutRef {
    pub callout_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A callout reference with the on-map position the throw is taken from or lands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCallout {
    pub position: Position,
    pub callout_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowDetails {
    pub stance: String,
    #[serde(rename = "type")]
    pub throw_type: String,
    pub strength: String,
}

impl Default for ThrowDetails {
    fn default() -> Self {
        Self {
            stance: "standing".to_string(),
            throw_type: "normal".to_string(),
            strength: "normal".to_string(),
        }
    }
}

/// A lineup as listed by `GET /lineups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub grenade_type: String,
    pub origin: CalloutRef,
    pub destination: CalloutRef,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// The `mapId` field of a lineup detail: populated by the server, or a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapRef {
    Populated(MapSummary),
    Id(String),
}

impl MapRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            MapRef::Populated(map) => Some(&map.name),
            MapRef::Id(_) => None,
        }
    }
}

/// Full lineup as returned by `GET /lineups/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupDetail {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "mapId")]
    pub map: MapRef,
    pub grenade_type: String,
    pub origin: CalloutRef,
    pub destination: CalloutRef,
    pub throw_details: ThrowDetails,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// Body of `POST /lineups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineup {
    pub title: String,
    pub map_id: String,
    pub grenade_type: GrenadeType,
    pub origin: PlacedCallout,
    pub destination: PlacedCallout,
    pub throw_details: ThrowDetails,
    pub media: Vec<Media>,
}

/// The part of a created lineup the client needs back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedLineup {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grenade_type_from_str() {
        assert_eq!("smoke".parse::<GrenadeType>().unwrap(), GrenadeType::Smoke);
        assert_eq!("FLASH".parse::<GrenadeType>().unwrap(), GrenadeType::Flash);
        assert_eq!("HE Grenade".parse::<GrenadeType>().unwrap(), GrenadeType::HeGrenade);
        assert_eq!("he-grenade".parse::<GrenadeType>().unwrap(), GrenadeType::HeGrenade);
        assert!("decoy".parse::<GrenadeType>().is_err());
    }

    #[test]
    fn test_grenade_type_error_lists_every_value() {
        let err = "decoy".parse::<GrenadeType>().unwrap_err().to_string();
        assert!(err.ends_with("Valid values: Smoke, Flash, Molotov, HE Grenade"));
        for grenade in GrenadeType::ALL {
            assert_eq!(grenade.as_str().parse::<GrenadeType>().unwrap(), grenade);
        }
    }

    #[test]
    fn test_grenade_type_serializes_to_api_value() {
        assert_eq!(
            serde_json::to_value(GrenadeType::HeGrenade).unwrap(),
            json!("HE Grenade")
        );
        assert_eq!(GrenadeType::Molotov.to_string(), "Molotov");
    }

    #[test]
    fn test_map_detail_deserializes_server_shape() {
        let map: MapDetail = serde_json::from_value(json!({
            "_id": "m1",
            "name": "Mirage",
            "callouts": [
                {"calloutId": "mirage_a_site", "name": {"en": "A Site"}},
                {"calloutId": "mirage_window", "name": {"en": "Window"}}
            ]
        }))
        .unwrap();
        assert_eq!(map.id, "m1");
        assert_eq!(map.callouts.len(), 2);
        assert_eq!(map.callouts[1].name.en, "Window");
    }

    #[test]
    fn test_id_alias_is_accepted() {
        let map: MapSummary = serde_json::from_value(json!({"id": "m2", "name": "Inferno"})).unwrap();
        assert_eq!(map.id, "m2");
    }

    #[test]
    fn test_lineup_detail_with_populated_map() {
        let detail: LineupDetail = serde_json::from_value(json!({
            "_id": "l1",
            "title": "Window smoke",
            "mapId": {"_id": "m1", "name": "Mirage"},
            "grenadeType": "Smoke",
            "origin": {"calloutId": "mirage_t_spawn"},
            "destination": {"calloutId": "mirage_window"},
            "throwDetails": {"stance": "standing", "type": "jump", "strength": "normal"},
            "media": [{"type": "video", "url": "https://youtube.com/watch?v=abc"}]
        }))
        .unwrap();
        assert_eq!(detail.map.name(), Some("Mirage"));
        assert_eq!(detail.throw_details.throw_type, "jump");
        assert_eq!(detail.media[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_lineup_detail_with_bare_map_id() {
        let detail: LineupDetail = serde_json::from_value(json!({
            "_id": "l1",
            "title": "Window smoke",
            "mapId": "m1",
            "grenadeType": "Smoke",
            "origin": {"calloutId": "a"},
            "destination": {"calloutId": "b"},
            "throwDetails": {"stance": "crouch", "type": "normal", "strength": "normal"}
        }))
        .unwrap();
        assert_eq!(detail.map, MapRef::Id("m1".to_string()));
        assert_eq!(detail.map.name(), None);
        assert!(detail.media.is_empty());
    }

    #[test]
    fn test_new_lineup_wire_shape() {
        let body = NewLineup {
            title: "Window smoke".into(),
            map_id: "m1".into(),
            grenade_type: GrenadeType::Smoke,
            origin: PlacedCallout {
                position: Position::default(),
                callout_id: "mirage_t_spawn".into(),
            },
            destination: PlacedCallout {
                position: Position::default(),
                callout_id: "mirage_window".into(),
            },
            throw_details: ThrowDetails::default(),
            media: vec![],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["mapId"], "m1");
        assert_eq!(value["grenadeType"], "Smoke");
        assert_eq!(value["origin"]["calloutId"], "mirage_t_spawn");
        assert_eq!(value["origin"]["position"]["x"], 0.0);
        assert_eq!(value["throwDetails"]["type"], "normal");
    }
}
