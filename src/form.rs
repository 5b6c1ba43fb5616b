//! Creation form for new lineups.
//!
//! Holds the raw field values, enforces the same map/callout dependency as
//! the listing filters, validates required fields, and drives submission.

use tracing::{info, warn};

use crate::api::{
    self, CreatedLineup, GrenadeType, Media, MediaKind, NewLineup, PlacedCallout, Position,
    ResourceClient, ThrowDetails, endpoints,
};
use crate::errors::{SubmitError, ValidationError};

/// Caption attached to the screenshot of a new lineup.
pub const IMAGE_CAPTION: &str = "Aim here";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineupForm {
    pub title: String,
    map_id: String,
    pub grenade_type: Option<GrenadeType>,
    origin_callout_id: String,
    destination_callout_id: String,
    pub video_url: String,
    pub image_url: String,
    submitting: bool,
    error: Option<String>,
}

impl LineupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    pub fn origin_callout_id(&self) -> &str {
        &self.origin_callout_id
    }

    pub fn destination_callout_id(&self) -> &str {
        &self.destination_callout_id
    }

    /// Select a map; a different value clears both callout selections.
    pub fn set_map(&mut self, map_id: impl Into<String>) {
        let map_id = map_id.into();
        if map_id != self.map_id {
            self.map_id = map_id;
            self.origin_callout_id.clear();
            self.destination_callout_id.clear();
        }
    }

    /// Returns `false` when no map is selected yet.
    pub fn set_origin(&mut self, callout_id: impl Into<String>) -> bool {
        if self.map_id.is_empty() {
            return false;
        }
        self.origin_callout_id = callout_id.into();
        true
    }

    /// Returns `false` when no map is selected yet.
    pub fn set_destination(&mut self, callout_id: impl Into<String>) -> bool {
        if self.map_id.is_empty() {
            return false;
        }
        self.destination_callout_id = callout_id.into();
        true
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check required fields and build the request body.
    pub fn validate(&self) -> Result<NewLineup, ValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.map_id.is_empty() {
            missing.push("map");
        }
        if self.grenade_type.is_none() {
            missing.push("grenade");
        }
        if self.origin_callout_id.is_empty() {
            missing.push("origin");
        }
        if self.destination_callout_id.is_empty() {
            missing.push("destination");
        }

        let Some(grenade_type) = self.grenade_type else {
            return Err(ValidationError::MissingFields { fields: missing });
        };
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing });
        }

        let media = [
            (MediaKind::Video, &self.video_url, None),
            (MediaKind::Image, &self.image_url, Some(IMAGE_CAPTION)),
        ]
        .into_iter()
        .filter(|(_, url, _)| !url.trim().is_empty())
        .map(|(kind, url, caption)| Media {
            kind,
            url: url.trim().to_string(),
            caption: caption.map(str::to_string),
        })
        .collect();

        Ok(NewLineup {
            title: self.title.trim().to_string(),
            map_id: self.map_id.clone(),
            grenade_type,
            origin: PlacedCallout {
                position: Position::default(),
                callout_id: self.origin_callout_id.clone(),
            },
            destination: PlacedCallout {
                position: Position::default(),
                callout_id: self.destination_callout_id.clone(),
            },
            throw_details: ThrowDetails::default(),
            media,
        })
    }

    /// Validate and POST the lineup.
    ///
    /// Validation failures never reach the network. On any failure the
    /// message is kept in [`error`](Self::error) and the submitting flag is
    /// cleared; on success the flag stays set, as the caller moves on to the
    /// created lineup.
    pub async fn submit(
        &mut self,
        client: &dyn ResourceClient,
    ) -> Result<CreatedLineup, SubmitError> {
        self.submitting = true;
        self.error = None;

        let result = match self.validate() {
            Ok(body) => api::submit::<_, CreatedLineup>(client, endpoints::LINEUPS, &body)
                .await
                .map_err(SubmitError::from),
            Err(err) => Err(err.into()),
        };

        match &result {
            Ok(created) => info!(id = %created.id, "Lineup created"),
            Err(err) => {
                warn!(error = %err, "Lineup submission failed");
                self.error = Some(err.to_string());
                self.submitting = false;
            }
        }
        result
    }
}
