//! Lineup search - `lineups search`.

use anyhow::Result;
use console::style;
use tracing::{debug, warn};

use lineups::api::{GrenadeType, LineupSummary, MapDetail, endpoints};
use lineups::binding::{Endpoint, FetchBinding};
use lineups::config::Settings;
use lineups::query::FilterSelection;
use lineups::ui::icons::WARN;
use lineups::ui::wait_with_spinner;
use lineups::views::{self, ListingView, SEARCH_FAILED};

use super::{connect, print_json};
use crate::OutputFormat;

/// Filters as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub map: Option<String>,
    pub grenade: Option<GrenadeType>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl SearchFilters {
    /// Apply the filters in the order a user would pick them, returning the
    /// selection plus a warning for every callout given without a map.
    fn to_selection(&self) -> (FilterSelection, Vec<String>) {
        let mut selection = FilterSelection::new();
        let mut warnings = Vec::new();

        if let Some(map) = &self.map {
            selection.set_map(map.trim());
        }
        if let Some(grenade) = self.grenade {
            selection.set_grenade(grenade.as_str());
        }
        if let Some(origin) = &self.origin
            && !selection.set_origin(origin.trim())
        {
            warnings.push(format!("--origin '{}' ignored: select a map first", origin));
        }
        if let Some(destination) = &self.destination
            && !selection.set_destination(destination.trim())
        {
            warnings.push(format!(
                "--destination '{}' ignored: select a map first",
                destination
            ));
        }

        (selection, warnings)
    }
}

/// Callout ids in the selection that the map does not define.
fn unknown_callouts<'a>(selection: &'a FilterSelection, map: &MapDetail) -> Vec<&'a str> {
    [selection.origin(), selection.destination()]
        .into_iter()
        .filter(|id| !id.is_empty())
        .filter(|id| !map.callouts.iter().any(|c| c.callout_id == *id))
        .collect()
}

pub async fn cmd_search(
    settings: &Settings,
    format: OutputFormat,
    filters: SearchFilters,
) -> Result<()> {
    let client = connect(settings)?;
    let (selection, warnings) = filters.to_selection();
    for warning in &warnings {
        warn!("{}", warning);
        eprintln!("{}{}", WARN, style(warning).yellow());
    }

    // The map's callouts are only needed when a map is selected.
    let mut map_detail = FetchBinding::<MapDetail>::new(client.clone());
    map_detail.set_endpoint(Endpoint::from_option(
        selection
            .callouts_enabled()
            .then(|| endpoints::map(selection.map())),
    ));

    let endpoint = selection.query().to_endpoint();
    debug!(%endpoint, "Searching");
    let mut lineups = FetchBinding::<Vec<LineupSummary>>::new(client);
    lineups.set_endpoint(Endpoint::Resource(endpoint));

    let show_spinner = format == OutputFormat::Text;
    let snapshot = wait_with_spinner(&lineups, "Searching for lineups...", show_spinner).await;
    let map_snapshot = map_detail.settled().await;
    if let Some(map) = map_snapshot.data() {
        for id in unknown_callouts(&selection, map) {
            eprintln!(
                "{}{}",
                WARN,
                style(format!("'{}' is not a callout on {}", id, map.name)).yellow()
            );
        }
    }

    let view = ListingView::from_snapshot(&snapshot);
    match (format, &view) {
        (_, ListingView::Failed) => {
            let err = snapshot.error().cloned();
            return Err(match err {
                Some(err) => anyhow::Error::new(err).context(SEARCH_FAILED),
                None => anyhow::anyhow!(SEARCH_FAILED),
            });
        }
        (OutputFormat::Json, _) => print_json(&snapshot.data().cloned().unwrap_or_default())?,
        (OutputFormat::Text, _) => println!("{}", views::render_listing(&view)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineups::api::{Callout, types::LocalizedName};

    #[test]
    fn test_filters_to_selection() {
        let filters = SearchFilters {
            map: Some("m1".into()),
            grenade: Some(GrenadeType::HeGrenade),
            origin: Some("mirage_t_spawn".into()),
            destination: None,
        };
        let (selection, warnings) = filters.to_selection();
        assert!(warnings.is_empty());
        assert_eq!(
            selection.query().to_endpoint(),
            "/lineups?mapId=m1&grenadeType=HE+Grenade&origin=mirage_t_spawn"
        );
    }

    #[test]
    fn test_callouts_without_map_are_warned_and_dropped() {
        let filters = SearchFilters {
            origin: Some("a".into()),
            destination: Some("b".into()),
            ..Default::default()
        };
        let (selection, warnings) = filters.to_selection();
        assert_eq!(warnings.len(), 2);
        assert_eq!(selection.query().to_endpoint(), "/lineups");
    }

    #[test]
    fn test_unknown_callouts() {
        let filters = SearchFilters {
            map: Some("m1".into()),
            origin: Some("known".into()),
            destination: Some("stray".into()),
            ..Default::default()
        };
        let (selection, _) = filters.to_selection();
        let map = MapDetail {
            id: "m1".into(),
            name: "Mirage".into(),
            callouts: vec![Callout {
                callout_id: "known".into(),
                name: LocalizedName { en: "Known".into() },
            }],
        };
        assert_eq!(unknown_callouts(&selection, &map), vec!["stray"]);
    }
}
