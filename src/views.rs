//! What the terminal shows for a fetch snapshot, and how it is rendered.
//!
//! The `from_snapshot` constructors are pure; `render_*` functions only
//! format strings so the command layer decides where output goes.

use console::style;

use crate::api::{LineupDetail, LineupSummary, MapDetail, MapSummary, MediaKind};
use crate::binding::{FetchResult, FetchSnapshot};
use crate::ui::icons::{ARROW, CROSS, PIN, SEARCH};

pub const NO_RESULTS: &str = "No lineups found for the selected filters.";
pub const LOAD_FAILED: &str = "Failed to load lineup.";
pub const SEARCH_FAILED: &str = "Failed to load lineups.";

/// Listing screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView<'a> {
    Loading,
    Failed,
    /// Nothing requested yet.
    Idle,
    Empty,
    Populated(&'a [LineupSummary]),
}

impl<'a> ListingView<'a> {
    pub fn from_snapshot(snapshot: &'a FetchSnapshot<Vec<LineupSummary>>) -> Self {
        if snapshot.loading {
            return ListingView::Loading;
        }
        match &snapshot.result {
            FetchResult::NotLoaded => ListingView::Idle,
            FetchResult::Failed(_) => ListingView::Failed,
            FetchResult::Loaded(lineups) if lineups.is_empty() => ListingView::Empty,
            FetchResult::Loaded(lineups) => ListingView::Populated(lineups),
        }
    }
}

/// Detail screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<'a> {
    Loading,
    Failed,
    Missing,
    Ready(&'a LineupDetail),
}

impl<'a> DetailView<'a> {
    pub fn from_snapshot(snapshot: &'a FetchSnapshot<LineupDetail>) -> Self {
        if snapshot.loading {
            return DetailView::Loading;
        }
        match &snapshot.result {
            FetchResult::NotLoaded => DetailView::Missing,
            FetchResult::Failed(_) => DetailView::Failed,
            FetchResult::Loaded(detail) => DetailView::Ready(detail),
        }
    }
}

/// Short label for a callout id: `mirage_a_site` → `site`.
pub fn callout_label(callout_id: &str) -> &str {
    callout_id.rsplit('_').next().unwrap_or(callout_id)
}

/// First screenshot of a lineup, or a placeholder keyed by grenade type.
pub fn thumbnail_url(lineup: &LineupSummary) -> String {
    lineup
        .media
        .iter()
        .find(|m| m.kind == MediaKind::Image)
        .map(|m| m.url.clone())
        .unwrap_or_else(|| {
            format!(
                "https://placehold.co/600x400/1F2937/7DD3FC?text={}",
                url::form_urlencoded::byte_serialize(lineup.grenade_type.as_bytes())
                    .collect::<String>()
            )
        })
}

/// Embeddable form of a YouTube watch URL.
pub fn embed_url(video_url: &str) -> String {
    video_url.replace("watch?v=", "embed/")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_lineup_card(lineup: &LineupSummary) -> String {
    format!(
        "{} {} [{}]\n    {} {} {}  ({})\n    {}",
        PIN,
        style(&lineup.title).bold(),
        style(&lineup.grenade_type).cyan(),
        title_case(callout_label(&lineup.origin.callout_id)),
        ARROW,
        title_case(callout_label(&lineup.destination.callout_id)),
        style(&lineup.id).dim(),
        style(thumbnail_url(lineup)).dim(),
    )
}

pub fn render_listing(view: &ListingView<'_>) -> String {
    match view {
        ListingView::Loading => format!("{}Searching for lineups...", SEARCH),
        ListingView::Failed => format!("{}{}", CROSS, style(SEARCH_FAILED).red()),
        ListingView::Idle => String::new(),
        ListingView::Empty => style(NO_RESULTS).dim().to_string(),
        ListingView::Populated(lineups) => lineups
            .iter()
            .map(render_lineup_card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_detail(view: &DetailView<'_>) -> String {
    let lineup = match view {
        DetailView::Loading => return "Loading lineup...".to_string(),
        DetailView::Failed => return format!("{}{}", CROSS, style(LOAD_FAILED).red()),
        DetailView::Missing => return String::new(),
        DetailView::Ready(lineup) => lineup,
    };

    let mut lines = vec![
        style(&lineup.title).bold().to_string(),
        format!(
            "{} - {}",
            lineup.map.name().unwrap_or("Unknown map"),
            lineup.grenade_type
        ),
        String::new(),
    ];

    if let Some(video) = lineup.media.iter().find(|m| m.kind == MediaKind::Video) {
        lines.push(format!("Video:        {}", embed_url(&video.url)));
    }
    for (index, image) in lineup
        .media
        .iter()
        .filter(|m| m.kind == MediaKind::Image)
        .enumerate()
    {
        let caption = image
            .caption
            .clone()
            .unwrap_or_else(|| format!("Screenshot {}", index + 1));
        lines.push(format!("Screenshot:   {} ({})", image.url, caption));
    }

    let details = &lineup.throw_details;
    lines.push(format!(
        "Origin:       {}",
        title_case(callout_label(&lineup.origin.callout_id))
    ));
    lines.push(format!(
        "Destination:  {}",
        title_case(callout_label(&lineup.destination.callout_id))
    ));
    lines.push(format!("Stance:       {}", title_case(&details.stance)));
    lines.push(format!("Type:         {}", title_case(&details.throw_type)));
    lines.push(format!("Strength:     {}", title_case(&details.strength)));
    lines.join("\n")
}

pub fn render_maps(maps: &[MapSummary]) -> String {
    if maps.is_empty() {
        return style("No maps available.").dim().to_string();
    }
    maps.iter()
        .map(|m| format!("{}  {}", style(&m.id).dim(), m.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_map_detail(map: &MapDetail) -> String {
    let mut lines = vec![format!("{} ({})", style(&map.name).bold(), map.id)];
    if map.callouts.is_empty() {
        lines.push(style("  No callouts.").dim().to_string());
    }
    for callout in &map.callouts {
        lines.push(format!("  {:<24} {}", callout.callout_id, callout.name.en));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CalloutRef, MapRef, Media, ThrowDetails};
    use crate::errors::ApiError;

    fn summary(id: &str) -> LineupSummary {
        LineupSummary {
            id: id.into(),
            title: "Window smoke".into(),
            grenade_type: "Smoke".into(),
            origin: CalloutRef {
                callout_id: "mirage_t_spawn".into(),
            },
            destination: CalloutRef {
                callout_id: "mirage_window".into(),
            },
            media: vec![],
        }
    }

    fn snapshot<T>(result: FetchResult<T>, loading: bool) -> FetchSnapshot<T> {
        FetchSnapshot {
            result,
            loading,
            generation: 1,
        }
    }

    #[test]
    fn test_empty_result_is_no_results_not_error_or_loading() {
        let snap = snapshot(FetchResult::Loaded(vec![]), false);
        let view = ListingView::from_snapshot(&snap);
        assert_eq!(view, ListingView::Empty);
        console::set_colors_enabled(false);
        assert_eq!(render_listing(&view), NO_RESULTS);
    }

    #[test]
    fn test_loading_wins_over_stale_payload() {
        let snap = snapshot(FetchResult::Loaded(vec![summary("l1")]), true);
        assert_eq!(ListingView::from_snapshot(&snap), ListingView::Loading);
    }

    #[test]
    fn test_listing_states() {
        let failed = snapshot::<Vec<LineupSummary>>(
            FetchResult::Failed(ApiError::RequestFailed { status: 500 }),
            false,
        );
        assert_eq!(ListingView::from_snapshot(&failed), ListingView::Failed);

        let idle = snapshot::<Vec<LineupSummary>>(FetchResult::NotLoaded, false);
        assert_eq!(ListingView::from_snapshot(&idle), ListingView::Idle);

        let populated = snapshot(FetchResult::Loaded(vec![summary("l1")]), false);
        match ListingView::from_snapshot(&populated) {
            ListingView::Populated(items) => assert_eq!(items[0].id, "l1"),
            other => panic!("Expected Populated, got {other:?}"),
        }
    }

    #[test]
    fn test_callout_label_uses_last_segment() {
        assert_eq!(callout_label("mirage_a_site"), "site");
        assert_eq!(callout_label("window"), "window");
    }

    #[test]
    fn test_thumbnail_prefers_first_image() {
        let mut lineup = summary("l1");
        assert!(thumbnail_url(&lineup).ends_with("?text=Smoke"));

        lineup.grenade_type = "HE Grenade".into();
        assert!(thumbnail_url(&lineup).ends_with("?text=HE+Grenade"));

        lineup.media = vec![
            Media {
                kind: MediaKind::Video,
                url: "https://youtube.com/watch?v=abc".into(),
                caption: None,
            },
            Media {
                kind: MediaKind::Image,
                url: "https://img.example/1.png".into(),
                caption: None,
            },
        ];
        assert_eq!(thumbnail_url(&lineup), "https://img.example/1.png");
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc"),
            "https://www.youtube.com/embed/abc"
        );
    }

    #[test]
    fn test_card_shows_callouts() {
        console::set_colors_enabled(false);
        let card = render_lineup_card(&summary("l1"));
        assert!(card.contains("Window smoke"));
        assert!(card.contains("Spawn"));
        assert!(card.contains("Window"));
        assert!(card.contains("https://placehold.co/600x400/1F2937/7DD3FC?text=Smoke"));

        let mut with_image = summary("l2");
        with_image.media = vec![Media {
            kind: MediaKind::Image,
            url: "https://img.example/aim.png".into(),
            caption: Some("Aim here".into()),
        }];
        let card = render_lineup_card(&with_image);
        assert!(card.lines().last().unwrap().contains("https://img.example/aim.png"));
    }

    #[test]
    fn test_detail_render() {
        console::set_colors_enabled(false);
        let detail = LineupDetail {
            id: "l1".into(),
            title: "Window smoke".into(),
            map: MapRef::Populated(MapSummary {
                id: "m1".into(),
                name: "Mirage".into(),
            }),
            grenade_type: "Smoke".into(),
            origin: CalloutRef {
                callout_id: "mirage_t_spawn".into(),
            },
            destination: CalloutRef {
                callout_id: "mirage_window".into(),
            },
            throw_details: ThrowDetails {
                stance: "crouching".into(),
                throw_type: "jump".into(),
                strength: "normal".into(),
            },
            media: vec![Media {
                kind: MediaKind::Video,
                url: "https://youtube.com/watch?v=abc".into(),
                caption: None,
            }],
        };
        let snap = snapshot(FetchResult::Loaded(detail), false);
        let out = render_detail(&DetailView::from_snapshot(&snap));
        assert!(out.contains("Mirage - Smoke"));
        assert!(out.contains("https://youtube.com/embed/abc"));
        assert!(out.contains("Crouching"));
        assert!(out.contains("Jump"));
    }

    #[test]
    fn test_detail_failure_is_generic_message() {
        console::set_colors_enabled(false);
        let snap = snapshot::<LineupDetail>(
            FetchResult::Failed(ApiError::RequestFailed { status: 404 }),
            false,
        );
        let view = DetailView::from_snapshot(&snap);
        assert_eq!(view, DetailView::Failed);
        assert!(render_detail(&view).contains(LOAD_FAILED));
    }
}
