//! Map listing - `lineups maps [id]`.

use anyhow::Result;

use lineups::api::{MapDetail, MapSummary, endpoints};
use lineups::config::Settings;
use lineups::views;

use super::{connect, load, print_json};
use crate::OutputFormat;

pub async fn cmd_maps(settings: &Settings, format: OutputFormat, map_id: Option<&str>) -> Result<()> {
    let client = connect(settings)?;

    match map_id {
        None => {
            let maps: Vec<MapSummary> = load(
                client,
                endpoints::MAPS.to_string(),
                "Loading maps...",
                "Failed to load maps.",
                format,
            )
            .await?;
            match format {
                OutputFormat::Json => print_json(&maps)?,
                OutputFormat::Text => println!("{}", views::render_maps(&maps)),
            }
        }
        Some(id) => {
            let map: MapDetail = load(
                client,
                endpoints::map(id),
                "Loading map...",
                "Failed to load map.",
                format,
            )
            .await?;
            match format {
                OutputFormat::Json => print_json(&map)?,
                OutputFormat::Text => println!("{}", views::render_map_detail(&map)),
            }
        }
    }

    Ok(())
}
