//! Lineup detail - `lineups show <id>`.

use anyhow::Result;

use lineups::api::{LineupDetail, endpoints};
use lineups::binding::{Endpoint, FetchBinding};
use lineups::config::Settings;
use lineups::ui::wait_with_spinner;
use lineups::views::{self, DetailView, LOAD_FAILED};

use super::{connect, print_json};
use crate::OutputFormat;

pub async fn cmd_show(settings: &Settings, format: OutputFormat, id: &str) -> Result<()> {
    let client = connect(settings)?;

    let mut binding = FetchBinding::<LineupDetail>::new(client);
    binding.set_endpoint(Endpoint::from_option(
        (!id.trim().is_empty()).then(|| endpoints::lineup(id.trim())),
    ));
    let snapshot = wait_with_spinner(&binding, "Loading lineup...", format == OutputFormat::Text).await;

    match DetailView::from_snapshot(&snapshot) {
        DetailView::Failed | DetailView::Missing => {
            let err = snapshot.error().cloned();
            Err(match err {
                Some(err) => anyhow::Error::new(err).context(LOAD_FAILED),
                None => anyhow::anyhow!(LOAD_FAILED),
            })
        }
        DetailView::Ready(detail) if format == OutputFormat::Json => print_json(detail),
        view => {
            println!("{}", views::render_detail(&view));
            Ok(())
        }
    }
}
