//! Lineup submission - `lineups create`.

use anyhow::{Context, Result};
use console::style;

use lineups::api::{GrenadeType, MapDetail, endpoints};
use lineups::config::Settings;
use lineups::form::LineupForm;
use lineups::ui::icons::{CHECK, CROSS};
use lineups::ui::LoadingSpinner;

use super::{connect, load, print_json};
use crate::OutputFormat;

/// Form values as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CreateInput {
    pub title: Option<String>,
    pub map: Option<String>,
    pub grenade: Option<GrenadeType>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
}

impl CreateInput {
    fn to_form(&self) -> LineupForm {
        let mut form = LineupForm::new();
        form.title = self.title.clone().unwrap_or_default();
        form.set_map(self.map.clone().unwrap_or_default().trim());
        form.grenade_type = self.grenade;
        if let Some(origin) = &self.origin {
            form.set_origin(origin.trim());
        }
        if let Some(destination) = &self.destination {
            form.set_destination(destination.trim());
        }
        form.video_url = self.video_url.clone().unwrap_or_default();
        form.image_url = self.image_url.clone().unwrap_or_default();
        form
    }
}

fn check_callouts(form: &LineupForm, map: &MapDetail) -> Result<()> {
    for id in [form.origin_callout_id(), form.destination_callout_id()] {
        if !map.callouts.iter().any(|c| c.callout_id == id) {
            anyhow::bail!("'{}' is not a callout on {}", id, map.name);
        }
    }
    Ok(())
}

pub async fn cmd_create(
    settings: &Settings,
    format: OutputFormat,
    yes: bool,
    input: CreateInput,
) -> Result<()> {
    let mut form = input.to_form();

    // Required fields are checked before anything touches the network.
    let body = form.validate()?;

    let client = connect(settings)?;
    let map: MapDetail = load(
        client.clone(),
        endpoints::map(form.map_id()),
        "Loading map...",
        "Failed to load map.",
        format,
    )
    .await?;
    check_callouts(&form, &map)?;

    if format == OutputFormat::Text {
        println!();
        println!("{}", style(&body.title).bold());
        println!("  Map:          {}", map.name);
        println!("  Grenade:      {}", body.grenade_type);
        println!("  Origin:       {}", body.origin.callout_id);
        println!("  Destination:  {}", body.destination.callout_id);
        for media in &body.media {
            println!("  Media:        {}", media.url);
        }
        println!();
    }

    if !yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("Submit this lineup?")
            .default(true)
            .interact()
            .unwrap_or(false);

        if !confirm {
            println!("Submission cancelled");
            return Ok(());
        }
    }

    let spinner = LoadingSpinner::start("Submitting...", format == OutputFormat::Text);
    let result = form.submit(client.as_ref()).await;
    spinner.finish();

    match result {
        Ok(created) => {
            match format {
                OutputFormat::Json => print_json(&created)?,
                OutputFormat::Text => {
                    println!("{}Created lineup {}", CHECK, style(&created.id).cyan());
                    println!("Run 'lineups show {}' to view it.", created.id);
                }
            }
            Ok(())
        }
        Err(err) => {
            if let Some(message) = form.error() {
                eprintln!("{}{}", CROSS, style(message).red());
            }
            Err(err).context("Failed to create lineup.")
        }
    }
}
