//! Medium construction from runtime configuration.

use crate::config::MediumConfig;
use crate::medium::{CsvMedium, MediumResult, RowMedium, SheetsMedium};
use log::{error, info};
use std::time::{Duration, Instant};

/// Builds the configured backing medium behind the trait object the hosts
/// consume.
pub fn open_medium(config: &MediumConfig) -> MediumResult<Box<dyn RowMedium>> {
    let started_at = Instant::now();
    info!(
        "event=medium_open module=medium status=start kind={}",
        config.kind_name()
    );

    let result = build_medium(config);
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(medium) => info!(
            "event=medium_open module=medium status=ok kind={} duration_ms={duration_ms}",
            medium.kind()
        ),
        Err(err) => error!(
            "event=medium_open module=medium status=error kind={} duration_ms={duration_ms} error={err}",
            config.kind_name()
        ),
    }
    result
}

fn build_medium(config: &MediumConfig) -> MediumResult<Box<dyn RowMedium>> {
    match config {
        MediumConfig::Csv { path } => Ok(Box::new(CsvMedium::new(path))),
        MediumConfig::Sheets {
            spreadsheet_id,
            worksheet,
            base_url,
            api_token,
            timeout_secs,
        } => {
            let medium = SheetsMedium::with_timeout(
                spreadsheet_id.as_str(),
                Duration::from_secs(*timeout_secs),
            )?
            .with_base_url(base_url.as_str())
            .with_worksheet(worksheet.as_str())
            .with_bearer_token(api_token.clone());
            Ok(Box::new(medium))
        }
    }
}
