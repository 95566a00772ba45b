use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::argsets::ExtractArgs;
use crate::config;
use crate::data_mgmt::consolidate::consolidate;
use crate::data_mgmt::models::ReadingRecord;
use crate::data_mgmt::output::{self, RunSummary};
use crate::helpers::now_iso;
use crate::interfaces::http_api;
use crate::readers::{AwairAdapter, KaiterraAdapter, VendorAdapter};

/// Devices of one vendor, polled in order
pub struct VendorBatch<'a> {
    pub adapter: &'a dyn VendorAdapter,
    pub device_ids: &'a [String],
    /// Pause between consecutive calls of this batch, applied whatever the
    /// outcome of the call
    pub delay_after_call: Option<Duration>,
}

/// Poll every device of every batch, strictly one at a time.
///
/// `sleep` is called for each inter-request delay.
pub fn collect_readings(
    batches: &[VendorBatch<'_>],
    mut sleep: impl FnMut(Duration),
) -> Vec<ReadingRecord> {
    let mut records = Vec::new();

    for batch in batches {
        let source = batch.adapter.source();
        if batch.device_ids.is_empty() {
            log::info!("No {source} devices configured");
            continue;
        }
        log::info!(
            "Extracting data from {} {source} device(s)",
            batch.device_ids.len()
        );

        for (i, device_id) in batch.device_ids.iter().enumerate() {
            log::info!(
                "Fetching {source} device {}/{}: {device_id}",
                i + 1,
                batch.device_ids.len()
            );
            records.push(batch.adapter.fetch_latest(device_id));

            let more_to_fetch = i + 1 < batch.device_ids.len();
            if let Some(delay) = batch.delay_after_call.filter(|_| more_to_fetch) {
                log::debug!("Waiting {:.1}s before next {source} request", delay.as_secs_f32());
                sleep(delay);
            }
        }
    }

    records
}

pub fn extract(args: ExtractArgs) -> Result<()> {
    log::info!("Start time: {}", now_iso());

    let mut config = config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    if let Some(output) = args.output {
        config.output_file = Some(output);
    }

    let awair_delay = config.awair_request_delay()?;

    let agent = http_api::get_ureq_agent()?;
    let awair = AwairAdapter::new(agent.clone(), config.awair_base_url(), config.awair.api_key());
    let kaiterra = KaiterraAdapter::new(agent, config.kaiterra_base_url(), config.kaiterra.api_key());

    let batches = [
        VendorBatch {
            adapter: &awair,
            device_ids: &config.awair.device_ids,
            delay_after_call: Some(awair_delay),
        },
        VendorBatch {
            adapter: &kaiterra,
            device_ids: &config.kaiterra.device_ids,
            delay_after_call: None,
        },
    ];

    let records = collect_readings(&batches, thread::sleep);
    if records.is_empty() {
        log::warn!("No devices configured; nothing to export");
        log::info!("End time: {}", now_iso());
        return Ok(());
    }

    let table = consolidate(&records);
    log::debug!("Output columns: {}", table.columns().iter().join(", "));

    let output_file: PathBuf = config.output_file();
    output::write_csv_file(&table, &output_file)
        .with_context(|| format!("Failed to write {}", output_file.display()))?;

    let summary = RunSummary::from_records(&records);
    log::info!("Data exported to {}", output_file.display());
    log::info!(
        "Total devices: {}; successful: {}; failed: {}",
        summary.total,
        summary.successful,
        summary.failed
    );
    log::info!("End time: {}", now_iso());

    Ok(())
}
