//! `rollcall count`: fetch, classify, optionally tag, print, and report.
//!
//! The run is strictly sequential. Fetch and delivery errors abort with a
//! non-zero exit; individual tag batch failures are only counted.

mod demo;

use anyhow::Context;
use chrono::Utc;
use rollcall_coda::{CodaClient, CodaPayload};
use rollcall_core::{
    aggregate, filter_window, format_timestamp, group_by_email, sample_rng, AggregateResult,
    AppConfig, Category, Classifier, RecencyWindow,
};
use rollcall_intercom::IntercomClient;

/// Flags for one `count` invocation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CountOptions {
    pub recency_days: u32,
    /// Use the built-in sample result; never touches Intercom.
    pub test_mode: bool,
    pub tag: bool,
    /// Overrides `ROLLCALL_SAMPLE_SEED` when set.
    pub seed: Option<u64>,
    pub report: bool,
}

/// Runs one count and prints the result as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the Intercom token is missing for a live run, the
/// contact fetch fails, or the Coda webhook rejects the payload.
pub(crate) async fn run_count(config: &AppConfig, options: &CountOptions) -> anyhow::Result<()> {
    let result = if options.test_mode {
        tracing::info!("test mode: using static sample result, tagging disabled");
        demo::sample_result()
    } else {
        live_result(config, options).await?
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    let result = result.with_run_metadata(run_id, Utc::now().timestamp());

    println!("{}", serde_json::to_string_pretty(&result)?);

    if options.report {
        report(config, &result, options.recency_days).await?;
    } else {
        tracing::info!("--no-report set; skipping Coda delivery");
    }

    Ok(())
}

async fn live_result(
    config: &AppConfig,
    options: &CountOptions,
) -> anyhow::Result<AggregateResult> {
    let token = config
        .require_intercom_token()
        .context("cannot fetch contacts")?;

    let client = IntercomClient::with_base_url(
        token,
        config.request_timeout_secs,
        config.max_rate_limit_retries,
        &config.intercom_api_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Intercom client: {e}"))?;

    let window = RecencyWindow::ending_at(Utc::now(), options.recency_days);
    tracing::info!(
        recency_days = window.recency_days,
        lower_bound = %format_timestamp(window.lower_bound),
        query_start = %format_timestamp(window.query_start),
        "computed recency window"
    );

    let fetched = client
        .fetch_all_profiles(window.query_start, config.page_size)
        .await
        .context("failed to fetch contacts from Intercom")?;

    let classifier = Classifier::from_app_config(config);
    let in_window = filter_window(&fetched, window.lower_bound);
    let total_in_window = in_window.len();
    tracing::info!(
        fetched = fetched.len(),
        in_window = total_in_window,
        "filtered contacts to exact window"
    );

    let groups = group_by_email(in_window, &classifier);
    let mut rng = sample_rng(options.seed.or(config.sample_seed));
    let result = aggregate(
        &groups,
        total_in_window,
        &classifier,
        config.sample_size,
        &mut rng,
    );

    if !options.tag {
        return Ok(result);
    }

    let ids = groups.profile_ids_for(Category::OnlyA);
    let outcome = client
        .tag_in_batches(
            &ids,
            &config.tag_name,
            config.tag_batch_size,
            config.tag_batch_delay_ms,
        )
        .await;
    Ok(result.with_tagging(outcome))
}

async fn report(
    config: &AppConfig,
    result: &AggregateResult,
    recency_days: u32,
) -> anyhow::Result<()> {
    let Some((webhook_url, api_token)) = config.coda_credentials() else {
        tracing::warn!("CODA_WEBHOOK_URL or CODA_API_TOKEN not set; skipping Coda delivery");
        return Ok(());
    };

    let payload = CodaPayload::from_result(result, recency_days)?;
    let client = CodaClient::new(webhook_url, api_token, config.request_timeout_secs)?;
    client
        .send(&payload)
        .await
        .context("failed to send results to Coda")?;
    Ok(())
}
