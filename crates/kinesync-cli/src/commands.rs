use std::path::Path;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use kinesync_core::models::description::{DescribeDeliveryStreamOutput, ListTagsOutput};
use kinesync_core::{DeliveryStreamDescription, Resource, ResourceSpec};
use kinesync_provisioner::{
    DeliveryStreamSyncer, DryRunClient, FirehoseClient, SyncConfig, SyncOutcome, TracingMetrics,
    build_aws_config, delta,
};

pub async fn plan(desired: &Path, described: &Path, tags: Option<&Path>) -> Result<()> {
    let desired = read_desired(desired)?;
    let description = read_description(described)?;
    let tags = match tags {
        Some(path) => ListTagsOutput::from_json(&read(path)?)?.tags,
        None => Vec::new(),
    };

    let client = Arc::new(DryRunClient::new(description, tags));
    let syncer = DeliveryStreamSyncer::new(
        client.clone(),
        Arc::new(TracingMetrics),
        &SyncConfig::default(),
    );

    let description = syncer.describe(desired.name()).await?;
    let observed = syncer.observe(&desired, &description).await?;
    let delta = delta::compare(&desired, &observed);
    let outcome = syncer.update(&desired, &observed).await?;

    let report = serde_json::json!({
        "stream": desired.name(),
        "differences": delta.differences(),
        "calls": client.planned(),
        "outcome": outcome_label(&outcome),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub async fn apply(
    desired: &Path,
    config: Option<&Path>,
    region: Option<String>,
    profile: Option<String>,
) -> Result<()> {
    let desired = read_desired(desired)?;

    let config = match config {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::default(),
    }
    .apply_env()
    .apply_overrides(region, profile);

    let sdk_config = build_aws_config(&config).await;
    let syncer = DeliveryStreamSyncer::new(
        Arc::new(FirehoseClient::from_conf(&sdk_config)),
        Arc::new(TracingMetrics),
        &config,
    );

    let outcome = syncer.reconcile(&desired).await?;
    tracing::info!(stream = %desired.name(), outcome = %outcome_label(&outcome), "pass complete");
    println!("{}", outcome_label(&outcome));
    Ok(())
}

fn outcome_label(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::InSync => "in sync".to_string(),
        SyncOutcome::Updated => "updated".to_string(),
        SyncOutcome::Requeue(requeue) => format!("requeue: {requeue}"),
    }
}

fn read_desired(path: &Path) -> Result<Resource> {
    let spec = ResourceSpec::from_json(&read(path)?)
        .wrap_err_with(|| format!("invalid desired spec in {}", path.display()))?;
    Ok(Resource::new(spec))
}

fn read_description(path: &Path) -> Result<DeliveryStreamDescription> {
    let output = DescribeDeliveryStreamOutput::from_json(&read(path)?)
        .wrap_err_with(|| format!("invalid describe output in {}", path.display()))?;
    Ok(output.delivery_stream_description)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
