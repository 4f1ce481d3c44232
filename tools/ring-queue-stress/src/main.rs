use anyhow::Context;
use clap::Parser;
use ring_queue_stress::{Params, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = Params::parse();

    let report = run(&params).with_context(|| format!("stress run failed for {params:?}"))?;

    info!(
        seed = report.seed,
        enqueued = report.enqueued,
        dequeued = report.dequeued,
        rejected_full = report.rejected_full,
        rejected_empty = report.rejected_empty,
        remaining = report.remaining,
        "ring buffer matched the shadow queue"
    );

    let total = report.total().max(1);
    for (kind, count) in &report.kinds {
        info!(kind, count, share = *count as f64 / total as f64, "payloads");
    }

    Ok(())
}
