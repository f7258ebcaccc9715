//! Report formatting
//!
//! Renders the configuration dump, per-request trace lines, per-worker
//! summaries, and the final aggregate summary. The `-H` flag replaces the
//! inline group separator with newlines in the dump and summary so long
//! lines stay readable on a terminal.

use crate::config::Config;
use crate::engine::OperationType;
use crate::output::OutputSink;
use crate::stats::aggregator::StatisticsAggregator;
use crate::stats::WorkerStats;
use crate::Result;

/// One-line dump of the effective configuration
pub fn render_configuration(config: &Config) -> String {
    let sep = group_separator(config);
    format!(
        "configuration: {sep}request_count {} , filename {} , {sep}page_size {} , \
         write_percent {} , addressing {} , duration(s) {} , {sep}start_offset {} , \
         span {} , thread_count {} , {sep}rampup_interval(us) {} , trace {} , output {}",
        bound(config.max_requests),
        config.target_path.display(),
        config.page_size,
        config.write_percent,
        config.mode,
        bound(config.duration.map(|d| d.as_secs())),
        config.start_offset,
        config.span,
        config.threads,
        config.rampup_interval_us,
        config.trace as u8,
        config
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "console".to_string()),
    )
}

/// One trace line per completed request
pub fn trace_line(
    epoch_seconds: i64,
    op_type: OperationType,
    page_size: u64,
    offset: u64,
    latency_us: u64,
) -> String {
    format!(
        "io,{},{},{},{},{}",
        epoch_seconds,
        op_type.tag(),
        page_size,
        offset,
        latency_us
    )
}

/// Summary line for a single worker
pub fn worker_line(worker_id: usize, page_size: u64, stats: &WorkerStats) -> String {
    format!(
        "thread {}: page_size {} , {}",
        worker_id,
        page_size,
        stat_groups(stats, "")
    )
}

/// Final aggregate summary line
pub fn summary_line(page_size: u64, stats: &WorkerStats, sep: &str) -> String {
    format!("summary: page_size {} , {sep}{}", page_size, stat_groups(stats, sep))
}

/// Render the full post-run report: per-worker lines (for multi-thread
/// runs) followed by the aggregate summary.
pub fn render_report(
    config: &Config,
    aggregator: &mut StatisticsAggregator,
    sink: &OutputSink,
) -> Result<()> {
    if config.threads > 1 {
        for worker_id in aggregator.worker_ids() {
            if let Some(stats) = aggregator.worker_stats(worker_id) {
                sink.write_line(&worker_line(worker_id, config.page_size, stats))?;
            }
        }
    }

    let sep = group_separator(config);
    sink.write_line(&summary_line(config.page_size, aggregator.aggregate(), sep))?;
    Ok(())
}

fn stat_groups(stats: &WorkerStats, sep: &str) -> String {
    format!(
        "[ read_count {} , read_time(us) {} , avg_latency(us) {} ], {sep}\
         [ write_count {} , write_time(us) {} , avg_latency(us) {} ], {sep}\
         [ total_count {} , time(us) {} , avg_latency(us) {} ]",
        stats.read_ops(),
        stats.read_time_us(),
        stats.avg_read_latency_us(),
        stats.write_ops(),
        stats.write_time_us(),
        stats.avg_write_latency_us(),
        stats.total_ops(),
        stats.total_time_us(),
        stats.avg_latency_us(),
    )
}

fn group_separator(config: &Config) -> &'static str {
    if config.human_readable {
        "\n"
    } else {
        ""
    }
}

fn bound(value: Option<impl std::fmt::Display>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unbounded".to_string(),
    }
}
