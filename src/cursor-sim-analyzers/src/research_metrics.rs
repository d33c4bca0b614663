//! Research-metrics aggregator.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use cursor_sim_store::{PrState, ResearchDataPoint, Store};

use crate::error::AnalyzerError;

/// Closed-interval AI-ratio bands used to bucket PRs.
pub const BANDS: [(f64, f64); 4] = [(0.0, 0.25), (0.25, 0.5), (0.5, 0.75), (0.75, 1.0)];

fn band_label((lo, hi): (f64, f64)) -> String {
    format!("[{lo:.2},{hi:.2}{}", if hi >= 1.0 { "]" } else { ")" })
}

fn band_index(ai_ratio: f64) -> usize {
    for (i, &(lo, hi)) in BANDS.iter().enumerate() {
        let upper_inclusive = i == BANDS.len() - 1;
        if ai_ratio >= lo && (ai_ratio < hi || (upper_inclusive && ai_ratio <= hi)) {
            return i;
        }
    }
    BANDS.len() - 1
}

/// Build one research data point per merged PR in `[since, until)`.
/// `reverted`/`hotfixed` membership is supplied by the caller, which is
/// expected to have already run the revert/hotfix analyzers over the
/// same window.
pub fn build_data_points(
    store: &Store,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    reverted: &HashSet<(String, u64)>,
    hotfixed: &HashSet<(String, u64)>,
) -> Result<Vec<ResearchDataPoint>, AnalyzerError> {
    if since >= until {
        return Err(AnalyzerError::InvalidWindow { since: since.to_string(), until: until.to_string() });
    }

    let mut points = Vec::new();
    for pr in store.get_prs_by_range(since, until) {
        if pr.state != PrState::Merged {
            continue;
        }
        let Some(merged_at) = pr.merged_at else { continue };

        let repo_commits = store.get_commits_by_repo(&pr.repo_name);
        let linked: Vec<_> = repo_commits
            .into_iter()
            .filter(|c| pr.linked_commits.contains(&c.commit_hash))
            .collect();
        let first_commit_ts = linked.iter().map(|c| c.commit_ts).min().unwrap_or(pr.created_at);
        let last_commit_ts = linked.iter().map(|c| c.commit_ts).max().unwrap_or(pr.created_at);

        let coding_lead_time_hours = (last_commit_ts - first_commit_ts).num_minutes() as f64 / 60.0;
        let review_lead_time_hours = (merged_at - pr.created_at).num_minutes() as f64 / 60.0;

        let total_lines_added: u32 = linked.iter().map(|c| c.total_lines_added).sum();
        let total_lines_deleted: u32 = linked.iter().map(|c| c.total_lines_deleted).sum();

        let key = (pr.repo_name.clone(), pr.number);
        points.push(ResearchDataPoint {
            repo_name: pr.repo_name.clone(),
            pr_number: pr.number,
            ai_ratio: pr.ai_ratio,
            coding_lead_time_hours,
            review_lead_time_hours,
            total_lines_added,
            total_lines_deleted,
            review_iterations: pr.review_iterations,
            reverted: reverted.contains(&key),
            hotfixed: hotfixed.contains(&key),
        });
    }
    Ok(points)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandMetrics {
    pub band: String,
    pub pr_count: usize,
    pub mean_coding_lead_time_hours: f64,
    pub median_coding_lead_time_hours: f64,
    pub stddev_coding_lead_time_hours: f64,
    pub mean_review_lead_time_hours: f64,
    pub median_review_lead_time_hours: f64,
    pub stddev_review_lead_time_hours: f64,
    pub total_lines_added: u32,
    pub total_lines_deleted: u32,
    pub total_review_iterations: u32,
    pub revert_rate: f64,
    pub hotfix_rate: f64,
}

/// Aggregate `points` into one [`BandMetrics`] row per AI-ratio band.
pub fn aggregate(points: &[ResearchDataPoint]) -> Vec<BandMetrics> {
    let mut buckets: Vec<Vec<&ResearchDataPoint>> = vec![Vec::new(); BANDS.len()];
    for p in points {
        buckets[band_index(p.ai_ratio)].push(p);
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(i, rows)| {
            let coding: Vec<f64> = rows.iter().map(|p| p.coding_lead_time_hours).collect();
            let review: Vec<f64> = rows.iter().map(|p| p.review_lead_time_hours).collect();
            let pr_count = rows.len();
            let reverted_count = rows.iter().filter(|p| p.reverted).count();
            let hotfixed_count = rows.iter().filter(|p| p.hotfixed).count();

            BandMetrics {
                band: band_label(BANDS[i]),
                pr_count,
                mean_coding_lead_time_hours: mean(&coding),
                median_coding_lead_time_hours: median(&coding),
                stddev_coding_lead_time_hours: std_dev(&coding),
                mean_review_lead_time_hours: mean(&review),
                median_review_lead_time_hours: median(&review),
                stddev_review_lead_time_hours: std_dev(&review),
                total_lines_added: rows.iter().map(|p| p.total_lines_added).sum(),
                total_lines_deleted: rows.iter().map(|p| p.total_lines_deleted).sum(),
                total_review_iterations: rows.iter().map(|p| p.review_iterations).sum(),
                revert_rate: if pr_count == 0 { 0.0 } else { reverted_count as f64 / pr_count as f64 },
                hotfix_rate: if pr_count == 0 { 0.0 } else { hotfixed_count as f64 / pr_count as f64 },
            }
        })
        .collect()
}
