//! Revert analyzer.

use chrono::{DateTime, Duration, Utc};
use cursor_sim_seed::{ActivityLevel, Seniority};
use cursor_sim_store::{PrState, Store};
use rand::Rng;

use crate::error::AnalyzerError;
use crate::keywords::is_revert_message;
use crate::Prng;

fn seniority_penalty(s: Seniority) -> f64 {
    match s {
        Seniority::Junior => 1.0,
        Seniority::Mid => 0.5,
        Seniority::Senior => -0.5,
    }
}

fn activity_modifier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Low => 0.2,
        ActivityLevel::Medium => 0.5,
        ActivityLevel::High => 0.8,
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Revert risk for a merged PR, clamped to `[0, 0.15]`.
pub fn revert_risk(ai_ratio: f64, seniority: Seniority, activity: ActivityLevel) -> f64 {
    let x = -3.5 + 1.8 * ai_ratio + 0.8 * seniority_penalty(seniority) + 0.3 * activity_modifier(activity);
    sigmoid(x).clamp(0.0, 0.15)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevertedPr {
    pub repo_name: String,
    pub pr_number: u64,
    pub reverted_at: DateTime<Utc>,
    pub revert_message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevertReport {
    pub window_days: u32,
    pub total_prs_merged: usize,
    pub total_prs_reverted: usize,
    pub revert_rate: f64,
    pub reverted_prs: Vec<RevertedPr>,
}

/// Analyze merged PRs created in `[since, until)` for synthetic
/// reverts. `window_days` bounds how far after `merged_at` a revert may
/// be scheduled.
pub fn analyze(
    store: &Store,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    window_days: u32,
    rng: &mut Prng,
) -> Result<RevertReport, AnalyzerError> {
    if since >= until {
        return Err(AnalyzerError::InvalidWindow { since: since.to_string(), until: until.to_string() });
    }

    let merged: Vec<_> = store
        .get_prs_by_range(since, until)
        .into_iter()
        .filter(|pr| pr.state == PrState::Merged)
        .collect();

    let mut reverted_prs = Vec::new();
    for pr in &merged {
        let Some(merged_at) = pr.merged_at else { continue };
        let (seniority, activity) = store
            .get_developer(&pr.author_id)
            .map(|d| (d.seniority, d.activity_level))
            .unwrap_or((Seniority::Mid, ActivityLevel::Medium));

        let risk = revert_risk(pr.ai_ratio, seniority, activity);
        if !rng.random_bool(risk) {
            continue;
        }

        let offset_days = rng.random_range(0.0..=(window_days.max(1) as f64));
        let reverted_at = merged_at + Duration::seconds((offset_days * 86_400.0) as i64);
        if reverted_at >= until {
            continue;
        }

        reverted_prs.push(RevertedPr {
            repo_name: pr.repo_name.clone(),
            pr_number: pr.number,
            reverted_at,
            revert_message: format!("Revert \"{}\" (#{})", pr.title, pr.number),
        });
    }

    debug_assert!(reverted_prs.iter().all(|r| is_revert_message(&r.revert_message)));

    let total_prs_merged = merged.len();
    let total_prs_reverted = reverted_prs.len();
    let revert_rate = if total_prs_merged == 0 {
        0.0
    } else {
        total_prs_reverted as f64 / total_prs_merged as f64
    };

    Ok(RevertReport {
        window_days,
        total_prs_merged,
        total_prs_reverted,
        revert_rate,
        reverted_prs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_stays_within_its_fixed_bounds() {
        for ai_ratio in [0.0, 0.25, 0.5, 0.75, 1.0] {
            for s in [Seniority::Junior, Seniority::Mid, Seniority::Senior] {
                for a in [ActivityLevel::Low, ActivityLevel::Medium, ActivityLevel::High] {
                    assert!(revert_risk(ai_ratio, s, a) <= 0.15);
                    assert!(revert_risk(ai_ratio, s, a) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn higher_ai_ratio_increases_risk() {
        let low = revert_risk(0.0, Seniority::Mid, ActivityLevel::Medium);
        let high = revert_risk(1.0, Seniority::Mid, ActivityLevel::Medium);
        assert!(high > low);
    }

    #[test]
    fn empty_store_yields_zero_rate() {
        let store = Store::new();
        let since = crate::test_support::epoch();
        let until = since + Duration::days(30);
        let report = analyze(&store, since, until, 14, &mut crate::test_support::rng(1)).unwrap();
        assert_eq!(report.total_prs_merged, 0);
        assert_eq!(report.revert_rate, 0.0);
    }

    #[test]
    fn invalid_window_is_an_error() {
        let store = Store::new();
        let since = crate::test_support::epoch();
        let err = analyze(&store, since, since, 14, &mut crate::test_support::rng(1)).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidWindow { .. }));
    }
}
