//! C2: deterministic replication/downsampling of the seed developer
//! roster to a requested headcount.

use cursor_sim_seed::SeedDeveloper;
use cursor_sim_store::Developer;

use crate::context::Prng;

fn to_developer(seed: &SeedDeveloper) -> Developer {
    Developer {
        user_id: seed.user_id.clone(),
        email: seed.email.clone(),
        name: seed.name.clone(),
        seniority: seed.seniority,
        activity_level: seed.activity_level,
        acceptance_rate: seed.acceptance_rate,
        working_hours: seed.working_hours,
        preferred_models: seed.preferred_models.clone(),
        model_weights: seed.model_weights.clone(),
    }
}

fn split_email(email: &str) -> (&str, &str) {
    email.split_once('@').unwrap_or((email, "example.com"))
}

/// Clone `K` (1-based) of `original`: mechanical id/email suffixing,
/// behavior parameters inherited verbatim.
fn clone_developer(original: &SeedDeveloper, k: usize) -> Developer {
    let (local, domain) = split_email(&original.email);
    Developer {
        user_id: format!("{}_clone{k}", original.user_id),
        email: format!("{local}_clone{k}@{domain}"),
        name: format!("{} (clone {k})", original.name),
        seniority: original.seniority,
        activity_level: original.activity_level,
        acceptance_rate: original.acceptance_rate,
        working_hours: original.working_hours,
        preferred_models: original.preferred_models.clone(),
        model_weights: original.model_weights.clone(),
    }
}

/// Produce exactly `n` developers from the `m`-sized seed roster:
/// `n < m` samples without replacement; `n == m` returns the roster
/// unchanged; `n > m` emits the `m` originals followed by `n - m`
/// clones, cycling through the originals as the clone source.
pub fn replicate(seed_devs: &[SeedDeveloper], n: usize, rng: &mut Prng) -> Vec<Developer> {
    let m = seed_devs.len();
    if m == 0 || n == 0 {
        return Vec::new();
    }
    if n == m {
        return seed_devs.iter().map(to_developer).collect();
    }
    if n < m {
        let indices = rand::seq::index::sample(rng, m, n);
        return indices.into_iter().map(|i| to_developer(&seed_devs[i])).collect();
    }
    let mut out: Vec<Developer> = seed_devs.iter().map(to_developer).collect();
    for k in 1..=(n - m) {
        let original = &seed_devs[(k - 1) % m];
        out.push(clone_developer(original, k));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_sim_seed::{ActivityLevel, Seniority, WorkingHours};
    use rand::SeedableRng;

    fn devs(n: usize) -> Vec<SeedDeveloper> {
        (0..n)
            .map(|i| SeedDeveloper {
                user_id: format!("u{i}"),
                email: format!("u{i}@example.com"),
                name: format!("User {i}"),
                seniority: Seniority::Mid,
                activity_level: ActivityLevel::Medium,
                acceptance_rate: 0.5,
                working_hours: WorkingHours { start: 9, end: 17 },
                preferred_models: vec!["gpt-4o".to_string()],
                model_weights: None,
            })
            .collect()
    }

    #[test]
    fn n_equal_m_is_unchanged() {
        let seed = devs(3);
        let mut rng = Prng::seed_from_u64(1);
        let out = replicate(&seed, 3, &mut rng);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].user_id, "u0");
    }

    #[test]
    fn n_less_than_m_samples_without_replacement() {
        let seed = devs(5);
        let mut rng = Prng::seed_from_u64(2);
        let out = replicate(&seed, 2, &mut rng);
        assert_eq!(out.len(), 2);
        assert_ne!(out[0].user_id, out[1].user_id);
    }

    #[test]
    fn n_greater_than_m_clones_with_mechanical_naming() {
        let seed = devs(2);
        let mut rng = Prng::seed_from_u64(3);
        let out = replicate(&seed, 5, &mut rng);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].user_id, "u0");
        assert_eq!(out[1].user_id, "u1");
        assert_eq!(out[2].user_id, "u0_clone1");
        assert_eq!(out[2].email, "u0_clone1@example.com");
        assert_eq!(out[3].user_id, "u1_clone2");
        assert_eq!(out[4].user_id, "u0_clone3");
    }

    #[test]
    fn determinism_for_fixed_seed() {
        let seed = devs(4);
        let mut rng_a = Prng::seed_from_u64(99);
        let mut rng_b = Prng::seed_from_u64(99);
        let a = replicate(&seed, 2, &mut rng_a);
        let b = replicate(&seed, 2, &mut rng_b);
        assert_eq!(a, b);
    }
}
