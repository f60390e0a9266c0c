//! Generation 0: analytically tuned reels plus mutated variants of them.
//!
//! Seed reels weight each symbol by `pay5^-alpha`, so low payers dominate the
//! window as alpha grows. A sweep over alpha picks the skews whose exact RTP
//! lands nearest the target.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::config::EvolutionConfig;
use crate::engines::generation::genome::{Reel, ReelSet};
use crate::engines::generation::history::Origin;
use crate::engines::generation::operators::mutate_reel_set;
use crate::engines::metrics::analytic::analytic_rtp;
use crate::types::{Representation, SymbolId};

const ALPHA_STEP: f64 = 0.05;
const ALPHA_MAX: f64 = 3.0;

/// Weights proportional to `pay5^-alpha`, scaled so the heaviest symbol gets
/// `max_weight`. Every weight is at least 1.
pub fn analytic_weights(catalog: &Catalog, alpha: f64, max_weight: u32) -> Vec<u32> {
    let raw: Vec<f64> = catalog
        .symbols()
        .iter()
        .map(|s| s.payout5().max(1.0).powf(-alpha))
        .collect();
    let peak = raw.iter().cloned().fold(f64::MIN_POSITIVE, f64::max);

    raw.iter()
        .map(|r| ((r / peak) * max_weight as f64).round().clamp(1.0, max_weight as f64) as u32)
        .collect()
}

/// Split `len` positions across symbols in proportion to `weights` using
/// largest remainders, with at least one position per symbol.
pub fn apportion(weights: &[u32], len: usize) -> Vec<usize> {
    let total: f64 = weights.iter().map(|&w| w as f64).sum();
    if weights.is_empty() || total <= 0.0 {
        return vec![0; weights.len()];
    }
    let quotas: Vec<f64> = weights.iter().map(|&w| w as f64 / total * len as f64).collect();
    let mut counts: Vec<usize> = quotas.iter().map(|q| (q.floor() as usize).max(1)).collect();

    let mut assigned: usize = counts.iter().sum();
    while assigned < len {
        let idx = (0..counts.len())
            .max_by(|&a, &b| {
                (quotas[a] - counts[a] as f64).total_cmp(&(quotas[b] - counts[b] as f64))
            })
            .unwrap_or(0);
        counts[idx] += 1;
        assigned += 1;
    }
    while assigned > len {
        let Some(idx) = (0..counts.len())
            .filter(|&i| counts[i] > 1)
            .max_by(|&a, &b| {
                (counts[a] as f64 - quotas[a]).total_cmp(&(counts[b] as f64 - quotas[b]))
            })
        else {
            break;
        };
        counts[idx] -= 1;
        assigned -= 1;
    }
    counts
}

/// Shuffled strip holding each symbol `counts[id]` times
pub fn strip_from_counts<R: Rng>(counts: &[usize], rng: &mut R) -> Vec<SymbolId> {
    let mut strip: Vec<SymbolId> = counts
        .iter()
        .enumerate()
        .flat_map(|(id, &n)| std::iter::repeat(SymbolId(id as u8)).take(n))
        .collect();
    strip.shuffle(rng);
    strip
}

/// `(alpha, analytic RTP)` for every swept skew
pub fn alpha_sweep(catalog: &Catalog, max_weight: u32) -> Vec<(f64, f64)> {
    let steps = (ALPHA_MAX / ALPHA_STEP).round() as usize;
    (0..=steps)
        .map(|step| {
            let alpha = step as f64 * ALPHA_STEP;
            let reels = ReelSet::uniform(Reel::Weighted(analytic_weights(catalog, alpha, max_weight)));
            (alpha, analytic_rtp(catalog, &reels))
        })
        .collect()
}

/// Up to `analytic_seed_count` distinct uniform configurations, closest
/// analytic RTP first
pub fn analytic_seeds<R: Rng>(
    catalog: &Catalog,
    config: &EvolutionConfig,
    target_rtp: f64,
    rng: &mut R,
) -> Vec<ReelSet> {
    let max_weight = config.bounds.max_weight;
    let mut sweep = alpha_sweep(catalog, max_weight);
    sweep.sort_by(|a, b| (a.1 - target_rtp).abs().total_cmp(&(b.1 - target_rtp).abs()));

    let mut chosen: Vec<Vec<u32>> = Vec::new();
    for (alpha, rtp) in sweep {
        let weights = analytic_weights(catalog, alpha, max_weight);
        if chosen.contains(&weights) {
            continue;
        }
        debug!("Analytic seed alpha={:.2} rtp={:.2}%", alpha, rtp);
        chosen.push(weights);
        if chosen.len() == config.analytic_seed_count {
            break;
        }
    }

    chosen
        .into_iter()
        .map(|weights| match config.representation {
            Representation::Weighted => ReelSet::uniform(Reel::Weighted(weights)),
            Representation::Strip => {
                let counts = apportion(&weights, config.seed_strip_len);
                ReelSet::uniform(Reel::Strip(strip_from_counts(&counts, rng)))
            }
        })
        .collect()
}

/// Full generation 0. Analytic seeds come first; the rest of the population
/// are mutations of them, strong with probability `strong_mutation_prob`.
pub fn seed_population<R: Rng>(
    catalog: &Catalog,
    config: &EvolutionConfig,
    target_rtp: f64,
    rng: &mut R,
) -> Vec<(ReelSet, Origin)> {
    let seeds = analytic_seeds(catalog, config, target_rtp, rng);
    let mut population: Vec<(ReelSet, Origin)> = seeds
        .iter()
        .take(config.population_size)
        .map(|reels| (reels.clone(), Origin::AnalyticSeed))
        .collect();

    let mut next = 0;
    while population.len() < config.population_size && !seeds.is_empty() {
        let parent = &seeds[next % seeds.len()];
        let strong = rng.gen_bool(config.strong_mutation_prob);
        let child = mutate_reel_set(parent, strong, config.reel_mode, config, catalog.len(), rng);
        population.push((child, Origin::SeedVariant));
        next += 1;
    }

    population
}
