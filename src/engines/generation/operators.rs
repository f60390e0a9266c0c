use crate::config::{EvolutionConfig, ReelBounds};
use crate::engines::generation::genome::{Reel, ReelSet};
use crate::engines::generation::history::Individual;
use crate::types::{ReelMode, SymbolId, REEL_COUNT, ROW_COUNT};
use rand::seq::index::sample;
use rand::Rng;

/// Tournament selection over a ranked population: lowest fitness of K random picks
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual {
    let mut best = &population[rng.gen_range(0..population.len())];

    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        if candidate.fitness() < best.fitness() {
            best = candidate;
        }
    }

    best
}

/// Uniform pick from the best `1/denominator` of a population sorted ascending
pub fn truncation_selection<'a, R: Rng>(
    ranked: &'a [Individual],
    denominator: usize,
    rng: &mut R,
) -> &'a Individual {
    let pool = ranked.len().div_ceil(denominator.max(1)).max(1);
    &ranked[rng.gen_range(0..pool)]
}

pub fn random_symbol<R: Rng>(symbols: usize, rng: &mut R) -> SymbolId {
    SymbolId(rng.gen_range(0..symbols) as u8)
}

/// Mutate one reel. Never removes the last instance of a symbol and never
/// produces a zero weight.
pub fn mutate_reel<R: Rng>(
    reel: &Reel,
    strong: bool,
    config: &EvolutionConfig,
    symbols: usize,
    rng: &mut R,
) -> Reel {
    match reel {
        Reel::Strip(strip) => {
            let edits = if strong {
                rng.gen_range(config.strong_edits_min..=config.strong_edits_max)
            } else {
                1
            };
            let mut strip = strip.clone();
            mutate_strip(&mut strip, edits, symbols, &config.bounds, rng);
            Reel::Strip(strip)
        }
        Reel::Weighted(weights) => {
            let (rate, pct) = if strong {
                ((config.mutation_rate * 2.0).min(1.0), (config.perturbation_pct * 2.0).min(0.9))
            } else {
                (config.mutation_rate, config.perturbation_pct)
            };
            let mut weights = weights.clone();
            perturb_weights(&mut weights, rate, pct, symbols, config.bounds.max_weight, rng);
            Reel::Weighted(weights)
        }
    }
}

/// Apply `edits` replace/append/remove edits followed by the repair pass
pub fn mutate_strip<R: Rng>(
    strip: &mut Vec<SymbolId>,
    edits: usize,
    symbols: usize,
    bounds: &ReelBounds,
    rng: &mut R,
) {
    let min_len = bounds.min_strip_len.max(ROW_COUNT);

    for _ in 0..edits {
        if strip.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..strip.len());
        match rng.gen_range(0..3) {
            0 => strip[idx] = random_symbol(symbols, rng),
            1 => {
                if strip.len() < bounds.max_strip_len {
                    strip.push(random_symbol(symbols, rng));
                } else {
                    strip[idx] = random_symbol(symbols, rng);
                }
            }
            _ => {
                let target = strip[idx];
                let count = strip.iter().filter(|&&s| s == target).count();
                if count > 1 && strip.len() > min_len {
                    strip.remove(idx);
                }
            }
        }
    }

    repair_strip(strip, symbols, bounds, rng);
}

/// Restore every missing symbol and the minimum length.
///
/// Runs after every strip mutation, normal or strong, since a replace edit can
/// overwrite the last copy of a symbol.
pub fn repair_strip<R: Rng>(
    strip: &mut Vec<SymbolId>,
    symbols: usize,
    bounds: &ReelBounds,
    rng: &mut R,
) {
    let mut counts = vec![0usize; symbols];
    for id in strip.iter() {
        counts[id.index()] += 1;
    }

    for missing in 0..symbols {
        if counts[missing] > 0 {
            continue;
        }
        let id = SymbolId(missing as u8);
        if strip.len() < bounds.max_strip_len {
            strip.push(id);
        } else {
            // Full strip: overwrite a position whose symbol has spare copies
            let spare: Vec<usize> = (0..strip.len())
                .filter(|&pos| counts[strip[pos].index()] > 1)
                .collect();
            if spare.is_empty() {
                strip.push(id);
            } else {
                let pos = spare[rng.gen_range(0..spare.len())];
                counts[strip[pos].index()] -= 1;
                strip[pos] = id;
            }
        }
        counts[missing] += 1;
    }

    let min_len = bounds.min_strip_len.max(ROW_COUNT);
    while strip.len() < min_len {
        strip.push(random_symbol(symbols, rng));
    }
}

/// Perturb each weight with probability `rate` by up to ±`pct`, clamped to
/// `[1, max_weight]`. At least one weight is perturbed per call.
pub fn perturb_weights<R: Rng>(
    weights: &mut Vec<u32>,
    rate: f64,
    pct: f64,
    symbols: usize,
    max_weight: u32,
    rng: &mut R,
) {
    weights.resize(symbols, 1);

    let mut touched = false;
    for weight in weights.iter_mut() {
        if rng.gen_bool(rate) {
            *weight = perturb(*weight, pct, max_weight, rng);
            touched = true;
        }
    }
    if !touched && !weights.is_empty() {
        let idx = rng.gen_range(0..weights.len());
        weights[idx] = perturb(weights[idx], pct, max_weight, rng);
    }

    for weight in weights.iter_mut() {
        *weight = (*weight).clamp(1, max_weight);
    }
}

fn perturb<R: Rng>(weight: u32, pct: f64, max_weight: u32, rng: &mut R) -> u32 {
    let delta = rng.gen_range(-pct..=pct);
    let value = (weight as f64 * (1.0 + delta))
        .round()
        .clamp(1.0, max_weight as f64) as u32;
    if value != weight {
        return value;
    }
    // Small weights and weights sitting on a bound would otherwise never move
    if (delta < 0.0 && weight > 1) || weight >= max_weight {
        weight.saturating_sub(1).max(1)
    } else {
        (weight + 1).min(max_weight)
    }
}

/// Mutate a whole configuration.
///
/// Uniform mode mutates one reel and copies it to every position. Independent
/// mode mutates 1–2 reels (2–4 when strong) and deep-copies the rest.
pub fn mutate_reel_set<R: Rng>(
    reels: &ReelSet,
    strong: bool,
    mode: ReelMode,
    config: &EvolutionConfig,
    symbols: usize,
    rng: &mut R,
) -> ReelSet {
    match mode {
        ReelMode::Uniform => {
            let base = &reels.reels()[0];
            ReelSet::uniform(mutate_reel(base, strong, config, symbols, rng))
        }
        ReelMode::Independent => {
            let count = if strong {
                rng.gen_range(2..=4)
            } else {
                rng.gen_range(1..=2)
            };
            let mut next = reels.clone().into_reels();
            for idx in sample(rng, REEL_COUNT, count).into_iter() {
                next[idx] = mutate_reel(&next[idx], strong, config, symbols, rng);
            }
            ReelSet::new(next)
        }
    }
}

/// Per-symbol crossover of two weighted reels: take A, take B, or the rounded
/// average. Strip reels have no crossover and return a copy of `a`.
pub fn crossover_reel<R: Rng>(
    a: &Reel,
    b: &Reel,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Reel {
    match (a, b) {
        (Reel::Weighted(wa), Reel::Weighted(wb)) if wa.len() == wb.len() => {
            let child = wa
                .iter()
                .zip(wb)
                .map(|(&x, &y)| {
                    let roll: f64 = rng.gen();
                    if roll < config.crossover_take_a {
                        x
                    } else if roll < config.crossover_take_a + config.crossover_take_b {
                        y
                    } else {
                        let avg = ((x as f64 + y as f64) / 2.0).round() as u32;
                        avg.clamp(1, config.bounds.max_weight)
                    }
                })
                .collect();
            Reel::Weighted(child)
        }
        _ => a.clone(),
    }
}

pub fn crossover_reel_set<R: Rng>(
    a: &ReelSet,
    b: &ReelSet,
    mode: ReelMode,
    config: &EvolutionConfig,
    rng: &mut R,
) -> ReelSet {
    match mode {
        ReelMode::Uniform => {
            ReelSet::uniform(crossover_reel(&a.reels()[0], &b.reels()[0], config, rng))
        }
        ReelMode::Independent => {
            let (ra, rb) = (a.reels(), b.reels());
            let mut reels = a.clone().into_reels();
            for (idx, reel) in reels.iter_mut().enumerate() {
                *reel = crossover_reel(&ra[idx], &rb[idx], config, rng);
            }
            ReelSet::new(reels)
        }
    }
}
