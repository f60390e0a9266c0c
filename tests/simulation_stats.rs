use std::sync::Arc;

use reelopt::catalog::Catalog;
use reelopt::config::SimulationConfig;
use reelopt::engines::evaluation::PopulationSimulator;
use reelopt::engines::generation::{Reel, ReelSet};
use reelopt::engines::metrics::analytic_rtp;
use reelopt::types::{StopPolicy, SymbolId, WinTier};

fn simulator(config: SimulationConfig) -> PopulationSimulator {
    PopulationSimulator::new(Arc::new(Catalog::classic()), config).unwrap()
}

#[test]
fn test_aggregates_are_consistent() {
    let sim = simulator(SimulationConfig {
        players: 100,
        spins_per_player: 200,
        ..Default::default()
    });
    let reels = ReelSet::uniform(Reel::Weighted(vec![45, 30, 20, 12, 6, 3, 1]));

    for seed in 0..5 {
        let report = sim.run_seeded(&reels, seed).unwrap();
        let stats = report.stats();

        let rtp = stats.total_paid / stats.total_wagered * 100.0;
        assert!((report.rtp_pct() - rtp).abs() < 1e-9);
        assert_eq!(stats.tier_total(), stats.wins);
        assert!(stats.pushes + stats.net_wins <= stats.wins);

        let tier_rates: f64 = [WinTier::Small, WinTier::Medium, WinTier::Big, WinTier::Jackpot]
            .into_iter()
            .map(|t| report.tier_rate_pct(t))
            .sum();
        assert!((tier_rates - report.win_rate_pct()).abs() < 1e-9);
        assert!((report.house_profit() - (stats.total_wagered - stats.total_paid)).abs() < 1e-9);
    }
}

#[test]
fn test_simulated_rtp_tracks_analytic_value() {
    // Rich bankrolls keep every player spinning, so the sample is the full
    // players x spins grid
    let sim = simulator(SimulationConfig {
        players: 200,
        spins_per_player: 500,
        starting_balance: 10_000.0,
        ..Default::default()
    });
    let reels = ReelSet::uniform(Reel::Weighted(vec![60, 30, 20, 10, 4, 2, 1]));
    let expected = analytic_rtp(sim.catalog(), &reels);

    let report = sim.run_seeded(&reels, 2024).unwrap();
    assert_eq!(report.stats().spins, 200 * 500);
    let tolerance = expected * 0.15 + 2.0;
    assert!(
        (report.rtp_pct() - expected).abs() < tolerance,
        "simulated {:.2} vs analytic {:.2}",
        report.rtp_pct(),
        expected
    );
}

#[test]
fn test_strip_and_weighted_agree_analytically() {
    let catalog = Catalog::classic();
    let strip: Vec<SymbolId> = [0u8, 0, 0, 1, 1, 2, 3, 4, 5, 6]
        .into_iter()
        .map(SymbolId)
        .collect();
    let strip_rtp = analytic_rtp(&catalog, &ReelSet::uniform(Reel::Strip(strip)));
    let weighted_rtp = analytic_rtp(
        &catalog,
        &ReelSet::uniform(Reel::Weighted(vec![3, 2, 1, 1, 1, 1, 1])),
    );
    assert!((strip_rtp - weighted_rtp).abs() < 1e-9);
}

#[test]
fn test_play_to_target_sessions_end() {
    let sim = simulator(SimulationConfig {
        players: 50,
        starting_balance: 20.0,
        win_threshold: 1.5,
        stop_policy: StopPolicy::PlayToTarget,
        max_spins_per_session: 2_000,
        ..Default::default()
    });
    let reels = ReelSet::uniform(Reel::Weighted(vec![40, 25, 15, 10, 5, 3, 2]));
    let report = sim.run_seeded(&reels, 77).unwrap();
    let stats = report.stats();

    assert_eq!(stats.players, 50);
    assert!(stats.spins <= 50 * 2_000);
    assert_eq!(stats.bankruptcies + stats.cash_outs + stats.still_playing, 50);
    assert!(report.bankrupt_pct() + report.cash_out_pct() <= 100.0 + 1e-9);
}

#[test]
fn test_zero_players_rejected_at_entry() {
    let config = SimulationConfig {
        players: 0,
        ..Default::default()
    };
    let err = PopulationSimulator::new(Arc::new(Catalog::classic()), config)
        .err()
        .unwrap();
    assert!(err.to_string().contains("player"));
}
