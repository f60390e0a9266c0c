use reelopt::config::{AppConfig, CatalogKind, SelectionMethod};
use reelopt::engines::generation::{
    EvolutionEngine, EvolutionHistory, Generation, Origin, ProgressCallback,
};
use reelopt::report::OptimizationReport;
use reelopt::types::{ReelMode, Representation};

/// Records what the engine reports
struct TestProgressCallback {
    started: Vec<usize>,
    best: Vec<f64>,
}

impl TestProgressCallback {
    fn new() -> Self {
        Self {
            started: Vec::new(),
            best: Vec::new(),
        }
    }
}

impl ProgressCallback for TestProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, generation: &Generation) {
        if let Some(best) = generation.best() {
            self.best.push(best.fitness());
        }
    }
}

fn quick_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.evolution.population_size = 12;
    config.evolution.generations = 6;
    config.evolution.elite_count = 3;
    config.evolution.seed = Some(seed);
    config.simulation.players = 15;
    config.simulation.spins_per_player = 60;
    config
}

fn run(config: &AppConfig) -> EvolutionHistory {
    EvolutionEngine::from_config(config)
        .unwrap()
        .run(TestProgressCallback::new())
        .unwrap()
}

fn assert_non_regressing(history: &EvolutionHistory) {
    let best = history.best_per_generation();
    assert_eq!(best.len(), history.len());
    for pair in best.windows(2) {
        assert!(pair[1] <= pair[0], "best fitness regressed: {:?}", best);
    }
}

#[test]
fn test_weighted_uniform_run() {
    let history = run(&quick_config(10));
    assert_eq!(history.len(), 6);
    assert_non_regressing(&history);

    let best = history.best().unwrap();
    assert!(best.reels().is_uniform());
    assert!(best.fitness().is_finite());
}

#[test]
fn test_strip_independent_tournament_run() {
    let mut config = quick_config(11);
    config.evolution.representation = Representation::Strip;
    config.evolution.reel_mode = ReelMode::Independent;
    config.evolution.selection_method = SelectionMethod::Tournament;
    config.evolution.catalog = CatalogKind::Extended;

    let history = run(&config);
    assert_non_regressing(&history);
    let catalog = CatalogKind::Extended.build();
    for generation in history.generations() {
        for individual in generation.individuals() {
            assert!(individual.reels().satisfies(catalog.len(), &config.evolution.bounds));
        }
    }
}

#[test]
fn test_play_to_target_run() {
    let mut config = quick_config(12);
    config.simulation.stop_policy = reelopt::types::StopPolicy::PlayToTarget;
    config.simulation.max_spins_per_session = 300;
    let history = run(&config);
    assert_non_regressing(&history);
}

#[test]
fn test_elites_are_carried_unchanged() {
    let config = quick_config(13);
    let history = run(&config);

    for n in 0..history.len() - 1 {
        let previous = history.generation(n).unwrap();
        let next = history.generation(n + 1).unwrap();
        let carried: Vec<_> = next
            .individuals()
            .iter()
            .filter(|i| i.origin() == Origin::Elite)
            .collect();
        assert_eq!(carried.len(), config.evolution.elite_count);

        for source in previous.individuals().iter().take(config.evolution.elite_count) {
            assert!(carried
                .iter()
                .any(|e| e.reels() == source.reels() && e.fitness() == source.fitness()));
        }
    }
}

#[test]
fn test_callback_sees_every_generation() {
    let config = quick_config(14);
    let mut callback = TestProgressCallback::new();
    let history = {
        let mut engine = EvolutionEngine::from_config(&config).unwrap();
        engine.run(&mut callback).unwrap()
    };
    assert_eq!(callback.started, (0..6).collect::<Vec<_>>());
    assert_eq!(callback.best, history.best_per_generation());
}

#[test]
fn test_report_from_history() {
    let config = quick_config(15);
    let mut engine = EvolutionEngine::from_config(&config).unwrap();
    let history = engine.run(TestProgressCallback::new()).unwrap();

    let report = OptimizationReport::build(engine.catalog(), &config, &history).unwrap();
    assert_eq!(report.reels.len(), 5);
    assert_eq!(report.best_per_generation.len(), 6);
    assert!(report.weight_table.contains("REEL_WEIGHTS"));
    let text = report.render_text();
    assert_eq!(text, format!("{}", report));
    assert!(text.contains("=== Statistics ==="));
    assert!(text.contains("Highest balance:"));
    assert!(text.ends_with(&report.weight_table));
    let json = report.to_json().unwrap();
    assert!(json.contains("\"analytic_rtp\""));
}
