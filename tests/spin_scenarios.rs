use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reelopt::catalog::Catalog;
use reelopt::engines::evaluation::{evaluate_grid, SpinEvaluator};
use reelopt::engines::generation::{Reel, ReelSet};
use reelopt::types::{Grid, SymbolId};

/// Builds a grid from three rows of symbol names
fn grid(catalog: &Catalog, rows: [[&str; 5]; 3]) -> Grid {
    let id = |name: &str| catalog.symbol_by_name(name).unwrap();
    std::array::from_fn(|reel| std::array::from_fn(|row| id(rows[row][reel])))
}

const TOP: [&str; 5] = ["Lemon", "Orange", "Plum", "Bell", "Bar"];
const BOTTOM: [&str; 5] = ["Orange", "Lemon", "Bell", "Plum", "Seven"];

#[test]
fn test_three_cherries_on_middle_line() {
    let catalog = Catalog::extended();
    let grid = grid(
        &catalog,
        [TOP, ["Cherry", "Cherry", "Cherry", "Grape", "Lemon"], BOTTOM],
    );

    let (total, wins) = evaluate_grid(&catalog, &grid, 10.0);

    let cherry = catalog.symbol_by_name("Cherry").unwrap();
    assert_eq!(wins.len(), 1);
    assert_eq!(wins[0].line_index, 0);
    assert_eq!(wins[0].symbol, cherry);
    assert_eq!(wins[0].run_length, 3);
    let expected = 10.0 * catalog.symbol(cherry).unwrap().payout3();
    assert_eq!(wins[0].payout, expected);
    assert_eq!(total, expected);
}

#[test]
fn test_five_sevens_pay_the_top_line_prize() {
    let catalog = Catalog::extended();
    let grid = grid(&catalog, [TOP, ["Seven"; 5], BOTTOM]);

    let (total, wins) = evaluate_grid(&catalog, &grid, 10.0);

    let seven = catalog.symbol_by_name("Seven").unwrap();
    assert_eq!(wins.len(), 1);
    assert_eq!(wins[0].run_length, 5);
    assert_eq!(total, 10.0 * catalog.symbol(seven).unwrap().payout5());
}

#[test]
fn test_fixed_grid_evaluation_is_repeatable() {
    let catalog = Catalog::classic();
    let grid = grid(
        &catalog,
        [
            ["Cherry", "Cherry", "Cherry", "Cherry", "Bar"],
            ["Lemon", "Lemon", "Lemon", "Plum", "Bar"],
            ["Bell", "Cherry", "Bell", "Bell", "Bell"],
        ],
    );

    let first = evaluate_grid(&catalog, &grid, 3.0);
    for _ in 0..10 {
        assert_eq!(evaluate_grid(&catalog, &grid, 3.0), first);
    }
    assert!(first.1.len() >= 2);
}

#[test]
fn test_random_spins_never_pay_negative() {
    let catalog = Catalog::classic();
    let strip: Vec<SymbolId> = (0..catalog.len() as u8).cycle().take(21).map(SymbolId).collect();
    let configurations = [
        ReelSet::uniform(Reel::Weighted(vec![50, 20, 10, 8, 5, 3, 1])),
        ReelSet::uniform(Reel::Strip(strip)),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for reels in &configurations {
        let evaluator = SpinEvaluator::new(&catalog, reels).unwrap();
        for wager in [0.0, 0.5, 1.0, 25.0] {
            for _ in 0..500 {
                let outcome = evaluator.spin(wager, &mut rng);
                assert!(outcome.total_payout >= 0.0);
                let line_total: f64 = outcome.line_wins.iter().map(|w| w.payout).sum();
                assert_eq!(outcome.total_payout, line_total);
            }
        }
    }
}
