use std::collections::HashSet;

use super::{paylines::standard_paylines, Payline, Symbol};
use crate::error::{ReelOptError, Result};
use crate::types::SymbolId;

/// Immutable registry of symbols and active paylines.
///
/// Built once and passed by reference to the evaluator, the reel operators and
/// the reporting code; tests can construct a smaller catalog with [`Catalog::new`].
#[derive(Debug, Clone)]
pub struct Catalog {
    symbols: Vec<Symbol>,
    paylines: Vec<Payline>,
}

impl Catalog {
    pub fn new(symbols: Vec<Symbol>, paylines: Vec<Payline>) -> Result<Self> {
        if symbols.len() < 2 {
            return Err(ReelOptError::InvalidCatalog(
                "Catalog needs at least 2 symbols".to_string(),
            ));
        }
        if symbols.len() > u8::MAX as usize {
            return Err(ReelOptError::InvalidCatalog(format!(
                "Catalog supports at most {} symbols, got {}",
                u8::MAX,
                symbols.len()
            )));
        }

        let mut names = HashSet::new();
        for symbol in &symbols {
            if !names.insert(symbol.name.as_str()) {
                return Err(ReelOptError::InvalidCatalog(format!(
                    "Duplicate symbol name: {}",
                    symbol.name
                )));
            }
            if symbol.payouts.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(ReelOptError::InvalidCatalog(format!(
                    "Symbol {} has a negative or non-finite payout",
                    symbol.name
                )));
            }
        }

        if paylines.is_empty() {
            return Err(ReelOptError::InvalidCatalog(
                "Catalog needs at least one payline".to_string(),
            ));
        }
        if let Some(line) = paylines.iter().find(|l| !l.is_valid()) {
            return Err(ReelOptError::InvalidCatalog(format!(
                "Payline {} references a row outside the window",
                line.name
            )));
        }

        Ok(Self { symbols, paylines })
    }

    /// Seven fruit-machine symbols on the standard 10 lines
    pub fn classic() -> Self {
        Self {
            symbols: classic_symbols(),
            paylines: standard_paylines(),
        }
    }

    /// Ten symbols on the standard 10 lines
    pub fn extended() -> Self {
        let mut symbols = classic_symbols();
        symbols.insert(4, Symbol::new("Grape", 6.0, 20.0, 60.0));
        symbols.insert(5, Symbol::new("Watermelon", 8.0, 25.0, 80.0));
        symbols.insert(8, Symbol::new("Diamond", 20.0, 75.0, 300.0));
        Self {
            symbols,
            paylines: standard_paylines(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn symbol_by_name(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|s| s.name == name)
            .map(|idx| SymbolId(idx as u8))
    }

    pub fn name(&self, id: SymbolId) -> &str {
        self.symbol(id).map(|s| s.name.as_str()).unwrap_or("?")
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        id.index() < self.symbols.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbols.len()).map(|idx| SymbolId(idx as u8))
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    /// Largest multiplier a single line can pay
    pub fn max_line_multiplier(&self) -> f64 {
        self.symbols
            .iter()
            .flat_map(|s| s.payouts.iter().copied())
            .fold(0.0, f64::max)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::classic()
    }
}

fn classic_symbols() -> Vec<Symbol> {
    vec![
        Symbol::new("Cherry", 2.0, 5.0, 10.0),
        Symbol::new("Lemon", 3.0, 8.0, 20.0),
        Symbol::new("Orange", 4.0, 10.0, 30.0),
        Symbol::new("Plum", 5.0, 15.0, 50.0),
        Symbol::new("Bell", 10.0, 30.0, 100.0),
        Symbol::new("Bar", 15.0, 50.0, 200.0),
        Symbol::new("Seven", 25.0, 100.0, 500.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_lookup() {
        let catalog = Catalog::classic();
        assert_eq!(catalog.len(), 7);
        let cherry = catalog.symbol_by_name("Cherry").unwrap();
        assert_eq!(catalog.name(cherry), "Cherry");
        assert!(catalog.symbol_by_name("Banana").is_none());
        assert_eq!(catalog.paylines().len(), 10);
    }

    #[test]
    fn test_seven_is_max_line_payout() {
        for catalog in [Catalog::classic(), Catalog::extended()] {
            let seven = catalog.symbol_by_name("Seven").unwrap();
            assert_eq!(
                catalog.symbol(seven).unwrap().payout5(),
                catalog.max_line_multiplier()
            );
        }
    }

    #[test]
    fn test_extended_has_ten_unique_symbols() {
        let catalog = Catalog::extended();
        assert_eq!(catalog.len(), 10);
        let rebuilt = Catalog::new(catalog.symbols().to_vec(), catalog.paylines().to_vec());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let symbols = vec![
            Symbol::new("A", 1.0, 2.0, 3.0),
            Symbol::new("A", 1.0, 2.0, 3.0),
        ];
        assert!(Catalog::new(symbols, standard_paylines()).is_err());
    }

    #[test]
    fn test_rejects_bad_payline() {
        let symbols = vec![
            Symbol::new("A", 1.0, 2.0, 3.0),
            Symbol::new("B", 1.0, 2.0, 3.0),
        ];
        let lines = vec![Payline::new("broken", [0, 1, 3, 1, 0])];
        assert!(Catalog::new(symbols.clone(), lines).is_err());
        assert!(Catalog::new(symbols, Vec::new()).is_err());
    }
}
