use log::info;

use super::evolution_engine::ProgressCallback;
use super::history::Generation;

/// Logs a progress line every `report_every` generations and on the last one
pub struct ConsoleProgressCallback {
    report_every: usize,
    total: usize,
}

impl ConsoleProgressCallback {
    pub fn new(report_every: usize, total: usize) -> Self {
        Self {
            report_every: report_every.max(1),
            total,
        }
    }

    fn should_report(&self, generation: usize) -> bool {
        generation % self.report_every == 0 || generation + 1 == self.total
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: &Generation) {
        if !self.should_report(generation.index()) {
            return;
        }
        if let Some(best) = generation.best() {
            let report = best.report();
            info!(
                "Gen {:>4}/{}: best fitness {:.4}, RTP {:.2}%, win rate {:.2}%, house profit {:.2}",
                generation.index(),
                self.total.saturating_sub(1),
                best.fitness(),
                report.rtp_pct(),
                report.win_rate_pct(),
                report.house_profit()
            );
        }
    }
}

/// Discards all progress
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: &Generation) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_on_interval_and_last_generation() {
        let callback = ConsoleProgressCallback::new(5, 12);
        let reported: Vec<usize> = (0..12).filter(|&g| callback.should_report(g)).collect();
        assert_eq!(reported, vec![0, 5, 10, 11]);
    }
}
