use anyhow::Context;
use clap::Parser;
use log::info;
use reelopt::cli::{Args, OutputFormat};
use reelopt::config::ConfigManager;
use reelopt::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use reelopt::report::OptimizationReport;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut manager = ConfigManager::load(args.config.as_deref())
        .context("failed to load configuration")?;
    manager
        .update(|config| args.apply(config))
        .context("invalid configuration")?;

    if let Some(path) = &args.save_config {
        manager
            .save_to_file(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Saved configuration to {}", path.display());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let config = manager.get();
    let mut engine = EvolutionEngine::from_config(config)?;
    let progress = ConsoleProgressCallback::new(
        config.evolution.report_every,
        config.evolution.generations,
    );
    let history = engine.run(progress)?;

    let report = OptimizationReport::build(engine.catalog(), config, &history)?;
    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
