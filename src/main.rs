use anyhow::Result;
use clap::Parser;
use expanse_lib::app::App;
use expanse_lib::model::config::AppConfig;
use expanse_lib::model::metrics::init_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 6000)]
    ticks: u64,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Load the primary save before running
    #[arg(long)]
    resume: bool,

    /// Save to the primary save path on exit
    #[arg(long)]
    save: bool,

    /// Write the final snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config);
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }

    let mut app = if args.resume {
        App::resume(config)?
    } else {
        App::with_config(config)?
    };

    let start_tick = app.world.tick();
    app.run_for(args.ticks);

    let m = app.world.metrics();
    tracing::info!(
        from = start_tick,
        to = app.world.tick(),
        lesser = m.lesser,
        curious = m.curious,
        followers = m.followers,
        rust = m.rust_hazards,
        gray = m.gray_hazards,
        mean_trust = m.mean_trust,
        mean_step_us = app.metrics.mean_step().as_micros() as u64,
        "Run finished"
    );
    if let Some(err) = &app.world.last_persistence_error {
        tracing::warn!(error = %err, "Last autosave failed");
    }

    if args.save {
        app.save()?;
        tracing::info!(path = %app.world.config.persistence.save_path, "World saved");
    }
    if let Some(path) = &args.snapshot {
        app.write_snapshot(path)?;
        tracing::info!(path = %path.display(), "Snapshot written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["expanse"]).unwrap();
        assert_eq!(args.config, "config.toml");
        assert_eq!(args.ticks, 6000);
        assert!(args.seed.is_none());
        assert!(!args.resume && !args.save);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "expanse", "--ticks", "10", "--seed", "7", "--resume", "--snapshot", "out.json",
        ])
        .unwrap();
        assert_eq!(args.ticks, 10);
        assert_eq!(args.seed, Some(7));
        assert!(args.resume);
        assert_eq!(args.snapshot, Some(PathBuf::from("out.json")));
    }
}
