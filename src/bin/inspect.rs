use anyhow::Result;
use clap::Parser;
use expanse_lib::model::config::AppConfig;
use expanse_lib::model::persistence::LoadOutcome;
use expanse_lib::model::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect an Expanse save file", long_about = None)]
struct Args {
    /// Save document to inspect (plain or gzip JSON)
    save: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match World::load(&args.save, &AppConfig::default())? {
        LoadOutcome::Missing => {
            println!("No save file at {}", args.save);
            std::process::exit(2);
        }
        LoadOutcome::Corrupt(reason) => {
            println!("Save file {} is corrupt: {}", args.save, reason);
            std::process::exit(1);
        }
        LoadOutcome::Loaded(world) => {
            let m = world.metrics();
            println!("Save file: {}", args.save);
            println!("Tick: {} ({:.1}s)", world.tick(), world.clock.elapsed_seconds());
            println!("World: {} x {}", world.width, world.height);
            println!(
                "Entities: {} (lesser {}, curious {}, followers {})",
                m.population(),
                m.lesser,
                m.curious,
                m.followers
            );
            println!("Hazards: rust {}, gray {}", m.rust_hazards, m.gray_hazards);
            println!(
                "Events: questions {}, resonances {}",
                m.questions, m.resonances
            );
            println!("Mean trust: {:.4}", m.mean_trust);
            for d in &world.deities {
                println!(
                    "  {:<10} {:<12} trust {:>8.4}  followers {:>4}  active {}",
                    d.name,
                    d.domain,
                    d.aggregate_trust,
                    d.nearby_followers,
                    d.activation_ticks
                );
            }
            println!("History samples: {}", world.history.len());
        }
    }

    Ok(())
}
