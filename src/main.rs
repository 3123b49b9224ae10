//! Lattice Gas headless runner
//!
//! Usage: `lattice-gas [settings.json]`. Without a settings file the default
//! 1000x600 scene is run. Set `RUST_LOG=debug` for per-step counters.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> lattice_gas::Result<()> {
    use lattice_gas::{LatticeGas, Settings};

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };

    log::info!("Lattice Gas starting...");
    let mut gas = LatticeGas::new(settings.scene.clone(), settings.seed)?;
    gas.initialize()?;

    for _ in 0..settings.steps {
        gas.step()?;
        if settings.report_every > 0 && gas.step_count() % settings.report_every == 0 {
            let stats = gas.last_stats();
            let momentum = gas.momentum();
            log::info!(
                "Step {}: {} particles, momentum ({:.1}, {:.1}), absorbed {}, injected {}",
                gas.step_count(),
                gas.particle_count(),
                momentum.x,
                momentum.y,
                stats.propagation.absorbed,
                stats.injected
            );
        }
    }

    println!("Simulation ended.");
    println!("Total particles: {}", gas.particle_count());
    println!("Total steps: {}", gas.step_count());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is driven by the host page on wasm; nothing to run here
}
