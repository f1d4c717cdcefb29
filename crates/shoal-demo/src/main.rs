use anyhow::Result;

use shoal_engine::device::{GpuInit, InitError};
use shoal_engine::logging::{LoggingConfig, init_logging};
use shoal_engine::scene::{AquariumConfig, FishTank};
use shoal_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = AquariumConfig::default();
    log::info!("starting shoal with {} background fish", config.school_size);

    let result = Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        FishTank::new(config),
    );

    if let Err(err) = &result {
        if let Some(init) = err.downcast_ref::<InitError>() {
            if init.is_unsupported() {
                // Plain message instead of an error chain.
                eprintln!("{init}");
                std::process::exit(1);
            }
        }
    }

    result
}
