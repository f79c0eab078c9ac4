use std::io;

use chainmap::{DemoConfig, demo, logger};
use log::error;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::initialize_logger();

    let config = DemoConfig::from_env().inspect_err(|err| error!("invalid configuration: {err}"))?;

    let stdout = io::stdout();
    demo::run(&config, &mut stdout.lock())?;

    Ok(())
}
