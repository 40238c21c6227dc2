//! fanctl: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SysfsTemperatureSensor   FanDriver<GpioLine>   LogEventSink │
//! │  (TemperatureSource)      (Actuator)            (EventSink)  │
//! │  JsonConfigAdapter (ConfigPort)                              │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │           ControlLoop (pure logic)                   │    │
//! │  │  Thresholds · FanState                               │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! │                                                              │
//! │  Shutdown (SIGINT / SIGTERM / SIGHUP)                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use fanctl::adapters::config_file::JsonConfigAdapter;
use fanctl::adapters::log_sink::LogEventSink;
use fanctl::app::ports::ConfigPort;
use fanctl::app::service::ControlLoop;
use fanctl::drivers::fan::FanDriver;
use fanctl::drivers::gpio::GpioLine;
use fanctl::sensors::SysfsTemperatureSensor;
use fanctl::shutdown::{self, Shutdown};

fn main() -> Result<()> {
    // ── 1. Configuration ──────────────────────────────────────
    let config = JsonConfigAdapter::from_env()
        .load()
        .context("invalid controller configuration")?;

    // ── 2. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();
    info!("fanctl v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "sensor={} chip={} line={} consumer={}",
        config.sensor_path.display(),
        config.chip,
        config.line,
        config.consumer
    );

    let mut control = ControlLoop::from_config(&config)?;

    // ── 3. Shutdown wiring ────────────────────────────────────
    let shutdown = Shutdown::new();
    shutdown::install_signal_handlers(&shutdown)
        .context("could not install signal handlers")?;

    // ── 4. Hardware ───────────────────────────────────────────
    // Chip failure aborts before any line is touched; line failure drops
    // only the chip.  From here on `fan` switches off on every exit path.
    let mut sensor = SysfsTemperatureSensor::new(&config.sensor_path);
    let line = GpioLine::acquire(&config.line_identity())?;
    let mut fan = FanDriver::new(line).context("could not initialise fan output")?;
    let mut sink = LogEventSink::new();

    // ── 5. Control loop ───────────────────────────────────────
    control.run(&mut sensor, &mut fan, &mut sink, &shutdown);

    // ── 6. Fail-safe release ──────────────────────────────────
    fan.release();
    Ok(())
}
