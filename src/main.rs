//! robotio: host entry point.
//!
//! ```text
//! robotio [CONFIG.json | -] [STATE ...]
//! ```
//!
//! Brings the board up from the config file (or `ROBOTIO_CONFIG`, or
//! built-in defaults when neither is given or the argument is `-`), shows
//! each STATE on the status output for `ROBOTIO_HOLD_MS` milliseconds,
//! then shuts down cleanly.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │   SimBoard / RpiBoard          LogEventSink          │
//! │   (GpioPort + PwmPort)         (EventSink)           │
//! │  ──────────────── Port Trait Boundary ────────────   │
//! │   ┌──────────────────────────────────────────────┐   │
//! │   │ Board: PinRegistry · StatusPatternController │   │
//! │   └──────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use robotio::{Board, BoardConfig, LogEventSink};

const DEFAULT_HOLD_MS: u64 = 2_000;

fn load_config(arg: Option<&str>) -> Result<BoardConfig> {
    let path = match arg {
        Some("-") => None,
        Some(path) => Some(path.to_owned()),
        None => std::env::var("ROBOTIO_CONFIG").ok(),
    };
    match path {
        Some(path) => {
            let config = BoardConfig::load(&path)
                .with_context(|| format!("loading board config from {path}"))?;
            info!("Config loaded from {}", path);
            Ok(config)
        }
        None => {
            info!("No config given, using defaults");
            Ok(BoardConfig::default())
        }
    }
}

fn hold_duration() -> Duration {
    let ms = std::env::var("ROBOTIO_HOLD_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HOLD_MS);
    Duration::from_millis(ms)
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("robotio v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let states = args.iter().skip(1);

    // ── 3. Hardware adapter ───────────────────────────────────
    #[cfg(feature = "rpi")]
    let mut hw = robotio::adapters::rpi::RpiBoard::new(config.numbering_mode)
        .context("opening Raspberry Pi GPIO")?;
    #[cfg(not(feature = "rpi"))]
    let mut hw = robotio::SimBoard::new(config.numbering_mode);

    // ── 4. Bring-up ───────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut board = Board::bring_up(&mut hw, &config, &mut sink).context("board bring-up")?;

    // ── 5. Requested states ───────────────────────────────────
    let hold = hold_duration();
    for name in states {
        if board.set_named_state(&mut hw, name, &mut sink).is_ok() {
            std::thread::sleep(hold);
        }
    }

    for (pin, direction) in board.registry().configured_pins() {
        let level = board.registry().read_level_or_low(&mut hw, pin);
        info!("pin {} ({}) reads {}", pin, direction, if level { "HIGH" } else { "LOW" });
    }

    // ── 6. Shutdown ───────────────────────────────────────────
    if let Err(e) = board.shutdown(&mut hw, &mut sink) {
        warn!("Shutdown incomplete: {}", e);
    }
    Ok(())
}
