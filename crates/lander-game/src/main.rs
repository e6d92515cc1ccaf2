//! Headless lander runner.
//!
//! Loads `config.ron`, applies CLI overrides, and flies a level session for a
//! fixed number of ticks, optionally driven by a RON flight script. Level
//! transitions are acknowledged automatically unless disabled in the config.
//!
//! Run with: `cargo run -p lander-game -- --seed 7 --script flight.ron`

use std::process::ExitCode;

use clap::Parser;
use lander_config::{CliArgs, Config, default_config_dir};
use lander_game::{FlightScript, LevelSession, LogHooks, RunError, SessionEvent, SessionState};
use tracing::{error, info, trace, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let (mut config, config_error) = match config_dir.as_deref().map(Config::load_or_create) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (Config::default(), Some(e)),
        None => (Config::default(), None),
    };
    config.apply_cli_overrides(&args);

    lander_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    if let Some(e) = config_error {
        warn!("Config unusable, running with defaults: {e}");
    }

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, config: Config) -> Result<(), RunError> {
    let script = match &args.script {
        Some(path) => {
            let script = FlightScript::load(path)?;
            info!(
                "Loaded flight script {} ({} entries)",
                path.display(),
                script.entries().len()
            );
            script
        }
        None => FlightScript::default(),
    };

    let seed = config.session.seed.unwrap_or_else(rand::random);
    let max_ticks = config.session.max_ticks;
    let auto_acknowledge = config.session.auto_acknowledge;

    let mut session = LevelSession::new(config, seed, Box::new(LogHooks))?;
    let (mut wins, mut losses) = (0u32, 0u32);

    for tick in 0..max_ticks {
        for event in script.events_at(tick) {
            session.handle_control(event);
        }

        for event in session.tick() {
            match event {
                SessionEvent::Won { .. } => wins += 1,
                SessionEvent::Lost { .. } => losses += 1,
                _ => {}
            }
        }
        let pose = session.camera_pose();
        trace!(tick, eye = %pose.eye, target = %pose.target, "Camera");

        if let SessionState::LevelTransition(_) = session.state() {
            if !auto_acknowledge {
                break;
            }
            session.acknowledge()?;
        }
    }

    info!(
        seed,
        ticks = session.ticks(),
        level = session.level(),
        wins,
        losses,
        "Run finished"
    );
    println!("{}", session.hud().status_line());
    Ok(())
}
