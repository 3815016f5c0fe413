//! Sandstep - headless movement demo.
//!
//! Runs an owning peer and an observing peer side by side. The owner plays a
//! scripted input sequence; each frame its snapshots are encoded, decoded and
//! applied to the observer's proxy of the same character.
//!
//! Pass a JSON config path as the first argument to override the defaults.
//! `RUST_LOG=debug` shows crouch and jump transitions.

use std::collections::BTreeMap;
use std::error::Error;

use sandstep_game::replication::{decode, encode};
use sandstep_game::{
    Authority, Button, ButtonSet, CrosshairOffsets, CrosshairSignals, Level, PlayerInput, Simulation,
    SimulationConfig,
};

/// Frames to simulate (five seconds at the default rate).
const FRAMES: u64 = 300;

/// Fire delay of the pretend weapon, in seconds.
const FIRE_DELAY: f32 = 0.1;

/// Input for `frame` of the script.
fn scripted_input(frame: u64) -> PlayerInput {
    let buttons = match frame {
        0..=59 => ButtonSet::of(&[Button::Forward, Button::Run]),
        60 => ButtonSet::of(&[Button::Forward, Button::Run, Button::Jump]),
        61..=119 => ButtonSet::of(&[Button::Forward]),
        120..=179 => ButtonSet::of(&[Button::Forward, Button::Duck]),
        180..=239 => ButtonSet::of(&[Button::Left]),
        _ => ButtonSet::EMPTY,
    };

    let input = PlayerInput::new(buttons);
    if (180..240).contains(&frame) {
        input.looking(0.0, 0.03)
    } else {
        input
    }
}

fn load_config() -> Result<SimulationConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = SimulationConfig::from_json(&json)?;
            log::info!("loaded config from {}", path);
            Ok(config)
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let frame_delta = config.frame_delta();

    let mut owner = Simulation::new(config.clone(), Level::test_arena());
    let mut observer = Simulation::new(config, Level::test_arena());

    let id = owner.spawn(Authority::Owner)?;
    let proxy_id = observer.spawn(Authority::Proxy)?;
    if id != proxy_id {
        return Err(format!("peers disagree on the character id ({} vs {})", id, proxy_id).into());
    }

    let mut crosshair = CrosshairOffsets::default();
    let mut bytes_sent = 0;
    let mut snapshots_sent = 0;

    for frame in 0..FRAMES {
        owner.tick(&BTreeMap::from([(id, scripted_input(frame))]));

        for (entity, snapshot) in owner.snapshots() {
            let bytes = encode(&snapshot)?;
            bytes_sent += bytes.len();
            snapshots_sent += 1;
            observer.apply_snapshot(entity, &decode(&bytes)?)?;
        }
        observer.tick(&BTreeMap::new());

        let Some(character) = owner.character(id) else {
            break;
        };

        if frame % 45 == 0 {
            crosshair.on_shoot(FIRE_DELAY);
        }
        crosshair.tick(&CrosshairSignals::armed(character.state()), frame_delta);

        if frame % 30 == 0 {
            let replicated = character.state().replicated();
            log::info!(
                "frame {:3}: pos={:?} speed={:6.1} ground={} crouch={} run={} bars.left={}",
                frame,
                character.position(),
                character.velocity().length(),
                character.is_on_ground(),
                replicated.is_crouching(),
                replicated.is_running(),
                crosshair.bars.left,
            );
        }
    }

    if let (Some(character), Some(proxy)) = (owner.character(id), observer.character(id)) {
        let divergence = (character.position() - proxy.position()).length();
        log::info!(
            "done: owner at {:?}, proxy at {:?} (divergence {:.4})",
            character.position(),
            proxy.position(),
            divergence
        );

        if let Some(animation) = proxy.animation() {
            log::info!(
                "proxy animation: duck_level={} grounded={} updates={}",
                animation.params.duck_level,
                animation.params.grounded,
                animation.updates
            );
        }
    }
    log::info!(
        "sent {} snapshots, {} bytes ({:.1} bytes/snapshot)",
        snapshots_sent,
        bytes_sent,
        bytes_sent as f32 / snapshots_sent.max(1) as f32
    );

    Ok(())
}
