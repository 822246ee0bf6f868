//! Horse Rush entry point
//!
//! Native builds run a headless session: a scripted skill check followed by
//! an autopilot race, logging the HUD and printing the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random::<u64>);
    log::info!("Horse Rush (native) starting, seed {}", seed);

    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives `horse_rush::sim::Session` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use horse_rush::Settings;
    use horse_rush::consts::{BURST_RANGE, TRACK_LENGTH};
    use horse_rush::renderer::{DialView, RaceView};
    use horse_rush::sim::{Session, SessionMode, SessionPhase, result_text};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on the skill check after this many frames without a hit
    const MAX_DIAL_FRAMES: u32 = 600;
    const MAX_RACE_FRAMES: u32 = 60 * 600;

    pub fn run(seed: u64) {
        let settings = Settings::default();
        let dial = DialView::new(320.0, 320.0, settings.clone());
        let mut view = RaceView::new(800.0, 280.0, settings.clone());
        let mut session = Session::new(seed);

        session.start(SessionMode::Race);

        // Tap the first time the needle is over the target
        for _ in 0..MAX_DIAL_FRAMES {
            session.frame(FRAME_DT);
            let snapshot = session.skill_snapshot();
            dial.render(&snapshot);
            if snapshot.target.contains_angle(snapshot.pointer_angle) {
                session.tap();
                break;
            }
        }
        if let Some(outcome) = session.finish_skill_check() {
            println!("Skill check: {}%", outcome.percent());
        }

        let mut last_report = 0;
        for _ in 0..MAX_RACE_FRAMES {
            if let Some(hud) = session.hud() {
                // Sprint while fresh, coast to recover
                let throttle = if hud.stamina > 30.0 { 1.0 } else { 0.0 };
                session.set_throttle(throttle);
            }
            let snapshot = session.race_snapshot();
            if let Some(player) = snapshot.competitors.iter().find(|c| c.is_player) {
                if TRACK_LENGTH - player.position <= BURST_RANGE {
                    session.request_burst();
                }
            }

            session.frame(FRAME_DT);
            view.observe(&session.drain_events());
            view.render(&session.race_snapshot(), FRAME_DT);

            if let Some(hud) = session.hud() {
                let second = hud.elapsed_secs as u32;
                if second > last_report {
                    last_report = second;
                    log::info!(
                        "{} | {} | {}",
                        hud.position_text(),
                        hud.stamina_text(settings.hud_precision),
                        hud.tokens_text()
                    );
                }
            }
            if session.phase() == SessionPhase::Results {
                break;
            }
        }

        match session.result() {
            Some(result) => {
                println!("{}", result_text(&result));
                match serde_json::to_string(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => log::error!("Could not encode result: {}", e),
                }
            }
            None => log::warn!("Race did not finish"),
        }
    }
}
