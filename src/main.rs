//! Gesture Effects - headless replay
//!
//! Replays a detection script through the classifier and effect engine on a
//! simulated display clock and logs what would be on screen.
//!
//! Usage: `gesture-effects [SCRIPT.json] [CONFIG.json]`

use gesture_effects::detection::{Detection, ScriptedDetector};
use gesture_effects::render::RecordingSurface;
use gesture_effects::{App, EffectsConfig, Gesture};

const DEFAULT_WIDTH: f32 = 1280.0;
const DEFAULT_HEIGHT: f32 = 720.0;
/// Hard stop for the simulated clock
const MAX_SIMULATED_MS: u64 = 10 * 60 * 1000;

/// Open, fist, V-sign and pinch, each followed by a few idle cycles
fn demo_script() -> Vec<Vec<Detection>> {
    let gestures = [
        Detection::new(560.0, 300.0, 160.0, 100.0, 0.92),
        Detection::new(620.0, 300.0, 40.0, 60.0, 0.88),
        Detection::new(610.0, 100.0, 57.5, 50.0, 0.81),
        Detection::new(600.0, 500.0, 80.0, 80.0, 0.95),
    ];

    let mut script = Vec::new();
    for detection in gestures {
        script.push(vec![detection]);
        script.extend(std::iter::repeat_with(Vec::new).take(15));
    }
    script
}

fn run() -> gesture_effects::Result<()> {
    let mut args = std::env::args().skip(1);
    let script_path = args.next();
    let config_path = args.next();

    let config = match &config_path {
        Some(path) => EffectsConfig::load_from_file(path)?,
        None => EffectsConfig::default(),
    };
    let detector = match &script_path {
        Some(path) => ScriptedDetector::load_from_file(path)?,
        None => {
            log::info!("No script given, replaying built-in demo");
            ScriptedDetector::new(demo_script())
        }
    };

    let surface = RecordingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let mut app = App::new(&config, surface, detector);
    app.start();

    let fps = u64::from(config.timing.target_fps);
    let mut frame: u64 = 0;
    let mut peak_particles = 0;
    let mut last_report_ms = 0;

    loop {
        let now_ms = frame * 1000 / fps;
        let outcome = app.tick(now_ms);

        if let Some(gesture) = outcome.gesture.filter(|g| *g != Gesture::None) {
            log::info!(
                "[{:>6} ms] {} -> {} particles, caption {:?}",
                now_ms,
                app.gesture_label(),
                app.engine().particle_count(),
                app.engine().caption().text()
            );
            log::debug!("Classified {}", gesture);
        }

        let draw_calls = app.engine_mut().surface_mut().take_commands().len();
        peak_particles = peak_particles.max(app.engine().particle_count());

        if now_ms >= last_report_ms + 1000 {
            last_report_ms = now_ms;
            log::info!(
                "[{:>6} ms] {:.1} fps, {} particles, {} draw calls, caption visible: {}",
                now_ms,
                app.fps(),
                app.engine().particle_count(),
                draw_calls,
                app.engine().caption_visible(now_ms)
            );
        }

        let drained = app.detector().is_exhausted()
            && app.engine().particle_count() == 0
            && !app.engine().caption_visible(now_ms);
        if drained || now_ms >= MAX_SIMULATED_MS {
            break;
        }
        frame += 1;
    }

    log::info!(
        "Replay finished after {} frames ({} ms simulated), peak {} particles",
        app.frame_count(),
        frame * 1000 / fps,
        peak_particles
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Gesture Effects v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
