//! Headless player.
//!
//! Opens a recording folder, loads both tracks and plays them at a fixed
//! simulated frame rate, entering and leaving an immersive session halfway
//! through so calibration runs once.
//!
//! ```text
//! cargo run -p player -- <video folder>
//! MESH_VIDEO_FOLDER=<video folder> cargo run -p player
//! ```

use std::time::Duration;

use mesh_video::{TickStatus, Viewer, ViewerConfig};

const FRAME_STEP: Duration = Duration::from_micros(16_667);
const PLAY_FRAMES: u64 = 600;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::from_env();
    let mut viewer = Viewer::open(config)?;
    viewer.start_loading();

    wait_until_ready(&mut viewer);

    let session = (PLAY_FRAMES / 3)..(2 * PLAY_FRAMES / 3);
    for frame in 0..PLAY_FRAMES {
        if frame == session.start {
            viewer.session_start();
        } else if frame == session.end {
            viewer.session_end();
        }

        viewer.advance(FRAME_STEP);

        if frame % 60 == 0 {
            let fg = viewer.driver().dynamic_track();
            let bg = viewer.driver().background_track();
            log::info!(
                "t={:.2}s fg frame {} (showing {:?}), bg frame {} (showing {:?})",
                viewer.timer().elapsed_seconds(),
                fg.current_frame_index(),
                fg.displayed_frame_index(),
                bg.current_frame_index(),
                bg.displayed_frame_index(),
            );
        }
    }

    log::info!("Played {PLAY_FRAMES} frames.");
    Ok(())
}

/// Ticks with zero elapsed time until both tracks are in. Failed loads
/// still finish, so this always returns.
fn wait_until_ready(viewer: &mut Viewer) {
    while viewer.frame(0.0) == TickStatus::Loading {
        std::thread::sleep(Duration::from_millis(10));
    }
}
