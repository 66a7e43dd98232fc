//! Evasive Target entry point
//!
//! On the web the library's `wasm_main` does everything. Natively this runs a
//! headless scripted pass (pointer approaches, lingers, moves away, then accept)
//! and logs what the button would do.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Evasive Target (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to run in a page");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is evasive_target::web::wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use evasive_target::platform::ManualFrameSource;
    use evasive_target::target::{TargetGeometry, TargetRect, VirtualTarget};
    use evasive_target::{EvasionController, Result, Settings};

    /// 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;

    type Controller = EvasionController<ManualFrameSource, VirtualTarget>;

    /// Run frames until the scheduler has nothing pending or `frames` ran
    fn pump(controller: &mut Controller, frames: usize, clock: &mut f64) {
        for _ in 0..frames {
            if controller.scheduler_mut().source_mut().fire().is_none() {
                return;
            }
            *clock += FRAME_MS;
            controller.on_frame(*clock);
        }
    }

    fn report(controller: &Controller, label: &str) {
        let state = controller.simulator().state();
        let center = controller
            .target()
            .current_center()
            .map(|c| format!("({:.1}, {:.1})", c.x, c.y))
            .unwrap_or_else(|| "unmeasured".to_string());
        log::info!(
            "{label:>10}: offset ({:>8.2}, {:>8.2}) vel ({:>7.2}, {:>7.2}) drawn at {center}",
            state.offset.x,
            state.offset.y,
            state.velocity.x,
            state.velocity.y,
        );
    }

    pub fn run() -> Result<()> {
        let settings = Settings::load();
        log::info!("Settings: {}", settings.to_json()?);

        // A 160x56 button centered at (640, 480)
        let home = TargetRect::centered(Vec2::new(640.0, 480.0), Vec2::new(160.0, 56.0));
        let target = VirtualTarget::laid_out(home, settings.smoothing);
        let mut controller =
            EvasionController::from_settings(&settings, target, ManualFrameSource::new())?;
        let mut clock = 0.0;

        controller.start();
        pump(&mut controller, 5, &mut clock);
        report(&controller, "idle");

        // Sweep in from the left, straight at the button
        for x in (400..=640).step_by(20) {
            controller.pointer_moved(x as f32, 480.0);
            pump(&mut controller, 2, &mut clock);
        }
        report(&controller, "approach");

        // Hover on the home position for a second
        pump(&mut controller, 60, &mut clock);
        report(&controller, "linger");

        // Off to the top-left corner, well out of reach
        controller.pointer_moved(0.0, 0.0);
        let mut frames = 0;
        while !controller.simulator().is_settled() && frames < 1_000 {
            pump(&mut controller, 1, &mut clock);
            frames += 1;
        }
        report(&controller, "settled");
        log::info!("Returned home in {frames} frames");

        controller.accept();
        controller.pointer_moved(640.0, 480.0);
        pump(&mut controller, 10, &mut clock);
        report(&controller, "accepted");

        let stats = controller.simulator().stats();
        log::info!(
            "{} ticks, {} emitted, {} suppressed, {} recovered",
            stats.ticks,
            stats.emitted,
            stats.suppressed,
            stats.recovered
        );
        Ok(())
    }
}
