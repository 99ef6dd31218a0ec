/// Gesture trace replay for native builds
///
/// Usage: `panzoom-replay [trace.json] [config.json]`. Without a trace the
/// built-in demo session is replayed.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use std::path::PathBuf;

    use panzoom::trace::{replay, Trace};
    use panzoom::{logging, ZoomConfig, ZoomController};
    use web_time::Instant;

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let trace_path = args.next();
    let config_path = args.next();

    let config = match &config_path {
        Some(path) => ZoomConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ZoomConfig::default(),
    };
    logging::init(config.log_level);

    let trace = match &trace_path {
        Some(path) => Trace::load(path)?,
        None => {
            log::info!("No trace given, replaying the demo session");
            Trace::demo()
        }
    };

    let mut controller = ZoomController::new(config, LogHost::default());
    let summary = replay(&mut controller, &trace, Instant::now());

    println!("{}", serde_json::to_string_pretty(&summary.final_transform)?);
    log::info!(
        "{} transform writes, {} frame requests",
        controller.host().writes,
        controller.host().frame_requests
    );
    Ok(())
}

/// Host that logs every write instead of rendering it.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct LogHost {
    writes: usize,
    frame_requests: usize,
}

#[cfg(not(target_arch = "wasm32"))]
impl panzoom::ViewHost for LogHost {
    fn apply_transform(&mut self, transform: &panzoom::TransformState) {
        self.writes += 1;
        log::trace!(
            "write #{}: scale {:.3} translate ({:.1}, {:.1})",
            self.writes,
            transform.scale,
            transform.translate_x,
            transform.translate_y
        );
    }

    fn request_frames(&mut self, id: panzoom::AnimationId) {
        self.frame_requests += 1;
        log::debug!("Frames requested for '{}'", id);
    }

    fn cancel_frames(&mut self, id: panzoom::AnimationId) {
        log::debug!("Frames cancelled for '{}'", id);
    }
}

// WASM hosts embed the library directly
#[cfg(target_arch = "wasm32")]
fn main() {}
