use drift_engine::{
    Analysis, CameraError, EstimatorConfig, EstimatorPhase, FieldConfig, FramePoll, FrameSource,
    HandEstimator, PointerSource, PointerState, Simulation,
};

/// Frame source fed by the shell.
///
/// The shell owns `getUserMedia`, the off-screen video sink and the
/// downscale draw; each analysis-sized RGBA readback is pushed in here,
/// and acquisition failures are relayed as error codes. The estimator
/// polls this like any other camera.
pub struct CameraFeed {
    frame: Option<Vec<u8>>,
    failure: Option<CameraError>,
}

impl CameraFeed {
    pub fn new() -> Self {
        Self {
            frame: None,
            failure: None,
        }
    }

    /// Latest downscaled frame from the shell. Replaces any unread one —
    /// the estimator only ever wants the most recent.
    pub fn push_frame(&mut self, data: &[u8]) {
        self.frame = Some(data.to_vec());
    }

    /// Shell-reported failure, delivered on the next poll.
    pub fn fail(&mut self, err: CameraError) {
        self.failure = Some(err);
    }
}

impl Default for CameraFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for CameraFeed {
    fn start(&mut self) -> Result<(), CameraError> {
        self.frame = None;
        self.failure = None;
        Ok(())
    }

    fn stop(&mut self) {
        self.frame = None;
        self.failure = None;
    }

    fn poll_frame(&mut self, dest: &mut [u8]) -> Result<FramePoll, CameraError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        match self.frame.take() {
            Some(data) if data.len() == dest.len() => {
                dest.copy_from_slice(&data);
                Ok(FramePoll::Frame)
            }
            Some(data) => Err(CameraError::Frame(format!(
                "expected {} bytes, got {}",
                dest.len(),
                data.len()
            ))),
            None => Ok(FramePoll::Pending),
        }
    }
}

/// Wires the simulation and the estimator into one per-frame callback.
/// JS drives `tick` from requestAnimationFrame and reads the frame
/// buffer straight out of WASM memory.
pub struct SimRunner {
    sim: Simulation,
    estimator: HandEstimator<CameraFeed>,
}

impl SimRunner {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            sim: Simulation::new(FieldConfig::default().with_size(width, height)),
            estimator: HandEstimator::new(CameraFeed::new(), EstimatorConfig::default()),
        }
    }

    /// Apply a JSON config and rebuild. Returns false (and keeps the old
    /// config) on a parse error.
    pub fn configure(&mut self, json: &str) -> bool {
        match FieldConfig::from_json(json) {
            Ok(config) => {
                self.sim.reconfigure(config);
                true
            }
            Err(err) => {
                log::warn!("bad field config: {}", err);
                false
            }
        }
    }

    /// One display-refresh callback: estimator first, then simulation,
    /// so integration reads the freshest estimate.
    pub fn tick(&mut self, dt: f32) {
        let canvas = self.sim.canvas_size();
        if let Analysis::Estimate(estimate) = self.estimator.tick(dt, canvas) {
            self.sim.publish_motion_estimate(estimate);
        }
        self.sim.tick(dt);
    }

    // -- Simulation lifecycle --

    pub fn start(&mut self) {
        self.sim.start();
    }

    pub fn stop(&mut self) {
        self.sim.stop();
    }

    pub fn reinitialize(&mut self) {
        self.sim.reinitialize();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height);
    }

    // -- Direct pointer input --

    pub fn set_pointer(&mut self, x: f32, y: f32, open: bool) {
        self.sim.set_hand_position(Some(PointerState::new(x, y, open)));
    }

    pub fn clear_pointer(&mut self) {
        self.sim.set_hand_position(None);
    }

    // -- Motion estimator control --

    pub fn estimator_start(&mut self) {
        self.sim.select_pointer_source(PointerSource::Motion);
        // CameraFeed::start cannot fail; real failures arrive later
        // through camera_failed and surface in the status code.
        let _ = self.estimator.start();
    }

    pub fn estimator_stop(&mut self) {
        self.estimator.stop();
        self.sim.select_pointer_source(PointerSource::Direct);
    }

    pub fn push_camera_frame(&mut self, data: &[u8]) {
        self.estimator.source_mut().push_frame(data);
    }

    /// Map a shell-reported `getUserMedia` failure into the taxonomy:
    /// 1 = permission denied, 2 = no device, anything else transient.
    pub fn camera_failed(&mut self, code: u32) {
        let err = match code {
            1 => CameraError::Unavailable,
            2 => CameraError::NotFound,
            _ => CameraError::Frame(format!("shell error code {}", code)),
        };
        self.estimator.source_mut().fail(err);
    }

    /// Phase and terminal error collapsed into one value for the shell:
    /// 0 idle, 1 initializing, 2 active, 3 denied, 4 no device, 5 timeout.
    pub fn estimator_status(&self) -> u32 {
        match self.estimator.phase() {
            EstimatorPhase::Initializing => 1,
            EstimatorPhase::Active => 2,
            EstimatorPhase::Idle => match self.estimator.last_error() {
                Some(CameraError::Unavailable) => 3,
                Some(CameraError::NotFound) => 4,
                Some(CameraError::Timeout) => 5,
                _ => 0,
            },
        }
    }

    // -- Buffer accessors for direct WASM-memory reads --

    pub fn frame_ptr(&self) -> *const u8 {
        self.sim.surface().as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.sim.surface().len_bytes() as u32
    }

    pub fn frame_width(&self) -> u32 {
        self.sim.surface().width()
    }

    pub fn frame_height(&self) -> u32 {
        self.sim.surface().height()
    }

    pub fn analysis_width(&self) -> u32 {
        self.estimator.config().analysis_width
    }

    pub fn analysis_height(&self) -> u32 {
        self.estimator.config().analysis_height
    }

    pub fn particle_count(&self) -> u32 {
        self.sim.field().len() as u32
    }
}
