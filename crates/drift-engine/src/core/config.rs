use serde::Deserialize;

/// Configuration for the particle field, provided by the shell.
///
/// Read at initialization/reinitialization time only; changing a value
/// mid-run has no effect until the next rebuild. The shell is expected
/// to reject nonsense (zero count, non-positive radius) before it gets
/// here.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: f32,
    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Number of particles in the field.
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    /// Pointer interaction radius in pixels.
    #[serde(default = "default_interaction_radius")]
    pub interaction_radius: f32,
    /// Pointer force multiplier (unitless).
    #[serde(default = "default_interaction_strength")]
    pub interaction_strength: f32,
    /// PRNG seed; a fixed seed reproduces the same field.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_width() -> f32 {
    800.0
}
fn default_height() -> f32 {
    600.0
}
fn default_particle_count() -> usize {
    300
}
fn default_interaction_radius() -> f32 {
    150.0
}
fn default_interaction_strength() -> f32 {
    0.5
}
fn default_seed() -> u64 {
    42
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            particle_count: default_particle_count(),
            interaction_radius: default_interaction_radius(),
            interaction_strength: default_interaction_strength(),
            seed: default_seed(),
        }
    }
}

impl FieldConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    // -- Builder pattern --

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_interaction(mut self, radius: f32, strength: f32) -> Self {
        self.interaction_radius = radius;
        self.interaction_strength = strength;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Tuning for the motion-based pointer estimator.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Width of the downscaled analysis frame.
    #[serde(default = "default_analysis_width")]
    pub analysis_width: u32,
    /// Height of the downscaled analysis frame.
    #[serde(default = "default_analysis_height")]
    pub analysis_height: u32,
    /// Sample every Nth pixel on both axes.
    #[serde(default = "default_sample_step")]
    pub sample_step: u32,
    /// Summed per-channel difference above which a sampled pixel counts as motion.
    #[serde(default = "default_diff_threshold")]
    pub diff_threshold: u32,
    /// Minimum motion-pixel count for a pointer to be reported at all.
    #[serde(default = "default_min_motion_pixels")]
    pub min_motion_pixels: u32,
    /// Motion-pixel count above which the gesture reads as an open hand.
    #[serde(default = "default_open_motion_pixels")]
    pub open_motion_pixels: u32,
    /// Seconds to wait for the first decodable frame before giving up.
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout: f32,
}

fn default_analysis_width() -> u32 {
    160
}
fn default_analysis_height() -> u32 {
    120
}
fn default_sample_step() -> u32 {
    4
}
fn default_diff_threshold() -> u32 {
    28
}
fn default_min_motion_pixels() -> u32 {
    40
}
fn default_open_motion_pixels() -> u32 {
    180
}
fn default_ready_timeout() -> f32 {
    6.0
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            analysis_width: default_analysis_width(),
            analysis_height: default_analysis_height(),
            sample_step: default_sample_step(),
            diff_threshold: default_diff_threshold(),
            min_motion_pixels: default_min_motion_pixels(),
            open_motion_pixels: default_open_motion_pixels(),
            ready_timeout: default_ready_timeout(),
        }
    }
}

impl EstimatorConfig {
    /// Byte length of one RGBA analysis frame.
    pub fn frame_len(&self) -> usize {
        (self.analysis_width * self.analysis_height * 4) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = FieldConfig::default();
        assert!(cfg.particle_count > 0);
        assert!(cfg.interaction_radius > 0.0);
        assert!(cfg.interaction_strength >= 0.0);
    }

    #[test]
    fn parse_partial_json_fills_defaults() {
        let cfg = FieldConfig::from_json(r#"{ "particle_count": 400, "interaction_radius": 120.0 }"#)
            .unwrap();
        assert_eq!(cfg.particle_count, 400);
        assert_eq!(cfg.interaction_radius, 120.0);
        assert_eq!(cfg.width, 800.0);
        assert_eq!(cfg.interaction_strength, 0.5);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(FieldConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn builder_pattern() {
        let cfg = FieldConfig::default()
            .with_size(1024.0, 768.0)
            .with_particle_count(500)
            .with_interaction(200.0, 0.8)
            .with_seed(7);
        assert_eq!(cfg.width, 1024.0);
        assert_eq!(cfg.particle_count, 500);
        assert_eq!(cfg.interaction_radius, 200.0);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn estimator_frame_len_matches_rgba() {
        let cfg = EstimatorConfig::default();
        assert_eq!(cfg.frame_len(), 160 * 120 * 4);
    }
}
