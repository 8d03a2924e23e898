//! The simulation loop: owns the field, the pointer slot, the frame
//! buffer, and the run lifecycle. The shell (or a test) drives it by
//! calling `tick(dt)` once per display refresh — that callback chain is
//! the scheduler; there is no timer in here.

use glam::Vec2;

use crate::core::config::FieldConfig;
use crate::core::time::TickAccumulator;
use crate::field::integrate::{self, Interaction};
use crate::field::store::ParticleField;
use crate::input::pointer::{PointerSlot, PointerSource, PointerState};
use crate::render::frame::draw_frame;
use crate::render::surface::Surface;

pub struct Simulation {
    config: FieldConfig,
    field: ParticleField,
    surface: Surface,
    pointer: PointerSlot,
    clock: TickAccumulator,
    running: bool,
}

impl Simulation {
    pub fn new(config: FieldConfig) -> Self {
        let field = ParticleField::new(&config);
        let surface = Surface::new(config.width as u32, config.height as u32);
        Self {
            config,
            field,
            surface,
            pointer: PointerSlot::new(),
            clock: TickAccumulator::default(),
            running: false,
        }
    }

    // -- Lifecycle --

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.clock.reset();
            log::info!("simulation started");
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("simulation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rebuild the particle set with the current config and bounds.
    pub fn reinitialize(&mut self) {
        let bounds = self.field.bounds();
        self.field.reinitialize(bounds.x, bounds.y);
    }

    /// Apply a new config and rebuild everything that depends on it.
    /// Params take effect only here — there is no live-reload mid-run.
    pub fn reconfigure(&mut self, config: FieldConfig) {
        self.surface.resize(config.width as u32, config.height as u32);
        self.field = ParticleField::new(&config);
        self.config = config;
    }

    /// Adopt new canvas bounds without rebuilding the field. Particles
    /// left outside are repaired by the next tick's boundary clamp.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.width = width;
        self.config.height = height;
        self.field.set_bounds(width, height);
        self.surface.resize(width as u32, height as u32);
    }

    // -- Pointer plumbing --

    /// Choose which adapter owns the pointer slot; switching clears it.
    pub fn select_pointer_source(&mut self, source: PointerSource) {
        self.pointer.select(source);
    }

    /// Direct-input adapter path (mouse/touch, canvas-space coordinates).
    pub fn set_hand_position(&mut self, state: Option<PointerState>) {
        self.pointer.publish(PointerSource::Direct, state);
    }

    /// Estimator path; the caller relays each fresh estimate here.
    pub fn publish_motion_estimate(&mut self, state: Option<PointerState>) {
        self.pointer.publish(PointerSource::Motion, state);
    }

    pub fn pointer(&self) -> Option<PointerState> {
        self.pointer.get()
    }

    // -- The loop --

    /// One frame callback: run the accumulated fixed steps, then render.
    /// Does nothing while stopped (the last rendered frame persists).
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.running {
            return;
        }
        let interaction = Interaction {
            radius: self.config.interaction_radius,
            strength: self.config.interaction_strength,
        };
        let steps = self.clock.accumulate(frame_dt);
        for _ in 0..steps {
            integrate::step(&mut self.field, self.pointer.get(), interaction);
        }
        draw_frame(
            &mut self.surface,
            &self.field,
            self.pointer.get(),
            self.config.interaction_radius,
        );
    }

    // -- Accessors --

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.field.bounds()
    }
}
