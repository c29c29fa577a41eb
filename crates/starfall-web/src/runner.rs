use glam::Vec3;
use starfall::{
    CelestialRegistry, CommandBuffer, ImpactRecord, InputEvent, InputQueue, OrbitDriver,
    RenderRecord, SimConfig, SimError, Simulation,
};

/// Floats per entry in the body position buffer: x, y, z, radius.
pub const BODY_FLOATS: usize = 4;

/// Wires the simulation to the browser frame loop.
///
/// The wasm exports keep one `SimRunner` in a `thread_local!`, because
/// wasm-bindgen cannot export generic structs directly. Every tick it drains
/// queued launches, moves the planets, steps the simulation, and packs the
/// renderer commands, impacts and body positions into flat buffers for JS.
pub struct SimRunner {
    sim: Simulation<CommandBuffer, String>,
    orbits: OrbitDriver,
    input: InputQueue,
    render_records: Vec<RenderRecord>,
    impact_records: Vec<ImpactRecord>,
    /// Registry bodies in order, then the moon.
    body_records: Vec<f32>,
    rejected: u32,
}

impl SimRunner {
    /// Build a runner for the default solar system. An empty string means default config.
    pub fn from_json(config_json: &str) -> Result<Self, SimError> {
        let config = if config_json.trim().is_empty() {
            SimConfig::default()
        } else {
            SimConfig::from_json(config_json)?
        };
        let sim = Simulation::new(
            config,
            CelestialRegistry::solar_system(),
            CommandBuffer::new(),
            String::new(),
        )?;
        let mut runner = Self {
            sim,
            orbits: OrbitDriver::solar_system(),
            input: InputQueue::new(),
            render_records: Vec::with_capacity(256),
            impact_records: Vec::new(),
            body_records: Vec::new(),
            rejected: 0,
        };
        runner.pack_bodies();
        Ok(runner)
    }

    /// Queue a launch for the next tick. Non-finite input is refused here and
    /// reported with `false`, so JS learns about it immediately.
    pub fn push_launch(&mut self, origin: Vec3, direction: Vec3) -> bool {
        if !origin.is_finite() || !direction.is_finite() {
            log::warn!("launch rejected: non-finite origin {origin} or direction {direction}");
            self.rejected += 1;
            return false;
        }
        self.input.push(InputEvent::Launch { origin, direction });
        true
    }

    /// Run one frame: launches, orbits, simulation step, buffer packing.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            match event {
                InputEvent::Launch { origin, direction } => {
                    if let Err(e) = self.sim.launch(origin, direction) {
                        log::warn!("queued launch failed: {e}");
                        self.rejected += 1;
                    }
                }
            }
        }

        self.orbits.advance(dt, self.sim.bodies_mut());
        let report = self.sim.step(dt);

        self.impact_records.clear();
        self.impact_records.extend(report.explosions.iter().map(ImpactRecord::from));

        self.render_records.clear();
        self.sim.renderer_mut().drain_records(&mut self.render_records);

        self.pack_bodies();
    }

    /// Tear the simulation down. Returns the final destroy records for JS.
    pub fn teardown(self) -> Vec<RenderRecord> {
        let (mut renderer, _status) = self.sim.teardown();
        let mut records = Vec::new();
        renderer.drain_records(&mut records);
        records
    }

    fn pack_bodies(&mut self) {
        self.body_records.clear();
        for body in self.sim.bodies().iter() {
            let p = body.position;
            self.body_records.extend_from_slice(&[p.x, p.y, p.z, body.collision_radius]);
        }
        if let Some((moon, radius)) = self.orbits.moon() {
            self.body_records.extend_from_slice(&[moon.x, moon.y, moon.z, radius]);
        }
    }

    pub fn simulation(&self) -> &Simulation<CommandBuffer, String> {
        &self.sim
    }

    // ---- Pointer accessors for JS reads ----

    pub fn render_records_ptr(&self) -> *const f32 {
        self.render_records.as_ptr() as *const f32
    }

    pub fn render_record_count(&self) -> u32 {
        self.render_records.len() as u32
    }

    /// Render records of the last tick as one flat float slice.
    pub fn render_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.render_records)
    }

    pub fn impact_records_ptr(&self) -> *const f32 {
        self.impact_records.as_ptr() as *const f32
    }

    pub fn impact_count(&self) -> u32 {
        self.impact_records.len() as u32
    }

    pub fn impact_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.impact_records)
    }

    pub fn body_positions_ptr(&self) -> *const f32 {
        self.body_records.as_ptr()
    }

    pub fn body_count(&self) -> u32 {
        (self.body_records.len() / BODY_FLOATS) as u32
    }

    pub fn body_floats(&self) -> &[f32] {
        &self.body_records
    }

    pub fn status(&self) -> &str {
        self.sim.status()
    }

    pub fn live_count(&self) -> u32 {
        self.sim.live_count() as u32
    }

    /// Launches refused since init.
    pub fn rejected_count(&self) -> u32 {
        self.rejected
    }
}
