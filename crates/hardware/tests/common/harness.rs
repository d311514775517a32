use pipesim_core::Simulator;
use pipesim_core::common::Result;
use pipesim_core::config::{Config, RunMode};
use pipesim_core::sim::{ProgramImage, RunReport};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test writer. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder for a simulator under test.
#[derive(Clone, Debug)]
pub struct TestContext {
    pub config: Config,
    pub image: ProgramImage,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            config: Config::default(),
            image: ProgramImage::default(),
        }
    }

    /// Starts from the built-in demo program.
    pub fn demo() -> Self {
        Self::new().with_image(ProgramImage::demo())
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.config = self.config.for_mode(mode);
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.config.general.max_cycles = max_cycles;
        self
    }

    pub fn with_start_pc(mut self, pc: u8) -> Self {
        self.config.general.start_pc = pc;
        self
    }

    pub fn with_miss_penalty(mut self, penalty: u64) -> Self {
        self.config.cache.miss_penalty = penalty;
        self
    }

    /// Keeps trace events in memory.
    pub fn recording(mut self) -> Self {
        self.config.general.record_events = true;
        self
    }

    pub fn with_image(mut self, image: ProgramImage) -> Self {
        self.image = image;
        self
    }

    /// Assembles `source` into the program image.
    pub fn with_asm(self, source: &str) -> Self {
        self.with_image(ProgramImage::from_asm(source).unwrap())
    }

    pub fn with_data(mut self, addr: u8, value: u8) -> Self {
        self.image.data.push((addr, value));
        self
    }

    pub fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.image.registers.push((reg, value));
        self
    }

    pub fn build(&self) -> Simulator {
        Simulator::new(&self.config, &self.image).unwrap()
    }

    /// Builds and runs to completion, returning the simulator for inspection.
    pub fn run(&self) -> (Simulator, Result<RunReport>) {
        let mut sim = self.build();
        let result = sim.run();
        (sim, result)
    }

    /// Runs and unwraps the report.
    pub fn run_ok(&self) -> (Simulator, RunReport) {
        let (sim, result) = self.run();
        (sim, result.unwrap())
    }
}
