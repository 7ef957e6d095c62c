use crate::{
    aggregation::AggregationEngine,
    config::{Scenario, SimulationConfig},
    topology::{Interface, Topology},
    traffic::TrafficGenerator,
};
use rand_chacha::ChaChaRng;
use rand_core::{Rng, SeedableRng as _};
use std::fmt;
use tracing::debug;

/// One simulated second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(u64);

impl Tick {
    pub const ZERO: Self = Tick(0);

    /// get the next tick.
    ///
    /// ```
    /// # use switchstat_core::Tick;
    /// let next = Tick::ZERO.next();
    /// assert!(Tick::ZERO < next);
    /// assert_eq!(next.into_u64(), 1);
    /// ```
    #[inline(always)]
    #[must_use = "function does not modify the current value"]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[inline(always)]
    pub fn into_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A simulated switch, ticking for a fixed number of seconds.
///
/// All the random draws of a run (the configuration values asked to be
/// random, the port assignments and the generated traffic) come from a
/// single random source. Two simulations built from the same
/// configuration and seed produce the exact same counters.
///
/// ```
/// use switchstat_core::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     total_ports: 8,
///     runtime: 10,
///     ..SimulationConfig::default()
/// };
/// let mut simulation = Simulation::new(&config, 42);
/// simulation.run_with(|tick| println!("tick {tick} done"));
///
/// assert!(simulation.is_finished());
/// assert_eq!(simulation.interfaces().len(), 8);
/// ```
pub struct Simulation<R = ChaChaRng> {
    scenario: Scenario,
    topology: Topology,
    generator: TrafficGenerator<R>,
    aggregation: AggregationEngine,
    tick: Tick,
}

impl Simulation<ChaChaRng> {
    /// Build a simulation whose random source is seeded with `seed`.
    pub fn new(config: &SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaChaRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Build a simulation drawing from `rng`.
    ///
    /// The configuration is resolved and the topology built right away,
    /// nothing random is decided after this returns apart from the
    /// generated traffic.
    pub fn with_rng(config: &SimulationConfig, mut rng: R) -> Self {
        let scenario = Scenario::resolve(config, &mut rng);
        let topology = Topology::build(config, &scenario, &mut rng);
        let aggregation = AggregationEngine::new(&scenario);
        let generator = TrafficGenerator::new(&scenario, rng);

        debug!(
            runtime = scenario.runtime,
            loop_after = scenario.loop_after,
            packet_size = scenario.packet_size,
            uplink_speed = scenario.uplink_speed,
            "simulation ready"
        );

        Self {
            scenario,
            topology,
            generator,
            aggregation,
            tick: Tick::ZERO,
        }
    }

    /// Simulate one tick.
    ///
    /// Returns the tick that was simulated, or `None` if the simulation
    /// already ran for its whole runtime.
    pub fn step(&mut self) -> Option<Tick> {
        if self.is_finished() {
            return None;
        }
        let tick = self.tick;

        self.aggregation.begin_tick(&mut self.topology);
        let totals = self.generator.tick(&mut self.topology);
        self.aggregation
            .end_tick(&mut self.topology, tick.into_u64(), totals);

        self.tick = tick.next();
        Some(tick)
    }

    /// Run all the remaining ticks.
    pub fn run(&mut self) {
        self.run_with(|_| ())
    }

    /// Run all the remaining ticks, calling `on_tick` after each of them.
    pub fn run_with<F>(&mut self, mut on_tick: F)
    where
        F: FnMut(Tick),
    {
        while let Some(tick) = self.step() {
            on_tick(tick);
        }
        debug!(ticks = %self.tick, "simulation completed");
    }

    pub fn is_finished(&self) -> bool {
        self.tick.into_u64() >= self.scenario.runtime
    }
}

impl<R> Simulation<R> {
    /// The next tick to simulate, or the runtime once finished.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn interfaces(&self) -> &[Interface] {
        self.topology.interfaces()
    }

    pub fn into_interfaces(self) -> Vec<Interface> {
        self.topology.into_interfaces()
    }
}
