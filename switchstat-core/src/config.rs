//! Configuration of a simulation run.
//!
//! [`SimulationConfig`] is the raw, user facing input. Every numeric
//! field follows the convention `-1 = random within the declared range`
//! and out of range values are normalized rather than rejected.
//!
//! [`Scenario`] is the resolved form of the scalar options: it is computed
//! once, before the first tick, and stays fixed for the whole run. The
//! port assignments (uplinks, loops, root) are resolved by
//! [`Topology::build`](crate::Topology::build).

use crate::{
    counters::Speed,
    defaults::*,
    mac::MacSeed,
    random::{choose, uniform_inclusive},
};
use rand_core::Rng;

/// Value asking for a random draw.
pub const RANDOM: i64 = -1;

/// User input of a simulation, consumed read-only.
///
/// The [`Default`] values are the ones of the command line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of ports of the switch.
    pub total_ports: i64,
    pub uplink1: i64,
    pub uplink2: i64,
    /// Uplink speed in Mbit/s, lowered to the closest allowed speed.
    pub uplink_speed: i64,
    /// `0`: no loop, `1`: one looped port, `2`: two looped ports.
    pub loop_mode: i64,
    pub loop_interface1: i64,
    pub loop_interface2: i64,
    /// Tick from which the looped ports start re-injecting traffic.
    pub loop_after: i64,
    pub vlan: i64,
    /// RSTP root port, stored on the VLAN only.
    pub root: i64,
    pub mac_seed: MacSeed,
    /// Broadcast packets received by every port per tick, below `1` for a
    /// random amount every tick.
    pub broadcast: i64,
    /// Optional ceiling of the fixed broadcast rate, `0` to disable.
    pub broadcast_max: i64,
    /// Per-port, per-tick broadcast ceiling.
    pub broadcast_limit: i64,
    pub multicast: i64,
    pub multicast_max: i64,
    pub multicast_limit: i64,
    /// Unicast traffic in Mbit/s.
    pub unicast: i64,
    pub unicast_max: i64,
    /// Average packet size in bytes.
    pub packet_size: i64,
    /// Number of simulated seconds.
    pub runtime: i64,
    /// Stored but not simulated.
    pub rstp_transitions: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_ports: i64::from(DEFAULT_INTERFACES),
            uplink1: i64::from(DEFAULT_UPLINK1),
            uplink2: i64::from(DEFAULT_UPLINK2),
            uplink_speed: i64::from(DEFAULT_UPLINK_SPEED),
            loop_mode: i64::from(MAX_LOOP_MODE),
            loop_interface1: RANDOM,
            loop_interface2: RANDOM,
            loop_after: DEFAULT_LOOP_AFTER as i64,
            vlan: RANDOM,
            root: i64::from(DEFAULT_UPLINK1),
            mac_seed: MacSeed::default(),
            broadcast: DEFAULT_BROADCAST,
            broadcast_max: 0,
            broadcast_limit: DEFAULT_BROADCAST_LIMIT as i64,
            multicast: DEFAULT_MULTICAST,
            multicast_max: 0,
            multicast_limit: DEFAULT_MULTICAST_LIMIT as i64,
            unicast: DEFAULT_UNICAST,
            unicast_max: DEFAULT_UNICAST,
            packet_size: i64::from(DEFAULT_PACKET_SIZE),
            runtime: DEFAULT_RUNTIME as i64,
            rstp_transitions: i64::from(DEFAULT_RSTP_TRANSITIONS),
        }
    }
}

/// Nominal rate of a traffic class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficRate {
    /// Draw a new amount every tick, bounded by the class ceiling.
    Random,
    /// The same amount every tick.
    Fixed(u64),
}

impl TrafficRate {
    pub fn is_random(self) -> bool {
        matches!(self, Self::Random)
    }
}

/// How many ports simulate a bridging loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopMode {
    #[default]
    Off,
    Single,
    Double,
}

impl LoopMode {
    fn clamped(mode: i64) -> Self {
        match mode {
            i64::MIN..=0 => Self::Off,
            1 => Self::Single,
            _ => Self::Double,
        }
    }

    pub fn ports(self) -> usize {
        match self {
            Self::Off => 0,
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Scalar parameters of a run, resolved from a [`SimulationConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub total_ports: u32,
    pub uplink_speed: u32,
    pub loop_mode: LoopMode,
    pub loop_after: u64,
    pub vlan: u16,
    pub broadcast: TrafficRate,
    pub broadcast_max: u64,
    pub broadcast_limit: u64,
    pub multicast: TrafficRate,
    pub multicast_max: u64,
    pub multicast_limit: u64,
    pub unicast: TrafficRate,
    pub unicast_max: u64,
    pub packet_size: u32,
    pub runtime: u64,
    pub rstp_transitions: u32,
}

impl Scenario {
    /// Resolve every scalar of `config`, drawing the random ones from `rng`.
    ///
    /// ```
    /// use rand_chacha::ChaChaRng;
    /// use rand_core::SeedableRng as _;
    /// use switchstat_core::{Scenario, SimulationConfig, TrafficRate};
    ///
    /// let config = SimulationConfig {
    ///     runtime: 60,
    ///     packet_size: 5_000,
    ///     unicast: 0,
    ///     ..SimulationConfig::default()
    /// };
    /// let scenario = Scenario::resolve(&config, &mut ChaChaRng::seed_from_u64(0));
    ///
    /// assert_eq!(scenario.runtime, 60);
    /// assert_eq!(scenario.packet_size, 1_500);
    /// assert_eq!(scenario.unicast, TrafficRate::Random);
    /// ```
    pub fn resolve<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Self {
        let total_ports = resolve_total_ports(config.total_ports, rng);
        let uplink_speed = resolve_uplink_speed(config.uplink_speed, rng);
        let loop_mode = if config.loop_mode == RANDOM {
            LoopMode::clamped(uniform_inclusive(rng, 0, u64::from(MAX_LOOP_MODE)) as i64)
        } else {
            LoopMode::clamped(config.loop_mode)
        };
        let vlan = resolve_vlan(config.vlan, rng);
        let runtime = if config.runtime < 1 {
            uniform_inclusive(rng, 1, MAX_RUNTIME)
        } else {
            (config.runtime as u64).min(MAX_RUNTIME)
        };
        let loop_after = match config.loop_after {
            after if after as i128 > i128::from(runtime) => runtime,
            after if after > 0 => after as u64,
            _ => DEFAULT_LOOP_AFTER,
        };
        let packet_size = if config.packet_size == RANDOM {
            uniform_inclusive(rng, u64::from(MIN_PACKET_SIZE), u64::from(MAX_PACKET_SIZE)) as u32
        } else {
            config
                .packet_size
                .clamp(i64::from(MIN_PACKET_SIZE), i64::from(MAX_PACKET_SIZE)) as u32
        };

        let broadcast = resolve_nominal(config.broadcast, MAX_BROADCAST);
        let broadcast_max = resolve_max(config.broadcast_max, rng);
        let broadcast_limit = resolve_limit(
            config.broadcast_limit,
            MAX_BROADCAST,
            DEFAULT_BROADCAST_LIMIT,
            rng,
        );
        let multicast = resolve_nominal(config.multicast, MAX_TRAFFIC);
        let multicast_max = resolve_max(config.multicast_max, rng);
        let multicast_limit = resolve_limit(
            config.multicast_limit,
            MAX_MULTICAST,
            DEFAULT_MULTICAST_LIMIT,
            rng,
        );
        let unicast = resolve_nominal(config.unicast, MAX_TRAFFIC);
        let unicast_max = resolve_max(config.unicast_max, rng);

        let rstp_transitions = if config.rstp_transitions == RANDOM {
            uniform_inclusive(rng, 0, u64::from(MAX_RSTP_TRANSITIONS)) as u32
        } else {
            config
                .rstp_transitions
                .clamp(0, i64::from(MAX_RSTP_TRANSITIONS)) as u32
        };

        Self {
            total_ports,
            uplink_speed,
            loop_mode,
            loop_after,
            vlan,
            broadcast,
            broadcast_max,
            broadcast_limit,
            multicast,
            multicast_max,
            multicast_limit,
            unicast,
            unicast_max,
            packet_size,
            runtime,
            rstp_transitions,
        }
    }

    /// Switch originated control traffic (RSTP hellos) added to every
    /// port's outbound multicast at each tick.
    pub fn rstp_hellos(&self) -> u64 {
        self.runtime / 2
    }

    /// Whether the looped ports re-inject traffic at the given tick.
    pub fn loop_active(&self, tick: u64) -> bool {
        self.loop_mode != LoopMode::Off && tick >= self.loop_after
    }
}

fn resolve_total_ports<R: Rng + ?Sized>(total_ports: i64, rng: &mut R) -> u32 {
    if total_ports < 1 {
        uniform_inclusive(rng, u64::from(MIN_INTERFACES), u64::from(MAX_INTERFACES)) as u32
    } else {
        total_ports.clamp(i64::from(MIN_INTERFACES), i64::from(MAX_INTERFACES)) as u32
    }
}

fn resolve_uplink_speed<R: Rng + ?Sized>(speed: i64, rng: &mut R) -> u32 {
    if speed == RANDOM {
        let speeds: Vec<u32> = Speed::ALL
            .iter()
            .map(|speed| speed.mbps())
            .filter(|mbps| *mbps >= MIN_UPLINK_SPEED)
            .collect();
        return choose(rng, &speeds)
            .copied()
            .unwrap_or(DEFAULT_UPLINK_SPEED);
    }

    if speed < i64::from(MIN_UPLINK_SPEED) {
        return DEFAULT_UPLINK_SPEED;
    }
    // the fastest allowed speed not above the requested one
    Speed::ALL
        .iter()
        .map(|allowed| allowed.mbps())
        .filter(|mbps| i64::from(*mbps) <= speed)
        .max()
        .unwrap_or(DEFAULT_UPLINK_SPEED)
}

fn resolve_vlan<R: Rng + ?Sized>(vlan: i64, rng: &mut R) -> u16 {
    match vlan {
        i64::MIN..=-1 => uniform_inclusive(rng, u64::from(MIN_VLAN), u64::from(MAX_VLAN)) as u16,
        0 => DEFAULT_VLAN,
        vlan => vlan.min(i64::from(MAX_VLAN)) as u16,
    }
}

/// Values below `1` switch the class to random mode.
fn resolve_nominal(nominal: i64, max: u64) -> TrafficRate {
    if nominal < 1 {
        TrafficRate::Random
    } else {
        TrafficRate::Fixed((nominal as u64).min(max))
    }
}

fn resolve_max<R: Rng + ?Sized>(max: i64, rng: &mut R) -> u64 {
    if max == RANDOM {
        uniform_inclusive(rng, 1, MAX_TRAFFIC)
    } else {
        max.clamp(0, MAX_TRAFFIC as i64) as u64
    }
}

fn resolve_limit<R: Rng + ?Sized>(limit: i64, max: u64, default: u64, rng: &mut R) -> u64 {
    match limit {
        RANDOM => uniform_inclusive(rng, 0, max),
        i64::MIN..=-2 => default,
        limit => (limit as u64).min(max),
    }
}
