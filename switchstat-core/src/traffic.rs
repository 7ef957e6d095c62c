//! Per-tick traffic of the standard ports.
//!
//! Every tick, each port that is not an uplink receives:
//!
//! 1. the switch originated control traffic (RSTP hellos) on its outbound
//!    multicast, as a raw increment;
//! 2. some inbound broadcast;
//! 3. some inbound multicast;
//! 4. inbound and outbound unicast, drawn independently.
//!
//! The broadcast and multicast actually accepted by the ports are summed
//! up in [`TickTotals`] for the flooding done by the
//! [`AggregationEngine`](crate::AggregationEngine).

use crate::{
    config::{Scenario, TrafficRate},
    counters::{BoundedCounterSet, Counter, Rate},
    defaults::MULTIPLIER,
    random::uniform_inclusive,
    topology::Topology,
};
use rand_core::Rng;
use std::ops::AddAssign;

/// Broadcast and multicast received by all the standard ports during one
/// tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickTotals {
    pub broadcast: u128,
    pub multicast: u128,
}

impl AddAssign for TickTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.broadcast = self.broadcast.saturating_add(rhs.broadcast);
        self.multicast = self.multicast.saturating_add(rhs.multicast);
    }
}

/// Generates the local traffic of the standard ports.
///
/// The generator owns the random source of the simulation so that a run
/// is fully determined by the seed it started with.
#[derive(Debug, Clone)]
pub struct TrafficGenerator<R> {
    rng: R,

    broadcast: TrafficRate,
    broadcast_max: u64,
    multicast: TrafficRate,
    multicast_max: u64,
    unicast: TrafficRate,
    unicast_max: u64,
    packet_size: u32,
    rstp_hellos: u64,
}

impl<R: Rng> TrafficGenerator<R> {
    pub fn new(scenario: &Scenario, rng: R) -> Self {
        Self {
            rng,
            broadcast: scenario.broadcast,
            broadcast_max: scenario.broadcast_max,
            multicast: scenario.multicast,
            multicast_max: scenario.multicast_max,
            unicast: scenario.unicast,
            unicast_max: scenario.unicast_max,
            packet_size: scenario.packet_size,
            rstp_hellos: scenario.rstp_hellos(),
        }
    }

    /// Generate one tick of traffic on every port but the uplinks.
    ///
    /// The looped ports generate their own traffic like any other port.
    pub fn tick(&mut self, topology: &mut Topology) -> TickTotals {
        let (uplink1, uplink2) = (topology.uplink1(), topology.uplink2());

        let mut totals = TickTotals::default();
        for interface in topology.interfaces_mut() {
            if interface.id() == uplink1 || interface.id() == uplink2 {
                continue;
            }
            totals += self.generate(interface.stats_mut());
        }
        totals
    }

    /// Generate one tick of traffic on a single port.
    ///
    /// The per-second fields of `stats` are reset first, they only reflect
    /// this tick once this returns.
    pub fn generate(&mut self, stats: &mut BoundedCounterSet) -> TickTotals {
        stats.set_packet_size(i64::from(self.packet_size));
        stats.reset_per_tick();

        stats.accumulate(Counter::OutMulticastPkts, u128::from(self.rstp_hellos));

        let broadcast = self.amount(self.broadcast, self.broadcast_max, stats.broadcast_limit());
        let broadcast = stats.add_counter(Counter::InBroadcastPkts, broadcast);

        let multicast = self.amount(self.multicast, self.multicast_max, stats.multicast_limit());
        let multicast = stats.add_counter(Counter::InMulticastPkts, multicast);

        let ceiling = self.unicast_ceiling(stats);
        let inbound = u128::from(uniform_inclusive(&mut self.rng, 0, ceiling));
        let outbound = u128::from(uniform_inclusive(&mut self.rng, 0, ceiling));
        stats.add_counter(Counter::InUnicastPkts, inbound);
        stats.add_counter(Counter::OutUnicastPkts, outbound);

        let bits_per_pkt = u128::from(stats.packet_size()) * 8;
        let in_bits = stats.rate(Rate::InPktsPerSec).saturating_mul(bits_per_pkt);
        let out_bits = stats.rate(Rate::OutPktsPerSec).saturating_mul(bits_per_pkt);
        stats.add_rate(Rate::InBitsPerSec, in_bits);
        stats.add_rate(Rate::OutBitsPerSec, out_bits);

        TickTotals {
            broadcast: accepted(broadcast),
            multicast: accepted(multicast),
        }
    }

    /// Broadcast or multicast amount of this tick.
    ///
    /// A random rate is drawn in `[0, limit]`, a fixed rate is capped by
    /// `max` unless `max` is `0`.
    fn amount(&mut self, rate: TrafficRate, max: u64, limit: u128) -> u128 {
        match rate {
            TrafficRate::Random => {
                let limit = u64::try_from(limit).unwrap_or(u64::MAX);
                u128::from(uniform_inclusive(&mut self.rng, 0, limit))
            }
            TrafficRate::Fixed(nominal) if max > 0 => u128::from(nominal.min(max)),
            TrafficRate::Fixed(nominal) => u128::from(nominal),
        }
    }

    /// Upper bound of the unicast packets drawn in each direction.
    fn unicast_ceiling(&self, stats: &BoundedCounterSet) -> u64 {
        let mbps = match self.unicast {
            TrafficRate::Random => {
                let speed = stats.speed_mbps();
                let max = u128::from(self.unicast_max);
                if max > 0 && max < speed { max } else { speed }
            }
            TrafficRate::Fixed(nominal) => u128::from(nominal),
        };
        let ceiling = mbps * MULTIPLIER / u128::from(stats.packet_size());
        u64::try_from(ceiling).unwrap_or(u64::MAX)
    }
}

fn accepted(delta: i128) -> u128 {
    u128::try_from(delta).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SimulationConfig,
        counters::Direction,
        topology::InterfaceId,
    };
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng as _;

    fn rng() -> ChaChaRng {
        ChaChaRng::seed_from_u64(42)
    }

    fn scenario(config: SimulationConfig) -> Scenario {
        Scenario::resolve(&config, &mut rng())
    }

    fn fixed() -> SimulationConfig {
        SimulationConfig {
            total_ports: 4,
            loop_mode: 0,
            runtime: 10,
            broadcast: 5,
            multicast: 2,
            unicast: 10,
            packet_size: 1_000,
            ..SimulationConfig::default()
        }
    }

    fn port() -> BoundedCounterSet {
        BoundedCounterSet::standard(1, 1_024, 1_024)
    }

    #[test]
    fn fixed_broadcast_and_multicast() {
        let mut generator = TrafficGenerator::new(&scenario(fixed()), rng());
        let mut stats = port();

        let totals = generator.generate(&mut stats);

        assert_eq!(totals, TickTotals { broadcast: 5, multicast: 2 });
        assert_eq!(stats.counter(Counter::InBroadcastPkts), 5);
        assert_eq!(stats.counter(Counter::InMulticastPkts), 2);
        assert_eq!(stats.packet_size(), 1_000);
    }

    #[test]
    fn hellos_are_added_to_outbound_multicast() {
        let mut generator = TrafficGenerator::new(&scenario(fixed()), rng());
        let mut stats = port();

        generator.generate(&mut stats);
        assert_eq!(stats.counter(Counter::OutMulticastPkts), 5);
        generator.generate(&mut stats);
        assert_eq!(stats.counter(Counter::OutMulticastPkts), 10);
    }

    #[test]
    fn fixed_rate_is_capped_by_max() {
        let mut generator = TrafficGenerator::new(
            &scenario(SimulationConfig {
                broadcast: 500,
                broadcast_max: 20,
                multicast: 500,
                multicast_max: 30,
                ..fixed()
            }),
            rng(),
        );
        let totals = generator.generate(&mut port());
        assert_eq!(totals, TickTotals { broadcast: 20, multicast: 30 });
    }

    #[test]
    fn fixed_rate_is_bounded_by_limit() {
        let mut generator = TrafficGenerator::new(
            &scenario(SimulationConfig {
                broadcast: 5_000,
                broadcast_limit: 100,
                ..fixed()
            }),
            rng(),
        );
        let mut stats = BoundedCounterSet::standard(1, 100, 1_024);
        let totals = generator.generate(&mut stats);
        assert_eq!(totals.broadcast, 100);
        assert_eq!(stats.counter(Counter::InBroadcastPkts), 100);
    }

    #[test]
    fn random_broadcast_and_multicast_stay_within_limits() {
        let mut generator = TrafficGenerator::new(
            &scenario(SimulationConfig {
                broadcast: -1,
                multicast: -1,
                ..fixed()
            }),
            rng(),
        );
        let mut stats = BoundedCounterSet::standard(1, 50, 70);

        for _ in 0..100 {
            let totals = generator.generate(&mut stats);
            assert!(totals.broadcast <= 50);
            assert!(totals.multicast <= 70);
        }
    }

    #[test]
    fn unicast_stays_within_ceiling() {
        let mut generator = TrafficGenerator::new(&scenario(fixed()), rng());
        let mut stats = port();

        let mut previous = (0, 0);
        for _ in 0..50 {
            generator.generate(&mut stats);
            let current = (
                stats.counter(Counter::InUnicastPkts),
                stats.counter(Counter::OutUnicastPkts),
            );
            // 10 Mbit/s of 1000 bytes packets
            assert!(current.0 - previous.0 <= 10_000);
            assert!(current.1 - previous.1 <= 10_000);
            previous = current;
        }
    }

    #[test]
    fn random_unicast_ceiling_uses_max_below_speed() {
        let generator = TrafficGenerator::new(
            &scenario(SimulationConfig {
                unicast: 0,
                unicast_max: 10,
                ..fixed()
            }),
            rng(),
        );
        let mut stats = port();
        stats.set_packet_size(1_000);
        assert_eq!(generator.unicast_ceiling(&stats), 10_000);

        let generator = TrafficGenerator::new(
            &scenario(SimulationConfig {
                unicast: 0,
                unicast_max: 0,
                ..fixed()
            }),
            rng(),
        );
        assert_eq!(generator.unicast_ceiling(&stats), 100_000);
    }

    #[test]
    fn rates_reflect_the_current_tick() {
        let mut generator = TrafficGenerator::new(&scenario(fixed()), rng());
        let mut stats = port();

        for _ in 0..3 {
            generator.generate(&mut stats);

            let in_pkts = stats.rate(Rate::InPktsPerSec);
            let out_pkts = stats.rate(Rate::OutPktsPerSec);
            assert!(in_pkts >= 2, "multicast is part of the inbound rate");
            assert!(in_pkts <= stats.pkts_per_sec_ceiling());
            assert_eq!(stats.rate(Rate::InBitsPerSec), in_pkts * 8_000);
            assert_eq!(stats.rate(Rate::OutBitsPerSec), out_pkts * 8_000);
            assert!(stats.utilization(Direction::In) <= 100.0);
        }
    }

    #[test]
    fn tick_skips_uplinks() {
        let config = fixed();
        let mut rng = rng();
        let scenario = Scenario::resolve(&config, &mut rng);
        let mut topology = Topology::build(&config, &scenario, &mut rng);
        let mut generator = TrafficGenerator::new(&scenario, rng);

        let totals = generator.tick(&mut topology);

        assert_eq!(totals, TickTotals { broadcast: 10, multicast: 4 });
        for id in [1, 2] {
            let stats = topology.interface(InterfaceId::new(id)).unwrap().stats();
            assert_eq!(stats.counter(Counter::InBroadcastPkts), 0);
            assert_eq!(stats.counter(Counter::OutMulticastPkts), 0);
        }
    }

    #[test]
    fn same_seed_same_traffic() {
        let scenario = scenario(SimulationConfig {
            broadcast: -1,
            multicast: -1,
            unicast: 0,
            ..fixed()
        });
        let run = |seed| {
            let mut generator = TrafficGenerator::new(&scenario, ChaChaRng::seed_from_u64(seed));
            let mut stats = port();
            for _ in 0..10 {
                generator.generate(&mut stats);
            }
            stats
        };
        assert_eq!(run(3), run(3));
    }
}
