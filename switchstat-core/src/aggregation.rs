//! Switch-wide effects of a tick, applied after every port generated its
//! own traffic.
//!
//! * **fan-out**: the broadcast and multicast received by the standard
//!   ports are flooded out of every port but the uplinks;
//! * **loop injection**: once the loop is active, the looped ports receive
//!   the flooded traffic back on their inbound side;
//! * **roll-up**: the counters of every port but the uplinks are summed
//!   into uplink1.
//!
//! The uplinks are not bounded by the per-tick ceilings of a single port:
//! the roll-up uses raw increments ([`BoundedCounterSet::accumulate`]).

use crate::{
    config::Scenario,
    counters::{BoundedCounterSet, Counter, Direction, Rate, TrafficClass},
    topology::{Interface, Topology},
    traffic::TickTotals,
};
use tracing::debug;

/// Applies fan-out, loop injection and uplink roll-up to a [`Topology`].
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    scenario: Scenario,
}

impl AggregationEngine {
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            scenario: scenario.clone(),
        }
    }

    /// Prepare the uplinks for a new tick: their per-second fields are
    /// reset and they receive the control traffic in both directions.
    pub fn begin_tick(&self, topology: &mut Topology) {
        for uplink in [topology.uplink1(), topology.uplink2()] {
            if let Some(interface) = topology.interface_mut(uplink) {
                let stats = interface.stats_mut();
                stats.reset_per_tick();
                for direction in Direction::BOTH {
                    stats.accumulate(
                        Counter::traffic(TrafficClass::Multicast, direction),
                        u128::from(self.scenario.rstp_hellos()),
                    );
                }
            }
        }
    }

    /// Everything that happens after the generation pass of `tick`.
    pub fn end_tick(&self, topology: &mut Topology, tick: u64, totals: TickTotals) {
        self.fan_out(topology, totals);
        if self.scenario.loop_active(tick) {
            if tick == self.scenario.loop_after {
                debug!(tick, "loop activated");
            }
            self.inject_loops(topology, totals);
        }
        self.aggregate(topology);
    }

    /// Flood the tick's broadcast and multicast out of every port but the
    /// uplinks.
    pub fn fan_out(&self, topology: &mut Topology, totals: TickTotals) {
        let (uplink1, uplink2) = (topology.uplink1(), topology.uplink2());

        for interface in topology.interfaces_mut() {
            if interface.id() == uplink1 || interface.id() == uplink2 {
                continue;
            }
            let stats = interface.stats_mut();
            stats.add_counter(Counter::OutBroadcastPkts, totals.broadcast);
            stats.add_counter(Counter::OutMulticastPkts, totals.multicast);
            stats.add_rate(Rate::OutPktsPerSec, totals.broadcast);
        }
    }

    /// Re-inject the tick's flooded traffic in the looped ports.
    pub fn inject_loops(&self, topology: &mut Topology, totals: TickTotals) {
        for port in topology.loops().iter() {
            let Some(interface) = topology.interface_mut(port) else {
                continue;
            };
            let stats = interface.stats_mut();
            stats.add_counter(Counter::InBroadcastPkts, totals.broadcast);
            stats.add_counter(Counter::InMulticastPkts, totals.multicast);
            stats.add_rate(Rate::InPktsPerSec, totals.broadcast);
            stats.set_packet_size(i64::from(self.scenario.packet_size));
        }
    }

    /// Sum the counters of every port but the uplinks into uplink1.
    ///
    /// The cumulative values of the ports are added as they are, every
    /// tick.
    pub fn aggregate(&self, topology: &mut Topology) {
        let (uplink1, uplink2) = (topology.uplink1(), topology.uplink2());
        let interfaces = topology.interfaces_mut();
        let Some(target) = interfaces.iter().position(|i| i.id() == uplink1) else {
            return;
        };

        for source in 0..interfaces.len() {
            let id = interfaces[source].id();
            if id == uplink1 || id == uplink2 {
                continue;
            }
            let (target, source) = pair_mut(interfaces, target, source);
            roll_up(target.stats_mut(), source.stats());
        }
    }
}

/// Borrow `interfaces[target]` mutably along with `interfaces[source]`.
fn pair_mut(
    interfaces: &mut [Interface],
    target: usize,
    source: usize,
) -> (&mut Interface, &Interface) {
    debug_assert_ne!(target, source);
    if target < source {
        let (left, right) = interfaces.split_at_mut(source);
        (&mut left[target], &right[0])
    } else {
        let (left, right) = interfaces.split_at_mut(target);
        (&mut right[0], &left[source])
    }
}

/// Add the counters of `source` to the ones of the uplink `target`.
///
/// Broadcast and multicast keep their direction, unicast and the rates
/// are crossed: what the port sends is received by the uplink and the
/// other way around.
fn roll_up(target: &mut BoundedCounterSet, source: &BoundedCounterSet) {
    for class in [TrafficClass::Broadcast, TrafficClass::Multicast] {
        for direction in Direction::BOTH {
            let counter = Counter::traffic(class, direction);
            target.accumulate(counter, source.counter(counter));
        }
    }
    for direction in Direction::BOTH {
        target.accumulate(
            Counter::traffic(TrafficClass::Unicast, direction.reverse()),
            source.counter(Counter::traffic(TrafficClass::Unicast, direction)),
        );
    }

    for counter in Counter::PLAIN {
        target.accumulate(counter, source.counter(counter));
    }

    for direction in Direction::BOTH {
        target.add_rate(
            Rate::bits(direction.reverse()),
            source.rate(Rate::bits(direction)),
        );
        target.add_rate(
            Rate::pkts(direction.reverse()),
            source.rate(Rate::pkts(direction)),
        );
    }

    target.set_packet_size(i64::from(source.packet_size()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimulationConfig, topology::InterfaceId};
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng as _;

    fn setup(config: SimulationConfig) -> (Topology, AggregationEngine) {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let scenario = Scenario::resolve(&config, &mut rng);
        let topology = Topology::build(&config, &scenario, &mut rng);
        (topology, AggregationEngine::new(&scenario))
    }

    fn four_ports() -> SimulationConfig {
        SimulationConfig {
            total_ports: 4,
            loop_mode: 0,
            runtime: 4,
            packet_size: 1_000,
            ..SimulationConfig::default()
        }
    }

    fn stats(topology: &Topology, id: u32) -> &BoundedCounterSet {
        topology.interface(InterfaceId::new(id)).unwrap().stats()
    }

    const TOTALS: TickTotals = TickTotals {
        broadcast: 10,
        multicast: 4,
    };

    #[test]
    fn begin_tick_resets_uplinks_and_adds_hellos() {
        let (mut topology, engine) = setup(four_ports());
        topology
            .interface_mut(InterfaceId::new(1))
            .unwrap()
            .stats_mut()
            .set_rate(Rate::InBitsPerSec, 1_000);

        engine.begin_tick(&mut topology);

        for id in [1, 2] {
            let stats = stats(&topology, id);
            assert_eq!(stats.rate(Rate::InBitsPerSec), 0);
            assert_eq!(stats.counter(Counter::InMulticastPkts), 2);
            assert_eq!(stats.counter(Counter::OutMulticastPkts), 2);
            assert_eq!(stats.counter(Counter::InPkts), 2);
        }
        assert_eq!(stats(&topology, 3).counter(Counter::InMulticastPkts), 0);
    }

    #[test]
    fn fan_out_floods_standard_ports_only() {
        let (mut topology, engine) = setup(four_ports());

        engine.fan_out(&mut topology, TOTALS);

        for id in [3, 4] {
            let stats = stats(&topology, id);
            assert_eq!(stats.counter(Counter::OutBroadcastPkts), 10);
            assert_eq!(stats.counter(Counter::OutMulticastPkts), 4);
            assert_eq!(stats.counter(Counter::OutPkts), 14);
            assert_eq!(stats.rate(Rate::OutPktsPerSec), 14);
            assert_eq!(stats.counter(Counter::InBroadcastPkts), 0);
        }
        for id in [1, 2] {
            assert_eq!(stats(&topology, id).counter(Counter::OutBroadcastPkts), 0);
        }
    }

    #[test]
    fn loops_receive_flooded_traffic() {
        let (mut topology, engine) = setup(SimulationConfig {
            loop_mode: 1,
            loop_interface1: 3,
            ..four_ports()
        });

        engine.inject_loops(&mut topology, TOTALS);

        let looped = stats(&topology, 3);
        assert_eq!(looped.counter(Counter::InBroadcastPkts), 10);
        assert_eq!(looped.counter(Counter::InMulticastPkts), 4);
        assert_eq!(looped.rate(Rate::InPktsPerSec), 14);
        assert_eq!(looped.packet_size(), 1_000);
        assert_eq!(stats(&topology, 4).counter(Counter::InBroadcastPkts), 0);
    }

    #[test]
    fn loop_waits_for_activation_tick() {
        let (mut topology, engine) = setup(SimulationConfig {
            loop_mode: 1,
            loop_interface1: 4,
            loop_after: 2,
            ..four_ports()
        });

        engine.end_tick(&mut topology, 0, TOTALS);
        engine.end_tick(&mut topology, 1, TOTALS);
        assert_eq!(stats(&topology, 4).counter(Counter::InBroadcastPkts), 0);

        engine.end_tick(&mut topology, 2, TOTALS);
        assert_eq!(stats(&topology, 4).counter(Counter::InBroadcastPkts), 10);
    }

    #[test]
    fn aggregate_sums_ports_into_uplink1() {
        let (mut topology, engine) = setup(four_ports());
        for id in [3, 4] {
            let stats = topology.interface_mut(InterfaceId::new(id)).unwrap().stats_mut();
            stats.add_counter(Counter::InBroadcastPkts, 5);
            stats.add_counter(Counter::OutMulticastPkts, 3);
            stats.add_counter(Counter::InUnicastPkts, 100);
            stats.add_counter(Counter::OutUnicastPkts, 40);
            stats.set_counter(Counter::CrcErrors, 2);
            stats.set_rate(Rate::InBitsPerSec, 800);
        }

        engine.aggregate(&mut topology);

        let uplink = stats(&topology, 1);
        assert_eq!(uplink.counter(Counter::InBroadcastPkts), 10);
        assert_eq!(uplink.counter(Counter::OutMulticastPkts), 6);
        assert_eq!(uplink.counter(Counter::OutUnicastPkts), 200);
        assert_eq!(uplink.counter(Counter::InUnicastPkts), 80);
        assert_eq!(uplink.counter(Counter::CrcErrors), 4);
        assert_eq!(uplink.rate(Rate::OutBitsPerSec), 1_600);
        assert_eq!(uplink.counter(Counter::InPkts), 10 + 80);
        assert_eq!(uplink.packet_size(), 1_024);

        let backup = stats(&topology, 2);
        assert_eq!(backup.counter(Counter::InBroadcastPkts), 0);
    }

    #[test]
    fn uplink_can_exceed_a_port_ceiling() {
        let (mut topology, engine) = setup(SimulationConfig {
            broadcast_limit: 100,
            ..four_ports()
        });
        for id in [3, 4] {
            let stats = topology.interface_mut(InterfaceId::new(id)).unwrap().stats_mut();
            stats.add_counter(Counter::InBroadcastPkts, 100);
        }

        engine.aggregate(&mut topology);
        assert_eq!(stats(&topology, 1).counter(Counter::InBroadcastPkts), 200);
    }

    #[test]
    fn aggregate_with_uplink_in_the_middle() {
        let (mut topology, engine) = setup(SimulationConfig {
            uplink1: 3,
            uplink2: 4,
            ..four_ports()
        });
        for id in [1, 2] {
            let stats = topology.interface_mut(InterfaceId::new(id)).unwrap().stats_mut();
            stats.add_counter(Counter::InBroadcastPkts, 7);
        }

        engine.aggregate(&mut topology);
        assert_eq!(stats(&topology, 3).counter(Counter::InBroadcastPkts), 14);
    }

    #[test]
    fn pair_mut_both_orders() {
        let (mut topology, _) = setup(four_ports());
        let interfaces = topology.interfaces_mut();

        let (target, source) = pair_mut(interfaces, 0, 3);
        assert_eq!((target.id().into_u32(), source.id().into_u32()), (1, 4));
        let (target, source) = pair_mut(interfaces, 3, 0);
        assert_eq!((target.id().into_u32(), source.id().into_u32()), (4, 1));
    }
}
