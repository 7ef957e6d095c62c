use switchstat_core::{
    config::RANDOM,
    counters::{BoundedCounterSet, Counter, Direction, Rate},
    report, InterfaceId, Simulation, SimulationConfig,
};

fn four_ports() -> SimulationConfig {
    SimulationConfig {
        total_ports: 4,
        uplink1: 1,
        uplink2: 2,
        loop_mode: 0,
        runtime: 1,
        broadcast: 5,
        multicast: 2,
        unicast: 10,
        packet_size: 1_024,
        ..SimulationConfig::default()
    }
}

fn stats(simulation: &Simulation, id: u32) -> &BoundedCounterSet {
    simulation
        .topology()
        .interface(InterfaceId::new(id))
        .expect("interface exists")
        .stats()
}

#[test]
fn one_tick_on_four_ports() {
    let mut simulation = Simulation::new(&four_ports(), 42);
    simulation.run();

    for id in [3, 4] {
        let port = stats(&simulation, id);
        assert_eq!(port.counter(Counter::InBroadcastPkts), 5);
        assert!(port.counter(Counter::InMulticastPkts) >= 2);
        // a one second run sends no hellos, only the flooded multicast
        assert_eq!(port.counter(Counter::OutMulticastPkts), 4);
        assert_eq!(port.counter(Counter::OutBroadcastPkts), 10);
    }

    let uplink1 = stats(&simulation, 1);
    assert_eq!(uplink1.counter(Counter::InBroadcastPkts), 10);
    assert_eq!(uplink1.counter(Counter::OutBroadcastPkts), 20);

    let uplink2 = stats(&simulation, 2);
    assert_eq!(uplink2.counter(Counter::InBroadcastPkts), 0);
    assert_eq!(uplink2.counter(Counter::InUnicastPkts), 0);
}

#[test]
fn looped_port_receives_flooded_traffic() {
    let config = SimulationConfig {
        loop_mode: 1,
        loop_interface1: 3,
        loop_after: 0,
        runtime: 2,
        ..four_ports()
    };
    let mut simulation = Simulation::new(&config, 42);

    simulation.step();
    // 5 generated locally and 10 flooded back by the loop
    assert_eq!(stats(&simulation, 3).counter(Counter::InBroadcastPkts), 15);
    assert_eq!(stats(&simulation, 4).counter(Counter::InBroadcastPkts), 5);

    simulation.step();
    assert_eq!(stats(&simulation, 3).counter(Counter::InBroadcastPkts), 30);
    assert_eq!(stats(&simulation, 4).counter(Counter::InBroadcastPkts), 10);
    assert_eq!(
        stats(&simulation, 3).counter(Counter::InMulticastPkts),
        stats(&simulation, 4).counter(Counter::InMulticastPkts) + 2 * 4
    );
}

#[test]
fn loop_starts_after_the_configured_tick() {
    let config = SimulationConfig {
        loop_mode: 1,
        loop_interface1: 4,
        loop_after: 3,
        runtime: 5,
        ..four_ports()
    };
    let mut simulation = Simulation::new(&config, 42);

    for _ in 0..3 {
        simulation.step();
    }
    assert_eq!(
        stats(&simulation, 4).counter(Counter::InBroadcastPkts),
        stats(&simulation, 3).counter(Counter::InBroadcastPkts)
    );

    simulation.step();
    assert_eq!(
        stats(&simulation, 4).counter(Counter::InBroadcastPkts),
        stats(&simulation, 3).counter(Counter::InBroadcastPkts) + 10
    );
}

#[test]
fn zero_broadcast_and_multicast_are_drawn_at_random() {
    let config = SimulationConfig {
        broadcast: 0,
        multicast: 0,
        runtime: 50,
        ..four_ports()
    };
    let mut simulation = Simulation::new(&config, 42);
    simulation.run();

    let port = stats(&simulation, 3);
    assert!(port.counter(Counter::InBroadcastPkts) > 0);
    assert!(port.counter(Counter::InMulticastPkts) > 0);
}

#[test]
fn unlisted_uplink_speed_keeps_the_uplinks_rates() {
    let config = SimulationConfig {
        uplink_speed: 500,
        runtime: 3,
        ..four_ports()
    };
    let mut simulation = Simulation::new(&config, 42);
    simulation.run();

    let uplink1 = stats(&simulation, 1);
    assert_eq!(uplink1.speed_mbps(), 100);
    assert!(uplink1.pkts_per_sec_ceiling() > 0);
    assert!(uplink1.rate(Rate::OutPktsPerSec) > 0);
}

#[test]
fn random_configuration_is_resolved_once() {
    let config = SimulationConfig {
        total_ports: RANDOM,
        uplink_speed: RANDOM,
        vlan: RANDOM,
        packet_size: RANDOM,
        broadcast_limit: RANDOM,
        multicast_limit: RANDOM,
        runtime: 20,
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::new(&config, 9);
    let before = simulation.scenario().clone();

    assert!((2..=684).contains(&before.total_ports));
    assert!((84..=1_500).contains(&before.packet_size));
    assert!((1..=4_095).contains(&before.vlan));

    simulation.run();

    assert_eq!(simulation.scenario(), &before);
    assert_eq!(simulation.interfaces().len(), before.total_ports as usize);
    assert_eq!(simulation.topology().vlan().id(), before.vlan);
}

#[test]
fn everything_random_stays_in_bounds() {
    let config = SimulationConfig {
        total_ports: 24,
        uplink1: RANDOM,
        uplink2: RANDOM,
        uplink_speed: RANDOM,
        loop_mode: RANDOM,
        vlan: RANDOM,
        root: RANDOM,
        broadcast: RANDOM,
        broadcast_max: RANDOM,
        broadcast_limit: RANDOM,
        multicast: RANDOM,
        multicast_max: RANDOM,
        multicast_limit: RANDOM,
        unicast: RANDOM,
        unicast_max: RANDOM,
        packet_size: RANDOM,
        runtime: 30,
        ..SimulationConfig::default()
    };

    let mut simulation = Simulation::new(&config, 1234);
    let mut ticks = 0;
    simulation.run_with(|_| ticks += 1);
    assert_eq!(ticks, 30);

    for interface in simulation.interfaces() {
        let stats = interface.stats();
        for direction in Direction::BOTH {
            let utilization = stats.utilization(direction);
            assert!((0.0..=100.0).contains(&utilization), "{utilization}");
            assert!(stats.rate(Rate::pkts(direction)) <= stats.pkts_per_sec_ceiling());
            assert!(stats.rate(Rate::bits(direction)) <= stats.bits_per_sec_ceiling());
        }
    }
}

#[test]
fn same_seed_same_report() {
    let config = SimulationConfig {
        total_ports: 12,
        vlan: RANDOM,
        unicast: RANDOM,
        runtime: 10,
        ..SimulationConfig::default()
    };

    let render = |seed| {
        let mut simulation = Simulation::new(&config, seed);
        simulation.run();
        report::render(simulation.interfaces())
    };

    assert_eq!(render(77), render(77));
}

#[test]
fn report_is_idempotent() {
    let mut simulation = Simulation::new(&four_ports(), 3);
    simulation.run();

    let first = report::render(simulation.interfaces());
    let second = report::render(simulation.interfaces());
    assert_eq!(first, second);

    let mut written = Vec::new();
    report::write_report(&mut written, simulation.interfaces()).unwrap();
    assert_eq!(written, first.into_bytes());
}
