/*!
# Switch statistics simulator

Synthesizes the interface counters of a network switch: octets, packets
(broadcast, multicast, unicast), errors, per-second rates and
utilization, as they would be observed after running for a given number
of seconds.

A run is a sequence of ticks (one simulated second each). At every tick
the standard ports generate their own traffic, the broadcast and multicast
are flooded to every other port, the looped ports (if any) receive the
flooded traffic back and all the ports are rolled up into the primary
uplink.

```
use switchstat_core::{report, Simulation, SimulationConfig};

let config = SimulationConfig {
    total_ports: 4,
    loop_mode: 0,
    runtime: 60,
    ..SimulationConfig::default()
};

// the same seed always gives the same counters
let mut simulation = Simulation::new(&config, 42);
simulation.run();

let text = report::render(simulation.interfaces());
assert!(text.contains(" Port 4 Counters:"));
```

Nothing in the simulation fails: out of range values are saturated to the
nearest bound and enumerated values outside of their allow-list are stored
as unset. Only parsing user input (see [`MacSeed`]) returns errors.
*/

mod aggregation;
pub mod config;
pub mod counters;
pub mod defaults;
mod mac;
pub mod random;
pub mod report;
mod simulation;
pub mod topology;
mod traffic;

pub use self::{
    aggregation::AggregationEngine,
    config::{LoopMode, Scenario, SimulationConfig, TrafficRate},
    counters::BoundedCounterSet,
    mac::{MacAddress, MacSeed, MacSeedError},
    simulation::{Simulation, Tick},
    topology::{Interface, InterfaceId, LoopPorts, Role, Topology, Vlan},
    traffic::{TickTotals, TrafficGenerator},
};
