//! The interfaces of the simulated switch and their roles.
//!
//! [`Topology::build`] creates the `1..=N` interfaces once, resolves which
//! ones are the uplinks and the looped ports and gives them their counter
//! profile. From then on the set of interfaces never changes, only their
//! counters do.
//!
//! ```
//! use rand_chacha::ChaChaRng;
//! use rand_core::SeedableRng as _;
//! use switchstat_core::{InterfaceId, Role, Scenario, SimulationConfig, Topology};
//!
//! let config = SimulationConfig {
//!     total_ports: 8,
//!     loop_mode: 1,
//!     loop_interface1: 5,
//!     ..SimulationConfig::default()
//! };
//! let mut rng = ChaChaRng::seed_from_u64(0);
//! let scenario = Scenario::resolve(&config, &mut rng);
//! let topology = Topology::build(&config, &scenario, &mut rng);
//!
//! assert_eq!(topology.interfaces().len(), 8);
//! assert_eq!(topology.uplink1(), InterfaceId::new(1));
//! assert_eq!(topology.interface(InterfaceId::new(5)).unwrap().role(), Role::Loop1);
//! ```

mod id;
mod interface;
mod vlan;

pub use self::{
    id::InterfaceId,
    interface::{Interface, Role},
    vlan::Vlan,
};
use crate::{
    config::{Scenario, SimulationConfig},
    counters::BoundedCounterSet,
    defaults::{DEFAULT_UPLINK1, DEFAULT_UPLINK2},
    random::{choose, uniform_inclusive},
};
use rand_core::Rng;
use tracing::{debug, warn};

/// The looped ports of a run, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopPorts {
    first: Option<InterfaceId>,
    second: Option<InterfaceId>,
}

impl LoopPorts {
    pub fn first(&self) -> Option<InterfaceId> {
        self.first
    }

    pub fn second(&self) -> Option<InterfaceId> {
        self.second
    }

    pub fn iter(&self) -> impl Iterator<Item = InterfaceId> {
        self.first.into_iter().chain(self.second)
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

/// All the interfaces of the switch, ordered by id.
#[derive(Debug, Clone)]
pub struct Topology {
    interfaces: Vec<Interface>,
    vlan: Vlan,
    uplink1: InterfaceId,
    uplink2: InterfaceId,
    loops: LoopPorts,
}

impl Topology {
    /// Create the interfaces of the switch.
    ///
    /// The port ids requested in `config` are resolved against the number
    /// of ports of the `scenario`: ids that are out of range, or that
    /// collide with a port already assigned, are replaced by a uniform
    /// draw from `rng` over the ports still free.
    pub fn build<R: Rng + ?Sized>(
        config: &SimulationConfig,
        scenario: &Scenario,
        rng: &mut R,
    ) -> Self {
        let total = scenario.total_ports;

        let uplink1 = resolve_uplink1(config.uplink1, total, rng);
        let uplink2 = resolve_uplink2(config.uplink2, uplink1, total, rng);

        let mut loops = LoopPorts::default();
        if scenario.loop_mode.ports() >= 1 {
            loops.first = resolve_loop(config.loop_interface1, &[uplink1, uplink2], total, rng);
        }
        if scenario.loop_mode.ports() >= 2 {
            let mut taken = vec![uplink1, uplink2];
            taken.extend(loops.first);
            loops.second = resolve_loop(config.loop_interface2, &taken, total, rng);
        }

        let root = resolve_root(config.root, uplink1, total, rng);

        let mut interfaces = Vec::with_capacity(total as usize);
        let mut id = InterfaceId::FIRST;
        while id.into_u32() <= total {
            let stats = BoundedCounterSet::standard(
                scenario.vlan,
                scenario.broadcast_limit,
                scenario.multicast_limit,
            );
            interfaces.push(Interface::new(
                id,
                config.mac_seed.address(id.into_u32()),
                scenario.vlan,
                stats,
            ));
            id = id.next();
        }

        for (uplink, role, level) in [(uplink1, Role::Uplink1, 1), (uplink2, Role::Uplink2, 2)] {
            if let Some(interface) = interfaces.get_mut(uplink.index()) {
                let mut stats = BoundedCounterSet::trunked(scenario.uplink_speed);
                stats.set_uplink_role(level);
                interface.replace_stats(stats);
                interface.set_role(role);
            }
        }
        for (port, role) in [(loops.first, Role::Loop1), (loops.second, Role::Loop2)] {
            if let Some(interface) = port.and_then(|port| interfaces.get_mut(port.index())) {
                interface.set_role(role);
            }
        }

        let mut vlan = Vlan::new(scenario.vlan, root);
        vlan.add_tagged(uplink1);
        vlan.add_tagged(uplink2);
        for interface in &interfaces {
            if !interface.role().is_uplink() {
                vlan.add_untagged(interface.id());
            }
        }

        debug!(
            ports = total,
            %uplink1,
            %uplink2,
            loop1 = ?loops.first,
            loop2 = ?loops.second,
            vlan = scenario.vlan,
            %root,
            "topology resolved"
        );

        Self {
            interfaces,
            vlan,
            uplink1,
            uplink2,
            loops,
        }
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub(crate) fn interfaces_mut(&mut self) -> &mut [Interface] {
        &mut self.interfaces
    }

    pub fn into_interfaces(self) -> Vec<Interface> {
        self.interfaces
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&Interface> {
        self.interfaces
            .get(id.index())
            .filter(|interface| interface.id() == id)
    }

    pub fn interface_mut(&mut self, id: InterfaceId) -> Option<&mut Interface> {
        self.interfaces
            .get_mut(id.index())
            .filter(|interface| interface.id() == id)
    }

    pub fn uplink1(&self) -> InterfaceId {
        self.uplink1
    }

    pub fn uplink2(&self) -> InterfaceId {
        self.uplink2
    }

    pub fn is_uplink(&self, id: InterfaceId) -> bool {
        id == self.uplink1 || id == self.uplink2
    }

    pub fn loops(&self) -> LoopPorts {
        self.loops
    }

    pub fn vlan(&self) -> &Vlan {
        &self.vlan
    }
}

fn in_range(id: i64, total: u32) -> bool {
    (1..=i64::from(total)).contains(&id)
}

fn random_port<R: Rng + ?Sized>(total: u32, rng: &mut R) -> InterfaceId {
    InterfaceId::new(uniform_inclusive(rng, 1, u64::from(total)) as u32)
}

/// Pick a port uniformly among the ones not in `taken`.
fn free_port<R: Rng + ?Sized>(taken: &[InterfaceId], total: u32, rng: &mut R) -> Option<InterfaceId> {
    let free: Vec<InterfaceId> = (1..=total)
        .map(InterfaceId::new)
        .filter(|id| !taken.contains(id))
        .collect();
    choose(rng, &free).copied()
}

fn resolve_uplink1<R: Rng + ?Sized>(requested: i64, total: u32, rng: &mut R) -> InterfaceId {
    if requested > i64::from(total) {
        InterfaceId::new(DEFAULT_UPLINK1)
    } else if requested < 1 {
        random_port(total, rng)
    } else {
        InterfaceId::new(requested as u32)
    }
}

fn resolve_uplink2<R: Rng + ?Sized>(
    requested: i64,
    uplink1: InterfaceId,
    total: u32,
    rng: &mut R,
) -> InterfaceId {
    let candidate = if requested > i64::from(total) {
        Some(InterfaceId::new(DEFAULT_UPLINK2))
    } else if requested < 1 {
        None
    } else {
        Some(InterfaceId::new(requested as u32))
    };

    match candidate {
        Some(id) if id != uplink1 && id.into_u32() <= total => id,
        _ => free_port(&[uplink1], total, rng).unwrap_or(uplink1),
    }
}

fn resolve_loop<R: Rng + ?Sized>(
    requested: i64,
    taken: &[InterfaceId],
    total: u32,
    rng: &mut R,
) -> Option<InterfaceId> {
    if in_range(requested, total) {
        let id = InterfaceId::new(requested as u32);
        if !taken.contains(&id) {
            return Some(id);
        }
    }

    let port = free_port(taken, total, rng);
    if port.is_none() {
        warn!(ports = total, "no free port left for a loop, the loop is disabled");
    }
    port
}

fn resolve_root<R: Rng + ?Sized>(
    requested: i64,
    uplink1: InterfaceId,
    total: u32,
    rng: &mut R,
) -> InterfaceId {
    if requested > i64::from(total) {
        uplink1
    } else if requested < 1 {
        random_port(total, rng)
    } else {
        InterfaceId::new(requested as u32)
    }
}
