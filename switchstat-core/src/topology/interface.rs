use super::InterfaceId;
use crate::{counters::BoundedCounterSet, mac::MacAddress};
use std::fmt;

/// What an interface is used for in the simulated switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// An access port generating its own traffic.
    #[default]
    Standard,
    /// The trunk every other port is rolled up into.
    Uplink1,
    /// The backup trunk, it only carries control traffic.
    Uplink2,
    /// A standard port that also re-injects the flooded traffic.
    Loop1,
    Loop2,
}

impl Role {
    pub fn is_uplink(self) -> bool {
        matches!(self, Self::Uplink1 | Self::Uplink2)
    }

    pub fn is_loop(self) -> bool {
        matches!(self, Self::Loop1 | Self::Loop2)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Standard => "standard",
            Self::Uplink1 => "uplink1",
            Self::Uplink2 => "uplink2",
            Self::Loop1 => "loop1",
            Self::Loop2 => "loop2",
        })
    }
}

/// One port of the switch and its statistics.
///
/// Interfaces are created once by [`Topology::build`] and live for the
/// whole run, only their [`BoundedCounterSet`] changes.
///
/// [`Topology::build`]: super::Topology::build
#[derive(Debug, Clone)]
pub struct Interface {
    id: InterfaceId,
    name: String,
    mac: MacAddress,
    vlan: u16,
    role: Role,
    stats: BoundedCounterSet,
}

impl Interface {
    pub(crate) fn new(id: InterfaceId, mac: MacAddress, vlan: u16, stats: BoundedCounterSet) -> Self {
        Self {
            id,
            name: id.to_string(),
            mac,
            vlan,
            role: Role::Standard,
            stats,
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mac(&self) -> &MacAddress {
        &self.mac
    }

    /// The VLAN the interface belongs to.
    ///
    /// Unlike [`BoundedCounterSet::vlan`] this is set for the uplinks too,
    /// even though they report the tagged sentinel.
    pub fn vlan(&self) -> u16 {
        self.vlan
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn stats(&self) -> &BoundedCounterSet {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut BoundedCounterSet {
        &mut self.stats
    }

    pub(crate) fn replace_stats(&mut self, stats: BoundedCounterSet) {
        self.stats = stats;
    }
}
