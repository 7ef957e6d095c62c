//! Fixed-width text report of the final interface counters.
//!
//! Every interface is rendered as one block: a header line (link, state,
//! duplex, speed, trunk, tag, VLAN, priority, MAC and name) followed by
//! its counters in two columns, inbound on the left and outbound on the
//! right. Rendering only reads the counters, rendering the same
//! interfaces twice gives the same text.

use crate::{
    counters::{BoundedCounterSet, Counter, Direction, Rate, TrafficClass},
    topology::Interface,
};
use std::{
    fmt::{self, Display},
    io,
};

const HEADER: &str = "Port    Link    State   Dupl Speed Trunk Tag Pvid Pri    MAC             Name    \n";

/// Shown for any enumerated field that is unset.
const UNSET: &str = "None";

/// Render the report of all the `interfaces`, in order.
///
/// ```
/// use switchstat_core::{report, Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     total_ports: 4,
///     runtime: 2,
///     ..SimulationConfig::default()
/// };
/// let mut simulation = Simulation::new(&config, 0);
/// simulation.run();
///
/// let text = report::render(simulation.interfaces());
/// assert!(text.starts_with("Port    Link"));
/// assert_eq!(text.matches(" Counters:").count(), 4);
/// ```
pub fn render(interfaces: &[Interface]) -> String {
    let mut output = String::new();
    for interface in interfaces {
        // writing into a `String` does not fail
        let _ = render_interface(&mut output, interface);
    }
    output
}

/// Write the report of all the `interfaces` to `writer`.
pub fn write_report<W: io::Write>(mut writer: W, interfaces: &[Interface]) -> io::Result<()> {
    writer.write_all(render(interfaces).as_bytes())?;
    writer.flush()
}

/// Render the block of a single interface.
pub fn render_interface<W: fmt::Write>(out: &mut W, interface: &Interface) -> fmt::Result {
    let stats = interface.stats();
    let id = interface.id();

    out.write_str(HEADER)?;
    writeln!(
        out,
        "{id:<6} {link:>5} {state:>7} {duplex:>7} {speed:>4} {trunk:>5} {tag:>5} {vlan:>4} {prio} {mac} {name}\n",
        link = Field(stats.link()),
        state = Field(stats.state()),
        duplex = Field(stats.duplex()),
        speed = Field(stats.speed()),
        trunk = Field(stats.trunk()),
        tag = Field(stats.tag()),
        vlan = stats.vlan(),
        prio = Field(stats.priority()),
        mac = interface.mac(),
        name = interface.name(),
    )?;
    writeln!(out, " Port {id} Counters:{:>56}", "")?;

    pair(out, "InOctets", "OutOctets", stats, Counter::octets)?;
    pair(out, "InPkts", "OutPkts", stats, Counter::pkts)?;
    pair(out, "InBroadcastPkts", "OutBroadcastPkts", stats, |d| {
        Counter::traffic(TrafficClass::Broadcast, d)
    })?;
    pair(out, "InMulticastPkts", "OutMulticastPkts", stats, |d| {
        Counter::traffic(TrafficClass::Multicast, d)
    })?;
    pair(out, "InUnicastPkts", "OutUnicastPkts", stats, |d| {
        Counter::traffic(TrafficClass::Unicast, d)
    })?;

    single(out, "InBadPkts", stats.counter(Counter::InBadFragments))?;
    single(out, "InFragments", stats.counter(Counter::InGoodFragments))?;
    single(out, "InDiscards", stats.counter(Counter::InDiscards))?;
    writeln!(
        out,
        "{:>17} {:>20}{:>20} {:>20}",
        "CRC",
        stats.counter(Counter::CrcErrors),
        "Collisions",
        stats.counter(Counter::Collisions),
    )?;
    writeln!(
        out,
        "{:>17} {:>20}{:>20} {:>20}  ",
        "InErrors",
        stats.counter(Counter::InErrors),
        "LateCollisions",
        stats.counter(Counter::LateCollisions),
    )?;
    single(out, "InGiantPkts", stats.counter(Counter::GiantPkts))?;
    single(out, "InShortPkts", stats.counter(Counter::ShortPkts))?;
    single(out, "InJabber", stats.counter(Counter::Jabber))?;
    columns(out, "InFlowCtrlPkts", 0, "OutFlowCtrlPkts", 0)?;

    columns(
        out,
        "InBitsPerSec",
        stats.rate(Rate::InBitsPerSec),
        "OutBitsPerSec",
        stats.rate(Rate::OutBitsPerSec),
    )?;
    columns(
        out,
        "InPktsPerSec",
        stats.rate(Rate::InPktsPerSec),
        "OutPktsPerSec",
        stats.rate(Rate::OutPktsPerSec),
    )?;
    writeln!(
        out,
        "{:>17} {:>20.2}%{:>19} {:>20.2}%",
        "InUtilization",
        stats.utilization(Direction::In),
        "OutUtilization",
        stats.utilization(Direction::Out),
    )
}

/// An enumerated field, printed as `None` when unset.
struct Field<T>(Option<T>);

impl<T: Display> Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => Display::fmt(value, f),
            None => f.pad(UNSET),
        }
    }
}

fn columns<W: fmt::Write>(
    out: &mut W,
    left: &str,
    left_value: impl Display,
    right: &str,
    right_value: impl Display,
) -> fmt::Result {
    writeln!(out, "{left:>17} {left_value:>20}{right:>20} {right_value:>20}")
}

fn pair<W: fmt::Write>(
    out: &mut W,
    left: &str,
    right: &str,
    stats: &BoundedCounterSet,
    counter: impl Fn(Direction) -> Counter,
) -> fmt::Result {
    columns(
        out,
        left,
        stats.counter(counter(Direction::In)),
        right,
        stats.counter(counter(Direction::Out)),
    )
}

/// A line with only the left column, padded to the full width.
fn single<W: fmt::Write>(out: &mut W, label: &str, value: u128) -> fmt::Result {
    writeln!(out, "{label:>17} {value:>20}{:>41}", "")
}
