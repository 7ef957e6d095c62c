//! Statistics of a single switch interface.
//!
//! A [`BoundedCounterSet`] models the counters a switch exposes for one of
//! its ports. Every write goes through a saturating clamp: nothing in here
//! ever fails, out of range values are set to the nearest boundary and
//! enumerated values outside of their allow-list become the unset
//! sentinel (`None`).
//!
//! # Cumulative counters
//!
//! Cumulative [`Counter`]s only take *absolute* values. For the traffic
//! counters the set computes `delta = value - stored`, bounds the delta
//! with the field's per-tick ceiling and adds the accepted delta to the
//! stored total. This models a hardware counter that cannot jump further
//! than its line rate in one observation.
//!
//! ```
//! use switchstat_core::counters::{BoundedCounterSet, Counter, Direction};
//!
//! let mut stats = BoundedCounterSet::standard(1, 1_024, 1_024);
//!
//! // ask for 5_000 broadcast packets in one go, only the limit is accepted
//! let accepted = stats.add_counter(Counter::InBroadcastPkts, 5_000);
//! assert_eq!(accepted, 1_024);
//! assert_eq!(stats.counter(Counter::InBroadcastPkts), 1_024);
//! // and accounted in the totals
//! assert_eq!(stats.counter(Counter::InPkts), 1_024);
//! assert_eq!(stats.counter(Counter::InOctets), 1_024 * 8);
//! ```
//!
//! # Per-second rates
//!
//! The [`Rate`] fields are reset by [`BoundedCounterSet::reset_per_tick`]
//! and re-accumulated during the tick. The utilization is never stored,
//! it is recomputed from the current packets per second, speed and packet
//! size on every read.

mod field;
mod key;

pub use self::{
    field::{Direction, Duplex, Link, Priority, Pvid, Speed, State, Tag, Trunk, UnknownValue},
    key::{Counter, CounterKind, Rate, TrafficClass},
};
use crate::defaults::{
    COUNTER_MAX, DEFAULT_BROADCAST_LIMIT, DEFAULT_INTERFACE_SPEED, DEFAULT_MULTICAST_LIMIT,
    DEFAULT_PACKET_SIZE, MAX_PACKET_SIZE, MIN_PACKET_SIZE, MULTIPLIER,
};

/// Highest utilization percentage ever reported.
pub const UTILIZATION_MAX: f64 = 100.0;

/// Octets accounted for every accepted packet.
const OCTETS_PER_PACKET: i128 = 8;

/// Maximum value of the uplink role.
const UPLINK_ROLE_MAX: u8 = 2;

/// The statistics of one interface, see the [module](self) documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedCounterSet {
    link: Option<Link>,
    state: Option<State>,
    duplex: Option<Duplex>,
    speed: Option<Speed>,
    trunk: Option<Trunk>,
    tag: Option<Tag>,
    priority: Option<Priority>,
    vlan: Pvid,
    uplink_role: u8,
    packet_size: u32,
    broadcast_limit: u128,
    multicast_limit: u128,

    counters: [u128; Counter::COUNT],
    rates: [u128; Rate::COUNT],
}

impl Default for BoundedCounterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundedCounterSet {
    /// A link-down interface with every counter at zero.
    ///
    /// The speed is unset, hence all the rate ceilings are `0` until
    /// [`set_speed`](Self::set_speed) is called.
    pub fn new() -> Self {
        Self {
            link: Some(Link::Down),
            state: Some(State::None),
            duplex: Some(Duplex::None),
            speed: None,
            trunk: Some(Trunk::None),
            tag: Some(Tag::None),
            priority: Some(Priority::Level0),
            vlan: Pvid::default(),
            uplink_role: 0,
            packet_size: DEFAULT_PACKET_SIZE,
            broadcast_limit: u128::from(DEFAULT_BROADCAST_LIMIT),
            multicast_limit: u128::from(DEFAULT_MULTICAST_LIMIT),
            counters: [0; Counter::COUNT],
            rates: [0; Rate::COUNT],
        }
    }

    /// Profile of a standard access port: `Up`, full duplex at 100 Mbit/s
    /// in the given `vlan`.
    pub fn standard(vlan: u16, broadcast_limit: u64, multicast_limit: u64) -> Self {
        let mut stats = Self::new();
        stats.set_vlan(i64::from(vlan));
        stats.set_link(Link::Up);
        stats.set_duplex(Duplex::Full);
        stats.set_speed(DEFAULT_INTERFACE_SPEED);
        stats.set_state(State::Up);
        stats.set_broadcast_limit(i128::from(broadcast_limit));
        stats.set_multicast_limit(i128::from(multicast_limit));
        stats
    }

    /// Profile of a trunked uplink: `Up`, full duplex, tagged in every VLAN.
    ///
    /// `speed` is in Mbit/s, a speed outside of the allow-list leaves the
    /// speed unset.
    pub fn trunked(speed: u32) -> Self {
        let mut stats = Self::new();
        stats.set_link(Link::Up);
        stats.set_state(State::Up);
        stats.set_duplex(Duplex::Full);
        stats.set_speed(speed);
        stats.set_trunk(Trunk::Yes);
        stats.set_tag(Tag::Yes);
        stats.set_pvid(Pvid::Tagged);
        stats
    }

    // --- configuration ---

    pub fn link(&self) -> Option<Link> {
        self.link
    }

    pub fn set_link<V: TryInto<Link>>(&mut self, link: V) {
        self.link = link.try_into().ok();
    }

    pub fn state(&self) -> Option<State> {
        self.state
    }

    pub fn set_state<V: TryInto<State>>(&mut self, state: V) {
        self.state = state.try_into().ok();
    }

    pub fn duplex(&self) -> Option<Duplex> {
        self.duplex
    }

    pub fn set_duplex<V: TryInto<Duplex>>(&mut self, duplex: V) {
        self.duplex = duplex.try_into().ok();
    }

    pub fn speed(&self) -> Option<Speed> {
        self.speed
    }

    /// Set the speed, either a [`Speed`] or a number of Mbit/s.
    ///
    /// Changing the speed changes the ceilings of all the future writes,
    /// it never rewrites the values already stored.
    pub fn set_speed<V: TryInto<Speed>>(&mut self, speed: V) {
        self.speed = speed.try_into().ok();
    }

    pub fn trunk(&self) -> Option<Trunk> {
        self.trunk
    }

    pub fn set_trunk<V: TryInto<Trunk>>(&mut self, trunk: V) {
        self.trunk = trunk.try_into().ok();
    }

    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    pub fn set_tag<V: TryInto<Tag>>(&mut self, tag: V) {
        self.tag = tag.try_into().ok();
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn set_priority<V: TryInto<Priority>>(&mut self, priority: V) {
        self.priority = priority.try_into().ok();
    }

    pub fn vlan(&self) -> Pvid {
        self.vlan
    }

    /// Set the port VLAN, saturated to `1..=4095`.
    pub fn set_vlan(&mut self, vlan: i64) {
        self.vlan = Pvid::clamped(vlan);
    }

    pub fn set_pvid(&mut self, pvid: Pvid) {
        self.vlan = match pvid {
            Pvid::Tagged => Pvid::Tagged,
            Pvid::Id(id) => Pvid::clamped(i64::from(id)),
        };
    }

    /// `0` for a standard port, `1` or `2` for the uplinks.
    pub fn uplink_role(&self) -> u8 {
        self.uplink_role
    }

    pub fn set_uplink_role(&mut self, role: i64) {
        self.uplink_role = role.clamp(0, i64::from(UPLINK_ROLE_MAX)) as u8;
    }

    /// Average packet size in bytes.
    pub fn packet_size(&self) -> u32 {
        self.packet_size
    }

    /// Set the packet size, saturated to `84..=1500` bytes.
    ///
    /// This bounds the packets per second ceiling of the future writes.
    pub fn set_packet_size(&mut self, packet_size: i64) {
        self.packet_size =
            packet_size.clamp(i64::from(MIN_PACKET_SIZE), i64::from(MAX_PACKET_SIZE)) as u32;
    }

    /// Maximum broadcast packets accepted in a single write.
    pub fn broadcast_limit(&self) -> u128 {
        self.broadcast_limit
    }

    pub fn set_broadcast_limit(&mut self, limit: i128) {
        self.broadcast_limit = saturate(limit);
    }

    /// Per-tick multicast ceiling of this interface.
    pub fn multicast_limit(&self) -> u128 {
        self.multicast_limit
    }

    pub fn set_multicast_limit(&mut self, limit: i128) {
        self.multicast_limit = saturate(limit);
    }

    // --- ceilings ---

    /// The speed in Mbit/s, `0` when unset.
    pub fn speed_mbps(&self) -> u128 {
        self.speed.map_or(0, |speed| u128::from(speed.mbps()))
    }

    /// Maximum bits per second this interface can carry.
    pub fn bits_per_sec_ceiling(&self) -> u128 {
        self.speed_mbps() * MULTIPLIER
    }

    /// Maximum packets per second at the current speed and packet size.
    ///
    /// ```
    /// # use switchstat_core::counters::BoundedCounterSet;
    /// let mut stats = BoundedCounterSet::trunked(1_000);
    /// stats.set_packet_size(1_000);
    /// assert_eq!(stats.pkts_per_sec_ceiling(), 125_000);
    /// ```
    pub fn pkts_per_sec_ceiling(&self) -> u128 {
        self.bits_per_sec_ceiling() / (u128::from(self.packet_size) * 8)
    }

    // --- cumulative counters ---

    pub fn counter(&self, counter: Counter) -> u128 {
        self.counters[counter.index()]
    }

    /// Write the new absolute `value` of `counter`.
    ///
    /// Returns the change that was actually applied to the counter. It
    /// may be smaller than `value - self.counter(counter)` when the
    /// change exceeds the ceiling governing the counter:
    ///
    /// * octets and plain counters: `value` saturated to `[0, 10^24]`;
    /// * total packets: change bounded to `[0, pkts/s ceiling]`;
    /// * broadcast: change bounded above by the broadcast limit;
    /// * multicast and unicast: change bounded to `[0, pkts/s ceiling]`,
    ///   the accepted amount is also added to the direction's packets
    ///   per second.
    ///
    /// Accepted broadcast, multicast and unicast packets are accounted in
    /// the direction's total packets and octets (`8` per packet).
    pub fn set_counter(&mut self, counter: Counter, value: i128) -> i128 {
        let delta = value.saturating_sub(signed(self.counter(counter)));

        match counter.kind() {
            CounterKind::Octets(_) | CounterKind::Plain => {
                let before = self.counter(counter);
                self.counters[counter.index()] = saturate(value);
                signed(self.counter(counter)) - signed(before)
            }
            CounterKind::Packets(_) => {
                let accepted = delta.clamp(0, signed(self.pkts_per_sec_ceiling()));
                self.shift(counter, accepted);
                accepted
            }
            CounterKind::Traffic(TrafficClass::Broadcast, direction) => {
                let accepted = delta.min(signed(self.broadcast_limit));
                self.shift_traffic(counter, direction, accepted);
                accepted
            }
            CounterKind::Traffic(_, direction) => {
                let accepted = delta.clamp(0, signed(self.pkts_per_sec_ceiling()));
                self.shift_traffic(counter, direction, accepted);
                self.add_rate(Rate::pkts(direction), accepted as u128);
                accepted
            }
        }
    }

    /// Shorthand for `set_counter(counter, counter + amount)`.
    pub fn add_counter(&mut self, counter: Counter, amount: u128) -> i128 {
        let value = signed(self.counter(counter)).saturating_add(signed(amount));
        self.set_counter(counter, value)
    }

    /// Add `amount` to `counter` without bounding it by any per-tick
    /// ceiling, only by `10^24`.
    ///
    /// Used for switch originated traffic and for uplinks that sum up the
    /// traffic of many ports. Traffic counters still account the packets
    /// in the direction's total packets and octets.
    pub fn accumulate(&mut self, counter: Counter, amount: u128) {
        let amount = signed(amount);
        match counter.kind() {
            CounterKind::Traffic(_, direction) => {
                self.shift_traffic(counter, direction, amount);
            }
            _ => self.shift(counter, amount),
        }
    }

    fn shift(&mut self, counter: Counter, delta: i128) {
        let value = signed(self.counter(counter)).saturating_add(delta);
        self.counters[counter.index()] = saturate(value);
    }

    fn shift_traffic(&mut self, counter: Counter, direction: Direction, delta: i128) {
        self.shift(counter, delta);
        self.shift(Counter::pkts(direction), delta);
        self.shift(
            Counter::octets(direction),
            delta.saturating_mul(OCTETS_PER_PACKET),
        );
    }

    // --- per-second rates ---

    pub fn rate(&self, rate: Rate) -> u128 {
        self.rates[rate.index()]
    }

    /// Write the new absolute `value` of `rate`.
    ///
    /// Bits per second are saturated to `[0, speed]` and packets per
    /// second to `[0, speed / (8 * packet size)]`.
    pub fn set_rate(&mut self, rate: Rate, value: i128) {
        let ceiling = match rate {
            Rate::InBitsPerSec | Rate::OutBitsPerSec => self.bits_per_sec_ceiling(),
            Rate::InPktsPerSec | Rate::OutPktsPerSec => self.pkts_per_sec_ceiling(),
        };
        self.rates[rate.index()] = value.clamp(0, signed(ceiling)) as u128;
    }

    pub fn add_rate(&mut self, rate: Rate, amount: u128) {
        let value = signed(self.rate(rate)).saturating_add(signed(amount));
        self.set_rate(rate, value);
    }

    /// Zero the four per-second fields, the cumulative counters are left
    /// untouched.
    pub fn reset_per_tick(&mut self) {
        self.rates = [0; Rate::COUNT];
    }

    /// Percentage of the line rate used in the given `direction`.
    ///
    /// Recomputed on every call from the packets per second, the speed
    /// and the packet size. The result is in `[0.00, 100.00]`; a value
    /// that displays as `100.00` is reported as exactly `100.0`.
    ///
    /// ```
    /// # use switchstat_core::counters::{BoundedCounterSet, Direction, Rate};
    /// let mut stats = BoundedCounterSet::trunked(1_000);
    /// stats.set_packet_size(1_000);
    /// stats.set_rate(Rate::InPktsPerSec, 62_500);
    /// assert_eq!(stats.utilization(Direction::In), 50.0);
    /// assert_eq!(stats.utilization(Direction::Out), 0.0);
    /// ```
    pub fn utilization(&self, direction: Direction) -> f64 {
        let capacity =
            self.bits_per_sec_ceiling() as f64 / (f64::from(self.packet_size) * 8.0);
        if capacity <= 0.0 {
            return 0.0;
        }

        let utilization = self.rate(Rate::pkts(direction)) as f64 * 100.0 / capacity;
        // anything that would print as 100.00 is the full line rate
        if utilization * 100.0 >= UTILIZATION_MAX * 100.0 - 0.5 {
            UTILIZATION_MAX
        } else {
            utilization.max(0.0)
        }
    }

    pub fn in_utilization(&self) -> f64 {
        self.utilization(Direction::In)
    }

    pub fn out_utilization(&self) -> f64 {
        self.utilization(Direction::Out)
    }
}

/// Saturate `value` into `[0, 10^24]`.
fn saturate(value: i128) -> u128 {
    value.clamp(0, COUNTER_MAX as i128) as u128
}

fn signed(value: u128) -> i128 {
    i128::try_from(value).unwrap_or(i128::MAX)
}
