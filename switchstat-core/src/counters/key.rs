use super::Direction;

/// Class of the packets counted by a traffic [`Counter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficClass {
    Broadcast,
    Multicast,
    Unicast,
}

/// What governs the writes to a given [`Counter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    /// Absolute value saturated to `[0, 10^24]`.
    Octets(Direction),
    /// Delta bounded by the packets per second ceiling.
    Packets(Direction),
    /// Delta bounded by the class ceiling, also accounted in the
    /// direction's total packets and octets.
    Traffic(TrafficClass, Direction),
    /// Absolute value saturated to `[0, 10^24]`.
    Plain,
}

/// Key of a cumulative (monotonic) field of a [`BoundedCounterSet`].
///
/// [`BoundedCounterSet`]: super::BoundedCounterSet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Counter {
    InOctets,
    OutOctets,
    InPkts,
    OutPkts,
    InBroadcastPkts,
    OutBroadcastPkts,
    InMulticastPkts,
    OutMulticastPkts,
    InUnicastPkts,
    OutUnicastPkts,
    InGoodFragments,
    InBadFragments,
    InDiscards,
    InErrors,
    Collisions,
    LateCollisions,
    CrcErrors,
    MacRxErrors,
    GiantPkts,
    ShortPkts,
    Jabber,
}

impl Counter {
    pub const COUNT: usize = 21;

    pub const ALL: [Self; Self::COUNT] = [
        Self::InOctets,
        Self::OutOctets,
        Self::InPkts,
        Self::OutPkts,
        Self::InBroadcastPkts,
        Self::OutBroadcastPkts,
        Self::InMulticastPkts,
        Self::OutMulticastPkts,
        Self::InUnicastPkts,
        Self::OutUnicastPkts,
        Self::InGoodFragments,
        Self::InBadFragments,
        Self::InDiscards,
        Self::InErrors,
        Self::Collisions,
        Self::LateCollisions,
        Self::CrcErrors,
        Self::MacRxErrors,
        Self::GiantPkts,
        Self::ShortPkts,
        Self::Jabber,
    ];

    /// Error and anomaly counters, they are never generated only
    /// aggregated.
    pub const PLAIN: [Self; 11] = [
        Self::InGoodFragments,
        Self::InBadFragments,
        Self::InDiscards,
        Self::InErrors,
        Self::Collisions,
        Self::LateCollisions,
        Self::CrcErrors,
        Self::MacRxErrors,
        Self::GiantPkts,
        Self::ShortPkts,
        Self::Jabber,
    ];

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn octets(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::InOctets,
            Direction::Out => Self::OutOctets,
        }
    }

    pub const fn pkts(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::InPkts,
            Direction::Out => Self::OutPkts,
        }
    }

    pub const fn traffic(class: TrafficClass, direction: Direction) -> Self {
        match (class, direction) {
            (TrafficClass::Broadcast, Direction::In) => Self::InBroadcastPkts,
            (TrafficClass::Broadcast, Direction::Out) => Self::OutBroadcastPkts,
            (TrafficClass::Multicast, Direction::In) => Self::InMulticastPkts,
            (TrafficClass::Multicast, Direction::Out) => Self::OutMulticastPkts,
            (TrafficClass::Unicast, Direction::In) => Self::InUnicastPkts,
            (TrafficClass::Unicast, Direction::Out) => Self::OutUnicastPkts,
        }
    }

    pub const fn kind(self) -> CounterKind {
        use self::{Direction::*, TrafficClass::*};

        match self {
            Self::InOctets => CounterKind::Octets(In),
            Self::OutOctets => CounterKind::Octets(Out),
            Self::InPkts => CounterKind::Packets(In),
            Self::OutPkts => CounterKind::Packets(Out),
            Self::InBroadcastPkts => CounterKind::Traffic(Broadcast, In),
            Self::OutBroadcastPkts => CounterKind::Traffic(Broadcast, Out),
            Self::InMulticastPkts => CounterKind::Traffic(Multicast, In),
            Self::OutMulticastPkts => CounterKind::Traffic(Multicast, Out),
            Self::InUnicastPkts => CounterKind::Traffic(Unicast, In),
            Self::OutUnicastPkts => CounterKind::Traffic(Unicast, Out),
            _ => CounterKind::Plain,
        }
    }
}

/// Key of a per-second field, reset at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Rate {
    InBitsPerSec,
    OutBitsPerSec,
    InPktsPerSec,
    OutPktsPerSec,
}

impl Rate {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [
        Self::InBitsPerSec,
        Self::OutBitsPerSec,
        Self::InPktsPerSec,
        Self::OutPktsPerSec,
    ];

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn bits(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::InBitsPerSec,
            Direction::Out => Self::OutBitsPerSec,
        }
    }

    pub const fn pkts(direction: Direction) -> Self {
        match direction {
            Direction::In => Self::InPktsPerSec,
            Direction::Out => Self::OutPktsPerSec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_declaration_order() {
        for (i, counter) in Counter::ALL.iter().enumerate() {
            assert_eq!(counter.index(), i);
        }
        for (i, rate) in Rate::ALL.iter().enumerate() {
            assert_eq!(rate.index(), i);
        }
    }

    #[test]
    fn plain_counters_are_plain() {
        for counter in Counter::PLAIN {
            assert_eq!(counter.kind(), CounterKind::Plain);
        }
    }

    #[test]
    fn traffic_keys_round_trip() {
        for class in [
            TrafficClass::Broadcast,
            TrafficClass::Multicast,
            TrafficClass::Unicast,
        ] {
            for direction in Direction::BOTH {
                let counter = Counter::traffic(class, direction);
                assert_eq!(counter.kind(), CounterKind::Traffic(class, direction));
            }
        }
    }
}
