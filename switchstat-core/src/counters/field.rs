//! Enumerated configuration values of a [`BoundedCounterSet`].
//!
//! Every type here has a closed allow-list. The setters of the counter set
//! accept anything convertible into these types (the typed value itself,
//! its textual form or, for [`Speed`], a number of Mbit/s) and store the
//! unset sentinel (`None`) when the conversion fails.
//!
//! [`BoundedCounterSet`]: super::BoundedCounterSet

use crate::defaults::{MAX_VLAN, MIN_VLAN};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Error returned when a value is not part of a field's allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}' is not an allowed {field} value")]
pub struct UnknownValue {
    field: &'static str,
    value: String,
}

impl UnknownValue {
    fn new(field: &'static str, value: impl fmt::Display) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Declares a textual allow-list enum with its `Display`, `FromStr` and
/// `TryFrom<&str>` implementations.
macro_rules! allow_list {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every allowed value, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(UnknownValue::new($field, s)),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = UnknownValue;
            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

allow_list! {
    /// Physical link status of a port.
    Link ("link") {
        Up => "Up",
        Down => "Down",
        Disable => "Disable",
    }
}

allow_list! {
    /// Forwarding state of a port.
    State ("state") {
        None => "None",
        Up => "Up",
        Down => "Down",
    }
}

allow_list! {
    Duplex ("duplex") {
        None => "None",
        Half => "Half",
        Full => "Full",
    }
}

allow_list! {
    /// Whether the port is a trunk (carries several VLANs).
    Trunk ("trunk") {
        None => "None",
        Yes => "Yes",
    }
}

allow_list! {
    /// Whether frames leaving the port are 802.1Q tagged.
    Tag ("tag") {
        None => "None",
        Yes => "Yes",
    }
}

allow_list! {
    /// QoS priority level of a port.
    Priority ("priority") {
        Level0 => "level0",
        Level1 => "level1",
        Level2 => "level2",
        Level3 => "level3",
    }
}

/// Port speed.
///
/// ```
/// # use switchstat_core::counters::Speed;
/// let speed = Speed::try_from(1_000u32).unwrap();
/// assert_eq!(speed, Speed::Gbps1);
/// assert_eq!(speed.to_string(), "1000");
/// assert!(Speed::try_from(500u32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Speed {
    Mbps10,
    Mbps100,
    Gbps1,
    Gbps10,
    Gbps40,
}

impl Speed {
    pub const ALL: &'static [Self] = &[
        Self::Mbps10,
        Self::Mbps100,
        Self::Gbps1,
        Self::Gbps10,
        Self::Gbps40,
    ];

    /// The speed in Mbit/s.
    pub const fn mbps(self) -> u32 {
        match self {
            Self::Mbps10 => 10,
            Self::Mbps100 => 100,
            Self::Gbps1 => 1_000,
            Self::Gbps10 => 10_000,
            Self::Gbps40 => 40_000,
        }
    }

    pub fn from_mbps(mbps: u64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|speed| u64::from(speed.mbps()) == mbps)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mbps(), f)
    }
}

macro_rules! speed_try_from {
    ($($int:ty),+) => {
        $(
            impl TryFrom<$int> for Speed {
                type Error = UnknownValue;
                fn try_from(mbps: $int) -> Result<Self, Self::Error> {
                    u64::try_from(mbps)
                        .ok()
                        .and_then(Self::from_mbps)
                        .ok_or_else(|| UnknownValue::new("speed", mbps))
                }
            }
        )+
    };
}

speed_try_from!(i32, i64, u32, u64);

impl FromStr for Speed {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .and_then(Self::from_mbps)
            .ok_or_else(|| UnknownValue::new("speed", s))
    }
}

impl TryFrom<&str> for Speed {
    type Error = UnknownValue;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Port VLAN id.
///
/// Trunked ports do not have a single untagged VLAN, they are reported
/// with the tag sentinel `N/A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pvid {
    Tagged,
    Id(u16),
}

impl Pvid {
    /// Build a VLAN id, saturating `vlan` into `1..=4095`.
    ///
    /// ```
    /// # use switchstat_core::counters::Pvid;
    /// assert_eq!(Pvid::clamped(0), Pvid::Id(1));
    /// assert_eq!(Pvid::clamped(42), Pvid::Id(42));
    /// assert_eq!(Pvid::clamped(9_000), Pvid::Id(4_095));
    /// ```
    pub fn clamped(vlan: i64) -> Self {
        let vlan = vlan.clamp(i64::from(MIN_VLAN), i64::from(MAX_VLAN));
        Self::Id(vlan as u16)
    }

    pub fn id(self) -> Option<u16> {
        match self {
            Self::Tagged => None,
            Self::Id(id) => Some(id),
        }
    }
}

impl Default for Pvid {
    fn default() -> Self {
        Self::Id(MIN_VLAN)
    }
}

impl fmt::Display for Pvid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tagged => f.pad("N/A"),
            Self::Id(id) => fmt::Display::fmt(id, f),
        }
    }
}

/// Traffic direction, seen from the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub const BOTH: [Self; 2] = [Self::In, Self::Out];

    #[must_use = "function does not modify the current value"]
    pub const fn reverse(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}
