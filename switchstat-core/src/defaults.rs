//! Bounds and default values used when resolving a [`SimulationConfig`].
//!
//! All the numeric options of a simulation follow the same convention:
//! `-1` asks for a random value within the bounds declared here and any
//! other out of range value is saturated to the nearest bound.
//!
//! [`SimulationConfig`]: crate::SimulationConfig

/// Rates are expressed in Mbit/s, this converts them to bit/s.
///
/// ```
/// # use switchstat_core::defaults::*;
/// // a 100 Mbit/s port can carry at most 100_000_000 bits every second
/// assert_eq!(100 * MULTIPLIER, 100_000_000);
/// ```
pub const MULTIPLIER: u128 = 1_000_000;

/// Upper bound of every cumulative counter (`10^24`).
pub const COUNTER_MAX: u128 = MULTIPLIER * MULTIPLIER * MULTIPLIER * MULTIPLIER;

/// Largest switch we will generate when the port count is random.
pub const MAX_INTERFACES: u32 = 684;

/// Two uplinks are always allocated so a switch has at least two ports.
pub const MIN_INTERFACES: u32 = 2;

pub const DEFAULT_INTERFACES: u32 = 48;

pub const DEFAULT_UPLINK1: u32 = 1;
pub const DEFAULT_UPLINK2: u32 = 2;

/// Uplink speed in Mbit/s.
pub const DEFAULT_UPLINK_SPEED: u32 = 1_000;
pub const MIN_UPLINK_SPEED: u32 = 100;
pub const MAX_INTERFACE_SPEED: u32 = 40_000;

/// Speed of every standard port in Mbit/s.
pub const DEFAULT_INTERFACE_SPEED: u32 = 100;

/// Ceiling of a fixed unicast or multicast nominal rate.
pub const MAX_TRAFFIC: u64 = 10_000;
/// Ceiling of a fixed broadcast nominal rate and of the broadcast limit.
pub const MAX_BROADCAST: u64 = 100_024;
/// Ceiling of the multicast limit.
pub const MAX_MULTICAST: u64 = 100_024;

pub const DEFAULT_BROADCAST: i64 = 12;
pub const DEFAULT_BROADCAST_LIMIT: u64 = 1_024;
pub const DEFAULT_MULTICAST: i64 = 1;
pub const DEFAULT_MULTICAST_LIMIT: u64 = 1_024;
pub const DEFAULT_UNICAST: i64 = 10;

pub const DEFAULT_VLAN: u16 = 1;
pub const MIN_VLAN: u16 = 1;
pub const MAX_VLAN: u16 = 4_095;

/// Simulated seconds (ticks) of a default run: one hour.
pub const DEFAULT_RUNTIME: u64 = 3_600;
/// Roughly one year of simulated seconds.
pub const MAX_RUNTIME: u64 = 31_536_000;

pub const DEFAULT_LOOP_AFTER: u64 = 0;
pub const MAX_LOOP_MODE: u8 = 2;

/// Packet size in bytes.
pub const MIN_PACKET_SIZE: u32 = 84;
pub const DEFAULT_PACKET_SIZE: u32 = 1_024;
pub const MAX_PACKET_SIZE: u32 = 1_500;

pub const DEFAULT_RSTP_TRANSITIONS: u32 = 0;
pub const MAX_RSTP_TRANSITIONS: u32 = 1_024;

/// Seed of the generated MAC addresses.
///
/// ```
/// # use switchstat_core::defaults::*;
/// assert_eq!(DEFAULT_MAC_SEED.len(), 14);
/// ```
pub const DEFAULT_MAC_SEED: &str = "D099.D500.0000";
