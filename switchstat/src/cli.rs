//! Command line of `switchstat`.
//!
//! Every numeric option accepts `-1` to ask for a random value within its
//! range. Out of range values are normalized by the simulation, never
//! rejected here.

use clap::Parser;
use std::path::PathBuf;
use switchstat_core::{config::RANDOM, defaults::*, MacSeed, SimulationConfig};

#[derive(Debug, Parser)]
#[command(
    name = "switchstat",
    version,
    about = "Generate arbitrary switch interface statistics for training and testing",
    allow_negative_numbers = true
)]
pub struct Command {
    /// File to write the report to.
    pub out_file: PathBuf,

    /// Total number of ports on the switch [-1=random, 2...684].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_INTERFACES))]
    pub total_ports: i64,

    /// Primary uplink, receiving the roll-up of every port [-1=random, 1...total].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_UPLINK1))]
    pub uplink1: i64,

    /// Backup uplink [-1=random, 1...total].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_UPLINK2))]
    pub uplink2: i64,

    /// Uplink speed in Mbit/s [-1=random, 100, 1000, 10000, 40000].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_UPLINK_SPEED))]
    pub uplink_speed: i64,

    /// Simulate a bridge loop [0=off, 1=single, 2=two-port loop].
    #[arg(long = "loop", value_name = "N", default_value_t = i64::from(MAX_LOOP_MODE))]
    pub loop_mode: i64,

    /// First looped port [-1=random, 1...total].
    #[arg(long, value_name = "N", default_value_t = RANDOM)]
    pub loop_interface1: i64,

    /// Second looped port [-1=random, 1...total].
    #[arg(long, value_name = "N", default_value_t = RANDOM)]
    pub loop_interface2: i64,

    /// Start the loop after this many seconds [0...runtime].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_LOOP_AFTER as i64)]
    pub loop_after: i64,

    /// VLAN of every port [-1=random, 1...4095].
    #[arg(long, value_name = "N", default_value_t = RANDOM)]
    pub vlan: i64,

    /// RSTP root port [-1=random, 1...total].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_UPLINK1))]
    pub root: i64,

    /// Seed of the MAC addresses.
    #[arg(long, value_name = "xxxx.xxxx.xxxx", default_value = DEFAULT_MAC_SEED)]
    pub mac: MacSeed,

    /// Broadcast packets received per port and per second [0=random, 1...100024].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BROADCAST)]
    pub broadcast: i64,

    /// Ceiling of a fixed broadcast rate [-1=random, 0=none, 1...10000].
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub broadcast_max: i64,

    /// Broadcast limit of a port [-1=random, 0...100024].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BROADCAST_LIMIT as i64)]
    pub broadcast_limit: i64,

    /// Multicast packets received per port and per second [0=random, 1...10000].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MULTICAST)]
    pub multicast: i64,

    /// Ceiling of a fixed multicast rate [-1=random, 0=none, 1...10000].
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub multicast_max: i64,

    /// Multicast limit of a port [-1=random, 0...100024].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MULTICAST_LIMIT as i64)]
    pub multicast_limit: i64,

    /// Unicast traffic in Mbit/s [-1=random, 1...10000].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_UNICAST)]
    pub unicast: i64,

    /// Ceiling of the random unicast traffic [-1=random, 0...10000].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_UNICAST)]
    pub unicast_max: i64,

    /// Average packet size in bytes [-1=random, 84...1500].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_PACKET_SIZE))]
    pub packet_size: i64,

    /// Seconds of activity to simulate [-1=random, 1...31536000].
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RUNTIME as i64)]
    pub runtime: i64,

    /// RSTP transitions assumed to have happened [-1=random, 0...1024].
    #[arg(long, value_name = "N", default_value_t = i64::from(DEFAULT_RSTP_TRANSITIONS))]
    pub rstp_transitions: i64,

    /// Seed of the random generator, drawn at random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Do not show the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Command {
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig {
            total_ports: self.total_ports,
            uplink1: self.uplink1,
            uplink2: self.uplink2,
            uplink_speed: self.uplink_speed,
            loop_mode: self.loop_mode,
            loop_interface1: self.loop_interface1,
            loop_interface2: self.loop_interface2,
            loop_after: self.loop_after,
            vlan: self.vlan,
            root: self.root,
            mac_seed: self.mac.clone(),
            broadcast: self.broadcast,
            broadcast_max: self.broadcast_max,
            broadcast_limit: self.broadcast_limit,
            multicast: self.multicast,
            multicast_max: self.multicast_max,
            multicast_limit: self.multicast_limit,
            unicast: self.unicast,
            unicast_max: self.unicast_max,
            packet_size: self.packet_size,
            runtime: self.runtime,
            rstp_transitions: self.rstp_transitions,
        }
    }
}
