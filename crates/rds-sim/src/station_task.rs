//! Virtual station actor task
//!
//! This module provides an async task that owns a VirtualStation and emits
//! its groups at the RDS group rate. The task uses a select! loop to:
//! - Send the next group on every tick of the group clock
//! - Apply station changes received on the command channel
//! - Stop on shutdown, when the command channel closes, or when nobody is
//!   listening for groups any more

use std::time::Duration;

use rds_protocol::Group;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::VirtualStation;

/// RDS bit rate in bits per second
pub const BIT_RATE: f64 = 1187.5;

/// Bits per group (4 blocks of 16 data + 10 check bits)
pub const BITS_PER_GROUP: u32 = 104;

/// Time taken to broadcast one group (about 87.6 ms)
pub fn group_period() -> Duration {
    Duration::from_secs_f64(BITS_PER_GROUP as f64 / BIT_RATE)
}

/// Commands that can be sent to a virtual station actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationCommand {
    /// Replace the station name
    SetStationName(String),
    /// Replace the radio text
    SetRadioText(String),
    /// Start or end a traffic announcement
    SetTrafficAnnouncement(bool),
    /// Shutdown the virtual station actor
    Shutdown,
}

/// Run the virtual station actor task
///
/// Sends one group per `period` on `group_tx` until shut down. Returns the
/// station so callers can inspect its final state.
pub async fn run_station_task(
    mut station: VirtualStation,
    group_tx: mpsc::Sender<Group>,
    mut cmd_rx: mpsc::Receiver<StationCommand>,
    period: Duration,
) -> VirtualStation {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Starting virtual station task for {}", station.state_summary());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let group = station.next_group();
                if group_tx.send(group).await.is_err() {
                    debug!("Virtual station {}: group receiver dropped", station.id());
                    break;
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(StationCommand::SetStationName(name)) => {
                        if let Err(e) = station.set_station_name(&name) {
                            warn!("Virtual station {}: {}", station.id(), e);
                        }
                    }
                    Some(StationCommand::SetRadioText(text)) => {
                        if let Err(e) = station.set_radio_text(&text) {
                            warn!("Virtual station {}: {}", station.id(), e);
                        }
                    }
                    Some(StationCommand::SetTrafficAnnouncement(active)) => {
                        station.set_traffic_announcement(active);
                    }
                    Some(StationCommand::Shutdown) | None => break,
                }
            }
        }
    }

    info!(
        "Virtual station {} stopped after {} groups",
        station.id(),
        station.groups_sent()
    );
    station
}
