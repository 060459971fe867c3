use super::SharedWall;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Drive development of every print on the wall from a fixed-rate timer.
pub fn start_development_timer(wall: SharedWall) -> JoinHandle<()> {
    let tick_ms = wall.development().tick_ms.max(10);
    let increment = wall.development().increment;
    info!(
        "Starting development timer: +{} every {} ms",
        increment, tick_ms
    );

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(tick_ms));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        interval.tick().await; // Skip the first immediate tick

        loop {
            interval.tick().await;
            let advanced = wall.develop_tick(increment).await;
            if advanced > 0 {
                debug!("Advanced development of {} prints", advanced);
            }
        }
    })
}
