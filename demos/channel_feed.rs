//! Example: feeding a session through a channel
//!
//! A producer thread simulates a motor that slowly wears out: current
//! creeps up and the shaft slows down. Readings are pushed through a
//! channel and the main thread feeds them into a monitoring session.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_feed
//! ```

use std::thread;
use std::time::Duration;

use motorwatch::{ChannelSource, FeedRecord, MonitorConfig, Reading, ReadingSource};

fn main() -> anyhow::Result<()> {
    println!("Channel feed example");
    println!("Simulating a wearing motor...\n");

    let mut session = MonitorConfig::default().build_session()?;
    let (tx, mut source) = ChannelSource::create("wear-simulator", 64);

    thread::spawn(move || {
        for t in 0..240u64 {
            let wear = t as f64 / 240.0;
            // Small deterministic ripple so consecutive readings differ.
            let ripple = ((t % 7) as f64 - 3.0) * 0.02;

            let reading = Reading::new(
                t,
                12.0 + ripple,
                1.5 + 2.2 * wear + ripple,
                1500.0 - 450.0 * wear,
            );
            if tx.blocking_send(FeedRecord::from(reading)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
    });

    while !source.is_finished() && !session.is_finalized() {
        let Some(record) = source.poll() else {
            thread::sleep(Duration::from_millis(10));
            continue;
        };

        let snapshot = session.advance(record.reading())?;
        if snapshot.time % 20 == 0 {
            println!(
                "t={:>3}s  [{:<4}]  RUL fault {:>3}%  anomaly {:>3}%  {}",
                snapshot.time,
                snapshot.status.symbol(),
                snapshot.rul_fault_pct,
                snapshot.rul_anomaly_pct,
                snapshot.suggestions.join(" "),
            );
        }
    }

    println!("\nMaintenance summary:");
    for suggestion in session.maintenance_summary() {
        println!("  - {}", suggestion);
    }
    println!("Faults predicted at: {:?}", session.fault_times());

    Ok(())
}
