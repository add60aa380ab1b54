/// Monitor Flow Tests
///
/// Full passes against an in-memory zone with on-disk history:
/// Collect → Record history → Build grid → Alert on changes

#[path = "../common/mod.rs"]
mod common;
use common::{FakeZone, Monitor};

use dnswatch_domain::{RecordKind, RecordType, SlotKey, NOT_AVAILABLE, SLOW_PULSE};
use std::sync::Arc;

fn blink_rate(monitor: &Monitor, label: &str, col: usize) -> Option<std::time::Duration> {
    let row = monitor.row_of(label)?;
    let snapshot = monitor.state.snapshot();
    let cell = snapshot.grid.cell(row, col)?;
    cell.blink.should_blink.then_some(cell.blink.rate)
}

fn standard_zone() -> Arc<FakeZone> {
    let zone = Arc::new(FakeZone::new());
    zone.delegate(
        "example.com",
        &[
            ("ns1.example.com.", "192.0.2.1", 2024050101),
            ("ns2.example.com.", "192.0.2.2", 2024050101),
        ],
    );
    zone.answer(RecordType::A, "example.com", &["203.0.113.10"]);
    zone.answer(RecordType::MX, "example.com", &["10 mail.example.com.", "20 backup.example.com."]);
    zone.answer(RecordType::TXT, "example.com", &["\"v=spf1 -all\""]);

    zone.delegate("example.org", &[("ns.example.org.", "198.51.100.53", 7)]);
    zone.answer(RecordType::A, "example.org", &["198.51.100.80"]);
    zone.answer(RecordType::MX, "example.org", &["5 mx.example.org."]);
    zone
}

// ============================================================================
// Stable Zone
// ============================================================================

#[tokio::test]
async fn test_first_pass_lays_out_every_domain_without_alerts() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let monitor = Monitor::start(standard_zone(), dir.path(), &["example.com", "example.org"]);

    // Act
    let pass = monitor.run_pass.execute().await;

    // Assert
    assert_eq!(pass, 1);
    let snapshot = monitor.state.snapshot();
    assert_eq!(snapshot.grid.column_count(), 3);
    assert_eq!(snapshot.grid.blinking_cells().count(), 0);

    assert_eq!(monitor.cell_text("INFORMATION", 1).as_deref(), Some("example.com"));
    assert_eq!(monitor.cell_text("NS Server #2", 1).as_deref(), Some("ns2.example.com."));
    assert_eq!(monitor.cell_text("SOA Serial #1", 1).as_deref(), Some("2024050101"));
    assert_eq!(monitor.cell_text("IP Address #1", 2).as_deref(), Some("198.51.100.53"));
    assert_eq!(monitor.cell_text("PTR Record #1", 2).as_deref(), Some("host-198-51-100-5..."));
    assert_eq!(monitor.cell_text("MX Record #2", 2).as_deref(), Some(NOT_AVAILABLE));
    assert_eq!(monitor.cell_text("TXT Record #1", 2).as_deref(), Some(NOT_AVAILABLE));
}

#[tokio::test]
async fn test_unchanged_passes_never_alert() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let monitor = Monitor::start(standard_zone(), dir.path(), &["example.com", "example.org"]);

    // Act
    for _ in 0..3 {
        monitor.run_pass.execute().await;
    }

    // Assert
    let snapshot = monitor.state.snapshot();
    assert_eq!(snapshot.pass, 3);
    assert_eq!(snapshot.grid.blinking_cells().count(), 0);
    assert!(snapshot
        .histories
        .values()
        .all(|history| RecordKind::all()
            .iter()
            .all(|kind| (0..history.tracked_slots(*kind)).all(|slot| {
                history
                    .log(SlotKey::new(*kind, slot))
                    .is_some_and(|log| log.len() == 1)
            }))));
}

// ============================================================================
// Change Detection
// ============================================================================

#[tokio::test]
async fn test_nameserver_swap_alerts_on_affected_slots_only() {
    // Arrange
    let zone = standard_zone();
    let dir = tempfile::tempdir().unwrap();
    let monitor = Monitor::start(zone.clone(), dir.path(), &["example.com", "example.org"]);
    monitor.run_pass.execute().await;

    // Act - ns2 replaced by ns3, same serial
    zone.delegate(
        "example.com",
        &[
            ("ns1.example.com.", "192.0.2.1", 2024050101),
            ("ns3.example.com.", "192.0.2.3", 2024050101),
        ],
    );
    monitor.run_pass.execute().await;

    // Assert
    assert_eq!(monitor.cell_text("NS Server #2", 1).as_deref(), Some("ns3.example.com."));
    assert_eq!(blink_rate(&monitor, "NS Server #2", 1), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "IP Address #2", 1), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "PTR Record #2", 1), Some(SLOW_PULSE));

    assert_eq!(blink_rate(&monitor, "NS Server #1", 1), None);
    assert_eq!(blink_rate(&monitor, "SOA Serial #2", 1), None);
    assert_eq!(blink_rate(&monitor, "NS Server #1", 2), None);

    let row = monitor.row_of("NS Server #2").unwrap();
    let cell = monitor.cell_history.execute(row, 1).unwrap();
    let values: Vec<&str> = cell.entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["ns2.example.com.", "ns3.example.com."]);
    assert_eq!(cell.title(), "example.com - NS Server #2");
}

#[tokio::test]
async fn test_removed_nameserver_stays_visible_while_alerting() {
    // Arrange
    let zone = standard_zone();
    let dir = tempfile::tempdir().unwrap();
    zone.delegate(
        "example.com",
        &[
            ("ns1.example.com.", "192.0.2.1", 2024050101),
            ("ns2.example.com.", "192.0.2.2", 2024050101),
            ("ns3.example.com.", "192.0.2.3", 2024050101),
        ],
    );
    let monitor = Monitor::start(zone.clone(), dir.path(), &["example.com"]);
    monitor.run_pass.execute().await;

    // Act - ns3 dropped from the delegation
    zone.delegate(
        "example.com",
        &[
            ("ns1.example.com.", "192.0.2.1", 2024050101),
            ("ns2.example.com.", "192.0.2.2", 2024050101),
        ],
    );
    monitor.run_pass.execute().await;

    // Assert
    assert_eq!(monitor.cell_text("NS Server #3", 1).as_deref(), Some(NOT_AVAILABLE));
    assert_eq!(blink_rate(&monitor, "NS Server #3", 1), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "SOA Serial #3", 1), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "IP Address #3", 1), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "NS Server #1", 1), None);

    let row = monitor.row_of("NS Server #3").unwrap();
    let cell = monitor.cell_history.execute(row, 1).unwrap();
    let values: Vec<&str> = cell.entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["ns3.example.com.", NOT_AVAILABLE]);
}

#[tokio::test]
async fn test_serial_bump_on_one_nameserver() {
    // Arrange
    let zone = standard_zone();
    let dir = tempfile::tempdir().unwrap();
    let monitor = Monitor::start(zone.clone(), dir.path(), &["example.com"]);
    monitor.run_pass.execute().await;

    // Act - secondary not yet transferred
    zone.answer_at(
        RecordType::SOA,
        "example.com",
        "192.0.2.1",
        &["example.com. 3600 IN SOA ns1.example.com. hostmaster.example.com. 2024050102 7200 3600 1209600 300"],
    );
    monitor.run_pass.execute().await;

    // Assert
    assert_eq!(monitor.cell_text("SOA Serial #1", 1).as_deref(), Some("2024050102"));
    assert_eq!(monitor.cell_text("SOA Serial #2", 1).as_deref(), Some("2024050101"));
    assert_eq!(blink_rate(&monitor, "SOA Serial #1", 1), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "SOA Serial #2", 1), None);
}

#[tokio::test]
async fn test_unreachable_domain_shows_not_available_and_alerts() {
    // Arrange
    let zone = standard_zone();
    let dir = tempfile::tempdir().unwrap();
    let monitor = Monitor::start(zone.clone(), dir.path(), &["example.com", "example.org"]);
    monitor.run_pass.execute().await;

    // Act
    zone.take_down("example.org");
    monitor.run_pass.execute().await;

    // Assert - the other column is untouched
    assert_eq!(monitor.cell_text("NS Server #1", 2).as_deref(), Some(NOT_AVAILABLE));
    assert_eq!(monitor.cell_text("A Record #1", 2).as_deref(), Some(NOT_AVAILABLE));
    assert_eq!(blink_rate(&monitor, "NS Server #1", 2), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "A Record #1", 2), Some(SLOW_PULSE));
    assert_eq!(blink_rate(&monitor, "A Record #1", 1), None);
    assert_eq!(monitor.cell_text("A Record #1", 1).as_deref(), Some("203.0.113.10"));
}

#[tokio::test]
async fn test_flapping_value_keeps_every_transition() {
    // Arrange
    let zone = standard_zone();
    let dir = tempfile::tempdir().unwrap();
    let monitor = Monitor::start(zone.clone(), dir.path(), &["example.com"]);

    // Act
    for address in ["203.0.113.10", "203.0.113.11", "203.0.113.10"] {
        zone.answer(RecordType::A, "example.com", &[address]);
        monitor.run_pass.execute().await;
    }

    // Assert
    let row = monitor.row_of("A Record #1").unwrap();
    let cell = monitor.cell_history.execute(row, 1).unwrap();
    assert_eq!(cell.entries.len(), 3);
    // newest entry is within the hour: slow pulse wins over churn
    assert_eq!(blink_rate(&monitor, "A Record #1", 1), Some(SLOW_PULSE));
}
