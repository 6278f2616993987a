//! End-to-end flow through the CSV store: record entries, then report.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use chitieu_bot::store::CsvStore;
use chitieu_core::{Messenger, process_message};

#[derive(Default)]
struct RecordingMessenger {
    replies: Vec<String>,
}

impl Messenger for RecordingMessenger {
    fn send_reply(&mut self, text: &str) -> Result<()> {
        self.replies.push(text.to_string());
        Ok(())
    }
}

fn capture_time(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap()
}

#[test]
fn test_entries_then_report_through_csv_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    let mut store = CsvStore::open(&path).unwrap();
    let mut messenger = RecordingMessenger::default();

    let messages = [
        ("Lương +10tr", capture_time(2025, 3, 1)),
        ("Coffee 50k", capture_time(2025, 3, 2)),
        ("ăn trưa 120k", capture_time(2025, 3, 2)),
        // Different month: must not show up in the March report.
        ("xăng xe 80k", capture_time(2025, 4, 1)),
    ];
    for (text, now) in messages {
        process_message(&mut store, &mut messenger, text, now).unwrap();
    }

    process_message(
        &mut store,
        &mut messenger,
        "Report tháng 3 năm 2025",
        capture_time(2025, 4, 5),
    )
    .unwrap();

    assert_eq!(messenger.replies.len(), 5);
    assert_eq!(messenger.replies[0], "✅ Done! Lương 10tr");
    assert_eq!(messenger.replies[1], "✅ Done! Coffee 50k");

    let report = &messenger.replies[4];
    assert!(report.contains("📊 Report tháng 3/2025"), "{report}");
    assert!(report.contains("💰 Thu nhập: 10.000.000 ₫"), "{report}");
    assert!(report.contains("💸 Chi tiêu: 170.000 ₫"), "{report}");
    assert!(report.contains("💵 Còn lại: 9.830.000 ₫"), "{report}");
}

#[test]
fn test_report_tolerates_hand_edited_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");

    // Simulate a ledger someone edited by hand: formatted amounts and a
    // broken date row alongside bot-written rows.
    std::fs::write(
        &path,
        "Date,Description,Expense,Income\n\
         \"02/03/2025, 08:00:00\",Coffee,50000,\n\
         03/03/2025,chợ,\"1,234,567 ₫\",\n\
         not-a-date,mystery,99999,\n\
         \"04/03/2025, 12:00:00\",Lương,,2000000\n",
    )
    .unwrap();

    let mut store = CsvStore::open(&path).unwrap();
    let mut messenger = RecordingMessenger::default();
    process_message(
        &mut store,
        &mut messenger,
        "Report tháng 3 năm 2025",
        capture_time(2025, 3, 31),
    )
    .unwrap();

    let report = &messenger.replies[0];
    assert!(report.contains("💸 Chi tiêu: 1.284.567 ₫"), "{report}");
    assert!(report.contains("💰 Thu nhập: 2.000.000 ₫"), "{report}");
}
