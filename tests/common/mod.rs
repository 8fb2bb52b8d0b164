#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gabarita_pay::domain::payment::{Amount, NavigationTarget, PaymentRecord, PaymentStatus};
use gabarita_pay::domain::ports::Navigator;
use rust_decimal_macros::dec;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Navigator fake that records every navigation it receives.
#[derive(Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<NavigationTarget>>,
}

impl RecordingNavigator {
    pub fn targets(&self) -> Vec<NavigationTarget> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, target: NavigationTarget) {
        self.targets.lock().unwrap().push(target);
    }
}

pub fn record(id: &str, status: PaymentStatus) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        status,
        status_detail: "accredited".to_string(),
        transaction_amount: Amount::new(dec!(49.90)).unwrap(),
        date_created: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
        date_approved: None,
        payment_method_id: "pix".to_string(),
        payment_type_id: "bank_transfer".to_string(),
    }
}

/// Writes a backend fixture JSON to a temp file and returns its handle.
pub fn fixture_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
