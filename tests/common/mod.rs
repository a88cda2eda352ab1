//! Shared test utilities for submission tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use holiday_grid::config::{Config, EndpointSettings, SubmitSettings};
use holiday_grid::endpoint::StubEndpoint;
use holiday_grid::submit::{AggregationPolicy, BatchSubmitter, Notice, Notifier};
use holiday_grid::{DayCell, HolidayTable, Marker, UserId, UserRow};

/// Notifier that keeps every notice for later assertions
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier lock").clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notifier lock").push(notice);
    }
}

/// Starts a stub endpoint on an ephemeral port
pub fn start_stub() -> StubEndpoint {
    StubEndpoint::start("127.0.0.1:0", "/ajax/").expect("Failed to start stub endpoint")
}

/// Config pointing at `base_url` with the given submit behaviour
pub fn config_for(base_url: &str, aggregation: AggregationPolicy, notify_mass_failures: bool) -> Config {
    Config {
        endpoint: EndpointSettings {
            base_url: base_url.to_string(),
            read_timeout_secs: 5,
            ..EndpointSettings::default()
        },
        submit: SubmitSettings {
            notify_mass_failures,
            aggregation,
        },
        ..Config::default()
    }
}

/// Submitter talking to `stub`, recording its notices
pub fn submitter_for(
    stub: &StubEndpoint,
    aggregation: AggregationPolicy,
    notify_mass_failures: bool,
) -> (BatchSubmitter, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = config_for(&stub.base_url(), aggregation, notify_mass_failures);
    let submitter = BatchSubmitter::from_config(&config, notifier.clone());
    (submitter, notifier)
}

/// March 2024 table with one row per `(user, cells)` entry
pub fn march_2024(rows: &[(u32, &[(u32, Marker)])]) -> HolidayTable {
    let mut table = HolidayTable::new(2024, 3).expect("valid month");
    for (user, cells) in rows {
        table
            .push_row(UserRow {
                id: UserId(*user),
                name: format!("User {}", user),
                cells: cells.iter().map(|(day, m)| DayCell::new(*day, *m)).collect(),
            })
            .expect("valid row");
    }
    table
}
