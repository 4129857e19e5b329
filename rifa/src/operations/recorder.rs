//! Best-effort activity recording.
//!
//! Activity records are written after the transaction that changed state has
//! committed. A failed write must never undo that change, so recording
//! retries once and then gives up with an error log instead of propagating.

use rusqlite::Connection;

use crate::activity::Activity;
use crate::database;

/// The outcome of an activity recording attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The id of the stored record, if recording succeeded.
    pub activity_id: Option<i64>,
    /// Whether a retry was needed.
    pub retried: bool,
}

impl RecordOutcome {
    /// Returns true if the record was stored.
    #[must_use]
    pub const fn recorded(&self) -> bool {
        self.activity_id.is_some()
    }
}

/// Appends an activity record, retrying once on failure.
///
/// Never returns an error: the caller's state change has already committed
/// and stands regardless of whether the audit entry could be written.
pub fn record(conn: &Connection, activity: &Activity) -> RecordOutcome {
    match database::insert_activity(conn, activity) {
        Ok(id) => RecordOutcome {
            activity_id: Some(id),
            retried: false,
        },
        Err(first_err) => {
            log::warn!("activity record failed, retrying: {first_err}");
            match database::insert_activity(conn, activity) {
                Ok(id) => RecordOutcome {
                    activity_id: Some(id),
                    retried: true,
                },
                Err(second_err) => {
                    log::error!(
                        "activity record dropped ({}): {second_err}",
                        activity.kind()
                    );
                    RecordOutcome {
                        activity_id: None,
                        retried: true,
                    }
                }
            }
        }
    }
}
