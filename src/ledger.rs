use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::error::ApiError;

/// Present/absent cutoff on the hours-present ratio. Business rule, boundary
/// inclusive: exactly 75% still counts as present.
pub const PRESENT_THRESHOLD: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

/// A validated attendance increment. Constructed only through [`AttendanceDelta::new`],
/// which rejects non-positive or non-finite hours before the store is ever touched.
#[derive(Debug, Clone)]
pub struct AttendanceDelta {
    pub inc_hours: f64,
    pub is_present: bool,
    pub marked_by: Option<String>,
}

impl AttendanceDelta {
    pub fn new(
        inc_hours: f64,
        is_present: bool,
        marked_by: Option<String>,
    ) -> Result<Self, ApiError> {
        if !inc_hours.is_finite() || inc_hours <= 0.0 {
            return Err(ApiError::InvalidArgument(
                "incHours must be a positive number.".into(),
            ));
        }
        Ok(Self {
            inc_hours,
            is_present,
            marked_by,
        })
    }
}

/// Accumulator snapshot of one attendance row. `hours_present + hours_absent`
/// equals `total_classes` after every applied delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourTotals {
    pub hours_present: f64,
    pub hours_absent: f64,
    pub total_classes: f64,
}

impl HourTotals {
    /// Coerce nullable stored columns. Missing values count as zero; this is
    /// the only place untyped store values enter the arithmetic.
    pub fn coerce(
        hours_present: Option<f64>,
        hours_absent: Option<f64>,
        total_classes: Option<f64>,
    ) -> Self {
        Self {
            hours_present: hours_present.unwrap_or(0.0),
            hours_absent: hours_absent.unwrap_or(0.0),
            total_classes: total_classes.unwrap_or(0.0),
        }
    }

    /// Apply one increment and re-derive the status. Deliberately not
    /// idempotent: every call grows `total_classes` by the delta's hours.
    pub fn apply(&self, delta: &AttendanceDelta) -> (HourTotals, AttendanceStatus) {
        let next = HourTotals {
            hours_present: self.hours_present + if delta.is_present { delta.inc_hours } else { 0.0 },
            hours_absent: self.hours_absent + if delta.is_present { 0.0 } else { delta.inc_hours },
            total_classes: self.total_classes + delta.inc_hours,
        };
        (next, derive_status(next.hours_present, next.total_classes))
    }
}

pub fn derive_status(hours_present: f64, total_classes: f64) -> AttendanceStatus {
    // Zero total would divide by zero; treat the ratio as 0.
    if total_classes <= 0.0 {
        return AttendanceStatus::Absent;
    }
    if hours_present / total_classes >= PRESENT_THRESHOLD {
        AttendanceStatus::Present
    } else {
        AttendanceStatus::Absent
    }
}

/// Both halves of the natural key must be present; rejected before the store
/// is touched, like the hour validation.
pub fn validate_natural_key(student_id: &str, course_id: &str) -> Result<(), ApiError> {
    if student_id.trim().is_empty() || course_id.trim().is_empty() {
        return Err(ApiError::InvalidArgument("Missing or invalid fields.".into()));
    }
    Ok(())
}

/// Normalize a client-supplied date to date-only granularity. The natural key
/// is per calendar day, so `2024-01-10T08:00:00Z` must match a row stored
/// under `2024-01-10`.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, ApiError> {
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    Err(ApiError::InvalidArgument(format!("Invalid date: {raw}")))
}

/// How a delta landed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    Updated { attendance_id: u64 },
    Inserted { attendance_id: u64 },
}

/// Apply a delta to an existing record located by its surrogate id.
///
/// Runs as a single transaction with a row lock so that concurrent increments
/// against the same record serialize instead of losing updates. Never creates
/// a row; an unknown id is `NotFound`.
pub async fn record_by_id(
    pool: &MySqlPool,
    attendance_id: u64,
    delta: AttendanceDelta,
) -> Result<DeltaOutcome, ApiError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
        r#"
        SELECT hours_present, hours_absent, total_classes
        FROM attendance
        WHERE attendance_id = ?
        FOR UPDATE
        "#,
    )
    .bind(attendance_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((hp, ha, tc)) = row else {
        return Err(ApiError::NotFound);
    };

    let current = HourTotals::coerce(hp, ha, tc);
    let (next, status) = current.apply(&delta);
    persist_totals(&mut tx, attendance_id, &next, status, delta.marked_by).await?;

    tx.commit().await?;
    Ok(DeltaOutcome::Updated { attendance_id })
}

// Unique-key violation (ER_DUP_ENTRY) vs deadlock victim (ER_LOCK_DEADLOCK,
// errno 1213). InnoDB rolls the victim's transaction back, so it is safe to
// rerun from the top.
const SQLSTATE_DUPLICATE_KEY: &str = "23000";
const SQLSTATE_DEADLOCK: &str = "40001";

const MAX_KEY_ATTEMPTS: u32 = 3;

fn error_sqlstate(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

fn is_duplicate_sqlstate(code: &str) -> bool {
    code == SQLSTATE_DUPLICATE_KEY
}

fn is_retryable_sqlstate(code: &str) -> bool {
    code == SQLSTATE_DEADLOCK
}

/// Apply a delta located by the natural key `(student_id, course_id, date)`,
/// creating the row if it does not exist yet.
///
/// The unique index over the natural key backs up the find-or-create: if a
/// concurrent caller wins the insert race, the duplicate-key error drops us
/// back onto the update branch within the same transaction. Two first-time
/// callers racing on an absent key can instead deadlock on their gap locks
/// under REPEATABLE READ; the victim's transaction is rolled back whole, so
/// it is retried a bounded number of times and lands on the update branch
/// once the winner has committed.
pub async fn record_by_key(
    pool: &MySqlPool,
    student_id: &str,
    course_id: &str,
    date: NaiveDate,
    delta: AttendanceDelta,
) -> Result<DeltaOutcome, ApiError> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match record_by_key_once(pool, student_id, course_id, date, &delta).await {
            Err(ApiError::StoreUnavailable(e))
                if attempts < MAX_KEY_ATTEMPTS
                    && error_sqlstate(&e).as_deref().is_some_and(is_retryable_sqlstate) =>
            {
                tracing::warn!(student_id, course_id, attempts, "Deadlock on attendance insert, retrying");
            }
            other => return other,
        }
    }
}

async fn record_by_key_once(
    pool: &MySqlPool,
    student_id: &str,
    course_id: &str,
    date: NaiveDate,
    delta: &AttendanceDelta,
) -> Result<DeltaOutcome, ApiError> {
    let mut tx = pool.begin().await?;

    let existing = fetch_by_key_locked(&mut tx, student_id, course_id, date).await?;

    if let Some((attendance_id, current)) = existing {
        let (next, status) = current.apply(delta);
        persist_totals(&mut tx, attendance_id, &next, status, delta.marked_by.clone()).await?;
        tx.commit().await?;
        return Ok(DeltaOutcome::Updated { attendance_id });
    }

    // Fresh row: the first delta seeds all three accumulators.
    let (next, status) = HourTotals::coerce(None, None, None).apply(delta);
    let inserted = sqlx::query(
        r#"
        INSERT INTO attendance
        (student_id, course_id, date, hours_present, hours_absent, total_classes, status, marked_by_faculty, last_edited)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, NOW())
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .bind(date)
    .bind(next.hours_present)
    .bind(next.hours_absent)
    .bind(next.total_classes)
    .bind(status.as_str())
    .bind(delta.marked_by.clone())
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(res) => {
            let attendance_id = res.last_insert_id();
            tx.commit().await?;
            Ok(DeltaOutcome::Inserted { attendance_id })
        }
        Err(e) => {
            if !error_sqlstate(&e).as_deref().is_some_and(is_duplicate_sqlstate) {
                return Err(e.into());
            }
            // Lost the insert race to a committed peer; the row exists now,
            // so update it.
            let (attendance_id, current) =
                fetch_by_key_locked(&mut tx, student_id, course_id, date)
                    .await?
                    .ok_or(ApiError::NotFound)?;
            let (next, status) = current.apply(delta);
            persist_totals(&mut tx, attendance_id, &next, status, delta.marked_by.clone()).await?;
            tx.commit().await?;
            Ok(DeltaOutcome::Updated { attendance_id })
        }
    }
}

async fn fetch_by_key_locked(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    student_id: &str,
    course_id: &str,
    date: NaiveDate,
) -> Result<Option<(u64, HourTotals)>, sqlx::Error> {
    let row = sqlx::query_as::<_, (u64, Option<f64>, Option<f64>, Option<f64>)>(
        r#"
        SELECT attendance_id, hours_present, hours_absent, total_classes
        FROM attendance
        WHERE student_id = ? AND course_id = ? AND date = ?
        FOR UPDATE
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .bind(date)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(|(id, hp, ha, tc)| (id, HourTotals::coerce(hp, ha, tc))))
}

async fn persist_totals(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    attendance_id: u64,
    totals: &HourTotals,
    status: AttendanceStatus,
    marked_by: Option<String>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE attendance
        SET hours_present     = ?,
            hours_absent      = ?,
            total_classes     = ?,
            status            = ?,
            marked_by_faculty = ?,
            last_edited       = NOW()
        WHERE attendance_id   = ?
        "#,
    )
    .bind(totals.hours_present)
    .bind(totals.hours_absent)
    .bind(totals.total_classes)
    .bind(status.as_str())
    .bind(marked_by)
    .bind(attendance_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(hours: f64, present: bool) -> AttendanceDelta {
        AttendanceDelta::new(hours, present, None).unwrap()
    }

    #[test]
    fn first_delta_seeds_all_accumulators() {
        let (next, status) = HourTotals::coerce(None, None, None).apply(&delta(4.0, true));
        assert_eq!(next.hours_present, 4.0);
        assert_eq!(next.hours_absent, 0.0);
        assert_eq!(next.total_classes, 4.0);
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn accumulators_sum_each_sides_increments() {
        let mut totals = HourTotals::coerce(None, None, None);
        for (hours, present) in [(4.0, true), (2.0, false), (3.0, true), (1.0, false)] {
            totals = totals.apply(&delta(hours, present)).0;
        }
        assert_eq!(totals.hours_present, 7.0);
        assert_eq!(totals.hours_absent, 3.0);
        assert_eq!(totals.total_classes, 10.0);
        assert_eq!(totals.hours_present + totals.hours_absent, totals.total_classes);
    }

    #[test]
    fn repeated_delta_is_not_idempotent() {
        let totals = HourTotals {
            hours_present: 5.0,
            hours_absent: 1.0,
            total_classes: 6.0,
        };
        let once = totals.apply(&delta(1.0, true)).0;
        let twice = once.apply(&delta(1.0, true)).0;
        assert_eq!(once.hours_present, 6.0);
        assert_eq!(twice.hours_present, 7.0);
        assert_eq!(twice.total_classes, 8.0);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert_eq!(derive_status(3.0, 4.0), AttendanceStatus::Present);
        assert_eq!(derive_status(2.9999, 4.0), AttendanceStatus::Absent);
    }

    #[test]
    fn ratio_below_threshold_after_absence() {
        // 4 present then 2 absent: 4/6 < 0.75
        let totals = HourTotals::coerce(None, None, None).apply(&delta(4.0, true)).0;
        let (next, status) = totals.apply(&delta(2.0, false));
        assert_eq!(next.total_classes, 6.0);
        assert_eq!(status, AttendanceStatus::Absent);
    }

    #[test]
    fn zero_total_does_not_divide() {
        assert_eq!(derive_status(0.0, 0.0), AttendanceStatus::Absent);
    }

    #[test]
    fn missing_stored_values_coerce_to_zero() {
        let totals = HourTotals::coerce(None, Some(2.0), None);
        assert_eq!(totals.hours_present, 0.0);
        assert_eq!(totals.hours_absent, 2.0);
        assert_eq!(totals.total_classes, 0.0);
    }

    #[test]
    fn rejects_non_positive_hours() {
        assert!(AttendanceDelta::new(0.0, true, None).is_err());
        assert!(AttendanceDelta::new(-1.0, true, None).is_err());
        assert!(AttendanceDelta::new(f64::NAN, true, None).is_err());
        assert!(AttendanceDelta::new(f64::INFINITY, true, None).is_err());
    }

    #[test]
    fn date_normalizes_to_day_granularity() {
        let plain = normalize_date("2024-01-10").unwrap();
        let with_time = normalize_date("2024-01-10T08:00:00Z").unwrap();
        let local = normalize_date("2024-01-10T23:59:59").unwrap();
        assert_eq!(plain, with_time);
        assert_eq!(plain, local);
        assert!(normalize_date("10/01/2024").is_err());
    }

    #[test]
    fn rejects_blank_natural_key_fields() {
        assert!(validate_natural_key("", "C1").is_err());
        assert!(validate_natural_key("S1", "").is_err());
        assert!(validate_natural_key("  ", "C1").is_err());
        assert!(validate_natural_key("S1", "C1").is_ok());
    }

    #[test]
    fn deadlock_sqlstate_retries_duplicate_does_not() {
        assert!(is_retryable_sqlstate("40001"));
        assert!(!is_retryable_sqlstate("23000"));
        assert!(is_duplicate_sqlstate("23000"));
        assert!(!is_duplicate_sqlstate("40001"));
        assert!(error_sqlstate(&sqlx::Error::RowNotFound).is_none());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(AttendanceStatus::Present.as_str(), "present");
        assert_eq!(AttendanceStatus::Absent.as_str(), "absent");
    }
}
