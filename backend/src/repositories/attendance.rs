//! Attendance repository.
//!
//! Records are append-only. Day queries filter on the store's creation
//! timestamp using the UTC bounds of the local calendar day.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::{
    encode_data, list_all, unique_document_id, CollectionRef, Document, DocumentStore, ListQuery,
    ReadPolicy, StoreError, CREATED_AT,
};
use crate::models::{attendance::AttendanceRecord, student::Student};
use crate::types::StudentId;
use crate::utils::time::day_bounds_utc;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttendanceDocument {
    student_id: String,
    student_name: String,
    attendance_code: String,
}

fn decode_record(document: &Document) -> Result<AttendanceRecord, StoreError> {
    let raw = document.decode::<AttendanceDocument>()?;
    let student_id = raw
        .student_id
        .parse::<StudentId>()
        .map_err(|err| StoreError::Decode(format!("document {}: {}", document.id, err)))?;
    Ok(AttendanceRecord {
        id: document.id.clone(),
        student_id,
        student_name: raw.student_name,
        attendance_code: raw.attendance_code,
        created_at: document.created_at,
    })
}

fn store_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone)]
pub struct AttendanceRepository {
    store: Arc<dyn DocumentStore>,
    collection: CollectionRef,
    policy: ReadPolicy,
}

impl AttendanceRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: CollectionRef, policy: ReadPolicy) -> Self {
        Self {
            store,
            collection,
            policy,
        }
    }

    /// Appends a record, snapshotting the student's current name.
    pub async fn create(
        &self,
        student: &Student,
        attendance_code: &str,
    ) -> Result<AttendanceRecord, StoreError> {
        let data = encode_data(&AttendanceDocument {
            student_id: student.student_id.to_string(),
            student_name: student.student_name.clone(),
            attendance_code: attendance_code.to_string(),
        })?;
        let document = self
            .store
            .create_document(&self.collection, &unique_document_id(), data)
            .await?;
        decode_record(&document)
    }

    /// Records created on `date` in the given timezone, oldest first.
    pub async fn list_for_date(
        &self,
        date: NaiveDate,
        tz: &Tz,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let (start, end) = day_bounds_utc(date, tz);
        let query = ListQuery::new()
            .greater_than_equal(CREATED_AT, store_timestamp(start))
            .less_than(CREATED_AT, store_timestamp(end))
            .order_asc(CREATED_AT);
        let documents = list_all(self.store.as_ref(), &self.collection, query, &self.policy).await?;
        documents.iter().map(decode_record).collect()
    }

    /// Every record ever written, oldest first.
    pub async fn list_all(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let query = ListQuery::new().order_asc(CREATED_AT);
        let documents = list_all(self.store.as_ref(), &self.collection, query, &self.policy).await?;
        documents.iter().map(decode_record).collect()
    }
}
