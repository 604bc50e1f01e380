use crate::api::{ApiClient, ApiError, AttendanceRecord, SubmitAttendanceRequest};

pub async fn submit_attendance(
    api: &ApiClient,
    request: &SubmitAttendanceRequest,
) -> Result<AttendanceRecord, ApiError> {
    api.submit_attendance(request).await
}
