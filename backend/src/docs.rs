#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::ErrorResponse,
    handlers::{
        admin::{AbsenteeQuery, DateQuery},
        config::{HealthResponse, PublicConfigResponse},
    },
    models::{
        admin::{AdminLoginRequest, AdminLoginResponse, AdminSessionResponse},
        attendance::{AttendanceRecord, SubmitAttendanceRequest},
        meeting::{MeetingCredentials, UpdateMeetingCredentialsRequest},
        report::{
            AbsenteeReport, AbsenteeRow, AttendanceStatus, DailyReport, DailyStatusRow,
            DashboardResponse,
        },
        session_code::{SessionCode, UpsertSessionCodeRequest, UpsertSessionCodeResponse},
        student::{NextStudentIdResponse, RegisterStudentRequest, RegistrationResponse, Student},
    },
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_doc,
        config_doc,
        next_student_id_doc,
        register_student_doc,
        submit_attendance_doc,
        admin_login_doc,
        admin_logout_doc,
        admin_session_doc,
        admin_dashboard_doc,
        admin_students_doc,
        admin_list_session_codes_doc,
        admin_put_session_code_doc,
        admin_get_meeting_doc,
        admin_put_meeting_doc,
        admin_daily_report_doc,
        admin_daily_export_doc,
        admin_absentees_doc
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            PublicConfigResponse,
            // students & attendance
            Student,
            RegisterStudentRequest,
            RegistrationResponse,
            NextStudentIdResponse,
            SubmitAttendanceRequest,
            AttendanceRecord,
            // admin
            AdminLoginRequest,
            AdminLoginResponse,
            AdminSessionResponse,
            DashboardResponse,
            SessionCode,
            UpsertSessionCodeRequest,
            UpsertSessionCodeResponse,
            MeetingCredentials,
            UpdateMeetingCredentialsRequest,
            // reports
            AttendanceStatus,
            DailyStatusRow,
            DailyReport,
            AbsenteeRow,
            AbsenteeReport
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Public", description = "Registration, attendance and service info"),
        (name = "Admin", description = "Operator console API")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, body = HealthResponse)),
    tag = "Public",
    security(())
)]
fn health_doc() {}

#[utoipa::path(
    get,
    path = "/api/config",
    responses((status = 200, body = PublicConfigResponse)),
    tag = "Public",
    security(())
)]
fn config_doc() {}

#[utoipa::path(
    get,
    path = "/api/students/next-id",
    responses(
        (status = 200, description = "Identifier the next registration would likely receive", body = NextStudentIdResponse),
        (status = 503, body = ErrorResponse)
    ),
    tag = "Public",
    security(())
)]
fn next_student_id_doc() {}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = RegistrationResponse),
        (status = 400, description = "Invalid name or handle", body = ErrorResponse),
        (status = 409, description = "Identifier space exhausted or too much contention", body = ErrorResponse),
        (status = 429, body = ErrorResponse)
    ),
    tag = "Public",
    security(())
)]
fn register_student_doc() {}

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = SubmitAttendanceRequest,
    responses(
        (status = 201, description = "Submission recorded", body = AttendanceRecord),
        (status = 400, body = ErrorResponse),
        (status = 404, description = "Student not registered", body = ErrorResponse),
        (status = 429, body = ErrorResponse)
    ),
    tag = "Public",
    security(())
)]
fn submit_attendance_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, body = AdminLoginResponse),
        (status = 401, body = ErrorResponse)
    ),
    tag = "Admin",
    security(())
)]
fn admin_login_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses((status = 200, body = serde_json::Value)),
    tag = "Admin"
)]
fn admin_logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/session",
    responses((status = 200, body = AdminSessionResponse)),
    tag = "Admin"
)]
fn admin_session_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    params(DateQuery),
    responses((status = 200, body = DashboardResponse)),
    tag = "Admin"
)]
fn admin_dashboard_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/students",
    responses((status = 200, body = [Student])),
    tag = "Admin"
)]
fn admin_students_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/session-codes",
    responses((status = 200, description = "Newest date first", body = [SessionCode])),
    tag = "Admin"
)]
fn admin_list_session_codes_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/session-codes/{date}",
    params(("date" = String, Path, description = "Class day YYYY-MM-DD")),
    request_body = UpsertSessionCodeRequest,
    responses(
        (status = 200, description = "Code replaced", body = UpsertSessionCodeResponse),
        (status = 201, description = "Code created", body = UpsertSessionCodeResponse),
        (status = 409, description = "Code unchanged", body = ErrorResponse)
    ),
    tag = "Admin"
)]
fn admin_put_session_code_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/meeting-credentials",
    responses((status = 200, description = "Null when never configured", body = MeetingCredentials)),
    tag = "Admin"
)]
fn admin_get_meeting_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/meeting-credentials",
    request_body = UpdateMeetingCredentialsRequest,
    responses(
        (status = 200, body = MeetingCredentials),
        (status = 400, body = ErrorResponse),
        (status = 409, description = "Credentials unchanged", body = ErrorResponse)
    ),
    tag = "Admin"
)]
fn admin_put_meeting_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/reports/daily",
    params(DateQuery),
    responses((status = 200, body = DailyReport)),
    tag = "Admin"
)]
fn admin_daily_report_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/reports/daily/export",
    params(DateQuery),
    responses((status = 200, description = "CSV attachment", content_type = "text/csv", body = String)),
    tag = "Admin"
)]
fn admin_daily_export_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/reports/absentees",
    params(AbsenteeQuery),
    responses((status = 200, body = AbsenteeReport)),
    tag = "Admin"
)]
fn admin_absentees_doc() {}
