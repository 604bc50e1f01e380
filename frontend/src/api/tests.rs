#![cfg(not(coverage))]

use super::*;
use httpmock::prelude::*;
use serde_json::json;

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(&server.url("/api"))
}

fn error_json(message: &str, code: &str) -> serde_json::Value {
    json!({ "error": message, "code": code })
}

fn student_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "student_id": id,
        "student_name": name,
        "telegram_username": "handle"
    })
}

#[tokio::test]
async fn public_endpoints_succeed() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/api/config");
        then.status(200)
            .json_body(json!({ "time_zone": "Asia/Yangon", "absence_threshold": 5 }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/students/next-id");
        then.status(200).json_body(json!({ "student_id": "WDF1004" }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/students")
            .json_body(json!({ "student_name": "Aung Kyaw", "telegram_username": "aung_k" }));
        then.status(201).json_body(json!({
            "student_id": "WDF1004",
            "student_name": "Aung Kyaw",
            "meeting": { "meeting_id": "81234567", "password": "secret1" }
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/attendance");
        then.status(201).json_body(json!({
            "id": "doc-1",
            "student_id": "WDF1004",
            "student_name": "Aung Kyaw",
            "attendance_code": "ABC123",
            "created_at": "2026-03-02T03:00:00Z"
        }));
    });

    let client = api_client(&server);
    let config = client.get_public_config().await.unwrap();
    assert_eq!(config.time_zone, "Asia/Yangon");
    assert_eq!(config.absence_threshold, 5);

    let next = client.next_student_id().await.unwrap();
    assert_eq!(next.student_id, "WDF1004");

    let registered = client
        .register_student(&RegisterStudentRequest {
            student_name: "Aung Kyaw".into(),
            telegram_username: "aung_k".into(),
        })
        .await
        .unwrap();
    assert_eq!(registered.student_id, "WDF1004");
    assert_eq!(
        registered.meeting.map(|m| m.meeting_id),
        Some("81234567".to_string())
    );

    let record = client
        .submit_attendance(&SubmitAttendanceRequest {
            student_id: "WDF1004".into(),
            attendance_code: "ABC123".into(),
        })
        .await
        .unwrap();
    assert_eq!(record.attendance_code, "ABC123");
}

#[tokio::test]
async fn backend_error_body_is_surfaced() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/attendance");
        then.status(404).json_body(error_json(
            "Invalid Student ID. Please register first.",
            "NOT_FOUND",
        ));
    });

    let err = api_client(&server)
        .submit_attendance(&SubmitAttendanceRequest {
            student_id: "WDF1999".into(),
            attendance_code: "ABC".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, "NOT_FOUND");
    assert_eq!(err.error, "Invalid Student ID. Please register first.");
}

#[tokio::test]
async fn non_json_error_falls_back_to_status() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/students/next-id");
        then.status(502).body("bad gateway");
    });

    let err = api_client(&server).next_student_id().await.unwrap_err();
    assert_eq!(err.code, "UNKNOWN");
    assert!(err.error.contains("502"));
}

#[tokio::test]
async fn admin_endpoints_send_bearer_token() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(POST)
            .path("/api/admin/login")
            .json_body(json!({ "username": "moderator", "password": "pw" }));
        then.status(200).json_body(json!({
            "access_token": "tok",
            "token_type": "Bearer",
            "expires_at": "2026-03-02T12:00:00Z",
            "username": "moderator"
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/admin/session")
            .header("authorization", "Bearer tok");
        then.status(200).json_body(json!({
            "username": "moderator",
            "expires_at": "2026-03-02T12:00:00Z"
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/admin/dashboard")
            .query_param("date", "2026-03-02")
            .header("authorization", "Bearer tok");
        then.status(200).json_body(json!({
            "date": "2026-03-02",
            "session_code": "ABC",
            "students": [student_json("WDF1001", "Aung")],
            "session_codes": [{ "date": "2026-03-02", "code": "ABC" }],
            "meeting": null
        }));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/admin/session-codes/2026-03-02")
            .json_body(json!({ "code": "XYZ9" }))
            .header("authorization", "Bearer tok");
        then.status(201).json_body(json!({
            "session_code": { "date": "2026-03-02", "code": "XYZ9" },
            "created": true
        }));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/admin/meeting-credentials")
            .json_body(json!({ "meeting_id": "8123456" }))
            .header("authorization", "Bearer tok");
        then.status(200)
            .json_body(json!({ "meeting_id": "8123456", "password": "secret1" }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/admin/logout")
            .header("authorization", "Bearer tok");
        then.status(200).json_body(json!({ "message": "Logged out" }));
    });

    let client = api_client(&server);
    let login = client
        .admin_login(&AdminLoginRequest {
            username: "moderator".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.access_token, "tok");

    let session = client.admin_session("tok").await.unwrap();
    assert_eq!(session.username, "moderator");

    let dashboard = client
        .admin_dashboard("tok", Some("2026-03-02"))
        .await
        .unwrap();
    assert_eq!(dashboard.session_code.as_deref(), Some("ABC"));
    assert_eq!(dashboard.students.len(), 1);
    assert!(dashboard.meeting.is_none());

    let upserted = client
        .admin_put_session_code("tok", "2026-03-02", "XYZ9")
        .await
        .unwrap();
    assert!(upserted.created);

    let meeting = client
        .admin_put_meeting_credentials(
            "tok",
            &UpdateMeetingCredentialsRequest {
                meeting_id: Some("8123456".into()),
                password: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(meeting.password, "secret1");

    client.admin_logout("tok").await.unwrap();
}

#[tokio::test]
async fn admin_reports_and_export() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/admin/reports/daily")
            .query_param("date", "2026-03-02");
        then.status(200).json_body(json!({
            "date": "2026-03-02",
            "session_code": "ABC",
            "rows": [{
                "student_id": "WDF1001",
                "student_name": "Aung",
                "telegram_username": null,
                "status": "absent-informed",
                "submitted_code": "ABD"
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/admin/reports/daily/export")
            .query_param("date", "2026-03-02");
        then.status(200)
            .header("content-type", "text/csv; charset=utf-8")
            .body("Student ID,Name\nWDF1001,Aung\n");
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/admin/reports/absentees")
            .query_param("include_all", "true");
        then.status(200).json_body(json!({
            "as_of": "2026-03-02",
            "threshold": 5,
            "class_days_considered": 6,
            "rows": [{
                "student_id": "WDF1001",
                "student_name": "Aung",
                "consecutive_misses": 6,
                "last_attendance": null,
                "long_term_absent": true
            }]
        }));
    });

    let client = api_client(&server);
    let report = client
        .admin_daily_report("tok", Some("2026-03-02"))
        .await
        .unwrap();
    assert_eq!(report.rows[0].status, AttendanceStatus::AbsentInformed);
    assert_eq!(report.rows[0].submitted_code.as_deref(), Some("ABD"));

    let csv = client
        .admin_export_daily_report("tok", "2026-03-02")
        .await
        .unwrap();
    assert!(csv.starts_with("Student ID,Name"));

    let absentees = client.admin_absentees("tok", true).await.unwrap();
    assert_eq!(absentees.rows.len(), 1);
    assert!(absentees.rows[0].long_term_absent);
    assert!(absentees.rows[0].last_attendance.is_none());
}

#[tokio::test]
async fn unauthorized_admin_call_is_flagged() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/session");
        then.status(401)
            .json_body(error_json("Token has been revoked", "UNAUTHORIZED"));
    });

    let err = api_client(&server).admin_session("stale").await.unwrap_err();
    assert!(err.is_unauthorized());
}
