mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::TestApp;

#[tokio::test]
async fn session_code_create_update_and_no_op() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/session-codes/2025-03-03",
            Some(json!({ "code": "ABC1" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["created"], true);
    assert_eq!(body["session_code"]["code"], "ABC1");

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/session-codes/2025-03-03",
            Some(json!({ "code": "ABC1" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_CHANGES");

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/session-codes/2025-03-03",
            Some(json!({ "code": "XYZ9" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], false);

    let (status, body) = app
        .request(Method::GET, "/api/admin/session-codes", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let codes = body.as_array().expect("array");
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0]["code"], "XYZ9");
}

#[tokio::test]
async fn session_codes_are_listed_newest_first() {
    let app = TestApp::new();
    app.seed_session_code("2025-03-01", "A1");
    app.seed_session_code("2025-03-05", "C3");
    app.seed_session_code("2025-03-03", "B2");
    let token = app.login().await;

    let (_, body) = app
        .request(Method::GET, "/api/admin/session-codes", None, Some(&token))
        .await;
    let dates: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["date"].as_str())
        .collect();
    assert_eq!(dates, vec!["2025-03-05", "2025-03-03", "2025-03-01"]);
}

#[tokio::test]
async fn session_code_rejects_bad_date_and_code() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/admin/session-codes/03-03-2025",
            Some(json!({ "code": "ABC1" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/session-codes/2025-03-03",
            Some(json!({ "code": "abc-1" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn meeting_credentials_merge_partial_updates() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, body) = app
        .request(Method::GET, "/api/admin/meeting-credentials", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/meeting-credentials",
            Some(json!({ "meeting_id": "81234567", "password": "classpass" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["meeting_id"], "81234567");

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/meeting-credentials",
            Some(json!({ "meeting_id": "", "password": "newpass1" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meeting_id"], "81234567");
    assert_eq!(body["password"], "newpass1");

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/meeting-credentials",
            Some(json!({ "password": "newpass1" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_CHANGES");
}

#[tokio::test]
async fn meeting_credentials_reject_non_numeric_id() {
    let app = TestApp::new();
    let token = app.login().await;
    let (status, body) = app
        .request(
            Method::PUT,
            "/api/admin/meeting-credentials",
            Some(json!({ "meeting_id": "12ab", "password": "classpass" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Meeting ID must be numbers only.");
}

#[tokio::test]
async fn dashboard_bundles_students_codes_and_meeting() {
    let app = TestApp::new();
    app.seed_student("WDF1002", "Min Thu", None);
    app.seed_student("WDF1001", "Aye Chan", Some("aye_chan"));
    app.seed_session_code("2025-03-03", "ABC1");
    app.seed_meeting(json!("81234567"), "classpass");
    let token = app.login().await;

    let (status, body) = app
        .request(
            Method::GET,
            "/api/admin/dashboard?date=2025-03-03",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["date"], "2025-03-03");
    assert_eq!(body["session_code"], "ABC1");
    assert_eq!(body["students"][0]["student_id"], "WDF1001");
    assert_eq!(body["students"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["meeting"]["password"], "classpass");

    let (status, body) = app
        .request(
            Method::GET,
            "/api/admin/dashboard?date=2025-03-04",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session_code"].is_null());
}
