use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{Config, StoreBackend},
    db::{AppwriteStore, CollectionRef, DocumentStore, MemoryStore},
    docs::ApiDoc,
    handlers,
    middleware::{auth_admin, create_ip_rate_limiter, log_error_responses, request_id},
    state::AppState,
};

/// Creates the document store selected by `STORE_BACKEND`.
pub fn build_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Appwrite => Ok(Arc::new(AppwriteStore::new(
            &config.appwrite_endpoint,
            &config.appwrite_project_id,
            &config.appwrite_api_key,
        )?)),
        StoreBackend::Memory => {
            let ids = &config.collections;
            let students =
                CollectionRef::new(&ids.students_database_id, &ids.students_collection_id);
            Ok(Arc::new(
                MemoryStore::new().with_unique_attribute(students, "studentId"),
            ))
        }
    }
}

/// Assembles every route, layer, and the shared state into one router.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let public_routes = Router::new()
        .route("/api/health", get(handlers::config::health))
        .route("/api/config", get(handlers::config::get_config))
        .route(
            "/api/students/next-id",
            get(handlers::students::next_student_id),
        );

    // Writes reachable without a token are throttled per client IP.
    let mut limited_routes = Router::new()
        .route("/api/students", post(handlers::students::register))
        .route("/api/attendance", post(handlers::attendance::submit))
        .route("/api/admin/login", post(handlers::admin::login));
    if state.config.rate_limit_enabled {
        limited_routes = limited_routes.layer(create_ip_rate_limiter(&state.config)?);
    }

    let admin_routes = Router::new()
        .route("/api/admin/logout", post(handlers::admin::logout))
        .route("/api/admin/session", get(handlers::admin::session))
        .route("/api/admin/dashboard", get(handlers::admin::dashboard))
        .route("/api/admin/students", get(handlers::admin::list_students))
        .route(
            "/api/admin/session-codes",
            get(handlers::admin::list_session_codes),
        )
        .route(
            "/api/admin/session-codes/{date}",
            put(handlers::admin::put_session_code),
        )
        .route(
            "/api/admin/meeting-credentials",
            get(handlers::admin::get_meeting_credentials)
                .put(handlers::admin::put_meeting_credentials),
        )
        .route(
            "/api/admin/reports/daily",
            get(handlers::admin::daily_report),
        )
        .route(
            "/api/admin/reports/daily/export",
            get(handlers::admin::export_daily_report),
        )
        .route(
            "/api/admin/reports/absentees",
            get(handlers::admin::absentee_report),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_admin,
        ));

    let cors = cors_layer(&state.config);

    Ok(Router::new()
        .merge(public_routes)
        .merge(limited_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(log_error_responses))
                .layer(cors),
        )
        .with_state(state))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60))
}
