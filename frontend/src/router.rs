use leptos::*;
use leptos_router::*;

use crate::{
    pages::{AdminPage, AttendancePage, HomePage, NotFoundPage, RegisterPage},
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &["/", "/register", "/attendance", "/attendanceForm", "/admin"];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/admin"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/attendance" view=AttendancePage/>
                    <Route path="/attendanceForm" view=AttendancePage/>
                    <Route path="/admin" view=AdminPage/>
                    <Route path="/*any" view=NotFoundPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
