use crate::api::{
    AbsenteeReport, AdminLoginRequest, AdminLoginResponse, AdminSessionResponse, ApiClient,
    ApiError, DailyReport, DashboardResponse, MeetingCredentials, UpdateMeetingCredentialsRequest,
    UpsertSessionCodeResponse,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct AdminRepository {
    client: Rc<ApiClient>,
}

impl Default for AdminRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: AdminLoginRequest) -> Result<AdminLoginResponse, ApiError> {
        self.client.admin_login(&request).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.client.admin_logout(token).await
    }

    pub async fn session(&self, token: &str) -> Result<AdminSessionResponse, ApiError> {
        self.client.admin_session(token).await
    }

    pub async fn dashboard(
        &self,
        token: &str,
        date: Option<String>,
    ) -> Result<DashboardResponse, ApiError> {
        self.client.admin_dashboard(token, date.as_deref()).await
    }

    pub async fn save_session_code(
        &self,
        token: &str,
        date: &str,
        code: &str,
    ) -> Result<UpsertSessionCodeResponse, ApiError> {
        self.client.admin_put_session_code(token, date, code).await
    }

    pub async fn save_meeting_credentials(
        &self,
        token: &str,
        request: UpdateMeetingCredentialsRequest,
    ) -> Result<MeetingCredentials, ApiError> {
        self.client
            .admin_put_meeting_credentials(token, &request)
            .await
    }

    pub async fn daily_report(
        &self,
        token: &str,
        date: Option<String>,
    ) -> Result<DailyReport, ApiError> {
        self.client.admin_daily_report(token, date.as_deref()).await
    }

    pub async fn export_daily_report(&self, token: &str, date: &str) -> Result<String, ApiError> {
        self.client.admin_export_daily_report(token, date).await
    }

    pub async fn absentees(
        &self,
        token: &str,
        include_all: bool,
    ) -> Result<AbsenteeReport, ApiError> {
        self.client.admin_absentees(token, include_all).await
    }
}
