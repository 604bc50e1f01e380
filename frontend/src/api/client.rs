use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{api::types::*, config};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(config::normalize_base_url(&base_url.into())),
        }
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    async fn url(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        builder.send().await.map_err(|e| {
            log::error!("Request failed: {}", e);
            ApiError::request_failed(
                "Could not reach the attendance service. Check your connection and try again.",
            )
        })
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(error) => error,
            Err(_) => ApiError::unknown(format!("Request failed with status {}", status)),
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    pub async fn get_public_config(&self) -> Result<PublicConfig, ApiError> {
        let url = self.url("/config").await;
        Self::parse(Self::send(self.client.get(url)).await?).await
    }

    pub async fn next_student_id(&self) -> Result<NextStudentIdResponse, ApiError> {
        let url = self.url("/students/next-id").await;
        Self::parse(Self::send(self.client.get(url)).await?).await
    }

    pub async fn register_student(
        &self,
        request: &RegisterStudentRequest,
    ) -> Result<RegistrationResponse, ApiError> {
        let url = self.url("/students").await;
        Self::parse(Self::send(self.client.post(url).json(request)).await?).await
    }

    pub async fn submit_attendance(
        &self,
        request: &SubmitAttendanceRequest,
    ) -> Result<AttendanceRecord, ApiError> {
        let url = self.url("/attendance").await;
        Self::parse(Self::send(self.client.post(url).json(request)).await?).await
    }

    pub async fn admin_login(
        &self,
        request: &AdminLoginRequest,
    ) -> Result<AdminLoginResponse, ApiError> {
        let url = self.url("/admin/login").await;
        Self::parse(Self::send(self.client.post(url).json(request)).await?).await
    }

    pub async fn admin_logout(&self, token: &str) -> Result<(), ApiError> {
        let url = self.url("/admin/logout").await;
        let response = Self::send(Self::bearer(self.client.post(url), token)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    pub async fn admin_session(&self, token: &str) -> Result<AdminSessionResponse, ApiError> {
        let url = self.url("/admin/session").await;
        Self::parse(Self::send(Self::bearer(self.client.get(url), token)).await?).await
    }

    pub async fn admin_dashboard(
        &self,
        token: &str,
        date: Option<&str>,
    ) -> Result<DashboardResponse, ApiError> {
        let url = self.url("/admin/dashboard").await;
        let mut builder = Self::bearer(self.client.get(url), token);
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            builder = builder.query(&[("date", date)]);
        }
        Self::parse(Self::send(builder).await?).await
    }

    pub async fn admin_put_session_code(
        &self,
        token: &str,
        date: &str,
        code: &str,
    ) -> Result<UpsertSessionCodeResponse, ApiError> {
        let url = self.url(&format!("/admin/session-codes/{}", date)).await;
        let builder = Self::bearer(self.client.put(url), token).json(&json!({ "code": code }));
        Self::parse(Self::send(builder).await?).await
    }

    pub async fn admin_put_meeting_credentials(
        &self,
        token: &str,
        request: &UpdateMeetingCredentialsRequest,
    ) -> Result<MeetingCredentials, ApiError> {
        let url = self.url("/admin/meeting-credentials").await;
        let builder = Self::bearer(self.client.put(url), token).json(request);
        Self::parse(Self::send(builder).await?).await
    }

    pub async fn admin_daily_report(
        &self,
        token: &str,
        date: Option<&str>,
    ) -> Result<DailyReport, ApiError> {
        let url = self.url("/admin/reports/daily").await;
        let mut builder = Self::bearer(self.client.get(url), token);
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            builder = builder.query(&[("date", date)]);
        }
        Self::parse(Self::send(builder).await?).await
    }

    /// Raw CSV text of the daily report.
    pub async fn admin_export_daily_report(
        &self,
        token: &str,
        date: &str,
    ) -> Result<String, ApiError> {
        let url = self.url("/admin/reports/daily/export").await;
        let builder = Self::bearer(self.client.get(url), token).query(&[("date", date)]);
        let response = Self::send(builder).await?;
        if response.status().is_success() {
            response
                .text()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to read export: {}", e)))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    pub async fn admin_absentees(
        &self,
        token: &str,
        include_all: bool,
    ) -> Result<AbsenteeReport, ApiError> {
        let url = self.url("/admin/reports/absentees").await;
        let builder = Self::bearer(self.client.get(url), token)
            .query(&[("include_all", if include_all { "true" } else { "false" })]);
        Self::parse(Self::send(builder).await?).await
    }
}
