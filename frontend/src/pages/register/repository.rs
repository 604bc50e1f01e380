use crate::api::{
    ApiClient, ApiError, NextStudentIdResponse, RegisterStudentRequest, RegistrationResponse,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct RegisterRepository {
    client: Rc<ApiClient>,
}

impl Default for RegisterRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn preview_student_id(&self) -> Result<NextStudentIdResponse, ApiError> {
        self.client.next_student_id().await
    }

    pub async fn register(
        &self,
        request: RegisterStudentRequest,
    ) -> Result<RegistrationResponse, ApiError> {
        self.client.register_student(&request).await
    }
}
