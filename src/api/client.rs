use anyhow::{Context, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use crate::api::types::{ApiResponse, CareerPricesRequest, LoginData, Page, PageRequest};
use crate::core::error::ApiError;
use crate::models::career::{Career, CareerPrice, NewCareer};
use crate::models::enrollment::{Enrollment, EnrollmentsByUser, NewEnrollment};
use crate::models::news::{NewNews, NewsItem, NewsUpdate};
use crate::models::payment::{NewPayment, Payment, PaymentCancel, PaymentsByEnrollment};
use crate::models::student::{StudentCareers, StudentPayments, StudentProfile};
use crate::models::user::{NewUser, UserRecord, UserUpdate};

/// Typed client for the school backend REST API.
///
/// Every endpoint speaks the same `{success, message, data}` JSON envelope.
/// A non-2xx status, a transport failure, and a `success:false` payload all
/// surface as [`ApiError`] so callers can treat them uniformly.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Reachability probe used at startup: any HTTP status proves the
    /// backend answered.
    pub async fn probe(&self) -> Result<u16, ApiError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }

    // ---------------------------------------------------------------
    // Auth
    // ---------------------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = json!({ "username": username, "password": password });
        self.execute(self.request(Method::POST, "/login", None).json(&body))
            .await
    }

    // ---------------------------------------------------------------
    // Paginated lists
    // ---------------------------------------------------------------

    pub async fn users_page(
        &self,
        token: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<UserRecord>, ApiError> {
        self.execute(
            self.request(Method::POST, "/users/paginated", token)
                .json(request),
        )
        .await
    }

    pub async fn careers_page(
        &self,
        token: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<Career>, ApiError> {
        self.execute(
            self.request(Method::POST, "/careers/paginated", token)
                .json(request),
        )
        .await
    }

    pub async fn career_prices_page(
        &self,
        token: Option<&str>,
        request: &CareerPricesRequest,
    ) -> Result<Page<CareerPrice>, ApiError> {
        self.execute(
            self.request(Method::POST, "/careers/prices/paginated", token)
                .json(request),
        )
        .await
    }

    pub async fn payments_page(
        &self,
        token: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<Payment>, ApiError> {
        self.execute(
            self.request(Method::POST, "/payments/paginated", token)
                .json(request),
        )
        .await
    }

    pub async fn news_page(
        &self,
        token: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<NewsItem>, ApiError> {
        self.execute(
            self.request(Method::POST, "/news/paginated", token)
                .json(request),
        )
        .await
    }

    // ---------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------

    pub async fn create_user(
        &self,
        token: Option<&str>,
        user: &NewUser,
    ) -> Result<UserRecord, ApiError> {
        self.execute(self.request(Method::POST, "/users", token).json(user))
            .await
    }

    pub async fn get_user(&self, token: Option<&str>, id: i64) -> Result<UserRecord, ApiError> {
        self.execute(self.request(Method::GET, &format!("/users/{id}"), token))
            .await
    }

    pub async fn update_user(
        &self,
        token: Option<&str>,
        id: i64,
        user: &UserUpdate,
    ) -> Result<UserRecord, ApiError> {
        self.execute(
            self.request(Method::PUT, &format!("/users/{id}"), token)
                .json(user),
        )
        .await
    }

    pub async fn delete_user(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        self.execute_ok(self.request(Method::DELETE, &format!("/users/{id}"), token))
            .await
    }

    // ---------------------------------------------------------------
    // Careers
    // ---------------------------------------------------------------

    pub async fn create_career(
        &self,
        token: Option<&str>,
        career: &NewCareer,
    ) -> Result<Career, ApiError> {
        self.execute(self.request(Method::POST, "/careers", token).json(career))
            .await
    }

    pub async fn get_career(&self, token: Option<&str>, id: i64) -> Result<Career, ApiError> {
        self.execute(self.request(Method::GET, &format!("/careers/{id}"), token))
            .await
    }

    pub async fn update_career(
        &self,
        token: Option<&str>,
        id: i64,
        career: &NewCareer,
    ) -> Result<Career, ApiError> {
        self.execute(
            self.request(Method::PUT, &format!("/careers/{id}"), token)
                .json(career),
        )
        .await
    }

    pub async fn delete_career(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        self.execute_ok(self.request(Method::DELETE, &format!("/careers/{id}"), token))
            .await
    }

    // ---------------------------------------------------------------
    // News
    // ---------------------------------------------------------------

    pub async fn create_news(
        &self,
        token: Option<&str>,
        news: &NewNews,
    ) -> Result<NewsItem, ApiError> {
        self.execute(self.request(Method::POST, "/news", token).json(news))
            .await
    }

    pub async fn get_news(&self, token: Option<&str>, id: i64) -> Result<NewsItem, ApiError> {
        self.execute(self.request(Method::GET, &format!("/news/{id}"), token))
            .await
    }

    pub async fn update_news(
        &self,
        token: Option<&str>,
        id: i64,
        news: &NewsUpdate,
    ) -> Result<NewsItem, ApiError> {
        self.execute(
            self.request(Method::PUT, &format!("/news/{id}"), token)
                .json(news),
        )
        .await
    }

    pub async fn delete_news(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        self.execute_ok(self.request(Method::DELETE, &format!("/news/{id}"), token))
            .await
    }

    // ---------------------------------------------------------------
    // Enrollments
    // ---------------------------------------------------------------

    pub async fn create_enrollment(
        &self,
        token: Option<&str>,
        enrollment: &NewEnrollment,
    ) -> Result<(), ApiError> {
        self.execute_ok(
            self.request(Method::POST, "/enrollments", token)
                .json(enrollment),
        )
        .await
    }

    pub async fn enrollments_by_user(
        &self,
        token: Option<&str>,
        request: &EnrollmentsByUser,
    ) -> Result<Page<Enrollment>, ApiError> {
        self.execute(
            self.request(Method::POST, "/enrollments/by-user", token)
                .json(request),
        )
        .await
    }

    pub async fn delete_enrollment(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        self.execute_ok(self.request(Method::DELETE, &format!("/enrollments/{id}"), token))
            .await
    }

    // ---------------------------------------------------------------
    // Payments
    // ---------------------------------------------------------------

    pub async fn create_payment(
        &self,
        token: Option<&str>,
        payment: &NewPayment,
    ) -> Result<Payment, ApiError> {
        self.execute(self.request(Method::POST, "/payments", token).json(payment))
            .await
    }

    pub async fn payments_by_enrollment(
        &self,
        token: Option<&str>,
        request: &PaymentsByEnrollment,
    ) -> Result<Page<Payment>, ApiError> {
        self.execute(
            self.request(Method::POST, "/payments/by-enrollment", token)
                .json(request),
        )
        .await
    }

    pub async fn cancel_payment(
        &self,
        token: Option<&str>,
        id: i64,
        cancel: &PaymentCancel,
    ) -> Result<Payment, ApiError> {
        self.execute(
            self.request(Method::PUT, &format!("/payments/{id}/cancel"), token)
                .json(cancel),
        )
        .await
    }

    // ---------------------------------------------------------------
    // Student views
    // ---------------------------------------------------------------

    pub async fn student_profile(&self, token: Option<&str>) -> Result<StudentProfile, ApiError> {
        self.execute(self.request(Method::GET, "/alumno/perfil", token))
            .await
    }

    pub async fn student_careers(&self, token: Option<&str>) -> Result<StudentCareers, ApiError> {
        self.execute(self.request(Method::GET, "/alumno/carreras", token))
            .await
    }

    pub async fn student_payments(
        &self,
        token: Option<&str>,
    ) -> Result<StudentPayments, ApiError> {
        self.execute(self.request(Method::GET, "/alumno/pagos", token))
            .await
    }

    // ---------------------------------------------------------------
    // Plumbing
    // ---------------------------------------------------------------

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let envelope: ApiResponse<T> = self.send(request).await?;
        envelope.into_result()
    }

    /// For endpoints whose success payload carries nothing worth returning
    /// (deletes, enrollment creation).
    async fn execute_ok(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let envelope: ApiResponse<serde_json::Value> = self.send(request).await?;
        envelope.into_ok()
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
