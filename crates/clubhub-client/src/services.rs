//! Per-resource services, reached through [`Client`] accessors

use serde_json::Value;

use crate::{BearerToken, Client, Club, ClubList, RequestBody, Result, SchoolRegistration};

// Users Service
pub struct UsersService {
    client: Client,
}

impl UsersService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `GET /user/{id}`. The user record is returned as-is.
    pub async fn get(&self, user_id: &str, token: &BearerToken) -> Result<Value> {
        self.client
            .fetch_segments(&["user", user_id], Some(token))
            .await
    }
}

// Activities Service
pub struct ActivitiesService {
    client: Client,
}

impl ActivitiesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn all(&self, token: &BearerToken) -> Result<Value> {
        self.client
            .fetch_resource("/activity/all", Some(token))
            .await
    }

    /// Upload a new activity. The multipart form is passed through untouched.
    pub async fn create(
        &self,
        form: reqwest::multipart::Form,
        token: &BearerToken,
    ) -> Result<Value> {
        self.client
            .submit_resource("/activity/new", RequestBody::Multipart(form), Some(token))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "error uploading activity data"))
    }
}

// Clubs Service
pub struct ClubsService {
    client: Client,
}

impl ClubsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every club a school can pick from
    pub async fn all(&self) -> Result<Vec<Club>> {
        let list: ClubList = self.client.fetch_resource("/club/all", None).await?;
        Ok(list.clubs)
    }
}

// Groups Service
pub struct GroupsService {
    client: Client,
}

impl GroupsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// `POST /group/school/register` with a JSON body.
    ///
    /// The endpoint is unauthenticated. A non-2xx status fails with
    /// [`crate::Error::Api`] whatever the client's status policy. Any truthy
    /// answer means the account was created; see [`crate::is_truthy`].
    pub async fn register_school(&self, payload: &SchoolRegistration) -> Result<Value> {
        self.client
            .submit_checked(
                "/group/school/register",
                RequestBody::json(payload)?,
                None,
            )
            .await
    }
}
