//! Test fixtures and data generators

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::helpers::{assert_json, assert_status, TestServer};

/// Usernames unique across test runs against the same database
pub fn unique_username(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &id[..12])
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn coach() -> Self {
        Self::unique("coach")
    }

    pub fn runner() -> Self {
        Self::unique("runner")
    }

    fn unique(role: &str) -> Self {
        let username = unique_username(role);
        Self {
            email: format!("{username}@example.com"),
            username,
            password: "TestPass123".to_string(),
            role: role.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: CurrentUserResponse,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub capabilities: Vec<String>,
    pub has_coach: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipResponse {
    pub id: String,
    pub coach: UserResponse,
    pub runner: UserResponse,
    pub status: String,
    pub nickname: Option<String>,
    pub displayed_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct RosterPage {
    pub data: Vec<RelationshipResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct TrainingResponse {
    pub id: Option<String>,
    pub relation_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub execution: Option<String>,
    pub visible_since: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct WeekResponse {
    pub relation_id: String,
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
    pub previous_week: NaiveDate,
    pub next_week: NaiveDate,
    pub days: Vec<TrainingResponse>,
}

/// A registered account and its access token
#[derive(Debug)]
pub struct Account {
    pub username: String,
    pub token: String,
}

pub async fn register(server: &TestServer, request: &RegisterRequest) -> Result<Account> {
    let response = server.post("/auth/register", request).await?;
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await?;
    Ok(Account {
        username: auth.user.username,
        token: auth.access_token,
    })
}

/// A coach and a runner whose relationship is established
pub async fn coached_pair(server: &TestServer) -> Result<(Account, Account, RelationshipResponse)> {
    let coach = register(server, &RegisterRequest::coach()).await?;
    let runner = register(server, &RegisterRequest::runner()).await?;

    let response = server
        .post_auth("/runners", &coach.token, &json!({ "runner": runner.username }))
        .await?;
    assert_status(response, StatusCode::CREATED).await?;

    let path = format!("/invites/{}/accept", coach.username);
    let response = server.post_auth(&path, &runner.token, &json!({})).await?;
    let relationship: RelationshipResponse = assert_json(response, StatusCode::OK).await?;

    Ok((coach, runner, relationship))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
