//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and the environment
//! variables DATABASE_URL and JWT_SECRET. Without them every test is skipped.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Days, Utc};
use integration_tests::{
    assert_json, assert_status, check_test_env, coached_pair, date, error_code, fixtures::*,
    register, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let request = RegisterRequest::runner();

    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.capabilities, vec!["runner"]);
    assert!(!auth.user.has_coach);
    assert_eq!(auth.token_type, "Bearer");

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let response = server
        .post("/auth/refresh", &json!({ "refresh_token": login.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let request = RegisterRequest::coach();
    register(&server, &request).await.unwrap();

    let mut again = RegisterRequest::coach();
    again.username = request.username.clone();
    let response = server.post("/auth/register", &again).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let request = RegisterRequest::runner();
    register(&server, &request).await.unwrap();

    let login = LoginRequest {
        username: request.username,
        password: "WrongPass123".to_string(),
    };
    let response = server.post("/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let response = server.get("/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_deleted_account_token_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let account = register(&server, &RegisterRequest::runner()).await.unwrap();

    let response = server.delete_auth("/users/@me", &account.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/users/@me", &account.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Relationship Tests
// ============================================================================

#[tokio::test]
async fn test_capabilities_guard_endpoints() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let coach = register(&server, &RegisterRequest::coach()).await.unwrap();
    let runner = register(&server, &RegisterRequest::runner()).await.unwrap();

    let response = server.get_auth("/runners", &runner.token).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_code(response).await.unwrap(), "NOT_A_COACH");

    let response = server.get_auth("/invites", &coach.token).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_code(response).await.unwrap(), "NOT_A_RUNNER");
}

#[tokio::test]
async fn test_invite_and_accept() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let coach = register(&server, &RegisterRequest::coach()).await.unwrap();
    let runner = register(&server, &RegisterRequest::runner()).await.unwrap();

    let response = server
        .post_auth("/runners", &coach.token, &json!({ "runner": runner.username }))
        .await
        .unwrap();
    let invite: RelationshipResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(invite.status, "INVITED_BY_COACH");

    let response = server.get_auth("/invites", &runner.token).await.unwrap();
    let pending: Vec<RelationshipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].coach.username, coach.username);

    let path = format!("/invites/{}/accept", coach.username);
    let response = server.post_auth(&path, &runner.token, &json!({})).await.unwrap();
    let accepted: RelationshipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "ESTABLISHED");
    assert_eq!(accepted.id, invite.id);

    let response = server.get_auth("/users/@me", &runner.token).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(me.has_coach);

    let response = server.get_auth("/runners", &coach.token).await.unwrap();
    let roster: RosterPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roster.data.len(), 1);
    assert_eq!(roster.pagination.total, 1);
    assert_eq!(roster.pagination.limit, 15);
}

#[tokio::test]
async fn test_invite_rules() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, _) = coached_pair(&server).await.unwrap();
    let other = register(&server, &RegisterRequest::coach()).await.unwrap();

    let response = server
        .post_auth("/runners", &coach.token, &json!({ "runner": unique_username("ghost") }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await.unwrap(), "UNKNOWN_RUNNER");

    let response = server
        .post_auth("/runners", &other.token, &json!({ "runner": runner.username }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await.unwrap(), "RUNNER_HAS_COACH");
}

#[tokio::test]
async fn test_coached_runner_cannot_accept_second_coach() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let second = register(&server, &RegisterRequest::coach()).await.unwrap();
    let runner = register(&server, &RegisterRequest::runner()).await.unwrap();
    let first = register(&server, &RegisterRequest::coach()).await.unwrap();

    for coach in [&first, &second] {
        let response = server
            .post_auth("/runners", &coach.token, &json!({ "runner": runner.username }))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let path = format!("/invites/{}/accept", first.username);
    let response = server.post_auth(&path, &runner.token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let path = format!("/invites/{}/accept", second.username);
    let response = server.post_auth(&path, &runner.token, &json!({})).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_code(response).await.unwrap(), "ALREADY_COACHED");
}

#[tokio::test]
async fn test_nickname_unique_per_coach() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, first, _) = coached_pair(&server).await.unwrap();
    let second = register(&server, &RegisterRequest::runner()).await.unwrap();
    let response = server
        .post_auth("/runners", &coach.token, &json!({ "runner": second.username }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/invites/{}/accept", coach.username);
    let response = server.post_auth(&path, &second.token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let path = format!("/runners/{}", first.username);
    let response = server
        .patch_auth(&path, &coach.token, &json!({ "nickname": "Speedy" }))
        .await
        .unwrap();
    let updated: RelationshipResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.displayed_name, "Speedy");

    let path = format!("/runners/{}", second.username);
    let response = server
        .patch_auth(&path, &coach.token, &json!({ "nickname": "Speedy" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await.unwrap(), "NICKNAME_TAKEN");
}

// ============================================================================
// Schedule Tests
// ============================================================================

#[tokio::test]
async fn test_week_view_from_wednesday() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, _) = coached_pair(&server).await.unwrap();

    let path = format!("/runners/{}/trainings/2024-03-04", runner.username);
    let response = server
        .put_auth(&path, &coach.token, &json!({ "description": "d1" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/runners/{}/trainings?date=2024-03-06", runner.username);
    let response = server.get_auth(&path, &coach.token).await.unwrap();
    let week: WeekResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(week.days.len(), 7);
    assert_eq!(week.monday, date(2024, 3, 4));
    assert_eq!(week.previous_week, date(2024, 2, 26));
    assert_eq!(week.next_week, date(2024, 3, 11));
    assert_eq!(week.days[0].description, "d1");
    assert!(week.days[0].id.is_some());
    assert!(week.days[1..].iter().all(|day| day.id.is_none()));
}

#[tokio::test]
async fn test_malformed_day_path_is_bad_request() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, _) = coached_pair(&server).await.unwrap();

    let path = format!("/runners/{}/trainings/2024-13-01", runner.username);
    let response = server.get_auth(&path, &coach.token).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_runner_week_hides_future_trainings() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, _) = coached_pair(&server).await.unwrap();
    let today = Utc::now().date_naive();
    let day = today + Days::new(2);

    let path = format!("/runners/{}/trainings/{day}", runner.username);
    let body = json!({ "description": "race", "visible_since": today + Days::new(30) });
    let response = server.put_auth(&path, &coach.token, &body).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/me/trainings?date={day}"), &runner.token)
        .await
        .unwrap();
    let week: WeekResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(week.days.iter().all(|d| d.id.is_none() && d.description.is_empty()));

    let response = server
        .get_auth(&format!("/me/trainings/{day}"), &runner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_runner_reports_execution() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, _) = coached_pair(&server).await.unwrap();

    let path = format!("/runners/{}/trainings/2024-03-05", runner.username);
    let response = server
        .put_auth(&path, &coach.token, &json!({ "description": "intervals" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth("/me/trainings/2024-03-05", &runner.token, &json!({ "execution": "done" }))
        .await
        .unwrap();
    let training: TrainingResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(training.execution.as_deref(), Some("done"));
    assert_eq!(training.description, "intervals");
}

// ============================================================================
// Training Upsert Tests
// ============================================================================

#[tokio::test]
async fn test_upsert_requires_confirmation_then_overwrites() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, relationship) = coached_pair(&server).await.unwrap();

    let body = json!({ "runners": [runner.username], "date": "2024-04-01", "description": "first" });
    let response = server.post_auth("/trainings", &coach.token, &body).await.unwrap();
    let applied: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(applied["status"], "applied");

    let body = json!({ "runners": [runner.username], "date": "2024-04-01", "description": "second" });
    let response = server.post_auth("/trainings", &coach.token, &body).await.unwrap();
    let pending: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(pending["status"], "confirmation_required");
    assert_eq!(pending["conflicts"][0]["runner"], runner.username.as_str());
    assert_eq!(pending["conflicts"][0]["description"], "first");

    let path = format!("/relations/{}/trainings?start_date=2024-04-01&end_date=2024-04-01", relationship.id);
    let response = server.get_auth(&path, &coach.token).await.unwrap();
    let trainings: Vec<TrainingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(trainings.len(), 1);
    assert_eq!(trainings[0].description, "first");

    let body = json!({
        "runners": [runner.username],
        "date": "2024-04-01",
        "description": "second",
        "force": true
    });
    let response = server.post_auth("/trainings", &coach.token, &body).await.unwrap();
    let forced: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(forced["status"], "applied");
    assert_eq!(forced["trainings"][0]["description"], "second");
    assert_eq!(forced["trainings"][0]["id"], trainings[0].id.clone().unwrap().as_str());
}

#[tokio::test]
async fn test_upsert_with_uncoached_runner_writes_nothing() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, runner, relationship) = coached_pair(&server).await.unwrap();
    let stranger = register(&server, &RegisterRequest::runner()).await.unwrap();

    let body = json!({
        "runners": [runner.username, stranger.username],
        "date": "2024-04-02",
        "description": "tempo"
    });
    let response = server.post_auth("/trainings", &coach.token, &body).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await.unwrap(), "RUNNER_NOT_COACHED");

    let path = format!("/relations/{}/trainings", relationship.id);
    let response = server.get_auth(&path, &coach.token).await.unwrap();
    let trainings: Vec<TrainingResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(trainings.is_empty());
}

#[tokio::test]
async fn test_invalid_training_range_is_bad_request() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, _, relationship) = coached_pair(&server).await.unwrap();

    let path = format!("/relations/{}/trainings?start_date=yesterday", relationship.id);
    let response = server.get_auth(&path, &coach.token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await.unwrap(), "INVALID_DATE");
}

#[tokio::test]
async fn test_training_of_other_coach_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (_, _, relationship) = coached_pair(&server).await.unwrap();
    let (other, _, _) = coached_pair(&server).await.unwrap();

    let path = format!("/relations/{}/trainings", relationship.id);
    let response = server
        .post_auth(&path, &other.token, &json!({ "date": "2024-05-01", "description": "x" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_training_crud() {
    if !check_test_env() {
        return;
    }

    let server = server().await;
    let (coach, _, relationship) = coached_pair(&server).await.unwrap();

    let path = format!("/relations/{}/trainings", relationship.id);
    let response = server
        .post_auth(&path, &coach.token, &json!({ "date": "2024-05-02", "description": "easy" }))
        .await
        .unwrap();
    let created: TrainingResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.relation_id, relationship.id);
    let training_path = format!("/trainings/{}", created.id.unwrap());

    let response = server
        .patch_auth(&training_path, &coach.token, &json!({ "description": "steady" }))
        .await
        .unwrap();
    let updated: TrainingResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.description, "steady");
    assert_eq!(updated.date, date(2024, 5, 2));

    let response = server.delete_auth(&training_path, &coach.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&training_path, &coach.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
