// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user data lifecycle tests: persistence across sessions, profile
//! edits, progress and deletion.

use axum::http::StatusCode;
use fitlife_pro::db::{keys, LocalDb};
use fitlife_pro::config::Config;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_logout_and_login_restore_data_exactly() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;
    app.onboard(&token).await;

    let profile_key = keys::user_key("a@b.com", keys::PROFILE);
    let plan_key = keys::user_key("a@b.com", keys::PLAN);
    let profile_before = app.state.db.get_raw(&profile_key).unwrap();
    let plan_before = app.state.db.get_raw(&plan_key).unwrap();

    let (status, _) = app.send("POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    assert_eq!(app.state.db.get_raw(&profile_key).unwrap(), profile_before);
    assert_eq!(app.state.db.get_raw(&plan_key).unwrap(), plan_before);

    let (status, plan) = app.send("GET", "/api/plan", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan, serde_json::from_str::<serde_json::Value>(&plan_before).unwrap());
}

#[tokio::test]
async fn test_data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let app = common::create_test_app_with(
            Config::test_default(),
            LocalDb::open(&path).await.unwrap(),
        );
        let token = app.register("a@b.com", "pw123", "Ana").await;
        app.onboard(&token).await;
    }

    let app = common::create_test_app_with(
        Config::test_default(),
        LocalDb::open(&path).await.unwrap(),
    );
    let (status, body) = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().unwrap();
    let (status, profile) = app.send("GET", "/api/profile", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Ana");
}

#[tokio::test]
async fn test_delete_data_keeps_account_and_other_users() {
    let app = common::create_test_app();
    let ana = app.register("a@b.com", "pw123", "Ana").await;
    let bia = app.register("b@b.com", "pw456", "Bia").await;
    app.onboard(&ana).await;
    app.onboard(&bia).await;
    app.send("POST", "/api/challenges/abs/start", Some(&ana), None)
        .await;

    let (status, body) = app.send("DELETE", "/api/data", Some(&ana), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 3);
    assert_eq!(body["account_deleted"], false);

    assert!(app.state.db.keys_with_prefix("a@b.com_").is_empty());
    assert!(app.state.db.get_plan("b@b.com").is_some());

    // Account still works and routes back to onboarding
    let (status, me) = app.send("GET", "/api/me", Some(&ana), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["hasPlan"], false);
}

#[tokio::test]
async fn test_delete_account() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;
    app.onboard(&token).await;

    let (status, body) = app.send("DELETE", "/api/account", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account_deleted"], true);
    assert!(app.state.db.get_user("a@b.com").is_none());

    // The old session no longer resolves to an account
    let (status, _) = app.send("GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The email can be registered again
    app.register("a@b.com", "new", "Ana").await;
}

#[tokio::test]
async fn test_goals_update() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;
    app.onboard(&token).await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/profile/goals",
            Some(&token),
            Some(json!({"goal": "Ganhar Massa", "weight": 71.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        "Por favor, preencha todas as informações antes de continuar."
    );

    let (status, profile) = app
        .send(
            "PUT",
            "/api/profile/goals",
            Some(&token),
            Some(json!({"goal": "Ganhar Massa", "weight": 71.0, "targetWeight": 76.0, "deadline": 12})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["goal"], "Ganhar Massa");
    assert_eq!(profile["targetWeight"], 76.0);
    assert_eq!(profile["deadline"], 12);

    // Editing goals never regenerates the plan
    assert_eq!(app.generator.prompts().len(), 1);
}

#[tokio::test]
async fn test_weight_log_and_progress() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;
    app.onboard(&token).await;

    // No history yet: illustrative series ending at the current weight
    let (status, progress) = app.send("GET", "/api/progress", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["simulated"], true);
    assert_eq!(progress["series"][0]["date"], "Semana 1");
    assert_eq!(progress["series"][0]["weight"], 73.0);
    assert_eq!(progress["series"][3]["date"], "Atual");

    for (date, weight) in [("2026-01-01", 72.0), ("2026-02-01", 69.5)] {
        let (status, _) = app
            .send(
                "POST",
                "/api/profile/weight",
                Some(&token),
                Some(json!({"date": date, "weight": weight})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, progress) = app.send("GET", "/api/progress", Some(&token), None).await;
    assert_eq!(progress["simulated"], false);
    assert_eq!(progress["startWeight"], 72.0);
    assert_eq!(progress["currentWeight"], 69.5);
    assert_eq!(progress["isPositiveTrend"], true);

    let (status, body) = app
        .send(
            "POST",
            "/api/profile/weight",
            Some(&token),
            Some(json!({"weight": 0.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Peso inválido.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_weight_logs_all_stored() {
    let app = std::sync::Arc::new(common::create_test_app());
    let token = app.register("a@b.com", "pw123", "Ana").await;
    app.onboard(&token).await;

    let handles: Vec<_> = (0..100u32)
        .map(|i| {
            let app = app.clone();
            let token = token.clone();
            tokio::spawn(async move {
                app.send(
                    "POST",
                    "/api/profile/weight",
                    Some(&token),
                    Some(json!({"weight": 60.0 + f64::from(i) / 10.0})),
                )
                .await
                .0
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.await.unwrap(), StatusCode::OK);
    }

    let (_, profile) = app.send("GET", "/api/profile", Some(&token), None).await;
    assert_eq!(profile["weightHistory"].as_array().unwrap().len(), 100);
}
