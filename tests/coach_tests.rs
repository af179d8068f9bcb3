// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily quote and supplement chat routes.

use axum::http::StatusCode;
use common::Script;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_quote_and_fallback() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;

    app.generator
        .set(Script::Reply("Suor hoje, orgulho amanhã.".to_string()));
    let (status, body) = app.send("GET", "/api/quote", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"], "Suor hoje, orgulho amanhã.");

    app.generator.set(Script::Fail);
    let (status, body) = app.send("GET", "/api/quote", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"], "O único treino ruim é aquele que não aconteceu.");
}

#[tokio::test]
async fn test_supplement_chat() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;
    app.generator
        .set(Script::Reply("Creatina: 3 a 5 g por dia.".to_string()));

    let (status, body) = app
        .send(
            "POST",
            "/api/supplements/chat",
            Some(&token),
            Some(json!({"history": ["Usuário: Oi", "IA: Olá!"], "message": "Quanto de creatina?"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Creatina: 3 a 5 g por dia.");

    let prompt = app.generator.prompts().pop().unwrap();
    assert!(prompt.contains("Histórico:\nUsuário: Oi\nIA: Olá!"));
    assert!(prompt.ends_with("Usuário: Quanto de creatina?"));

    app.generator.set(Script::Reply(String::new()));
    let (_, body) = app
        .send(
            "POST",
            "/api/supplements/chat",
            Some(&token),
            Some(json!({"message": "E whey?"})),
        )
        .await;
    assert_eq!(body["reply"], "Desculpe, não consegui processar sua dúvida agora.");
}

#[tokio::test]
async fn test_empty_chat_message_rejected() {
    let app = common::create_test_app();
    let token = app.register("a@b.com", "pw123", "Ana").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/supplements/chat",
            Some(&token),
            Some(json!({"message": "   "})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(app.generator.prompts().is_empty());
}
