// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitlife_pro::config::Config;
use fitlife_pro::db::LocalDb;
use fitlife_pro::error::AppError;
use fitlife_pro::routes::create_router;
use fitlife_pro::services::{GenerationRequest, TextGenerator};
use fitlife_pro::AppState;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// A complete plan as the generator would return it, wrapped in a code fence.
#[allow(dead_code)]
pub const SAMPLE_PLAN: &str = r#"```json
{
  "motivation": "Cada treino conta.",
  "workoutRoutine": [
    {
      "dayName": "Dia A",
      "focus": "Peito e Tríceps",
      "exercises": [
        {"name": "Supino Reto", "sets": "4", "reps": "10", "notes": "Controle a descida"}
      ]
    }
  ],
  "nutritionPlan": [
    {
      "type": "Café da Manhã",
      "totalCalories": 400,
      "items": [{"name": "Ovos", "portion": "3 un", "calories": 210, "protein": 18}],
      "substitutions": ["Tapioca com queijo", "Iogurte com aveia"]
    },
    {
      "type": "Almoço",
      "totalCalories": 650,
      "items": [{"name": "Frango", "portion": "150g", "calories": 250, "protein": 46.5}],
      "substitutions": ["Peixe", "Carne magra"]
    }
  ]
}
```"#;

/// What the scripted generator does on each call.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Script {
    Reply(String),
    /// Sleep, then reply
    Slow(Duration, String),
    Fail,
}

/// Fake generator driven by a script, recording every prompt it sees.
pub struct ScriptedGenerator {
    script: Mutex<Script>,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedGenerator {
    pub fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn set(&self, script: Script) {
        *self.script.lock().unwrap() = script;
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        let script = self.script.lock().unwrap().clone();
        match script {
            Script::Reply(text) => Ok(text),
            Script::Slow(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Script::Fail => Err(AppError::Generator("scripted failure".to_string())),
        }
    }
}

/// Test app over an in-memory store and a scripted generator.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub generator: Arc<ScriptedGenerator>,
}

/// Create a test app whose generator returns [`SAMPLE_PLAN`].
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    create_test_app_with(Config::test_default(), LocalDb::in_memory())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config, db: LocalDb) -> TestApp {
    let generator = Arc::new(ScriptedGenerator::new(Script::Reply(SAMPLE_PLAN.to_string())));
    let state = Arc::new(AppState::new(config, db, generator.clone()));
    TestApp {
        router: create_router(state.clone()),
        state,
        generator,
    }
}

#[allow(dead_code)]
impl TestApp {
    /// Send a JSON request, optionally as `token`. Returns status and parsed body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Register an account and return its bearer token.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/auth/register",
                None,
                Some(serde_json::json!({"email": email, "password": password, "name": name})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Submit a gym onboarding form for the session `token`.
    pub async fn onboard(&self, token: &str) -> (StatusCode, Value) {
        self.send("POST", "/api/onboarding", Some(token), Some(onboarding_form()))
            .await
    }
}

#[allow(dead_code)]
pub fn onboarding_form() -> Value {
    serde_json::json!({
        "name": "Ana",
        "age": 30,
        "weight": 70.0,
        "height": 165.0,
        "goal": "Perder Peso",
        "level": "Iniciante",
        "trainingLocation": "gym",
        "dietaryRestrictions": "Sem lactose",
        "playsSoccer": true
    })
}
