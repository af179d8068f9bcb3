// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Onboarding-to-plan pipeline.
//!
//! profile → prompt → generator call (time-boxed) → fence stripping →
//! JSON parse → shape warnings. Persisting the result is the caller's job.

use crate::error::AppError;
use crate::models::{GeneratedPlan, UserProfile};
use crate::services::generator::{GenerationRequest, TextGenerator};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Lower temperature keeps the model from looping or inventing structure.
const PLAN_TEMPERATURE: f32 = 0.5;

/// Build the generator instruction for `profile`.
pub fn build_plan_prompt(profile: &UserProfile) -> String {
    let limitations = non_blank(profile.physical_limitations.as_deref()).unwrap_or("Nenhuma");
    let cravings = non_blank(profile.food_cravings.as_deref()).unwrap_or("Nenhum");
    let soccer = if profile.plays_soccer.unwrap_or(false) {
        "Sim"
    } else {
        "Não"
    };

    format!(
        "Crie um plano de treino e dieta para: {name}\n\
         Objetivo: {goal} | Nível: {level}\n\
         Dados: {age} anos, {weight}kg, {height}cm\n\
         \n\
         CONTEXTO:\n\
         - Equipamento: {equipment}\n\
         - Limitações Físicas: \"{limitations}\" (Adapte o treino se houver).\n\
         - Ponto Fraco Alimentar: \"{cravings}\" (Se houver, inclua 1 receita fit no lanche).\n\
         - Futebol: {soccer}\n\
         \n\
         REGRAS CRÍTICAS DE FORMATAÇÃO:\n\
         1. SEJA EXTREMAMENTE CONCISO. Evite textos longos.\n\
         2. A 'motivation' deve ter no MÁXIMO 2 frases curtas.\n\
         3. NÃO escreva blocos de texto gigantes.\n\
         4. Responda apenas com o JSON.\n\
         \n\
         Idioma: Português (pt-BR).",
        name = profile.name,
        goal = profile.goal.label(),
        level = profile.level.label(),
        age = profile.age,
        weight = profile.weight,
        height = profile.height,
        equipment = profile.equipment,
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Structured-output schema describing [`GeneratedPlan`].
pub fn plan_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "motivation": {
                "type": "STRING",
                "description": "Uma frase motivacional muito curta (máximo 20 palavras) e impactante."
            },
            "workoutRoutine": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "dayName": { "type": "STRING", "description": "Ex: Segunda-feira ou Dia A" },
                        "focus": { "type": "STRING", "description": "Ex: Peito e Tríceps" },
                        "exercises": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "sets": { "type": "STRING" },
                                    "reps": { "type": "STRING" },
                                    "notes": {
                                        "type": "STRING",
                                        "description": "Dica técnica muito breve (max 10 palavras)."
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "nutritionPlan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "description": "Ex: Café da Manhã" },
                        "totalCalories": { "type": "NUMBER" },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "portion": { "type": "STRING" },
                                    "calories": { "type": "NUMBER" },
                                    "protein": { "type": "NUMBER" }
                                }
                            }
                        },
                        "substitutions": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Lista de 2 opções curtas para troca."
                        }
                    }
                }
            }
        },
        "required": ["motivation", "workoutRoutine", "nutritionPlan"]
    })
}

/// Remove markdown code-fence markers the model sometimes wraps JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse raw generator output into a plan.
pub fn parse_plan(text: &str) -> Result<GeneratedPlan, AppError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!(error = %e, "Plan JSON parse error");
        AppError::PlanFormat
    })
}

/// Structural gaps in a parsed plan. Such plans are still stored and rendered.
pub fn plan_warnings(plan: &GeneratedPlan) -> Vec<String> {
    let mut warnings = Vec::new();

    if plan.workout_routine.is_empty() {
        warnings.push("plan has no workout days".to_string());
    }
    if plan.nutrition_plan.is_empty() {
        warnings.push("plan has no meals".to_string());
    }
    for (i, day) in plan.workout_routine.iter().enumerate() {
        if day.exercises.is_empty() {
            warnings.push(format!("workout day {} ({}) has no exercises", i, day.day_name));
        }
    }
    for (i, meal) in plan.nutrition_plan.iter().enumerate() {
        if meal.items.is_empty() {
            warnings.push(format!("meal {} ({}) has no items", i, meal.meal_type));
        }
    }

    warnings
}

/// Generates plans through the external generator.
#[derive(Clone)]
pub struct PlanService {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl PlanService {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Request a fresh plan for `profile`.
    ///
    /// If the generator has not answered within the timeout the call is
    /// dropped and `GeneratorTimeout` returned; a late answer is never seen.
    pub async fn generate_plan(&self, profile: &UserProfile) -> Result<GeneratedPlan, AppError> {
        let request = GenerationRequest {
            prompt: build_plan_prompt(profile),
            response_schema: Some(plan_schema()),
            temperature: Some(PLAN_TEMPERATURE),
        };

        let started = std::time::Instant::now();
        let text = match tokio::time::timeout(self.timeout, self.generator.generate(&request)).await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Plan generation timed out"
                );
                return Err(AppError::GeneratorTimeout);
            }
        };

        if text.trim().is_empty() {
            return Err(AppError::Generator("Sem resposta da IA".to_string()));
        }

        let plan = parse_plan(&text)?;

        let warnings = plan_warnings(&plan);
        if !warnings.is_empty() {
            tracing::warn!(?warnings, "Generated plan is structurally incomplete");
        }

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            days = plan.workout_routine.len(),
            meals = plan.nutrition_plan.len(),
            "Plan generated"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserGoal, UserLevel};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ana".to_string(),
            age: 30,
            weight: 70.5,
            height: 165.0,
            goal: UserGoal::LoseWeight,
            level: UserLevel::Intermediate,
            equipment: "Academia Completa (Máquinas, Barras, Halteres)".to_string(),
            dietary_restrictions: String::new(),
            target_weight: None,
            deadline: None,
            reminders: None,
            weight_history: None,
            daily_commute: None,
            extra_activity: None,
            wants_supplements: None,
            plays_soccer: Some(true),
            starting_photo: None,
            food_cravings: Some("Doces".to_string()),
            physical_limitations: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_prompt_embeds_profile() {
        let prompt = build_plan_prompt(&profile());

        assert!(prompt.contains("Crie um plano de treino e dieta para: Ana"));
        assert!(prompt.contains("Objetivo: Perder Peso | Nível: Intermediário"));
        assert!(prompt.contains("Dados: 30 anos, 70.5kg, 165cm"));
        assert!(prompt.contains("Limitações Físicas: \"Nenhuma\""));
        assert!(prompt.contains("Ponto Fraco Alimentar: \"Doces\""));
        assert!(prompt.contains("Futebol: Sim"));
        assert!(prompt.contains("Idioma: Português (pt-BR)."));
    }

    #[test]
    fn test_strip_code_fences() {
        let raw = "```json\n{\"motivation\":\"Foco\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"motivation\":\"Foco\"}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn test_parse_plan_rejects_garbage() {
        let err = parse_plan("Desculpe, não posso ajudar.").unwrap_err();
        assert!(matches!(err, AppError::PlanFormat));
    }

    #[test]
    fn test_plan_warnings_flag_empty_sections() {
        let plan = parse_plan(
            r#"{"motivation":"x","workoutRoutine":[{"dayName":"Dia A","focus":"Peito","exercises":[]}],"nutritionPlan":[]}"#,
        )
        .unwrap();

        let warnings = plan_warnings(&plan);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("Dia A")));
        assert!(warnings.iter().any(|w| w.contains("no meals")));
    }

    #[test]
    fn test_schema_requires_top_level_fields() {
        let schema = plan_schema();
        assert_eq!(
            schema["required"],
            json!(["motivation", "workoutRoutine", "nutritionPlan"])
        );
    }
}
