// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge catalog and per-user challenge tracking.

use crate::db::LocalDb;
use crate::error::AppError;
use crate::models::{Challenge, ChallengeSession, Exercise};
use crate::time_utils::{format_elapsed, format_utc_rfc3339};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::OnceLock;

fn ex(name: &str, sets: &str, reps: &str, notes: &str) -> Exercise {
    Exercise {
        name: name.to_string(),
        sets: sets.to_string(),
        reps: reps.to_string(),
        notes: notes.to_string(),
    }
}

/// The built-in challenge modules.
pub fn catalog() -> &'static [Challenge] {
    static CATALOG: OnceLock<Vec<Challenge>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

/// Look up a challenge by id.
pub fn find_challenge(id: &str) -> Option<&'static Challenge> {
    catalog().iter().find(|c| c.id == id)
}

fn build_catalog() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "abs",
            title: "O Chamado do Tanquinho",
            description: "Um circuito abdominal intenso para esculpir o core e queimar gordura visceral.",
            difficulty: "Difícil",
            duration: "15 min",
            exercises: vec![
                ex("Prancha Isométrica", "3", "45s", "Mantenha a coluna reta e abdômen contraído"),
                ex("Abdominal Bicicleta", "3", "20 cada lado", "Gire bem o tronco tocando cotovelo no joelho"),
                ex("Mountain Climbers", "3", "30s", "Acelere o movimento como se estivesse correndo"),
                ex("Elevação de Pernas", "3", "15", "Controle a descida, não deixe encostar no chão"),
            ],
        },
        Challenge {
            id: "chest",
            title: "Peitoral de Vibranium",
            description: "Construa uma caixa torácica blindada com variações de empurrar.",
            difficulty: "Médio",
            duration: "20 min",
            exercises: vec![
                ex("Flexão de Braços (Clássica)", "4", "12-15", "Peito no chão, cotovelos a 45 graus"),
                ex("Flexão Diamante", "3", "10", "Mãos unidas formando um diamante (foco miolo/tríceps)"),
                ex("Flexão Inclinada", "3", "15", "Pés no chão, mãos em um banco ou sofá"),
                ex("Crucifixo (Halteres/Elástico)", "3", "12", "Abra bem os braços alongando o peitoral"),
            ],
        },
        Challenge {
            id: "legs",
            title: "Pernas de Titã",
            description: "Volume alto para quadríceps e posteriores. Prepare-se para não conseguir andar amanhã.",
            difficulty: "Insano",
            duration: "45 min",
            exercises: vec![
                ex("Agachamento Búlgaro", "4", "10 cada", "Foco no calcanhar da perna da frente"),
                ex("Leg Press 45 (ou Agach. Livre)", "4", "15", "Amplitude máxima sem tirar lombar do apoio"),
                ex("Passada (Lunges)", "3", "20 passos", "Passos largos para ativar glúteo e posterior"),
                ex("Cadeira Extensora", "3", "Até a falha", "Drop-set na última série"),
            ],
        },
        Challenge {
            id: "back",
            title: "Asas de Dragão",
            description: "Expanda suas dorsais e melhore sua postura com foco em puxadas.",
            difficulty: "Difícil",
            duration: "30 min",
            exercises: vec![
                ex("Barra Fixa (ou Graviton)", "4", "8-12", "Puxe até o queixo passar a barra"),
                ex("Remada Curvada", "4", "12", "Tronco inclinado, coluna neutra"),
                ex("Superman", "3", "15", "Deitado, levante braços e pernas simultaneamente"),
                ex("Serrote (Remada Unilateral)", "3", "12 cada", "Concentre em puxar com o cotovelo"),
            ],
        },
        Challenge {
            id: "hiit_ragnarok",
            title: "Ragnarok Metabólico",
            description: "O juízo final para as calorias. Protocolo Tabata brutal para secar gordura.",
            difficulty: "Insano",
            duration: "12 min",
            exercises: vec![
                ex("Sprint Estacionário (High Knees)", "8", "20s ON / 10s OFF", "Joelhos na altura do peito, velocidade máxima"),
                ex("Sprawl (Burpee s/ flexão)", "8", "20s ON / 10s OFF", "Jogue as pernas para trás e fique de pé rápido"),
                ex("Agachamento com Salto", "4", "30s", "Exploda na subida, amorteça na descida"),
                ex("Prancha Jack", "4", "30s", "Posição de prancha abrindo e fechando as pernas"),
            ],
        },
        Challenge {
            id: "glutes",
            title: "Glúteos Galácticos",
            description: "Exercícios isolados e compostos para máxima ativação e modelagem.",
            difficulty: "Médio",
            duration: "30 min",
            exercises: vec![
                ex("Elevação Pélvica", "4", "12", "Segure 2s no topo contraindo o glúteo"),
                ex("Abdutora (ou Elástico)", "3", "20", "Corpo inclinado levemente para frente"),
                ex("Coice na Polia/Caneleira", "3", "15", "Movimento controlado, sem girar quadril"),
                ex("Agachamento Sumô", "3", "12", "Pés afastados, pontas para fora"),
            ],
        },
        Challenge {
            id: "arms",
            title: "Braços de Hércules",
            description: "Bíceps e Tríceps em supersérie para um pump lendário.",
            difficulty: "Médio",
            duration: "25 min",
            exercises: vec![
                ex("Rosca Direta", "3", "12", "Não balance o tronco"),
                ex("Tríceps Banco (Mergulho)", "3", "15", "Desça até 90 graus"),
                ex("Rosca Martelo", "3", "12", "Pegada neutra, foca no braquial"),
                ex("Tríceps Corda/Testa", "3", "12", "Cotovelos fechados e fixos"),
            ],
        },
        Challenge {
            id: "shoulders",
            title: "Ombros de Atlas",
            description: "Construa ombros 3D com foco em todas as cabeças do deltoide.",
            difficulty: "Difícil",
            duration: "25 min",
            exercises: vec![
                ex("Desenvolvimento Arnold", "4", "10", "Rotação completa dos punhos na subida"),
                ex("Elevação Lateral", "4", "15", "Cotovelos levemente flexionados, foque no deltoide lateral"),
                ex("Face Pull", "3", "15", "Puxe a corda em direção à testa (foco posterior)"),
                ex("Elevação Frontal", "3", "12", "Sem impulso, controle a descida"),
            ],
        },
        Challenge {
            id: "fullbody",
            title: "Guerreiro Espartano",
            description: "Full Body metabólico. Recrute cada fibra muscular em um treino único.",
            difficulty: "Insano",
            duration: "35 min",
            exercises: vec![
                ex("Burpees", "4", "15", "Peito no chão e salto no topo"),
                ex("Thrusters (Agachamento + Desenv.)", "4", "12", "Use o impulso da perna para subir o peso"),
                ex("Renegade Row", "3", "10 cada", "Prancha com remada unilateral"),
                ex("Kettlebell/Halter Swing", "3", "20", "Explosão de quadril, não use os ombros"),
            ],
        },
        Challenge {
            id: "cardio",
            title: "Protocolo Supernova",
            description: "HIIT explosivo para acelerar o metabolismo e queimar calorias pós-treino.",
            difficulty: "Insano",
            duration: "20 min",
            exercises: vec![
                ex("Burpees", "4", "30s", "O máximo que conseguir"),
                ex("Polichinelos", "4", "45s", "Mantenha o ritmo constante"),
                ex("Agachamento com Salto", "4", "20s", "Amorteça a queda"),
                ex("Corrida Estacionária Alta", "4", "30s", "Joelhos lá em cima!"),
            ],
        },
        Challenge {
            id: "mobility",
            title: "Fluxo de Bambu",
            description: "Mobilidade e alongamento para recuperação ativa e prevenção de lesões.",
            difficulty: "Leve",
            duration: "15 min",
            exercises: vec![
                ex("Gato e Vaca", "2", "1 min", "Mobilize a coluna respirando fundo"),
                ex("Posição de Criança", "2", "45s", "Relaxe a lombar e alongue os braços"),
                ex("World's Greatest Stretch", "2", "10 cada", "Rotação torácica com afundo"),
                ex("Alongamento de Isquiotibiais", "2", "30s", "Tente alcançar a ponta dos pés sem dor"),
            ],
        },
    ]
}

/// Session as returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProgress {
    pub challenge: &'static Challenge,
    pub started_at: String,
    pub elapsed_seconds: i64,
    /// `MM:SS`
    pub elapsed: String,
    pub completed: Vec<bool>,
    pub completed_count: usize,
    pub done: bool,
}

/// Tracks a user's running challenge.
#[derive(Clone)]
pub struct ChallengeTracker {
    db: LocalDb,
}

impl ChallengeTracker {
    pub fn new(db: LocalDb) -> Self {
        Self { db }
    }

    /// Start `challenge_id`, replacing any running session.
    pub async fn start(&self, email: &str, challenge_id: &str) -> Result<ChallengeProgress, AppError> {
        let challenge = find_challenge(challenge_id)
            .ok_or_else(|| AppError::NotFound(format!("Challenge {}", challenge_id)))?;

        let session = ChallengeSession {
            challenge_id: challenge.id.to_string(),
            started_at: format_utc_rfc3339(Utc::now()),
            completed: vec![false; challenge.exercises.len()],
            finished_at: None,
        };
        self.db.set_challenge_session(email, &session).await?;

        tracing::info!(email, challenge = challenge.id, "Challenge started");
        progress(challenge, &session, Utc::now())
    }

    /// Current session, if any.
    pub fn current(&self, email: &str) -> Result<Option<ChallengeProgress>, AppError> {
        let Some(session) = self.db.get_challenge_session(email) else {
            return Ok(None);
        };
        // A session for a challenge that no longer exists reads as no session
        let Some(challenge) = find_challenge(&session.challenge_id) else {
            return Ok(None);
        };
        progress(challenge, &session, Utc::now()).map(Some)
    }

    /// Flip the completion flag of exercise `index`.
    pub async fn toggle_exercise(&self, email: &str, index: usize) -> Result<ChallengeProgress, AppError> {
        let (session, challenge) = self
            .db
            .update_challenge_session(email, |session| {
                let challenge = find_challenge(&session.challenge_id)
                    .ok_or_else(|| AppError::NotFound("No challenge in progress".to_string()))?;

                let flag = session.completed.get_mut(index).ok_or_else(|| {
                    AppError::Validation(format!(
                        "Exercício {} não existe neste desafio.",
                        index
                    ))
                })?;
                *flag = !*flag;

                session.finished_at = if session.is_done() {
                    Some(format_utc_rfc3339(Utc::now()))
                } else {
                    None
                };
                Ok(challenge)
            })
            .await?;

        progress(challenge, &session, Utc::now())
    }

    /// Stop and discard the running session.
    pub async fn stop(&self, email: &str) -> Result<bool, AppError> {
        self.db.delete_challenge_session(email).await
    }
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Bad session timestamp {}: {}", raw, e)))
}

fn progress(
    challenge: &'static Challenge,
    session: &ChallengeSession,
    now: DateTime<Utc>,
) -> Result<ChallengeProgress, AppError> {
    let started = parse_time(&session.started_at)?;
    let end = match &session.finished_at {
        Some(finished) => parse_time(finished)?,
        None => now,
    };
    let elapsed_seconds = (end - started).num_seconds().max(0);

    Ok(ChallengeProgress {
        challenge,
        started_at: session.started_at.clone(),
        elapsed_seconds,
        elapsed: format_elapsed(elapsed_seconds),
        completed: session.completed.clone(),
        completed_count: session.completed_count(),
        done: session.is_done(),
    })
}
