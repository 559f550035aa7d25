//! Core data model types for ludoteca.
//!
//! These mirror the records owned by the remote backend. The backend speaks
//! Portuguese field names on the wire (`nome`, `turma_id`, ...); the serde
//! renames keep the JSON exactly compatible while the Rust API stays English.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A child profile as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    /// Backend identifier.
    pub id: String,
    /// Child's display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Age in years.
    #[serde(rename = "idade")]
    pub age: u8,
    /// Optional diagnosis reference.
    #[serde(rename = "diagnostico_id", default)]
    pub diagnosis_id: Option<String>,
    /// Classroom the child belongs to, if assigned.
    #[serde(rename = "turma_id", default)]
    pub classroom_id: Option<String>,
}

/// A classroom grouping of children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// An activity (one playable mini-game) as registered in the backend catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "nivelDificuldade", default = "default_difficulty")]
    pub difficulty: u8,
}

fn default_difficulty() -> u8 {
    1
}

/// The persisted outcome of one completed game session for one child.
///
/// Built exactly once when a session finishes and never mutated locally
/// afterward. This is the body of `POST /progresso/registrar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(rename = "crianca_id")]
    pub child_id: String,
    #[serde(rename = "atividade_id")]
    pub activity_id: String,
    /// Score in [0, 10], one decimal place.
    #[serde(rename = "pontuacao")]
    pub score: f64,
    /// Total answer submissions across the session.
    #[serde(rename = "movimentos", skip_serializing_if = "Option::is_none")]
    pub moves: Option<u32>,
    #[serde(rename = "tempo_segundos", skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<u64>,
    /// Free-text note entered by the caregiver.
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "concluida")]
    pub completed: bool,
}

/// The child (and optionally classroom) a session is played for.
///
/// Threaded explicitly into session construction instead of living in
/// ambient global state; the CLI reads it from the settings store once at
/// startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedContext {
    pub child_id: Option<String>,
    pub classroom_id: Option<String>,
}

impl SelectedContext {
    pub fn for_child(child_id: impl Into<String>) -> Self {
        Self {
            child_id: Some(child_id.into()),
            classroom_id: None,
        }
    }
}

/// The mini-game families. Each family fixes a default miss policy and
/// scoring strategy; a game definition may override both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Memory card matching.
    Memory,
    /// Word family assembly.
    Words,
    /// Emotion recognition with weighted levels.
    Emotions,
    /// Counting exercises.
    Counting,
    /// Daily-routine sequencing with positional constraints.
    Routine,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::Memory => write!(f, "memory"),
            GameKind::Words => write!(f, "words"),
            GameKind::Emotions => write!(f, "emotions"),
            GameKind::Counting => write!(f, "counting"),
            GameKind::Routine => write!(f, "routine"),
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(GameKind::Memory),
            "words" => Ok(GameKind::Words),
            "emotions" | "emotion" => Ok(GameKind::Emotions),
            "counting" => Ok(GameKind::Counting),
            "routine" | "sequence" => Ok(GameKind::Routine),
            other => Err(format!("unknown game kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_kind_display_and_parse() {
        assert_eq!(GameKind::Memory.to_string(), "memory");
        assert_eq!("memory".parse::<GameKind>().unwrap(), GameKind::Memory);
        assert_eq!("Emotion".parse::<GameKind>().unwrap(), GameKind::Emotions);
        assert_eq!("sequence".parse::<GameKind>().unwrap(), GameKind::Routine);
        assert!("chess".parse::<GameKind>().is_err());
    }

    #[test]
    fn child_uses_backend_wire_names() {
        let json = r#"{"id":"c1","nome":"Ana","idade":6,"turma_id":"t1"}"#;
        let child: Child = serde_json::from_str(json).unwrap();
        assert_eq!(child.name, "Ana");
        assert_eq!(child.age, 6);
        assert_eq!(child.classroom_id.as_deref(), Some("t1"));
        assert!(child.diagnosis_id.is_none());
    }

    #[test]
    fn activity_difficulty_defaults_to_one() {
        let json = r#"{"id":"a1","titulo":"Memória animais"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.difficulty, 1);
        assert!(activity.category.is_empty());
    }

    #[test]
    fn progress_record_wire_format() {
        let record = ProgressRecord {
            child_id: "c1".into(),
            activity_id: "a1".into(),
            score: 9.5,
            moves: Some(12),
            elapsed_secs: None,
            note: Some("boa sessão".into()),
            completed: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["crianca_id"], "c1");
        assert_eq!(json["pontuacao"], 9.5);
        assert_eq!(json["movimentos"], 12);
        assert_eq!(json["concluida"], true);
        assert!(json.get("tempo_segundos").is_none());
    }
}
