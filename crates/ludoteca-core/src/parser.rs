//! TOML game-definition parser.
//!
//! Loads game definitions from TOML files and directories, and validates
//! them. Validation errors name the offending file and round so caregivers
//! authoring games can fix them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::GameKind;
use crate::rounds::{AnswerKey, GameDefinition, MissPolicy, Round};
use crate::scoring::ScoringStrategy;

/// Intermediate TOML structure for parsing game files.
#[derive(Debug, Deserialize)]
struct TomlGameFile {
    game: TomlGameHeader,
    #[serde(default)]
    rounds: Vec<TomlRound>,
    #[serde(default)]
    spares: Vec<TomlRound>,
}

#[derive(Debug, Deserialize)]
struct TomlGameHeader {
    id: String,
    title: String,
    kind: String,
    activity_id: String,
    #[serde(default = "default_difficulty")]
    difficulty: u8,
    #[serde(default)]
    miss_policy: Option<MissPolicy>,
    #[serde(default)]
    scoring: Option<ScoringStrategy>,
}

fn default_difficulty() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
struct TomlRound {
    prompt: String,
    /// Accepted answers for a choice round.
    #[serde(default)]
    answers: Option<Vec<String>>,
    /// Required items for a sequence round.
    #[serde(default)]
    sequence: Option<Vec<String>>,
    #[serde(default)]
    must_first: Option<String>,
    #[serde(default)]
    must_last: Option<String>,
    #[serde(default)]
    level: u32,
}

/// Parse a single TOML file into a `GameDefinition`.
pub fn parse_game(path: &Path) -> Result<GameDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read game file: {}", path.display()))?;
    parse_game_str(&content, path)
}

/// Parse a TOML string into a `GameDefinition` (useful for testing).
pub fn parse_game_str(content: &str, source_path: &Path) -> Result<GameDefinition> {
    let parsed: TomlGameFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let kind: GameKind = parsed
        .game
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}: {}", source_path.display(), e))?;

    anyhow::ensure!(
        !parsed.rounds.is_empty(),
        "{}: game '{}' has no rounds",
        source_path.display(),
        parsed.game.id
    );

    let rounds = parsed
        .rounds
        .iter()
        .enumerate()
        .map(|(i, r)| convert_round(r, i, "rounds", source_path))
        .collect::<Result<Vec<_>>>()?;

    let spares = parsed
        .spares
        .iter()
        .enumerate()
        .map(|(i, r)| convert_round(r, i, "spares", source_path))
        .collect::<Result<Vec<_>>>()?;

    Ok(GameDefinition {
        id: parsed.game.id,
        title: parsed.game.title,
        kind,
        activity_id: parsed.game.activity_id,
        difficulty: parsed.game.difficulty,
        rounds,
        spares,
        miss_policy: parsed
            .game
            .miss_policy
            .unwrap_or_else(|| kind.default_miss_policy()),
        scoring: parsed
            .game
            .scoring
            .unwrap_or_else(|| kind.default_scoring()),
    })
}

fn convert_round(round: &TomlRound, index: usize, section: &str, path: &Path) -> Result<Round> {
    let key = match (&round.answers, &round.sequence) {
        (Some(answers), None) => {
            anyhow::ensure!(
                !answers.is_empty(),
                "{}: {}[{}] has an empty answer list",
                path.display(),
                section,
                index
            );
            AnswerKey::Choice {
                accepted: answers.clone(),
            }
        }
        (None, Some(items)) => {
            anyhow::ensure!(
                !items.is_empty(),
                "{}: {}[{}] has an empty sequence",
                path.display(),
                section,
                index
            );
            for constraint in [&round.must_first, &round.must_last].into_iter().flatten() {
                anyhow::ensure!(
                    items.iter().any(|i| i.eq_ignore_ascii_case(constraint)),
                    "{}: {}[{}] constraint '{}' is not part of the sequence",
                    path.display(),
                    section,
                    index,
                    constraint
                );
            }
            AnswerKey::Sequence {
                items: items.clone(),
                must_first: round.must_first.clone(),
                must_last: round.must_last.clone(),
            }
        }
        (Some(_), Some(_)) => anyhow::bail!(
            "{}: {}[{}] declares both 'answers' and 'sequence'",
            path.display(),
            section,
            index
        ),
        (None, None) => anyhow::bail!(
            "{}: {}[{}] needs either 'answers' or 'sequence'",
            path.display(),
            section,
            index
        ),
    };

    Ok(Round {
        prompt: round.prompt.clone(),
        key,
        level: round.level,
    })
}

/// Load every `.toml` game definition in a directory, sorted by file name.
pub fn load_game_directory(dir: &Path) -> Result<Vec<GameDefinition>> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read game directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    entries.sort();

    anyhow::ensure!(
        !entries.is_empty(),
        "no .toml game files found in {}",
        dir.display()
    );

    entries.iter().map(|p| parse_game(p)).collect()
}

/// A non-fatal issue found in a parsed game definition.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Round index the warning refers to, if any.
    pub round: Option<usize>,
    pub message: String,
}

/// Check a parsed game for authoring mistakes that parse fine but play badly.
pub fn validate_game(game: &GameDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    match game.miss_policy {
        MissPolicy::Swap { .. } if game.spares.is_empty() => {
            warnings.push(ValidationWarning {
                round: None,
                message: "swap policy with no spares falls back to advancing".into(),
            });
        }
        MissPolicy::Swap { .. } => {}
        _ if !game.spares.is_empty() => {
            warnings.push(ValidationWarning {
                round: None,
                message: format!(
                    "spares are never used with the {:?} policy",
                    game.miss_policy
                ),
            });
        }
        _ => {}
    }

    if matches!(game.scoring, ScoringStrategy::LevelWeighted)
        && game.rounds.iter().all(|r| r.level == 0)
    {
        warnings.push(ValidationWarning {
            round: None,
            message: "level-weighted scoring but every round is level 0".into(),
        });
    }

    for (i, round) in game.rounds.iter().enumerate() {
        if let AnswerKey::Sequence {
            must_first,
            must_last,
            ..
        } = &round.key
        {
            if game.kind == GameKind::Routine && must_first.is_none() && must_last.is_none() {
                warnings.push(ValidationWarning {
                    round: Some(i),
                    message: "routine sequence without positional constraints".into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_GAME: &str = r#"
[game]
id = "rotina-manha"
title = "Rotina da Manhã"
kind = "routine"
activity_id = "atv-rotina-1"
difficulty = 2

[[rounds]]
prompt = "Qual animal faz miau?"
answers = ["gato"]
level = 1

[[rounds]]
prompt = "Coloque a rotina em ordem"
sequence = ["acordar", "escovar os dentes", "dormir"]
must_first = "acordar"
must_last = "dormir"
level = 2

[[spares]]
prompt = "Qual animal faz au au?"
answers = ["cachorro", "cão"]
"#;

    #[test]
    fn parses_a_valid_game() {
        let game = parse_game_str(VALID_GAME, Path::new("test.toml")).unwrap();
        assert_eq!(game.id, "rotina-manha");
        assert_eq!(game.kind, GameKind::Routine);
        assert_eq!(game.rounds.len(), 2);
        assert_eq!(game.spares.len(), 1);
        // Family defaults applied when not overridden.
        assert_eq!(game.miss_policy, MissPolicy::Retry);
        assert!(matches!(
            game.rounds[1].key,
            AnswerKey::Sequence { ref must_last, .. } if must_last.as_deref() == Some("dormir")
        ));
    }

    #[test]
    fn policy_and_scoring_overrides() {
        let content = r#"
[game]
id = "g"
title = "G"
kind = "counting"
activity_id = "a"
miss_policy = { policy = "swap", after = 3 }
scoring = { strategy = "linear-deduction", free_moves = 4 }

[[rounds]]
prompt = "2 + 2?"
answers = ["4", "quatro"]
"#;
        let game = parse_game_str(content, Path::new("test.toml")).unwrap();
        assert_eq!(game.miss_policy, MissPolicy::Swap { after: 3 });
        assert_eq!(
            game.scoring,
            ScoringStrategy::LinearDeduction {
                free_moves: 4,
                penalty_per_move: 0.1
            }
        );
    }

    #[test]
    fn rejects_game_without_rounds() {
        let content = r#"
[game]
id = "vazio"
title = "Vazio"
kind = "memory"
activity_id = "a"
"#;
        let err = parse_game_str(content, Path::new("vazio.toml")).unwrap_err();
        assert!(err.to_string().contains("no rounds"));
    }

    #[test]
    fn rejects_round_with_both_key_kinds() {
        let content = r#"
[game]
id = "g"
title = "G"
kind = "words"
activity_id = "a"

[[rounds]]
prompt = "?"
answers = ["a"]
sequence = ["a", "b"]
"#;
        let err = parse_game_str(content, Path::new("g.toml")).unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn rejects_constraint_outside_sequence() {
        let content = r#"
[game]
id = "g"
title = "G"
kind = "routine"
activity_id = "a"

[[rounds]]
prompt = "?"
sequence = ["acordar", "dormir"]
must_last = "almocar"
"#;
        let err = parse_game_str(content, Path::new("g.toml")).unwrap_err();
        assert!(err.to_string().contains("almocar"));
    }

    #[test]
    fn loads_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), VALID_GAME).unwrap();
        let second = VALID_GAME.replace("rotina-manha", "rotina-noite");
        std::fs::write(dir.path().join("a.toml"), second).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let games = load_game_directory(dir.path()).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, "rotina-noite");
        assert_eq!(games[1].id, "rotina-manha");
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_game_directory(dir.path()).is_err());
    }

    #[test]
    fn warns_about_unused_spares_and_flat_levels() {
        let mut game = parse_game_str(VALID_GAME, Path::new("test.toml")).unwrap();
        // Retry policy + spares present.
        let warnings = validate_game(&game);
        assert!(warnings.iter().any(|w| w.message.contains("spares")));

        game.spares.clear();
        game.scoring = ScoringStrategy::LevelWeighted;
        for round in &mut game.rounds {
            round.level = 0;
        }
        let warnings = validate_game(&game);
        assert!(warnings.iter().any(|w| w.message.contains("level 0")));
    }

    #[test]
    fn valid_swap_game_has_no_warnings() {
        let content = r#"
[game]
id = "g"
title = "G"
kind = "words"
activity_id = "a"

[[rounds]]
prompt = "Monte a palavra com G"
answers = ["gato"]

[[spares]]
prompt = "Monte a palavra com P"
answers = ["pato"]
"#;
        let game = parse_game_str(content, Path::new("g.toml")).unwrap();
        assert!(validate_game(&game).is_empty());
    }
}
