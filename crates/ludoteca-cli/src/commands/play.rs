//! The `ludoteca play` command.
//!
//! Drives one game session over stdin/stdout and submits the progress
//! record when the session finishes.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use ludoteca_api::{load_config_from, ApiClient};
use ludoteca_core::model::SelectedContext;
use ludoteca_core::parser;
use ludoteca_core::rounds::Answer;
use ludoteca_core::session::{GameSession, SubmitOutcome};
use ludoteca_core::traits::ProgressSink;
use ludoteca_store::SettingsStore;

pub async fn execute(
    game_path: PathBuf,
    child_override: Option<String>,
    note: Option<String>,
    offline: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SettingsStore::new(&config.store_path);
    let settings = store.load()?;

    let child_id = child_override
        .or(settings.selected_child)
        .context("no child selected; run `ludoteca select --child <id>` first")?;

    let definition = parser::parse_game(&game_path)?;
    let title = definition.title.clone();
    let total_rounds = definition.rounds.len();

    let context = SelectedContext {
        child_id: Some(child_id.clone()),
        classroom_id: settings.selected_classroom,
    };
    let mut session = GameSession::new(definition, context)?;

    eprintln!("{title} — {total_rounds} rodadas (criança: {child_id})");
    eprintln!("Respostas de sequência: itens separados por vírgula. 'sair' abandona.\n");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let prompt = match session.current_round() {
            Some(round) => round.prompt.clone(),
            None => break,
        };
        println!("[{}/{}] {}", session.round_index() + 1, total_rounds, prompt);
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                eprintln!("\nSessão abandonada.");
                return Ok(());
            }
        };
        if line.trim().eq_ignore_ascii_case("sair") {
            eprintln!("Sessão abandonada.");
            return Ok(());
        }

        let answer = Answer::parse(&line);
        match session.submit_answer(&answer)? {
            SubmitOutcome::Solved => println!("Certo!\n"),
            SubmitOutcome::TryAgain => println!("Tente de novo.\n"),
            SubmitOutcome::Swapped => println!("Vamos tentar outra!\n"),
            SubmitOutcome::MovedOn => println!("Vamos para a próxima.\n"),
            SubmitOutcome::Finished => println!("Fim de jogo!\n"),
        }
    }

    let outcome = session
        .outcome()
        .context("session ended without an outcome")?
        .clone();
    println!(
        "Pontuação: {:.1} | rodadas certas: {}/{} | movimentos: {} | tempo: {}s",
        outcome.score, outcome.solved, outcome.total_rounds, outcome.moves, outcome.elapsed_secs
    );

    if offline {
        let record = session.progress_record(note)?;
        println!(
            "\nModo offline — registro não enviado:\n{}",
            serde_json::to_string_pretty(&record)?
        );
        return Ok(());
    }

    let client = ApiClient::from_config(&config);
    submit_with_retry(&mut session, &client, note, &mut lines).await
}

/// Submit the finished session, prompting the user to retry on failure.
async fn submit_with_retry(
    session: &mut GameSession,
    sink: &dyn ProgressSink,
    note: Option<String>,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<()> {
    loop {
        match session.submit_progress(sink, note.clone()).await {
            Ok(()) => {
                println!("Progresso registrado.");
                return Ok(());
            }
            Err(e) => {
                eprintln!("Falha ao registrar progresso: {e}");
                print!("Tentar novamente? [s/N] ");
                std::io::stdout().flush()?;
                let retry = match lines.next() {
                    Some(line) => line?.trim().eq_ignore_ascii_case("s"),
                    None => false,
                };
                if !retry {
                    anyhow::bail!("progresso não registrado ({e})");
                }
            }
        }
    }
}
