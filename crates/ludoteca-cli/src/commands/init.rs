//! The `ludoteca init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create ludoteca.toml
    if std::path::Path::new("ludoteca.toml").exists() {
        println!("ludoteca.toml already exists, skipping.");
    } else {
        std::fs::write("ludoteca.toml", SAMPLE_CONFIG)?;
        println!("Created ludoteca.toml");
    }

    // Create example game
    std::fs::create_dir_all("games")?;
    let example_path = std::path::Path::new("games/exemplo.toml");
    if example_path.exists() {
        println!("games/exemplo.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_GAME)?;
        println!("Created games/exemplo.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit ludoteca.toml with your backend URL and token");
    println!("  2. Run: ludoteca validate games/exemplo.toml");
    println!("  3. Run: ludoteca select --child <id>");
    println!("  4. Run: ludoteca play games/exemplo.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# ludoteca configuration

base_url = "http://localhost:3000"
api_token = "${LUDOTECA_API_TOKEN}"
timeout_secs = 30
games_dir = "./games"
store_path = "./ludoteca-settings.json"
"#;

const EXAMPLE_GAME: &str = r#"[game]
id = "rotina-manha"
title = "Rotina da Manhã"
kind = "routine"
activity_id = "atv-rotina-1"
difficulty = 1

[[rounds]]
prompt = "Qual animal faz miau?"
answers = ["gato"]
level = 1

[[rounds]]
prompt = "Coloque a rotina da manhã em ordem (separe por vírgula)"
sequence = ["acordar", "escovar os dentes", "tomar café"]
must_first = "acordar"
level = 2

[[rounds]]
prompt = "Quantos dedos temos em uma mão?"
answers = ["5", "cinco"]
level = 1
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn example_game_parses_cleanly() {
        let game =
            ludoteca_core::parser::parse_game_str(EXAMPLE_GAME, Path::new("exemplo.toml"))
                .unwrap();
        assert_eq!(game.rounds.len(), 3);
        assert!(ludoteca_core::parser::validate_game(&game).is_empty());
    }
}
