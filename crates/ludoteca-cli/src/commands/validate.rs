//! The `ludoteca validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(game_path: PathBuf) -> Result<()> {
    let games = if game_path.is_dir() {
        ludoteca_core::parser::load_game_directory(&game_path)?
    } else {
        vec![ludoteca_core::parser::parse_game(&game_path)?]
    };

    let mut total_warnings = 0;

    for game in &games {
        println!(
            "Game: {} ({}, {} rounds, {} spares)",
            game.title,
            game.kind,
            game.rounds.len(),
            game.spares.len()
        );

        let warnings = ludoteca_core::parser::validate_game(game);
        for w in &warnings {
            let prefix = w
                .round
                .map(|i| format!("  [round {i}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All game definitions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
