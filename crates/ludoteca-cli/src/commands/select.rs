//! The `ludoteca select` command.

use std::path::PathBuf;

use anyhow::Result;

use ludoteca_api::load_config_from;
use ludoteca_store::SettingsStore;

pub fn execute(
    child: Option<String>,
    classroom: Option<String>,
    show: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SettingsStore::new(&config.store_path);

    if show {
        let settings = store.load()?;
        println!(
            "Criança selecionada: {}",
            settings.selected_child.as_deref().unwrap_or("(nenhuma)")
        );
        println!(
            "Turma selecionada: {}",
            settings.selected_classroom.as_deref().unwrap_or("(nenhuma)")
        );
        return Ok(());
    }

    anyhow::ensure!(
        child.is_some() || classroom.is_some(),
        "nothing to select; pass --child and/or --classroom (or --show)"
    );

    let settings = store.select(child, classroom)?;
    println!(
        "Selecionado: criança={} turma={}",
        settings.selected_child.as_deref().unwrap_or("-"),
        settings.selected_classroom.as_deref().unwrap_or("-")
    );

    Ok(())
}
