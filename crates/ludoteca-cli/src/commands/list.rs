//! The `ludoteca list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use ludoteca_api::{load_config_from, ApiClient};
use ludoteca_core::traits::Backend;

use crate::ListTarget;

pub async fn execute(what: ListTarget, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let client = ApiClient::from_config(&config);

    let mut table = Table::new();

    match what {
        ListTarget::Children => {
            let children = client.list_children().await?;
            table.set_header(vec!["Id", "Nome", "Idade", "Turma"]);
            for child in &children {
                table.add_row(vec![
                    Cell::new(&child.id),
                    Cell::new(&child.name),
                    Cell::new(child.age),
                    Cell::new(child.classroom_id.as_deref().unwrap_or("-")),
                ]);
            }
        }
        ListTarget::Classrooms => {
            let classrooms = client.list_classrooms().await?;
            table.set_header(vec!["Id", "Nome"]);
            for classroom in &classrooms {
                table.add_row(vec![Cell::new(&classroom.id), Cell::new(&classroom.name)]);
            }
        }
        ListTarget::Activities => {
            let activities = client.list_activities().await?;
            table.set_header(vec!["Id", "Título", "Categoria", "Dificuldade"]);
            for activity in &activities {
                table.add_row(vec![
                    Cell::new(&activity.id),
                    Cell::new(&activity.title),
                    Cell::new(&activity.category),
                    Cell::new(activity.difficulty),
                ]);
            }
        }
    }

    println!("{table}");
    Ok(())
}
