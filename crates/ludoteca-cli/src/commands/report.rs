//! The `ludoteca report` command.

use std::path::PathBuf;

use anyhow::Result;

use ludoteca_api::{load_config_from, ApiClient};
use ludoteca_core::stats::summarize;
use ludoteca_core::traits::Backend;
use ludoteca_report::html::write_html_report;
use ludoteca_report::markdown::write_markdown_report;
use ludoteca_report::ReportInput;

use crate::ReportFormat;

pub async fn execute(
    child_id: String,
    format: ReportFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let client = ApiClient::from_config(&config);

    let (child, records, activities) = futures::try_join!(
        client.fetch_child(&child_id),
        client.progress_for_child(&child_id),
        client.list_activities(),
    )?;

    // The AI narrative is nice to have; a local summary still renders
    // when the endpoint is down.
    let narrative = match client.generate_report(&child_id).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(error = %e, "AI report unavailable, rendering summary only");
            None
        }
    };

    let summary = summarize(&child_id, &records, &activities);
    let input = ReportInput {
        child_name: &child.name,
        summary: &summary,
        narrative: narrative.as_deref(),
    };

    let path = output.unwrap_or_else(|| {
        let ext = match format {
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        };
        PathBuf::from(format!("relatorio-{child_id}.{ext}"))
    });

    match format {
        ReportFormat::Markdown => write_markdown_report(&input, &path)?,
        ReportFormat::Html => write_html_report(&input, &path)?,
    }

    eprintln!(
        "Relatório de {} ({} sessões) salvo em: {}",
        child.name,
        summary.sessions,
        path.display()
    );
    Ok(())
}
