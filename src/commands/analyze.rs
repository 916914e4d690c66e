use anyhow::{Context, Result};
use clap::ValueEnum;

use sentiscope::config::Config;
use sentiscope::error::ErrorClassification;
use sentiscope::pipeline::Pipeline;
use sentiscope::render::render_report;

/// Output format of the `analyze` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run the pipeline once and print the result
pub async fn analyze(
    config: &Config,
    query: Option<String>,
    count: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let pipeline = Pipeline::from_config(config).context("Failed to build sentiment pipeline")?;
    let query = pipeline.collect_query(query.as_deref(), count);

    let model = match pipeline.run(&query).await {
        Ok(model) => model,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e).context(format!("Analysis of '{}' failed", query.text));
        }
    };

    match format {
        OutputFormat::Text => print!("{}", render_report(&model)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&model).context("Failed to serialize result")?
        ),
    }

    Ok(())
}
