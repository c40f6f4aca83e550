//! The `vista models` command: list models visible to the API key.

use clap::Args;
use vista_core::ModelInfo;

use super::types::OutputFormat;
use super::Session;

/// Arguments for the `models` command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Include models that cannot serve image prompts (e.g., embedding models)
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute the models command.
pub async fn execute(session: &Session, args: ModelsArgs) -> anyhow::Result<()> {
    let client = session.client()?;
    let models = filter_models(client.list_models().await?, args.all);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&models)?),
        OutputFormat::Text => {
            println!("Available models:");
            for model in &models {
                println!("{}", describe(model));
            }
        }
    }

    if models.is_empty() {
        tracing::warn!("No models available for this API key");
    }
    Ok(())
}

fn filter_models(models: Vec<ModelInfo>, all: bool) -> Vec<ModelInfo> {
    if all {
        models
    } else {
        models
            .into_iter()
            .filter(ModelInfo::supports_generate_content)
            .collect()
    }
}

fn describe(model: &ModelInfo) -> String {
    let name = match &model.display_name {
        Some(display) => format!("{} ({display})", model.name),
        None => model.name.clone(),
    };
    format!(
        "- {name}\n  Supported generation methods: {}\n",
        model.supported_generation_methods.join(", ")
    )
}
