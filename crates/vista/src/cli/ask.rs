//! The image task commands: `analyze`, `explain`, `quiz`, `concepts`, `demo`.

use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use vista_core::Difficulty;

use super::types::{DifficultyArg, OutputFormat};
use super::{expand_path, Session};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image file to analyze
    pub image: PathBuf,

    /// Instruction or question about the image
    pub prompt: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for commands that take only an image.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image file
    pub image: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `quiz` command.
#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Image file to build the quiz from
    pub image: PathBuf,

    /// Quiz difficulty
    #[arg(short, long, value_enum, default_value = "medium")]
    pub difficulty: DifficultyArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `demo` command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Image file to run every task against
    pub image: PathBuf,

    /// Prompt for the free-form analysis step
    #[arg(long, default_value = "What can you tell me about this image?")]
    pub prompt: String,

    /// Quiz difficulty for the quiz step
    #[arg(short, long, value_enum, default_value = "easy")]
    pub difficulty: DifficultyArg,
}

/// JSON shape for `analyze --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Analysis<'a> {
    response: &'a str,
    prompt: &'a str,
    image_path: &'a Path,
}

/// Print either the answer text or the whole record.
fn emit<T: Serialize>(format: OutputFormat, text: &str, record: &T) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
    }
    Ok(())
}

/// Execute `vista analyze`.
pub async fn analyze(session: &Session, args: AnalyzeArgs) -> anyhow::Result<()> {
    let assistant = session.assistant()?;
    let image = expand_path(&args.image);

    let response = assistant.analyze_image(&image, &args.prompt).await?;
    let record = Analysis {
        response: &response,
        prompt: &args.prompt,
        image_path: &image,
    };
    emit(args.format, &response, &record)
}

/// Execute `vista explain`.
pub async fn explain(session: &Session, args: ImageArgs) -> anyhow::Result<()> {
    let assistant = session.assistant()?;
    let result = assistant.explain_diagram(expand_path(&args.image)).await?;
    emit(args.format, &result.explanation, &result)
}

/// Execute `vista quiz`.
pub async fn quiz(session: &Session, args: QuizArgs) -> anyhow::Result<()> {
    let assistant = session.assistant()?;
    let result = assistant
        .generate_quiz(expand_path(&args.image), args.difficulty.into())
        .await?;
    emit(args.format, &result.quiz_content, &result)
}

/// Execute `vista concepts`.
pub async fn concepts(session: &Session, args: ImageArgs) -> anyhow::Result<()> {
    let assistant = session.assistant()?;
    let result = assistant
        .identify_key_concepts(expand_path(&args.image))
        .await?;
    emit(args.format, &result.concepts, &result)
}

/// Execute `vista demo`: every task in sequence, one titled section each.
pub async fn demo(session: &Session, args: DemoArgs) -> anyhow::Result<()> {
    let assistant = session.assistant()?;
    let image = expand_path(&args.image);
    if !image.exists() {
        anyhow::bail!("Please add a test image at: {}", image.display());
    }
    let difficulty: Difficulty = args.difficulty.into();

    let analysis = assistant.analyze_image(&image, &args.prompt).await?;
    println!("{}", section("Basic Image Analysis", &analysis));

    let quiz = assistant.generate_quiz(&image, difficulty).await?;
    println!("{}", section("Quiz Generation", &quiz.quiz_content));

    let explanation = assistant.explain_diagram(&image).await?;
    println!("{}", section("Diagram Explanation", &explanation.explanation));

    let concepts = assistant.identify_key_concepts(&image).await?;
    println!("{}", section("Concept Identification", &concepts.concepts));

    tracing::info!("Demo finished with model {}", assistant.model_name());
    Ok(())
}

/// Render a titled block of output.
fn section(title: &str, content: &str) -> String {
    let bar = "=".repeat(20);
    format!("\n{bar} {title} {bar}\n{content}\n{}", "=".repeat(50))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_layout() {
        let out = section("Quiz Generation", "Q1");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "==================== Quiz Generation ===================="
        );
        assert_eq!(lines[2], "Q1");
        assert_eq!(lines[3], "=".repeat(50));
    }

    #[test]
    fn analysis_json_keys() {
        let record = Analysis {
            response: "A cat",
            prompt: "What is this?",
            image_path: Path::new("cat.jpg"),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["response"], "A cat");
        assert_eq!(value["imagePath"], "cat.jpg");
    }
}
