mod runtime;

use clap::{Parser, Subcommand};
use edu_api_generate::{GenerateConfig, GenerationEnv, Pipeline};
use edu_lesson_types::{ResourceType, SlotRecord};
use tracing_subscriber::prelude::*;

use crate::runtime::{InputMode, spawn_reader};

#[derive(Parser)]
#[command(
    name = "lesson-cli",
    about = "Turn a spoken request into a classroom resource"
)]
struct Cli {
    /// How stdin is interpreted.
    #[arg(long, value_enum, default_value = "lines", global = true)]
    input: InputMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the detected resource type and slots as JSON.
    Analyze,
    /// Generate a resource from the transcript.
    Generate {
        /// Print the assembled prompts instead of calling the model.
        #[arg(long)]
        dry_run: bool,

        /// Use this resource type instead of classifying the transcript.
        #[arg(long)]
        resource_type: Option<ResourceType>,

        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        #[arg(long, env = "OPENAI_BASE_URL", default_value = edu_llm_client::OPENAI_BASE_URL)]
        base_url: String,

        #[arg(long, env = "OPENAI_MODEL")]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let source = spawn_reader(tokio::io::BufReader::new(tokio::io::stdin()), cli.input);
    let intent = Pipeline::listen(source).await;

    match cli.command {
        Command::Analyze => print_json(&intent),
        Command::Generate {
            dry_run,
            resource_type,
            api_key,
            base_url,
            model,
        } => {
            let request =
                match Pipeline::request_from_intent(&intent, &SlotRecord::default(), resource_type)
                {
                    Ok(request) => request,
                    Err(e) => fail(e),
                };

            if dry_run {
                let validated = request.validate().unwrap_or_else(|e| fail(e));
                let prompt = edu_template_lesson::assemble_prompt(
                    &validated.slots,
                    validated.resource_type,
                    validated.slots.format,
                )
                .unwrap_or_else(|e| fail(e));
                println!("# system\n\n{}\n\n# user\n\n{}", prompt.system, prompt.user);
                return;
            }

            let env = GenerationEnv {
                openai_api_key: api_key,
                openai_base_url: base_url,
                ..Default::default()
            };
            let mut config = GenerateConfig::new(&env);
            if let Some(model) = model {
                config = config.with_model(model);
            }

            let pipeline = Pipeline::new(config.client());
            match pipeline.generate(&request).await {
                Ok(resource) => print_json(&resource),
                Err(e) => fail(e),
            }
        }
    }
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}
