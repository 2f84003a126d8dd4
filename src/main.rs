//! rat - interactive driver for the reasoning/response chain.

use std::io::Write;

use clap::{Parser, ValueEnum};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use rat_chain::{ChainConfig, ClaudeChain, ModelChain, OpenRouterChain, ResponseBackend};

#[derive(Debug, Parser)]
#[command(
    name = "rat",
    version,
    about = "Retrieval-augmented thinking: a reasoning model feeding a response model"
)]
struct Cli {
    /// Response backend to drive
    #[arg(long, value_enum, default_value_t = Mode::Openrouter)]
    mode: Mode,

    /// Initial response model (any identifier; bad ones surface as API errors)
    #[arg(long)]
    model: Option<String>,

    /// Start with reasoning display turned off
    #[arg(long)]
    hide_reasoning: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Openrouter,
    Claude,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = ChainConfig::from_env();
    if let Some(model) = cli.model {
        config.default_model = Some(model);
    }

    match cli.mode {
        Mode::Openrouter => {
            let mut chain = OpenRouterChain::from_config(&config)?;
            chain.show_reasoning = !cli.hide_reasoning;
            repl(&mut chain).await
        }
        Mode::Claude => {
            let mut chain = ClaudeChain::from_config(&config)?;
            chain.show_reasoning = !cli.hide_reasoning;
            repl(&mut chain).await
        }
    }
}

async fn repl<B: ResponseBackend>(chain: &mut ModelChain<B>) -> anyhow::Result<()> {
    println!("rat-chain — model: {}", chain.get_model_display_name());
    println!("Commands: \"model <id>\", \"reasoning\", \"clear\", \"quit\"");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input == "quit" {
            break;
        }
        if input == "clear" {
            chain.clear_reasoning_history();
            chain.clear_response_history();
            println!("History cleared");
            continue;
        }
        if input == "reasoning" {
            chain.show_reasoning = !chain.show_reasoning;
            println!(
                "Reasoning display {}",
                if chain.show_reasoning { "on" } else { "off" }
            );
            continue;
        }
        if let Some(model) = input.strip_prefix("model ") {
            chain.set_model(model.trim());
            println!("Model set to {}", chain.get_model_display_name());
            continue;
        }

        match chain.run(input).await {
            Ok(outcome) => {
                if chain.show_reasoning {
                    println!("--- reasoning ---");
                    println!("{}", outcome.reasoning.trim_end());
                    println!("--- response ---");
                }
                println!("{}", outcome.response);
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }

    Ok(())
}
