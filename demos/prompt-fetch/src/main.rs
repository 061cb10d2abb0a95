//! Prompt fetch demo
//!
//! Fetches one prompt with credentials from `LANGFUSE_*` environment variables.
//!
//! ```text
//! prompt-fetch-demo <name> [--version N] [--label L] [--var key=value]...
//! ```

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use langfuse::prelude::*;
use tracing_subscriber::EnvFilter;

/// Fetch one prompt and print it with its variables filled in.
#[derive(Debug, Parser)]
#[command(name = "prompt-fetch-demo")]
struct Args {
    /// Prompt name.
    name: String,

    /// Pin a version.
    #[arg(long)]
    version: Option<u32>,

    /// Pin a label, e.g. `production`.
    #[arg(long)]
    label: Option<String>,

    /// Template variable, repeatable.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    variables: Vec<(String, String)>,
}

fn parse_var(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    Ok((key.to_string(), value.to_string()))
}

fn render(content: &PromptContent) {
    match content {
        PromptContent::Text(text) => println!("{text}"),
        PromptContent::Chat(messages) => {
            for ChatMessage { role, content } in messages {
                println!("[{role}] {content}");
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let variables: HashMap<String, String> = args.variables.into_iter().collect();

    let transport = HyperTransport::builder()
        .timeout(Duration::from_secs(10))
        .with_retry(2)
        .with_logging()
        .build();

    let client = match LangfuseConfig::from_env().and_then(|config| LangfuseClient::new(config, transport)) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(2);
        }
    };

    // Ctrl-C aborts the in-flight request.
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let result = client
        .get_prompt_with_cancel(&args.name, args.version, args.label.as_deref(), &cancel)
        .await;

    match result {
        Ok(prompt) => {
            println!(
                "{} v{} ({:?}) labels={:?}",
                prompt.name, prompt.version, prompt.kind, prompt.labels
            );
            render(&prompt.compile(&variables));
        }
        Err(Error::Http { status, body, .. }) => {
            eprintln!("service answered {status}: {}", String::from_utf8_lossy(&body));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("request failed: {err}");
            std::process::exit(1);
        }
    }
}
