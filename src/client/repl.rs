//! Interactive chat loop.

use std::io::Write;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::api::RelayClient;
use super::conversation::Conversation;
use super::picker::render_picker;
use super::render::MarkdownRenderer;
use crate::catalog::{self, ModelDescriptor};

pub struct ChatOpts {
    pub api_url: String,
    /// Initial model selection; falls back to the catalog default.
    pub model: Option<String>,
}

/// Run the chat REPL until `/quit` or EOF.
///
/// One send is in flight at a time: the loop awaits the relay call before
/// reading the next line, and the conversation log enforces the same gate.
pub async fn run_chat(opts: ChatOpts) -> Result<()> {
    let client = RelayClient::new(opts.api_url);

    // Fetched once at startup; a failure leaves the picker empty but chat
    // still works with the default model.
    let models = match client.list_models().await {
        Ok(models) => models,
        Err(e) => {
            warn!(error = %e, "failed to fetch model catalog");
            Vec::new()
        }
    };

    let initial = opts
        .model
        .unwrap_or_else(|| catalog::DEFAULT_MODEL.to_string());
    let mut conversation = Conversation::new(initial);
    let renderer = MarkdownRenderer::new();

    println!("{}", style("nimchat").bold());
    println!("Start a conversation. Type /help for commands.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("you>").cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if handle_command(command, &mut conversation, &models) {
                break;
            }
            continue;
        }

        let Some(outbound) = conversation.submit(input) else {
            continue;
        };

        println!("{}", style("...").dim());

        match client
            .send_chat(&outbound.message, &outbound.history, &outbound.model)
            .await
        {
            Ok(reply) => {
                let stamp = chrono::Local::now().format("%H:%M");
                println!(
                    "{} {}",
                    style(model_name(&models, &outbound.model)).dim(),
                    style(stamp).dim()
                );
                print!("{}", renderer.render(&reply));
                conversation.complete(outbound, reply);
            }
            Err(e) => {
                let detail = e.to_string();
                conversation.fail(outbound, &detail);
                if let Some(turn) = conversation.turns().last()
                    && let Some(text) = turn.text()
                {
                    println!("{}", style(text).red());
                }
            }
        }
        println!();
    }

    Ok(())
}

/// Fetch and print the grouped catalog, without entering the REPL.
pub async fn show_models(api_url: String) -> Result<()> {
    let client = RelayClient::new(api_url);
    let models = client.list_models().await?;
    print!("{}", render_picker(&models, catalog::DEFAULT_MODEL));
    Ok(())
}

/// Handle a slash command. Returns true when the loop should exit.
fn handle_command(
    command: &str,
    conversation: &mut Conversation,
    models: &[ModelDescriptor],
) -> bool {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("quit") | Some("q") | Some("exit") => return true,
        Some("models") => {
            print!("{}", render_picker(models, conversation.selected_model()));
        }
        Some("model") => match parts.next() {
            Some(id) => {
                if !models.is_empty() && !models.iter().any(|m| m.id == id) {
                    println!("Unknown model '{id}'. See /models.");
                } else if conversation.select_model(id) {
                    println!("Model set to {id}.");
                }
            }
            None => println!("Current model: {}", conversation.selected_model()),
        },
        _ => {
            println!("Commands:");
            println!("  /models       list models grouped by category");
            println!("  /model <id>   select a model (current: shown by /model)");
            println!("  /quit         exit");
        }
    }
    false
}

fn model_name<'a>(models: &'a [ModelDescriptor], id: &str) -> &'a str {
    models
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.as_str())
        .unwrap_or("AI Model")
}
