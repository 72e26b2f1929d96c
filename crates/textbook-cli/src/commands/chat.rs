use anyhow::Result;
use textbook_core::chat::ChatMessage;
use textbook_interaction::{ChatClient, SendOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::context::AppContext;

/// Asks one question, or runs an interactive session when `question` is empty.
pub async fn run(ctx: &AppContext, selection: Option<&str>, question: Option<&str>) -> Result<()> {
    let client = ChatClient::new(ctx.backend.clone());
    if let Some(selection) = selection {
        if !client.observe_selection(selection) {
            eprintln!("Selection too short, asking without it.");
        }
    }

    if let Some(question) = question {
        print_outcome(client.send(question).await);
        return Ok(());
    }

    if let Some(greeting) = client.transcript().last() {
        print_message(greeting);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" || line == "/exit" {
            break;
        }
        if let Some(selected) = line.strip_prefix("/select ") {
            if client.observe_selection(selected) {
                println!("(asking about the selected text)");
            }
            continue;
        }
        print_outcome(client.send(line).await);
    }
    Ok(())
}

fn print_outcome(outcome: SendOutcome) {
    match outcome {
        SendOutcome::Ignored => {}
        SendOutcome::Answered { reply } | SendOutcome::Failed { reply, .. } => {
            print_message(&reply)
        }
    }
}

fn print_message(message: &ChatMessage) {
    println!("tutor> {}", message.content);
    if let Some(label) = message.sources_label() {
        println!("       {label}");
    }
}
