//! Command line interface over the chat service.

pub mod args;

pub use args::{Args, Commands, SessionCommands};

use crate::config::ConfigDiscovery;
use crate::env;
use crate::provider::{ModelKind, ModelReply};
use crate::service::{ChatRequest, ChatService};
use crate::store::NewSession;
use anyhow::Result;
use std::collections::HashMap;

const NO_REASONING: &str = "No explicit reasoning provided";

pub async fn run(command: Commands, service: &ChatService) -> Result<()> {
    match command {
        Commands::Ask {
            prompt,
            model,
            session,
        } => run_ask(service, prompt, model, session).await,
        Commands::Compare {
            prompt,
            no_analysis,
        } => run_compare(service, prompt, no_analysis).await,
        Commands::Sessions { command } => run_sessions(service, command).await,
        Commands::Messages { session, page } => run_messages(service, &session, page).await,
        Commands::ShowConfig => {
            match ConfigDiscovery::find_config_file() {
                Some(path) => println!("Active configuration: {}", path.display()),
                None => println!("Active configuration: built-in defaults"),
            }
            Ok(())
        }
    }
}

async fn run_ask(
    service: &ChatService,
    prompt: String,
    models: Vec<ModelKind>,
    session: Option<String>,
) -> Result<()> {
    let response = service
        .submit_chat(ChatRequest {
            session_id: session,
            prompt,
            models: models.clone(),
        })
        .await?;

    let mut printed = Vec::new();
    for model in models {
        if printed.contains(&model) {
            continue;
        }
        if let Some(reply) = response.replies.get(&model) {
            print_slot(model, reply);
        }
        printed.push(model);
    }
    Ok(())
}

async fn run_compare(service: &ChatService, prompt: String, no_analysis: bool) -> Result<()> {
    let response = service
        .submit_chat(ChatRequest {
            session_id: None,
            prompt: prompt.clone(),
            models: ModelKind::ALL.to_vec(),
        })
        .await?;

    for model in ModelKind::ALL {
        if let Some(reply) = response.replies.get(&model) {
            print_slot(model, reply);
        }
    }

    if no_analysis {
        return Ok(());
    }

    let analysis_prompt = build_analysis_prompt(&prompt, &response.replies);
    let analysis = service
        .submit_chat(ChatRequest {
            session_id: None,
            prompt: analysis_prompt,
            models: vec![ModelKind::Deepseek],
        })
        .await?;

    if let Some(reply) = analysis.replies.get(&ModelKind::Deepseek) {
        println!("\n===== comparative analysis =====");
        println!("{}", reply.content);
    }
    Ok(())
}

async fn run_sessions(service: &ChatService, command: SessionCommands) -> Result<()> {
    match command {
        SessionCommands::List => {
            let sessions = service.list_sessions().await?;
            if sessions.is_empty() {
                println!("No sessions.");
            }
            for session in sessions {
                println!(
                    "{}  {}  [{}]  {}",
                    session.id,
                    session.updated_at.format("%Y-%m-%d %H:%M:%S"),
                    session.model_type.as_str(),
                    session.title
                );
            }
        }
        SessionCommands::New { title, model } => {
            let session = service
                .create_session(NewSession {
                    id: None,
                    title,
                    model_type: model,
                })
                .await?;
            println!("Created session {} ({})", session.id, session.title);
        }
        SessionCommands::Rename { session, title } => {
            let renamed = service.rename_session(&session, &title).await?;
            println!("Renamed session {} to '{}'", renamed.id, renamed.title);
        }
        SessionCommands::Delete { session } => {
            service.delete_session(&session).await?;
            println!("Deleted session {session}");
        }
    }
    Ok(())
}

async fn run_messages(service: &ChatService, session: &str, page: usize) -> Result<()> {
    let listing = service
        .list_messages(session, page, env::store::PAGE_SIZE)
        .await?;

    for message in &listing.messages {
        println!(
            "[{}] {:?}: {}",
            message.created_at.format("%H:%M:%S"),
            message.role,
            message.content
        );
        if let Some(reasoning) = &message.reasoning {
            println!("    reasoning: {reasoning}");
        }
    }
    if listing.has_more {
        println!("(more pages available)");
    }
    Ok(())
}

fn print_slot(model: ModelKind, reply: &ModelReply) {
    println!("===== {} =====", model.as_str());
    println!("{}", reply.content);
    if let Some(reasoning) = &reply.reasoning {
        println!("\n--- reasoning ---");
        println!("{reasoning}");
    }
    println!();
}

/// Format the three responses and ask for a structured comparison, quoting
/// the responses directly.
fn build_analysis_prompt(prompt: &str, replies: &HashMap<ModelKind, ModelReply>) -> String {
    let slot = |model: ModelKind| -> (&str, &str) {
        replies
            .get(&model)
            .map(|reply| {
                (
                    reply.content.as_str(),
                    reply.reasoning.as_deref().unwrap_or(NO_REASONING),
                )
            })
            .unwrap_or(("No response", NO_REASONING))
    };
    let (deepseek_content, deepseek_reasoning) = slot(ModelKind::Deepseek);
    let (claude_content, _) = slot(ModelKind::Claude);
    let (combined_content, combined_reasoning) = slot(ModelKind::ClaudeReasoning);

    format!(
        r#"Analyze these three responses to the prompt: "{prompt}"

ORIGINAL PROMPT:
"{prompt}"

===== RESPONSE 1: DEEPSEEK R1 =====
{deepseek_content}

DEEPSEEK'S REASONING PROCESS:
{deepseek_reasoning}

===== RESPONSE 2: CLAUDE =====
{claude_content}

===== RESPONSE 3: CLAUDE WITH REASONING =====
{combined_content}

REASONING PROCESS THAT ENHANCED THIS RESPONSE:
{combined_reasoning}

Provide a structured analysis using the following format. Use ### for main sections and bullet points for details:

### 1. KEY DIFFERENCES IN APPROACH

Organization & Structure:
- How did Deepseek R1 organize its solution?
- How did Claude structure its response?
- How did the combined response structure its answer?

### 2. REASONING QUALITY

Depth & Rigor:
- Which response showed the most thorough reasoning?
- Where did the reasoning trace visibly improve the combined response?

### 3. BEST USE CASES

Best Use Cases:
- Deepseek R1: [quote content suggesting ideal applications]
- Claude: [quote content suggesting ideal applications]
- Combined: [quote content suggesting ideal applications]

For each point, use direct quotes from the responses to support your analysis. Focus on specific details and concrete examples rather than general observations."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_quotes_every_slot() {
        let mut replies = HashMap::new();
        replies.insert(ModelKind::Claude, ModelReply::new("claude says", None));
        replies.insert(
            ModelKind::Deepseek,
            ModelReply::new("deepseek says", Some("step by step".to_string())),
        );
        replies.insert(
            ModelKind::ClaudeReasoning,
            ModelReply::new("combined says", Some("step by step".to_string())),
        );

        let prompt = build_analysis_prompt("the question", &replies);
        assert!(prompt.contains("\"the question\""));
        assert!(prompt.contains("claude says"));
        assert!(prompt.contains("deepseek says"));
        assert!(prompt.contains("combined says"));
        assert!(prompt.contains("step by step"));
    }

    #[test]
    fn analysis_prompt_marks_missing_reasoning() {
        let mut replies = HashMap::new();
        replies.insert(ModelKind::Deepseek, ModelReply::new("plain", None));

        let prompt = build_analysis_prompt("q", &replies);
        assert!(prompt.contains(NO_REASONING));
        assert!(prompt.contains("No response"));
    }
}
