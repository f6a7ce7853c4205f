//! Command line argument parsing
//!
//! Subcommands:
//! - `ask`: send one prompt to one or more models
//! - `compare`: run all three models side by side, with a follow-up
//!   comparative analysis
//! - `sessions`: manage chat sessions
//! - `messages`: show one page of a session's conversation
//! - `show-config`: show configuration discovery information

use crate::provider::{ModelKind, UnknownModel};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blendchat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-provider chat front end blending Claude and DeepSeek R1")]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a prompt to one or more models
    Ask {
        /// The prompt text
        prompt: String,
        /// Model to query: claude, deepseek, or claude_reasoning
        /// (repeatable)
        #[arg(short, long, value_parser = parse_model, default_value = "claude")]
        model: Vec<ModelKind>,
        /// Existing session id to continue; omitted means a throwaway
        /// session
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Run all three models on the same prompt and analyze the differences
    Compare {
        /// The prompt text
        prompt: String,
        /// Skip the follow-up comparative analysis
        #[arg(long)]
        no_analysis: bool,
    },
    /// Manage chat sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Show one page of a session's messages, oldest first
    Messages {
        /// Session id
        session: String,
        /// Zero-based page number (page 0 is the most recent page)
        #[arg(short, long, default_value_t = 0)]
        page: usize,
    },
    /// Show configuration discovery information
    ShowConfig,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// List sessions, most recently updated first
    List,
    /// Create a session
    New {
        /// Session title
        #[arg(short, long)]
        title: Option<String>,
        /// Default model for the session
        #[arg(short, long, value_parser = parse_model)]
        model: Option<ModelKind>,
    },
    /// Rename a session
    Rename {
        /// Session id
        session: String,
        /// New title
        title: String,
    },
    /// Delete a session and all of its messages
    Delete {
        /// Session id
        session: String,
    },
}

fn parse_model(raw: &str) -> Result<ModelKind, UnknownModel> {
    raw.parse()
}
