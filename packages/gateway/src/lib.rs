// ABOUTME: Drafter gateway library - wrapper around the hosted completion API
// ABOUTME: Provides the completion client and prompt templates for PRD work

pub mod client;
pub mod prompts;

pub use client::{
    ChatRole, ChatTurn, CompletionClient, GatewayError, GatewayResult, Sampling,
};
