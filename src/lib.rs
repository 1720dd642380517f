//! # graddy
//!
//! Backend for the Graddy study platform: generates curricula and assignments
//! with an upstream language model, grades submissions, and keeps a local
//! relevance heuristic for when the model's score cannot be trusted or
//! parsed.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Environment-driven runtime configuration
pub mod config;
/// Submission grading pipeline
pub mod feedback;
/// Curriculum and assignment generation
pub mod generation;
/// Upstream language model client
pub mod llm;
/// Prompt templates
pub mod prompts;
/// Local relevance heuristic
pub mod relevance;
/// HTTP routes
pub mod server;
/// Request and response bodies
pub mod types;
