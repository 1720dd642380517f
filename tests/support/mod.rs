#![allow(dead_code)]

use std::{sync::Mutex, time::Duration};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use graddy::{
    config::{ConfigState, ModelSettings},
    llm::{ChatBackend, ChatRequest},
};

/// Backend that answers every prompt with the same reply and remembers what
/// it was asked.
pub struct CannedBackend {
    reply:    Result<String, String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl CannedBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply:    Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply:    Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl ChatBackend for CannedBackend {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.requests.lock().expect("requests lock").push(request);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(anyhow!(message.clone())),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["gpt-4o".to_string(), "gpt-3.5-turbo".to_string()])
    }
}

pub fn test_config() -> ConfigState {
    ConfigState::new(
        None,
        ModelSettings::default(),
        "127.0.0.1:0".parse().expect("socket addr"),
        Duration::from_secs(2),
    )
    .expect("build config")
}

/// A description long enough that a three-word answer falls under every
/// length threshold.
pub fn long_description() -> String {
    "HTML 문서 구조와 CSS 선택자를 설명하라 ".repeat(12)
}
