// src/core/http.rs
// Shared blocking HTTP agent. One request outstanding at a time; the only
// timeout in the system is the per-request transport timeout set here.

use std::time::Duration;

use serde_json::Value;
use ureq::{Agent, AgentBuilder};

use crate::config::consts::{TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

pub fn agent() -> Agent {
    AgentBuilder::new()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
}

pub fn get_string(agent: &Agent, url: &str) -> Result<String, FetchError> {
    let resp = agent.get(url).call()?;
    Ok(resp.into_string()?)
}

pub fn get_json(agent: &Agent, url: &str) -> Result<Value, FetchError> {
    let resp = agent.get(url).call()?;
    Ok(resp.into_json()?)
}

/// POST a form-encoded body and return the raw response text.
pub fn post_form(agent: &Agent, url: &str, body: &str) -> Result<String, FetchError> {
    let resp = agent
        .post(url)
        .set("Content-Type", "application/x-www-form-urlencoded;charset=UTF-8")
        .send_string(body)?;
    Ok(resp.into_string()?)
}
