// src/lambda/mod.rs

//! AWS Lambda handler for the bot.
//!
//! The function is triggered by a scheduled rule. The event payload is
//! ignored; every invocation runs the whole pipeline once and returns a
//! `{statusCode, body}` object for the invoker to log or alert on.

use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::models::BotResponse;
use crate::pipeline::Bot;

/// Main Lambda handler function.
#[instrument(skip(event, bot))]
pub async fn handler(
    event: LambdaEvent<Value>,
    bot: Arc<Bot>,
) -> std::result::Result<BotResponse, LambdaError> {
    let start = std::time::Instant::now();
    info!("Handling event: {:?}", event.payload);

    let outcome = bot.run().await;
    let success = outcome.is_success();
    let response = outcome.into_response();

    if success {
        info!(
            "Lambda execution finished in {}ms: {}",
            start.elapsed().as_millis(),
            response.body
        );
    } else {
        error!("Lambda execution failed: {}", response.body);
    }

    Ok(response)
}
