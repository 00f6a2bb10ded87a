//! AWS Lambda handler for duration calculations
//!
//! Accepts a calculation request as JSON and returns the full result, so the
//! web front end can call the same engine as the CLI.
//!
//! Supports direct invocation and Lambda Function URLs (request in `body`).
//! Set RULES_PATH to load the rule table from a CSV directory instead of the
//! built-in table.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use teilzeit_rechner::validation::validate_input;
use teilzeit_rechner::{CalculationInput, ScenarioRunner};

/// Pull the calculation request out of the event payload
fn extract_request(payload: Value) -> Result<CalculationInput, String> {
    let body = match payload.get("body") {
        Some(Value::String(text)) => {
            if payload.get("isBase64Encoded") == Some(&Value::Bool(true)) {
                return Err("base64-encoded bodies are not supported".to_string());
            }
            let parsed: Value = serde_json::from_str(text).map_err(|e| format!("invalid JSON body: {}", e))?;
            Some(parsed)
        }
        Some(Value::Null) | None => None,
        Some(other) => Some(other.clone()),
    };

    serde_json::from_value(body.unwrap_or(payload)).map_err(|e| format!("invalid calculation request: {}", e))
}

fn error_response(status: u16, message: &str) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
        },
        "body": json!({ "error": message }).to_string(),
    })
}

fn json_response(body: &Value) -> Value {
    json!({
        "statusCode": 200,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body.to_string(),
    })
}

/// Lambda handler function
async fn handler(runner: &ScenarioRunner, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = Instant::now();
    let (payload, _context) = event.into_parts();

    let input = match extract_request(payload) {
        Ok(input) => input,
        Err(message) => {
            log::warn!("Rejected request: {}", message);
            return Ok(error_response(400, &message));
        }
    };

    if let Err(err) = validate_input(&input, runner.rules()) {
        log::warn!("Rejected input: {}", err);
        return Ok(error_response(400, &err.to_string()));
    }

    let result = runner.run(&input);
    let mut body = serde_json::to_value(&result)?;
    if let Value::Object(map) = &mut body {
        map.insert("chartPoints".to_string(), serde_json::to_value(result.chart_points())?);
        map.insert("executionTimeMs".to_string(), json!(start.elapsed().as_millis() as u64));
    }

    log::info!(
        "Calculated {} months -> {} months in {:?}",
        result.original_duration,
        result.final_total_duration,
        start.elapsed()
    );

    Ok(json_response(&body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = match env::var("RULES_PATH") {
        Ok(path) => ScenarioRunner::from_csv_path(Path::new(&path))?,
        Err(_) => ScenarioRunner::new(),
    };
    let runner = Arc::new(runner);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let runner = Arc::clone(&runner);
        async move { handler(&runner, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_direct_request() {
        let payload = json!({
            "originalDuration": 36,
            "fullTimeHours": 40,
            "partTimeHours": 20,
            "selections": { "age-select": "12" }
        });
        let input = extract_request(payload).unwrap();

        assert_eq!(input.original_duration, 36);
        assert_eq!(input.selections["age-select"].months(), 12);
    }

    #[test]
    fn test_extract_function_url_request() {
        let payload = json!({
            "rawPath": "/",
            "body": r#"{"originalDuration":24,"fullTimeHours":39}"#,
            "isBase64Encoded": false
        });
        let input = extract_request(payload).unwrap();

        assert_eq!(input.original_duration, 24);
        assert_eq!(input.part_time_hours, 0.0);
    }

    #[test]
    fn test_extract_rejects_bad_body() {
        let payload = json!({ "body": "not json" });
        assert!(extract_request(payload).unwrap_err().starts_with("invalid JSON body"));

        let payload = json!({ "fullTimeHours": 40 });
        assert!(extract_request(payload).is_err());
    }

    #[test]
    fn test_error_response_shape() {
        let response = error_response(400, "bad");
        assert_eq!(response["statusCode"], 400);
        assert_eq!(response["body"], r#"{"error":"bad"}"#);
    }
}
