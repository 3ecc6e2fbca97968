use anyhow::Result;
use monochrome_core::ProcessResponse;
use serde_json::{json, Value};

/// Render a response for the terminal.
///
/// `raw` prints exactly what the Lambda runtime would receive; otherwise the
/// JSON body string is expanded into a nested object.
pub fn render_response(response: &ProcessResponse, raw: bool) -> Result<String> {
    if raw {
        return Ok(serde_json::to_string(response)?);
    }

    let body: Value = serde_json::from_str(&response.body)?;
    let rendered = json!({
        "statusCode": response.status_code,
        "body": body,
    });
    Ok(serde_json::to_string_pretty(&rendered)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use monochrome_core::ProcessedBody;

    fn response() -> ProcessResponse {
        ProcessResponse::ok(&ProcessedBody::new("uploads", "processed", "my photo.jpg")).unwrap()
    }

    #[test]
    fn render_raw_keeps_body_string() {
        let out = render_response(&response(), true).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert!(value["body"].is_string());
    }

    #[test]
    fn render_pretty_expands_body() {
        let out = render_response(&response(), false).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["body"]["key"], "my photo.jpg");
        assert_eq!(value["body"]["output_bucket"], "processed");
    }
}
