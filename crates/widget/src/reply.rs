use serde_json::Value;
use snafu::{ResultExt, ensure};

use crate::error::{MalformedReplySnafu, NullReplySnafu, WidgetResult};
use crate::message::ReplyOutcome;

const RESPONSE_FIELD: &str = "response";
const ERROR_FIELD: &str = "error";

/// Decodes one complete reply body into the entry it should render.
///
/// `response` wins over `error`. A field only counts when its value is truthy,
/// so `""`, `0`, `false` and `null` fall through to the next check.
pub fn decode_reply(body: &str) -> WidgetResult<ReplyOutcome> {
    let value: Value = serde_json::from_str(body).context(MalformedReplySnafu {
        stage: "decode-reply-json",
    })?;

    ensure!(
        !value.is_null(),
        NullReplySnafu {
            stage: "decode-reply-fields",
        }
    );

    if let Some(text) = truthy_field(&value, RESPONSE_FIELD) {
        return Ok(ReplyOutcome::Response(text));
    }

    if let Some(detail) = truthy_field(&value, ERROR_FIELD) {
        return Ok(ReplyOutcome::error(detail));
    }

    tracing::debug!("chat reply carried neither `response` nor `error`");
    Ok(ReplyOutcome::Empty)
}

fn truthy_field(value: &Value, field: &str) -> Option<String> {
    let field_value = value.as_object()?.get(field)?;
    is_truthy(field_value).then(|| render_value(field_value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a field value the way a page stringifies it for `textContent`.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.as_f64().map(render_number).unwrap_or_default(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip digits, switching to exponent form outside
/// `[1e-6, 1e21)`.
fn render_number(number: f64) -> String {
    if number == 0.0 {
        return "0".to_string();
    }
    let magnitude = number.abs();
    if magnitude >= 1e21 {
        format!("{number:e}").replacen('e', "e+", 1)
    } else if magnitude < 1e-6 {
        format!("{number:e}")
    } else {
        number.to_string()
    }
}
