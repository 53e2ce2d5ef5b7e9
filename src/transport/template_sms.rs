use serde::{Deserialize, Serialize};

use crate::domain::{AppId, StatusCode, TemplateId, TemplateSms, TemplateSmsResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("statusMsg must be a string, got {found}")]
    StatusMsgType { found: serde_json::Value },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSmsJsonRequest<'a> {
    app_id: &'a str,
    template_id: &'a str,
    to: &'a str,
    datas: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSmsJsonResponse {
    #[serde(default)]
    status_code: Option<serde_json::Value>,
    #[serde(default)]
    status_msg: Option<serde_json::Value>,
}

/// JSON body for `SMS/TemplateSMS`.
///
/// Every field is a string or a list of strings, so serialization cannot fail.
pub fn encode_template_sms_json(
    app_id: &AppId,
    template_id: &TemplateId,
    request: &TemplateSms,
) -> String {
    let body = TemplateSmsJsonRequest {
        app_id: app_id.as_str(),
        template_id: template_id.as_str(),
        to: &request.to,
        datas: &request.datas,
    };
    serde_json::to_string(&body).unwrap_or_default()
}

/// Decode a Cloopen reply.
///
/// The body must be a JSON object; every field but `statusCode` and `statusMsg` is
/// ignored. Only the string `"000000"` counts as success. A non-string code is kept in
/// its JSON rendering and treated as a rejection. `statusMsg` is read only for
/// rejections, where it must be a string or null.
pub fn decode_template_sms_json_response(json: &str) -> Result<TemplateSmsResponse, TransportError> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let parsed: TemplateSmsJsonResponse =
        serde_json::from_value(serde_json::Value::Object(object))?;

    let status_code = match parsed.status_code {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(code)) => Some(StatusCode::new(code)),
        Some(other) => Some(StatusCode::new(other.to_string())),
    };
    let mut response = TemplateSmsResponse {
        status_code,
        status_msg: None,
    };
    if response.is_success() {
        return Ok(response);
    }

    response.status_msg = match parsed.status_msg {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(msg)) => Some(msg),
        Some(found) => return Err(TransportError::StatusMsgType { found }),
    };
    Ok(response)
}
