//! Request client for the chat backend: one attempt per call, JSON both
//! ways, failures logged and swallowed so the widget stays usable.

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::message::{FileKind, Message};

/// Backend endpoint. POSTs carry the operation name as a query parameter,
/// the bare GET returns the full message history.
pub const BACKEND_URL: &str = "http://localhost:7070/";

/// Operation discriminator, appended to the URL and echoed in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiMethod {
    #[serde(rename = "createTextMessage")]
    CreateTextMessage,
    #[serde(rename = "createFileMessage")]
    CreateFileMessage,
    #[serde(rename = "createGeoMessage")]
    CreateGeoMessage,
    #[serde(rename = "deleteMessages")]
    DeleteMessages,
}

impl ApiMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMethod::CreateTextMessage => "createTextMessage",
            ApiMethod::CreateFileMessage => "createFileMessage",
            ApiMethod::CreateGeoMessage => "createGeoMessage",
            ApiMethod::DeleteMessages => "deleteMessages",
        }
    }
}

/// Body of one outbound POST. Exists only for the duration of the call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub method: ApiMethod,
    pub request_method: &'static str,
}

impl RequestPayload {
    fn new(method: ApiMethod) -> Self {
        RequestPayload {
            value: None,
            file_type: None,
            latitude: None,
            longitude: None,
            kind: None,
            method,
            request_method: "POST",
        }
    }

    pub fn text(value: String) -> Self {
        RequestPayload {
            value: Some(value),
            kind: Some("text"),
            ..Self::new(ApiMethod::CreateTextMessage)
        }
    }

    /// `content` is base64-encoded file bytes, the canonical representation
    /// for uploads and recorded clips alike.
    pub fn file(content: String, kind: FileKind) -> Self {
        RequestPayload {
            value: Some(content),
            file_type: Some(kind),
            ..Self::new(ApiMethod::CreateFileMessage)
        }
    }

    pub fn geo(latitude: f64, longitude: f64) -> Self {
        RequestPayload {
            latitude: Some(latitude),
            longitude: Some(longitude),
            kind: Some("coords"),
            ..Self::new(ApiMethod::CreateGeoMessage)
        }
    }

    pub fn delete() -> Self {
        RequestPayload {
            // the backend expects the method repeated as the value
            value: Some("deleteMessages".to_string()),
            ..Self::new(ApiMethod::DeleteMessages)
        }
    }
}

/// Union of the backend's POST responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub response_message: Option<String>,
    pub response_latitude: Option<f64>,
    pub response_longitude: Option<f64>,
}

impl ApiResponse {
    /// The delete operation reports success through this exact marker.
    pub fn is_success(&self) -> bool {
        self.response_message.as_deref() == Some("success")
    }
}

/// POSTs the payload. Resolves to `None` on any failure after logging it;
/// callers treat "no result" as a soft failure, never an exception.
pub async fn post(payload: &RequestPayload) -> Option<ApiResponse> {
    let url = format!("{}?method={}", BACKEND_URL, payload.method.as_str());
    let body = match serde_json::to_string(payload) {
        Ok(body) => body,
        Err(err) => {
            log::error!("Failed to serialize {} payload: {}", payload.method.as_str(), err);
            return None;
        }
    };

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    match request_json(&url, &opts).await {
        Ok(Some(json)) => match serde_wasm_bindgen::from_value(json) {
            Ok(resp) => Some(resp),
            Err(err) => {
                log::error!("Malformed {} response: {:?}", payload.method.as_str(), err);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::error!("Request {} failed: {:?}", payload.method.as_str(), err);
            None
        }
    }
}

/// Fetches the full persisted history, oldest first. Same soft-failure
/// contract as [`post`].
pub async fn fetch_history() -> Option<Vec<Message>> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    match request_json(BACKEND_URL, &opts).await {
        Ok(Some(json)) => match serde_wasm_bindgen::from_value(json) {
            Ok(history) => Some(history),
            Err(err) => {
                log::error!("Malformed history response: {:?}", err);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::error!("History request failed: {:?}", err);
            None
        }
    }
}

/// Single fetch attempt; `Ok(None)` is the logged non-success status case.
async fn request_json(url: &str, opts: &RequestInit) -> Result<Option<JsValue>, JsValue> {
    let request = Request::new_with_str_and_init(url, opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        log::error!("Error: {} {}", resp.status(), resp.status_text());
        return Ok(None);
    }

    let json = JsFuture::from(resp.json()?).await?;
    Ok(Some(json))
}
