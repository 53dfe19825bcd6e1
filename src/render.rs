use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// The hand-off to the rendering collaborator: a view name plus a data
/// payload of named values. This layer never formats HTML; the response body
/// carries the view name and payload as JSON for whichever renderer sits in
/// front.
#[derive(Debug)]
pub struct View {
    name: &'static str,
    status: StatusCode,
    data: Map<String, Value>,
}

impl View {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: StatusCode::OK,
            data: Map::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Adds a named value to the payload. Serialization of crate-owned types
    /// cannot fail, so a failure here is a programming error and maps to null.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.data.insert(key.to_string(), value);
        self
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let body = json!({
            "view": self.name,
            "data": Value::Object(self.data),
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_carries_name_and_payload() {
        let view = View::new("home").with("recipes", Vec::<String>::new());
        assert_eq!(view.name, "home");
        assert_eq!(view.status, StatusCode::OK);
        assert!(view.data.contains_key("recipes"));
    }

    #[test]
    fn status_override_sticks() {
        let view = View::new("errors/404").status(StatusCode::NOT_FOUND);
        assert_eq!(view.status, StatusCode::NOT_FOUND);
    }
}
