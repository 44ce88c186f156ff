// Error types for the network background.
// Nothing here is fatal to the host page: errors surface as a JS `Error`
// at the wasm boundary or are logged from inside callbacks.

use std::fmt;
use wasm_bindgen::JsValue;

// Errors that can occur while setting up or drawing the effect.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    // No global `window` object.
    NoWindow,
    // The window has no `document`.
    NoDocument,
    // The document has no `<body>` to attach the canvas to.
    NoBody,
    // The 2D context is unavailable or a DOM/canvas call failed.
    Context(String),
    // A tunable is out of range.
    InvalidConfig(String),
    // The handle has already been disposed.
    Disposed,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::NoWindow => write!(f, "No global window object"),
            NetworkError::NoDocument => write!(f, "Window has no document"),
            NetworkError::NoBody => write!(f, "Document has no body"),
            NetworkError::Context(msg) => write!(f, "Canvas error: {}", msg),
            NetworkError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            NetworkError::Disposed => write!(f, "Network background has been disposed"),
        }
    }
}

impl std::error::Error for NetworkError {}

impl NetworkError {
    // Wrap a JS exception thrown by a DOM or canvas call.
    pub fn from_js(context: &str, err: JsValue) -> Self {
        let detail = err
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| String::from("unknown error"));
        NetworkError::Context(format!("{}: {}", context, detail))
    }
}

impl From<NetworkError> for JsValue {
    fn from(e: NetworkError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = NetworkError::InvalidConfig(String::from("max_distance must be >= 0"));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_distance must be >= 0"
        );
        assert_eq!(
            NetworkError::Context(String::from("2d context unavailable")).to_string(),
            "Canvas error: 2d context unavailable"
        );
    }
}
