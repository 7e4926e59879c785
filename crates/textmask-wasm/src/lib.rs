use serde::Serialize;
use serde_json::Value as JsonValue;
use textmask::{MaskConfig, MaskSpec, Masker};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOutput {
    pub value: String,
    pub consumed: usize,
}

/// Formats with a placeholder pattern and the built-in placeholders.
pub fn format_pattern(raw: &str, pattern: &str) -> String {
    textmask::format_input(raw, &MaskSpec::pattern(pattern))
}

/// Formats with a mask given as JSON: a pattern string, or an array of literal
/// strings and `{"pattern": "<regex>"}` objects.
pub fn format_json(raw: &str, mask_json: &str) -> Result<String, String> {
    let spec = MaskSpec::from_json_str(mask_json).map_err(|err| err.to_string())?;
    Ok(textmask::format_input(raw, &spec))
}

/// Formats with an already parsed mask value, the shape `formatInput` receives
/// from JavaScript.
pub fn format_value(raw: &str, mask: &JsonValue) -> Result<String, String> {
    let spec = MaskSpec::from_json(mask).map_err(|err| err.to_string())?;
    Ok(textmask::format_input(raw, &spec))
}

/// Masking context configured from a JSON config document.
#[derive(Debug, Default)]
pub struct MaskerHandle {
    inner: Masker,
}

impl MaskerHandle {
    pub fn from_config_json(config_json: &str) -> Result<Self, String> {
        let config = MaskConfig::from_json_str(config_json).map_err(|err| err.to_string())?;
        let inner = Masker::from_config(&config).map_err(|err| err.to_string())?;
        Ok(Self { inner })
    }

    pub fn format(&self, raw: &str, mask_json: &str) -> Result<String, String> {
        let spec = MaskSpec::from_json_str(mask_json).map_err(|err| err.to_string())?;
        Ok(self.inner.format(raw, &spec))
    }

    pub fn format_named(&self, raw: &str, name: &str) -> Result<String, String> {
        let spec = self.inner.named_mask(name).map_err(|err| err.to_string())?;
        Ok(self.inner.format(raw, spec))
    }

    /// Like `format`, returning `{"value": ..., "consumed": ...}` as JSON.
    pub fn conform_json(&self, raw: &str, mask_json: &str) -> Result<String, String> {
        let spec = MaskSpec::from_json_str(mask_json).map_err(|err| err.to_string())?;
        let conformed = self.inner.conform(raw, &spec);
        let output = FormatOutput {
            value: conformed.value,
            consumed: conformed.consumed,
        };
        serde_json::to_string(&output).map_err(|err| err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
mod bindings {
    use super::MaskerHandle;
    use serde_json::Value as JsonValue;
    use wasm_bindgen::prelude::*;

    /// `mask` is a pattern string or an array of literal strings and
    /// `{pattern}` objects.
    #[wasm_bindgen(js_name = formatInput)]
    pub fn format_input(raw: &str, mask: &JsValue) -> Result<String, JsError> {
        let mask = mask_value(mask)?;
        super::format_value(raw, &mask).map_err(|err| JsError::new(err.as_str()))
    }

    fn mask_value(mask: &JsValue) -> Result<JsonValue, JsError> {
        if let Some(pattern) = mask.as_string() {
            return Ok(JsonValue::String(pattern));
        }
        if !js_sys::Array::is_array(mask) {
            return Err(JsError::new("mask must be a string or an array"));
        }
        let json = js_sys::JSON::stringify(mask)
            .map_err(|_| JsError::new("mask array cannot be serialized"))?;
        serde_json::from_str(String::from(json).as_str())
            .map_err(|err| JsError::new(err.to_string().as_str()))
    }

    #[wasm_bindgen(js_name = formatInputJson)]
    pub fn format_input_json(raw: &str, mask_json: &str) -> Result<String, JsError> {
        super::format_json(raw, mask_json).map_err(|err| JsError::new(err.as_str()))
    }

    #[wasm_bindgen(js_name = Masker)]
    pub struct JsMasker {
        handle: MaskerHandle,
    }

    #[wasm_bindgen(js_class = Masker)]
    impl JsMasker {
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> Result<JsMasker, JsError> {
            let handle = match config_json {
                Some(json) => MaskerHandle::from_config_json(json.as_str())
                    .map_err(|err| JsError::new(err.as_str()))?,
                None => MaskerHandle::default(),
            };
            log::debug!("wasm masker created");
            Ok(JsMasker { handle })
        }

        pub fn format(&self, raw: &str, mask_json: &str) -> Result<String, JsError> {
            self.handle
                .format(raw, mask_json)
                .map_err(|err| JsError::new(err.as_str()))
        }

        #[wasm_bindgen(js_name = formatNamed)]
        pub fn format_named(&self, raw: &str, name: &str) -> Result<String, JsError> {
            self.handle
                .format_named(raw, name)
                .map_err(|err| JsError::new(err.as_str()))
        }

        #[wasm_bindgen(js_name = conform)]
        pub fn conform(&self, raw: &str, mask_json: &str) -> Result<String, JsError> {
            self.handle
                .conform_json(raw, mask_json)
                .map_err(|err| JsError::new(err.as_str()))
        }
    }
}
