use wasm_bindgen::prelude::*;
use ucheckin_core::{RenderSettings, SignalEncoder, SignalMode, SignalParameters};
use ucheckin_core::{DEFAULT_BANDWIDTH, DEFAULT_SYMBOL_SAMPLES};

#[wasm_bindgen]
pub struct WasmSignalEncoder {
    inner: SignalEncoder,
}

#[wasm_bindgen]
impl WasmSignalEncoder {
    #[wasm_bindgen(constructor)]
    pub fn new(center_frequency: f64, sample_rate: u32) -> Result<WasmSignalEncoder, JsValue> {
        SignalParameters::new(
            center_frequency,
            DEFAULT_BANDWIDTH,
            DEFAULT_SYMBOL_SAMPLES,
            sample_rate,
            SignalMode::UCheckIn,
        )
        .and_then(SignalEncoder::new)
        .map(|encoder| WasmSignalEncoder { inner: encoder })
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render a check-in code to 16-bit PCM
    /// Returns an Int16Array at the encoder's sample rate
    #[wasm_bindgen]
    pub fn render(
        &self,
        message: &str,
        interval_ms: u32,
        repeat: usize,
        volume: f64,
    ) -> Result<Vec<i16>, JsValue> {
        let settings = RenderSettings {
            interval_ms,
            repeat,
            volume,
        };
        self.inner
            .render(message, &settings)
            .map(|audio| audio.samples)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter, js_name = sampleRate)]
    pub fn sample_rate(&self) -> u32 {
        self.inner.params().sample_rate()
    }

    #[wasm_bindgen(js_name = fileName)]
    pub fn file_name(message: &str) -> String {
        SignalEncoder::file_name(message)
    }
}
