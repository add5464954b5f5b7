use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use ucheckin_core::{
    RenderSettings, SignalEncoder, SignalMode, SignalParameters, UcheckinError,
    DEFAULT_BANDWIDTH, DEFAULT_CENTER_FREQUENCY, DEFAULT_INTERVAL_MS, DEFAULT_SAMPLE_RATE,
    DEFAULT_SYMBOL_SAMPLES, DEFAULT_VOLUME,
};

use crate::error::CliError;
use crate::wav;

/// Length of generated audio when the caller does not ask for one
pub const DEFAULT_DURATION_SECS: f64 = 30.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Wav,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalQuery {
    /// 5-digit hexadecimal code
    pub signal: Option<String>,
    /// Center frequency in Hz
    #[serde(default = "default_fc")]
    pub fc: f64,
    /// Silence between two signals in ms
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Total length of the file in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub mode: u8,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_fc() -> f64 {
    DEFAULT_CENTER_FREQUENCY
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_MS
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECS
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignalJson {
    file_name: String,
    sample_rate: u32,
    sample_count: usize,
    repeat: usize,
    /// Base64 encoded WAV file
    wav: String,
}

#[derive(Debug, Serialize)]
struct ErrorJson {
    error: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<UcheckinError> for ApiError {
    fn from(err: UcheckinError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<CliError> for ApiError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Signal(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorJson { error })).into_response()
    }
}

struct GeneratedSignal {
    file_name: String,
    sample_rate: u32,
    sample_count: usize,
    repeat: usize,
    wav: Vec<u8>,
}

/// Render a signal for an API request, filling `duration` with whole repetitions
fn build_signal(query: &SignalQuery) -> Result<GeneratedSignal, ApiError> {
    let signal = query
        .signal
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("signal is required".to_string()))?;

    let mode = SignalMode::try_from(query.mode)?;
    let params = SignalParameters::new(
        query.fc,
        DEFAULT_BANDWIDTH,
        DEFAULT_SYMBOL_SAMPLES,
        DEFAULT_SAMPLE_RATE,
        mode,
    )?;
    let encoder = SignalEncoder::new(params)?;

    let repeat = encoder.repeats_to_fill(signal, query.duration, query.interval)?;
    let settings = RenderSettings {
        interval_ms: query.interval,
        repeat,
        volume: query.volume,
    };
    let audio = encoder.render(signal, &settings)?;

    Ok(GeneratedSignal {
        file_name: format!("{}_{}_{}.wav", signal, query.fc, query.duration),
        sample_rate: audio.sample_rate,
        sample_count: audio.samples.len(),
        repeat,
        wav: wav::wav_bytes(&audio)?,
    })
}

async fn generate_signal(Query(query): Query<SignalQuery>) -> Result<Response, ApiError> {
    let format = query.format;
    let generated = tokio::task::spawn_blocking(move || build_signal(&query))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .inspect_err(|e| warn!("signal request rejected: {:?}", e))?;

    info!(
        "generated {} ({} x, {} samples)",
        generated.file_name, generated.repeat, generated.sample_count
    );

    let response = match format {
        OutputFormat::Wav => (
            [
                (header::CONTENT_TYPE, "audio/wav".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", generated.file_name),
                ),
            ],
            generated.wav,
        )
            .into_response(),
        OutputFormat::Json => Json(SignalJson {
            file_name: generated.file_name,
            sample_rate: generated.sample_rate,
            sample_count: generated.sample_count,
            repeat: generated.repeat,
            wav: STANDARD.encode(&generated.wav),
        })
        .into_response(),
    };
    Ok(response)
}

async fn health() -> &'static str {
    "ok"
}

pub fn router() -> Router {
    Router::new()
        .route("/api/signal", get(generate_signal))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(bind: SocketAddr) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}
