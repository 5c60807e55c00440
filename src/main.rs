//! Appliance entry point.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first boot).
//! 3. Read the completion credential from `OPENAI_API_KEY` — fatal if absent.
//! 4. Open the OLED panel and draw the IP header (IP failure is the one
//!    non-fatal startup problem: the header degrades to "IP: unavailable").
//! 5. Load the Whisper model and probe the microphone — both fatal.
//! 6. Build the synthesizer, completion client and event log.
//! 7. Create the tokio runtime (2 workers + a small blocking pool for the
//!    microphone and synthesis calls) and run the assistant forever.

use std::sync::Arc;

use anyhow::{Context, Result};

use quip::{
    assistant::Assistant,
    completion::ApiClient,
    config::{AppConfig, AppPaths},
    display::{OledPanel, Screen, PANEL_COLUMNS},
    events::EventLog,
    listen::MicListener,
    net,
    speech::{EspeakSynthesizer, Speaker},
    stt::{TranscribeParams, WhisperEngine},
};

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("quip starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    let paths = AppPaths::new();

    // 3. Credential — refuse to boot without it rather than failing on the
    //    first question.
    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY is not set; export it before starting quip")?;

    // 4. Display
    let panel = OledPanel::open(&config.display)
        .with_context(|| format!("failed to open display on {}", config.display.i2c_bus))?;
    let screen = Screen::new(Box::new(panel), PANEL_COLUMNS);

    let header = match net::host_ip() {
        Some(ip) => format!("IP: {ip}"),
        None => {
            log::warn!("could not resolve a host address for the header");
            "IP: unavailable".to_string()
        }
    };
    screen
        .show_header(&header)
        .context("failed to draw the boot header")?;

    // 5. Listener (Whisper model + microphone probe)
    let model_path = paths.models_dir.join(format!("{}.bin", config.stt.model));
    let stt = WhisperEngine::load(
        &model_path,
        TranscribeParams {
            language: config.stt.language.clone(),
            ..TranscribeParams::default()
        },
    )
    .with_context(|| format!("failed to load Whisper model {}", model_path.display()))?;

    let listener = MicListener::new(config.audio.clone(), Arc::new(stt))
        .context("audio input device unavailable")?;

    // 6. Synthesis, completion, event log
    let speaker = Arc::new(Speaker::new(Arc::new(EspeakSynthesizer::from_config(
        &config.speech,
    ))));
    let completion = ApiClient::new(&config.completion, api_key);
    let events = Arc::new(
        EventLog::open(&paths.events_file).with_context(|| {
            format!("failed to open event log {}", paths.events_file.display())
        })?,
    );
    log::info!("event log: {}", events.path().display());

    // 7. Runtime — 2 workers for the cooperative tasks, a small fixed pool
    //    for the blocking microphone/synthesis calls.
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .max_blocking_threads(4)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let assistant = Assistant::new(
        screen,
        Arc::new(listener),
        speaker,
        Arc::new(completion),
        events,
        config,
    );

    rt.block_on(assistant.run());
    Ok(())
}
