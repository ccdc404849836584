// Mantra Command Line Interface
// Read an article aloud: translate, normalize, chunk, speak

use anyhow::Context;
use clap::{Parser, Subcommand};
use mantra_core::{text, Language, NarrationConfig, NarrationRequest};
use mantra_translate::{HttpTranslator, StaticTranslator, TranslateConfig, Translator};
use mantra_voice::{
    EspeakEngine, NarrationEvent, NarrationService, ScriptedEngine, SpeechEngine,
};
use std::io::Read;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mantra")]
#[command(about = "Voice narration for articles - translate, normalize, speak", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Narrate a text file (or stdin) aloud
    Speak {
        /// Input file; reads stdin when omitted
        file: Option<String>,

        /// Article title, spoken before the body
        #[arg(long, short, default_value = "")]
        title: String,

        /// Target language (code, prefix, or name: "es-ES", "es", "spanish")
        #[arg(long, short, default_value = "en")]
        language: String,

        /// Speech engine (espeak, scripted)
        #[arg(long, short, default_value = "espeak")]
        engine: String,

        /// Playback volume, 0.0 to 1.0
        #[arg(long, default_value = "0.8")]
        volume: f32,

        /// Speech rate in words per minute
        #[arg(long, default_value = "150")]
        rate: u32,

        /// Maximum characters per spoken chunk
        #[arg(long, default_value = "160")]
        chunk_len: usize,

        /// Translation endpoint URL (required for non-English targets)
        #[arg(long)]
        endpoint: Option<String>,

        /// Environment variable holding the translation API key
        #[arg(long, default_value = "MANTRA_API_KEY")]
        api_key_env: String,
    },

    /// List the voices the speech engine offers
    Voices {
        /// Speech engine (espeak, scripted)
        #[arg(long, short, default_value = "espeak")]
        engine: String,
    },

    /// Normalize a text file (or stdin) and print the chunks
    Normalize {
        /// Input file; reads stdin when omitted
        file: Option<String>,

        /// Article title, combined before the body
        #[arg(long, short, default_value = "")]
        title: String,

        /// Maximum characters per chunk
        #[arg(long, default_value = "160")]
        chunk_len: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .init();
    }

    match cli.command {
        Commands::Speak {
            file,
            title,
            language,
            engine,
            volume,
            rate,
            chunk_len,
            endpoint,
            api_key_env,
        } => {
            speak(
                file, title, language, engine, volume, rate, chunk_len, endpoint, api_key_env,
            )
            .await?;
        }
        Commands::Voices { engine } => {
            list_voices(&engine)?;
        }
        Commands::Normalize {
            file,
            title,
            chunk_len,
        } => {
            normalize(file, &title, chunk_len)?;
        }
    }

    Ok(())
}

fn read_input(file: Option<String>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

/// The scripted engine never finishes an utterance on its own; the
/// speak loop drives it as a dry run, printing each chunk instead of
/// playing audio.
fn build_engine(
    name: &str,
) -> anyhow::Result<(Arc<dyn SpeechEngine>, Option<Arc<ScriptedEngine>>)> {
    match name {
        "espeak" => {
            let engine: Arc<dyn SpeechEngine> = Arc::new(EspeakEngine::new());
            Ok((engine, None))
        }
        "scripted" => {
            let engine = Arc::new(ScriptedEngine::new());
            let dyn_engine: Arc<dyn SpeechEngine> = engine.clone();
            Ok((dyn_engine, Some(engine)))
        }
        other => anyhow::bail!("unknown engine '{}' (expected espeak or scripted)", other),
    }
}

#[allow(clippy::too_many_arguments)]
async fn speak(
    file: Option<String>,
    title: String,
    language: String,
    engine_name: String,
    volume: f32,
    rate: u32,
    chunk_len: usize,
    endpoint: Option<String>,
    api_key_env: String,
) -> anyhow::Result<()> {
    let content = read_input(file)?;
    let language: Language = language.parse()?;

    let translator: Arc<dyn Translator> = match endpoint {
        Some(endpoint) => {
            let mut config = TranslateConfig::new(endpoint);
            config.api_key = std::env::var(&api_key_env).ok();
            Arc::new(HttpTranslator::new(config)?)
        }
        None => {
            if language != Language::English {
                anyhow::bail!(
                    "narrating in {} requires a translation endpoint (--endpoint)",
                    language.display_name()
                );
            }
            Arc::new(StaticTranslator::new())
        }
    };

    let config = NarrationConfig {
        max_chunk_len: chunk_len,
        rate,
        volume,
        ..NarrationConfig::default()
    };

    let (engine, dry_run) = build_engine(&engine_name)?;
    let service = NarrationService::new(config, engine, translator)?;
    let mut events = service.subscribe();

    info!(language = %language, engine = engine_name, "starting narration");
    service.play(NarrationRequest::new(title, content, language))?;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(NarrationEvent::Started) => {
                    let status = service.status();
                    println!("Speaking ({} chunks)...", status.chunk_count);
                    if let Some(ref scripted) = dry_run {
                        if let Some(utterance) = scripted.current_utterance() {
                            println!("  [1] {}", utterance.text);
                        }
                        scripted.complete_current();
                    }
                }
                Ok(NarrationEvent::ChunkAdvanced(index)) => {
                    let status = service.status();
                    println!("  chunk {}/{}", index + 1, status.chunk_count);
                    if let Some(ref scripted) = dry_run {
                        if let Some(utterance) = scripted.current_utterance() {
                            println!("  [{}] {}", index + 1, utterance.text);
                        }
                        scripted.complete_current();
                    }
                }
                Ok(NarrationEvent::Finished) => {
                    println!("Done.");
                    break;
                }
                Ok(NarrationEvent::Stopped) => {
                    println!("Stopped.");
                    break;
                }
                Ok(NarrationEvent::NoText) => {
                    println!("(no speakable text)");
                    break;
                }
                Ok(NarrationEvent::TranslationFailed(message)) => {
                    anyhow::bail!("translation failed: {}", message);
                }
                Ok(NarrationEvent::Aborted(message)) => {
                    anyhow::bail!("narration aborted: {}", message);
                }
                Err(_) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                service.stop();
            }
        }
    }

    service.shutdown();
    Ok(())
}

fn list_voices(engine_name: &str) -> anyhow::Result<()> {
    let (engine, _) = build_engine(engine_name)?;
    if !engine.is_available() {
        anyhow::bail!("engine '{}' is not available on this system", engine.name());
    }

    let voices = engine.voices();
    if voices.is_empty() {
        println!("No voices reported by '{}'", engine.name());
    } else {
        println!("Voices ({}):", engine.name());
        for voice in voices {
            println!("  {}", voice);
        }
    }
    Ok(())
}

fn normalize(file: Option<String>, title: &str, chunk_len: usize) -> anyhow::Result<()> {
    let content = read_input(file)?;
    let combined = text::combine(title, &content);
    let chunks = text::chunk(&combined, chunk_len);

    if chunks.is_empty() {
        println!("(no speakable text)");
        return Ok(());
    }

    for (index, chunk) in chunks.iter().enumerate() {
        println!("[{:>3}] {}", index, chunk);
    }
    Ok(())
}
