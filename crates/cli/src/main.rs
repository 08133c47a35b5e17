//! CLI for generating, editing and inspecting slide decks.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use deckgen_core::edit::BULLET_SEPARATOR;
use deckgen_core::EditSession;
use deckgen_pptx::DeckReader;
use deckgen_service::{ApiError, Config, DeckService, GenerateRequest, RegenerateRequest};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Generate PowerPoint decks from a topic with Gemini, or from the built-in
/// fallback content when Gemini is unavailable.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory rendered decks are written to
    #[arg(short, long, global = true, env = "DECKGEN_DOWNLOADS_DIR")]
    downloads_dir: Option<PathBuf>,

    /// Skip the startup probe of the Gemini API key
    #[arg(long, global = true)]
    skip_verify: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new deck for a topic
    Generate {
        topic: String,

        /// Total slides including the title slide (3-20)
        #[arg(short, long, default_value = "5")]
        slides: usize,

        /// Visual theme id
        #[arg(short, long)]
        theme: Option<String>,

        /// Denser slides with more bullets
        #[arg(short, long)]
        more_info: bool,

        /// Also save the response JSON here, for later editing
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Edit one slide of a saved deck and re-render it
    Edit {
        /// Saved deck JSON (output of `generate --save`)
        deck: PathBuf,

        /// 1-based slide number to edit
        #[arg(long)]
        slide: usize,

        /// New slide title
        #[arg(long)]
        title: Option<String>,

        /// Replacement bullet, repeat for several
        #[arg(long = "bullet")]
        bullets: Vec<String>,

        /// Visual theme id
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Re-render a saved slide list without regenerating it
    Regenerate {
        /// Deck JSON with a `slides` array
        deck: PathBuf,

        /// Visual theme id, overriding the one in the file
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// List available themes
    Themes,

    /// Show generative service status
    Status,

    /// Print the text of a rendered deck
    Inspect { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let mut config = Config::load();
    if let Some(dir) = &args.downloads_dir {
        config.downloads_dir = dir.clone();
    }
    if args.skip_verify {
        config.verify = false;
    }

    match args.command {
        Command::Generate {
            topic,
            slides,
            theme,
            more_info,
            save,
        } => {
            let service = DeckService::from_config(&config).await;
            let response = service
                .generate(GenerateRequest {
                    topic: Some(topic),
                    slide_count: Some(slides),
                    theme,
                    more_info_mode: more_info,
                })
                .await
                .map_err(api_error)?;
            if let Some(path) = save {
                let json = serde_json::to_string_pretty(&response)?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            print_json(&response)?;
        }
        Command::Edit {
            deck,
            slide,
            title,
            bullets,
            theme,
        } => {
            let request = read_deck(&deck)?;
            let request = apply_edit(request, slide, title, &bullets, theme)?;
            let service = offline_service(&config);
            print_json(&service.regenerate_with_edits(request).map_err(api_error)?)?;
        }
        Command::Regenerate { deck, theme } => {
            let mut request = read_deck(&deck)?;
            if theme.is_some() {
                request.theme = theme;
            }
            let service = offline_service(&config);
            print_json(&service.regenerate_with_edits(request).map_err(api_error)?)?;
        }
        Command::Themes => print_json(&offline_service(&config).themes())?,
        Command::Status => {
            let service = DeckService::from_config(&config).await;
            print_json(&service.status())?;
        }
        Command::Inspect { path } => {
            let slides = DeckReader::new()
                .open(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            for slide in slides {
                println!("--- Slide {} ---", slide.number);
                for line in slide.lines {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}

/// Service for commands that only render, so no key probe is spent.
fn offline_service(config: &Config) -> DeckService {
    DeckService::new(
        deckgen_core::Capability::unavailable(deckgen_core::UpstreamStatus::Missing),
        deckgen_pptx::DeckWriter::new(&config.downloads_dir),
    )
}

fn read_deck(path: &Path) -> Result<RegenerateRequest> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse deck JSON in {}", path.display()))
}

/// Apply a single slide edit through an [`EditSession`].
fn apply_edit(
    request: RegenerateRequest,
    slide_number: usize,
    title: Option<String>,
    bullets: &[String],
    theme: Option<String>,
) -> Result<RegenerateRequest> {
    let slides = request.slides.unwrap_or_default();
    let topic = request
        .topic
        .or_else(|| slides.first().map(|slide| slide.title.clone()))
        .unwrap_or_default();
    let mut session = EditSession::new(slides, topic.clone()).map_err(|e| anyhow!("{}", e))?;

    let index = slide_number
        .checked_sub(1)
        .filter(|index| session.go_to(*index))
        .ok_or_else(|| anyhow!("Slide {} does not exist", slide_number))?;
    log::debug!(
        "Editing slide {} of {}: {:?}",
        index + 1,
        session.slides().len(),
        session.focused().title
    );

    session.begin_edit();
    if let Some(title) = title {
        session.set_draft_title(title);
    }
    if !bullets.is_empty() {
        session.set_draft_content(bullets.join(BULLET_SEPARATOR));
    }
    session.save_edit();

    let mut edited = RegenerateRequest::from_edited(session.finish(), theme.or(request.theme));
    // A saved summary still describes the deck unless it was retitled.
    if edited.topic.as_deref() == Some(topic.as_str()) && request.topic_summary.is_some() {
        edited.topic_summary = request.topic_summary;
    }
    Ok(edited)
}

fn api_error(e: ApiError) -> anyhow::Error {
    match e.details {
        Some(details) => anyhow!("{} ({})", e.message, details),
        None => anyhow!("{}", e.message),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::Slide;

    fn saved_deck() -> RegenerateRequest {
        serde_json::from_str(
            r#"{
                "success": true,
                "slides": [
                    {"title": "Rust", "content": null, "slideType": "title", "editable": false},
                    {"title": "Ownership", "content": ["One owner per value"], "slideType": "content", "editable": true}
                ],
                "topicSummary": {"summary": "A Rust deck", "keyPoints": []}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_edit_replaces_bullets() {
        let edited = apply_edit(
            saved_deck(),
            2,
            Some("Borrowing".to_string()),
            &["Shared or mutable".to_string(), "  ".to_string()],
            Some("dark".to_string()),
        )
        .unwrap();

        let slides = edited.slides.unwrap();
        assert_eq!(slides[1], Slide::content("Borrowing", vec!["Shared or mutable".to_string()]));
        assert_eq!(edited.topic.as_deref(), Some("Rust"));
        assert_eq!(edited.theme.as_deref(), Some("dark"));
        assert_eq!(edited.topic_summary.unwrap().summary, "A Rust deck");
    }

    #[test]
    fn test_apply_edit_rejects_missing_slide() {
        assert!(apply_edit(saved_deck(), 0, None, &[], None).is_err());
        assert!(apply_edit(saved_deck(), 3, None, &[], None).is_err());
    }

    #[test]
    fn test_retitled_deck_gets_fresh_summary() {
        let edited = apply_edit(saved_deck(), 1, Some("Rust 2024".to_string()), &[], None).unwrap();
        assert_eq!(edited.topic.as_deref(), Some("Rust 2024"));
        assert_eq!(
            edited.topic_summary.unwrap().summary,
            "Updated presentation for Rust 2024"
        );
    }
}
