//! Rendering decks to files in an output directory.

use crate::document::Document;
use crate::package::write_package;
use chrono::Utc;
use deckgen_core::normalize::sanitize_filename;
use deckgen_core::{Error, Result, Slide, ThemeDefinition};
use log::{error, info};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// How many timestamp bumps are tried before giving up on a file name.
const MAX_NAME_ATTEMPTS: i64 = 1000;

/// Which naming scheme an output file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// A freshly generated deck with this many slides.
    Generated { slide_count: usize },
    /// A deck re-rendered after editing.
    Edited,
}

impl OutputKind {
    /// File name for a topic at a millisecond timestamp.
    pub fn filename(&self, topic: &str, timestamp_ms: i64) -> String {
        let stem = sanitize_filename(topic);
        match self {
            OutputKind::Generated { slide_count } => {
                format!("{}_{}slides_{}.pptx", stem, slide_count, timestamp_ms)
            }
            OutputKind::Edited => format!("{}_edited_{}.pptx", stem, timestamp_ms),
        }
    }
}

/// A deck written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDeck {
    pub filename: String,
    pub path: PathBuf,
}

/// Renders slide lists into `.pptx` files inside one directory.
#[derive(Debug, Clone)]
pub struct DeckWriter {
    output_dir: PathBuf,
}

impl DeckWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Lay out, package and write a deck. Unknown theme ids use the default
    /// theme. Existing files are never overwritten.
    pub fn write(
        &self,
        slides: &[Slide],
        theme_id: Option<&str>,
        topic: &str,
        summary: &str,
        kind: OutputKind,
    ) -> Result<RenderedDeck> {
        let theme = ThemeDefinition::get_or_default(theme_id);
        let document = Document::build(slides, theme, topic, summary);

        fs::create_dir_all(&self.output_dir)?;
        let (filename, file) = self.create_new_file(topic, kind)?;
        let path = self.output_dir.join(&filename);

        let result = write_package(&document, BufWriter::new(file))
            .and_then(|mut writer| writer.flush().map_err(Error::from));
        if let Err(e) = result {
            error!("Failed to write {}: {}", path.display(), e);
            // Leave no half-written deck behind.
            let _ = fs::remove_file(&path);
            return Err(Error::RenderFailure(e.to_string()));
        }

        info!(
            "Rendered {} slides with theme {} to {}",
            slides.len(),
            theme.id,
            path.display()
        );
        Ok(RenderedDeck { filename, path })
    }

    /// Create a file that did not exist before, bumping the timestamp on
    /// collisions.
    fn create_new_file(&self, topic: &str, kind: OutputKind) -> Result<(String, fs::File)> {
        let start = Utc::now().timestamp_millis();
        for bump in 0..MAX_NAME_ATTEMPTS {
            let filename = kind.filename(topic, start + bump);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.output_dir.join(&filename))
            {
                Ok(file) => return Ok((filename, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(Error::RenderFailure(format!(
            "no free file name for {:?} in {}",
            topic,
            self.output_dir.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::DeckReader;
    use deckgen_core::{Detail, FallbackEngine};
    use tempfile::TempDir;

    #[test]
    fn test_filenames() {
        let generated = OutputKind::Generated { slide_count: 5 };
        assert_eq!(
            generated.filename("Apriori algorithm", 1700000000000),
            "Apriori_algorithm_5slides_1700000000000.pptx"
        );
        assert_eq!(
            OutputKind::Edited.filename("C++ tips", 42),
            "C___tips_edited_42.pptx"
        );
    }

    #[test]
    fn test_written_deck_reads_back() {
        let dir = TempDir::new().unwrap();
        let slides = FallbackEngine::default().deck("Apriori algorithm", 5, Detail::Standard);
        let writer = DeckWriter::new(dir.path().join("downloads"));

        let rendered = writer
            .write(
                &slides,
                Some("academic"),
                "Apriori algorithm",
                "Summary text",
                OutputKind::Generated { slide_count: 5 },
            )
            .unwrap();

        assert!(rendered.filename.starts_with("Apriori_algorithm_5slides_"));
        assert!(rendered.path.exists());

        let inspected = DeckReader::new().open(&rendered.path).unwrap();
        assert_eq!(inspected.len(), 5);
        assert_eq!(
            inspected[0].lines,
            vec!["Apriori algorithm", "4 Professional Content Slides", "Summary text"]
        );
        assert_eq!(inspected[1].lines[0], "Understanding the Apriori Principle Foundation");
        assert_eq!(inspected[1].lines.len(), 6);
        assert!(inspected[1].lines[1].starts_with("• The Apriori principle"));
        assert_eq!(inspected[4].lines.last().map(String::as_str), Some("4 / 4"));
    }

    #[test]
    fn test_collisions_get_distinct_names() {
        let dir = TempDir::new().unwrap();
        let writer = DeckWriter::new(dir.path());
        let slides = FallbackEngine::default().deck("Rust", 3, Detail::Standard);

        let first = writer
            .write(&slides, None, "Rust", "", OutputKind::Edited)
            .unwrap();
        let second = writer
            .write(&slides, None, "Rust", "", OutputKind::Edited)
            .unwrap();

        assert_ne!(first.filename, second.filename);
        assert!(first.path.exists() && second.path.exists());
    }
}
