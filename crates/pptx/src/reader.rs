//! Read the text of a rendered deck back out of its package.

use deckgen_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Text lines of one slide, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectedSlide {
    /// 1-based slide number.
    pub number: usize,
    /// One entry per text box, in reading order.
    pub lines: Vec<String>,
}

/// Reads slide text from `.pptx` packages.
#[derive(Debug, Default)]
pub struct DeckReader;

impl DeckReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a deck from disk.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Vec<InspectedSlide>> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }

    /// Read a deck from any seekable source.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<InspectedSlide>> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.slide_order(&mut archive)?;
        slide_order
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                let content = read_file_from_archive(&mut archive, path)?;
                Ok(InspectedSlide {
                    number: idx + 1,
                    lines: extract_lines(&content),
                })
            })
            .collect()
    }

    /// Slide part paths in presentation order.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order_num = extract_slide_number(&target);
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }
}

/// A text-bearing shape and its offset in EMU.
#[derive(Debug, Default)]
struct ShapeText {
    text: String,
    x: i64,
    y: i64,
}

/// Extract shape texts from slide XML, sorted top-to-bottom then left-to-right.
fn extract_lines(xml_content: &str) -> Vec<String> {
    let mut shapes: Vec<ShapeText> = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut current: Option<ShapeText> = None;
    let mut in_paragraph = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current = Some(ShapeText::default()),
                b"p" => {
                    in_paragraph = true;
                    if let Some(shape) = current.as_mut().filter(|s| !s.text.is_empty()) {
                        shape.text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) if local_name(e.name().as_ref()) == b"off" => {
                if let Some(shape) = current.as_mut() {
                    shape.x = attribute(e, b"x").and_then(|v| v.parse().ok()).unwrap_or(0);
                    shape.y = attribute(e, b"y").and_then(|v| v.parse().ok()).unwrap_or(0);
                }
            }
            Ok(Event::Text(ref e)) if in_paragraph => {
                if let Some(shape) = current.as_mut() {
                    shape.text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(shape) = current.take().filter(|s| !s.text.trim().is_empty()) {
                        shapes.push(shape);
                    }
                    in_paragraph = false;
                }
                b"p" => in_paragraph = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error (continuing): {}", e);
            }
            _ => {}
        }
    }

    shapes.sort_by_key(|shape| (shape.y, shape.x));
    shapes.into_iter().map(|shape| shape.text.trim().to_string()).collect()
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "slide3.xml" or "rId2".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("slides/slide12.xml"), Some(12));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_extract_lines_sorts_by_position() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="900"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>second</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="100"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>first &amp; top</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:spPr><a:xfrm><a:off x="0" y="500"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>  </a:t></a:r></a:p></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#;

        assert_eq!(extract_lines(xml), vec!["first & top", "second"]);
    }
}
