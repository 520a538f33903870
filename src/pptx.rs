//! PowerPoint text extraction
//!
//! Reads a `.pptx` archive and collects the text of every text shape, slide
//! by slide, in presentation order.
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{Result, ToolbeltError};

const PRESENTATION: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_REL_TYPE: &str = "/relationships/slide";

/// Check that `path` exists and names a `.pptx` file
pub fn validate(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ToolbeltError::InvalidInput(format!(
            "File '{}' not found.",
            path.display()
        )));
    }

    let is_pptx = path
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pptx"));
    if !is_pptx {
        return Err(ToolbeltError::InvalidInput(
            "Only .pptx files are supported.".to_string(),
        ));
    }

    Ok(())
}

/// Default output location: the input path with a `.txt` extension
pub fn output_path(path: &Path) -> PathBuf {
    path.with_extension("txt")
}

/// Extract the text of every slide as `[Slide n]` blocks
pub fn extract_text(path: &Path) -> Result<String> {
    read_presentation(path).map_err(|e| match e {
        ToolbeltError::Pptx(_) => e,
        other => ToolbeltError::Pptx(other.to_string()),
    })
}

fn read_presentation(path: &Path) -> Result<String> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let slides = slide_order(&mut archive)?;
    debug!(path = %path.display(), slides = slides.len(), "opened presentation");

    let mut blocks = Vec::new();
    for (index, slide) in slides.iter().enumerate() {
        let xml = read_entry(&mut archive, slide)?;
        let texts = shape_texts(&xml)?;

        if !texts.is_empty() {
            blocks.push(format!("[Slide {}]\n{}", index + 1, texts.join("\n")));
        }
    }

    Ok(blocks.join("\n\n"))
}

fn read_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

/// Slide part names in presentation order.
///
/// Follows the slide id list of `ppt/presentation.xml`; archives without one
/// fall back to `ppt/slides/slideN.xml` sorted by N.
fn slide_order<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let has_presentation = archive.file_names().any(|name| name == PRESENTATION)
        && archive.file_names().any(|name| name == PRESENTATION_RELS);

    if has_presentation {
        let rels = read_entry(archive, PRESENTATION_RELS)?;
        let targets = slide_relationships(&rels)?;
        let presentation = read_entry(archive, PRESENTATION)?;

        let ordered: Vec<String> = slide_ids(&presentation)?
            .into_iter()
            .filter_map(|id| targets.get(&id).cloned())
            .collect();
        if !ordered.is_empty() {
            return Ok(ordered);
        }
    }

    let mut numbered: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort();

    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

/// Map of relationship id to slide part name
fn slide_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut is_slide = false;

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(value),
                        b"Target" => target = Some(value),
                        b"Type" => is_slide = value.ends_with(SLIDE_REL_TYPE),
                        _ => {}
                    }
                }

                if let (true, Some(id), Some(target)) = (is_slide, id, target) {
                    targets.insert(id, resolve_target(&target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Relationship targets are relative to `ppt/` unless absolute
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Relationship ids of `p:sldId` entries, in order
fn slide_ids(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                // The plain `id` attribute is the numeric slide id; the
                // prefixed `r:id` points at the relationship.
                let rel_id = e.attributes().flatten().find(|attr| {
                    attr.key.local_name().as_ref() == b"id" && attr.key.prefix().is_some()
                });
                if let Some(attr) = rel_id {
                    ids.push(String::from_utf8_lossy(&attr.value).into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

/// Text of each top-level text shape on a slide, trimmed, empty ones dropped.
///
/// Paragraphs are joined with newlines and `a:br` breaks become newlines.
/// Shapes nested in groups are not visited.
fn shape_texts(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs: Option<Vec<String>> = None;
    let mut texts = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"sp" if parent_is(&path, b"spTree") => paragraphs = Some(Vec::new()),
                    b"p" if parent_is(&path, b"txBody") => {
                        if let Some(paragraphs) = paragraphs.as_mut() {
                            paragraphs.push(String::new());
                        }
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if parent_is(&path, b"txBody") => {
                    if let Some(paragraphs) = paragraphs.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
                b"br" if parent_is(&path, b"p") => push_text(&mut paragraphs, "\n"),
                _ => {}
            },
            Event::Text(t) if parent_is(&path, b"t") => {
                let text = t.decode().map_err(xml_error)?;
                push_text(&mut paragraphs, &text);
            }
            Event::CData(t) if parent_is(&path, b"t") => {
                push_text(&mut paragraphs, &String::from_utf8_lossy(&t));
            }
            Event::GeneralRef(r) if parent_is(&path, b"t") => {
                if let Some(ch) = r.resolve_char_ref().map_err(xml_error)? {
                    push_text(&mut paragraphs, ch.encode_utf8(&mut [0; 4]));
                } else {
                    let name = r.decode().map_err(xml_error)?;
                    if let Some(resolved) = resolve_predefined_entity(&name) {
                        push_text(&mut paragraphs, resolved);
                    }
                }
            }
            Event::End(_) => {
                let closed = path.pop();
                if closed.as_deref() == Some(b"sp".as_slice()) && parent_is(&path, b"spTree") {
                    if let Some(done) = paragraphs.take() {
                        let text = done.join("\n");
                        let text = text.trim();
                        if !text.is_empty() {
                            texts.push(text.to_string());
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(texts)
}

fn parent_is(path: &[Vec<u8>], name: &[u8]) -> bool {
    path.last().is_some_and(|last| last.as_slice() == name)
}

fn push_text(paragraphs: &mut Option<Vec<String>>, text: &str) {
    if let Some(current) = paragraphs.as_mut().and_then(|p| p.last_mut()) {
        current.push_str(text);
    }
}

fn xml_error(e: impl std::fmt::Display) -> ToolbeltError {
    ToolbeltError::Pptx(format!("malformed XML: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn slide(shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
            shapes
        )
    }

    fn text_shape(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", p))
            .collect();
        format!("<p:sp><p:nvSpPr/><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>", body)
    }

    fn write_archive(path: &Path, entries: &[(&str, String)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_shape_texts_joins_paragraphs() {
        let xml = slide(&text_shape(&["Title", "Subtitle"]));
        assert_eq!(shape_texts(&xml).unwrap(), vec!["Title\nSubtitle"]);
    }

    #[test]
    fn test_shape_texts_skips_blank_shapes_and_trims() {
        let xml = slide(&format!(
            "{}{}",
            text_shape(&["   "]),
            text_shape(&["  padded  "])
        ));
        assert_eq!(shape_texts(&xml).unwrap(), vec!["padded"]);
    }

    #[test]
    fn test_shape_texts_runs_breaks_and_entities() {
        let xml = slide(
            "<p:sp><p:txBody><a:p><a:r><a:t>Fish &amp; </a:t></a:r><a:r><a:t>chips</a:t></a:r>\
             <a:br/><a:r><a:t>&#169; 2024</a:t></a:r></a:p></p:txBody></p:sp>",
        );
        assert_eq!(shape_texts(&xml).unwrap(), vec!["Fish & chips\n\u{a9} 2024"]);
    }

    #[test]
    fn test_shape_texts_hex_references_and_markup_entities() {
        let xml = slide(&text_shape(&["&lt;a&gt; &#x2013; &quot;b&quot; &apos;c&apos;"]));
        assert_eq!(shape_texts(&xml).unwrap(), vec!["<a> \u{2013} \"b\" 'c'"]);
    }

    #[test]
    fn test_shape_texts_ignores_grouped_shapes() {
        let xml = slide(&format!(
            "<p:grpSp><p:grpSpPr/>{}</p:grpSp>{}",
            text_shape(&["inside group"]),
            text_shape(&["top level"])
        ));
        assert_eq!(shape_texts(&xml).unwrap(), vec!["top level"]);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide2.xml"), "ppt/slides/slide2.xml");
    }

    #[test]
    fn test_extract_follows_presentation_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deck.pptx");

        let presentation = r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/><p:sldId id="258" r:id="rId4"/></p:sldIdLst></p:presentation>"#;
        let rels = r#"<Relationships xmlns="rels"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/><Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml"/></Relationships>"#;

        write_archive(
            &path,
            &[
                (PRESENTATION, presentation.to_string()),
                (PRESENTATION_RELS, rels.to_string()),
                ("ppt/slides/slide1.xml", slide(&text_shape(&["second"]))),
                ("ppt/slides/slide2.xml", slide(&text_shape(&["first"]))),
                ("ppt/slides/slide3.xml", slide("")),
            ],
        );

        assert_eq!(
            extract_text(&path).unwrap(),
            "[Slide 1]\nfirst\n\n[Slide 2]\nsecond"
        );
    }

    #[test]
    fn test_extract_without_presentation_sorts_numerically() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deck.pptx");

        write_archive(
            &path,
            &[
                ("ppt/slides/slide10.xml", slide(&text_shape(&["ten"]))),
                ("ppt/slides/slide2.xml", slide(&text_shape(&["two"]))),
                ("ppt/slides/slide1.xml", slide("")),
            ],
        );

        assert_eq!(
            extract_text(&path).unwrap(),
            "[Slide 2]\ntwo\n\n[Slide 3]\nten"
        );
    }

    #[test]
    fn test_extract_rejects_non_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.pptx");
        fs::write(&path, "not a zip").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(err.to_string().starts_with("Error reading PowerPoint file:"));
    }

    #[test]
    fn test_validate() {
        let temp = TempDir::new().unwrap();
        let deck = temp.path().join("Deck.PPTX");
        let doc = temp.path().join("notes.docx");
        fs::write(&deck, "").unwrap();
        fs::write(&doc, "").unwrap();

        assert!(validate(&deck).is_ok());
        assert_eq!(
            validate(&doc).unwrap_err().to_string(),
            "Only .pptx files are supported."
        );

        let missing = temp.path().join("missing.pptx");
        assert_eq!(
            validate(&missing).unwrap_err().to_string(),
            format!("File '{}' not found.", missing.display())
        );
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/talks/deck.pptx")),
            PathBuf::from("/talks/deck.txt")
        );
    }
}
