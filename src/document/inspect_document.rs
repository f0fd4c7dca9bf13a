use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::document::page_setup::{emu_to_mm, twips_to_mm};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunInfo {
    pub text: String,
    pub size_pt: Option<f32>,
    pub bold: bool,
    pub strike: bool,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphInfo {
    pub centered: bool,
    pub runs: Vec<RunInfo>,
    /// Width and height in millimetres of every inline picture.
    pub pictures: Vec<(f64, f64)>,
}

impl ParagraphInfo {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// What a generated price tag looks like once read back from its bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
    pub margin_right_mm: f64,
    pub portrait: bool,
    pub font: Option<String>,
    pub paragraphs: Vec<ParagraphInfo>,
    pub media_files: Vec<String>,
}

/// Parses a DOCX package and reports its section, default font and body.
pub fn inspect_document(bytes: &[u8]) -> Result<DocumentLayout> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("Not a DOCX package")?;

    let document_xml = read_part(&mut archive, "word/document.xml")?;
    let styles_xml = read_part(&mut archive, "word/styles.xml")?;

    let mut layout = parse_document_xml(&document_xml)?;
    layout.font = parse_normal_font(&styles_xml)?;
    layout.media_files = archive
        .file_names()
        .filter(|name| name.starts_with("word/media/"))
        .map(str::to_string)
        .collect();
    layout.media_files.sort();

    Ok(layout)
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .with_context(|| format!("Missing part {}", name))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read part {}", name))?;
    Ok(content)
}

fn attribute(element: &BytesStart, name: &str) -> Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn twips_attribute(element: &BytesStart, name: &str) -> Result<f64> {
    let value = attribute(element, name)?.with_context(|| format!("Missing attribute {}", name))?;
    let twips: i64 = value
        .parse()
        .with_context(|| format!("Invalid value {} for {}", value, name))?;
    Ok(twips_to_mm(twips))
}

fn emu_attribute(element: &BytesStart, name: &str) -> Result<f64> {
    let value = attribute(element, name)?.with_context(|| format!("Missing attribute {}", name))?;
    let emu: i64 = value
        .parse()
        .with_context(|| format!("Invalid value {} for {}", value, name))?;
    Ok(emu_to_mm(emu))
}

fn parse_document_xml(xml: &str) -> Result<DocumentLayout> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut layout = DocumentLayout {
        portrait: true,
        ..DocumentLayout::default()
    };
    let mut paragraph: Option<ParagraphInfo> = None;
    let mut run: Option<RunInfo> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"w:p" => {
                layout.paragraphs.push(ParagraphInfo::default());
            }
            Ok(Event::Empty(ref e)) if matches!(e.name().as_ref(), b"w:r" | b"w:t") => (),
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => paragraph = Some(ParagraphInfo::default()),
                b"w:jc" => {
                    if let Some(paragraph) = paragraph.as_mut() {
                        paragraph.centered = attribute(e, "w:val")?.as_deref() == Some("center");
                    }
                }
                b"w:r" => run = Some(RunInfo::default()),
                b"w:b" => {
                    if let Some(run) = run.as_mut() {
                        run.bold = true;
                    }
                }
                b"w:strike" => {
                    if let Some(run) = run.as_mut() {
                        run.strike = true;
                    }
                }
                b"w:color" => {
                    if let Some(run) = run.as_mut() {
                        run.color = attribute(e, "w:val")?;
                    }
                }
                b"w:sz" => {
                    if let Some(run) = run.as_mut() {
                        run.size_pt = attribute(e, "w:val")?
                            .and_then(|value| value.parse::<f32>().ok())
                            .map(|half_points| half_points / 2.0);
                    }
                }
                b"w:t" => in_text = true,
                b"w:br" => {
                    if let Some(run) = run.as_mut() {
                        run.text.push('\n');
                    }
                }
                b"wp:extent" => {
                    let size = (emu_attribute(e, "cx")?, emu_attribute(e, "cy")?);
                    if let Some(paragraph) = paragraph.as_mut() {
                        paragraph.pictures.push(size);
                    }
                }
                b"w:pgSz" => {
                    layout.page_width_mm = twips_attribute(e, "w:w")?;
                    layout.page_height_mm = twips_attribute(e, "w:h")?;
                    layout.portrait = attribute(e, "w:orient")?.as_deref() != Some("landscape")
                        && layout.page_height_mm >= layout.page_width_mm;
                }
                b"w:pgMar" => {
                    layout.margin_top_mm = twips_attribute(e, "w:top")?;
                    layout.margin_bottom_mm = twips_attribute(e, "w:bottom")?;
                    layout.margin_left_mm = twips_attribute(e, "w:left")?;
                    layout.margin_right_mm = twips_attribute(e, "w:right")?;
                }
                _ => (),
            },
            Ok(Event::Text(ref e)) if in_text => {
                if let Some(run) = run.as_mut() {
                    run.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => {
                    if let (Some(finished), Some(paragraph)) = (run.take(), paragraph.as_mut()) {
                        paragraph.runs.push(finished);
                    }
                }
                b"w:p" => {
                    if let Some(finished) = paragraph.take() {
                        layout.paragraphs.push(finished);
                    }
                }
                _ => (),
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => (),
        }
        buf.clear();
    }

    Ok(layout)
}

/// Latin font of the `Normal` paragraph style.
fn parse_normal_font(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut in_normal = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:style" => {
                in_normal = attribute(e, "w:styleId")?.as_deref() == Some("Normal");
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:style" => in_normal = false,
            Ok(Event::Empty(ref e)) if in_normal && e.name().as_ref() == b"w:rFonts" => {
                return attribute(e, "w:ascii");
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => (),
        }
        buf.clear();
    }

    Ok(None)
}
