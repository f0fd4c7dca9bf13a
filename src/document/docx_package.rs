use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::fetch_image::ImageData;
use crate::document::page_setup::{mm_to_emu, mm_to_twips, PageLayout};
use crate::document::xml_writer::XmlWriter;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const TYPE_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const TYPE_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const TYPE_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const TYPE_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// Formatting of one run of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub size_pt: Option<f32>,
    pub bold: bool,
    pub strike: bool,
    /// Hex RGB, e.g. `C80000`.
    pub color: Option<String>,
    /// Emits a line break after the text.
    pub line_break: bool,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            ..Run::default()
        }
    }

    pub fn size(mut self, size_pt: f32) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn strike(mut self) -> Self {
        self.strike = true;
        self
    }

    pub fn color(mut self, red: u8, green: u8, blue: u8) -> Self {
        self.color = Some(format!("{:02X}{:02X}{:02X}", red, green, blue));
        self
    }

    pub fn line_break(mut self) -> Self {
        self.line_break = true;
        self
    }
}

#[derive(Debug, Clone)]
enum Block {
    Text { runs: Vec<Run>, centered: bool },
    Picture { media: usize, width_mm: f64, height_mm: f64 },
}

struct Media {
    file_name: String,
    image: ImageData,
}

impl Media {
    fn relationship_id(index: usize) -> String {
        // rId1 is the styles part
        format!("rId{}", index + 2)
    }
}

/// In-memory WordprocessingML document with a single section.
pub struct DocxDocument {
    layout: PageLayout,
    font: String,
    title: String,
    blocks: Vec<Block>,
    media: Vec<Media>,
}

impl DocxDocument {
    pub fn new(layout: PageLayout, font: &str) -> Self {
        DocxDocument {
            layout,
            font: font.to_string(),
            title: String::new(),
            blocks: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Left-aligned paragraph with unformatted text.
    pub fn add_text(&mut self, text: &str) {
        self.blocks.push(Block::Text {
            runs: vec![Run::new(text)],
            centered: false,
        });
    }

    pub fn add_centered_runs(&mut self, runs: Vec<Run>) {
        self.blocks.push(Block::Text {
            runs,
            centered: true,
        });
    }

    /// Centered picture. Without a height the aspect ratio of the image is kept.
    pub fn add_centered_picture(&mut self, image: ImageData, width_mm: f64, height_mm: Option<f64>) {
        let height_mm = height_mm.unwrap_or_else(|| image.height_for_width(width_mm));
        let index = self.media.len();
        self.media.push(Media {
            file_name: format!("image{}.{}", index + 1, image.extension()),
            image,
        });
        self.blocks.push(Block::Picture {
            media: index,
            width_mm,
            height_mm,
        });
    }

    /// Serializes the package into DOCX bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", self.content_types_xml()?),
            ("_rels/.rels", self.package_rels_xml()?),
            ("docProps/core.xml", self.core_xml()?),
            ("word/document.xml", self.document_xml()?),
            ("word/styles.xml", self.styles_xml()?),
            ("word/_rels/document.xml.rels", self.document_rels_xml()?),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)
                .with_context(|| format!("Failed to add {} to package", name))?;
            zip.write_all(&content)?;
        }

        for media in &self.media {
            let name = format!("word/media/{}", media.file_name);
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("Failed to add {} to package", name))?;
            zip.write_all(&media.image.bytes)?;
        }

        let cursor = zip.finish().context("Failed to finish package")?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start("Types", &[("xmlns", NS_TYPES)])?;
        xml.empty("Default", &[("Extension", "rels"), ("ContentType", TYPE_RELS)])?;
        xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;

        let mut extensions: Vec<(&str, &str)> = Vec::new();
        for media in &self.media {
            let entry = (media.image.extension(), media.image.mime_type());
            if !extensions.contains(&entry) {
                extensions.push(entry);
            }
        }
        for (extension, mime_type) in extensions {
            xml.empty("Default", &[("Extension", extension), ("ContentType", mime_type)])?;
        }

        xml.empty("Override", &[("PartName", "/word/document.xml"), ("ContentType", TYPE_DOCUMENT)])?;
        xml.empty("Override", &[("PartName", "/word/styles.xml"), ("ContentType", TYPE_STYLES)])?;
        xml.empty("Override", &[("PartName", "/docProps/core.xml"), ("ContentType", TYPE_CORE)])?;
        xml.end("Types")?;
        Ok(xml.into_bytes())
    }

    fn package_rels_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start("Relationships", &[("xmlns", NS_RELS)])?;
        xml.empty(
            "Relationship",
            &[("Id", "rId1"), ("Type", REL_OFFICE_DOCUMENT), ("Target", "word/document.xml")],
        )?;
        xml.empty(
            "Relationship",
            &[("Id", "rId2"), ("Type", REL_CORE_PROPERTIES), ("Target", "docProps/core.xml")],
        )?;
        xml.end("Relationships")?;
        Ok(xml.into_bytes())
    }

    fn document_rels_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start("Relationships", &[("xmlns", NS_RELS)])?;
        xml.empty(
            "Relationship",
            &[("Id", "rId1"), ("Type", REL_STYLES), ("Target", "styles.xml")],
        )?;
        for (index, media) in self.media.iter().enumerate() {
            let id = Media::relationship_id(index);
            let target = format!("media/{}", media.file_name);
            xml.empty(
                "Relationship",
                &[("Id", id.as_str()), ("Type", REL_IMAGE), ("Target", target.as_str())],
            )?;
        }
        xml.end("Relationships")?;
        Ok(xml.into_bytes())
    }

    fn core_xml(&self) -> Result<Vec<u8>> {
        let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut xml = XmlWriter::new()?;
        xml.start(
            "cp:coreProperties",
            &[
                ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
                ("xmlns:dcterms", "http://purl.org/dc/terms/"),
                ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ],
        )?;
        xml.text_element("dc:title", &[], &self.title)?;
        xml.text_element("dc:creator", &[], env!("CARGO_PKG_NAME"))?;
        xml.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
        xml.text_element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
        xml.end("cp:coreProperties")?;
        Ok(xml.into_bytes())
    }

    fn styles_xml(&self) -> Result<Vec<u8>> {
        let font = self.font.as_str();
        let fonts = [
            ("w:ascii", font),
            ("w:hAnsi", font),
            ("w:eastAsia", font),
            ("w:cs", font),
        ];

        let mut xml = XmlWriter::new()?;
        xml.start("w:styles", &[("xmlns:w", NS_W)])?;

        xml.start("w:docDefaults", &[])?;
        xml.start("w:rPrDefault", &[])?;
        xml.start("w:rPr", &[])?;
        xml.empty("w:rFonts", &fonts)?;
        xml.empty("w:sz", &[("w:val", "22")])?;
        xml.empty("w:szCs", &[("w:val", "22")])?;
        xml.empty("w:lang", &[("w:val", "de-DE")])?;
        xml.end("w:rPr")?;
        xml.end("w:rPrDefault")?;
        xml.end("w:docDefaults")?;

        xml.start(
            "w:style",
            &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
        )?;
        xml.empty("w:name", &[("w:val", "Normal")])?;
        xml.empty("w:qFormat", &[])?;
        xml.start("w:rPr", &[])?;
        xml.empty("w:rFonts", &fonts)?;
        xml.end("w:rPr")?;
        xml.end("w:style")?;

        xml.end("w:styles")?;
        Ok(xml.into_bytes())
    }

    fn document_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start(
            "w:document",
            &[
                ("xmlns:w", NS_W),
                ("xmlns:r", NS_R),
                ("xmlns:wp", NS_WP),
                ("xmlns:a", NS_A),
                ("xmlns:pic", NS_PIC),
            ],
        )?;
        xml.start("w:body", &[])?;

        for block in &self.blocks {
            match block {
                Block::Text { runs, centered } => write_text_paragraph(&mut xml, runs, *centered)?,
                Block::Picture {
                    media,
                    width_mm,
                    height_mm,
                } => self.write_picture_paragraph(&mut xml, *media, *width_mm, *height_mm)?,
            }
        }

        self.write_section(&mut xml)?;
        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(xml.into_bytes())
    }

    fn write_section(&self, xml: &mut XmlWriter) -> Result<()> {
        let layout = &self.layout;
        let width = mm_to_twips(layout.width_mm).to_string();
        let height = mm_to_twips(layout.height_mm).to_string();
        let top = mm_to_twips(layout.margin_top_mm).to_string();
        let bottom = mm_to_twips(layout.margin_bottom_mm).to_string();
        let left = mm_to_twips(layout.margin_left_mm).to_string();
        let right = mm_to_twips(layout.margin_right_mm).to_string();

        xml.start("w:sectPr", &[])?;
        xml.empty(
            "w:pgSz",
            &[("w:w", width.as_str()), ("w:h", height.as_str()), ("w:orient", "portrait")],
        )?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", top.as_str()),
                ("w:right", right.as_str()),
                ("w:bottom", bottom.as_str()),
                ("w:left", left.as_str()),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")
    }

    fn write_picture_paragraph(
        &self,
        xml: &mut XmlWriter,
        index: usize,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<()> {
        let media = &self.media[index];
        let cx = mm_to_emu(width_mm).to_string();
        let cy = mm_to_emu(height_mm).to_string();
        let doc_pr_id = (index + 1).to_string();
        let name = format!("Picture {}", index + 1);
        let relationship_id = Media::relationship_id(index);

        xml.start("w:p", &[])?;
        write_alignment(xml, true)?;
        xml.start("w:r", &[])?;
        xml.start("w:drawing", &[])?;
        xml.start(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        xml.empty("wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        xml.empty("wp:docPr", &[("id", doc_pr_id.as_str()), ("name", name.as_str())])?;
        xml.start("wp:cNvGraphicFramePr", &[])?;
        xml.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
        xml.end("wp:cNvGraphicFramePr")?;

        xml.start("a:graphic", &[])?;
        xml.start("a:graphicData", &[("uri", NS_PIC)])?;
        xml.start("pic:pic", &[])?;

        xml.start("pic:nvPicPr", &[])?;
        xml.empty("pic:cNvPr", &[("id", "0"), ("name", media.file_name.as_str())])?;
        xml.empty("pic:cNvPicPr", &[])?;
        xml.end("pic:nvPicPr")?;

        xml.start("pic:blipFill", &[])?;
        xml.empty("a:blip", &[("r:embed", relationship_id.as_str())])?;
        xml.start("a:stretch", &[])?;
        xml.empty("a:fillRect", &[])?;
        xml.end("a:stretch")?;
        xml.end("pic:blipFill")?;

        xml.start("pic:spPr", &[])?;
        xml.start("a:xfrm", &[])?;
        xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
        xml.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        xml.end("a:xfrm")?;
        xml.start("a:prstGeom", &[("prst", "rect")])?;
        xml.empty("a:avLst", &[])?;
        xml.end("a:prstGeom")?;
        xml.end("pic:spPr")?;

        xml.end("pic:pic")?;
        xml.end("a:graphicData")?;
        xml.end("a:graphic")?;
        xml.end("wp:inline")?;
        xml.end("w:drawing")?;
        xml.end("w:r")?;
        xml.end("w:p")
    }
}

fn write_alignment(xml: &mut XmlWriter, centered: bool) -> Result<()> {
    if centered {
        xml.start("w:pPr", &[])?;
        xml.empty("w:jc", &[("w:val", "center")])?;
        xml.end("w:pPr")?;
    }
    Ok(())
}

fn write_text_paragraph(xml: &mut XmlWriter, runs: &[Run], centered: bool) -> Result<()> {
    xml.start("w:p", &[])?;
    write_alignment(xml, centered)?;
    for run in runs {
        write_run(xml, run)?;
    }
    xml.end("w:p")
}

fn write_run(xml: &mut XmlWriter, run: &Run) -> Result<()> {
    xml.start("w:r", &[])?;

    let has_properties = run.bold || run.strike || run.color.is_some() || run.size_pt.is_some();
    if has_properties {
        // element order is fixed by the WordprocessingML schema
        xml.start("w:rPr", &[])?;
        if run.bold {
            xml.empty("w:b", &[])?;
        }
        if run.strike {
            xml.empty("w:strike", &[])?;
        }
        if let Some(color) = &run.color {
            xml.empty("w:color", &[("w:val", color.as_str())])?;
        }
        if let Some(size_pt) = run.size_pt {
            let half_points = ((size_pt * 2.0).round() as u32).to_string();
            xml.empty("w:sz", &[("w:val", half_points.as_str())])?;
            xml.empty("w:szCs", &[("w:val", half_points.as_str())])?;
        }
        xml.end("w:rPr")?;
    }

    xml.text_element("w:t", &[("xml:space", "preserve")], &run.text)?;
    if run.line_break {
        xml.empty("w:br", &[])?;
    }

    xml.end("w:r")
}
