//! Serialize a [`Document`] into a `.pptx` package.

use crate::document::{emu, Document, DocumentSlide, TextBox, SLIDE_HEIGHT_IN, SLIDE_WIDTH_IN};
use chrono::{SecondsFormat, Utc};
use deckgen_core::{Error, Result};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;
use std::io::{Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

/// First id handed to slides in `presentation.xml`.
const FIRST_SLIDE_ID: usize = 256;

fn xml_err(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

fn zip_err(e: zip::result::ZipError) -> Error {
    Error::ZipError(e.to_string())
}

/// Write the document as a complete package and return the inner writer.
pub fn write_package<W: Write + Seek>(doc: &Document, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), content_types_xml(doc.slides.len())?),
        ("_rels/.rels".to_string(), package_rels_xml()?),
        ("docProps/core.xml".to_string(), core_props_xml(&doc.title)),
        ("docProps/app.xml".to_string(), app_props_xml(doc.slides.len())?),
        ("ppt/presentation.xml".to_string(), presentation_xml(doc.slides.len())?),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            presentation_rels_xml(doc.slides.len())?,
        ),
        ("ppt/slideMasters/slideMaster1.xml".to_string(), slide_master_xml()),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            relationships_xml(&[
                ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", REL_THEME, "../theme/theme1.xml"),
            ])?,
        ),
        ("ppt/slideLayouts/slideLayout1.xml".to_string(), slide_layout_xml()),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
            relationships_xml(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])?,
        ),
        ("ppt/theme/theme1.xml".to_string(), theme_xml(doc)?),
    ];

    let slide_rels = relationships_xml(&[("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")])?;
    for (index, slide) in doc.slides.iter().enumerate() {
        let number = index + 1;
        parts.push((format!("ppt/slides/slide{}.xml", number), slide_xml(slide)?));
        parts.push((format!("ppt/slides/_rels/slide{}.xml.rels", number), slide_rels.clone()));
    }

    for (name, content) in &parts {
        zip.start_file(name.as_str(), options).map_err(zip_err)?;
        zip.write_all(content.as_bytes())?;
    }

    zip.finish().map_err(zip_err)
}

fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    for number in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            number
        )
        .map_err(xml_err)?;
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    Ok(xml)
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{}">"#, NS_PACKAGE_RELATIONSHIPS).map_err(xml_err)?;
    for (id, rel_type, target) in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        )
        .map_err(xml_err)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn package_rels_xml() -> Result<String> {
    relationships_xml(&[
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

/// Slide master at rId1, slides at rId2.., theme last.
fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let slide_ids: Vec<String> = (0..slide_count).map(|i| format!("rId{}", i + 2)).collect();
    let slide_targets: Vec<String> = (1..=slide_count)
        .map(|n| format!("slides/slide{}.xml", n))
        .collect();
    let theme_id = format!("rId{}", slide_count + 2);

    let mut rels = vec![("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml")];
    for (id, target) in slide_ids.iter().zip(&slide_targets) {
        rels.push((id.as_str(), REL_SLIDE, target.as_str()));
    }
    rels.push((theme_id.as_str(), REL_THEME, "theme/theme1.xml"));
    relationships_xml(&rels)
}

fn presentation_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
    .map_err(xml_err)?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + index,
                index + 2
            )
            .map_err(xml_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        emu(SLIDE_WIDTH_IN),
        emu(SLIDE_HEIGHT_IN)
    )
    .map_err(xml_err)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

fn core_props_xml(title: &str) -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        "{XML_DECLARATION}<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{title}</dc:title>\
         <dc:creator>deckgen</dc:creator>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{now}</dcterms:created>\
         <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{now}</dcterms:modified>\
         </cp:coreProperties>",
        title = escape(title),
    )
}

fn app_props_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#);
    xml.push_str("<Application>deckgen</Application>");
    write!(xml, "<Slides>{}</Slides>", slide_count).map_err(xml_err)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

/// Empty group-shape header every shape tree starts with.
const SHAPE_TREE_HEADER: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

fn slide_master_xml() -> String {
    format!(
        "{XML_DECLARATION}<p:sldMaster xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELATIONSHIPS}\" xmlns:p=\"{NS_PRESENTATION}\">\
         <p:cSld><p:spTree>{SHAPE_TREE_HEADER}</p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
         accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>"
    )
}

fn slide_layout_xml() -> String {
    format!(
        "{XML_DECLARATION}<p:sldLayout xmlns:a=\"{NS_DRAWING}\" xmlns:r=\"{NS_RELATIONSHIPS}\" xmlns:p=\"{NS_PRESENTATION}\" type=\"blank\" preserve=\"1\">\
         <p:cSld name=\"Blank\"><p:spTree>{SHAPE_TREE_HEADER}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>"
    )
}

/// Theme part carrying the deck theme's colors and fonts.
fn theme_xml(doc: &Document) -> Result<String> {
    let theme = &doc.theme;
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<a:theme xmlns:a="{}" name="{}">"#,
        NS_DRAWING,
        escape(theme.name)
    )
    .map_err(xml_err)?;
    xml.push_str("<a:themeElements>");

    write!(xml, r#"<a:clrScheme name="{}">"#, escape(theme.name)).map_err(xml_err)?;
    let scheme = [
        ("dk1", theme.text),
        ("lt1", theme.bg),
        ("dk2", theme.title),
        ("lt2", "FFFFFF"),
        ("accent1", theme.accent),
        ("accent2", theme.title),
        ("accent3", theme.text),
        ("accent4", "95A5A6"),
        ("accent5", "27AE60"),
        ("accent6", "E67E22"),
        ("hlink", theme.accent),
        ("folHlink", theme.title),
    ];
    for (slot, color) in scheme {
        write!(
            xml,
            r#"<a:{slot}><a:srgbClr val="{}"/></a:{slot}>"#,
            color.to_ascii_uppercase()
        )
        .map_err(xml_err)?;
    }
    xml.push_str("</a:clrScheme>");

    write!(xml, r#"<a:fontScheme name="{}">"#, escape(theme.name)).map_err(xml_err)?;
    for (tag, face) in [("majorFont", theme.fonts.title), ("minorFont", theme.fonts.body)] {
        write!(
            xml,
            r#"<a:{tag}><a:latin typeface="{}"/><a:ea typeface=""/><a:cs typeface=""/></a:{tag}>"#,
            escape(face)
        )
        .map_err(xml_err)?;
    }
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [9525, 25400, 38100] {
        write!(
            xml,
            r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
            width
        )
        .map_err(xml_err)?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    Ok(xml)
}

fn slide_xml(slide: &DocumentSlide) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
    .map_err(xml_err)?;
    xml.push_str("<p:cSld>");
    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        slide.background.to_ascii_uppercase()
    )
    .map_err(xml_err)?;

    xml.push_str("<p:spTree>");
    xml.push_str(SHAPE_TREE_HEADER);
    for (index, text_box) in slide.boxes.iter().enumerate() {
        // Id 1 belongs to the group shape.
        text_box_xml(&mut xml, text_box, index + 2)?;
    }
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

fn text_box_xml(xml: &mut String, text_box: &TextBox, shape_id: usize) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
        shape_id,
        shape_id - 1
    )
    .map_err(xml_err)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

    xml.push_str("<p:spPr><a:xfrm>");
    write!(
        xml,
        r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
        emu(text_box.x),
        emu(text_box.y),
        emu(text_box.w),
        emu(text_box.h)
    )
    .map_err(xml_err)?;
    xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

    xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="t"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);
    write!(xml, r#"<a:p><a:pPr algn="{}"/><a:r>"#, text_box.align.as_ooxml()).map_err(xml_err)?;
    write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, text_box.size * 100).map_err(xml_err)?;
    if text_box.bold {
        xml.push_str(r#" b="1""#);
    }
    xml.push_str(r#" dirty="0">"#);
    write!(
        xml,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:latin typeface="{}"/>"#,
        text_box.color.to_ascii_uppercase(),
        escape(text_box.font)
    )
    .map_err(xml_err)?;
    xml.push_str("</a:rPr>");
    write!(xml, "<a:t>{}</a:t>", escape(text_box.text.as_str())).map_err(xml_err)?;
    xml.push_str("</a:r></a:p></p:txBody></p:sp>");
    Ok(())
}
