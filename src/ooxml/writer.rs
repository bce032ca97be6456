use std::fmt::Write as _;
use std::fs;
use std::io::Write as IoWrite;
use std::path::Path;

use crate::common::xml::escape_xml;
use crate::model::{
    Block, Cell, Document, NumberingDefinition, NumberingInstance, Paragraph, ParagraphAlignment,
    ParagraphStyle, Row, Run, RunFormatting, Section, SpacingRule, StyleType, Table,
    TableAlignment, WidthType,
};
use crate::ooxml::templates;
use crate::Result;

/// Writes the [`crate::model`] representation out as a `.docx` package.
/// Mirrors the teacher's string-builder `to_xml` writer idiom, re-targeted
/// at the owned model instead of the teacher's borrowed writer types.
pub struct DocxWriter;

pub trait DocumentGenerator {
    fn output_format(&self) -> &'static str;
    fn generate(&self, document: &Document, path: &Path) -> Result<()>;
    /// Stream-based counterpart of [`DocumentGenerator::generate`]: the whole
    /// package is built in memory first, since `soapberry_zip`'s writer needs
    /// to seek back and patch the central directory, then copied out to
    /// `writer` in one write.
    fn generate_writer(&self, document: &Document, writer: &mut dyn IoWrite) -> Result<()>;
}

impl DocumentGenerator for DocxWriter {
    fn output_format(&self) -> &'static str {
        "docx"
    }

    fn generate(&self, document: &Document, path: &Path) -> Result<()> {
        let bytes = self.generate_bytes(document)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn generate_writer(&self, document: &Document, writer: &mut dyn IoWrite) -> Result<()> {
        let bytes = self.generate_bytes(document)?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

impl DocxWriter {
    pub fn generate_bytes(&self, document: &Document) -> Result<Vec<u8>> {
        let mut writer = soapberry_zip::office::StreamingArchiveWriter::new();

        writer.write_deflated("[Content_Types].xml", templates::CONTENT_TYPES.as_bytes())?;
        writer.write_deflated("_rels/.rels", templates::ROOT_RELS.as_bytes())?;
        writer.write_deflated("word/_rels/document.xml.rels", templates::DOCUMENT_RELS.as_bytes())?;
        writer.write_deflated("word/document.xml", document_xml(document)?.as_bytes())?;
        writer.write_deflated("word/numbering.xml", numbering_xml(document)?.as_bytes())?;
        writer.write_deflated("word/styles.xml", styles_xml(document)?.as_bytes())?;
        writer.write_deflated("docProps/core.xml", core_properties_xml(document)?.as_bytes())?;
        writer.write_deflated("docProps/app.xml", app_properties_xml(document)?.as_bytes())?;

        writer.finish_to_bytes().map_err(Into::into)
    }
}

fn document_xml(document: &Document) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    let last = document.sections.len().saturating_sub(1);
    for (i, section) in document.sections.iter().enumerate() {
        for block in &section.blocks {
            write_block(&mut xml, block)?;
        }
        if i == last {
            // The final section's properties sit directly under <w:body>.
            write_section_properties(&mut xml, section)?;
        } else {
            // Every other section's properties are carried by a trailing,
            // otherwise-empty paragraph — the OOXML convention for
            // mid-document section breaks.
            xml.push_str("<w:p><w:pPr>");
            write_section_properties(&mut xml, section)?;
            xml.push_str("</w:pPr></w:p>");
        }
    }

    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

fn write_block(xml: &mut String, block: &Block) -> Result<()> {
    match block {
        Block::Paragraph(p) => write_paragraph(xml, p),
        Block::Table(t) => write_table(xml, t),
    }
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    xml.push_str("<w:p>");
    write_paragraph_properties(xml, &paragraph.style, paragraph.numbering)?;
    for id in &paragraph.bookmark_starts {
        write!(xml, r#"<w:bookmarkStart w:id="{id}" w:name="_{id}"/>"#)?;
    }
    for run in &paragraph.runs {
        write_run(xml, run)?;
    }
    for id in &paragraph.bookmark_ends {
        write!(xml, r#"<w:bookmarkEnd w:id="{id}"/>"#)?;
    }
    xml.push_str("</w:p>");
    Ok(())
}

fn write_paragraph_properties(
    xml: &mut String,
    style: &ParagraphStyle,
    numbering: Option<crate::model::NumberingInfo>,
) -> Result<()> {
    let mut inner = String::new();
    if let Some(id) = &style.style_id {
        write!(inner, r#"<w:pStyle w:val="{}"/>"#, escape_xml(id))?;
    }
    if let Some(info) = numbering {
        write!(
            inner,
            r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
            info.level, info.instance_id
        )?;
    }
    let jc = match style.alignment {
        ParagraphAlignment::Left => None,
        ParagraphAlignment::Center => Some("center"),
        ParagraphAlignment::Right => Some("right"),
        ParagraphAlignment::Justify => Some("both"),
    };
    if let Some(jc) = jc {
        write!(inner, r#"<w:jc w:val="{jc}"/>"#)?;
    }
    if style.indent_left.value() != 0 || style.indent_right.value() != 0 || style.indent_first_line.value() != 0 {
        inner.push_str("<w:ind");
        if style.indent_left.value() != 0 {
            write!(inner, r#" w:left="{}""#, style.indent_left.value())?;
        }
        if style.indent_right.value() != 0 {
            write!(inner, r#" w:right="{}""#, style.indent_right.value())?;
        }
        if style.indent_first_line.value() < 0 {
            write!(inner, r#" w:hanging="{}""#, -style.indent_first_line.value())?;
        } else if style.indent_first_line.value() > 0 {
            write!(inner, r#" w:firstLine="{}""#, style.indent_first_line.value())?;
        }
        inner.push_str("/>");
    }
    if style.spacing_before.value() != 0 || style.spacing_after.value() != 0 || style.spacing_line.value() != 0 {
        let rule = match style.spacing_rule {
            SpacingRule::Auto => "auto",
            SpacingRule::Exact => "exact",
            SpacingRule::AtLeast => "atLeast",
        };
        write!(
            inner,
            r#"<w:spacing w:before="{}" w:after="{}" w:line="{}" w:lineRule="{rule}"/>"#,
            style.spacing_before.value(),
            style.spacing_after.value(),
            style.spacing_line.value()
        )?;
    }
    if style.keep_with_next {
        inner.push_str("<w:keepNext/>");
    }
    if style.keep_lines_together {
        inner.push_str("<w:keepLines/>");
    }
    if style.page_break_before {
        inner.push_str("<w:pageBreakBefore/>");
    }
    if let Some(level) = style.outline_level {
        write!(inner, r#"<w:outlineLvl w:val="{level}"/>"#)?;
    }

    if !inner.is_empty() {
        write!(xml, "<w:pPr>{inner}</w:pPr>")?;
    }
    Ok(())
}

fn write_run(xml: &mut String, run: &Run) -> Result<()> {
    xml.push_str("<w:r>");
    write_run_formatting(xml, &run.formatting)?;
    write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(&run.text))?;
    xml.push_str("</w:r>");
    Ok(())
}

fn write_run_formatting(xml: &mut String, formatting: &RunFormatting) -> Result<()> {
    let mut inner = String::new();
    if let Some(style_id) = &formatting.style_id {
        write!(inner, r#"<w:rStyle w:val="{}"/>"#, escape_xml(style_id))?;
    }
    if let Some(font) = &formatting.font_family {
        write!(inner, r#"<w:rFonts w:ascii="{}"/>"#, escape_xml(font))?;
    }
    if formatting.bold {
        inner.push_str("<w:b/>");
    }
    if formatting.italic {
        inner.push_str("<w:i/>");
    }
    if formatting.strikethrough {
        inner.push_str("<w:strike/>");
    }
    if formatting.underline {
        inner.push_str(r#"<w:u w:val="single"/>"#);
    }
    if formatting.superscript {
        inner.push_str(r#"<w:vertAlign w:val="superscript"/>"#);
    }
    if formatting.subscript {
        inner.push_str(r#"<w:vertAlign w:val="subscript"/>"#);
    }
    if let Some(color) = formatting.color {
        write!(inner, r#"<w:color w:val="{}"/>"#, color.to_hex())?;
    }
    if let Some(size) = formatting.font_size {
        write!(inner, r#"<w:sz w:val="{}"/>"#, size.0)?;
    }
    if let Some(highlight) = formatting.highlight_color {
        write!(inner, r#"<w:highlight w:val="{}"/>"#, highlight.to_hex())?;
    }

    if !inner.is_empty() {
        write!(xml, "<w:rPr>{inner}</w:rPr>")?;
    }
    Ok(())
}

fn write_table(xml: &mut String, table: &Table) -> Result<()> {
    xml.push_str("<w:tbl>");
    if let Some(props) = &table.properties {
        xml.push_str("<w:tblPr>");
        if let Some(width) = props.width {
            let type_attr = match props.width_type {
                WidthType::Auto => "auto",
                WidthType::Dxa => "dxa",
                WidthType::Pct => "pct",
            };
            write!(xml, r#"<w:tblW w:w="{width}" w:type="{type_attr}"/>"#)?;
        }
        let jc = match props.alignment {
            TableAlignment::Left => "left",
            TableAlignment::Center => "center",
            TableAlignment::Right => "right",
        };
        write!(xml, r#"<w:jc w:val="{jc}"/>"#)?;
        xml.push_str("</w:tblPr>");
    }
    for row in &table.rows {
        write_row(xml, row)?;
    }
    xml.push_str("</w:tbl>");
    Ok(())
}

fn write_row(xml: &mut String, row: &Row) -> Result<()> {
    xml.push_str("<w:tr>");
    for cell in &row.cells {
        write_cell(xml, cell)?;
    }
    xml.push_str("</w:tr>");
    Ok(())
}

fn write_cell(xml: &mut String, cell: &Cell) -> Result<()> {
    xml.push_str("<w:tc>");
    let blocks = cell.clone().with_placeholder_if_empty().blocks;
    for block in &blocks {
        write_block(xml, block)?;
    }
    xml.push_str("</w:tc>");
    Ok(())
}

fn write_section_properties(xml: &mut String, section: &Section) -> Result<()> {
    let props = &section.properties;
    let orient = match props.orientation {
        crate::model::PageOrientation::Portrait => "portrait",
        crate::model::PageOrientation::Landscape => "landscape",
    };
    let break_type = match props.break_type {
        crate::model::SectionBreakType::Continuous => "continuous",
        crate::model::SectionBreakType::NextPage => "nextPage",
        crate::model::SectionBreakType::EvenPage => "evenPage",
        crate::model::SectionBreakType::OddPage => "oddPage",
    };

    write!(
        xml,
        concat!(
            "<w:sectPr>",
            r#"<w:type w:val="{break_type}"/>"#,
            r#"<w:pgSz w:w="{pw}" w:h="{ph}" w:orient="{orient}"/>"#,
            r#"<w:pgMar w:top="{mt}" w:bottom="{mb}" w:left="{ml}" w:right="{mr}" w:header="{hd}" w:footer="{fd}"/>"#,
        ),
        break_type = break_type,
        pw = props.page_width.value(),
        ph = props.page_height.value(),
        orient = orient,
        mt = props.margin_top.value(),
        mb = props.margin_bottom.value(),
        ml = props.margin_left.value(),
        mr = props.margin_right.value(),
        hd = props.header_distance.value(),
        fd = props.footer_distance.value(),
    )?;
    if props.different_first_page {
        xml.push_str("<w:titlePg/>");
    }
    xml.push_str("</w:sectPr>");
    Ok(())
}

fn numbering_xml(document: &Document) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#);

    for def in &document.numbering_definitions {
        write_abstract_num(&mut xml, def)?;
    }
    for instance in &document.numbering_instances {
        write_num(&mut xml, instance)?;
    }

    xml.push_str("</w:numbering>");
    Ok(xml)
}

fn write_abstract_num(xml: &mut String, def: &NumberingDefinition) -> Result<()> {
    write!(xml, r#"<w:abstractNum w:abstractNumId="{}">"#, def.id)?;
    if let Some(name) = &def.name {
        write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(name))?;
    }
    for level in &def.levels {
        write!(
            xml,
            r#"<w:lvl w:ilvl="{}"><w:start w:val="{}"/><w:numFmt w:val="{}"/><w:lvlText w:val="{}"/><w:jc w:val="{}"/></w:lvl>"#,
            level.level,
            level.start,
            level.format.as_ooxml(),
            escape_xml(&level.text_pattern),
            alignment_ooxml(level.alignment),
        )?;
    }
    xml.push_str("</w:abstractNum>");
    Ok(())
}

fn write_num(xml: &mut String, instance: &NumberingInstance) -> Result<()> {
    write!(
        xml,
        r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/>"#,
        instance.id, instance.definition_id
    )?;
    for over in instance.overrides.values() {
        write!(xml, r#"<w:lvlOverride w:ilvl="{}">"#, over.level)?;
        if let Some(start) = over.start_override {
            write!(xml, r#"<w:startOverride w:val="{start}"/>"#)?;
        }
        xml.push_str("</w:lvlOverride>");
    }
    xml.push_str("</w:num>");
    Ok(())
}

fn alignment_ooxml(alignment: ParagraphAlignment) -> &'static str {
    match alignment {
        ParagraphAlignment::Left => "left",
        ParagraphAlignment::Center => "center",
        ParagraphAlignment::Right => "right",
        ParagraphAlignment::Justify => "both",
    }
}

fn styles_xml(document: &Document) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#);

    for style in &document.styles {
        let type_attr = match style.style_type {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
            StyleType::Numbering => "numbering",
        };
        write!(xml, r#"<w:style w:type="{type_attr}" w:styleId="{}">"#, escape_xml(&style.id))?;
        if let Some(name) = &style.name {
            write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(name))?;
        }
        if let Some(based_on) = &style.based_on {
            write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on))?;
        }
        if let Some(next) = &style.next_style {
            write!(xml, r#"<w:next w:val="{}"/>"#, escape_xml(next))?;
        }
        if let Some(pstyle) = &style.paragraph_style {
            write_paragraph_properties(&mut xml, pstyle, None)?;
        }
        if let Some(formatting) = &style.run_formatting {
            write_run_formatting(&mut xml, formatting)?;
        }
        xml.push_str("</w:style>");
    }

    xml.push_str("</w:styles>");
    Ok(xml)
}

fn core_properties_xml(document: &Document) -> Result<String> {
    let props = &document.properties;
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    if let Some(v) = &props.title {
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(v))?;
    }
    if let Some(v) = &props.subject {
        write!(xml, "<dc:subject>{}</dc:subject>", escape_xml(v))?;
    }
    if let Some(v) = &props.creator {
        write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(v))?;
    }
    if let Some(v) = &props.description {
        write!(xml, "<dc:description>{}</dc:description>", escape_xml(v))?;
    }
    if let Some(v) = &props.keywords {
        write!(xml, "<cp:keywords>{}</cp:keywords>", escape_xml(v))?;
    }
    if let Some(v) = &props.last_modified_by {
        write!(xml, "<cp:lastModifiedBy>{}</cp:lastModifiedBy>", escape_xml(v))?;
    }
    if let Some(v) = props.created {
        write!(xml, r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#, v.to_rfc3339())?;
    }
    if let Some(v) = props.modified {
        write!(xml, r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#, v.to_rfc3339())?;
    }
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// `docProps/app.xml`, the extended-properties part `templates::CONTENT_TYPES`
/// and `templates::ROOT_RELS` both declare. Paragraph/word counts are
/// best-effort, recomputed from the document rather than carried from a
/// source file we never parsed.
fn app_properties_xml(document: &Document) -> Result<String> {
    let paragraphs = document.paragraphs_flat();
    let paragraph_count = paragraphs.len();
    let word_count: usize = paragraphs.iter().map(|p| crate::text::tokenize_words(&p.plain_text()).len()).sum();

    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
    );
    xml.push_str("<Application>redline-docx</Application>");
    write!(xml, "<Paragraphs>{paragraph_count}</Paragraphs>")?;
    write!(xml, "<Words>{word_count}</Words>")?;
    xml.push_str("</Properties>");
    Ok(xml)
}
