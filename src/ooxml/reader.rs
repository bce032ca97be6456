use std::fs;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::common::units::{HalfPoints, Twips};
use crate::common::RGBColor;
use crate::model::{
    Block, Cell, Document, DocumentProperties, NumberingDefinition, NumberingFormat,
    NumberingInfo, NumberingInstance, NumberingLevel, NumberingLevelOverride, Paragraph,
    ParagraphAlignment, ParagraphStyle, Row, Run, RunFormatting, Section, SectionProperties,
    SpacingRule, StyleDefinition, StyleType, Table, TableAlignment, TableProperties, WidthType,
};
use crate::{Error, Result};

/// Reads a `.docx` package into the [`crate::model`] representation. Missing
/// optional parts (`numbering.xml`, `styles.xml`) yield empty collections
/// rather than an error.
pub struct DocxReader;

pub trait DocumentParser {
    fn supported_extensions(&self) -> &'static [&'static str];
    fn can_parse(&self, path: &Path) -> bool;
    fn parse(&self, path: &Path) -> Result<Document>;
    /// Stream-based counterpart of [`DocumentParser::parse`]: reads the whole
    /// package from `reader` before parsing, since the zip central directory
    /// sits at the end of the archive and needs random access either way.
    /// `filename_hint` is accepted for parity with the path-based method's
    /// extension check; this reader only ever produces WordprocessingML.
    fn parse_reader(&self, reader: &mut dyn Read, filename_hint: &str) -> Result<Document>;
}

impl DocumentParser for DocxReader {
    fn supported_extensions(&self) -> &'static [&'static str] {
        &["docx"]
    }

    fn can_parse(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("docx")).unwrap_or(false)
    }

    fn parse(&self, path: &Path) -> Result<Document> {
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    fn parse_reader(&self, reader: &mut dyn Read, filename_hint: &str) -> Result<Document> {
        if !filename_hint.is_empty() && !self.can_parse(Path::new(filename_hint)) {
            return Err(Error::NotWordprocessingFile);
        }
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes)
    }
}

impl DocxReader {
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Document> {
        let archive = soapberry_zip::office::ArchiveReader::new(bytes)?;

        if !archive.contains("word/document.xml") {
            return Err(Error::NotWordprocessingFile);
        }

        let document_xml = archive.read_string("word/document.xml")?;
        let (section_blocks, section_properties) = parse_document_xml(&document_xml)?;

        let numbering_definitions;
        let numbering_instances;
        if archive.contains("word/numbering.xml") {
            let xml = archive.read_string("word/numbering.xml")?;
            let (defs, insts) = parse_numbering_xml(&xml)?;
            numbering_definitions = defs;
            numbering_instances = insts;
        } else {
            numbering_definitions = Vec::new();
            numbering_instances = Vec::new();
        }

        let styles = if archive.contains("word/styles.xml") {
            parse_styles_xml(&archive.read_string("word/styles.xml")?)?
        } else {
            Vec::new()
        };

        let properties = if archive.contains("docProps/core.xml") {
            parse_core_properties(&archive.read_string("docProps/core.xml")?)?
        } else {
            DocumentProperties::default()
        };

        Ok(Document {
            properties,
            sections: vec![Section {
                blocks: section_blocks,
                properties: section_properties,
                headers: Default::default(),
                footers: Default::default(),
            }],
            numbering_definitions,
            numbering_instances,
            styles,
        })
    }
}

fn attr_value(tag: &BytesStart, reader: &Reader<&[u8]>, local_name: &[u8]) -> Result<Option<String>> {
    for attr in tag.attributes().flatten() {
        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(attr.decode_and_unescape_value(reader.decoder())?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_document_xml(xml: &str) -> Result<(Vec<Block>, SectionProperties)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut blocks = Vec::new();
    let mut section_properties = SectionProperties::default();

    // Only the document body's direct children are top-level blocks; nested
    // table cells recurse through `parse_table`.
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"p" => {
                blocks.push(Block::Paragraph(parse_paragraph(&mut reader, e)?));
            },
            Event::Empty(ref e) if local(e.name().as_ref()) == b"p" => {
                blocks.push(Block::Paragraph(Paragraph::new()));
                let _ = e;
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"tbl" => {
                blocks.push(Block::Table(parse_table(&mut reader)?));
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"sectPr" => {
                section_properties = parse_section_properties(&mut reader)?;
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok((blocks, section_properties))
}

fn local(qname: &[u8]) -> &[u8] {
    match qname.iter().rposition(|&b| b == b':') {
        Some(idx) => &qname[idx + 1..],
        None => qname,
    }
}

fn parse_paragraph(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Paragraph> {
    let mut paragraph = Paragraph::new();
    if let Some(id) = attr_value(start, reader, b"id")? {
        paragraph.id = Some(id);
    }

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"pPr" => {
                let (style, numbering) = parse_paragraph_properties(reader)?;
                paragraph.style = style;
                paragraph.numbering = numbering;
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"r" => {
                paragraph.runs.push(parse_run(reader)?);
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"bookmarkStart" => {
                if let Some(id) = attr_value(e, reader, b"id")? {
                    paragraph.bookmark_starts.insert(id);
                }
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"bookmarkEnd" => {
                if let Some(id) = attr_value(e, reader, b"id")? {
                    paragraph.bookmark_ends.insert(id);
                }
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"p" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(paragraph)
}

fn parse_paragraph_properties(
    reader: &mut Reader<&[u8]>,
) -> Result<(ParagraphStyle, Option<NumberingInfo>)> {
    let mut style = ParagraphStyle::default();
    let mut numbering = None;
    let mut numbering_id: Option<u32> = None;
    let mut numbering_level: Option<u8> = None;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) => {
                match local(e.name().as_ref()) {
                    b"pStyle" => style.style_id = attr_value(e, reader, b"val")?,
                    b"jc" => {
                        style.alignment = match attr_value(e, reader, b"val")?.as_deref() {
                            Some("center") => ParagraphAlignment::Center,
                            Some("right") => ParagraphAlignment::Right,
                            Some("both") => ParagraphAlignment::Justify,
                            _ => ParagraphAlignment::Left,
                        };
                    },
                    b"ind" => {
                        if let Some(v) = attr_value(e, reader, b"left")? {
                            style.indent_left = Twips::new(v.parse().unwrap_or(0));
                        }
                        if let Some(v) = attr_value(e, reader, b"right")? {
                            style.indent_right = Twips::new(v.parse().unwrap_or(0));
                        }
                        if let Some(v) = attr_value(e, reader, b"hanging")? {
                            style.indent_first_line = Twips::new(-v.parse::<i32>().unwrap_or(0));
                        } else if let Some(v) = attr_value(e, reader, b"firstLine")? {
                            style.indent_first_line = Twips::new(v.parse().unwrap_or(0));
                        }
                    },
                    b"spacing" => {
                        if let Some(v) = attr_value(e, reader, b"before")? {
                            style.spacing_before = Twips::new(v.parse().unwrap_or(0));
                        }
                        if let Some(v) = attr_value(e, reader, b"after")? {
                            style.spacing_after = Twips::new(v.parse().unwrap_or(0));
                        }
                        if let Some(v) = attr_value(e, reader, b"line")? {
                            style.spacing_line = Twips::new(v.parse().unwrap_or(0));
                        }
                        style.spacing_rule = match attr_value(e, reader, b"lineRule")?.as_deref() {
                            Some("exact") => SpacingRule::Exact,
                            Some("atLeast") => SpacingRule::AtLeast,
                            _ => SpacingRule::Auto,
                        };
                    },
                    b"keepNext" => style.keep_with_next = true,
                    b"keepLines" => style.keep_lines_together = true,
                    b"pageBreakBefore" => style.page_break_before = true,
                    b"outlineLvl" => {
                        style.outline_level = attr_value(e, reader, b"val")?.and_then(|v| v.parse().ok());
                    },
                    b"ilvl" => {
                        numbering_level = attr_value(e, reader, b"val")?.and_then(|v| v.parse().ok());
                    },
                    b"numId" => {
                        numbering_id = attr_value(e, reader, b"val")?.and_then(|v| v.parse().ok());
                    },
                    _ => {},
                }
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"pPr" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    if let Some(instance_id) = numbering_id {
        numbering = Some(NumberingInfo { instance_id, level: numbering_level.unwrap_or(0) });
    }

    Ok((style, numbering))
}

fn parse_run(reader: &mut Reader<&[u8]>) -> Result<Run> {
    let mut formatting = RunFormatting::default();
    let mut text = String::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"rPr" => {
                formatting = parse_run_formatting(reader)?;
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"t" => {
                if let Event::Text(t) = reader.read_event_into(&mut Vec::new())? {
                    text.push_str(&t.unescape()?);
                }
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"r" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(Run { text, formatting })
}

fn parse_run_formatting(reader: &mut Reader<&[u8]>) -> Result<RunFormatting> {
    let mut formatting = RunFormatting::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) => match local(e.name().as_ref()) {
                b"b" => formatting.bold = is_on(e, reader)?,
                b"i" => formatting.italic = is_on(e, reader)?,
                b"u" => formatting.underline = attr_value(e, reader, b"val")?.map(|v| v != "none").unwrap_or(true),
                b"strike" => formatting.strikethrough = is_on(e, reader)?,
                b"vertAlign" => match attr_value(e, reader, b"val")?.as_deref() {
                    Some("superscript") => formatting.superscript = true,
                    Some("subscript") => formatting.subscript = true,
                    _ => {},
                },
                b"rFonts" => formatting.font_family = attr_value(e, reader, b"ascii")?,
                b"sz" => {
                    formatting.font_size =
                        attr_value(e, reader, b"val")?.and_then(|v| v.parse().ok()).map(HalfPoints);
                },
                b"color" => {
                    if let Some(v) = attr_value(e, reader, b"val")? {
                        formatting.color = RGBColor::from_hex(&v).ok();
                    }
                },
                b"highlight" => {
                    if let Some(v) = attr_value(e, reader, b"val")? {
                        formatting.highlight_color = RGBColor::from_name(&v).ok();
                    }
                },
                b"rStyle" => formatting.style_id = attr_value(e, reader, b"val")?,
                _ => {},
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"rPr" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(formatting)
}

fn is_on(tag: &BytesStart, reader: &Reader<&[u8]>) -> Result<bool> {
    Ok(attr_value(tag, reader, b"val")?.map(|v| v != "false" && v != "0").unwrap_or(true))
}

fn parse_table(reader: &mut Reader<&[u8]>) -> Result<Table> {
    let mut table = Table::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"tblPr" => {
                table.properties = Some(parse_table_properties(reader)?);
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"tr" => {
                table.rows.push(parse_table_row(reader)?);
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"tbl" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(table)
}

fn parse_table_properties(reader: &mut Reader<&[u8]>) -> Result<TableProperties> {
    let mut props = TableProperties::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) => match local(e.name().as_ref()) {
                b"tblW" => {
                    props.width = attr_value(e, reader, b"w")?.and_then(|v| v.parse().ok());
                    props.width_type = match attr_value(e, reader, b"type")?.as_deref() {
                        Some("dxa") => WidthType::Dxa,
                        Some("pct") => WidthType::Pct,
                        _ => WidthType::Auto,
                    };
                },
                b"jc" => {
                    props.alignment = match attr_value(e, reader, b"val")?.as_deref() {
                        Some("center") => TableAlignment::Center,
                        Some("right") => TableAlignment::Right,
                        _ => TableAlignment::Left,
                    };
                },
                _ => {},
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"tblPr" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(props)
}

fn parse_table_row(reader: &mut Reader<&[u8]>) -> Result<Row> {
    let mut row = Row::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"tc" => {
                row.cells.push(parse_table_cell(reader)?);
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"tr" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(row)
}

fn parse_table_cell(reader: &mut Reader<&[u8]>) -> Result<Cell> {
    let mut cell = Cell::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"p" => {
                cell.blocks.push(Block::Paragraph(parse_paragraph(reader, e)?));
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"tbl" => {
                cell.blocks.push(Block::Table(parse_table(reader)?));
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"tc" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(cell.with_placeholder_if_empty())
}

fn parse_section_properties(reader: &mut Reader<&[u8]>) -> Result<SectionProperties> {
    let mut props = SectionProperties::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) => match local(e.name().as_ref()) {
                b"pgSz" => {
                    if let Some(v) = attr_value(e, reader, b"w")? {
                        props.page_width = Twips::new(v.parse().unwrap_or(12240));
                    }
                    if let Some(v) = attr_value(e, reader, b"h")? {
                        props.page_height = Twips::new(v.parse().unwrap_or(15840));
                    }
                    props.orientation = match attr_value(e, reader, b"orient")?.as_deref() {
                        Some("landscape") => crate::model::PageOrientation::Landscape,
                        _ => crate::model::PageOrientation::Portrait,
                    };
                },
                b"pgMar" => {
                    for (name, field) in [
                        (b"top".as_slice(), &mut props.margin_top),
                        (b"bottom", &mut props.margin_bottom),
                        (b"left", &mut props.margin_left),
                        (b"right", &mut props.margin_right),
                        (b"header", &mut props.header_distance),
                        (b"footer", &mut props.footer_distance),
                    ] {
                        if let Some(v) = attr_value(e, reader, name)? {
                            *field = Twips::new(v.parse().unwrap_or(0));
                        }
                    }
                },
                b"type" => {
                    props.break_type = match attr_value(e, reader, b"val")?.as_deref() {
                        Some("continuous") => crate::model::SectionBreakType::Continuous,
                        Some("evenPage") => crate::model::SectionBreakType::EvenPage,
                        Some("oddPage") => crate::model::SectionBreakType::OddPage,
                        _ => crate::model::SectionBreakType::NextPage,
                    };
                },
                b"titlePg" => props.different_first_page = true,
                _ => {},
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"sectPr" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(props)
}

fn parse_numbering_xml(xml: &str) -> Result<(Vec<NumberingDefinition>, Vec<NumberingInstance>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut definitions = Vec::new();
    let mut instances = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"abstractNum" => {
                definitions.push(parse_abstract_num(&mut reader, e)?);
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"num" => {
                instances.push(parse_num(&mut reader, e)?);
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok((definitions, instances))
}

fn parse_abstract_num(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<NumberingDefinition> {
    let id: u32 = attr_value(start, reader, b"abstractNumId")?.and_then(|v| v.parse().ok()).unwrap_or(0);
    let mut definition = NumberingDefinition { id, name: None, multi_level: false, levels: Vec::new() };

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"lvl" => {
                definition.levels.push(parse_numbering_level(reader, e)?);
            },
            Event::Empty(ref e) if local(e.name().as_ref()) == b"name" => {
                definition.name = attr_value(e, reader, b"val")?;
            },
            Event::Empty(ref e) if local(e.name().as_ref()) == b"multiLevelType" => {
                definition.multi_level = attr_value(e, reader, b"val")?.as_deref() != Some("singleLevel");
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"abstractNum" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(definition)
}

fn parse_numbering_level(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<NumberingLevel> {
    let level_index: u8 = attr_value(start, reader, b"ilvl")?.and_then(|v| v.parse().ok()).unwrap_or(0);
    let mut level = NumberingLevel::new(level_index);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) => match local(e.name().as_ref()) {
                b"start" => level.start = attr_value(e, reader, b"val")?.and_then(|v| v.parse().ok()).unwrap_or(1),
                b"numFmt" => {
                    level.format = NumberingFormat::from_ooxml(attr_value(e, reader, b"val")?.as_deref().unwrap_or(""));
                },
                b"lvlText" => {
                    level.text_pattern = attr_value(e, reader, b"val")?.unwrap_or_default();
                },
                b"ind" => {
                    if let Some(v) = attr_value(e, reader, b"left")? {
                        level.indent = v.parse().ok().map(Twips::new);
                    }
                    if let Some(v) = attr_value(e, reader, b"hanging")? {
                        level.hanging_indent = v.parse().ok().map(Twips::new);
                    }
                },
                b"jc" => {
                    level.alignment = match attr_value(e, reader, b"val")?.as_deref() {
                        Some("center") => ParagraphAlignment::Center,
                        Some("right") => ParagraphAlignment::Right,
                        _ => ParagraphAlignment::Left,
                    };
                },
                b"rFonts" => level.font = attr_value(e, reader, b"ascii")?,
                _ => {},
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"lvl" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(level)
}

fn parse_num(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<NumberingInstance> {
    let id: u32 = attr_value(start, reader, b"numId")?.and_then(|v| v.parse().ok()).unwrap_or(0);
    let mut definition_id = 0;
    let mut overrides = std::collections::BTreeMap::new();

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) if local(e.name().as_ref()) == b"abstractNumId" => {
                definition_id = attr_value(e, reader, b"val")?.and_then(|v| v.parse().ok()).unwrap_or(0);
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"lvlOverride" => {
                let level: u8 = attr_value(e, reader, b"ilvl")?.and_then(|v| v.parse().ok()).unwrap_or(0);
                let mut over = NumberingLevelOverride { level, ..Default::default() };
                let mut inner = Vec::new();
                loop {
                    match reader.read_event_into(&mut inner)? {
                        Event::Empty(ref f) if local(f.name().as_ref()) == b"startOverride" => {
                            over.start_override = attr_value(f, reader, b"val")?.and_then(|v| v.parse().ok());
                        },
                        Event::Start(ref f) if local(f.name().as_ref()) == b"lvl" => {
                            over.level_override = Some(parse_numbering_level(reader, f)?);
                        },
                        Event::End(ref f) if local(f.name().as_ref()) == b"lvlOverride" => break,
                        Event::Eof => break,
                        _ => {},
                    }
                    inner.clear();
                }
                overrides.insert(level, over);
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"num" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(NumberingInstance { id, definition_id, overrides })
}

fn parse_styles_xml(xml: &str) -> Result<Vec<StyleDefinition>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut styles = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if local(e.name().as_ref()) == b"style" => {
                styles.push(parse_style(&mut reader, e)?);
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(styles)
}

fn parse_style(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<StyleDefinition> {
    let id = attr_value(start, reader, b"styleId")?.unwrap_or_default();
    let style_type = match attr_value(start, reader, b"type")?.as_deref() {
        Some("character") => StyleType::Character,
        Some("table") => StyleType::Table,
        Some("numbering") => StyleType::Numbering,
        _ => StyleType::Paragraph,
    };

    let mut style = StyleDefinition {
        id,
        name: None,
        style_type,
        based_on: None,
        next_style: None,
        paragraph_style: None,
        run_formatting: None,
    };

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) if local(e.name().as_ref()) == b"name" => {
                style.name = attr_value(e, reader, b"val")?;
            },
            Event::Empty(ref e) if local(e.name().as_ref()) == b"basedOn" => {
                style.based_on = attr_value(e, reader, b"val")?;
            },
            Event::Empty(ref e) if local(e.name().as_ref()) == b"next" => {
                style.next_style = attr_value(e, reader, b"val")?;
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"pPr" => {
                let (pstyle, _) = parse_paragraph_properties(reader)?;
                style.paragraph_style = Some(pstyle);
            },
            Event::Start(ref e) if local(e.name().as_ref()) == b"rPr" => {
                style.run_formatting = Some(parse_run_formatting(reader)?);
            },
            Event::End(ref e) if local(e.name().as_ref()) == b"style" => break,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(style)
}

fn parse_core_properties(xml: &str) -> Result<DocumentProperties> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut props = DocumentProperties::default();
    let mut buf = Vec::new();
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => current = Some(local(e.name().as_ref()).to_vec()),
            Event::Text(t) => {
                if let Some(name) = &current {
                    let value = t.unescape()?.into_owned();
                    match name.as_slice() {
                        b"title" => props.title = Some(value),
                        b"subject" => props.subject = Some(value),
                        b"creator" => props.creator = Some(value),
                        b"description" => props.description = Some(value),
                        b"keywords" => props.keywords = Some(value),
                        b"lastModifiedBy" => props.last_modified_by = Some(value),
                        b"created" => props.created = value.parse().ok(),
                        b"modified" => props.modified = value.parse().ok(),
                        _ => {},
                    }
                }
            },
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(props)
}
