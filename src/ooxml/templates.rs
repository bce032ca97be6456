//! Structural OOXML parts that never vary with document content, embedded
//! as minified string constants at compile time.

pub const CONTENT_TYPES: &str = xml_minifier::minified_xml!("templates/content_types.xml");
pub const ROOT_RELS: &str = xml_minifier::minified_xml!("templates/root_rels.xml");
pub const DOCUMENT_RELS: &str = xml_minifier::minified_xml!("templates/document_rels.xml");
