use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::document::Document;
use crate::error::PatchError;

/// Terminator used when the original file had nothing after the region.
const MIN_FOOTER: &str = ";";

/// `header + pretty(elements) + footer`, two-space indent, source key order.
pub fn render(doc: &Document) -> Result<String, PatchError> {
    let body = serde_json::to_string_pretty(&Value::Object(doc.elements.clone()))?;
    let footer = if doc.footer.trim().is_empty() {
        MIN_FOOTER
    } else {
        doc.footer.as_str()
    };
    Ok(format!("{}{}{}", doc.header, body, footer))
}

/// Overwrite `path` in place. No backup is kept.
pub fn write(doc: &Document, path: &Path) -> Result<usize, PatchError> {
    let content = render(doc)?;
    fs::write(path, &content)?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse, Anchor};

    #[test]
    fn preserves_header_and_footer() {
        let text = std::fs::read_to_string("tests/fixtures/scientific_data.ts").unwrap();
        let doc = parse(&text, &Anchor::Braces).unwrap();
        let out = render(&doc).unwrap();
        assert!(out.starts_with(&doc.header));
        assert!(out.ends_with("} as const;\n\nexport type ScientificData = typeof SCIENTIFIC_DATA;\n"));
        assert!(out.contains("\n  \"H\": {\n    \"mass\": 1.008,"));
        // trailing commas are gone after a round trip
        assert!(!out.contains(",\n  }"));
    }

    #[test]
    fn empty_footer_gets_terminator() {
        let doc = parse("export const D = {\"Fe\": {\"mass\": 55.845}}\n", &Anchor::Braces).unwrap();
        let out = render(&doc).unwrap();
        assert!(out.ends_with("\n};"));
    }

    #[test]
    fn keeps_source_key_order_and_unicode() {
        let doc = parse("x = {\"Zn\": {\"b\": 1, \"a\": \"±\"}, \"Ag\": {}}", &Anchor::Braces).unwrap();
        let out = render(&doc).unwrap();
        let zn = out.find("\"Zn\"").unwrap();
        let ag = out.find("\"Ag\"").unwrap();
        assert!(zn < ag);
        assert!(out.find("\"b\"").unwrap() < out.find("\"a\"").unwrap());
        assert!(out.contains('±'));
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.ts");
        let doc = parse("x = {\"Fe\": {}} as const;", &Anchor::Braces).unwrap();
        let written = write(&doc, &path).unwrap();
        let back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(back.len(), written);
        assert_eq!(back, "x = {\n  \"Fe\": {}\n} as const;");
    }
}
