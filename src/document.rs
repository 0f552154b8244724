//! Loads the structured region embedded in a source-level constant.
//!
//! The region is parsed; the surrounding text is carried verbatim so the
//! writer can put it back unchanged.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PatchError;

static TRAILING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\s*[\]}])").unwrap());

/// Element records in source order.
pub type ElementMap = Map<String, Value>;

/// Where the structured region sits in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// First `{` through last `}`.
    Braces,
    /// Object literal of `export const <NAME> ... = { ... } as const`.
    Constant(String),
}

impl Anchor {
    pub fn from_option(name: Option<&str>) -> Self {
        match name {
            Some(n) if !n.trim().is_empty() => Anchor::Constant(n.trim().to_string()),
            _ => Anchor::Braces,
        }
    }

    /// Byte span `[start, end)` of the region inside `text`.
    fn locate(&self, text: &str) -> Result<(usize, usize), PatchError> {
        match self {
            Anchor::Braces => {
                let start = text.find('{');
                let end = text.rfind('}').map(|i| i + 1);
                match (start, end) {
                    (Some(s), Some(e)) if e > s => Ok((s, e)),
                    _ => Err(PatchError::RegionNotFound("no brace-delimited object".to_string())),
                }
            }
            Anchor::Constant(name) => {
                let pattern = format!(
                    r"(?s)export\s+const\s+{}\b[^=]*=\s*(\{{.*\}})\s*as\s+const",
                    regex::escape(name)
                );
                let re = Regex::new(&pattern).map_err(|e| PatchError::RegionNotFound(e.to_string()))?;
                let group = re
                    .captures(text)
                    .and_then(|c| c.get(1))
                    .ok_or_else(|| PatchError::RegionNotFound(format!("constant {name} not found")))?;
                Ok((group.start(), group.end()))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub header: String,
    pub elements: ElementMap,
    pub footer: String,
}

impl Document {
    pub fn symbols(&self) -> Vec<String> {
        self.elements.keys().cloned().collect()
    }
}

/// Read and parse the target file. Nothing is written on any failure.
pub fn load(path: &Path, anchor: &Anchor) -> Result<Document, PatchError> {
    if !path.exists() {
        return Err(PatchError::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    parse(&text, anchor)
}

pub fn parse(text: &str, anchor: &Anchor) -> Result<Document, PatchError> {
    let (start, end) = anchor.locate(text)?;
    let region = &text[start..end];
    check_balance(region)?;

    let repaired = repair_trailing_commas(region);
    let parsed: Value = serde_json::from_str(&repaired)?;
    let Value::Object(elements) = parsed else {
        return Err(PatchError::Malformed("region is not an object".to_string()));
    };
    debug!(elements = elements.len(), start, end, "structured region parsed");

    Ok(Document {
        header: text[..start].to_string(),
        elements,
        footer: text[end..].to_string(),
    })
}

/// Drop commas that sit right before a closing brace or bracket.
pub fn repair_trailing_commas(region: &str) -> String {
    TRAILING_COMMA_RE.replace_all(region, "$1").into_owned()
}

/// Count braces and brackets outside string literals.
fn check_balance(region: &str) -> Result<(), PatchError> {
    let mut depth: i64 = 0;
    let mut open = 0;
    let mut close = 0;
    let mut in_string = false;
    let mut escaped = false;

    for c in region.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => {
                open += 1;
                depth += 1;
            }
            '}' | ']' => {
                close += 1;
                depth -= 1;
                if depth < 0 {
                    return Err(PatchError::Unbalanced { open, close });
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(PatchError::Unbalanced { open, close });
    }
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
    }

    #[test]
    fn splits_header_region_footer() {
        let text = fixture("scientific_data.ts");
        let doc = parse(&text, &Anchor::Braces).unwrap();
        assert!(doc.header.starts_with("// Generated"));
        assert!(doc.header.ends_with("SCIENTIFIC_DATA = "));
        assert!(doc.footer.starts_with(" as const;"));
        assert_eq!(doc.symbols(), vec!["H", "He", "N", "Fe", "Hg", "Og"]);
    }

    #[test]
    fn constant_anchor_matches_brace_anchor() {
        let text = fixture("scientific_data.ts");
        let by_braces = parse(&text, &Anchor::Braces).unwrap();
        let by_name = parse(&text, &Anchor::from_option(Some("SCIENTIFIC_DATA"))).unwrap();
        assert_eq!(by_braces.header, by_name.header);
        assert_eq!(by_braces.footer, by_name.footer);
        assert_eq!(by_braces.elements, by_name.elements);
    }

    #[test]
    fn unknown_constant_is_not_found() {
        let text = fixture("scientific_data.ts");
        let err = parse(&text, &Anchor::Constant("OTHER_DATA".to_string())).unwrap_err();
        assert!(matches!(err, PatchError::RegionNotFound(_)));
    }

    #[test]
    fn repairs_trailing_commas() {
        let fixed = repair_trailing_commas("{\"a\": [1, 2,], \"b\": {\"c\": 1,\n },\n}");
        assert_eq!(fixed, "{\"a\": [1, 2], \"b\": {\"c\": 1\n }\n}");
        let doc = parse("const X = {\"Fe\": {\"mass\": 55.845,},};", &Anchor::Braces).unwrap();
        assert_eq!(doc.footer, ";");
    }

    #[test]
    fn unbalanced_region_fails() {
        let text = fixture("unbalanced.ts");
        let err = parse(&text, &Anchor::Braces).unwrap_err();
        assert!(matches!(err, PatchError::Unbalanced { .. }));
    }

    #[test]
    fn braces_inside_strings_do_not_count() {
        let doc = parse("x = {\"Fe\": {\"note\": \"}{ [\"}}", &Anchor::Braces).unwrap();
        assert_eq!(doc.elements["Fe"]["note"], "}{ [");
    }

    #[test]
    fn missing_region_and_file() {
        let err = parse("no data here", &Anchor::Braces).unwrap_err();
        assert!(matches!(err, PatchError::RegionNotFound(_)));
        let err = load(Path::new("tests/fixtures/nope.ts"), &Anchor::Braces).unwrap_err();
        assert!(matches!(err, PatchError::MissingFile(_)));
    }

    #[test]
    fn invalid_json_region_fails() {
        let err = parse("x = { \"a\" 1 }", &Anchor::Braces).unwrap_err();
        assert!(matches!(err, PatchError::Json(_)));
    }
}
