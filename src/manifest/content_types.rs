//! Content-type index handling
//!
//! The content-type index (`[Content_Types].xml`) is an OPC document that
//! maps package parts to media types. The packager owns every `<Override>`
//! entry: the full set is dropped and re-emitted on each run, one override
//! per component manifest. `<Default>` extension mappings and any other
//! template content pass through verbatim.

use std::io::Cursor;

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::{control_manifest_part, parse_err, skip_subtree, write_err};
use crate::error::Result;

/// Media type recorded for every component manifest override.
const OVERRIDE_CONTENT_TYPE: &str = "application/octet-stream";

/// Static skeleton placed into the output directory before merging. The
/// default extension mappings match what the platform expects for packaged
/// controls.
pub const SKELETON: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="text/xml" /><Default Extension="js" ContentType="application/octet-stream" /></Types>
"#;

/// Rewrite a content-type index, dropping every existing `<Override>` and
/// emitting one per qualified name, in order, just before the closing
/// `</Types>` tag.
pub fn rewrite(xml: &str, qualified_names: &[String], path: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut saw_types = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_err(path, e.to_string()))?;
        match event {
            Event::Start(e) if e.name().as_ref() == b"Types" => {
                saw_types = true;
                writer
                    .write_event(Event::Start(e))
                    .map_err(|e| write_err(path, e.to_string()))?;
            }
            // Existing overrides are dropped; the current set is re-emitted
            // before </Types>.
            Event::Empty(ref e) if e.name().as_ref() == b"Override" => {}
            Event::Start(ref e) if e.name().as_ref() == b"Override" => {
                skip_subtree(&mut reader, b"Override", path)?;
            }
            Event::End(e) if e.name().as_ref() == b"Types" => {
                for qualified in qualified_names {
                    let part = control_manifest_part(qualified);
                    let mut element = BytesStart::new("Override");
                    element.push_attribute(("PartName", part.as_str()));
                    element.push_attribute(("ContentType", OVERRIDE_CONTENT_TYPE));
                    writer
                        .write_event(Event::Empty(element))
                        .map_err(|e| write_err(path, e.to_string()))?;
                }
                writer
                    .write_event(Event::End(e))
                    .map_err(|e| write_err(path, e.to_string()))?;
            }
            Event::Eof => break,
            other => writer
                .write_event(other)
                .map_err(|e| write_err(path, e.to_string()))?,
        }
    }

    if !saw_types {
        return Err(parse_err(path, "missing <Types> root element"));
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| write_err(path, e.to_string()))
}
