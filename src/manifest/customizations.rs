//! Customization registry handling
//!
//! The customization registry (`Customizations.xml` template, written back
//! as `customizations.xml`) lists every packaged custom control. The
//! `<CustomControls>` list is fully replaced on every run with one
//! `<CustomControl>` entry per component, pointing at the component's
//! manifest inside the package.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{control_manifest_part, parse_err, skip_subtree, write_err};
use crate::error::Result;

/// Rewrite a customization registry, replacing the `<CustomControls>` list
/// with one entry per qualified name, in order. Every other event in the
/// template passes through verbatim.
pub fn rewrite(xml: &str, qualified_names: &[String], path: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut replaced = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_err(path, e.to_string()))?;
        match event {
            Event::Start(ref e) if e.name().as_ref() == b"CustomControls" => {
                skip_subtree(&mut reader, b"CustomControls", path)?;
                write_custom_controls(&mut writer, qualified_names, path)?;
                replaced = true;
            }
            Event::Empty(ref e) if e.name().as_ref() == b"CustomControls" => {
                write_custom_controls(&mut writer, qualified_names, path)?;
                replaced = true;
            }
            Event::Eof => break,
            other => writer
                .write_event(other)
                .map_err(|e| write_err(path, e.to_string()))?,
        }
    }

    if !replaced {
        return Err(parse_err(path, "missing <CustomControls> element"));
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| write_err(path, e.to_string()))
}

fn write_custom_controls(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    qualified_names: &[String],
    path: &str,
) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new("CustomControls")), path)?;
    for qualified in qualified_names {
        let part = control_manifest_part(qualified);
        write_event(writer, Event::Start(BytesStart::new("CustomControl")), path)?;
        write_event(writer, Event::Start(BytesStart::new("Name")), path)?;
        write_event(writer, Event::Text(BytesText::new(qualified)), path)?;
        write_event(writer, Event::End(BytesEnd::new("Name")), path)?;
        write_event(writer, Event::Start(BytesStart::new("FileName")), path)?;
        write_event(writer, Event::Text(BytesText::new(&part)), path)?;
        write_event(writer, Event::End(BytesEnd::new("FileName")), path)?;
        write_event(writer, Event::End(BytesEnd::new("CustomControl")), path)?;
    }
    write_event(writer, Event::End(BytesEnd::new("CustomControls")), path)
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event, path: &str) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| write_err(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ImportExportXml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Entities />
  <Roles />
  <Workflows />
  <CustomControls />
  <Languages>
    <Language>1033</Language>
  </Languages>
</ImportExportXml>
"#;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rewrite_registers_controls() {
        let result = rewrite(
            TEMPLATE,
            &names(&["pcf_ns1.Alpha", "pcf_ns2.Beta"]),
            "customizations.xml",
        )
        .unwrap();
        assert!(result.contains("<Name>pcf_ns1.Alpha</Name>"));
        assert!(result
            .contains("<FileName>/Controls/pcf_ns1.Alpha/ControlManifest.xml</FileName>"));
        let alpha = result.find("pcf_ns1.Alpha").unwrap();
        let beta = result.find("pcf_ns2.Beta").unwrap();
        assert!(alpha < beta, "components must keep reference order");
        // Unrelated template content passes through.
        assert!(result.contains("<Language>1033</Language>"));
        assert!(result.contains("<Entities />"));
    }

    #[test]
    fn test_rewrite_replaces_existing_list() {
        let first = rewrite(TEMPLATE, &names(&["pcf_ns1.Alpha"]), "customizations.xml").unwrap();
        let second = rewrite(&first, &names(&["pcf_ns2.Beta"]), "customizations.xml").unwrap();
        assert!(!second.contains("pcf_ns1.Alpha"));
        assert!(second.contains("pcf_ns2.Beta"));
    }

    #[test]
    fn test_rewrite_idempotent() {
        let qualified = names(&["pcf_ns1.Alpha", "pcf_ns2.Beta"]);
        let first = rewrite(TEMPLATE, &qualified, "customizations.xml").unwrap();
        let second = rewrite(&first, &qualified, "customizations.xml").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rewrite_missing_custom_controls() {
        let xml = "<ImportExportXml><Entities /></ImportExportXml>";
        let err = rewrite(xml, &names(&["pcf_ns1.Alpha"]), "customizations.xml").unwrap_err();
        assert!(err.to_string().contains("CustomControls"));
    }
}
