//! Solution manifest handling
//!
//! The solution manifest (`Solution.xml` template, written back as
//! `solution.xml`) carries the publisher record and the root-component
//! list. The publisher block is read once from the unmodified template and
//! never mutated; the `<RootComponents>` list is fully replaced with one
//! entry per packaged component on every run.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::{parse_err, skip_subtree, write_err};
use crate::error::Result;

/// Component type code for custom controls in a solution manifest.
const ROOT_COMPONENT_TYPE: &str = "66";

/// Publisher record read from the solution manifest template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    /// Publisher unique name (`Publisher/UniqueName`).
    pub unique_name: String,
    /// Customization prefix (`Publisher/CustomizationPrefix`), the prefix
    /// part of every qualified component name.
    pub customization_prefix: String,
}

/// Read the publisher name and prefix from a solution manifest document.
///
/// Only the `<UniqueName>` and `<CustomizationPrefix>` children of
/// `<Publisher>` are considered; the solution's own `<UniqueName>` outside
/// the publisher block is ignored.
pub fn read_publisher(xml: &str, path: &str) -> Result<Publisher> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_publisher = false;
    let mut current: Option<&[u8]> = None;
    let mut unique_name: Option<String> = None;
    let mut prefix: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"Publisher" => in_publisher = true,
                b"UniqueName" if in_publisher => current = Some(b"UniqueName"),
                b"CustomizationPrefix" if in_publisher => current = Some(b"CustomizationPrefix"),
                _ => {}
            },
            Ok(Event::Text(ref t)) => {
                if let Some(field) = current {
                    let value = t
                        .xml_content()
                        .map_err(|e| parse_err(path, e.to_string()))?
                        .into_owned();
                    match field {
                        b"UniqueName" => unique_name = Some(value),
                        _ => prefix = Some(value),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"Publisher" => in_publisher = false,
                b"UniqueName" | b"CustomizationPrefix" => current = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_err(path, e.to_string())),
            Ok(_) => {}
        }
    }

    let unique_name = unique_name
        .ok_or_else(|| parse_err(path, "missing <Publisher>/<UniqueName> element"))?;
    let customization_prefix = prefix
        .ok_or_else(|| parse_err(path, "missing <Publisher>/<CustomizationPrefix> element"))?;

    Ok(Publisher {
        unique_name,
        customization_prefix,
    })
}

/// Rewrite a solution manifest, replacing the `<RootComponents>` list with
/// one `<RootComponent type="66" schemaName="..." behavior="0"/>` entry per
/// qualified name, in order. Every other event in the template passes
/// through verbatim.
pub fn rewrite(xml: &str, qualified_names: &[String], path: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut replaced = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_err(path, e.to_string()))?;
        match event {
            Event::Start(ref e) if e.name().as_ref() == b"RootComponents" => {
                skip_subtree(&mut reader, b"RootComponents", path)?;
                write_root_components(&mut writer, qualified_names, path)?;
                replaced = true;
            }
            Event::Empty(ref e) if e.name().as_ref() == b"RootComponents" => {
                write_root_components(&mut writer, qualified_names, path)?;
                replaced = true;
            }
            Event::Eof => break,
            other => writer
                .write_event(other)
                .map_err(|e| write_err(path, e.to_string()))?,
        }
    }

    if !replaced {
        return Err(parse_err(path, "missing <RootComponents> element"));
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| write_err(path, e.to_string()))
}

fn write_root_components(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    qualified_names: &[String],
    path: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("RootComponents")))
        .map_err(|e| write_err(path, e.to_string()))?;
    for qualified in qualified_names {
        let mut element = BytesStart::new("RootComponent");
        element.push_attribute(("type", ROOT_COMPONENT_TYPE));
        element.push_attribute(("schemaName", qualified.as_str()));
        element.push_attribute(("behavior", "0"));
        writer
            .write_event(Event::Empty(element))
            .map_err(|e| write_err(path, e.to_string()))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("RootComponents")))
        .map_err(|e| write_err(path, e.to_string()))
}
