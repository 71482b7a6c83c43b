//! Typed models and rewriters for the package XML documents
//!
//! This module covers every XML document the packager reads or writes:
//!
//! - Component manifest (`control.rs`) - per sub-project, read-only; yields
//!   the component namespace.
//! - Solution manifest (`solution.rs`) - publisher block read-only, root
//!   component list rewritten.
//! - Customization registry (`customizations.rs`) - custom control list
//!   rewritten.
//! - Content-type index (`content_types.rs`) - override list rewritten.
//!
//! ## Rewrite strategy
//!
//! The three package-level documents are rewritten with an event-stream
//! copy: every event from the template is passed through to the writer
//! verbatim, except the one repeated-element list owned by the packager,
//! which is dropped and re-emitted from the current component set. A rerun
//! with the same component set therefore produces content-identical
//! documents, and unrelated template content (publisher block, versions,
//! metadata) survives untouched.
//!
//! ## Qualified names
//!
//! A component is registered everywhere under its qualified name
//! `{publisherPrefix}_{namespace}.{name}`. All three rewriters receive the
//! same precomputed qualified-name sequence, so the strings emitted into
//! the three documents are identical by construction.

use quick_xml::events::BytesStart;

use crate::error::{Error, Result};

pub mod content_types;
pub mod control;
pub mod customizations;
pub mod solution;

/// Subdirectory of the package that holds one folder per component.
pub const CONTROLS_DIR: &str = "Controls";

/// Compute the qualified name of a component:
/// `{publisherPrefix}_{namespace}.{name}`.
///
/// This is the unique identifier used to cross-reference a component in the
/// content-type index, the solution manifest, and the customization
/// registry. It must be identical everywhere it is emitted.
///
/// # Examples
///
/// ```
/// use solution_packager::manifest::qualified_name;
///
/// assert_eq!(qualified_name("pcf", "ns1", "Alpha"), "pcf_ns1.Alpha");
/// ```
pub fn qualified_name(prefix: &str, namespace: &str, name: &str) -> String {
    format!("{}_{}.{}", prefix, namespace, name)
}

/// Package-internal part name of a component's manifest, as referenced by
/// the content-type index and the customization registry.
pub fn control_manifest_part(qualified: &str) -> String {
    format!("/{}/{}/ControlManifest.xml", CONTROLS_DIR, qualified)
}

/// Build a `ManifestParse` error for the document at `path`.
pub(crate) fn parse_err(path: &str, message: impl Into<String>) -> Error {
    Error::ManifestParse {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Build a `ManifestWrite` error for the document at `path`.
pub(crate) fn write_err(path: &str, message: impl Into<String>) -> Error {
    Error::ManifestWrite {
        path: path.to_string(),
        message: message.into(),
    }
}

/// Read an optional attribute from an element.
pub(crate) fn get_attr(e: &BytesStart, name: &[u8], path: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| parse_err(path, format!("invalid attribute: {}", e)))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| parse_err(path, format!("invalid attribute value: {}", e)))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

/// Read a required attribute from an element.
pub(crate) fn require_attr(e: &BytesStart, name: &[u8], path: &str) -> Result<String> {
    get_attr(e, name, path)?.ok_or_else(|| {
        parse_err(
            path,
            format!(
                "missing required attribute \"{}\" on <{}>",
                String::from_utf8_lossy(name),
                String::from_utf8_lossy(e.name().as_ref())
            ),
        )
    })
}

/// Consume reader events until the end tag matching an already-consumed
/// start tag `tag`, discarding the whole subtree. Nested elements with the
/// same name are tracked by depth.
pub(crate) fn skip_subtree(
    reader: &mut quick_xml::Reader<&[u8]>,
    tag: &[u8],
    path: &str,
) -> Result<()> {
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(quick_xml::events::Event::Start(e)) if e.name().as_ref() == tag => depth += 1,
            Ok(quick_xml::events::Event::End(e)) if e.name().as_ref() == tag => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Ok(quick_xml::events::Event::Eof) => {
                return Err(parse_err(
                    path,
                    format!(
                        "unexpected end of document inside <{}>",
                        String::from_utf8_lossy(tag)
                    ),
                ));
            }
            Err(e) => return Err(parse_err(path, e.to_string())),
            Ok(_) => {}
        }
    }
}
