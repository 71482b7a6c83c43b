//! Component manifest parsing
//!
//! Each sub-project build emits a `ControlManifest.xml` inside its lone
//! output folder. The document's root `<manifest>` contains a `<control>`
//! declaration whose `namespace` attribute, together with the output folder
//! name, forms the component identity. Parsing is a pure function of the
//! document content.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{parse_err, require_attr};
use crate::error::Result;

/// Extract the declared namespace from a component manifest.
///
/// The root element must be `<manifest>` and must contain a `<control>`
/// element with a `namespace` attribute. Anything else is a
/// `ManifestParse` error.
pub fn control_namespace(xml: &str, path: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut seen_root = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if !seen_root {
                    if e.name().as_ref() != b"manifest" {
                        return Err(parse_err(
                            path,
                            format!(
                                "expected <manifest> root element, found <{}>",
                                String::from_utf8_lossy(e.name().as_ref())
                            ),
                        ));
                    }
                    seen_root = true;
                    continue;
                }
                if e.name().as_ref() == b"control" {
                    return require_attr(e, b"namespace", path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_err(path, e.to_string())),
            Ok(_) => {}
        }
    }

    Err(parse_err(
        path,
        "missing <control> declaration in component manifest",
    ))
}
