//! Page count recorded by the authoring application in `docProps/app.xml`.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Returns the `Pages` value when it is present and positive. Every failure
/// (missing element, garbage value, unparseable part) reads as `None`.
pub fn trusted_page_count(app_xml: Option<&str>) -> Option<u32> {
    let app_xml = app_xml?;
    let raw = match roxmltree::Document::parse(app_xml) {
        Ok(doc) => doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Pages")
            .map(|n| n.text().unwrap_or("").to_string()),
        Err(e) => {
            log::warn!("docProps/app.xml is not well-formed ({e}), scanning for Pages");
            scan_pages_element(app_xml)
        }
    }?;
    let pages = raw.trim().parse::<u32>().ok().filter(|&p| p > 0);
    log::debug!("Trusted metadata Pages={raw:?} -> {pages:?}");
    pages
}

/// Lenient lookup of `<Pages>N</Pages>` with any (or no) namespace prefix.
/// Mismatched end tags elsewhere in the part are tolerated.
fn scan_pages_element(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.check_end_names(false);

    let mut value: Option<String> = None;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"Pages" => {
                value = Some(String::new());
            }
            Ok(Event::Text(t)) => {
                if let Some(value) = value.as_mut() {
                    value.push_str(&t.unescape().ok()?);
                }
            }
            Ok(Event::End(e)) if value.is_some() => {
                return value.filter(|_| e.local_name().as_ref() == b"Pages");
            }
            Ok(Event::Start(_)) | Ok(Event::Empty(_)) if value.is_some() => return None,
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(e) => {
                log::debug!("Pages scan stopped at byte {}: {e}", reader.buffer_position());
                return None;
            }
        }
    }
}
