#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Wrap body content in a `w:document` root with the namespaces fixtures use.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:v="urn:schemas-microsoft-com:vml"><w:body>{body}</w:body></w:document>"#
    )
}

/// A paragraph with a single run. `text` must already be XML-escaped.
pub fn para(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

pub fn page_break_para() -> String {
    r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#.to_string()
}

pub fn body_sect_pr() -> String {
    r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:bottom="1440" w:left="1440" w:right="1440"/></w:sectPr>"#
        .to_string()
}

/// `breaks + 1` text paragraphs separated by manual page breaks, ending with a body-level `w:sectPr`.
pub fn body_with_breaks(breaks: usize) -> String {
    let mut body = String::new();
    for i in 0..=breaks {
        if i > 0 {
            body.push_str(&page_break_para());
        }
        body.push_str(&para(&format!("Page {}", i + 1)));
    }
    body.push_str(&body_sect_pr());
    body
}

pub fn app_xml(pages: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Template>Normal.dotm</Template><TotalTime>3</TotalTime><Pages>{pages}</Pages><Words>120</Words><Application>Microsoft Office Word</Application></Properties>"#
    )
}

/// Zip the given `(entry name, content)` pairs into an in-memory package.
pub fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(*name, opt).expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

pub fn docx(body: &str) -> Vec<u8> {
    package(&[("word/document.xml", &document_xml(body))])
}

pub fn docx_with_pages(body: &str, pages: &str) -> Vec<u8> {
    package(&[
        ("word/document.xml", &document_xml(body)),
        ("docProps/app.xml", &app_xml(pages)),
    ])
}
