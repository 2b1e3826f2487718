use docx_pages::metadata::trusted_page_count;

#[test]
fn reads_pages_from_app_properties() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Pages>12</Pages><Words>3400</Words></Properties>"#;
    assert_eq!(trusted_page_count(Some(xml)), Some(12));
}

#[test]
fn tolerates_namespace_prefix_and_whitespace() {
    let xml = r#"<ep:Properties xmlns:ep="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><ep:Pages>
        4
    </ep:Pages></ep:Properties>"#;
    assert_eq!(trusted_page_count(Some(xml)), Some(4));
}

#[test]
fn first_pages_element_wins() {
    let xml = "<Properties><Pages>3</Pages><Pages>9</Pages></Properties>";
    assert_eq!(trusted_page_count(Some(xml)), Some(3));
}

#[test]
fn non_positive_or_garbage_values_are_absent() {
    for value in ["0", "-2", "many", "", "3.5"] {
        let xml = format!("<Properties><Pages>{value}</Pages></Properties>");
        assert_eq!(trusted_page_count(Some(&xml)), None, "value {value:?}");
    }
}

#[test]
fn missing_part_or_element_is_absent() {
    assert_eq!(trusted_page_count(None), None);
    assert_eq!(
        trusted_page_count(Some("<Properties><Words>10</Words></Properties>")),
        None
    );
}

#[test]
fn malformed_xml_is_scanned_leniently() {
    let xml = "<Properties><Template>Normal</Template><ep:Pages>7</ep:Pages><Words>1</Properties>";
    assert_eq!(trusted_page_count(Some(xml)), Some(7));
    assert_eq!(trusted_page_count(Some("<Properties><Pages>0</Pages>")), None);
    assert_eq!(trusted_page_count(Some("<<<not xml at all")), None);
}

#[test]
fn mismatched_end_tags_elsewhere_do_not_hide_pages() {
    let xml = "<Properties><Company>Acme</Comp><Pages> 4 </Pages></Properties>";
    assert_eq!(trusted_page_count(Some(xml)), Some(4));
    let unclosed = "<Properties><Pages>4<Words>9</Words></Properties>";
    assert_eq!(trusted_page_count(Some(unclosed)), None);
}
