pub mod extract;
pub mod normalize;

pub use extract::{extract_document, extract_paragraphs};
pub use normalize::{NormalizedXml, normalize};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Strict OOXML flavour of the WordprocessingML namespace.
pub(crate) const WML_STRICT_NS: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";
pub(crate) const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

pub(crate) fn is_wml_ns(ns: Option<&str>) -> bool {
    matches!(ns, Some(WML_NS) | Some(WML_STRICT_NS))
}

pub(crate) fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && is_wml_ns(node.tag_name().namespace())
}

pub(crate) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

/// Read a WML attribute in either namespace flavour, or unqualified when the
/// document puts WordprocessingML in the default namespace.
pub(crate) fn wml_attribute<'a>(node: roxmltree::Node<'a, 'a>, attr: &str) -> Option<&'a str> {
    node.attribute((WML_NS, attr))
        .or_else(|| node.attribute((WML_STRICT_NS, attr)))
        .or_else(|| node.attribute(attr))
}

/// WML boolean toggle: present with no val, or a val other than 0/false/off, means on.
pub(crate) fn toggle_on(node: roxmltree::Node) -> bool {
    wml_attribute(node, "val").is_none_or(|v| !matches!(v, "0" | "false" | "off"))
}

/// Flatten content controls: descend into w:sdtContent and collect effective children.
pub(crate) fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children().filter(|n| n.is_element()) {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}
