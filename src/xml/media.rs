pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// True for XML-family media types: `text/xml`, `application/xml` and any
/// `+xml` suffix type such as `application/atom+xml`.
///
/// Parameters (`; charset=utf-8`) are ignored.
pub fn is_xml_media_type(value: &str) -> bool {
    let essence = essence(value);
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    matches!(kind, "application" | "text") && (subtype == "xml" || subtype.ends_with("+xml"))
}

/// True for the Atom `xhtml` text construct type and `application/xhtml+xml`.
pub fn is_xhtml_media_type(value: &str) -> bool {
    let essence = essence(value);
    essence == "xhtml" || essence == "application/xhtml+xml"
}

fn essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
