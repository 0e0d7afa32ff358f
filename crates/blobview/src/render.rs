//! Rendering blobs into a document
//!
//! Each blob becomes exactly one [`Element`], chosen from its MIME type:
//!
//! 1. video (or an HLS playlist) - a player pointed at the access URL
//! 2. text - the payload shown verbatim in a preformatted block
//! 3. image - an image pointed at the access URL
//! 4. anything else - a frame embedding the access URL
//!
//! Elements are appended to a [`RenderSink`]; nothing is ever replaced.

use crate::blob::Blob;
use serde::{Deserialize, Serialize};

/// HLS playlists are played as video even though the type says otherwise
pub const HLS_MIME: &str = "application/vnd.apple.mpegurl";

/// A rendered element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Video player
    Video { src: String, mime_type: String },
    /// Preformatted text block
    Text { content: String },
    /// Image
    Image { src: String },
    /// Generic embedded frame
    Frame { src: String },
}

/// Which rendering bucket a blob fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Video,
    Text,
    Image,
    Frame,
}

impl RenderKind {
    /// Bucket for a MIME type
    pub fn for_mime(mime_type: &str) -> Self {
        if mime_type.contains("video") || mime_type == HLS_MIME {
            RenderKind::Video
        } else if mime_type.contains("text") {
            RenderKind::Text
        } else if mime_type.contains("image") {
            RenderKind::Image
        } else {
            RenderKind::Frame
        }
    }
}

impl Element {
    pub fn kind(&self) -> RenderKind {
        match self {
            Element::Video { .. } => RenderKind::Video,
            Element::Text { .. } => RenderKind::Text,
            Element::Image { .. } => RenderKind::Image,
            Element::Frame { .. } => RenderKind::Frame,
        }
    }
}

/// Build the element that displays a blob
pub fn element_for(blob: &Blob) -> Element {
    let src = blob.access_url().to_string();
    match RenderKind::for_mime(blob.mime_type()) {
        RenderKind::Video => Element::Video {
            src,
            mime_type: blob.mime_type().to_string(),
        },
        RenderKind::Text => Element::Text {
            content: blob.text().into_owned(),
        },
        RenderKind::Image => Element::Image { src },
        RenderKind::Frame => Element::Frame { src },
    }
}

/// Destination for rendered elements
pub trait RenderSink {
    fn append(&mut self, element: Element);
}

impl RenderSink for Vec<Element> {
    fn append(&mut self, element: Element) {
        self.push(element);
    }
}

/// Render a blob into the sink, returning the chosen bucket
pub fn render<S: RenderSink + ?Sized>(blob: &Blob, sink: &mut S) -> RenderKind {
    let element = element_for(blob);
    let kind = element.kind();
    tracing::debug!(?kind, mime_type = blob.mime_type(), size = blob.len(), "Rendering blob");
    sink.append(element);
    kind
}

/// Append-only document of rendered elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Standalone HTML page showing every element in order
    pub fn to_html(&self) -> String {
        let mut output = String::new();

        output.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        output.push_str("<title>BlobView</title>\n</head>\n<body>\n");

        for element in &self.elements {
            output.push_str(&element_html(element));
            output.push('\n');
        }

        output.push_str("</body>\n</html>\n");
        output
    }
}

impl RenderSink for Document {
    fn append(&mut self, element: Element) {
        self.elements.push(element);
    }
}

fn element_html(element: &Element) -> String {
    match element {
        Element::Video { src, mime_type } => format!(
            "<video controls style=\"width: 100%;height: 100%;\"><source src=\"{}\" type=\"{}\"></video>",
            escape_html(src),
            escape_html(mime_type)
        ),
        Element::Text { content } => format!("<pre>{}</pre>", escape_html(content)),
        Element::Image { src } => format!("<img src=\"{}\">", escape_html(src)),
        Element::Frame { src } => format!(
            "<iframe src=\"{}\" width=\"100%\" height=\"100%\" frameborder=\"0\"></iframe>",
            escape_html(src)
        ),
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn cdn_blob(mime: &str) -> Blob {
        Blob::from_cdn(
            Bytes::from_static(b"payload"),
            mime,
            "https://cdn.jsdelivr.net/gh/o/r@main/file",
        )
    }

    #[test]
    fn test_dispatch_priority() {
        assert_eq!(RenderKind::for_mime("video/mp4"), RenderKind::Video);
        assert_eq!(RenderKind::for_mime(HLS_MIME), RenderKind::Video);
        assert_eq!(RenderKind::for_mime("text/plain"), RenderKind::Text);
        assert_eq!(RenderKind::for_mime("text/html"), RenderKind::Text);
        assert_eq!(RenderKind::for_mime("image/png"), RenderKind::Image);
        assert_eq!(RenderKind::for_mime("application/pdf"), RenderKind::Frame);
        assert_eq!(RenderKind::for_mime("audio/mpeg"), RenderKind::Frame);
        assert_eq!(RenderKind::for_mime(""), RenderKind::Frame);
    }

    #[test]
    fn test_dispatch_is_substring_based() {
        // "text" matched anywhere, checked after video and before image
        assert_eq!(
            RenderKind::for_mime("application/vnd.oasis.opendocument.text"),
            RenderKind::Text
        );
        assert_eq!(RenderKind::for_mime("image/svg+xml"), RenderKind::Image);
    }

    #[test]
    fn test_element_for_video() {
        let element = element_for(&cdn_blob("video/mp4"));
        assert_eq!(
            element,
            Element::Video {
                src: "https://cdn.jsdelivr.net/gh/o/r@main/file".to_string(),
                mime_type: "video/mp4".to_string(),
            }
        );
    }

    #[test]
    fn test_element_for_text_reads_payload() {
        let element = element_for(&cdn_blob("text/plain"));
        assert_eq!(
            element,
            Element::Text {
                content: "payload".to_string()
            }
        );
    }

    #[test]
    fn test_element_for_image_and_frame() {
        assert_eq!(element_for(&cdn_blob("image/png")).kind(), RenderKind::Image);

        let blob = Blob::from_bytes(Bytes::from_static(b"%PDF"), "application/pdf");
        match element_for(&blob) {
            Element::Frame { src } => assert!(src.starts_with("data:application/pdf;base64,")),
            other => panic!("expected frame, got {:?}", other),
        }
    }

    #[test]
    fn test_render_appends_without_clearing() {
        let mut document = Document::new();
        assert!(document.is_empty());

        assert_eq!(render(&cdn_blob("image/png"), &mut document), RenderKind::Image);
        assert_eq!(render(&cdn_blob("text/plain"), &mut document), RenderKind::Text);

        assert_eq!(document.elements().len(), 2);
        assert_eq!(document.elements()[0].kind(), RenderKind::Image);
        assert_eq!(document.elements()[1].kind(), RenderKind::Text);
    }

    #[test]
    fn test_render_into_vec_sink() {
        let mut sink: Vec<Element> = Vec::new();
        render(&cdn_blob("video/webm"), &mut sink);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_to_html() {
        let mut document = Document::new();
        document.append(Element::Text {
            content: "<script>alert(1)</script>".to_string(),
        });
        document.append(Element::Video {
            src: "https://cdn.example/a.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
        });
        document.append(Element::Frame {
            src: "data:application/pdf;base64,JVBERg==".to_string(),
        });

        let html = document.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<pre>&lt;script&gt;alert(1)&lt;/script&gt;</pre>"));
        assert!(html.contains("<source src=\"https://cdn.example/a.mp4\" type=\"video/mp4\">"));
        assert!(html.contains("<iframe src=\"data:application/pdf;base64,JVBERg==\""));
        assert!(html.find("<pre>").unwrap() < html.find("<video").unwrap());
    }

    #[test]
    fn test_element_serialization() {
        let element = Element::Image {
            src: "https://cdn.example/a.png".to_string(),
        };
        let json = serde_json::to_string(&element).unwrap();
        assert_eq!(json, r#"{"kind":"image","src":"https://cdn.example/a.png"}"#);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & \"b\" <c>"), "a &amp; &quot;b&quot; &lt;c&gt;");
    }
}
