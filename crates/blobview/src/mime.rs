//! Extension based MIME lookup
//!
//! Content is never sniffed, so the result is only as good as the file name.

/// MIME type used when the extension is unknown or missing
pub const DEFAULT_MIME: &str = "text/plain";

/// Known extensions and their MIME types
const MIME_TYPES: &[(&str, &str)] = &[
    // Documents
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("doc", "application/msword"),
    ("pdf", "application/pdf"),
    ("rtf", "application/rtf"),
    ("xls", "application/vnd.ms-excel"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("swf", "application/x-shockwave-flash"),
    // Audio
    ("mid", "audio/midi"),
    ("midi", "audio/midi"),
    ("kar", "audio/midi"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/x-m4a"),
    ("ra", "audio/x-realaudio"),
    // Images
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("wbmp", "image/vnd.wap.wbmp"),
    ("ico", "image/x-icon"),
    ("jng", "image/x-jng"),
    ("bmp", "image/x-ms-bmp"),
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("webp", "image/webp"),
    // Text
    ("css", "text/css"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("shtml", "text/html"),
    ("txt", "text/plain"),
    ("xml", "text/xml"),
    // Video
    ("3gpp", "video/3gpp"),
    ("3gp", "video/3gpp"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("flv", "video/x-flv"),
    ("m4v", "video/x-m4v"),
    ("wmv", "video/x-ms-wmv"),
    ("avi", "video/x-msvideo"),
    // Archives
    ("zip", "application/x-zip-compressed"),
    ("tar", "application/x-tar"),
    ("tgz", "application/x-compressed"),
    ("rar", "application/x-rar-compressed"),
];

/// Guess the MIME type of a file from its extension
pub fn mime_for_path(path: &str) -> &'static str {
    mime_for_path_or(path, DEFAULT_MIME)
}

/// Guess the MIME type of a file, with a caller-chosen fallback
pub fn mime_for_path_or<'a>(path: &str, default: &'a str) -> &'a str {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return default;
    };

    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(default)
}

/// Media type of a Content-Type header value, without parameters
pub fn essence(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
}
