//! HTML entity decoding for code fence bodies.
//!
//! The markdown engine escapes fence bodies on the way into
//! `<pre><code>` blocks; diagram substitution needs the original source
//! back. This decodes exactly the entity set the engine emits.

/// Decode the entities produced by HTML-escaping a code block.
///
/// `&amp;` is decoded last so escaped entity text survives one level of
/// decoding intact.
pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
