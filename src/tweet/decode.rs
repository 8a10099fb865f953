//! Human-readable form of link targets
//!
//! Link targets arrive percent-encoded with ASCII (punycode) hosts. The
//! decoded form unescapes the path and query and shows the host in unicode.

use percent_encoding::percent_decode_str;
use url::Url;

/// Bytes whose escapes stay escaped, so the decoded URL keeps its structure
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Decode a URL for display.
///
/// Escapes of reserved characters are kept. Anything that is not valid UTF-8
/// once unescaped, or is not a URL at all, is returned unchanged.
pub fn decode_url(raw: &str) -> String {
    let decoded = decode_unreserved(raw).unwrap_or_else(|| raw.to_string());

    let Some(host) = Url::parse(raw).ok().and_then(|url| url.host_str().map(str::to_string))
    else {
        return decoded;
    };
    let (unicode, result) = idna::domain_to_unicode(&host);
    if result.is_err() || unicode == host {
        return decoded;
    }
    decoded.replacen(&host, &unicode, 1)
}

fn decode_unreserved(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut chunk_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| raw.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) if RESERVED.contains(&byte) => {
                out.push_str(&percent_decode_str(&raw[chunk_start..i]).decode_utf8().ok()?);
                out.push_str(&raw[i..i + 3]);
                i += 3;
                chunk_start = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&percent_decode_str(&raw[chunk_start..]).decode_utf8().ok()?);
    Some(out)
}
