//! Magic-byte signatures for the accepted upload formats.
//!
//! Each entry maps a MIME type to a predicate over the leading bytes of the
//! file. Supporting a new format means adding one entry to [`SIGNATURES`].

/// Number of leading bytes callers need to keep for sniffing.
pub const SNIFF_LEN: usize = 12;

/// A MIME type and the predicate its leading bytes must satisfy.
pub struct Signature {
    pub mime: &'static str,
    matches: fn(&[u8]) -> bool,
}

impl Signature {
    pub fn matches(&self, data: &[u8]) -> bool {
        (self.matches)(data)
    }
}

fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&[0xFF, 0xD8, 0xFF])
}

fn is_png(data: &[u8]) -> bool {
    data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
}

fn is_gif(data: &[u8]) -> bool {
    data.starts_with(b"GIF8")
}

fn is_webp(data: &[u8]) -> bool {
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
}

fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

pub static SIGNATURES: &[Signature] = &[
    Signature {
        mime: "image/jpeg",
        matches: is_jpeg,
    },
    Signature {
        mime: "image/png",
        matches: is_png,
    },
    Signature {
        mime: "image/gif",
        matches: is_gif,
    },
    Signature {
        mime: "image/webp",
        matches: is_webp,
    },
    Signature {
        mime: "application/pdf",
        matches: is_pdf,
    },
];

/// Look up the signature registered for a (normalized) MIME type.
pub fn signature_for(mime: &str) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|sig| sig.mime == mime)
}

/// True when `data` starts with the signature registered for `mime`.
///
/// MIME types without a registered signature never verify.
pub fn verify_signature(mime: &str, data: &[u8]) -> bool {
    signature_for(mime)
        .map(|sig| sig.matches(data))
        .unwrap_or(false)
}

/// Detect the MIME type from the leading bytes alone. Used for logging what a
/// mismatching file actually looks like.
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|sig| sig.matches(data))
        .map(|sig| sig.mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0, 1];
    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00";
    const WEBP: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
    const PDF: &[u8] = b"%PDF-1.7\n%\xE2\xE3";

    #[test]
    fn each_format_verifies_against_its_own_mime() {
        assert!(verify_signature("image/jpeg", JPEG));
        assert!(verify_signature("image/png", PNG));
        assert!(verify_signature("image/gif", GIF));
        assert!(verify_signature("image/webp", WEBP));
        assert!(verify_signature("application/pdf", PDF));
    }

    #[test]
    fn jpeg_bytes_do_not_verify_as_png() {
        assert!(!verify_signature("image/png", JPEG));
        assert!(!verify_signature("image/jpeg", PNG));
        assert!(!verify_signature("application/pdf", GIF));
    }

    #[test]
    fn riff_without_webp_marker_is_rejected() {
        let wav = b"RIFF\x24\x00\x00\x00WAVEfmt ";
        assert!(!verify_signature("image/webp", wav));
    }

    #[test]
    fn truncated_data_never_matches() {
        assert!(!verify_signature("image/jpeg", &[0xFF, 0xD8]));
        assert!(!verify_signature("image/png", &PNG[..7]));
        assert!(!verify_signature("image/webp", &WEBP[..11]));
        assert!(!verify_signature("application/pdf", b"%PDF"));
        assert!(!verify_signature("image/gif", &[]));
    }

    #[test]
    fn unknown_mime_never_verifies() {
        assert!(!verify_signature("image/svg+xml", b"<svg xmlns="));
        assert!(signature_for("text/plain").is_none());
    }

    #[test]
    fn sniff_detects_actual_format() {
        assert_eq!(sniff_mime(JPEG), Some("image/jpeg"));
        assert_eq!(sniff_mime(WEBP), Some("image/webp"));
        assert_eq!(sniff_mime(b"hello world!"), None);
    }
}
