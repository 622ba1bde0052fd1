use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Serialize raw image bytes into the `data:<mime>;base64,...` form the
/// creation endpoint expects.
pub fn encode_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", detect_mime(bytes), STANDARD.encode(bytes))
}

/// Detect the mime type from magic bytes.
fn detect_mime(bytes: &[u8]) -> &'static str {
    if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        "image/png"
    } else if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
        "image/jpeg"
    } else if bytes.len() >= 6 && (&bytes[0..6] == b"GIF87a" || &bytes[0..6] == b"GIF89a") {
        "image/gif"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_bytes_become_a_png_data_url() {
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        let encoded = encode_data_url(&bytes);
        assert!(encoded.starts_with("data:image/png;base64,"));

        let payload = encoded.split(',').nth(1).expect("payload");
        assert_eq!(STANDARD.decode(payload).expect("decode"), bytes);
    }

    #[test]
    fn jpeg_and_gif_magic_bytes_are_recognized() {
        assert_eq!(detect_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(detect_mime(b"GIF89a trailer"), "image/gif");
    }

    #[test]
    fn unknown_bytes_fall_back_to_octet_stream() {
        assert!(encode_data_url(b"plain text").starts_with("data:application/octet-stream;base64,"));
    }
}
