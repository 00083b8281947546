use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encodes bytes as a `data:<content-type>;base64,<payload>` URL.
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}
