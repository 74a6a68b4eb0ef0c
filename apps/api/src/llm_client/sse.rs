//! Server-sent event decoding for streamed Gemini replies.
//!
//! The HTTP body arrives in arbitrary byte chunks; a `data:` line may be split
//! across chunks (including in the middle of a multi-byte character), so bytes
//! are buffered until a full line is available.

use bytes::BytesMut;

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
}

impl SseDecoder {
    /// Feeds one body chunk and returns the payloads of every completed `data:` line.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(line_end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line = self.buffer.split_to(line_end + 1);
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flushes a trailing line that was never newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = self.buffer.split();
        data_payload(&line)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let payload = line.trim().strip_prefix("data:")?.trim_start();
    if payload.is_empty() || payload == "[DONE]" {
        None
    } else {
        Some(payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::default();
        let payloads = decoder.push(b"data: {\"a\":1}\n\n");
        assert_eq!(payloads, vec!["{\"a\":1}".to_string()]);
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"data: {\"te").is_empty());
        let payloads = decoder.push(b"xt\":\"Hi\"}\r\n\r\ndata: second\n");
        assert_eq!(payloads, vec!["{\"text\":\"Hi\"}", "second"]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let bytes = "data: नमस्ते\n".as_bytes();
        let (first, second) = bytes.split_at(8); // inside the first Devanagari character
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(first).is_empty());
        assert_eq!(decoder.push(second), vec!["नमस्ते".to_string()]);
    }

    #[test]
    fn test_ignores_comments_and_event_names() {
        let mut decoder = SseDecoder::default();
        let payloads = decoder.push(b": keep-alive\nevent: message\ndata: x\n\n");
        assert_eq!(payloads, vec!["x".to_string()]);
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_done_marker_is_skipped() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"data: [DONE]\n").is_empty());
    }
}
