//! Text chunking — overlap-aware splitting of page text.

use crate::ingest::IngestError;
use text_splitter::{ChunkConfig, TextSplitter};

/// Split text into chunks of at most `chunk_size` characters with
/// `overlap` characters shared between neighbors.
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, IngestError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let config = ChunkConfig::new(chunk_size)
        .with_overlap(overlap)
        .map_err(|e| IngestError::Split(e.to_string()))?;
    let splitter = TextSplitter::new(config);

    Ok(splitter.chunks(text).map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("A short paragraph.", 1000, 100).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "A short paragraph.");
    }

    #[test]
    fn long_text_is_split_within_bounds() {
        let text = "word ".repeat(400);
        let chunks = chunk_text(&text, 100, 20).unwrap();
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunks = chunk_text("   \n  ", 100, 10).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn overlap_larger_than_chunk_is_an_error() {
        let err = chunk_text("some text", 10, 10).unwrap_err();
        assert!(matches!(err, IngestError::Split(_)));
    }
}
