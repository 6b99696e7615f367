//! Fixed-size text chunking

/// Splits text into contiguous chunks of at most `chunk_size` characters
///
/// Sizes count Unicode scalar values, so a chunk boundary never falls inside
/// a code point. Concatenating the chunks in order reproduces the input.
pub struct TextChunker {
    chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// `chunk_size` must be non-zero; `AnalyzerConfig::validate` rejects zero.
    pub fn new(chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk_size must be greater than 0");
        Self { chunk_size }
    }

    /// Chunk the given text
    ///
    /// Returns no chunks for empty input. Every chunk but the last holds
    /// exactly `chunk_size` characters.
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (idx, _) in text.char_indices() {
            if count == self.chunk_size {
                chunks.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            chunks.push(&text[start..]);
        }

        chunks
    }

    /// Chunk the text and rejoin the pieces with a single space
    ///
    /// This is the text sent in single-request mode. A space lands at every
    /// chunk boundary, so the result differs from the input whenever the
    /// input is longer than one chunk.
    pub fn rejoin(&self, text: &str) -> String {
        self.chunk(text).join(" ")
    }
}
