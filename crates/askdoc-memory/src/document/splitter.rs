use super::types::{Chunk, Document};

/// How far back from the target cut point to look for whitespace.
const BOUNDARY_LOOKBACK: usize = 64;

#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "invalid splitter config: chunk_size must be > 0 and chunk_overlap < chunk_size \
     (got size {chunk_size}, overlap {chunk_overlap})"
)]
pub struct InvalidSplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// Fixed-size character windows with overlap, preferring whitespace cuts.
///
/// Windows start at offsets `0, step, 2*step, …` where
/// `step = chunk_size - chunk_overlap`. When a window would cut mid-word,
/// the cut moves back to the nearest whitespace within
/// [`BOUNDARY_LOOKBACK`] characters; the following window then starts
/// `chunk_overlap` characters before that cut.
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    /// # Errors
    ///
    /// Returns [`InvalidSplitterConfig`] unless `chunk_size > 0` and
    /// `chunk_overlap < chunk_size`.
    pub fn new(config: SplitterConfig) -> Result<Self, InvalidSplitterConfig> {
        if config.chunk_size == 0 || config.chunk_overlap >= config.chunk_size {
            return Err(InvalidSplitterConfig {
                chunk_size: config.chunk_size,
                chunk_overlap: config.chunk_overlap,
            });
        }
        Ok(Self { config })
    }

    /// Split one document into chunks, preserving metadata and order.
    ///
    /// A document shorter than `chunk_size` yields exactly one chunk; an
    /// empty document yields none. Every chunk's `content` equals the
    /// source content at `[offset, offset + len)` in characters.
    #[must_use]
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        let chars: Vec<char> = document.content.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;
        let step = size - overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let target = (start + size).min(chars.len());
            let end = if target < chars.len() {
                snap_to_whitespace(&chars, start, target)
            } else {
                target
            };

            chunks.push(Chunk {
                content: chars[start..end].iter().collect(),
                metadata: document.metadata.clone(),
                chunk_index: chunks.len(),
                offset: start,
            });

            start = if end == target && target == chars.len() {
                // Content exhausted mid-window: keep stepping from the
                // window origin so offsets stay on the step grid.
                start + step
            } else {
                (end.saturating_sub(overlap)).max(start + 1)
            };
        }

        chunks
    }
}

/// Move `target` back to just after the nearest whitespace, if one exists
/// within the look-back window. Never moves at or before `start`.
fn snap_to_whitespace(chars: &[char], start: usize, target: usize) -> usize {
    let floor = target.saturating_sub(BOUNDARY_LOOKBACK).max(start + 1);
    (floor..target)
        .rev()
        .find(|&i| chars[i].is_whitespace())
        .map_or(target, |i| i + 1)
}
