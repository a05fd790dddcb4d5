//! Splitting a row slice into contiguous chunks.

use std::ops::Range;

/// A contiguous run of rows executed as one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a, R> {
    /// Zero-based position of the chunk.
    pub index: usize,
    /// Position of the chunk's rows in the input.
    pub range: Range<usize>,
    /// The rows themselves.
    pub rows: &'a [R],
}

/// Splits `rows` into chunks of at most `chunk_size` rows, in order.
///
/// The last chunk may be shorter. A `chunk_size` of zero yields a single
/// chunk holding every row. An empty slice yields no chunks.
pub fn chunks<R>(rows: &[R], chunk_size: usize) -> impl Iterator<Item = Chunk<'_, R>> {
    let size = if chunk_size == 0 {
        rows.len().max(1)
    } else {
        chunk_size
    };

    rows.chunks(size).enumerate().map(move |(index, chunk)| {
        let start = index * size;
        Chunk {
            index,
            range: start..start + chunk.len(),
            rows: chunk,
        }
    })
}
