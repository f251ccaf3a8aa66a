use snafu::Snafu;
use tracing::warn;

/// The stored data of a single file: a growable, zero-indexed byte buffer
/// of single-line text.
///
/// Positions and sizes are byte offsets. The buffer itself accepts any
/// byte; the snapshot codec is what rejects embedded newlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent {
    bytes: Vec<u8>,
}

impl FileContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            bytes: text.into().into_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Concatenates `text` to the end of the buffer.
    pub fn append(&mut self, text: &str) {
        self.bytes.extend_from_slice(text.as_bytes());
    }

    /// Overwrites the buffer starting at `pos`, growing it when `text` runs
    /// past the current end. A `pos` beyond the end pads the gap with spaces
    /// before appending `text`.
    pub fn write_at(&mut self, pos: usize, text: &str) {
        let len = self.bytes.len();
        if pos <= len {
            let overwritten = text.len().min(len - pos);
            self.bytes
                .splice(pos..pos + overwritten, text.bytes())
                .for_each(drop);
        } else {
            self.bytes.resize(pos, b' ');
            self.bytes.extend_from_slice(text.as_bytes());
        }
    }

    /// Returns the entire buffer as text.
    pub fn read_all(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Returns `size` bytes starting at `start`. A `start` at or past the end
    /// is out of bounds; a `size` running past the end is clamped with a
    /// truncation warning.
    pub fn read_from(&self, start: usize, size: usize) -> Result<String, ContentError> {
        let len = self.bytes.len();
        if start >= len {
            return StartOutOfBoundsSnafu { start, len }.fail();
        }
        let size = if start + size > len {
            warn!("requested size exceeds content length, truncating read");
            len - start
        } else {
            size
        };
        Ok(String::from_utf8_lossy(&self.bytes[start..start + size]).into_owned())
    }

    /// Extracts the `size`-byte run at `start`, removes it, then reinserts it
    /// at `target`.
    ///
    /// Both the source range and `target` are validated against the length
    /// before removal, but `target` indexes the buffer *after* removal, so
    /// positions at or past the removed run land `size` bytes earlier than
    /// they would have before the edit. A `target` past the shortened end
    /// clamps to the end.
    pub fn move_within(&mut self, start: usize, size: usize, target: usize) -> Result<(), ContentError> {
        let len = self.bytes.len();
        if start + size > len {
            return RangeOutOfBoundsSnafu { start, size, len }.fail();
        }
        if target > len {
            return TargetOutOfBoundsSnafu { target, len }.fail();
        }
        let moving: Vec<u8> = self.bytes.drain(start..start + size).collect();
        let at = target.min(self.bytes.len());
        self.bytes.splice(at..at, moving).for_each(drop);
        Ok(())
    }

    /// Keeps only the first `max` bytes. Asking for the current length or
    /// more is a warned no-op.
    pub fn truncate(&mut self, max: usize) {
        if max >= self.bytes.len() {
            warn!("size exceeds current content, no truncation performed");
            return;
        }
        self.bytes.truncate(max);
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ContentError {
    #[snafu(display("start position {start} is out of bounds (content length {len})"))]
    StartOutOfBounds { start: usize, len: usize },
    #[snafu(display("source range {start}..{end} is out of bounds (content length {len})", end = start + size))]
    RangeOutOfBounds {
        start: usize,
        size: usize,
        len: usize,
    },
    #[snafu(display("target position {target} is out of bounds (content length {len})"))]
    TargetOutOfBounds { target: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn append_concatenates() {
        let mut content = FileContent::new();
        content.append("hello");
        content.append(" world");
        assert_eq!(content.read_all(), "hello world");
        assert_eq!(content.len(), 11);
    }

    #[rstest]
    #[case("ab", 0, "XY", "XY")]
    #[case("ab", 1, "XY", "aXY")]
    #[case("ab", 2, "XY", "abXY")]
    #[case("abcdef", 2, "XY", "abXYef")]
    #[case("ab", 5, "X", "ab   X")]
    #[case("", 3, "X", "   X")]
    fn write_at_overwrites_grows_and_pads(
        #[case] initial: &str,
        #[case] pos: usize,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let mut content = FileContent::from_text(initial);
        content.write_at(pos, text);
        assert_eq!(content.read_all(), expected);
    }

    #[test]
    fn read_from_returns_requested_slice() {
        let content = FileContent::from_text("hello world");
        assert_eq!(content.read_from(6, 5).unwrap(), "world");
    }

    #[test]
    fn read_from_clamps_size_to_end() {
        let content = FileContent::from_text("abcde");
        assert_eq!(content.read_from(3, 100).unwrap(), "de");
    }

    #[test]
    fn read_from_rejects_start_at_or_past_end() {
        let content = FileContent::from_text("abcde");
        assert_eq!(
            content.read_from(5, 1),
            Err(ContentError::StartOutOfBounds { start: 5, len: 5 })
        );
        assert!(content.read_from(9, 1).is_err());
    }

    #[test]
    fn read_from_empty_content_is_out_of_bounds() {
        let content = FileContent::new();
        assert!(content.read_from(0, 1).is_err());
    }

    #[test]
    fn move_within_inserts_after_erase() {
        // "234" comes out, leaving "0156789"; target 8 was validated against
        // the original length and clamps to the shortened end.
        let mut content = FileContent::from_text("0123456789");
        content.move_within(2, 3, 8).unwrap();
        assert_eq!(content.read_all(), "0156789234");
    }

    #[test]
    fn move_within_target_before_removed_run() {
        let mut content = FileContent::from_text("0123456789");
        content.move_within(5, 3, 1).unwrap();
        assert_eq!(content.read_all(), "0567123489");
    }

    #[test]
    fn move_within_whole_buffer_is_identity() {
        let mut content = FileContent::from_text("abc");
        content.move_within(0, 3, 0).unwrap();
        assert_eq!(content.read_all(), "abc");
    }

    #[test]
    fn move_within_rejects_bad_source_range() {
        let mut content = FileContent::from_text("abcde");
        assert_eq!(
            content.move_within(3, 3, 0),
            Err(ContentError::RangeOutOfBounds {
                start: 3,
                size: 3,
                len: 5
            })
        );
        assert_eq!(content.read_all(), "abcde");
    }

    #[test]
    fn move_within_rejects_bad_target() {
        let mut content = FileContent::from_text("abcde");
        assert_eq!(
            content.move_within(0, 2, 6),
            Err(ContentError::TargetOutOfBounds { target: 6, len: 5 })
        );
        assert_eq!(content.read_all(), "abcde");
    }

    #[rstest]
    #[case("abcde", 0, "")]
    #[case("abcde", 3, "abc")]
    #[case("abcde", 5, "abcde")]
    #[case("abcde", 100, "abcde")]
    #[case("", 0, "")]
    fn truncate_keeps_prefix(#[case] initial: &str, #[case] max: usize, #[case] expected: &str) {
        let mut content = FileContent::from_text(initial);
        content.truncate(max);
        assert_eq!(content.read_all(), expected);
    }
}
