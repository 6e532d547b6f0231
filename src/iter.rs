use crate::captures::{Captures, GroupInfo};
use crate::engine::{Engine, EngineError};
use crate::region::Region;
use crate::span::Span;

/// A searcher for advancing through all non-overlapping matches in a
/// haystack.
///
/// In theory, iterating over all matches is simple: search from offset `0`,
/// report the match, set the offset to the end of the match and repeat until
/// the engine reports nothing. Unfortunately, because a pattern may match
/// the empty string, that scheme can get stuck reporting the same empty
/// match at the same position forever. A `Searcher` knows how to detect an
/// empty match that abuts the end of the previous match and forcefully
/// advances the scan past it, while still reporting legitimate empty
/// matches that are not adjacent to a previous match's end.
///
/// A `Searcher` is not itself an iterator. It exposes an explicit
/// [`Searcher::try_advance`] step so that termination and error states are
/// directly observable; [`FindMatches`] and [`CapturesMatches`] are thin
/// iterator wrappers built on top of it. Each searcher owns its scan
/// position, so two searchers over the same haystack are fully independent.
#[derive(Clone, Debug)]
pub struct Searcher<'h> {
    haystack: &'h str,
    /// The offset the next engine search starts from. Non-decreasing, and
    /// bounded by `haystack.len() + 1`.
    last_end: usize,
    /// The end offset of the most recent reported match. This is what lets
    /// us tell an empty match abutting a prior match apart from a
    /// legitimate empty match.
    last_match_end: Option<usize>,
}

impl<'h> Searcher<'h> {
    /// Create a new searcher starting at the beginning of the haystack.
    pub fn new(haystack: &'h str) -> Searcher<'h> {
        Searcher { haystack, last_end: 0, last_match_end: None }
    }

    /// The haystack this searcher scans.
    #[inline]
    pub fn haystack(&self) -> &'h str {
        self.haystack
    }

    /// Advance to the next non-overlapping match.
    ///
    /// `region` is cleared and repopulated by the engine on a hit. On a
    /// match this returns the engine-reported whole-match start offset
    /// together with the whole-match span. `Ok(None)` means the sequence is
    /// exhausted. An engine error ends the sequence without a value for the
    /// failing step.
    pub fn try_advance<E: Engine + ?Sized>(
        &mut self,
        engine: &E,
        region: &mut Region,
    ) -> Result<Option<(usize, Span)>, EngineError> {
        let haystack_len = self.haystack.len();
        loop {
            if self.last_end > haystack_len {
                return Ok(None);
            }
            region.clear();
            let offset = match engine.search(
                self.haystack,
                self.last_end,
                haystack_len,
                region,
            )? {
                None => return Ok(None),
                Some(offset) => offset,
            };
            let span = match region.get(0) {
                None => return Ok(None),
                Some(span) => span,
            };
            // Don't accept empty matches immediately following the last
            // match. i.e., no infinite loops please.
            if span.is_empty() && self.last_match_end == Some(span.end) {
                let width = char_width(self.haystack, self.last_end);
                trace!(
                    "empty match at {} abuts previous match, advancing by {}",
                    span.end,
                    width,
                );
                self.last_end += width;
                continue;
            }
            self.last_end = span.end;
            self.last_match_end = Some(span.end);
            return Ok(Some((offset, span)));
        }
    }
}

/// Returns the byte width of the character starting at `at`, or `1` when
/// `at` is at or past the last full character boundary (or does not fall on
/// a boundary at all).
fn char_width(haystack: &str, at: usize) -> usize {
    match haystack.as_bytes().get(at) {
        None => 1,
        Some(&byte) => utf8_len(byte).unwrap_or(1),
    }
}

/// Given a UTF-8 leading byte, returns the total number of code units in the
/// encoded codepoint it starts. Returns `None` when the byte cannot start a
/// codepoint.
fn utf8_len(byte: u8) -> Option<usize> {
    if byte <= 0x7F {
        Some(1)
    } else if byte & 0b1100_0000 == 0b1000_0000 {
        None
    } else if byte <= 0b1101_1111 {
        Some(2)
    } else if byte <= 0b1110_1111 {
        Some(3)
    } else if byte <= 0b1111_0111 {
        Some(4)
    } else {
        None
    }
}

/// An iterator over all non-overlapping whole-match spans in a haystack.
///
/// This is created by [`Regex::find_iter`](crate::Regex::find_iter). The
/// sequence is lazy, single-pass and finite. If the engine reports an error
/// the iterator stops yielding; the error is then retrievable with
/// [`FindMatches::take_error`].
#[derive(Debug)]
pub struct FindMatches<'r, 'h, E> {
    searcher: Searcher<'h>,
    engine: &'r E,
    region: Region,
    error: Option<EngineError>,
    done: bool,
}

impl<'r, 'h, E: Engine> FindMatches<'r, 'h, E> {
    pub(crate) fn new(engine: &'r E, haystack: &'h str) -> FindMatches<'r, 'h, E> {
        FindMatches {
            searcher: Searcher::new(haystack),
            engine,
            region: Region::new(),
            error: None,
            done: false,
        }
    }

    /// Returns the engine error that ended iteration, if one occurred.
    pub fn take_error(&mut self) -> Option<EngineError> {
        self.error.take()
    }
}

impl<'r, 'h, E: Engine> Iterator for FindMatches<'r, 'h, E> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.done {
            return None;
        }
        match self.searcher.try_advance(self.engine, &mut self.region) {
            Ok(Some((_, span))) => Some(span),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                self.error = Some(err);
                None
            }
        }
    }
}

/// An iterator over the capture sets of all non-overlapping matches in a
/// haystack.
///
/// This is created by
/// [`Regex::captures_iter`](crate::Regex::captures_iter). Operationally the
/// same sequence as [`FindMatches`], except each step yields a full
/// [`Captures`] describing the submatches. Engine errors end the sequence;
/// use [`CapturesMatches::take_error`] to observe them.
#[derive(Debug)]
pub struct CapturesMatches<'r, 'h, E> {
    searcher: Searcher<'h>,
    engine: &'r E,
    group_info: GroupInfo,
    region: Region,
    error: Option<EngineError>,
    done: bool,
}

impl<'r, 'h, E: Engine> CapturesMatches<'r, 'h, E> {
    pub(crate) fn new(
        engine: &'r E,
        group_info: GroupInfo,
        haystack: &'h str,
    ) -> CapturesMatches<'r, 'h, E> {
        CapturesMatches {
            searcher: Searcher::new(haystack),
            engine,
            group_info,
            region: Region::new(),
            error: None,
            done: false,
        }
    }

    /// Returns the engine error that ended iteration, if one occurred.
    pub fn take_error(&mut self) -> Option<EngineError> {
        self.error.take()
    }
}

impl<'r, 'h, E: Engine> Iterator for CapturesMatches<'r, 'h, E> {
    type Item = Captures<'h>;

    fn next(&mut self) -> Option<Captures<'h>> {
        if self.done {
            return None;
        }
        match self.searcher.try_advance(self.engine, &mut self.region) {
            Ok(Some((offset, _))) => Some(Captures::new(
                self.searcher.haystack(),
                self.region.clone(),
                offset,
                self.group_info.clone(),
            )),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                self.error = Some(err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captures::GroupInfo;

    /// A little hand-rolled engine equivalent to the pattern `\d*`: at the
    /// scan offset it matches the (possibly empty) run of ASCII digits
    /// starting there.
    #[derive(Debug)]
    struct DigitStar {
        group_info: GroupInfo,
    }

    impl DigitStar {
        fn new() -> DigitStar {
            DigitStar { group_info: GroupInfo::empty() }
        }
    }

    impl Engine for DigitStar {
        fn search(
            &self,
            haystack: &str,
            start: usize,
            end: usize,
            region: &mut Region,
        ) -> Result<Option<usize>, EngineError> {
            if start > end {
                return Ok(None);
            }
            // `\d*` matches the empty string everywhere, so the leftmost
            // match always begins at the scan offset.
            let bytes = haystack.as_bytes();
            let mut stop = start;
            while stop < end && bytes[stop].is_ascii_digit() {
                stop += 1;
            }
            region.resize(1);
            region.set(0, Some(Span::from(start..stop)));
            Ok(Some(start))
        }

        fn group_info(&self) -> &GroupInfo {
            &self.group_info
        }
    }

    /// An engine that always fails, for exercising the error state.
    #[derive(Debug)]
    struct Broken {
        group_info: GroupInfo,
    }

    impl Engine for Broken {
        fn search(
            &self,
            _: &str,
            _: usize,
            _: usize,
            _: &mut Region,
        ) -> Result<Option<usize>, EngineError> {
            Err(EngineError::from_code(-21))
        }

        fn group_info(&self) -> &GroupInfo {
            &self.group_info
        }
    }

    fn spans<E: Engine>(engine: &E, haystack: &str) -> Vec<Span> {
        let mut searcher = Searcher::new(haystack);
        let mut region = Region::new();
        let mut got = vec![];
        while let Some((_, span)) =
            searcher.try_advance(engine, &mut region).unwrap()
        {
            got.push(span);
        }
        got
    }

    #[test]
    fn one_zero_length() {
        let engine = DigitStar::new();
        assert_eq!(
            vec![Span::from(0..0), Span::from(1..2), Span::from(3..4)],
            spans(&engine, "a1b2"),
        );
    }

    #[test]
    fn many_zero_length() {
        // Consecutive empty matches separated from the previous match's end
        // by a non-empty gap are reported; repeats at the exact same
        // boundary are suppressed.
        let engine = DigitStar::new();
        assert_eq!(
            vec![
                Span::from(0..0),
                Span::from(1..2),
                Span::from(3..3),
                Span::from(4..4),
                Span::from(5..6),
            ],
            spans(&engine, "a1bbb2"),
        );
    }

    #[test]
    fn empty_haystack() {
        let engine = DigitStar::new();
        assert_eq!(vec![Span::from(0..0)], spans(&engine, ""));
    }

    #[test]
    fn advances_by_whole_characters() {
        // The skip after a suppressed empty match must not split the
        // snowman, which is three bytes long.
        let engine = DigitStar::new();
        assert_eq!(
            vec![Span::from(0..0), Span::from(3..4)],
            spans(&engine, "\u{2603}7"),
        );
    }

    #[test]
    fn error_is_terminal() {
        let engine = Broken { group_info: GroupInfo::empty() };
        let mut it = FindMatches::new(&engine, "abc");
        assert_eq!(None, it.next());
        assert_eq!(Some(EngineError::from_code(-21)), it.take_error());
        assert_eq!(None, it.next());
        assert_eq!(None, it.take_error());
    }

    #[test]
    fn independent_searchers() {
        let engine = DigitStar::new();
        let haystack = "a1b2";
        let mut s1 = Searcher::new(haystack);
        let mut s2 = Searcher::new(haystack);
        let mut r1 = Region::new();
        let mut r2 = Region::new();
        let m1 = s1.try_advance(&engine, &mut r1).unwrap();
        let m2 = s2.try_advance(&engine, &mut r2).unwrap();
        assert_eq!(m1, m2);
    }
}
