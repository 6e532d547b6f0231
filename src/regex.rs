use crate::captures::{Captures, GroupInfo, GroupInfoNames};
use crate::engine::{Engine, EngineError};
use crate::error::Error;
use crate::iter::{CapturesMatches, FindMatches, Searcher};
use crate::region::Region;
use crate::span::Span;
use crate::template::{Template, TemplateSyntax};

/// A compiled pattern paired with a replacement-template syntax.
///
/// `Regex` does not compile patterns. It wraps any [`Engine`] — the
/// boundary to whatever actually executes searches — and layers the
/// conveniences on top: single-shot searching, non-overlapping iteration,
/// replacement and splitting. The [`TemplateSyntax`] chosen at construction
/// decides which replacement grammar the string-template replace methods
/// use.
///
/// A `Regex` is safe to share between threads: every operation allocates
/// its own scratch [`Region`], and the engine contract requires searches to
/// be pure with respect to caller-owned state.
#[derive(Clone, Debug)]
pub struct Regex<E> {
    engine: E,
    syntax: TemplateSyntax,
}

impl<E: Engine> Regex<E> {
    /// Wrap an engine using the default (Ruby) replacement syntax.
    pub fn new(engine: E) -> Regex<E> {
        Regex::with_syntax(engine, TemplateSyntax::default())
    }

    /// Wrap an engine using the given replacement syntax.
    pub fn with_syntax(engine: E, syntax: TemplateSyntax) -> Regex<E> {
        Regex { engine, syntax }
    }

    /// The replacement syntax this regex was built with.
    #[inline]
    pub fn syntax(&self) -> TemplateSyntax {
        self.syntax
    }

    /// A reference to the underlying engine.
    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The pattern's capture group metadata.
    #[inline]
    pub fn group_info(&self) -> &GroupInfo {
        self.engine.group_info()
    }

    /// An iterator over the pattern's capture group names in declaration
    /// order, starting with the always unnamed whole-match group.
    #[inline]
    pub fn capture_names(&self) -> GroupInfoNames<'_> {
        self.group_info().names()
    }

    /// Compile a replacement template under this regex's syntax.
    ///
    /// This is useful to pay the template parse once when the same
    /// replacement is applied to many haystacks; the replace methods taking
    /// a template string otherwise compile it per call.
    pub fn template(
        &self,
        template: &str,
    ) -> Result<Template, crate::template::TemplateError> {
        Template::new(self.syntax, template)
    }

    /// Returns true if and only if the pattern matches somewhere in the
    /// haystack.
    pub fn is_match(&self, haystack: &str) -> Result<bool, EngineError> {
        Ok(self.find(haystack)?.is_some())
    }

    /// Returns the span of the leftmost match in the haystack, if any.
    pub fn find(&self, haystack: &str) -> Result<Option<Span>, EngineError> {
        let mut region = Region::new();
        let result = self.engine.search(
            haystack,
            0,
            haystack.len(),
            &mut region,
        )?;
        Ok(result.and_then(|_| region.get(0)))
    }

    /// Returns the capture groups of the leftmost match in the haystack.
    /// Capture group 0 always corresponds to the entire match. If no match
    /// is found, then `None` is returned.
    pub fn captures<'h>(
        &self,
        haystack: &'h str,
    ) -> Result<Option<Captures<'h>>, EngineError> {
        let mut region = Region::new();
        match self.engine.search(haystack, 0, haystack.len(), &mut region)? {
            None => Ok(None),
            Some(offset) => Ok(Some(Captures::new(
                haystack,
                region,
                offset,
                self.engine.group_info().clone(),
            ))),
        }
    }

    /// Returns an iterator over each non-overlapping whole-match span in
    /// the haystack, leftmost first.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> FindMatches<'r, 'h, E> {
        FindMatches::new(&self.engine, haystack)
    }

    /// Returns an iterator over the capture groups of each non-overlapping
    /// match in the haystack, leftmost first.
    pub fn captures_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> CapturesMatches<'r, 'h, E> {
        CapturesMatches::new(
            &self.engine,
            self.engine.group_info().clone(),
            haystack,
        )
    }

    /// Replaces the leftmost match in the haystack with the expansion of
    /// the replacement template. If no match is found, a copy of the
    /// haystack is returned unchanged.
    pub fn replace(
        &self,
        haystack: &str,
        template: &str,
    ) -> Result<String, Error> {
        self.replacen(haystack, template, 1)
    }

    /// Replaces all non-overlapping matches in the haystack with the
    /// expansion of the replacement template. This is the same as calling
    /// [`Regex::replacen`] with a limit of 0.
    pub fn replace_all(
        &self,
        haystack: &str,
        template: &str,
    ) -> Result<String, Error> {
        self.replacen(haystack, template, 0)
    }

    /// Replaces at most `limit` non-overlapping matches in the haystack
    /// with the expansion of the replacement template, leftmost first. A
    /// limit of 0 means all matches.
    ///
    /// The template is compiled under this regex's [`TemplateSyntax`]; see
    /// [`Template`] for the reference grammars.
    pub fn replacen(
        &self,
        haystack: &str,
        template: &str,
        limit: usize,
    ) -> Result<String, Error> {
        let template = Template::new(self.syntax, template)?;
        self.replacen_with(haystack, limit, |caps, dst| {
            template.expand(caps, dst);
            Ok(())
        })
    }

    /// Replaces the leftmost match in the haystack with the string produced
    /// by the replacement function.
    pub fn replace_fn<F>(
        &self,
        haystack: &str,
        replacement: F,
    ) -> Result<String, Error>
    where
        F: FnMut(&Captures<'_>) -> Result<String, Error>,
    {
        self.replacen_fn(haystack, 1, replacement)
    }

    /// Replaces all non-overlapping matches in the haystack with the
    /// strings produced by the replacement function.
    pub fn replace_all_fn<F>(
        &self,
        haystack: &str,
        replacement: F,
    ) -> Result<String, Error>
    where
        F: FnMut(&Captures<'_>) -> Result<String, Error>,
    {
        self.replacen_fn(haystack, 0, replacement)
    }

    /// Replaces at most `limit` non-overlapping matches in the haystack
    /// with the strings produced by the replacement function, leftmost
    /// first. A limit of 0 means all matches.
    ///
    /// If the function returns an error for any match, the whole operation
    /// fails immediately and no partial text is returned.
    pub fn replacen_fn<F>(
        &self,
        haystack: &str,
        limit: usize,
        mut replacement: F,
    ) -> Result<String, Error>
    where
        F: FnMut(&Captures<'_>) -> Result<String, Error>,
    {
        self.replacen_with(haystack, limit, |caps, dst| {
            dst.push_str(&replacement(caps)?);
            Ok(())
        })
    }

    fn replacen_with<F>(
        &self,
        haystack: &str,
        limit: usize,
        mut append: F,
    ) -> Result<String, Error>
    where
        F: FnMut(&Captures<'_>, &mut String) -> Result<(), Error>,
    {
        let mut searcher = Searcher::new(haystack);
        let mut region = Region::new();
        let mut dst = String::with_capacity(haystack.len());
        let mut last = 0;
        let mut count = 0;
        while limit == 0 || count < limit {
            let (offset, span) = match searcher
                .try_advance(&self.engine, &mut region)
                .map_err(Error::Engine)?
            {
                None => break,
                Some(found) => found,
            };
            dst.push_str(&haystack[last..span.start]);
            let caps = Captures::new(
                haystack,
                region.clone(),
                offset,
                self.engine.group_info().clone(),
            );
            append(&caps, &mut dst)?;
            last = span.end;
            count += 1;
        }
        dst.push_str(&haystack[last..]);
        Ok(dst)
    }

    /// Returns the substrings of the haystack delimited by matches of the
    /// pattern. Each element corresponds to text that isn't matched by the
    /// pattern, including any (possibly empty) leading and trailing
    /// segments.
    pub fn split<'h>(
        &self,
        haystack: &'h str,
    ) -> Result<Vec<&'h str>, EngineError> {
        self.split_with_limit(haystack, None)
    }

    /// Returns at most `limit` substrings of the haystack delimited by
    /// matches of the pattern. At most `limit - 1` delimiter matches are
    /// consumed; the remainder of the haystack becomes the final segment.
    /// A limit of 0 returns no substrings.
    pub fn splitn<'h>(
        &self,
        haystack: &'h str,
        limit: usize,
    ) -> Result<Vec<&'h str>, EngineError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.split_with_limit(haystack, Some(limit))
    }

    fn split_with_limit<'h>(
        &self,
        haystack: &'h str,
        limit: Option<usize>,
    ) -> Result<Vec<&'h str>, EngineError> {
        let mut searcher = Searcher::new(haystack);
        let mut region = Region::new();
        let mut segments = Vec::new();
        let mut last = 0;
        loop {
            if let Some(limit) = limit {
                if segments.len() + 1 >= limit {
                    break;
                }
            }
            match searcher.try_advance(&self.engine, &mut region)? {
                None => break,
                Some((_, span)) => {
                    segments.push(&haystack[last..span.start]);
                    last = span.end;
                }
            }
        }
        segments.push(&haystack[last..]);
        Ok(segments)
    }
}
