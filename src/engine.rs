use crate::captures::GroupInfo;
use crate::region::Region;

/// The boundary with an external match engine.
///
/// This crate does not compile or execute patterns itself. Everything it
/// provides — capture sets, non-overlapping iteration, replacement — is
/// expressed against this trait, so any engine that can report the leftmost
/// match in a subrange of a haystack can sit underneath it.
///
/// Implementations must be pure with respect to caller-owned state: all
/// mutable scratch for a search lives in the `Region` passed in, which is
/// what makes one compiled pattern usable from several threads at once as
/// long as each caller supplies its own region.
pub trait Engine {
    /// Search for the leftmost match in `haystack[start..end]`.
    ///
    /// On a match, the whole-match start offset is returned and `region` is
    /// populated with one slot per capture group, slot `0` spanning the
    /// whole match. All offsets are byte offsets into `haystack` itself,
    /// not into the searched subrange, so the engine may take surrounding
    /// context into account for look-around assertions.
    ///
    /// Returns `Ok(None)` when nothing in the subrange matches and an
    /// [`EngineError`] when the engine itself fails.
    fn search(
        &self,
        haystack: &str,
        start: usize,
        end: usize,
        region: &mut Region,
    ) -> Result<Option<usize>, EngineError>;

    /// Static, pattern-derived capture group metadata.
    ///
    /// In particular, this carries every group index bound to a group name,
    /// since a pattern may bind one name to several alternation branches.
    fn group_info(&self) -> &GroupInfo;
}

impl<'a, E: Engine + ?Sized> Engine for &'a E {
    fn search(
        &self,
        haystack: &str,
        start: usize,
        end: usize,
        region: &mut Region,
    ) -> Result<Option<usize>, EngineError> {
        (**self).search(haystack, start, end, region)
    }

    fn group_info(&self) -> &GroupInfo {
        (**self).group_info()
    }
}

/// An error reported by the external match engine.
///
/// The engine's failure modes are opaque to this layer; all that is carried
/// across the boundary is the engine's numeric failure code. Errors are
/// propagated verbatim to the caller — there are no retries and no default
/// substitutions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineError {
    code: i32,
}

impl EngineError {
    /// Create an error from an engine failure code.
    pub fn from_code(code: i32) -> EngineError {
        EngineError { code }
    }

    /// The engine's failure code.
    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::error::Error for EngineError {}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "match engine reported error code {}", self.code)
    }
}
