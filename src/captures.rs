use std::collections::HashMap;
use std::sync::Arc;

use crate::region::Region;
use crate::span::Span;

/// Represents information about capturing groups in a compiled pattern.
///
/// The information encapsulated by this type consists of the following:
///
/// * A map from every capture group name to its corresponding capture group
/// indices. A pattern may legally bind the same name to more than one group
/// index, which is how mutually exclusive alternation branches get to share
/// a name.
/// * A map from every capture group index to its corresponding capture group
/// name, if one exists.
///
/// A `GroupInfo` is built once when a pattern is compiled and is then shared,
/// cheaply via reference counting, with every [`Captures`](crate::Captures)
/// value produced from that pattern.
#[derive(Clone, Debug)]
pub struct GroupInfo(Arc<GroupInfoInner>);

impl GroupInfo {
    /// Build group metadata from capture group names in declaration order.
    ///
    /// The first entry corresponds to the implicit group spanning the whole
    /// match and must be unnamed. Every subsequent entry corresponds to the
    /// next capture group of the pattern, with `None` for unnamed groups.
    ///
    /// This returns an error if no entries are given or if the first entry
    /// carries a name.
    pub fn new<I, N>(names: I) -> Result<GroupInfo, GroupInfoError>
    where
        I: IntoIterator<Item = Option<N>>,
        N: AsRef<str>,
    {
        let mut inner = GroupInfoInner {
            name_to_index: HashMap::new(),
            index_to_name: vec![],
        };
        for (index, maybe_name) in names.into_iter().enumerate() {
            match maybe_name {
                None => inner.index_to_name.push(None),
                Some(name) => {
                    if index == 0 {
                        return Err(GroupInfoError::first_must_be_unnamed());
                    }
                    let name = Arc::<str>::from(name.as_ref());
                    inner
                        .name_to_index
                        .entry(Arc::clone(&name))
                        .or_insert_with(Vec::new)
                        .push(index);
                    inner.index_to_name.push(Some(name));
                }
            }
        }
        if inner.index_to_name.is_empty() {
            return Err(GroupInfoError::missing_groups());
        }
        Ok(GroupInfo(Arc::new(inner)))
    }

    /// Return group metadata with no groups at all.
    ///
    /// This is useful for engines that expose no capture group metadata.
    /// Name lookups on such a pattern never resolve.
    pub fn empty() -> GroupInfo {
        GroupInfo(Arc::new(GroupInfoInner {
            name_to_index: HashMap::new(),
            index_to_name: vec![],
        }))
    }

    /// Return all group indices bound to the given name, in declaration
    /// order. The slice is empty when the name is unknown.
    #[inline]
    pub fn to_indices(&self, name: &str) -> &[usize] {
        match self.0.name_to_index.get(name) {
            None => &[],
            Some(indices) => indices,
        }
    }

    /// Return the name of the group at the given index, if it has one.
    #[inline]
    pub fn to_name(&self, index: usize) -> Option<&str> {
        self.0.index_to_name.get(index)?.as_deref()
    }

    /// Returns the number of groups, including the implicit whole-match
    /// group at index `0`.
    #[inline]
    pub fn group_len(&self) -> usize {
        self.0.index_to_name.len()
    }

    /// Return an iterator over all groups and their names (if present), in
    /// declaration order, starting with the always unnamed group `0`.
    #[inline]
    pub fn names(&self) -> GroupInfoNames<'_> {
        GroupInfoNames { it: self.0.index_to_name.iter() }
    }
}

/// The inner guts of `GroupInfo`. This type only exists so that it can be
/// wrapped in an `Arc` to make `GroupInfo` reference counted.
#[derive(Debug)]
struct GroupInfoInner {
    name_to_index: HashMap<Arc<str>, Vec<usize>>,
    index_to_name: Vec<Option<Arc<str>>>,
}

/// An error that may occur when building a `GroupInfo`.
#[derive(Clone, Debug)]
pub struct GroupInfoError {
    kind: GroupInfoErrorKind,
}

#[derive(Clone, Debug)]
enum GroupInfoErrorKind {
    /// Occurs when a name is given for the group at index 0. That group
    /// always corresponds to the whole match and must be unnamed.
    FirstMustBeUnnamed,
    /// Occurs when no groups at all are given. A pattern always has at
    /// least the implicit whole-match group.
    MissingGroups,
}

impl GroupInfoError {
    fn first_must_be_unnamed() -> GroupInfoError {
        GroupInfoError { kind: GroupInfoErrorKind::FirstMustBeUnnamed }
    }

    fn missing_groups() -> GroupInfoError {
        GroupInfoError { kind: GroupInfoErrorKind::MissingGroups }
    }
}

impl std::error::Error for GroupInfoError {}

impl core::fmt::Display for GroupInfoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            GroupInfoErrorKind::FirstMustBeUnnamed => {
                write!(f, "first capture group (at index 0) has a name (it must be unnamed)")
            }
            GroupInfoErrorKind::MissingGroups => {
                write!(f, "no capture groups given (the implicit whole-match group is required)")
            }
        }
    }
}

/// An iterator over capturing groups and their names, created by
/// [`GroupInfo::names`].
#[derive(Clone, Debug)]
pub struct GroupInfoNames<'a> {
    it: core::slice::Iter<'a, Option<Arc<str>>>,
}

impl<'a> Iterator for GroupInfoNames<'a> {
    type Item = Option<&'a str>;

    fn next(&mut self) -> Option<Option<&'a str>> {
        self.it.next().map(|x| x.as_deref())
    }
}

/// A group of captured spans for a single match, bound to the haystack the
/// match was found in.
///
/// The 0th capture always corresponds to the entire match. Each subsequent
/// index corresponds to the next capture group of the pattern, in
/// declaration order. All positions are byte offsets into the haystack.
///
/// A `Captures` value borrows the haystack it was computed over, so the
/// haystack must outlive it. The [`Region`] produced by the engine search is
/// owned by the `Captures` once built.
#[derive(Clone, Debug)]
pub struct Captures<'h> {
    haystack: &'h str,
    region: Region,
    offset: usize,
    group_info: GroupInfo,
}

impl<'h> Captures<'h> {
    pub(crate) fn new(
        haystack: &'h str,
        region: Region,
        offset: usize,
        group_info: GroupInfo,
    ) -> Captures<'h> {
        Captures { haystack, region, offset, group_info }
    }

    /// Returns the number of captured groups, including the whole match.
    #[inline]
    pub fn len(&self) -> usize {
        self.region.len()
    }

    /// Returns true if and only if there are no captured groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The engine-reported start offset of the whole match.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The haystack these captures were found in.
    #[inline]
    pub fn haystack(&self) -> &'h str {
        self.haystack
    }

    /// Returns the span of the group at the given index.
    ///
    /// Returns `None` if the index is not a valid capture group or if the
    /// group did not participate in the match.
    #[inline]
    pub fn pos(&self, index: usize) -> Option<Span> {
        self.region.get(index)
    }

    /// Returns the matched text of the group at the given index.
    ///
    /// If the index isn't a valid capture group or the group didn't match
    /// anything, then the empty string is returned.
    #[inline]
    pub fn get(&self, index: usize) -> &'h str {
        match self.pos(index) {
            None => "",
            Some(span) => &self.haystack[span],
        }
    }

    /// Returns the span of the first group bound to the given name that
    /// participated in the match.
    ///
    /// A name may be bound to several group indices when alternation
    /// branches share it; the indices are tried in declaration order.
    /// Returns `None` when the name is unknown or none of its groups
    /// matched. That is never an error.
    #[inline]
    pub fn pos_name(&self, name: &str) -> Option<Span> {
        self.group_info
            .to_indices(name)
            .iter()
            .find_map(|&index| self.region.get(index))
    }

    /// Returns the matched text of the first group bound to the given name
    /// that participated in the match, or the empty string when the name is
    /// unknown or none of its groups matched.
    #[inline]
    pub fn get_name(&self, name: &str) -> &'h str {
        match self.pos_name(name) {
            None => "",
            Some(span) => &self.haystack[span],
        }
    }

    /// Returns an iterator over the matched text of every group, in order,
    /// with the empty string standing in for groups that didn't match.
    #[inline]
    pub fn iter<'c>(&'c self) -> CapturesIter<'c, 'h> {
        CapturesIter { caps: self, index: 0 }
    }
}

/// An iterator over the text matched by each capture group, created by
/// [`Captures::iter`].
#[derive(Debug)]
pub struct CapturesIter<'c, 'h> {
    caps: &'c Captures<'h>,
    index: usize,
}

impl<'c, 'h> Iterator for CapturesIter<'c, 'h> {
    type Item = &'h str;

    fn next(&mut self) -> Option<&'h str> {
        if self.index >= self.caps.len() {
            return None;
        }
        let text = self.caps.get(self.index);
        self.index += 1;
        Some(text)
    }
}
