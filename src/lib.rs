/*!
Capture, iteration and replacement primitives layered over a pluggable
regex engine.

This crate owns the parts of a regex library that sit *above* the search
algorithm: the [`Span`]/[`Region`]/[`Captures`] data model describing where
a pattern and its groups matched, the non-overlapping match iteration
protocol (including the careful handling of zero-length matches that would
otherwise loop forever), and a multi-syntax replacement [`Template`] engine
covering the `$1`/`${name}` and `\1`/`\g<name>`/`\k<name>` reference
grammars. Replace and split operations are built from those pieces.

What it deliberately does not own is the engine: pattern compilation and
the actual search are consumed through the [`Engine`] trait, so any engine
that can report the leftmost match in a subrange of a haystack — with
byte-offset capture group spans — can sit underneath.

# Example

A minimal engine that matches a literal substring, plugged into the
replacement machinery:

```
use regex_surface::{
    Engine, EngineError, GroupInfo, Region, Regex, Span, TemplateSyntax,
};

struct Literal {
    needle: String,
    group_info: GroupInfo,
}

impl Literal {
    fn new(needle: &str) -> Literal {
        Literal {
            needle: needle.to_string(),
            group_info: GroupInfo::new([None::<&str>]).unwrap(),
        }
    }
}

impl Engine for Literal {
    fn search(
        &self,
        haystack: &str,
        start: usize,
        end: usize,
        region: &mut Region,
    ) -> Result<Option<usize>, EngineError> {
        match haystack[start..end].find(&self.needle) {
            None => Ok(None),
            Some(offset) => {
                let at = start + offset;
                region.resize(1);
                region.set(0, Some(Span::from(at..at + self.needle.len())));
                Ok(Some(at))
            }
        }
    }

    fn group_info(&self) -> &GroupInfo {
        &self.group_info
    }
}

let re = Regex::with_syntax(Literal::new("world"), TemplateSyntax::Java);
assert_eq!("hello [world]!", re.replace_all("hello world!", "[$0]")?);
assert_eq!(vec!["hello ", "!"], re.split("hello world!")?);
# Ok::<(), regex_surface::Error>(())
```
*/

pub use crate::captures::{
    Captures, CapturesIter, GroupInfo, GroupInfoError, GroupInfoNames,
};
pub use crate::engine::{Engine, EngineError};
pub use crate::error::Error;
pub use crate::iter::{CapturesMatches, FindMatches, Searcher};
pub use crate::regex::Regex;
pub use crate::region::Region;
pub use crate::span::Span;
pub use crate::template::{Template, TemplateError, TemplateSyntax};

#[macro_use]
mod macros;

mod captures;
mod engine;
mod error;
mod iter;
mod regex;
mod region;
mod span;
mod template;
