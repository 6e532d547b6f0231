use quickcheck::quickcheck;

use crate::engine;

quickcheck! {
    // A pattern that can never match leaves the haystack untouched.
    fn replace_all_no_match_is_identity(haystack: String) -> bool {
        let re = engine::regex(r"[^\s\S]");
        re.replace_all(&haystack, "X").unwrap() == haystack
    }

    // A limit of zero means "replace every match".
    fn replacen_zero_is_replace_all(haystack: String) -> bool {
        let re = engine::regex(r"\d+");
        re.replacen(&haystack, "X", 0).unwrap()
            == re.replace_all(&haystack, "X").unwrap()
    }

    // Interleaving split segments with the matched delimiters rebuilds the
    // haystack exactly.
    fn split_segments_rebuild_haystack(haystack: String) -> bool {
        let re = engine::regex(r"\s+");
        let segments = re.split(&haystack).unwrap();
        let delimiters: Vec<_> = re.find_iter(&haystack).collect();
        if segments.len() != delimiters.len() + 1 {
            return false;
        }
        let mut rebuilt = String::new();
        for (i, segment) in segments.iter().enumerate() {
            rebuilt.push_str(segment);
            if let Some(&span) = delimiters.get(i) {
                rebuilt.push_str(&haystack.as_str()[span]);
            }
        }
        rebuilt == haystack
    }

    // Iteration never yields overlapping or out-of-order spans.
    fn find_iter_spans_are_ordered(haystack: String) -> bool {
        let re = engine::regex(r"\w+");
        let mut last_end = 0;
        for span in re.find_iter(&haystack) {
            if span.start < last_end || span.end < span.start {
                return false;
            }
            last_end = span.end;
        }
        true
    }
}
