//! Property-based tests for span validation and highlight segmentation.
//!
//! These use proptest to verify the offset-arithmetic invariants under
//! arbitrary inputs: validation matches the `0 <= start < end <= len`
//! inequality exactly, and segmentation of non-overlapping spans always
//! reconstructs the source text.

use proptest::prelude::*;

use spanmark_core::{segments, Annotation, Span};

/// ASCII text so every offset is a char boundary
fn ascii_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,80}"
}

/// Arbitrary offset pairs, valid or not, near the text length
fn offset_pair(max: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..=max + 4, 0..=max + 4)
}

/// Sorted, non-overlapping spans covering parts of `len` bytes
fn disjoint_spans(len: usize) -> impl Strategy<Value = Vec<Span>> {
    prop::collection::vec(0..=len, 0..8).prop_map(move |mut cuts| {
        cuts.sort_unstable();
        cuts.dedup();
        // Pair up consecutive cut points into disjoint, non-empty spans
        cuts.chunks_exact(2)
            .filter(|pair| pair[0] < pair[1])
            .map(|pair| Span::new(pair[0], pair[1]))
            .collect()
    })
}

proptest! {
    #[test]
    fn validation_matches_the_inequality(text in ascii_text(), pair in offset_pair(80)) {
        let (start, end) = pair;
        let span = Span::new(start, end);
        let valid = start < end && end <= text.len();
        prop_assert_eq!(span.validate(text.len()).is_ok(), valid);
    }

    #[test]
    fn disjoint_segmentation_reconstructs_the_text(text in ascii_text(), cuts in disjoint_spans(80)) {
        let spans: Vec<Span> = cuts
            .into_iter()
            .filter(|s| s.validate(text.len()).is_ok())
            .collect();
        let annotations: Vec<Annotation> = spans
            .iter()
            .map(|s| Annotation::manual(*s, &text[s.start..s.end], "LABEL"))
            .collect();

        let segs = segments(&text, &annotations);

        let rebuilt: String = segs.iter().map(|s| s.text()).collect();
        prop_assert_eq!(&rebuilt, &text);

        let highlights = segs.iter().filter(|s| s.is_highlight()).count();
        prop_assert_eq!(highlights, annotations.len());
    }

    #[test]
    fn segmentation_is_deterministic(text in ascii_text(), cuts in disjoint_spans(80)) {
        let annotations: Vec<Annotation> = cuts
            .into_iter()
            .filter(|s| s.validate(text.len()).is_ok())
            .map(|s| Annotation::suggested(s, &text[s.start..s.end], "LABEL", 0.5))
            .collect();
        prop_assert_eq!(segments(&text, &annotations), segments(&text, &annotations));
    }

    #[test]
    fn overlap_predicate_is_symmetric(a in offset_pair(40), b in offset_pair(40)) {
        let a = Span::ordered(a.0, a.1);
        let b = Span::ordered(b.0, b.1);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}
