//! Splitting document text into plain and highlighted segments.

use crate::model::Annotation;

/// One piece of the rendered text, in left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Plain {
        text: &'a str,
    },
    Highlight {
        text: &'a str,
        label: &'a str,
        confidence: f64,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain { text } => text,
            Segment::Highlight { text, .. } => text,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight { .. })
    }
}

/// Split `text` into an ordered sequence of plain and highlighted segments.
///
/// Annotations are walked in start order (stable, so annotations sharing a
/// start keep their insertion order) with a cursor over the text. An
/// annotation starting before the cursor (one that overlaps its
/// predecessor) is still emitted at its recorded boundaries, which can
/// repeat characters already emitted. Overlap resolution belongs to
/// whatever created the annotations; reviewers need to see the raw
/// overlap.
///
/// Spans must have been validated against `text` before they get here.
pub fn segments<'a>(text: &'a str, annotations: &'a [Annotation]) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| a.span.start);

    let mut out = Vec::new();
    let mut cursor = 0;

    for ann in sorted {
        if ann.span.start > cursor {
            out.push(Segment::Plain {
                text: &text[cursor..ann.span.start],
            });
        }

        out.push(Segment::Highlight {
            text: &text[ann.span.start..ann.span.end],
            label: &ann.label,
            confidence: ann.confidence,
        });

        cursor = ann.span.end;
    }

    if cursor < text.len() {
        out.push(Segment::Plain {
            text: &text[cursor..],
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Annotation, Span};

    const TEXT: &str = "The quick brown fox";

    #[test]
    fn test_no_annotations_yields_whole_text() {
        let segs = segments(TEXT, &[]);
        assert_eq!(segs, vec![Segment::Plain { text: TEXT }]);
    }

    #[test]
    fn test_empty_text_yields_no_segments() {
        assert!(segments("", &[]).is_empty());
    }

    #[test]
    fn test_single_annotation_splits_text() {
        let anns = vec![Annotation::manual(Span::new(16, 19), "fox", "ANIMAL")];
        let segs = segments(TEXT, &anns);
        assert_eq!(
            segs,
            vec![
                Segment::Plain {
                    text: "The quick brown "
                },
                Segment::Highlight {
                    text: "fox",
                    label: "ANIMAL",
                    confidence: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_unsorted_input_is_ordered_by_start() {
        let anns = vec![
            Annotation::manual(Span::new(16, 19), "fox", "ANIMAL"),
            Annotation::manual(Span::new(4, 9), "quick", "SPEED"),
        ];
        let segs = segments(TEXT, &anns);
        let texts: Vec<_> = segs.iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["The ", "quick", " brown ", "fox"]);
    }

    #[test]
    fn test_reconstruction_for_non_overlapping_spans() {
        let anns = vec![
            Annotation::manual(Span::new(0, 3), "The", "DET"),
            Annotation::suggested(Span::new(10, 15), "brown", "COLOR", 0.6),
        ];
        let segs = segments(TEXT, &anns);
        let rebuilt: String = segs.iter().map(|s| s.text()).collect();
        assert_eq!(rebuilt, TEXT);
        assert_eq!(segs.iter().filter(|s| s.is_highlight()).count(), 2);
    }

    #[test]
    fn test_overlapping_spans_are_not_clipped() {
        // [4, 15) and [10, 19) overlap over "brown"
        let anns = vec![
            Annotation::manual(Span::new(4, 15), "quick brown", "A"),
            Annotation::manual(Span::new(10, 19), "brown fox", "B"),
        ];
        let segs = segments(TEXT, &anns);
        let texts: Vec<_> = segs.iter().map(|s| s.text()).collect();
        // The second highlight repeats "brown" at its recorded boundaries
        assert_eq!(texts, vec!["The ", "quick brown", "brown fox"]);
    }

    #[test]
    fn test_shared_start_keeps_insertion_order() {
        let anns = vec![
            Annotation::manual(Span::new(4, 9), "quick", "FIRST"),
            Annotation::manual(Span::new(4, 15), "quick brown", "SECOND"),
        ];
        let segs = segments(TEXT, &anns);
        let labels: Vec<_> = segs
            .iter()
            .filter_map(|s| match s {
                Segment::Highlight { label, .. } => Some(*label),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["FIRST", "SECOND"]);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let anns = vec![
            Annotation::manual(Span::new(4, 15), "quick brown", "A"),
            Annotation::suggested(Span::new(10, 19), "brown fox", "B", 0.4),
        ];
        assert_eq!(segments(TEXT, &anns), segments(TEXT, &anns));
    }
}
