//! # Índice de Spans
//!
//! Decide qual anotação cobre um token. Um token com offset `o` é coberto pela
//! anotação `[start, end)` quando:
//!
//! - `o == start` → o token **começa** a anotação ([`Coverage::Start`])
//! - `start < o < end` → o token está **dentro** da anotação ([`Coverage::Inside`])
//!
//! ## Ordem entre anotações sobrepostas
//!
//! Quando várias anotações cobrem o mesmo token, vence a primeira na ordem
//! determinística abaixo (e não a ordem incidental da entrada):
//!
//! 1. menor offset inicial
//! 2. span mais longo
//! 3. ordem original da entrada
//!
//! O módulo também oferece o caminho inverso, [`decode_spans`], que reconstrói
//! os spans de tokens a partir de uma sequência de tags BIO/BIEO.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::data::Annotation;
use crate::tagger::SpanTag;

/// Como um token é coberto por uma anotação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Start,
    Inside,
}

/// Anotações de uma Part em ordem determinística de consulta.
#[derive(Debug, Clone)]
pub struct SpanIndex<'a> {
    ordered: Vec<&'a Annotation>,
}

impl<'a> SpanIndex<'a> {
    pub fn new(annotations: &'a [Annotation]) -> Self {
        let mut ordered: Vec<&Annotation> = annotations.iter().collect();
        // sort_by_key é estável: empates preservam a ordem da entrada
        ordered.sort_by_key(|a| (a.offset, Reverse(a.char_len())));
        Self { ordered }
    }

    /// Anotações na ordem de consulta.
    pub fn annotations(&self) -> &[&'a Annotation] {
        &self.ordered
    }

    /// Primeira anotação que cobre `offset`.
    pub fn covering(&self, offset: usize) -> Option<(&'a Annotation, Coverage)> {
        self.covering_where(offset, |_| true)
    }

    /// Primeira anotação aceita por `accept` que cobre `offset`.
    /// Anotações rejeitadas são puladas e a busca continua.
    pub fn covering_where<F>(&self, offset: usize, accept: F) -> Option<(&'a Annotation, Coverage)>
    where
        F: Fn(&Annotation) -> bool,
    {
        self.ordered
            .iter()
            .filter(|a| accept(**a))
            .find_map(|a| coverage(a, offset).map(|c| (*a, c)))
    }
}

/// Cobertura de `offset` por uma única anotação.
pub fn coverage(ann: &Annotation, offset: usize) -> Option<Coverage> {
    if offset == ann.offset {
        Some(Coverage::Start)
    } else if ann.offset < offset && offset < ann.end() {
        Some(Coverage::Inside)
    } else {
        None
    }
}

/// Um intervalo de tokens com a classe associada.
///
/// # Exemplo
/// Em `["BRAF", "V600E", "mutation"]` com tags `B-e_2 E-e_2 O`:
/// `Span { start: 0, end: 2, label: "e_2" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Índice do token inicial (inclusivo)
    pub start: usize,
    /// Índice do token final (exclusivo)
    pub end: usize,
    pub label: String,
}

/// Converte uma sequência de tags BIO ou BIEO em spans de tokens.
///
/// - `B-X` abre um span novo (fechando o anterior)
/// - `I-X` continua um span de mesma classe; com classe diferente ou sem span aberto, abre um
/// - `E-X` fecha o span incluindo o token atual
/// - `O` (ou tag desconhecida) fecha o span aberto
pub fn decode_spans<S: AsRef<str>>(tags: &[S]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, String)> = None;

    for (i, tag) in tags.iter().enumerate() {
        match SpanTag::from_label(tag.as_ref()) {
            Some(SpanTag::Begin(class)) => {
                close(&mut spans, &mut open, i);
                open = Some((i, class));
            }
            Some(SpanTag::Inside(class)) => {
                let continues = matches!(&open, Some((_, c)) if *c == class);
                if !continues {
                    close(&mut spans, &mut open, i);
                    open = Some((i, class));
                }
            }
            Some(SpanTag::End(class)) => {
                let continues = matches!(&open, Some((_, c)) if *c == class);
                if !continues {
                    close(&mut spans, &mut open, i);
                    open = Some((i, class));
                }
                close(&mut spans, &mut open, i + 1);
            }
            Some(SpanTag::Outside) | None => close(&mut spans, &mut open, i),
        }
    }

    // Fecha último span se aberto
    close(&mut spans, &mut open, tags.len());
    spans
}

fn close(spans: &mut Vec<Span>, open: &mut Option<(usize, String)>, end: usize) {
    if let Some((start, label)) = open.take() {
        spans.push(Span { start, end, label });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_half_open() {
        let ann = Annotation::new(5, "V600E", "e_2");
        assert_eq!(coverage(&ann, 5), Some(Coverage::Start));
        assert_eq!(coverage(&ann, 9), Some(Coverage::Inside));
        assert_eq!(coverage(&ann, 10), None);
        assert_eq!(coverage(&ann, 4), None);
    }

    #[test]
    fn test_overlap_prefers_smallest_offset_then_longest() {
        let anns = vec![
            Annotation::new(5, "V600", "short"),
            Annotation::new(0, "BRAF V600E", "outer"),
            Annotation::new(5, "V600E", "long"),
        ];
        let index = SpanIndex::new(&anns);
        let order: Vec<&str> = index.annotations().iter().map(|a| a.class_id.as_str()).collect();
        assert_eq!(order, vec!["outer", "long", "short"]);

        let (ann, cov) = index.covering(5).unwrap();
        assert_eq!(ann.class_id, "outer");
        assert_eq!(cov, Coverage::Inside);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let anns = vec![
            Annotation::new(0, "BRAF", "first"),
            Annotation::new(0, "BRAF", "second"),
        ];
        let index = SpanIndex::new(&anns);
        assert_eq!(index.covering(0).unwrap().0.class_id, "first");
    }

    #[test]
    fn test_covering_where_skips_rejected_classes() {
        let anns = vec![
            Annotation::new(0, "BRAF V600E", "gene"),
            Annotation::new(5, "V600E", "e_2"),
        ];
        let index = SpanIndex::new(&anns);
        let (ann, cov) = index.covering_where(5, |a| a.class_id == "e_2").unwrap();
        assert_eq!(ann.class_id, "e_2");
        assert_eq!(cov, Coverage::Start);
        assert!(index.covering_where(0, |a| a.class_id == "e_2").is_none());
    }

    #[test]
    fn test_decode_bio() {
        let tags = ["O", "B-PER", "I-PER", "O", "B-LOC"];
        let spans = decode_spans(&tags);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], Span { start: 1, end: 3, label: "PER".to_string() });
        assert_eq!(spans[1], Span { start: 4, end: 5, label: "LOC".to_string() });
    }

    #[test]
    fn test_decode_bieo() {
        let tags = ["B-e_2", "I-e_2", "E-e_2", "O", "B-e_2", "B-e_2"];
        let spans = decode_spans(&tags);
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 3, label: "e_2".into() },
                Span { start: 4, end: 5, label: "e_2".into() },
                Span { start: 5, end: 6, label: "e_2".into() },
            ]
        );
    }

    #[test]
    fn test_decode_single_token_end() {
        let spans = decode_spans(&["O", "E-e_2", "O"]);
        assert_eq!(spans, vec![Span { start: 1, end: 2, label: "e_2".into() }]);
    }

    #[test]
    fn test_decode_inside_without_begin_opens_span() {
        let spans = decode_spans(&["I-x", "I-y", "O"]);
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 1, label: "x".into() },
                Span { start: 1, end: 2, label: "y".into() },
            ]
        );
    }
}
