//! # Rotulador BIEO
//!
//! Mesma cobertura do BIO, com uma correção retroativa que produz as tags `E-`:
//!
//! ```text
//! tokens:  BRAF      V600E       mutation
//! BIO:     B-Mut     I-Mut       O
//!                      ^-- "mutation" caiu fora do span → V600E vira E-Mut
//! BIEO:    B-Mut     E-Mut       O
//! ```
//!
//! A correção dispara um token atrasado: só quando o token seguinte resolve
//! para `O` sabemos que o anterior fechava o span. Regras de fronteira:
//!
//! - o último token do span vira `E-`, seja ele `I-` ou `B-`: um span de um
//!   único token sai como `E-` ("rs1234" → `E-e_2`)
//! - o estado vale para a Part inteira (a fronteira de sentença não fecha o span)
//! - no fim da Part, um span ainda aberto é fechado do mesmo modo

use crate::aligner::align_part;
use crate::bio::bio_tag;
use crate::data::Part;
use crate::error::{LabelError, Result, TokenPosition};
use crate::span::SpanIndex;
use crate::tagger::SpanTag;

/// Último token rotulado por um span ainda não fechado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSpan {
    /// (sentença, token) do último token do span
    pub at: (usize, usize),
    pub class_id: String,
}

/// Transição do estado BIEO para o token atual.
///
/// Retorna o novo estado e, se o span anterior terminou, o span a fechar.
pub fn bieo_step(
    open: Option<OpenSpan>,
    tag: &SpanTag,
    at: (usize, usize),
) -> (Option<OpenSpan>, Option<OpenSpan>) {
    match tag {
        SpanTag::Begin(c) | SpanTag::Inside(c) => (
            Some(OpenSpan {
                at,
                class_id: c.clone(),
            }),
            None,
        ),
        SpanTag::Outside => (None, open),
        // E- nunca sai do BIO; não altera o estado
        SpanTag::End(_) => (open, None),
    }
}

/// Aplica o fechamento de um span ao buffer de tags.
fn close_span(tags: &mut [Vec<SpanTag>], closed: OpenSpan, part_index: usize) -> Result<()> {
    let (s, t) = closed.at;
    let position = TokenPosition {
        part: part_index,
        sentence: s,
        token: t,
    };
    let slot = tags
        .get_mut(s)
        .and_then(|sentence| sentence.get_mut(t))
        .ok_or_else(|| LabelError::malformed("span aberto aponta para token inexistente", position))?;

    match &*slot {
        SpanTag::Begin(c) | SpanTag::Inside(c) if *c == closed.class_id => {}
        other => {
            return Err(LabelError::malformed(
                format!("fechamento de span {} sobre tag {}", closed.class_id, other),
                position,
            ))
        }
    }
    *slot = SpanTag::End(closed.class_id);
    Ok(())
}

/// Tags BIEO de todos os tokens da Part, agrupadas por sentença.
pub fn bieo_tags(part: &Part, part_index: usize) -> Result<Vec<Vec<SpanTag>>> {
    let offsets = align_part(part, part_index)?;
    let index = SpanIndex::new(&part.annotations);

    let mut tags: Vec<Vec<SpanTag>> = Vec::with_capacity(offsets.len());
    let mut open: Option<OpenSpan> = None;

    for (s, sentence) in offsets.iter().enumerate() {
        tags.push(Vec::with_capacity(sentence.len()));
        for (t, &offset) in sentence.iter().enumerate() {
            let tag = bio_tag(&index, offset);
            let (next, closed) = bieo_step(open.take(), &tag, (s, t));
            tags[s].push(tag);
            if let Some(closed) = closed {
                close_span(&mut tags, closed, part_index)?;
            }
            open = next;
        }
    }

    if let Some(closed) = open {
        close_span(&mut tags, closed, part_index)?;
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(part: &Part) -> Vec<Vec<String>> {
        bieo_tags(part, 0)
            .unwrap()
            .iter()
            .map(|s| s.iter().map(SpanTag::label).collect())
            .collect()
    }

    #[test]
    fn test_braf_v600e() {
        let part = Part::new("BRAF V600E mutation")
            .with_sentence(&["BRAF", "V600E", "mutation"])
            .annotate(0, "BRAF V600E", "Mutation");
        assert_eq!(labels(&part), vec![vec!["B-Mutation", "E-Mutation", "O"]]);
    }

    #[test]
    fn test_only_last_inside_token_becomes_end() {
        let part = Part::new("a c.35delG b")
            .with_sentence(&["a", "c", ".", "35", "del", "G", "b"])
            .annotate(2, "c.35delG", "e_2");
        assert_eq!(
            labels(&part),
            vec![vec!["O", "B-e_2", "I-e_2", "I-e_2", "I-e_2", "E-e_2", "O"]]
        );
    }

    #[test]
    fn test_single_token_span_becomes_end() {
        let part = Part::new("see rs1234 here")
            .with_sentence(&["see", "rs1234", "here"])
            .annotate(4, "rs1234", "e_2");
        assert_eq!(labels(&part), vec![vec!["O", "E-e_2", "O"]]);
    }

    #[test]
    fn test_single_token_span_at_end_of_part() {
        let part = Part::new("see rs1234")
            .with_sentence(&["see", "rs1234"])
            .annotate(4, "rs1234", "e_2");
        assert_eq!(labels(&part), vec![vec!["O", "E-e_2"]]);
    }

    #[test]
    fn test_span_at_end_of_part_is_flushed() {
        let part = Part::new("mutation BRAF V600E")
            .with_sentence(&["mutation", "BRAF", "V600E"])
            .annotate(9, "BRAF V600E", "Mutation");
        assert_eq!(labels(&part), vec![vec!["O", "B-Mutation", "E-Mutation"]]);
    }

    #[test]
    fn test_sentence_boundary_does_not_close_span() {
        // o span termina na última palavra da primeira sentença;
        // o fechamento acontece no primeiro token O da sentença seguinte
        let part = Part::new("BRAF V600E Next")
            .with_sentence(&["BRAF", "V600E"])
            .with_sentence(&["Next"])
            .annotate(0, "BRAF V600E", "Mutation");
        assert_eq!(
            labels(&part),
            vec![vec!["B-Mutation", "E-Mutation"], vec!["O"]]
        );
    }

    #[test]
    fn test_adjacent_spans_close_only_on_outside() {
        let part = Part::new("A B C D x")
            .with_sentence(&["A", "B", "C", "D", "x"])
            .annotate(0, "A B", "k1")
            .annotate(4, "C D", "k2");
        assert_eq!(
            labels(&part),
            vec![vec!["B-k1", "I-k1", "B-k2", "E-k2", "O"]]
        );
    }

    #[test]
    fn test_step_is_pure() {
        let open = Some(OpenSpan { at: (0, 1), class_id: "e_2".into() });
        let (next, closed) = bieo_step(open.clone(), &SpanTag::Outside, (0, 2));
        assert_eq!(next, None);
        assert_eq!(closed, open);

        let (next, closed) = bieo_step(None, &SpanTag::Outside, (0, 3));
        assert_eq!((next, closed), (None, None));

        let (next, closed) = bieo_step(None, &SpanTag::Begin("x".into()), (1, 0));
        assert_eq!(next, Some(OpenSpan { at: (1, 0), class_id: "x".into() }));
        assert_eq!(closed, None);
    }

    #[test]
    fn test_close_on_outside_tag_is_malformed() {
        let mut tags = vec![vec![SpanTag::Outside]];
        let err = close_span(
            &mut tags,
            OpenSpan { at: (0, 0), class_id: "e_2".into() },
            0,
        )
        .unwrap_err();
        assert!(matches!(err, LabelError::MalformedLabelState { .. }));
    }
}
