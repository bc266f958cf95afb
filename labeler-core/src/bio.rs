//! # Rotulador BIO
//!
//! Cada token recebe `O`, a menos que uma anotação o cubra:
//!
//! - offset do token == início da anotação → `B-{class_id}`
//! - início < offset < fim → `I-{class_id}`
//!
//! Não há estado entre tokens: a tag depende apenas do offset do token.

use crate::aligner::align_part;
use crate::data::Part;
use crate::error::Result;
use crate::span::{Coverage, SpanIndex};
use crate::tagger::SpanTag;

/// Tag BIO de um token dado seu offset.
pub fn bio_tag(index: &SpanIndex<'_>, offset: usize) -> SpanTag {
    match index.covering(offset) {
        Some((ann, Coverage::Start)) => SpanTag::Begin(ann.class_id.clone()),
        Some((ann, Coverage::Inside)) => SpanTag::Inside(ann.class_id.clone()),
        None => SpanTag::Outside,
    }
}

/// Tags BIO de todos os tokens da Part, agrupadas por sentença.
pub fn bio_tags(part: &Part, part_index: usize) -> Result<Vec<Vec<SpanTag>>> {
    let offsets = align_part(part, part_index)?;
    let index = SpanIndex::new(&part.annotations);
    Ok(offsets
        .iter()
        .map(|sentence| sentence.iter().map(|&o| bio_tag(&index, o)).collect())
        .collect())
}
