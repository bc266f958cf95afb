//! # Rotulador tmVar — Cascata de Regras para Menções de Mutação
//!
//! Aproximação do esquema de rótulos do tmVar: cada token dentro de uma menção
//! de mutação recebe uma sub-tag que descreve seu papel na menção.
//!
//! ```text
//! "c.123A>T"  →  c   .   123   A   >   T
//!                A   I   P     M   I   W
//! ```
//!
//! ## Cascata
//!
//! As regras são avaliadas em ordem e a primeira que casar vence. A ordem importa:
//! "rs1234" casa tanto com a regra de sequência de referência (começa com `r`)
//! quanto com a de SNP, e a regra de referência vence.
//!
//! | # | Regra               | Condição                                              | Tag    |
//! |---|---------------------|-------------------------------------------------------|--------|
//! | 1 | reference_sequence  | começa com c/g/r/m/p, ou é ivs/ex/orf                 | A      |
//! | 2 | mutation_type       | contém del/ins/dup/tri/qua/con/delins/indel           | T      |
//! | 3 | frameshift          | contém fs/fsX/fsx                                     | F      |
//! | 4 | frameshift_stop     | anterior é F e a palavra é exatamente `X`             | F      |
//! | 5 | snp                 | começa com rs/RS/Rs                                   | R      |
//! | 6 | residue             | nucleotídeo ou aminoácido                             | M ou W |
//! | 7 | position            | só dígitos                                            | S ou P |
//! | 8 | inside              | qualquer outro token coberto                          | I      |
//!
//! O "anterior" é o último token **classificado** da Part (não necessariamente o
//! token imediatamente anterior na sentença), e o estado atravessa sentenças.
//! Só anotações da classe de mutação são consideradas; as demais são ignoradas.

use std::sync::LazyLock;

use regex::Regex;

use crate::aligner::align_part;
use crate::data::Part;
use crate::error::Result;
use crate::span::SpanIndex;
use crate::tagger::TmVarTag;

static REFERENCE_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[cgrmp]|(?:ivs|ex|orf)$)").expect("regex de sequência de referência"));

static MUTATION_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"del|ins|dup|tri|qua|con|delins|indel").expect("regex de tipo de mutação"));

static FRAMESHIFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"fs|fsX|fsx").expect("regex de frameshift"));

static SNP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:rs|RS|Rs)").expect("regex de SNP"));

static NUCLEOTIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ATCGUatcgu]$").expect("regex de nucleotídeo"));

/// Nomes completos (prefixo), códigos de três letras e códigos de uma letra.
static AMINO_ACID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:glutamine|glutamic|leucine|valine|isoleucine|lysine|alanine|glycine|",
        r"aspartate|methionine|threonine|histidine|aspartic|asparticacid|arginine|",
        r"asparagine|tryptophan|proline|phenylalanine|cysteine|serine|glutamate|",
        r"tyrosine|stop|frameshift)",
        r"|^(?:cys|ile|ser|gln|met|asn|pro|lys|asp|thr|phe|ala|gly|his|leu|arg|trp|val|glu|tyr|fs|fsx)$",
        r"|^[CISQMNPKDTFAGHLRWVEYX]$",
    ))
    .expect("regex de aminoácido")
});

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("regex de posição"));

/// O último token classificado: sua tag e sua palavra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Previous {
    pub tag: TmVarTag,
    pub word: String,
}

fn previous_is_frameshift(previous: Option<&Previous>) -> bool {
    previous.is_some_and(|p| p.tag == TmVarTag::Frameshift)
}

fn previous_is_position(previous: Option<&Previous>) -> bool {
    previous.is_some_and(|p| DIGITS.is_match(&p.word))
}

/// Uma regra da cascata: devolve a tag quando casa.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str, Option<&Previous>) -> Option<TmVarTag>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

fn reference_sequence(word: &str, _: Option<&Previous>) -> Option<TmVarTag> {
    REFERENCE_SEQUENCE
        .is_match(word)
        .then_some(TmVarTag::ReferenceSequence)
}

fn mutation_type(word: &str, _: Option<&Previous>) -> Option<TmVarTag> {
    MUTATION_TYPE.is_match(word).then_some(TmVarTag::MutationType)
}

fn frameshift(word: &str, _: Option<&Previous>) -> Option<TmVarTag> {
    FRAMESHIFT.is_match(word).then_some(TmVarTag::Frameshift)
}

fn frameshift_stop(word: &str, previous: Option<&Previous>) -> Option<TmVarTag> {
    (word == "X" && previous_is_frameshift(previous)).then_some(TmVarTag::Frameshift)
}

fn snp(word: &str, _: Option<&Previous>) -> Option<TmVarTag> {
    SNP.is_match(word).then_some(TmVarTag::Snp)
}

fn residue(word: &str, previous: Option<&Previous>) -> Option<TmVarTag> {
    if !(NUCLEOTIDE.is_match(word) || AMINO_ACID.is_match(word)) {
        return None;
    }
    if previous_is_position(previous) {
        Some(TmVarTag::Mutant)
    } else {
        Some(TmVarTag::WildType)
    }
}

fn position(word: &str, previous: Option<&Previous>) -> Option<TmVarTag> {
    if !DIGITS.is_match(word) {
        return None;
    }
    if previous_is_frameshift(previous) {
        Some(TmVarTag::FrameshiftPosition)
    } else {
        Some(TmVarTag::MutationPosition)
    }
}

fn inside(_: &str, _: Option<&Previous>) -> Option<TmVarTag> {
    Some(TmVarTag::Inside)
}

/// Regras em ordem de avaliação. A última sempre casa.
pub static CASCADE: &[Rule] = &[
    Rule { name: "reference_sequence", apply: reference_sequence },
    Rule { name: "mutation_type", apply: mutation_type },
    Rule { name: "frameshift", apply: frameshift },
    Rule { name: "frameshift_stop", apply: frameshift_stop },
    Rule { name: "snp", apply: snp },
    Rule { name: "residue", apply: residue },
    Rule { name: "position", apply: position },
    Rule { name: "inside", apply: inside },
];

/// Classifica um token coberto por uma menção, indicando a regra que disparou.
pub fn classify_with_rule(previous: Option<&Previous>, word: &str) -> (TmVarTag, &'static str) {
    CASCADE
        .iter()
        .find_map(|rule| (rule.apply)(word, previous).map(|tag| (tag, rule.name)))
        .unwrap_or((TmVarTag::Inside, "inside"))
}

/// Classifica um token coberto por uma menção: `(anterior, palavra) → tag`.
pub fn classify(previous: Option<&Previous>, word: &str) -> TmVarTag {
    classify_with_rule(previous, word).0
}

/// Tags tmVar de todos os tokens da Part, agrupadas por sentença.
pub fn tmvar_tags(part: &Part, part_index: usize, mutation_class: &str) -> Result<Vec<Vec<TmVarTag>>> {
    let offsets = align_part(part, part_index)?;
    let index = SpanIndex::new(&part.annotations);
    let mut previous: Option<Previous> = None;

    let mut tags = Vec::with_capacity(offsets.len());
    for (sentence, sentence_offsets) in part.sentences.iter().zip(&offsets) {
        let mut sentence_tags = Vec::with_capacity(sentence.len());
        for (token, &offset) in sentence.iter().zip(sentence_offsets) {
            let covered = index
                .covering_where(offset, |a| a.class_id == mutation_class)
                .is_some();
            if !covered {
                sentence_tags.push(TmVarTag::Outside);
                continue;
            }
            let tag = classify(previous.as_ref(), &token.word);
            previous = Some(Previous {
                tag,
                word: token.word.clone(),
            });
            sentence_tags.push(tag);
        }
        tags.push(sentence_tags);
    }
    Ok(tags)
}
