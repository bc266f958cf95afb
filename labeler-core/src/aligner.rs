//! # Alinhador de Tokens
//!
//! O tokenizador externo entrega apenas as palavras. Para decidir se um token
//! está dentro de uma anotação precisamos do seu offset no texto da Part, que é
//! recuperado com uma busca para frente:
//!
//! ```text
//! texto:   "BRAF V600E mutation"
//! cursor:   ^0   ^4    ^10
//! "BRAF"  → 0   (cursor → 4)
//! "V600E" → 5   (cursor → 10)
//! ```
//!
//! O cursor avança até o **fim** da ocorrência encontrada, de modo que dois tokens
//! idênticos e adjacentes ("A A") caem em ocorrências distintas. O cursor nunca
//! volta, o que garante offsets monotônicos dentro da Part.
//!
//! A busca é feita em bytes (`str::find`), mas os offsets devolvidos são em
//! caracteres, pois é essa a unidade das anotações.

use tracing::warn;

use crate::data::Part;
use crate::error::{LabelError, Result, TokenPosition};

/// Cursor de busca sobre o texto de uma Part.
#[derive(Debug, Clone)]
pub struct TokenAligner<'a> {
    text: &'a str,
    part: usize,
    byte_cursor: usize,
    char_cursor: usize,
}

impl<'a> TokenAligner<'a> {
    pub fn new(text: &'a str, part: usize) -> Self {
        Self {
            text,
            part,
            byte_cursor: 0,
            char_cursor: 0,
        }
    }

    /// Posição atual do cursor, em caracteres.
    pub fn cursor(&self) -> usize {
        self.char_cursor
    }

    /// Encontra o offset (em caracteres) de `word` a partir do cursor e avança o cursor
    /// para o fim da ocorrência.
    pub fn next_offset(&mut self, word: &str, sentence: usize, token: usize) -> Result<usize> {
        let rest = &self.text[self.byte_cursor..];
        let found = if word.is_empty() { None } else { rest.find(word) };

        let Some(rel) = found else {
            let position = TokenPosition {
                part: self.part,
                sentence,
                token,
            };
            warn!(word, cursor = self.char_cursor, %position, "falha de alinhamento");
            return Err(LabelError::Alignment {
                word: word.to_string(),
                cursor: self.char_cursor,
                position,
            });
        };

        let start = self.char_cursor + rest[..rel].chars().count();
        self.byte_cursor += rel + word.len();
        self.char_cursor = start + word.chars().count();
        Ok(start)
    }
}

/// Offsets de todos os tokens de uma Part, agrupados por sentença.
pub fn align_part(part: &Part, part_index: usize) -> Result<Vec<Vec<usize>>> {
    let mut aligner = TokenAligner::new(&part.text, part_index);
    part.sentences
        .iter()
        .enumerate()
        .map(|(s, sentence)| {
            sentence
                .iter()
                .enumerate()
                .map(|(t, token)| aligner.next_offset(&token.word, s, t))
                .collect()
        })
        .collect()
}
