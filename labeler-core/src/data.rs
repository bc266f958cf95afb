//! # Modelo de Dados — Dataset, Part, Sentença, Token e Anotação
//!
//! Estruturas produzidas pelos colaboradores externos (leitor de documentos,
//! divisor de sentenças, tokenizador e anotador) e consumidas pelos esquemas
//! de rotulagem.
//!
//! ## Hierarquia
//!
//! ```text
//! Dataset
//!  └── Part (texto bruto + anotações)
//!       └── Sentence
//!            └── Token (palavra + rótulos)
//! ```
//!
//! O texto de cada [`Part`] é o espaço de coordenadas de todos os offsets.
//! Offsets são índices de **caractere** (não de byte), contados sobre `Part::text`.

use serde::{Deserialize, Serialize};

use crate::tagger::OUTSIDE;

/// Rótulo atribuído a um token (ex: "B-e_2", "I-e_2", "P", "O").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub value: String,
}

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// Rótulo inicial de todo token antes da classificação.
    pub fn outside() -> Self {
        Self::new(OUTSIDE)
    }
}

/// Um token produzido pelo tokenizador externo.
///
/// O offset do token NÃO é armazenado: ele é recuperado pelo
/// [`TokenAligner`](crate::aligner::TokenAligner) a partir de `word` e do texto da Part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Forma de superfície do token (ex: "V600E", "c", ".").
    pub word: String,
    /// Rótulos do token. Os esquemas deste crate sempre deixam exatamente um.
    #[serde(default)]
    pub original_labels: Vec<Label>,
}

impl Token {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            original_labels: vec![],
        }
    }

    /// Valor do primeiro rótulo, se houver.
    pub fn label(&self) -> Option<&str> {
        self.original_labels.first().map(|l| l.value.as_str())
    }
}

/// Sequência ordenada de tokens de uma sentença.
pub type Sentence = Vec<Token>;

/// Uma anotação humana sobre o texto de uma Part.
///
/// Cobre o intervalo semiaberto `[offset, offset + len(text))` em caracteres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Offset (em caracteres) do início da menção em `Part::text`.
    pub offset: usize,
    /// Texto anotado.
    pub text: String,
    /// Categoria semântica (ex: "e_2" para mutações).
    pub class_id: String,
}

impl Annotation {
    pub fn new(offset: usize, text: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
            class_id: class_id.into(),
        }
    }

    /// Comprimento da menção em caracteres.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Offset final (exclusivo), em caracteres.
    pub fn end(&self) -> usize {
        self.offset + self.char_len()
    }
}

/// Um trecho de documento (título, resumo, parágrafo).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Texto bruto: espaço de coordenadas dos offsets.
    pub text: String,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Part {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sentences: vec![],
            annotations: vec![],
        }
    }

    /// Acrescenta uma sentença a partir das palavras já tokenizadas.
    pub fn with_sentence<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.sentences
            .push(words.iter().map(|w| Token::new(w.as_ref())).collect());
        self
    }

    /// Acrescenta uma anotação.
    pub fn annotate(mut self, offset: usize, text: &str, class_id: &str) -> Self {
        self.annotations.push(Annotation::new(offset, text, class_id));
        self
    }

    /// Número total de tokens em todas as sentenças.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.len()).sum()
    }

    /// Itera sobre todos os tokens, em ordem de documento.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flatten()
    }

    /// Primeiro rótulo de cada token, agrupado por sentença ("" se o token não tem rótulo).
    pub fn labels(&self) -> Vec<Vec<String>> {
        self.sentences
            .iter()
            .map(|s| {
                s.iter()
                    .map(|t| t.label().unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }
}

/// Coleção ordenada de Parts. Não há estado compartilhado entre Parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub parts: Vec<Part>,
}

impl Dataset {
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn token_count(&self) -> usize {
        self.parts.iter().map(Part::token_count).sum()
    }

    /// Volta todos os tokens para um único rótulo `O`.
    ///
    /// Necessário antes de compor esquemas sobre o mesmo dataset.
    pub fn reset(&mut self) {
        for token in self.parts.iter_mut().flat_map(|p| p.sentences.iter_mut().flatten()) {
            token.original_labels = vec![Label::outside()];
        }
    }
}
