//! # labeler-core — Rótulos por Token a partir de Anotações
//!
//! Transforma menções anotadas por offset de caractere em rótulos por token,
//! prontos para treinar um tagger de sequência.
//!
//! ## Fluxo
//!
//! 1.  **Entrada**: um [`Dataset`] de [`Part`]s, cada uma com texto bruto, sentenças
//!     já tokenizadas e anotações (`offset`, `text`, `class_id`).
//! 2.  **Alinhamento** ([`aligner`]): cada palavra é localizada no texto com um cursor
//!     que só anda para frente, recuperando o offset do token.
//! 3.  **Cobertura** ([`span`]): o offset é comparado com os spans das anotações.
//! 4.  **Rotulagem** ([`scheme`]):
//!     *   **BIO** ([`bio`]): `B-classe`, `I-classe`, `O`.
//!     *   **BIEO** ([`bieo`]): BIO com correção retroativa `E-classe`.
//!     *   **tmVar** ([`tmvar`]): cascata de regras para menções de mutação.
//! 5.  **Saída**: o mesmo dataset, com exatamente um rótulo por token.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use labeler_core::{Dataset, LabelScheme, Part};
//!
//! let part = Part::new("BRAF V600E mutation")
//!     .with_sentence(&["BRAF", "V600E", "mutation"])
//!     .annotate(0, "BRAF V600E", "Mutation");
//! let mut dataset = Dataset::from_parts(vec![part]);
//!
//! LabelScheme::Bieo.label(&mut dataset).unwrap();
//! assert_eq!(dataset.parts[0].labels(), vec![vec!["B-Mutation", "E-Mutation", "O"]]);
//! ```

pub mod aligner;
pub mod bieo;
pub mod bio;
pub mod config;
pub mod data;
pub mod error;
pub mod scheme;
pub mod span;
pub mod tagger;
pub mod tmvar;

pub use config::LabelerConfig;
pub use data::{Annotation, Dataset, Label, Part, Sentence, Token};
pub use error::{LabelError, Result};
pub use scheme::{LabelScheme, SchemeKind, DEFAULT_MUTATION_CLASS};
pub use tagger::{SpanTag, TmVarTag};
