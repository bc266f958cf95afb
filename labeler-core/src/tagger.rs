//! # Conjuntos de Tags
//!
//! Dois vocabulários de tags convivem no crate:
//!
//! ## Tags de span (BIO / BIEO)
//!
//! - `B-CLASSE`: Begin — token que começa exatamente no início da anotação
//! - `I-CLASSE`: Inside — token dentro da anotação
//! - `E-CLASSE`: End — último token da anotação (somente BIEO)
//! - `O`: Outside — fora de qualquer anotação
//!
//! A classe é o `class_id` da anotação, sem vocabulário fechado.
//!
//! ## Tags tmVar
//!
//! | Tag | Significado                          | Exemplo em "c.123A>T" |
//! |-----|--------------------------------------|-----------------------|
//! | A   | Sequência de referência              | c                     |
//! | T   | Tipo de mutação                      | del, ins, dup         |
//! | F   | Frameshift                           | fs, fsX               |
//! | R   | Identificador de SNP                 | rs1234                |
//! | W   | Resíduo selvagem (wild type)         | T                     |
//! | M   | Resíduo mutante                      | A                     |
//! | S   | Posição do frameshift                | 12 (após fs)          |
//! | P   | Posição da mutação                   | 123                   |
//! | I   | Outro token dentro da menção         | `.`, `>`              |
//! | O   | Fora de menção                       |                       |

use serde::{Deserialize, Serialize};

/// Valor textual da tag Outside, comum aos dois vocabulários.
pub const OUTSIDE: &str = "O";

/// Tag de span aplicada a um token nos esquemas BIO e BIEO.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanTag {
    Begin(String),
    Inside(String),
    End(String),
    Outside,
}

impl SpanTag {
    /// Representação textual da tag (ex: "B-e_2", "E-Mutation", "O")
    pub fn label(&self) -> String {
        match self {
            SpanTag::Begin(c) => format!("B-{c}"),
            SpanTag::Inside(c) => format!("I-{c}"),
            SpanTag::End(c) => format!("E-{c}"),
            SpanTag::Outside => OUTSIDE.to_string(),
        }
    }

    /// Parseia uma tag a partir de string (ex: "B-e_2" → Begin("e_2"))
    pub fn from_label(s: &str) -> Option<Self> {
        if s == OUTSIDE {
            return Some(SpanTag::Outside);
        }
        let (prefix, class) = s.split_once('-')?;
        if class.is_empty() {
            return None;
        }
        let class = class.to_string();
        match prefix {
            "B" => Some(SpanTag::Begin(class)),
            "I" => Some(SpanTag::Inside(class)),
            "E" => Some(SpanTag::End(class)),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpanTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sub-tags do esquema tmVar para a estrutura interna de uma menção de mutação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TmVarTag {
    /// **A**: sequência de referência (c., g., p., IVS...)
    ReferenceSequence,
    /// **T**: tipo de mutação (del, ins, dup...)
    MutationType,
    /// **F**: frameshift
    Frameshift,
    /// **R**: identificador de SNP (rs...)
    Snp,
    /// **W**: resíduo selvagem
    WildType,
    /// **M**: resíduo mutante
    Mutant,
    /// **S**: posição do frameshift
    FrameshiftPosition,
    /// **P**: posição da mutação
    MutationPosition,
    /// **I**: qualquer outro token dentro da menção
    Inside,
    /// **O**: fora de menção
    Outside,
}

impl TmVarTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TmVarTag::ReferenceSequence => "A",
            TmVarTag::MutationType => "T",
            TmVarTag::Frameshift => "F",
            TmVarTag::Snp => "R",
            TmVarTag::WildType => "W",
            TmVarTag::Mutant => "M",
            TmVarTag::FrameshiftPosition => "S",
            TmVarTag::MutationPosition => "P",
            TmVarTag::Inside => "I",
            TmVarTag::Outside => OUTSIDE,
        }
    }
}

impl std::fmt::Display for TmVarTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
