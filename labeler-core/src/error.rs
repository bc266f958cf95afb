//! Erros da rotulagem.

use thiserror::Error;

/// Resultado especializado do crate.
pub type Result<T, E = LabelError> = std::result::Result<T, E>;

/// Posição de um token dentro do dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPosition {
    pub part: usize,
    pub sentence: usize,
    pub token: usize,
}

impl std::fmt::Display for TokenPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "part {}, sentença {}, token {}", self.part, self.sentence, self.token)
    }
}

#[derive(Debug, Error)]
pub enum LabelError {
    /// A palavra do token não aparece no texto a partir do cursor.
    /// A Part inteira é abortada: um offset errado contaminaria todos os rótulos seguintes.
    #[error("token {word:?} não encontrado a partir do caractere {cursor} ({position})")]
    Alignment {
        word: String,
        cursor: usize,
        position: TokenPosition,
    },

    /// Violação de invariante interna de um esquema (ex: fechamento BIEO sem span aberto).
    #[error("estado de rótulo inválido em {position}: {msg}")]
    MalformedLabelState { msg: String, position: TokenPosition },

    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

impl LabelError {
    pub(crate) fn malformed<S: Into<String>>(msg: S, position: TokenPosition) -> Self {
        Self::MalformedLabelState {
            msg: msg.into(),
            position,
        }
    }
}
