//! # Esquemas de Rotulagem — Despacho sobre o Dataset
//!
//! [`LabelScheme`] é o conjunto fechado de esquemas disponíveis, todos com a
//! mesma operação `label(dataset)`. Para cada Part:
//!
//! 1. os tokens são alinhados ao texto (qualquer falha aborta a Part);
//! 2. o esquema calcula as tags de todos os tokens num buffer;
//! 3. o buffer é gravado nos tokens, substituindo os rótulos anteriores.
//!
//! Como a gravação só acontece no passo 3, uma Part que falha mantém seus
//! rótulos antigos: nunca há rotulagem parcial.
//!
//! Parts não compartilham estado, então [`LabelScheme::label_parallel`] divide
//! o trabalho por Part com rayon. Dentro de uma Part o processamento é sempre
//! sequencial (BIEO e tmVar dependem do token anterior).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bieo::bieo_tags;
use crate::bio::bio_tags;
use crate::data::{Dataset, Label, Part};
use crate::error::{LabelError, Result, TokenPosition};
use crate::tmvar::tmvar_tags;

/// Classe de anotação usada pelos corpora de mutações.
pub const DEFAULT_MUTATION_CLASS: &str = "e_2";

/// Nome do esquema, sem parâmetros (para configuração e UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// **BIO**: `B-classe`, `I-classe`, `O`.
    #[default]
    Bio,
    /// **BIEO**: BIO com o último token de cada span marcado `E-classe`.
    Bieo,
    /// **tmVar**: sub-tags A/T/F/R/W/M/S/P/I/O para menções de mutação.
    TmVar,
}

impl SchemeKind {
    pub fn all() -> [SchemeKind; 3] {
        [SchemeKind::Bio, SchemeKind::Bieo, SchemeKind::TmVar]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemeKind::Bio => "bio",
            SchemeKind::Bieo => "bieo",
            SchemeKind::TmVar => "tm_var",
        }
    }
}

/// Um esquema de rotulagem pronto para uso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelScheme {
    Bio,
    Bieo,
    /// Só anotações com `class_id == mutation_class` são rotuladas.
    TmVar { mutation_class: String },
}

impl LabelScheme {
    pub fn tm_var(mutation_class: impl Into<String>) -> Self {
        LabelScheme::TmVar {
            mutation_class: mutation_class.into(),
        }
    }

    pub fn kind(&self) -> SchemeKind {
        match self {
            LabelScheme::Bio => SchemeKind::Bio,
            LabelScheme::Bieo => SchemeKind::Bieo,
            LabelScheme::TmVar { .. } => SchemeKind::TmVar,
        }
    }

    /// Tags de todos os tokens da Part, sem alterá-la.
    pub fn tags(&self, part: &Part, part_index: usize) -> Result<Vec<Vec<String>>> {
        Ok(match self {
            LabelScheme::Bio => to_strings(bio_tags(part, part_index)?, |t| t.label()),
            LabelScheme::Bieo => to_strings(bieo_tags(part, part_index)?, |t| t.label()),
            LabelScheme::TmVar { mutation_class } => to_strings(
                tmvar_tags(part, part_index, mutation_class)?,
                |t| t.as_str().to_string(),
            ),
        })
    }

    /// Rotula uma Part. Em caso de erro a Part fica intacta.
    pub fn label_part(&self, part: &mut Part, part_index: usize) -> Result<()> {
        let tags = self.tags(part, part_index)?;
        commit(part, part_index, tags)?;
        debug!(
            scheme = self.kind().name(),
            part = part_index,
            tokens = part.token_count(),
            "part rotulada"
        );
        Ok(())
    }

    /// Rotula o dataset Part a Part, em ordem. Para na primeira Part com erro;
    /// as Parts anteriores ficam rotuladas e as seguintes intactas.
    pub fn label(&self, dataset: &mut Dataset) -> Result<()> {
        for (i, part) in dataset.parts.iter_mut().enumerate() {
            self.label_part(part, i)?;
        }
        info!(
            scheme = self.kind().name(),
            parts = dataset.parts.len(),
            tokens = dataset.token_count(),
            "dataset rotulado"
        );
        Ok(())
    }

    /// Rotula todas as Parts, devolvendo o resultado de cada uma.
    ///
    /// Útil quando o chamador prefere pular Parts problemáticas em vez de abortar.
    pub fn label_each(&self, dataset: &mut Dataset) -> Vec<Result<()>> {
        dataset
            .parts
            .iter_mut()
            .enumerate()
            .map(|(i, part)| self.label_part(part, i))
            .collect()
    }

    /// Rotula as Parts em paralelo (rayon). Cada worker tem seu próprio cursor e estado.
    ///
    /// Em caso de erro, a Part que falhou fica intacta, mas quais das outras
    /// Parts já foram rotuladas depende do escalonamento: ao contrário de
    /// [`label`](Self::label), não há garantia de "anteriores rotuladas,
    /// posteriores intactas". Use [`label_each`](Self::label_each) quando isso importar.
    pub fn label_parallel(&self, dataset: &mut Dataset) -> Result<()> {
        dataset
            .parts
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, part)| self.label_part(part, i))?;
        info!(
            scheme = self.kind().name(),
            parts = dataset.parts.len(),
            "dataset rotulado em paralelo"
        );
        Ok(())
    }
}

fn to_strings<T>(tags: Vec<Vec<T>>, f: impl Fn(&T) -> String) -> Vec<Vec<String>> {
    tags.iter().map(|s| s.iter().map(&f).collect()).collect()
}

/// Grava exatamente um rótulo por token. O buffer precisa ter o formato da Part.
fn commit(part: &mut Part, part_index: usize, tags: Vec<Vec<String>>) -> Result<()> {
    let shape_ok = tags.len() == part.sentences.len()
        && tags.iter().zip(&part.sentences).all(|(t, s)| t.len() == s.len());
    if !shape_ok {
        return Err(LabelError::malformed(
            "buffer de tags com formato diferente da Part",
            TokenPosition {
                part: part_index,
                sentence: 0,
                token: 0,
            },
        ));
    }

    for (sentence, sentence_tags) in part.sentences.iter_mut().zip(tags) {
        for (token, tag) in sentence.iter_mut().zip(sentence_tags) {
            token.original_labels = vec![Label::new(tag)];
        }
    }
    Ok(())
}
