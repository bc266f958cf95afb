//! Configuração da rotulagem.
//!
//! ```json
//! { "scheme": "tm_var", "mutation_class": "e_2", "parallel": true }
//! ```
//!
//! Todos os campos são opcionais.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::Dataset;
use crate::error::Result;
use crate::scheme::{LabelScheme, SchemeKind, DEFAULT_MUTATION_CLASS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelerConfig {
    pub scheme: SchemeKind,
    /// Classe tratada como mutação pelo esquema tmVar.
    pub mutation_class: String,
    /// Divide o trabalho por Part entre threads.
    pub parallel: bool,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::Bio,
            mutation_class: DEFAULT_MUTATION_CLASS.to_string(),
            parallel: false,
        }
    }
}

impl LabelerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_scheme(self) -> LabelScheme {
        match self.scheme {
            SchemeKind::Bio => LabelScheme::Bio,
            SchemeKind::Bieo => LabelScheme::Bieo,
            SchemeKind::TmVar => LabelScheme::tm_var(self.mutation_class),
        }
    }

    /// Aplica o esquema configurado ao dataset.
    pub fn run(&self, dataset: &mut Dataset) -> Result<()> {
        debug!(config = ?self, "rotulando dataset");
        let parallel = self.parallel;
        let scheme = self.clone().into_scheme();
        if parallel {
            scheme.label_parallel(dataset)
        } else {
            scheme.label(dataset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Part;
    use crate::error::LabelError;

    #[test]
    fn test_defaults() {
        let config = LabelerConfig::from_json("{}").unwrap();
        assert_eq!(config, LabelerConfig::default());
        assert_eq!(config.mutation_class, "e_2");
        assert_eq!(config.into_scheme(), LabelScheme::Bio);
    }

    #[test]
    fn test_tm_var_with_custom_class() {
        let config = LabelerConfig::from_json(r#"{"scheme": "tm_var", "mutation_class": "Mutation"}"#).unwrap();
        assert_eq!(config.into_scheme(), LabelScheme::tm_var("Mutation"));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = LabelerConfig::from_json(r#"{"scheme": "crf"}"#).unwrap_err();
        assert!(matches!(err, LabelError::Config(_)));
    }

    #[test]
    fn test_run_parallel() {
        let config = LabelerConfig {
            scheme: SchemeKind::Bieo,
            parallel: true,
            ..Default::default()
        };
        let mut dataset = Dataset::from_parts(vec![Part::new("BRAF V600E mutation")
            .with_sentence(&["BRAF", "V600E", "mutation"])
            .annotate(0, "BRAF V600E", "Mutation")]);
        config.run(&mut dataset).unwrap();
        assert_eq!(
            dataset.parts[0].labels(),
            vec![vec!["B-Mutation", "E-Mutation", "O"]]
        );
    }
}
