use labeler_core::aligner::align_part;
use labeler_core::span::{decode_spans, Span};
use labeler_core::{Dataset, LabelError, LabelScheme, LabelerConfig, Part, DEFAULT_MUTATION_CLASS};

fn dataset_json() -> &'static str {
    r#"{
        "parts": [
            {
                "text": "BRAF V600E mutation",
                "sentences": [[{"word": "BRAF"}, {"word": "V600E"}, {"word": "mutation"}]],
                "annotations": [{"offset": 0, "text": "BRAF V600E", "class_id": "Mutation"}]
            },
            {
                "text": "We found c.123A>T and p.Arg97fsX23 in exon 5.",
                "sentences": [[
                    {"word": "We"}, {"word": "found"},
                    {"word": "c"}, {"word": "."}, {"word": "123"}, {"word": "A"}, {"word": ">"}, {"word": "T"},
                    {"word": "and"},
                    {"word": "p"}, {"word": "."}, {"word": "Arg"}, {"word": "97"}, {"word": "fsX"}, {"word": "23"},
                    {"word": "in"}, {"word": "exon"}, {"word": "5"}, {"word": "."}
                ]],
                "annotations": [
                    {"offset": 22, "text": "p.Arg97fsX23", "class_id": "e_2"},
                    {"offset": 9, "text": "c.123A>T", "class_id": "e_2"}
                ]
            }
        ]
    }"#
}

fn load() -> Dataset {
    serde_json::from_str(dataset_json()).unwrap()
}

#[test]
fn test_bio_and_bieo_on_json_dataset() {
    let mut dataset = load();
    LabelScheme::Bio.label(&mut dataset).unwrap();
    assert_eq!(dataset.parts[0].labels(), vec![vec!["B-Mutation", "I-Mutation", "O"]]);

    LabelScheme::Bieo.label(&mut dataset).unwrap();
    assert_eq!(dataset.parts[0].labels(), vec![vec!["B-Mutation", "E-Mutation", "O"]]);

    let labels = dataset.parts[1].labels();
    let tags = &labels[0];
    assert_eq!(
        decode_spans(tags.as_slice()),
        vec![
            Span { start: 2, end: 8, label: "e_2".into() },
            Span { start: 9, end: 15, label: "e_2".into() },
        ]
    );
}

#[test]
fn test_tm_var_on_json_dataset() {
    let mut dataset = load();
    LabelScheme::tm_var(DEFAULT_MUTATION_CLASS).label(&mut dataset).unwrap();

    assert_eq!(dataset.parts[0].labels(), vec![vec!["O", "O", "O"]]);
    assert_eq!(
        dataset.parts[1].labels(),
        vec![vec![
            "O", "O", // We found
            "A", "I", "P", "M", "I", "W", // c.123A>T
            "O", // and
            "A", "I", "I", "P", "F", "S", // p.Arg97fsX23
            "O", "O", "O", "O", // in exon 5 .
        ]]
    );
}

#[test]
fn test_offsets_monotonic_for_every_part() {
    let dataset = load();
    for (i, part) in dataset.parts.iter().enumerate() {
        let offsets: Vec<usize> = align_part(part, i).unwrap().into_iter().flatten().collect();
        assert_eq!(offsets.len(), part.token_count());
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_repeated_adjacent_words() {
    // dois tokens idênticos colados: o segundo precisa cair no offset 1
    let part = Part::new("AA").with_sentence(&["A", "A"]).annotate(1, "A", "e_2");
    let mut dataset = Dataset::from_parts(vec![part]);
    LabelScheme::Bio.label(&mut dataset).unwrap();
    assert_eq!(dataset.parts[0].labels(), vec![vec!["O", "B-e_2"]]);
}

#[test]
fn test_config_round_trip_through_json() {
    let config = LabelerConfig::from_json(r#"{"scheme": "bieo", "parallel": true}"#).unwrap();
    let mut dataset = load();
    config.run(&mut dataset).unwrap();
    assert!(dataset.parts.iter().flat_map(|p| p.tokens()).all(|t| t.original_labels.len() == 1));

    let out = serde_json::to_value(&dataset).unwrap();
    assert_eq!(out["parts"][0]["sentences"][0][1]["original_labels"][0]["value"], "E-Mutation");
}

#[test]
fn test_alignment_error_is_reported_with_position() {
    let part = Part::new("c.35delG").with_sentence(&["c", ".", "35", "insG"]);
    let mut dataset = Dataset::from_parts(vec![part]);
    let err = LabelScheme::tm_var("e_2").label(&mut dataset).unwrap_err();
    match &err {
        LabelError::Alignment { word, position, .. } => {
            assert_eq!(word, "insG");
            assert_eq!(position.token, 3);
        }
        other => panic!("erro inesperado: {other:?}"),
    }
    assert!(err.to_string().contains("insG"));
    assert!(dataset.parts[0].tokens().all(|t| t.original_labels.is_empty()));
}
