// Index integration tests
//
// Purpose: Run every index through the public Survey API on small surveys
// with hand-checked values, plus the worked examples used as reference
// numbers for the composite indices.
// Run with: cargo test --test indices_integration_tests

use approx::assert_relative_eq;
use ethno_indices::{
    EthnoError, IndexKind, ResultTable, Survey, SurveyConfig, TaxonCount, TaxonScore, UndefinedValuePolicy,
};
use polars::prelude::*;

// Helper: values of a per-taxon score table in result order
fn scores(rows: &[TaxonScore]) -> Vec<f64> {
    rows.iter().map(|r| r.value).collect()
}

fn counts(rows: &[TaxonCount]) -> Vec<usize> {
    rows.iter().map(|r| r.value).collect()
}

fn taxa_of(rows: &[TaxonScore]) -> Vec<&str> {
    rows.iter().map(|r| r.taxon.as_str()).collect()
}

fn value_for(rows: &[TaxonScore], taxon: &str) -> f64 {
    rows.iter()
        .find(|r| r.taxon == taxon)
        .map(|r| r.value)
        .unwrap_or_else(|| panic!("{taxon} missing"))
}

fn count_for(rows: &[TaxonCount], taxon: &str) -> usize {
    rows.iter()
        .find(|r| r.taxon == taxon)
        .map(|r| r.value)
        .unwrap_or_else(|| panic!("{taxon} missing"))
}

fn four_row_survey() -> Survey {
    let df = df!(
        "informant" => ["A", "B", "C", "A"],
        "taxon" => ["Species1", "Species2", "Species1", "Species3"],
        "ailments_treated" => ["Headache", "Fever", "Headache", "Cough"]
    )
    .unwrap();
    Survey::new(&df, SurveyConfig::default()).unwrap()
}

fn six_row_survey() -> Survey {
    let df = df!(
        "informant" => ["A", "B", "C", "A", "B", "C"],
        "taxon" => ["Species1", "Species2", "Species1", "Species3", "Species1", "Species2"],
        "ailments_treated" => ["Headache", "Fever", "Headache", "Cough", "Headache", "Fever"]
    )
    .unwrap();
    Survey::new(&df, SurveyConfig::default()).unwrap()
}

/// Fever: 5 reports over 3 taxa, plus a few other uses
fn consensus_survey() -> Survey {
    let df = df!(
        "informant" => ["i1", "i2", "i3", "i4", "i5", "i1", "i2", "i3", "i4"],
        "taxon" => ["sp_a", "sp_a", "sp_b", "sp_b", "sp_c", "sp_a", "sp_c", "sp_d", "sp_d"],
        "ailments_treated" => ["Fever", "Fever", "Fever", "Fever", "Fever", "Cough", "Cough", "Burns", "Burns"]
    )
    .unwrap();
    Survey::new(&df, SurveyConfig::default()).unwrap()
}

// =========================================================================
// Section 1: Worked examples
// =========================================================================

#[test]
fn test_four_row_worked_example() {
    let survey = four_row_survey();

    let ci = survey.cultural_importance().unwrap();
    assert_eq!(taxa_of(&ci), vec!["Species1", "Species2", "Species3"]);
    let expected = [0.666667, 0.333333, 0.333333];
    for (value, want) in scores(&ci).iter().zip(expected) {
        assert_relative_eq!(*value, want, epsilon = 1e-6);
    }

    assert_eq!(counts(&survey.frequency_of_citation().unwrap()), vec![2, 1, 1]);
    assert_eq!(counts(&survey.number_of_uses().unwrap()), vec![1, 1, 1]);
    assert_eq!(counts(&survey.use_report().unwrap()), vec![2, 1, 1]);
}

#[test]
fn test_six_row_worked_example() {
    let survey = six_row_survey();

    let rfc = survey.relative_frequency_of_citation().unwrap();
    let uv = survey.use_value().unwrap();
    let ri = survey.relative_importance().unwrap();
    let cv = survey.cultural_value().unwrap();

    for rows in [&rfc, &uv, &ri, &cv] {
        assert_eq!(taxa_of(rows), vec!["Species1", "Species2", "Species3"]);
    }

    for (value, want) in scores(&rfc).iter().zip([1.0, 0.666667, 0.333333]) {
        assert_relative_eq!(*value, want, epsilon = 1e-6);
    }
    for (value, want) in scores(&uv).iter().zip([1.0, 0.666667, 0.333333]) {
        assert_relative_eq!(*value, want, epsilon = 1e-6);
    }
    for (value, want) in scores(&ri).iter().zip([1.0, 0.833333, 0.666667]) {
        assert_relative_eq!(*value, want, epsilon = 1e-6);
    }
    for (value, want) in scores(&cv).iter().zip([0.333333, 0.148148, 0.037037]) {
        assert_relative_eq!(*value, want, epsilon = 1e-6);
    }

    assert_eq!(counts(&survey.frequency_of_citation().unwrap()), vec![3, 2, 1]);
}

// =========================================================================
// Section 2: Binary-wide input
// =========================================================================

#[test]
fn test_binary_wide_use_columns_reading() {
    // sp_a carries use_1 for both informants and never use_2
    let df = df!(
        "informant" => ["inform_a", "inform_a", "inform_b", "inform_b"],
        "taxon" => ["sp_a", "sp_b", "sp_a", "sp_b"],
        "use_1" => [1, 0, 1, 1],
        "use_2" => [0, 1, 0, 1]
    )
    .unwrap();
    let survey = Survey::new(&df, SurveyConfig::default().binary_wide()).unwrap();

    assert_eq!(count_for(&survey.use_report().unwrap(), "sp_a"), 2);
    assert_eq!(count_for(&survey.number_of_uses().unwrap(), "sp_a"), 1);
    assert_eq!(count_for(&survey.frequency_of_citation().unwrap(), "sp_a"), 2);
    assert_relative_eq!(value_for(&survey.cultural_importance().unwrap(), "sp_a"), 1.0, epsilon = 1e-12);
}

#[test]
fn test_binary_wide_row_vector_reading() {
    // sp_a rows read as [1,0] for inform_a and [1,1] for inform_b
    let df = df!(
        "informant" => ["inform_a", "inform_b", "inform_a"],
        "taxon" => ["sp_a", "sp_a", "sp_b"],
        "use_1" => [1, 1, 0],
        "use_2" => [0, 1, 1]
    )
    .unwrap();
    let survey = Survey::new(&df, SurveyConfig::default().binary_wide()).unwrap();

    assert_eq!(count_for(&survey.use_report().unwrap(), "sp_a"), 3);
    assert_eq!(count_for(&survey.number_of_uses().unwrap(), "sp_a"), 2);
    assert_eq!(count_for(&survey.frequency_of_citation().unwrap(), "sp_a"), 2);
    assert_relative_eq!(value_for(&survey.cultural_importance().unwrap(), "sp_a"), 1.5, epsilon = 1e-12);
}

#[test]
fn test_binary_wide_rejects_non_binary_cells() {
    let df = df!(
        "informant" => ["inform_a"],
        "taxon" => ["sp_a"],
        "use_1" => [2]
    )
    .unwrap();
    assert!(matches!(
        Survey::new(&df, SurveyConfig::default().binary_wide()),
        Err(EthnoError::Schema(_))
    ));
}

// =========================================================================
// Section 3: Consensus and fidelity
// =========================================================================

#[test]
fn test_fic_half_for_five_reports_over_three_taxa() {
    let survey = consensus_survey();
    assert_relative_eq!(survey.informant_consensus_for("Fever").unwrap(), 0.5, epsilon = 1e-12);

    let fic = survey.informant_consensus().unwrap();
    let fever = fic.iter().find(|r| r.use_category == "Fever").unwrap();
    assert_eq!((fever.use_reports, fever.taxa), (5, 3));
    assert_relative_eq!(fever.value, 0.5);

    for row in &fic {
        assert!((0.0..=1.0).contains(&row.value));
    }
}

#[test]
fn test_fic_single_report_policy() {
    let df = df!(
        "informant" => ["i1", "i2", "i3"],
        "taxon" => ["sp_a", "sp_b", "sp_c"],
        "ailments_treated" => ["Fever", "Fever", "Burns"]
    )
    .unwrap();

    let failing = Survey::new(&df, SurveyConfig::default()).unwrap();
    match failing.informant_consensus() {
        Err(EthnoError::UndefinedIndexValue { index, key, .. }) => {
            assert_eq!(index, "FIC");
            assert_eq!(key, "Burns");
        }
        other => panic!("expected UndefinedIndexValue, got {other:?}"),
    }

    let excluding = Survey::new(
        &df,
        SurveyConfig::default().with_undefined_values(UndefinedValuePolicy::Exclude),
    )
    .unwrap();
    let fic = excluding.informant_consensus().unwrap();
    assert_eq!(fic.len(), 1);
    assert_eq!(fic[0].use_category, "Fever");
    assert_relative_eq!(fic[0].value, 0.0);
}

#[test]
fn test_fl_bounds() {
    let fl = consensus_survey().fidelity_level().unwrap();
    assert!(!fl.is_empty());
    for row in &fl {
        assert!(row.value > 0.0 && row.value <= 100.0);
        assert!(row.informants <= row.frequency_of_citation);
    }
}

// =========================================================================
// Section 4: Properties
// =========================================================================

#[test]
fn test_use_reports_sum_to_total() {
    for survey in [four_row_survey(), six_row_survey(), consensus_survey()] {
        let total: usize = counts(&survey.use_report().unwrap()).iter().sum();
        assert_eq!(total, survey.matrix().len());
    }
}

#[test]
fn test_frequency_and_importance_bounds() {
    let survey = consensus_survey();
    let informants = survey.matrix().informant_count();

    let fc = survey.frequency_of_citation().unwrap();
    let rfc = survey.relative_frequency_of_citation().unwrap();
    for row in &fc {
        assert!(row.value <= informants);
        let relative = value_for(&rfc, &row.taxon);
        assert_relative_eq!(relative, row.value as f64 / informants as f64, epsilon = 1e-12);
        assert!((0.0..=1.0).contains(&relative));
    }

    let ur = survey.use_report().unwrap();
    let ci = survey.cultural_importance().unwrap();
    for row in &ur {
        let expected = row.value as f64 / informants as f64;
        assert!((value_for(&ci, &row.taxon) - expected).abs() < 1e-9);
    }

    for row in survey.relative_importance().unwrap() {
        assert!((0.0..=1.0).contains(&row.value));
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let survey = consensus_survey();
    for kind in [
        IndexKind::UseReport,
        IndexKind::CulturalImportance,
        IndexKind::RelativeImportance,
        IndexKind::CulturalValue,
        IndexKind::FidelityLevel,
        IndexKind::InformantConsensus,
    ] {
        assert_eq!(survey.calculate(kind).unwrap(), survey.calculate(kind).unwrap());
    }
}

#[test]
fn test_empty_survey_fails_every_index() {
    let df = df!(
        "informant" => Vec::<String>::new(),
        "taxon" => Vec::<String>::new(),
        "ailments_treated" => Vec::<String>::new()
    )
    .unwrap();
    let survey = Survey::new(&df, SurveyConfig::default()).unwrap();

    for kind in IndexKind::PER_TAXON {
        assert!(matches!(survey.calculate(kind), Err(EthnoError::EmptyData)), "{kind}");
    }
    assert!(matches!(survey.fidelity_level(), Err(EthnoError::EmptyData)));
    assert!(matches!(survey.informant_consensus(), Err(EthnoError::EmptyData)));
}

#[test]
fn test_missing_use_binding_is_schema_error() {
    let df = df!(
        "informant" => ["A"],
        "taxon" => ["sp_a"],
        "use" => ["Fever"]
    )
    .unwrap();
    assert!(matches!(Survey::new(&df, SurveyConfig::default()), Err(EthnoError::Schema(_))));
    assert!(Survey::new(&df, SurveyConfig::default().with_use_column("use")).is_ok());
}

// =========================================================================
// Section 5: Summary table and export
// =========================================================================

#[test]
fn test_all_taxon_indices_matches_standalone_calls() {
    let survey = six_row_survey();
    let summary = survey.all_taxon_indices(Some(IndexKind::CulturalValue), false).unwrap();
    let taxa: Vec<&str> = summary.iter().map(|r| r.taxon.as_str()).collect();
    assert_eq!(taxa, vec!["Species1", "Species2", "Species3"]);

    let cv = survey.cultural_value().unwrap();
    let ri = survey.relative_importance().unwrap();
    for row in &summary {
        assert_relative_eq!(row.cv, value_for(&cv, &row.taxon));
        assert_relative_eq!(row.ri, value_for(&ri, &row.taxon));
    }

    assert!(matches!(
        survey.all_taxon_indices(Some(IndexKind::InformantConsensus), true),
        Err(EthnoError::Schema(_))
    ));
}

#[test]
fn test_summary_frame_columns() {
    let survey = six_row_survey();
    let view = survey.calculate_summary(None, false).unwrap();
    assert!(matches!(view.table(), ResultTable::Summary(_)));

    let df = view.to_dataframe(&survey.config().columns).unwrap();
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["taxon", "CI", "FC", "NU", "UR", "RFC", "RI", "UV", "CV"]);
    assert_eq!(df.height(), 3);

    for name in ["FC", "NU", "UR"] {
        assert!(df.column(name).unwrap().dtype().is_integer(), "{name}");
    }
    for name in ["CI", "RFC", "RI", "UV", "CV"] {
        assert_eq!(df.column(name).unwrap().dtype(), &DataType::Float64, "{name}");
    }

    let dir = tempfile::tempdir().unwrap();
    let written = view.save_csv(dir.path(), &survey.config().columns).unwrap();
    let contents = std::fs::read_to_string(written).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "taxon,CI,FC,NU,UR,RFC,RI,UV,CV");
    assert!(lines[1].starts_with("Species1,1.0,3,1,3,1.0,1.0,1.0,0.333"), "{}", lines[1]);
    assert!(lines[2].starts_with("Species2,0.666"), "{}", lines[2]);
    assert!(lines[2].contains(",2,1,2,"), "{}", lines[2]);
}

#[test]
fn test_csv_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("survey.csv");
    std::fs::write(
        &source,
        "informant,taxon,ailments_treated\nA,Species1,Headache\nB,Species2,Fever\nC,Species1,Headache\nA,Species3,Cough\n",
    )
    .unwrap();

    let survey = Survey::from_path(&source, SurveyConfig::default()).unwrap();
    let view = survey.calculate(IndexKind::UseReport).unwrap();
    let written = view.save_csv(dir.path(), &survey.config().columns).unwrap();

    assert_eq!(written.file_name().and_then(|n| n.to_str()), Some("use_report_UR.csv"));
    let contents = std::fs::read_to_string(written).unwrap();
    assert!(contents.starts_with("taxon,UR\nSpecies1,2\n"));
}
