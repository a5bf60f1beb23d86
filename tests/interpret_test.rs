//! Tests for the result-interpretation transforms.

use churnlens::{
    AnalyticsSnapshot, CategoryRates, ChurnLabel, ChurnLensError, ConfusionMatrix, Direction,
    Distribution, FeatureKey, Metric, ModelComparisonRow, ModelPerformance, PredictionResult,
    RiskTier, RocCurve, RocPoint, ShapContribution, adapt_roc, adapt_roc_curve,
    build_leaderboard, classify_risk, derive_aggregate_stats, derive_confusion,
    diagonal_baseline, rank_attributions, summarize_prediction,
};

fn rates(pairs: &[(&str, f64)]) -> CategoryRates {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn sample_snapshot() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        overall_churn_rate: 0.2037,
        churn_by_geography: rates(&[("France", 0.1616), ("Germany", 0.324), ("Spain", 0.1667)]),
        churn_by_gender: rates(&[("Female", 0.2507), ("Male", 0.1646)]),
        churn_by_activity: Some(rates(&[("Active", 0.1427), ("Inactive", 0.2685)])),
        age_distribution: Distribution {
            churn: vec![45.0, 52.0, 38.0],
            not_churn: vec![30.0, 28.0, 41.0, 35.0, 33.0],
        },
        balance_distribution: None,
    }
}

fn sample_performance() -> ModelPerformance {
    ModelPerformance {
        model_comparison: vec![
            ModelComparisonRow {
                model: "Logistic Regression".into(),
                accuracy: 0.811,
                recall: 0.2,
                auc: 0.779,
            },
            ModelComparisonRow {
                model: "Random Forest".into(),
                accuracy: 0.866,
                recall: 0.47,
                auc: 0.858,
            },
            ModelComparisonRow {
                model: "XGBoost".into(),
                accuracy: 0.866,
                recall: 0.513,
                auc: 0.873,
            },
        ],
        confusion_matrix: ConfusionMatrix::new(1530, 74, 196, 200),
        roc_curve: RocCurve {
            fpr: vec![0.0, 0.1, 1.0],
            tpr: vec![0.0, 0.6, 1.0],
            auc: 0.873,
        },
        selected_model: Some("XGBoost".into()),
        selection_reason: "Highest recall on the churn class".into(),
    }
}

// ============================================================================
// Risk classification
// ============================================================================

#[test]
fn risk_tier_boundaries() {
    assert_eq!(classify_risk(0.0), RiskTier::Low);
    assert_eq!(classify_risk(0.39), RiskTier::Low);
    assert_eq!(classify_risk(0.4), RiskTier::Medium);
    assert_eq!(classify_risk(0.69), RiskTier::Medium);
    assert_eq!(classify_risk(0.7), RiskTier::High);
    assert_eq!(classify_risk(1.0), RiskTier::High);
}

#[test]
fn risk_tier_out_of_range_uses_same_thresholds() {
    assert_eq!(classify_risk(-0.2), RiskTier::Low);
    assert_eq!(classify_risk(1.4), RiskTier::High);
}

#[test]
fn risk_tier_labels() {
    assert_eq!(RiskTier::High.label(), "High Risk");
    assert_eq!(RiskTier::from(0.5).to_string(), "Medium Risk");
    assert!(RiskTier::Low < RiskTier::Medium && RiskTier::Medium < RiskTier::High);
}

// ============================================================================
// Attribution ranking
// ============================================================================

#[test]
fn attributions_partition_by_sign_and_sort() {
    let shap = vec![
        ShapContribution::new("Age", 0.12),
        ShapContribution::new("IsActiveMember", -0.08),
        ShapContribution::new("Geography_Germany", 0.3),
        ShapContribution::new("NumOfProducts", -0.2),
        ShapContribution::new("Balance", 0.05),
    ];
    let ranked = rank_attributions(&shap);

    let up: Vec<_> = ranked.increasing.iter().map(|a| a.feature.key()).collect();
    assert_eq!(up, ["Geography_Germany", "Age", "Balance"]);
    let down: Vec<_> = ranked.reducing.iter().map(|a| a.feature.key()).collect();
    assert_eq!(down, ["NumOfProducts", "IsActiveMember"]);

    assert!(ranked.increasing.iter().all(|a| a.direction == Direction::IncreasesRisk));
    assert!(ranked.reducing.iter().all(|a| a.direction == Direction::ReducesRisk));
    assert_eq!(ranked.len(), shap.len());
}

#[test]
fn zero_impact_goes_to_reducing_group() {
    let ranked = rank_attributions(&[ShapContribution::new("Tenure", 0.0)]);
    assert!(ranked.increasing.is_empty());
    assert_eq!(ranked.reducing.len(), 1);
    assert_eq!(ranked.reducing[0].intensity, 0.0);
}

#[test]
fn equal_impacts_keep_input_order() {
    let shap = vec![
        ShapContribution::new("Age", 0.1),
        ShapContribution::new("Balance", 0.1),
        ShapContribution::new("Tenure", -0.2),
        ShapContribution::new("CreditScore", -0.2),
        ShapContribution::new("Gender_Male", 0.1),
    ];
    let ranked = rank_attributions(&shap);

    let up: Vec<_> = ranked.increasing.iter().map(|a| a.feature.key()).collect();
    assert_eq!(up, ["Age", "Balance", "Gender_Male"]);
    let down: Vec<_> = ranked.reducing.iter().map(|a| a.feature.key()).collect();
    assert_eq!(down, ["Tenure", "CreditScore"]);
}

#[test]
fn intensity_is_capped_at_100() {
    let ranked = rank_attributions(&[
        ShapContribution::new("Age", 1.5),
        ShapContribution::new("Balance", -0.25),
    ]);
    assert_eq!(ranked.increasing[0].intensity, 100.0);
    assert_eq!(ranked.reducing[0].intensity, 25.0);
    // Impact itself is never clamped.
    assert_eq!(ranked.increasing[0].impact, 1.5);
}

#[test]
fn empty_shap_yields_empty_groups() {
    let ranked = rank_attributions(&[]);
    assert!(ranked.is_empty());
    assert!(ranked.increasing.is_empty());
    assert!(ranked.reducing.is_empty());
}

#[test]
fn attribution_display_uses_labels_and_signed_percent() {
    let ranked = rank_attributions(&[
        ShapContribution::new("Balance", 0.123),
        ShapContribution::new("IsActiveMember", -0.04),
        ShapContribution::new("SomethingNew", 0.01),
    ]);
    assert_eq!(ranked.increasing[0].label(), "Account Balance");
    assert_eq!(ranked.increasing[0].impact_display(), "+12.3%");
    assert_eq!(ranked.increasing[1].label(), "SomethingNew");
    assert_eq!(ranked.reducing[0].label(), "Active Membership");
    assert_eq!(ranked.reducing[0].impact_display(), "-4.0%");
}

// ============================================================================
// Prediction summary
// ============================================================================

#[test]
fn prediction_summary_combines_tier_and_ranking() {
    let result = PredictionResult {
        prediction: ChurnLabel::Churn,
        probability: 0.7312,
        shap: vec![
            ShapContribution::new("Age", 0.2),
            ShapContribution::new("IsActiveMember", -0.1),
        ],
    };
    let summary = summarize_prediction(&result);
    assert_eq!(summary.label, ChurnLabel::Churn);
    assert_eq!(summary.risk, RiskTier::High);
    assert_eq!(summary.probability_display(), "73.12%");
    assert_eq!(summary.attributions.increasing[0].feature, FeatureKey::Age);
    assert_eq!(summary.attributions.reducing.len(), 1);
}

// ============================================================================
// Aggregate statistics
// ============================================================================

#[test]
fn category_percentages_round_to_one_decimal() {
    let stats = derive_aggregate_stats(&sample_snapshot());
    let germany = stats.geography.get("Germany").unwrap();
    assert_eq!(germany.rounded_percent(), 32.4);
    assert_eq!(germany.display(), "32.4%");
    // Source fraction untouched.
    assert_eq!(germany.rate, 0.324);

    assert_eq!(stats.geography.get("France").unwrap().display(), "16.2%");
    assert_eq!(stats.gender.get("Female").unwrap().display(), "25.1%");
}

#[test]
fn category_order_follows_snapshot() {
    let stats = derive_aggregate_stats(&sample_snapshot());
    let names: Vec<_> = stats.geography.points().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["France", "Germany", "Spain"]);
}

#[test]
fn totals_come_from_age_distribution() {
    let stats = derive_aggregate_stats(&sample_snapshot());
    assert_eq!(stats.churned_customers, 3);
    assert_eq!(stats.retained_customers, 5);
    assert_eq!(stats.total_customers, 8);
    assert_eq!(stats.churned_share().unwrap(), 3.0 / 8.0);
}

#[test]
fn overall_rate_rounds_to_two_decimals() {
    let stats = derive_aggregate_stats(&sample_snapshot());
    assert_eq!(stats.overall_churn_percent, 20.37);
    assert_eq!(stats.overall_churn_display(), "20.37%");
}

#[test]
fn highest_churn_category() {
    let stats = derive_aggregate_stats(&sample_snapshot());
    assert_eq!(stats.highest_churn_geography().unwrap().name, "Germany");
    assert_eq!(stats.highest_churn_gender().unwrap().name, "Female");
}

#[test]
fn highest_churn_tie_goes_to_first_category() {
    let mut snapshot = sample_snapshot();
    snapshot.churn_by_geography = rates(&[("Spain", 0.3241), ("Germany", 0.3238)]);
    let stats = derive_aggregate_stats(&snapshot);
    // Both round to 32.4%.
    assert_eq!(stats.highest_churn_geography().unwrap().name, "Spain");
}

#[test]
fn empty_categories_have_no_extremal() {
    let mut snapshot = sample_snapshot();
    snapshot.churn_by_gender = CategoryRates::new();
    let stats = derive_aggregate_stats(&snapshot);
    assert!(stats.gender.is_empty());
    assert!(stats.highest_churn_gender().is_none());
}

#[test]
fn missing_activity_breakdown_is_empty_series() {
    let mut snapshot = sample_snapshot();
    snapshot.churn_by_activity = None;
    let stats = derive_aggregate_stats(&snapshot);
    assert!(stats.activity.is_empty());
    assert_eq!(stats.geography.len(), 3);
}

#[test]
fn empty_age_distribution_makes_share_undefined() {
    let mut snapshot = sample_snapshot();
    snapshot.age_distribution = Distribution::default();
    let stats = derive_aggregate_stats(&snapshot);
    assert_eq!(stats.total_customers, 0);
    assert!(matches!(
        stats.churned_share(),
        Err(ChurnLensError::UndefinedRatio(_))
    ));
}

#[test]
fn balance_samples_counted_when_present() {
    let mut snapshot = sample_snapshot();
    assert_eq!(derive_aggregate_stats(&snapshot).balance_samples, None);
    snapshot.balance_distribution = Some(Distribution {
        churn: vec![0.0, 90000.0],
        not_churn: vec![120000.0],
    });
    assert_eq!(derive_aggregate_stats(&snapshot).balance_samples, Some(3));
}

#[test]
fn aggregate_derivation_is_idempotent() {
    let snapshot = sample_snapshot();
    assert_eq!(
        derive_aggregate_stats(&snapshot),
        derive_aggregate_stats(&snapshot)
    );
}

// ============================================================================
// Confusion matrix
// ============================================================================

#[test]
fn confusion_shares_of_population() {
    let breakdown = derive_confusion(&ConfusionMatrix::new(85, 10, 3, 2)).unwrap();
    assert_eq!(breakdown.total, 100);
    assert_eq!(breakdown.true_negative.percent, 85.0);
    assert_eq!(breakdown.false_positive.percent, 10.0);
    assert_eq!(breakdown.false_negative.percent, 3.0);
    assert_eq!(breakdown.true_positive.percent, 2.0);
    assert_eq!(breakdown.true_negative.count, 85);
}

#[test]
fn confusion_display_rounds_to_one_decimal() {
    let breakdown = derive_confusion(&ConfusionMatrix::new(1530, 74, 196, 200)).unwrap();
    assert_eq!(breakdown.total, 2000);
    assert_eq!(breakdown.true_negative.display(), "76.5%");
    assert_eq!(breakdown.false_positive.display(), "3.7%");
    assert_eq!(breakdown.false_negative.display(), "9.8%");
    assert_eq!(breakdown.true_positive.display(), "10.0%");
}

#[test]
fn all_zero_confusion_matrix_is_undefined() {
    let err = derive_confusion(&ConfusionMatrix::default()).unwrap_err();
    assert!(matches!(err, ChurnLensError::UndefinedRatio(_)));
}

#[test]
fn overflowing_confusion_counts_are_malformed() {
    let matrix: ConfusionMatrix = serde_json::from_str(
        r#"{"true_negative": 18446744073709551615, "false_positive": 1,
            "false_negative": 0, "true_positive": 0}"#,
    )
    .unwrap();

    assert!(matches!(
        matrix.total(),
        Err(ChurnLensError::MalformedResponse(_))
    ));
    let err = derive_confusion(&matrix).unwrap_err();
    assert!(matches!(err, ChurnLensError::MalformedResponse(_)));
}

#[test]
fn largest_representable_total_is_accepted() {
    let breakdown = derive_confusion(&ConfusionMatrix::new(u64::MAX - 1, 1, 0, 0)).unwrap();
    assert_eq!(breakdown.total, u64::MAX);
}

// ============================================================================
// ROC curve
// ============================================================================

#[test]
fn roc_points_zip_in_index_order() {
    let points = adapt_roc(&[0.0, 0.1, 1.0], &[0.0, 0.6, 1.0]).unwrap();
    assert_eq!(
        points,
        vec![
            RocPoint::new(0.0, 0.0),
            RocPoint::new(0.1, 0.6),
            RocPoint::new(1.0, 1.0),
        ]
    );
}

#[test]
fn roc_length_mismatch_is_malformed() {
    let err = adapt_roc(&[0.0, 0.5, 1.0], &[0.0, 1.0]).unwrap_err();
    assert!(matches!(err, ChurnLensError::MalformedResponse(_)));
}

#[test]
fn empty_roc_arrays_yield_no_points() {
    assert!(adapt_roc(&[], &[]).unwrap().is_empty());
}

#[test]
fn diagonal_baseline_is_fixed() {
    assert_eq!(
        diagonal_baseline(),
        [RocPoint::new(0.0, 0.0), RocPoint::new(1.0, 1.0)]
    );
}

#[test]
fn roc_series_carries_baseline_and_auc() {
    let series = adapt_roc_curve(&sample_performance().roc_curve).unwrap();
    assert_eq!(series.points.len(), 3);
    assert_eq!(series.baseline, diagonal_baseline());
    assert_eq!(series.auc_display(), "AUC = 0.873");
}

// ============================================================================
// Leaderboard
// ============================================================================

#[test]
fn leaderboard_marks_selected_model() {
    let board = build_leaderboard(&sample_performance());
    assert_eq!(board.rows.len(), 3);
    assert_eq!(board.selected().unwrap().row.model, "XGBoost");
    assert_eq!(board.selection_reason, "Highest recall on the churn class");
    assert!(!board.rows[0].selected);
}

#[test]
fn leaderboard_display_formats() {
    let board = build_leaderboard(&sample_performance());
    let row = &board.rows[2];
    assert_eq!(row.accuracy_display(), "86.6%");
    assert_eq!(row.recall_display(), "51.3%");
    assert_eq!(row.auc_display(), "0.873");
}

#[test]
fn best_by_metric_prefers_first_on_ties() {
    let board = build_leaderboard(&sample_performance());
    assert_eq!(board.best_by(Metric::Recall).unwrap().row.model, "XGBoost");
    assert_eq!(board.best_by(Metric::Auc).unwrap().row.model, "XGBoost");
    // Random Forest and XGBoost tie on accuracy.
    assert_eq!(
        board.best_by(Metric::Accuracy).unwrap().row.model,
        "Random Forest"
    );
}

#[test]
fn leaderboard_without_selected_model() {
    let mut performance = sample_performance();
    performance.selected_model = None;
    performance.model_comparison.clear();
    let board = build_leaderboard(&performance);
    assert!(board.selected().is_none());
    assert!(board.best_by(Metric::Auc).is_none());
}
