use mclpboost::{
    BoostConfig,
    BoostError,
    MclpBoost,
    ScoreMatrix,
    WeightedEnsemble,
};

/// Tests for the prediction side of the engine.
#[cfg(test)]
pub mod predictor {
    use super::*;

    fn fitted() -> MclpBoost<&'static str> {
        let mut booster =
            MclpBoost::new(BoostConfig::new(3, 0.1)).unwrap();
        booster.initialize(["ant", "bee", "cat"], false, "clarabel")
            .unwrap();
        booster.add_classifier(ScoreMatrix::identity(3)).unwrap();
        booster.update().unwrap();
        booster
    }

    #[test]
    fn predict_arg_max() {
        let booster = fitted();
        assert_eq!(booster.predict(&[[0.1, 0.7, 0.2]]).unwrap(), "bee");
        assert_eq!(booster.predict(&[[0.0, 0.2, 0.9]]).unwrap(), "cat");
    }

    #[test]
    fn predict_tie_breaks_to_lowest_label_index() {
        let booster = fitted();
        assert_eq!(booster.predict(&[[0.5, 0.5, 0.0]]).unwrap(), "ant");
        assert_eq!(booster.predict(&[[0.0, 0.4, 0.4]]).unwrap(), "bee");
    }

    #[test]
    fn predict_failure_shapes() {
        let booster = fitted();

        // one score row per registered classifier.
        let ret = booster.predict(&[[0.1, 0.7, 0.2], [0.3, 0.3, 0.3]]);
        assert!(matches!(ret, Err(BoostError::Dimension(_))));

        // one score per label.
        let ret = booster.predict(&[[0.1, 0.7]]);
        assert!(matches!(ret, Err(BoostError::Dimension(_))));
    }

    #[test]
    fn predict_training_recovers_labels() {
        let booster = fitted();
        let predictions = booster.predict_training().unwrap();
        assert_eq!(predictions, vec!["ant", "bee", "cat"]);
    }

    #[test]
    fn ensemble_round_trips_through_serde() {
        let booster = fitted();
        let ensemble = booster.ensemble().unwrap();

        let json = serde_json::to_string(&ensemble).unwrap();
        let restored: WeightedEnsemble<String> =
            serde_json::from_str(&json).unwrap();

        assert_eq!(restored.labels(), &["ant", "bee", "cat"]);
        assert_eq!(restored.n_classifiers(), 1);
        assert_eq!(
            restored.predict(&[[0.1, 0.7, 0.2]]).unwrap(),
            "bee".to_string(),
        );

        // the exported weights match the engine's.
        for (a, b) in restored.weights().iter()
            .zip(booster.weights().unwrap())
        {
            assert!((a[0] - b[0]).abs() < 1e-12);
        }
    }

    #[test]
    fn info_reports_configuration() {
        let booster = fitted();
        let info = booster.info();
        assert!(info.iter().any(|(k, v)| *k == "# of classes" && v == "3"));
        assert!(info.iter().any(|(k, v)| *k == "Solver" && v.contains("clarabel")));
    }
}
