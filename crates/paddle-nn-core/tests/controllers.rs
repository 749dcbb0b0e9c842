use paddle_nn_core::dataset::{synthetic_predictive, synthetic_reactive, unzip};
use paddle_nn_core::{
    Action, FeatureVector, ModelConfig, NetError, PaddleModel, PredictiveModel, ReactiveModel,
    ReactiveState, WeightSnapshot,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

#[test]
fn reactive_training_beats_its_initial_guesses() {
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let samples = synthetic_reactive(&mut rng, 300);
    let (states, labels) = unzip(&samples);

    let mut model = ReactiveModel::new(0.1, &mut rng);
    let before = model.accuracy(&states, &labels).unwrap();
    model.fit(&states, &labels, 60).unwrap();
    let after = model.accuracy(&states, &labels).unwrap();
    assert!(after > before, "accuracy {after} should exceed {before}");
}

#[test]
fn predictive_fit_default_runs_configured_budget() {
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    let samples = synthetic_predictive(&mut rng, 40);
    let (states, labels) = unzip(&samples);

    let config = ModelConfig {
        epochs: 3,
        seed: Some(7),
        ..ModelConfig::default()
    };
    let mut a = PredictiveModel::from_config(&config).unwrap();
    let mut b = PredictiveModel::from_config(&config).unwrap();
    a.fit_default(&states, &labels).unwrap();
    b.fit(&states, &labels, 3).unwrap();
    assert_eq!(a.export_weights(), b.export_weights());
}

#[test]
fn weight_round_trip_preserves_predictions() {
    let mut rng = ChaCha12Rng::seed_from_u64(99);
    let samples = synthetic_predictive(&mut rng, 25);
    let (states, labels) = unzip(&samples);

    let mut trained = PredictiveModel::new(0.2, &mut rng);
    trained.fit(&states, &labels, 5).unwrap();

    let json = trained.export_weights().to_json().unwrap();
    let snapshot = WeightSnapshot::from_json(&json).unwrap();

    let mut fresh = PredictiveModel::new(0.2, &mut rng);
    fresh.load_weights(&snapshot).unwrap();
    for s in &states {
        assert_eq!(fresh.predict(s), trained.predict(s));
        assert_eq!(fresh.probabilities(s), trained.probabilities(s));
    }

    trained.load_weights(&trained.export_weights()).unwrap();
    for s in &states {
        assert_eq!(fresh.predict(s), trained.predict(s));
    }
}

#[test]
fn fit_with_empty_data_leaves_weights_alone() {
    let mut model = ReactiveModel::new(0.1, &mut ChaCha12Rng::seed_from_u64(1));
    let before = model.export_weights();
    model.fit(&[], &[], 100).unwrap();
    assert_eq!(model.export_weights(), before);
    assert_eq!(model.accuracy(&[], &[]), Ok(0.0));
}

#[test]
fn raw_features_cross_the_boundary_only_with_the_right_width() {
    let model = ReactiveModel::new(0.1, &mut ChaCha12Rng::seed_from_u64(1));
    let raw = [0.1; 10];
    let state = ReactiveState::from_slice(&raw).unwrap();
    let action: Action = model.predict(&state);
    assert!(Action::ALL.contains(&action));

    assert_eq!(
        ReactiveState::from_slice(&[0.1; 14]).unwrap_err(),
        NetError::FeatureCount {
            expected: 10,
            actual: 14
        }
    );
}
