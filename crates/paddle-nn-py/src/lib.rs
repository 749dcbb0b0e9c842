use paddle_nn_core::{
    Action, FeatureVector, PaddleModel, PredictiveModel, PredictiveState, ReactiveModel,
    ReactiveState, WeightSnapshot,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn labels(actions: Vec<String>) -> PyResult<Vec<Action>> {
    actions
        .iter()
        .map(|a| a.parse::<Action>().map_err(value_error))
        .collect()
}

fn parse_snapshot(json: &str) -> PyResult<WeightSnapshot> {
    WeightSnapshot::from_json(json).map_err(value_error)
}

fn rng_for(seed: Option<u64>) -> ChaCha12Rng {
    match seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::from_rng(&mut rand::rng()),
    }
}

/// Binds one controller type to a Python class. States cross the boundary as flat
/// feature lists in network input order; actions as their labels.
macro_rules! py_controller {
    ($py_name:ident, $class:tt, $model:ty, $state:ty) => {
        #[pyclass(name = $class)]
        struct $py_name {
            inner: $model,
        }

        impl $py_name {
            fn states(features: Vec<Vec<f64>>) -> PyResult<Vec<$state>> {
                features
                    .iter()
                    .map(|f| <$state>::from_slice(f).map_err(value_error))
                    .collect()
            }
        }

        #[pymethods]
        impl $py_name {
            #[new]
            #[pyo3(signature = (learning_rate=0.1, weights_json=None, seed=None))]
            fn new(
                learning_rate: f64,
                weights_json: Option<&str>,
                seed: Option<u64>,
            ) -> PyResult<Self> {
                let inner = match weights_json {
                    Some(json) => {
                        <$model>::with_weights(learning_rate, &parse_snapshot(json)?)
                            .map_err(value_error)?
                    }
                    None => <$model>::new(learning_rate, &mut rng_for(seed)),
                };
                Ok(Self { inner })
            }

            fn predict(&self, features: Vec<f64>) -> PyResult<String> {
                let state = <$state>::from_slice(&features).map_err(value_error)?;
                Ok(self.inner.predict(&state).to_string())
            }

            fn probabilities(&self, features: Vec<f64>) -> PyResult<Vec<f64>> {
                let state = <$state>::from_slice(&features).map_err(value_error)?;
                Ok(self.inner.probabilities(&state).to_vec())
            }

            fn single_fit(&mut self, features: Vec<f64>, correct: &str) -> PyResult<()> {
                let state = <$state>::from_slice(&features).map_err(value_error)?;
                let action = correct.parse::<Action>().map_err(value_error)?;
                self.inner.single_fit(&state, action);
                Ok(())
            }

            #[pyo3(signature = (features, corrects, epochs=100))]
            fn fit(
                &mut self,
                features: Vec<Vec<f64>>,
                corrects: Vec<String>,
                epochs: usize,
            ) -> PyResult<()> {
                let states = Self::states(features)?;
                let actions = labels(corrects)?;
                self.inner.fit(&states, &actions, epochs).map_err(value_error)
            }

            fn export_weights(&self) -> PyResult<String> {
                self.inner.export_weights().to_json().map_err(value_error)
            }

            fn load_weights(&mut self, weights_json: &str) -> PyResult<()> {
                let snapshot = parse_snapshot(weights_json)?;
                self.inner.load_weights(&snapshot).map_err(value_error)
            }
        }
    };
}

py_controller!(PyReactiveModel, "ReactiveModel", ReactiveModel, ReactiveState);
py_controller!(PyPredictiveModel, "PredictiveModel", PredictiveModel, PredictiveState);

/// Labels in output-neuron order.
#[pyfunction]
fn actions() -> Vec<&'static str> {
    Action::ALL.iter().map(|a| a.label()).collect()
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(actions, m)?)?;
    m.add_class::<PyReactiveModel>()?;
    m.add_class::<PyPredictiveModel>()?;
    Ok(())
}
