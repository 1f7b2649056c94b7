//! One-vs-rest logistic regression
//!
//! Each genre has an independent binary classifier, so probabilities do not
//! sum to one and any number of genres can be selected.

use std::collections::HashMap;

use super::spec::ClassifierSpec;
use super::vectorizer::SparseVector;

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Per-genre linear models over TF-IDF features
#[derive(Debug, Clone, PartialEq)]
pub struct OneVsRestClassifier {
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl OneVsRestClassifier {
    pub fn new(coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Self {
        Self { coef, intercept }
    }

    pub fn from_spec(spec: &ClassifierSpec) -> Self {
        Self::new(spec.coef.clone(), spec.intercept.clone())
    }

    pub fn to_spec(&self) -> ClassifierSpec {
        ClassifierSpec {
            coef: self.coef.clone(),
            intercept: self.intercept.clone(),
            unknown_fields: HashMap::new(),
        }
    }

    /// Raw margins `coef · x + intercept`, one per genre
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| x.dot(row) + bias)
            .collect()
    }

    /// Independent probability per genre
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        self.decision_function(x)
            .into_iter()
            .map(sigmoid)
            .collect()
    }

    pub fn n_classes(&self) -> usize {
        self.intercept.len()
    }
}
