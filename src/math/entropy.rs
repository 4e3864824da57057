//! Weighted Shannon entropy over admissible tile states

/// Running sums needed to evaluate weighted entropy incrementally
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightSums {
    /// Sum of weights
    pub total: f64,
    /// Sum of `w * ln(w)`
    pub total_log: f64,
    /// Number of weights accumulated
    pub count: usize,
}

impl WeightSums {
    /// Add one weight
    pub fn add(&mut self, weight: f64) {
        self.total += weight;
        self.total_log += weight * weight.ln();
        self.count += 1;
    }

    /// `ln(ΣW) − Σ(w·ln w)/ΣW`; exactly zero for a single weight or none
    pub fn entropy(&self) -> f64 {
        if self.count <= 1 || self.total <= 0.0 {
            return 0.0;
        }
        self.total.ln() - self.total_log / self.total
    }
}

impl FromIterator<f64> for WeightSums {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sums = Self::default();
        for weight in iter {
            sums.add(weight);
        }
        sums
    }
}

/// Weighted entropy of a set of positive weights
pub fn weighted_entropy(weights: impl IntoIterator<Item = f64>) -> f64 {
    weights.into_iter().collect::<WeightSums>().entropy()
}
