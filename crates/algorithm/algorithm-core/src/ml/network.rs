//! LSTM → Dense(ReLU) → Dense(linear) network over univariate windows

use ndarray::{aview1, ArrayView1, Axis};
use rand::Rng;

use super::activation::Activation;
use super::adam::Adam;
use super::dense::{Dense, DenseGrads, DenseTrace};
use super::lstm::{Lstm, LstmGrads, LstmTrace};

#[derive(Debug, Clone)]
pub(crate) struct Network {
    lstm: Lstm,
    hidden: Dense,
    output: Dense,
}

#[derive(Debug, Clone)]
pub(crate) struct Gradients {
    lstm: LstmGrads,
    hidden: DenseGrads,
    output: DenseGrads,
}

pub(crate) struct Trace {
    lstm: LstmTrace,
    hidden: DenseTrace,
    output: DenseTrace,
}

impl Network {
    pub fn new<R: Rng>(lstm_units: usize, dense_units: usize, rng: &mut R) -> Self {
        Self {
            lstm: Lstm::new(1, lstm_units, rng),
            hidden: Dense::new(lstm_units, dense_units, Activation::Relu, rng),
            output: Dense::new(dense_units, 1, Activation::Linear, rng),
        }
    }

    pub fn zero_grads(&self) -> Gradients {
        Gradients {
            lstm: self.lstm.zero_grads(),
            hidden: self.hidden.zero_grads(),
            output: self.output.zero_grads(),
        }
    }

    /// Predict from a univariate window, fed to the LSTM as `[W, 1]`
    pub fn forward(&self, window: &[f64]) -> f64 {
        let sequence = ArrayView1::from(window).insert_axis(Axis(1));
        let h = self.lstm.forward(sequence);
        let r = self.hidden.forward(h.view());
        self.output.forward(r.view())[0]
    }

    pub fn forward_traced(&self, window: &[f64]) -> (f64, Trace) {
        let sequence = ArrayView1::from(window).insert_axis(Axis(1));
        let (h, lstm) = self.lstm.forward_traced(sequence);
        let (r, hidden) = self.hidden.forward_traced(h.view());
        let (y, output) = self.output.forward_traced(r.view());
        (y[0], Trace { lstm, hidden, output })
    }

    /// Accumulate gradients of a loss whose derivative with respect to the
    /// network output is `d_output`
    pub fn backward(&self, trace: &Trace, d_output: f64, grads: &mut Gradients) {
        let d_r = self
            .output
            .backward(&trace.output, aview1(&[d_output]), &mut grads.output);
        let d_h = self.hidden.backward(&trace.hidden, d_r.view(), &mut grads.hidden);
        self.lstm.backward(&trace.lstm, d_h.view(), &mut grads.lstm);
    }

    /// One optimizer step over every parameter tensor
    pub fn apply_gradients(&mut self, adam: &mut Adam, grads: &Gradients) {
        adam.next_step();
        let tensors = [
            (self.lstm.w_x.view_mut().into_dyn(), grads.lstm.w_x.view().into_dyn()),
            (self.lstm.w_h.view_mut().into_dyn(), grads.lstm.w_h.view().into_dyn()),
            (self.lstm.b.view_mut().into_dyn(), grads.lstm.b.view().into_dyn()),
            (self.hidden.weights.view_mut().into_dyn(), grads.hidden.weights.view().into_dyn()),
            (self.hidden.biases.view_mut().into_dyn(), grads.hidden.biases.view().into_dyn()),
            (self.output.weights.view_mut().into_dyn(), grads.output.weights.view().into_dyn()),
            (self.output.biases.view_mut().into_dyn(), grads.output.biases.view().into_dyn()),
        ];
        for (slot, (params, grad)) in tensors.into_iter().enumerate() {
            adam.apply(slot, params, grad);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_forward_traced_matches_forward() {
        let mut rng = StdRng::seed_from_u64(5);
        let net = Network::new(6, 4, &mut rng);
        let window = [0.1, -0.4, 0.7];

        let (traced, _) = net.forward_traced(&window);
        assert_eq!(traced, net.forward(&window));
    }

    #[test]
    fn test_gradient_step_reduces_loss() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = Network::new(8, 4, &mut rng);
        let mut adam = Adam::new(0.01);
        let window = [0.2, 0.4, 0.6];
        let target = 0.8;

        let initial = (net.forward(&window) - target).powi(2);
        for _ in 0..50 {
            let (y, trace) = net.forward_traced(&window);
            let mut grads = net.zero_grads();
            net.backward(&trace, 2.0 * (y - target), &mut grads);
            net.apply_gradients(&mut adam, &grads);
        }
        let after = (net.forward(&window) - target).powi(2);

        assert!(after < initial, "loss {} did not drop below {}", after, initial);
    }

    #[test]
    fn test_output_bias_gradient_is_upstream_gradient() {
        let mut rng = StdRng::seed_from_u64(9);
        let net = Network::new(4, 3, &mut rng);
        let window = [0.3, 0.1, -0.2];

        let (_, trace) = net.forward_traced(&window);
        let mut grads = net.zero_grads();
        net.backward(&trace, 1.0, &mut grads);

        // d(output)/d(output bias) is exactly one
        assert!((grads.output.biases[0] - 1.0).abs() < 1e-12);
    }
}
