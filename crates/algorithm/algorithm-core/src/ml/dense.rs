//! Fully connected layer

use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use super::activation::Activation;

/// Dense layer `y = act(W x + b)` with `W` of shape `[out, in]`
#[derive(Debug, Clone)]
pub struct Dense {
    pub input_size: usize,
    pub output_size: usize,
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
    pub activation: Activation,
}

/// Values kept from the forward pass for backpropagation
#[derive(Debug, Clone)]
pub struct DenseTrace {
    input: Array1<f64>,
    pre_activation: Array1<f64>,
}

/// Accumulated gradients, same shapes as the layer parameters
#[derive(Debug, Clone)]
pub struct DenseGrads {
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
}

/// `target += column ⊗ row`
pub(crate) fn add_outer(mut target: ArrayViewMut2<f64>, column: ArrayView1<f64>, row: ArrayView1<f64>) {
    general_mat_mul(
        1.0,
        &column.insert_axis(Axis(1)),
        &row.insert_axis(Axis(0)),
        1.0,
        &mut target,
    );
}

impl Dense {
    /// Create a layer with Glorot-uniform weights and zero biases
    pub fn new<R: Rng>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let limit = (6.0 / (input_size + output_size) as f64).sqrt();

        Self {
            input_size,
            output_size,
            weights: Array2::random_using(
                (output_size, input_size),
                Uniform::new(-limit, limit),
                rng,
            ),
            biases: Array1::zeros(output_size),
            activation,
        }
    }

    pub fn zero_grads(&self) -> DenseGrads {
        DenseGrads {
            weights: Array2::zeros(self.weights.raw_dim()),
            biases: Array1::zeros(self.biases.raw_dim()),
        }
    }

    fn affine(&self, input: ArrayView1<f64>) -> Array1<f64> {
        self.weights.dot(&input) + &self.biases
    }

    /// Forward pass without keeping a trace
    pub fn forward(&self, input: ArrayView1<f64>) -> Array1<f64> {
        let activation = self.activation;
        self.affine(input).mapv_into(|z| activation.apply(z))
    }

    /// Forward pass that keeps what [`backward`](Self::backward) needs
    pub fn forward_traced(&self, input: ArrayView1<f64>) -> (Array1<f64>, DenseTrace) {
        let activation = self.activation;
        let pre_activation = self.affine(input);
        let output = pre_activation.mapv(|z| activation.apply(z));
        let trace = DenseTrace {
            input: input.to_owned(),
            pre_activation,
        };
        (output, trace)
    }

    /// Accumulate parameter gradients into `grads` and return the gradient
    /// with respect to the layer input
    pub fn backward(
        &self,
        trace: &DenseTrace,
        d_output: ArrayView1<f64>,
        grads: &mut DenseGrads,
    ) -> Array1<f64> {
        let activation = self.activation;
        let dz = &d_output * &trace.pre_activation.mapv(|z| activation.derivative(z));

        grads.biases += &dz;
        add_outer(grads.weights.view_mut(), dz.view(), trace.input.view());

        self.weights.t().dot(&dz)
    }
}
