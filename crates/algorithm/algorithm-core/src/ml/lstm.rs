//! LSTM layer returning the final hidden state of a sequence
//!
//! Gate weights are stacked in the order input, forget, candidate, output:
//! `w_x` is `[4H, I]`, `w_h` is `[4H, H]`, `b` is `[4H]`.
//!
//! ```text
//! i = σ(W_xi x + W_hi h + b_i)
//! f = σ(W_xf x + W_hf h + b_f)
//! g = tanh(W_xg x + W_hg h + b_g)
//! o = σ(W_xo x + W_ho h + b_o)
//! c' = f * c + i * g
//! h' = o * tanh(c')
//! ```

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use super::activation::sigmoid;
use super::dense::add_outer;

#[derive(Debug, Clone)]
pub struct Lstm {
    pub input_size: usize,
    pub hidden_size: usize,
    pub w_x: Array2<f64>,
    pub w_h: Array2<f64>,
    pub b: Array1<f64>,
}

#[derive(Debug, Clone)]
pub struct LstmGrads {
    pub w_x: Array2<f64>,
    pub w_h: Array2<f64>,
    pub b: Array1<f64>,
}

/// Per-timestep activations kept for backpropagation through time
#[derive(Debug, Clone)]
struct StepTrace {
    x: Array1<f64>,
    h_prev: Array1<f64>,
    c_prev: Array1<f64>,
    i: Array1<f64>,
    f: Array1<f64>,
    g: Array1<f64>,
    o: Array1<f64>,
    tanh_c: Array1<f64>,
}

#[derive(Debug, Clone)]
pub struct LstmTrace {
    steps: Vec<StepTrace>,
}

impl Lstm {
    /// Create a layer with uniform `±1/sqrt(H)` weights, forget bias 1.0
    pub fn new<R: Rng>(input_size: usize, hidden_size: usize, rng: &mut R) -> Self {
        let limit = (1.0 / hidden_size as f64).sqrt();
        let gates = 4 * hidden_size;

        let w_x = Array2::random_using((gates, input_size), Uniform::new(-limit, limit), rng);
        let w_h = Array2::random_using((gates, hidden_size), Uniform::new(-limit, limit), rng);

        let mut b = Array1::zeros(gates);
        b.slice_mut(s![hidden_size..2 * hidden_size]).fill(1.0);

        Self {
            input_size,
            hidden_size,
            w_x,
            w_h,
            b,
        }
    }

    pub fn zero_grads(&self) -> LstmGrads {
        LstmGrads {
            w_x: Array2::zeros(self.w_x.raw_dim()),
            w_h: Array2::zeros(self.w_h.raw_dim()),
            b: Array1::zeros(self.b.raw_dim()),
        }
    }

    /// One timestep; returns `(h', c', trace)`
    fn step(
        &self,
        x: ArrayView1<f64>,
        h_prev: &Array1<f64>,
        c_prev: &Array1<f64>,
    ) -> (Array1<f64>, Array1<f64>, StepTrace) {
        let h = self.hidden_size;
        let z = self.w_x.dot(&x) + self.w_h.dot(h_prev) + &self.b;

        let i = z.slice(s![..h]).mapv(sigmoid);
        let f = z.slice(s![h..2 * h]).mapv(sigmoid);
        let g = z.slice(s![2 * h..3 * h]).mapv(f64::tanh);
        let o = z.slice(s![3 * h..]).mapv(sigmoid);

        let c = &f * c_prev + &i * &g;
        let tanh_c = c.mapv(f64::tanh);
        let h_next = &o * &tanh_c;

        let trace = StepTrace {
            x: x.to_owned(),
            h_prev: h_prev.clone(),
            c_prev: c_prev.clone(),
            i,
            f,
            g,
            o,
            tanh_c,
        };
        (h_next, c, trace)
    }

    /// Run a `[T, input_size]` sequence from a zero state and return the last
    /// hidden state
    pub fn forward(&self, sequence: ArrayView2<f64>) -> Array1<f64> {
        self.forward_traced(sequence).0
    }

    pub fn forward_traced(&self, sequence: ArrayView2<f64>) -> (Array1<f64>, LstmTrace) {
        let mut h = Array1::zeros(self.hidden_size);
        let mut c = Array1::zeros(self.hidden_size);
        let mut steps = Vec::with_capacity(sequence.nrows());

        for x in sequence.rows() {
            let (h_next, c_next, trace) = self.step(x, &h, &c);
            steps.push(trace);
            h = h_next;
            c = c_next;
        }

        (h, LstmTrace { steps })
    }

    /// Backpropagation through time from the gradient of the final hidden
    /// state; parameter gradients are accumulated into `grads`
    pub fn backward(&self, trace: &LstmTrace, d_h_last: ArrayView1<f64>, grads: &mut LstmGrads) {
        let h = self.hidden_size;
        let mut dh = d_h_last.to_owned();
        let mut dc = Array1::<f64>::zeros(h);
        let mut dz = Array1::<f64>::zeros(4 * h);

        for step in trace.steps.iter().rev() {
            dc = dc + &dh * &step.o * &step.tanh_c.mapv(|t| 1.0 - t * t);

            let d_i = &dc * &step.g;
            let d_f = &dc * &step.c_prev;
            let d_g = &dc * &step.i;
            let d_o = &dh * &step.tanh_c;

            dz.slice_mut(s![..h])
                .assign(&(d_i * &step.i.mapv(|v| v * (1.0 - v))));
            dz.slice_mut(s![h..2 * h])
                .assign(&(d_f * &step.f.mapv(|v| v * (1.0 - v))));
            dz.slice_mut(s![2 * h..3 * h])
                .assign(&(d_g * &step.g.mapv(|v| 1.0 - v * v)));
            dz.slice_mut(s![3 * h..])
                .assign(&(d_o * &step.o.mapv(|v| v * (1.0 - v))));

            dc = dc * &step.f;

            grads.b += &dz;
            add_outer(grads.w_x.view_mut(), dz.view(), step.x.view());
            add_outer(grads.w_h.view_mut(), dz.view(), step.h_prev.view());

            dh = self.w_h.t().dot(&dz);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sequence() -> Array2<f64> {
        array![[0.5], [-0.3], [0.9]]
    }

    fn loss(lstm: &Lstm, seq: &Array2<f64>) -> f64 {
        lstm.forward(seq.view()).sum()
    }

    fn w_x(lstm: &mut Lstm) -> &mut Array2<f64> {
        &mut lstm.w_x
    }

    fn w_h(lstm: &mut Lstm) -> &mut Array2<f64> {
        &mut lstm.w_h
    }

    /// Central-difference gradient of `loss` for every entry of one matrix
    fn numeric_gradient(
        lstm: &Lstm,
        seq: &Array2<f64>,
        param: fn(&mut Lstm) -> &mut Array2<f64>,
    ) -> Array2<f64> {
        let eps = 1e-6;
        let mut perturbed = lstm.clone();
        let mut numeric = Array2::zeros(param(&mut perturbed).raw_dim());

        for ((r, c), slot) in numeric.indexed_iter_mut() {
            let original = param(&mut perturbed)[(r, c)];
            param(&mut perturbed)[(r, c)] = original + eps;
            let plus = loss(&perturbed, seq);
            param(&mut perturbed)[(r, c)] = original - eps;
            let minus = loss(&perturbed, seq);
            param(&mut perturbed)[(r, c)] = original;
            *slot = (plus - minus) / (2.0 * eps);
        }
        numeric
    }

    #[test]
    fn test_init_shapes_and_forget_bias() {
        let mut rng = StdRng::seed_from_u64(3);
        let lstm = Lstm::new(1, 32, &mut rng);

        assert_eq!(lstm.w_x.dim(), (128, 1));
        assert_eq!(lstm.w_h.dim(), (128, 32));
        assert_eq!(lstm.b.len(), 128);
        assert!(lstm.b.slice(s![..32]).iter().all(|&b| b == 0.0));
        assert!(lstm.b.slice(s![32..64]).iter().all(|&b| b == 1.0));
        assert!(lstm.b.slice(s![64..]).iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_seeded_init_is_reproducible() {
        let a = Lstm::new(1, 4, &mut StdRng::seed_from_u64(8));
        let b = Lstm::new(1, 4, &mut StdRng::seed_from_u64(8));
        assert_eq!(a.w_x, b.w_x);
        assert_eq!(a.w_h, b.w_h);
    }

    #[test]
    fn test_forward_output_is_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let lstm = Lstm::new(1, 8, &mut rng);
        let h = lstm.forward(sequence().view());

        assert_eq!(h.len(), 8);
        assert!(h.iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_empty_sequence_returns_zero_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let lstm = Lstm::new(1, 4, &mut rng);
        let empty = Array2::<f64>::zeros((0, 1));
        assert_eq!(lstm.forward(empty.view()), Array1::<f64>::zeros(4));
    }

    #[test]
    fn test_backward_matches_finite_difference() {
        let mut rng = StdRng::seed_from_u64(11);
        let lstm = Lstm::new(1, 3, &mut rng);
        let seq = sequence();

        // loss = sum(h_T)
        let (_, trace) = lstm.forward_traced(seq.view());
        let mut grads = lstm.zero_grads();
        lstm.backward(&trace, Array1::ones(3).view(), &mut grads);

        let numeric_w_h = numeric_gradient(&lstm, &seq, w_h);
        for (ix, numeric) in numeric_w_h.indexed_iter() {
            assert!(
                (numeric - grads.w_h[ix]).abs() < 1e-5,
                "w_h{:?}: numeric {} analytic {}",
                ix,
                numeric,
                grads.w_h[ix]
            );
        }

        let numeric_w_x = numeric_gradient(&lstm, &seq, w_x);
        for (ix, numeric) in numeric_w_x.indexed_iter() {
            assert!((numeric - grads.w_x[ix]).abs() < 1e-5);
        }

        let eps = 1e-6;
        let mut perturbed = lstm.clone();
        for k in 0..lstm.b.len() {
            perturbed.b[k] = lstm.b[k] + eps;
            let plus = loss(&perturbed, &seq);
            perturbed.b[k] = lstm.b[k] - eps;
            let minus = loss(&perturbed, &seq);
            perturbed.b[k] = lstm.b[k];
            let numeric = (plus - minus) / (2.0 * eps);
            assert!((numeric - grads.b[k]).abs() < 1e-5);
        }
    }
}
