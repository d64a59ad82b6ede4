//! Adam optimizer.
//!
//! Keeps first and second moment estimates per parameter tensor. Tensors are
//! addressed by a slot index so one optimizer can drive every layer of a
//! network:
//!
//! ```text
//! m = beta1 * m + (1 - beta1) * gradient
//! v = beta2 * v + (1 - beta2) * gradient^2
//! m_hat = m / (1 - beta1^t)
//! v_hat = v / (1 - beta2^t)
//! param = param - learning_rate * m_hat / (sqrt(v_hat) + epsilon)
//! ```

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, IxDyn, Zip};

#[derive(Debug, Clone)]
struct Moments {
    m: ArrayD<f64>,
    v: ArrayD<f64>,
}

impl Moments {
    fn zeros(shape: &[usize]) -> Self {
        Self {
            m: ArrayD::zeros(IxDyn(shape)),
            v: ArrayD::zeros(IxDyn(shape)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    slots: Vec<Moments>,
    t: u64,
}

impl Adam {
    /// Adam with the usual defaults (`beta1 = 0.9`, `beta2 = 0.999`,
    /// `epsilon = 1e-7`)
    pub fn new(learning_rate: f64) -> Self {
        Self::with_params(learning_rate, 0.9, 0.999, 1e-7)
    }

    pub fn with_params(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            slots: Vec::new(),
            t: 0,
        }
    }

    pub fn timestep(&self) -> u64 {
        self.t
    }

    /// Advance the timestep; call once per batch before [`apply`](Self::apply)
    pub fn next_step(&mut self) {
        self.t = self.t.saturating_add(1);
    }

    /// Update `params` in place from `grads` using the moments of `slot`
    ///
    /// `params` and `grads` must have the same shape.
    pub fn apply(&mut self, slot: usize, params: ArrayViewMutD<f64>, grads: ArrayViewD<f64>) {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, Moments::zeros(&[0]));
        }
        let moments = &mut self.slots[slot];
        if moments.m.shape() != params.shape() {
            *moments = Moments::zeros(params.shape());
        }

        let t = self.t.max(1) as f64;
        let (beta1, beta2) = (self.beta1, self.beta2);
        let (learning_rate, epsilon) = (self.learning_rate, self.epsilon);
        let bias_correction1 = 1.0 - beta1.powf(t);
        let bias_correction2 = 1.0 - beta2.powf(t);

        Zip::from(params)
            .and(&grads)
            .and(&mut moments.m)
            .and(&mut moments.v)
            .for_each(|p, &g, m, v| {
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g * g;

                let m_hat = *m / bias_correction1;
                let v_hat = *v / bias_correction2;
                *p -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
            });
    }
}
