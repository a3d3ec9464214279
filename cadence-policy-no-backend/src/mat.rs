use serde::{Deserialize, Serialize};

/// Row-major matrix of `f32`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    pub data: Vec<f32>,
    pub shape: Vec<i32>,
}

impl Mat {
    /// Constructs a `rows` x `cols` matrix from row-major `data`.
    ///
    /// # Panics
    ///
    /// Panics if the length of `data` is not `rows * cols`.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        if data.len() != rows * cols {
            panic!(
                "Invalid matrix data: {} values for shape {:?}",
                data.len(),
                (rows, cols)
            );
        }
        Self {
            data,
            shape: vec![rows as _, cols as _],
        }
    }

    pub fn rows(&self) -> usize {
        self.shape[0] as usize
    }

    pub fn cols(&self) -> usize {
        self.shape[1] as usize
    }

    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (self.rows(), self.cols(), x.cols());
        if l != x.rows() {
            panic!(
                "Trying to multiply matrices of incompatible sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }
        let mut data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let kk = i * n + j;
                for k in 0..l {
                    data[kk] += self.data[i * l + k] * x.data[k * n + j];
                }
            }
        }

        Self {
            shape: vec![m as _, n as _],
            data,
        }
    }

    pub fn add(&self, x: &Mat) -> Self {
        if self.shape[0] != x.shape[0] || self.shape[1] != x.shape[1] {
            panic!(
                "Trying to add matrices of different sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }

        let data = self
            .data
            .iter()
            .zip(x.data.iter())
            .map(|(a, b)| *a + *b)
            .collect();

        Mat {
            data,
            shape: self.shape.clone(),
        }
    }

    pub fn relu(&self) -> Self {
        self.map(|a| match a < 0. {
            true => 0.,
            false => a,
        })
    }

    pub fn tanh(&self) -> Self {
        self.map(f32::tanh)
    }

    /// Softmax over all the elements.
    pub fn softmax(&self) -> Self {
        let max = self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let exp = self.map(|a| (a - max).exp());
        let sum: f32 = exp.data.iter().sum();
        exp.map(|a| a / sum)
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|a| f(*a)).collect(),
            shape: self.shape.clone(),
        }
    }
}

/// Column vector.
impl From<Vec<f32>> for Mat {
    fn from(x: Vec<f32>) -> Self {
        let shape = vec![x.len() as i32, 1];
        Self { shape, data: x }
    }
}

#[cfg(test)]
mod tests {
    use super::Mat;

    #[test]
    fn test_matmul() {
        let x = Mat::new(vec![1., 2., 3., 4., 5., 6.], 2, 3);
        let y: Mat = vec![7., 8., 9.].into();
        let z = x.matmul(&y);
        assert_eq!(z, Mat::new(vec![50., 122.], 2, 1));
    }

    #[test]
    fn test_softmax() {
        let x: Mat = vec![1., 1., 1., 1.].into();
        assert_eq!(x.softmax().data, vec![0.25; 4]);

        let y: Mat = vec![1000., 0.].into();
        let p = y.softmax();
        assert!(p.data.iter().all(|v| v.is_finite()));
        assert!((p.data[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_add_different_sizes() {
        let x: Mat = vec![1., 2.].into();
        let y: Mat = vec![1., 2., 3.].into();
        let _ = x.add(&y);
    }
}
