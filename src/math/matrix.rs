use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data,
        }
    }

    /// Wraps a flat vector as a column matrix of shape (len, 1).
    pub fn column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Flattens a column matrix back into a plain vector.
    ///
    /// Panics if the matrix has more than one column.
    pub fn column_data(&self) -> Vec<f64> {
        assert_eq!(self.cols, 1, "column_data requires a (n, 1) matrix");
        self.data.iter().map(|row| row[0]).collect()
    }

    /// Uniform fill on [-1, 1).
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
        res
    }

    /// He initialization: samples from N(0, sqrt(2 / cols)).
    ///
    /// Recommended before ReLU layers. The variance 2/fan_in accounts for
    /// the fact that ReLU zeroes half of its inputs on average.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input connections).
    pub fn he<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let std_dev = (2.0 / cols as f64).sqrt();
        Matrix::normal(rows, cols, std_dev, rng)
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / cols)).
    ///
    /// Recommended before Sigmoid/Tanh/Identity layers. Keeps the variance of
    /// activations and gradients roughly equal across layers.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input connections).
    pub fn xavier<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let std_dev = (1.0 / cols as f64).sqrt();
        Matrix::normal(rows, cols, std_dev, rng)
    }

    fn normal<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                let z: f64 = StandardNormal.sample(rng);
                res.data[i][j] = z * std_dev;
            }
        }
        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            self.data
                .clone()
                .into_iter()
                .map(|row| row.into_iter().map(|x| functor(x)).collect())
                .collect(),
        )
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows);
        assert_eq!(self.cols, rhs.cols);
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect())
            .collect();
        Matrix::from_data(data)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix {
            rows: 0,
            cols: 0,
            data: vec![],
        }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}
