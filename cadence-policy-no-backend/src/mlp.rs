use crate::Mat;
use anyhow::{ensure, Context, Result};
use cadence_core::{NeuralNet, Observation};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

/// Activation applied to the output of the last layer.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputActivation {
    /// No activation, e.g. action values for greedy policies.
    Identity,

    /// Hyperbolic tangent.
    Tanh,

    /// Softmax, the probabilities of discrete actions.
    Softmax,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
/// Multilayer perceptron with ReLU activation function.
pub struct Mlp {
    /// Weights of layers.
    ws: Vec<Mat>,

    /// Biases of layers.
    bs: Vec<Mat>,

    /// Activation of the output layer.
    activation: OutputActivation,
}

impl Mlp {
    /// Constructs an MLP from the weights and biases of its layers.
    ///
    /// Weight `i` is an `out x in` matrix and bias `i` an `out x 1` matrix.
    pub fn new(ws: Vec<Mat>, bs: Vec<Mat>, activation: OutputActivation) -> Result<Self> {
        ensure!(!ws.is_empty(), "An MLP needs at least one layer");
        ensure!(
            ws.len() == bs.len(),
            "{} weights for {} biases",
            ws.len(),
            bs.len()
        );
        for (i, (w, b)) in ws.iter().zip(bs.iter()).enumerate() {
            ensure!(
                b.rows() == w.rows() && b.cols() == 1,
                "Bias of layer {} has shape {:?}, weight {:?}",
                i,
                b.shape,
                w.shape
            );
            if i > 0 {
                ensure!(
                    w.cols() == ws[i - 1].rows(),
                    "Layer {} takes {} inputs, previous layer has {} outputs",
                    i,
                    w.cols(),
                    ws[i - 1].rows()
                );
            }
        }
        Ok(Self { ws, bs, activation })
    }

    /// The number of inputs.
    pub fn in_dim(&self) -> usize {
        self.ws[0].cols()
    }

    /// The number of outputs.
    pub fn out_dim(&self) -> usize {
        self.ws[self.ws.len() - 1].rows()
    }

    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        match self.activation {
            OutputActivation::Identity => x,
            OutputActivation::Tanh => x.tanh(),
            OutputActivation::Softmax => x.softmax(),
        }
    }

    /// Deserializes an MLP written by [`NeuralNet::save`].
    pub fn load(reader: impl Read) -> Result<Self> {
        let mlp: Self = bincode::deserialize_from(reader)?;
        Self::new(mlp.ws, mlp.bs, mlp.activation)
    }

    /// Loads an MLP from a file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open {:?}", path))?;
        let mlp = Self::load(BufReader::new(file))?;
        info!("Loaded MLP from {:?}", path);
        Ok(mlp)
    }

    /// Saves the MLP into a file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        info!("Saved MLP in {:?}", path);
        Ok(())
    }
}

impl NeuralNet for Mlp {
    fn output(&mut self, obs: &Observation) -> Result<Vec<f32>> {
        let data = obs.data().context("A skipped observation has no features")?;
        ensure!(
            data.len() == self.in_dim(),
            "Observation has {} features, the MLP takes {}",
            data.len(),
            self.in_dim()
        );
        let x: Mat = data.iter().map(|v| *v as f32).collect::<Vec<_>>().into();
        Ok(self.forward(&x).data)
    }

    fn save(&self, writer: &mut dyn Write) -> Result<()> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }
}
