//! DFT waveform lookup for the directional power analysis.

use crate::error::StageError;

/// Frequencies (cycles per analysis window) of the DFT basis.
///
/// Shared read-only by every invocation.
pub static DFT_COEFS: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

/// One sampled waveform.
#[derive(Clone, Debug)]
pub struct Wave {
    pub cos: Vec<f64>,
    pub sin: Vec<f64>,
}

/// Waveforms sampled over one analysis window.
#[derive(Clone, Debug)]
pub struct WaveTable {
    pub window_size: usize,
    pub waves: Vec<Wave>,
}

impl WaveTable {
    pub fn new(
        coefficients: &[f64],
        num_waves: usize,
        window_size: usize,
    ) -> Result<Self, StageError> {
        if num_waves == 0 || num_waves > coefficients.len() {
            return Err(StageError::invalid_parameter("num_dft_waves", num_waves));
        }
        if window_size == 0 {
            return Err(StageError::invalid_parameter("window_size", window_size));
        }
        let base = 2.0 * std::f64::consts::PI / window_size as f64;
        let waves = coefficients[..num_waves]
            .iter()
            .map(|&coef| {
                let freq = base * coef;
                let (cos, sin) = (0..window_size)
                    .map(|j| {
                        let x = freq * j as f64;
                        (x.cos(), x.sin())
                    })
                    .unzip();
                Wave { cos, sin }
            })
            .collect();
        Ok(Self { window_size, waves })
    }

    /// Power of `samples` at the frequency of `wave`.
    pub fn power(&self, wave: &Wave, samples: &[f64]) -> f64 {
        let (mut re, mut im) = (0.0, 0.0);
        for ((&v, &c), &s) in samples.iter().zip(&wave.cos).zip(&wave.sin) {
            re += v * c;
            im += v * s;
        }
        re * re + im * im
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_more_waves_than_basis() {
        assert!(WaveTable::new(&DFT_COEFS, 5, 24).is_err());
        assert!(WaveTable::new(&DFT_COEFS, 0, 24).is_err());
        assert!(WaveTable::new(&DFT_COEFS, 4, 0).is_err());
    }

    #[test]
    fn power_peaks_at_matching_frequency() {
        let table = WaveTable::new(&DFT_COEFS, 4, 24).unwrap();
        let samples: Vec<f64> = (0..24)
            .map(|j| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * 3.0 * j as f64 / 24.0).cos())
            .collect();
        let powers: Vec<f64> = table.waves.iter().map(|w| table.power(w, &samples)).collect();
        let expected = (10.0f64 * 12.0).powi(2);
        assert!((powers[2] - expected).abs() < 1e-6 * expected);
        for (i, p) in powers.iter().enumerate() {
            if i != 2 {
                assert!(*p < 1e-6, "wave {i} leaked power {p}");
            }
        }
    }
}
