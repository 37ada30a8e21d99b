//! Direction ↔ angle lookup.
//!
//! Ridge directions are quantized over a half circle, so averaging them is
//! done on doubled angles: direction `i` maps to the unit vector at
//! `i · 2π / ndirs`.

use crate::error::StageError;

/// Unit vectors for each quantized direction in doubled-angle space.
#[derive(Clone, Debug)]
pub struct AngleTable {
    pub cos: Vec<f64>,
    pub sin: Vec<f64>,
}

impl AngleTable {
    pub fn new(num_directions: usize) -> Result<Self, StageError> {
        if num_directions == 0 {
            return Err(StageError::invalid_parameter(
                "num_directions",
                num_directions,
            ));
        }
        let step = 2.0 * std::f64::consts::PI / num_directions as f64;
        let (cos, sin) = (0..num_directions)
            .map(|i| {
                let theta = i as f64 * step;
                (theta.cos(), theta.sin())
            })
            .unzip();
        Ok(Self { cos, sin })
    }

    #[inline]
    pub fn num_directions(&self) -> usize {
        self.cos.len()
    }

    /// Quantizes a doubled-angle vector back to the nearest direction.
    pub fn direction_of(&self, cos_sum: f64, sin_sum: f64) -> i32 {
        let n = self.num_directions() as f64;
        let mut theta = sin_sum.atan2(cos_sum);
        if theta < 0.0 {
            theta += 2.0 * std::f64::consts::PI;
        }
        let dir = (theta * n / (2.0 * std::f64::consts::PI)).round() as i32;
        dir.rem_euclid(self.num_directions() as i32)
    }
}

/// Circular distance between two quantized directions.
#[inline]
pub fn direction_distance(a: i32, b: i32, num_directions: usize) -> usize {
    let n = num_directions as i32;
    let d = (a - b).rem_euclid(n);
    d.min(n - d) as usize
}

/// Signed change from `from` to `to`, wrapped into `(-ndirs/2, ndirs/2]`.
#[inline]
pub fn direction_change(from: i32, to: i32, num_directions: usize) -> i32 {
    let n = num_directions as i32;
    let mut d = (to - from).rem_euclid(n);
    if d > n / 2 {
        d -= n;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_directions() {
        assert!(matches!(
            AngleTable::new(0),
            Err(StageError::InvalidParameter { name: "num_directions", .. })
        ));
    }

    #[test]
    fn quantization_round_trips_every_direction() {
        let table = AngleTable::new(16).unwrap();
        for i in 0..16 {
            assert_eq!(table.direction_of(table.cos[i], table.sin[i]), i as i32);
        }
    }

    #[test]
    fn averaging_wraps_across_zero() {
        let table = AngleTable::new(16).unwrap();
        let c = table.cos[15] + table.cos[1];
        let s = table.sin[15] + table.sin[1];
        assert_eq!(table.direction_of(c, s), 0);
    }

    #[test]
    fn distance_is_circular() {
        assert_eq!(direction_distance(0, 15, 16), 1);
        assert_eq!(direction_distance(3, 11, 16), 8);
        assert_eq!(direction_distance(5, 5, 16), 0);
        assert_eq!(direction_change(15, 1, 16), 2);
        assert_eq!(direction_change(1, 15, 16), -2);
    }
}
