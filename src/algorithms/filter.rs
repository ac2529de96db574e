//! Histogram filter update cycle.
//!
//! Implements the discrete Bayes filter from Probabilistic Robotics for a
//! robot on a finite, cyclic, colored grid. The belief over cells is
//! updated by two operations driven externally in alternation:
//!
//! 1. Motion update (prediction): shift the belief by the intended
//!    displacement, wrapping toroidally, then blur to model motion noise.
//! 2. Sensor update (correction): reweight each cell by how well its known
//!    color matches the observation, then renormalize.
//!
//! The update functions are pure: they read their inputs and return fresh
//! grids. [`HistogramFilter`] is a thin stateful wrapper that threads one
//! belief distribution through successive updates over a fixed map.

use crate::algorithms::blur::blur;
use crate::core::grid::{BeliefGrid, ColorGrid, Grid};
use crate::core::math::{self, wrap};
use crate::error::{Error, Result};

/// Intended robot motion in row/column units.
///
/// Any sign or magnitude; positions wrap modulo the grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    /// Change in row.
    pub dy: i32,
    /// Change in column.
    pub dx: i32,
}

impl Displacement {
    /// Create a displacement of `dy` rows and `dx` columns.
    pub fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }

    /// The opposite displacement (undoes this one under noiseless motion).
    pub fn reversed(&self) -> Self {
        Self {
            dy: -self.dy,
            dx: -self.dx,
        }
    }
}

/// Relative sensor likelihoods for matching and non-matching cells.
///
/// The values need not sum to one; only the hit/miss ratio matters
/// because the posterior is renormalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorModel {
    p_hit: f32,
    p_miss: f32,
}

impl SensorModel {
    /// Create a sensor model. Both likelihoods must be finite and
    /// non-negative.
    pub fn new(p_hit: f32, p_miss: f32) -> Result<Self> {
        if !p_hit.is_finite() || !p_miss.is_finite() || p_hit < 0.0 || p_miss < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "sensor likelihoods must be finite and non-negative, got p_hit={} p_miss={}",
                p_hit, p_miss
            )));
        }
        Ok(Self { p_hit, p_miss })
    }

    /// Likelihood applied to cells whose color matches the observation.
    pub fn p_hit(&self) -> f32 {
        self.p_hit
    }

    /// Likelihood applied to all other cells.
    pub fn p_miss(&self) -> f32 {
        self.p_miss
    }
}

impl Default for SensorModel {
    fn default() -> Self {
        // Correct readings three times as likely as incorrect ones
        Self {
            p_hit: 3.0,
            p_miss: 1.0,
        }
    }
}

/// Configuration for the histogram filter.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// Fraction of probability mass spread to neighbors on each motion.
    /// 0.0 is noiseless motion. Typical: 0.05-0.2.
    pub blurring: f32,

    /// Sensor likelihood model.
    pub sensor: SensorModel,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blurring: 0.12,
            sensor: SensorModel::default(),
        }
    }
}

impl FilterConfig {
    /// Create a low-noise configuration (reliable odometry and sensing).
    pub fn low_noise() -> Self {
        Self {
            blurring: 0.05,
            sensor: SensorModel {
                p_hit: 5.0,
                p_miss: 1.0,
            },
        }
    }

    /// Create a high-noise configuration (slippery floors, flaky sensor).
    pub fn high_noise() -> Self {
        Self {
            blurring: 0.3,
            sensor: SensorModel {
                p_hit: 2.0,
                p_miss: 1.0,
            },
        }
    }
}

/// Uniform belief over every cell of the map.
///
/// Each cell gets `1 / (height * width)`, so the distribution is
/// normalized by construction.
pub fn initialize_beliefs(map: &ColorGrid) -> Result<BeliefGrid> {
    let (height, width) = map.dimensions();
    let belief_per_cell = 1.0 / (height * width) as f32;
    Grid::filled(height, width, belief_per_cell)
}

/// Motion update: toroidal shift by the displacement, then blur.
///
/// The shift relocates the mass at `(i, j)` to
/// `((i + dy) mod height, (j + dx) mod width)` without loss; blurring then
/// spreads it over the 3x3 neighborhood to model motion noise.
pub fn motion_update(
    displacement: Displacement,
    beliefs: &BeliefGrid,
    blurring: f32,
) -> Result<BeliefGrid> {
    let (height, width) = beliefs.dimensions();
    let mut shifted = math::zeros(height, width)?;

    for (row, cells) in beliefs.rows().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            let new_row = wrap(row as i64 + displacement.dy as i64, height);
            let new_col = wrap(col as i64 + displacement.dx as i64, width);
            shifted.set(new_row, new_col, value);
        }
    }

    blur(&shifted, blurring)
}

/// Sensor update: Bayesian reweighting by color-match likelihood.
///
/// The posterior is proportional to prior times `p_hit` where the map
/// matches the observed color and `p_miss` elsewhere, renormalized. A
/// posterior with no mass left (for example `p_miss = 0` and no matching
/// cell) fails with [`Error::DegenerateDistribution`].
pub fn sensor_update(
    color: char,
    map: &ColorGrid,
    beliefs: &BeliefGrid,
    sensor: &SensorModel,
) -> Result<BeliefGrid> {
    if map.dimensions() != beliefs.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: map.dimensions(),
            actual: beliefs.dimensions(),
        });
    }

    let mut weighted = beliefs.clone();
    for (cell, &symbol) in weighted.cells_mut().iter_mut().zip(map.cells()) {
        *cell *= if symbol == color {
            sensor.p_hit
        } else {
            sensor.p_miss
        };
    }

    math::normalize(&weighted)
}

/// Stateful filter threading one belief distribution over a fixed map.
///
/// Thin wrapper over the pure update functions; each step replaces the
/// belief grid wholesale.
#[derive(Debug, Clone)]
pub struct HistogramFilter {
    map: ColorGrid,
    config: FilterConfig,
    beliefs: BeliefGrid,
}

impl HistogramFilter {
    /// Create a filter with uniform initial beliefs over `map`.
    pub fn new(map: ColorGrid, config: FilterConfig) -> Result<Self> {
        let beliefs = initialize_beliefs(&map)?;
        Ok(Self {
            map,
            config,
            beliefs,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Get the color map.
    pub fn map(&self) -> &ColorGrid {
        &self.map
    }

    /// Get the current belief distribution.
    pub fn beliefs(&self) -> &BeliefGrid {
        &self.beliefs
    }

    /// Apply a motion update with the configured blurring.
    pub fn predict(&mut self, displacement: Displacement) -> Result<()> {
        log::debug!(
            "motion update dy={} dx={} blurring={}",
            displacement.dy,
            displacement.dx,
            self.config.blurring
        );
        self.beliefs = motion_update(displacement, &self.beliefs, self.config.blurring)?;
        Ok(())
    }

    /// Apply a sensor update for an observed color.
    pub fn measure(&mut self, color: char) -> Result<()> {
        log::debug!("sensor update color={}", color);
        self.beliefs = sensor_update(color, &self.map, &self.beliefs, &self.config.sensor)?;
        Ok(())
    }

    /// Most probable cell as `(row, col, probability)`.
    ///
    /// Ties resolve to the first cell in row-major order.
    pub fn best_estimate(&self) -> (usize, usize, f32) {
        let mut best = (0, 0, *self.beliefs.cells().first().unwrap_or(&0.0));
        for (row, cells) in self.beliefs.rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value > best.2 {
                    best = (row, col, value);
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::{grids_close_enough, normalize, total};
    use crate::io::map_loader::parse_map;
    use approx::assert_relative_eq;

    fn spike_3x3() -> BeliefGrid {
        let mut rows = vec![vec![0.0; 3]; 3];
        rows[1][1] = 1.0;
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_initialize_beliefs_uniform() {
        let map = parse_map("g g g\ng r g\ng g g").unwrap();
        let beliefs = initialize_beliefs(&map).unwrap();

        assert_eq!(beliefs.dimensions(), (3, 3));
        for &cell in beliefs.cells() {
            assert_relative_eq!(cell, 1.0 / 9.0, epsilon = 1e-6);
        }
        assert_relative_eq!(total(&beliefs), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_noiseless_move_shifts_spike() {
        let moved = motion_update(Displacement::new(1, 1), &spike_3x3(), 0.0).unwrap();

        assert_relative_eq!(*moved.get(2, 2).unwrap(), 1.0, epsilon = 1e-4);
        for (row, cells) in moved.rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if (row, col) != (2, 2) {
                    assert_relative_eq!(value, 0.0, epsilon = 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_noiseless_move_wraps_negative_displacement() {
        let moved = motion_update(Displacement::new(-2, -5), &spike_3x3(), 0.0).unwrap();
        // (1 - 2) mod 3 = 2, (1 - 5) mod 3 = 2
        assert_relative_eq!(*moved.get(2, 2).unwrap(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_noiseless_move_round_trip() {
        let beliefs = normalize(
            &Grid::from_rows(vec![
                vec![0.1, 0.2, 0.0],
                vec![0.3, 0.1, 0.1],
                vec![0.05, 0.05, 0.1],
            ])
            .unwrap(),
        )
        .unwrap();

        let displacement = Displacement::new(2, -1);
        let there = motion_update(displacement, &beliefs, 0.0).unwrap();
        let back = motion_update(displacement.reversed(), &there, 0.0).unwrap();

        assert!(grids_close_enough(&back, &beliefs));
    }

    #[test]
    fn test_sense_concrete_two_by_two() {
        let map = parse_map("r g\ng g").unwrap();
        let beliefs = initialize_beliefs(&map).unwrap();
        let sensor = SensorModel::new(0.6, 0.2).unwrap();

        let posterior = sensor_update('r', &map, &beliefs, &sensor).unwrap();

        assert_relative_eq!(*posterior.get(0, 0).unwrap(), 0.5, epsilon = 1e-4);
        assert_relative_eq!(*posterior.get(0, 1).unwrap(), 1.0 / 6.0, epsilon = 1e-4);
        assert_relative_eq!(*posterior.get(1, 0).unwrap(), 1.0 / 6.0, epsilon = 1e-4);
        assert_relative_eq!(*posterior.get(1, 1).unwrap(), 1.0 / 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sense_equal_likelihoods_is_noop() {
        let map = parse_map("r g\ng g").unwrap();
        let beliefs = normalize(&Grid::from_rows(vec![vec![0.7, 0.1], vec![0.1, 0.1]]).unwrap())
            .unwrap();
        let sensor = SensorModel::new(0.4, 0.4).unwrap();

        let posterior = sensor_update('r', &map, &beliefs, &sensor).unwrap();
        assert!(grids_close_enough(&posterior, &beliefs));
    }

    #[test]
    fn test_sense_no_match_zero_miss_is_degenerate() {
        let map = parse_map("g g\ng g").unwrap();
        let beliefs = initialize_beliefs(&map).unwrap();
        let sensor = SensorModel::new(0.6, 0.0).unwrap();

        assert!(matches!(
            sensor_update('r', &map, &beliefs, &sensor),
            Err(Error::DegenerateDistribution)
        ));
    }

    #[test]
    fn test_sense_dimension_mismatch() {
        let map = parse_map("r g\ng g").unwrap();
        let beliefs = math::zeros(3, 3).unwrap();
        let sensor = SensorModel::default();

        assert!(matches!(
            sensor_update('r', &map, &beliefs, &sensor),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_sensor_model_rejects_negative() {
        assert!(SensorModel::new(-0.1, 0.2).is_err());
        assert!(SensorModel::new(0.1, -0.2).is_err());
        assert!(SensorModel::new(f32::NAN, 0.2).is_err());
    }

    #[test]
    fn test_filter_predict_measure_cycle() {
        let map = parse_map("r g\ng g").unwrap();
        let config = FilterConfig {
            blurring: 0.0,
            sensor: SensorModel::new(0.6, 0.2).unwrap(),
        };
        let mut filter = HistogramFilter::new(map, config).unwrap();

        filter.measure('r').unwrap();
        let (row, col, probability) = filter.best_estimate();
        assert_eq!((row, col), (0, 0));
        assert_relative_eq!(probability, 0.5, epsilon = 1e-4);

        filter.predict(Displacement::new(1, 1)).unwrap();
        let (row, col, probability) = filter.best_estimate();
        assert_eq!((row, col), (1, 1));
        assert_relative_eq!(probability, 0.5, epsilon = 1e-4);
        assert_relative_eq!(total(filter.beliefs()), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_config_presets() {
        let default = FilterConfig::default();
        let low = FilterConfig::low_noise();
        let high = FilterConfig::high_noise();

        assert!(low.blurring < default.blurring);
        assert!(high.blurring > default.blurring);
        assert!(low.sensor.p_hit() / low.sensor.p_miss() > high.sensor.p_hit() / high.sensor.p_miss());
    }
}
