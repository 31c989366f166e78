//! Contains the RenderConfig struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by a minimum and
//! maximum along each axis, along with the parameters of the escape
//! iteration.  A RenderConfig is validated once and never changes
//! afterwards, so every worker can read it without locking.
use num::Complex;

use crate::errors::ConfigError;

/// The iteration cap used when none is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 700;

/// The escape radius used when none is given.
pub const DEFAULT_ESCAPE_RADIUS: f64 = 50.0;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the window of the complex plane, treating the real part
/// as the x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane {
    /// Left edge.
    pub re_min: f64,
    /// Right edge.
    pub re_max: f64,
    /// Top edge, mapped to pixel row 0.
    pub im_min: f64,
    /// Bottom edge, mapped to the last pixel row.
    pub im_max: f64,
}

impl ComplexPlane {
    /// Constructor, in the order the command line takes them.
    pub fn new(re_min: f64, re_max: f64, im_min: f64, im_max: f64) -> Self {
        ComplexPlane {
            re_min,
            re_max,
            im_min,
            im_max,
        }
    }
}

impl Default for ComplexPlane {
    fn default() -> Self {
        ComplexPlane::new(-2.0, 2.0, -2.0, 2.0)
    }
}

/// Everything a pixel needs to know to compute its own color.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    integral_plane: IntegralPlane,
    complex_plane: ComplexPlane,
    max_iterations: usize,
    escape_radius: f64,
    // Interpolation denominators along each axis, (n - 1) or 1.
    steps: (f64, f64),
}

impl RenderConfig {
    /// Validates and freezes a configuration.  Written as negated
    /// comparisons so that NaN bounds are rejected too.
    pub fn new(
        integral_plane: IntegralPlane,
        complex_plane: ComplexPlane,
        max_iterations: usize,
        escape_radius: f64,
    ) -> Result<RenderConfig, ConfigError> {
        let ComplexPlane {
            re_min,
            re_max,
            im_min,
            im_max,
        } = complex_plane;
        let IntegralPlane(width, height) = integral_plane;

        if !(re_min < re_max) {
            return Err(ConfigError::InvalidRealBounds(re_min, re_max));
        }
        if !(im_min < im_max) {
            return Err(ConfigError::InvalidImaginaryBounds(im_min, im_max));
        }
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyRaster(width, height));
        }
        if width.checked_mul(height).is_none() {
            return Err(ConfigError::RasterTooLarge(width, height));
        }
        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(escape_radius > 0.0) {
            return Err(ConfigError::InvalidEscapeRadius(escape_radius));
        }

        // A single row or column has no span to interpolate over; it
        // sits on the minimum edge.
        let steps = |n: usize| if n > 1 { (n - 1) as f64 } else { 1.0 };

        Ok(RenderConfig {
            integral_plane,
            complex_plane,
            max_iterations,
            escape_radius,
            steps: (steps(width), steps(height)),
        })
    }

    /// Width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the raster in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The escape-time cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Magnitude at which an orbit is considered escaped.
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    /// The total number of points in the integral grid.  Cannot
    /// overflow; `new` refuses rasters whose area does not fit.
    pub fn pixel_count(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, map it to a point
    /// on the complex plane by linear interpolation.  Pixel 0 lands on
    /// the minimum edge and the last pixel on the maximum edge.
    /// Evaluated as `span * px / (n - 1) + min` in exactly that order,
    /// so the points match the reference mapping bit for bit.
    pub fn pixel_to_point(&self, px: usize, py: usize) -> Complex<f64> {
        let ComplexPlane {
            re_min,
            re_max,
            im_min,
            im_max,
        } = self.complex_plane;
        Complex::new(
            (re_max - re_min) * (px as f64) / self.steps.0 + re_min,
            (im_max - im_min) * (py as f64) / self.steps.1 + im_min,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(
        integral_plane: IntegralPlane,
        complex_plane: ComplexPlane,
    ) -> Result<RenderConfig, ConfigError> {
        RenderConfig::new(
            integral_plane,
            complex_plane,
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_ESCAPE_RADIUS,
        )
    }

    fn square(n: usize) -> RenderConfig {
        defaults(IntegralPlane(n, n), ComplexPlane::default()).unwrap()
    }

    #[test]
    fn config_fails_on_inverted_real_bounds() {
        let rc = defaults(IntegralPlane(4, 4), ComplexPlane::new(1.0, -1.0, -1.0, 1.0));
        assert_eq!(rc, Err(ConfigError::InvalidRealBounds(1.0, -1.0)));
    }

    #[test]
    fn config_fails_on_flat_imaginary_bounds() {
        let rc = defaults(IntegralPlane(4, 4), ComplexPlane::new(-1.0, 1.0, 0.5, 0.5));
        assert_eq!(rc, Err(ConfigError::InvalidImaginaryBounds(0.5, 0.5)));
    }

    #[test]
    fn config_fails_on_nan_bounds() {
        let rc = defaults(
            IntegralPlane(4, 4),
            ComplexPlane::new(std::f64::NAN, 1.0, -1.0, 1.0),
        );
        assert!(rc.is_err());
    }

    #[test]
    fn config_fails_on_empty_raster() {
        let rc = defaults(IntegralPlane(0, 4), ComplexPlane::default());
        assert_eq!(rc, Err(ConfigError::EmptyRaster(0, 4)));
    }

    #[test]
    fn config_fails_when_area_overflows() {
        let width = std::usize::MAX / 2 + 1;
        let rc = defaults(IntegralPlane(width, 2), ComplexPlane::default());
        assert_eq!(rc, Err(ConfigError::RasterTooLarge(width, 2)));
        let rc = defaults(IntegralPlane(2, std::usize::MAX), ComplexPlane::default());
        assert_eq!(rc, Err(ConfigError::RasterTooLarge(2, std::usize::MAX)));
    }

    #[test]
    fn config_fails_on_bad_iteration_parameters() {
        let zero = RenderConfig::new(IntegralPlane(4, 4), ComplexPlane::default(), 0, 50.0);
        assert_eq!(zero, Err(ConfigError::ZeroIterations));
        let radius = RenderConfig::new(IntegralPlane(4, 4), ComplexPlane::default(), 10, -1.0);
        assert_eq!(radius, Err(ConfigError::InvalidEscapeRadius(-1.0)));
    }

    #[test]
    fn config_passes_on_good_shape() {
        let rc = square(4);
        assert_eq!(rc.pixel_count(), 16);
        assert_eq!(rc.max_iterations(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(rc.escape_radius(), DEFAULT_ESCAPE_RADIUS);
    }

    #[test]
    fn pixel_to_point_hits_both_edges() {
        let rc = square(5);
        assert_eq!(rc.pixel_to_point(0, 0), Complex::new(-2.0, -2.0));
        assert_eq!(rc.pixel_to_point(2, 2), Complex::new(0.0, 0.0));
        assert_eq!(rc.pixel_to_point(4, 4), Complex::new(2.0, 2.0));
        assert_eq!(rc.pixel_to_point(4, 0), Complex::new(2.0, -2.0));
    }

    #[test]
    fn pixel_to_point_multiplies_before_dividing() {
        let (re_min, re_max, im_min, im_max) = (-2.0, 2.0, -1.25, 0.75);
        let rc = defaults(
            IntegralPlane(640, 480),
            ComplexPlane::new(re_min, re_max, im_min, im_max),
        )
        .unwrap();
        for py in 0..480 {
            for px in 0..640 {
                let expected = Complex::new(
                    (re_max - re_min) * (px as f64) / 639.0 + re_min,
                    (im_max - im_min) * (py as f64) / 479.0 + im_min,
                );
                assert_eq!(rc.pixel_to_point(px, py), expected, "pixel ({}, {})", px, py);
            }
        }
    }

    #[test]
    fn single_pixel_raster_sits_on_the_minimum_corner() {
        let rc = square(1);
        assert_eq!(rc.pixel_to_point(0, 0), Complex::new(-2.0, -2.0));
    }

    #[test]
    fn single_row_keeps_horizontal_span() {
        let rc = defaults(IntegralPlane(3, 1), ComplexPlane::default()).unwrap();
        assert_eq!(rc.pixel_to_point(0, 0), Complex::new(-2.0, -2.0));
        assert_eq!(rc.pixel_to_point(2, 0), Complex::new(2.0, -2.0));
    }
}
