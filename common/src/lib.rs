use num_traits::Float;
use std::f64::consts::TAU;

pub use float_cmp;

// TOLERANCE is the euclidean distance under which two positions are the same vertex.
// Angles are compared against it as well (in radians).
pub const TOLERANCE: f64 = 1e-6;

pub const DEFAULT_F64_MARGIN: (f64, i64) = (TOLERANCE, 4);

// approx_eq asserts that two values are equal within DEFAULT_F64_MARGIN, or within the
// provided margin. Any type implementing float_cmp::ApproxEq over an F64Margin works.
#[macro_export]
macro_rules! approx_eq {
    ($typ:ty, $lhs:expr, $rhs:expr) => {
        $crate::approx_eq!($typ, $lhs, $rhs, $crate::DEFAULT_F64_MARGIN)
    };
    ($typ:ty, $lhs:expr, $rhs:expr, $margin:expr) => {{
        let (lhs, rhs) = ($lhs, $rhs);
        assert!(
            <$typ as $crate::float_cmp::ApproxEq>::approx_eq(lhs, rhs, $margin),
            "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`",
            lhs,
            rhs,
        );
    }};
}

// fmt_float rounds a float to the given number of decimal places, never printing "-0"
pub fn fmt_float<F: Float>(f: F, decimal_precision: usize) -> String {
    let value = f.to_f64().unwrap_or(f64::NAN);
    let pow = 10_f64.powi(decimal_precision as i32);
    let rounded = (value * pow).round() / pow;
    format!("{:.*}", decimal_precision, if rounded == 0. { 0. } else { rounded })
}

// rad normalizes an angle into [0, τ)
pub fn rad(angle: f64) -> f64 {
    let angle = angle.rem_euclid(TAU);
    if angle >= TAU { 0. } else { angle }
}

pub fn to_deg(radians: f64) -> f64 {
    radians * 360. / TAU
}

pub fn to_rad(degrees: f64) -> f64 {
    degrees * TAU / 360.
}
