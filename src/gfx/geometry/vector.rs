//! # Vector Helpers
//!
//! Small additions on top of `cgmath` used by every generator: finiteness
//! checks, normalization that reports degenerate input instead of producing
//! NaN, frame construction and HSL color mapping.

use cgmath::{InnerSpace, Vector3};

/// Vectors shorter than this are treated as zero-length.
pub const DEGENERATE_LENGTH: f32 = 1e-6;

/// World up axis (Z-up, like the rest of the engine).
pub const UP: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// Alternate up axis used when a tangent runs parallel to [`UP`].
pub const ALTERNATE_UP: Vector3<f32> = Vector3::new(1.0, 0.0, 0.0);

#[inline]
pub fn vec3(x: f32, y: f32, z: f32) -> Vector3<f32> {
    Vector3::new(x, y, z)
}

#[inline]
pub fn is_finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

#[inline]
pub fn to_array(v: Vector3<f32>) -> [f32; 3] {
    [v.x, v.y, v.z]
}

#[inline]
pub fn from_array(a: [f32; 3]) -> Vector3<f32> {
    Vector3::new(a[0], a[1], a[2])
}

/// Normalizes `v`, returning `None` when it is non-finite or near zero.
#[inline]
pub fn try_normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    if !is_finite(v) {
        return None;
    }
    let length = v.magnitude();
    if !length.is_finite() || length < DEGENERATE_LENGTH {
        return None;
    }
    Some(v / length)
}

/// Builds a side/normal pair perpendicular to `tangent`.
///
/// The side axis is `tangent × up`; when the tangent is (nearly) parallel to
/// [`UP`] the [`ALTERNATE_UP`] axis is used instead. Returns `None` for a
/// degenerate tangent.
pub fn perpendicular_frame(tangent: Vector3<f32>) -> Option<(Vector3<f32>, Vector3<f32>)> {
    let tangent = try_normalize(tangent)?;
    let up = if tangent.dot(UP).abs() > 0.99 {
        ALTERNATE_UP
    } else {
        UP
    };
    let side = try_normalize(tangent.cross(up))?;
    let normal = try_normalize(side.cross(tangent))?;
    Some((side, normal))
}

/// Converts an HSL color (all components in `[0, 1]`) to linear RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let hue = hue.rem_euclid(1.0);
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);

    if saturation == 0.0 {
        return [lightness; 3];
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    [
        channel(hue + 1.0 / 3.0),
        channel(hue),
        channel(hue - 1.0 / 3.0),
    ]
}
