/// Assert that the floating point numbers are equal within the given epsilon.
#[cfg(test)]
macro_rules! assert_float_eq {
    ($a:expr, $b:expr, $eps:expr, $debug:expr) => {{
        // Make variables to avoid evaluating experssions multiple times.
        let a = $a;
        let b = $b;
        let eps = $eps;
        let error = (a - b).abs();
        if error > eps {
            eprintln!("{:?}", $debug);
        }
        assert!(
            error <= eps,
            "Assertion failed: |({}) - ({})| = {:e} <= {:e}",
            a,
            b,
            error,
            eps
        );
    }};
    ($a:expr, $b:expr, $eps:expr) => {
        $crate::macros::assert_float_eq!($a, $b, $eps, "")
    };
}

#[cfg(test)]
macro_rules! assert_f32_eq {
    ($a:expr, $b:expr, $eps:expr, $debug:expr) => {
        $crate::macros::assert_float_eq!($a, $b, $eps, $debug)
    };
    ($a:expr, $b:expr, $eps:expr) => {
        $crate::macros::assert_float_eq!($a, $b, $eps)
    };
    ($a:expr, $b:expr) => {
        $crate::macros::assert_float_eq!($a, $b, f32::EPSILON)
    };
}

/// Component-wise comparison of two `glam::Vec3` within the given epsilon.
#[cfg(test)]
macro_rules! assert_vec3_eq {
    ($a:expr, $b:expr, $eps:expr) => {{
        let a: glam::Vec3 = $a;
        let b: glam::Vec3 = $b;
        for i in 0..3 {
            $crate::macros::assert_float_eq!(a[i], b[i], $eps, (a, b));
        }
    }};
    ($a:expr, $b:expr) => {
        $crate::macros::assert_vec3_eq!($a, $b, 1e-6)
    };
}

#[cfg(test)]
macro_rules! assert_mat4_eq {
    ($a:expr, $b:expr, $eps:expr) => {{
        let a: glam::Mat4 = $a;
        let b: glam::Mat4 = $b;
        assert!(a.abs_diff_eq(b, $eps), "Assertion failed: {:?} != {:?}", a, b);
    }};
    ($a:expr, $b:expr) => {
        $crate::macros::assert_mat4_eq!($a, $b, 1e-5)
    };
}

#[cfg(test)]
pub(crate) use assert_f32_eq;
#[cfg(test)]
pub(crate) use assert_float_eq;
#[cfg(test)]
pub(crate) use assert_mat4_eq;
#[cfg(test)]
pub(crate) use assert_vec3_eq;
