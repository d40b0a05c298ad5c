use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Consistent scientific number formatting
    ///
    /// Rust's own `{:e}` drops the exponent sign and padding, which makes
    /// columns of rates hard to read. This always signs and pads the exponent.
    ///
    /// ```rust
    /// # use tautools_utils::ValueExt;
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((2.5e-17).sci(3, 2), "2.500e-17".to_string());
    /// assert_eq!((1.0e8).sci(2, 3), "1.00e+008".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);

        // anything without an exponent (inf, NaN) is left alone
        let Some((mantissa, exp)) = num.split_once('e') else {
            return num;
        };

        let (sign, exp) = match exp.strip_prefix('-') {
            Some(exp) => ('-', exp),
            None => ('+', exp),
        };
        f!("{mantissa}e{sign}{exp:0>exp_pad$}")
    }
}
