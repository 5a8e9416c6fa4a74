use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// Axis coordinates span anything from millimetres to kilometres, so log
    /// messages and summaries print them in a consistent scientific form.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use layerview_utils::ValueExt;
    /// assert_eq!((-1.0_f64).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!(2500.0_f64.sci(2, 2), "2.50e+03".to_string());
    /// assert_eq!(0.015_f64.sci(1, 3), "1.5e-002".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // always contains 'e' for LowerExp output
        let split = num.find('e').unwrap_or(num.len());
        let exp = num.split_off(split);
        let (sign, digits) = match exp.strip_prefix("e-") {
            Some(digits) => ('-', digits),
            None => ('+', exp.get(1..).unwrap_or("0")),
        };
        num.push_str(&f!("e{}{:0>pad$}", sign, digits, pad = exp_pad));
        num
    }
}
