/// A rate-weighted Monte Carlo sample
///
/// Anything stored in a [Selection](crate::Selection) exposes a physical rate
/// and one or more attributes that can be histogrammed. The attributes are
/// named by a small enum chosen by the implementor, so asking a neutrino
/// sample for a tau-only quantity is a compile error rather than a runtime
/// lookup failure.
///
/// ```rust
/// # use tautools_histogram::Sample;
/// #[derive(Clone, Copy, Debug)]
/// enum Attribute {
///     Energy,
/// }
///
/// struct Primary {
///     energy: f64,
///     rate: f64,
/// }
///
/// impl Sample for Primary {
///     type Attribute = Attribute;
///
///     fn value(&self, attribute: Attribute) -> f64 {
///         match attribute {
///             Attribute::Energy => self.energy,
///         }
///     }
///
///     fn rate(&self) -> f64 {
///         self.rate
///     }
/// }
/// ```
pub trait Sample {
    /// Names of the quantities that can be histogrammed
    type Attribute: Copy + std::fmt::Debug;

    /// Value of the given attribute
    fn value(&self, attribute: Self::Attribute) -> f64;

    /// Physical rate carried by the sample (Hz)
    fn rate(&self) -> f64;
}
