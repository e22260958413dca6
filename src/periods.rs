/// A number of rating periods, possibly fractional. Used to widen the
/// deviation of competitors who were inactive for a while.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periods(pub f64);

impl From<Periods> for f64 {
    #[inline]
    fn from(Periods(periods): Periods) -> f64 {
        periods
    }
}

impl From<f64> for Periods {
    #[inline]
    fn from(value: f64) -> Periods {
        Periods(value)
    }
}

impl Periods {
    pub const ONE: Periods = Periods(1.0);
}
