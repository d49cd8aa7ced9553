use crate::foundation::error::{ClipweaveError, ClipweaveResult};
use crate::foundation::rational;

/// Frame rate as an exact fraction.
///
/// `0/0` ([`Fps::VARIABLE`]) marks a clip whose frames do not share one cadence, which is what a
/// tolerant merge of clips with different rates produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: i64,
    /// Denominator (seconds).
    pub den: i64,
}

impl Fps {
    /// Variable frame rate.
    pub const VARIABLE: Self = Self { num: 0, den: 0 };

    /// Build a constant frame rate. Both terms must be positive.
    pub fn new(num: i64, den: i64) -> ClipweaveResult<Self> {
        if den <= 0 {
            return Err(ClipweaveError::conflict("Fps den must be > 0"));
        }
        if num <= 0 {
            return Err(ClipweaveError::conflict("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// `true` when this is [`Fps::VARIABLE`].
    pub fn is_variable(self) -> bool {
        self.den == 0
    }

    /// Scale the rate by `mul/div`, leaving a variable rate untouched.
    pub fn muldiv(self, mul: i64, div: i64) -> ClipweaveResult<Self> {
        let (num, den) = rational::muldiv(self.num, self.den, mul, div)?;
        Ok(Self { num, den })
    }

    /// Frames per second as a float; `0.0` for a variable rate.
    pub fn as_f64(self) -> f64 {
        if self.is_variable() {
            return 0.0;
        }
        self.num as f64 / self.den as f64
    }
}
