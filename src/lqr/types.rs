use crate::impl_standard_traits;

pub const STATES: usize = 2; // rate, torque

/// The number of Riccati iterations after which the regulator gain is considered converged.
///
/// The recursion needs about 700 to 800 iterations to settle for typical multirotor axes;
/// a retune from a converged solution usually settles within 100.
pub const LQR_SOLUTION_LIMIT: u32 = 1000;

/// The state feedback gains of the regulator.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct LqrGains<T> {
    /// The gain on the rate error.
    pub rate: T,
    /// The gain on the torque state.
    pub torque: T,
}

impl<T> LqrGains<T> {
    /// Initializes a new [`LqrGains`] instance.
    #[inline(always)]
    pub const fn new(rate: T, torque: T) -> Self {
        Self { rate, torque }
    }
}

impl_standard_traits!(LqrGains, T, rate, torque);
