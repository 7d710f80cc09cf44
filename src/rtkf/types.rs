use crate::impl_standard_traits;

pub const STATES: usize = 3; // rate, torque, bias

/// The number of covariance iterations after which the filter gain is considered converged.
///
/// Empirical; 50 iterations are usually plenty for the gain to settle.
pub const RTKF_SOLUTION_LIMIT: u32 = 150;

/// The estimated state of one axis.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct RtkfState<T> {
    /// The estimated body rate, in the units of the measured signal.
    pub rate: T,
    /// The estimated normalized actuator torque.
    pub torque: T,
    /// The estimated torque bias, i.e. the command needed to hold the rate.
    pub bias: T,
}

impl<T> RtkfState<T> {
    /// Initializes a new [`RtkfState`] instance.
    #[inline(always)]
    pub const fn new(rate: T, torque: T, bias: T) -> Self {
        Self { rate, torque, bias }
    }
}

impl_standard_traits!(RtkfState, T, rate, torque, bias);
