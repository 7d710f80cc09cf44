use crate::impl_standard_traits;

/// Normalized actuator commands per body axis, each in `[-1, 1]`.
///
/// These are torque demands to be handed to the mixer; they are not motor outputs.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct ActuatorCommands<T> {
    /// The roll command.
    pub roll: T,
    /// The pitch command.
    pub pitch: T,
    /// The yaw command.
    pub yaw: T,
}

impl<T> ActuatorCommands<T> {
    /// Initializes a new [`ActuatorCommands`] instance.
    #[inline(always)]
    pub const fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self { roll, pitch, yaw }
    }
}

impl_standard_traits!(ActuatorCommands, T, roll, pitch, yaw);
