//! Rotary encoder
//!
//! The quadrature decoder turns pin levels into detents and the bounded
//! counter turns detents into the position the controller reads.

pub mod counter;
pub mod quadrature;

pub use counter::BoundedCounter;
pub use quadrature::QuadratureDecoder;

/// Direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}
