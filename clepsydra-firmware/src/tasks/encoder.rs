//! Rotary encoder task
//!
//! Decodes the CLK/DT pins on every edge and steps the shared counter.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use clepsydra_drivers::encoder::QuadratureDecoder;

use crate::channels::ENCODER;

/// Encoder task
///
/// Waits for an edge on either pin, then feeds both levels to the decoder.
#[embassy_executor::task]
pub async fn encoder_task(mut clk: Input<'static>, mut dt: Input<'static>, half_step: bool) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(half_step);

    loop {
        select(clk.wait_for_any_edge(), dt.wait_for_any_edge()).await;

        if let Some(rotation) = decoder.update(clk.is_high(), dt.is_high()) {
            let position = ENCODER.lock(|counter| counter.borrow_mut().step(rotation));
            trace!("Encoder {:?} -> {}", rotation, position);
        }
    }
}
