//! Board adapter — chip reset via ESP-IDF.

use crate::ports::BoardPort;

pub struct EspBoard;

impl BoardPort for EspBoard {
    fn reset(&mut self) {
        // Does not return.
        esp_idf_hal::reset::restart();
    }
}
