//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                     |
//! |-------------|---------------------|---------------------------------|
//! | `hardware`  | SensorPort          | `SensorHub` over an ADC driver  |
//! |             | ActuatorPort        | `ActuatorBank` (relay, buzzer)  |
//! | `log_sink`  | EventSink           | `log` facade (RTT on target)    |
//! | `lpc17xx`   | DigitalOutputPort   | FIOxDIR / FIOxSET / FIOxCLR     |
//! |             | AdcRegisters        | PCONP, PINSELx, AD0CR, AD0GDR   |
//! | `sim`       | DigitalOutputPort   | in-memory port latch            |
//! |             | AdcRegisters        | register-level ADC model        |
//! |             | CharacterDisplay    | 2×16 character grid             |

pub mod hardware;
pub mod log_sink;
pub mod lpc17xx;
pub mod sim;
