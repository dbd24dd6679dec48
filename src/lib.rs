#![allow(clippy::needless_range_loop)]

pub mod indicators;
pub mod utilities;

pub use indicators::moving_averages::ema::{ema, EmaInput, EmaOutput, EmaParams};
pub use indicators::moving_averages::zlema::{
    zlema, zlema_into_slice, ZlemaBuilder, ZlemaData, ZlemaError, ZlemaInput, ZlemaOutput,
    ZlemaParams, ZlemaStream,
};
pub use utilities::data_loader::{read_candles_from_csv, source_type, Candles};
