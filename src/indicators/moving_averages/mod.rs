pub mod ema;
pub mod zlema;

pub use ema::{ema, EmaInput, EmaOutput, EmaParams};
pub use zlema::{
    zlema, zlema_into_slice, ZlemaBuilder, ZlemaData, ZlemaError, ZlemaInput, ZlemaOutput,
    ZlemaParams, ZlemaStream,
};
