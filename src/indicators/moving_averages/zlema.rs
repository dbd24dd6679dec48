//! # Zero-Lag Exponential Moving Average (ZLEMA)
//!
//! Error-correcting EMA after John Ehlers and Ric Way. Each step feeds an
//! amplified tracking error back into the recursion, which cancels most of
//! the phase lag of a plain EMA:
//!
//! `EC = alpha * (price + gain * (price - EC[1]) - EC[1]) + EC[1]`,
//! with `alpha = 2 / (lag_offset + period)`.
//!
//! Reference: <https://www.mesasoftware.com/papers/ZeroLag.pdf>
//!
//! ## Parameters
//! - **period**: Nominal smoothing window length (defaults to 14).
//! - **gain**: Strength of the lag-compensation term (defaults to 1.4).
//!   A gain around 10% of the period length works well; `gain = 0.0` is a
//!   plain EMA with no lag reduction.
//! - **lag_offset**: Constant added to `period` when deriving `alpha`
//!   (defaults to 1.0; exposed for alternative coefficient formulas).
//!
//! ## NaN policy
//! `f64::NAN` marks "no data". Output indices before the first finite input
//! stay NaN, a NaN input after the start yields a NaN output at that index
//! while the accumulator carries across the gap unchanged, and the first
//! finite sample seeds the accumulator verbatim.
//!
//! ## Returns
//! - **`ZlemaOutput`** containing a `Vec<f64>` of the same length as the
//!   input. `zlema` is total: `period == 0`, an all-NaN input, or an empty
//!   input all produce a fully-NaN output of matching length rather than an
//!   error.
//!
//! ## Developer Status
//! - **Streaming update**: O(1) state machine matching batch semantics.
//! - **SIMD note**: The recurrence is strictly sequential (each value
//!   depends on the previous state), so there is no kernel dispatch here.

use crate::utilities::data_loader::{source_type, Candles};
use thiserror::Error;

impl<'a> AsRef<[f64]> for ZlemaInput<'a> {
    #[inline(always)]
    fn as_ref(&self) -> &[f64] {
        match &self.data {
            ZlemaData::Slice(slice) => slice,
            ZlemaData::Candles { candles, source } => source_type(candles, source),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ZlemaData<'a> {
    Candles {
        candles: &'a Candles,
        source: &'a str,
    },
    Slice(&'a [f64]),
}

#[derive(Debug, Clone)]
pub struct ZlemaOutput {
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ZlemaParams {
    pub period: Option<usize>,
    pub gain: Option<f64>,
    pub lag_offset: Option<f64>,
}

impl Default for ZlemaParams {
    fn default() -> Self {
        Self {
            period: Some(14),
            gain: Some(1.4),
            lag_offset: Some(1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZlemaInput<'a> {
    pub data: ZlemaData<'a>,
    pub params: ZlemaParams,
}

impl<'a> ZlemaInput<'a> {
    #[inline]
    pub fn from_candles(c: &'a Candles, s: &'a str, p: ZlemaParams) -> Self {
        Self {
            data: ZlemaData::Candles {
                candles: c,
                source: s,
            },
            params: p,
        }
    }
    #[inline]
    pub fn from_slice(sl: &'a [f64], p: ZlemaParams) -> Self {
        Self {
            data: ZlemaData::Slice(sl),
            params: p,
        }
    }
    #[inline]
    pub fn with_default_candles(c: &'a Candles) -> Self {
        Self::from_candles(c, "close", ZlemaParams::default())
    }
    #[inline]
    pub fn get_period(&self) -> usize {
        self.params.period.unwrap_or(14)
    }
    #[inline]
    pub fn get_gain(&self) -> f64 {
        self.params.gain.unwrap_or(1.4)
    }
    #[inline]
    pub fn get_lag_offset(&self) -> f64 {
        self.params.lag_offset.unwrap_or(1.0)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ZlemaBuilder {
    period: Option<usize>,
    gain: Option<f64>,
    lag_offset: Option<f64>,
}

impl ZlemaBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }
    #[inline(always)]
    pub fn period(mut self, n: usize) -> Self {
        self.period = Some(n);
        self
    }
    #[inline(always)]
    pub fn gain(mut self, g: f64) -> Self {
        self.gain = Some(g);
        self
    }
    #[inline(always)]
    pub fn lag_offset(mut self, x: f64) -> Self {
        self.lag_offset = Some(x);
        self
    }

    #[inline(always)]
    fn params(self) -> ZlemaParams {
        ZlemaParams {
            period: self.period,
            gain: self.gain,
            lag_offset: self.lag_offset,
        }
    }

    #[inline(always)]
    pub fn apply(self, c: &Candles) -> ZlemaOutput {
        zlema(&ZlemaInput::from_candles(c, "close", self.params()))
    }

    #[inline(always)]
    pub fn apply_slice(self, d: &[f64]) -> ZlemaOutput {
        zlema(&ZlemaInput::from_slice(d, self.params()))
    }

    #[inline(always)]
    pub fn into_stream(self) -> Result<ZlemaStream, ZlemaError> {
        ZlemaStream::try_new(self.params())
    }
}

#[derive(Debug, Error)]
pub enum ZlemaError {
    #[error("zlema: Output buffer length mismatch: expected = {expected}, actual = {actual}")]
    OutputLenMismatch { expected: usize, actual: usize },
    #[error("zlema: Invalid period for stream: period = {period}")]
    InvalidPeriod { period: usize },
}

/// Computes the ZLEMA over the input series.
///
/// Total function: every degenerate input maps to a defined output of the
/// same length as the input. `period == 0` and all-NaN inputs give a fully
/// NaN result; `period` larger than the data length is allowed (the
/// smoothing coefficient just gets small).
#[inline]
pub fn zlema(input: &ZlemaInput) -> ZlemaOutput {
    let data: &[f64] = input.as_ref();
    let len = data.len();
    let period = input.get_period();

    let mut out = vec![f64::NAN; len];

    if period == 0 {
        return ZlemaOutput { values: out };
    }
    let first = match data.iter().position(|x| !x.is_nan()) {
        Some(idx) => idx,
        None => return ZlemaOutput { values: out },
    };

    let alpha = 2.0 / (input.get_lag_offset() + period as f64);
    zlema_scalar(data, alpha, input.get_gain(), first, &mut out);

    ZlemaOutput { values: out }
}

/// Same semantics as [`zlema`], but writes into a caller-provided buffer.
/// NaN prefix and gap positions are written explicitly, so `dst` does not
/// need to be pre-filled.
pub fn zlema_into_slice(dst: &mut [f64], input: &ZlemaInput) -> Result<(), ZlemaError> {
    let data: &[f64] = input.as_ref();
    if dst.len() != data.len() {
        return Err(ZlemaError::OutputLenMismatch {
            expected: data.len(),
            actual: dst.len(),
        });
    }

    dst.fill(f64::NAN);

    let period = input.get_period();
    if period == 0 {
        return Ok(());
    }
    if let Some(first) = data.iter().position(|x| !x.is_nan()) {
        let alpha = 2.0 / (input.get_lag_offset() + period as f64);
        zlema_scalar(data, alpha, input.get_gain(), first, dst);
    }
    Ok(())
}

/// Forward recursion over `data[first..]`. `out` must be NaN-filled and the
/// same length as `data`; NaN inputs are skipped, leaving NaN in `out` at
/// those indices while the accumulator carries across the gap.
#[inline]
pub fn zlema_scalar(data: &[f64], alpha: f64, gain: f64, first: usize, out: &mut [f64]) {
    let len = data.len();

    // Seed with the first finite sample. The first loop iteration reads the
    // same value, so its error term is exactly zero and out[first] == seed.
    let mut state = data[first];

    for n in first..len {
        let val = data[n];
        if val.is_nan() {
            continue;
        }
        let difference = alpha * (val + gain * (val - state) - state);
        state += difference;
        out[n] = state;
    }
}

/// O(1) streaming form matching batch semantics sample-for-sample: NaN
/// input returns `None` (the gap stays undefined downstream) and leaves the
/// accumulator untouched; the first finite sample seeds the state verbatim.
#[derive(Debug, Clone)]
pub struct ZlemaStream {
    alpha: f64,
    gain: f64,
    state: ZlemaStreamState,
}

#[derive(Debug, Clone)]
enum ZlemaStreamState {
    SeekingFirst,
    Ready { value: f64 },
}

impl ZlemaStream {
    /// Stream construction is a host surface, so unlike the batch entry
    /// point it rejects `period == 0` instead of emitting NaN forever.
    #[inline]
    pub fn try_new(params: ZlemaParams) -> Result<Self, ZlemaError> {
        let period = params.period.unwrap_or(14);
        if period == 0 {
            return Err(ZlemaError::InvalidPeriod { period });
        }
        let lag_offset = params.lag_offset.unwrap_or(1.0);
        Ok(Self {
            alpha: 2.0 / (lag_offset + period as f64),
            gain: params.gain.unwrap_or(1.4),
            state: ZlemaStreamState::SeekingFirst,
        })
    }

    #[inline(always)]
    pub fn update(&mut self, v: f64) -> Option<f64> {
        use ZlemaStreamState::*;
        if v.is_nan() {
            return None;
        }
        match &mut self.state {
            SeekingFirst => {
                self.state = Ready { value: v };
                Some(v)
            }
            Ready { value } => {
                let difference = self.alpha * (v + self.gain * (v - *value) - *value);
                *value += difference;
                Some(*value)
            }
        }
    }

    #[inline(always)]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ZlemaStreamState::Ready { .. })
    }
    #[inline(always)]
    pub fn current(&self) -> Option<f64> {
        match self.state {
            ZlemaStreamState::Ready { value } => Some(value),
            _ => None,
        }
    }
    #[inline]
    pub fn reset(&mut self) {
        self.state = ZlemaStreamState::SeekingFirst;
    }
}
