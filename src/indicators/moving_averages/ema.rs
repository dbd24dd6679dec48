//! Exponential Moving Average with the crate's shared seed and gap policy:
//! the first finite sample seeds the recursion verbatim and NaN inputs stay
//! NaN in the output. ZLEMA with `gain = 0` reduces to exactly this filter.

#[derive(Debug, Clone)]
pub struct EmaParams {
    pub period: Option<usize>,
}

impl Default for EmaParams {
    fn default() -> Self {
        EmaParams { period: Some(9) }
    }
}

#[derive(Debug, Clone)]
pub struct EmaInput<'a> {
    pub data: &'a [f64],
    pub params: EmaParams,
}

impl<'a> EmaInput<'a> {
    pub fn new(data: &'a [f64], params: EmaParams) -> Self {
        EmaInput { data, params }
    }

    pub fn with_default_params(data: &'a [f64]) -> Self {
        EmaInput {
            data,
            params: EmaParams::default(),
        }
    }

    fn get_period(&self) -> usize {
        self.params.period.unwrap_or(9)
    }
}

#[derive(Debug, Clone)]
pub struct EmaOutput {
    pub values: Vec<f64>,
}

/// Total like [`crate::zlema`]: `period == 0` or an all-NaN input yields an
/// all-NaN output of the input's length.
#[inline]
pub fn ema(input: &EmaInput) -> EmaOutput {
    let data = input.data;
    let period = input.get_period();
    let len = data.len();

    let mut values = vec![f64::NAN; len];

    if period == 0 {
        return EmaOutput { values };
    }
    let first = match data.iter().position(|x| !x.is_nan()) {
        Some(idx) => idx,
        None => return EmaOutput { values },
    };

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut state = data[first];

    for i in first..len {
        let val = data[i];
        if val.is_nan() {
            continue;
        }
        state += alpha * (val - state);
        values[i] = state;
    }

    EmaOutput { values }
}
