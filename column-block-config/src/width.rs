pub const DEFAULT_PRECISION: u8 = 1;

/// Settings for column width bookkeeping.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    /// Decimal places kept when rounding a width.
    #[knuffel(child, unwrap(argument), default = DEFAULT_PRECISION)]
    pub precision: u8,
    /// Clamp requested widths into `[0, 100]` before redistributing.
    #[knuffel(child)]
    pub clamp_input: bool,
}

impl Default for Width {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            clamp_input: false,
        }
    }
}
