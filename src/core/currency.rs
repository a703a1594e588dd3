use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default symbol prefixed to every rendered amount.
pub const DEFAULT_SYMBOL: &str = "₹";

/// Largest number of decimal places an amount may be rendered with.
pub const MAX_DECIMAL_PLACES: u32 = 8;

/// Fixed currency symbol used when rendering amounts.
///
/// The splitter is single-currency: the symbol is purely presentational
/// and never takes part in arithmetic.
///
/// # Examples
///
/// ```
/// use expense_splitter::core::currency::CurrencySymbol;
/// use rust_decimal_macros::dec;
///
/// let rupee = CurrencySymbol::default();
/// assert_eq!(rupee.format(dec!(30), 2), "₹30.00");
///
/// let dollar = CurrencySymbol::new("$");
/// assert_eq!(dollar.format(dec!(3.333), 2), "$3.33");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencySymbol(String);

impl CurrencySymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render `amount` with this symbol, rounded half away from zero
    /// to `decimal_places`.
    pub fn format(&self, amount: Decimal, decimal_places: u32) -> String {
        format!("{}{}", self.0, format_amount(amount, decimal_places))
    }
}

impl Default for CurrencySymbol {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOL)
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencySymbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Format a bare amount with a fixed number of decimal places.
pub fn format_amount(amount: Decimal, decimal_places: u32) -> String {
    let places = decimal_places.min(MAX_DECIMAL_PLACES);
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Errors arising from parsing a user-entered amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("amount is blank")]
    Blank,
    #[error("'{0}' is not a number")]
    NotNumeric(String),
}

/// Parse a user-entered amount.
///
/// Surrounding whitespace is ignored. Plain decimal notation (`12.50`,
/// `+7`, `-5`) and scientific notation (`1e3`) are accepted. Digit
/// separators (`1_000`) are not. The sign is not checked here; positivity
/// belongs to the validation gate.
///
/// Digits past 28 decimal places are rounded away. A nonzero amount that
/// would round to zero is reported as not numeric rather than as zero.
pub fn parse_amount(text: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountParseError::Blank);
    }
    let not_numeric = || AmountParseError::NotNumeric(trimmed.to_string());
    if trimmed.contains('_') {
        return Err(not_numeric());
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| not_numeric())?;

    let mantissa = trimmed.split(|c: char| c == 'e' || c == 'E').next().unwrap_or("");
    if value.is_zero() && mantissa.chars().any(|c| ('1'..='9').contains(&c)) {
        return Err(not_numeric());
    }
    Ok(value.normalize())
}
