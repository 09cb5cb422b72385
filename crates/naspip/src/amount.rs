//! Token amount conversions between decimal strings and base units.

use num_bigint::BigUint;

use crate::error::AmountError;

/// Largest amount accepted in a charge request.
pub const MAX_CHARGE_AMOUNT: u64 = 10_000_000;

/// Fractional digits accepted in a charge request.
pub const CHARGE_DECIMALS: u8 = 2;

fn ten_pow(exp: u8) -> BigUint {
    BigUint::from(10u32).pow(u32::from(exp))
}

/// Format base units as a decimal string, trimming trailing zeros.
pub fn format_units(amount: &BigUint, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let unit = ten_pow(decimals);
    let whole = amount / &unit;
    let fraction = format!(
        "{:0>width$}",
        (amount % &unit).to_string(),
        width = decimals as usize
    );
    match fraction.trim_end_matches('0') {
        "" => whole.to_string(),
        digits => format!("{whole}.{digits}"),
    }
}

/// Parse a decimal string such as `"12.5"` into base units.
pub fn parse_units(text: &str, decimals: u8) -> Result<BigUint, AmountError> {
    let invalid = || AmountError::Invalid(text.to_string());

    let (integer_part, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer_part) || !all_digits(fraction) {
        return Err(invalid());
    }
    if integer_part.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooPrecise {
            amount: text.to_string(),
            max: decimals,
        });
    }

    let padded = format!("{integer_part}{fraction:0<width$}", width = decimals as usize);
    padded.parse::<BigUint>().map_err(|_| invalid())
}

/// Format a balance for display: two fractional digits, rounded half up,
/// with `,` thousands separators.
pub fn format_balance(amount: &BigUint, decimals: u8) -> String {
    let cents = if decimals >= 2 {
        let divisor = ten_pow(decimals - 2);
        (amount + &divisor / 2u32) / divisor
    } else {
        amount * ten_pow(2 - decimals)
    };

    let hundred = BigUint::from(100u32);
    let whole = (&cents / &hundred).to_string();
    let fraction = (&cents % &hundred).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{grouped}.{fraction:0>2}")
}

/// Validate an amount typed into a charge form.
///
/// Accepts plain decimals with at most two fractional digits, between zero
/// and [`MAX_CHARGE_AMOUNT`]. Returns the amount in hundredths.
pub fn validate_charge_amount(text: &str) -> Result<BigUint, AmountError> {
    let cents = parse_units(text, CHARGE_DECIMALS)?;
    let max = BigUint::from(MAX_CHARGE_AMOUNT) * ten_pow(CHARGE_DECIMALS);
    if cents > max {
        return Err(AmountError::OutOfRange(text.to_string()));
    }
    Ok(cents)
}
