//! Swap display engine
//!
//! Turns the raw form state into the two amounts the form renders. The
//! side the user typed into is shown as typed. The computed side gets
//! slippage applied against the user: the receive amount shrinks, the pay
//! amount grows. Expert mode shows the raw quote.

use crate::core::math::{apply_slippage_decrease, apply_slippage_increase, is_positive_amount, PreciseAmount};
use crate::domain::entities::{SwapDisplay, SwapQuoteState};
use crate::shared::types::{ActiveInput, DecimalString};

/// Trim trailing fractional zeros. Text that is not a plain decimal is
/// returned untouched; `keep_trailing_dot` preserves a dot the user is
/// still typing after.
pub fn format_display_amount(value: &str, keep_trailing_dot: bool) -> DecimalString {
    if keep_trailing_dot {
        if let Some(integer) = value.strip_suffix('.') {
            if !integer.is_empty() && PreciseAmount::parse(integer).is_some() && !integer.contains('.') {
                return format!("{}.", format_display_amount(integer, false));
            }
        }
    }
    match PreciseAmount::parse(value) {
        Some(amount) => amount.to_string(),
        None => value.to_string(),
    }
}

fn derived_amount(raw: &str, state: &SwapQuoteState, adjust: fn(&str, f64) -> String) -> DecimalString {
    if state.expert_mode || !is_positive_amount(raw) {
        return format_display_amount(raw, false);
    }
    format_display_amount(&adjust(raw, state.slippage), false)
}

pub fn derive_display(state: &SwapQuoteState) -> SwapDisplay {
    let display = match state.active_input {
        ActiveInput::From => SwapDisplay {
            from: state.from_amount.clone(),
            to: derived_amount(&state.to_amount, state, apply_slippage_decrease),
        },
        ActiveInput::To => SwapDisplay {
            from: derived_amount(&state.from_amount, state, apply_slippage_increase),
            to: state.to_amount.clone(),
        },
        ActiveInput::None => SwapDisplay {
            from: format_display_amount(&state.from_amount, true),
            to: format_display_amount(&state.to_amount, true),
        },
    };
    log::debug!(
        "Derived display ({}, slippage {}%, expert {}): {} -> {}",
        state.active_input.name(),
        state.slippage,
        state.expert_mode,
        display.from,
        display.to
    );
    display
}

/// Worst-case amount the user pays, the figure an allowance must cover
pub fn required_input_amount(state: &SwapQuoteState) -> DecimalString {
    derive_display(state).from
}
