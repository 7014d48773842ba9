//! Swap form state for a single quoting session

use crate::shared::constants::DEFAULT_SLIPPAGE_PERCENT;
use crate::shared::types::{ActiveInput, DecimalString};
use serde::{Deserialize, Serialize};

/// Raw form state. The side named by `active_input` holds the user's text;
/// the other side holds the computed counter amount before slippage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapQuoteState {
    pub active_input: ActiveInput,
    pub from_amount: DecimalString,
    pub to_amount: DecimalString,
    /// Percent, 0-100
    pub slippage: f64,
    pub expert_mode: bool,
}

impl Default for SwapQuoteState {
    fn default() -> Self {
        Self::new(DEFAULT_SLIPPAGE_PERCENT, false)
    }
}

impl SwapQuoteState {
    pub fn new(slippage: f64, expert_mode: bool) -> Self {
        Self {
            active_input: ActiveInput::None,
            from_amount: String::new(),
            to_amount: String::new(),
            slippage,
            expert_mode,
        }
    }

    /// User typed into the pay field; the receive side becomes stale
    pub fn edit_from(&mut self, text: impl Into<DecimalString>) {
        self.active_input = ActiveInput::From;
        self.from_amount = text.into();
        self.to_amount.clear();
    }

    /// User typed into the receive field; the pay side becomes stale
    pub fn edit_to(&mut self, text: impl Into<DecimalString>) {
        self.active_input = ActiveInput::To;
        self.to_amount = text.into();
        self.from_amount.clear();
    }

    /// Store a computed counter amount on the derived side
    pub fn apply_computed(&mut self, amount: impl Into<DecimalString>) {
        match self.active_input {
            ActiveInput::From => self.to_amount = amount.into(),
            ActiveInput::To => self.from_amount = amount.into(),
            ActiveInput::None => {}
        }
    }

    pub fn clear_computed(&mut self) {
        self.apply_computed(String::new());
    }

    /// The raw user entry, empty when nothing is being edited
    pub fn source_amount(&self) -> &str {
        match self.active_input {
            ActiveInput::From => &self.from_amount,
            ActiveInput::To => &self.to_amount,
            ActiveInput::None => "",
        }
    }

    pub fn computed_amount(&self) -> &str {
        match self.active_input {
            ActiveInput::From => &self.to_amount,
            ActiveInput::To => &self.from_amount,
            ActiveInput::None => "",
        }
    }
}

/// What the two form fields render
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapDisplay {
    pub from: DecimalString,
    pub to: DecimalString,
}
