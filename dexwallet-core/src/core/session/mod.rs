//! Swap session: event dispatch and last-write-wins recomputation
//!
//! The host pushes input events; each one bumps the session generation and
//! returns a ticket. Quote and allowance results are applied against the
//! ticket they were requested with, and a result for an older generation is
//! dropped. No timers: loading flags stay set until a current result lands.

use crate::core::allowance::{AllowanceQuery, AllowanceResolver};
use crate::core::math::is_positive_amount;
use crate::core::swap::{derive_display, required_input_amount};
use crate::domain::entities::{AccountState, AllowanceRecord, SwapDisplay, SwapQuoteState, Token};
use crate::domain::repositories::QuoteRepository;
use crate::shared::error::WalletError;
use crate::shared::types::{ActiveInput, ChainId, DecimalString};

#[derive(Debug, Clone, PartialEq)]
pub enum SwapEvent {
    FromTyped(DecimalString),
    ToTyped(DecimalString),
    TokensChanged { from: Option<Token>, to: Option<Token> },
    AccountChanged(AccountState),
    ChainChanged(Option<ChainId>),
    SlippageChanged(f64),
    ExpertModeChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecomputeTicket {
    generation: u64,
}

impl RecomputeTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything a quote source needs for one request
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub ticket: RecomputeTicket,
    pub chain_id: ChainId,
    pub from: Token,
    pub to: Token,
    pub amount: DecimalString,
    pub side: ActiveInput,
}

#[derive(Debug, Clone, Default)]
pub struct SwapSession {
    state: SwapQuoteState,
    from_token: Option<Token>,
    to_token: Option<Token>,
    account: AccountState,
    chain_id: Option<ChainId>,
    allowance: Option<AllowanceRecord>,
    generation: u64,
    quote_loading: bool,
    allowance_loading: bool,
}

impl SwapSession {
    pub fn new(slippage: f64, expert_mode: bool) -> Self {
        Self {
            state: SwapQuoteState::new(slippage, expert_mode),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SwapQuoteState {
        &self.state
    }

    pub fn tokens(&self) -> (Option<&Token>, Option<&Token>) {
        (self.from_token.as_ref(), self.to_token.as_ref())
    }

    pub fn account(&self) -> &AccountState {
        &self.account
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    pub fn allowance(&self) -> Option<&AllowanceRecord> {
        self.allowance.as_ref()
    }

    pub fn is_quote_loading(&self) -> bool {
        self.quote_loading
    }

    pub fn is_allowance_loading(&self) -> bool {
        self.allowance_loading
    }

    pub fn ticket(&self) -> RecomputeTicket {
        RecomputeTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: RecomputeTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn dispatch(&mut self, event: SwapEvent) -> RecomputeTicket {
        let requote = match event {
            SwapEvent::FromTyped(text) => {
                self.state.edit_from(text);
                true
            }
            SwapEvent::ToTyped(text) => {
                self.state.edit_to(text);
                true
            }
            SwapEvent::TokensChanged { from, to } => {
                self.from_token = self.on_session_chain(from);
                self.to_token = self.on_session_chain(to);
                true
            }
            SwapEvent::AccountChanged(account) => {
                let switched = account.chain_id.is_some() && account.chain_id != self.chain_id;
                if switched {
                    self.set_chain(account.chain_id);
                }
                self.account = account;
                switched
            }
            SwapEvent::ChainChanged(chain_id) => {
                self.set_chain(chain_id);
                true
            }
            // The stored quote is raw, so only the displayed amounts change
            SwapEvent::SlippageChanged(slippage) => {
                self.state.slippage = slippage;
                false
            }
            SwapEvent::ExpertModeChanged(enabled) => {
                self.state.expert_mode = enabled;
                false
            }
        };

        self.generation += 1;
        if requote {
            self.state.clear_computed();
            self.quote_loading = self.can_quote();
        }
        self.allowance_loading = true;
        log::debug!(
            "Swap session generation {} (quote loading {})",
            self.generation,
            self.quote_loading
        );
        self.ticket()
    }

    // A selection from another chain is dropped, as on a chain switch
    fn on_session_chain(&self, token: Option<Token>) -> Option<Token> {
        match (token, self.chain_id) {
            (Some(token), Some(chain_id)) if token.chain_id != chain_id => {
                log::debug!(
                    "Ignoring {} from chain {} on chain {}",
                    token.symbol,
                    token.chain_id,
                    chain_id
                );
                None
            }
            (token, _) => token,
        }
    }

    fn set_chain(&mut self, chain_id: Option<ChainId>) {
        if chain_id != self.chain_id {
            // Tokens belong to a chain; a switch invalidates the selection
            let keep = |t: &Option<Token>| t.as_ref().is_some_and(|t| Some(t.chain_id) == chain_id);
            if !keep(&self.from_token) {
                self.from_token = None;
            }
            if !keep(&self.to_token) {
                self.to_token = None;
            }
        }
        self.chain_id = chain_id;
    }

    fn can_quote(&self) -> bool {
        self.from_token.is_some()
            && self.to_token.is_some()
            && self.chain_id.is_some()
            && is_positive_amount(self.state.source_amount())
    }

    /// The quote to fetch for `ticket`, `None` if stale or nothing to quote
    pub fn quote_request(&self, ticket: RecomputeTicket) -> Option<QuoteRequest> {
        if !self.is_current(ticket) || !self.quote_loading {
            return None;
        }
        Some(QuoteRequest {
            ticket,
            chain_id: self.chain_id?,
            from: self.from_token.clone()?,
            to: self.to_token.clone()?,
            amount: self.state.source_amount().to_string(),
            side: self.state.active_input,
        })
    }

    /// Store a quote result; returns `false` when the ticket is stale
    pub fn apply_quote(&mut self, ticket: RecomputeTicket, result: Result<DecimalString, WalletError>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping quote for generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        match result {
            Ok(amount) => self.state.apply_computed(amount),
            Err(e) => {
                log::warn!("Quote failed: {}", e);
                self.state.clear_computed();
            }
        }
        self.quote_loading = false;
        true
    }

    pub fn allowance_query(&self) -> AllowanceQuery {
        AllowanceQuery {
            token: self.from_token.clone(),
            chain_id: self.chain_id,
            amount: required_input_amount(&self.state),
            account: self.account.clone(),
        }
    }

    /// Store an allowance result; returns `false` when the ticket is stale
    pub fn apply_allowance(&mut self, ticket: RecomputeTicket, record: AllowanceRecord) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping allowance for generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.allowance = Some(record);
        self.allowance_loading = false;
        true
    }

    pub fn display(&self) -> SwapDisplay {
        derive_display(&self.state)
    }

    pub fn needs_approval(&self) -> bool {
        self.allowance.as_ref().is_some_and(|a| a.needs_approval)
    }

    /// Fetch the quote, then the allowance for the amount it implies
    pub async fn refresh(
        &mut self,
        quotes: &dyn QuoteRepository,
        resolver: &AllowanceResolver,
    ) -> RecomputeTicket {
        let ticket = self.ticket();
        if let Some(request) = self.quote_request(ticket) {
            let result = quotes
                .quote(request.chain_id, &request.from, &request.to, &request.amount, request.side)
                .await;
            self.apply_quote(ticket, result);
        }
        let record = resolver.resolve(&self.allowance_query()).await;
        self.apply_allowance(ticket, record);
        ticket
    }
}
