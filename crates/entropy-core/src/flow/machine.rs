//! The conversation state machine.
//!
//! `dispatch` consumes one inbound event for one participant and
//! produces exactly one render instruction, mutating the stored
//! session on the way. Transitions are total: an event with no guard
//! in the current state falls back to a "use the buttons" render and
//! leaves the session untouched.
//!
//! External calls (price quote, QR image) are fallible effects whose
//! failure degrades to an error render in the same transition; the
//! machine never leaves partial state behind waiting for a retry.
//! Retry is a user-initiated repeat button press. Back navigation
//! never re-invokes external services; it re-renders from cached
//! session fields only.

use tracing::{debug, warn};

use crate::flow::event::{Action, InboundEvent};
use crate::flow::render::{ImageAttachment, MenuButton, RenderInstruction};
use crate::flow::session::{Session, SessionStore};
use crate::oracle::PriceOracle;
use crate::qr::QrRenderer;
use crate::wallet::generate_wallet;

/// Machine states, one per distinct menu the participant can be in.
///
/// Replaces the flag-pair representation (`awaiting_address` /
/// `awaiting_amount` booleans) with a single enum so invalid flag
/// combinations cannot be expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowState {
    /// No wallet context established.
    #[default]
    Idle,
    /// Wallet and cached price exist; main menu shown.
    WalletReady,
    /// Sub-menu offering QR or address display.
    ReceiveMenu,
    /// Collecting destination address for a transfer.
    AwaitingAddress,
    /// Collecting amount, address already collected.
    AwaitingAmount,
    /// Amount and address collected; awaiting confirm or cancel.
    ConfirmPending,
}

/// The conversation flow: session store plus leaf collaborators.
///
/// Generic over the two fallible collaborators so tests can substitute
/// deterministic stubs. Wallet generation is pure and needs no seam.
pub struct ConversationFlow<O, Q> {
    store: SessionStore,
    oracle: O,
    qr: Q,
    ticker: String,
}

impl<O: PriceOracle, Q: QrRenderer> ConversationFlow<O, Q> {
    pub fn new(oracle: O, qr: Q, ticker: impl Into<String>) -> Self {
        Self {
            store: SessionStore::new(),
            oracle,
            qr,
            ticker: ticker.into(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Render for a participant who has not pressed anything yet
    /// (the transport's `/start` greeting).
    pub fn welcome(&self) -> RenderInstruction {
        RenderInstruction::with_menu(
            format!(
                "Welcome to the Entropy {} Bot! Tap the button below to \
                 create a new wallet and get the current {} price.",
                self.ticker, self.ticker
            ),
            idle_menu_rows(),
        )
    }

    /// Applies one event for one participant and returns what to show.
    ///
    /// The store lock is only held for the read and the write, never
    /// across the external calls; ordering of events for a single
    /// participant is the transport's responsibility.
    pub async fn dispatch(&self, participant_id: i64, event: InboundEvent) -> RenderInstruction {
        let mut session = self.store.get(participant_id);
        let from = session.state;
        let render = self.apply(&mut session, event).await;
        if session.state != from {
            debug!(participant_id, ?from, to = ?session.state, "transition");
        }
        self.store.put(participant_id, session);
        render
    }

    async fn apply(&self, session: &mut Session, event: InboundEvent) -> RenderInstruction {
        use FlowState::{
            AwaitingAddress, AwaitingAmount, ConfirmPending, Idle, ReceiveMenu, WalletReady,
        };
        use InboundEvent::{ButtonPress, TextMessage};

        match (session.state, event) {
            (Idle, ButtonPress(Action::CreateWallet)) => self.create_wallet(session).await,

            (WalletReady, ButtonPress(Action::Send)) => {
                session.state = AwaitingAddress;
                RenderInstruction::text("Enter the destination address:")
            }
            (WalletReady, ButtonPress(Action::Receive)) => {
                session.state = ReceiveMenu;
                RenderInstruction::with_menu(
                    "How would you like to receive funds?",
                    receive_menu_rows(),
                )
            }
            // Back at the main menu is idempotent: re-render from the
            // cached session, no counters, no external calls.
            (WalletReady, ButtonPress(Action::Back)) => self.main_menu(session),

            (ReceiveMenu, ButtonPress(Action::QrCode)) => self.qr_code(session).await,
            (ReceiveMenu, ButtonPress(Action::SendWalletAddress)) => {
                let Some(address) = session.wallet.as_ref().map(|w| w.address.clone()) else {
                    return self.fallback(session);
                };
                session.state = WalletReady;
                let mut render = self.main_menu(session);
                render.text = format!("Your wallet address:\n{address}\n\n{}", render.text);
                render
            }
            (ReceiveMenu, ButtonPress(Action::Back)) => {
                session.state = WalletReady;
                self.main_menu(session)
            }

            (AwaitingAddress, TextMessage(content)) => {
                session.pending_address = Some(content);
                session.state = AwaitingAmount;
                RenderInstruction::text(format!("Enter the amount of {} to send:", self.ticker))
            }
            (AwaitingAmount, TextMessage(content)) => {
                session.pending_amount = Some(content);
                session.state = ConfirmPending;
                let address = session.pending_address.as_deref().unwrap_or_default();
                let amount = session.pending_amount.as_deref().unwrap_or_default();
                RenderInstruction::with_menu(
                    format!("Send {amount} {} to {address}?", self.ticker),
                    vec![vec![
                        MenuButton::new("Confirm", Action::ConfirmSend),
                        MenuButton::new("Back", Action::Back),
                    ]],
                )
            }

            (ConfirmPending, ButtonPress(Action::ConfirmSend)) => {
                let address = session.pending_address.take().unwrap_or_default();
                let amount = session.pending_amount.take().unwrap_or_default();
                session.state = WalletReady;
                RenderInstruction::with_menu(
                    format!("✅ {amount} {} sent to {address}", self.ticker),
                    vec![vec![MenuButton::new("Back", Action::Back)]],
                )
            }
            (ConfirmPending, ButtonPress(Action::Back)) => {
                session.clear_pending();
                session.state = WalletReady;
                self.main_menu(session)
            }

            (_, event) => {
                debug!(state = ?session.state, ?event, "no matching transition");
                self.fallback(session)
            }
        }
    }

    async fn create_wallet(&self, session: &mut Session) -> RenderInstruction {
        let wallet = generate_wallet();
        match self.oracle.fetch_price().await {
            Ok(price) => {
                session.wallet = Some(wallet);
                session.last_quoted_price = Some(price);
                session.state = FlowState::WalletReady;
                self.main_menu(session)
            }
            Err(err) => {
                warn!("price fetch failed: {err:#}");
                // Stay idle, drop the generated wallet; the button
                // press itself is the retry mechanism.
                RenderInstruction::with_menu(
                    format!(
                        "Failed to fetch the {} price. Please try again later.",
                        self.ticker
                    ),
                    idle_menu_rows(),
                )
            }
        }
    }

    async fn qr_code(&self, session: &mut Session) -> RenderInstruction {
        let Some(address) = session.wallet.as_ref().map(|w| w.address.clone()) else {
            return self.fallback(session);
        };
        session.state = FlowState::WalletReady;
        match self.qr.render(&address).await {
            Ok(bytes) => self.main_menu(session).with_attachment(ImageAttachment {
                bytes,
                caption: format!("QR code for {address}"),
            }),
            Err(err) => {
                warn!("QR render failed: {err:#}");
                let mut render = self.main_menu(session);
                render.text = format!("Failed to generate the QR code.\n\n{}", render.text);
                render
            }
        }
    }

    /// Main menu: wallet summary text plus the Send/Receive row.
    /// Renders purely from cached session fields.
    fn main_menu(&self, session: &Session) -> RenderInstruction {
        let text = match (&session.wallet, session.last_quoted_price) {
            (Some(wallet), Some(price)) => format!(
                "🪙 Entropy Wallet 🪙\n\n\
                 Address: {}\n\
                 Balance: 0 {}\n\
                 {} Price: ${price}\n\n\
                 View on Explorer: {}",
                wallet.address,
                self.ticker,
                self.ticker,
                wallet.explorer_link()
            ),
            _ => format!("🪙 Entropy Wallet 🪙\n\nNo {} price cached.", self.ticker),
        };
        RenderInstruction::with_menu(text, main_menu_rows())
    }

    /// Total-transition fallback: unchanged state, current menu again.
    fn fallback(&self, session: &Session) -> RenderInstruction {
        let menu = match session.state {
            FlowState::Idle => idle_menu_rows(),
            FlowState::WalletReady => main_menu_rows(),
            FlowState::ReceiveMenu => receive_menu_rows(),
            // Text input is expected here; no buttons to offer.
            FlowState::AwaitingAddress | FlowState::AwaitingAmount => Vec::new(),
            FlowState::ConfirmPending => vec![vec![
                MenuButton::new("Confirm", Action::ConfirmSend),
                MenuButton::new("Back", Action::Back),
            ]],
        };
        RenderInstruction::with_menu("Please use the buttons below.", menu)
    }
}

fn idle_menu_rows() -> Vec<Vec<MenuButton>> {
    vec![vec![MenuButton::new(
        "Create Wallet & Get Price",
        Action::CreateWallet,
    )]]
}

fn main_menu_rows() -> Vec<Vec<MenuButton>> {
    vec![vec![
        MenuButton::new("Send", Action::Send),
        MenuButton::new("Receive", Action::Receive),
    ]]
}

fn receive_menu_rows() -> Vec<Vec<MenuButton>> {
    vec![
        vec![
            MenuButton::new("QR Code", Action::QrCode),
            MenuButton::new("Wallet Address", Action::SendWalletAddress),
        ],
        vec![MenuButton::new("Back", Action::Back)],
    ]
}
