//! Inbound events and their wire-level action identifiers.

/// Identifier carried in a button's callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateWallet,
    Send,
    Receive,
    QrCode,
    SendWalletAddress,
    Back,
    ConfirmSend,
}

impl Action {
    /// Wire string placed in the button callback data.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::CreateWallet => "create_wallet",
            Action::Send => "send",
            Action::Receive => "receive",
            Action::QrCode => "qr_code",
            Action::SendWalletAddress => "send_wallet_address",
            Action::Back => "back",
            Action::ConfirmSend => "confirm_send",
        }
    }

    /// Parses wire callback data. Unknown strings return `None` so the
    /// transport can drop stale or foreign callbacks.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "create_wallet" => Some(Action::CreateWallet),
            "send" => Some(Action::Send),
            "receive" => Some(Action::Receive),
            "qr_code" => Some(Action::QrCode),
            "send_wallet_address" => Some(Action::SendWalletAddress),
            "back" => Some(Action::Back),
            "confirm_send" => Some(Action::ConfirmSend),
            _ => None,
        }
    }
}

/// An event attributed to a participant: a button press or a free-text
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    ButtonPress(Action),
    TextMessage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every action round-trips through its wire string.
    #[test]
    fn test_action_wire_round_trip() {
        let all = [
            Action::CreateWallet,
            Action::Send,
            Action::Receive,
            Action::QrCode,
            Action::SendWalletAddress,
            Action::Back,
            Action::ConfirmSend,
        ];
        for action in all {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    /// Unknown callback data is rejected.
    #[test]
    fn test_action_parse_unknown() {
        assert_eq!(Action::parse("sell_everything"), None);
        assert_eq!(Action::parse(""), None);
    }
}
