//! Screen objects for the account-creation flow
//!
//! Each screen is a stateless facade over the live session: a named set
//! of locatable elements plus a shown-check anchored on the element that
//! uniquely identifies the view.

use std::time::Duration;

use crate::driver::{Locator, Session};
use crate::error::E2eResult;

/// Application views the suite interacts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    CreatePin,
    CreateAccount,
    EnterPin,
    UplinkMain,
}

impl Screen {
    /// Element whose visibility marks this screen as shown.
    pub fn anchor(&self) -> Target {
        match self {
            Screen::CreatePin => Target::CreatePinHeader,
            Screen::CreateAccount => Target::CreateAccountHeader,
            Screen::EnterPin => Target::EnterPinHeader,
            Screen::UplinkMain => Target::NoActiveChatsText,
        }
    }

    /// Block until the screen's anchor element is displayed.
    pub async fn wait_for_is_shown(&self, session: &Session, timeout: Duration) -> E2eResult<()> {
        session
            .wait_displayed(&self.anchor().locator(), timeout)
            .await?;
        Ok(())
    }
}

/// Named elements across the four screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    // Create Pin screen
    CreatePinHeader,
    CreatePinSubtitle,
    PinInput,
    InvalidPinMessage,
    PinMaxLengthMessage,

    // Create Account screen
    CreateAccountHeader,
    CreateAccountSubtitle,
    UsernameInput,
    UsernameErrorMessage,

    // Enter Pin screen
    EnterPinHeader,
    EnterPinSubtitle,
    EnterPinInput,
    EnterPinInvalidMessage,
    EnterPinMaxLengthMessage,

    // Main screen
    NoActiveChatsText,
}

impl Target {
    /// Screen this element lives on.
    pub fn screen(&self) -> Screen {
        use Target::*;
        match self {
            CreatePinHeader | CreatePinSubtitle | PinInput | InvalidPinMessage
            | PinMaxLengthMessage => Screen::CreatePin,
            CreateAccountHeader | CreateAccountSubtitle | UsernameInput
            | UsernameErrorMessage => Screen::CreateAccount,
            EnterPinHeader | EnterPinSubtitle | EnterPinInput | EnterPinInvalidMessage
            | EnterPinMaxLengthMessage => Screen::EnterPin,
            NoActiveChatsText => Screen::UplinkMain,
        }
    }

    /// Locator for this element in the application's accessibility tree.
    pub fn locator(&self) -> Locator {
        let id = match self {
            Target::CreatePinHeader => "create-pin-header",
            Target::CreatePinSubtitle => "create-pin-subtitle",
            Target::PinInput => "pin-input",
            Target::InvalidPinMessage => "invalid-pin-message",
            Target::PinMaxLengthMessage => "pin-max-length-message",

            Target::CreateAccountHeader => "create-account-header",
            Target::CreateAccountSubtitle => "create-account-subtitle",
            Target::UsernameInput => "username-input",
            Target::UsernameErrorMessage => "username-error-message",

            Target::EnterPinHeader => "enter-pin-header",
            Target::EnterPinSubtitle => "enter-pin-subtitle",
            Target::EnterPinInput => "enter-pin-input",
            Target::EnterPinInvalidMessage => "enter-pin-invalid-message",
            Target::EnterPinMaxLengthMessage => "enter-pin-max-length-message",

            Target::NoActiveChatsText => "no-active-chats",
        };
        Locator::accessibility_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TARGETS: [Target; 15] = [
        Target::CreatePinHeader,
        Target::CreatePinSubtitle,
        Target::PinInput,
        Target::InvalidPinMessage,
        Target::PinMaxLengthMessage,
        Target::CreateAccountHeader,
        Target::CreateAccountSubtitle,
        Target::UsernameInput,
        Target::UsernameErrorMessage,
        Target::EnterPinHeader,
        Target::EnterPinSubtitle,
        Target::EnterPinInput,
        Target::EnterPinInvalidMessage,
        Target::EnterPinMaxLengthMessage,
        Target::NoActiveChatsText,
    ];

    #[test]
    fn locators_are_distinct_accessibility_ids() {
        let mut seen = std::collections::HashSet::new();
        for target in ALL_TARGETS {
            let locator = target.locator();
            assert_eq!(locator.using, "accessibility id");
            assert!(seen.insert(locator.value.clone()), "duplicate id: {}", locator.value);
        }
    }

    #[test]
    fn anchors_live_on_their_own_screen() {
        for screen in [
            Screen::CreatePin,
            Screen::CreateAccount,
            Screen::EnterPin,
            Screen::UplinkMain,
        ] {
            assert_eq!(screen.anchor().screen(), screen);
        }
    }
}
