//! The fixed, ordered case list for the account-creation flow.
//!
//! Scenarios are declared in code rather than loaded from files: the
//! suite is one flow whose cases depend on the application state left
//! behind by their predecessors, so order is part of the contract.

use crate::screens::Target;

/// One interaction or assertion against the live application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Type into a field. With `clear_first` the field is cleared before
    /// typing (setValue); without, keystrokes are appended (addValue).
    /// A trailing newline submits.
    EnterText {
        target: Target,
        text: &'static str,
        clear_first: bool,
    },

    /// Element must become visible within the element timeout.
    AssertDisplayed { target: Target },

    /// Element must become visible and its text must contain `needle`.
    AssertTextContains {
        target: Target,
        needle: &'static str,
    },

    /// Return the application to a clean slate via the driver's app reset.
    ResetApp,
}

/// A named test case: input actions followed by assertions.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,

    /// Reason this case is declared but not executed.
    pub skip: Option<&'static str>,

    pub steps: Vec<Step>,
}

impl Scenario {
    fn new(name: &'static str, steps: Vec<Step>) -> Self {
        Self {
            name,
            skip: None,
            steps,
        }
    }

    fn skipped(name: &'static str, reason: &'static str, steps: Vec<Step>) -> Self {
        Self {
            name,
            skip: Some(reason),
            steps,
        }
    }
}

// Known defect: after an app reset the application shows the create-pin
// screen even though an account exists. Re-enable once navigation is fixed.
const RESET_NAVIGATION_DEFECT: &str =
    "app reset lands on the create-pin screen instead of enter-pin";

const PIN_TOO_SHORT: &str = "Your pin must be at least 4 characters";
const PIN_LENGTH_RANGE: &str = "Only four to six characters allowed";
const PIN_INCORRECT: &str = "Invalid or incorrect pin supplied.";

/// The account-creation suite, in execution order.
pub fn account_creation_suite() -> Vec<Scenario> {
    use Step::*;
    use Target::*;

    vec![
        Scenario::new(
            "create pin screen texts",
            vec![
                AssertTextContains {
                    target: CreatePinHeader,
                    needle: "Create a Pin",
                },
                AssertTextContains {
                    target: CreatePinSubtitle,
                    needle: "Choose a 4-6 digit pin to secure your account.",
                },
            ],
        ),
        Scenario::new(
            "empty pin is rejected",
            vec![
                EnterText {
                    target: PinInput,
                    text: "\n",
                    clear_first: false,
                },
                AssertDisplayed {
                    target: InvalidPinMessage,
                },
                AssertTextContains {
                    target: InvalidPinMessage,
                    needle: PIN_TOO_SHORT,
                },
            ],
        ),
        Scenario::new(
            "pin shorter than four characters is rejected",
            vec![
                EnterText {
                    target: PinInput,
                    text: "123\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: InvalidPinMessage,
                },
                AssertTextContains {
                    target: InvalidPinMessage,
                    needle: PIN_TOO_SHORT,
                },
            ],
        ),
        Scenario::new(
            "pin longer than six characters is rejected",
            vec![
                EnterText {
                    target: PinInput,
                    text: "1234567",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: PinMaxLengthMessage,
                },
                AssertTextContains {
                    target: PinMaxLengthMessage,
                    needle: PIN_LENGTH_RANGE,
                },
            ],
        ),
        Scenario::new(
            "four character pin advances to account creation",
            vec![
                EnterText {
                    target: PinInput,
                    text: "1234\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: CreateAccountHeader,
                },
                ResetApp,
            ],
        ),
        Scenario::new(
            "six character pin advances to account creation",
            vec![
                EnterText {
                    target: PinInput,
                    text: "123456\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: CreateAccountHeader,
                },
            ],
        ),
        Scenario::new(
            "create account screen texts",
            vec![
                AssertTextContains {
                    target: CreateAccountHeader,
                    needle: "Create Account",
                },
                AssertTextContains {
                    target: CreateAccountSubtitle,
                    needle: "It's free and fast, just tell us what you'd like your username to be.",
                },
            ],
        ),
        Scenario::new(
            "empty username is rejected",
            vec![
                EnterText {
                    target: UsernameInput,
                    text: "\n",
                    clear_first: false,
                },
                AssertDisplayed {
                    target: UsernameErrorMessage,
                },
                AssertTextContains {
                    target: UsernameErrorMessage,
                    needle: "Username is required",
                },
            ],
        ),
        Scenario::new(
            "username shorter than four characters is rejected",
            vec![
                EnterText {
                    target: UsernameInput,
                    text: "a\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: UsernameErrorMessage,
                },
                AssertTextContains {
                    target: UsernameErrorMessage,
                    needle: "Username length is invalid",
                },
            ],
        ),
        Scenario::new(
            "username longer than twenty-six characters is rejected",
            vec![
                // 27 characters
                EnterText {
                    target: UsernameInput,
                    text: "123456789012345678901234567",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: UsernameErrorMessage,
                },
                AssertTextContains {
                    target: UsernameErrorMessage,
                    needle: "Maximum username length reached (26)",
                },
            ],
        ),
        Scenario::new(
            "valid username advances to the main screen",
            vec![
                EnterText {
                    target: UsernameInput,
                    text: "qatest01\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: NoActiveChatsText,
                },
                ResetApp,
            ],
        ),
        Scenario::skipped(
            "enter pin screen texts",
            RESET_NAVIGATION_DEFECT,
            vec![
                AssertTextContains {
                    target: EnterPinHeader,
                    needle: "Enter Pin",
                },
                AssertTextContains {
                    target: EnterPinSubtitle,
                    needle: "Enter pin to unlock your account.",
                },
            ],
        ),
        Scenario::skipped(
            "empty pin on unlock is rejected",
            RESET_NAVIGATION_DEFECT,
            vec![
                EnterText {
                    target: EnterPinInput,
                    text: "\n",
                    clear_first: false,
                },
                AssertDisplayed {
                    target: EnterPinInvalidMessage,
                },
                AssertTextContains {
                    target: EnterPinInvalidMessage,
                    needle: PIN_INCORRECT,
                },
            ],
        ),
        Scenario::skipped(
            "wrong pin on unlock is rejected",
            RESET_NAVIGATION_DEFECT,
            vec![
                EnterText {
                    target: EnterPinInput,
                    text: "9999\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: EnterPinInvalidMessage,
                },
                AssertTextContains {
                    target: EnterPinInvalidMessage,
                    needle: PIN_INCORRECT,
                },
            ],
        ),
        Scenario::skipped(
            "overlong pin on unlock is rejected",
            RESET_NAVIGATION_DEFECT,
            vec![
                EnterText {
                    target: EnterPinInput,
                    text: "1234567",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: EnterPinMaxLengthMessage,
                },
                AssertTextContains {
                    target: EnterPinMaxLengthMessage,
                    needle: PIN_LENGTH_RANGE,
                },
            ],
        ),
        Scenario::skipped(
            "valid pin unlocks the main screen",
            RESET_NAVIGATION_DEFECT,
            vec![
                EnterText {
                    target: EnterPinInput,
                    text: "123456\n",
                    clear_first: true,
                },
                AssertDisplayed {
                    target: NoActiveChatsText,
                },
            ],
        ),
    ]
}
