//! Traits a frontend implements to collaborate with the controllers.
//!
//! The controllers never render anything themselves. They report outcomes
//! through [`Notifier`], gate destructive actions through [`Confirmer`], and
//! request screen changes through [`Navigator`]. A frontend decides what
//! each of those means.

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An action completed.
    Success,
    /// An action failed; the user may retry with a new action.
    Error,
    /// Neutral information.
    Info,
}

/// Screens the controllers can request navigation to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The sign-in entry point.
    SignIn,
    /// Signup step collecting name and email.
    SignupIdentity,
    /// Signup step collecting the password.
    SignupPassword,
    /// Signup step collecting phone/terms and finalizing.
    SignupFinalize,
    /// Post-signup landing page.
    Welcome,
    /// The main dashboard.
    Dashboard,
}

/// Transient, auto-dismissing, user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Show a notification.
    fn notify(&self, level: Notice, message: &str);
}

/// Blocking confirmation dialogs for destructive actions.
pub trait Confirmer: Send + Sync {
    /// Ask the user to confirm; `false` aborts the action.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Screen navigation requests.
pub trait Navigator: Send + Sync {
    /// Move the frontend to `screen`.
    fn navigate(&self, screen: Screen);
}

/// Recording implementations of the UI traits for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Mutex, PoisonError};

    use super::{Confirmer, Navigator, Notice, Notifier, Screen};

    /// Records every notification and navigation, and answers confirmations
    /// with a fixed verdict.
    #[derive(Debug)]
    pub struct RecordingUi {
        accept_confirmations: bool,
        notices: Mutex<Vec<(Notice, String)>>,
        screens: Mutex<Vec<Screen>>,
    }

    impl RecordingUi {
        /// A UI that confirms every dialog.
        #[must_use]
        pub const fn accepting() -> Self {
            Self::new(true)
        }

        /// A UI that declines every dialog.
        #[must_use]
        pub const fn declining() -> Self {
            Self::new(false)
        }

        const fn new(accept_confirmations: bool) -> Self {
            Self {
                accept_confirmations,
                notices: Mutex::new(Vec::new()),
                screens: Mutex::new(Vec::new()),
            }
        }

        /// Everything notified so far.
        #[must_use]
        pub fn notices(&self) -> Vec<(Notice, String)> {
            self.notices
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recent error notification.
        ///
        /// # Panics
        ///
        /// Panics if no error has been notified.
        #[must_use]
        pub fn last_error(&self) -> String {
            self.notices()
                .into_iter()
                .rev()
                .find(|(level, _)| *level == Notice::Error)
                .map(|(_, message)| message)
                .expect("no error was notified")
        }

        /// Every navigation requested so far, in order.
        #[must_use]
        pub fn screens(&self) -> Vec<Screen> {
            self.screens
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl Notifier for RecordingUi {
        fn notify(&self, level: Notice, message: &str) {
            self.notices
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((level, message.to_owned()));
        }
    }

    impl Confirmer for RecordingUi {
        fn confirm(&self, _prompt: &str) -> bool {
            self.accept_confirmations
        }
    }

    impl Navigator for RecordingUi {
        fn navigate(&self, screen: Screen) {
            self.screens
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(screen);
        }
    }
}
