//! Structured classification of remote execution failures.
//!
//! Cadence rejections arrive as free-text error messages. They are
//! classified here once, at the gateway edge, into a closed
//! [`RemoteErrorKind`], instead of scattering substring matching
//! through every call site.

use std::fmt;

/// Known causes of a remote rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The signer's vault could not cover the requested amount.
    InsufficientFunds,
    /// The signer lacks the capability the operation requires.
    Unauthorized,
    /// The signer's FlowWager account resource was never set up.
    AccountNotInitialized,
    /// The market no longer accepts bets.
    BettingClosed,
    /// Winnings for this market were already withdrawn.
    AlreadyClaimed,
    /// Anything the classifier does not recognize.
    Unknown,
}

/// A remote rejection with its classified cause and human-readable
/// reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub kind: RemoteErrorKind,
    pub reason: String,
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.reason)
    }
}

/// Classify a raw remote error message.
///
/// Isolates the text after the last `panic:` marker (Cadence embeds
/// the assertion message there) and matches known causes.
#[must_use]
pub fn classify(message: &str) -> RemoteFailure {
    let reason = extract_panic_reason(message);
    let lowered = reason.to_lowercase();

    let kind = if lowered.contains("insufficient") || lowered.contains("amount withdrawn") {
        RemoteErrorKind::InsufficientFunds
    } else if lowered.contains("unauthorized")
        || lowered.contains("not authorized")
        || lowered.contains("only the platform admin")
        || lowered.contains("only the creator")
    {
        RemoteErrorKind::Unauthorized
    } else if lowered.contains("not initialized")
        || lowered.contains("createuseraccount")
        || lowered.contains("could not borrow")
    {
        RemoteErrorKind::AccountNotInitialized
    } else if lowered.contains("betting closed")
        || lowered.contains("market has ended")
        || lowered.contains("market is not active")
    {
        RemoteErrorKind::BettingClosed
    } else if lowered.contains("already claimed") {
        RemoteErrorKind::AlreadyClaimed
    } else {
        RemoteErrorKind::Unknown
    };

    RemoteFailure { kind, reason }
}

/// The human-readable part of a Cadence failure: everything after the
/// last `panic:` marker, or the whole message when no marker exists.
fn extract_panic_reason(message: &str) -> String {
    match message.rfind("panic:") {
        Some(index) => {
            let tail = &message[index + "panic:".len()..];
            // The runtime appends a source location on its own line.
            let reason = tail.lines().next().unwrap_or(tail).trim();
            if reason.is_empty() {
                message.trim().to_string()
            } else {
                reason.to_string()
            }
        }
        None => message.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_after_last_panic_marker() {
        let message = "error: pre-condition failed\n  --> 0f1a…:12\npanic: Insufficient funds: could not borrow FlowToken vault\n  --> 0f1a…:19";
        let failure = classify(message);
        assert_eq!(failure.kind, RemoteErrorKind::InsufficientFunds);
        assert_eq!(
            failure.reason,
            "Insufficient funds: could not borrow FlowToken vault"
        );
    }

    #[test]
    fn classifies_unauthorized() {
        let failure = classify("panic: Unauthorized: only the platform admin can resolve markets");
        assert_eq!(failure.kind, RemoteErrorKind::Unauthorized);
    }

    #[test]
    fn classifies_uninitialized_account() {
        let failure = classify("panic: Account not initialized: run createUserAccount first");
        assert_eq!(failure.kind, RemoteErrorKind::AccountNotInitialized);
    }

    #[test]
    fn classifies_betting_closed() {
        let failure = classify("panic: Betting closed: market has ended");
        assert_eq!(failure.kind, RemoteErrorKind::BettingClosed);
    }

    #[test]
    fn classifies_already_claimed() {
        let failure = classify("panic: Winnings already claimed for market 12");
        assert_eq!(failure.kind, RemoteErrorKind::AlreadyClaimed);
    }

    #[test]
    fn unrecognized_message_is_unknown_with_full_text() {
        let failure = classify("execution aborted: computation limit exceeded");
        assert_eq!(failure.kind, RemoteErrorKind::Unknown);
        assert_eq!(failure.reason, "execution aborted: computation limit exceeded");
    }

    #[test]
    fn empty_panic_tail_falls_back_to_whole_message() {
        let failure = classify("something went wrong panic:");
        assert_eq!(failure.kind, RemoteErrorKind::Unknown);
        assert_eq!(failure.reason, "something went wrong panic:");
    }
}
