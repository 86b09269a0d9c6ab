//! Property-based tests for remote_log_client using proptest

mod common;

use common::stubs::StubTransport;
use proptest::prelude::*;
use remote_log_client::core::{validate_keys, EntryQueue, LogEntry};
use remote_log_client::prelude::*;
use serde_json::json;

fn blank_key() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('\r')], 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

fn usable_key() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[A-Za-z0-9_-]{1,16}[ \t]{0,3}"
}

// ============================================================================
// Key Validation
// ============================================================================

proptest! {
    /// Any blank application key is rejected without touching the transport
    #[test]
    fn test_blank_application_key_rejected(
        app in blank_key(),
        sys in usable_key(),
        use_background in any::<bool>(),
        raise in any::<bool>(),
    ) {
        let stub = StubTransport::succeeding();
        let dispatcher = Dispatcher::with_transport(ClientConfig::new(), stub.clone());

        let result = dispatcher.log(&app, &sys, &json!({"k": 1}), use_background, raise);
        let is_invalid_argument = matches!(result, Err(RemoteLogError::InvalidArgument { .. }));
        prop_assert!(is_invalid_argument);
        prop_assert_eq!(stub.calls(), 0);
        prop_assert_eq!(dispatcher.queue_len(), 0);
    }

    /// Any blank system key is rejected
    #[test]
    fn test_blank_system_key_rejected(app in usable_key(), sys in blank_key()) {
        prop_assert!(validate_keys(&app, &sys).is_err());
    }

    /// Keys with at least one visible character are accepted as-is
    #[test]
    fn test_usable_keys_accepted(app in usable_key(), sys in usable_key()) {
        prop_assert!(validate_keys(&app, &sys).is_ok());
    }
}

// ============================================================================
// Queue Pruning
// ============================================================================

proptest! {
    /// Pruning removes exactly the delivered entries and keeps the others in order
    #[test]
    fn test_prune_removes_only_delivered(delivered in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut queue = EntryQueue::new();
        let ids: Vec<u64> = (0..delivered.len())
            .map(|n| queue.push(LogEntry::new("app", "sys", json!(n), false)))
            .collect();

        for (id, done) in ids.iter().zip(&delivered) {
            if *done {
                queue.mark_delivered(*id);
            }
        }

        let expected_removed = delivered.iter().filter(|d| **d).count();
        prop_assert_eq!(queue.prune(), expected_removed);
        prop_assert_eq!(queue.prune(), 0);

        let kept: Vec<u64> = queue.entries().iter().map(|e| e.id).collect();
        let expected: Vec<u64> = ids
            .iter()
            .zip(&delivered)
            .filter(|(_, d)| !**d)
            .map(|(id, _)| *id)
            .collect();
        prop_assert_eq!(kept, expected);
    }
}
