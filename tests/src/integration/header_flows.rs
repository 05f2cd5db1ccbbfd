//! # Header Sync Flows
//!
//! Genesis bootstrap, chain extension, peer set rotation and batch
//! atomicity, driven through encoded host calls.

#[cfg(test)]
mod tests {
    use crate::integration::Relay;
    use proptest::prelude::*;
    use rc_header_sync::test_utils::{
        ed25519_signers, genesis_header, header_chain, headers_param, next_header, public_keys,
        rotation_header, secp256k1_signers, sign_header,
    };
    use rc_header_sync::{
        BlockHeader, ChainId, ChainStateStore, ConsensusPeerSet, HeaderSyncError, HeaderSyncQuery,
        InvocationContext, QuorumRule, RecordKind, SyncMethod, VerificationFailure,
    };
    use shared_crypto::{Ed25519Signature, KeyPair, Signature};

    const CHAIN: ChainId = 7;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Relay with `CHAIN` bootstrapped from four Ed25519 signers (threshold 3).
    fn bootstrapped() -> (Relay, Vec<KeyPair>, BlockHeader) {
        let signers = ed25519_signers(1, 4);
        let mut relay = Relay::new(&ed25519_signers(200, 3));
        let genesis = genesis_header(&public_keys(&signers));
        relay.genesis(CHAIN, &genesis).expect("genesis syncs");
        (relay, signers, genesis)
    }

    fn flip_first_signature(header: &mut BlockHeader) {
        let entry = &mut header.signatures[0];
        let mut bytes = *entry.signature.as_bytes();
        bytes[10] ^= 0x01;
        entry.signature = Signature::Ed25519(Ed25519Signature::from_bytes(bytes));
    }

    fn verification_reason(result: Result<(), HeaderSyncError>) -> (u64, VerificationFailure) {
        match result {
            Err(HeaderSyncError::VerificationFailed { height, reason, .. }) => (height, reason),
            other => panic!("expected verification failure, got {other:?}"),
        }
    }

    // =========================================================================
    // GENESIS
    // =========================================================================

    #[test]
    fn test_genesis_bootstraps_chain() {
        let (relay, signers, genesis) = bootstrapped();

        let stored = relay.service.header_by_height(&relay.store, CHAIN, 0).unwrap();
        assert_eq!(stored, Some(genesis));
        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(0));

        let set = relay
            .service
            .latest_consensus_peer_set(&relay.store, CHAIN)
            .unwrap()
            .unwrap();
        assert_eq!(set.version, 0);
        assert_eq!(set.introduced_at, 0);
        assert_eq!(set.signers, public_keys(&signers));
        assert_eq!(set.threshold, 3);
    }

    #[test]
    fn test_second_genesis_rejected_and_state_unchanged() {
        let (mut relay, _, _) = bootstrapped();
        let before = relay.store.snapshot();

        let other = genesis_header(&public_keys(&ed25519_signers(50, 4)));
        let result = relay.genesis(CHAIN, &other);

        assert!(matches!(
            result,
            Err(HeaderSyncError::AlreadySynced {
                kind: RecordKind::Header,
                position: 0,
                ..
            })
        ));
        assert_eq!(relay.store.snapshot(), before);
    }

    #[test]
    fn test_genesis_without_operator_witness_rejected() {
        let mut relay = Relay::new(&ed25519_signers(200, 3));
        let genesis = genesis_header(&public_keys(&ed25519_signers(1, 4)));
        let input = rc_header_sync::test_utils::genesis_param(CHAIN, &genesis);

        let result = relay.call(SyncMethod::SyncGenesisHeader, input, false);

        assert!(matches!(result, Err(HeaderSyncError::PermissionDenied(_))));
        assert!(relay.store.is_empty());
        assert_eq!(relay.store.write_calls(), 0);
    }

    #[test]
    fn test_operator_depends_on_bookkeepers() {
        let (relay, _, _) = bootstrapped();
        let other = Relay::new(&ed25519_signers(201, 3));
        assert_ne!(relay.service.operator(), other.service.operator());
    }

    #[test]
    fn test_genesis_over_existing_peer_set_rejected() {
        let mut relay = Relay::new(&ed25519_signers(200, 3));
        let signers = public_keys(&ed25519_signers(1, 4));
        let stray = ConsensusPeerSet::new(CHAIN, 0, 0, signers.clone(), QuorumRule::Byzantine);
        relay.store.put_peer_set(&stray).unwrap();
        let before = relay.store.snapshot();

        let result = relay.genesis(CHAIN, &genesis_header(&signers));

        assert!(matches!(
            result,
            Err(HeaderSyncError::AlreadySynced {
                kind: RecordKind::PeerSet,
                position: 0,
                ..
            })
        ));
        assert_eq!(relay.store.snapshot(), before);
        assert_eq!(relay.service.header_by_height(&relay.store, CHAIN, 0).unwrap(), None);
    }

    #[test]
    fn test_genesis_with_empty_peer_set_rejected() {
        let mut relay = Relay::new(&ed25519_signers(200, 3));
        let result = relay.genesis(CHAIN, &genesis_header(&[]));
        assert!(matches!(result, Err(HeaderSyncError::InvalidPeerSet(_))));
        assert!(relay.store.is_empty());
    }

    // =========================================================================
    // CHAIN EXTENSION
    // =========================================================================

    #[test]
    fn test_batch_extends_chain_and_indexes_by_hash() {
        let (mut relay, signers, genesis) = bootstrapped();
        let headers = header_chain(&genesis, 5, &signers[..3]);

        relay.headers(CHAIN, &headers).unwrap();

        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(5));
        for header in &headers {
            let by_hash = relay
                .service
                .header_by_hash(&relay.store, CHAIN, &header.digest())
                .unwrap();
            assert_eq!(by_hash.as_ref(), Some(header));
        }
        assert_eq!(
            relay.service.header_by_hash(&relay.store, CHAIN, &[0xEE; 32]).unwrap(),
            None
        );
    }

    #[test]
    fn test_consecutive_batches_link() {
        let (mut relay, signers, genesis) = bootstrapped();
        let first = header_chain(&genesis, 3, &signers);
        let second = header_chain(&first[2], 3, &signers);

        relay.headers(CHAIN, &first).unwrap();
        relay.headers(CHAIN, &second).unwrap();

        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(6));
    }

    #[test]
    fn test_flipped_signature_byte_rejected() {
        let (mut relay, signers, genesis) = bootstrapped();
        let mut header = next_header(&genesis, &signers);
        flip_first_signature(&mut header);

        let (height, reason) = verification_reason(relay.headers(CHAIN, &[header]));

        assert_eq!(height, 1);
        assert!(matches!(reason, VerificationFailure::InvalidSignature { index: 0, .. }));
        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(0));
    }

    #[test]
    fn test_payload_tampered_after_signing_rejected() {
        let (mut relay, signers, genesis) = bootstrapped();
        let mut header = next_header(&genesis, &signers);
        header.payload.push(0xFF);

        let (_, reason) = verification_reason(relay.headers(CHAIN, &[header]));
        assert!(matches!(reason, VerificationFailure::InvalidSignature { .. }));
    }

    #[test]
    fn test_below_threshold_rejected() {
        let (mut relay, signers, genesis) = bootstrapped();
        let header = next_header(&genesis, &signers[..2]);

        let (_, reason) = verification_reason(relay.headers(CHAIN, &[header]));
        assert_eq!(
            reason,
            VerificationFailure::InsufficientSignatures {
                got: 2,
                required: 3
            }
        );
    }

    #[test]
    fn test_outsider_signature_rejected() {
        let (mut relay, _, genesis) = bootstrapped();
        let mut mixed = ed25519_signers(1, 3);
        mixed.extend(ed25519_signers(99, 1));
        let header = next_header(&genesis, &mixed);

        let (_, reason) = verification_reason(relay.headers(CHAIN, &[header]));
        assert_eq!(
            reason,
            VerificationFailure::UnauthorizedSigner {
                index: 3,
                version: 0
            }
        );
    }

    #[test]
    fn test_wrong_parent_hash_rejected() {
        let (mut relay, signers, genesis) = bootstrapped();
        let mut header = next_header(&genesis, &signers);
        header.previous_hash = [0x11; 32];
        sign_header(&mut header, &signers);

        let (_, reason) = verification_reason(relay.headers(CHAIN, &[header]));
        assert!(reason.is_linkage());
    }

    #[test]
    fn test_resubmitted_header_is_already_synced() {
        let (mut relay, signers, genesis) = bootstrapped();
        let headers = header_chain(&genesis, 3, &signers);
        relay.headers(CHAIN, &headers).unwrap();

        let result = relay.headers(CHAIN, &headers[1..2]);

        assert!(matches!(
            result,
            Err(HeaderSyncError::AlreadySynced {
                kind: RecordKind::Header,
                position: 2,
                ..
            })
        ));
    }

    // =========================================================================
    // PEER SET ROTATION
    // =========================================================================

    #[test]
    fn test_rotation_takes_effect_for_next_header() {
        let (mut relay, old, genesis) = bootstrapped();
        let new = ed25519_signers(100, 4);
        let rotation = rotation_header(&genesis, &public_keys(&new), &old);
        relay.headers(CHAIN, &[rotation.clone()]).unwrap();

        let stale = next_header(&rotation, &old);
        let (height, reason) = verification_reason(relay.headers(CHAIN, &[stale]));
        assert_eq!(height, 2);
        assert_eq!(
            reason,
            VerificationFailure::UnauthorizedSigner {
                index: 0,
                version: 1
            }
        );

        relay.headers(CHAIN, &[next_header(&rotation, &new)]).unwrap();
        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(2));
    }

    #[test]
    fn test_rotation_versions_are_height_scoped() {
        let (mut relay, old, genesis) = bootstrapped();
        let new = ed25519_signers(100, 5);
        let mut batch = header_chain(&genesis, 2, &old);
        let rotation = rotation_header(&batch[1], &public_keys(&new), &old);
        batch.push(rotation.clone());
        batch.extend(header_chain(&rotation, 2, &new));

        relay.headers(CHAIN, &batch).unwrap();

        let at = |relay: &Relay, height| {
            relay
                .service
                .consensus_peer_set_at(&relay.store, CHAIN, height)
                .unwrap()
                .unwrap()
        };
        assert_eq!(at(&relay, 0).version, 0);
        assert_eq!(at(&relay, 2).version, 0);
        assert_eq!(at(&relay, 3).version, 1);
        assert_eq!(at(&relay, 5).version, 1);

        let latest = relay
            .service
            .latest_consensus_peer_set(&relay.store, CHAIN)
            .unwrap()
            .unwrap();
        assert_eq!(latest.introduced_at, 3);
        assert_eq!(latest.threshold, 4);
    }

    #[test]
    fn test_rotation_signed_by_new_set_rejected() {
        let (mut relay, _, genesis) = bootstrapped();
        let new = ed25519_signers(100, 4);
        let rotation = rotation_header(&genesis, &public_keys(&new), &new);

        let (_, reason) = verification_reason(relay.headers(CHAIN, &[rotation]));
        assert!(matches!(reason, VerificationFailure::UnauthorizedSigner { version: 0, .. }));
        assert_eq!(
            relay
                .service
                .latest_consensus_peer_set(&relay.store, CHAIN)
                .unwrap()
                .unwrap()
                .version,
            0
        );
    }

    // =========================================================================
    // ATOMICITY
    // =========================================================================

    #[test]
    fn test_failure_mid_batch_stores_nothing() {
        let (mut relay, signers, genesis) = bootstrapped();
        let mut headers = header_chain(&genesis, 3, &signers);
        flip_first_signature(&mut headers[1]);
        let before = relay.store.snapshot();
        let writes = relay.store.write_calls();

        let (height, _) = verification_reason(relay.headers(CHAIN, &headers));

        assert_eq!(height, 2);
        assert_eq!(relay.store.snapshot(), before);
        assert_eq!(relay.store.write_calls(), writes);
        assert_eq!(relay.service.header_by_height(&relay.store, CHAIN, 1).unwrap(), None);
    }

    #[test]
    fn test_failure_on_last_item_stores_nothing() {
        let (mut relay, signers, genesis) = bootstrapped();
        let mut headers = header_chain(&genesis, 3, &signers);
        flip_first_signature(&mut headers[2]);
        let before = relay.store.snapshot();
        let writes = relay.store.write_calls();

        let (height, _) = verification_reason(relay.headers(CHAIN, &headers));

        assert_eq!(height, 3);
        assert_eq!(relay.store.snapshot(), before);
        assert_eq!(relay.store.write_calls(), writes);
        for height in 1..=3 {
            assert_eq!(relay.service.header_by_height(&relay.store, CHAIN, height).unwrap(), None);
        }
        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(0));
    }

    #[test]
    fn test_verified_rotation_to_invalid_set_rolls_back() {
        let (mut relay, signers, genesis) = bootstrapped();
        let first = next_header(&genesis, &signers);
        let rotation = rotation_header(&first, &[], &signers);
        let before = relay.store.snapshot();
        let writes = relay.store.write_calls();

        let result = relay.headers(CHAIN, &[first, rotation]);

        assert!(matches!(result, Err(HeaderSyncError::InvalidPeerSet(_))));
        assert_eq!(relay.store.snapshot(), before);
        assert_eq!(relay.store.write_calls(), writes);
        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(0));
        assert_eq!(
            relay
                .service
                .latest_consensus_peer_set(&relay.store, CHAIN)
                .unwrap()
                .unwrap()
                .version,
            0
        );
    }

    #[test]
    fn test_failed_rotation_batch_keeps_old_peer_set() {
        let (mut relay, old, genesis) = bootstrapped();
        let new = ed25519_signers(100, 4);
        let rotation = rotation_header(&genesis, &public_keys(&new), &old);
        let bad = next_header(&rotation, &old);

        assert!(relay.headers(CHAIN, &[rotation, bad]).is_err());

        let latest = relay
            .service
            .latest_consensus_peer_set(&relay.store, CHAIN)
            .unwrap()
            .unwrap();
        assert_eq!(latest.version, 0);
    }

    #[test]
    fn test_store_write_failure_surfaces_as_storage_error() {
        let (mut relay, signers, genesis) = bootstrapped();
        let headers = header_chain(&genesis, 2, &signers);
        relay.store.set_fail_writes(true);

        let result = relay.headers(CHAIN, &headers);
        assert!(matches!(result, Err(HeaderSyncError::StorageError(_))));

        relay.store.set_fail_writes(false);
        relay.headers(CHAIN, &headers).unwrap();
        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(2));
    }

    #[test]
    fn test_store_read_failure_surfaces_as_storage_error() {
        let (mut relay, signers, genesis) = bootstrapped();
        relay.store.set_fail_reads(true);

        let result = relay.headers(CHAIN, &[next_header(&genesis, &signers)]);
        assert!(matches!(result, Err(HeaderSyncError::StorageError(_))));
    }

    // =========================================================================
    // INPUT HANDLING
    // =========================================================================

    #[test]
    fn test_trailing_bytes_rejected() {
        let (mut relay, signers, genesis) = bootstrapped();
        let mut input = headers_param(CHAIN, &[next_header(&genesis, &signers)]);
        input.push(0);

        let result = relay.call(SyncMethod::SyncBlockHeader, input, false);
        assert!(matches!(result, Err(HeaderSyncError::MalformedInput(_))));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let (mut relay, _, _) = bootstrapped();
        let mut ctx = rc_header_sync::test_utils::TestInvocation::new(
            std::mem::take(&mut relay.store),
            Vec::new(),
        );

        let result = relay.service.invoke("syncEverything", &mut ctx);

        assert!(matches!(result, Err(HeaderSyncError::MalformedInput(_))));
        assert_eq!(ctx.store().write_calls(), 1);
    }

    #[test]
    fn test_method_names_round_trip_through_dispatch() {
        for method in [
            SyncMethod::SyncGenesisHeader,
            SyncMethod::SyncBlockHeader,
            SyncMethod::SyncCrossChainMsg,
        ] {
            assert_eq!(method.name().parse::<SyncMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_chains_are_isolated() {
        let (mut relay, signers, genesis) = bootstrapped();
        relay.headers(CHAIN, &header_chain(&genesis, 2, &signers)).unwrap();

        let result = relay.headers(CHAIN + 1, &[next_header(&genesis, &signers)]);

        let (_, reason) = verification_reason(result);
        assert_eq!(reason, VerificationFailure::NoActivePeerSet);
        assert_eq!(relay.service.current_height(&relay.store, CHAIN + 1).unwrap(), None);
    }

    #[test]
    fn test_secp256k1_peer_set() {
        let signers = secp256k1_signers(1, 4);
        let mut relay = Relay::new(&ed25519_signers(200, 3));
        let genesis = genesis_header(&public_keys(&signers));
        relay.genesis(CHAIN, &genesis).unwrap();

        relay.headers(CHAIN, &header_chain(&genesis, 3, &signers[1..])).unwrap();

        assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(3));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_single_byte_corruption_never_syncs(position in any::<prop::sample::Index>(), mask in 1u8..=255) {
            let (mut relay, signers, genesis) = bootstrapped();
            let mut input = headers_param(CHAIN, &[next_header(&genesis, &signers)]);
            let at = position.index(input.len());
            input[at] ^= mask;

            let result = relay.call(SyncMethod::SyncBlockHeader, input, false);

            prop_assert!(result.is_err());
            prop_assert_eq!(relay.service.current_height(&relay.store, CHAIN).unwrap(), Some(0));
        }
    }
}
