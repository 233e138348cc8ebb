//! # Integration Test Flows
//!
//! End-to-end proofs built from the reference trie and a BLS-signed chain,
//! verified through the public API.
//!
//! ## Flows Tested:
//!
//! 1. **Inclusion**: ledger instance present, typed fields readable
//! 2. **Exclusion**: absent key proven absent, `NotFound` surfaced
//! 3. **Wire**: encode → decode → verify behaves like the original
//! 4. **Roster rotation**: links signed by successive rosters
//! 5. **Service**: raw bytes through `ProofVerificationApi`, chain cache
//! 6. **Concurrency**: one proof verified from many threads

#[cfg(test)]
mod tests {
    use ledger_proof::{
        AnchorBlock, BlsRosterVerifier, LedgerInstance, Membership, Proof, ProofError,
        ProofOutcome, ProofState, ProofVerificationApi, ProofVerifierConfig,
        ProofVerifierService,
    };
    use serde::{Deserialize, Serialize};

    use crate::fixtures::{alice_trie, chain_to, keypairs, ReferenceTrie, TestChain};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    // =============================================================================
    // INCLUSION
    // =============================================================================

    /// Anchor B0 with roster [K1], one link to the block holding alice.
    #[test]
    fn test_alice_ledger_instance() {
        init_tracing();
        let trie = alice_trie();
        let mut chain = TestChain::genesis(keypairs(1, 1));
        chain.append(trie.root());
        let proof = chain.proof(&trie, b"alice");

        assert!(proof.verify(&chain.anchor()).is_ok());
        assert!(proof.matches(b"alice"));
        assert!(proof.is_ledger_instance_proof());
        assert_eq!(proof.value().unwrap(), b"100");
        assert_eq!(proof.contract_id().unwrap(), "coin");
        assert_eq!(proof.access_control_id().unwrap().as_bytes(), b"darc:admin");
        assert!(proof.is_contract_instance("coin", &chain.anchor()));

        let instance = proof.key_value().unwrap();
        assert_eq!(
            instance,
            LedgerInstance {
                key: b"alice".to_vec(),
                value: b"100".to_vec(),
                contract_id: "coin".into(),
                access_control_id: proof.access_control_id().unwrap(),
            }
        );
    }

    /// Two-value leaf: inclusion holds but it is not a ledger instance.
    #[test]
    fn test_two_value_leaf_is_not_contract_instance() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 1);
        let proof = chain.proof(&trie, b"dave");

        assert!(proof.verify(&chain.anchor()).is_ok());
        assert!(proof.matches(b"dave"));
        assert!(!proof.is_ledger_instance_proof());
        assert!(!proof.is_contract_instance("coin", &chain.anchor()));
        assert!(matches!(proof.contract_id(), Err(ProofError::MalformedProof(_))));
        assert_eq!(proof.values().unwrap().len(), 2);
    }

    #[test]
    fn test_every_inserted_key_verifies() {
        let mut trie = ReferenceTrie::new();
        for i in 0..64u32 {
            let key = format!("instance-{}", i);
            trie.insert(key.as_bytes(), &[i.to_string().as_bytes(), b"coin", b"darc"]);
        }
        let chain = chain_to(trie.root(), 2);
        let anchor = chain.anchor();
        for i in 0..64u32 {
            let key = format!("instance-{}", i);
            let proof = chain.proof(&trie, key.as_bytes());
            assert!(proof.verify(&anchor).is_ok(), "key {}", key);
            assert_eq!(proof.value().unwrap(), i.to_string().as_bytes());
        }
    }

    #[test]
    fn test_get_reads_neighbour_leaf() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 1);
        let proof = chain.proof(&trie, b"alice");
        assert_eq!(proof.get(b"alice").unwrap(), proof.key_value().unwrap());
        assert!(proof.get(b"nobody").unwrap_err().is_not_found());
    }

    // =============================================================================
    // EXCLUSION
    // =============================================================================

    #[test]
    fn test_absent_key_proven_absent() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 1);
        let anchor = chain.anchor();

        for key in [&b"mallory"[..], b"trent", b"", b"alice "] {
            let proof = chain.proof(&trie, key);
            assert!(proof.verify(&anchor).is_ok(), "key {:?}", key);
            assert!(!proof.matches(key));
            assert_eq!(proof.membership().unwrap(), Membership::Absent);
            assert_eq!(
                proof.verify_entry(&anchor, &BlsRosterVerifier::new()).unwrap_err(),
                ProofError::NotFound(key.to_vec())
            );
            assert!(!proof.is_contract_instance("coin", &anchor));
        }
    }

    #[test]
    fn test_empty_trie_absence() {
        let trie = ReferenceTrie::new();
        let chain = chain_to(trie.root(), 1);
        let proof = chain.proof(&trie, b"anything");
        assert!(proof.verify(&chain.anchor()).is_ok());
        assert!(proof.entry().unwrap_err().is_not_found());
    }

    // =============================================================================
    // WIRE
    // =============================================================================

    #[test]
    fn test_wire_round_trip_verifies_identically() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 3);
        let anchor = chain.anchor();
        let config = ProofVerifierConfig::default();

        for key in [&b"alice"[..], b"dave", b"mallory"] {
            let proof = chain.proof(&trie, key);
            let decoded = Proof::from_bytes(&proof.to_bytes().unwrap(), &config).unwrap();
            let verifier = BlsRosterVerifier::new();
            assert_eq!(
                decoded.evaluate(&anchor, &verifier),
                proof.evaluate(&anchor, &verifier)
            );
            assert_eq!(decoded.values().ok(), proof.values().ok());
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Balance {
        owner: String,
        amount: u64,
    }

    #[test]
    fn test_verify_and_decode() {
        let balance = Balance {
            owner: "alice".into(),
            amount: 100,
        };
        let encoded = bincode::serialize(&balance).unwrap();
        let mut trie = ReferenceTrie::new();
        trie.insert(b"balance:alice", &[encoded.as_slice(), b"coin", b"darc:admin"]);
        let chain = chain_to(trie.root(), 1);
        let proof = chain.proof(&trie, b"balance:alice");

        let decoded: Balance = proof.verify_and_decode("coin", &chain.anchor()).unwrap();
        assert_eq!(decoded, balance);
        assert!(matches!(
            proof.verify_and_decode::<Balance>("token", &chain.anchor()),
            Err(ProofError::MalformedProof(_))
        ));
    }

    // =============================================================================
    // ROSTER ROTATION
    // =============================================================================

    #[test]
    fn test_roster_rotation_chain() {
        let trie = alice_trie();
        let mut chain = TestChain::genesis(keypairs(1, 4));
        chain
            .append([1; 32])
            .append_rotating([2; 32], keypairs(20, 7))
            .append([3; 32])
            .append_rotating(trie.root(), keypairs(40, 3));
        let proof = chain.proof(&trie, b"carol");

        assert_eq!(proof.verify(&chain.anchor()), Ok(()));
        assert_eq!(proof.contract_id().unwrap(), "token");
    }

    #[test]
    fn test_intermediate_anchor() {
        let trie = alice_trie();
        let mut chain = TestChain::genesis(keypairs(1, 4));
        chain
            .append([1; 32])
            .append_rotating([2; 32], keypairs(20, 4))
            .append(trie.root());

        // Anchoring at block 2 only needs the last link
        let anchor = AnchorBlock::from_header(&chain.headers[2]);
        let proof = Proof::new(
            trie.prove(b"bob"),
            chain.latest().clone(),
            chain.links[2..].to_vec(),
        );
        assert!(proof.verify(&anchor).is_ok());

        // The full chain does not start at that anchor
        assert!(matches!(
            chain.proof(&trie, b"bob").verify(&anchor),
            Err(ProofError::ChainVerification(_))
        ));
    }

    #[test]
    fn test_self_anchored_proof() {
        let trie = alice_trie();
        let mut chain = TestChain::genesis(keypairs(1, 4));
        chain.append(trie.root());
        let anchor = AnchorBlock::from_header(chain.latest());
        let proof = Proof::new(trie.prove(b"alice"), chain.latest().clone(), Vec::new());
        assert_eq!(
            proof.evaluate(&anchor, &BlsRosterVerifier::new()),
            ProofState::Accepted
        );
    }

    // =============================================================================
    // SERVICE
    // =============================================================================

    #[test]
    fn test_service_outcomes() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 2);
        let anchor = chain.anchor();
        let service = ProofVerifierService::new(ProofVerifierConfig::for_testing());

        let present = chain.proof(&trie, b"alice").to_bytes().unwrap();
        match service.verify_bytes(&present, &anchor).unwrap() {
            ProofOutcome::Present(instance) => assert_eq!(instance.contract_id, "coin"),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(service.cached_chains(), 1);

        let absent = chain.proof(&trie, b"mallory").to_bytes().unwrap();
        assert_eq!(
            service.verify_bytes(&absent, &anchor).unwrap(),
            ProofOutcome::Absent {
                key: b"mallory".to_vec()
            }
        );
        assert!(service.get_instance(&absent, &anchor).unwrap_err().is_not_found());
        assert!(service.is_contract_instance(&present, "coin", &anchor));
        assert_eq!(service.cached_chains(), 1);
    }

    #[test]
    fn test_service_cache_does_not_bypass_root_check() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 1);
        let anchor = chain.anchor();
        let service = ProofVerifierService::new(ProofVerifierConfig::for_testing());
        service
            .verify_bytes(&chain.proof(&trie, b"alice").to_bytes().unwrap(), &anchor)
            .unwrap();

        // Same chain, but a path from a different trie
        let mut other = alice_trie();
        other.insert(b"alice", &[b"1000000", b"coin", b"darc:admin"]);
        let forged = Proof::new(
            other.prove(b"alice"),
            chain.latest().clone(),
            chain.links.clone(),
        );
        assert!(matches!(
            service.verify_bytes(&forged.to_bytes().unwrap(), &anchor),
            Err(ProofError::RootMismatch { .. })
        ));
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[test]
    fn test_concurrent_verification() {
        let trie = alice_trie();
        let chain = chain_to(trie.root(), 2);
        let anchor = chain.anchor();
        let proof = chain.proof(&trie, b"bob");
        let service = ProofVerifierService::new(ProofVerifierConfig::for_testing());
        let bytes = proof.to_bytes().unwrap();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    assert!(proof.verify(&anchor).is_ok());
                    assert!(service.verify_bytes(&bytes, &anchor).is_ok());
                });
            }
        });
        assert_eq!(service.cached_chains(), 1);
    }
}
