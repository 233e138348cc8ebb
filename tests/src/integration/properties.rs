//! # Property Tests
//!
//! Inclusion, exclusion and tamper properties over random tries.
//! Signatures come from the mock verifier so each case stays cheap; the
//! BLS path is covered by the flow tests.

#[cfg(test)]
mod tests {
    use ledger_proof::{
        Membership, MockSignatureVerifier, Proof, ProofError, ProofState, TrieNode,
    };
    use proptest::collection::{btree_set, vec};
    use proptest::prelude::*;

    use crate::fixtures::{chain_to, ReferenceTrie};

    fn key_set() -> impl Strategy<Value = Vec<Vec<u8>>> {
        btree_set(vec(any::<u8>(), 0..12), 1..32).prop_map(|s| s.into_iter().collect())
    }

    fn trie_of(keys: &[Vec<u8>]) -> ReferenceTrie {
        let mut trie = ReferenceTrie::new();
        for (i, key) in keys.iter().enumerate() {
            let value = (i as u64).to_le_bytes();
            trie.insert(key, &[&value, b"coin", b"darc"]);
        }
        trie
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_inserted_keys_prove_inclusion(keys in key_set(), pick in any::<prop::sample::Index>()) {
            let trie = trie_of(&keys);
            let chain = chain_to(trie.root(), 1);
            let key = pick.get(&keys);
            let proof = chain.proof(&trie, key);

            prop_assert_eq!(
                proof.evaluate(&chain.anchor(), &MockSignatureVerifier::accepting()),
                ProofState::Accepted
            );
            prop_assert!(proof.matches(key));
            prop_assert!(proof.is_ledger_instance_proof());
            prop_assert_eq!(proof.contract_id().unwrap(), "coin");
        }

        #[test]
        fn prop_missing_keys_prove_exclusion(keys in key_set(), query in vec(any::<u8>(), 0..12)) {
            let trie = trie_of(&keys);
            prop_assume!(!trie.contains(&query));
            let chain = chain_to(trie.root(), 1);
            let proof = chain.proof(&trie, &query);

            prop_assert!(proof
                .verify_with(&chain.anchor(), &MockSignatureVerifier::accepting())
                .is_ok());
            prop_assert!(!proof.matches(&query));
            prop_assert_eq!(proof.membership().unwrap(), Membership::Absent);
        }

        #[test]
        fn prop_tampered_step_hash_rejected(
            keys in key_set(),
            pick in any::<prop::sample::Index>(),
            step in any::<prop::sample::Index>(),
            byte in 0usize..32,
            flip in 1u8..=255,
        ) {
            let trie = trie_of(&keys);
            let chain = chain_to(trie.root(), 1);
            let mut path = trie.prove(pick.get::<Vec<u8>>(&keys));

            // Flip one byte of some interior child digest, if the path has one
            let interiors: Vec<(usize, bool)> = path
                .steps
                .iter()
                .enumerate()
                .flat_map(|(d, s)| {
                    [(d, true, &s.left), (d, false, &s.right)]
                        .into_iter()
                        .filter(|(_, _, n)| matches!(n, TrieNode::Interior { .. }))
                        .map(|(d, left, _)| (d, left))
                })
                .collect();
            prop_assume!(!interiors.is_empty());
            let (d, left) = *step.get(&interiors);
            let node = if left { &mut path.steps[d].left } else { &mut path.steps[d].right };
            if let TrieNode::Interior { left, .. } = node {
                left[byte] ^= flip;
            }

            let proof = Proof::new(path, chain.latest().clone(), chain.links.clone());
            let result = proof.verify_with(&chain.anchor(), &MockSignatureVerifier::accepting());
            prop_assert!(
                matches!(result, Err(ProofError::RootMismatch { .. })),
                "unexpected result {:?}",
                result
            );
        }
    }
}
