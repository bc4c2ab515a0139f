use super::{Block, ProofOfWork, hasher};

/// Walk `chain` front to back checking hash linkage and proof-of-work
/// for every adjacent pair. Chains of zero or one block are valid.
pub fn is_valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    chain.windows(2).all(|pair| {
        let (prev, curr) = (&pair[0], &pair[1]);
        curr.previous_hash == hasher::digest(prev)
            && pow.valid(prev.proof, curr.proof, &curr.previous_hash)
    })
}

#[cfg(test)]
mod tests {
    use super::is_valid_chain;
    use crate::blockchain::test_support::mined_chain;
    use crate::blockchain::{Block, ProofOfWork};
    use crate::transaction::Transaction;

    #[test]
    fn short_chains_are_vacuously_valid() {
        let pow = ProofOfWork::new(2);
        assert!(is_valid_chain(&[], &pow));
        assert!(is_valid_chain(&[Block::genesis()], &pow));
    }

    #[test]
    fn freshly_sealed_chains_are_valid() {
        let pow = ProofOfWork::new(2);
        for len in 2..=4 {
            let chain = mined_chain("node1", len, len as u64);
            assert_eq!(chain.len(), len);
            assert!(is_valid_chain(&chain, &pow), "len={len}");
        }
    }

    #[test]
    fn tampered_proof_is_rejected() {
        let pow = ProofOfWork::new(2);
        let mut chain = mined_chain("node1", 3, 1);
        chain[2].proof = chain[2].proof.wrapping_add(1);
        // a +1 proof could still pass by chance; search for one that fails
        while pow.valid(chain[1].proof, chain[2].proof, &chain[2].previous_hash) {
            chain[2].proof = chain[2].proof.wrapping_add(1);
        }
        assert!(!is_valid_chain(&chain, &pow));
    }

    #[test]
    fn tampered_previous_hash_is_rejected() {
        let pow = ProofOfWork::new(2);
        let mut chain = mined_chain("node1", 3, 2);
        chain[2].previous_hash = "0".repeat(64);
        assert!(!is_valid_chain(&chain, &pow));
    }

    #[test]
    fn tampered_prior_block_content_is_rejected() {
        let pow = ProofOfWork::new(2);
        let mut chain = mined_chain("node1", 3, 3);
        chain[1].transactions.push(Transaction::new("mallory", "mallory", 1_000));
        assert!(!is_valid_chain(&chain, &pow));
    }

    #[test]
    fn validation_uses_the_given_hardness() {
        let chain = mined_chain("node1", 3, 4);
        // mined at hardness 2; these proofs do not reach hardness 8
        assert!(!is_valid_chain(&chain, &ProofOfWork::new(8)));
        assert!(is_valid_chain(&chain, &ProofOfWork::new(0)));
    }
}
