use ledger_core::{
    find_proof, is_valid_proof, validate_chain, Block, Difficulty, Ledger, LedgerConfig,
    LedgerError, Transaction,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn easy_config() -> LedgerConfig {
    LedgerConfig::default().with_difficulty(Difficulty::new(2).expect("valid difficulty"))
}

#[test]
fn test_submit_prove_seal_flow() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    assert_eq!(ledger.submit_transaction(Transaction::new("alice", "bob", 10.0)), 2);
    assert_eq!(ledger.submit_transaction(Transaction::new("bob", "carol", 5.0)), 2);

    let genesis = ledger.last_block().clone();
    let proof = find_proof(genesis.proof_of_work, &Ledger::hash(&genesis), ledger.difficulty());
    assert!(is_valid_proof(
        proof,
        genesis.proof_of_work,
        &Ledger::hash(&genesis),
        ledger.difficulty()
    ));

    let sealed = ledger.seal(proof, None)?.clone();
    assert_eq!(ledger.chain().len(), 2);
    assert_eq!(
        sealed.transactions,
        vec![
            Transaction::new("alice", "bob", 10.0),
            Transaction::new("bob", "carol", 5.0),
        ]
    );
    assert_eq!(sealed.prev_block_hash, Ledger::hash(&ledger.chain()[0]));
    assert!(ledger.pool().is_empty());
    Ok(())
}

#[test]
fn test_random_operation_sequences_keep_invariants() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut ledger = Ledger::with_config(easy_config());

    for step in 0..60 {
        if rng.gen_bool(0.7) {
            let amount: f64 = rng.gen_range(-100.0..100.0);
            let position = ledger.submit_transaction(Transaction::new(
                format!("sender-{step}"),
                format!("recipient-{}", rng.gen_range(0..10)),
                amount,
            ));
            assert_eq!(position, ledger.chain().len() as u64 + 1);
        } else {
            let pending = ledger.pool().pending().to_vec();
            let block = ledger.mine()?;
            assert_eq!(block.transactions, pending);
        }
        validate_chain(ledger.chain(), ledger.difficulty())?;
    }
    Ok(())
}

#[test]
fn test_failed_seal_leaves_ledger_untouched() -> anyhow::Result<()> {
    let mut ledger = Ledger::with_config(easy_config());
    ledger.submit_transaction(Transaction::new("alice", "bob", 1.0));
    ledger.mine()?;
    ledger.submit_transaction(Transaction::new("bob", "carol", 2.0));

    let before_chain = ledger.chain().to_vec();
    let before_pool = ledger.pool().clone();

    let last = ledger.last_block().clone();
    let bad_proof = (0u64..)
        .find(|p| !is_valid_proof(*p, last.proof_of_work, &last.hash(), ledger.difficulty()))
        .expect("some proof is invalid at difficulty 2");
    assert!(matches!(
        ledger.seal(bad_proof, None),
        Err(LedgerError::InvalidProof { index: 3, .. })
    ));

    let good_proof = ledger.next_proof();
    assert!(matches!(
        ledger.seal(good_proof, Some(ledger.chain()[0].hash())),
        Err(LedgerError::StructuralViolation { index: 3, .. })
    ));

    assert_eq!(ledger.chain(), before_chain.as_slice());
    assert_eq!(ledger.pool(), &before_pool);

    ledger.seal(good_proof, Some(last.hash()))?;
    assert_eq!(ledger.chain().len(), 3);
    Ok(())
}

#[test]
fn test_exported_chain_round_trip() -> anyhow::Result<()> {
    let mut ledger = Ledger::with_config(easy_config().with_parallel(true));
    for i in 0..4 {
        ledger.submit_transaction(Transaction::new("alice", format!("bob-{i}"), f64::from(i)));
        ledger.mine()?;
    }

    let json = serde_json::to_string_pretty(ledger.chain())?;
    let blocks: Vec<Block> = serde_json::from_str(&json)?;
    for (original, parsed) in ledger.chain().iter().zip(&blocks) {
        assert_eq!(Ledger::hash(original), Ledger::hash(parsed));
    }

    let restored = Ledger::from_blocks(blocks, easy_config())?;
    assert_eq!(restored.last_block().hash(), ledger.last_block().hash());
    Ok(())
}

#[test]
fn test_chain_mined_at_easy_difficulty_fails_strict_validation() -> anyhow::Result<()> {
    // sha256(genesis_hash ++ "0" ++ "13") = 0577..., one leading zero.
    let genesis = Block::genesis(1_600_000_000_000);
    let easy = Difficulty::new(1)?;
    let proof = find_proof(genesis.proof_of_work, &genesis.hash(), easy);
    assert_eq!(proof, 13);

    let block = Block {
        index: 2,
        timestamp: 1_600_000_001_000,
        transactions: vec![Transaction::new("alice", "bob", 10.0)],
        proof_of_work: proof,
        prev_block_hash: genesis.hash(),
    };
    let blocks = vec![genesis, block];
    validate_chain(&blocks, easy)?;

    for strict in [2, 6] {
        assert_eq!(
            validate_chain(&blocks, Difficulty::new(strict)?),
            Err(LedgerError::InvalidProof { index: 2, proof: 13 })
        );
    }
    Ok(())
}

#[test]
fn test_non_finite_amounts_survive_export() -> anyhow::Result<()> {
    let mut ledger = Ledger::with_config(easy_config());
    ledger.submit_transaction(Transaction::new("alice", "bob", f64::INFINITY));
    ledger.submit_transaction(Transaction::new("bob", "carol", f64::NAN));
    ledger.submit_transaction(Transaction::new("carol", "dave", f64::NEG_INFINITY));
    ledger.mine()?;
    ledger.mine()?;

    let json = serde_json::to_string(ledger.chain())?;
    let blocks: Vec<Block> = serde_json::from_str(&json)?;
    assert_eq!(blocks[1].transactions[0].amount, f64::INFINITY);
    assert!(blocks[1].transactions[1].amount.is_nan());
    assert_eq!(blocks[1].transactions[2].amount, f64::NEG_INFINITY);

    let restored = Ledger::from_blocks(blocks, easy_config())?;
    assert_eq!(restored.last_block().hash(), ledger.last_block().hash());
    Ok(())
}

#[test]
fn test_swapping_nan_for_infinity_is_detected() -> anyhow::Result<()> {
    let mut ledger = Ledger::with_config(easy_config());
    ledger.submit_transaction(Transaction::new("alice", "bob", f64::NAN));
    ledger.mine()?;
    ledger.mine()?;

    let mut blocks = ledger.chain().to_vec();
    blocks[1].transactions[0].amount = f64::INFINITY;
    assert!(matches!(
        validate_chain(&blocks, ledger.difficulty()),
        Err(LedgerError::StructuralViolation { index: 3, .. })
    ));
    Ok(())
}
