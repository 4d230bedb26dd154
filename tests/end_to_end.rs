//! Exercises the full pipeline end to end: generate params, encrypt a batch
//! of plaintexts, combine them homomorphically, solve, and prove/verify a
//! range proof over the originals — crossing every module boundary in one
//! pass rather than one module at a time.

use num_bigint::BigUint;

use lhtlp::homomorphic::add_plaintext_values;
use lhtlp::proofs::{prove, verify, PuzzleValues};
use lhtlp::{generate_params, generate_puzzle_and_return_nonce, solve_puzzle};

fn set_up_logs() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn homomorphic_sum_round_trips_through_solve() {
    set_up_logs();

    let params = generate_params(128, 2, 1).unwrap();
    let values: Vec<u64> = vec![7, 13, 21, 5];

    let puzzles: Vec<_> = values
        .iter()
        .map(|v| {
            let (puzzle, _) = generate_puzzle_and_return_nonce(&params, &BigUint::from(*v)).unwrap();
            puzzle
        })
        .collect();

    let combined = add_plaintext_values(&params, &puzzles);
    let solved = solve_puzzle(&params, &combined);

    assert_eq!(solved, BigUint::from(values.iter().sum::<u64>()));
}

#[test]
fn range_proof_accepts_a_batch_within_bounds_and_rejects_one_outside() {
    set_up_logs();

    let params = generate_params(128, 2, 1).unwrap();
    let q = BigUint::from(1_000u32);
    let bits = 64;

    let in_range: Vec<i64> = vec![0, 250, 500, 1_000];
    let (puzzles, witnesses): (Vec<_>, Vec<_>) = in_range
        .iter()
        .map(|&m| {
            let plaintext = BigUint::from(m as u64);
            let (puzzle, nonce) = generate_puzzle_and_return_nonce(&params, &plaintext).unwrap();
            let witness = PuzzleValues::new(plaintext.into(), nonce.into());
            (puzzle, witness)
        })
        .unzip();

    let proof = prove(bits, &params, &puzzles, &q, &witnesses).unwrap();
    assert!(verify(&proof, bits, &params, &puzzles, &q).unwrap());

    // Swap one witness's plaintext for something far outside [0, q]; the
    // puzzle itself is left untouched so the proof must be the thing that
    // catches the discrepancy.
    let mut tampered_witnesses = witnesses;
    tampered_witnesses[0] = PuzzleValues::new((-5_000).into(), tampered_witnesses[0].r.clone());

    let bad_proof = prove(bits, &params, &puzzles, &q, &tampered_witnesses).unwrap();
    assert!(!verify(&bad_proof, bits, &params, &puzzles, &q).unwrap());
}
