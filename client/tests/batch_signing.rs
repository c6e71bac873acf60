//! Batch signing through the public API: validation, sequencing, the
//! integrity proof and the fixed precondition messages.

mod common;

use common::{
    offer_cancel, offer_create, payment, secret, CountingSigner, ADDR, FAKE_ADDRESS, FAKE_SECRET,
};

use txpool_client::{
    get_address_public_key, sign_batch, sign_raw_batch, validate_tx_list_values, Ed25519Signer,
    ErrorKind, HashAlgorithm, SigningCapability, TransactionRecord,
};

// ---------------------------------------------------------------------------
// Single OfferCancel
// ---------------------------------------------------------------------------

#[test]
fn offer_cancel_signs_under_reserved_sequence() {
    let signer = Ed25519Signer::default();
    let payload = sign_raw_batch(&signer, &[offer_cancel(22976)], &[123], &secret()).unwrap();

    let signed = payload.signed_transactions().unwrap();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].tx_seq, 123);
    assert!(!signed[0].tx_sign.is_empty());
    assert_eq!(signed[0].tx_hash.len(), 64);
}

#[test]
fn signed_blob_carries_sequence_and_signer() {
    let signer = Ed25519Signer::default();
    let account = get_address_public_key(&signer, &secret()).unwrap();
    let payload = sign_raw_batch(&signer, &[offer_cancel(22976)], &[123], &secret()).unwrap();
    let signed = payload.signed_transactions().unwrap();

    let blob = hex::decode(&signed[0].tx_sign).unwrap();
    let tx: serde_json::Value = serde_json::from_slice(&blob).unwrap();
    assert_eq!(tx["Sequence"], 123);
    assert_eq!(tx["OfferSequence"], 22976);
    assert_eq!(tx["SigningPubKey"], account.public_key.as_str());
    assert!(tx["TxnSignature"].is_string());
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

#[test]
fn sequence_count_mismatch_is_rejected() {
    let signer = Ed25519Signer::default();
    let err = sign_raw_batch(&signer, &[offer_cancel(22976)], &[123, 124], &secret()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(
        err.to_string(),
        "invalid input: Seqs quantity is not equal to tx quantity"
    );
}

#[test]
fn one_incomplete_record_rejects_the_batch() {
    let signer = Ed25519Signer::default();
    let mut broken = offer_create();
    broken.as_object_mut().unwrap().remove("TakerPays");

    let err = sign_raw_batch(
        &signer,
        &[offer_cancel(1), broken, payment()],
        &[1, 2, 3],
        &secret(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "invalid input: TxList is invalid");
}

#[test]
fn unknown_transaction_type_rejects_the_batch() {
    let signer = Ed25519Signer::default();
    let mut trust = payment();
    trust["TransactionType"] = "TrustSet".into();
    assert!(validate_tx_list_values(&signer, &[payment(), trust]).is_err());
}

#[test]
fn bad_secret_is_rejected_after_shape_checks() {
    let signer = Ed25519Signer::default();
    for bad in ["", ADDR, "shhh"] {
        let err = sign_raw_batch(&signer, &[offer_cancel(1)], &[1], bad).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: Secret is invalid");
    }
}

#[test]
fn failed_preconditions_touch_no_key_material() {
    let signer = CountingSigner::default();
    let mut broken = payment();
    broken.as_object_mut().unwrap().remove("Destination");

    let cases = [
        sign_raw_batch(&signer, &[offer_cancel(1)], &[1, 2], FAKE_SECRET),
        sign_raw_batch(&signer, &[offer_cancel(1), payment()], &[1], FAKE_SECRET),
        sign_raw_batch(&signer, &[offer_cancel(1)], &[], FAKE_SECRET),
        sign_raw_batch(&signer, &[offer_cancel(1), broken], &[1, 2], FAKE_SECRET),
        sign_raw_batch(&signer, &[], &[1], FAKE_SECRET),
        sign_raw_batch(&signer, &[offer_cancel(1)], &[1], "wrong"),
    ];
    for result in cases {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
    }
    assert_eq!(signer.total_key_calls(), 0);
}

#[test]
fn fake_signer_sees_each_record_once_in_order() {
    let signer = CountingSigner::default();
    let raw = vec![offer_cancel(1), payment(), offer_cancel(2)];
    let payload = sign_raw_batch(&signer, &raw, &[12, 10, 11], FAKE_SECRET).unwrap();

    assert_eq!(signer.derive_calls(), 1);
    assert_eq!(signer.sign_tx_calls(), 3);
    assert_eq!(signer.sign_calls(), 1);

    let signed = payload.signed_transactions().unwrap();
    let blobs: Vec<_> = signed.iter().map(|s| s.tx_sign.as_str()).collect();
    assert_eq!(blobs, vec!["OfferCancel@12", "Payment@10", "OfferCancel@11"]);
    for (tx, expected_seq) in signed.iter().zip([12, 10, 11]) {
        assert_eq!(tx.tx_seq, expected_seq);
        assert_eq!(tx.tx_addr, FAKE_ADDRESS);
        assert_eq!(tx.tx_hash, format!("H{}", expected_seq));
    }

    let integrity = signer.hash(&payload.serialized_batch);
    assert_eq!(
        payload.integrity_hash_signature,
        format!("SIG{}", hex::encode(integrity.as_bytes()))
    );
}

#[test]
fn typed_batch_with_fake_signer_leaves_input_alone() {
    let signer = CountingSigner::default();
    let records = validate_tx_list_values(&signer, &[payment(), offer_cancel(3)]).unwrap();
    let before = records.clone();
    sign_batch(&signer, &records, &[2, 1], FAKE_SECRET).unwrap();
    assert_eq!(records, before);
}

// ---------------------------------------------------------------------------
// Determinism and integrity
// ---------------------------------------------------------------------------

#[test]
fn heterogeneous_batch_keeps_input_order() {
    let signer = Ed25519Signer::default();
    let raw = vec![payment(), offer_create(), offer_cancel(500)];
    let records = validate_tx_list_values(&signer, &raw).unwrap();
    assert!(matches!(records[0], TransactionRecord::Payment(_)));
    assert!(matches!(records[2], TransactionRecord::OfferCancel(_)));

    let payload = sign_raw_batch(&signer, &raw, &[502, 500, 501], &secret()).unwrap();
    let seqs: Vec<_> = payload
        .signed_transactions()
        .unwrap()
        .into_iter()
        .map(|s| s.tx_seq)
        .collect();
    assert_eq!(seqs, vec![502, 500, 501]);
}

#[test]
fn same_inputs_same_payload() {
    let signer = Ed25519Signer::default();
    let raw = vec![offer_create(), payment()];
    let a = sign_raw_batch(&signer, &raw, &[7, 8], &secret()).unwrap();
    let b = sign_raw_batch(&signer, &raw, &[7, 8], &secret()).unwrap();
    assert_eq!(a.serialized_batch, b.serialized_batch);
    assert_eq!(a.integrity_hash_signature, b.integrity_hash_signature);
    assert_eq!(
        signer.hash(&a.serialized_batch),
        signer.hash(&b.serialized_batch)
    );
}

#[test]
fn integrity_signature_verifies_under_each_algorithm() {
    for alg in [HashAlgorithm::Sm3, HashAlgorithm::Sha256, HashAlgorithm::Blake3] {
        let signer = Ed25519Signer::new(alg);
        let account = get_address_public_key(&signer, &secret()).unwrap();
        let payload = sign_raw_batch(&signer, &[payment()], &[1], &secret()).unwrap();

        let digest = alg.digest_hex(payload.serialized_batch.as_bytes());
        assert!(signer.verify(
            &hex::encode(digest.as_bytes()),
            &payload.integrity_hash_signature,
            &account.public_key,
        ));
    }
}

#[test]
fn account_identity_is_stable() {
    let signer = Ed25519Signer::default();
    let first = get_address_public_key(&signer, &secret()).unwrap();
    for _ in 0..3 {
        assert_eq!(get_address_public_key(&signer, &secret()).unwrap(), first);
    }
    assert!(signer.verify(
        &hex::encode(first.address.as_bytes()),
        &first.signed_address,
        &first.public_key,
    ));
}
