use std::str::FromStr;
use xdr_variant::types::*;
use xdr_variant::{
    BoundedBytes, BoundedVec, Error, XdrUnion, from_base64, from_bytes, to_base64, to_bytes,
};

fn account(byte: u8) -> AccountId {
    PublicKey::from_ed25519([byte; 32])
}

// ── assets ─────────────────────────────────────────────────────────────────

#[test]
fn test_native_asset() {
    let native = Asset::native();
    assert_eq!(native.asset_type(), AssetType::Native);
    assert_eq!(native.code(), None);
    assert_eq!(native.issuer(), None);
    assert_eq!(native.to_canonical_string(), "native");
    assert_eq!(native.to_string(), "native");
    assert_eq!(to_bytes(&native).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn test_credit_asset_width_follows_code() {
    let usd = Asset::credit("USD", account(0xAB)).unwrap();
    assert_eq!(usd.asset_type(), AssetType::CreditAlphanum4);
    assert_eq!(usd.arm(), AssetArm::AlphaNum4);
    assert_eq!(usd.code().as_deref(), Some("USD"));
    assert_eq!(usd.issuer(), Some(&account(0xAB)));
    // type + code[4] + key type + key
    assert_eq!(to_bytes(&usd).unwrap().len(), 4 + 4 + 4 + 32);

    let long = Asset::credit("EURT2024", account(1)).unwrap();
    assert_eq!(long.asset_type(), AssetType::CreditAlphanum12);
    assert_eq!(long.must_alpha_num12().asset_code.0[..8], *b"EURT2024");
    assert_eq!(long.code().as_deref(), Some("EURT2024"));
    assert_eq!(to_bytes(&long).unwrap().len(), 4 + 12 + 4 + 32);
    assert_eq!(from_bytes::<Asset>(&to_bytes(&long).unwrap()).unwrap(), long);
}

const ZERO_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
const AB_ADDRESS: &str = "GCV2XK5LVOV2XK5LVOV2XK5LVOV2XK5LVOV2XK5LVOV2XK5LVOV2WIHP";

#[test]
fn test_account_addresses() {
    assert_eq!(account(0).to_string(), ZERO_ADDRESS);
    assert_eq!(account(0xAB).to_address(), AB_ADDRESS);
    assert_eq!(PublicKey::from_address(AB_ADDRESS).unwrap(), account(0xAB));
    assert_eq!(ZERO_ADDRESS.parse::<AccountId>().unwrap(), account(0));

    // Last character changed, so the checksum no longer matches.
    let corrupt = ZERO_ADDRESS.replace("WHF", "WHG");
    assert_eq!(
        PublicKey::from_address(&corrupt).unwrap_err(),
        Error::InvalidAddress(corrupt.clone())
    );
    assert!(PublicKey::from_address("ab".repeat(32).as_str()).is_err());
}

#[test]
fn test_asset_strings() {
    let usd = Asset::credit("USD", account(0xAB)).unwrap();
    assert_eq!(usd.to_canonical_string(), format!("USD:{AB_ADDRESS}"));
    assert_eq!(usd.to_string(), format!("credit_alphanum4/USD/{AB_ADDRESS}"));
    assert_eq!(usd.to_canonical_string().parse::<Asset>().unwrap(), usd);
}

#[test]
fn test_build_asset() {
    assert_eq!(Asset::build("native", "", "").unwrap(), Asset::native());
    assert_eq!(
        Asset::build("credit_alphanum4", AB_ADDRESS, "USD").unwrap(),
        Asset::credit("USD", account(0xAB)).unwrap()
    );
    // Width follows the code.
    let wide = Asset::build("credit_alphanum4", ZERO_ADDRESS, "EURT2024").unwrap();
    assert_eq!(wide.asset_type(), AssetType::CreditAlphanum12);

    assert_eq!(
        Asset::build("credit", ZERO_ADDRESS, "USD").unwrap_err(),
        Error::InvalidAsset("credit".to_owned())
    );
    assert_eq!(
        Asset::build("liquidity_pool_shares", ZERO_ADDRESS, "USD").unwrap_err(),
        Error::InvalidAsset("liquidity_pool_shares".to_owned())
    );
    assert_eq!(
        Asset::build("credit_alphanum4", "GBAD", "USD").unwrap_err(),
        Error::InvalidAddress("GBAD".to_owned())
    );
    assert_eq!(
        Asset::build("credit_alphanum12", ZERO_ADDRESS, "TOOLONGCODE13").unwrap_err(),
        Error::InvalidAssetCode("TOOLONGCODE13".to_owned())
    );
}

#[test]
fn test_build_assets_list() {
    assert!(Asset::build_assets("").unwrap().is_empty());

    let list = format!("native,USD:{AB_ADDRESS},NATIVE,EURT2024:{ZERO_ADDRESS}");
    let assets = Asset::build_assets(&list).unwrap();
    assert_eq!(
        assets,
        [
            Asset::native(),
            Asset::credit("USD", account(0xAB)).unwrap(),
            Asset::native(),
            Asset::credit("EURT2024", account(0)).unwrap(),
        ]
    );

    for bad in [
        format!("USD:{AB_ADDRESS}:extra"),
        "USD".to_owned(),
        format!("US-D:{AB_ADDRESS}"),
        "USD:GBAD".to_owned(),
        format!(":{AB_ADDRESS}"),
    ] {
        let list = format!("native,{bad}");
        assert_eq!(Asset::build_assets(&list).unwrap_err(), Error::InvalidAsset(bad));
    }
}

#[test]
fn test_asset_ordering() {
    let native = Asset::native();
    let usd_ab = Asset::credit("USD", account(0xAB)).unwrap();
    let usd_zero = Asset::credit("USD", account(0)).unwrap();
    let us = Asset::credit("US", account(0xAB)).unwrap();
    let eur = Asset::credit("EUR", account(0xAB)).unwrap();
    let long = Asset::credit("AAAAA", account(0)).unwrap();

    // Type, then code, then issuer address.
    assert!(native < eur);
    assert!(eur < us);
    assert!(us < usd_zero);
    assert!(usd_zero < usd_ab);
    assert!(usd_ab < long);

    let mut sorted = vec![long.clone(), usd_ab.clone(), native.clone(), us.clone(), eur.clone()];
    sorted.sort();
    assert_eq!(sorted, [native, eur, us, usd_ab.clone(), long]);
    assert_eq!(usd_ab.cmp(&usd_ab.clone()), std::cmp::Ordering::Equal);
}

#[test]
fn test_asset_code_parsing() {
    let four = AssetCode::from_str("XLM").unwrap();
    assert_eq!(four.asset_code4(), Some(&AssetCode4(*b"XLM\0")));
    assert_eq!(four.code(), "XLM");

    let twelve: AssetCode = "ABCDEFGHIJKL".parse().unwrap();
    assert_eq!(twelve.arm(), AssetCodeArm::AssetCode12);
    assert_eq!(twelve.code(), "ABCDEFGHIJKL");

    for bad in ["", "ABCDEFGHIJKLM", "US-D", "ÜSD"] {
        assert_eq!(
            bad.parse::<AssetCode>().unwrap_err(),
            Error::InvalidAssetCode(bad.to_owned())
        );
    }
    assert_eq!(
        Asset::credit("", account(1)).unwrap_err(),
        Error::InvalidAssetCode(String::new())
    );
}

#[test]
fn test_asset_type_names() {
    for t in AssetType::VARIANTS {
        assert_eq!(t.as_str().parse::<AssetType>().unwrap(), *t);
    }
    assert_eq!(
        "liquidity_pool_shares".parse::<AssetType>().unwrap(),
        AssetType::PoolShare
    );
    assert!("credit".parse::<AssetType>().is_err());
}

#[test]
fn test_trust_line_asset_from_asset() {
    let usd = Asset::credit("USD", account(2)).unwrap();
    let tl = usd.to_trust_line_asset();
    assert_eq!(tl.discriminant(), AssetType::CreditAlphanum4);
    assert_eq!(tl.alpha_num4(), usd.alpha_num4());
    // Same wire layout for the shared arms.
    assert_eq!(to_bytes(&tl).unwrap(), to_bytes(&usd).unwrap());

    let pool = TrustLineAsset::PoolShare(PoolId([9; 32]));
    assert_eq!(pool.liquidity_pool_id(), Some(&PoolId([9; 32])));
    assert_eq!(Asset::resolve_arm(AssetType::PoolShare.value()), None);
    assert_eq!(
        from_bytes::<Asset>(&to_bytes(&pool).unwrap()).unwrap_err(),
        Error::UnknownDiscriminant(3)
    );
}

// ── memos ──────────────────────────────────────────────────────────────────

#[test]
fn test_memo_constructors() {
    assert_eq!(Memo::default(), Memo::None);
    assert_eq!(to_bytes(&Memo::default()).unwrap(), [0, 0, 0, 0]);

    let text = Memo::from_text("hi").unwrap();
    assert_eq!(text.arm(), MemoArm::Text);
    assert_eq!(to_bytes(&text).unwrap(), [0, 0, 0, 1, 0, 0, 0, 2, b'h', b'i', 0, 0]);

    let hash = Memo::from_hash(Hash([1; 32]));
    let ret = Memo::from_return_hash(Hash([1; 32]));
    assert_eq!(hash.hash(), Some(&Hash([1; 32])));
    assert_eq!(hash.ret_hash(), None);
    assert_eq!(ret.ret_hash(), Some(&Hash([1; 32])));
    assert_eq!(ret.discriminant(), MemoType::Return);

    let hash_bytes = to_bytes(&hash).unwrap();
    let ret_bytes = to_bytes(&ret).unwrap();
    assert_eq!(hash_bytes[4..], ret_bytes[4..]);
    assert_eq!(from_bytes::<Memo>(&ret_bytes).unwrap(), ret);
}

// ── enums ──────────────────────────────────────────────────────────────────

#[test]
fn test_enum_name_tables() {
    assert_eq!(MemoType::Return.name(), "Return");
    assert_eq!(MemoType::Text.to_string(), "Text");
    assert_eq!(MemoType::try_from(4i32).unwrap(), MemoType::Return);
    assert_eq!(MemoType::try_from(5i32).unwrap_err(), Error::UnknownDiscriminant(5));
    assert_eq!(MemoType::VARIANTS.len(), 5);

    assert_eq!(i32::from(CryptoKeyType::MuxedEd25519), 0x100);
    assert_eq!(BucketEntryType::Metaentry.value(), -1);
    assert_eq!(to_bytes(&EnvelopeType::TxFeeBump).unwrap(), [0, 0, 0, 5]);
    assert_eq!(
        from_bytes::<EnvelopeType>(&[0, 0, 0, 10]).unwrap_err(),
        Error::UnknownDiscriminant(10)
    );
}

// ── ledger ─────────────────────────────────────────────────────────────────

#[test]
fn test_ledger_key_helpers() {
    let acct = LedgerKey::for_account(account(3));
    assert_eq!(acct.entry_type(), LedgerEntryType::Account);
    assert_eq!(acct.must_account().account_id, account(3));

    let trust = LedgerKey::for_trustline(account(3), TrustLineAsset::Native);
    assert_eq!(trust.entry_type(), LedgerEntryType::Trustline);
    assert_eq!(trust.arm(), LedgerKeyArm::TrustLine);

    let offer = LedgerKey::for_offer(account(4), 77);
    assert_eq!(offer.offer().map(|o| o.offer_id), Some(77));

    let name: String64 = "config".parse().unwrap();
    let data = LedgerKey::for_data(account(5), name.clone());
    assert_eq!(data.data().map(|d| &d.data_name), Some(&name));

    let ttl = LedgerKey::for_ttl(Hash([6; 32]));
    assert_eq!(ttl.entry_type(), LedgerEntryType::Ttl);
    let bytes = to_bytes(&ttl).unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 9]);
    assert_eq!(from_bytes::<LedgerKey>(&bytes).unwrap(), ttl);
}

fn data_entry() -> DataEntry {
    DataEntry {
        account_id: account(7),
        data_name: "k".parse().unwrap(),
        data_value: BoundedBytes::try_from(vec![1, 2, 3]).unwrap(),
        ext: DataEntryExt::V0,
    }
}

#[test]
fn test_entry_to_key() {
    let entry = LedgerEntry {
        last_modified_ledger_seq: 12,
        data: LedgerEntryData::Data(data_entry()),
        ext: LedgerEntryExt::V0,
    };
    assert_eq!(
        entry.ledger_key(),
        LedgerKey::for_data(account(7), "k".parse().unwrap())
    );
    assert_eq!(entry.sponsor(), None);

    let round: LedgerEntry = from_bytes(&to_bytes(&entry).unwrap()).unwrap();
    assert_eq!(round, entry);
}

#[test]
fn test_sponsored_entry() {
    let entry = LedgerEntry {
        last_modified_ledger_seq: 1,
        data: LedgerEntryData::Data(data_entry()),
        ext: LedgerEntryExt::V1(LedgerEntryExtensionV1 {
            sponsoring_id: Some(account(8)),
            ext: ExtensionPoint::default(),
        }),
    };
    assert_eq!(entry.sponsor(), Some(&account(8)));
    assert_eq!(from_bytes::<LedgerEntry>(&to_bytes(&entry).unwrap()).unwrap(), entry);
}

#[test]
fn test_account_entry_round_trip() {
    let signer = Signer {
        key: SignerKey::Ed25519SignedPayload(SignerKeyEd25519SignedPayload {
            ed25519: Uint256([1; 32]),
            payload: BoundedBytes::try_from(vec![0xEE; 5]).unwrap(),
        }),
        weight: 1,
    };
    let entry = AccountEntry {
        account_id: account(1),
        balance: 10_000_000,
        seq_num: 42,
        num_sub_entries: 1,
        inflation_dest: None,
        flags: 0,
        home_domain: "example.org".parse().unwrap(),
        thresholds: Thresholds([1, 0, 0, 0]),
        signers: BoundedVec::try_from(vec![signer]).unwrap(),
        ext: AccountEntryExt::V0,
    };
    let data = LedgerEntryData::Account(entry);
    assert_eq!(data.ledger_key(), LedgerKey::for_account(account(1)));
    assert_eq!(from_bytes::<LedgerEntryData>(&to_bytes(&data).unwrap()).unwrap(), data);
}

// ── transactions ───────────────────────────────────────────────────────────

fn signature() -> DecoratedSignature {
    DecoratedSignature {
        hint: SignatureHint([1, 2, 3, 4]),
        signature: BoundedBytes::try_from(vec![9u8; 64]).unwrap(),
    }
}

fn v1_envelope() -> TransactionV1Envelope {
    let cond = Preconditions::V2(PreconditionsV2 {
        time_bounds: Some(TimeBounds { min_time: 1, max_time: 2 }),
        ledger_bounds: Some(LedgerBounds { min_ledger: 5, max_ledger: 0 }),
        min_seq_num: Some(10),
        min_seq_age: 30,
        min_seq_ledger_gap: 2,
        extra_signers: BoundedVec::try_from(vec![SignerKey::HashX(Uint256([3; 32]))]).unwrap(),
    });
    let op = Operation {
        source_account: None,
        body: OperationBody::BumpSequence(BumpSequenceOp { bump_to: 99 }),
    };
    TransactionV1Envelope {
        tx: Transaction {
            source_account: MuxedAccount::MuxedEd25519(MuxedAccountMed25519 {
                id: 42,
                ed25519: Uint256([7; 32]),
            }),
            fee: 100,
            seq_num: 12_345,
            cond,
            memo: Memo::from_text("hello").unwrap(),
            operations: BoundedVec::try_from(vec![op]).unwrap(),
            ext: TransactionExt::V0,
        },
        signatures: BoundedVec::try_from(vec![signature()]).unwrap(),
    }
}

fn v0_envelope() -> TransactionV0Envelope {
    TransactionV0Envelope {
        tx: TransactionV0 {
            source_account_ed25519: Uint256([5; 32]),
            fee: 200,
            seq_num: 7,
            time_bounds: Some(TimeBounds { min_time: 0, max_time: 60 }),
            memo: Memo::None,
            operations: BoundedVec::try_from(vec![Operation {
                source_account: None,
                body: OperationBody::Inflation,
            }])
            .unwrap(),
            ext: TransactionV0Ext::V0,
        },
        signatures: BoundedVec::new(),
    }
}

#[test]
fn test_v1_envelope_accessors() {
    let env = TransactionEnvelope::Tx(v1_envelope());
    assert!(!env.is_fee_bump());
    assert_eq!(env.fee_bump_account(), None);
    assert_eq!(env.fee_bump_fee(), None);
    assert_eq!(env.fee(), 100);
    assert_eq!(env.seq_num(), 12_345);
    assert_eq!(env.source_account().muxed_id(), Some(42));
    assert_eq!(env.source_account().to_account_id(), PublicKey::from_ed25519([7; 32]));
    assert_eq!(env.signatures().len(), 1);
    assert_eq!(env.time_bounds(), Some(TimeBounds { min_time: 1, max_time: 2 }));
    assert_eq!(env.ledger_bounds(), Some(LedgerBounds { min_ledger: 5, max_ledger: 0 }));
    assert_eq!(env.min_seq_num(), Some(10));
    assert_eq!(env.min_seq_age(), Some(30));
    assert_eq!(env.min_seq_ledger_gap(), Some(2));
    assert_eq!(env.extra_signers(), [SignerKey::HashX(Uint256([3; 32]))]);
    assert_eq!(env.operations().len(), 1);
    assert_eq!(env.memo().must_text().as_str(), "hello");
    assert_eq!(env.preconditions().arm(), PreconditionsArm::V2);
}

#[test]
fn test_v0_envelope_accessors() {
    let env = TransactionEnvelope::TxV0(v0_envelope());
    assert_eq!(env.source_account(), MuxedAccount::Ed25519(Uint256([5; 32])));
    assert_eq!(env.source_account().muxed_id(), None);
    assert_eq!(env.fee(), 200);
    assert_eq!(env.seq_num(), 7);
    assert!(env.signatures().is_empty());
    assert_eq!(env.time_bounds(), Some(TimeBounds { min_time: 0, max_time: 60 }));
    assert_eq!(
        env.preconditions(),
        Preconditions::Time(TimeBounds { min_time: 0, max_time: 60 })
    );
    assert_eq!(env.ledger_bounds(), None);
    assert_eq!(env.min_seq_num(), None);
    assert_eq!(env.min_seq_age(), None);
    assert!(env.extra_signers().is_empty());
    assert_eq!(env.memo(), &Memo::None);
    assert_eq!(env.operations()[0].body.arm(), OperationBodyArm::Inflation);
}

#[test]
fn test_fee_bump_envelope_accessors() {
    let inner = v1_envelope();
    let env = TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: MuxedAccount::Ed25519(Uint256([8; 32])),
            fee: 500,
            inner_tx: FeeBumpTransactionInnerTx::Tx(inner.clone()),
            ext: FeeBumpTransactionExt::V0,
        },
        signatures: BoundedVec::try_from(vec![signature(), signature()]).unwrap(),
    });
    assert!(env.is_fee_bump());
    assert_eq!(env.fee_bump_account(), Some(&MuxedAccount::Ed25519(Uint256([8; 32]))));
    assert_eq!(env.fee_bump_fee(), Some(500));
    assert_eq!(env.fee_bump_signatures().map(<[_]>::len), Some(2));
    // Everything else reads the inner transaction.
    assert_eq!(env.fee(), 100);
    assert_eq!(env.signatures().len(), 1);
    assert_eq!(env.source_account(), inner.tx.source_account);
    assert_eq!(env.min_seq_num(), Some(10));
}

#[test]
fn test_envelope_base64_round_trip() {
    let env = TransactionEnvelope::Tx(v1_envelope());
    let text = to_base64(&env).unwrap();
    assert!(text.starts_with("AAAAA"));
    assert_eq!(from_base64::<TransactionEnvelope>(&text).unwrap(), env);

    let v0 = TransactionEnvelope::TxV0(v0_envelope());
    assert_eq!(from_base64::<TransactionEnvelope>(&to_base64(&v0).unwrap()).unwrap(), v0);
}

#[test]
fn test_base64_errors() {
    assert!(matches!(
        from_base64::<TransactionEnvelope>("not base64!"),
        Err(Error::Base64(_))
    ));
    // Valid base64 of a lone envelope type with nothing after it.
    assert_eq!(
        from_base64::<TransactionEnvelope>("AAAAAg==").unwrap_err(),
        Error::UnexpectedEof
    );
}

#[test]
fn test_envelope_at_op_limit() {
    let mut env = v1_envelope();
    let op = env.tx.operations[0].clone();
    env.tx.operations =
        BoundedVec::try_from(vec![op.clone(); MAX_OPS_PER_TX as usize]).unwrap();
    let env = TransactionEnvelope::Tx(env);
    let bytes = to_bytes(&env).unwrap();
    assert_eq!(from_bytes::<TransactionEnvelope>(&bytes).unwrap(), env);
    assert_eq!(env.operations().len(), 100);

    let mut ops = env.operations().to_vec();
    ops.push(op);
    assert_eq!(
        BoundedVec::<Operation, MAX_OPS_PER_TX>::try_from(ops).unwrap_err(),
        Error::BoundsViolation { max: 100, got: 101 }
    );
}

#[test]
fn test_envelope_over_op_limit() {
    let mut bytes = to_bytes(&EnvelopeType::Tx).unwrap();
    bytes.extend(to_bytes(&MuxedAccount::Ed25519(Uint256([0; 32]))).unwrap());
    bytes.extend(to_bytes(&100u32).unwrap());
    bytes.extend(to_bytes(&1i64).unwrap());
    bytes.extend(to_bytes(&Preconditions::None).unwrap());
    bytes.extend(to_bytes(&Memo::None).unwrap());
    bytes.extend(to_bytes(&(MAX_OPS_PER_TX + 1)).unwrap());
    assert_eq!(
        from_bytes::<TransactionEnvelope>(&bytes).unwrap_err(),
        Error::BoundsViolation { max: 100, got: 101 }
    );
}

// ── results ────────────────────────────────────────────────────────────────

#[test]
fn test_operation_result_success() {
    let ok = OperationResult::OpInner(OperationResultTr::Payment(PaymentResult::Success));
    assert!(ok.is_success());
    assert_eq!(to_bytes(&ok).unwrap(), [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);

    let failed = OperationResult::OpInner(OperationResultTr::Payment(PaymentResult::Failed(
        PaymentResultCode::NoDestination,
    )));
    assert!(!failed.is_success());
    assert_eq!(failed.must_tr().arm(), OperationResultTrArm::PaymentResult);

    let merge = OperationResult::OpInner(OperationResultTr::AccountMerge(
        AccountMergeResult::Success(5),
    ));
    assert!(merge.is_success());
}

#[test]
fn test_operation_result_outer_failure() {
    let bad_auth: OperationResult = from_bytes(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
    assert_eq!(bad_auth, OperationResult::Failed(OperationResultCode::OpBadAuth));
    assert!(!bad_auth.is_success());
    assert_eq!(bad_auth.tr(), None);
    assert_eq!(bad_auth.arm(), OperationResultArm::Void);
}

#[test]
fn test_inflation_payouts_round_trip() {
    let result = InflationResult::Success(vec![
        InflationPayout { destination: account(1), amount: 10 },
        InflationPayout { destination: account(2), amount: 20 },
    ]);
    assert_eq!(result.payouts().map(Vec::len), Some(2));
    assert_eq!(from_bytes::<InflationResult>(&to_bytes(&result).unwrap()).unwrap(), result);

    let not_time: InflationResult = from_bytes(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
    assert_eq!(not_time, InflationResult::Failed(InflationResultCode::NotTime));
}
