use super::asset::Asset;
use super::memo::Memo;
use super::primitives::{
    AccountId, DecoratedSignature, Duration, MuxedAccount, SequenceNumber, SignerKey, TimePoint,
    Uint256,
};
use crate::bounded::{BoundedBytes, BoundedString, BoundedVec};
use serde::{Deserialize, Serialize};

pub const MAX_OPS_PER_TX: u32 = 100;
pub const MAX_SIGNATURES: u32 = 20;
pub const MAX_EXTRA_SIGNERS: u32 = 2;

pub type String64 = BoundedString<64>;
pub type DataValue = BoundedBytes<64>;
pub type Signatures = BoundedVec<DecoratedSignature, MAX_SIGNATURES>;

// ── Preconditions ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: TimePoint,
    /// 0 means no upper bound.
    pub max_time: TimePoint,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    /// 0 means no upper bound.
    pub max_ledger: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_seq_num: Option<SequenceNumber>,
    pub min_seq_age: Duration,
    pub min_seq_ledger_gap: u32,
    pub extra_signers: BoundedVec<SignerKey, MAX_EXTRA_SIGNERS>,
}

crate::xdr_enum! {
    pub enum PreconditionType {
        None = 0,
        Time = 1,
        V2 = 2,
    }
}

crate::xdr_union! {
    pub union Preconditions switch (PreconditionType) {
        arms PreconditionsArm {
            None,
            TimeBounds: TimeBounds => time / must_time,
            V2: PreconditionsV2 => v2 / must_v2,
        }
        cases {
            PreconditionType::None => None in None,
            PreconditionType::Time => Time(TimeBounds) in TimeBounds,
            PreconditionType::V2 => V2(PreconditionsV2) in V2,
        }
    }
}

impl Default for Preconditions {
    fn default() -> Self {
        Preconditions::None
    }
}

impl Preconditions {
    pub fn with_time_bounds(time_bounds: Option<TimeBounds>) -> Self {
        match time_bounds {
            Some(tb) => Preconditions::Time(tb),
            None => Preconditions::None,
        }
    }

    pub fn time_bounds(&self) -> Option<TimeBounds> {
        match self {
            Preconditions::None => None,
            Preconditions::Time(tb) => Some(*tb),
            Preconditions::V2(v2) => v2.time_bounds,
        }
    }

    pub fn ledger_bounds(&self) -> Option<LedgerBounds> {
        self.v2().and_then(|v2| v2.ledger_bounds)
    }

    pub fn min_seq_num(&self) -> Option<SequenceNumber> {
        self.v2().and_then(|v2| v2.min_seq_num)
    }

    pub fn min_seq_age(&self) -> Option<Duration> {
        self.v2().map(|v2| v2.min_seq_age)
    }

    pub fn min_seq_ledger_gap(&self) -> Option<u32> {
        self.v2().map(|v2| v2.min_seq_ledger_gap)
    }

    pub fn extra_signers(&self) -> &[SignerKey] {
        self.v2().map(|v2| v2.extra_signers.as_slice()).unwrap_or(&[])
    }
}

// ── Operations ─────────────────────────────────────────────────────────────

crate::xdr_enum! {
    pub enum OperationType {
        CreateAccount = 0,
        Payment = 1,
        AccountMerge = 8,
        Inflation = 9,
        ManageData = 10,
        BumpSequence = 11,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageDataOp {
    pub data_name: String64,
    /// `None` deletes the entry.
    pub data_value: Option<DataValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpSequenceOp {
    pub bump_to: SequenceNumber,
}

crate::xdr_union! {
    pub union OperationBody switch (OperationType) {
        arms OperationBodyArm {
            CreateAccountOp: CreateAccountOp => create_account_op / must_create_account_op,
            PaymentOp: PaymentOp => payment_op / must_payment_op,
            Destination: MuxedAccount => destination / must_destination,
            Inflation,
            ManageDataOp: ManageDataOp => manage_data_op / must_manage_data_op,
            BumpSequenceOp: BumpSequenceOp => bump_sequence_op / must_bump_sequence_op,
        }
        cases {
            OperationType::CreateAccount => CreateAccount(CreateAccountOp) in CreateAccountOp,
            OperationType::Payment => Payment(PaymentOp) in PaymentOp,
            OperationType::AccountMerge => AccountMerge(MuxedAccount) in Destination,
            OperationType::Inflation => Inflation in Inflation,
            OperationType::ManageData => ManageData(ManageDataOp) in ManageDataOp,
            OperationType::BumpSequence => BumpSequence(BumpSequenceOp) in BumpSequenceOp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Defaults to the transaction source when absent.
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

// ── Transactions ───────────────────────────────────────────────────────────

crate::xdr_union! {
    pub union TransactionExt switch (i32) {
        arms TransactionExtArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

crate::xdr_union! {
    pub union TransactionV0Ext switch (i32) {
        arms TransactionV0ExtArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

crate::xdr_union! {
    pub union FeeBumpTransactionExt switch (i32) {
        arms FeeBumpTransactionExtArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source_account: MuxedAccount,
    pub fee: u32,
    pub seq_num: SequenceNumber,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: BoundedVec<Operation, MAX_OPS_PER_TX>,
    pub ext: TransactionExt,
}

/// Pre-protocol-13 transaction: plain ed25519 source, time bounds only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV0 {
    pub source_account_ed25519: Uint256,
    pub fee: u32,
    pub seq_num: SequenceNumber,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: BoundedVec<Operation, MAX_OPS_PER_TX>,
    pub ext: TransactionV0Ext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV0Envelope {
    pub tx: TransactionV0,
    pub signatures: Signatures,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    pub signatures: Signatures,
}

crate::xdr_enum! {
    pub enum EnvelopeType {
        TxV0 = 0,
        Scp = 1,
        Tx = 2,
        Auth = 3,
        ScpValue = 4,
        TxFeeBump = 5,
        OpId = 6,
        PoolRevokeOpId = 7,
        ContractId = 8,
        SorobanAuthorization = 9,
    }
}

crate::xdr_union! {
    pub union FeeBumpTransactionInnerTx switch (EnvelopeType) {
        arms FeeBumpTransactionInnerTxArm {
            V1: TransactionV1Envelope => v1 / must_v1,
        }
        cases {
            EnvelopeType::Tx => Tx(TransactionV1Envelope) in V1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    pub fee: i64,
    pub inner_tx: FeeBumpTransactionInnerTx,
    pub ext: FeeBumpTransactionExt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransactionEnvelope {
    pub tx: FeeBumpTransaction,
    pub signatures: Signatures,
}

crate::xdr_union! {
    pub union TransactionEnvelope switch (EnvelopeType) {
        arms TransactionEnvelopeArm {
            V0: TransactionV0Envelope => v0 / must_v0,
            V1: TransactionV1Envelope => v1 / must_v1,
            FeeBump: FeeBumpTransactionEnvelope => fee_bump / must_fee_bump,
        }
        cases {
            EnvelopeType::TxV0 => TxV0(TransactionV0Envelope) in V0,
            EnvelopeType::Tx => Tx(TransactionV1Envelope) in V1,
            EnvelopeType::TxFeeBump => TxFeeBump(FeeBumpTransactionEnvelope) in FeeBump,
        }
    }
}

/// Borrowed transaction behind an envelope, fee bumps unwrapped.
enum InnerTx<'a> {
    V0(&'a TransactionV0Envelope),
    V1(&'a TransactionV1Envelope),
}

/// Accessors over every envelope kind. For fee bumps they read the inner
/// transaction unless named `fee_bump_*`.
impl TransactionEnvelope {
    pub fn is_fee_bump(&self) -> bool {
        matches!(self, TransactionEnvelope::TxFeeBump(_))
    }

    fn inner(&self) -> InnerTx<'_> {
        match self {
            TransactionEnvelope::TxV0(v0) => InnerTx::V0(v0),
            TransactionEnvelope::Tx(v1) => InnerTx::V1(v1),
            TransactionEnvelope::TxFeeBump(fb) => match &fb.tx.inner_tx {
                FeeBumpTransactionInnerTx::Tx(v1) => InnerTx::V1(v1),
            },
        }
    }

    fn inner_v1(&self) -> Option<&Transaction> {
        match self.inner() {
            InnerTx::V0(_) => None,
            InnerTx::V1(v1) => Some(&v1.tx),
        }
    }

    /// Account paying the fee bump.
    pub fn fee_bump_account(&self) -> Option<&MuxedAccount> {
        self.fee_bump().map(|fb| &fb.tx.fee_source)
    }

    pub fn fee_bump_fee(&self) -> Option<i64> {
        self.fee_bump().map(|fb| fb.tx.fee)
    }

    pub fn fee_bump_signatures(&self) -> Option<&[DecoratedSignature]> {
        self.fee_bump().map(|fb| fb.signatures.as_slice())
    }

    pub fn source_account(&self) -> MuxedAccount {
        match self.inner() {
            InnerTx::V0(v0) => MuxedAccount::Ed25519(v0.tx.source_account_ed25519),
            InnerTx::V1(v1) => v1.tx.source_account.clone(),
        }
    }

    pub fn fee(&self) -> u32 {
        match self.inner() {
            InnerTx::V0(v0) => v0.tx.fee,
            InnerTx::V1(v1) => v1.tx.fee,
        }
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self.inner() {
            InnerTx::V0(v0) => v0.signatures.as_slice(),
            InnerTx::V1(v1) => v1.signatures.as_slice(),
        }
    }

    pub fn seq_num(&self) -> SequenceNumber {
        match self.inner() {
            InnerTx::V0(v0) => v0.tx.seq_num,
            InnerTx::V1(v1) => v1.tx.seq_num,
        }
    }

    /// V0 envelopes predate preconditions; their time bounds are wrapped.
    pub fn preconditions(&self) -> Preconditions {
        match self.inner() {
            InnerTx::V0(v0) => Preconditions::with_time_bounds(v0.tx.time_bounds),
            InnerTx::V1(v1) => v1.tx.cond.clone(),
        }
    }

    pub fn time_bounds(&self) -> Option<TimeBounds> {
        match self.inner() {
            InnerTx::V0(v0) => v0.tx.time_bounds,
            InnerTx::V1(v1) => v1.tx.cond.time_bounds(),
        }
    }

    pub fn ledger_bounds(&self) -> Option<LedgerBounds> {
        self.inner_v1().and_then(|tx| tx.cond.ledger_bounds())
    }

    pub fn min_seq_num(&self) -> Option<SequenceNumber> {
        self.inner_v1().and_then(|tx| tx.cond.min_seq_num())
    }

    pub fn min_seq_age(&self) -> Option<Duration> {
        self.inner_v1().and_then(|tx| tx.cond.min_seq_age())
    }

    pub fn min_seq_ledger_gap(&self) -> Option<u32> {
        self.inner_v1().and_then(|tx| tx.cond.min_seq_ledger_gap())
    }

    pub fn extra_signers(&self) -> &[SignerKey] {
        self.inner_v1()
            .map(|tx| tx.cond.extra_signers())
            .unwrap_or(&[])
    }

    pub fn operations(&self) -> &[Operation] {
        match self.inner() {
            InnerTx::V0(v0) => v0.tx.operations.as_slice(),
            InnerTx::V1(v1) => v1.tx.operations.as_slice(),
        }
    }

    pub fn memo(&self) -> &Memo {
        match self.inner() {
            InnerTx::V0(v0) => &v0.tx.memo,
            InnerTx::V1(v1) => &v1.tx.memo,
        }
    }
}
