use super::asset::TrustLineAsset;
use super::primitives::{AccountId, ExtensionPoint, Hash, SequenceNumber, SignerKey, Thresholds};
use super::transaction::{DataValue, String64};
use crate::bounded::{BoundedString, BoundedVec};
use serde::{Deserialize, Serialize};

pub const MAX_SIGNERS: u32 = 20;

pub type String32 = BoundedString<32>;

crate::xdr_enum! {
    pub enum LedgerEntryType {
        Account = 0,
        Trustline = 1,
        Offer = 2,
        Data = 3,
        ClaimableBalance = 4,
        LiquidityPool = 5,
        ContractData = 6,
        ContractCode = 7,
        ConfigSetting = 8,
        Ttl = 9,
    }
}

// ── Keys ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyAccount {
    pub account_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyTrustLine {
    pub account_id: AccountId,
    pub asset: TrustLineAsset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyOffer {
    pub seller_id: AccountId,
    pub offer_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyData {
    pub account_id: AccountId,
    pub data_name: String64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyTtl {
    /// Hash of the key of the entry whose lifetime is tracked.
    pub key_hash: Hash,
}

crate::xdr_union! {
    pub union LedgerKey switch (LedgerEntryType) {
        arms LedgerKeyArm {
            Account: LedgerKeyAccount => account / must_account,
            TrustLine: LedgerKeyTrustLine => trust_line / must_trust_line,
            Offer: LedgerKeyOffer => offer / must_offer,
            Data: LedgerKeyData => data / must_data,
            Ttl: LedgerKeyTtl => ttl / must_ttl,
        }
        cases {
            LedgerEntryType::Account => Account(LedgerKeyAccount) in Account,
            LedgerEntryType::Trustline => Trustline(LedgerKeyTrustLine) in TrustLine,
            LedgerEntryType::Offer => Offer(LedgerKeyOffer) in Offer,
            LedgerEntryType::Data => Data(LedgerKeyData) in Data,
            LedgerEntryType::Ttl => Ttl(LedgerKeyTtl) in Ttl,
        }
    }
}

impl LedgerKey {
    pub fn for_account(account_id: AccountId) -> Self {
        LedgerKey::Account(LedgerKeyAccount { account_id })
    }

    pub fn for_trustline(account_id: AccountId, asset: TrustLineAsset) -> Self {
        LedgerKey::Trustline(LedgerKeyTrustLine { account_id, asset })
    }

    pub fn for_offer(seller_id: AccountId, offer_id: i64) -> Self {
        LedgerKey::Offer(LedgerKeyOffer {
            seller_id,
            offer_id,
        })
    }

    pub fn for_data(account_id: AccountId, data_name: String64) -> Self {
        LedgerKey::Data(LedgerKeyData {
            account_id,
            data_name,
        })
    }

    pub fn for_ttl(key_hash: Hash) -> Self {
        LedgerKey::Ttl(LedgerKeyTtl { key_hash })
    }

    pub fn entry_type(&self) -> LedgerEntryType {
        crate::XdrUnion::discriminant(self)
    }
}

// ── Entries ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

crate::xdr_union! {
    pub union AccountEntryExt switch (i32) {
        arms AccountEntryExtArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account_id: AccountId,
    pub balance: i64,
    pub seq_num: SequenceNumber,
    pub num_sub_entries: u32,
    pub inflation_dest: Option<AccountId>,
    pub flags: u32,
    pub home_domain: String32,
    pub thresholds: Thresholds,
    pub signers: BoundedVec<Signer, MAX_SIGNERS>,
    pub ext: AccountEntryExt,
}

crate::xdr_union! {
    pub union DataEntryExt switch (i32) {
        arms DataEntryExtArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub account_id: AccountId,
    pub data_name: String64,
    pub data_value: DataValue,
    pub ext: DataEntryExt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlEntry {
    pub key_hash: Hash,
    pub live_until_ledger_seq: u32,
}

crate::xdr_union! {
    pub union LedgerEntryData switch (LedgerEntryType) {
        arms LedgerEntryDataArm {
            Account: AccountEntry => account / must_account,
            Data: DataEntry => data / must_data,
            Ttl: TtlEntry => ttl / must_ttl,
        }
        cases {
            LedgerEntryType::Account => Account(AccountEntry) in Account,
            LedgerEntryType::Data => Data(DataEntry) in Data,
            LedgerEntryType::Ttl => Ttl(TtlEntry) in Ttl,
        }
    }
}

impl LedgerEntryData {
    /// Key identifying this entry in the ledger.
    pub fn ledger_key(&self) -> LedgerKey {
        match self {
            LedgerEntryData::Account(a) => LedgerKey::for_account(a.account_id.clone()),
            LedgerEntryData::Data(d) => {
                LedgerKey::for_data(d.account_id.clone(), d.data_name.clone())
            }
            LedgerEntryData::Ttl(t) => LedgerKey::for_ttl(t.key_hash),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntryExtensionV1 {
    pub sponsoring_id: Option<AccountId>,
    pub ext: ExtensionPoint,
}

crate::xdr_union! {
    pub union LedgerEntryExt switch (i32) {
        arms LedgerEntryExtArm {
            V0,
            V1: LedgerEntryExtensionV1 => v1 / must_v1,
        }
        cases {
            0 => V0 in V0,
            1 => V1(LedgerEntryExtensionV1) in V1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub last_modified_ledger_seq: u32,
    pub data: LedgerEntryData,
    pub ext: LedgerEntryExt,
}

impl LedgerEntry {
    pub fn ledger_key(&self) -> LedgerKey {
        self.data.ledger_key()
    }

    /// Sponsor of the entry, if any.
    pub fn sponsor(&self) -> Option<&AccountId> {
        self.ext.v1().and_then(|v1| v1.sponsoring_id.as_ref())
    }
}

// ── Buckets ────────────────────────────────────────────────────────────────

crate::xdr_enum! {
    pub enum BucketEntryType {
        /// Bucket metadata, only ever first in a bucket.
        Metaentry = -1,
        Liveentry = 0,
        Deadentry = 1,
        Initentry = 2,
    }
}

crate::xdr_union! {
    pub union BucketMetadataExt switch (i32) {
        arms BucketMetadataExtArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketMetadata {
    pub ledger_version: u32,
    pub ext: BucketMetadataExt,
}

crate::xdr_union! {
    /// `LIVEENTRY` and `INITENTRY` share the `LiveEntry` arm.
    pub union BucketEntry switch (BucketEntryType) {
        arms BucketEntryArm {
            LiveEntry: LedgerEntry => live_entry / must_live_entry,
            DeadEntry: LedgerKey => dead_entry / must_dead_entry,
            MetaEntry: BucketMetadata => meta_entry / must_meta_entry,
        }
        cases {
            BucketEntryType::Liveentry => Liveentry(LedgerEntry) in LiveEntry,
            BucketEntryType::Initentry => Initentry(LedgerEntry) in LiveEntry,
            BucketEntryType::Deadentry => Deadentry(LedgerKey) in DeadEntry,
            BucketEntryType::Metaentry => Metaentry(BucketMetadata) in MetaEntry,
        }
    }
}
