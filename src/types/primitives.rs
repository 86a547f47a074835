//! Keys, hashes and signatures.

use crate::bounded::BoundedBytes;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `opaque name[N]` typedefs: fixed-length bytes, shown as hex.
macro_rules! opaque_newtype {
    ($(#[$meta:meta])* $name:ident, $len:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(#[serde(with = "crate::fixed_opaque")] pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }
    };
}

opaque_newtype!(Hash, 32);
opaque_newtype!(Uint256, 32);
opaque_newtype!(
    /// Liquidity pool identifier.
    PoolId,
    32
);
opaque_newtype!(
    /// Last four bytes of the signing key.
    SignatureHint,
    4
);
opaque_newtype!(
    /// Master weight and low/medium/high thresholds.
    Thresholds,
    4
);
opaque_newtype!(AssetCode4, 4);
opaque_newtype!(AssetCode12, 12);

pub type Signature = BoundedBytes<64>;
pub type SequenceNumber = i64;
pub type TimePoint = u64;
pub type Duration = u64;

crate::xdr_enum! {
    pub enum CryptoKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
        MuxedEd25519 = 0x100,
    }
}

crate::xdr_enum! {
    pub enum PublicKeyType {
        Ed25519 = 0,
    }
}

crate::xdr_enum! {
    pub enum SignerKeyType {
        Ed25519 = 0,
        PreAuthTx = 1,
        HashX = 2,
        Ed25519SignedPayload = 3,
    }
}

crate::xdr_union! {
    pub union PublicKey switch (PublicKeyType) {
        arms PublicKeyArm {
            Ed25519: Uint256 => ed25519 / must_ed25519,
        }
        cases {
            PublicKeyType::Ed25519 => Ed25519(Uint256) in Ed25519,
        }
    }
}

pub type AccountId = PublicKey;

impl PublicKey {
    pub fn from_ed25519(key: [u8; 32]) -> Self {
        PublicKey::Ed25519(Uint256(key))
    }

    pub fn ed25519_bytes(&self) -> &[u8; 32] {
        match self {
            PublicKey::Ed25519(key) => &key.0,
        }
    }

    /// Parse a StrKey account address (`G...`).
    pub fn from_address(address: &str) -> Result<Self> {
        stellar_strkey::ed25519::PublicKey::from_string(address)
            .map(|key| PublicKey::from_ed25519(key.0))
            .map_err(|_| Error::InvalidAddress(address.to_owned()))
    }

    /// StrKey account address (`G...`).
    pub fn to_address(&self) -> String {
        stellar_strkey::ed25519::PublicKey(*self.ed25519_bytes()).to_string()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(address: &str) -> Result<Self> {
        PublicKey::from_address(address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuxedAccountMed25519 {
    pub id: u64,
    pub ed25519: Uint256,
}

crate::xdr_union! {
    /// An account, optionally multiplexed with a 64-bit id.
    pub union MuxedAccount switch (CryptoKeyType) {
        arms MuxedAccountArm {
            Ed25519: Uint256 => ed25519 / must_ed25519,
            Med25519: MuxedAccountMed25519 => med25519 / must_med25519,
        }
        cases {
            CryptoKeyType::Ed25519 => Ed25519(Uint256) in Ed25519,
            CryptoKeyType::MuxedEd25519 => MuxedEd25519(MuxedAccountMed25519) in Med25519,
        }
    }
}

impl MuxedAccount {
    /// Underlying account, dropping the multiplexing id.
    pub fn to_account_id(&self) -> AccountId {
        match self {
            MuxedAccount::Ed25519(key) => PublicKey::Ed25519(*key),
            MuxedAccount::MuxedEd25519(med) => PublicKey::Ed25519(med.ed25519),
        }
    }

    pub fn muxed_id(&self) -> Option<u64> {
        self.med25519().map(|med| med.id)
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(account: AccountId) -> Self {
        match account {
            PublicKey::Ed25519(key) => MuxedAccount::Ed25519(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerKeyEd25519SignedPayload {
    pub ed25519: Uint256,
    pub payload: BoundedBytes<64>,
}

crate::xdr_union! {
    pub union SignerKey switch (SignerKeyType) {
        arms SignerKeyArm {
            Ed25519: Uint256 => ed25519 / must_ed25519,
            PreAuthTx: Uint256 => pre_auth_tx / must_pre_auth_tx,
            HashX: Uint256 => hash_x / must_hash_x,
            Ed25519SignedPayload: SignerKeyEd25519SignedPayload
                => ed25519_signed_payload / must_ed25519_signed_payload,
        }
        cases {
            SignerKeyType::Ed25519 => Ed25519(Uint256) in Ed25519,
            SignerKeyType::PreAuthTx => PreAuthTx(Uint256) in PreAuthTx,
            SignerKeyType::HashX => HashX(Uint256) in HashX,
            SignerKeyType::Ed25519SignedPayload =>
                Ed25519SignedPayload(SignerKeyEd25519SignedPayload) in Ed25519SignedPayload,
        }
    }
}

crate::xdr_union! {
    /// Reserved extension slot, always version 0.
    pub union ExtensionPoint switch (i32) {
        arms ExtensionPointArm { V0 }
        cases { 0 => V0 in V0 }
    }
}

impl Default for ExtensionPoint {
    fn default() -> Self {
        ExtensionPoint::V0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub hint: SignatureHint,
    pub signature: Signature,
}
