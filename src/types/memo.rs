use super::primitives::Hash;
use crate::bounded::BoundedString;
use crate::error::Result;

/// Longest memo text, in bytes.
pub const MEMO_TEXT_MAX: u32 = 28;

crate::xdr_enum! {
    pub enum MemoType {
        None = 0,
        Text = 1,
        Id = 2,
        Hash = 3,
        Return = 4,
    }
}

crate::xdr_union! {
    pub union Memo switch (MemoType) {
        arms MemoArm {
            None,
            Text: BoundedString<MEMO_TEXT_MAX> => text / must_text,
            Id: u64 => id / must_id,
            Hash: Hash => hash / must_hash,
            RetHash: Hash => ret_hash / must_ret_hash,
        }
        cases {
            MemoType::None => None in None,
            MemoType::Text => Text(BoundedString<MEMO_TEXT_MAX>) in Text,
            MemoType::Id => Id(u64) in Id,
            MemoType::Hash => Hash(Hash) in Hash,
            MemoType::Return => Return(Hash) in RetHash,
        }
    }
}

impl Default for Memo {
    fn default() -> Self {
        Memo::None
    }
}

impl Memo {
    /// Fails with `BoundsViolation` above 28 bytes.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Memo::Text(BoundedString::try_from(text)?))
    }

    pub fn from_id(id: u64) -> Self {
        Memo::Id(id)
    }

    pub fn from_hash(hash: Hash) -> Self {
        Memo::Hash(hash)
    }

    pub fn from_return_hash(hash: Hash) -> Self {
        Memo::Return(hash)
    }
}
