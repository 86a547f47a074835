use super::primitives::{AccountId, AssetCode4, AssetCode12, PoolId};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

crate::xdr_enum! {
    pub enum AssetType {
        Native = 0,
        CreditAlphanum4 = 1,
        CreditAlphanum12 = 2,
        PoolShare = 3,
    }
}

impl AssetType {
    /// Name used in JSON and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Native => "native",
            AssetType::CreditAlphanum4 => "credit_alphanum4",
            AssetType::CreditAlphanum12 => "credit_alphanum12",
            AssetType::PoolShare => "liquidity_pool_shares",
        }
    }
}

impl FromStr for AssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AssetType::VARIANTS
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidAsset(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaNum4 {
    pub asset_code: AssetCode4,
    pub issuer: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaNum12 {
    pub asset_code: AssetCode12,
    pub issuer: AccountId,
}

crate::xdr_union! {
    pub union Asset switch (AssetType) {
        arms AssetArm {
            Native,
            AlphaNum4: AlphaNum4 => alpha_num4 / must_alpha_num4,
            AlphaNum12: AlphaNum12 => alpha_num12 / must_alpha_num12,
        }
        cases {
            AssetType::Native => Native in Native,
            AssetType::CreditAlphanum4 => CreditAlphanum4(AlphaNum4) in AlphaNum4,
            AssetType::CreditAlphanum12 => CreditAlphanum12(AlphaNum12) in AlphaNum12,
        }
    }
}

crate::xdr_union! {
    pub union AssetCode switch (AssetType) {
        arms AssetCodeArm {
            AssetCode4: AssetCode4 => asset_code4 / must_asset_code4,
            AssetCode12: AssetCode12 => asset_code12 / must_asset_code12,
        }
        cases {
            AssetType::CreditAlphanum4 => CreditAlphanum4(AssetCode4) in AssetCode4,
            AssetType::CreditAlphanum12 => CreditAlphanum12(AssetCode12) in AssetCode12,
        }
    }
}

crate::xdr_union! {
    pub union TrustLineAsset switch (AssetType) {
        arms TrustLineAssetArm {
            Native,
            AlphaNum4: AlphaNum4 => alpha_num4 / must_alpha_num4,
            AlphaNum12: AlphaNum12 => alpha_num12 / must_alpha_num12,
            LiquidityPoolId: PoolId => liquidity_pool_id / must_liquidity_pool_id,
        }
        cases {
            AssetType::Native => Native in Native,
            AssetType::CreditAlphanum4 => CreditAlphanum4(AlphaNum4) in AlphaNum4,
            AssetType::CreditAlphanum12 => CreditAlphanum12(AlphaNum12) in AlphaNum12,
            AssetType::PoolShare => PoolShare(PoolId) in LiquidityPoolId,
        }
    }
}

fn trim_zeros(code: &[u8]) -> &[u8] {
    let end = code.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &code[..end]
}

fn trim_code(code: &[u8]) -> String {
    String::from_utf8_lossy(trim_zeros(code)).into_owned()
}

/// 1-4 characters select alphanum4, 5-12 alphanum12. Only ASCII letters and
/// digits are accepted.
impl FromStr for AssetCode {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(Error::InvalidAssetCode(code.to_owned()));
        }
        let bytes = code.as_bytes();
        match bytes.len() {
            1..=4 => {
                let mut buf = [0u8; 4];
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(AssetCode::CreditAlphanum4(AssetCode4(buf)))
            }
            5..=12 => {
                let mut buf = [0u8; 12];
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(AssetCode::CreditAlphanum12(AssetCode12(buf)))
            }
            _ => Err(Error::InvalidAssetCode(code.to_owned())),
        }
    }
}

impl AssetCode {
    /// The code without its zero padding.
    pub fn code(&self) -> String {
        match self {
            AssetCode::CreditAlphanum4(c) => trim_code(&c.0),
            AssetCode::CreditAlphanum12(c) => trim_code(&c.0),
        }
    }
}

impl Asset {
    pub fn native() -> Self {
        Asset::Native
    }

    /// Credit asset; the alphanum width follows the length of `code`.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self> {
        Ok(match code.parse::<AssetCode>()? {
            AssetCode::CreditAlphanum4(asset_code) => {
                Asset::CreditAlphanum4(AlphaNum4 { asset_code, issuer })
            }
            AssetCode::CreditAlphanum12(asset_code) => {
                Asset::CreditAlphanum12(AlphaNum12 { asset_code, issuer })
            }
        })
    }

    /// Asset from its type name (`native`, `credit_alphanum4` or
    /// `credit_alphanum12`), issuer address and code. For credit assets the
    /// alphanum width follows the code, not the type name.
    pub fn build(asset_type: &str, issuer: &str, code: &str) -> Result<Self> {
        match asset_type.parse::<AssetType>()? {
            AssetType::Native => Ok(Asset::Native),
            AssetType::CreditAlphanum4 | AssetType::CreditAlphanum12 => {
                Asset::credit(code, AccountId::from_address(issuer)?)
            }
            AssetType::PoolShare => Err(Error::InvalidAsset(asset_type.to_owned())),
        }
    }

    /// Parse a comma separated list of `native` or `CODE:ISSUER` entries.
    /// An empty string is an empty list.
    pub fn build_assets(list: &str) -> Result<Vec<Self>> {
        if list.is_empty() {
            return Ok(Vec::new());
        }
        list.split(',').map(str::parse).collect()
    }

    pub fn asset_type(&self) -> AssetType {
        crate::XdrUnion::discriminant(self)
    }

    pub fn code(&self) -> Option<String> {
        match self {
            Asset::Native => None,
            Asset::CreditAlphanum4(a) => Some(trim_code(&a.asset_code.0)),
            Asset::CreditAlphanum12(a) => Some(trim_code(&a.asset_code.0)),
        }
    }

    fn code_bytes(&self) -> &[u8] {
        match self {
            Asset::Native => &[],
            Asset::CreditAlphanum4(a) => trim_zeros(&a.asset_code.0),
            Asset::CreditAlphanum12(a) => trim_zeros(&a.asset_code.0),
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Asset::Native => None,
            Asset::CreditAlphanum4(a) => Some(&a.issuer),
            Asset::CreditAlphanum12(a) => Some(&a.issuer),
        }
    }

    /// `native` or `CODE:ISSUER`.
    pub fn to_canonical_string(&self) -> String {
        match (self.code(), self.issuer()) {
            (Some(code), Some(issuer)) => format!("{code}:{issuer}"),
            _ => self.asset_type().as_str().to_owned(),
        }
    }

    pub fn to_trust_line_asset(&self) -> TrustLineAsset {
        match self {
            Asset::Native => TrustLineAsset::Native,
            Asset::CreditAlphanum4(a) => TrustLineAsset::CreditAlphanum4(a.clone()),
            Asset::CreditAlphanum12(a) => TrustLineAsset::CreditAlphanum12(a.clone()),
        }
    }
}

/// `native` (any case) or `CODE:ISSUER`.
impl FromStr for Asset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("native") {
            return Ok(Asset::Native);
        }
        let invalid = || {
            debug!(asset = s, "rejecting asset string");
            Error::InvalidAsset(s.to_owned())
        };
        let (code, issuer) = s.split_once(':').ok_or_else(invalid)?;
        if issuer.contains(':') {
            return Err(invalid());
        }
        let issuer = AccountId::from_address(issuer).map_err(|_| invalid())?;
        Asset::credit(code, issuer).map_err(|_| invalid())
    }
}

/// Type first, then code, then issuer address.
impl Ord for Asset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.asset_type()
            .value()
            .cmp(&other.asset_type().value())
            .then_with(|| self.code_bytes().cmp(other.code_bytes()))
            .then_with(|| {
                let issuer = |a: &Asset| a.issuer().map(AccountId::to_address);
                issuer(self).cmp(&issuer(other))
            })
    }
}

impl PartialOrd for Asset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `native` or `type/code/issuer`.
impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.asset_type().as_str();
        match (self.code(), self.issuer()) {
            (Some(code), Some(issuer)) => write!(f, "{t}/{code}/{issuer}"),
            _ => f.write_str(t),
        }
    }
}
