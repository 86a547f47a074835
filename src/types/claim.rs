//! Claimable balance predicates: the one self-referential shape in the
//! schema. Children live behind `Vec`/`Box`; decode depth is capped by
//! [`DecodeOptions::max_depth`](crate::DecodeOptions).

use super::primitives::AccountId;
use crate::bounded::BoundedVec;
use crate::error::Result;
use serde::{Deserialize, Serialize};

crate::xdr_enum! {
    pub enum ClaimPredicateType {
        Unconditional = 0,
        And = 1,
        Or = 2,
        Not = 3,
        BeforeAbsoluteTime = 4,
        BeforeRelativeTime = 5,
    }
}

crate::xdr_union! {
    pub union ClaimPredicate switch (ClaimPredicateType) {
        arms ClaimPredicateArm {
            Unconditional,
            AndPredicates: BoundedVec<ClaimPredicate, 2> => and_predicates / must_and_predicates,
            OrPredicates: BoundedVec<ClaimPredicate, 2> => or_predicates / must_or_predicates,
            NotPredicate: Option<Box<ClaimPredicate>> => not_predicate / must_not_predicate,
            AbsBefore: i64 => abs_before / must_abs_before,
            RelBefore: i64 => rel_before / must_rel_before,
        }
        cases {
            ClaimPredicateType::Unconditional => Unconditional in Unconditional,
            ClaimPredicateType::And => And(BoundedVec<ClaimPredicate, 2>) in AndPredicates,
            ClaimPredicateType::Or => Or(BoundedVec<ClaimPredicate, 2>) in OrPredicates,
            ClaimPredicateType::Not => Not(Option<Box<ClaimPredicate>>) in NotPredicate,
            ClaimPredicateType::BeforeAbsoluteTime => BeforeAbsoluteTime(i64) in AbsBefore,
            ClaimPredicateType::BeforeRelativeTime => BeforeRelativeTime(i64) in RelBefore,
        }
    }
}

impl ClaimPredicate {
    pub fn and(left: ClaimPredicate, right: ClaimPredicate) -> Result<Self> {
        Ok(ClaimPredicate::And(BoundedVec::try_from(vec![left, right])?))
    }

    pub fn or(left: ClaimPredicate, right: ClaimPredicate) -> Result<Self> {
        Ok(ClaimPredicate::Or(BoundedVec::try_from(vec![left, right])?))
    }

    pub fn not(inner: ClaimPredicate) -> Self {
        ClaimPredicate::Not(Some(Box::new(inner)))
    }

    /// Nesting depth of the tree; a leaf is 1.
    pub fn depth(&self) -> usize {
        match self {
            ClaimPredicate::And(children) | ClaimPredicate::Or(children) => {
                1 + children.iter().map(ClaimPredicate::depth).max().unwrap_or(0)
            }
            ClaimPredicate::Not(Some(inner)) => 1 + inner.depth(),
            _ => 1,
        }
    }
}

crate::xdr_enum! {
    pub enum ClaimantType {
        V0 = 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimantV0 {
    pub destination: AccountId,
    pub predicate: ClaimPredicate,
}

crate::xdr_union! {
    pub union Claimant switch (ClaimantType) {
        arms ClaimantArm {
            V0: ClaimantV0 => v0 / must_v0,
        }
        cases {
            ClaimantType::V0 => V0(ClaimantV0) in V0,
        }
    }
}
