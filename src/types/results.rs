//! Operation results.
//!
//! These unions list the success code and fold every failure code into a
//! `default` arm. When success carries no data it resolves to the same void
//! arm as the failures; only the discriminant tells them apart.

use super::primitives::AccountId;
use super::transaction::OperationType;
use serde::{Deserialize, Serialize};

crate::xdr_enum! {
    pub enum CreateAccountResultCode {
        Success = 0,
        Malformed = -1,
        Underfunded = -2,
        LowReserve = -3,
        AlreadyExist = -4,
    }
}

crate::xdr_union! {
    pub union CreateAccountResult switch (CreateAccountResultCode) {
        arms CreateAccountResultArm { Void }
        cases { CreateAccountResultCode::Success => Success in Void }
        default => Failed in Void
    }
}

crate::xdr_enum! {
    pub enum PaymentResultCode {
        Success = 0,
        Malformed = -1,
        Underfunded = -2,
        SrcNoTrust = -3,
        SrcNotAuthorized = -4,
        NoDestination = -5,
        NoTrust = -6,
        NotAuthorized = -7,
        LineFull = -8,
        NoIssuer = -9,
    }
}

crate::xdr_union! {
    pub union PaymentResult switch (PaymentResultCode) {
        arms PaymentResultArm { Void }
        cases { PaymentResultCode::Success => Success in Void }
        default => Failed in Void
    }
}

crate::xdr_enum! {
    pub enum AccountMergeResultCode {
        Success = 0,
        Malformed = -1,
        NoAccount = -2,
        ImmutableSet = -3,
        HasSubEntries = -4,
        SeqnumTooFar = -5,
        DestFull = -6,
        IsSponsor = -7,
    }
}

crate::xdr_union! {
    pub union AccountMergeResult switch (AccountMergeResultCode) {
        arms AccountMergeResultArm {
            SourceAccountBalance: i64 => source_account_balance / must_source_account_balance,
            Void,
        }
        cases {
            AccountMergeResultCode::Success => Success(i64) in SourceAccountBalance,
        }
        default => Failed in Void
    }
}

crate::xdr_enum! {
    pub enum InflationResultCode {
        Success = 0,
        NotTime = -1,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflationPayout {
    pub destination: AccountId,
    pub amount: i64,
}

crate::xdr_union! {
    pub union InflationResult switch (InflationResultCode) {
        arms InflationResultArm {
            Payouts: Vec<InflationPayout> => payouts / must_payouts,
            Void,
        }
        cases {
            InflationResultCode::Success => Success(Vec<InflationPayout>) in Payouts,
        }
        default => Failed in Void
    }
}

crate::xdr_enum! {
    pub enum ManageDataResultCode {
        Success = 0,
        NotSupportedYet = -1,
        NameNotFound = -2,
        LowReserve = -3,
        InvalidName = -4,
    }
}

crate::xdr_union! {
    pub union ManageDataResult switch (ManageDataResultCode) {
        arms ManageDataResultArm { Void }
        cases { ManageDataResultCode::Success => Success in Void }
        default => Failed in Void
    }
}

crate::xdr_enum! {
    pub enum BumpSequenceResultCode {
        Success = 0,
        BadSeq = -1,
    }
}

crate::xdr_union! {
    pub union BumpSequenceResult switch (BumpSequenceResultCode) {
        arms BumpSequenceResultArm { Void }
        cases { BumpSequenceResultCode::Success => Success in Void }
        default => Failed in Void
    }
}

crate::xdr_union! {
    /// Result of the operation that actually ran.
    pub union OperationResultTr switch (OperationType) {
        arms OperationResultTrArm {
            CreateAccountResult: CreateAccountResult => create_account_result / must_create_account_result,
            PaymentResult: PaymentResult => payment_result / must_payment_result,
            AccountMergeResult: AccountMergeResult => account_merge_result / must_account_merge_result,
            InflationResult: InflationResult => inflation_result / must_inflation_result,
            ManageDataResult: ManageDataResult => manage_data_result / must_manage_data_result,
            BumpSeqResult: BumpSequenceResult => bump_seq_result / must_bump_seq_result,
        }
        cases {
            OperationType::CreateAccount => CreateAccount(CreateAccountResult) in CreateAccountResult,
            OperationType::Payment => Payment(PaymentResult) in PaymentResult,
            OperationType::AccountMerge => AccountMerge(AccountMergeResult) in AccountMergeResult,
            OperationType::Inflation => Inflation(InflationResult) in InflationResult,
            OperationType::ManageData => ManageData(ManageDataResult) in ManageDataResult,
            OperationType::BumpSequence => BumpSequence(BumpSequenceResult) in BumpSeqResult,
        }
    }
}

crate::xdr_enum! {
    pub enum OperationResultCode {
        OpInner = 0,
        OpBadAuth = -1,
        OpNoAccount = -2,
        OpNotSupported = -3,
        OpTooManySubentries = -4,
        OpExceededWorkLimit = -5,
        OpTooManySponsoring = -6,
    }
}

crate::xdr_union! {
    pub union OperationResult switch (OperationResultCode) {
        arms OperationResultArm {
            Tr: OperationResultTr => tr / must_tr,
            Void,
        }
        cases { OperationResultCode::OpInner => OpInner(OperationResultTr) in Tr }
        default => Failed in Void
    }
}

impl OperationResult {
    /// True when the operation ran and reported its own success code.
    pub fn is_success(&self) -> bool {
        match self.tr() {
            Some(OperationResultTr::CreateAccount(r)) => matches!(r, CreateAccountResult::Success),
            Some(OperationResultTr::Payment(r)) => matches!(r, PaymentResult::Success),
            Some(OperationResultTr::AccountMerge(r)) => matches!(r, AccountMergeResult::Success(_)),
            Some(OperationResultTr::Inflation(r)) => matches!(r, InflationResult::Success(_)),
            Some(OperationResultTr::ManageData(r)) => matches!(r, ManageDataResult::Success),
            Some(OperationResultTr::BumpSequence(r)) => matches!(r, BumpSequenceResult::Success),
            None => false,
        }
    }
}
