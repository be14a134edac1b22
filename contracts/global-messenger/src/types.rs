use near_sdk::AccountId;
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::IterableSet;
use near_sdk_macros::NearSchema;

/// A named group. The owner is fixed at creation and is a member without
/// an entry in `members`.
#[derive(BorshSerialize, BorshDeserialize, NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct Group {
    pub owner: AccountId,
    pub members: IterableSet<AccountId>,
    pub message: String,
}

/// One entry of the append-only creation log, addressable by position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize, NearSchema)]
#[serde(crate = "near_sdk::serde")]
#[borsh(crate = "near_sdk::borsh")]
#[abi(json, borsh)]
pub struct GroupCreatedRecord {
    pub topic: String,
    pub owner: AccountId,
    pub block_height: u64,
    pub timestamp_ms: u64,
}
