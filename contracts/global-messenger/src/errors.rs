use near_sdk::{env, FunctionError};
use near_sdk_macros::NearSchema;
use near_sdk::borsh::{BorshSerialize, BorshDeserialize};

#[derive(Debug, PartialEq, NearSchema, BorshSerialize, BorshDeserialize)]
#[abi(borsh)]
pub enum MessengerError {
    GroupAlreadyExists,
    GroupNotFound,
    NotGroupOwner,
    NotInGroup,
    InvalidTopic,
    MessageTooLong,
    Unauthorized,
    MissingInput,
}

impl FunctionError for MessengerError {
    fn panic(&self) -> ! {
        env::panic_str(match self {
            MessengerError::GroupAlreadyExists => "group already exists",
            MessengerError::GroupNotFound => "group not found",
            MessengerError::NotGroupOwner => "not owner of this group",
            MessengerError::NotInGroup => "not in group",
            MessengerError::InvalidTopic => "topic must be 1-64 characters",
            MessengerError::MessageTooLong => "message too long",
            MessengerError::Unauthorized => "not the contract manager",
            MessengerError::MissingInput => "no code to deploy",
        })
    }
}
