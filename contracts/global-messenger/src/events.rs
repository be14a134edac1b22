use near_sdk::{near, AccountId};

#[near(event_json(standard = "nep297"))]
pub enum MessengerEvent {
    #[event_version("1.0.0")]
    GroupCreated { topic: String, owner: AccountId },
    #[event_version("1.0.0")]
    MemberAdded { topic: String, member: AccountId },
    #[event_version("1.0.0")]
    MessageSent { topic: String, sender: AccountId },
    #[event_version("1.0.0")]
    ContractUpgraded { manager: AccountId, timestamp: u64 },
    #[event_version("1.0.0")]
    ManagerChanged { old_manager: AccountId, new_manager: AccountId, timestamp: u64 },
    #[event_version("1.0.0")]
    StateMigrated { old_version: String, new_version: String },
}
