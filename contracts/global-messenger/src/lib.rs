use crate::errors::MessengerError;
use crate::state::GroupStore;
use crate::types::GroupCreatedRecord;
use near_sdk::{env, near, AccountId, PanicOnDefault, Promise};

pub mod errors;
mod events;
pub mod state;
pub mod types;

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct GlobalMessenger {
    state: GroupStore,
}

#[near]
impl GlobalMessenger {
    #[init]
    pub fn new() -> Self {
        Self {
            state: GroupStore::new(),
        }
    }

    #[handle_result]
    pub fn create_group(&mut self, topic: String) -> Result<(), MessengerError> {
        self.state
            .create_group(&env::predecessor_account_id(), topic)
    }

    #[handle_result]
    pub fn get_group_owner(&self, topic: String) -> Result<AccountId, MessengerError> {
        self.state.group_owner(&topic)
    }

    #[handle_result]
    pub fn add_user_to_group(
        &mut self,
        topic: String,
        member: AccountId,
    ) -> Result<(), MessengerError> {
        self.state
            .add_user_to_group(&env::predecessor_account_id(), &topic, member)
    }

    // Reads the caller from the environment, so this is a call, not a view.
    #[handle_result]
    pub fn get_group_message(&self, topic: String) -> Result<String, MessengerError> {
        self.state
            .group_message(&env::predecessor_account_id(), &topic)
    }

    #[handle_result]
    pub fn send_group_message(
        &mut self,
        topic: String,
        message: String,
    ) -> Result<(), MessengerError> {
        self.state
            .send_group_message(&env::predecessor_account_id(), &topic, message)
    }

    pub fn group_exists(&self, topic: String) -> bool {
        self.state.group_exists(&topic)
    }

    pub fn is_group_member(&self, topic: String, account_id: AccountId) -> bool {
        self.state.is_member(&topic, &account_id)
    }

    pub fn get_group_members(&self, topic: String, limit: u32, offset: u32) -> Vec<AccountId> {
        self.state.group_members(&topic, limit, offset)
    }

    pub fn get_group_created_events(
        &self,
        from_index: u64,
        to_index: u64,
    ) -> Vec<GroupCreatedRecord> {
        self.state.created_events(from_index, to_index)
    }

    pub fn get_group_created_count(&self) -> u64 {
        self.state.created_count()
    }

    pub fn get_manager(&self) -> AccountId {
        self.state.manager.clone()
    }

    #[handle_result]
    pub fn set_manager(&mut self, new_manager: AccountId) -> Result<(), MessengerError> {
        self.state
            .set_manager(&env::predecessor_account_id(), new_manager)
    }

    #[handle_result]
    pub fn update_contract(&mut self) -> Result<Promise, MessengerError> {
        self.state.update_contract()
    }

    #[private]
    #[init(ignore_state)]
    pub fn migrate() -> Self {
        Self {
            state: GroupStore::migrate(),
        }
    }
}
