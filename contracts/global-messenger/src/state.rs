use crate::errors::MessengerError;
use crate::events::MessengerEvent;
use crate::types::{Group, GroupCreatedRecord};
use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::{IterableSet, LookupMap, Vector};
use near_sdk::{env, log, AccountId, BorshStorageKey, Gas, NearToken, Promise};
use semver::Version;

const CALL_GAS: Gas = Gas::from_tgas(200);
const NO_ARGS: Vec<u8> = vec![];

// Topics double as storage keys, so their length is bounded.
pub const MAX_TOPIC_LEN: usize = 64;
pub const MAX_MESSAGE_LEN: usize = 1024;

#[derive(BorshSerialize, BorshDeserialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
pub enum StorageKey {
    Groups,
    GroupMembers { topic: String },
    CreatedLog,
}

#[derive(BorshSerialize, BorshDeserialize, near_sdk_macros::NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(borsh)]
pub struct GroupStore {
    pub version: String,
    pub groups: LookupMap<String, Group>,
    pub created_log: Vector<GroupCreatedRecord>,
    pub manager: AccountId,
}

impl GroupStore {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            groups: LookupMap::new(StorageKey::Groups),
            created_log: Vector::new(StorageKey::CreatedLog),
            manager: env::predecessor_account_id(),
        }
    }

    pub fn create_group(
        &mut self,
        caller: &AccountId,
        topic: String,
    ) -> Result<(), MessengerError> {
        log!("Creating group: {} owned by {}", topic, caller);
        if topic.is_empty() || topic.len() > MAX_TOPIC_LEN {
            return Err(MessengerError::InvalidTopic);
        }
        if self.groups.contains_key(&topic) {
            return Err(MessengerError::GroupAlreadyExists);
        }

        let members = IterableSet::new(StorageKey::GroupMembers {
            topic: topic.clone(),
        });
        self.groups.insert(
            topic.clone(),
            Group {
                owner: caller.clone(),
                members,
                message: String::new(),
            },
        );
        self.created_log.push(GroupCreatedRecord {
            topic: topic.clone(),
            owner: caller.clone(),
            block_height: env::block_height(),
            timestamp_ms: env::block_timestamp_ms(),
        });

        MessengerEvent::GroupCreated {
            topic,
            owner: caller.clone(),
        }
        .emit();
        Ok(())
    }

    pub fn group_owner(&self, topic: &str) -> Result<AccountId, MessengerError> {
        self.groups
            .get(topic)
            .map(|group| group.owner.clone())
            .ok_or(MessengerError::GroupNotFound)
    }

    pub fn add_user_to_group(
        &mut self,
        caller: &AccountId,
        topic: &str,
        member: AccountId,
    ) -> Result<(), MessengerError> {
        log!("Adding {} to group: {}", member, topic);
        let group = self
            .groups
            .get_mut(topic)
            .ok_or(MessengerError::GroupNotFound)?;
        if &group.owner != caller {
            return Err(MessengerError::NotGroupOwner);
        }
        if member == group.owner {
            // The owner is a member already, without an entry in the set.
            return Ok(());
        }
        if group.members.insert(member.clone()) {
            MessengerEvent::MemberAdded {
                topic: topic.to_string(),
                member,
            }
            .emit();
        }
        Ok(())
    }

    pub fn group_message(
        &self,
        caller: &AccountId,
        topic: &str,
    ) -> Result<String, MessengerError> {
        let group = self.groups.get(topic).ok_or(MessengerError::GroupNotFound)?;
        if !Self::in_group(group, caller) {
            return Err(MessengerError::NotInGroup);
        }
        Ok(group.message.clone())
    }

    pub fn send_group_message(
        &mut self,
        caller: &AccountId,
        topic: &str,
        message: String,
    ) -> Result<(), MessengerError> {
        if message.len() > MAX_MESSAGE_LEN {
            return Err(MessengerError::MessageTooLong);
        }
        let group = self
            .groups
            .get_mut(topic)
            .ok_or(MessengerError::GroupNotFound)?;
        if !Self::in_group(group, caller) {
            return Err(MessengerError::NotInGroup);
        }
        group.message = message;
        MessengerEvent::MessageSent {
            topic: topic.to_string(),
            sender: caller.clone(),
        }
        .emit();
        Ok(())
    }

    pub fn group_exists(&self, topic: &str) -> bool {
        self.groups.contains_key(topic)
    }

    pub fn is_member(&self, topic: &str, account_id: &AccountId) -> bool {
        self.groups
            .get(topic)
            .is_some_and(|group| Self::in_group(group, account_id))
    }

    pub fn group_members(&self, topic: &str, limit: u32, offset: u32) -> Vec<AccountId> {
        assert!(limit <= 100, "Limit exceeds maximum allowed value");
        let group = match self.groups.get(topic) {
            Some(group) => group,
            None => return Vec::new(),
        };
        let start = offset as usize;
        let end = offset.saturating_add(limit) as usize;
        group
            .members
            .iter()
            .skip(start)
            .take(end - start)
            .cloned()
            .collect()
    }

    // Range is half-open and the upper bound clamps to the log length.
    pub fn created_events(&self, from_index: u64, to_index: u64) -> Vec<GroupCreatedRecord> {
        let to = to_index.min(u64::from(self.created_log.len()));
        if from_index >= to {
            return Vec::new();
        }
        self.created_log
            .iter()
            .skip(from_index as usize)
            .take((to - from_index) as usize)
            .cloned()
            .collect()
    }

    pub fn created_count(&self) -> u64 {
        u64::from(self.created_log.len())
    }

    fn in_group(group: &Group, account_id: &AccountId) -> bool {
        &group.owner == account_id || group.members.contains(account_id)
    }

    pub fn set_manager(
        &mut self,
        caller: &AccountId,
        new_manager: AccountId,
    ) -> Result<(), MessengerError> {
        if caller != &self.manager {
            return Err(MessengerError::Unauthorized);
        }
        log!("Changing manager from {} to {}", caller, new_manager);
        self.manager = new_manager.clone();
        MessengerEvent::ManagerChanged {
            old_manager: caller.clone(),
            new_manager,
            timestamp: env::block_timestamp_ms(),
        }
        .emit();
        Ok(())
    }

    pub fn update_contract(&mut self) -> Result<Promise, MessengerError> {
        if env::predecessor_account_id() != self.manager {
            return Err(MessengerError::Unauthorized);
        }
        let code = env::input()
            .filter(|input| !input.is_empty())
            .ok_or(MessengerError::MissingInput)?
            .to_vec();
        log!("Upgrading contract by manager: {}", self.manager);
        MessengerEvent::ContractUpgraded {
            manager: self.manager.clone(),
            timestamp: env::block_timestamp_ms(),
        }
        .emit();
        Ok(Promise::new(env::current_account_id())
            .deploy_contract(code)
            .function_call(
                "migrate".to_string(),
                NO_ARGS,
                NearToken::from_near(0),
                CALL_GAS,
            ))
    }

    pub fn migrate() -> Self {
        const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
        let current_version =
            Version::parse(CURRENT_VERSION).expect("Invalid current version in Cargo.toml");

        let state_bytes: Vec<u8> = env::state_read().unwrap_or_default();

        // The stored layout is unchanged so far, only the version string moves.
        if let Ok(mut state) = near_sdk::borsh::from_slice::<GroupStore>(&state_bytes) {
            if let Ok(state_version) = Version::parse(&state.version) {
                if state_version >= current_version {
                    env::log_str("State is at current or newer version, no migration needed");
                    return state;
                }
                env::log_str(&format!("Migrating from state version {}", state.version));
                let old_version = state.version.clone();
                state.version = CURRENT_VERSION.to_string();
                MessengerEvent::StateMigrated {
                    old_version,
                    new_version: CURRENT_VERSION.to_string(),
                }
                .emit();
                return state;
            }
        }

        env::log_str("No valid prior state found or unknown version, initializing new state");
        Self::new()
    }
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new()
    }
}
