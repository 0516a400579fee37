//! Role registry: the owner set plus the head and assistant slots.
//!
//! This module is a pure mutation target. It holds no voting logic; the
//! proposal engine is the only writer of the owner set and the role slots,
//! and the vault state machine only reads them.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::storage::DataKey;

/// Load the owner set, failing when the contract was never initialized.
pub fn owners(env: &Env) -> Result<Vec<Address>, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Owners)
        .ok_or(ContractError::NotInitialized)
}

fn save_owners(env: &Env, owners: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Owners, owners);
}

pub fn is_owner(env: &Env, addr: &Address) -> bool {
    owners(env).map(|o| o.contains(addr)).unwrap_or(false)
}

/// Add an owner.
///
/// # Errors
/// - [`ContractError::DuplicateOwner`] if the address is already present.
pub fn add_owner(env: &Env, addr: &Address) -> Result<(), ContractError> {
    let mut owners = owners(env)?;
    if owners.contains(addr) {
        return Err(ContractError::DuplicateOwner);
    }
    owners.push_back(addr.clone());
    save_owners(env, &owners);
    Ok(())
}

/// Remove an owner by swap-remove: the last entry takes the vacated slot, so
/// survivor order is not preserved and callers must not rely on it.
///
/// # Errors
/// - [`ContractError::NotOwner`] if the address is absent.
/// - [`ContractError::LastOwnerProtected`] if it is the sole owner.
pub fn remove_owner(env: &Env, addr: &Address) -> Result<(), ContractError> {
    let mut owners = owners(env)?;
    let idx = owners
        .first_index_of(addr)
        .ok_or(ContractError::NotOwner)?;
    if owners.len() == 1 {
        return Err(ContractError::LastOwnerProtected);
    }
    let last = owners.len() - 1;
    if idx != last {
        owners.set(idx, owners.get_unchecked(last));
    }
    owners.pop_back_unchecked();
    save_owners(env, &owners);
    Ok(())
}

pub fn head(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Head)
}

pub fn assistant(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Assistant)
}

/// Unconditional replacement; callers have already validated the target.
pub fn set_head(env: &Env, head: Option<Address>) {
    match head {
        Some(addr) => env.storage().instance().set(&DataKey::Head, &addr),
        None => env.storage().instance().remove(&DataKey::Head),
    }
}

pub fn set_assistant(env: &Env, assistant: Option<Address>) {
    match assistant {
        Some(addr) => env.storage().instance().set(&DataKey::Assistant, &addr),
        None => env.storage().instance().remove(&DataKey::Assistant),
    }
}

/// True when the address currently holds the head or assistant slot.
pub fn is_gatekeeper(env: &Env, addr: &Address) -> bool {
    head(env).as_ref() == Some(addr) || assistant(env).as_ref() == Some(addr)
}

/// Authenticate the caller and check owner membership.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let owners = owners(env)?;
    if !owners.contains(caller) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Authenticate the caller and check that they hold the head or assistant
/// role right now. Eligibility is always read live, never snapshotted.
pub fn require_gatekeeper(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    if !is_gatekeeper(env, caller) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
