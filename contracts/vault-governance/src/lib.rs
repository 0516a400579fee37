//! # Vault Governance Contract
//!
//! Governance and access control for a shared vault run by a rotating owner
//! set plus two gatekeeper roles, a head and an assistant:
//!
//! - **Role proposals**: owners add/remove owners and appoint/dismiss the
//!   head and assistant through one generic n−f threshold-voting engine
//!   with creation-time quorum snapshots and 24-hour expiry.
//! - **Vault gating**: the head and assistant jointly approve opening or
//!   closing the vault through a singleton 2-of-2 request with 5-minute
//!   expiry, auto-executing on the second approval.
//!
//! Expiry is never enforced by a scheduler; it is re-derived from the ledger
//! timestamp at each call, and timed-out records are reaped by explicit
//! expire calls.

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod errors;
mod events;
mod proposals;
mod quorum;
mod roles;
mod storage;
mod types;
mod vault;

#[cfg(test)]
mod tests;

pub use errors::ContractError;
pub use types::{RoleAction, RoleKind, RoleProposal, VaultAction, VaultRequest};

use events::InitializedEvent;
use storage::DataKey;

/// The vault governance contract.
///
/// Each method delegates to the corresponding module implementation; the
/// mutating entry points take the authenticated caller explicitly and
/// require their auth before any role check.
#[contract]
pub struct VaultGovernanceContract;

#[contractimpl]
impl VaultGovernanceContract {
    /// Initialize the contract with its starting owner set.
    ///
    /// Head and assistant start unset and the vault starts closed. Must be
    /// called before any other operation.
    ///
    /// # Errors
    /// - [`ContractError::AlreadyInitialized`] on a second call.
    /// - [`ContractError::EmptyOwnerList`] for an empty list.
    /// - [`ContractError::DuplicateOwner`] for a repeated address.
    pub fn initialize(env: Env, owners: Vec<Address>) -> Result<(), ContractError> {
        if env.storage().instance().has(&DataKey::Owners) {
            return Err(ContractError::AlreadyInitialized);
        }
        if owners.is_empty() {
            return Err(ContractError::EmptyOwnerList);
        }
        for i in 0..owners.len() {
            for j in (i + 1)..owners.len() {
                if owners.get_unchecked(i) == owners.get_unchecked(j) {
                    return Err(ContractError::DuplicateOwner);
                }
            }
        }

        env.storage().instance().set(&DataKey::Owners, &owners);
        env.storage().instance().set(&DataKey::VaultOpen, &false);

        events::emit_initialized(
            &env,
            InitializedEvent {
                owner_count: owners.len(),
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────

    /// Snapshot copy of the owner set; empty before initialization. Order
    /// carries no meaning (removal is swap-remove).
    pub fn list_owners(env: Env) -> Vec<Address> {
        roles::owners(&env).unwrap_or_else(|_| Vec::new(&env))
    }

    pub fn is_owner(env: Env, addr: Address) -> bool {
        roles::is_owner(&env, &addr)
    }

    pub fn current_head(env: Env) -> Option<Address> {
        roles::head(&env)
    }

    pub fn current_assistant(env: Env) -> Option<Address> {
        roles::assistant(&env)
    }

    pub fn is_vault_open(env: Env) -> bool {
        vault::is_vault_open(&env)
    }

    /// Returns a proposal by kind and id, if it exists.
    pub fn get_proposal(env: Env, kind: RoleKind, id: u64) -> Option<RoleProposal> {
        proposals::get_proposal(&env, kind, id)
    }

    /// Addresses that have voted on a proposal (the proposer included).
    pub fn get_proposal_voters(env: Env, kind: RoleKind, id: u64) -> Vec<Address> {
        proposals::get_voters(&env, kind, id)
    }

    /// Ids ever allocated in a kind's namespace.
    pub fn proposal_count(env: Env, kind: RoleKind) -> u64 {
        proposals::proposal_count(&env, kind)
    }

    /// The pending vault request, or `None` when the slot is idle.
    pub fn get_vault_request(env: Env) -> Option<VaultRequest> {
        vault::get_request(&env)
    }

    // ── Role proposals ────────────────────────────────────────────────────

    /// Create a role proposal; the caller's own vote counts immediately.
    pub fn propose(
        env: Env,
        caller: Address,
        kind: RoleKind,
        action: RoleAction,
        target: Address,
    ) -> Result<u64, ContractError> {
        proposals::propose(&env, caller, kind, action, target)
    }

    /// Vote on an active proposal; executes in the same call when the vote
    /// crosses the quorum threshold.
    pub fn vote(env: Env, caller: Address, kind: RoleKind, id: u64) -> Result<(), ContractError> {
        proposals::vote(&env, caller, kind, id)
    }

    /// Reap a proposal whose 24-hour window has passed. Open to anyone.
    pub fn expire_proposal(
        env: Env,
        caller: Address,
        kind: RoleKind,
        id: u64,
    ) -> Result<(), ContractError> {
        proposals::expire(&env, caller, kind, id)
    }

    // ── Vault requests ────────────────────────────────────────────────────

    /// Request that the vault be opened (head or assistant only).
    pub fn request_open(env: Env, caller: Address) -> Result<(), ContractError> {
        vault::request_open(&env, caller)
    }

    /// Request that the vault be closed (head or assistant only).
    pub fn request_close(env: Env, caller: Address) -> Result<(), ContractError> {
        vault::request_close(&env, caller)
    }

    /// Approve the pending request with every role the caller holds;
    /// executes immediately once both approvals are present.
    pub fn approve_request(env: Env, caller: Address) -> Result<(), ContractError> {
        vault::approve(&env, caller)
    }

    /// Withdraw the pending request (original requester only).
    pub fn cancel_request(env: Env, caller: Address) -> Result<(), ContractError> {
        vault::cancel(&env, caller)
    }

    /// Reap a request whose 5-minute window has passed (head or assistant).
    pub fn expire_request(env: Env, caller: Address) -> Result<(), ContractError> {
        vault::expire(&env, caller)
    }
}
