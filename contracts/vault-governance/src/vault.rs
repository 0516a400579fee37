//! # Vault Request State Machine
//!
//! A 2-of-2 approval gate over the single `vault_open` flag. The head and
//! assistant must both approve an open or close request before it executes;
//! execution happens the instant the second approval lands, in either order,
//! including within the creating call itself.
//!
//! There is exactly one request slot: the singleton record's presence IS the
//! pending state, so a new request cannot start while one is stored. Role
//! eligibility is read live from the registry at every call; a head replaced
//! mid-request is honored immediately.

use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::events::{
    self, VaultApprovedEvent, VaultCancelledEvent, VaultExecutedEvent, VaultRequestExpiredEvent,
    VaultRequestedEvent,
};
use crate::roles;
use crate::storage::DataKey;
use crate::types::{VaultAction, VaultRequest};

/// Approval window: vault requests expire 5 minutes after creation.
pub const REQUEST_LIFETIME_SECS: u64 = 5 * 60;

pub fn is_vault_open(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::VaultOpen)
        .unwrap_or(false)
}

pub fn get_request(env: &Env) -> Option<VaultRequest> {
    env.storage().persistent().get(&DataKey::VaultRequest)
}

fn save_request(env: &Env, request: &VaultRequest) {
    env.storage()
        .persistent()
        .set(&DataKey::VaultRequest, request);
}

fn clear_request(env: &Env) {
    env.storage().persistent().remove(&DataKey::VaultRequest);
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Request that the vault be opened.
pub fn request_open(env: &Env, caller: Address) -> Result<(), ContractError> {
    create_request(env, caller, VaultAction::Open)
}

/// Request that the vault be closed.
pub fn request_close(env: &Env, caller: Address) -> Result<(), ContractError> {
    create_request(env, caller, VaultAction::Close)
}

/// Opens the singleton request with the caller's own approval already set.
///
/// A caller holding both roles sets both flags and the request executes
/// within this same call.
///
/// # Errors
/// - [`ContractError::Unauthorized`] if the caller is neither head nor
///   assistant.
/// - [`ContractError::RequestAlreadyPending`] while another request is
///   stored, regardless of its type.
/// - [`ContractError::VaultAlreadyOpen`] / [`ContractError::VaultAlreadyClosed`]
///   when the vault is already in the target state.
fn create_request(env: &Env, caller: Address, action: VaultAction) -> Result<(), ContractError> {
    roles::require_gatekeeper(env, &caller)?;

    if env.storage().persistent().has(&DataKey::VaultRequest) {
        return Err(ContractError::RequestAlreadyPending);
    }
    let open = is_vault_open(env);
    match action {
        VaultAction::Open if open => return Err(ContractError::VaultAlreadyOpen),
        VaultAction::Close if !open => return Err(ContractError::VaultAlreadyClosed),
        _ => {}
    }

    let now = env.ledger().timestamp();
    let request = VaultRequest {
        action,
        requester: caller.clone(),
        head_approved: roles::head(env).as_ref() == Some(&caller),
        assistant_approved: roles::assistant(env).as_ref() == Some(&caller),
        created_at: now,
        expires_at: now + REQUEST_LIFETIME_SECS,
    };
    save_request(env, &request);

    events::emit_vault_requested(
        env,
        VaultRequestedEvent {
            action: action.tag(env),
            requester: caller.clone(),
            expires_at: request.expires_at,
            timestamp: now,
        },
    );

    if request.is_fully_approved() {
        execute(env, &caller, &request);
    }
    Ok(())
}

/// Records the caller's approval for every role they currently hold and
/// executes the request once both flags are true.
///
/// Re-approval by a role whose flag is already set is not a replay failure;
/// the write is idempotent and the approval event is still published.
///
/// # Errors
/// - [`ContractError::Unauthorized`] if the caller is neither head nor
///   assistant.
/// - [`ContractError::NoPendingRequest`] when the slot is empty.
/// - [`ContractError::RequestExpired`] past the window; the record stays
///   until [`expire`] reaps it.
pub fn approve(env: &Env, caller: Address) -> Result<(), ContractError> {
    roles::require_gatekeeper(env, &caller)?;

    let mut request = get_request(env).ok_or(ContractError::NoPendingRequest)?;
    let now = env.ledger().timestamp();
    if request.is_expired(now) {
        return Err(ContractError::RequestExpired);
    }

    if roles::head(env).as_ref() == Some(&caller) {
        request.head_approved = true;
    }
    if roles::assistant(env).as_ref() == Some(&caller) {
        request.assistant_approved = true;
    }
    save_request(env, &request);

    events::emit_vault_approved(
        env,
        VaultApprovedEvent {
            action: request.action.tag(env),
            approver: caller.clone(),
            head_approved: request.head_approved,
            assistant_approved: request.assistant_approved,
            timestamp: now,
        },
    );

    if request.is_fully_approved() {
        execute(env, &caller, &request);
    }
    Ok(())
}

/// Withdraws the pending request. Only its original requester may cancel,
/// and there is no time restriction.
///
/// # Errors
/// - [`ContractError::Unauthorized`] if the caller is neither head nor
///   assistant.
/// - [`ContractError::NoPendingRequest`] when the slot is empty.
/// - [`ContractError::NotRequester`] for any other gatekeeper.
pub fn cancel(env: &Env, caller: Address) -> Result<(), ContractError> {
    roles::require_gatekeeper(env, &caller)?;

    let request = get_request(env).ok_or(ContractError::NoPendingRequest)?;
    if request.requester != caller {
        return Err(ContractError::NotRequester);
    }
    clear_request(env);

    events::emit_vault_cancelled(
        env,
        VaultCancelledEvent {
            action: request.action.tag(env),
            requester: caller,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}

/// Reaps a request whose approval window has passed. Any current gatekeeper
/// may reap, not just the requester.
///
/// # Errors
/// - [`ContractError::Unauthorized`] if the caller is neither head nor
///   assistant.
/// - [`ContractError::NoPendingRequest`] when the slot is empty.
/// - [`ContractError::RequestNotYetExpired`] while the window is running
///   (`now <= expires_at`).
pub fn expire(env: &Env, caller: Address) -> Result<(), ContractError> {
    roles::require_gatekeeper(env, &caller)?;

    let request = get_request(env).ok_or(ContractError::NoPendingRequest)?;
    let now = env.ledger().timestamp();
    if now <= request.expires_at {
        return Err(ContractError::RequestNotYetExpired);
    }
    clear_request(env);

    events::emit_vault_request_expired(
        env,
        VaultRequestExpiredEvent {
            action: request.action.tag(env),
            reaper: caller,
            timestamp: now,
        },
    );
    Ok(())
}

/// Flips the vault flag and clears the slot back to idle. Reached only from
/// the two approval points, never independently.
fn execute(env: &Env, actor: &Address, request: &VaultRequest) {
    let open = matches!(request.action, VaultAction::Open);
    env.storage().instance().set(&DataKey::VaultOpen, &open);
    clear_request(env);

    events::emit_vault_executed(
        env,
        VaultExecutedEvent {
            action: request.action.tag(env),
            actor: actor.clone(),
            vault_open: open,
            timestamp: env.ledger().timestamp(),
        },
    );
}
