//! # Threshold Proposal Engine
//!
//! One generic n−f voting primitive covering all three role kinds
//! (owner membership, head appointment, assistant appointment).
//!
//! ## How It Works
//! 1. An owner creates a proposal with [`propose`]; their own vote is
//!    counted immediately and the quorum threshold is frozen from the
//!    owner-count snapshot.
//! 2. Other owners vote with [`vote`]; each voter is recorded once and the
//!    engine attempts execution after every vote.
//! 3. The vote that crosses the threshold consumes the proposal and applies
//!    the registry mutation in the same call.
//! 4. A proposal that never reaches quorum stays in storage until anyone
//!    reaps it with [`expire`] after its 24-hour window.
//!
//! ## Safety Guarantees
//! - Only owners can propose or vote.
//! - Each owner votes at most once per proposal.
//! - Proposal ids are strictly increasing per kind and never reused.
//! - Quorum is evaluated against the creation-time snapshot only; later
//!   membership changes cannot dilute or rescue an in-flight proposal.
//! - A consumed proposal never executes twice.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::events::{
    self, ProposalCreatedEvent, ProposalExecutedEvent, ProposalExpiredEvent, RoleChangedEvent,
    VoteCastEvent,
};
use crate::quorum;
use crate::roles;
use crate::storage::DataKey;
use crate::types::{RoleAction, RoleKind, RoleProposal};

/// Voting window: proposals expire 24 hours after creation.
pub const PROPOSAL_LIFETIME_SECS: u64 = 24 * 60 * 60;

// ─────────────────────────────────────────────────────────────────────────────
// Record access
// ─────────────────────────────────────────────────────────────────────────────

fn next_id(env: &Env, kind: RoleKind) -> u64 {
    let key = DataKey::ProposalCounter(kind);
    let id: u64 = env.storage().persistent().get(&key).unwrap_or(0u64) + 1;
    env.storage().persistent().set(&key, &id);
    id
}

fn load_proposal(env: &Env, kind: RoleKind, id: u64) -> Result<RoleProposal, ContractError> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(kind, id))
        .ok_or(ContractError::ProposalNotFound)
}

fn save_proposal(env: &Env, proposal: &RoleProposal) {
    env.storage()
        .persistent()
        .set(&DataKey::Proposal(proposal.kind, proposal.id), proposal);
}

/// Ids ever allocated in a kind's namespace.
pub fn proposal_count(env: &Env, kind: RoleKind) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::ProposalCounter(kind))
        .unwrap_or(0u64)
}

pub fn get_proposal(env: &Env, kind: RoleKind, id: u64) -> Option<RoleProposal> {
    env.storage().persistent().get(&DataKey::Proposal(kind, id))
}

pub fn get_voters(env: &Env, kind: RoleKind, id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::ProposalVoters(kind, id))
        .unwrap_or_else(|| Vec::new(env))
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

fn validate_target(
    env: &Env,
    kind: RoleKind,
    action: RoleAction,
    target: &Address,
) -> Result<(), ContractError> {
    match (kind, action) {
        (RoleKind::Owner, RoleAction::Add) => {
            if roles::is_owner(env, target) {
                return Err(ContractError::DuplicateOwner);
            }
        }
        // Last-owner protection is deferred to execution time.
        (RoleKind::Owner, RoleAction::Remove) => {
            if !roles::is_owner(env, target) {
                return Err(ContractError::NotOwner);
            }
        }
        (RoleKind::Head, RoleAction::Add) => {
            if roles::head(env).as_ref() == Some(target) {
                return Err(ContractError::AlreadyHead);
            }
        }
        (RoleKind::Head, RoleAction::Remove) => match roles::head(env) {
            None => return Err(ContractError::HeadNotSet),
            Some(head) if head != *target => return Err(ContractError::NotHead),
            Some(_) => {}
        },
        (RoleKind::Assistant, RoleAction::Add) => {
            if roles::assistant(env).as_ref() == Some(target) {
                return Err(ContractError::AlreadyAssistant);
            }
        }
        (RoleKind::Assistant, RoleAction::Remove) => match roles::assistant(env) {
            None => return Err(ContractError::AssistantNotSet),
            Some(assistant) if assistant != *target => return Err(ContractError::NotAssistant),
            Some(_) => {}
        },
    }
    Ok(())
}

/// Creates a role proposal and counts the proposer's vote.
///
/// The owner-count snapshot and the quorum threshold derived from it are
/// frozen here for the proposal's whole life. Execution is attempted in the
/// same call so a single-owner registry (quorum of 1) completes immediately.
///
/// # Returns
/// The id of the new proposal within its kind's namespace.
///
/// # Errors
/// - [`ContractError::Unauthorized`] if the proposer is not an owner.
/// - The per-action target validation errors ([`ContractError::DuplicateOwner`],
///   [`ContractError::NotOwner`], [`ContractError::AlreadyHead`], ...).
pub fn propose(
    env: &Env,
    proposer: Address,
    kind: RoleKind,
    action: RoleAction,
    target: Address,
) -> Result<u64, ContractError> {
    roles::require_owner(env, &proposer)?;
    validate_target(env, kind, action, &target)?;

    let now = env.ledger().timestamp();
    let snapshot = roles::owners(env)?.len();
    let id = next_id(env, kind);
    let mut proposal = RoleProposal {
        id,
        kind,
        action,
        target: target.clone(),
        proposer: proposer.clone(),
        votes: 1,
        active: true,
        owners_snapshot: snapshot,
        required_votes: quorum::required_votes(snapshot),
        created_at: now,
        expires_at: now + PROPOSAL_LIFETIME_SECS,
    };
    save_proposal(env, &proposal);

    let mut voters = Vec::new(env);
    voters.push_back(proposer.clone());
    env.storage()
        .persistent()
        .set(&DataKey::ProposalVoters(kind, id), &voters);

    events::emit_proposal_created(
        env,
        ProposalCreatedEvent {
            kind: kind.tag(env),
            proposal_id: id,
            action: action.tag(env),
            target,
            proposer,
            owners_snapshot: snapshot,
            required_votes: proposal.required_votes,
            timestamp: now,
        },
    );

    let actor = proposal.proposer.clone();
    try_execute(env, &mut proposal, &actor)?;
    Ok(id)
}

/// Casts an owner's vote and attempts execution in the same call.
///
/// Expiry is checked against the current ledger time on every vote; an
/// expired proposal rejects the vote but stays in storage until [`expire`]
/// reaps it.
///
/// # Errors
/// - [`ContractError::Unauthorized`] if the voter is not an owner.
/// - [`ContractError::ProposalNotFound`] / [`ContractError::ProposalInactive`]
///   / [`ContractError::ProposalExpired`] for lifecycle conflicts.
/// - [`ContractError::AlreadyVoted`] on a repeat vote.
pub fn vote(env: &Env, voter: Address, kind: RoleKind, id: u64) -> Result<(), ContractError> {
    roles::require_owner(env, &voter)?;

    let mut proposal = load_proposal(env, kind, id)?;
    if !proposal.active {
        return Err(ContractError::ProposalInactive);
    }
    let now = env.ledger().timestamp();
    if proposal.is_expired(now) {
        return Err(ContractError::ProposalExpired);
    }

    let voters_key = DataKey::ProposalVoters(kind, id);
    let mut voters: Vec<Address> = env
        .storage()
        .persistent()
        .get(&voters_key)
        .unwrap_or_else(|| Vec::new(env));
    if voters.contains(&voter) {
        return Err(ContractError::AlreadyVoted);
    }
    voters.push_back(voter.clone());
    env.storage().persistent().set(&voters_key, &voters);

    proposal.votes += 1;
    save_proposal(env, &proposal);

    events::emit_vote_cast(
        env,
        VoteCastEvent {
            kind: kind.tag(env),
            proposal_id: id,
            voter: voter.clone(),
            votes: proposal.votes,
            required_votes: proposal.required_votes,
            timestamp: now,
        },
    );

    try_execute(env, &mut proposal, &voter)
}

/// Reaps a proposal whose voting window has passed. Open to any
/// authenticated caller; the only finalization path for a proposal that
/// never reached quorum. Performs no role mutation.
///
/// # Errors
/// - [`ContractError::ProposalNotFound`] / [`ContractError::ProposalInactive`]
/// - [`ContractError::ProposalNotYetExpired`] while the window is running
///   (`now <= expires_at`).
pub fn expire(env: &Env, caller: Address, kind: RoleKind, id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let mut proposal = load_proposal(env, kind, id)?;
    if !proposal.active {
        return Err(ContractError::ProposalInactive);
    }
    let now = env.ledger().timestamp();
    if now <= proposal.expires_at {
        return Err(ContractError::ProposalNotYetExpired);
    }

    proposal.active = false;
    save_proposal(env, &proposal);

    events::emit_proposal_expired(
        env,
        ProposalExpiredEvent {
            kind: kind.tag(env),
            proposal_id: id,
            reaper: caller,
            timestamp: now,
        },
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution
// ─────────────────────────────────────────────────────────────────────────────

/// Consumes the proposal and applies its mutation once quorum is reached.
///
/// The proposal is marked inactive and persisted before the registry is
/// touched, so a refused mutation (removal target no longer an owner, or
/// last-owner protection) still consumes the proposal. The execution event
/// is published in both outcomes; the refusal error is then surfaced to the
/// quorum-reaching voter.
fn try_execute(
    env: &Env,
    proposal: &mut RoleProposal,
    actor: &Address,
) -> Result<(), ContractError> {
    if proposal.votes < proposal.required_votes {
        return Ok(());
    }

    proposal.active = false;
    save_proposal(env, proposal);

    let outcome = apply_action(env, proposal.kind, proposal.action, &proposal.target);
    if outcome.is_ok() {
        events::emit_role_changed(
            env,
            RoleChangedEvent {
                kind: proposal.kind.tag(env),
                action: proposal.action.tag(env),
                target: proposal.target.clone(),
                timestamp: env.ledger().timestamp(),
            },
        );
    }
    events::emit_proposal_executed(
        env,
        ProposalExecutedEvent {
            kind: proposal.kind.tag(env),
            proposal_id: proposal.id,
            action: proposal.action.tag(env),
            target: proposal.target.clone(),
            actor: actor.clone(),
            applied: outcome.is_ok(),
            timestamp: env.ledger().timestamp(),
        },
    );
    outcome
}

/// The single strategy seam between the generic engine and the registry.
///
/// Owner removal re-validates against the live registry; head and assistant
/// removal clear the slot without a "still assigned" re-check. The asymmetry
/// is intentional and must stay.
fn apply_action(
    env: &Env,
    kind: RoleKind,
    action: RoleAction,
    target: &Address,
) -> Result<(), ContractError> {
    match (kind, action) {
        (RoleKind::Owner, RoleAction::Add) => roles::add_owner(env, target),
        (RoleKind::Owner, RoleAction::Remove) => roles::remove_owner(env, target),
        (RoleKind::Head, RoleAction::Add) => {
            roles::set_head(env, Some(target.clone()));
            Ok(())
        }
        (RoleKind::Head, RoleAction::Remove) => {
            roles::set_head(env, None);
            Ok(())
        }
        (RoleKind::Assistant, RoleAction::Add) => {
            roles::set_assistant(env, Some(target.clone()));
            Ok(())
        }
        (RoleKind::Assistant, RoleAction::Remove) => {
            roles::set_assistant(env, None);
            Ok(())
        }
    }
}
