/// # Vault Governance – Event Logging
///
/// Defines a **consistent, structured event schema** for every state-changing
/// action in the contract: proposal lifecycle steps, registry mutations and
/// vault request transitions.
///
/// ## Design principles
/// - Each event is its own `#[contractevent]` struct. The macro auto-derives
///   the lowercase snake_case struct name as the leading topic and exposes a
///   `.publish(&env)` method.
/// - `emit_*` helper functions wrap struct construction and call `.publish`,
///   providing a single call-site per action.
/// - Fields are publicly observable primitives only (`Address`, `Symbol`,
///   `u32`, `u64`, `bool`). Proposal kind and action are rendered as
///   `Symbol` tags (`"owner"`/`"head"`/`"assistant"`, `"add"`/`"remove"`,
///   `"open"`/`"close"`) so consumers can filter without decoding contract
///   types.
/// - An execution event is published even when the quorum-reaching vote's
///   mutation is refused; `applied` distinguishes the two outcomes. These
///   events are the sole audit trail of the contract.
use soroban_sdk::{contractevent, Address, Env, Symbol};

// ─────────────────────────────────────────────────────────────────────────────
// Proposal lifecycle events
// ─────────────────────────────────────────────────────────────────────────────

/// Emitted when an owner set is first stored.
#[contractevent]
#[derive(Clone, Debug)]
pub struct InitializedEvent {
    pub owner_count: u32,
    pub timestamp: u64,
}

/// Emitted when a role proposal is created.
///
/// # Fields
/// * `kind` – Role namespace tag (`"owner"`, `"head"`, `"assistant"`).
/// * `proposal_id` – Id within that namespace.
/// * `action` – `"add"` or `"remove"`.
/// * `target` – Address the proposal affects.
/// * `proposer` – The creating owner; their vote is already counted.
/// * `owners_snapshot` / `required_votes` – Quorum inputs frozen at creation.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalCreatedEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub action: Symbol,
    pub target: Address,
    pub proposer: Address,
    pub owners_snapshot: u32,
    pub required_votes: u32,
    pub timestamp: u64,
}

/// Emitted for every explicit vote (the proposer's implicit creation vote
/// does not produce one).
#[contractevent]
#[derive(Clone, Debug)]
pub struct VoteCastEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub voter: Address,
    pub votes: u32,
    pub required_votes: u32,
    pub timestamp: u64,
}

/// Emitted when a proposal reaches quorum and is consumed.
///
/// `actor` is the voter (or proposer) whose call crossed the threshold.
/// `applied` is `false` when the registry refused the mutation (target no
/// longer an owner, or last-owner protection); the proposal is consumed
/// either way.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalExecutedEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub action: Symbol,
    pub target: Address,
    pub actor: Address,
    pub applied: bool,
    pub timestamp: u64,
}

/// Emitted when a timed-out proposal is reaped.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalExpiredEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub reaper: Address,
    pub timestamp: u64,
}

/// Emitted on every actual registry mutation (owner added/removed, head or
/// assistant set/cleared).
#[contractevent]
#[derive(Clone, Debug)]
pub struct RoleChangedEvent {
    pub kind: Symbol,
    pub action: Symbol,
    pub target: Address,
    pub timestamp: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Vault request events
// ─────────────────────────────────────────────────────────────────────────────

/// Emitted when the head or assistant opens a vault request.
#[contractevent]
#[derive(Clone, Debug)]
pub struct VaultRequestedEvent {
    pub action: Symbol,
    pub requester: Address,
    pub expires_at: u64,
    pub timestamp: u64,
}

/// Emitted for every approval call, including ones whose flags were already
/// set.
#[contractevent]
#[derive(Clone, Debug)]
pub struct VaultApprovedEvent {
    pub action: Symbol,
    pub approver: Address,
    pub head_approved: bool,
    pub assistant_approved: bool,
    pub timestamp: u64,
}

/// Emitted when both approvals are present and the vault flag flips.
#[contractevent]
#[derive(Clone, Debug)]
pub struct VaultExecutedEvent {
    pub action: Symbol,
    pub actor: Address,
    pub vault_open: bool,
    pub timestamp: u64,
}

/// Emitted when the requester withdraws their own pending request.
#[contractevent]
#[derive(Clone, Debug)]
pub struct VaultCancelledEvent {
    pub action: Symbol,
    pub requester: Address,
    pub timestamp: u64,
}

/// Emitted when a timed-out vault request is reaped.
#[contractevent]
#[derive(Clone, Debug)]
pub struct VaultRequestExpiredEvent {
    pub action: Symbol,
    pub reaper: Address,
    pub timestamp: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Emitter helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn emit_initialized(e: &Env, event: InitializedEvent) {
    event.publish(e);
}

/// Emit a proposal-created event.
/// Call this after the proposal record and voter list are stored.
pub fn emit_proposal_created(e: &Env, event: ProposalCreatedEvent) {
    event.publish(e);
}

/// Emit a vote-cast event.
/// Call this after the voter is recorded, before attempting execution.
pub fn emit_vote_cast(e: &Env, event: VoteCastEvent) {
    event.publish(e);
}

/// Emit a proposal-executed event.
/// Call this after the proposal is marked inactive, whether or not the
/// mutation was applied.
pub fn emit_proposal_executed(e: &Env, event: ProposalExecutedEvent) {
    event.publish(e);
}

pub fn emit_proposal_expired(e: &Env, event: ProposalExpiredEvent) {
    event.publish(e);
}

/// Emit a role-changed event.
/// Call this only when the registry mutation actually happened.
pub fn emit_role_changed(e: &Env, event: RoleChangedEvent) {
    event.publish(e);
}

pub fn emit_vault_requested(e: &Env, event: VaultRequestedEvent) {
    event.publish(e);
}

pub fn emit_vault_approved(e: &Env, event: VaultApprovedEvent) {
    event.publish(e);
}

/// Emit a vault-executed event.
/// Call this after the vault flag is flipped and the request cleared.
pub fn emit_vault_executed(e: &Env, event: VaultExecutedEvent) {
    event.publish(e);
}

pub fn emit_vault_cancelled(e: &Env, event: VaultCancelledEvent) {
    event.publish(e);
}

pub fn emit_vault_request_expired(e: &Env, event: VaultRequestExpiredEvent) {
    event.publish(e);
}
