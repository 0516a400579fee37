#![cfg(test)]

/// # Event Logging – Tests
///
/// Verifies the emit helpers publish decodable events and that the full
/// proposal and vault flows publish the expected sequences.
///
/// `env.events().all()` returns `Vec<(Address, Vec<Val>, Val)>`; the data
/// payload is decoded through mirror `#[contracttype]` structs whose fields
/// match the event structs exactly.
use crate::events::{emit_proposal_created, ProposalCreatedEvent};
use crate::{
    proposals, roles, vault, RoleAction, RoleKind, VaultGovernanceContract,
};
use soroban_sdk::{
    contracttype,
    testutils::{Address as _, Events, Ledger},
    Address, Env, Symbol, TryFromVal, Vec,
};

// ─────────────────────────────────────────────────────────────────────────────
// Mirror types for decoding event payloads
// ─────────────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestInitializedEvent {
    pub owner_count: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestProposalCreatedEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub action: Symbol,
    pub target: Address,
    pub proposer: Address,
    pub owners_snapshot: u32,
    pub required_votes: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestVoteCastEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub voter: Address,
    pub votes: u32,
    pub required_votes: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestProposalExecutedEvent {
    pub kind: Symbol,
    pub proposal_id: u64,
    pub action: Symbol,
    pub target: Address,
    pub actor: Address,
    pub applied: bool,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestRoleChangedEvent {
    pub kind: Symbol,
    pub action: Symbol,
    pub target: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestVaultRequestedEvent {
    pub action: Symbol,
    pub requester: Address,
    pub expires_at: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestVaultApprovedEvent {
    pub action: Symbol,
    pub approver: Address,
    pub head_approved: bool,
    pub assistant_approved: bool,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestVaultExecutedEvent {
    pub action: Symbol,
    pub actor: Address,
    pub vault_open: bool,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestVaultCancelledEvent {
    pub action: Symbol,
    pub requester: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TestVaultRequestExpiredEvent {
    pub action: Symbol,
    pub reaper: Address,
    pub timestamp: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Test helpers
// ─────────────────────────────────────────────────────────────────────────────

fn setup() -> (Env, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(VaultGovernanceContract, ());
    (env, contract_id)
}

fn owner_vec(env: &Env, count: u32) -> Vec<Address> {
    let mut owners = Vec::new(env);
    for _ in 0..count {
        owners.push_back(Address::generate(env));
    }
    owners
}

// ─────────────────────────────────────────────────────────────────────────────
// Emit helper structure
// ─────────────────────────────────────────────────────────────────────────────

/// `emit_proposal_created` publishes a payload decodable field-for-field.
#[test]
fn proposal_created_event_structure() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let target = Address::generate(&env);
        let proposer = Address::generate(&env);

        emit_proposal_created(
            &env,
            ProposalCreatedEvent {
                kind: Symbol::new(&env, "owner"),
                proposal_id: 7,
                action: Symbol::new(&env, "add"),
                target: target.clone(),
                proposer: proposer.clone(),
                owners_snapshot: 4,
                required_votes: 3,
                timestamp: 100,
            },
        );

        let all = env.events().all();
        assert_eq!(all.len(), 1);
        let (_contract, _topics, data) = all.get_unchecked(0);
        let decoded: TestProposalCreatedEvent =
            TestProposalCreatedEvent::try_from_val(&env, &data)
                .expect("failed to decode ProposalCreatedEvent");

        assert_eq!(decoded.kind, Symbol::new(&env, "owner"));
        assert_eq!(decoded.proposal_id, 7);
        assert_eq!(decoded.action, Symbol::new(&env, "add"));
        assert_eq!(decoded.target, target);
        assert_eq!(decoded.proposer, proposer);
        assert_eq!(decoded.owners_snapshot, 4);
        assert_eq!(decoded.required_votes, 3);
        assert_eq!(decoded.timestamp, 100);
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Proposal flow sequences
// ─────────────────────────────────────────────────────────────────────────────

/// The canonical add-owner flow publishes
/// initialized → created → voted → voted → role_changed → executed.
#[test]
fn add_owner_flow_event_sequence() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let owners = owner_vec(&env, 4);
        let newcomer = Address::generate(&env);
        VaultGovernanceContract::initialize(env.clone(), owners.clone()).unwrap();

        let id = proposals::propose(
            &env,
            owners.get_unchecked(0),
            RoleKind::Owner,
            RoleAction::Add,
            newcomer.clone(),
        )
        .unwrap();
        proposals::vote(&env, owners.get_unchecked(1), RoleKind::Owner, id).unwrap();
        proposals::vote(&env, owners.get_unchecked(2), RoleKind::Owner, id).unwrap();

        let all = env.events().all();
        assert_eq!(all.len(), 6, "expected the full six-event sequence");

        let (_c, _t, d0) = all.get_unchecked(0);
        let initialized: TestInitializedEvent =
            TestInitializedEvent::try_from_val(&env, &d0).expect("initialized");
        assert_eq!(initialized.owner_count, 4);

        let (_c, _t, d1) = all.get_unchecked(1);
        let created: TestProposalCreatedEvent =
            TestProposalCreatedEvent::try_from_val(&env, &d1).expect("created");
        assert_eq!(created.proposal_id, id);
        assert_eq!(created.proposer, owners.get_unchecked(0));
        assert_eq!(created.required_votes, 3);

        let (_c, _t, d2) = all.get_unchecked(2);
        let first_vote: TestVoteCastEvent =
            TestVoteCastEvent::try_from_val(&env, &d2).expect("first vote");
        assert_eq!(first_vote.voter, owners.get_unchecked(1));
        assert_eq!(first_vote.votes, 2);

        let (_c, _t, d3) = all.get_unchecked(3);
        let second_vote: TestVoteCastEvent =
            TestVoteCastEvent::try_from_val(&env, &d3).expect("second vote");
        assert_eq!(second_vote.voter, owners.get_unchecked(2));
        assert_eq!(second_vote.votes, 3);

        let (_c, _t, d4) = all.get_unchecked(4);
        let changed: TestRoleChangedEvent =
            TestRoleChangedEvent::try_from_val(&env, &d4).expect("role changed");
        assert_eq!(changed.kind, Symbol::new(&env, "owner"));
        assert_eq!(changed.action, Symbol::new(&env, "add"));
        assert_eq!(changed.target, newcomer);

        let (_c, _t, d5) = all.get_unchecked(5);
        let executed: TestProposalExecutedEvent =
            TestProposalExecutedEvent::try_from_val(&env, &d5).expect("executed");
        assert_eq!(executed.proposal_id, id);
        assert_eq!(executed.actor, owners.get_unchecked(2));
        assert!(executed.applied);
    });
}

/// A refused execution still publishes the executed event, with
/// `applied = false` and no role-changed event.
#[test]
fn refused_execution_still_publishes_executed_event() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let owners = owner_vec(&env, 1);
        let sole = owners.get_unchecked(0);
        VaultGovernanceContract::initialize(env.clone(), owners.clone()).unwrap();

        let result = proposals::propose(
            &env,
            sole.clone(),
            RoleKind::Owner,
            RoleAction::Remove,
            sole.clone(),
        );
        assert!(result.is_err());

        let all = env.events().all();
        // initialized, created, executed - and no role_changed between them
        assert_eq!(all.len(), 3);

        let (_c, _t, data) = all.get_unchecked(2);
        let executed: TestProposalExecutedEvent =
            TestProposalExecutedEvent::try_from_val(&env, &data).expect("executed");
        assert!(!executed.applied);
        assert_eq!(executed.target, sole);
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Vault flow sequences
// ─────────────────────────────────────────────────────────────────────────────

/// Open flow publishes requested → approved → executed.
#[test]
fn vault_open_flow_event_sequence() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let head = Address::generate(&env);
        let assistant = Address::generate(&env);
        roles::set_head(&env, Some(head.clone()));
        roles::set_assistant(&env, Some(assistant.clone()));

        vault::request_open(&env, head.clone()).unwrap();
        vault::approve(&env, assistant.clone()).unwrap();

        let all = env.events().all();
        assert_eq!(all.len(), 3);

        let (_c, _t, d0) = all.get_unchecked(0);
        let requested: TestVaultRequestedEvent =
            TestVaultRequestedEvent::try_from_val(&env, &d0).expect("requested");
        assert_eq!(requested.action, Symbol::new(&env, "open"));
        assert_eq!(requested.requester, head);

        let (_c, _t, d1) = all.get_unchecked(1);
        let approved: TestVaultApprovedEvent =
            TestVaultApprovedEvent::try_from_val(&env, &d1).expect("approved");
        assert_eq!(approved.approver, assistant);
        assert!(approved.head_approved);
        assert!(approved.assistant_approved);

        let (_c, _t, d2) = all.get_unchecked(2);
        let executed: TestVaultExecutedEvent =
            TestVaultExecutedEvent::try_from_val(&env, &d2).expect("executed");
        assert_eq!(executed.actor, assistant);
        assert!(executed.vault_open);
    });
}

/// A combined head+assistant caller executes within the requesting call:
/// requested → executed, with no separate approval event.
#[test]
fn combined_gatekeeper_flow_event_sequence() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let both = Address::generate(&env);
        roles::set_head(&env, Some(both.clone()));
        roles::set_assistant(&env, Some(both.clone()));

        vault::request_open(&env, both.clone()).unwrap();

        let all = env.events().all();
        assert_eq!(all.len(), 2);

        let (_c, _t, d1) = all.get_unchecked(1);
        let executed: TestVaultExecutedEvent =
            TestVaultExecutedEvent::try_from_val(&env, &d1).expect("executed");
        assert_eq!(executed.actor, both);
        assert!(executed.vault_open);
    });
}

/// Cancellation publishes a cancelled event carrying the requester.
#[test]
fn vault_cancel_event_structure() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let head = Address::generate(&env);
        let assistant = Address::generate(&env);
        roles::set_head(&env, Some(head.clone()));
        roles::set_assistant(&env, Some(assistant));

        vault::request_open(&env, head.clone()).unwrap();
        vault::cancel(&env, head.clone()).unwrap();

        let all = env.events().all();
        assert_eq!(all.len(), 2);
        let (_c, _t, data) = all.get_unchecked(1);
        let cancelled: TestVaultCancelledEvent =
            TestVaultCancelledEvent::try_from_val(&env, &data).expect("cancelled");
        assert_eq!(cancelled.requester, head);
        assert_eq!(cancelled.action, Symbol::new(&env, "open"));
    });
}

/// Reaping an expired request publishes an expiry event naming the reaper.
#[test]
fn vault_expiry_event_names_the_reaper() {
    let (env, contract_id) = setup();

    env.as_contract(&contract_id, || {
        let head = Address::generate(&env);
        let assistant = Address::generate(&env);
        roles::set_head(&env, Some(head.clone()));
        roles::set_assistant(&env, Some(assistant.clone()));

        vault::request_open(&env, head).unwrap();
        env.ledger().with_mut(|li| {
            li.timestamp += vault::REQUEST_LIFETIME_SECS + 1;
        });
        vault::expire(&env, assistant.clone()).unwrap();

        let all = env.events().all();
        let (_c, _t, data) = all.get_unchecked(all.len() - 1);
        let expired: TestVaultRequestExpiredEvent =
            TestVaultRequestExpiredEvent::try_from_val(&env, &data).expect("expired");
        assert_eq!(expired.reaper, assistant);
        assert_eq!(expired.action, Symbol::new(&env, "open"));
    });
}
