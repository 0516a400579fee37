use soroban_sdk::contracttype;

use crate::types::RoleKind;

/// Storage keys for all contract state.
///
/// The role registry and the vault flag live in instance storage; proposal
/// records, their voter lists and the singleton vault request live in
/// persistent storage.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Owner set: Vec<Address>
    Owners,
    /// Current head, absent when unset
    Head,
    /// Current assistant, absent when unset
    Assistant,
    /// Vault gate flag: bool
    VaultOpen,

    /// Per-kind proposal id counter: u64
    ProposalCounter(RoleKind),
    /// Proposal record: RoleProposal
    Proposal(RoleKind, u64),
    /// Addresses that voted on a proposal: Vec<Address>
    ProposalVoters(RoleKind, u64),

    /// Singleton pending vault request: VaultRequest
    VaultRequest,
}
