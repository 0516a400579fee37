use soroban_sdk::contracterror;

/// Errors surfaced by every vault-governance operation.
///
/// Codes are stable and grouped by failure class: lifecycle (1-2),
/// authorization (3), target validation (4-12), lifecycle-state conflicts
/// (13-18), temporal checks (19-22), vote replay (23), the last-owner
/// invariant (24) and requester binding (25).
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    /// Contract already holds an owner set
    AlreadyInitialized = 1,
    /// No owner set stored yet
    NotInitialized = 2,
    /// Caller lacks the role the operation requires
    Unauthorized = 3,
    /// Initial owner list is empty
    EmptyOwnerList = 4,
    /// Address is already an owner
    DuplicateOwner = 5,
    /// Address is not an owner
    NotOwner = 6,
    /// Target is already the head
    AlreadyHead = 7,
    /// No head is currently appointed
    HeadNotSet = 8,
    /// Target is not the current head
    NotHead = 9,
    /// Target is already the assistant
    AlreadyAssistant = 10,
    /// No assistant is currently appointed
    AssistantNotSet = 11,
    /// Target is not the current assistant
    NotAssistant = 12,
    /// No proposal stored under this kind and id
    ProposalNotFound = 13,
    /// Proposal already executed or reaped
    ProposalInactive = 14,
    /// A vault request is already pending
    RequestAlreadyPending = 15,
    /// No vault request is pending
    NoPendingRequest = 16,
    /// Vault is already open
    VaultAlreadyOpen = 17,
    /// Vault is already closed
    VaultAlreadyClosed = 18,
    /// Proposal voting window has passed
    ProposalExpired = 19,
    /// Proposal voting window is still running
    ProposalNotYetExpired = 20,
    /// Vault request approval window has passed
    RequestExpired = 21,
    /// Vault request approval window is still running
    RequestNotYetExpired = 22,
    /// Voter already voted on this proposal
    AlreadyVoted = 23,
    /// Removal would leave the owner set empty
    LastOwnerProtected = 24,
    /// Only the original requester may cancel
    NotRequester = 25,
}
