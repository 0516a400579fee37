use soroban_sdk::{contracttype, Address, Env, Symbol};

// ========================================================================
// Proposal Types
// ========================================================================

/// Which privileged role a proposal targets. Each kind has its own
/// proposal-id namespace.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoleKind {
    Owner,
    Head,
    Assistant,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoleAction {
    Add,
    Remove,
}

/// A threshold proposal to grant or revoke a role.
///
/// `owners_snapshot` and `required_votes` are frozen at creation and are
/// never recomputed, even when the live owner set changes mid-vote.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleProposal {
    pub id: u64,
    pub kind: RoleKind,
    pub action: RoleAction,
    pub target: Address,
    pub proposer: Address,
    /// Distinct affirmative votes, including the proposer's own.
    pub votes: u32,
    pub active: bool,
    pub owners_snapshot: u32,
    pub required_votes: u32,
    pub created_at: u64,
    pub expires_at: u64,
}

// ========================================================================
// Vault Request Types
// ========================================================================

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VaultAction {
    Open,
    Close,
}

/// The singleton pending vault request. Absence of the record means no
/// request is pending.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultRequest {
    pub action: VaultAction,
    pub requester: Address,
    pub head_approved: bool,
    pub assistant_approved: bool,
    pub created_at: u64,
    pub expires_at: u64,
}

impl RoleKind {
    pub fn tag(&self, env: &Env) -> Symbol {
        match self {
            RoleKind::Owner => Symbol::new(env, "owner"),
            RoleKind::Head => Symbol::new(env, "head"),
            RoleKind::Assistant => Symbol::new(env, "assistant"),
        }
    }
}

impl RoleAction {
    pub fn tag(&self, env: &Env) -> Symbol {
        match self {
            RoleAction::Add => Symbol::new(env, "add"),
            RoleAction::Remove => Symbol::new(env, "remove"),
        }
    }
}

impl VaultAction {
    pub fn tag(&self, env: &Env) -> Symbol {
        match self {
            VaultAction::Open => Symbol::new(env, "open"),
            VaultAction::Close => Symbol::new(env, "close"),
        }
    }
}

impl RoleProposal {
    /// Expiry is a derived predicate over the supplied ledger time, never a
    /// cached flag.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }
}

impl VaultRequest {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    pub fn is_fully_approved(&self) -> bool {
        self.head_approved && self.assistant_approved
    }
}
