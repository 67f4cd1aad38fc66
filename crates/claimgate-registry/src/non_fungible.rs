//! Non-fungible-token ledger capability.

use std::collections::HashMap;

use claimgate_types::{AccountId, ClaimgateError, RegistryId, Result, TokenId};

/// Mint/transfer capability over a non-fungible ledger.
///
/// Implementations guarantee a token has at most one owner and that an
/// existing token cannot be minted again.
pub trait NonFungibleRegistry {
    /// The handle this ledger is registered under.
    fn id(&self) -> RegistryId;

    /// Current owner of `token`, or `None` if it was never minted.
    fn owner_of(&self, token: TokenId) -> Option<AccountId>;

    /// Whether `token` exists in this ledger.
    fn is_minted(&self, token: TokenId) -> bool {
        self.owner_of(token).is_some()
    }

    /// Create `token` owned by `to`.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::TokenAlreadyMinted`] if the token exists.
    fn mint(&mut self, to: AccountId, token: TokenId) -> Result<()>;

    /// Move `token` from `from` to `to`.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::TokenNotHeld`] unless `from` currently
    /// owns the token.
    fn transfer(&mut self, from: AccountId, to: AccountId, token: TokenId) -> Result<()>;
}

/// In-memory non-fungible ledger: token -> owner.
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    id: RegistryId,
    owners: HashMap<TokenId, AccountId>,
}

impl TokenLedger {
    #[must_use]
    pub fn new(id: RegistryId) -> Self {
        Self {
            id,
            owners: HashMap::new(),
        }
    }

    /// Number of minted tokens.
    #[must_use]
    pub fn minted_count(&self) -> usize {
        self.owners.len()
    }
}

impl NonFungibleRegistry for TokenLedger {
    fn id(&self) -> RegistryId {
        self.id
    }

    fn owner_of(&self, token: TokenId) -> Option<AccountId> {
        self.owners.get(&token).copied()
    }

    fn mint(&mut self, to: AccountId, token: TokenId) -> Result<()> {
        if self.owners.contains_key(&token) {
            return Err(ClaimgateError::TokenAlreadyMinted {
                registry: self.id,
                token,
            });
        }
        self.owners.insert(token, to);
        tracing::debug!(registry = %self.id, %token, owner = %to, "token minted");
        Ok(())
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, token: TokenId) -> Result<()> {
        match self.owners.get(&token) {
            Some(owner) if *owner == from => {
                self.owners.insert(token, to);
                Ok(())
            }
            _ => Err(ClaimgateError::TokenNotHeld {
                registry: self.id,
                token,
            }),
        }
    }
}
