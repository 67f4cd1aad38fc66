//! Fungible-token ledger capability.

use std::collections::HashMap;

use rust_decimal::Decimal;

use claimgate_types::{AccountId, ClaimgateError, RegistryId, Result};

/// Mint/transfer capability over a fungible ledger.
///
/// Implementations guarantee balances never go negative: amounts must be
/// strictly positive, and a transfer either moves the full amount or fails
/// with no effect.
pub trait FungibleRegistry {
    /// The handle this ledger is registered under.
    fn id(&self) -> RegistryId;

    /// Current balance of `account`.
    fn balance_of(&self, account: AccountId) -> Decimal;

    /// Credit `amount` to `account` out of thin air (issuance).
    ///
    /// # Errors
    /// Returns [`ClaimgateError::NonPositiveAmount`] unless `amount` is
    /// strictly positive.
    fn deposit(&mut self, account: AccountId, amount: Decimal) -> Result<()>;

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// Returns [`ClaimgateError::NonPositiveAmount`] unless `amount` is
    /// strictly positive, [`ClaimgateError::InsufficientCustody`] if `from`
    /// holds less than `amount`.
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()>;
}

/// In-memory fungible ledger: per-account `Decimal` balances.
#[derive(Debug, Clone)]
pub struct CoinLedger {
    id: RegistryId,
    balances: HashMap<AccountId, Decimal>,
}

impl CoinLedger {
    #[must_use]
    pub fn new(id: RegistryId) -> Self {
        Self {
            id,
            balances: HashMap::new(),
        }
    }

    /// Total supply across all accounts.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().copied().sum()
    }
}

impl FungibleRegistry for CoinLedger {
    fn id(&self) -> RegistryId {
        self.id
    }

    fn balance_of(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }

    fn deposit(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(ClaimgateError::NonPositiveAmount { amount });
        }
        *self.balances.entry(account).or_insert(Decimal::ZERO) += amount;
        tracing::debug!(registry = %self.id, %account, %amount, "fungible deposit");
        Ok(())
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(ClaimgateError::NonPositiveAmount { amount });
        }
        let held = self.balance_of(from);
        if held < amount {
            return Err(ClaimgateError::InsufficientCustody {
                needed: amount,
                available: held,
            });
        }
        *self.balances.entry(from).or_insert(Decimal::ZERO) -= amount;
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn deposit_and_balance() {
        let mut ledger = CoinLedger::new(RegistryId::new());
        let alice = AccountId([1u8; 32]);

        assert_eq!(ledger.balance_of(alice), Decimal::ZERO);
        ledger.deposit(alice, dec(100)).unwrap();
        assert_eq!(ledger.balance_of(alice), dec(100));
    }

    #[test]
    fn non_positive_deposit_rejected() {
        let mut ledger = CoinLedger::new(RegistryId::new());
        let alice = AccountId([1u8; 32]);

        for amount in [dec(0), dec(-50)] {
            let err = ledger.deposit(alice, amount).unwrap_err();
            assert!(matches!(err, ClaimgateError::NonPositiveAmount { .. }));
        }
        assert_eq!(ledger.balance_of(alice), Decimal::ZERO);
    }

    #[test]
    fn non_positive_transfer_rejected() {
        let mut ledger = CoinLedger::new(RegistryId::new());
        let alice = AccountId([1u8; 32]);
        let bob = AccountId([2u8; 32]);
        ledger.deposit(alice, dec(100)).unwrap();

        // A negative transfer would debit the recipient and credit the
        // sender; a zero transfer is meaningless. Both must fail.
        for amount in [dec(0), dec(-40)] {
            let err = ledger.transfer(alice, bob, amount).unwrap_err();
            assert!(matches!(err, ClaimgateError::NonPositiveAmount { .. }));
        }
        assert_eq!(ledger.balance_of(alice), dec(100));
        assert_eq!(ledger.balance_of(bob), Decimal::ZERO);
    }

    #[test]
    fn transfer_moves_full_amount() {
        let mut ledger = CoinLedger::new(RegistryId::new());
        let alice = AccountId([1u8; 32]);
        let bob = AccountId([2u8; 32]);

        ledger.deposit(alice, dec(100)).unwrap();
        ledger.transfer(alice, bob, dec(40)).unwrap();

        assert_eq!(ledger.balance_of(alice), dec(60));
        assert_eq!(ledger.balance_of(bob), dec(40));
        assert_eq!(ledger.total_supply(), dec(100));
    }

    #[test]
    fn transfer_shortfall_has_no_effect() {
        let mut ledger = CoinLedger::new(RegistryId::new());
        let alice = AccountId([1u8; 32]);
        let bob = AccountId([2u8; 32]);
        ledger.deposit(alice, dec(10)).unwrap();

        let err = ledger.transfer(alice, bob, dec(11)).unwrap_err();
        assert!(matches!(
            err,
            ClaimgateError::InsufficientCustody { needed, available }
                if needed == dec(11) && available == dec(10)
        ));
        assert_eq!(ledger.balance_of(alice), dec(10));
        assert_eq!(ledger.balance_of(bob), Decimal::ZERO);
    }
}
