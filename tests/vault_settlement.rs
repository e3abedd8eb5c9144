//! Settling pool receipts against a share-based balance vault.
//!
//! The vault here is a minimal in-memory ledger: per token it tracks the
//! underlying total (`elastic`) and the shares issued against it (`base`).

#![allow(clippy::panic)]

use std::collections::HashMap;

use tick_amm::math::mul_div_u128;
use tick_amm::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    elastic: u128,
    base: u128,
}

#[derive(Debug, Default)]
struct MemoryVault {
    totals: HashMap<Address, Totals>,
    shares: HashMap<(Address, Address), u128>,
}

impl MemoryVault {
    fn totals(&self, token: &Address) -> Totals {
        self.totals.get(token).copied().unwrap_or_default()
    }

    /// Grows the underlying total without issuing shares.
    fn accrue_yield(&mut self, token: &Address, amount: u128) {
        self.totals.entry(*token).or_default().elastic += amount;
    }

    fn debit(&mut self, token: &Address, owner: &Address, shares: u128) -> Result<()> {
        let held = self.balance_of(token, owner).get();
        let Some(left) = held.checked_sub(shares) else {
            return Err(AmmError::InsufficientLiquidityOwned {
                requested: shares,
                owned: held,
            });
        };
        self.shares.insert((*token, *owner), left);
        Ok(())
    }

    fn credit(&mut self, token: &Address, owner: &Address, shares: u128) {
        *self.shares.entry((*token, *owner)).or_default() += shares;
    }
}

impl BalanceVault for MemoryVault {
    fn to_shares(&self, token: &Address, amount: Amount, rounding: Rounding) -> Result<Amount> {
        let totals = self.totals(token);
        if totals.base == 0 {
            return Ok(amount);
        }
        mul_div_u128(amount.get(), totals.base, totals.elastic, rounding).map(Amount::new)
    }

    fn to_amount(&self, token: &Address, shares: Amount, rounding: Rounding) -> Result<Amount> {
        let totals = self.totals(token);
        if totals.base == 0 {
            return Ok(shares);
        }
        mul_div_u128(shares.get(), totals.elastic, totals.base, rounding).map(Amount::new)
    }

    fn deposit(&mut self, token: &Address, owner: &Address, amount: Amount) -> Result<Amount> {
        let shares = self.to_shares(token, amount, Rounding::Down)?;
        let totals = self.totals.entry(*token).or_default();
        totals.elastic += amount.get();
        totals.base += shares.get();
        self.credit(token, owner, shares.get());
        Ok(shares)
    }

    fn withdraw(&mut self, token: &Address, owner: &Address, amount: Amount) -> Result<Amount> {
        let shares = self.to_shares(token, amount, Rounding::Up)?;
        self.debit(token, owner, shares.get())?;
        let totals = self.totals.entry(*token).or_default();
        totals.elastic -= amount.get();
        totals.base -= shares.get();
        Ok(shares)
    }

    fn transfer(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        shares: Amount,
    ) -> Result<()> {
        self.debit(token, from, shares.get())?;
        self.credit(token, to, shares.get());
        Ok(())
    }

    fn balance_of(&self, token: &Address, owner: &Address) -> Amount {
        Amount::new(self.shares.get(&(*token, *owner)).copied().unwrap_or(0))
    }
}

// ---------------------------------------------------------------------------
// Settlement helpers
// ---------------------------------------------------------------------------

fn token0() -> Address {
    Address::from_bytes([1; 32])
}

fn token1() -> Address {
    Address::from_bytes([2; 32])
}

fn pool_account() -> Address {
    Address::from_bytes([0xEE; 32])
}

fn provider() -> Address {
    Address::from_bytes([0x11; 32])
}

fn trader() -> Address {
    Address::from_bytes([0x22; 32])
}

fn curve_pool() -> CurvePool {
    let engine = EngineConfig::default();
    let Ok(pair) = TokenPair::new(
        Token::new(token0(), Decimals::MAX),
        Token::new(token1(), Decimals::MAX),
    ) else {
        panic!("distinct tokens");
    };
    let Ok(params) = CurveParameters::new(CurveKind::ConstantProduct, BasisPoints::new(30), &engine)
    else {
        panic!("valid parameters");
    };
    let Ok(config) = CurvePoolConfig::new(pair, params, &engine) else {
        panic!("valid config");
    };
    let Ok(pool) = CurvePool::from_config(&config, &engine) else {
        panic!("pool builds");
    };
    pool
}

/// Moves `amount` of `token` between accounts as vault shares.
fn pay(
    vault: &mut MemoryVault,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: Amount,
    rounding: Rounding,
) {
    let Ok(shares) = vault.to_shares(token, amount, rounding) else {
        panic!("share conversion");
    };
    let Ok(()) = vault.transfer(token, from, to, shares) else {
        panic!("transfer of {amount:?} {token}");
    };
}

fn held(vault: &MemoryVault, token: &Address, owner: &Address) -> u128 {
    let Ok(amount) = vault.to_amount(token, vault.balance_of(token, owner), Rounding::Down) else {
        panic!("amount conversion");
    };
    amount.get()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn mint_and_swap_settle_against_vault() {
    let mut vault = MemoryVault::default();
    let mut pool = curve_pool();

    for token in [token0(), token1()] {
        let Ok(_) = vault.deposit(&token, &provider(), Amount::new(1_000_000)) else {
            panic!("provider deposit");
        };
    }
    let Ok(_) = vault.deposit(&token0(), &trader(), Amount::new(1_000)) else {
        panic!("trader deposit");
    };

    let deposit = ShareDeposit::new(Amount::new(1_000_000), Amount::new(1_000_000));
    let Ok(mint) = pool.mint(&deposit, Liquidity::ZERO, provider()) else {
        panic!("mint");
    };
    pay(&mut vault, &token0(), &provider(), &pool_account(), mint.amount0, Rounding::Up);
    pay(&mut vault, &token1(), &provider(), &pool_account(), mint.amount1, Rounding::Up);

    let request = SwapRequest::new(Amount::new(1_000), SwapDirection::ZeroForOne, trader());
    let Ok(receipt) = pool.swap(&request) else {
        panic!("swap");
    };
    pay(&mut vault, &token0(), &trader(), &pool_account(), receipt.amount_in, Rounding::Up);
    pay(&mut vault, &token1(), &pool_account(), &receipt.recipient, receipt.amount_out, Rounding::Down);

    let reserves = pool.reserves();
    assert_eq!(held(&vault, &token0(), &pool_account()), reserves.reserve0.get());
    assert_eq!(held(&vault, &token1(), &pool_account()), reserves.reserve1.get());
    assert_eq!(held(&vault, &token1(), &trader()), 996);
    assert_eq!(held(&vault, &token0(), &trader()), 0);
}

#[test]
fn yield_raises_share_value() {
    let mut vault = MemoryVault::default();
    let Ok(shares) = vault.deposit(&token0(), &provider(), Amount::new(1_000)) else {
        panic!("deposit");
    };
    assert_eq!(shares, Amount::new(1_000));

    vault.accrue_yield(&token0(), 100);
    assert_eq!(held(&vault, &token0(), &provider()), 1_100);

    // later depositors get fewer shares per unit
    let Ok(late) = vault.deposit(&token0(), &trader(), Amount::new(1_100)) else {
        panic!("late deposit");
    };
    assert_eq!(late, Amount::new(1_000));

    let Ok(up) = vault.to_shares(&token0(), Amount::new(11), Rounding::Up) else {
        panic!("conversion");
    };
    let Ok(down) = vault.to_shares(&token0(), Amount::new(11), Rounding::Down) else {
        panic!("conversion");
    };
    assert_eq!((down, up), (Amount::new(10), Amount::new(10)));
    let Ok(up) = vault.to_shares(&token0(), Amount::new(12), Rounding::Up) else {
        panic!("conversion");
    };
    assert_eq!(up, Amount::new(11));
}

#[test]
fn burn_proceeds_flow_back_to_provider() {
    let mut vault = MemoryVault::default();
    let mut pool = curve_pool();
    for token in [token0(), token1()] {
        let Ok(_) = vault.deposit(&token, &provider(), Amount::new(4_000_000)) else {
            panic!("provider deposit");
        };
    }
    let Ok(mint) = pool.mint(
        &ShareDeposit::new(Amount::new(4_000_000), Amount::new(1_000_000)),
        Liquidity::ZERO,
        provider(),
    ) else {
        panic!("mint");
    };
    pay(&mut vault, &token0(), &provider(), &pool_account(), mint.amount0, Rounding::Up);
    pay(&mut vault, &token1(), &provider(), &pool_account(), mint.amount1, Rounding::Up);

    let withdrawal = ShareWithdrawal {
        owner: provider(),
        shares: pool.shares_of(&provider()),
    };
    let Ok(burn) = pool.burn(&withdrawal, provider()) else {
        panic!("burn");
    };
    pay(&mut vault, &token0(), &pool_account(), &burn.recipient, burn.amount0, Rounding::Down);
    pay(&mut vault, &token1(), &pool_account(), &burn.recipient, burn.amount1, Rounding::Down);

    // the locked minimum stays behind in the pool
    assert_eq!(held(&vault, &token0(), &pool_account()), 2_000);
    assert_eq!(held(&vault, &token1(), &pool_account()), 500);
    assert_eq!(held(&vault, &token0(), &provider()), 4_000_000 - 2_000);
    assert_eq!(held(&vault, &token1(), &provider()), 4_000_000 - 500);
}

#[test]
fn overdrawn_accounts_are_refused() {
    let mut vault = MemoryVault::default();
    let Ok(_) = vault.deposit(&token0(), &trader(), Amount::new(50)) else {
        panic!("deposit");
    };
    assert!(matches!(
        vault.withdraw(&token0(), &trader(), Amount::new(51)),
        Err(AmmError::InsufficientLiquidityOwned {
            requested: 51,
            owned: 50
        })
    ));
    assert!(matches!(
        vault.transfer(&token0(), &trader(), &provider(), Amount::new(51)),
        Err(AmmError::InsufficientLiquidityOwned { .. })
    ));
    let Ok(burned) = vault.withdraw(&token0(), &trader(), Amount::new(50)) else {
        panic!("full withdrawal");
    };
    assert_eq!(burned, Amount::new(50));
    assert_eq!(vault.balance_of(&token0(), &trader()), Amount::ZERO);
}
