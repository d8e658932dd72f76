use anchor_lang::prelude::*;

use crate::{
    constants::{
        ENGINE_CONFIG_SEED, MAX_SHAREHOLDERS, PER_SHARE_RATE_SCALE, PROFIT_PERIOD_SEED,
        PROFIT_PERIOD_SIZE, QUARTER_LEDGER_SEED,
    },
    engine::{distribute, Candidate},
    errors::ErrorCode,
    events::{
        PeriodProcessed, PriorDistributionsDiscarded, ReconciliationMismatch, RolloverBooked,
        ShareholderMaxedOut, UnenforcedTierCeiling,
    },
    instructions::calculate_quarterly_profit::ledger_totals,
    period::validate_period,
    policy::Ceiling,
    profit::QuarterlyProfit,
    reconciliation::reconcile,
    state::{
        DistributionEntry, EngineConfig, PaymentStatus, PeriodStatus, ProfitPeriod, Shareholder,
    },
    utils::is_freshly_created,
};

#[derive(Accounts)]
#[instruction(period_type: String, period_value: String)]
pub struct ProcessQuarterlyDistribution<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = PROFIT_PERIOD_SIZE,
        seeds = [PROFIT_PERIOD_SEED, period_value.as_bytes()],
        bump
    )]
    pub profit_period: AccountLoader<'info, ProfitPeriod>,

    /// CHECK: Quarter ledger PDA; still uninitialized when nothing was booked
    #[account(
        seeds = [QUARTER_LEDGER_SEED, period_value.as_bytes()],
        bump
    )]
    pub quarter_ledger: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    // remaining_accounts: every registered Shareholder account, writable
}

/// One allocation as returned to the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributionSummary {
    pub shareholder: Pubkey,
    pub amount: u64,
    pub maxout_applied: bool,
}

/// Outcome of a processing run, returned as instruction return data
/// Sized to fit the return data limit with a full registry
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PeriodSummary {
    pub period: Pubkey,
    pub generation: u32,
    pub distributable_pool: u64,
    pub distributed: u64,
    pub remainder: u64,
    pub rounds: u8,
    /// Same order as the period's distribution entries
    pub distributions: Vec<DistributionSummary>,
}

/// Eligible shareholder snapshot taken before any state is written
struct EligibleShareholder {
    index: usize,
    key: Pubkey,
    tier: u8,
    nominal_ceiling_bps: u32,
    unenforced_ceiling: bool,
    candidate: Candidate,
}

/// Runs profit calculation, allocation and reconciliation for a quarter
///
/// A completed period is reprocessed only with `force`, and only while none
/// of its distributions has been paid.
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProcessQuarterlyDistribution<'info>>,
    period_type: String,
    period_value: String,
    force: bool,
) -> Result<PeriodSummary> {
    let quarter = validate_period(&period_type, &period_value)?;
    let now = Clock::get()?.unix_timestamp;

    // Phase 1: Read period, config and shareholder state
    let fresh = is_freshly_created(&ctx.accounts.profit_period.to_account_info())?;

    let (discarded_count, rollover_reversed, generation, discarded_pending) = if fresh {
        (0u8, 0u64, 0u32, Vec::new())
    } else {
        let period = ctx.accounts.profit_period.load()?;
        require!(
            !period.is_completed() || force,
            ErrorCode::PeriodAlreadyCompleted
        );
        require!(
            !period.has_paid_distributions(),
            ErrorCode::PaidDistributionsExist
        );
        // Pending entries of the discarded run still hold shareholder headroom
        let discarded_pending: Vec<(Pubkey, u64)> = period
            .active_distributions()
            .iter()
            .filter(|d| d.is_pending())
            .map(|d| (d.shareholder, d.amount))
            .collect();
        (
            period.distribution_count,
            period.remainder_booked,
            period.generation,
            discarded_pending,
        )
    };

    let (corporate_tax_bps, profit_share_bps, shareholder_count, tier_policies) = {
        let engine_config = ctx.accounts.engine_config.load()?;
        (
            engine_config.corporate_tax_bps,
            engine_config.profit_share_bps,
            engine_config.shareholder_count as usize,
            engine_config.tier_policies,
        )
    };

    let (revenue, expenses) = ledger_totals(&ctx.accounts.quarter_ledger)?;
    let profit =
        QuarterlyProfit::calculate(revenue, expenses, corporate_tax_bps, profit_share_bps)?;
    let pool = profit.distributable_pool()?;

    // The eligible set is only complete when every registered shareholder is supplied
    let shareholder_infos = ctx.remaining_accounts;
    require!(
        shareholder_infos.len() == shareholder_count,
        ErrorCode::IncompleteShareholderSet
    );

    for (discarded_key, _) in &discarded_pending {
        require!(
            shareholder_infos.iter().any(|info| info.key() == *discarded_key),
            ErrorCode::IncompleteShareholderSet
        );
    }

    let mut eligible: Vec<EligibleShareholder> = Vec::with_capacity(shareholder_infos.len());
    let mut released: Vec<u64> = vec![0; shareholder_infos.len()];

    for (i, info) in shareholder_infos.iter().enumerate() {
        for other in shareholder_infos.iter().skip(i + 1) {
            require!(info.key() != other.key(), ErrorCode::DuplicateShareholder);
        }

        released[i] = discarded_pending
            .iter()
            .filter(|(key, _)| *key == info.key())
            .try_fold(0u64, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or(ErrorCode::MathOverflow)?;

        let loader = AccountLoader::<'info, Shareholder>::try_from(info)
            .map_err(|_| ErrorCode::InvalidShareholderAccount)?;
        let shareholder = loader.load()?;

        let policy = tier_policies
            .get(shareholder.tier as usize)
            .filter(|policy| policy.configured != 0)
            .ok_or(ErrorCode::InvalidTier)?;

        if shareholder.total_shares == 0 || policy.is_share_exempt() {
            continue;
        }

        eligible.push(EligibleShareholder {
            index: i,
            key: info.key(),
            tier: shareholder.tier,
            nominal_ceiling_bps: policy.nominal_ceiling_bps,
            unenforced_ceiling: policy.has_unenforced_nominal_ceiling(),
            candidate: Candidate {
                shares: shareholder.total_shares,
                ceiling: shareholder.ceiling(policy)?,
                committed: shareholder
                    .committed_payout()?
                    .checked_sub(released[i])
                    .ok_or(ErrorCode::MathUnderflow)?,
            },
        });
    }

    // Phase 2: Allocate and reconcile (pure)
    let candidates: Vec<Candidate> = eligible.iter().map(|e| e.candidate).collect();
    let plan = distribute(pool, &candidates)?;
    let reconciliation = reconcile(pool, &plan.allocations, plan.remainder)?;

    let per_share_rate = u64::try_from(
        (pool as u128) * (PER_SHARE_RATE_SCALE as u128) / (plan.total_shares as u128),
    )
    .unwrap_or(u64::MAX);

    // Phase 3: Write back period, config and shareholder state
    let period_key = ctx.accounts.profit_period.key();

    {
        let period = &mut if fresh {
            ctx.accounts.profit_period.load_init()?
        } else {
            ctx.accounts.profit_period.load_mut()?
        };

        period.distributions = [DistributionEntry::default(); MAX_SHAREHOLDERS];

        for (entry, (holder, allocation)) in period
            .distributions
            .iter_mut()
            .zip(eligible.iter().zip(plan.allocations.iter()))
        {
            *entry = DistributionEntry {
                shareholder: holder.key,
                shares: holder.candidate.shares,
                amount: allocation.amount,
                paid_at: 0,
                maxout_applied: allocation.maxout_applied as u8,
                payment_status: PaymentStatus::Pending as u8,
                _padding: [0; 6],
            };
        }

        period.total_revenue = profit.revenue;
        period.total_expenses = profit.expenses;
        period.net_profit = profit.net_profit as u64;
        period.tax_amount = profit.tax_amount;
        period.net_profit_after_tax = profit.net_profit_after_tax;
        period.distributable_pool = pool;
        period.total_eligible_shares = plan.total_shares;
        period.per_share_rate = per_share_rate;
        period.remainder_booked = plan.remainder;
        period.total_paid = 0;
        period.processed_at = now;
        period.completed_at = now;
        period.generation = generation.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        period.distribution_count = eligible.len() as u8;
        period.rounds = plan.rounds;
        period.bump = ctx.bumps.profit_period;
        period.period_value = quarter.key();
        period.status = PeriodStatus::Completed as u8;
    }

    let treasury_rollover = {
        let engine_config = &mut ctx.accounts.engine_config.load_mut()?;
        // Reverse what the discarded run booked before booking this run's remainder
        engine_config.treasury_rollover = engine_config
            .treasury_rollover
            .checked_sub(rollover_reversed)
            .ok_or(ErrorCode::MathUnderflow)?
            .checked_add(plan.remainder)
            .ok_or(ErrorCode::MathOverflow)?;
        (engine_config.treasury, engine_config.treasury_rollover)
    };

    // Swap the discarded run's reservations for this run's allocations
    let mut allocated: Vec<u64> = vec![0; shareholder_infos.len()];
    for (holder, allocation) in eligible.iter().zip(plan.allocations.iter()) {
        allocated[holder.index] = allocation.amount;
    }

    for (i, info) in shareholder_infos.iter().enumerate() {
        if released[i] == 0 && allocated[i] == 0 {
            continue;
        }
        let loader = AccountLoader::<'info, Shareholder>::try_from(info)?;
        let shareholder = &mut loader.load_mut()?;
        let policy = tier_policies
            .get(shareholder.tier as usize)
            .ok_or(ErrorCode::InvalidTier)?;
        shareholder.release_distribution(released[i])?;
        shareholder.reserve_distribution(allocated[i])?;
        let ceiling = shareholder.ceiling(policy)?;
        shareholder.refresh_maxout(ceiling)?;
    }

    for (holder, allocation) in eligible.iter().zip(plan.allocations.iter()) {
        if holder.unenforced_ceiling {
            emit!(UnenforcedTierCeiling {
                period: period_key,
                shareholder: holder.key,
                tier: holder.tier,
                nominal_ceiling_bps: holder.nominal_ceiling_bps,
                timestamp: now,
            });
        }

        let Ceiling::Finite(limit) = holder.candidate.ceiling else {
            continue;
        };
        let cumulative_with_allocation = holder
            .candidate
            .committed
            .checked_add(allocation.amount)
            .ok_or(ErrorCode::MathOverflow)?;
        if cumulative_with_allocation < limit {
            continue;
        }

        emit!(ShareholderMaxedOut {
            period: period_key,
            shareholder: holder.key,
            ceiling: limit,
            cumulative_with_allocation,
            timestamp: now,
        });
    }

    if !fresh {
        emit!(PriorDistributionsDiscarded {
            period: period_key,
            generation,
            discarded_count,
            rollover_reversed,
            timestamp: now,
        });
    }

    if plan.remainder > 0 {
        emit!(RolloverBooked {
            period: period_key,
            treasury: treasury_rollover.0,
            amount: plan.remainder,
            rounds: plan.rounds,
            treasury_rollover: treasury_rollover.1,
            timestamp: now,
        });
    }

    if !reconciliation.is_balanced() {
        #[cfg(feature = "verbose")]
        msg!(
            "Reconciliation mismatch: pool {}, accounted for {}",
            reconciliation.pool,
            reconciliation.accounted_for
        );

        emit!(ReconciliationMismatch {
            period: period_key,
            pool: reconciliation.pool,
            accounted_for: reconciliation.accounted_for,
            timestamp: now,
        });
    }

    emit!(PeriodProcessed {
        period: period_key,
        period_value,
        generation: generation.saturating_add(1),
        total_revenue: profit.revenue,
        total_expenses: profit.expenses,
        net_profit: profit.net_profit as u64,
        distributable_pool: pool,
        total_eligible_shares: plan.total_shares,
        per_share_rate,
        distribution_count: eligible.len() as u8,
        distributed: plan.distributed,
        remainder: plan.remainder,
        rounds: plan.rounds,
        forced: !fresh,
        timestamp: now,
    });

    Ok(PeriodSummary {
        period: period_key,
        generation: generation.saturating_add(1),
        distributable_pool: pool,
        distributed: plan.distributed,
        remainder: plan.remainder,
        rounds: plan.rounds,
        distributions: eligible
            .iter()
            .zip(plan.allocations.iter())
            .map(|(holder, allocation)| DistributionSummary {
                shareholder: holder.key,
                amount: allocation.amount,
                maxout_applied: allocation.maxout_applied,
            })
            .collect(),
    })
}
