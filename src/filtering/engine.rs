/// Filter/Sort engine: raw token collection + FilterState → ordered,
/// truncated view.
///
/// `derive_view` is pure and deterministic; the positional-cache reset and
/// scroll-to-top that must accompany every rederivation are the list
/// controller's job.
use std::cmp::Ordering;

use crate::tokens::lock;
use crate::tokens::types::{RiskLevel, Token};

use super::types::{FilterRejectionReason, FilterState, SortDirection, SortField};

/// Evaluate the filter predicate chain for one token.
///
/// Tests short-circuit in order. When a search query is present its verdict
/// is final: the threshold tests below it (risk, renounce, lock, holders,
/// liquidity) never run for that token.
pub fn evaluate(token: &Token, filters: &FilterState) -> Result<(), FilterRejectionReason> {
    if filters.hide_honeypots && token.is_honeypot {
        return Err(FilterRejectionReason::Honeypot);
    }

    if filters.show_only_honeypots && !token.is_honeypot {
        return Err(FilterRejectionReason::NotHoneypot);
    }

    let query = filters.search_query.trim();
    if !query.is_empty() {
        return if matches_query(token, query) {
            Ok(())
        } else {
            Err(FilterRejectionReason::SearchMismatch)
        };
    }

    if filters.hide_danger && token.risk == RiskLevel::Danger {
        return Err(FilterRejectionReason::RiskDanger);
    }

    if filters.hide_warning && token.risk == RiskLevel::Warning {
        return Err(FilterRejectionReason::RiskWarning);
    }

    if filters.show_only_safe && token.risk != RiskLevel::Safe {
        return Err(FilterRejectionReason::RiskNotSafe);
    }

    if filters.hide_not_renounced && !token.is_renounced() {
        return Err(FilterRejectionReason::OwnerNotRenounced);
    }

    if filters.hide_unlocked_liquidity && !lock::is_liquidity_locked(token.liquidity_lock.as_deref())
    {
        return Err(FilterRejectionReason::LiquidityUnlocked);
    }

    if filters.min_holders > 0 && token.holder_count < filters.min_holders {
        return Err(FilterRejectionReason::HolderCountBelowMinimum);
    }

    if filters.min_liquidity > 0.0 && token.liquidity < filters.min_liquidity {
        return Err(FilterRejectionReason::LiquidityBelowMinimum);
    }

    Ok(())
}

fn matches_query(token: &Token, query: &str) -> bool {
    let needle = query.to_lowercase();
    token.name.to_lowercase().contains(&needle)
        || token.symbol.to_lowercase().contains(&needle)
        || token.address.to_lowercase().contains(&needle)
}

/// Filter, sort (stable) and truncate the collection to the derived view.
pub fn derive_view(tokens: &[Token], filters: &FilterState) -> Vec<Token> {
    let mut view: Vec<Token> = tokens
        .iter()
        .filter(|token| evaluate(token, filters).is_ok())
        .cloned()
        .collect();

    sort_tokens(&mut view, filters);
    view.truncate(filters.max_records);
    view
}

fn sort_tokens(tokens: &mut [Token], filters: &FilterState) {
    let (field, direction) = SortField::parse(&filters.sort_by);
    let ascending = matches!(direction, SortDirection::Asc);

    tokens.sort_by(|a, b| {
        let ordering = match field {
            SortField::Age => cmp_f64(a.age_hours, b.age_hours),
            SortField::Holders => a.holder_count.cmp(&b.holder_count),
            SortField::Liquidity => cmp_f64(a.liquidity, b.liquidity),
            SortField::SafetyScore => a.risk.safety_score().cmp(&b.risk.safety_score()),
        };

        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn cmp_f64(lhs: f64, rhs: f64) -> Ordering {
    lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal)
}
