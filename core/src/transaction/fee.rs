//! Gas distribution policy.
//!
//! Gas is not burned — it is split among the nodes that process the
//! transaction: an aggregator node takes a fixed percentage, the rest is
//! shared evenly across assignment nodes. All arithmetic is integer;
//! whatever remainder even division leaves over goes to the aggregator as
//! the designated default recipient, so the distributed total always
//! equals the declared gas exactly. No implicit rounding, no lost units.

use crate::config::DEFAULT_AGGREGATOR_PERCENT;

use super::types::InterestAssign;

/// A fixed-percentage gas distribution policy.
///
/// Configured once (per network deployment) and applied by the builder to
/// every transaction's gas amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeePolicy {
    /// The aggregator node id — also the default recipient for integer
    /// remainders.
    pub aggregator: String,
    /// The aggregator's share of the gas, in whole percent (0–100).
    pub aggregator_percent: u8,
    /// Assignment nodes sharing the remaining gas evenly, in a fixed
    /// order (the order is part of the canonical encoding).
    pub assign_nodes: Vec<String>,
}

impl FeePolicy {
    /// Creates a policy with the network default aggregator share.
    pub fn new(aggregator: &str, assign_nodes: Vec<String>) -> Self {
        Self {
            aggregator: aggregator.to_string(),
            aggregator_percent: DEFAULT_AGGREGATOR_PERCENT,
            assign_nodes,
        }
    }

    /// Distributes `gas` into ordered [`InterestAssign`] records.
    ///
    /// Order: aggregator first, then assignment nodes in configured
    /// order. The amounts always sum to `gas` exactly. Zero gas yields an
    /// empty distribution — no zero-amount records are emitted for it.
    pub fn distribute(&self, gas: u64) -> Vec<InterestAssign> {
        if gas == 0 {
            return Vec::new();
        }

        // Widen before multiplying so a pathological gas value cannot wrap.
        let aggregator_share =
            (u128::from(gas) * u128::from(self.aggregator_percent) / 100) as u64;
        let pool = gas - aggregator_share;

        if self.assign_nodes.is_empty() {
            return vec![InterestAssign {
                node: self.aggregator.clone(),
                amount: gas,
            }];
        }

        let per_node = pool / self.assign_nodes.len() as u64;
        let leftover = pool - per_node * self.assign_nodes.len() as u64;

        let mut records = Vec::with_capacity(self.assign_nodes.len() + 1);
        records.push(InterestAssign {
            node: self.aggregator.clone(),
            amount: aggregator_share + leftover,
        });
        for node in &self.assign_nodes {
            records.push(InterestAssign {
                node: node.clone(),
                amount: per_node,
            });
        }
        records
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(percent: u8, nodes: &[&str]) -> FeePolicy {
        FeePolicy {
            aggregator: "agg".into(),
            aggregator_percent: percent,
            assign_nodes: nodes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn total(records: &[InterestAssign]) -> u64 {
        records.iter().map(|r| r.amount).sum()
    }

    #[test]
    fn distribution_sums_to_gas_exactly() {
        let p = policy(60, &["n1", "n2", "n3"]);
        for gas in [1u64, 5, 7, 100, 999, 1_000_000, 12_345_678] {
            assert_eq!(total(&p.distribute(gas)), gas, "gas {} lost units", gas);
        }
    }

    #[test]
    fn aggregator_takes_percent_plus_remainder() {
        // gas 10 at 60%: aggregator 6, pool 4, two nodes get 2 each.
        let p = policy(60, &["n1", "n2"]);
        let records = p.distribute(10);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].node, "agg");
        assert_eq!(records[0].amount, 6);
        assert_eq!(records[1].amount, 2);
        assert_eq!(records[2].amount, 2);
    }

    #[test]
    fn remainder_goes_to_aggregator() {
        // gas 10 at 60%: pool 4 across 3 nodes = 1 each, leftover 1 to agg.
        let p = policy(60, &["n1", "n2", "n3"]);
        let records = p.distribute(10);
        assert_eq!(records[0].amount, 7); // 6 + 1 leftover
        assert_eq!(records[1].amount, 1);
        assert_eq!(total(&records), 10);
    }

    #[test]
    fn no_assign_nodes_means_aggregator_takes_all() {
        let p = policy(60, &[]);
        let records = p.distribute(42);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 42);
    }

    #[test]
    fn zero_gas_distributes_nothing() {
        let p = policy(60, &["n1"]);
        assert!(p.distribute(0).is_empty());
    }

    #[test]
    fn record_order_is_stable() {
        let p = policy(50, &["n1", "n2"]);
        let a = p.distribute(100);
        let b = p.distribute(100);
        assert_eq!(a, b);
        assert_eq!(a[0].node, "agg");
        assert_eq!(a[1].node, "n1");
        assert_eq!(a[2].node, "n2");
    }

    #[test]
    fn hundred_percent_aggregator() {
        let p = policy(100, &["n1", "n2"]);
        let records = p.distribute(10);
        assert_eq!(records[0].amount, 10);
        assert_eq!(records[1].amount, 0);
        assert_eq!(total(&records), 10);
    }
}
